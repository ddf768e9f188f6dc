//! One-time construction of the landing scene.

use cgmath::{Deg, Vector3, Zero};
use rand::Rng;

use crate::{
    config::SceneConfig,
    gfx::{
        camera::{OrbitControls, PerspectiveCamera},
        geometry::Geometry,
        resources::texture::ColorSpace,
        scene::{color_from_hex, Helper, Light, Material, Mesh, Scene},
    },
};

use super::{stars::add_star, World};

/// Size of the drawing area
///
/// `width` and `height` are logical pixels; the surface itself is
/// `logical × pixel_ratio` physical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
    pub pixel_ratio: f64,
}

impl Viewport {
    pub fn new(width: u32, height: u32, pixel_ratio: f64) -> Self {
        Self {
            width,
            height,
            pixel_ratio,
        }
    }

    /// Builds a viewport from a physical window size and scale factor
    ///
    /// A window narrower than one logical pixel still counts as one wide.
    pub fn from_physical(width: u32, height: u32, pixel_ratio: f64) -> Self {
        let ratio = if pixel_ratio > 0.0 { pixel_ratio } else { 1.0 };
        let logical = |physical: u32| ((physical as f64 / ratio).round() as u32).max(1);
        Self::new(logical(width), logical(height), ratio)
    }

    /// Width over height, each clamped to at least one pixel so the
    /// projection stays valid for degenerate windows
    pub fn aspect(&self) -> f32 {
        self.width.max(1) as f32 / self.height.max(1) as f32
    }

    pub fn physical_size(&self) -> (u32, u32) {
        (
            (self.width as f64 * self.pixel_ratio).round() as u32,
            (self.height as f64 * self.pixel_ratio).round() as u32,
        )
    }
}

/// Builds the scene, camera and controls.
///
/// Texture loads are started here but never awaited; meshes referencing
/// them render with placeholders until the images arrive.
pub fn build_world<R: Rng>(config: &SceneConfig, viewport: Viewport, rng: &mut R) -> World {
    let mut scene = Scene::new();

    let mut camera = PerspectiveCamera::new(
        Deg(config.fov),
        viewport.aspect(),
        config.near,
        config.far,
    );
    camera.set_z(config.camera_z);
    camera.look_at(Vector3::zero());
    camera.update_view_proj();

    let torus = scene.add_mesh(Mesh::new(
        "torus",
        Geometry::torus(10.0, 3.0, 16, 100),
        Material::standard(color_from_hex(0xFF6347)),
    ));

    let point_light = scene.add_light(Light::point(
        Vector3::new(5.0, 5.0, 5.0),
        color_from_hex(0xffffff),
    ));
    scene.add_light(Light::ambient(color_from_hex(0xffffff)));

    if config.show_helpers {
        scene.add_helper(Helper::PointLight {
            light: point_light,
            sphere_size: 1.0,
        });
        scene.add_helper(Helper::Grid {
            size: 200.0,
            divisions: 50,
            center_color: color_from_hex(0x444444),
            grid_color: color_from_hex(0x888888),
        });
    }

    let mut controls = OrbitControls::new(&camera, viewport.physical_size().1 as f32);
    if config.enable_damping {
        controls = controls.with_damping(config.damping_factor);
    }
    // The wheel belongs to the scroll reactor when it is active
    controls.enable_zoom = !config.scroll_reactive;
    controls.save_state(&camera);

    let mut stars = Vec::with_capacity(config.star_count);
    for _ in 0..config.star_count {
        stars.push(add_star(&mut scene, rng, config.star_spread));
    }

    let space = scene
        .textures
        .load(config.asset("space.png"), ColorSpace::Srgb);
    scene.set_background(space);

    let robin = scene
        .textures
        .load(config.asset("robin.jpg"), ColorSpace::Srgb);
    let avatar = scene.add_mesh(Mesh::new(
        "avatar",
        Geometry::cuboid(3.0, 3.0, 3.0),
        Material::basic(color_from_hex(0xffffff)).with_map(robin),
    ));

    let sun_map = scene
        .textures
        .load(config.asset("sun2.png"), ColorSpace::Srgb);
    let normal_map = scene
        .textures
        .load(config.asset("normal.png"), ColorSpace::Linear);
    let sun = scene.add_mesh(Mesh::new(
        "sun",
        Geometry::sphere(3.0, 32, 32),
        Material::standard(color_from_hex(0xffffff))
            .with_map(sun_map)
            .with_normal_map(normal_map),
    ));
    scene.mesh_mut(sun).set_position(-10.0, 0.0, 30.0);

    let stats = scene.get_statistics();
    log::info!(
        "Scene built: {} meshes ({} stars), {} lights, {} helpers, {} textures loading",
        stats.mesh_count,
        stars.len(),
        stats.light_count,
        stats.helper_count,
        stats.texture_count
    );

    World {
        scene,
        camera,
        controls,
        torus,
        avatar,
        sun,
        stars,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::stars::STAR_NAME;
    use rand::{rngs::StdRng, SeedableRng};

    fn build(viewport: Viewport) -> World {
        let mut rng = StdRng::seed_from_u64(2024);
        build_world(&SceneConfig::default(), viewport, &mut rng)
    }

    #[test]
    fn test_population_for_any_viewport() {
        for viewport in [
            Viewport::new(1200, 800, 1.0),
            Viewport::new(390, 844, 3.0),
            Viewport::new(1, 1, 1.0),
        ] {
            let world = build(viewport);
            let scene = &world.scene;
            assert_eq!(scene.count_named("torus"), 1);
            assert_eq!(scene.count_named("avatar"), 1);
            assert_eq!(scene.count_named("sun"), 1);
            assert_eq!(scene.count_named(STAR_NAME), 200);
            assert_eq!(scene.lights().len(), 2);
            assert_eq!(world.stars.len(), 200);
        }
    }

    #[test]
    fn test_camera_starts_at_thirty() {
        let world = build(Viewport::new(1200, 800, 2.0));
        assert_eq!(world.camera.position, Vector3::new(0.0, 0.0, 30.0));
        assert_eq!(world.camera.target, Vector3::zero());
        assert!((world.camera.aspect - 1.5).abs() < 1e-6);
        assert_eq!(world.camera.fovy, Deg(75.0));
    }

    #[test]
    fn test_primary_meshes() {
        let world = build(Viewport::new(800, 600, 1.0));
        let scene = &world.scene;

        let torus = scene.mesh(world.torus);
        assert_eq!(*torus.geometry(), Geometry::torus(10.0, 3.0, 16, 100));
        assert!(torus.material().is_lit());

        let avatar = scene.mesh(world.avatar);
        assert!(!avatar.material().is_lit());
        assert!(avatar.material().map().is_some());

        let sun = scene.mesh(world.sun);
        assert_eq!(sun.position, Vector3::new(-10.0, 0.0, 30.0));
        assert!(sun.material().map().is_some());
        assert!(sun.material().normal_map().is_some());

        assert!(scene.background.is_some());
        assert_eq!(scene.textures.len(), 4);
    }

    #[test]
    fn test_helpers_follow_config() {
        let mut rng = StdRng::seed_from_u64(0);
        let with = build_world(&SceneConfig::default(), Viewport::new(10, 10, 1.0), &mut rng);
        assert_eq!(with.scene.helpers().len(), 2);

        let without = build_world(
            &SceneConfig::default().with_helpers(false),
            Viewport::new(10, 10, 1.0),
            &mut rng,
        );
        assert!(without.scene.helpers().is_empty());
        assert_eq!(without.scene.lights().len(), 2);
    }

    #[test]
    fn test_scroll_mode_disables_zoom() {
        let mut rng = StdRng::seed_from_u64(0);
        let world = build_world(
            &SceneConfig::default().with_scroll_reactive(true),
            Viewport::new(10, 10, 1.0),
            &mut rng,
        );
        assert!(!world.controls.enable_zoom);
    }

    #[test]
    fn test_degenerate_viewports_still_build() {
        let sliver = Viewport::from_physical(1, 800, 3.0);
        assert_eq!(sliver.width, 1);

        for viewport in [Viewport::new(0, 800, 1.0), sliver, Viewport::new(640, 0, 1.0)] {
            let world = build(viewport);
            assert!(world.camera.aspect.is_finite() && world.camera.aspect > 0.0);
            assert_eq!(world.scene.count_named(STAR_NAME), 200);
            assert!(world.camera.uniform.view_proj.iter().flatten().all(|v| v.is_finite()));
        }
    }

    #[test]
    fn test_viewport_sizes() {
        let viewport = Viewport::from_physical(2400, 1600, 2.0);
        assert_eq!((viewport.width, viewport.height), (1200, 800));
        assert_eq!(viewport.physical_size(), (2400, 1600));
        assert!((viewport.aspect() - 1.5).abs() < 1e-6);
    }
}
