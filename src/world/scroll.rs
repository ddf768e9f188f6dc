use winit::{dpi::PhysicalPosition, event::MouseScrollDelta};

use super::{Spin, World};

/// Pixels one wheel notch scrolls the virtual page
pub const LINE_HEIGHT_PX: f32 = 100.0;

/// Maps a page scroll offset onto the camera and two meshes.
///
/// The offset `t` is the page top position: 0 at rest, negative once
/// scrolled down. Each scroll event places the camera at `-0.01 t` on all
/// three axes and gives the sun and avatar one extra [`Spin`] step on top
/// of the per-frame rotation.
///
/// There is no page to scroll in a native window, so wheel input is
/// accumulated into a virtual offset that never goes above the top.
#[derive(Debug, Default)]
pub struct ScrollReactor {
    offset: f32,
}

impl ScrollReactor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual page offset
    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// Reacts to a scroll event with page offset `t`
    pub fn apply(world: &mut World, t: f32) {
        let d = t * -0.01;
        world.camera.set_position(d, d, d);

        let scene = &mut world.scene;
        scene.mesh_mut(world.sun).rotate_by(Spin::vector(Spin::SUN));
        scene
            .mesh_mut(world.avatar)
            .rotate_by(Spin::vector(Spin::AVATAR));
    }

    /// Scrolls the virtual page by `dy` pixels (positive = towards the top)
    /// and reacts to the new offset
    pub fn scroll_by(&mut self, world: &mut World, dy: f32) {
        self.offset = (self.offset + dy).min(0.0);
        Self::apply(world, self.offset);
        log::trace!("Scroll offset {}", self.offset);
    }

    /// Converts a wheel event into page pixels
    pub fn wheel_pixels(delta: &MouseScrollDelta) -> f32 {
        match delta {
            MouseScrollDelta::LineDelta(_, lines) => lines * LINE_HEIGHT_PX,
            MouseScrollDelta::PixelDelta(PhysicalPosition { y, .. }) => *y as f32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::SceneConfig,
        world::{build_world, FrameDriver, Viewport},
    };
    use cgmath::{InnerSpace, Vector3};
    use rand::{rngs::StdRng, SeedableRng};

    fn world() -> World {
        let mut rng = StdRng::seed_from_u64(5);
        build_world(
            &SceneConfig::default().with_star_count(3),
            Viewport::new(800, 600, 1.0),
            &mut rng,
        )
    }

    #[test]
    fn test_apply_moves_camera_and_spins() {
        let mut world = world();
        ScrollReactor::apply(&mut world, -500.0);

        assert!((world.camera.position - Vector3::new(5.0, 5.0, 5.0)).magnitude() < 1e-5);
        let sun = world.scene.mesh(world.sun).rotation;
        assert!((sun - Vector3::new(0.05, 0.075, 0.05)).magnitude() < 1e-6);
        let avatar = world.scene.mesh(world.avatar).rotation;
        assert!((avatar - Vector3::new(0.0, 0.01, 0.01)).magnitude() < 1e-6);
        assert_eq!(world.scene.mesh(world.torus).rotation, Vector3::new(0.0, 0.0, 0.0));
    }

    #[test]
    fn test_scroll_adds_to_frame_rotation() {
        let mut world = world();
        let mut driver = FrameDriver::new();
        driver.tick(&mut world);
        ScrollReactor::apply(&mut world, 0.0);

        assert_eq!(world.camera.position, Vector3::new(0.0, 0.0, 0.0));
        let sun = world.scene.mesh(world.sun).rotation;
        assert!((sun - Vector3::new(0.1, 0.15, 0.1)).magnitude() < 1e-6);
    }

    #[test]
    fn test_offset_stops_at_top() {
        let mut world = world();
        let mut reactor = ScrollReactor::new();
        reactor.scroll_by(&mut world, -300.0);
        assert_eq!(reactor.offset(), -300.0);
        reactor.scroll_by(&mut world, 1000.0);
        assert_eq!(reactor.offset(), 0.0);
    }

    #[test]
    fn test_wheel_pixels() {
        assert_eq!(
            ScrollReactor::wheel_pixels(&MouseScrollDelta::LineDelta(0.0, -2.0)),
            -200.0
        );
        assert_eq!(
            ScrollReactor::wheel_pixels(&MouseScrollDelta::PixelDelta(PhysicalPosition::new(
                0.0, 35.0
            ))),
            35.0
        );
    }
}
