use cgmath::Vector3;
use rand::Rng;

use crate::gfx::{
    geometry::Geometry,
    scene::{color_from_hex, Material, Mesh, MeshId, Scene},
};

pub const STAR_NAME: &str = "star";

/// Adds one small white sphere at a uniformly random position.
///
/// Each coordinate is drawn independently from `[-spread / 2, spread / 2]`.
/// Stars are lit, so they only show up once the scene has lights.
pub fn add_star<R: Rng>(scene: &mut Scene, rng: &mut R, spread: f32) -> MeshId {
    let half = spread.abs() / 2.0;
    let mut star = Mesh::new(
        STAR_NAME,
        Geometry::sphere(0.25, 24, 24),
        Material::standard(color_from_hex(0xffffff)),
    );
    star.position = Vector3::new(
        rng.random_range(-half..=half),
        rng.random_range(-half..=half),
        rng.random_range(-half..=half),
    );
    scene.add_mesh(star)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_stars_stay_inside_spread() {
        let mut scene = Scene::new();
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..500 {
            add_star(&mut scene, &mut rng, 100.0);
        }
        assert_eq!(scene.count_named(STAR_NAME), 500);
        for star in scene.meshes() {
            for c in [star.position.x, star.position.y, star.position.z] {
                assert!((-50.0..=50.0).contains(&c), "coordinate {} out of range", c);
            }
        }
    }

    #[test]
    fn test_same_seed_same_field() {
        let mut a = Scene::new();
        let mut b = Scene::new();
        add_star(&mut a, &mut StdRng::seed_from_u64(7), 100.0);
        add_star(&mut b, &mut StdRng::seed_from_u64(7), 100.0);
        assert_eq!(a.meshes()[0].position, b.meshes()[0].position);
    }

    #[test]
    fn test_star_shape() {
        let mut scene = Scene::new();
        let id = add_star(&mut scene, &mut StdRng::seed_from_u64(0), 100.0);
        let star = scene.mesh(id);
        assert_eq!(*star.geometry(), Geometry::sphere(0.25, 24, 24));
        assert!(star.material().is_lit());
        assert_eq!(star.rotation, Vector3::new(0.0, 0.0, 0.0));
    }
}
