//! # The landing scene
//!
//! Everything specific to this scene lives here: the one-time
//! [`build_world`] step, the star factory, the per-frame [`FrameDriver`]
//! and the optional [`ScrollReactor`]. They all operate on a [`World`],
//! the owned context holding the scene, camera, controls and handles to
//! the meshes that animate.

pub mod builder;
pub mod frame;
pub mod scroll;
pub mod stars;

pub use builder::{build_world, Viewport};
pub use frame::{FrameDriver, FrameTick};
pub use scroll::ScrollReactor;
pub use stars::add_star;

use cgmath::Vector3;

use crate::gfx::{
    camera::{OrbitControls, PerspectiveCamera},
    scene::{MeshId, Scene},
};

/// Rotation increments in radians, shared by the frame driver and the
/// scroll reactor
pub struct Spin;

impl Spin {
    pub const SUN: [f32; 3] = [0.05, 0.075, 0.05];
    pub const AVATAR: [f32; 3] = [0.0, 0.01, 0.01];
    pub const TORUS: [f32; 3] = [0.01, 0.005, 0.01];

    pub fn vector(spin: [f32; 3]) -> Vector3<f32> {
        Vector3::from(spin)
    }
}

/// Scene plus the camera rig and handles to the animated meshes
pub struct World {
    pub scene: Scene,
    pub camera: PerspectiveCamera,
    pub controls: OrbitControls,
    pub torus: MeshId,
    pub avatar: MeshId,
    pub sun: MeshId,
    pub stars: Vec<MeshId>,
}

impl World {
    /// Adapts projection and controls to a new physical surface size.
    /// Zero sizes are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.camera.resize_projection(width, height);
        self.camera.update_view_proj();
        self.controls.set_viewport_height(height);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SceneConfig;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_resize_updates_aspect_and_ignores_zero() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut world = build_world(
            &SceneConfig::default().with_star_count(0),
            Viewport::new(1200, 800, 1.0),
            &mut rng,
        );
        world.resize(1000, 500);
        assert!((world.camera.aspect - 2.0).abs() < 1e-6);

        world.resize(0, 500);
        assert!((world.camera.aspect - 2.0).abs() < 1e-6);
    }
}
