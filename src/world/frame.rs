use super::{Spin, World};

/// Outcome of one frame step, handed to the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameTick {
    /// Zero-based frame number
    pub index: u64,
    /// Whether the orbit controls moved the camera this frame
    pub camera_moved: bool,
}

/// Per-frame animation step
///
/// Spins the sun, avatar and torus by their [`Spin`] increments and applies
/// pending orbit input. Angles accumulate without wrapping. Stars are never
/// touched.
#[derive(Debug, Default)]
pub struct FrameDriver {
    ticks: u64,
}

impl FrameDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tick(&mut self, world: &mut World) -> FrameTick {
        let scene = &mut world.scene;
        scene.mesh_mut(world.sun).rotate_by(Spin::vector(Spin::SUN));
        scene
            .mesh_mut(world.avatar)
            .rotate_by(Spin::vector(Spin::AVATAR));
        scene
            .mesh_mut(world.torus)
            .rotate_by(Spin::vector(Spin::TORUS));

        let camera_moved = world.controls.update(&mut world.camera);
        world.camera.update_view_proj();

        let tick = FrameTick {
            index: self.ticks,
            camera_moved,
        };
        self.ticks += 1;
        tick
    }

    /// Number of ticks run so far
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}
