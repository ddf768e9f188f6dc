use super::camera_utils::{convert_matrix4_to_array, Camera, CameraUniform};
use cgmath::*;

#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: cgmath::Matrix4<f32> = cgmath::Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.5,
    0.0, 0.0, 0.0, 1.0,
);

/// Perspective camera with a free position and a look-at target.
///
/// `fovy` is the vertical field of view. The camera is Y-up; with the
/// default target it looks down -Z when placed on the positive Z axis.
#[derive(Debug, Clone, Copy)]
pub struct PerspectiveCamera {
    pub position: Vector3<f32>,
    pub target: Vector3<f32>,
    pub up: Vector3<f32>,
    pub fovy: Deg<f32>,
    pub aspect: f32,
    pub znear: f32,
    pub zfar: f32,
    pub uniform: CameraUniform,
}

impl Camera for PerspectiveCamera {
    fn build_view_projection_matrix(&self) -> Matrix4<f32> {
        let proj =
            OPENGL_TO_WGPU_MATRIX * perspective(self.fovy, self.aspect, self.znear, self.zfar);
        proj * self.build_view_matrix()
    }
}

impl PerspectiveCamera {
    pub fn new(fovy: Deg<f32>, aspect: f32, znear: f32, zfar: f32) -> Self {
        Self {
            position: Vector3::zero(),
            target: Vector3::zero(),
            up: Vector3::unit_y(),
            fovy,
            aspect,
            znear,
            zfar,
            uniform: CameraUniform::default(),
        }
    }

    pub fn set_position(&mut self, x: f32, y: f32, z: f32) {
        self.position = Vector3::new(x, y, z);
    }

    pub fn set_z(&mut self, z: f32) {
        self.position.z = z;
    }

    pub fn look_at(&mut self, target: Vector3<f32>) {
        self.target = target;
    }

    pub fn build_view_matrix(&self) -> Matrix4<f32> {
        let mut target = self.target;
        // A camera sitting on its own target has no direction; keep looking down -Z.
        if (target - self.position).magnitude2() <= f32::EPSILON {
            target = self.position - Vector3::unit_z();
        }
        Matrix4::look_at_rh(
            Point3::from_vec(self.position),
            Point3::from_vec(target),
            self.up,
        )
    }

    pub fn resize_projection(&mut self, width: u32, height: u32) {
        self.aspect = width as f32 / height as f32;
    }

    pub fn update_view_proj(&mut self) {
        self.uniform.view_position = [self.position.x, self.position.y, self.position.z, 1.0];
        self.uniform.view_proj = convert_matrix4_to_array(self.build_view_projection_matrix());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> PerspectiveCamera {
        let mut camera = PerspectiveCamera::new(Deg(75.0), 1.5, 0.1, 1000.0);
        camera.set_z(30.0);
        camera
    }

    #[test]
    fn test_origin_projects_to_screen_center() {
        let camera = camera();
        let clip = camera.build_view_projection_matrix() * Vector4::new(0.0, 0.0, 0.0, 1.0);
        let ndc = clip.truncate() / clip.w;
        assert!(ndc.x.abs() < 1e-5);
        assert!(ndc.y.abs() < 1e-5);
        assert!(ndc.z > 0.0 && ndc.z < 1.0);
    }

    #[test]
    fn test_resize_updates_aspect() {
        let mut camera = camera();
        camera.resize_projection(1920, 1080);
        assert!((camera.aspect - 1920.0 / 1080.0).abs() < 1e-6);
    }

    #[test]
    fn test_camera_on_target_still_builds_finite_view() {
        let mut camera = camera();
        camera.set_position(0.0, 0.0, 0.0);
        let view = camera.build_view_matrix();
        let values: &[f32; 16] = view.as_ref();
        assert!(values.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_uniform_tracks_position() {
        let mut camera = camera();
        camera.update_view_proj();
        assert_eq!(camera.uniform.view_position, [0.0, 0.0, 30.0, 1.0]);
    }
}
