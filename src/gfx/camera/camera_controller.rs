use std::f32::consts::PI;

use cgmath::{InnerSpace, Vector2, Vector3, Zero};
use winit::{
    dpi::PhysicalPosition,
    event::{DeviceEvent, ElementState, KeyEvent, MouseButton, MouseScrollDelta, WindowEvent},
    keyboard::{KeyCode, PhysicalKey},
};

use super::perspective_camera::PerspectiveCamera;

const EPS: f32 = 0.000_001;

/// Pixels of wheel travel that count as one zoom step.
const PIXELS_PER_WHEEL_STEP: f32 = 100.0;

/// Orbit-style camera controls.
///
/// Pointer input is only accumulated when it arrives; [`OrbitControls::update`]
/// applies whatever is pending to the camera. Call it once per frame.
///
/// - left drag: orbit around `target`
/// - shift + left drag, or right drag: pan
/// - wheel: zoom (when `enable_zoom` is set)
/// - shift + C: restore the saved camera state
pub struct OrbitControls {
    pub target: Vector3<f32>,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
    pub enable_zoom: bool,
    pub enable_damping: bool,
    pub damping_factor: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub min_polar_angle: f32,
    pub max_polar_angle: f32,

    viewport_height: f32,
    is_left_pressed: bool,
    is_right_pressed: bool,
    is_shift_held: bool,

    theta_delta: f32,
    phi_delta: f32,
    scale: f32,
    pending_pan: Vector2<f32>,
    pan_offset: Vector3<f32>,

    saved_target: Vector3<f32>,
    saved_position: Vector3<f32>,
}

impl OrbitControls {
    pub fn new(camera: &PerspectiveCamera, viewport_height: f32) -> Self {
        Self {
            target: camera.target,
            rotate_speed: 1.0,
            zoom_speed: 1.0,
            pan_speed: 1.0,
            enable_zoom: true,
            enable_damping: false,
            damping_factor: 0.05,
            min_distance: 0.0,
            max_distance: f32::INFINITY,
            min_polar_angle: 0.0,
            max_polar_angle: PI,
            viewport_height: viewport_height.max(1.0),
            is_left_pressed: false,
            is_right_pressed: false,
            is_shift_held: false,
            theta_delta: 0.0,
            phi_delta: 0.0,
            scale: 1.0,
            pending_pan: Vector2::zero(),
            pan_offset: Vector3::zero(),
            saved_target: camera.target,
            saved_position: camera.position,
        }
    }

    /// Enables inertia; pending motion then decays by `factor` per update.
    pub fn with_damping(mut self, factor: f32) -> Self {
        self.enable_damping = true;
        self.damping_factor = factor.clamp(0.0, 1.0);
        self
    }

    pub fn set_viewport_height(&mut self, height: u32) {
        if height > 0 {
            self.viewport_height = height as f32;
        }
    }

    /// Queues an orbit by a pointer drag of `dx`/`dy` pixels.
    pub fn rotate(&mut self, dx: f32, dy: f32) {
        self.theta_delta -= 2.0 * PI * dx / self.viewport_height * self.rotate_speed;
        self.phi_delta -= 2.0 * PI * dy / self.viewport_height * self.rotate_speed;
    }

    /// Queues a zoom. Positive steps move towards the target.
    pub fn zoom(&mut self, steps: f32) {
        if !self.enable_zoom {
            return;
        }
        self.scale *= 0.95f32.powf(self.zoom_speed * steps);
    }

    /// Queues a pan by a pointer drag of `dx`/`dy` pixels.
    pub fn pan(&mut self, dx: f32, dy: f32) {
        self.pending_pan += Vector2::new(dx, dy) * self.pan_speed;
    }

    pub fn is_rotating(&self) -> bool {
        self.is_left_pressed && !self.is_shift_held
    }

    pub fn is_panning(&self) -> bool {
        self.is_right_pressed || (self.is_left_pressed && self.is_shift_held)
    }

    /// Remembers the current camera placement for [`OrbitControls::reset`].
    pub fn save_state(&mut self, camera: &PerspectiveCamera) {
        self.saved_target = self.target;
        self.saved_position = camera.position;
    }

    pub fn reset(&mut self, camera: &mut PerspectiveCamera) {
        self.target = self.saved_target;
        camera.position = self.saved_position;
        camera.look_at(self.target);
        self.clear_pending();
    }

    fn clear_pending(&mut self) {
        self.theta_delta = 0.0;
        self.phi_delta = 0.0;
        self.scale = 1.0;
        self.pending_pan = Vector2::zero();
        self.pan_offset = Vector3::zero();
    }

    fn has_pending_motion(&self) -> bool {
        self.theta_delta != 0.0
            || self.phi_delta != 0.0
            || self.scale != 1.0
            || self.pending_pan != Vector2::zero()
            || self.pan_offset != Vector3::zero()
    }

    /// Applies pending input to the camera. Returns true if the camera moved.
    pub fn update(&mut self, camera: &mut PerspectiveCamera) -> bool {
        if !self.has_pending_motion() {
            camera.look_at(self.target);
            return false;
        }

        self.resolve_pending_pan(camera);

        let offset = camera.position - self.target;
        let mut radius = offset.magnitude();
        let (mut theta, mut phi) = if radius == 0.0 {
            (0.0, 0.0)
        } else {
            (
                offset.x.atan2(offset.z),
                (offset.y / radius).clamp(-1.0, 1.0).acos(),
            )
        };

        let step = if self.enable_damping {
            self.damping_factor
        } else {
            1.0
        };

        theta += self.theta_delta * step;
        phi += self.phi_delta * step;
        phi = phi
            .clamp(self.min_polar_angle, self.max_polar_angle)
            .clamp(EPS, PI - EPS);

        radius = (radius * self.scale).clamp(self.min_distance, self.max_distance);

        self.target += self.pan_offset * step;

        let new_offset = Vector3::new(
            radius * phi.sin() * theta.sin(),
            radius * phi.cos(),
            radius * phi.sin() * theta.cos(),
        );

        let previous = camera.position;
        camera.position = self.target + new_offset;
        camera.look_at(self.target);

        if self.enable_damping {
            self.theta_delta *= 1.0 - self.damping_factor;
            self.phi_delta *= 1.0 - self.damping_factor;
            self.pan_offset *= 1.0 - self.damping_factor;
            if self.theta_delta.abs() < EPS && self.phi_delta.abs() < EPS {
                self.theta_delta = 0.0;
                self.phi_delta = 0.0;
            }
            if self.pan_offset.magnitude2() < EPS * EPS {
                self.pan_offset = Vector3::zero();
            }
        } else {
            self.theta_delta = 0.0;
            self.phi_delta = 0.0;
            self.pan_offset = Vector3::zero();
        }
        self.scale = 1.0;

        (camera.position - previous).magnitude2() > EPS
    }

    /// Converts pending pixel pan into a world-space offset in the camera plane.
    fn resolve_pending_pan(&mut self, camera: &PerspectiveCamera) {
        if self.pending_pan == Vector2::zero() {
            return;
        }

        let offset = camera.position - self.target;
        let forward = -offset;
        if forward.magnitude2() <= f32::EPSILON {
            self.pending_pan = Vector2::zero();
            return;
        }
        let forward = forward.normalize();
        let right = forward.cross(camera.up).normalize();
        let up = right.cross(forward).normalize();

        // Pan so that the point under the cursor follows it at target depth
        let target_distance = offset.magnitude() * (camera.fovy.0.to_radians() / 2.0).tan();
        let pan_left = 2.0 * self.pending_pan.x * target_distance / self.viewport_height;
        let pan_up = 2.0 * self.pending_pan.y * target_distance / self.viewport_height;

        self.pan_offset += right * -pan_left + up * pan_up;
        self.pending_pan = Vector2::zero();
    }

    pub fn process_window_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::MouseInput { state, button, .. } => {
                let pressed = *state == ElementState::Pressed;
                match button {
                    MouseButton::Left => self.is_left_pressed = pressed,
                    MouseButton::Right => self.is_right_pressed = pressed,
                    _ => (),
                }
            }
            WindowEvent::ModifiersChanged(modifiers) => {
                self.is_shift_held = modifiers.state().shift_key();
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let steps = match delta {
                    MouseScrollDelta::LineDelta(_, scroll) => *scroll,
                    MouseScrollDelta::PixelDelta(PhysicalPosition { y: scroll, .. }) => {
                        *scroll as f32 / PIXELS_PER_WHEEL_STEP
                    }
                };
                self.zoom(steps);
            }
            _ => (),
        }
    }

    pub fn process_device_event(&mut self, event: &DeviceEvent) {
        if let DeviceEvent::MouseMotion { delta } = event {
            let (dx, dy) = (delta.0 as f32, delta.1 as f32);
            if self.is_panning() {
                self.pan(dx, dy);
            } else if self.is_rotating() {
                self.rotate(dx, dy);
            }
        }
    }

    pub fn process_keyed_events(&mut self, event: &KeyEvent, camera: &mut PerspectiveCamera) {
        if let KeyEvent {
            physical_key: PhysicalKey::Code(KeyCode::KeyC),
            state: ElementState::Pressed,
            ..
        } = event
        {
            if self.is_shift_held {
                log::info!("Resetting camera to saved position");
                self.reset(camera);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::Deg;

    fn setup() -> (PerspectiveCamera, OrbitControls) {
        let mut camera = PerspectiveCamera::new(Deg(75.0), 1.0, 0.1, 1000.0);
        camera.set_z(30.0);
        let controls = OrbitControls::new(&camera, 800.0);
        (camera, controls)
    }

    fn assert_close(a: Vector3<f32>, b: Vector3<f32>) {
        assert!((a - b).magnitude() < 1e-3, "{:?} != {:?}", a, b);
    }

    #[test]
    fn test_update_without_input_keeps_camera() {
        let (mut camera, mut controls) = setup();
        for _ in 0..10 {
            assert!(!controls.update(&mut camera));
        }
        assert_eq!(camera.position, Vector3::new(0.0, 0.0, 30.0));
    }

    #[test]
    fn test_horizontal_drag_orbits_at_constant_distance() {
        let (mut camera, mut controls) = setup();
        // A quarter of the viewport height is a quarter turn
        controls.rotate(-200.0, 0.0);
        assert!(controls.update(&mut camera));
        assert_close(camera.position, Vector3::new(30.0, 0.0, 0.0));
        assert!((camera.position.magnitude() - 30.0).abs() < 1e-3);
    }

    #[test]
    fn test_vertical_drag_stops_at_pole() {
        let (mut camera, mut controls) = setup();
        controls.rotate(0.0, 10_000.0);
        controls.update(&mut camera);
        assert!(camera.position.y > 29.9);
        assert!(camera.position.y.is_finite());
    }

    #[test]
    fn test_zoom_scales_distance() {
        let (mut camera, mut controls) = setup();
        controls.zoom(1.0);
        controls.update(&mut camera);
        assert!((camera.position.z - 28.5).abs() < 1e-3);
    }

    #[test]
    fn test_zoom_disabled_is_ignored() {
        let (mut camera, mut controls) = setup();
        controls.enable_zoom = false;
        controls.zoom(3.0);
        assert!(!controls.update(&mut camera));
        assert_eq!(camera.position.z, 30.0);
    }

    #[test]
    fn test_pan_moves_target_and_camera_together() {
        let (mut camera, mut controls) = setup();
        controls.pan(100.0, 0.0);
        controls.update(&mut camera);
        assert!(controls.target.x < 0.0);
        assert!((camera.position.x - controls.target.x).abs() < 1e-4);
        assert!((camera.position.z - 30.0).abs() < 1e-3);
    }

    #[test]
    fn test_damping_spreads_motion_over_frames() {
        let (mut camera, controls) = setup();
        let mut controls = controls.with_damping(0.5);
        controls.rotate(-200.0, 0.0);

        controls.update(&mut camera);
        let first = camera.position;
        controls.update(&mut camera);
        let second = camera.position;

        // Half of the quarter turn lands in the first frame, a quarter in the next
        let angle = |p: Vector3<f32>| p.x.atan2(p.z);
        assert!((angle(first) - PI / 4.0).abs() < 1e-3);
        assert!((angle(second) - 3.0 * PI / 8.0).abs() < 1e-3);
    }

    #[test]
    fn test_reset_restores_saved_state() {
        let (mut camera, mut controls) = setup();
        controls.save_state(&camera);
        controls.rotate(123.0, 45.0);
        controls.pan(10.0, 10.0);
        controls.update(&mut camera);
        controls.reset(&mut camera);
        assert_eq!(camera.position, Vector3::new(0.0, 0.0, 30.0));
        assert_eq!(controls.target, Vector3::new(0.0, 0.0, 0.0));
    }
}
