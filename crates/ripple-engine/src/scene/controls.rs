use std::f32::consts::{PI, TAU};

use glam::Vec3;

use crate::input::{InputFrame, InputState, MouseButton};

use super::PerspectiveCamera;

/// Keeps the polar angle away from the poles so `look_at` stays defined.
const POLE_EPSILON: f32 = 1e-6;

/// Camera motion below this is treated as "at rest".
const REST_EPSILON: f32 = 1e-6;

/// Spherical coordinates around a target: `theta` around +Y, `phi` from +Y.
#[derive(Debug, Copy, Clone, PartialEq)]
struct Spherical {
    radius: f32,
    theta: f32,
    phi: f32,
}

impl Spherical {
    fn from_offset(v: Vec3) -> Self {
        let radius = v.length();
        if radius <= f32::EPSILON {
            return Self { radius: 0.0, theta: 0.0, phi: 0.0 };
        }
        Self {
            radius,
            theta: v.x.atan2(v.z),
            phi: (v.y / radius).clamp(-1.0, 1.0).acos(),
        }
    }

    fn to_offset(self) -> Vec3 {
        let sin_phi = self.phi.sin();
        Vec3::new(
            self.radius * sin_phi * self.theta.sin(),
            self.radius * self.phi.cos(),
            self.radius * sin_phi * self.theta.cos(),
        )
    }
}

/// Orbit camera controls: drag to rotate around `target`, wheel to dolly.
///
/// Input only accumulates deltas; [`update`](Self::update) applies them to
/// the camera, once per frame. With damping enabled each update applies a
/// `damping_factor` share of the pending rotation, so motion eases out.
#[derive(Debug, Clone)]
pub struct OrbitControls {
    pub target: Vec3,

    pub enable_damping: bool,
    pub damping_factor: f32,

    pub rotate_speed: f32,
    pub zoom_speed: f32,

    pub min_distance: f32,
    pub max_distance: f32,

    pending_theta: f32,
    pending_phi: f32,
    scale: f32,
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self {
            target: Vec3::ZERO,
            enable_damping: false,
            damping_factor: 0.05,
            rotate_speed: 1.0,
            zoom_speed: 1.0,
            min_distance: 0.0,
            max_distance: f32::INFINITY,
            pending_theta: 0.0,
            pending_phi: 0.0,
            scale: 1.0,
        }
    }
}

impl OrbitControls {
    pub fn new(target: Vec3) -> Self {
        Self {
            target,
            ..Self::default()
        }
    }

    /// Rotates the camera left around the target by `angle` radians.
    pub fn rotate_left(&mut self, angle: f32) {
        self.pending_theta -= angle;
    }

    /// Rotates the camera up over the target by `angle` radians.
    pub fn rotate_up(&mut self, angle: f32) {
        self.pending_phi -= angle;
    }

    /// Moves the camera closer by `factor` (< 1 moves closer).
    pub fn dolly(&mut self, factor: f32) {
        if factor.is_finite() && factor > 0.0 {
            self.scale *= factor;
        }
    }

    /// Accumulates pointer drag and wheel input for this frame.
    ///
    /// A drag across the full viewport height rotates one full turn.
    pub fn handle_input(&mut self, input: &InputState, frame: &InputFrame, viewport_height: f32) {
        if viewport_height <= 0.0 {
            return;
        }

        if input.button_down(MouseButton::Left) && !frame.buttons_pressed.contains(&MouseButton::Left) {
            let d = frame.pointer_delta;
            self.rotate_left(TAU * d.x / viewport_height * self.rotate_speed);
            self.rotate_up(TAU * d.y / viewport_height * self.rotate_speed);
        }

        if frame.scroll_delta != 0.0 {
            let step = 0.95f32.powf(self.zoom_speed * frame.scroll_delta.abs());
            if frame.scroll_delta > 0.0 {
                self.dolly(step);
            } else {
                self.dolly(1.0 / step);
            }
        }
    }

    /// Applies pending motion to `camera`. Returns whether the camera moved.
    pub fn update(&mut self, camera: &mut PerspectiveCamera) -> bool {
        let offset = camera.position - self.target;
        let mut s = Spherical::from_offset(offset);

        if self.enable_damping {
            s.theta += self.pending_theta * self.damping_factor;
            s.phi += self.pending_phi * self.damping_factor;
        } else {
            s.theta += self.pending_theta;
            s.phi += self.pending_phi;
        }

        s.phi = s.phi.clamp(POLE_EPSILON, PI - POLE_EPSILON);
        s.radius = (s.radius * self.scale).clamp(self.min_distance, self.max_distance);

        let new_position = self.target + s.to_offset();
        let moved = new_position.distance_squared(camera.position) > REST_EPSILON * REST_EPSILON
            || camera.target != self.target;

        camera.position = new_position;
        camera.target = self.target;

        if self.enable_damping {
            self.pending_theta *= 1.0 - self.damping_factor;
            self.pending_phi *= 1.0 - self.damping_factor;
        } else {
            self.pending_theta = 0.0;
            self.pending_phi = 0.0;
        }
        self.scale = 1.0;

        moved
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera_at(z: f32) -> PerspectiveCamera {
        let mut cam = PerspectiveCamera::default();
        cam.position = Vec3::new(0.0, 0.0, z);
        cam.target = Vec3::ZERO;
        cam
    }

    #[test]
    fn idle_update_keeps_camera_still() {
        let mut cam = camera_at(3.0);
        let mut controls = OrbitControls::default();
        assert!(!controls.update(&mut cam));
        assert!((cam.position - Vec3::new(0.0, 0.0, 3.0)).length() < 1e-5);
    }

    #[test]
    fn undamped_rotation_applies_at_once() {
        let mut cam = camera_at(3.0);
        let mut controls = OrbitControls::default();

        controls.rotate_left(0.5);
        assert!(controls.update(&mut cam));

        let expected = Vec3::new(3.0 * (-0.5f32).sin(), 0.0, 3.0 * (-0.5f32).cos());
        assert!((cam.position - expected).length() < 1e-4);
        assert!(!controls.update(&mut cam));
    }

    #[test]
    fn damped_rotation_converges_to_requested_angle() {
        let mut cam = camera_at(3.0);
        let mut controls = OrbitControls::default();
        controls.enable_damping = true;

        controls.rotate_left(0.5);
        let first = {
            controls.update(&mut cam);
            cam.position
        };
        // Only a damping_factor share is applied on the first step.
        assert!(first.x.abs() < 3.0 * 0.5 * 0.06);

        for _ in 0..400 {
            controls.update(&mut cam);
        }
        let expected = Vec3::new(3.0 * (-0.5f32).sin(), 0.0, 3.0 * (-0.5f32).cos());
        assert!((cam.position - expected).length() < 1e-3);
        assert!(!controls.update(&mut cam));
    }

    #[test]
    fn polar_angle_never_flips_over_the_pole() {
        let mut cam = camera_at(3.0);
        let mut controls = OrbitControls::default();

        controls.rotate_up(10.0);
        controls.update(&mut cam);

        assert!(cam.position.is_finite());
        assert!(cam.position.y > 2.99);
        assert!((cam.position.length() - 3.0).abs() < 1e-4);
    }

    #[test]
    fn wheel_up_dollies_in_within_limits() {
        let mut cam = camera_at(3.0);
        let mut controls = OrbitControls::default();
        controls.min_distance = 2.0;

        let input = InputState::default();
        let mut frame = InputFrame::default();
        frame.scroll_delta = 1.0;
        controls.handle_input(&input, &frame, 720.0);
        controls.update(&mut cam);
        assert!((cam.position.z - 3.0 * 0.95).abs() < 1e-4);

        frame.scroll_delta = 40.0;
        controls.handle_input(&input, &frame, 720.0);
        controls.update(&mut cam);
        assert!((cam.position.z - 2.0).abs() < 1e-4);
    }

    #[test]
    fn spherical_round_trips_offsets() {
        let v = Vec3::new(1.0, 2.0, -0.5);
        let back = Spherical::from_offset(v).to_offset();
        assert!((back - v).length() < 1e-5);
    }
}
