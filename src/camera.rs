//! Free-flying camera.
//!
//! Orientation lives in the camera's [`Transform`] as a quaternion. The
//! view matrix is the inverse of the camera's world transform: conjugate
//! rotation followed by negated translation. Input arrives as a plain
//! [`InputState`] snapshot from the window collaborator; the camera only
//! exposes move and rotate operations.

use crate::math::{mat4::Mat4, quat::Quat, vec3::Vec3};
use crate::projection::Projection;
use crate::transform::Transform;
use crate::window::InputState;

pub struct Camera {
    transform: Transform,
    projection: Projection,
}

/// Tuning for input-driven camera motion.
#[derive(Debug, Clone, Copy)]
pub struct CameraController {
    /// Movement speed in world units per second.
    pub move_speed: f32,
    /// Yaw speed in radians per second.
    pub yaw_speed: f32,
    /// Pitch speed in radians per second.
    pub pitch_speed: f32,
}

impl Default for CameraController {
    fn default() -> Self {
        Self {
            move_speed: 5.0,
            yaw_speed: 2.66,
            pitch_speed: 2.0,
        }
    }
}

impl Camera {
    pub fn new(projection: Projection) -> Self {
        Self {
            transform: Transform::new(),
            projection,
        }
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn transform_mut(&mut self) -> &mut Transform {
        &mut self.transform
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    pub fn set_aspect_ratio(&mut self, aspect_ratio: f32) {
        self.projection.set_aspect_ratio(aspect_ratio);
    }

    /// The combined view-projection matrix for this frame.
    pub fn view_projection(&self) -> Mat4 {
        let rotation = self.transform.rotation().conjugate().to_rotation_matrix();
        let position = -self.transform.position();
        let translation = Mat4::translation(position.x, position.y, position.z);

        self.projection.matrix() * rotation * translation
    }

    /// Translate along an arbitrary world-space direction.
    pub fn move_along(&mut self, direction: Vec3, amount: f32) {
        self.transform.translate(direction * amount);
    }

    /// Rotate around a world-space axis.
    pub fn rotate(&mut self, axis: Vec3, angle: f32) {
        self.transform.rotate(Quat::from_axis_angle(axis, angle));
    }

    /// Apply one frame of input. Movement follows the camera's own basis;
    /// yaw always spins around the world up axis so the horizon stays
    /// level.
    pub fn update(&mut self, input: &InputState, controller: &CameraController, delta: f32) {
        let move_amount = controller.move_speed * delta;
        let rotation = self.transform.rotation();

        if input.forward {
            self.move_along(rotation.forward(), move_amount);
        }
        if input.back {
            self.move_along(rotation.forward(), -move_amount);
        }
        if input.right {
            self.move_along(rotation.right(), move_amount);
        }
        if input.left {
            self.move_along(rotation.right(), -move_amount);
        }

        if input.turn_right {
            self.rotate(Vec3::UP, controller.yaw_speed * delta);
        }
        if input.turn_left {
            self.rotate(Vec3::UP, -controller.yaw_speed * delta);
        }
        if input.look_down {
            self.rotate(rotation.right(), controller.pitch_speed * delta);
        }
        if input.look_up {
            self.rotate(rotation.right(), -controller.pitch_speed * delta);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::vec4::Vec4;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_4;

    fn camera() -> Camera {
        Camera::new(Projection::new(FRAC_PI_4, 1.0, 0.1, 100.0))
    }

    #[test]
    fn view_projection_centers_a_point_ahead() {
        let cam = camera();
        let clip = cam.view_projection() * Vec4::point(0.0, 0.0, 5.0);
        assert_relative_eq!(clip.x, 0.0);
        assert_relative_eq!(clip.y, 0.0);
        assert_relative_eq!(clip.w, 5.0);
    }

    #[test]
    fn moving_the_camera_shifts_the_view() {
        let mut cam = camera();
        cam.move_along(Vec3::RIGHT, 1.0);
        let clip = cam.view_projection() * Vec4::point(1.0, 0.0, 5.0);
        // The point now sits straight ahead.
        assert_relative_eq!(clip.x, 0.0, epsilon = 1e-5);
    }

    #[test]
    fn input_drives_forward_motion() {
        let mut cam = camera();
        let input = InputState {
            forward: true,
            ..InputState::default()
        };
        cam.update(&input, &CameraController::default(), 1.0);
        assert_relative_eq!(cam.transform().position().z, 5.0);
    }
}
