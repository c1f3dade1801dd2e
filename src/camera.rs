//! The museum camera: a fixed perspective projection and a yaw angle.
//!
//! There is no separate view matrix. The yaw rotation is folded into the
//! `projection` uniform as `rotation_y(angle) · projection`.

use std::str::FromStr;

use anyhow::bail;

use crate::{
    math::{self, Matrix4},
    render::RenderBackend,
};

/// Degrees added or removed per rotate command.
pub const ROTATION_STEP_DEGREES: f32 = 5.0;

/// Discrete yaw commands coming from the keyboard.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

impl FromStr for Direction {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "left" => Ok(Direction::Left),
            "right" => Ok(Direction::Right),
            other => bail!("unknown rotation direction {other:?}, expected \"left\" or \"right\""),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Camera {
    rotation_angle_degrees: f32,
    projection: Matrix4,
}

impl Camera {
    pub fn new(fov_degrees: f32, aspect_ratio: f32, near: f32, far: f32) -> Self {
        Self {
            rotation_angle_degrees: 0.0,
            projection: Self::get_projection_mx(fov_degrees, aspect_ratio, near, far),
        }
    }

    /// The perspective projection this camera is built with.
    pub fn get_projection_mx(fov_degrees: f32, aspect_ratio: f32, near: f32, far: f32) -> Matrix4 {
        math::perspective(fov_degrees, aspect_ratio, near, far)
    }

    pub fn projection(&self) -> &Matrix4 {
        &self.projection
    }

    pub fn angle(&self) -> f32 {
        self.rotation_angle_degrees
    }

    /// Yaw as a rotation about the vertical axis.
    pub fn rotation(&self) -> Matrix4 {
        math::rotation_y(self.rotation_angle_degrees)
    }

    /// `rotation_y(angle) · projection`, the value of the `projection` uniform.
    pub fn view_projection(&self) -> Matrix4 {
        math::multiply(&self.rotation(), &self.projection)
    }

    /// Turns the camera one step and re-uploads the combined transform.
    ///
    /// Right decreases the angle, left increases it. The angle is never
    /// wrapped or clamped.
    pub fn rotate<B: RenderBackend>(&mut self, direction: Direction, gpu: &mut B) {
        match direction {
            Direction::Right => self.rotation_angle_degrees -= ROTATION_STEP_DEGREES,
            Direction::Left => self.rotation_angle_degrees += ROTATION_STEP_DEGREES,
        }
        log::debug!("camera yaw now {} degrees", self.rotation_angle_degrees);
        self.apply_to_shader(gpu);
    }

    /// Writes the current combined transform without touching the angle.
    pub fn apply_to_shader<B: RenderBackend>(&self, gpu: &mut B) {
        gpu.write_projection(&self.view_projection());
    }
}
