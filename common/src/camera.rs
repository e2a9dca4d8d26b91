//! Free-flying perspective camera

use glam::{Mat4, Vec3};

/// First-person camera that translates along its own view axes.
///
/// Yaw 0 looks down -Z; pitch is clamped short of the poles so the view
/// matrix never degenerates.
#[derive(Debug, Clone)]
pub struct FlyCamera {
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub fov: f32,
    pub aspect_ratio: f32,
    pub near: f32,
    pub far: f32,
    /// Translation speed in world units per second
    pub speed: f32,
    /// Radians of rotation per pixel of mouse travel
    pub sensitivity: f32,
}

const PITCH_LIMIT: f32 = 1.54; // just under PI/2

impl FlyCamera {
    pub fn new(position: Vec3, aspect_ratio: f32) -> Self {
        Self {
            position,
            yaw: 0.0,
            pitch: 0.0,
            fov: 45.0f32.to_radians(),
            aspect_ratio,
            near: 0.05,
            far: 5000.0,
            speed: 20.0,
            sensitivity: 0.003,
        }
    }

    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    pub fn with_clip(mut self, near: f32, far: f32) -> Self {
        self.near = near;
        self.far = far;
        self
    }

    /// Unit view direction from yaw/pitch
    pub fn forward(&self) -> Vec3 {
        Vec3::new(
            self.pitch.cos() * self.yaw.sin(),
            self.pitch.sin(),
            -self.pitch.cos() * self.yaw.cos(),
        )
    }

    /// Unit right vector, horizontal regardless of pitch
    pub fn right(&self) -> Vec3 {
        Vec3::new(self.yaw.cos(), 0.0, self.yaw.sin())
    }

    /// Rotate the view by a mouse delta in pixels
    pub fn look(&mut self, dx: f32, dy: f32) {
        self.yaw += dx * self.sensitivity;
        self.pitch = (self.pitch - dy * self.sensitivity).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    /// Move along the local axes: `local.x` right, `local.y` world-up,
    /// `local.z` forward. Magnitude is direction only; speed and frame
    /// time scale it.
    pub fn translate(&mut self, local: Vec3, dt: f32) {
        let step = self.right() * local.x + Vec3::Y * local.y + self.forward() * local.z;
        self.position += step * self.speed * dt;
    }

    /// Scale movement speed (scroll wheel), kept within sane bounds
    pub fn scale_speed(&mut self, factor: f32) {
        self.speed = (self.speed * factor).clamp(0.01, 10_000.0);
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_to_rh(self.position, self.forward(), Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect_ratio, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    pub fn update_aspect_ratio(&mut self, aspect_ratio: f32) {
        self.aspect_ratio = aspect_ratio;
    }
}

/// Camera uniform data for shaders. The separate view matrix is needed for
/// billboarding in the body pass.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
    pub view: [[f32; 4]; 4],
    pub position: [f32; 4],
}

impl CameraUniform {
    pub fn from_camera(camera: &FlyCamera) -> Self {
        Self {
            view_proj: camera.view_projection().to_cols_array_2d(),
            view: camera.view_matrix().to_cols_array_2d(),
            position: [camera.position.x, camera.position.y, camera.position.z, 1.0],
        }
    }
}
