use glam::{Mat4, Vec2, Vec3};

use crate::config::{CAMERA_FAR, CAMERA_FOV_DEG, CAMERA_NEAR, CAMERA_START};
use crate::scene::picking::Ray;

const MAX_PITCH_DEG: f32 = 89.0;
const MIN_DISTANCE: f32 = 5.0;
const MAX_DISTANCE: f32 = 150.0;

/// Perspective camera orbiting `target`, +Y up.
pub struct Camera {
    pub target: Vec3,
    pub distance: f32,
    pub yaw: f32,
    pub pitch: f32,

    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,

    pub orbit_sensitivity: f32,
    pub pan_sensitivity: f32,
    pub zoom_step: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self::looking_at(CAMERA_START, Vec3::ZERO)
    }
}

impl Camera {
    pub fn looking_at(eye: Vec3, target: Vec3) -> Self {
        let offset = eye - target;
        let distance = offset.length().max(MIN_DISTANCE);
        let dir = if offset.length_squared() > 0.0 {
            offset.normalize()
        } else {
            Vec3::Z
        };

        Self {
            target,
            distance,
            yaw: dir.z.atan2(dir.x),
            pitch: dir.y.clamp(-1.0, 1.0).asin(),

            fov: CAMERA_FOV_DEG.to_radians(),
            aspect: 16.0 / 9.0,
            near: CAMERA_NEAR,
            far: CAMERA_FAR,

            orbit_sensitivity: 0.005,
            pan_sensitivity: 0.0015,
            zoom_step: 0.95,
        }
    }

    pub fn position(&self) -> Vec3 {
        self.target
            + self.distance
                * Vec3::new(
                    self.yaw.cos() * self.pitch.cos(),
                    self.pitch.sin(),
                    self.yaw.sin() * self.pitch.cos(),
                )
    }

    pub fn front(&self) -> Vec3 {
        (self.target - self.position()).normalize()
    }

    pub fn right(&self) -> Vec3 {
        self.front().cross(Vec3::Y).normalize()
    }

    pub fn up(&self) -> Vec3 {
        self.right().cross(self.front())
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position(), self.target, Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect, self.near, self.far)
    }

    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Cursor drag in pixels.
    pub fn process_orbit(&mut self, delta: Vec2) {
        self.yaw += delta.x * self.orbit_sensitivity;
        self.pitch += delta.y * self.orbit_sensitivity;

        let max_pitch = MAX_PITCH_DEG.to_radians();
        self.pitch = self.pitch.clamp(-max_pitch, max_pitch);
    }

    /// Cursor drag in pixels; the target follows the cursor in screen space.
    pub fn process_pan(&mut self, delta: Vec2) {
        let scale = self.pan_sensitivity * self.distance;
        self.target -= self.right() * delta.x * scale;
        self.target += self.up() * delta.y * scale;
    }

    pub fn process_scroll(&mut self, delta: f32) {
        self.distance = (self.distance * self.zoom_step.powf(delta)).clamp(MIN_DISTANCE, MAX_DISTANCE);
    }

    pub fn set_aspect(&mut self, width: f32, height: f32) {
        if height > 0.0 {
            self.aspect = width / height;
        }
    }

    /// Ray from the eye through the given normalized device coordinates.
    pub fn ray_from_ndc(&self, ndc: Vec2) -> Ray {
        let inverse = self.view_projection_matrix().inverse();
        let near = inverse.project_point3(ndc.extend(0.0));
        let far = inverse.project_point3(ndc.extend(1.0));
        Ray::new(self.position(), far - near)
    }
}

#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
    pub camera_pos: [f32; 3],
    pub _padding: f32,
}

impl CameraUniform {
    pub fn from_camera(camera: &Camera) -> Self {
        Self {
            view_proj: camera.view_projection_matrix().to_cols_array_2d(),
            camera_pos: camera.position().to_array(),
            _padding: 0.0,
        }
    }
}
