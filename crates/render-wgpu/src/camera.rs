use glam::{Mat4, Vec3};
use std::f32::consts::FRAC_PI_2;

/// Keeps the camera off the poles, where `look_at` has no stable up vector.
const POLE_EPSILON: f32 = 1e-3;

/// Damped orbit camera circling a target point.
///
/// Pointer input adds angular or zoom velocity; [`update`](Self::update)
/// applies a fraction of it each frame and decays the rest, so motion eases
/// out after the pointer is released.
pub struct OrbitCamera {
    pub target: Vec3,
    pub distance: f32,
    /// Angle around +Y, measured from +X towards +Z.
    pub yaw: f32,
    /// Angle above the XZ plane.
    pub pitch: f32,
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    /// Radians per pixel of pointer motion.
    pub rotate_speed: f32,
    /// Fraction of pending motion applied per update, in (0, 1].
    pub damping: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    yaw_velocity: f32,
    pitch_velocity: f32,
    zoom_velocity: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        let mut camera = Self {
            target: Vec3::ZERO,
            distance: 1.0,
            yaw: 0.0,
            pitch: 0.0,
            fov: 75.0_f32.to_radians(),
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 100.0,
            rotate_speed: 0.005,
            damping: 0.05,
            min_distance: 0.2,
            max_distance: 20.0,
            yaw_velocity: 0.0,
            pitch_velocity: 0.0,
            zoom_velocity: 0.0,
        };
        camera.look_from(Vec3::new(1.0, 1.0, 1.0));
        camera
    }
}

impl OrbitCamera {
    /// Place the camera at `eye`, keeping the current target.
    pub fn look_from(&mut self, eye: Vec3) {
        let offset = eye - self.target;
        let distance = offset.length();
        if distance <= f32::EPSILON {
            return;
        }
        self.distance = distance.clamp(self.min_distance, self.max_distance);
        self.yaw = offset.z.atan2(offset.x);
        self.pitch = (offset.y / distance).asin();
        self.clamp_pitch();
    }

    pub fn eye(&self) -> Vec3 {
        let (sy, cy) = self.yaw.sin_cos();
        let (sp, cp) = self.pitch.sin_cos();
        self.target + Vec3::new(cp * cy, sp, cp * sy) * self.distance
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        if aspect.is_finite() && aspect > 0.0 {
            self.aspect = aspect;
        }
    }

    /// Queue rotation from a pointer drag of (`dx`, `dy`) pixels.
    /// Dragging right orbits right, dragging down raises the camera.
    pub fn rotate(&mut self, dx: f32, dy: f32) {
        self.yaw_velocity += dx * self.rotate_speed;
        self.pitch_velocity += dy * self.rotate_speed;
    }

    /// Queue a zoom step. Positive values move closer.
    pub fn zoom(&mut self, amount: f32) {
        self.zoom_velocity += amount;
    }

    /// Apply one frame of damped motion.
    pub fn update(&mut self) {
        let k = self.damping.clamp(f32::EPSILON, 1.0);
        self.yaw += self.yaw_velocity * k;
        self.pitch += self.pitch_velocity * k;
        self.distance = (self.distance * (-self.zoom_velocity * k).exp())
            .clamp(self.min_distance, self.max_distance);
        self.clamp_pitch();

        let decay = 1.0 - k;
        self.yaw_velocity *= decay;
        self.pitch_velocity *= decay;
        self.zoom_velocity *= decay;
    }

    /// True once pending motion has decayed to nothing visible.
    pub fn is_settled(&self) -> bool {
        self.yaw_velocity.abs() < 1e-5
            && self.pitch_velocity.abs() < 1e-5
            && self.zoom_velocity.abs() < 1e-5
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye(), self.target, Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    fn clamp_pitch(&mut self) {
        let limit = FRAC_PI_2 - POLE_EPSILON;
        self.pitch = self.pitch.clamp(-limit, limit);
    }
}
