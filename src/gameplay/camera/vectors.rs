use glam::Vec3;

#[derive(Debug, Clone, PartialEq)]
pub struct CameraVectors {
    pub front: Vec3,
    pub up: Vec3,
    pub right: Vec3,
}

impl CameraVectors {
    pub fn new() -> Self {
        Self {
            front: Vec3::ZERO,
            up: Vec3::ZERO,
            right: Vec3::ZERO,
        }
    }

    /// Updates the camera's front, right, and up vectors from yaw and pitch in degrees.
    ///
    /// Yaw 0 looks down +x, yaw -90 looks down -z.
    pub fn update(&mut self, yaw: f32, pitch: f32, world_up: Vec3) {
        let (yaw, pitch) = (yaw.to_radians(), pitch.to_radians());
        self.front = Vec3::new(
            yaw.cos() * pitch.cos(),
            pitch.sin(),
            yaw.sin() * pitch.cos(),
        )
        .normalize();
        self.right = self.front.cross(world_up).normalize();
        self.up = self.right.cross(self.front).normalize();
    }

    /// Inverse of [`Self::update`] for the front vector: returns (yaw, pitch) in degrees.
    ///
    /// `direction` must be normalized.
    pub fn yaw_pitch_of(direction: Vec3) -> (f32, f32) {
        let yaw = direction.z.atan2(direction.x).to_degrees();
        let pitch = direction.y.clamp(-1.0, 1.0).asin().to_degrees();
        (yaw, pitch)
    }
}

impl Default for CameraVectors {
    fn default() -> Self {
        Self::new()
    }
}
