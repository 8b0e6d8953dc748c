use super::{
    cursor::CursorTracker,
    movement::{KeyAction, MovementKey, MovementState},
    vectors::CameraVectors,
    CameraDesc, CameraError,
};
use crate::util::TimeInfo;
use glam::{Mat3, Mat4, Vec3};
use std::time::Instant;
use winit::{event::KeyEvent, keyboard::PhysicalKey};

#[derive(Debug, Clone)]
pub struct CameraCreateInfo {
    /// The initial position of the camera.
    pub position: Vec3,
    /// Fixed reference up vector, normalized on construction.
    pub world_up: Vec3,
    /// The initial look direction, the initial yaw and pitch are derived from it.
    pub look_at: Vec3,
    pub desc: CameraDesc,
}

impl Default for CameraCreateInfo {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 6.0),
            world_up: Vec3::Y,
            look_at: Vec3::NEG_Z,
            desc: CameraDesc::default(),
        }
    }
}

impl CameraCreateInfo {
    pub fn validate(&self) -> Result<(), CameraError> {
        self.desc.validate()?;
        if self.world_up.length_squared() < f32::EPSILON {
            return Err(CameraError::ZeroWorldUp);
        }
        if self.look_at.length_squared() < f32::EPSILON {
            return Err(CameraError::ZeroLookDirection);
        }
        // yaw and pitch are measured around +y
        if self.world_up.normalize().dot(Vec3::Y) < 1.0 - 1e-6 {
            return Err(CameraError::UnsupportedWorldUp(self.world_up));
        }
        let cos = self.look_at.normalize().dot(self.world_up.normalize());
        if cos.abs() > 1.0 - 1e-6 {
            return Err(CameraError::LookDirectionParallelToUp);
        }
        Ok(())
    }
}

pub struct Camera {
    position: Vec3,
    world_up: Vec3,
    vectors: CameraVectors,

    /// Degrees, unbounded. Yaw 0 looks down +x, yaw -90 looks down -z.
    yaw: f32,
    /// Degrees, within [-pitch_limit, pitch_limit].
    pitch: f32,
    /// Vertical field of view in degrees.
    fov: f32,

    cursor: CursorTracker,
    time: TimeInfo,
    movement_state: MovementState,
    desc: CameraDesc,
}

impl Camera {
    pub fn new(create_info: CameraCreateInfo) -> Result<Self, CameraError> {
        Self::new_at(create_info, Instant::now())
    }

    /// Like [`Self::new`], with the frame clock starting at `start`.
    pub fn new_at(create_info: CameraCreateInfo, start: Instant) -> Result<Self, CameraError> {
        create_info.validate()?;

        let CameraCreateInfo {
            position,
            world_up,
            look_at,
            desc,
        } = create_info;

        let (yaw, pitch) = CameraVectors::yaw_pitch_of(look_at.normalize());
        let mut camera = Self {
            position,
            world_up: world_up.normalize(),
            vectors: CameraVectors::new(),
            yaw,
            pitch,
            fov: desc.projection.v_fov,
            cursor: CursorTracker::new(),
            time: TimeInfo::starting_at(start, 1000),
            movement_state: MovementState::new(
                desc.movement.normal_speed,
                desc.movement.boosted_speed_mul,
            ),
            desc,
        };
        camera.enforce_limits();
        camera.update_look_at();

        log::debug!(
            "Camera created at {} with yaw {:.2} pitch {:.2} fov {:.2}",
            camera.position,
            camera.yaw,
            camera.pitch,
            camera.fov
        );
        Ok(camera)
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    #[cfg(test)]
    pub fn vectors(&self) -> &CameraVectors {
        &self.vectors
    }

    pub fn front(&self) -> Vec3 {
        self.vectors.front
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn fov(&self) -> f32 {
        self.fov
    }

    pub fn delta_time(&self) -> f32 {
        self.time.delta_time()
    }

    pub fn time_info(&self) -> &TimeInfo {
        &self.time
    }

    #[cfg(test)]
    pub fn movement_state(&self) -> &MovementState {
        &self.movement_state
    }

    /// The only place pitch and fov are brought back into range, runs after every mutation.
    fn enforce_limits(&mut self) {
        let limit = self.desc.pitch_limit;
        self.pitch = self.pitch.clamp(-limit, limit);

        let proj = &self.desc.projection;
        self.fov = self.fov.clamp(proj.min_v_fov, proj.max_v_fov);
    }

    /// Rotates by a raw cursor delta, positive `delta_y` looks up.
    ///
    /// Takes effect on the next [`Self::update_look_at`]. Non-finite deltas are ignored.
    pub fn modify_pitch_yaw(&mut self, delta_x: f32, delta_y: f32) {
        if !(delta_x.is_finite() && delta_y.is_finite()) {
            return;
        }
        let sensitivity = self.desc.movement.mouse_sensitivity;
        let yaw = self.yaw + delta_x * sensitivity;
        let pitch = self.pitch + delta_y * sensitivity;
        if !(yaw.is_finite() && pitch.is_finite()) {
            return;
        }
        self.yaw = yaw;
        self.pitch = pitch;
        self.enforce_limits();
    }

    /// Feeds an absolute cursor position, the first one only primes the tracker.
    pub fn handle_cursor(&mut self, x: f32, y: f32) {
        if let Some((delta_x, delta_y)) = self.cursor.advance(x, y) {
            self.modify_pitch_yaw(delta_x, delta_y);
        }
    }

    /// Call when the cursor is released or recaptured so the jump is not read as motion.
    pub fn reset_cursor(&mut self) {
        self.cursor.reset();
    }

    /// Scrolling up (positive delta) zooms in.
    pub fn modify_fov(&mut self, scroll_delta_y: f32) {
        if !scroll_delta_y.is_finite() {
            return;
        }
        self.fov -= scroll_delta_y;
        self.enforce_limits();
    }

    pub fn update_time_counter(&mut self) {
        self.update_time_counter_at(Instant::now());
    }

    pub fn update_time_counter_at(&mut self, now: Instant) {
        self.time.update_at(now);
    }

    /// Recomputes front, right and up from yaw and pitch, call once per frame.
    pub fn update_look_at(&mut self) {
        self.vectors.update(self.yaw, self.pitch, self.world_up);
    }

    /// Records a key press or release. Position changes only in [`Self::update_transform`].
    pub fn update_camera_position(&mut self, key: Option<MovementKey>, action: KeyAction) {
        if let Some(key) = key {
            self.movement_state.handle_key(key, action);
        }
    }

    /// Only controls the camera's movement state based on the key event.
    pub fn handle_keyboard(&mut self, key_event: &KeyEvent) {
        if key_event.repeat {
            return;
        }
        let key = match key_event.physical_key {
            PhysicalKey::Code(code) => MovementKey::from_key_code(code),
            PhysicalKey::Unidentified(_) => None,
        };
        self.update_camera_position(key, key_event.state.into());
    }

    /// Integrates the held movement keys over the last frame's delta time.
    pub fn update_transform(&mut self) {
        self.position += self.movement_state.get_displacement(
            self.vectors.front,
            self.vectors.right,
            self.vectors.up,
            self.time.delta_time(),
        );
    }

    /// Per-frame update in order: time counter, basis, position.
    pub fn update_frame(&mut self) {
        self.update_time_counter();
        self.update_look_at();
        self.update_transform();
    }

    pub fn get_view_mat(&self) -> Mat4 {
        Mat4::look_at_rh(
            self.position,
            self.position + self.vectors.front,
            self.vectors.up,
        )
    }

    /// View matrix without translation, the skybox stays centered on the eye.
    pub fn get_skybox_view_mat(&self) -> Mat4 {
        Mat4::from_mat3(Mat3::from_mat4(self.get_view_mat()))
    }

    pub fn calculate_proj_mat(v_fov: f32, aspect_ratio: f32, z_near: f32, z_far: f32) -> Mat4 {
        Mat4::perspective_rh_gl(v_fov.to_radians(), aspect_ratio, z_near, z_far)
    }

    pub fn get_proj_mat(&self, aspect_ratio: f32) -> Mat4 {
        Self::calculate_proj_mat(
            self.fov,
            aspect_ratio,
            self.desc.projection.z_near,
            self.desc.projection.z_far,
        )
    }
}
