use glam::Vec3;
use winit::{event::ElementState, keyboard::KeyCode};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MovementKey {
    Forward,
    Backward,
    Left,
    Right,
    Up,
    Down,
    Boost,
}

impl MovementKey {
    /// Returns `None` for keys that don't drive the camera.
    pub fn from_key_code(code: KeyCode) -> Option<Self> {
        match code {
            KeyCode::KeyW => Some(Self::Forward),
            KeyCode::KeyS => Some(Self::Backward),
            KeyCode::KeyA => Some(Self::Left),
            KeyCode::KeyD => Some(Self::Right),
            KeyCode::Space => Some(Self::Up),
            KeyCode::ControlLeft => Some(Self::Down),
            KeyCode::ShiftLeft => Some(Self::Boost),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Press,
    Release,
}

impl From<ElementState> for KeyAction {
    fn from(state: ElementState) -> Self {
        match state {
            ElementState::Pressed => Self::Press,
            ElementState::Released => Self::Release,
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct AxesState {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

/// Stores which movement keys are currently held.
#[derive(Debug)]
pub struct MovementState {
    normal_speed: f32,
    boosted_speed_mul: f32,
    pub is_boosted: bool,
    pub axes: AxesState,
}

impl MovementState {
    pub fn new(normal_speed: f32, boosted_speed_mul: f32) -> Self {
        Self {
            normal_speed,
            boosted_speed_mul,
            is_boosted: false,
            axes: AxesState::default(),
        }
    }

    /// Sets or clears the flag of `key`. Flags are only ever cleared by a release.
    pub fn handle_key(&mut self, key: MovementKey, action: KeyAction) {
        let held = action == KeyAction::Press;
        match key {
            MovementKey::Forward => self.axes.forward = held,
            MovementKey::Backward => self.axes.backward = held,
            MovementKey::Left => self.axes.left = held,
            MovementKey::Right => self.axes.right = held,
            MovementKey::Up => self.axes.up = held,
            MovementKey::Down => self.axes.down = held,
            MovementKey::Boost => self.is_boosted = held,
        }
    }

    /// Displacement for one frame along the given basis.
    ///
    /// Each held axis contributes independently, so opposing keys cancel out.
    pub fn get_displacement(&self, front: Vec3, right: Vec3, up: Vec3, delta_time: f32) -> Vec3 {
        let mut direction = Vec3::ZERO;
        if self.axes.forward {
            direction += front;
        }
        if self.axes.backward {
            direction -= front;
        }
        if self.axes.right {
            direction += right;
        }
        if self.axes.left {
            direction -= right;
        }
        if self.axes.up {
            direction += up;
        }
        if self.axes.down {
            direction -= up;
        }
        direction * self.current_speed() * delta_time
    }

    pub fn current_speed(&self) -> f32 {
        if self.is_boosted {
            self.normal_speed * self.boosted_speed_mul
        } else {
            self.normal_speed
        }
    }

    #[cfg(test)]
    pub fn is_moving(&self) -> bool {
        self.axes != AxesState::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_and_release_toggle_flags() {
        let mut state = MovementState::new(1.0, 2.0);
        state.handle_key(MovementKey::Forward, KeyAction::Press);
        state.handle_key(MovementKey::Left, KeyAction::Press);
        assert!(state.axes.forward);
        assert!(state.axes.left);
        assert!(state.is_moving());

        state.handle_key(MovementKey::Forward, KeyAction::Release);
        assert!(!state.axes.forward);
        assert!(state.axes.left);

        state.handle_key(MovementKey::Left, KeyAction::Release);
        assert!(!state.is_moving());
    }

    #[test]
    fn test_key_code_mapping() {
        assert_eq!(
            MovementKey::from_key_code(KeyCode::KeyW),
            Some(MovementKey::Forward)
        );
        assert_eq!(
            MovementKey::from_key_code(KeyCode::ControlLeft),
            Some(MovementKey::Down)
        );
        assert_eq!(
            MovementKey::from_key_code(KeyCode::ShiftLeft),
            Some(MovementKey::Boost)
        );
        assert_eq!(MovementKey::from_key_code(KeyCode::KeyZ), None);
        assert_eq!(MovementKey::from_key_code(KeyCode::Escape), None);
    }

    #[test]
    fn test_forward_displacement_scales_with_delta_time() {
        let mut state = MovementState::new(2.0, 4.0);
        state.handle_key(MovementKey::Forward, KeyAction::Press);

        let d = state.get_displacement(Vec3::NEG_Z, Vec3::X, Vec3::Y, 0.5);
        assert!(d.abs_diff_eq(Vec3::new(0.0, 0.0, -1.0), 1e-6));
    }

    #[test]
    fn test_opposing_keys_cancel() {
        let mut state = MovementState::new(2.0, 4.0);
        state.handle_key(MovementKey::Up, KeyAction::Press);
        state.handle_key(MovementKey::Down, KeyAction::Press);
        state.handle_key(MovementKey::Right, KeyAction::Press);
        state.handle_key(MovementKey::Left, KeyAction::Press);

        let d = state.get_displacement(Vec3::NEG_Z, Vec3::X, Vec3::Y, 1.0);
        assert_eq!(d, Vec3::ZERO);
    }

    #[test]
    fn test_boost_multiplies_speed() {
        let mut state = MovementState::new(2.0, 4.0);
        state.handle_key(MovementKey::Right, KeyAction::Press);
        state.handle_key(MovementKey::Boost, KeyAction::Press);
        assert_eq!(state.current_speed(), 8.0);

        let d = state.get_displacement(Vec3::NEG_Z, Vec3::X, Vec3::Y, 0.25);
        assert!(d.abs_diff_eq(Vec3::new(2.0, 0.0, 0.0), 1e-6));

        state.handle_key(MovementKey::Boost, KeyAction::Release);
        assert_eq!(state.current_speed(), 2.0);
        // boost alone does not count as movement
        state.handle_key(MovementKey::Right, KeyAction::Release);
        state.handle_key(MovementKey::Boost, KeyAction::Press);
        assert!(!state.is_moving());
    }

    #[test]
    fn test_element_state_conversion() {
        assert_eq!(KeyAction::from(ElementState::Pressed), KeyAction::Press);
        assert_eq!(KeyAction::from(ElementState::Released), KeyAction::Release);
    }
}
