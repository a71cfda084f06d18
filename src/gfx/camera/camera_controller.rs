use cgmath::Vector2;
use winit::{
    event::{ElementState, KeyEvent, MouseButton, Touch, TouchPhase, WindowEvent},
    keyboard::{KeyCode, PhysicalKey},
};

/// Held state of the rotation keys: W/S pitch, A/D yaw, Q/E roll.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyStates {
    pub w_pressed: bool,
    pub a_pressed: bool,
    pub s_pressed: bool,
    pub d_pressed: bool,
    pub q_pressed: bool,
    pub e_pressed: bool,
}

impl KeyStates {
    /// Records a key change. Returns whether `key` is a rotation key.
    pub fn set_key_state(&mut self, key: KeyCode, pressed: bool) -> bool {
        let state = match key {
            KeyCode::KeyW => &mut self.w_pressed,
            KeyCode::KeyA => &mut self.a_pressed,
            KeyCode::KeyS => &mut self.s_pressed,
            KeyCode::KeyD => &mut self.d_pressed,
            KeyCode::KeyQ => &mut self.q_pressed,
            KeyCode::KeyE => &mut self.e_pressed,
            _ => return false,
        };
        *state = pressed;
        true
    }
}

/// Pointer state in physical pixels, shared by mouse and touch input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseStates {
    pub last_cursor_position: Vector2<f32>,
    pub current_cursor_position: Vector2<f32>,
    pub button_pressed: bool,
    pub touch_active: bool,
    first_move: bool,
}

impl Default for MouseStates {
    fn default() -> Self {
        Self {
            last_cursor_position: Vector2::new(0.0, 0.0),
            current_cursor_position: Vector2::new(0.0, 0.0),
            button_pressed: false,
            touch_active: false,
            first_move: true,
        }
    }
}

impl MouseStates {
    /// Shifts the current position into the last one. The very first move
    /// only seeds both, so it never reads as a drag.
    pub fn move_cursor(&mut self, position: Vector2<f32>) {
        if self.first_move {
            self.current_cursor_position = position;
            self.first_move = false;
        }
        self.last_cursor_position = self.current_cursor_position;
        self.current_cursor_position = position;
    }

    pub fn touch(&mut self, phase: TouchPhase, position: Vector2<f32>) {
        match phase {
            TouchPhase::Started => {
                self.touch_active = true;
                // A new finger must not drag from where the previous one lifted.
                self.first_move = true;
                self.move_cursor(position);
            }
            TouchPhase::Moved => {
                self.touch_active = true;
                self.move_cursor(position);
            }
            TouchPhase::Ended | TouchPhase::Cancelled => self.touch_active = false,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputStates {
    pub mouse_states: MouseStates,
    pub key_states: KeyStates,
}

/// Translates window events into [`InputStates`] for the camera.
#[derive(Debug, Default)]
pub struct CameraController {
    states: InputStates,
}

impl CameraController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn states(&self) -> &InputStates {
        &self.states
    }

    /// Returns true when the event changed camera input.
    pub fn process_window_event(&mut self, event: &WindowEvent) -> bool {
        let mouse = &mut self.states.mouse_states;
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                if mouse.touch_active {
                    return false;
                }
                mouse.move_cursor(Vector2::new(position.x as f32, position.y as f32));
                true
            }
            WindowEvent::MouseInput {
                button: MouseButton::Left,
                state,
                ..
            } => {
                mouse.button_pressed = *state == ElementState::Pressed;
                true
            }
            WindowEvent::Touch(Touch {
                phase, location, ..
            }) => {
                mouse.touch(*phase, Vector2::new(location.x as f32, location.y as f32));
                true
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key_code),
                        state,
                        ..
                    },
                ..
            } => self
                .states
                .key_states
                .set_key_state(*key_code, *state == ElementState::Pressed),
            WindowEvent::Focused(false) => {
                // Key releases are not delivered to an unfocused window.
                self.states.key_states = KeyStates::default();
                mouse.button_pressed = false;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_keys_are_tracked() {
        let mut keys = KeyStates::default();
        assert!(keys.set_key_state(KeyCode::KeyW, true));
        assert!(keys.set_key_state(KeyCode::KeyE, true));
        assert!(keys.w_pressed && keys.e_pressed);

        assert!(keys.set_key_state(KeyCode::KeyW, false));
        assert!(!keys.w_pressed);

        assert!(!keys.set_key_state(KeyCode::Space, true));
    }

    #[test]
    fn test_first_cursor_move_is_not_a_drag() {
        let mut mouse = MouseStates::default();
        mouse.move_cursor(Vector2::new(300.0, 200.0));
        assert_eq!(mouse.last_cursor_position, mouse.current_cursor_position);

        mouse.move_cursor(Vector2::new(310.0, 190.0));
        assert_eq!(mouse.last_cursor_position, Vector2::new(300.0, 200.0));
        assert_eq!(mouse.current_cursor_position, Vector2::new(310.0, 190.0));
    }

    #[test]
    fn test_touch_lifecycle() {
        let mut mouse = MouseStates::default();
        mouse.move_cursor(Vector2::new(10.0, 10.0));

        mouse.touch(TouchPhase::Started, Vector2::new(500.0, 400.0));
        assert!(mouse.touch_active);
        assert_eq!(mouse.last_cursor_position, Vector2::new(500.0, 400.0));

        mouse.touch(TouchPhase::Moved, Vector2::new(520.0, 400.0));
        assert_eq!(mouse.last_cursor_position, Vector2::new(500.0, 400.0));

        mouse.touch(TouchPhase::Ended, Vector2::new(520.0, 400.0));
        assert!(!mouse.touch_active);
    }
}
