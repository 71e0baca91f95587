/// Platform-agnostic input handling system
use std::collections::HashSet;

use glam::Vec2;

/// Platform-independent input events
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    // Keyboard events
    KeyDown(String),
    KeyUp(String),

    // Pointer events, positions in screen pixels
    PointerMoved { x: f32, y: f32 },
    MouseClick { button: MouseButton, is_down: bool },

    // Window events
    Resized { width: u32, height: u32 },
    FocusLost,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

impl MouseButton {
    pub fn from_web_button(button: i16) -> Self {
        match button {
            1 => MouseButton::Middle,
            2 => MouseButton::Right,
            _ => MouseButton::Left,
        }
    }
}

/// Raw input accumulated from events between frames
#[derive(Debug, Clone)]
pub struct InputState {
    pub pressed_keys: HashSet<String>,
    pub pointer: Vec2,
    pub primary_down: bool,
    pub screen: (u32, u32),
}

impl InputState {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            pressed_keys: HashSet::new(),
            // Start centred so the first frame carries no steering input
            pointer: Vec2::new(width as f32 / 2.0, height as f32 / 2.0),
            primary_down: false,
            screen: (width, height),
        }
    }

    /// Process an input event and update state
    pub fn process_event(&mut self, event: &InputEvent) {
        match event {
            InputEvent::KeyDown(key) => {
                self.pressed_keys.insert(key.clone());
            }
            InputEvent::KeyUp(key) => {
                self.pressed_keys.remove(key.as_str());
            }
            InputEvent::PointerMoved { x, y } => {
                self.pointer = Vec2::new(*x, *y);
            }
            InputEvent::MouseClick { button, is_down } => {
                if *button == MouseButton::Left {
                    self.primary_down = *is_down;
                }
            }
            InputEvent::Resized { width, height } => {
                self.screen = (*width, *height);
            }
            InputEvent::FocusLost => {
                self.clear();
            }
        }
    }

    pub fn is_key_pressed(&self, key: &str) -> bool {
        self.pressed_keys.contains(key)
    }

    pub fn clear(&mut self) {
        self.pressed_keys.clear();
        self.primary_down = false;
    }
}

/// Key mapping configuration
#[derive(Debug, Clone)]
pub struct KeyBindings {
    pub forward: String,
    pub back: String,
    pub turn_left: String,
    pub turn_right: String,
    pub exit: String,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            forward: "w".to_string(),
            back: "s".to_string(),
            turn_left: "a".to_string(),
            turn_right: "d".to_string(),
            exit: "Escape".to_string(),
        }
    }
}

/// Sanitised input for one frame, the only input the simulation sees
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameInput {
    pub forward: bool,
    pub back: bool,
    pub turn_left: bool,
    pub turn_right: bool,
    pub exit: bool,
    pub fire: bool,
    pub pointer: Vec2,
    pub screen: Vec2,
}

impl FrameInput {
    /// No keys, button up, pointer at the centre of a `width` x `height` screen.
    pub fn idle(width: f32, height: f32) -> Self {
        Self {
            pointer: Vec2::new(width / 2.0, height / 2.0),
            screen: Vec2::new(width, height),
            ..Self::default()
        }
    }

    pub fn screen_center(&self) -> Vec2 {
        (self.screen / 2.0).floor()
    }
}

/// High-level input processor
#[derive(Debug, Clone, Default)]
pub struct InputProcessor {
    bindings: KeyBindings,
}

impl InputProcessor {
    fn held(&self, input: &InputState, binding: &str, alias: &str) -> bool {
        input.is_key_pressed(binding)
            || input.is_key_pressed(&binding.to_uppercase())
            || input.is_key_pressed(alias)
    }

    pub fn is_thrusting(&self, input: &InputState) -> bool {
        self.held(input, &self.bindings.forward, "ArrowUp")
    }

    pub fn is_reversing(&self, input: &InputState) -> bool {
        self.held(input, &self.bindings.back, "ArrowDown")
    }

    pub fn is_turning_left(&self, input: &InputState) -> bool {
        self.held(input, &self.bindings.turn_left, "ArrowLeft")
    }

    pub fn is_turning_right(&self, input: &InputState) -> bool {
        self.held(input, &self.bindings.turn_right, "ArrowRight")
    }

    pub fn is_exit(&self, input: &InputState) -> bool {
        input.is_key_pressed(&self.bindings.exit)
    }

    pub fn sample(&self, input: &InputState) -> FrameInput {
        FrameInput {
            forward: self.is_thrusting(input),
            back: self.is_reversing(input),
            turn_left: self.is_turning_left(input),
            turn_right: self.is_turning_right(input),
            exit: self.is_exit(input),
            fire: input.primary_down,
            pointer: input.pointer,
            screen: Vec2::new(input.screen.0 as f32, input.screen.1 as f32),
        }
    }
}

/// Turns a held button into a single press: true only on the frame it goes down.
#[derive(Debug, Clone, Copy, Default)]
pub struct ButtonEdge {
    last: bool,
}

impl ButtonEdge {
    pub fn rising(&mut self, now: bool) -> bool {
        let pressed = now && !self.last;
        self.last = now;
        pressed
    }
}

#[cfg(target_arch = "wasm32")]
pub mod wasm {
    use super::*;
    use web_sys::{KeyboardEvent, MouseEvent};

    pub fn keyboard_event_to_input(e: &KeyboardEvent, is_down: bool) -> InputEvent {
        let key = e.key();
        if is_down {
            InputEvent::KeyDown(key)
        } else {
            InputEvent::KeyUp(key)
        }
    }

    pub fn mouse_move_to_input(e: &MouseEvent) -> InputEvent {
        InputEvent::PointerMoved {
            x: e.offset_x() as f32,
            y: e.offset_y() as f32,
        }
    }

    pub fn mouse_click_to_input(e: &MouseEvent, is_down: bool) -> InputEvent {
        InputEvent::MouseClick {
            button: MouseButton::from_web_button(e.button()),
            is_down,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rising_edge_once_per_press() {
        let mut edge = ButtonEdge::default();
        let presses: usize = (0..10).filter(|_| edge.rising(true)).count();
        assert_eq!(presses, 1);

        assert!(!edge.rising(false));
        assert!(edge.rising(true));
    }

    #[test]
    fn test_sample_maps_bindings_and_aliases() {
        let processor = InputProcessor::default();
        let mut state = InputState::new(1600, 900);
        state.process_event(&InputEvent::KeyDown("W".to_string()));
        state.process_event(&InputEvent::KeyDown("ArrowRight".to_string()));
        state.process_event(&InputEvent::MouseClick { button: MouseButton::Left, is_down: true });

        let frame = processor.sample(&state);
        assert!(frame.forward);
        assert!(frame.turn_right);
        assert!(!frame.turn_left && !frame.back && !frame.exit);
        assert!(frame.fire);
        assert_eq!(frame.pointer, Vec2::new(800.0, 450.0));
    }

    #[test]
    fn test_right_button_does_not_fire() {
        let mut state = InputState::new(100, 100);
        state.process_event(&InputEvent::MouseClick { button: MouseButton::Right, is_down: true });
        assert!(!InputProcessor::default().sample(&state).fire);
    }

    #[test]
    fn test_focus_lost_releases_everything() {
        let mut state = InputState::new(100, 100);
        state.process_event(&InputEvent::KeyDown("d".to_string()));
        state.process_event(&InputEvent::MouseClick { button: MouseButton::Left, is_down: true });
        state.process_event(&InputEvent::FocusLost);
        let frame = InputProcessor::default().sample(&state);
        assert!(!frame.turn_right && !frame.fire);
    }

    #[test]
    fn test_resize_moves_screen_center() {
        let mut state = InputState::new(1600, 900);
        state.process_event(&InputEvent::Resized { width: 801, height: 601 });
        let frame = InputProcessor::default().sample(&state);
        assert_eq!(frame.screen_center(), Vec2::new(400.0, 300.0));
    }
}
