use std::collections::HashSet;

use super::frame::InputFrame;
use super::types::{InputEvent, Key, MouseButton};

/// What is held right now, for controls that act continuously.
#[derive(Debug, Default)]
pub struct InputState {
    /// Logical pixels; `None` while the cursor is outside the window.
    pub pointer: Option<(f32, f32)>,
    pub held_keys: HashSet<Key>,
    pub held_buttons: HashSet<MouseButton>,
}

impl InputState {
    /// Folds `event` into the held state and records the transition in `frame`.
    pub fn apply_event(&mut self, frame: &mut InputFrame, event: InputEvent) {
        match event {
            InputEvent::Key { key, pressed: true, repeat } => {
                if self.held_keys.insert(key) || repeat {
                    frame.pressed.insert(key);
                }
            }
            InputEvent::Key { key, pressed: false, .. } => {
                self.held_keys.remove(&key);
            }
            InputEvent::Button { button, pressed: true } => {
                self.held_buttons.insert(button);
            }
            InputEvent::Button { button, pressed: false } => {
                // A release only counts as a click if we saw the press.
                if self.held_buttons.remove(&button) && self.pointer.is_some() {
                    frame.clicks.insert(button);
                }
            }
            InputEvent::PointerMoved { x, y } => self.pointer = Some((x, y)),
            InputEvent::PointerLeft => self.pointer = None,
            InputEvent::Focused(true) => {}
            InputEvent::Focused(false) => {
                // Releases that happen while unfocused never reach us.
                self.held_keys.clear();
                self.held_buttons.clear();
            }
        }
    }

    pub fn key_down(&self, key: Key) -> bool {
        self.held_keys.contains(&key)
    }

    /// `-1`, `0` or `1` depending on which of two opposing keys is held.
    pub fn axis(&self, negative: Key, positive: Key) -> f32 {
        match (self.key_down(negative), self.key_down(positive)) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(key: Key) -> InputEvent {
        InputEvent::Key { key, pressed: true, repeat: false }
    }

    fn release(key: Key) -> InputEvent {
        InputEvent::Key { key, pressed: false, repeat: false }
    }

    fn feed(events: &[InputEvent]) -> (InputState, InputFrame) {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        for &event in events {
            state.apply_event(&mut frame, event);
        }
        (state, frame)
    }

    #[test]
    fn held_keys_follow_press_and_release() {
        let (mut state, mut frame) = feed(&[press(Key::Space)]);
        assert!(state.key_down(Key::Space));
        assert!(frame.key_pressed(Key::Space));

        frame.clear();
        state.apply_event(&mut frame, release(Key::Space));
        assert!(!state.key_down(Key::Space));
        assert!(!frame.key_pressed(Key::Space));
    }

    #[test]
    fn auto_repeat_registers_another_press() {
        let (mut state, mut frame) = feed(&[press(Key::ArrowUp)]);
        frame.clear();
        state.apply_event(
            &mut frame,
            InputEvent::Key { key: Key::ArrowUp, pressed: true, repeat: true },
        );
        assert!(frame.key_pressed(Key::ArrowUp));
    }

    #[test]
    fn losing_focus_drops_held_keys() {
        let (state, frame) = feed(&[press(Key::Q), InputEvent::Focused(false)]);
        assert!(state.held_keys.is_empty());
        assert!(frame.key_pressed(Key::Q));
    }

    #[test]
    fn opposing_keys_cancel_on_an_axis() {
        let (mut state, mut frame) = feed(&[press(Key::ArrowLeft)]);
        assert_eq!(state.axis(Key::ArrowLeft, Key::ArrowRight), -1.0);
        state.apply_event(&mut frame, press(Key::ArrowRight));
        assert_eq!(state.axis(Key::ArrowLeft, Key::ArrowRight), 0.0);
    }

    #[test]
    fn click_needs_press_release_inside_the_window() {
        let left = |pressed| InputEvent::Button { button: MouseButton::Left, pressed };

        let (_, frame) = feed(&[InputEvent::PointerMoved { x: 4.0, y: 2.0 }, left(true), left(false)]);
        assert!(frame.clicked());

        let (_, frame) = feed(&[left(true), left(false)]);
        assert!(!frame.clicked());

        let (state, frame) = feed(&[InputEvent::PointerMoved { x: 4.0, y: 2.0 }, left(false)]);
        assert!(!frame.clicked());
        assert_eq!(state.pointer, Some((4.0, 2.0)));
    }

    #[test]
    fn escape_press_is_recognised_once() {
        assert!(press(Key::Escape).is_press_of(Key::Escape));
        assert!(!InputEvent::Key { key: Key::Escape, pressed: true, repeat: true }.is_press_of(Key::Escape));
        assert!(!release(Key::Escape).is_press_of(Key::Escape));
    }
}
