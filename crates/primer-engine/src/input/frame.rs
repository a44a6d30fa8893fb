use std::collections::HashSet;

use super::types::{Key, MouseButton};

/// Transitions seen since the last redraw.
///
/// The runtime clears it after every redraw, drawn or skipped, so a press is seen by
/// at most one frame no matter how many events arrived in between.
#[derive(Debug, Default)]
pub struct InputFrame {
    /// Includes auto-repeat presses.
    pub pressed: HashSet<Key>,
    pub clicks: HashSet<MouseButton>,
}

impl InputFrame {
    pub fn clear(&mut self) {
        self.pressed.clear();
        self.clicks.clear();
    }

    pub fn key_pressed(&self, key: Key) -> bool {
        self.pressed.contains(&key)
    }

    /// The left button went down and came back up over the window.
    pub fn clicked(&self) -> bool {
        self.clicks.contains(&MouseButton::Left)
    }
}
