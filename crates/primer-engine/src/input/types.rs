/// Keys the lessons bind controls to.
///
/// Anything else arrives as `Other` carrying the platform scan code, so held
/// state still tracks it even though no lesson reacts.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Key {
    Escape,
    Space,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    PageUp,
    PageDown,
    Q,
    E,
    Z,
    X,
    Other(u32),
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Other(u16),
}

/// One window event, already stripped of platform types.
///
/// Pointer coordinates are logical pixels from the window's top-left corner.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum InputEvent {
    Key { key: Key, pressed: bool, repeat: bool },
    Button { button: MouseButton, pressed: bool },
    PointerMoved { x: f32, y: f32 },
    PointerLeft,
    Focused(bool),
}

impl InputEvent {
    /// A fresh (non-repeat) press of `key`.
    pub fn is_press_of(&self, key: Key) -> bool {
        matches!(*self, InputEvent::Key { key: k, pressed: true, repeat: false } if k == key)
    }
}
