//! Keyboard and pointer input, independent of winit.
//!
//! Lessons poll [`InputState`] for held keys (continuous controls such as
//! moving an object) and [`InputFrame`] for one-shot presses and clicks.

mod frame;
pub mod platform;
mod state;
mod types;

pub use frame::InputFrame;
pub use state::InputState;
pub use types::{InputEvent, Key, MouseButton};
