//! Per-frame delta time, the stand-in for the timestamp an animation-frame
//! callback receives.

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
