//! Input model: button bitmasks sampled once per frame plus a touch-panel position.
//!
//! # Invariants
//! - Input is level-sampled per tick; `down`/`up` mark the edges.
//! - Exactly one [`LookMode`] is active per tick, so only one path writes yaw/pitch.

mod buttons;
mod frame;

pub use buttons::Buttons;
pub use frame::{FrameInput, LookMode, TouchPosition};
