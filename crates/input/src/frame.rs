use serde::{Deserialize, Serialize};

use crate::buttons::Buttons;

/// Raw touch-panel sample in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TouchPosition {
    pub px: u16,
    pub py: u16,
}

/// Everything the engine reads from the input collaborator in one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameInput {
    /// Buttons that went down this frame.
    pub down: Buttons,
    /// Buttons currently down (including those in `down`).
    pub held: Buttons,
    /// Buttons that went up this frame.
    pub up: Buttons,
    pub touch: TouchPosition,
}

impl FrameInput {
    /// Derive edges from two consecutive level samples.
    pub fn from_levels(previous: Buttons, current: Buttons, touch: TouchPosition) -> Self {
        Self {
            down: current.difference(previous),
            held: current,
            up: previous.difference(current),
            touch,
        }
    }

    pub fn pressed(&self, buttons: Buttons) -> bool {
        self.down.intersects(buttons)
    }

    pub fn released(&self, buttons: Buttons) -> bool {
        self.up.intersects(buttons)
    }

    /// Down this frame or still held.
    pub fn active(&self, buttons: Buttons) -> bool {
        self.down.intersects(buttons) || self.held.intersects(buttons)
    }
}

/// Which input path owns camera orientation this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LookMode {
    /// Directional pad moves the camera; orientation is left alone.
    #[default]
    Free,
    /// Rotate modifier held: directional pad steps yaw and pitch.
    Rotate,
    /// Touch panel active: drag offsets drive yaw and pitch.
    TouchDrag,
}

impl LookMode {
    /// Pick the single active mode. The rotate modifier wins over touch.
    pub fn resolve(input: &FrameInput) -> Self {
        if input.active(Buttons::ROTATE_MODIFIER) {
            Self::Rotate
        } else if input.active(Buttons::TOUCH) || input.released(Buttons::TOUCH) {
            Self::TouchDrag
        } else {
            Self::Free
        }
    }

    /// Whether the directional pad translates the camera in this mode.
    pub fn allows_movement(self) -> bool {
        !matches!(self, Self::Rotate)
    }
}
