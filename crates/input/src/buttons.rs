use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Hardware button bitmask, laid out like the handheld's HID register.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct Buttons: u32 {
        const A = 1 << 0;
        const B = 1 << 1;
        const SELECT = 1 << 2;
        const START = 1 << 3;
        const DPAD_RIGHT = 1 << 4;
        const DPAD_LEFT = 1 << 5;
        const DPAD_UP = 1 << 6;
        const DPAD_DOWN = 1 << 7;
        const R = 1 << 8;
        const L = 1 << 9;
        const X = 1 << 10;
        const Y = 1 << 11;
        const ZL = 1 << 14;
        const ZR = 1 << 15;
        const TOUCH = 1 << 20;
    }
}

impl Buttons {
    /// Held: the directional pad rotates the camera instead of moving it.
    pub const ROTATE_MODIFIER: Self = Self::L;
    /// Held: run speed. Released: walk speed.
    pub const RUN: Self = Self::A;
    /// Pressed: toggles inverted pitch.
    pub const INVERT_PITCH: Self = Self::X;
    /// Held: pick up the nearest object.
    pub const MANIPULATE: Self = Self::Y;
    /// Pressed: pulls the view closer.
    pub const DISTANCE_NEAR: Self = Self::ZL;
    /// Pressed: pushes the view further away.
    pub const DISTANCE_FAR: Self = Self::ZR;
    /// Pressed: flips the diagnostic console's row order.
    pub const CONSOLE_REVERSE: Self = Self::B;

    /// Any directional pad button.
    pub const DPAD: Self = Self::DPAD_UP
        .union(Self::DPAD_DOWN)
        .union(Self::DPAD_LEFT)
        .union(Self::DPAD_RIGHT);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roles_map_to_hardware_buttons() {
        assert_eq!(Buttons::ROTATE_MODIFIER, Buttons::L);
        assert_eq!(Buttons::MANIPULATE, Buttons::Y);
        assert!(Buttons::DPAD.contains(Buttons::DPAD_LEFT));
        assert!(!Buttons::DPAD.contains(Buttons::A));
    }

    #[test]
    fn bitmask_round_trips_through_text() {
        let held = Buttons::L | Buttons::DPAD_LEFT;
        let text = serde_json::to_string(&held).unwrap();
        let back: Buttons = serde_json::from_str(&text).unwrap();
        assert_eq!(back, held);
    }
}
