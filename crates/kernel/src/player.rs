use glam::{IVec2, Mat4, Vec2, Vec3, Vec4};
use serde::{Deserialize, Serialize};
use stereoscape_common::angle::{self, ONE_DEGREE};
use stereoscape_common::{DiagnosticSink, ObjectId};
use stereoscape_input::{Buttons, FrameInput, LookMode};

/// Touch deltas are normalised against the full 16-bit range.
const TOUCH_RANGE: f32 = 65536.0;

const ROW_TOUCH_PITCH: u16 = 8;
const ROW_TOUCH_YAW: u16 = 9;
const ROW_TOUCH_BASE: u16 = 10;
const ROW_TOUCH_GRAB: u16 = 11;
const ROW_ORIENTATION: u16 = 12;
const ROW_INVERSE_PITCH: u16 = 20;

/// Camera and input tunables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Starting camera position on the ground plane (x, z).
    pub start_position: Vec2,
    pub initial_speed: f32,
    pub walk_speed: f32,
    pub run_speed: f32,
    /// Radians per tick for button-driven rotation.
    pub rotation_step: f32,
    pub touch_sensitivity: f32,
    /// Committed touch pitch base is clamped to this magnitude on release.
    pub touch_pitch_base_limit: f32,
    pub pick_radius: f32,
    /// Distance in front of the camera of the manipulation anchor.
    pub anchor_distance: f32,
    /// Ticks between periodic diagnostic refreshes.
    pub diagnostic_interval: u32,
    /// View distance change per distance-adjust press.
    pub dolly_step: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            start_position: Vec2::new(0.0, 10.0),
            initial_speed: 0.04,
            walk_speed: 0.05,
            run_speed: 0.5,
            rotation_step: ONE_DEGREE,
            touch_sensitivity: 256.0,
            touch_pitch_base_limit: 127.0,
            pick_radius: 4.0,
            anchor_distance: 2.0,
            diagnostic_interval: 50,
            dolly_step: 1.0,
        }
    }
}

/// Touch-drag accumulator.
///
/// Axes are swapped relative to the panel: screen y drives pitch and screen x
/// drives yaw.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct TouchDrag {
    /// Panel position captured on touch-down.
    grab: IVec2,
    /// Live offset from `grab` while the stylus is down.
    offset: Vec2,
    /// Committed offsets from earlier drags.
    base: Vec2,
}

/// First-person camera, input state machine and object manipulation.
#[derive(Debug, Clone)]
pub struct Player {
    config: PlayerConfig,
    /// Camera position. `y` is always zero.
    position: Vec3,
    yaw: f32,
    pitch: f32,
    speed: f32,
    dolly: f32,
    mode: LookMode,
    touch: TouchDrag,
    inverse_pitch: bool,
    manipulating: bool,
    held: Option<ObjectId>,
    previous_view: Mat4,
    ahead_anchor: Option<Vec3>,
    ticks_since_report: u32,
}

impl Default for Player {
    fn default() -> Self {
        Self::new(PlayerConfig::default())
    }
}

impl Player {
    pub fn new(config: PlayerConfig) -> Self {
        Self {
            position: Vec3::new(config.start_position.x, 0.0, config.start_position.y),
            yaw: 0.0,
            pitch: 0.0,
            speed: config.initial_speed,
            dolly: 0.0,
            mode: LookMode::Free,
            touch: TouchDrag::default(),
            inverse_pitch: false,
            manipulating: false,
            held: None,
            previous_view: Mat4::ZERO,
            ahead_anchor: None,
            ticks_since_report: 0,
            config,
        }
    }

    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn set_position(&mut self, x: f32, z: f32) {
        self.position = Vec3::new(x, 0.0, z);
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn set_orientation(&mut self, yaw: f32, pitch: f32) {
        self.yaw = angle::wrap_full_turn(yaw);
        self.pitch = angle::clamp_pitch(pitch);
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn dolly(&self) -> f32 {
        self.dolly
    }

    pub fn look_mode(&self) -> LookMode {
        self.mode
    }

    pub fn inverse_pitch(&self) -> bool {
        self.inverse_pitch
    }

    pub fn is_manipulating(&self) -> bool {
        self.manipulating
    }

    /// The object currently in hands, if any. Non-owning.
    pub fn held(&self) -> Option<ObjectId> {
        self.held
    }

    /// Last world-space anchor computed while holding an object.
    pub fn ahead_anchor(&self) -> Option<Vec3> {
        self.ahead_anchor
    }

    /// View matrix captured on the last tick spent not manipulating.
    pub fn previous_view(&self) -> Mat4 {
        self.previous_view
    }

    /// Advance one logic tick from this frame's input.
    pub fn update(&mut self, input: &FrameInput, diag: &mut dyn DiagnosticSink) {
        self.mode = LookMode::resolve(input);
        if self.mode.allows_movement() {
            self.walk(input);
        }
        match self.mode {
            LookMode::Rotate => self.rotate(input),
            LookMode::TouchDrag => self.drag(input, diag),
            LookMode::Free => {}
        }

        if input.active(Buttons::RUN) {
            self.speed = self.config.run_speed;
        } else if input.released(Buttons::RUN) {
            self.speed = self.config.walk_speed;
        }

        if input.pressed(Buttons::INVERT_PITCH) {
            self.inverse_pitch = !self.inverse_pitch;
            if self.inverse_pitch {
                diag.line(ROW_INVERSE_PITCH, "Inverse Pitch is enabled.");
            } else {
                diag.clear_line(ROW_INVERSE_PITCH);
            }
        }

        if input.pressed(Buttons::DISTANCE_NEAR) {
            self.dolly -= self.config.dolly_step;
        }
        if input.pressed(Buttons::DISTANCE_FAR) {
            self.dolly += self.config.dolly_step;
        }

        self.manipulating = input.active(Buttons::MANIPULATE);
        if !self.manipulating {
            self.previous_view = self.view_matrix();
            self.ahead_anchor = None;
        }

        self.ticks_since_report += 1;
        if self.ticks_since_report > self.config.diagnostic_interval {
            self.report(diag);
            self.ticks_since_report = 0;
        }
    }

    /// Directional pad translates along the yaw-rotated forward/strafe axes.
    fn walk(&mut self, input: &FrameInput) {
        if !input.held.intersects(Buttons::DPAD) {
            return;
        }
        let (sin, cos) = self.yaw.sin_cos();
        let forward = Vec3::new(sin, 0.0, -cos) * self.speed;
        let right = Vec3::new(cos, 0.0, sin) * self.speed;
        let held = input.held;
        if held.contains(Buttons::DPAD_UP) {
            self.position += forward;
        } else if held.contains(Buttons::DPAD_DOWN) {
            self.position -= forward;
        } else if held.contains(Buttons::DPAD_LEFT) {
            self.position -= right;
        } else if held.contains(Buttons::DPAD_RIGHT) {
            self.position += right;
        }
    }

    /// Directional pad steps yaw (wrapped) or pitch (clamped).
    fn rotate(&mut self, input: &FrameInput) {
        let step = self.config.rotation_step;
        let pitch_sign = if self.inverse_pitch { 1.0 } else { -1.0 };
        let held = input.held;
        if held.contains(Buttons::DPAD_LEFT) {
            self.yaw = angle::wrap_full_turn(self.yaw - step);
        } else if held.contains(Buttons::DPAD_RIGHT) {
            self.yaw = angle::wrap_full_turn(self.yaw + step);
        } else if held.contains(Buttons::DPAD_UP) {
            self.pitch = angle::clamp_pitch(self.pitch + pitch_sign * step);
        } else if held.contains(Buttons::DPAD_DOWN) {
            self.pitch = angle::clamp_pitch(self.pitch - pitch_sign * step);
        }
    }

    fn drag(&mut self, input: &FrameInput, diag: &mut dyn DiagnosticSink) {
        let panel = IVec2::new(i32::from(input.touch.py), i32::from(input.touch.px));
        if input.pressed(Buttons::TOUCH) {
            self.touch.grab = panel;
        } else if input.held.contains(Buttons::TOUCH) {
            self.touch.offset = (self.touch.grab - panel).as_vec2();
            self.apply_touch(self.touch.base + self.touch.offset, diag);
        } else if input.released(Buttons::TOUCH) {
            self.touch.base += self.touch.offset;
            self.touch.offset = Vec2::ZERO;
            self.apply_touch(self.touch.base, diag);
            let limit = self.config.touch_pitch_base_limit.abs();
            self.touch.base.x = self.touch.base.x.max(-limit).min(limit);
            tracing::debug!(base = ?self.touch.base, "touch drag committed");
        }
    }

    /// Map accumulated drag into pitch (clamped) and yaw (wrapped to [-180°, 180°)).
    fn apply_touch(&mut self, drag: Vec2, diag: &mut dyn DiagnosticSink) {
        let scale = self.config.touch_sensitivity / TOUCH_RANGE;
        let pitch_degrees = (drag.x * scale * 180.0)
            .clamp(-angle::PITCH_LIMIT_DEGREES, angle::PITCH_LIMIT_DEGREES);
        let yaw_degrees = angle::wrap_degrees_signed(drag.y * scale * 360.0);
        self.pitch = angle::clamp_pitch(pitch_degrees.to_radians());
        self.yaw = yaw_degrees.to_radians();
        diag.line(ROW_TOUCH_PITCH, &format!("Pitch: {pitch_degrees}"));
        diag.line(ROW_TOUCH_YAW, &format!("Yaw: {yaw_degrees}"));
    }

    fn report(&self, diag: &mut dyn DiagnosticSink) {
        let t = &self.touch;
        diag.line(
            ROW_TOUCH_BASE,
            &format!("Touch Coordinates: {}  {}", t.base.x, t.base.y),
        );
        diag.line(ROW_TOUCH_GRAB, &format!("Old Touches: {}  {}", t.grab.x, t.grab.y));
        diag.line(
            ROW_ORIENTATION,
            &format!("Yaw: {}   Pitch: {}", self.yaw, self.pitch),
        );
    }

    /// World-to-view transform for the current camera state.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_translation(Vec3::new(0.0, 0.0, self.dolly))
            * Mat4::from_rotation_x(self.pitch)
            * Mat4::from_rotation_y(self.yaw)
            * Mat4::from_translation(-self.position)
    }

    /// Take hold of `id` and compute the anchor point in front of the camera.
    ///
    /// The anchor is informational; the held object is not moved to it.
    pub fn hold(&mut self, id: ObjectId) -> Option<Vec3> {
        self.held = Some(id);
        let anchor = ahead_point(&self.view_matrix(), self.config.anchor_distance);
        self.ahead_anchor = anchor;
        match anchor {
            Some(a) => tracing::debug!(
                object = %id,
                ahead = ?a,
                player = ?self.position,
                "holding object"
            ),
            None => tracing::warn!(object = %id, "view matrix not invertible, no anchor"),
        }
        anchor
    }

    /// Drop the held-object reference.
    pub fn release_hold(&mut self) -> Option<ObjectId> {
        self.held.take()
    }
}

/// World-space point `distance` units straight ahead of the camera.
fn ahead_point(view: &Mat4, distance: f32) -> Option<Vec3> {
    let inverse = checked_inverse(view)?;
    let p = inverse * Vec4::new(0.0, 0.0, -distance, 1.0);
    if p.w.abs() <= f32::EPSILON {
        return None;
    }
    let point = p.truncate() / p.w;
    point.is_finite().then_some(point)
}

/// Inverse of `m`, or `None` when it would not be finite.
fn checked_inverse(m: &Mat4) -> Option<Mat4> {
    let det = m.determinant();
    if !det.is_finite() || det.abs() <= f32::EPSILON {
        return None;
    }
    let inverse = m.inverse();
    inverse.is_finite().then_some(inverse)
}
