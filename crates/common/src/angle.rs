//! Angle constants and wrapping helpers shared by the camera and renderer.

/// One degree in radians; the per-tick rotation step of the button-driven look.
pub const ONE_DEGREE: f32 = std::f32::consts::PI / 180.0;

/// Pitch limit in degrees. Never reaches true vertical.
pub const PITCH_LIMIT_DEGREES: f32 = 89.9;

/// Pitch limit in radians.
pub fn pitch_limit() -> f32 {
    PITCH_LIMIT_DEGREES.to_radians()
}

/// Clamp a pitch angle (radians) into `[-89.9°, 89.9°]`.
///
/// NaN collapses to level so it never reaches the view matrix.
pub fn clamp_pitch(pitch: f32) -> f32 {
    if pitch.is_nan() {
        return 0.0;
    }
    let limit = pitch_limit();
    pitch.clamp(-limit, limit)
}

/// Wrap a yaw angle (radians) by truncated modulo one full turn.
///
/// The result keeps the sign of the input and lies in `(-2π, 2π)`.
pub fn wrap_full_turn(yaw: f32) -> f32 {
    if !yaw.is_finite() {
        return 0.0;
    }
    yaw % std::f32::consts::TAU
}

/// Wrap an angle in degrees into `[-180°, 180°)`.
pub fn wrap_degrees_signed(degrees: f32) -> f32 {
    if !degrees.is_finite() {
        return 0.0;
    }
    (degrees + 180.0).rem_euclid(360.0) - 180.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn pitch_clamps_both_ways() {
        assert_relative_eq!(clamp_pitch(2.0), pitch_limit());
        assert_relative_eq!(clamp_pitch(-2.0), -pitch_limit());
        assert_eq!(clamp_pitch(0.25), 0.25);
        assert_eq!(clamp_pitch(f32::NAN), 0.0);
    }

    #[test]
    fn yaw_wrap_keeps_sign() {
        let tau = std::f32::consts::TAU;
        assert_relative_eq!(wrap_full_turn(tau + 0.5), 0.5, epsilon = 1e-5);
        assert_relative_eq!(wrap_full_turn(-tau - 0.5), -0.5, epsilon = 1e-5);
        assert!(wrap_full_turn(-0.1) < 0.0);
    }

    #[test]
    fn signed_degree_wrap() {
        assert_eq!(wrap_degrees_signed(0.0), 0.0);
        assert_eq!(wrap_degrees_signed(180.0), -180.0);
        assert_eq!(wrap_degrees_signed(190.0), -170.0);
        assert_eq!(wrap_degrees_signed(-190.0), 170.0);
        assert_eq!(wrap_degrees_signed(-540.0), -180.0);
    }
}
