use std::path::Path;

use serde::{Deserialize, Serialize};
use stereoscape_kernel::{PlayerConfig, SceneConfig};
use stereoscape_render::RenderConfig;

/// Errors from loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported config format: {0}")]
    UnsupportedFormat(String),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Everything needed to bring an engine up. Missing sections take defaults.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub scene: SceneConfig,
    pub player: PlayerConfig,
    pub render: RenderConfig,
}

impl EngineConfig {
    /// Load from a `.yaml`/`.yml` or `.json` file and validate it.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        let text = std::fs::read_to_string(path)?;
        let config: Self = match ext.as_str() {
            "yaml" | "yml" => serde_yaml::from_str(&text)?,
            "json" => serde_json::from_str(&text)?,
            other => return Err(ConfigError::UnsupportedFormat(other.to_owned())),
        };
        config.validate()?;
        tracing::info!(path = %path.display(), "config loaded");
        Ok(config)
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Reject values that would produce NaN matrices or a degenerate scene.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let r = &self.render;
        finite(&[
            ("render.fov_y_degrees", r.fov_y_degrees),
            ("render.aspect", r.aspect),
            ("render.near", r.near),
            ("render.far", r.far),
            ("render.screen_distance", r.screen_distance),
            ("render.iod_divisor", r.iod_divisor),
        ])?;
        check(r.near > 0.0, "render.near must be positive")?;
        check(r.far > r.near, "render.far must exceed render.near")?;
        check(
            r.fov_y_degrees > 0.0 && r.fov_y_degrees < 180.0,
            "render.fov_y_degrees must be in (0, 180)",
        )?;
        check(r.aspect > 0.0, "render.aspect must be positive")?;
        check(r.screen_distance > 0.0, "render.screen_distance must be positive")?;
        check(r.iod_divisor > 0.0, "render.iod_divisor must be positive")?;
        check(
            r.target_width > 0 && r.target_height > 0,
            "render targets must be non-empty",
        )?;

        let p = &self.player;
        finite(&[
            ("player.start_position.x", p.start_position.x),
            ("player.start_position.y", p.start_position.y),
            ("player.initial_speed", p.initial_speed),
            ("player.walk_speed", p.walk_speed),
            ("player.run_speed", p.run_speed),
            ("player.rotation_step", p.rotation_step),
            ("player.touch_sensitivity", p.touch_sensitivity),
            ("player.touch_pitch_base_limit", p.touch_pitch_base_limit),
            ("player.pick_radius", p.pick_radius),
            ("player.anchor_distance", p.anchor_distance),
            ("player.dolly_step", p.dolly_step),
        ])?;
        check(
            p.initial_speed >= 0.0 && p.walk_speed >= 0.0 && p.run_speed >= 0.0,
            "player speeds must not be negative",
        )?;
        check(p.rotation_step >= 0.0, "player.rotation_step must not be negative")?;
        check(
            p.touch_pitch_base_limit >= 0.0,
            "player.touch_pitch_base_limit must not be negative",
        )?;
        check(p.pick_radius >= 0.0, "player.pick_radius must not be negative")?;
        check(p.diagnostic_interval > 0, "player.diagnostic_interval must be positive")?;

        let s = &self.scene;
        finite(&[
            ("scene.x_spacing", s.x_spacing),
            ("scene.y_spacing", s.y_spacing),
            ("physics.gravity", s.physics.gravity),
            ("physics.bounce_damping", s.physics.bounce_damping),
            ("physics.drag", s.physics.drag),
            ("physics.gravity_ramp", s.physics.gravity_ramp),
        ])?;
        if let Some(index) = s.debug_object {
            check(
                index < s.object_count,
                "scene.debug_object must index a spawned object",
            )?;
        }
        check(s.physics.gravity < 0.0, "physics.gravity must be negative")?;
        check(
            (0.0..=1.0).contains(&s.physics.drag) && (0.0..=1.0).contains(&s.physics.bounce_damping),
            "physics drag and bounce_damping must be in [0, 1]",
        )?;
        check(s.physics.gravity_ramp > 0.0, "physics.gravity_ramp must be positive")?;
        Ok(())
    }
}

/// Every named value must be finite.
fn finite(values: &[(&str, f32)]) -> Result<(), ConfigError> {
    match values.iter().find(|(_, v)| !v.is_finite()) {
        Some((name, _)) => Err(ConfigError::Invalid(format!("{name} must be finite"))),
        None => Ok(()),
    }
}

fn check(ok: bool, message: &str) -> Result<(), ConfigError> {
    if ok {
        Ok(())
    } else {
        Err(ConfigError::Invalid(message.to_owned()))
    }
}
