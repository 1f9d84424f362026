use std::path::Path;

use serde::{Deserialize, Serialize};
use stereoscape_input::{Buttons, FrameInput, TouchPosition};

/// Errors from loading an input script.
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported script format: {0}")]
    UnsupportedFormat(String),
}

/// Hold a button set (and optionally a touch point) for a number of frames.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptStep {
    pub frames: u32,
    #[serde(default)]
    pub held: Buttons,
    /// Touching implies [`Buttons::TOUCH`] is held for the step.
    #[serde(default)]
    pub touch: Option<TouchPosition>,
}

/// Recorded button levels replayed as per-frame input.
///
/// Edges are derived from level transitions, so a button held across two
/// steps is pressed once.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct InputScript {
    pub steps: Vec<ScriptStep>,
}

impl InputScript {
    pub fn new(steps: Vec<ScriptStep>) -> Self {
        Self { steps }
    }

    /// Load from `.yaml`/`.yml` or `.json`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ScriptError> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        let text = std::fs::read_to_string(path)?;
        let script = match ext.as_str() {
            "yaml" | "yml" => serde_yaml::from_str(&text)?,
            "json" => serde_json::from_str(&text)?,
            other => return Err(ScriptError::UnsupportedFormat(other.to_owned())),
        };
        Ok(script)
    }

    pub fn frame_count(&self) -> usize {
        self.steps.iter().map(|s| s.frames as usize).sum()
    }

    /// Expand to one [`FrameInput`] per frame. A trailing all-released frame
    /// is appended so held buttons see their release edge.
    pub fn frames(&self) -> Vec<FrameInput> {
        let mut out = Vec::with_capacity(self.frame_count() + 1);
        let mut previous = Buttons::empty();
        let mut last_touch = TouchPosition::default();
        for step in &self.steps {
            let mut level = step.held;
            if step.touch.is_some() {
                level |= Buttons::TOUCH;
            }
            let touch = step.touch.unwrap_or(last_touch);
            for _ in 0..step.frames {
                out.push(FrameInput::from_levels(previous, level, touch));
                previous = level;
            }
            last_touch = touch;
        }
        if !previous.is_empty() {
            out.push(FrameInput::from_levels(previous, Buttons::empty(), last_touch));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(frames: u32, held: Buttons) -> ScriptStep {
        ScriptStep {
            frames,
            held,
            touch: None,
        }
    }

    #[test]
    fn edges_follow_level_changes() {
        let script = InputScript::new(vec![
            step(2, Buttons::DPAD_UP),
            step(1, Buttons::DPAD_UP | Buttons::A),
        ]);
        let frames = script.frames();
        assert_eq!(frames.len(), 4);
        assert!(frames[0].pressed(Buttons::DPAD_UP));
        assert!(!frames[1].pressed(Buttons::DPAD_UP));
        assert!(frames[1].active(Buttons::DPAD_UP));
        assert!(frames[2].pressed(Buttons::A));
        assert!(!frames[2].pressed(Buttons::DPAD_UP));
        assert!(frames[3].released(Buttons::A | Buttons::DPAD_UP));
        assert!(frames[3].held.is_empty());
    }

    #[test]
    fn touch_implies_touch_button() {
        let script = InputScript::new(vec![ScriptStep {
            frames: 1,
            held: Buttons::empty(),
            touch: Some(TouchPosition { px: 10, py: 20 }),
        }]);
        let frames = script.frames();
        assert!(frames[0].pressed(Buttons::TOUCH));
        assert_eq!(frames[0].touch, TouchPosition { px: 10, py: 20 });
        assert!(frames[1].released(Buttons::TOUCH));
        assert_eq!(frames[1].touch, TouchPosition { px: 10, py: 20 });
    }

    #[test]
    fn idle_script_has_no_release_frame() {
        let script = InputScript::new(vec![step(3, Buttons::empty())]);
        assert_eq!(script.frames().len(), 3);
        assert_eq!(script.frame_count(), 3);
    }

    #[test]
    fn loads_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("walk.yaml");
        std::fs::write(
            &path,
            "steps:\n  - frames: 5\n    held: DPAD_UP | A\n  - frames: 2\n    touch: { px: 50, py: 60 }\n",
        )
        .unwrap();
        let script = InputScript::load(&path).unwrap();
        assert_eq!(script.steps.len(), 2);
        assert_eq!(script.steps[0].held, Buttons::DPAD_UP | Buttons::A);
        assert!(script.steps[1].held.is_empty());
        assert_eq!(script.frame_count(), 7);
    }

    #[test]
    fn rejects_unknown_format() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("walk.txt");
        std::fs::write(&path, "").unwrap();
        assert!(matches!(
            InputScript::load(&path),
            Err(ScriptError::UnsupportedFormat(_))
        ));
    }
}
