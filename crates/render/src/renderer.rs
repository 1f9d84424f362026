use std::fmt::Write as _;

use stereoscape_kernel::Scene;

/// Renderer that turns scene state into some output without touching a GPU.
///
/// It reads the scene and never mutates it.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one snapshot of the scene from the player's point of view.
    fn render(&self, scene: &Scene) -> Self::Output;
}

/// Debug text renderer.
///
/// Produces a human-readable description of the scene, one line per object.
/// Used for CLI output and logs.
#[derive(Debug, Default)]
pub struct DebugTextRenderer;

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, scene: &Scene) -> String {
        let player = scene.player();
        let camera = player.position();
        let mut out = String::new();
        let _ = writeln!(out, "=== Scene (tick={}) ===", scene.tick());
        let _ = writeln!(out, "Objects: {}", scene.object_count());
        let _ = writeln!(
            out,
            "Camera: pos=({:.2}, 0.00, {:.2}) yaw={:.1} pitch={:.1} mode={:?}",
            camera.x,
            camera.z,
            player.yaw().to_degrees(),
            player.pitch().to_degrees(),
            player.look_mode(),
        );

        for object in scene.objects() {
            let p = object.position();
            let mut flags = String::new();
            if object.is_picked_up {
                flags.push_str(" held");
            }
            if object.debug_flag {
                flags.push_str(" debug");
            }
            let _ = writeln!(
                out,
                "  [{}] pos=({:.2}, {:.2}, {:.2}){}",
                object.id(),
                p.x,
                p.y,
                p.z,
                flags
            );
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stereoscape_kernel::{Player, SceneConfig};

    #[test]
    fn debug_renderer_empty_scene() {
        let scene = Scene::default();
        let output = DebugTextRenderer::new().render(&scene);
        assert!(output.contains("tick=0"));
        assert!(output.contains("Objects: 0"));
    }

    #[test]
    fn debug_renderer_with_objects() {
        let scene = Scene::load(&SceneConfig::default(), Player::default()).unwrap();
        let output = DebugTextRenderer::new().render(&scene);
        assert!(output.contains("Objects: 3"));
        assert!(output.contains("pos="));
        assert_eq!(output.matches(" debug").count(), 1);
    }
}
