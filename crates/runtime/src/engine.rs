use glam::Vec3;
use stereoscape_common::ObjectId;
use stereoscape_input::{Buttons, FrameInput};
use stereoscape_kernel::{Player, Scene, SceneError};
use stereoscape_render::{GraphicsBackend, StereoRenderer};
use stereoscape_tools::ConsoleLog;

use crate::config::{ConfigError, EngineConfig};

/// Errors from bringing the engine up.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("scene error: {0}")]
    Scene(#[from] SceneError),
}

/// What one frame did.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameStats {
    pub tick: u64,
    pub eye_passes: u32,
    pub draw_calls: usize,
    pub iod: f32,
    pub held: Option<ObjectId>,
    pub anchor: Option<Vec3>,
}

/// Owns the scene, the diagnostic console and the graphics backend.
///
/// `G` is the external graphics collaborator; it is handed back on shutdown
/// after every scene object has been released.
pub struct Engine<G: GraphicsBackend> {
    scene: Scene,
    renderer: StereoRenderer,
    console: ConsoleLog,
    gfx: G,
}

impl<G: GraphicsBackend> Engine<G> {
    /// Validate `config`, create both eye targets and populate the scene.
    pub fn new(config: EngineConfig, mut gfx: G) -> Result<Self, EngineError> {
        let _span = tracing::info_span!("engine_init").entered();
        config.validate()?;

        let renderer = StereoRenderer::new(config.render);
        gfx.create_targets(&renderer.targets());
        let scene = Scene::load(&config.scene, Player::new(config.player))?;
        tracing::info!(objects = scene.object_count(), "engine ready");

        Ok(Self {
            scene,
            renderer,
            console: ConsoleLog::new(),
            gfx,
        })
    }

    /// One frame: console toggle, logic tick, then the stereo render pass.
    pub fn frame(&mut self, input: &FrameInput) -> FrameStats {
        if input.pressed(Buttons::CONSOLE_REVERSE) {
            self.console.toggle_reversed();
            self.console.print_all();
        }

        let report = self.scene.update(input, &mut self.console);
        let render = self.renderer.render(&self.scene, &mut self.gfx);

        FrameStats {
            tick: report.tick,
            eye_passes: render.eye_passes,
            draw_calls: render.draw_calls,
            iod: render.iod,
            held: self.scene.player().held(),
            anchor: report.anchor,
        }
    }

    /// Run every frame in order, collecting their stats.
    pub fn run<'a>(&mut self, inputs: impl IntoIterator<Item = &'a FrameInput>) -> Vec<FrameStats> {
        inputs.into_iter().map(|input| self.frame(input)).collect()
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn console(&self) -> &ConsoleLog {
        &self.console
    }

    pub fn gfx(&self) -> &G {
        &self.gfx
    }

    pub fn gfx_mut(&mut self) -> &mut G {
        &mut self.gfx
    }

    /// Release the scene, then shut the backend down and hand it back.
    pub fn shutdown(self) -> G {
        let Self { scene, mut gfx, .. } = self;
        let bytes = scene.release();
        gfx.shutdown();
        tracing::info!(bytes, "engine shut down");
        gfx
    }
}
