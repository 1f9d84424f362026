use std::path::PathBuf;

use clap::{Parser, Subcommand};
use glam::Vec3;
use stereoscape_common::NullSink;
use stereoscape_input::FrameInput;
use stereoscape_kernel::{Player, Scene};
use stereoscape_render::{DebugTextRenderer, RecordingBackend, Renderer};
use stereoscape_runtime::{Engine, EngineConfig, InputScript};
use stereoscape_tools::SceneInspector;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "stereoscape-cli", about = "Headless driver for the stereoscape engine")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Engine config (.yaml, .yml or .json); defaults apply when omitted
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and the default scene layout
    Info,
    /// Run frames against a recording backend
    Run {
        /// Frames to run; pads a script with idle frames or truncates it
        #[arg(short, long)]
        frames: Option<usize>,
        /// Input script (.yaml, .yml or .json)
        #[arg(short, long)]
        script: Option<PathBuf>,
        /// 3D slider reading in [0, 1]
        #[arg(long, default_value = "0.0")]
        slider: f32,
        /// Print every frame's stats instead of only the last
        #[arg(long)]
        each: bool,
    },
    /// Let the scene settle, then query the closest pickable object
    Pick {
        /// Query point x
        #[arg(short, long, default_value = "0.0")]
        x: f32,
        /// Query point z
        #[arg(short, long, default_value = "0.0")]
        z: f32,
        /// Search radius; defaults to the player's pick radius
        #[arg(short, long)]
        radius: Option<f32>,
        /// Idle ticks before querying
        #[arg(short, long, default_value = "300")]
        ticks: u64,
    },
    /// Print the effective config as YAML
    Config,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    let config = match &cli.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };

    match cli.command {
        Commands::Info => {
            println!("stereoscape-cli v{}", env!("CARGO_PKG_VERSION"));
            let scene = Scene::load(&config.scene, Player::new(config.player.clone()))?;
            println!("{}", SceneInspector::summary(&scene));
            for id in SceneInspector::list_objects(&scene) {
                println!("  {}", SceneInspector::inspect_object(&scene, id)?);
            }
            println!(
                "render: fov={:.1} near={} far={} screen={} targets={}x{}",
                config.render.fov_y_degrees,
                config.render.near,
                config.render.far,
                config.render.screen_distance,
                config.render.target_width,
                config.render.target_height,
            );
        }
        Commands::Run {
            frames,
            script,
            slider,
            each,
        } => {
            let mut inputs = match &script {
                Some(path) => InputScript::load(path)?.frames(),
                None => Vec::new(),
            };
            let count = frames.unwrap_or(if script.is_some() { inputs.len() } else { 60 });
            inputs.resize(count, FrameInput::default());
            tracing::debug!(frames = count, slider, "starting run");

            let mut engine = Engine::new(config, RecordingBackend::with_slider(slider))?;
            let mut last = None;
            for input in &inputs {
                let stats = engine.frame(input);
                if each {
                    println!(
                        "tick={} passes={} draws={} iod={:.3} held={}",
                        stats.tick,
                        stats.eye_passes,
                        stats.draw_calls,
                        stats.iod,
                        stats.held.map_or_else(|| "none".to_owned(), |id| id.short()),
                    );
                }
                engine.gfx_mut().clear();
                last = Some(stats);
            }

            if let Some(stats) = last {
                println!("Last frame: {stats:?}");
            }
            print!("{}", DebugTextRenderer::new().render(engine.scene()));
            for line in SceneInspector::component_dump(engine.scene()) {
                println!("{line}");
            }
            for line in engine.console().lines() {
                println!("console: {line}");
            }

            let gfx = engine.shutdown();
            println!("Frames rendered: {}", gfx.frames());
        }
        Commands::Pick {
            x,
            z,
            radius,
            ticks,
        } => {
            let radius = radius.unwrap_or(config.player.pick_radius);
            let mut scene = Scene::load(&config.scene, Player::new(config.player))?;
            let idle = FrameInput::default();
            for _ in 0..ticks {
                scene.update(&idle, &mut NullSink);
            }

            let target = Vec3::new(x, 0.0, z);
            match scene.closest_object_to(target, radius) {
                Some(object) => {
                    println!(
                        "Closest within {radius}: distance={:.3}",
                        object.transform.distance_to(target)
                    );
                    println!("{}", SceneInspector::inspect_object(&scene, object.id())?);
                }
                None => println!("No pickable object within {radius} of ({x}, 0, {z})"),
            }
        }
        Commands::Config => {
            print!("{}", config.to_yaml()?);
        }
    }

    Ok(())
}
