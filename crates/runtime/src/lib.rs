//! Stereoscape runtime: ties scene, input and stereo rendering into a frame loop.
//!
//! # Invariants
//! - Every frame runs the logic tick before the render pass.
//! - Shutdown releases the scene before the graphics backend, never the reverse.
//! - Configuration is validated before any object or render target exists.

mod config;
mod engine;
mod script;

pub use config::{ConfigError, EngineConfig};
pub use engine::{Engine, EngineError, FrameStats};
pub use script::{InputScript, ScriptError, ScriptStep};
