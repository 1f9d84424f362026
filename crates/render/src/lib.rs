//! Rendering: stereoscopic eye-pass scheduling over a fixed-function backend.
//!
//! # Invariants
//! - Renderers read the scene; they never mutate it.
//! - The left eye is always drawn; the right eye only when the inter-ocular distance is positive.
//! - Both eyes share one view matrix and use mirrored projection offsets.
//! - Every object is submitted with its own model matrix, seeded from identity.

mod backend;
mod recording;
mod renderer;
mod stereo;

pub use backend::{Eye, GraphicsBackend, RenderTarget};
pub use recording::{GfxCall, RecordingBackend};
pub use renderer::{DebugTextRenderer, Renderer};
pub use stereo::{RenderConfig, RenderStats, StereoRenderer, stereo_projection};
