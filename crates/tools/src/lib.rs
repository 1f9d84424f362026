//! Developer tooling: scene inspector and the row-addressed diagnostic console.
//!
//! # Invariants
//! - Tools observe; nothing here feeds back into simulation or rendering.

mod console;
mod inspector;

pub use console::ConsoleLog;
pub use inspector::{ObjectInfo, SceneInspector, SceneSummary};
