//! Shared value types for the stereoscape engine: object identity, spatial
//! transforms, angle helpers, and the diagnostic output seam.

pub mod angle;
pub mod diag;
mod types;

pub use diag::{DiagnosticSink, NullSink};
pub use types::{ObjectId, Transform};
