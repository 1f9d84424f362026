//! Scene kernel: the player camera and the orchestrator that owns every game object.
//!
//! # Invariants
//! - One logic tick runs the player first, then picking, then each object in order.
//! - At most one object is held, and the player's reference to it is non-owning.
//! - Removing an object invalidates any hold on it.

mod player;
mod scene;

pub use player::{Player, PlayerConfig};
pub use scene::{Scene, SceneConfig, SceneError, TickReport};
