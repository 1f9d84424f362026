//! Game-object and component model.
//!
//! A [`GameObject`] owns its geometry and an ordered list of boxed
//! [`Component`]s. Components get the owner's transform lent to them on every
//! call; they hold no pointer back to it.
//!
//! # Invariants
//! - A component runs only while attached (there is no other way to reach its owner).
//! - Components run in attachment order.
//! - Vertex buffers are exclusively owned; cloning an object deep-copies its buffer.

mod buffer;
mod component;
mod mesh;
mod object;
mod physics;
mod transform;

pub use buffer::{BufferError, Vertex, VertexBuffer};
pub use component::{Component, ComponentKind};
pub use mesh::{CUBE_VERTEX_COUNT, cube_vertices};
pub use object::GameObject;
pub use physics::{GRAVITY_Y, PhysicsComponent, PhysicsConfig};
pub use transform::TransformComponent;
