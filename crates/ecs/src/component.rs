//! The attachable component capability.
//!
//! A component never stores a pointer back to its owner. The owning
//! [`GameObject`](crate::GameObject) lends its transform to each call instead,
//! so a component can only run while attached and can never outlive or
//! co-own its owner.

use std::any::Any;
use std::fmt;

use glam::Mat4;
use stereoscape_common::Transform;

/// Discriminates the built-in component variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    Physics,
    Transform,
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Physics => f.write_str("physics"),
            Self::Transform => f.write_str("transform"),
        }
    }
}

/// Behaviour attached to exactly one game object.
pub trait Component: Any + fmt::Debug {
    fn kind(&self) -> ComponentKind;

    /// Called once, right after attachment, to set owner defaults.
    fn initialize(&mut self, _owner: &mut Transform) {}

    /// Called once per logic tick.
    fn update(&mut self, owner: &mut Transform);

    /// Called once per eye per frame; may post-multiply `model`.
    fn render_update(&self, owner: &Transform, view: &Mat4, model: &mut Mat4);

    /// Diagnostic dump. `None` when the component has nothing to report.
    fn out(&self, _owner: &Transform) -> Option<String> {
        None
    }

    fn clone_box(&self) -> Box<dyn Component>;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl Clone for Box<dyn Component> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}
