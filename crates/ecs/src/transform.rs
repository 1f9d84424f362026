use std::any::Any;

use glam::{Mat4, Quat, Vec3};
use stereoscape_common::Transform;

use crate::component::{Component, ComponentKind};

/// Resets the owner to unit scale and identity rotation on attachment.
///
/// Update and render hooks are intentionally empty.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TransformComponent;

impl Component for TransformComponent {
    fn kind(&self) -> ComponentKind {
        ComponentKind::Transform
    }

    fn initialize(&mut self, owner: &mut Transform) {
        owner.scale = Vec3::ONE;
        owner.rotation = Quat::IDENTITY;
    }

    fn update(&mut self, _owner: &mut Transform) {}

    fn render_update(&self, _owner: &Transform, _view: &Mat4, _model: &mut Mat4) {}

    fn clone_box(&self) -> Box<dyn Component> {
        Box::new(*self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initialize_resets_scale_and_rotation() {
        let mut owner = Transform {
            position: Vec3::new(1.0, 2.0, 3.0),
            rotation: Quat::from_rotation_y(1.0),
            scale: Vec3::splat(4.0),
        };
        TransformComponent.initialize(&mut owner);
        assert_eq!(owner.scale, Vec3::ONE);
        assert_eq!(owner.rotation, Quat::IDENTITY);
        assert_eq!(owner.position, Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn hooks_leave_state_alone() {
        let mut owner = Transform::at(Vec3::X);
        let mut c = TransformComponent;
        c.update(&mut owner);
        let mut model = Mat4::IDENTITY;
        c.render_update(&owner, &Mat4::IDENTITY, &mut model);
        assert_eq!(owner, Transform::at(Vec3::X));
        assert_eq!(model, Mat4::IDENTITY);
        assert!(c.out(&owner).is_none());
    }
}
