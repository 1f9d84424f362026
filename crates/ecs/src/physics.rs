use std::any::Any;

use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};
use stereoscape_common::Transform;

use crate::component::{Component, ComponentKind};

/// Default gravity in world units per tick squared. Negative is down.
pub const GRAVITY_Y: f32 = -9.8 / 60.0;

/// Tunables for [`PhysicsComponent`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Target vertical acceleration. Must be negative.
    pub gravity: f32,
    /// Sign-flipping factor applied to vertical motion on a bounce.
    pub bounce_damping: f32,
    /// Multiplicative velocity drag applied after integration.
    pub drag: f32,
    /// Gravity is ramped in at `gravity / gravity_ramp` per tick.
    pub gravity_ramp: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: GRAVITY_Y,
            bounce_damping: 0.8,
            drag: 0.2,
            gravity_ramp: 30.0,
        }
    }
}

/// Ground collision plus ramped gravity.
///
/// The post-integration drag keeps the integrator unconditionally stable.
/// It is not physically accurate and is not meant to be.
#[derive(Debug, Clone, PartialEq)]
pub struct PhysicsComponent {
    pub acceleration: Vec3,
    pub velocity: Vec3,
    config: PhysicsConfig,
}

impl Default for PhysicsComponent {
    fn default() -> Self {
        Self::new(PhysicsConfig::default())
    }
}

impl PhysicsComponent {
    pub fn new(config: PhysicsConfig) -> Self {
        Self {
            acceleration: Vec3::ZERO,
            velocity: Vec3::ZERO,
            config,
        }
    }

    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    /// Bounce below the ground, otherwise ramp gravity in.
    fn resolve_ground(&mut self, owner_y: f32) {
        if owner_y < 0.0 {
            self.acceleration.y *= -self.config.bounce_damping;
            self.velocity.y *= -self.config.bounce_damping;
            if self.acceleration.y.abs() < f32::EPSILON {
                self.acceleration.y = 0.0;
            }
        } else if self.acceleration.y > self.config.gravity {
            self.acceleration.y += self.config.gravity / self.config.gravity_ramp;
        }
    }

    fn integrate(&mut self, owner: &mut Transform) {
        self.velocity += self.acceleration;
        owner.position += self.velocity;
        self.velocity *= self.config.drag;
    }
}

impl Component for PhysicsComponent {
    fn kind(&self) -> ComponentKind {
        ComponentKind::Physics
    }

    fn update(&mut self, owner: &mut Transform) {
        self.resolve_ground(owner.position.y);
        self.integrate(owner);
    }

    fn render_update(&self, owner: &Transform, _view: &Mat4, model: &mut Mat4) {
        *model *= Mat4::from_translation(owner.position);
    }

    fn out(&self, owner: &Transform) -> Option<String> {
        Some(format!(
            "{:.3}    {:.3}     {:.3}",
            self.acceleration.z, self.velocity.z, owner.position.z
        ))
    }

    fn clone_box(&self) -> Box<dyn Component> {
        Box::new(self.clone())
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
    use approx::assert_relative_eq;

    fn high_up() -> Transform {
        Transform::at(Vec3::new(0.0, 1.0e6, 0.0))
    }

    #[test]
    fn gravity_ramps_until_reached() {
        let mut p = PhysicsComponent::default();
        let mut owner = high_up();
        let g = p.config().gravity;
        let mut last = p.acceleration.y.abs();
        for _ in 0..200 {
            p.update(&mut owner);
            let now = p.acceleration.y.abs();
            assert!(now >= last, "downward acceleration shrank: {last} -> {now}");
            last = now;
            if p.acceleration.y <= g {
                break;
            }
        }
        assert!(p.acceleration.y <= g);
    }

    #[test]
    fn gravity_stops_accumulating_once_reached() {
        let mut p = PhysicsComponent::default();
        let mut owner = high_up();
        for _ in 0..100 {
            p.update(&mut owner);
        }
        let settled = p.acceleration.y;
        p.update(&mut owner);
        assert_eq!(p.acceleration.y, settled);
        assert!(settled <= p.config().gravity);
    }

    #[test]
    fn falling_object_moves_down() {
        let mut p = PhysicsComponent::default();
        let mut owner = Transform::at(Vec3::new(0.0, 5.0, 0.0));
        for _ in 0..5 {
            p.update(&mut owner);
        }
        assert!(owner.position.y < 5.0);
    }

    #[test]
    fn bounce_damps_vertical_motion() {
        let mut p = PhysicsComponent::default();
        p.acceleration.y = -0.5;
        p.velocity.y = -0.3;
        p.resolve_ground(-1.0);
        assert_relative_eq!(p.acceleration.y, 0.4, epsilon = 1e-6);
        assert_relative_eq!(p.velocity.y, 0.24, epsilon = 1e-6);
    }

    #[test]
    fn bounce_decays_to_exact_zero() {
        let mut p = PhysicsComponent::default();
        p.acceleration.y = -0.5;
        let mut owner = Transform::at(Vec3::new(0.0, -1.0e6, 0.0));
        let mut previous = p.acceleration.y.abs();
        let mut reached_zero = false;
        for _ in 0..500 {
            p.update(&mut owner);
            let now = p.acceleration.y.abs();
            if now == 0.0 {
                reached_zero = true;
                break;
            }
            assert_relative_eq!(now, previous * 0.8, max_relative = 1e-5);
            previous = now;
        }
        assert!(reached_zero);
        p.update(&mut owner);
        assert_eq!(p.acceleration.y, 0.0);
    }

    #[test]
    fn drag_applies_to_all_axes() {
        let mut p = PhysicsComponent::default();
        p.acceleration = Vec3::new(1.0, 0.0, 1.0);
        let mut owner = high_up();
        let before = owner.position;
        p.update(&mut owner);
        assert_relative_eq!(owner.position.x - before.x, 1.0);
        assert_relative_eq!(p.velocity.x, 0.2, epsilon = 1e-6);
        assert_relative_eq!(p.velocity.z, 0.2, epsilon = 1e-6);
    }

    #[test]
    fn render_update_translates_model() {
        let p = PhysicsComponent::default();
        let owner = Transform::at(Vec3::new(1.0, 2.0, 3.0));
        let mut model = Mat4::IDENTITY;
        p.render_update(&owner, &Mat4::IDENTITY, &mut model);
        assert_eq!(model.w_axis.truncate(), Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn out_reports_depth_motion() {
        let p = PhysicsComponent::default();
        let owner = Transform::at(Vec3::new(0.0, 0.0, 1.5));
        let line = p.out(&owner).unwrap();
        assert!(line.ends_with("1.500"));
    }
}
