use glam::Vec3;
use serde::{Deserialize, Serialize};
use stereoscape_common::{DiagnosticSink, ObjectId};
use stereoscape_ecs::{
    BufferError, GameObject, PhysicsComponent, PhysicsConfig, TransformComponent, cube_vertices,
};
use stereoscape_input::FrameInput;

use crate::player::Player;

/// Scene population: how many objects to spawn at load and where.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub object_count: usize,
    /// Object `i` spawns at `(x_spacing * i, y_spacing * (i + 1), 0)`.
    pub x_spacing: f32,
    pub y_spacing: f32,
    /// Index of an object flagged as debug (excluded from picking).
    pub debug_object: Option<usize>,
    pub physics: PhysicsConfig,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            object_count: 3,
            x_spacing: 3.0,
            y_spacing: 5.0,
            debug_object: Some(1),
            physics: PhysicsConfig::default(),
        }
    }
}

/// Errors from scene operations.
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    #[error("failed to create game object: {0}")]
    Buffer(#[from] BufferError),
    #[error("object {0} not found")]
    ObjectNotFound(ObjectId),
}

/// What one logic tick did, for the frame driver and diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TickReport {
    pub tick: u64,
    /// Object picked this tick, if the manipulate input was active and one was in range.
    pub picked: Option<ObjectId>,
    /// Object released this tick because manipulation ended.
    pub released: Option<ObjectId>,
    pub anchor: Option<Vec3>,
}

/// The scene orchestrator: owns every game object and the player.
///
/// Objects keep insertion order; update and render both walk them in that order.
#[derive(Debug, Default)]
pub struct Scene {
    objects: Vec<GameObject>,
    player: Player,
    tick: u64,
}

impl Scene {
    /// Empty scene around `player`.
    pub fn new(player: Player) -> Self {
        Self {
            objects: Vec::new(),
            player,
            tick: 0,
        }
    }

    /// Populate a scene with cubes carrying physics and transform components.
    pub fn load(config: &SceneConfig, player: Player) -> Result<Self, SceneError> {
        let mut scene = Self::new(player);
        let vertices = cube_vertices();
        for i in 0..config.object_count {
            let mut object = GameObject::new(&vertices)?;
            object
                .add_component(PhysicsComponent::new(config.physics))
                .add_component(TransformComponent);
            object.set_position(Vec3::new(
                config.x_spacing * i as f32,
                config.y_spacing * (i + 1) as f32,
                0.0,
            ));
            object.debug_flag = config.debug_object == Some(i);
            scene.spawn(object);
        }
        tracing::info!(objects = scene.object_count(), "scene loaded");
        Ok(scene)
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    pub fn objects(&self) -> &[GameObject] {
        &self.objects
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Append an object. Returns its id.
    pub fn spawn(&mut self, object: GameObject) -> ObjectId {
        let id = object.id();
        tracing::debug!(object = %id, position = ?object.position(), "spawned");
        self.objects.push(object);
        id
    }

    pub fn get(&self, id: ObjectId) -> Option<&GameObject> {
        self.objects.iter().find(|o| o.id() == id)
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut GameObject> {
        self.objects.iter_mut().find(|o| o.id() == id)
    }

    pub fn try_get(&self, id: ObjectId) -> Result<&GameObject, SceneError> {
        self.get(id).ok_or(SceneError::ObjectNotFound(id))
    }

    /// Remove an object, invalidating the player's hold on it.
    pub fn remove(&mut self, id: ObjectId) -> Result<GameObject, SceneError> {
        let index = self
            .objects
            .iter()
            .position(|o| o.id() == id)
            .ok_or(SceneError::ObjectNotFound(id))?;
        if self.player.held() == Some(id) {
            self.player.release_hold();
        }
        let object = self.objects.remove(index);
        tracing::debug!(object = %id, "removed");
        Ok(object)
    }

    /// Nearest non-debug object strictly closer than `max_distance` to `target`.
    ///
    /// Linear scan; on an exact tie the earlier object wins.
    pub fn closest_object_to(&self, target: Vec3, max_distance: f32) -> Option<&GameObject> {
        let mut closest = None;
        let mut best = max_distance;
        for object in &self.objects {
            if object.debug_flag {
                continue;
            }
            let distance = object.transform.distance_to(target);
            if distance <= max_distance && distance < best {
                best = distance;
                closest = Some(object);
            }
        }
        closest
    }

    /// One logic tick: player, picking, then every object's components.
    pub fn update(&mut self, input: &FrameInput, diag: &mut dyn DiagnosticSink) -> TickReport {
        let _span = tracing::info_span!("scene_update", tick = self.tick).entered();
        let mut report = TickReport {
            tick: self.tick,
            ..TickReport::default()
        };

        self.player.update(input, diag);

        if self.player.is_manipulating() {
            let hit = self
                .closest_object_to(self.player.position(), self.player.config().pick_radius)
                .map(GameObject::id);
            if let Some(id) = hit {
                self.pick(id);
                report.picked = Some(id);
                report.anchor = self.player.ahead_anchor();
            }
            tracing::debug!(hit = hit.is_some(), "closest object query");
        }

        let manipulating = self.player.is_manipulating();
        for object in &mut self.objects {
            object.update();
            if !manipulating && object.is_picked_up {
                object.is_picked_up = false;
                report.released = self.player.release_hold().or(Some(object.id()));
                tracing::debug!(object = %object.id(), "released from hands");
            }
        }

        self.tick += 1;
        report
    }

    /// Mark `id` held, releasing any different object already in hands.
    fn pick(&mut self, id: ObjectId) {
        if let Some(previous) = self.player.held().filter(|p| *p != id) {
            if let Some(object) = self.get_mut(previous) {
                object.is_picked_up = false;
            }
        }
        if let Some(object) = self.get_mut(id) {
            object.is_picked_up = true;
        }
        self.player.hold(id);
    }

    /// Release every object in order. Returns the total buffer bytes freed.
    pub fn release(mut self) -> usize {
        self.player.release_hold();
        let count = self.objects.len();
        let bytes: usize = self.objects.drain(..).map(GameObject::release).sum();
        tracing::info!(objects = count, bytes, "scene released");
        bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stereoscape_common::NullSink;
    use stereoscape_input::Buttons;

    fn object_at(position: Vec3) -> GameObject {
        let mut o = GameObject::new(&cube_vertices()).unwrap();
        o.set_position(position);
        o
    }

    fn manipulate() -> FrameInput {
        FrameInput {
            held: Buttons::MANIPULATE,
            ..FrameInput::default()
        }
    }

    #[test]
    fn load_spawns_configured_objects() {
        let scene = Scene::load(&SceneConfig::default(), Player::default()).unwrap();
        assert_eq!(scene.object_count(), 3);
        let positions: Vec<Vec3> = scene.objects().iter().map(GameObject::position).collect();
        assert_eq!(positions[0], Vec3::new(0.0, 5.0, 0.0));
        assert_eq!(positions[2], Vec3::new(6.0, 15.0, 0.0));
        assert!(scene.objects()[1].debug_flag);
        assert!(!scene.objects()[0].debug_flag);
        assert_eq!(scene.objects()[0].component_count(), 2);
    }

    #[test]
    fn closest_picks_nearest_in_range() {
        let mut scene = Scene::default();
        let target = Vec3::ZERO;
        scene.spawn(object_at(Vec3::new(3.9, 0.0, 0.0)));
        let near = scene.spawn(object_at(Vec3::new(0.0, 2.0, 0.0)));
        scene.spawn(object_at(Vec3::new(0.0, 0.0, 5.0)));
        let hit = scene.closest_object_to(target, 4.0).unwrap();
        assert_eq!(hit.id(), near);
    }

    #[test]
    fn closest_none_when_all_out_of_range() {
        let mut scene = Scene::default();
        scene.spawn(object_at(Vec3::new(4.5, 0.0, 0.0)));
        scene.spawn(object_at(Vec3::new(0.0, 0.0, -6.0)));
        assert!(scene.closest_object_to(Vec3::ZERO, 4.0).is_none());
    }

    #[test]
    fn closest_skips_debug_objects() {
        let mut scene = Scene::default();
        let mut debug = object_at(Vec3::new(1.0, 0.0, 0.0));
        debug.debug_flag = true;
        let debug_id = scene.spawn(debug);
        let far = scene.spawn(object_at(Vec3::new(3.0, 0.0, 0.0)));
        let hit = scene.closest_object_to(Vec3::ZERO, 4.0).unwrap();
        assert_ne!(hit.id(), debug_id);
        assert_eq!(hit.id(), far);
    }

    #[test]
    fn closest_tie_goes_to_first() {
        let mut scene = Scene::default();
        let first = scene.spawn(object_at(Vec3::new(2.0, 0.0, 0.0)));
        scene.spawn(object_at(Vec3::new(-2.0, 0.0, 0.0)));
        assert_eq!(scene.closest_object_to(Vec3::ZERO, 4.0).unwrap().id(), first);
    }

    #[test]
    fn manipulate_picks_and_release_clears() {
        let mut scene = Scene::default();
        let id = scene.spawn(object_at(Vec3::new(0.0, 0.0, 8.0)));

        let report = scene.update(&manipulate(), &mut NullSink);
        assert_eq!(report.picked, Some(id));
        assert!(report.anchor.is_some());
        assert!(scene.get(id).unwrap().is_picked_up);
        assert_eq!(scene.player().held(), Some(id));

        let report = scene.update(&FrameInput::default(), &mut NullSink);
        assert_eq!(report.released, Some(id));
        assert!(!scene.get(id).unwrap().is_picked_up);
        assert_eq!(scene.player().held(), None);
    }

    #[test]
    fn anchor_does_not_move_held_object() {
        let mut scene = Scene::default();
        let id = scene.spawn(object_at(Vec3::new(1.0, 0.0, 8.0)));
        scene.update(&manipulate(), &mut NullSink);
        assert_eq!(scene.get(id).unwrap().position(), Vec3::new(1.0, 0.0, 8.0));
    }

    #[test]
    fn at_most_one_object_held() {
        let mut scene = Scene::default();
        let a = scene.spawn(object_at(Vec3::new(0.0, 0.0, 8.0)));
        let b = scene.spawn(object_at(Vec3::new(0.0, 0.0, 11.0)));
        scene.update(&manipulate(), &mut NullSink);
        assert_eq!(scene.player().held(), Some(b));

        scene.get_mut(b).unwrap().set_position(Vec3::new(0.0, 0.0, 13.5));
        scene.update(&manipulate(), &mut NullSink);
        assert_eq!(scene.player().held(), Some(a));
        let held: Vec<_> = scene.objects().iter().filter(|o| o.is_picked_up).collect();
        assert_eq!(held.len(), 1);
    }

    #[test]
    fn removing_held_object_invalidates_reference() {
        let mut scene = Scene::default();
        let id = scene.spawn(object_at(Vec3::new(0.0, 0.0, 9.0)));
        scene.update(&manipulate(), &mut NullSink);
        assert_eq!(scene.player().held(), Some(id));
        scene.remove(id).unwrap();
        assert_eq!(scene.player().held(), None);
        assert!(matches!(scene.remove(id), Err(SceneError::ObjectNotFound(_))));
    }

    #[test]
    fn update_runs_components_and_counts_ticks() {
        let mut scene = Scene::load(&SceneConfig::default(), Player::default()).unwrap();
        let before = scene.objects()[0].position().y;
        for _ in 0..10 {
            scene.update(&FrameInput::default(), &mut NullSink);
        }
        assert_eq!(scene.tick(), 10);
        assert!(scene.objects()[0].position().y < before);
    }

    #[test]
    fn release_frees_every_buffer() {
        let scene = Scene::load(&SceneConfig::default(), Player::default()).unwrap();
        let expected: usize = scene.objects().iter().map(|o| o.buffer().byte_size()).sum();
        assert_eq!(scene.release(), expected);
    }
}
