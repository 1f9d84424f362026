use stereoscape_common::ObjectId;
use stereoscape_kernel::{Scene, SceneError};

/// Scene inspector for developer tooling.
///
/// Read-only queries against the scene for debugging and development UI.
pub struct SceneInspector;

impl SceneInspector {
    /// Produce a summary of the scene state.
    pub fn summary(scene: &Scene) -> SceneSummary {
        let player = scene.player();
        SceneSummary {
            tick: scene.tick(),
            object_count: scene.object_count(),
            debug_objects: scene.objects().iter().filter(|o| o.debug_flag).count(),
            held: player.held(),
            camera: [player.position().x, player.position().z],
            yaw_degrees: player.yaw().to_degrees(),
            pitch_degrees: player.pitch().to_degrees(),
        }
    }

    /// Details of one object.
    pub fn inspect_object(scene: &Scene, id: ObjectId) -> Result<ObjectInfo, SceneError> {
        let object = scene.try_get(id)?;
        let p = object.transform.position;
        let r = object.transform.rotation;
        let s = object.transform.scale;
        Ok(ObjectInfo {
            id,
            position: [p.x, p.y, p.z],
            rotation: [r.x, r.y, r.z, r.w],
            scale: [s.x, s.y, s.z],
            components: object.components().map(|c| c.kind().to_string()).collect(),
            vertices: object.buffer().len(),
            picked_up: object.is_picked_up,
            debug: object.debug_flag,
        })
    }

    /// List all object ids in scene order.
    pub fn list_objects(scene: &Scene) -> Vec<ObjectId> {
        scene.objects().iter().map(|o| o.id()).collect()
    }

    /// Every component's diagnostic dump, prefixed with its object's id.
    pub fn component_dump(scene: &Scene) -> Vec<String> {
        scene
            .objects()
            .iter()
            .flat_map(|o| o.out().into_iter().map(move |line| format!("[{}] {line}", o.id())))
            .collect()
    }
}

/// Summary of scene state for the inspector.
#[derive(Debug, Clone)]
pub struct SceneSummary {
    pub tick: u64,
    pub object_count: usize,
    pub debug_objects: usize,
    pub held: Option<ObjectId>,
    /// Camera ground-plane position (x, z).
    pub camera: [f32; 2],
    pub yaw_degrees: f32,
    pub pitch_degrees: f32,
}

impl std::fmt::Display for SceneSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Scene: tick={} objects={} debug={} held={} camera=({:.2}, {:.2}) yaw={:.1} pitch={:.1}",
            self.tick,
            self.object_count,
            self.debug_objects,
            self.held.map_or_else(|| "none".to_owned(), |id| id.short()),
            self.camera[0],
            self.camera[1],
            self.yaw_degrees,
            self.pitch_degrees,
        )
    }
}

/// Detailed info about a single object.
#[derive(Debug, Clone)]
pub struct ObjectInfo {
    pub id: ObjectId,
    pub position: [f32; 3],
    pub rotation: [f32; 4],
    pub scale: [f32; 3],
    pub components: Vec<String>,
    pub vertices: usize,
    pub picked_up: bool,
    pub debug: bool,
}

impl std::fmt::Display for ObjectInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Object [{}] pos=({:.2}, {:.2}, {:.2}) scale=({:.2}, {:.2}, {:.2}) components=[{}] vertices={}",
            self.id,
            self.position[0],
            self.position[1],
            self.position[2],
            self.scale[0],
            self.scale[1],
            self.scale[2],
            self.components.join(", "),
            self.vertices,
        )
    }
}
