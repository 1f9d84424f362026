use glam::{Mat4, Vec3};
use stereoscape_common::{ObjectId, Transform};

use crate::buffer::{BufferError, Vertex, VertexBuffer};
use crate::component::{Component, ComponentKind};

/// A renderable scene entity: geometry, a transform, and its attached components.
///
/// The object exclusively owns its vertex buffer and its components.
#[derive(Debug)]
pub struct GameObject {
    id: ObjectId,
    pub transform: Transform,
    components: Vec<Box<dyn Component>>,
    buffer: VertexBuffer,
    /// Set while the player holds this object.
    pub is_picked_up: bool,
    /// Debug objects are excluded from proximity picking.
    pub debug_flag: bool,
}

impl GameObject {
    /// Create an object at the origin with a deep copy of `vertices`.
    pub fn new(vertices: &[Vertex]) -> Result<Self, BufferError> {
        Ok(Self::with_buffer(VertexBuffer::from_vertices(vertices)?))
    }

    /// Create an object at the origin that takes ownership of `buffer`.
    pub fn with_buffer(buffer: VertexBuffer) -> Self {
        Self {
            id: ObjectId::new(),
            transform: Transform::default(),
            components: Vec::new(),
            buffer,
            is_picked_up: false,
            debug_flag: false,
        }
    }

    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub fn position(&self) -> Vec3 {
        self.transform.position
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.transform.position = position;
    }

    /// Attach a component and run its `initialize` hook against this object.
    pub fn add_component<C: Component>(&mut self, component: C) -> &mut Self {
        self.components.push(Box::new(component));
        if let Some(attached) = self.components.last_mut() {
            attached.initialize(&mut self.transform);
            tracing::trace!(object = %self.id, kind = %attached.kind(), "component attached");
        }
        self
    }

    /// Attached components in attachment order.
    pub fn components(&self) -> impl Iterator<Item = &dyn Component> {
        self.components.iter().map(|c| c.as_ref())
    }

    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    /// First attached component of concrete type `T`.
    pub fn component<T: Component>(&self) -> Option<&T> {
        self.components
            .iter()
            .find_map(|c| c.as_any().downcast_ref::<T>())
    }

    pub fn component_mut<T: Component>(&mut self) -> Option<&mut T> {
        self.components
            .iter_mut()
            .find_map(|c| c.as_any_mut().downcast_mut::<T>())
    }

    /// Whether any attached component reports `kind`.
    pub fn has(&self, kind: ComponentKind) -> bool {
        self.components.iter().any(|c| c.kind() == kind)
    }

    /// Run every component's logic tick in attachment order.
    pub fn update(&mut self) {
        for component in &mut self.components {
            component.update(&mut self.transform);
        }
    }

    /// Let every component contribute to `model` for one eye pass.
    pub fn render_update(&self, view: &Mat4, model: &mut Mat4) {
        for component in &self.components {
            component.render_update(&self.transform, view, model);
        }
    }

    /// Diagnostic lines from components that have something to report.
    pub fn out(&self) -> Vec<String> {
        self.components
            .iter()
            .filter_map(|c| c.out(&self.transform))
            .collect()
    }

    pub fn buffer(&self) -> &VertexBuffer {
        &self.buffer
    }

    pub fn buffer_mut(&mut self) -> &mut VertexBuffer {
        &mut self.buffer
    }

    /// Tear the object down, returning the number of buffer bytes freed.
    ///
    /// Consumes the object, so nothing can touch it afterwards.
    pub fn release(self) -> usize {
        let bytes = self.buffer.byte_size();
        tracing::debug!(object = %self.id, bytes, "game object released");
        bytes
    }
}

/// Copy-construction: the clone gets a fresh id, a deep-copied buffer and
/// copies of every component. It starts out not held.
impl Clone for GameObject {
    fn clone(&self) -> Self {
        Self {
            id: ObjectId::new(),
            transform: self.transform,
            components: self.components.clone(),
            buffer: self.buffer.clone(),
            is_picked_up: false,
            debug_flag: self.debug_flag,
        }
    }
}
