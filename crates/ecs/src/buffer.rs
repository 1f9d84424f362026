use bytemuck::{Pod, Zeroable};

/// One vertex as the vertex shader consumes it: three attribute loaders of
/// 3, 2 and 3 floats.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub texcoord: [f32; 2],
    pub normal: [f32; 3],
}

impl Vertex {
    /// Size of one vertex in bytes.
    pub const STRIDE: usize = std::mem::size_of::<Vertex>();
}

/// Errors from vertex buffer allocation.
#[derive(Debug, thiserror::Error)]
pub enum BufferError {
    #[error("vertex list is empty")]
    Empty,
    #[error("failed to allocate {bytes} bytes for vertex buffer")]
    AllocationFailed { bytes: usize },
}

/// Exclusively owned geometry buffer.
///
/// Cloning performs a deep copy: the clone's vertices can be mutated without
/// affecting the source.
#[derive(Debug, Clone, PartialEq)]
pub struct VertexBuffer {
    vertices: Vec<Vertex>,
}

impl VertexBuffer {
    /// Copy `list` into a freshly allocated buffer.
    pub fn from_vertices(list: &[Vertex]) -> Result<Self, BufferError> {
        if list.is_empty() {
            return Err(BufferError::Empty);
        }
        let mut vertices = Vec::new();
        vertices
            .try_reserve_exact(list.len())
            .map_err(|_| BufferError::AllocationFailed {
                bytes: list.len() * Vertex::STRIDE,
            })?;
        vertices.extend_from_slice(list);
        tracing::trace!(count = list.len(), "vertex buffer allocated");
        Ok(Self { vertices })
    }

    /// Number of vertices (the draw call's element count).
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Total size in bytes.
    pub fn byte_size(&self) -> usize {
        self.vertices.len() * Vertex::STRIDE
    }

    /// Raw bytes, as handed to the graphics collaborator's buffer descriptor.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn vertices_mut(&mut self) -> &mut [Vertex] {
        &mut self.vertices
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> Vec<Vertex> {
        vec![
            Vertex {
                position: [0.0, 0.0, 0.0],
                ..Vertex::default()
            },
            Vertex {
                position: [1.0, 0.0, 0.0],
                ..Vertex::default()
            },
            Vertex {
                position: [0.0, 1.0, 0.0],
                ..Vertex::default()
            },
        ]
    }

    #[test]
    fn stride_matches_attribute_layout() {
        assert_eq!(Vertex::STRIDE, (3 + 2 + 3) * 4);
    }

    #[test]
    fn empty_list_is_rejected() {
        assert!(matches!(
            VertexBuffer::from_vertices(&[]),
            Err(BufferError::Empty)
        ));
    }

    #[test]
    fn sizes_are_reported() {
        let buf = VertexBuffer::from_vertices(&triangle()).unwrap();
        assert_eq!(buf.len(), 3);
        assert_eq!(buf.byte_size(), 3 * Vertex::STRIDE);
        assert_eq!(buf.as_bytes().len(), buf.byte_size());
    }

    #[test]
    fn clone_is_deep() {
        let original = VertexBuffer::from_vertices(&triangle()).unwrap();
        let mut copy = original.clone();
        copy.vertices_mut()[0].position = [9.0, 9.0, 9.0];
        assert_eq!(original.vertices()[0].position, [0.0, 0.0, 0.0]);
        assert_ne!(original, copy);
    }
}
