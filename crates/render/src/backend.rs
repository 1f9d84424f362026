use glam::Mat4;
use stereoscape_ecs::VertexBuffer;

/// One of the two stereoscopic viewpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Eye {
    Left,
    Right,
}

impl Eye {
    /// Sign applied to the inter-ocular distance for this eye.
    pub fn sign(self) -> f32 {
        match self {
            Self::Left => -1.0,
            Self::Right => 1.0,
        }
    }
}

impl std::fmt::Display for Eye {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Left => f.write_str("left"),
            Self::Right => f.write_str("right"),
        }
    }
}

/// Description of a per-eye color+depth render target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderTarget {
    pub eye: Eye,
    pub width: u32,
    pub height: u32,
    /// RGBA8 clear color.
    pub clear_color: u32,
}

/// The fixed-function graphics API the engine draws through.
///
/// Implementations bind shaders, attribute layouts and lighting themselves;
/// the engine only hands over matrices, buffers and draw calls.
pub trait GraphicsBackend {
    /// Create the per-eye render targets. Called once at startup.
    fn create_targets(&mut self, targets: &[RenderTarget; 2]);

    /// Current 3D depth slider reading, nominally in `[0, 1]`.
    fn slider_level(&self) -> f32;

    fn frame_begin(&mut self);

    /// Select the render target for the following draws.
    fn draw_on(&mut self, eye: Eye);

    fn set_projection(&mut self, projection: &Mat4);

    fn set_view(&mut self, view: &Mat4);

    /// Point the vertex loader at `buffer`.
    fn bind_buffer(&mut self, buffer: &VertexBuffer);

    fn set_model(&mut self, model: &Mat4);

    /// Draw `vertex_count` vertices from the bound buffer as triangles.
    fn draw(&mut self, vertex_count: usize);

    fn frame_end(&mut self);

    /// Release render targets and any GPU state. Called once, after the scene is released.
    fn shutdown(&mut self) {}
}
