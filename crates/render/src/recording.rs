use glam::Mat4;
use stereoscape_ecs::VertexBuffer;

use crate::backend::{Eye, GraphicsBackend, RenderTarget};

/// A call made against a [`RecordingBackend`].
#[derive(Debug, Clone, PartialEq)]
pub enum GfxCall {
    CreateTargets([RenderTarget; 2]),
    FrameBegin,
    DrawOn(Eye),
    Projection(Mat4),
    View(Mat4),
    BindBuffer { vertices: usize, bytes: usize },
    Model(Mat4),
    Draw(usize),
    FrameEnd,
    Shutdown,
}

/// Headless backend that records every call instead of touching a GPU.
///
/// Used by the CLI and by tests to observe eye-pass scheduling and the
/// matrices handed to the shader.
#[derive(Debug, Clone, Default)]
pub struct RecordingBackend {
    slider: f32,
    calls: Vec<GfxCall>,
    frames: u64,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_slider(slider: f32) -> Self {
        Self {
            slider,
            ..Self::default()
        }
    }

    pub fn set_slider(&mut self, slider: f32) {
        self.slider = slider;
    }

    /// Completed frames (matching `frame_end` calls).
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn calls(&self) -> &[GfxCall] {
        &self.calls
    }

    /// Forget recorded calls, keeping the slider and frame count.
    pub fn clear(&mut self) {
        self.calls.clear();
    }

    /// Targets selected, in order.
    pub fn eyes(&self) -> Vec<Eye> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                GfxCall::DrawOn(eye) => Some(*eye),
                _ => None,
            })
            .collect()
    }

    pub fn projections(&self) -> Vec<Mat4> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                GfxCall::Projection(m) => Some(*m),
                _ => None,
            })
            .collect()
    }

    pub fn models(&self) -> Vec<Mat4> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                GfxCall::Model(m) => Some(*m),
                _ => None,
            })
            .collect()
    }

    pub fn draw_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, GfxCall::Draw(_)))
            .count()
    }

    pub fn is_shut_down(&self) -> bool {
        matches!(self.calls.last(), Some(GfxCall::Shutdown))
    }
}

impl GraphicsBackend for RecordingBackend {
    fn create_targets(&mut self, targets: &[RenderTarget; 2]) {
        self.calls.push(GfxCall::CreateTargets(*targets));
    }

    fn slider_level(&self) -> f32 {
        self.slider
    }

    fn frame_begin(&mut self) {
        self.calls.push(GfxCall::FrameBegin);
    }

    fn draw_on(&mut self, eye: Eye) {
        self.calls.push(GfxCall::DrawOn(eye));
    }

    fn set_projection(&mut self, projection: &Mat4) {
        self.calls.push(GfxCall::Projection(*projection));
    }

    fn set_view(&mut self, view: &Mat4) {
        self.calls.push(GfxCall::View(*view));
    }

    fn bind_buffer(&mut self, buffer: &VertexBuffer) {
        self.calls.push(GfxCall::BindBuffer {
            vertices: buffer.len(),
            bytes: buffer.as_bytes().len(),
        });
    }

    fn set_model(&mut self, model: &Mat4) {
        self.calls.push(GfxCall::Model(*model));
    }

    fn draw(&mut self, vertex_count: usize) {
        self.calls.push(GfxCall::Draw(vertex_count));
    }

    fn frame_end(&mut self) {
        self.calls.push(GfxCall::FrameEnd);
        self.frames += 1;
    }

    fn shutdown(&mut self) {
        self.calls.push(GfxCall::Shutdown);
    }
}
