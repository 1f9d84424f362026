//! Diagnostic output seam.
//!
//! Diagnostics are purely observational: nothing written here feeds back into
//! simulation or rendering.

/// Row-addressed text output (an on-screen console on hardware, a buffer in tests).
pub trait DiagnosticSink {
    /// Replace the contents of `row` with `text`.
    fn line(&mut self, row: u16, text: &str);

    /// Blank out `row`.
    fn clear_line(&mut self, row: u16) {
        self.line(row, "");
    }
}

/// Discards every write.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn line(&mut self, row: u16, text: &str) {
        tracing::trace!(row, text, "diagnostic line dropped");
    }
}

impl<T: DiagnosticSink + ?Sized> DiagnosticSink for &mut T {
    fn line(&mut self, row: u16, text: &str) {
        (**self).line(row, text);
    }
}
