//! Rendering collaborator
//!
//! The simulation never talks to a graphics API. It describes what should be
//! on screen through the [`Renderer`] trait; the backend owns the window,
//! the font and frame pacing.

pub mod shapes;

pub use shapes::{Color, Shape, TextLabel, colors};

/// Accepts drawable shapes and text for one frame
pub trait Renderer {
    /// Start a new frame
    fn clear(&mut self, color: Color);
    fn draw_shape(&mut self, shape: &Shape);
    fn draw_text(&mut self, label: &TextLabel);
    /// Finish the frame (swap / present / wait for vsync)
    fn present(&mut self);
}

/// Renderer that keeps the draw calls of the last presented frame
///
/// Used by tests and headless runs in place of a window.
#[derive(Debug, Default)]
pub struct FrameRecorder {
    pending_shapes: Vec<Shape>,
    pending_labels: Vec<TextLabel>,
    /// Shapes of the last presented frame, in draw order
    pub shapes: Vec<Shape>,
    /// Labels of the last presented frame, in draw order
    pub labels: Vec<TextLabel>,
    /// Number of frames presented so far
    pub frames: u64,
}

impl FrameRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn circles(&self) -> usize {
        self.shapes
            .iter()
            .filter(|s| matches!(s, Shape::Circle { .. }))
            .count()
    }

    pub fn rects(&self) -> usize {
        self.shapes
            .iter()
            .filter(|s| matches!(s, Shape::Rect { .. }))
            .count()
    }

    /// Texts of the last presented frame
    pub fn texts(&self) -> Vec<&str> {
        self.labels.iter().map(|l| l.text.as_str()).collect()
    }
}

impl Renderer for FrameRecorder {
    fn clear(&mut self, _color: Color) {
        self.pending_shapes.clear();
        self.pending_labels.clear();
    }

    fn draw_shape(&mut self, shape: &Shape) {
        self.pending_shapes.push(shape.clone());
    }

    fn draw_text(&mut self, label: &TextLabel) {
        self.pending_labels.push(label.clone());
    }

    fn present(&mut self) {
        self.shapes = std::mem::take(&mut self.pending_shapes);
        self.labels = std::mem::take(&mut self.pending_labels);
        self.frames += 1;
    }
}
