//! Axis-aligned shape geometry
//!
//! Both shapes are positioned by their center. Edges are derived on every
//! call, so they always follow the current position.

use glam::Vec2;

/// Anything with axis-aligned left/right/top/bottom edges
///
/// Screen coordinates: y grows downward, so `top < bottom`.
pub trait Edges {
    fn left(&self) -> f32;
    fn right(&self) -> f32;
    fn top(&self) -> f32;
    fn bottom(&self) -> f32;
}

/// Axis-aligned bounding box overlap test
///
/// Touching edges count as intersecting. A circle is tested as its bounding
/// square; this approximation is part of the game feel and is kept on purpose.
#[inline]
pub fn intersects(a: &impl Edges, b: &impl Edges) -> bool {
    a.right() >= b.left() && a.left() <= b.right() && a.bottom() >= b.top() && a.top() <= b.bottom()
}

/// Rectangle centered on `pos`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.size.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.size.y
    }
}

impl Edges for Rect {
    #[inline]
    fn left(&self) -> f32 {
        self.pos.x - self.size.x / 2.0
    }

    #[inline]
    fn right(&self) -> f32 {
        self.pos.x + self.size.x / 2.0
    }

    #[inline]
    fn top(&self) -> f32 {
        self.pos.y - self.size.y / 2.0
    }

    #[inline]
    fn bottom(&self) -> f32 {
        self.pos.y + self.size.y / 2.0
    }
}

/// Circle centered on `pos`; its edges are those of the bounding square
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub pos: Vec2,
    pub radius: f32,
}

impl Circle {
    pub fn new(pos: Vec2, radius: f32) -> Self {
        Self { pos, radius }
    }
}

impl Edges for Circle {
    #[inline]
    fn left(&self) -> f32 {
        self.pos.x - self.radius
    }

    #[inline]
    fn right(&self) -> f32 {
        self.pos.x + self.radius
    }

    #[inline]
    fn top(&self) -> f32 {
        self.pos.y - self.radius
    }

    #[inline]
    fn bottom(&self) -> f32 {
        self.pos.y + self.radius
    }
}
