//! Drawable descriptors for 2D primitives

use glam::Vec2;

/// RGBA color, each channel in 0.0..=1.0
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color(pub [f32; 4]);

impl Color {
    /// Build a color from 8-bit channels
    pub const fn rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self([
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
            a as f32 / 255.0,
        ])
    }

    pub fn alpha(&self) -> f32 {
        self.0[3]
    }
}

/// Colors for game elements
pub mod colors {
    use super::Color;

    pub const BACKGROUND: Color = Color::rgba8(0, 0, 0, 255);
    pub const BALL: Color = Color::rgba8(255, 0, 0, 255);
    pub const PADDLE: Color = Color::rgba8(255, 0, 0, 255);
    /// Bricks fade with remaining durability (index = tier - 1)
    pub const BRICK_TIERS: [Color; 3] = [
        Color::rgba8(255, 255, 0, 80),
        Color::rgba8(255, 255, 0, 170),
        Color::rgba8(255, 255, 0, 255),
    ];
    pub const TEXT: Color = Color::rgba8(255, 255, 255, 255);
}

/// A filled shape, positioned by its center
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Rect { center: Vec2, size: Vec2, color: Color },
    Circle { center: Vec2, radius: f32, color: Color },
}

impl Shape {
    pub fn rect(center: Vec2, size: Vec2, color: Color) -> Self {
        Shape::Rect { center, size, color }
    }

    pub fn circle(center: Vec2, radius: f32, color: Color) -> Self {
        Shape::Circle { center, radius, color }
    }

    pub fn center(&self) -> Vec2 {
        match self {
            Shape::Rect { center, .. } | Shape::Circle { center, .. } => *center,
        }
    }

    pub fn color(&self) -> Color {
        match self {
            Shape::Rect { color, .. } | Shape::Circle { color, .. } => *color,
        }
    }
}

/// Character size for the big status banner
pub const STATUS_TEXT_SIZE: u32 = 35;
/// Character size for the lives counter
pub const LIVES_TEXT_SIZE: u32 = 15;

/// A text label anchored at its top-left corner
#[derive(Debug, Clone, PartialEq)]
pub struct TextLabel {
    pub text: String,
    pub position: Vec2,
    pub size: u32,
    pub color: Color,
}

impl TextLabel {
    /// Status banner ("Paused", "Game over!", ...)
    pub fn status(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            position: Vec2::new(10.0, 10.0),
            size: STATUS_TEXT_SIZE,
            color: colors::TEXT,
        }
    }

    /// Remaining lives counter
    pub fn lives(remaining: i32) -> Self {
        Self {
            text: format!("Lives: {remaining}"),
            position: Vec2::new(10.0, 10.0),
            size: LIVES_TEXT_SIZE,
            color: colors::TEXT,
        }
    }
}
