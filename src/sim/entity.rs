//! Game entities
//!
//! The entity set is closed: a ball, a paddle or a brick. [`Entity`] is the
//! tagged union the registry stores, [`EntityKind`] is its explicit tag and
//! [`Variant`] lets generic registry code move between the union and the
//! concrete types.

use glam::Vec2;

use super::shape::{Circle, Edges, Rect};
use super::tick::TickInput;
use crate::renderer::{Renderer, Shape, colors};
use crate::tuning::Tuning;

/// Everything an entity may read while updating
#[derive(Debug, Clone, Copy)]
pub struct FrameContext<'a> {
    pub input: &'a TickInput,
    pub tuning: &'a Tuning,
}

/// Type tag used as the registry grouping key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntityKind {
    Ball,
    Paddle,
    Brick,
}

impl EntityKind {
    pub const COUNT: usize = 3;

    /// Dense index into per-kind tables
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// The ball
#[derive(Debug, Clone)]
pub struct Ball {
    pub shape: Circle,
    pub velocity: Vec2,
    pub destroyed: bool,
}

impl Ball {
    /// New ball at `pos`, heading up and to the left
    pub fn new(pos: Vec2, tuning: &Tuning) -> Self {
        Self {
            shape: Circle::new(pos, tuning.ball_radius),
            velocity: Vec2::new(-tuning.ball_speed, -tuning.ball_speed),
            destroyed: false,
        }
    }

    pub fn pos(&self) -> Vec2 {
        self.shape.pos
    }

    pub fn radius(&self) -> f32 {
        self.shape.radius
    }

    pub fn update(&mut self, ctx: &FrameContext<'_>) {
        self.shape.pos += self.velocity;
        self.solve_bound_collisions(ctx.tuning);
    }

    /// Bounce off the side and top walls; leaving through the bottom kills the ball
    fn solve_bound_collisions(&mut self, tuning: &Tuning) {
        if self.left() < 0.0 {
            self.velocity.x = self.velocity.x.abs();
        } else if self.right() > tuning.field_width {
            self.velocity.x = -self.velocity.x.abs();
        }

        if self.top() < 0.0 {
            self.velocity.y = self.velocity.y.abs();
        } else if self.bottom() > tuning.field_height {
            self.destroyed = true;
        }
    }

    pub fn draw(&self, renderer: &mut dyn Renderer) {
        renderer.draw_shape(&Shape::circle(self.shape.pos, self.shape.radius, colors::BALL));
    }
}

impl Edges for Ball {
    fn left(&self) -> f32 {
        self.shape.left()
    }
    fn right(&self) -> f32 {
        self.shape.right()
    }
    fn top(&self) -> f32 {
        self.shape.top()
    }
    fn bottom(&self) -> f32 {
        self.shape.bottom()
    }
}

/// The player's paddle
#[derive(Debug, Clone)]
pub struct Paddle {
    pub shape: Rect,
    /// Horizontal only; recomputed from input every update
    pub velocity: Vec2,
    pub destroyed: bool,
}

impl Paddle {
    pub fn new(pos: Vec2, tuning: &Tuning) -> Self {
        Self {
            shape: Rect::new(pos, Vec2::new(tuning.paddle_width, tuning.paddle_height)),
            velocity: Vec2::ZERO,
            destroyed: false,
        }
    }

    pub fn pos(&self) -> Vec2 {
        self.shape.pos
    }

    pub fn width(&self) -> f32 {
        self.shape.width()
    }

    pub fn update(&mut self, ctx: &FrameContext<'_>) {
        let tuning = ctx.tuning;
        let intent = if ctx.input.left && self.left() > 0.0 {
            -tuning.paddle_speed
        } else if ctx.input.right && self.right() < tuning.field_width {
            tuning.paddle_speed
        } else {
            0.0
        };

        let half_width = self.shape.width() / 2.0;
        let old_x = self.shape.pos.x;
        // A paddle wider than the field pins to x = half_width
        let new_x = (old_x + intent).min(tuning.field_width - half_width).max(half_width);

        self.shape.pos.x = new_x;
        // Actual displacement, so steering on a bounce matches what the player sees
        self.velocity = Vec2::new(new_x - old_x, 0.0);
    }

    pub fn draw(&self, renderer: &mut dyn Renderer) {
        renderer.draw_shape(&Shape::rect(self.shape.pos, self.shape.size, colors::PADDLE));
    }
}

impl Edges for Paddle {
    fn left(&self) -> f32 {
        self.shape.left()
    }
    fn right(&self) -> f32 {
        self.shape.right()
    }
    fn top(&self) -> f32 {
        self.shape.top()
    }
    fn bottom(&self) -> f32 {
        self.shape.bottom()
    }
}

/// A destructible brick
#[derive(Debug, Clone)]
pub struct Brick {
    pub shape: Rect,
    /// Hits left before the brick breaks
    pub required_hits: i32,
    pub destroyed: bool,
}

impl Brick {
    pub fn new(pos: Vec2, tuning: &Tuning) -> Self {
        Self {
            shape: Rect::new(pos, Vec2::new(tuning.brick_width, tuning.brick_height)),
            required_hits: 1,
            destroyed: false,
        }
    }

    pub fn with_hits(mut self, required_hits: i32) -> Self {
        self.required_hits = required_hits;
        self
    }

    pub fn pos(&self) -> Vec2 {
        self.shape.pos
    }

    /// Take one hit; returns true if this hit broke the brick
    pub fn hit(&mut self) -> bool {
        self.required_hits -= 1;
        if self.required_hits <= 0 && !self.destroyed {
            self.destroyed = true;
            return true;
        }
        false
    }

    /// Visual tier (1-based) from remaining hits, capped to the palette
    pub fn intensity_tier(&self) -> usize {
        (self.required_hits.max(1) as usize).min(colors::BRICK_TIERS.len())
    }

    /// Bricks are static
    pub fn update(&mut self, _ctx: &FrameContext<'_>) {}

    pub fn draw(&self, renderer: &mut dyn Renderer) {
        let color = colors::BRICK_TIERS[self.intensity_tier() - 1];
        renderer.draw_shape(&Shape::rect(self.shape.pos, self.shape.size, color));
    }
}

impl Edges for Brick {
    fn left(&self) -> f32 {
        self.shape.left()
    }
    fn right(&self) -> f32 {
        self.shape.right()
    }
    fn top(&self) -> f32 {
        self.shape.top()
    }
    fn bottom(&self) -> f32 {
        self.shape.bottom()
    }
}

/// Any entity owned by the registry
#[derive(Debug, Clone)]
pub enum Entity {
    Ball(Ball),
    Paddle(Paddle),
    Brick(Brick),
}

impl Entity {
    pub fn kind(&self) -> EntityKind {
        match self {
            Entity::Ball(_) => EntityKind::Ball,
            Entity::Paddle(_) => EntityKind::Paddle,
            Entity::Brick(_) => EntityKind::Brick,
        }
    }

    pub fn destroyed(&self) -> bool {
        match self {
            Entity::Ball(b) => b.destroyed,
            Entity::Paddle(p) => p.destroyed,
            Entity::Brick(b) => b.destroyed,
        }
    }

    /// Mark for removal at the next registry refresh
    pub fn destroy(&mut self) {
        match self {
            Entity::Ball(b) => b.destroyed = true,
            Entity::Paddle(p) => p.destroyed = true,
            Entity::Brick(b) => b.destroyed = true,
        }
    }

    pub fn update(&mut self, ctx: &FrameContext<'_>) {
        match self {
            Entity::Ball(b) => b.update(ctx),
            Entity::Paddle(p) => p.update(ctx),
            Entity::Brick(b) => b.update(ctx),
        }
    }

    pub fn draw(&self, renderer: &mut dyn Renderer) {
        match self {
            Entity::Ball(b) => b.draw(renderer),
            Entity::Paddle(p) => p.draw(renderer),
            Entity::Brick(b) => b.draw(renderer),
        }
    }
}

/// A concrete entity type the registry can store and hand back
///
/// Implemented only by [`Ball`], [`Paddle`] and [`Brick`]; asking the
/// registry for any other type does not compile.
pub trait Variant: Sized + 'static {
    const KIND: EntityKind;

    fn into_entity(self) -> Entity;
    fn downcast_ref(entity: &Entity) -> Option<&Self>;
    fn downcast_mut(entity: &mut Entity) -> Option<&mut Self>;
}

impl Variant for Ball {
    const KIND: EntityKind = EntityKind::Ball;

    fn into_entity(self) -> Entity {
        Entity::Ball(self)
    }

    fn downcast_ref(entity: &Entity) -> Option<&Self> {
        match entity {
            Entity::Ball(b) => Some(b),
            _ => None,
        }
    }

    fn downcast_mut(entity: &mut Entity) -> Option<&mut Self> {
        match entity {
            Entity::Ball(b) => Some(b),
            _ => None,
        }
    }
}

impl Variant for Paddle {
    const KIND: EntityKind = EntityKind::Paddle;

    fn into_entity(self) -> Entity {
        Entity::Paddle(self)
    }

    fn downcast_ref(entity: &Entity) -> Option<&Self> {
        match entity {
            Entity::Paddle(p) => Some(p),
            _ => None,
        }
    }

    fn downcast_mut(entity: &mut Entity) -> Option<&mut Self> {
        match entity {
            Entity::Paddle(p) => Some(p),
            _ => None,
        }
    }
}

impl Variant for Brick {
    const KIND: EntityKind = EntityKind::Brick;

    fn into_entity(self) -> Entity {
        Entity::Brick(self)
    }

    fn downcast_ref(entity: &Entity) -> Option<&Self> {
        match entity {
            Entity::Brick(b) => Some(b),
            _ => None,
        }
    }

    fn downcast_mut(entity: &mut Entity) -> Option<&mut Self> {
        match entity {
            Entity::Brick(b) => Some(b),
            _ => None,
        }
    }
}
