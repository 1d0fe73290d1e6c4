//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed step per tick
//! - Stable iteration order (creation order, by entity ID)
//! - No rendering or platform dependencies beyond the collaborator traits

pub mod collision;
pub mod entity;
pub mod manager;
pub mod shape;
pub mod state;
pub mod tick;

pub use collision::{ImpactSide, reflect_velocity, resolve_brick_ball, resolve_paddle_ball};
pub use entity::{Ball, Brick, Entity, EntityKind, FrameContext, Paddle, Variant};
pub use manager::{EntityId, Manager};
pub use shape::{Circle, Edges, Rect, intersects};
pub use state::{GamePhase, GameState};
pub use tick::{TickInput, TickOutcome, tick};
