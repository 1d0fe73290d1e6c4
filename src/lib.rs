//! Brick Breaker - a classic breakout game core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, registry, collisions, game state)
//! - `renderer`: Draw command descriptors and the `Renderer` collaborator
//! - `platform`: Keyboard input abstraction
//! - `tuning`: Data-driven game balance
//! - `game`: Frame driver tying input, simulation and rendering together

pub mod game;
pub mod platform;
pub mod renderer;
pub mod sim;
pub mod tuning;

pub use game::Game;
pub use sim::{GamePhase, GameState, TickInput, TickOutcome};
pub use platform::{InputSource, Key, ScriptedInput};
pub use renderer::{Color, FrameRecorder, Renderer, Shape, TextLabel};
pub use tuning::{ConfigError, Tuning};

/// Game configuration constants (defaults for [`Tuning`])
pub mod consts {
    /// Playfield dimensions
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 10.0;
    /// Per-axis speed (pixels per tick)
    pub const BALL_SPEED: f32 = 8.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 75.0;
    pub const PADDLE_HEIGHT: f32 = 20.0;
    pub const PADDLE_SPEED: f32 = 8.0;
    /// Distance from the field bottom to the paddle center
    pub const PADDLE_OFFSET_BOTTOM: f32 = 50.0;

    /// Brick grid defaults
    pub const BRICK_WIDTH: f32 = 60.0;
    pub const BRICK_HEIGHT: f32 = 20.0;
    pub const BRICK_SPACING: f32 = 3.0;
    pub const BRICK_OFFSET_X: f32 = 22.0;
    pub const BRICK_COLUMNS: u32 = 11;
    pub const BRICK_ROWS: u32 = 4;
    pub const BRICK_START_COLUMN: u32 = 1;
    pub const BRICK_START_ROW: u32 = 2;

    pub const STARTING_LIVES: i32 = 3;
    /// Number of distinct brick durabilities (hits 1..=tiers)
    pub const MAX_HIT_TIERS: u32 = 3;

    /// Horizontal steering gained from paddle velocity on a bounce
    pub const PADDLE_VELOCITY_INFLUENCE: f32 = 0.05;
    /// Y component of the paddle bounce direction (never zero)
    pub const PADDLE_BOUNCE_Y: f32 = -2.0;
}
