//! Data-driven game balance
//!
//! Every size, speed and count the simulation depends on lives here.
//! Tunings load from JSON; missing fields fall back to [`crate::consts`].

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// A value that parses but cannot be played
    #[error("Invalid `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Game tunables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Field ===
    pub field_width: f32,
    pub field_height: f32,

    // === Ball ===
    pub ball_radius: f32,
    /// Per-axis launch speed (pixels per tick)
    pub ball_speed: f32,

    // === Paddle ===
    pub paddle_width: f32,
    pub paddle_height: f32,
    pub paddle_speed: f32,
    /// Distance from the field bottom to the paddle center
    pub paddle_offset_bottom: f32,

    // === Bricks ===
    pub brick_width: f32,
    pub brick_height: f32,
    pub brick_spacing: f32,
    pub brick_offset_x: f32,
    pub brick_columns: u32,
    pub brick_rows: u32,
    pub brick_start_column: u32,
    pub brick_start_row: u32,

    // === Rules ===
    pub starting_lives: i32,
    pub max_hit_tiers: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,

            ball_radius: BALL_RADIUS,
            ball_speed: BALL_SPEED,

            paddle_width: PADDLE_WIDTH,
            paddle_height: PADDLE_HEIGHT,
            paddle_speed: PADDLE_SPEED,
            paddle_offset_bottom: PADDLE_OFFSET_BOTTOM,

            brick_width: BRICK_WIDTH,
            brick_height: BRICK_HEIGHT,
            brick_spacing: BRICK_SPACING,
            brick_offset_x: BRICK_OFFSET_X,
            brick_columns: BRICK_COLUMNS,
            brick_rows: BRICK_ROWS,
            brick_start_column: BRICK_START_COLUMN,
            brick_start_row: BRICK_START_ROW,

            starting_lives: STARTING_LIVES,
            max_hit_tiers: MAX_HIT_TIERS,
        }
    }
}

impl Tuning {
    /// Parse and validate a JSON tuning document
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load and validate a JSON tuning file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check that the tuning describes a playable field
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("field_width", self.field_width),
            ("field_height", self.field_height),
            ("ball_radius", self.ball_radius),
            ("ball_speed", self.ball_speed),
            ("paddle_width", self.paddle_width),
            ("paddle_height", self.paddle_height),
            ("paddle_speed", self.paddle_speed),
            ("brick_width", self.brick_width),
            ("brick_height", self.brick_height),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(invalid(field, format!("must be positive, got {value}")));
            }
        }

        if self.brick_spacing < 0.0 {
            return Err(invalid("brick_spacing", "must not be negative"));
        }
        if self.starting_lives < 1 {
            return Err(invalid("starting_lives", "must be at least 1"));
        }
        if self.max_hit_tiers < 1 {
            return Err(invalid("max_hit_tiers", "must be at least 1"));
        }
        if self.brick_columns == 0 || self.brick_rows == 0 {
            return Err(invalid("brick_columns", "brick grid must not be empty"));
        }
        if self.ball_radius * 2.0 >= self.field_width.min(self.field_height) {
            return Err(invalid("ball_radius", "ball does not fit the field"));
        }
        if self.paddle_width > self.field_width {
            return Err(invalid("paddle_width", "wider than the field"));
        }

        let (right, bottom) = self.brick_grid_extent();
        if right > self.field_width {
            return Err(invalid(
                "brick_columns",
                format!("grid reaches x={right}, field is {} wide", self.field_width),
            ));
        }
        if bottom >= self.paddle_y() - self.paddle_height / 2.0 {
            return Err(invalid(
                "brick_rows",
                format!("grid reaches y={bottom}, overlapping the paddle"),
            ));
        }
        Ok(())
    }

    /// Center of the brick at grid cell (ix, iy)
    pub fn brick_center(&self, ix: u32, iy: u32) -> (f32, f32) {
        let x = (ix + self.brick_start_column) as f32 * (self.brick_width + self.brick_spacing);
        let y = (iy + self.brick_start_row) as f32 * (self.brick_height + self.brick_spacing);
        (self.brick_offset_x + x, y)
    }

    /// Hits needed to destroy the brick at grid cell (ix, iy)
    pub fn brick_required_hits(&self, ix: u32, iy: u32) -> i32 {
        1 + ((ix * iy) % self.max_hit_tiers.max(1)) as i32
    }

    /// Rightmost and bottommost edge of the brick grid
    pub fn brick_grid_extent(&self) -> (f32, f32) {
        let (x, y) = self.brick_center(self.brick_columns - 1, self.brick_rows - 1);
        (x + self.brick_width / 2.0, y + self.brick_height / 2.0)
    }

    /// Vertical position of the paddle center
    pub fn paddle_y(&self) -> f32 {
        self.field_height - self.paddle_offset_bottom
    }

    pub fn field_center(&self) -> (f32, f32) {
        (self.field_width / 2.0, self.field_height / 2.0)
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.into(),
    }
}
