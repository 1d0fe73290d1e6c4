//! Game state and session setup
//!
//! The entity registry, the lives counter and the phase machine all live on
//! [`GameState`]; [`super::tick`] advances it one frame at a time.

use glam::Vec2;

use super::entity::{Ball, Brick, Paddle};
use super::manager::{EntityId, Manager};
use crate::tuning::{ConfigError, Tuning};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Waiting for the pause key; nothing moves
    Paused,
    /// Active gameplay
    InProgress,
    /// Out of lives
    GameOver,
    /// Every brick is gone
    Victory,
}

impl GamePhase {
    /// Banner shown while the simulation is not running
    pub fn status_text(&self) -> Option<&'static str> {
        match self {
            GamePhase::Paused => Some("Paused"),
            GamePhase::GameOver => Some("Game over!"),
            GamePhase::Victory => Some("You won!"),
            GamePhase::InProgress => None,
        }
    }
}

/// Complete game state
#[derive(Debug)]
pub struct GameState {
    pub tuning: Tuning,
    /// Owns every ball, paddle and brick
    pub manager: Manager,
    /// Current phase
    pub phase: GamePhase,
    /// Player lives
    pub remaining_lives: i32,
    /// Pause key state on the previous tick (edge detection)
    pub pause_pressed_last_frame: bool,
    /// Ticks simulated while in progress
    pub time_ticks: u64,
}

impl GameState {
    /// Empty session in `GameOver`; call [`GameState::restart`] to play
    ///
    /// Fails if `tuning` does not describe a playable field.
    pub fn new(tuning: Tuning) -> Result<Self, ConfigError> {
        tuning.validate()?;
        Ok(Self {
            tuning,
            manager: Manager::new(),
            phase: GamePhase::GameOver,
            remaining_lives: 0,
            pause_pressed_last_frame: false,
            time_ticks: 0,
        })
    }

    /// Reset lives, rebuild the brick grid and respawn ball and paddle
    ///
    /// The session restarts paused.
    pub fn restart(&mut self) {
        self.remaining_lives = self.tuning.starting_lives;
        self.phase = GamePhase::Paused;
        self.time_ticks = 0;
        self.manager.clear();

        let tuning = &self.tuning;
        for ix in 0..tuning.brick_columns {
            for iy in 0..tuning.brick_rows {
                let (x, y) = tuning.brick_center(ix, iy);
                let brick = Brick::new(Vec2::new(x, y), tuning)
                    .with_hits(tuning.brick_required_hits(ix, iy));
                self.manager.create(brick);
            }
        }

        self.spawn_ball();
        let paddle = Paddle::new(
            Vec2::new(self.tuning.field_width / 2.0, self.tuning.paddle_y()),
            &self.tuning,
        );
        self.manager.create(paddle);

        log::info!(
            "Restarted: {} bricks, {} lives",
            self.manager.count::<Brick>(),
            self.remaining_lives
        );
    }

    /// Spawn a fresh ball at the field center
    pub fn spawn_ball(&mut self) -> EntityId {
        let (x, y) = self.tuning.field_center();
        self.manager.create(Ball::new(Vec2::new(x, y), &self.tuning))
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::InProgress
    }

    pub fn bricks_left(&self) -> usize {
        self.manager.count::<Brick>()
    }

    /// Move to `phase`, logging the transition
    pub fn set_phase(&mut self, phase: GamePhase) {
        if self.phase != phase {
            log::info!("Phase {:?} -> {:?}", self.phase, phase);
            self.phase = phase;
        }
    }
}
