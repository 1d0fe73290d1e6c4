//! Fixed-step simulation tick
//!
//! One call advances the game by one frame: input decisions first, then
//! (only while in progress) entity updates, collision resolution and the
//! registry refresh.

use super::collision::{resolve_brick_ball, resolve_paddle_ball};
use super::entity::{Ball, Brick, FrameContext, Paddle};
use super::state::{GamePhase, GameState};
use crate::platform::{InputSource, Key};

/// Key state for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub quit: bool,
    /// Pause key held (the toggle fires on the press edge)
    pub pause: bool,
    pub restart: bool,
    pub left: bool,
    pub right: bool,
}

impl TickInput {
    /// Snapshot the keys the game cares about
    pub fn poll<I: InputSource + ?Sized>(source: &I) -> Self {
        Self {
            quit: source.is_key_down(Key::Quit),
            pause: source.is_key_down(Key::Pause),
            restart: source.is_key_down(Key::Restart),
            left: source.is_key_down(Key::Left),
            right: source.is_key_down(Key::Right),
        }
    }
}

/// Whether the loop should keep going
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Continue,
    Quit,
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &TickInput) -> TickOutcome {
    if input.quit {
        log::info!("Quit requested");
        return TickOutcome::Quit;
    }

    // Pause toggles on the press frame only, not while the key is held
    if input.pause {
        if !state.pause_pressed_last_frame {
            match state.phase {
                GamePhase::Paused => state.set_phase(GamePhase::InProgress),
                GamePhase::InProgress => state.set_phase(GamePhase::Paused),
                _ => {}
            }
        }
        state.pause_pressed_last_frame = true;
    } else {
        state.pause_pressed_last_frame = false;
    }

    if input.restart {
        state.restart();
    }

    if !state.is_running() {
        return TickOutcome::Continue;
    }

    if state.manager.is_empty_of::<Brick>() {
        state.set_phase(GamePhase::Victory);
        return TickOutcome::Continue;
    }

    if state.manager.is_empty_of::<Ball>() {
        state.remaining_lives -= 1;
        log::debug!("Ball lost, {} lives left", state.remaining_lives);
        if state.remaining_lives <= 0 {
            state.set_phase(GamePhase::GameOver);
            return TickOutcome::Continue;
        }
        state.spawn_ball();
    }

    state.time_ticks += 1;

    let GameState {
        tuning, manager, ..
    } = state;
    let ctx = FrameContext {
        input,
        tuning: &*tuning,
    };
    manager.update(&ctx);

    manager.for_each_pair::<Ball, Brick, _>(|ball, brick| {
        resolve_brick_ball(brick, ball);
    });
    manager.for_each_pair::<Ball, Paddle, _>(|ball, paddle| {
        resolve_paddle_ball(paddle, ball);
    });

    manager.refresh();

    TickOutcome::Continue
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::ScriptedInput;
    use crate::tuning::Tuning;
    use glam::Vec2;

    fn started() -> GameState {
        let mut state = GameState::new(Tuning::default()).unwrap();
        state.restart();
        state
    }

    fn press(pause: bool) -> TickInput {
        TickInput {
            pause,
            ..Default::default()
        }
    }

    fn ball_pos(state: &GameState) -> Option<Vec2> {
        state.manager.iter::<Ball>().next().map(|b| b.pos())
    }

    /// Drop every ball below the field so the next tick loses it
    fn lose_ball(state: &mut GameState) {
        let height = state.tuning.field_height;
        state.manager.for_each::<Ball, _>(|b| {
            b.shape.pos = Vec2::new(400.0, height - 5.0);
            b.velocity = Vec2::new(0.0, 8.0);
        });
        tick(state, &TickInput::default());
        assert!(state.manager.is_empty_of::<Ball>());
    }

    #[test]
    fn test_quit_stops_loop() {
        let mut state = started();
        let input = TickInput {
            quit: true,
            ..Default::default()
        };
        assert_eq!(tick(&mut state, &input), TickOutcome::Quit);
    }

    #[test]
    fn test_pause_toggles_on_press_edge_only() {
        let mut state = started();
        assert_eq!(state.phase, GamePhase::Paused);

        tick(&mut state, &press(true));
        assert_eq!(state.phase, GamePhase::InProgress);

        // Holding the key does not toggle again
        for _ in 0..5 {
            tick(&mut state, &press(true));
            assert_eq!(state.phase, GamePhase::InProgress);
        }

        tick(&mut state, &press(false));
        tick(&mut state, &press(true));
        assert_eq!(state.phase, GamePhase::Paused);
    }

    #[test]
    fn test_paused_does_not_simulate() {
        let mut state = started();
        let before = ball_pos(&state);
        for _ in 0..10 {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(ball_pos(&state), before);
        assert_eq!(state.time_ticks, 0);
    }

    #[test]
    fn test_first_step_moves_ball() {
        let mut state = started();
        tick(&mut state, &press(true));
        assert_eq!(ball_pos(&state), Some(Vec2::new(392.0, 292.0)));
        let ball = state.manager.iter::<Ball>().next().unwrap();
        assert_eq!(ball.velocity, Vec2::new(-8.0, -8.0));
    }

    #[test]
    fn test_lost_ball_costs_a_life_and_respawns() {
        let mut state = started();
        tick(&mut state, &press(true));
        lose_ball(&mut state);

        tick(&mut state, &TickInput::default());
        assert_eq!(state.remaining_lives, 2);
        assert_eq!(state.manager.count::<Ball>(), 1);
        // Respawned at the center, then stepped once
        assert_eq!(ball_pos(&state), Some(Vec2::new(392.0, 292.0)));
        assert_eq!(state.phase, GamePhase::InProgress);
    }

    #[test]
    fn test_third_loss_is_game_over() {
        let mut state = started();
        tick(&mut state, &press(true));

        for expected_lives in [2, 1] {
            lose_ball(&mut state);
            tick(&mut state, &TickInput::default());
            assert_eq!(state.remaining_lives, expected_lives);
            assert_eq!(state.phase, GamePhase::InProgress);
        }

        lose_ball(&mut state);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.remaining_lives, 0);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(state.manager.is_empty_of::<Ball>());

        // Pause does nothing once the game is over
        tick(&mut state, &press(false));
        tick(&mut state, &press(true));
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_clearing_bricks_is_victory() {
        let mut state = started();
        tick(&mut state, &press(true));
        state.manager.for_each::<Brick, _>(|b| b.destroyed = true);
        // Marked bricks still count until the refresh at the end of this tick
        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::InProgress);
        assert_eq!(state.bricks_left(), 0);

        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::Victory);
        assert_eq!(GamePhase::Victory.status_text(), Some("You won!"));
    }

    #[test]
    fn test_victory_wins_over_last_ball_loss() {
        let mut state = started();
        tick(&mut state, &press(true));
        state.remaining_lives = 1;
        state.manager.for_each::<Brick, _>(|b| b.destroyed = true);
        state.manager.for_each::<Ball, _>(|b| b.destroyed = true);
        state.manager.refresh();

        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::Victory);
        assert_eq!(state.remaining_lives, 1);
    }

    #[test]
    fn test_restart_from_game_over() {
        let mut state = GameState::new(Tuning::default()).unwrap();
        let input = TickInput {
            restart: true,
            ..Default::default()
        };
        tick(&mut state, &input);
        assert_eq!(state.phase, GamePhase::Paused);
        assert_eq!(state.bricks_left(), 44);
        assert_eq!(state.remaining_lives, 3);
    }

    #[test]
    fn test_ball_breaks_brick_it_touches() {
        let mut state = started();
        // Grid cell (0, 3): bottom row, single hit
        let target = state.manager.get_all::<Brick>()[3];
        let brick_pos = state.manager.get::<Brick>(target).unwrap().pos();
        state.manager.for_each::<Ball, _>(|b| {
            // One step below the brick, moving up into it
            b.shape.pos = brick_pos + Vec2::new(0.0, 26.0);
            b.velocity = Vec2::new(0.0, -8.0);
        });

        tick(&mut state, &press(true));
        assert!(state.manager.get::<Brick>(target).is_none());
        assert_eq!(state.bricks_left(), 43);
        let ball = state.manager.iter::<Ball>().next().unwrap();
        assert_eq!(ball.velocity, Vec2::new(0.0, 8.0));
    }

    #[test]
    fn test_paddle_moves_with_input() {
        let mut state = started();
        tick(&mut state, &press(true));
        let input = TickInput {
            left: true,
            ..Default::default()
        };
        tick(&mut state, &input);
        let paddle = state.manager.iter::<Paddle>().next().unwrap();
        assert_eq!(paddle.pos().x, 392.0);
    }

    #[test]
    fn test_poll_reads_input_source() {
        let mut source = ScriptedInput::new().then(&[Key::Left, Key::Pause]);
        source.begin_frame();
        let input = TickInput::poll(&source);
        assert!(input.left && input.pause);
        assert!(!input.right && !input.quit && !input.restart);
    }
}
