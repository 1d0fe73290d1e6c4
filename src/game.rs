//! Frame driver
//!
//! Owns the game state together with the two collaborators and runs one
//! frame per call: poll input, tick the simulation, draw.

use crate::platform::InputSource;
use crate::renderer::{Renderer, TextLabel, colors};
use crate::sim::{GameState, TickInput, TickOutcome, tick};
use crate::tuning::{ConfigError, Tuning};

/// A game session wired to a renderer and an input source
pub struct Game<R: Renderer, I: InputSource> {
    state: GameState,
    renderer: R,
    input: I,
    frames: u64,
}

impl<R: Renderer, I: InputSource> Game<R, I> {
    /// Start a fresh (paused) session
    pub fn new(tuning: Tuning, renderer: R, input: I) -> Result<Self, ConfigError> {
        let mut state = GameState::new(tuning)?;
        state.restart();
        Ok(Self {
            state,
            renderer,
            input,
            frames: 0,
        })
    }

    /// Run a single frame
    pub fn frame(&mut self) -> TickOutcome {
        self.input.begin_frame();
        let input = TickInput::poll(&self.input);

        let outcome = tick(&mut self.state, &input);
        if outcome == TickOutcome::Quit {
            return outcome;
        }

        self.render();
        self.frames += 1;
        outcome
    }

    /// Run frames until quit or until `max_frames` have been run
    ///
    /// Returns the number of frames rendered.
    pub fn run(&mut self, max_frames: Option<u64>) -> u64 {
        let start = self.frames;
        loop {
            if max_frames.is_some_and(|max| self.frames - start >= max) {
                log::info!("Frame limit reached");
                break;
            }
            if self.frame() == TickOutcome::Quit {
                break;
            }
        }
        self.frames - start
    }

    fn render(&mut self) {
        self.renderer.clear(colors::BACKGROUND);

        match self.state.phase.status_text() {
            Some(status) => self.renderer.draw_text(&TextLabel::status(status)),
            None => {
                self.state.manager.draw(&mut self.renderer);
                self.renderer.draw_text(&TextLabel::lives(self.state.remaining_lives));
            }
        }

        self.renderer.present();
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn input_mut(&mut self) -> &mut I {
        &mut self.input
    }

    /// Frames rendered since the session was created
    pub fn frames(&self) -> u64 {
        self.frames
    }
}
