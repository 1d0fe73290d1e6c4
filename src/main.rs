//! Brick Breaker entry point
//!
//! Runs a headless session: an autopilot plays the game and a logging
//! renderer stands in for the window.
//!
//! Usage: `brick-breaker [tuning.json] [max_frames]`

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::collections::HashSet;

    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg32;

    use brick_breaker::renderer::{Color, Renderer, Shape, TextLabel};
    use brick_breaker::sim::{Ball, GamePhase, GameState, Paddle};
    use brick_breaker::{ConfigError, Game, InputSource, Key, TickOutcome, Tuning};

    /// Default frame cap (10 minutes at 60 fps)
    const DEFAULT_MAX_FRAMES: u64 = 36_000;
    /// Fixed seed so headless runs are reproducible
    const AUTOPILOT_SEED: u64 = 0x00B2_EA40;
    /// Frames between aim re-rolls
    const AIM_INTERVAL: u64 = 30;
    /// Dead zone around the aim point (pixels)
    const AIM_TOLERANCE: f32 = 4.0;

    /// What the autopilot sees of the game each frame
    #[derive(Debug, Clone, Copy)]
    struct View {
        phase: GamePhase,
        ball_x: Option<f32>,
        paddle_x: Option<f32>,
    }

    impl View {
        fn of(state: &GameState) -> Self {
            Self {
                phase: state.phase,
                ball_x: state.manager.iter::<Ball>().next().map(|b| b.pos().x),
                paddle_x: state.manager.iter::<Paddle>().next().map(|p| p.pos().x),
            }
        }
    }

    /// Input source that keeps the paddle under the ball
    ///
    /// Aims at a jittered point around the ball so bounces vary.
    struct Autopilot {
        rng: Pcg32,
        view: Option<View>,
        aim_offset: f32,
        frame: u64,
        keys: HashSet<Key>,
    }

    impl Autopilot {
        fn new(seed: u64) -> Self {
            Self {
                rng: Pcg32::seed_from_u64(seed),
                view: None,
                aim_offset: 0.0,
                frame: 0,
                keys: HashSet::new(),
            }
        }

        fn observe(&mut self, view: View) {
            self.view = Some(view);
        }

        fn set(&mut self, key: Key, down: bool) {
            if down {
                self.keys.insert(key);
            } else {
                self.keys.remove(&key);
            }
        }
    }

    impl InputSource for Autopilot {
        fn begin_frame(&mut self) {
            self.keys.clear();
            self.frame += 1;
            if self.frame % AIM_INTERVAL == 0 {
                self.aim_offset = self.rng.random_range(-25.0..25.0);
            }

            let Some(view) = self.view else {
                return;
            };
            match view.phase {
                // Alternate press/release so the toggle sees an edge
                GamePhase::Paused => self.set(Key::Pause, self.frame % 2 == 1),
                GamePhase::GameOver | GamePhase::Victory => self.set(Key::Quit, true),
                GamePhase::InProgress => {
                    if let (Some(ball_x), Some(paddle_x)) = (view.ball_x, view.paddle_x) {
                        let target = ball_x + self.aim_offset;
                        self.set(Key::Left, paddle_x > target + AIM_TOLERANCE);
                        self.set(Key::Right, paddle_x < target - AIM_TOLERANCE);
                    }
                }
            }
        }

        fn is_key_down(&self, key: Key) -> bool {
            self.keys.contains(&key)
        }
    }

    /// Renderer that logs instead of drawing
    #[derive(Default)]
    struct LogRenderer {
        shapes: usize,
        last_status: Option<String>,
    }

    impl Renderer for LogRenderer {
        fn clear(&mut self, _color: Color) {
            self.shapes = 0;
        }

        fn draw_shape(&mut self, shape: &Shape) {
            self.shapes += 1;
            log::trace!("shape at {} (alpha {:.2})", shape.center(), shape.color().alpha());
        }

        fn draw_text(&mut self, label: &TextLabel) {
            if label.text.starts_with("Lives") {
                return;
            }
            if self.last_status.as_deref() != Some(label.text.as_str()) {
                log::info!("[screen] {}", label.text);
                self.last_status = Some(label.text.clone());
            }
        }

        fn present(&mut self) {
            log::trace!("frame presented with {} shapes", self.shapes);
        }
    }

    pub fn run() -> Result<(), ConfigError> {
        let mut args = std::env::args().skip(1);

        let tuning = match args.next() {
            Some(path) => Tuning::load(path)?,
            None => Tuning::default(),
        };
        let max_frames = match args.next() {
            Some(arg) => arg.parse().unwrap_or_else(|_| {
                log::warn!("Invalid frame cap {:?}, using {}", arg, DEFAULT_MAX_FRAMES);
                DEFAULT_MAX_FRAMES
            }),
            None => DEFAULT_MAX_FRAMES,
        };

        let mut game = Game::new(tuning, LogRenderer::default(), Autopilot::new(AUTOPILOT_SEED))?;
        let mut frames = 0;
        while frames < max_frames {
            let view = View::of(game.state());
            game.input_mut().observe(view);
            if game.frame() == TickOutcome::Quit {
                break;
            }
            frames += 1;
        }

        let state = game.state();
        log::info!(
            "Session over after {} frames: {:?}, {} lives, {} bricks left",
            frames,
            state.phase,
            state.remaining_lives,
            state.bricks_left()
        );
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Brick Breaker (headless) starting...");

    if let Err(e) = headless::run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No headless runner on the web; embed the library instead
}
