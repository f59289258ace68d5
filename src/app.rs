use std::io;
use std::thread;
use std::time::{Duration, Instant};

use log::info;

use crate::config::{GAME_OVER_DELAY_MS, GEOMETRY, GridGeometry};
use crate::game::{GameState, TickOutcome};
use crate::input::{GameInput, InputSource};
use crate::renderer::Screen;
use crate::theme::Theme;

/// How often input is checked while the game-over message is up.
const GAME_OVER_POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Whether the main loop keeps going after a step.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum LoopControl {
    Continue,
    Quit,
}

/// Paces frames to a target interval, like a fixed-rate game clock.
#[derive(Debug, Clone, Copy)]
pub struct FrameClock {
    last_frame: Instant,
}

impl FrameClock {
    #[must_use]
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
        }
    }

    /// Blocks until `interval` has passed since the previous frame.
    pub fn tick(&mut self, interval: Duration) {
        let elapsed = self.last_frame.elapsed();
        if elapsed < interval {
            thread::sleep(interval - elapsed);
        }
        self.last_frame = Instant::now();
    }

    /// Starts timing afresh, e.g. after a pause that should not count.
    pub fn restart(&mut self) {
        self.last_frame = Instant::now();
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

/// Owns the play session and drives input, simulation, rendering and pacing.
pub struct App {
    state: GameState,
    theme: Theme,
    geometry: GridGeometry,
    game_over_delay: Duration,
}

impl App {
    #[must_use]
    pub fn new(state: GameState, theme: Theme) -> Self {
        Self {
            state,
            theme,
            geometry: GEOMETRY,
            game_over_delay: Duration::from_millis(GAME_OVER_DELAY_MS),
        }
    }

    /// Overrides how long the game-over message is held.
    #[must_use]
    pub fn with_game_over_delay(mut self, delay: Duration) -> Self {
        self.game_over_delay = delay;
        self
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Runs until a quit input arrives.
    pub fn run<S, I>(&mut self, screen: &mut S, input: &mut I) -> io::Result<()>
    where
        S: Screen + ?Sized,
        I: InputSource + ?Sized,
    {
        let mut clock = FrameClock::new();

        loop {
            if self.process_input(input)? == LoopControl::Quit {
                break;
            }

            let outcome = self.state.tick();
            screen.present(&self.state, &self.theme, self.geometry)?;

            if let TickOutcome::GameOver(_) = outcome {
                if self.hold_game_over(input)? == LoopControl::Quit {
                    break;
                }
                self.state.reset();
                clock.restart();
                continue;
            }

            clock.tick(self.state.tick_interval());
        }

        info!("quit with score {}", self.state.score);
        Ok(())
    }

    /// Applies every pending input; stops early on quit.
    pub fn process_input<I: InputSource + ?Sized>(
        &mut self,
        input: &mut I,
    ) -> io::Result<LoopControl> {
        while let Some(event) = input.poll_input()? {
            if event == GameInput::Quit {
                return Ok(LoopControl::Quit);
            }
            self.state.apply_input(event);
        }

        Ok(LoopControl::Continue)
    }

    /// Keeps the game-over frame up for the configured delay. Only quit is
    /// honoured meanwhile.
    fn hold_game_over<I: InputSource + ?Sized>(
        &mut self,
        input: &mut I,
    ) -> io::Result<LoopControl> {
        let deadline = Instant::now() + self.game_over_delay;

        loop {
            if self.process_input(input)? == LoopControl::Quit {
                return Ok(LoopControl::Quit);
            }

            let now = Instant::now();
            if now >= deadline {
                return Ok(LoopControl::Continue);
            }
            thread::sleep(GAME_OVER_POLL_INTERVAL.min(deadline - now));
        }
    }
}
