use std::fmt;
use std::time::Duration;

use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::collision::{self, Collision};
use crate::config::{
    APPLES_PER_BOMB, GridSize, INITIAL_TICK_INTERVAL_MS, MIN_TICK_INTERVAL_MS,
    TICK_INTERVAL_STEP_MS,
};
use crate::entity::{Apple, Bomb};
use crate::input::{Direction, GameInput};
use crate::snake::{Snake, start_position};
use crate::spawn::occupied_cells;

/// Why a session ended.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum DeathCause {
    SelfCollision,
    Bomb,
}

impl DeathCause {
    /// Short tag used in logs.
    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            Self::SelfCollision => "self",
            Self::Bomb => "bomb",
        }
    }
}

impl fmt::Display for DeathCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Current high-level gameplay state.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameStatus {
    Playing,
    GameOver(DeathCause),
}

/// What a single tick did.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum TickOutcome {
    /// The game is over; nothing moved.
    Idle,
    Moved,
    AteApple { bomb_spawned: bool, sped_up: bool },
    GameOver(DeathCause),
}

/// Complete mutable state for one play session.
///
/// The loop controller owns exactly one of these and threads it through
/// every operation.
#[derive(Debug, Clone)]
pub struct GameState {
    pub snake: Snake,
    pub apple: Apple,
    pub bombs: Vec<Bomb>,
    pub score: u32,
    pub apples_eaten: u32,
    pub tick_interval_ms: u64,
    pub tick_count: u64,
    pub status: GameStatus,
    bounds: GridSize,
    rng: StdRng,
}

impl GameState {
    /// Creates a session seeded from OS entropy.
    #[must_use]
    pub fn new(bounds: GridSize) -> Self {
        Self::with_rng(bounds, StdRng::from_entropy())
    }

    /// Creates a deterministic state for tests and reproducible sessions.
    #[must_use]
    pub fn new_with_seed(bounds: GridSize, seed: u64) -> Self {
        Self::with_rng(bounds, StdRng::seed_from_u64(seed))
    }

    fn with_rng(bounds: GridSize, mut rng: StdRng) -> Self {
        let direction = Direction::ALL[rng.gen_range(0..Direction::ALL.len())];
        let snake = Snake::new(start_position(bounds), direction);

        let mut apple = Apple::default();
        apple.randomize_position(&mut rng, bounds, &occupied_cells(snake.segments().copied()));

        info!(
            "new session on {}x{} grid, heading {direction:?}",
            bounds.width, bounds.height
        );

        Self {
            snake,
            apple,
            bombs: Vec::new(),
            score: 0,
            apples_eaten: 0,
            tick_interval_ms: INITIAL_TICK_INTERVAL_MS,
            tick_count: 0,
            status: GameStatus::Playing,
            bounds,
            rng,
        }
    }

    #[must_use]
    pub fn bounds(&self) -> GridSize {
        self.bounds
    }

    /// Frame pacing for the current speed.
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    #[must_use]
    pub fn death_cause(&self) -> Option<DeathCause> {
        match self.status {
            GameStatus::GameOver(cause) => Some(cause),
            GameStatus::Playing => None,
        }
    }

    /// Applies one external input event.
    pub fn apply_input(&mut self, input: GameInput) {
        match input {
            GameInput::Direction(direction) => {
                if self.status == GameStatus::Playing {
                    self.snake.set_direction(direction);
                }
            }
            GameInput::Quit => {}
        }
    }

    /// Advances simulation by one gameplay tick.
    pub fn tick(&mut self) -> TickOutcome {
        if self.status != GameStatus::Playing {
            return TickOutcome::Idle;
        }

        self.tick_count += 1;
        let head = self.snake.next_head(self.bounds);

        match collision::detect(&self.snake, head, &self.bombs, &self.apple) {
            Some(Collision::SelfBite) => self.end(DeathCause::SelfCollision),
            Some(Collision::Bomb) => self.end(DeathCause::Bomb),
            Some(Collision::Apple) => {
                self.snake.advance(self.bounds);
                self.consume_apple()
            }
            None => {
                self.snake.advance(self.bounds);
                TickOutcome::Moved
            }
        }
    }

    /// Starts over: score, speed, snake, bombs and apple.
    pub fn reset(&mut self) {
        self.score = 0;
        self.apples_eaten = 0;
        self.tick_interval_ms = INITIAL_TICK_INTERVAL_MS;
        self.tick_count = 0;
        self.snake.reset(start_position(self.bounds));
        self.bombs.clear();
        self.status = GameStatus::Playing;
        self.place_apple();

        info!("session reset");
    }

    fn end(&mut self, cause: DeathCause) -> TickOutcome {
        self.status = GameStatus::GameOver(cause);
        info!(
            "game over ({cause}) with score {} after {} ticks",
            self.score, self.tick_count
        );
        TickOutcome::GameOver(cause)
    }

    fn consume_apple(&mut self) -> TickOutcome {
        self.score += 1;
        self.apples_eaten += 1;
        self.snake.grow_next();
        self.place_apple();
        debug!("apple eaten, score {}", self.score);

        if self.apples_eaten % APPLES_PER_BOMB != 0 {
            return TickOutcome::AteApple {
                bomb_spawned: false,
                sped_up: false,
            };
        }

        let sped_up = self.speed_up();
        let bomb_spawned = self.spawn_bomb();
        TickOutcome::AteApple {
            bomb_spawned,
            sped_up,
        }
    }

    fn place_apple(&mut self) {
        let occupied = occupied_cells(
            self.snake
                .segments()
                .copied()
                .chain(self.bombs.iter().map(Bomb::position)),
        );

        match self
            .apple
            .randomize_position(&mut self.rng, self.bounds, &occupied)
        {
            Some(cell) => debug_assert!(!self.snake.occupies(cell)),
            None => warn!("no free cell left for the apple"),
        }
    }

    fn speed_up(&mut self) -> bool {
        let next = self
            .tick_interval_ms
            .saturating_sub(TICK_INTERVAL_STEP_MS)
            .max(MIN_TICK_INTERVAL_MS);
        if next == self.tick_interval_ms {
            return false;
        }

        self.tick_interval_ms = next;
        info!("speed up: tick interval now {next}ms");
        true
    }

    fn spawn_bomb(&mut self) -> bool {
        let occupied = occupied_cells(
            self.snake
                .segments()
                .copied()
                .chain(self.apple.position)
                .chain(self.bombs.iter().map(Bomb::position)),
        );

        let Some(bomb) = Bomb::spawn(&mut self.rng, self.bounds, &occupied) else {
            warn!("no free cell left for a bomb");
            return false;
        };

        info!(
            "bomb #{} placed at ({}, {})",
            self.bombs.len() + 1,
            bomb.position().x,
            bomb.position().y
        );
        self.bombs.push(bomb);
        true
    }
}
