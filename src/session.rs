//! One play-through: owns the snake, the food and the RNG, and advances them
//! one tick at a time.

use log::{debug, info, trace};
use rand::{rngs::StdRng, SeedableRng};

use crate::{
    config::GameConfig,
    error::SnakeError,
    food::Food,
    grid::Grid,
    snake::{Direction, Snake},
    Coords,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Running,
    Over,
}

/// What the presentation layer should do after a tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    /// Keep going at `rate` ticks per second.
    Running { rate: f64 },
    /// The snake bit itself or filled the whole grid.
    Over { score: u32 },
}

pub struct GameSession {
    config: GameConfig,
    grid: Grid,
    snake: Snake,
    food: Food,
    rng: StdRng,
    velocity: Coords,
    pending: Option<Coords>,
    state: SessionState,
}

impl GameSession {
    pub fn new(config: GameConfig) -> Result<Self, SnakeError> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    pub fn with_seed(config: GameConfig, seed: u64) -> Result<Self, SnakeError> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: GameConfig, mut rng: StdRng) -> Result<Self, SnakeError> {
        config.validate()?;

        let grid = Grid::from_config(&config);
        let snake = Snake::new(grid, (0, 0));
        let food = Food::spawn(&grid, &mut rng);

        let mut session = GameSession {
            config,
            grid,
            snake,
            food,
            rng,
            velocity: (0, 0),
            pending: None,
            state: SessionState::Running,
        };
        session.respawn_food_off_snake();

        info!(
            "New session on a {}x{} grid, food at {:?}",
            grid.columns(),
            grid.rows(),
            session.food.position()
        );
        Ok(session)
    }

    /// Queues a direction change for the next tick.
    ///
    /// A change that would reverse the direction of the last tick is dropped.
    /// Among accepted changes the latest one wins.
    pub fn steer(&mut self, direction: Direction) {
        let proposed = direction.delta(self.grid.block_size());

        if is_reversal(self.velocity, proposed) {
            trace!("Ignoring reversal {:?} -> {:?}", self.velocity, proposed);
            return;
        }

        self.pending = Some(proposed);
    }

    pub fn tick(&mut self) -> TickOutcome {
        if self.state == SessionState::Over {
            return TickOutcome::Over { score: self.score() };
        }

        if let Some(velocity) = self.pending.take() {
            self.velocity = velocity;
        }

        let (dx, dy) = self.velocity;
        let length_before = self.snake.length();
        self.snake.advance(&self.food, dx, dy);

        if self.snake.length() > length_before {
            debug!(
                "Ate food at {:?}, length {}, rate {:.3}/s",
                self.food.position(),
                self.snake.length(),
                self.tick_rate()
            );
        }

        let has_room = self.respawn_food_off_snake();

        if self.snake.is_dead() {
            self.state = SessionState::Over;
            info!("Snake bit itself at {:?}, score {}", self.snake.position(), self.score());
            return TickOutcome::Over { score: self.score() };
        }

        if !has_room {
            self.state = SessionState::Over;
            info!("Snake fills the whole grid, score {}", self.score());
            return TickOutcome::Over { score: self.score() };
        }

        TickOutcome::Running { rate: self.tick_rate() }
    }

    /// Resamples the food until it lands off the snake. Returns false when
    /// the snake covers every cell and there is nowhere left to put it.
    fn respawn_food_off_snake(&mut self) -> bool {
        if !self.snake.occupies(self.food.position()) {
            return true;
        }

        let grid = self.grid;
        if grid.cells().all(|cell| self.snake.occupies(cell)) {
            return false;
        }

        while self.snake.occupies(self.food.position()) {
            self.food = Food::spawn(&self.grid, &mut self.rng);
        }
        true
    }

    pub fn tick_rate(&self) -> f64 {
        self.config.tick_rate(self.snake.length())
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> &Food {
        &self.food
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn velocity(&self) -> Coords {
        self.velocity
    }

    /// The committed direction, `None` while the snake hasn't started moving.
    pub fn heading(&self) -> Option<Direction> {
        let step = self.grid.block_size();
        [Direction::Up, Direction::Down, Direction::Left, Direction::Right]
            .iter()
            .copied()
            .find(|d| d.delta(step) == self.velocity)
    }

    pub fn score(&self) -> u32 {
        self.snake.length()
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_over(&self) -> bool {
        self.state == SessionState::Over
    }

    /// Replaces the food, for scripted games. Food placed on the snake is
    /// moved off it again.
    pub fn place_food(&mut self, food: Food) {
        self.food = food;
        self.respawn_food_off_snake();
    }
}

/// True when `proposed` points straight back along `current`.
pub fn is_reversal(current: Coords, proposed: Coords) -> bool {
    // Widened so a block size past sqrt(i32::MAX) can't overflow the product
    let dot = i64::from(current.0) * i64::from(proposed.0)
        + i64::from(current.1) * i64::from(proposed.1);
    dot < 0
}
