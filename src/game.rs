use crate::{Coords, TermCoords, TermInt};
use crate::config::GameConfig;
use crate::error::SnakeError;
use crate::grid::Grid;
use crate::input::{map_end_screen_key, map_play_key, EndChoice, KeyAction};
use crate::pacer::FramePacer;
use crate::session::{GameSession, TickOutcome};
use crate::term::TermManager;

use std::time::Duration;

use anyhow::Result;
use log::{debug, error, info};

/// Terminal columns per grid cell, so cells come out roughly square.
const CELL_WIDTH: TermInt = 2;
const PAUSED_POLL: Duration = Duration::from_millis(50);

const SNAKE_BODY_CELL: [char; 2] = ['█', '█'];
const FOOD_CELL: [char; 2] = ['(', ')'];
const DEAD_SNAKE_CELL: [char; 2] = ['X', 'X'];
const STILL_HEAD_CHAR: char = 'o';

/// Where the playfield sits on the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    /// Top left corner of the border
    origin: TermCoords,
    /// Playfield size inside the border, in terminal columns and rows
    inner: TermCoords,
}

impl Layout {
    /// Centres the grid on a `terminal` sized screen, failing if it doesn't fit.
    pub fn fit(grid: &Grid, terminal: TermCoords) -> Result<Self, SnakeError> {
        let inner_w = grid.columns().max(0) as u64 * CELL_WIDTH as u64;
        let inner_h = grid.rows().max(0) as u64;
        let (needed_w, needed_h) = (inner_w + 2, inner_h + 2);

        if needed_w > terminal.0 as u64 || needed_h > terminal.1 as u64 {
            return Err(SnakeError::TerminalTooSmall {
                width: terminal.0,
                height: terminal.1,
                needed_width: needed_w.min(TermInt::MAX as u64) as TermInt,
                needed_height: needed_h.min(TermInt::MAX as u64) as TermInt,
            });
        }

        let origin = (
            (terminal.0 - needed_w as TermInt) / 2,
            (terminal.1 - needed_h as TermInt) / 2,
        );
        Ok(Layout { origin, inner: (inner_w as TermInt, inner_h as TermInt) })
    }

    /// Screen position of the left half of the cell holding `pos`.
    pub fn to_screen(&self, grid: &Grid, pos: Coords) -> TermCoords {
        let (col, row) = grid.cell_of(pos);
        (self.origin.0 + 1 + col * CELL_WIDTH, self.origin.1 + 1 + row)
    }
}

pub struct SnakeGame {
    config: GameConfig,
    seed: Option<u64>,
    sessions_started: u64,
    paused: bool,
    term: TermManager,
    layout: Option<Layout>,
    drawn: Vec<TermCoords>,
}

impl SnakeGame {
    pub fn new(config: GameConfig, seed: Option<u64>) -> Result<Self> {
        config.validate()?;
        let term = TermManager::new()?;

        Ok(SnakeGame {
            config,
            seed,
            sessions_started: 0,
            paused: false,
            term,
            layout: None,
            drawn: vec![],
        })
    }

    pub fn initialize(&mut self) -> Result<()> {
        let grid = Grid::from_config(&self.config);
        let layout = Layout::fit(&grid, self.term.get_terminal_size())?;
        debug!("Playfield layout {:?}", layout);

        self.layout = Some(layout);
        self.term.setup()
    }

    pub fn restore(&mut self) -> Result<()> {
        self.term.restore()
    }

    /// Returns false if the player quit from the intro screen.
    pub fn show_intro(&mut self) -> Result<bool> {
        let lines = &[
            "Arrow keys or WASD to move",
            "The edges wrap around",
            "Esc to pause",
            "Q or CTRL+C to quit",
            "",
            "Press any key to begin"
        ];

        self.term.show_message(lines)?;
        let key = self.term.read_key_blocking()?;
        self.term.hide_message()?;

        Ok(map_end_screen_key(&key) == EndChoice::Restart)
    }

    /// Plays sessions back to back until the player quits.
    pub fn run(&mut self) -> Result<()> {
        if !self.show_intro()? {
            return Ok(());
        }

        while let Some(score) = self.play()? {
            if self.end_screen(score)? == EndChoice::Quit {
                break;
            }
        }

        info!("Player quit after {} session(s)", self.sessions_started);
        Ok(())
    }

    /// Runs one session. `None` means the player quit mid-game.
    pub fn play(&mut self) -> Result<Option<u32>> {
        let mut session = self.new_session()?;
        let mut pacer = FramePacer::new();
        let mut rate = session.tick_rate();

        self.paused = false;
        self.term.clear()?;
        self.drawn.clear();
        let layout = self.layout()?;
        self.term.draw_borders(layout.origin, layout.inner)?;
        self.render(&session)?;

        loop {
            let timeout = if self.paused { PAUSED_POLL } else { pacer.remaining(rate) };

            for key_ev in self.term.read_key_events_queue(timeout)? {
                match map_play_key(&key_ev) {
                    KeyAction::Steer(dir) if !self.paused => session.steer(dir),
                    KeyAction::TogglePause => self.toggle_pause()?,
                    KeyAction::Quit => return Ok(None),
                    _ => {}
                }
            }

            if self.paused || !pacer.is_due(rate) { continue; }
            pacer.mark_tick();

            match session.tick() {
                TickOutcome::Running { rate: next_rate } => {
                    if (next_rate - rate).abs() > f64::EPSILON {
                        debug!("Tick rate now {:.4}/s", next_rate);
                    }
                    rate = next_rate;
                    self.render(&session)?;
                }
                TickOutcome::Over { score } => {
                    self.render_dead(&session)?;
                    return Ok(Some(score));
                }
            }
        }
    }

    pub fn end_screen(&mut self, score: u32) -> Result<EndChoice> {
        self.term.show_message(&[
            "Game Over.",
            &*format!("Your Score: {}", score),
            "",
            "Press Q to quit",
            "Any other key to restart"
        ])?;

        let key = self.term.read_key_blocking()?;
        Ok(map_end_screen_key(&key))
    }

    ///////////////////////////////////////////////////////////////////////////

    fn new_session(&mut self) -> Result<GameSession> {
        let session = match self.seed {
            Some(seed) => GameSession::with_seed(self.config.clone(), seed.wrapping_add(self.sessions_started))?,
            None => GameSession::new(self.config.clone())?,
        };
        self.sessions_started += 1;
        Ok(session)
    }

    fn layout(&self) -> Result<Layout> {
        self.layout.ok_or_else(|| anyhow::anyhow!("Game was not initialized"))
    }

    fn render(&mut self, session: &GameSession) -> Result<()> {
        let layout = self.layout()?;
        let grid = *session.grid();

        for pos in std::mem::take(&mut self.drawn) {
            self.print_cell(pos, [' ', ' '])?;
        }

        let food = layout.to_screen(&grid, session.food().position());
        self.paint(food, FOOD_CELL)?;

        for pos in session.snake().trail() {
            self.paint(layout.to_screen(&grid, *pos), SNAKE_BODY_CELL)?;
        }

        let head_char = session.heading().map_or(STILL_HEAD_CHAR, |dir| dir.head_char());
        let head = layout.to_screen(&grid, session.snake().position());
        self.paint(head, [head_char, head_char])?;

        self.term.flush()
    }

    fn render_dead(&mut self, session: &GameSession) -> Result<()> {
        let layout = self.layout()?;
        let grid = *session.grid();

        for pos in session.snake().trail() {
            self.paint(layout.to_screen(&grid, *pos), DEAD_SNAKE_CELL)?;
        }
        self.paint(layout.to_screen(&grid, session.snake().position()), DEAD_SNAKE_CELL)?;

        self.term.flush()
    }

    fn paint(&mut self, pos: TermCoords, cell: [char; 2]) -> Result<()> {
        self.print_cell(pos, cell)?;
        self.drawn.push(pos);
        Ok(())
    }

    fn print_cell(&mut self, pos: TermCoords, cell: [char; 2]) -> Result<()> {
        self.term.print_at(pos, cell[0])?;
        self.term.print_at((pos.0 + 1, pos.1), cell[1])
    }

    fn toggle_pause(&mut self) -> Result<()> {
        if !self.paused {
            self.term.show_message(&["Paused", "Press Esc to resume", "or Q to quit"])?;
        } else {
            self.term.hide_message()?;
        }

        self.paused = !self.paused;
        debug!("Paused: {}", self.paused);
        Ok(())
    }
}

/// Combines the outcome of the game with the outcome of restoring the
/// terminal. Both failures are logged; the game's error takes precedence.
pub fn settle(run: Result<()>, restore: Result<()>) -> Result<()> {
    if let Err(err) = &run {
        error!("Game loop failed: {:#}", err);
    }
    if let Err(err) = &restore {
        error!("Failed to restore the terminal: {:#}", err);
    }
    run.and(restore)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settle_prefers_the_game_error() {
        let run: Result<()> = Err(anyhow::anyhow!("poll failed"));
        let restore: Result<()> = Err(anyhow::anyhow!("raw mode stuck"));

        let err = settle(run, restore).unwrap_err();
        assert_eq!(err.to_string(), "poll failed");
    }

    #[test]
    fn test_settle_reports_restore_failure() {
        let err = settle(Ok(()), Err(anyhow::anyhow!("raw mode stuck"))).unwrap_err();
        assert_eq!(err.to_string(), "raw mode stuck");
        assert!(settle(Ok(()), Ok(())).is_ok());
    }

    #[test]
    fn test_layout_centres_playfield() {
        let grid = Grid::new(400, 400, 10);
        let layout = Layout::fit(&grid, (100, 50)).unwrap();

        assert_eq!(layout.inner, (80, 40));
        assert_eq!(layout.origin, (9, 4));
        assert_eq!(layout.to_screen(&grid, (0, 0)), (10, 5));
        assert_eq!(layout.to_screen(&grid, (390, 390)), (88, 44));
    }

    #[test]
    fn test_layout_exact_fit() {
        let grid = Grid::new(100, 50, 10);
        let layout = Layout::fit(&grid, (22, 7)).unwrap();
        assert_eq!(layout.origin, (0, 0));
    }

    #[test]
    fn test_layout_huge_grid_does_not_overflow() {
        let grid = Grid::new(i32::MAX, i32::MAX, 1);
        let err = Layout::fit(&grid, (TermInt::MAX, TermInt::MAX)).unwrap_err();

        assert_eq!(
            err,
            SnakeError::TerminalTooSmall {
                width: TermInt::MAX,
                height: TermInt::MAX,
                needed_width: TermInt::MAX,
                needed_height: TermInt::MAX,
            }
        );
    }

    #[test]
    fn test_layout_rejects_small_terminal() {
        let grid = Grid::new(400, 400, 10);
        let err = Layout::fit(&grid, (80, 24)).unwrap_err();

        assert_eq!(
            err,
            SnakeError::TerminalTooSmall { width: 80, height: 24, needed_width: 82, needed_height: 42 }
        );
    }
}
