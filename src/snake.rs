use std::collections::VecDeque;

use crate::{food::Food, grid::Grid, Coords};
use Direction::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right
}

impl Direction {
    /// One block in this direction.
    pub fn delta(&self, step: i32) -> Coords {
        match self {
            Up => (0, -step),
            Down => (0, step),
            Left => (-step, 0),
            Right => (step, 0),
        }
    }

    pub fn head_char(&self) -> char {
        match self {
            Up => '^',
            Down => 'v',
            Left => '<',
            Right => '>',
        }
    }
}

/// The player's snake.
///
/// `trail` holds the last `length` cells the head stepped on, oldest first.
/// Once the snake has eaten, the newest trail entry is the head itself.
#[derive(Debug, Clone)]
pub struct Snake {
    grid: Grid,
    head: Coords,
    length: u32,
    trail: VecDeque<Coords>,
}

impl Snake {
    pub fn new(grid: Grid, head: Coords) -> Self {
        Snake { grid, head, length: 0, trail: VecDeque::new() }
    }

    pub fn move_by(&mut self, dx: i32, dy: i32) {
        self.head = self.grid.wrap(self.head, (dx, dy));
    }

    pub fn position(&self) -> Coords {
        self.head
    }

    pub fn length(&self) -> u32 {
        self.length
    }

    pub fn trail(&self) -> &VecDeque<Coords> {
        &self.trail
    }

    pub fn has_eaten(&self, food: &Food) -> bool {
        self.head == food.position()
    }

    /// Trail cells stepped on before the latest one.
    ///
    /// `advance` appends the head before anyone asks whether the snake is dead,
    /// so the latest entry always matches the head and must not count.
    pub fn history_before_latest(&self) -> impl Iterator<Item = &Coords> {
        let earlier = self.trail.len().saturating_sub(1);
        self.trail.iter().take(earlier)
    }

    pub fn is_dead(&self) -> bool {
        self.history_before_latest().any(|pos| *pos == self.head)
    }

    /// Head or any trail cell.
    pub fn occupies(&self, pos: Coords) -> bool {
        self.head == pos || self.trail.contains(&pos)
    }

    /// Moves one step, records the new head and grows if `food` was reached.
    pub fn advance(&mut self, food: &Food, dx: i32, dy: i32) {
        self.move_by(dx, dy);
        self.trail.push_back(self.head);

        if self.has_eaten(food) {
            self.length += 1;
        } else {
            self.trail.pop_front();
        }
    }
}
