use std::time::Instant;

use crate::components::{Cell, Direction, Position};
use crate::config::{PLAYER_RADIUS_OFFSET, PLAYER_SPEED};
use crate::input::InputBuffer;
use crate::level::Grid;
use crate::movement::{resolve, Mover, Resolution, TurnPolicy};

#[derive(Debug, Clone)]
pub struct Player {
    pub mover: Mover,
    /// Last requested direction; kept until a newer press replaces it.
    pub desired: Direction,
}

impl Player {
    pub fn new(spawn: Cell, grid: &Grid) -> Self {
        let radius = grid.tile_size() / 2.0 - PLAYER_RADIUS_OFFSET;
        Self {
            mover: Mover::new(grid.tile_center(spawn), PLAYER_SPEED, radius),
            desired: Direction::None,
        }
    }

    pub fn position(&self) -> Position {
        self.mover.position
    }

    pub fn cell(&self, grid: &Grid) -> Cell {
        self.mover.cell(grid)
    }

    pub fn update(&mut self, grid: &Grid, input: &mut InputBuffer, now: Instant) -> Resolution {
        let buffered = input.buffered(now);
        if !buffered.is_none() {
            self.desired = buffered;
        }
        let resolution = resolve(&mut self.mover, self.desired, grid, TurnPolicy::PLAYER);
        if resolution.turned.is_some() {
            input.clear();
        }
        resolution
    }
}
