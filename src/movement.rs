//! Tile-precise movement shared by the player and the ghosts.
//!
//! One call to [`resolve`] per tick decides whether the desired direction can
//! be taken and then advances along whatever direction is current.

use crate::components::{Cell, Direction, Position};
use crate::config::TILE_CENTER_TOLERANCE;
use crate::level::Grid;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mover {
    pub position: Position,
    pub direction: Direction,
    pub speed: f32,
    pub radius: f32,
}

impl Mover {
    pub fn new(position: Position, speed: f32, radius: f32) -> Self {
        Self {
            position,
            direction: Direction::None,
            speed,
            radius,
        }
    }

    pub fn cell(&self, grid: &Grid) -> Cell {
        grid.cell_at(self.position)
    }

    fn center(&self, grid: &Grid) -> Position {
        grid.tile_center(self.cell(grid))
    }

    /// Within the tolerance of the current tile's center on both axes.
    pub fn is_centered(&self, grid: &Grid) -> bool {
        let center = self.center(grid);
        (self.position.x - center.x).abs() <= TILE_CENTER_TOLERANCE
            && (self.position.y - center.y).abs() <= TILE_CENTER_TOLERANCE
    }

    fn can_move(&self, grid: &Grid, from: Position, dir: Direction) -> bool {
        let next = from.offset(dir, self.speed);
        grid.can_occupy(next.x, next.y, self.radius)
    }

    /// Puts the entity exactly on its tile center.
    pub fn realign(&mut self, grid: &Grid) {
        self.position = self.center(grid);
    }
}

/// Which refinements an entity gets on top of the centered turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnPolicy {
    pub reversal: bool,
    pub cornering: bool,
}

impl TurnPolicy {
    pub const PLAYER: TurnPolicy = TurnPolicy {
        reversal: true,
        cornering: true,
    };
    pub const AGENT: TurnPolicy = TurnPolicy {
        reversal: false,
        cornering: false,
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnKind {
    Reversed,
    Centered,
    Cornered,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub turned: Option<TurnKind>,
    pub advanced: bool,
}

pub fn resolve(mover: &mut Mover, desired: Direction, grid: &Grid, policy: TurnPolicy) -> Resolution {
    let turned = try_turn(mover, desired, grid, policy);
    let advanced = advance(mover, grid);
    Resolution { turned, advanced }
}

fn try_turn(mover: &mut Mover, desired: Direction, grid: &Grid, policy: TurnPolicy) -> Option<TurnKind> {
    if desired.is_none() || desired == mover.direction {
        return None;
    }

    if policy.reversal && !mover.direction.is_none() && desired == mover.direction.opposite() {
        mover.direction = desired;
        return Some(TurnKind::Reversed);
    }

    let center = mover.center(grid);
    let ahead_open = grid.is_open(mover.cell(grid).step(desired));
    if mover.is_centered(grid) {
        if !ahead_open || !mover.can_move(grid, mover.position, desired) {
            return None;
        }
        if desired.is_horizontal() {
            mover.position.y = center.y;
        } else {
            mover.position.x = center.x;
        }
        mover.direction = desired;
        return Some(TurnKind::Centered);
    }

    if policy.cornering
        && desired.is_perpendicular(mover.direction)
        && !mover.can_move(grid, mover.position, mover.direction)
    {
        let mut snapped = mover.position;
        if mover.direction.is_horizontal() {
            snapped.x = center.x;
        } else {
            snapped.y = center.y;
        }
        if ahead_open && mover.can_move(grid, snapped, desired) {
            mover.position = snapped;
            mover.direction = desired;
            return Some(TurnKind::Cornered);
        }
    }

    None
}

/// Moves one step along the current direction. A centered entity facing a
/// wall tile is blocked and pulled exactly onto the center, so it never
/// creeps into the slack between its radius and the tile edge.
fn advance(mover: &mut Mover, grid: &Grid) -> bool {
    if mover.direction.is_none() {
        return false;
    }
    let centered = mover.is_centered(grid);
    let wall_ahead = !grid.is_open(mover.cell(grid).step(mover.direction));
    if !(centered && wall_ahead) && mover.can_move(grid, mover.position, mover.direction) {
        mover.position = mover.position.offset(mover.direction, mover.speed);
        return true;
    }
    if centered {
        mover.realign(grid);
    }
    false
}
