//! Per-role target selection.
//!
//! Each role owns one strategy; `target_tile` picks between the strategy's
//! scatter corner and chase rule based on the current mode. All arithmetic is
//! done in `i64` so any `i32` input stays total.

use crate::components::{Cell, Direction};
use crate::config::{AMBUSH_LOOKAHEAD, FICKLE_CHASE_DISTANCE, FLANK_LOOKAHEAD};
use crate::ghost::{GhostRole, Mode};
use crate::level::Bounds;
use crate::pathfinding::manhattan;

/// Everything a strategy may look at. Read-only snapshot taken per tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetInputs {
    pub agent: Cell,
    pub player: Cell,
    pub player_direction: Direction,
    pub leader: Option<Cell>,
}

pub trait TargetingStrategy {
    fn scatter_corner(&self, bounds: Bounds) -> Cell;
    fn chase_target(&self, inputs: &TargetInputs, bounds: Bounds) -> Cell;
}

fn ahead(cell: Cell, dir: Direction, tiles: i64) -> (i64, i64) {
    let (dx, dy) = dir.delta();
    (
        i64::from(cell.x) + i64::from(dx) * tiles,
        i64::from(cell.y) + i64::from(dy) * tiles,
    )
}

struct LeaderTargeting;

impl TargetingStrategy for LeaderTargeting {
    fn scatter_corner(&self, bounds: Bounds) -> Cell {
        bounds.clamp(i64::from(bounds.width) - 2, 1)
    }

    fn chase_target(&self, inputs: &TargetInputs, _bounds: Bounds) -> Cell {
        inputs.player
    }
}

struct AmbusherTargeting;

impl TargetingStrategy for AmbusherTargeting {
    fn scatter_corner(&self, bounds: Bounds) -> Cell {
        bounds.clamp(1, 1)
    }

    fn chase_target(&self, inputs: &TargetInputs, bounds: Bounds) -> Cell {
        let (x, y) = ahead(inputs.player, inputs.player_direction, AMBUSH_LOOKAHEAD);
        bounds.clamp(x, y)
    }
}

struct FlankerTargeting;

impl TargetingStrategy for FlankerTargeting {
    fn scatter_corner(&self, bounds: Bounds) -> Cell {
        bounds.clamp(i64::from(bounds.width) - 2, i64::from(bounds.height) - 2)
    }

    fn chase_target(&self, inputs: &TargetInputs, bounds: Bounds) -> Cell {
        let Some(leader) = inputs.leader else {
            return inputs.player;
        };
        let (pivot_x, pivot_y) = ahead(inputs.player, inputs.player_direction, FLANK_LOOKAHEAD);
        let (lx, ly) = (i64::from(leader.x), i64::from(leader.y));
        let (vec_x, vec_y) = (pivot_x - lx, pivot_y - ly);
        bounds.clamp(lx + vec_x * 2, ly + vec_y * 2)
    }
}

struct FickleTargeting;

impl TargetingStrategy for FickleTargeting {
    fn scatter_corner(&self, bounds: Bounds) -> Cell {
        bounds.clamp(1, i64::from(bounds.height) - 2)
    }

    fn chase_target(&self, inputs: &TargetInputs, bounds: Bounds) -> Cell {
        if manhattan(inputs.agent, inputs.player) > FICKLE_CHASE_DISTANCE {
            inputs.player
        } else {
            self.scatter_corner(bounds)
        }
    }
}

impl GhostRole {
    pub fn strategy(self) -> &'static dyn TargetingStrategy {
        match self {
            GhostRole::Leader => &LeaderTargeting,
            GhostRole::Ambusher => &AmbusherTargeting,
            GhostRole::Flanker => &FlankerTargeting,
            GhostRole::Fickle => &FickleTargeting,
        }
    }

    pub fn scatter_corner(self, bounds: Bounds) -> Cell {
        self.strategy().scatter_corner(bounds)
    }
}

/// Target cell for `role` in `mode`.
///
/// Frightened returns the agent's own cell; callers must not read anything
/// else into it. Idle has no rule of its own and targets the player.
pub fn target_tile(role: GhostRole, mode: Mode, inputs: &TargetInputs, bounds: Bounds) -> Cell {
    let strategy = role.strategy();
    match mode {
        Mode::Scatter => strategy.scatter_corner(bounds),
        Mode::Chase => strategy.chase_target(inputs, bounds),
        Mode::Frightened => inputs.agent,
        Mode::Idle => inputs.player,
    }
}

/// Same as [`target_tile`] for a role given by name; unknown names target the
/// player.
pub fn target_tile_for_name(name: &str, mode: Mode, inputs: &TargetInputs, bounds: Bounds) -> Cell {
    match GhostRole::from_name(name) {
        Some(role) => target_tile(role, mode, inputs, bounds),
        None => inputs.player,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOUNDS: Bounds = Bounds::new(20, 20);

    fn inputs(agent: Cell, player: Cell, dir: Direction, leader: Option<Cell>) -> TargetInputs {
        TargetInputs {
            agent,
            player,
            player_direction: dir,
            leader,
        }
    }

    #[test]
    fn leader_chases_player_cell() {
        let i = inputs(Cell::new(0, 0), Cell::new(10, 10), Direction::Right, None);
        assert_eq!(target_tile(GhostRole::Leader, Mode::Chase, &i, BOUNDS), Cell::new(10, 10));
    }

    #[test]
    fn ambusher_leads_by_four() {
        let i = inputs(Cell::new(0, 0), Cell::new(10, 10), Direction::Right, None);
        assert_eq!(target_tile(GhostRole::Ambusher, Mode::Chase, &i, BOUNDS), Cell::new(14, 10));

        let near_edge = inputs(Cell::new(0, 0), Cell::new(18, 1), Direction::Right, None);
        assert_eq!(
            target_tile(GhostRole::Ambusher, Mode::Chase, &near_edge, BOUNDS),
            Cell::new(19, 1)
        );
    }

    #[test]
    fn flanker_doubles_leader_vector() {
        let i = inputs(Cell::new(0, 0), Cell::new(10, 10), Direction::Right, Some(Cell::new(8, 10)));
        assert_eq!(target_tile(GhostRole::Flanker, Mode::Chase, &i, BOUNDS), Cell::new(16, 10));
    }

    #[test]
    fn flanker_without_leader_targets_player() {
        let i = inputs(Cell::new(0, 0), Cell::new(10, 10), Direction::Right, None);
        assert_eq!(target_tile(GhostRole::Flanker, Mode::Chase, &i, BOUNDS), Cell::new(10, 10));
    }

    #[test]
    fn fickle_keeps_away() {
        let far = inputs(Cell::new(0, 0), Cell::new(10, 10), Direction::Right, None);
        assert_eq!(target_tile(GhostRole::Fickle, Mode::Chase, &far, BOUNDS), Cell::new(10, 10));

        let near = inputs(Cell::new(8, 10), Cell::new(10, 10), Direction::Right, None);
        assert_eq!(
            target_tile(GhostRole::Fickle, Mode::Chase, &near, BOUNDS),
            GhostRole::Fickle.scatter_corner(BOUNDS)
        );

        // Exactly 8 away still retreats.
        let edge = inputs(Cell::new(2, 10), Cell::new(10, 10), Direction::Right, None);
        assert_eq!(
            target_tile(GhostRole::Fickle, Mode::Chase, &edge, BOUNDS),
            Cell::new(1, 18)
        );
    }

    #[test]
    fn scatter_corners_are_inset() {
        let i = inputs(Cell::new(5, 5), Cell::new(10, 10), Direction::Up, None);
        let corners: Vec<Cell> = GhostRole::ALL
            .iter()
            .map(|role| target_tile(*role, Mode::Scatter, &i, BOUNDS))
            .collect();
        assert_eq!(
            corners,
            vec![Cell::new(18, 1), Cell::new(1, 1), Cell::new(18, 18), Cell::new(1, 18)]
        );
    }

    #[test]
    fn frightened_targets_own_cell() {
        let i = inputs(Cell::new(3, 3), Cell::new(0, 0), Direction::None, None);
        for role in GhostRole::ALL {
            assert_eq!(target_tile(role, Mode::Frightened, &i, BOUNDS), Cell::new(3, 3));
        }
    }

    #[test]
    fn unknown_role_name_targets_player() {
        let i = inputs(Cell::new(0, 0), Cell::new(5, 5), Direction::None, None);
        assert_eq!(
            target_tile_for_name("unknown_ghost", Mode::Chase, &i, BOUNDS),
            Cell::new(5, 5)
        );
        assert_eq!(
            target_tile_for_name("ambusher", Mode::Scatter, &i, BOUNDS),
            Cell::new(1, 1)
        );
    }

    #[test]
    fn extreme_inputs_stay_in_bounds() {
        let i = inputs(
            Cell::new(i32::MIN, i32::MAX),
            Cell::new(i32::MAX, i32::MIN),
            Direction::Right,
            Some(Cell::new(i32::MIN, i32::MIN)),
        );
        for role in [GhostRole::Ambusher, GhostRole::Flanker] {
            let target = target_tile(role, Mode::Chase, &i, BOUNDS);
            assert!(BOUNDS.contains(target), "{:?} -> {:?}", role, target);
        }
    }
}
