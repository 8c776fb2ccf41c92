use log::{debug, trace};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::components::{Cell, Direction, Position};
use crate::config::{
    CHASE_TICKS, FRIGHTENED_TICKS, GHOST_RADIUS_OFFSET, GHOST_SPEED, REPLAN_INTERVAL,
    SCATTER_TICKS, TILE_SIZE,
};
use crate::level::{Grid, LevelData};
use crate::movement::{resolve, Mover, TurnPolicy};
use crate::pathfinding::next_step;
use crate::targeting::{target_tile, TargetInputs};

/// Radius shared by all ghosts at the default tile size.
pub const GHOST_RADIUS: f32 = TILE_SIZE / 2.0 - GHOST_RADIUS_OFFSET;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GhostRole {
    Leader,
    Ambusher,
    Flanker,
    Fickle,
}

impl GhostRole {
    /// Spawn order; the index matches `LevelData::ghost_starts`.
    pub const ALL: [GhostRole; 4] = [
        GhostRole::Leader,
        GhostRole::Ambusher,
        GhostRole::Flanker,
        GhostRole::Fickle,
    ];

    pub fn name(self) -> &'static str {
        match self {
            GhostRole::Leader => "leader",
            GhostRole::Ambusher => "ambusher",
            GhostRole::Flanker => "flanker",
            GhostRole::Fickle => "fickle",
        }
    }

    pub fn from_name(name: &str) -> Option<GhostRole> {
        GhostRole::ALL
            .into_iter()
            .find(|role| role.name().eq_ignore_ascii_case(name.trim()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    Idle,
    Scatter,
    Chase,
    Frightened,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeDurations {
    pub scatter: u32,
    pub chase: u32,
    pub frightened: u32,
}

impl Default for ModeDurations {
    fn default() -> Self {
        Self {
            scatter: SCATTER_TICKS,
            chase: CHASE_TICKS,
            frightened: FRIGHTENED_TICKS,
        }
    }
}

/// Timed behavior modes. Scatter and Chase alternate forever; Frightened
/// runs out back into whatever it interrupted; Idle never leaves on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModeMachine {
    mode: Mode,
    timer: u32,
    resume: Mode,
    durations: ModeDurations,
}

impl ModeMachine {
    pub fn new(initial: Mode, durations: ModeDurations) -> Self {
        Self {
            mode: initial,
            timer: 0,
            resume: Mode::Scatter,
            durations,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn timer(&self) -> u32 {
        self.timer
    }

    fn transition(&self) -> Option<(u32, Mode)> {
        match self.mode {
            Mode::Scatter => Some((self.durations.scatter, Mode::Chase)),
            Mode::Chase => Some((self.durations.chase, Mode::Scatter)),
            Mode::Frightened => Some((self.durations.frightened, self.resume)),
            Mode::Idle => None,
        }
    }

    /// Advances one tick. Returns the new mode when a switch happened.
    pub fn tick(&mut self) -> Option<Mode> {
        let (duration, next) = self.transition()?;
        self.timer += 1;
        if self.timer < duration {
            return None;
        }
        self.mode = next;
        self.timer = 0;
        Some(next)
    }

    /// Enters Frightened. A second call restarts the timer.
    pub fn frighten(&mut self) {
        match self.mode {
            Mode::Idle => {}
            Mode::Frightened => self.timer = 0,
            current => {
                self.resume = current;
                self.mode = Mode::Frightened;
                self.timer = 0;
            }
        }
    }

    pub fn hold(&mut self) {
        if self.mode == Mode::Idle {
            return;
        }
        if self.mode != Mode::Frightened {
            self.resume = self.mode;
        }
        self.mode = Mode::Idle;
        self.timer = 0;
    }

    pub fn release(&mut self) {
        if self.mode == Mode::Idle {
            self.mode = self.resume;
            self.timer = 0;
        }
    }
}

/// What a ghost is allowed to know about the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerView {
    pub cell: Cell,
    pub direction: Direction,
}

#[derive(Debug, Clone)]
pub struct Ghost {
    pub role: GhostRole,
    pub mover: Mover,
    pub target: Option<Cell>,
    modes: ModeMachine,
    desired: Direction,
    replan_counter: u32,
    replan_interval: u32,
}

impl Ghost {
    pub fn new(role: GhostRole, spawn: Cell, grid: &Grid) -> Self {
        let radius = grid.tile_size() / 2.0 - GHOST_RADIUS_OFFSET;
        Self {
            role,
            mover: Mover::new(grid.tile_center(spawn), GHOST_SPEED, radius),
            target: None,
            modes: ModeMachine::new(Mode::Scatter, ModeDurations::default()),
            desired: Direction::None,
            replan_counter: 0,
            replan_interval: REPLAN_INTERVAL,
        }
    }

    pub fn with_durations(mut self, durations: ModeDurations) -> Self {
        self.modes = ModeMachine::new(self.modes.mode(), durations);
        self
    }

    pub fn mode(&self) -> Mode {
        self.modes.mode()
    }

    pub fn mode_timer(&self) -> u32 {
        self.modes.timer()
    }

    pub fn modes_mut(&mut self) -> &mut ModeMachine {
        &mut self.modes
    }

    pub fn desired(&self) -> Direction {
        self.desired
    }

    pub fn position(&self) -> Position {
        self.mover.position
    }

    pub fn cell(&self, grid: &Grid) -> Cell {
        self.mover.cell(grid)
    }

    pub fn frighten(&mut self) {
        self.modes.frighten();
    }

    pub fn update<R: Rng + ?Sized>(
        &mut self,
        grid: &Grid,
        player: &PlayerView,
        leader: Option<Cell>,
        rng: &mut R,
    ) {
        if self.modes.mode() == Mode::Idle {
            return;
        }

        if let Some(mode) = self.modes.tick() {
            debug!("{} ghost switched to {:?}", self.role.name(), mode);
        }

        self.replan_counter += 1;
        if self.replan_counter >= self.replan_interval {
            self.replan_counter = 0;
            self.replan(grid, player, leader, rng);
        }

        let resolution = resolve(&mut self.mover, self.desired, grid, TurnPolicy::AGENT);
        if !resolution.advanced {
            self.mover.realign(grid);
            self.replan(grid, player, leader, rng);
        }
    }

    /// Picks a fresh target and the first step toward it. An empty step
    /// keeps the previous desired direction.
    pub fn replan<R: Rng + ?Sized>(
        &mut self,
        grid: &Grid,
        player: &PlayerView,
        leader: Option<Cell>,
        rng: &mut R,
    ) {
        let cell = self.cell(grid);
        let inputs = TargetInputs {
            agent: cell,
            player: player.cell,
            player_direction: player.direction,
            leader,
        };
        let target = target_tile(self.role, self.modes.mode(), &inputs, grid.bounds());
        self.target = Some(target);

        let mut step = next_step(grid, cell, target);
        if step.is_none() && self.modes.mode() == Mode::Frightened {
            step = self.wander(grid, cell, rng);
        }
        trace!(
            "{} ghost at {:?} targets {:?}, step {:?}",
            self.role.name(),
            cell,
            target,
            step
        );
        if !step.is_none() {
            self.desired = step;
        }
    }

    /// Random open direction that does not double back, unless doubling back
    /// is the only way out.
    fn wander<R: Rng + ?Sized>(&self, grid: &Grid, cell: Cell, rng: &mut R) -> Direction {
        let back = self.mover.direction.opposite();
        let options: Vec<Direction> = Direction::ALL
            .into_iter()
            .filter(|dir| *dir != back && grid.is_open(cell.step(*dir)))
            .collect();
        match options.choose(rng) {
            Some(dir) => *dir,
            None if !back.is_none() && grid.is_open(cell.step(back)) => back,
            None => Direction::None,
        }
    }

    /// Circle overlap against another body.
    pub fn collides_with(&self, center: Position, radius: f32) -> bool {
        self.mover.position.distance(center) < self.mover.radius + radius
    }
}

/// One ghost per role at its spawn tile, in Scatter.
pub fn spawn_ghosts(level: &LevelData) -> Vec<Ghost> {
    GhostRole::ALL
        .into_iter()
        .zip(level.ghost_starts)
        .map(|(role, spawn)| Ghost::new(role, spawn, &level.grid))
        .collect()
}
