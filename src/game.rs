use std::time::Instant;

use log::info;
use rand::Rng;

use crate::components::Cell;
use crate::ghost::{spawn_ghosts, Ghost, GhostRole, PlayerView};
use crate::highscore::HighScore;
use crate::input::InputBuffer;
use crate::level::{create_level, Grid, LevelData, PelletStore};
use crate::player::Player;
use crate::state_machine::{GameStateMachine, Transition};

/// What happened during one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickEvents {
    pub points: u32,
    pub collision: bool,
    pub level_complete: bool,
    pub life_lost: bool,
    pub game_over: bool,
}

pub struct Game {
    level: LevelData,
    pub player: Player,
    pub ghosts: Vec<Ghost>,
    pub state: GameStateMachine,
    pub score: u32,
    pub high_score: HighScore,
    pub new_high_score: bool,
    pub tick_count: u64,
}

impl Game {
    pub fn new(high_score: HighScore) -> Self {
        Self::with_level(create_level(), high_score)
    }

    pub fn with_level(level: LevelData, high_score: HighScore) -> Self {
        let player = Player::new(level.player_start, &level.grid);
        let ghosts = spawn_ghosts(&level);
        Self {
            level,
            player,
            ghosts,
            state: GameStateMachine::new(),
            score: 0,
            high_score,
            new_high_score: false,
            tick_count: 0,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.level.grid
    }

    pub fn pellets(&self) -> &PelletStore {
        &self.level.pellets
    }

    pub fn pellets_mut(&mut self) -> &mut PelletStore {
        &mut self.level.pellets
    }

    /// Cell of the leader ghost, if one is on the board.
    pub fn leader_cell(&self) -> Option<Cell> {
        self.ghosts
            .iter()
            .find(|g| g.role == GhostRole::Leader)
            .map(|g| g.cell(&self.level.grid))
    }

    pub fn player_view(&self) -> PlayerView {
        PlayerView {
            cell: self.player.cell(&self.level.grid),
            direction: self.player.mover.direction,
        }
    }

    pub fn tick<R: Rng + ?Sized>(
        &mut self,
        input: &mut InputBuffer,
        now: Instant,
        rng: &mut R,
    ) -> TickEvents {
        let mut events = TickEvents::default();
        self.tick_count += 1;

        match self.state.update_transition() {
            Some(Transition::ReloadLevel) => {
                info!("starting level {}", self.state.level());
                self.level.pellets.reset();
                self.respawn();
            }
            Some(Transition::Respawn) => self.respawn(),
            None => {}
        }
        if !self.state.is_playing() {
            return events;
        }

        self.player.update(&self.level.grid, input, now);
        let pos = self.player.position();
        events.points = self.level.pellets.collect(pos.x, pos.y);
        self.score += events.points;

        if self.state.check_level_complete(self.level.pellets.remaining()) {
            events.level_complete = true;
            return events;
        }

        let view = self.player_view();
        let leader = self.leader_cell();
        let grid = &self.level.grid;
        for ghost in &mut self.ghosts {
            ghost.update(grid, &view, leader, rng);
            if ghost.collides_with(pos, self.player.mover.radius) {
                events.collision = true;
            }
        }

        if self.state.check_life_lost(events.collision) {
            events.life_lost = true;
            if self.state.is_game_over() {
                events.game_over = true;
                self.new_high_score = self.high_score.update(self.score);
            }
        }
        events
    }

    fn respawn(&mut self) {
        self.player = Player::new(self.level.player_start, &self.level.grid);
        self.ghosts = spawn_ghosts(&self.level);
    }

    /// Back to level one with full lives and pellets.
    pub fn restart(&mut self) {
        info!("restarting game");
        self.state.reset();
        self.level.pellets.reset();
        self.respawn();
        self.score = 0;
        self.new_high_score = false;
        self.tick_count = 0;
    }

    /// Puts every active ghost into Frightened.
    pub fn frighten_ghosts(&mut self) {
        for ghost in &mut self.ghosts {
            ghost.frighten();
        }
    }
}
