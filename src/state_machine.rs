use log::info;

use crate::config::{LEVEL_COMPLETE_DELAY, STARTING_LIVES};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Playing,
    LevelComplete,
    LifeLost,
    GameOver,
}

/// What the game has to rebuild when a pause ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    ReloadLevel,
    Respawn,
}

#[derive(Debug, Clone)]
pub struct GameStateMachine {
    state: GameState,
    lives: u32,
    level: u32,
    transition_timer: u32,
}

impl Default for GameStateMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl GameStateMachine {
    pub fn new() -> Self {
        Self {
            state: GameState::Playing,
            lives: STARTING_LIVES,
            level: 1,
            transition_timer: 0,
        }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn is_playing(&self) -> bool {
        self.state == GameState::Playing
    }

    pub fn is_game_over(&self) -> bool {
        self.state == GameState::GameOver
    }

    pub fn check_level_complete(&mut self, pellets_remaining: usize) -> bool {
        if self.state == GameState::Playing && pellets_remaining == 0 {
            info!("level {} complete", self.level);
            self.state = GameState::LevelComplete;
            self.transition_timer = 0;
            return true;
        }
        false
    }

    pub fn check_life_lost(&mut self, collided: bool) -> bool {
        if self.state != GameState::Playing || !collided {
            return false;
        }
        self.lives = self.lives.saturating_sub(1);
        if self.lives == 0 {
            info!("game over on level {}", self.level);
            self.state = GameState::GameOver;
        } else {
            info!("life lost, {} left", self.lives);
            self.state = GameState::LifeLost;
            self.transition_timer = 0;
        }
        true
    }

    /// Counts down the pause after a completed level or a lost life.
    pub fn update_transition(&mut self) -> Option<Transition> {
        let transition = match self.state {
            GameState::LevelComplete => Transition::ReloadLevel,
            GameState::LifeLost => Transition::Respawn,
            _ => return None,
        };
        self.transition_timer += 1;
        if self.transition_timer < LEVEL_COMPLETE_DELAY {
            return None;
        }
        if transition == Transition::ReloadLevel {
            self.level += 1;
        }
        self.state = GameState::Playing;
        self.transition_timer = 0;
        Some(transition)
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_out(machine: &mut GameStateMachine) -> Option<Transition> {
        for _ in 0..LEVEL_COMPLETE_DELAY - 1 {
            assert_eq!(machine.update_transition(), None);
        }
        machine.update_transition()
    }

    #[test]
    fn starts_playing_with_three_lives() {
        let machine = GameStateMachine::new();
        assert_eq!(machine.state(), GameState::Playing);
        assert_eq!(machine.lives(), 3);
        assert_eq!(machine.level(), 1);
    }

    #[test]
    fn level_complete_reloads_after_delay() {
        let mut machine = GameStateMachine::new();
        assert!(!machine.check_level_complete(5));
        assert!(machine.check_level_complete(0));
        assert_eq!(machine.state(), GameState::LevelComplete);
        assert_eq!(run_out(&mut machine), Some(Transition::ReloadLevel));
        assert_eq!(machine.state(), GameState::Playing);
        assert_eq!(machine.level(), 2);
    }

    #[test]
    fn collision_costs_a_life_then_respawns() {
        let mut machine = GameStateMachine::new();
        assert!(!machine.check_life_lost(false));
        assert!(machine.check_life_lost(true));
        assert_eq!(machine.state(), GameState::LifeLost);
        assert_eq!(machine.lives(), 2);
        // Further hits during the pause are ignored.
        assert!(!machine.check_life_lost(true));
        assert_eq!(run_out(&mut machine), Some(Transition::Respawn));
        assert_eq!(machine.level(), 1);
    }

    #[test]
    fn last_life_ends_the_game() {
        let mut machine = GameStateMachine::new();
        for _ in 0..2 {
            machine.check_life_lost(true);
            run_out(&mut machine);
        }
        assert!(machine.check_life_lost(true));
        assert!(machine.is_game_over());
        assert_eq!(machine.lives(), 0);
        assert_eq!(machine.update_transition(), None);

        machine.reset();
        assert!(machine.is_playing());
        assert_eq!(machine.lives(), 3);
    }
}
