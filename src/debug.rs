use crate::components::Cell;
use crate::config::DEBUG_ENABLED_BY_DEFAULT;
use crate::game::Game;
use crate::ghost::GhostRole;

/// Text readout of the ghost brains, drawn under the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebugOverlay {
    pub enabled: bool,
}

impl Default for DebugOverlay {
    fn default() -> Self {
        Self::new(DEBUG_ENABLED_BY_DEFAULT)
    }
}

impl DebugOverlay {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn toggle(&mut self) {
        self.enabled = !self.enabled;
    }

    pub fn lines(&self, game: &Game) -> Vec<String> {
        if !self.enabled {
            return Vec::new();
        }
        let grid = game.grid();
        let mut lines = vec![format!(
            "tick {}  state {:?}  pellets {}/{}",
            game.tick_count,
            game.state.state(),
            game.pellets().remaining(),
            game.pellets().total()
        )];
        for ghost in &game.ghosts {
            let cell = ghost.cell(grid);
            let target = ghost
                .target
                .map(|t| format!("({},{})", t.x, t.y))
                .unwrap_or_else(|| "-".to_string());
            lines.push(format!(
                "{:<8} {:<10} t={:<5} at ({},{}) -> {} heading {:?}",
                ghost.role.name(),
                format!("{:?}", ghost.mode()),
                ghost.mode_timer(),
                cell.x,
                cell.y,
                target,
                ghost.mover.direction
            ));
        }
        lines
    }

    /// Target cells to highlight on the board.
    pub fn marks(&self, game: &Game) -> Vec<(Cell, GhostRole)> {
        if !self.enabled {
            return Vec::new();
        }
        game.ghosts
            .iter()
            .filter_map(|g| g.target.map(|t| (t, g.role)))
            .collect()
    }
}
