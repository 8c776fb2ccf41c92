use std::path::PathBuf;

use clap::Parser;

pub const TILE_SIZE: f32 = 30.0;
pub const GRID_COLS: i32 = 20;
pub const GRID_ROWS: i32 = 20;

pub const PLAYER_SPEED: f32 = 2.0;
pub const PLAYER_RADIUS_OFFSET: f32 = 4.0;
pub const GHOST_SPEED: f32 = 1.5;
pub const GHOST_RADIUS_OFFSET: f32 = 4.0;

pub const POINTS_PER_PELLET: u32 = 10;
pub const STARTING_LIVES: u32 = 3;

/// Ticks per second the durations below are expressed against.
pub const TICKS_PER_SECOND: u32 = 60;
pub const SCATTER_TICKS: u32 = 7 * TICKS_PER_SECOND;
pub const CHASE_TICKS: u32 = 20 * TICKS_PER_SECOND;
pub const FRIGHTENED_TICKS: u32 = 6 * TICKS_PER_SECOND;
pub const REPLAN_INTERVAL: u32 = 10;
pub const LEVEL_COMPLETE_DELAY: u32 = 2 * TICKS_PER_SECOND;

/// Fickle chases only while farther than this many tiles (Manhattan).
pub const FICKLE_CHASE_DISTANCE: i64 = 8;
pub const AMBUSH_LOOKAHEAD: i64 = 4;
pub const FLANK_LOOKAHEAD: i64 = 2;

pub const INPUT_BUFFER_MS: u64 = 200;
pub const TILE_CENTER_TOLERANCE: f32 = 2.0;

pub const DEBUG_ENABLED_BY_DEFAULT: bool = false;

const DEFAULT_TICK_MS: u64 = 16;
const DEFAULT_RENDER_FPS: u64 = 60;

/// Runtime settings, from flags or the `PACMAN_*` environment variables.
#[derive(Parser, Debug, Clone)]
#[command(name = "pacman")]
#[command(author, version, about = "Terminal maze chase with A* ghosts", long_about = None)]
pub struct Settings {
    /// Milliseconds per simulation tick
    #[arg(long, env = "PACMAN_TICK_MS", default_value_t = DEFAULT_TICK_MS)]
    pub tick_ms: u64,

    /// Render frames per second
    #[arg(long, env = "PACMAN_FPS", default_value_t = DEFAULT_RENDER_FPS)]
    pub fps: u64,

    /// High score file
    #[arg(long, env = "PACMAN_HIGHSCORE", default_value = "highscore.json")]
    pub highscore: PathBuf,

    /// Write logs to this file (filter with RUST_LOG)
    #[arg(long, env = "PACMAN_LOG", value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Start with the debug overlay visible
    #[arg(long, env = "PACMAN_DEBUG")]
    pub debug: bool,
}

impl Settings {
    /// Zero values fall back to the defaults, as the env parsing always did.
    pub fn normalized(mut self) -> Self {
        if self.tick_ms == 0 {
            self.tick_ms = DEFAULT_TICK_MS;
        }
        if self.fps == 0 {
            self.fps = DEFAULT_RENDER_FPS;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_rates_fall_back_to_defaults() {
        let settings = Settings::parse_from(["pacman", "--tick-ms", "0", "--fps", "0"]).normalized();
        assert_eq!(settings.tick_ms, DEFAULT_TICK_MS);
        assert_eq!(settings.fps, DEFAULT_RENDER_FPS);
    }

    #[test]
    fn flags_override_defaults() {
        let settings = Settings::parse_from([
            "pacman",
            "--tick-ms",
            "30",
            "--highscore",
            "scores.json",
            "--debug",
        ]);
        assert_eq!(settings.tick_ms, 30);
        assert_eq!(settings.highscore, PathBuf::from("scores.json"));
        assert!(settings.debug);
        assert!(settings.log_file.is_none());
    }
}
