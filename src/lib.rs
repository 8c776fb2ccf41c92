//! Terminal maze chase: a player collecting pellets, four ghosts with their
//! own targeting rules, grid A* navigation and tile-precise turning.

pub mod components;
pub mod config;
pub mod debug;
pub mod error;
pub mod game;
pub mod ghost;
pub mod highscore;
pub mod input;
pub mod level;
pub mod movement;
pub mod pathfinding;
pub mod player;
pub mod render;
pub mod state_machine;
pub mod targeting;

pub use error::{Error, Result};
