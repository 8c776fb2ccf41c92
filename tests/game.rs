use std::time::{Duration, Instant};

use pacman::components::Direction;
use pacman::config::TILE_SIZE;
use pacman::game::Game;
use pacman::ghost::Mode;
use pacman::highscore::HighScore;
use pacman::input::InputBuffer;
use pacman::level::{create_level, Grid};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tempfile::tempdir;

#[test]
fn long_run_keeps_everyone_on_open_tiles() {
    let dir = tempdir().unwrap();
    let mut game = Game::new(HighScore::load(dir.path().join("highscore.json")));
    let mut rng = StdRng::seed_from_u64(42);
    let mut input = InputBuffer::default();
    let radius = TILE_SIZE / 2.0 - 4.0;
    let start = Instant::now();
    let keys = [Direction::Right, Direction::Down, Direction::Left, Direction::Up];

    for tick in 0..3_000u64 {
        let now = start + Duration::from_millis(tick * 16);
        if tick % 90 == 0 {
            input.press(keys[(tick / 90) as usize % keys.len()], now);
        }
        game.tick(&mut input, now, &mut rng);
        if game.state.is_game_over() {
            game.restart();
        }

        let grid = game.grid();
        let p = game.player.position();
        assert!(grid.can_occupy(p.x, p.y, radius), "player in a wall at tick {}", tick);
        for ghost in &game.ghosts {
            let g = ghost.position();
            assert!(
                grid.can_occupy(g.x, g.y, radius),
                "{} in a wall at tick {}",
                ghost.role.name(),
                tick
            );
        }
    }
}

#[test]
fn ghost_mode_timers_follow_game_ticks() {
    let dir = tempdir().unwrap();
    let mut game = Game::new(HighScore::load(dir.path().join("highscore.json")));
    let mut rng = StdRng::seed_from_u64(9);
    let mut input = InputBuffer::default();
    let now = Instant::now();
    for _ in 0..25 {
        game.tick(&mut input, now, &mut rng);
    }
    for ghost in &game.ghosts {
        assert_eq!(ghost.mode(), Mode::Scatter);
        assert_eq!(ghost.mode_timer(), 25);
        assert!(ghost.target.is_some());
    }
}

#[test]
fn custom_layout_is_accepted() {
    let grid = Grid::parse(&["#####", "#...#", "#####"], TILE_SIZE).unwrap();
    assert_eq!(grid.width(), 5);
    assert_eq!(grid.height(), 3);
    assert!(grid.is_open(pacman::components::Cell::new(2, 1)));
    assert_eq!(create_level().grid.width(), 20);
}
