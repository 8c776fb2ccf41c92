use std::fs::File;
use std::io::{self, Stdout};
use std::thread;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::cursor::{Hide, Show};
use crossterm::event::{self, Event};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::ExecutableCommand;
use log::info;

use pacman::config::Settings;
use pacman::debug::DebugOverlay;
use pacman::game::Game;
use pacman::highscore::HighScore;
use pacman::input::{command_for, Command, InputBuffer};
use pacman::render::{render, Renderer};
use pacman::Result;

fn main() -> Result<()> {
    let settings = Settings::parse().normalized();
    init_logging(&settings)?;

    let mut stdout = io::stdout();
    terminal::enable_raw_mode()?;
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(Hide)?;

    let result = run(&mut stdout, &settings);

    stdout.execute(Show)?;
    stdout.execute(LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;
    result
}

/// Logs go to a file when asked for; the alternate screen owns stderr.
fn init_logging(settings: &Settings) -> Result<()> {
    let Some(path) = &settings.log_file else {
        return Ok(());
    };
    let file = File::create(path)?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init()?;
    Ok(())
}

fn run(stdout: &mut Stdout, settings: &Settings) -> Result<()> {
    let mut rng = rand::thread_rng();
    let mut game = Game::new(HighScore::load(&settings.highscore));
    let mut overlay = DebugOverlay::new(settings.debug);
    let mut input = InputBuffer::default();
    let mut renderer = Renderer::new(
        game.grid().width().max(0) as usize,
        game.grid().height().max(0) as usize,
    );
    let tick = Duration::from_millis(settings.tick_ms);
    let frame_time = Duration::from_micros(1_000_000 / settings.fps.max(1));
    let mut last_tick = Instant::now();
    info!(
        "starting: tick {}ms, {} fps, high score {}",
        settings.tick_ms,
        settings.fps,
        game.high_score.get()
    );

    loop {
        let frame_start = Instant::now();
        while event::poll(Duration::from_millis(0))? {
            if let Event::Key(key) = event::read()? {
                match command_for(&key) {
                    Some(Command::Quit) => return Ok(()),
                    Some(Command::Move(dir)) => input.press(dir, Instant::now()),
                    Some(Command::Restart) if game.state.is_game_over() => game.restart(),
                    Some(Command::ToggleDebug) => {
                        overlay.toggle();
                        renderer.invalidate();
                    }
                    _ => {}
                }
            }
        }

        if last_tick.elapsed() >= tick {
            last_tick = Instant::now();
            game.tick(&mut input, last_tick, &mut rng);
        }
        render(stdout, &game, &overlay, &mut renderer)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            thread::sleep(frame_time - elapsed);
        }
    }
}
