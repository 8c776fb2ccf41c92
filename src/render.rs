use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::QueueableCommand;
use unicode_width::UnicodeWidthStr;

use crate::components::Cell;
use crate::debug::DebugOverlay;
use crate::game::Game;
use crate::ghost::{GhostRole, Mode};
use crate::state_machine::GameState;

const CELL_W: usize = 2;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Glyph {
    Player,
    Ghost,
    Frightened,
    Wall,
    Empty,
    Pellet,
    Target,
}

#[derive(Clone, Copy, PartialEq, Debug)]
struct Tile {
    glyph: Glyph,
    color: Color,
}

const BLANK: Tile = Tile {
    glyph: Glyph::Empty,
    color: Color::Reset,
};

/// Remembers what is on screen so each frame only redraws changed tiles.
pub struct Renderer {
    last: Vec<Tile>,
    last_hud: String,
    last_status: String,
    last_debug: Vec<String>,
    needs_full: bool,
    origin_x: u16,
    origin_y: u16,
}

impl Renderer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            last: vec![BLANK; width * height],
            last_hud: String::new(),
            last_status: String::new(),
            last_debug: Vec::new(),
            needs_full: true,
            origin_x: 0,
            origin_y: 1,
        }
    }

    /// Forces a full redraw on the next frame.
    pub fn invalidate(&mut self) {
        self.needs_full = true;
    }
}

fn role_color(role: GhostRole) -> Color {
    match role {
        GhostRole::Leader => Color::Red,
        GhostRole::Ambusher => Color::Magenta,
        GhostRole::Flanker => Color::Cyan,
        GhostRole::Fickle => Color::DarkYellow,
    }
}

pub fn render<W: Write>(
    out: &mut W,
    game: &Game,
    overlay: &DebugOverlay,
    renderer: &mut Renderer,
) -> io::Result<()> {
    let size = terminal::size()?;
    render_sized(out, game, overlay, renderer, size)
}

/// Draws one frame into a terminal of `(cols, rows)`.
pub fn render_sized<W: Write>(
    out: &mut W,
    game: &Game,
    overlay: &DebugOverlay,
    renderer: &mut Renderer,
    (term_w, term_h): (u16, u16),
) -> io::Result<()> {
    let width = game.grid().width().max(0) as usize;
    let height = game.grid().height().max(0) as usize;
    let debug_lines = overlay.lines(game);
    let needed_h = (height + 2 + debug_lines.len()) as u16;
    let needed_w = (width * CELL_W) as u16;

    out.queue(MoveTo(0, 0))?;

    if term_w < needed_w || term_h < needed_h {
        out.queue(Clear(ClearType::All))?;
        let msg = format!(
            "Terminal too small. Need at least {}x{} (cols x rows). Current: {}x{}.",
            needed_w, needed_h, term_w, term_h
        );
        out.queue(Print(msg))?;
        out.flush()?;
        renderer.needs_full = true;
        return Ok(());
    }

    let origin_x = (term_w - needed_w) / 2;
    let origin_y = (term_h - needed_h) / 2 + 1;
    if origin_x != renderer.origin_x || origin_y != renderer.origin_y {
        renderer.origin_x = origin_x;
        renderer.origin_y = origin_y;
        renderer.needs_full = true;
    }
    if renderer.needs_full {
        out.queue(Clear(ClearType::All))?;
    }

    let hud = format!(
        "Score: {}  High: {}  Lives: {}  Level: {}  Pellets: {}  (q to quit)",
        game.score,
        game.high_score.get(),
        game.state.lives(),
        game.state.level(),
        game.pellets().remaining()
    );
    if renderer.needs_full || hud != renderer.last_hud {
        draw_line(out, renderer.origin_x, renderer.origin_y - 1, Color::White, &hud)?;
        renderer.last_hud = hud;
    }

    let marks = overlay.marks(game);
    for y in 0..height {
        for x in 0..width {
            let cell = Cell::new(x as i32, y as i32);
            let tile = tile_for(game, &marks, cell);
            let idx = y * width + x;
            if renderer.needs_full || tile != renderer.last[idx] {
                renderer.last[idx] = tile;
                draw_tile(out, renderer, x, y, tile)?;
            }
        }
    }

    let status = status_line(game);
    let status_y = renderer.origin_y + height as u16;
    if renderer.needs_full || status != renderer.last_status {
        draw_line(out, renderer.origin_x, status_y, Color::Yellow, &status)?;
        renderer.last_status = status;
    }

    if renderer.needs_full || debug_lines != renderer.last_debug {
        let rows = debug_lines.len().max(renderer.last_debug.len());
        for i in 0..rows {
            let text = debug_lines.get(i).map(String::as_str).unwrap_or("");
            draw_line(out, renderer.origin_x, status_y + 1 + i as u16, Color::Green, text)?;
        }
        renderer.last_debug = debug_lines;
    }
    renderer.needs_full = false;

    out.flush()?;
    Ok(())
}

fn status_line(game: &Game) -> String {
    match game.state.state() {
        GameState::Playing => String::new(),
        GameState::LevelComplete => "LEVEL COMPLETE!".to_string(),
        GameState::LifeLost => "LIFE LOST!".to_string(),
        GameState::GameOver if game.new_high_score => format!(
            "GAME OVER - NEW HIGH SCORE {} (r to restart, q to quit)",
            game.score
        ),
        GameState::GameOver => format!(
            "GAME OVER - Final Score: {} (r to restart, q to quit)",
            game.score
        ),
    }
}

fn tile_for(game: &Game, marks: &[(Cell, GhostRole)], cell: Cell) -> Tile {
    let grid = game.grid();
    if game.player.cell(grid) == cell {
        return Tile {
            glyph: Glyph::Player,
            color: Color::Yellow,
        };
    }
    if let Some(ghost) = game.ghosts.iter().find(|g| g.cell(grid) == cell) {
        if ghost.mode() == Mode::Frightened {
            return Tile {
                glyph: Glyph::Frightened,
                color: Color::Blue,
            };
        }
        return Tile {
            glyph: Glyph::Ghost,
            color: role_color(ghost.role),
        };
    }
    if let Some((_, role)) = marks.iter().find(|(c, _)| *c == cell) {
        return Tile {
            glyph: Glyph::Target,
            color: role_color(*role),
        };
    }
    if grid.is_wall(cell.x, cell.y) {
        return Tile {
            glyph: Glyph::Wall,
            color: Color::Blue,
        };
    }
    if game.pellets().has_pellet(cell) {
        return Tile {
            glyph: Glyph::Pellet,
            color: Color::White,
        };
    }
    BLANK
}

fn draw_line<W: Write>(out: &mut W, x: u16, y: u16, color: Color, text: &str) -> io::Result<()> {
    out.queue(MoveTo(x, y))?;
    out.queue(Clear(ClearType::CurrentLine))?;
    out.queue(SetForegroundColor(color))?;
    out.queue(Print(text))?;
    out.queue(ResetColor)?;
    Ok(())
}

fn draw_tile<W: Write>(out: &mut W, renderer: &Renderer, x: usize, y: usize, tile: Tile) -> io::Result<()> {
    let text = match tile.glyph {
        Glyph::Player => "😃",
        Glyph::Ghost => "👻",
        Glyph::Frightened => "😱",
        Glyph::Wall => "██",
        Glyph::Empty => "  ",
        Glyph::Pellet => "· ",
        Glyph::Target => "><",
    };
    let x_pos = renderer.origin_x + (x * CELL_W) as u16;
    let y_pos = renderer.origin_y + y as u16;
    out.queue(MoveTo(x_pos, y_pos))?;
    out.queue(SetForegroundColor(tile.color))?;
    out.queue(Print(text))?;
    let w = UnicodeWidthStr::width(text);
    if w < CELL_W {
        for _ in 0..(CELL_W - w) {
            out.queue(Print(' '))?;
        }
    }
    out.queue(ResetColor)?;
    Ok(())
}
