use crate::components::{Cell, Position};
use crate::config::{GRID_ROWS, POINTS_PER_PELLET, TILE_SIZE};
use crate::error::{Error, Result};

/// `#` wall, `.` pellet, space empty floor.
pub const LEVEL_MAP: [&str; GRID_ROWS as usize] = [
    "####################",
    "#........#.........#",
    "#.###.##.#.##.####.#",
    "#.#...#....#....##.#",
    "#.#.###.##.###.###.#",
    "#..................#",
    "#.#.#.######.#.##.##",
    "#.#.#....#...#.....#",
    "#.#...##...##..###.#",
    "#.###.##.#.##......#",
    "#...#....#....####.#",
    "#.#.####.####.#....#",
    "#.#...........#.##.#",
    "#.##.###.####.#.##.#",
    "#......#.#.........#",
    "#.###.##.#.#######.#",
    "#..................#",
    "#.################.#",
    "#..................#",
    "####################",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    Empty,
    Wall,
}

/// Grid dimensions in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub width: i32,
    pub height: i32,
}

impl Bounds {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Clamps a widened coordinate pair into `[0, width-1] x [0, height-1]`.
    pub fn clamp(self, x: i64, y: i64) -> Cell {
        let max_x = i64::from(self.width.max(1)) - 1;
        let max_y = i64::from(self.height.max(1)) - 1;
        Cell::new(x.clamp(0, max_x) as i32, y.clamp(0, max_y) as i32)
    }

    pub fn contains(self, cell: Cell) -> bool {
        cell.x >= 0 && cell.y >= 0 && cell.x < self.width && cell.y < self.height
    }
}

/// Static wall map. Everything outside the bounds counts as wall.
#[derive(Debug, Clone)]
pub struct Grid {
    width: i32,
    height: i32,
    tile_size: f32,
    tiles: Vec<Tile>,
}

impl Grid {
    /// Parses an ASCII layout; every row must have the same width.
    pub fn parse(rows: &[&str], tile_size: f32) -> Result<Grid> {
        let width = rows.first().map(|r| r.chars().count()).unwrap_or(0);
        if width == 0 {
            return Err(Error::Layout("layout has no cells".into()));
        }
        if let Some((idx, row)) = rows
            .iter()
            .enumerate()
            .find(|(_, r)| r.chars().count() != width)
        {
            return Err(Error::Layout(format!(
                "row {} has {} cells, expected {}",
                idx,
                row.chars().count(),
                width
            )));
        }
        if !(tile_size > 0.0) {
            return Err(Error::Layout(format!("tile size {} is not positive", tile_size)));
        }
        Ok(Grid::build(rows, tile_size))
    }

    /// Rows are assumed to be of equal width.
    fn build(rows: &[&str], tile_size: f32) -> Grid {
        let width = rows.first().map_or(0, |r| r.chars().count());
        let height = rows.len();
        let tiles = rows
            .iter()
            .flat_map(|row| row.chars())
            .map(|ch| if ch == '#' { Tile::Wall } else { Tile::Empty })
            .collect();
        Grid {
            width: width as i32,
            height: height as i32,
            tile_size,
            tiles,
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn tile_size(&self) -> f32 {
        self.tile_size
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if !self.bounds().contains(Cell::new(x, y)) {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    pub fn tile(&self, x: i32, y: i32) -> Tile {
        self.index(x, y).map_or(Tile::Wall, |idx| self.tiles[idx])
    }

    pub fn is_wall(&self, x: i32, y: i32) -> bool {
        self.tile(x, y) == Tile::Wall
    }

    pub fn is_open(&self, cell: Cell) -> bool {
        !self.is_wall(cell.x, cell.y)
    }

    /// Pixel to cell. Truncates toward zero and saturates, so any float maps
    /// to some cell.
    pub fn cell_at(&self, pos: Position) -> Cell {
        Cell::new(
            (pos.x / self.tile_size) as i32,
            (pos.y / self.tile_size) as i32,
        )
    }

    pub fn tile_center(&self, cell: Cell) -> Position {
        Position::new(
            cell.x as f32 * self.tile_size + self.tile_size / 2.0,
            cell.y as f32 * self.tile_size + self.tile_size / 2.0,
        )
    }

    /// Bounding-square test: the entity fits when all four corners of its
    /// `radius` square land on open cells. Corners outside the inscribed
    /// circle still block.
    pub fn can_occupy(&self, x: f32, y: f32, radius: f32) -> bool {
        let left = ((x - radius) / self.tile_size) as i32;
        let right = ((x + radius) / self.tile_size) as i32;
        let top = ((y - radius) / self.tile_size) as i32;
        let bottom = ((y + radius) / self.tile_size) as i32;

        !(self.is_wall(left, top)
            || self.is_wall(right, top)
            || self.is_wall(left, bottom)
            || self.is_wall(right, bottom))
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.width, self.height)
    }

    pub fn open_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.height)
            .flat_map(move |y| (0..self.width).map(move |x| Cell::new(x, y)))
            .filter(|c| self.is_open(*c))
    }
}

/// Collectible pellets, one per `.` in the layout.
#[derive(Debug, Clone)]
pub struct PelletStore {
    width: i32,
    height: i32,
    tile_size: f32,
    initial: Vec<bool>,
    pellets: Vec<bool>,
    collected: usize,
}

impl PelletStore {
    pub fn from_layout(rows: &[&str], tile_size: f32) -> PelletStore {
        let width = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0);
        let height = rows.len();
        let mut initial = vec![false; width * height];
        for (y, row) in rows.iter().enumerate() {
            for (x, ch) in row.chars().enumerate() {
                initial[y * width + x] = ch == '.';
            }
        }
        PelletStore {
            width: width as i32,
            height: height as i32,
            tile_size,
            pellets: initial.clone(),
            initial,
            collected: 0,
        }
    }

    fn index(&self, cell: Cell) -> Option<usize> {
        if !Bounds::new(self.width, self.height).contains(cell) {
            return None;
        }
        Some(cell.y as usize * self.width as usize + cell.x as usize)
    }

    pub fn has_pellet(&self, cell: Cell) -> bool {
        self.index(cell).map_or(false, |idx| self.pellets[idx])
    }

    /// Clears the pellet under pixel `(x, y)` and returns the points earned.
    pub fn collect(&mut self, x: f32, y: f32) -> u32 {
        let cell = Cell::new((x / self.tile_size) as i32, (y / self.tile_size) as i32);
        match self.index(cell) {
            Some(idx) if self.pellets[idx] => {
                self.pellets[idx] = false;
                self.collected += 1;
                POINTS_PER_PELLET
            }
            _ => 0,
        }
    }

    pub fn total(&self) -> usize {
        self.initial.iter().filter(|p| **p).count()
    }

    pub fn remaining(&self) -> usize {
        self.total() - self.collected
    }

    pub fn reset(&mut self) {
        self.pellets.clone_from(&self.initial);
        self.collected = 0;
    }
}

#[derive(Debug, Clone)]
pub struct LevelData {
    pub grid: Grid,
    pub pellets: PelletStore,
    pub player_start: Cell,
    pub ghost_starts: [Cell; 4],
}

pub fn create_level() -> LevelData {
    LevelData {
        grid: Grid::build(&LEVEL_MAP, TILE_SIZE),
        pellets: PelletStore::from_layout(&LEVEL_MAP, TILE_SIZE),
        player_start: Cell::new(1, 1),
        ghost_starts: [
            Cell::new(8, 9),   // Leader
            Cell::new(10, 9),  // Ambusher
            Cell::new(8, 10),  // Flanker
            Cell::new(10, 10), // Fickle
        ],
    }
}
