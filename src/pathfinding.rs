//! A* search over the wall grid.
//!
//! Ghosts only ever consume the first step of a path, so the search is rerun
//! every few ticks rather than cached.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};

use crate::components::{Cell, Direction};
use crate::level::Grid;

/// Manhattan distance, widened so it cannot overflow for any pair of cells.
pub fn manhattan(a: Cell, b: Cell) -> i64 {
    (i64::from(a.x) - i64::from(b.x)).abs() + (i64::from(a.y) - i64::from(b.y)).abs()
}

/// Open 4-connected neighbours, in left, right, up, down order.
pub fn neighbors(grid: &Grid, cell: Cell) -> Vec<Cell> {
    let mut result = Vec::with_capacity(4);
    for dir in Direction::ALL {
        let next = cell.step(dir);
        if next != cell && grid.is_open(next) {
            result.push(next);
        }
    }
    result
}

/// Frontier entry. Carries the cell it was pushed from so the path can be
/// rebuilt from whichever entry closes the cell first.
#[derive(Debug, Clone, Copy)]
struct Node {
    f_cost: i64,
    order: u64,
    g_cost: i64,
    cell: Cell,
    parent: Option<Cell>,
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.f_cost == other.f_cost && self.order == other.order
    }
}

impl Eq for Node {}

impl Ord for Node {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse for min-heap; ties go to the earlier push.
        other
            .f_cost
            .cmp(&self.f_cost)
            .then_with(|| other.order.cmp(&self.order))
    }
}

impl PartialOrd for Node {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Shortest path from `start` to `goal`, both ends included.
///
/// Returns `None` when either end is a wall (out of bounds counts) or the goal
/// cannot be reached. Identical inputs always produce the identical path.
pub fn search(grid: &Grid, start: Cell, goal: Cell) -> Option<Vec<Cell>> {
    if !grid.is_open(start) || !grid.is_open(goal) {
        return None;
    }

    let mut open_set = BinaryHeap::new();
    let mut came_from: HashMap<Cell, Cell> = HashMap::new();
    let mut closed: HashSet<Cell> = HashSet::new();
    let mut counter = 0u64;

    open_set.push(Node {
        f_cost: 0,
        order: counter,
        g_cost: 0,
        cell: start,
        parent: None,
    });

    while let Some(current) = open_set.pop() {
        if closed.contains(&current.cell) {
            continue;
        }
        if let Some(parent) = current.parent {
            came_from.insert(current.cell, parent);
        }
        if current.cell == goal {
            return Some(reconstruct(&came_from, start, goal));
        }
        closed.insert(current.cell);

        for next in neighbors(grid, current.cell) {
            if closed.contains(&next) {
                continue;
            }
            let g_cost = current.g_cost + 1;
            counter += 1;
            open_set.push(Node {
                f_cost: g_cost + manhattan(next, goal),
                order: counter,
                g_cost,
                cell: next,
                parent: Some(current.cell),
            });
        }
    }

    None
}

fn reconstruct(came_from: &HashMap<Cell, Cell>, start: Cell, goal: Cell) -> Vec<Cell> {
    let mut path = vec![goal];
    let mut curr = goal;
    while curr != start {
        match came_from.get(&curr) {
            Some(&prev) => {
                path.push(prev);
                curr = prev;
            }
            None => break,
        }
    }
    path.reverse();
    path
}

/// First move along the shortest path, or `Direction::None` when there is no
/// path or `current` already is the goal.
pub fn next_step(grid: &Grid, current: Cell, goal: Cell) -> Direction {
    match search(grid, current, goal) {
        Some(path) if path.len() >= 2 => {
            let next = path[1];
            Direction::from_delta(next.x - current.x, next.y - current.y)
        }
        _ => Direction::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TILE_SIZE;

    fn open_room() -> Grid {
        Grid::parse(
            &[
                "##########",
                "#        #",
                "#        #",
                "#        #",
                "#        #",
                "#        #",
                "#        #",
                "#        #",
                "#        #",
                "##########",
            ],
            TILE_SIZE,
        )
        .unwrap()
    }

    #[test]
    fn straight_line_path() {
        let grid = open_room();
        let path = search(&grid, Cell::new(1, 1), Cell::new(3, 1)).unwrap();
        assert_eq!(path, vec![Cell::new(1, 1), Cell::new(2, 1), Cell::new(3, 1)]);
    }

    #[test]
    fn start_equals_goal() {
        let grid = open_room();
        let path = search(&grid, Cell::new(1, 1), Cell::new(1, 1)).unwrap();
        assert_eq!(path, vec![Cell::new(1, 1)]);
        assert_eq!(next_step(&grid, Cell::new(1, 1), Cell::new(1, 1)), Direction::None);
    }

    #[test]
    fn walls_and_out_of_bounds_have_no_path() {
        let grid = open_room();
        assert!(search(&grid, Cell::new(1, 1), Cell::new(-5, -5)).is_none());
        assert!(search(&grid, Cell::new(-1, -1), Cell::new(1, 1)).is_none());
        assert!(search(&grid, Cell::new(0, 0), Cell::new(1, 1)).is_none());
    }

    #[test]
    fn enclosed_goal_is_unreachable() {
        let grid = Grid::parse(
            &[
                "#######",
                "#     #",
                "#  #  #",
                "# # # #",
                "#  #  #",
                "#     #",
                "#######",
            ],
            TILE_SIZE,
        )
        .unwrap();
        assert!(search(&grid, Cell::new(1, 1), Cell::new(3, 3)).is_none());
        assert_eq!(next_step(&grid, Cell::new(1, 1), Cell::new(3, 3)), Direction::None);
    }

    #[test]
    fn routes_around_a_wall() {
        let grid = Grid::parse(
            &[
                "#######",
                "#  #  #",
                "#  #  #",
                "#     #",
                "#######",
            ],
            TILE_SIZE,
        )
        .unwrap();
        let path = search(&grid, Cell::new(2, 1), Cell::new(4, 1)).unwrap();
        assert_eq!(path.len(), 7);
        assert_eq!(next_step(&grid, Cell::new(2, 1), Cell::new(4, 1)), Direction::Down);
    }

    #[test]
    fn ties_resolve_in_insertion_order() {
        let grid = open_room();
        // Horizontal neighbours are pushed before vertical ones, so equal-f
        // entries favour running along the row first.
        let path = search(&grid, Cell::new(1, 1), Cell::new(3, 3)).unwrap();
        assert_eq!(
            path,
            vec![
                Cell::new(1, 1),
                Cell::new(2, 1),
                Cell::new(3, 1),
                Cell::new(3, 2),
                Cell::new(3, 3),
            ]
        );
        assert_eq!(path, search(&grid, Cell::new(1, 1), Cell::new(3, 3)).unwrap());
    }
}
