//! A grid repeated infinitely in every direction.
//!
//! Positions are a [`TileId`] naming the copy plus an index into the base
//! grid. Walking off an edge moves to the neighbouring copy and wraps the
//! index to the opposite edge; cell contents always come from the base grid.

use crate::utils::grid::{Direction, Grid};

/// Which copy of the base grid a position lies in.
///
/// Counts net moves per direction; a move cancels the opposite component
/// before adding to its own, so every copy has exactly one id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TileId {
    pub up: u32,
    pub right: u32,
    pub down: u32,
    pub left: u32,
}

impl TileId {
    pub const ORIGIN: TileId = TileId {
        up: 0,
        right: 0,
        down: 0,
        left: 0,
    };

    pub fn step(self, direction: Direction) -> Self {
        let mut next = self;
        let (toward, away) = match direction {
            Direction::Up => (&mut next.up, &mut next.down),
            Direction::Right => (&mut next.right, &mut next.left),
            Direction::Down => (&mut next.down, &mut next.up),
            Direction::Left => (&mut next.left, &mut next.right),
        };
        if *away > 0 {
            *away -= 1;
        } else {
            *toward += 1;
        }
        next
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TorusPos {
    pub tile: TileId,
    pub index: usize,
}

impl TorusPos {
    pub fn origin(index: usize) -> Self {
        Self {
            tile: TileId::ORIGIN,
            index,
        }
    }
}

/// Read-only view of a grid as an infinite tiling.
#[derive(Debug, Clone, Copy)]
pub struct Torus<'g, T> {
    grid: &'g Grid<T>,
}

impl<'g, T> Torus<'g, T> {
    pub fn new(grid: &'g Grid<T>) -> Self {
        Self { grid }
    }

    pub fn grid(&self) -> &'g Grid<T> {
        self.grid
    }

    pub fn cell(&self, pos: TorusPos) -> &'g T {
        &self.grid[pos.index]
    }

    /// The position one step away; always exists.
    pub fn neighbor(&self, pos: TorusPos, direction: Direction) -> TorusPos {
        if let Some(index) = self.grid.neighbor(pos.index, direction) {
            return TorusPos {
                tile: pos.tile,
                index,
            };
        }

        let columns = self.grid.columns();
        let len = self.grid.len();
        let index = match direction {
            Direction::Up => pos.index + len - columns,
            Direction::Down => pos.index + columns - len,
            Direction::Left => pos.index + columns - 1,
            Direction::Right => pos.index + 1 - columns,
        };
        TorusPos {
            tile: pos.tile.step(direction),
            index,
        }
    }

    /// All four neighbours in up, right, down, left order.
    pub fn neighbors(&self, pos: TorusPos) -> [(Direction, TorusPos); 4] {
        Direction::ALL.map(|direction| (direction, self.neighbor(pos, direction)))
    }
}

/// Materialise the `(2 * radius + 1)²` copies of `grid` around the origin.
///
/// The origin copy sits in the middle, so base index `i` maps to the
/// unrolled cell at `(radius * columns + x, radius * rows + y)`.
pub fn unroll<T: Clone>(grid: &Grid<T>, radius: usize) -> Grid<T> {
    let copies = 2 * radius + 1;
    let columns = grid.columns() * copies;
    let cells: Vec<T> = (0..grid.rows() * copies)
        .flat_map(|y| {
            let row = y % grid.rows();
            (0..columns).map(move |x| (row, x % grid.columns()))
        })
        .map(|(row, column)| grid[row * grid.columns() + column].clone())
        .collect();

    Grid::from_parts(cells, columns)
}
