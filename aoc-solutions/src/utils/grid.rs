//! Flat rectangular grid with 4-directional neighbor lookup.
//!
//! Cells live in a single `Vec` with a fixed column count, index `i` is the
//! cell at column `i % columns` and row `i / columns`.

use crate::utils::error::PuzzleError;
use bitflags::bitflags;
use itertools::Itertools;
use std::fmt;
use std::ops::{Index, IndexMut};
use std::str::FromStr;

/// The four cardinal directions, in neighbor iteration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

/// Horizontal or vertical movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Direction {
    /// Up, right, down, left. Consumers rely on this order for tie-breaking.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Right => Direction::Left,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
        }
    }

    pub fn axis(self) -> Axis {
        match self {
            Direction::Up | Direction::Down => Axis::Vertical,
            Direction::Left | Direction::Right => Axis::Horizontal,
        }
    }
}

bitflags! {
    /// A set of directions, e.g. the openings of a pipe or the exits of a mirror.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Directions: u8 {
        const UP = 0b0001;
        const RIGHT = 0b0010;
        const DOWN = 0b0100;
        const LEFT = 0b1000;
    }
}

impl Directions {
    pub const VERTICAL: Directions = Directions::UP.union(Directions::DOWN);
    pub const HORIZONTAL: Directions = Directions::LEFT.union(Directions::RIGHT);

    /// Iterate the contained directions in up, right, down, left order.
    pub fn directions(self) -> impl Iterator<Item = Direction> {
        Direction::ALL
            .into_iter()
            .filter(move |&direction| self.contains(direction.into()))
    }
}

impl From<Direction> for Directions {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Up => Directions::UP,
            Direction::Right => Directions::RIGHT,
            Direction::Down => Directions::DOWN,
            Direction::Left => Directions::LEFT,
        }
    }
}

/// Column/row position of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Coordinate {
    pub x: usize,
    pub y: usize,
}

/// A cell type with a one-character text form.
pub trait Cell: Sized {
    fn from_char(value: char) -> Option<Self>;
    fn to_char(&self) -> char;
}

impl Cell for char {
    fn from_char(value: char) -> Option<Self> {
        Some(value)
    }

    fn to_char(&self) -> char {
        *self
    }
}

/// Declares a closed cell enum together with its [`Cell`] character table.
macro_rules! grid_cell {
    {
        $(#[$attr:meta])*
        $vis:vis enum $cell:ident { $(
            $(#[$variant_attr:meta])*
            $variant:ident = $ch:literal
        ),* $(,)? }
    } => {
        $(#[$attr])*
        $vis enum $cell { $(
            $(#[$variant_attr])*
            $variant,
        )* }

        impl $crate::utils::grid::Cell for $cell {
            fn from_char(value: char) -> Option<Self> {
                match value {
                    $( $ch => Some(Self::$variant), )*
                    _ => None,
                }
            }

            fn to_char(&self) -> char {
                match self {
                    $( Self::$variant => $ch, )*
                }
            }
        }
    };
}

pub(crate) use grid_cell;

/// One adjacent cell: where it is and what it holds.
#[derive(Debug)]
pub struct Neighbor<'g, T> {
    pub index: usize,
    pub value: &'g T,
}

impl<T> Clone for Neighbor<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Neighbor<'_, T> {}

/// The up-to-four neighbors of a cell; directions off the grid are absent.
#[derive(Debug)]
pub struct Neighbors<'g, T> {
    slots: [Option<Neighbor<'g, T>>; 4],
}

impl<'g, T> Neighbors<'g, T> {
    pub fn get(&self, direction: Direction) -> Option<Neighbor<'g, T>> {
        self.slots[direction as usize]
    }

    pub fn up(&self) -> Option<Neighbor<'g, T>> {
        self.get(Direction::Up)
    }

    pub fn right(&self) -> Option<Neighbor<'g, T>> {
        self.get(Direction::Right)
    }

    pub fn down(&self) -> Option<Neighbor<'g, T>> {
        self.get(Direction::Down)
    }

    pub fn left(&self) -> Option<Neighbor<'g, T>> {
        self.get(Direction::Left)
    }

    pub fn len(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Present neighbors as `(direction, neighbor)` in up, right, down, left order.
    pub fn iter(&self) -> impl Iterator<Item = (Direction, Neighbor<'g, T>)> + '_ {
        Direction::ALL
            .into_iter()
            .zip(self.slots.iter())
            .filter_map(|(direction, slot)| slot.map(|neighbor| (direction, neighbor)))
    }
}

type Slot<'g, T> = (Direction, Option<Neighbor<'g, T>>);

impl<'g, T> IntoIterator for Neighbors<'g, T> {
    type Item = (Direction, Neighbor<'g, T>);
    type IntoIter = std::iter::FilterMap<
        std::iter::Zip<
            std::array::IntoIter<Direction, 4>,
            std::array::IntoIter<Option<Neighbor<'g, T>>, 4>,
        >,
        fn(Slot<'g, T>) -> Option<(Direction, Neighbor<'g, T>)>,
    >;

    fn into_iter(self) -> Self::IntoIter {
        let present: fn(Slot<'g, T>) -> Option<(Direction, Neighbor<'g, T>)> =
            |(direction, slot)| slot.map(|neighbor| (direction, neighbor));
        Direction::ALL.into_iter().zip(self.slots).filter_map(present)
    }
}

/// Rectangular cell storage addressed by linear index or [`Coordinate`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid<T> {
    cells: Vec<T>,
    columns: usize,
}

impl<T> Grid<T> {
    /// Wrap a flat cell vector; its length must be a non-zero multiple of `columns`.
    pub fn new(cells: Vec<T>, columns: usize) -> Result<Self, PuzzleError> {
        if cells.is_empty() || columns == 0 {
            return Err(PuzzleError::EmptyGrid);
        }
        if cells.len() % columns != 0 {
            return Err(PuzzleError::RaggedRow {
                row: cells.len() / columns,
                expected: columns,
                found: cells.len() % columns,
            });
        }
        Ok(Self { cells, columns })
    }

    /// For cell vectors already known to be a whole number of rows.
    pub(crate) fn from_parts(cells: Vec<T>, columns: usize) -> Self {
        debug_assert!(columns > 0 && !cells.is_empty() && cells.len() % columns == 0);
        Self { cells, columns }
    }

    /// Parse newline-delimited rows, mapping each character with `cell`.
    pub fn parse_with<F>(input: &str, mut cell: F) -> Result<Self, PuzzleError>
    where
        F: FnMut(char) -> Option<T>,
    {
        let mut cells = Vec::with_capacity(input.len());
        let mut columns = 0;

        for (row, line) in input.trim().lines().enumerate() {
            let before = cells.len();
            for (column, found) in line.chars().enumerate() {
                let value = cell(found).ok_or(PuzzleError::UnknownCell { found, row, column })?;
                cells.push(value);
            }
            let width = cells.len() - before;
            if row == 0 {
                columns = width;
            } else if width != columns {
                return Err(PuzzleError::RaggedRow {
                    row,
                    expected: columns,
                    found: width,
                });
            }
        }

        Self::new(cells, columns)
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.cells.len() / self.columns
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cells(&self) -> &[T] {
        &self.cells
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.cells.get(index)
    }

    /// Row slices from top to bottom.
    pub fn row_slices(&self) -> impl Iterator<Item = &[T]> {
        self.cells.chunks(self.columns)
    }

    /// `y * columns + x`. Not bounds checked.
    pub fn coordinate_to_index(&self, coordinate: Coordinate) -> usize {
        coordinate.y * self.columns + coordinate.x
    }

    pub fn index_to_coordinate(&self, index: usize) -> Coordinate {
        Coordinate {
            x: index % self.columns,
            y: index / self.columns,
        }
    }

    /// Index one step from `index` in `direction`, if it stays on the grid.
    pub fn neighbor(&self, index: usize, direction: Direction) -> Option<usize> {
        match direction {
            Direction::Up => index.checked_sub(self.columns),
            Direction::Down => Some(index + self.columns).filter(|&next| next < self.cells.len()),
            Direction::Left => (index % self.columns > 0).then(|| index - 1),
            Direction::Right => (index % self.columns < self.columns - 1).then(|| index + 1),
        }
    }

    pub fn neighbors(&self, index: usize) -> Neighbors<'_, T> {
        let slots = Direction::ALL.map(|direction| {
            self.neighbor(index, direction).map(|next| Neighbor {
                index: next,
                value: &self.cells[next],
            })
        });
        Neighbors { slots }
    }

    /// Index of the first cell matching `predicate`.
    pub fn position<P>(&self, predicate: P) -> Option<usize>
    where
        P: FnMut(&T) -> bool,
    {
        self.cells.iter().position(predicate)
    }

    pub fn map<U, F>(&self, f: F) -> Grid<U>
    where
        F: FnMut(&T) -> U,
    {
        Grid {
            cells: self.cells.iter().map(f).collect(),
            columns: self.columns,
        }
    }

    /// Indices of the cells on the outer border, each paired with the
    /// direction pointing into the grid. Corners appear once per side.
    pub fn border_entries(&self) -> Vec<(usize, Direction)> {
        let last_row = (self.rows() - 1) * self.columns;
        let top = (0..self.columns).map(|x| (x, Direction::Down));
        let bottom = (0..self.columns).map(|x| (last_row + x, Direction::Up));
        let left = (0..self.rows()).map(|y| (y * self.columns, Direction::Right));
        let right = (0..self.rows()).map(|y| (y * self.columns + self.columns - 1, Direction::Left));
        top.chain(bottom).chain(left).chain(right).collect()
    }
}

impl<T: Clone> Grid<T> {
    /// Same grid surrounded by a one-cell border of `fill`.
    pub fn padded(&self, fill: T) -> Grid<T> {
        let columns = self.columns + 2;
        let mut cells = Vec::with_capacity(columns * (self.rows() + 2));
        cells.extend(std::iter::repeat_n(fill.clone(), columns));
        for row in self.row_slices() {
            cells.push(fill.clone());
            cells.extend_from_slice(row);
            cells.push(fill.clone());
        }
        cells.extend(std::iter::repeat_n(fill, columns));
        Grid { cells, columns }
    }
}

impl<T> Index<usize> for Grid<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.cells[index]
    }
}

impl<T> IndexMut<usize> for Grid<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.cells[index]
    }
}

impl<T: Cell> FromStr for Grid<T> {
    type Err = PuzzleError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        Self::parse_with(input, T::from_char)
    }
}

impl<T: Cell> fmt::Display for Grid<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = self
            .row_slices()
            .map(|row| row.iter().map(Cell::to_char).collect::<String>())
            .join("\n");
        f.write_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn letters() -> Grid<char> {
        "abc\ndef\nghi\njkl".parse().unwrap()
    }

    #[test]
    fn test_shape() {
        let grid = letters();
        assert_eq!(grid.columns(), 3);
        assert_eq!(grid.rows(), 4);
        assert_eq!(grid.len(), 12);
        assert_eq!(grid[4], 'e');
    }

    #[test]
    fn test_coordinates() {
        let grid = letters();
        assert_eq!(grid.index_to_coordinate(7), Coordinate { x: 1, y: 2 });
        assert_eq!(grid.coordinate_to_index(Coordinate { x: 2, y: 3 }), 11);
    }

    #[test]
    fn test_neighbors_follow_fixed_order() {
        let grid = letters();
        let neighbors: Vec<_> = grid
            .neighbors(4)
            .into_iter()
            .map(|(direction, neighbor)| (direction, *neighbor.value))
            .collect();

        assert_eq!(
            neighbors,
            vec![
                (Direction::Up, 'b'),
                (Direction::Right, 'f'),
                (Direction::Down, 'h'),
                (Direction::Left, 'd'),
            ]
        );
    }

    #[test]
    fn test_neighbors_at_borders() {
        let grid = letters();

        let corner = grid.neighbors(0);
        assert!(corner.up().is_none());
        assert!(corner.left().is_none());
        assert_eq!(corner.right().map(|n| n.index), Some(1));
        assert_eq!(corner.down().map(|n| n.index), Some(3));

        let right_edge = grid.neighbors(5);
        assert!(right_edge.right().is_none());
        assert_eq!(right_edge.len(), 3);

        let bottom_right = grid.neighbors(11);
        assert_eq!(
            bottom_right.iter().map(|(d, _)| d).collect::<Vec<_>>(),
            vec![Direction::Up, Direction::Left]
        );
    }

    #[test]
    fn test_single_column_has_no_side_neighbors() {
        let grid: Grid<char> = "a\nb\nc".parse().unwrap();
        let middle = grid.neighbors(1);
        assert_eq!(middle.len(), 2);
        assert!(middle.left().is_none());
        assert!(middle.right().is_none());
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("".parse::<Grid<char>>(), Err(PuzzleError::EmptyGrid));
        assert_eq!(
            "abc\nde\nfgh".parse::<Grid<char>>(),
            Err(PuzzleError::RaggedRow {
                row: 1,
                expected: 3,
                found: 2
            })
        );
        assert_eq!(
            Grid::parse_with("12\n3x", |c| c.to_digit(10)),
            Err(PuzzleError::UnknownCell {
                found: 'x',
                row: 1,
                column: 1
            })
        );
        assert_eq!(
            Grid::new(vec![1, 2, 3], 2),
            Err(PuzzleError::RaggedRow {
                row: 1,
                expected: 2,
                found: 1
            })
        );
    }

    #[test]
    fn test_padded() {
        let grid: Grid<char> = "ab\ncd".parse().unwrap();
        assert_eq!(grid.padded('.').to_string(), "....\n.ab.\n.cd.\n....");
    }

    #[test]
    fn test_border_entries() {
        let grid: Grid<char> = "abc\ndef".parse().unwrap();
        let entries = grid.border_entries();

        assert_eq!(entries.len(), 2 * 3 + 2 * 2);
        assert!(entries.contains(&(0, Direction::Down)));
        assert!(entries.contains(&(0, Direction::Right)));
        assert!(entries.contains(&(5, Direction::Up)));
        assert!(entries.contains(&(5, Direction::Left)));
    }

    #[test]
    fn test_directions_set() {
        let set = Directions::UP | Directions::LEFT;
        assert_eq!(
            set.directions().collect::<Vec<_>>(),
            vec![Direction::Up, Direction::Left]
        );
        assert_eq!(Directions::all().directions().count(), 4);
        assert_eq!(Direction::Left.axis(), Axis::Horizontal);
        assert_eq!(Direction::Up.opposite(), Direction::Down);
    }

    fn text_grid() -> impl Strategy<Value = String> {
        (1usize..8, 1usize..8).prop_flat_map(|(columns, rows)| {
            prop::collection::vec(prop::collection::vec(prop::sample::select(vec!['.', '#', 'S', '|']), columns), rows)
                .prop_map(|rows| {
                    rows.into_iter()
                        .map(|row| row.into_iter().collect::<String>())
                        .join("\n")
                })
        })
    }

    proptest! {
        #[test]
        fn prop_display_round_trips(text in text_grid()) {
            let grid: Grid<char> = text.parse().unwrap();
            prop_assert_eq!(grid.to_string(), text);
        }

        #[test]
        fn prop_coordinate_round_trips(columns in 1usize..20, rows in 1usize..20, seed in any::<usize>()) {
            let grid = Grid::new(vec![0u8; columns * rows], columns).unwrap();
            let coordinate = Coordinate { x: seed % columns, y: (seed / columns) % rows };
            let index = grid.coordinate_to_index(coordinate);
            prop_assert!(index < grid.len());
            prop_assert_eq!(grid.index_to_coordinate(index), coordinate);
        }

        #[test]
        fn prop_neighbor_count_matches_position(columns in 2usize..12, rows in 2usize..12, seed in any::<usize>()) {
            let grid = Grid::new(vec![0u8; columns * rows], columns).unwrap();
            let index = seed % grid.len();
            let Coordinate { x, y } = grid.index_to_coordinate(index);
            let on_vertical_edge = x == 0 || x == columns - 1;
            let on_horizontal_edge = y == 0 || y == rows - 1;

            let expected = match (on_vertical_edge, on_horizontal_edge) {
                (true, true) => 2,
                (true, false) | (false, true) => 3,
                (false, false) => 4,
            };
            prop_assert_eq!(grid.neighbors(index).len(), expected);
        }
    }
}
