//! Least-cost routes through a cost grid with a limit on straight runs.
//!
//! Moving into a cell costs that cell's value. A route may never reverse,
//! must turn after at most `max` straight steps and may only turn (or stop)
//! after at least `min` straight steps.

use crate::utils::error::PuzzleError;
use crate::utils::grid::{Axis, Direction, Grid};
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};

/// Bounds on consecutive steps in one direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunLimits {
    min: usize,
    max: usize,
}

impl RunLimits {
    /// Both limits must be positive and `min <= max`.
    pub fn new(min: usize, max: usize) -> Result<Self, PuzzleError> {
        if min == 0 || max == 0 || min > max {
            return Err(PuzzleError::InvalidRunLimits { min, max });
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> usize {
        self.min
    }

    pub fn max(&self) -> usize {
        self.max
    }
}

impl Default for RunLimits {
    fn default() -> Self {
        Self { min: 1, max: 3 }
    }
}

/// How much of the heading goes into the visited-set key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StateKey {
    /// Only horizontal or vertical. Smaller state space, but two opposite
    /// headings share a slot, so the result may exceed the true minimum.
    Axis,
    /// The exact heading. Always finds the minimum.
    #[default]
    Heading,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Bearing {
    Heading(Direction),
    Axis(Axis),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct Seen {
    index: usize,
    bearing: Option<Bearing>,
    run: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Frontier {
    cost: u32,
    index: usize,
    heading: Option<Direction>,
    run: usize,
}

impl Frontier {
    fn seen(&self, key: StateKey) -> Seen {
        let bearing = self.heading.map(|heading| match key {
            StateKey::Heading => Bearing::Heading(heading),
            StateKey::Axis => Bearing::Axis(heading.axis()),
        });
        Seen {
            index: self.index,
            bearing,
            run: self.run,
        }
    }
}

impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap (cheapest first)
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| self.index.cmp(&other.index))
            .then_with(|| self.run.cmp(&other.run))
            .then_with(|| self.heading.cmp(&other.heading))
    }
}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Cheapest route from the top-left cell to the bottom-right cell.
pub fn least_cost(grid: &Grid<u8>, limits: RunLimits, key: StateKey) -> Option<u32> {
    between(grid, 0, grid.len() - 1, limits, key)
}

/// Cheapest route from `from` to `to`, or `None` if no route obeys `limits`.
///
/// The cost of the starting cell is not counted. Starting on the destination
/// costs nothing.
pub fn between(
    grid: &Grid<u8>,
    from: usize,
    to: usize,
    limits: RunLimits,
    key: StateKey,
) -> Option<u32> {
    if from >= grid.len() || to >= grid.len() {
        return None;
    }

    let mut queue = BinaryHeap::new();
    let mut visited = HashSet::new();
    queue.push(Frontier {
        cost: 0,
        index: from,
        heading: None,
        run: 0,
    });

    while let Some(state) = queue.pop() {
        if !visited.insert(state.seen(key)) {
            continue;
        }
        if state.index == to && (state.heading.is_none() || state.run >= limits.min) {
            return Some(state.cost);
        }

        for direction in Direction::ALL {
            let straight = state.heading == Some(direction);
            let next_run = match state.heading {
                None => 1,
                Some(heading) if heading.opposite() == direction => continue,
                Some(_) if straight && state.run >= limits.max => continue,
                Some(_) if !straight && state.run < limits.min => continue,
                Some(_) if straight => state.run + 1,
                Some(_) => 1,
            };
            let Some(index) = grid.neighbor(state.index, direction) else {
                continue;
            };

            let next = Frontier {
                cost: state.cost + u32::from(grid[index]),
                index,
                heading: Some(direction),
                run: next_run,
            };
            if !visited.contains(&next.seen(key)) {
                queue.push(next);
            }
        }
    }

    None
}
