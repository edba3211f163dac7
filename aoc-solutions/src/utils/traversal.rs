//! Breadth-first traversal over grid-like state spaces.
//!
//! A [`Walk`] describes the state space: how nodes are keyed for the visited
//! set, what happens when a node is first reached and which nodes follow it.
//! [`breadth_first`] drives a walk with a FIFO queue, so nodes are always
//! reached at their minimal depth.

use crate::utils::grid::{Direction, Directions, Grid};
use std::collections::{HashSet, VecDeque};
use std::hash::Hash;
use std::marker::PhantomData;

/// What to do with a node the first time its key is reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visit {
    /// Record it and queue its successors.
    Expand,
    /// Record it but do not look past it.
    Settle,
    /// Stop the traversal; this node is the answer.
    Goal,
}

/// A state space explored by [`breadth_first`].
pub trait Walk {
    type Node: Clone;
    type Key: Eq + Hash;

    fn key(&self, node: &Self::Node) -> Self::Key;

    /// Called once per key, in FIFO order, with the node's depth from its start.
    fn visit(&mut self, _node: &Self::Node, _depth: usize) -> Visit {
        Visit::Expand
    }

    /// Push every node reachable in one step from `node` onto `out`.
    fn successors(&self, node: &Self::Node, depth: usize, out: &mut Vec<Self::Node>);
}

/// A goal reached by [`breadth_first`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Found<N> {
    pub depth: usize,
    /// Nodes from the start up to and including the goal.
    pub path: Vec<N>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary<N> {
    /// Number of distinct keys visited, including the goal.
    pub visited: usize,
    pub found: Option<Found<N>>,
}

struct Entry<N> {
    node: N,
    depth: usize,
    parent: Option<usize>,
}

/// Run `walk` from every start node at depth 0.
///
/// A node is skipped when popped if its key was already visited, and a
/// successor is only queued while its key is unvisited.
pub fn breadth_first<W, I>(walk: &mut W, starts: I) -> Summary<W::Node>
where
    W: Walk,
    I: IntoIterator<Item = W::Node>,
{
    let mut arena: Vec<Entry<W::Node>> = starts
        .into_iter()
        .map(|node| Entry {
            node,
            depth: 0,
            parent: None,
        })
        .collect();
    let mut queue: VecDeque<usize> = (0..arena.len()).collect();
    let mut visited = HashSet::new();
    let mut next = Vec::new();

    while let Some(slot) = queue.pop_front() {
        if !visited.insert(walk.key(&arena[slot].node)) {
            continue;
        }

        let depth = arena[slot].depth;
        match walk.visit(&arena[slot].node, depth) {
            Visit::Goal => {
                return Summary {
                    visited: visited.len(),
                    found: Some(Found {
                        depth,
                        path: trace(&arena, slot),
                    }),
                };
            }
            Visit::Settle => continue,
            Visit::Expand => {}
        }

        walk.successors(&arena[slot].node, depth, &mut next);
        for node in next.drain(..) {
            if visited.contains(&walk.key(&node)) {
                continue;
            }
            arena.push(Entry {
                node,
                depth: depth + 1,
                parent: Some(slot),
            });
            queue.push_back(arena.len() - 1);
        }
    }

    Summary {
        visited: visited.len(),
        found: None,
    }
}

fn trace<N: Clone>(arena: &[Entry<N>], mut slot: usize) -> Vec<N> {
    let mut path = vec![arena[slot].node.clone()];
    while let Some(parent) = arena[slot].parent {
        path.push(arena[parent].node.clone());
        slot = parent;
    }
    path.reverse();
    path
}

/// How far a walk spread within a step budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Reach {
    /// Positions first reached within the budget.
    pub within: usize,
    /// Positions whose first-reach depth has the same parity as the budget,
    /// i.e. the positions that can be occupied after exactly `budget` steps.
    pub exact: usize,
}

/// How many positions a walk first reached at each depth, up to its budget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    first_reached: Vec<usize>,
}

impl Profile {
    pub fn budget(&self) -> usize {
        self.first_reached.len() - 1
    }

    /// Positions first reached within `steps`. Depths past the budget were
    /// never explored and count as empty.
    pub fn within(&self, steps: usize) -> usize {
        self.first_reached.iter().take(steps + 1).sum()
    }

    /// Positions that can be occupied after exactly `steps` steps.
    pub fn exact(&self, steps: usize) -> usize {
        self.first_reached
            .iter()
            .take(steps + 1)
            .skip(steps % 2)
            .step_by(2)
            .sum()
    }

    pub fn reach(&self, steps: usize) -> Reach {
        Reach {
            within: self.within(steps),
            exact: self.exact(steps),
        }
    }
}

struct Spread<N, Q, K, F> {
    key: K,
    step: F,
    first_reached: Vec<usize>,
    marker: PhantomData<fn(&N) -> Q>,
}

impl<N, Q, K, F> Walk for Spread<N, Q, K, F>
where
    N: Clone,
    Q: Eq + Hash,
    K: Fn(&N) -> Q,
    F: Fn(&N, &mut Vec<N>),
{
    type Node = N;
    type Key = Q;

    fn key(&self, node: &N) -> Q {
        (self.key)(node)
    }

    fn visit(&mut self, _node: &N, depth: usize) -> Visit {
        self.first_reached[depth] += 1;
        if depth + 1 == self.first_reached.len() {
            Visit::Settle
        } else {
            Visit::Expand
        }
    }

    fn successors(&self, node: &N, _depth: usize, out: &mut Vec<N>) {
        (self.step)(node, out)
    }
}

/// Count the positions reachable from `start` within `budget` steps.
pub fn reach<N, Q, K, F>(start: N, budget: usize, key: K, step: F) -> Reach
where
    N: Clone,
    Q: Eq + Hash,
    K: Fn(&N) -> Q,
    F: Fn(&N, &mut Vec<N>),
{
    profile(start, budget, key, step).reach(budget)
}

/// Walk `budget` steps from `start`, recording the depth each position is
/// first reached at. Any smaller budget can then be read off the result.
pub fn profile<N, Q, K, F>(start: N, budget: usize, key: K, step: F) -> Profile
where
    N: Clone,
    Q: Eq + Hash,
    K: Fn(&N) -> Q,
    F: Fn(&N, &mut Vec<N>),
{
    let mut spread = Spread {
        key,
        step,
        first_reached: vec![0; budget + 1],
        marker: PhantomData,
    };
    breadth_first(&mut spread, [start]);
    Profile {
        first_reached: spread.first_reached,
    }
}

/// Cell behavior for walks that carry a heading, such as pipes and mirrors.
pub trait Transition {
    /// Directions a walker leaves this cell in, given the heading it arrived with.
    fn exits(&self, heading: Option<Direction>) -> Directions;

    /// Whether a walker moving in `heading` may enter this cell.
    fn admits(&self, _heading: Direction) -> bool {
        true
    }
}

/// A walker on a cell, with the heading it arrived in (none for a start).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Step {
    pub index: usize,
    pub heading: Option<Direction>,
}

impl Step {
    pub fn start(index: usize) -> Self {
        Self {
            index,
            heading: None,
        }
    }
}

/// Steps leaving `step` according to the cell it stands on.
pub fn steer<'g, T: Transition>(grid: &'g Grid<T>, step: Step) -> impl Iterator<Item = Step> + 'g {
    grid[step.index]
        .exits(step.heading)
        .directions()
        .filter_map(move |direction| {
            let next = grid.neighbor(step.index, direction)?;
            grid[next].admits(direction).then_some(Step {
                index: next,
                heading: Some(direction),
            })
        })
}

struct Basin<'g, T, P> {
    grid: &'g Grid<T>,
    passable: P,
    reached: Vec<usize>,
}

impl<T, P> Walk for Basin<'_, T, P>
where
    P: Fn(&T) -> bool,
{
    type Node = usize;
    type Key = usize;

    fn key(&self, node: &usize) -> usize {
        *node
    }

    fn visit(&mut self, node: &usize, _depth: usize) -> Visit {
        self.reached.push(*node);
        Visit::Expand
    }

    fn successors(&self, node: &usize, _depth: usize, out: &mut Vec<usize>) {
        out.extend(
            self.grid
                .neighbors(*node)
                .iter()
                .filter(|(_, neighbor)| (self.passable)(neighbor.value))
                .map(|(_, neighbor)| neighbor.index),
        );
    }
}

/// Overwrite the region of passable cells connected to `start` with `fill`.
///
/// Returns the number of cells filled; zero when `start` itself is not passable.
pub fn flood_fill<T, P>(grid: &mut Grid<T>, start: usize, passable: P, fill: T) -> usize
where
    T: Clone,
    P: Fn(&T) -> bool,
{
    if !grid.get(start).is_some_and(&passable) {
        return 0;
    }

    let reached = {
        let mut basin = Basin {
            grid: &*grid,
            passable,
            reached: Vec::new(),
        };
        breadth_first(&mut basin, [start]);
        basin.reached
    };

    for &index in &reached {
        grid[index] = fill.clone();
    }
    reached.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn open_steps(grid: &Grid<char>) -> impl Fn(&usize, &mut Vec<usize>) + '_ {
        move |index, out| {
            out.extend(
                grid.neighbors(*index)
                    .iter()
                    .filter(|(_, neighbor)| *neighbor.value != '#')
                    .map(|(_, neighbor)| neighbor.index),
            )
        }
    }

    #[test]
    fn test_open_grid_parity_count() {
        let grid: Grid<char> = ".....\n.....\n.....\n.....\n.....".parse().unwrap();
        let reach = reach(12, 2, |&index| index, open_steps(&grid));

        assert_eq!(reach.exact, 9);
        assert_eq!(reach.within, 13);
    }

    #[test]
    fn test_enclosed_start_reaches_only_itself() {
        let grid: Grid<char> = "###\n#.#\n###".parse().unwrap();
        let reach = reach(4, 10, |&index| index, open_steps(&grid));

        assert_eq!(reach, Reach { within: 1, exact: 1 });
    }

    #[test]
    fn test_parity_count_is_not_monotone() {
        // plus-shaped room
        let grid: Grid<char> = "#.#\n...\n#.#".parse().unwrap();

        assert_eq!(reach(4, 1, |&i| i, open_steps(&grid)).exact, 4);
        assert_eq!(reach(4, 2, |&i| i, open_steps(&grid)).exact, 1);
    }

    struct Maze<'g> {
        grid: &'g Grid<char>,
        goal: usize,
    }

    impl Walk for Maze<'_> {
        type Node = usize;
        type Key = usize;

        fn key(&self, node: &usize) -> usize {
            *node
        }

        fn visit(&mut self, node: &usize, _depth: usize) -> Visit {
            if *node == self.goal {
                Visit::Goal
            } else {
                Visit::Expand
            }
        }

        fn successors(&self, node: &usize, _depth: usize, out: &mut Vec<usize>) {
            open_steps(self.grid)(node, out)
        }
    }

    #[test]
    fn test_goal_path_is_shortest() {
        let grid: Grid<char> = "...#\n.#.#\n.#..\n...#".parse().unwrap();
        let mut maze = Maze { grid: &grid, goal: 10 };
        let summary = breadth_first(&mut maze, [0]);

        let found = summary.found.unwrap();
        assert_eq!(found.depth, 4);
        assert_eq!(found.path, vec![0, 1, 2, 6, 10]);
    }

    #[test]
    fn test_unreachable_goal_is_not_found() {
        let grid: Grid<char> = "..#.\n..#.".parse().unwrap();
        let mut maze = Maze { grid: &grid, goal: 3 };
        let summary = breadth_first(&mut maze, [0]);

        assert_eq!(summary.found, None);
        assert_eq!(summary.visited, 4);
    }

    #[test]
    fn test_flood_fill_stops_at_walls() {
        let mut grid: Grid<char> = "..#..\n..#..\n###..".parse().unwrap();
        let filled = flood_fill(&mut grid, 0, |&c| c == '.', 'O');

        assert_eq!(filled, 4);
        assert_eq!(grid.to_string(), "OO#..\nOO#..\n###..");
        assert_eq!(flood_fill(&mut grid, 2, |&c| c == '.', 'O'), 0);
    }

    fn garden() -> impl Strategy<Value = (Grid<char>, usize)> {
        (2usize..8, 2usize..8).prop_flat_map(|(columns, rows)| {
            (
                prop::collection::vec(prop::bool::weighted(0.25), columns * rows),
                0..columns * rows,
            )
                .prop_map(move |(rocks, start)| {
                    let cells = rocks
                        .iter()
                        .enumerate()
                        .map(|(i, &rock)| if rock && i != start { '#' } else { '.' })
                        .collect();
                    (Grid::new(cells, columns).unwrap(), start)
                })
        })
    }

    #[test]
    fn test_profile_matches_separate_walks() {
        let grid: Grid<char> = "..#..\n.....\n.#.#.\n.....".parse().unwrap();
        let profile = profile(0, 9, |&i| i, open_steps(&grid));

        assert_eq!(profile.budget(), 9);
        for steps in 0..=9 {
            assert_eq!(profile.reach(steps), reach(0, steps, |&i| i, open_steps(&grid)));
        }
    }

    proptest! {
        #[test]
        fn prop_profile_agrees_with_reach((grid, start) in garden(), budget in 0usize..12, steps in 0usize..12) {
            let steps = steps.min(budget);
            let walked = profile(start, budget, |&i| i, open_steps(&grid));
            prop_assert_eq!(walked.reach(steps), reach(start, steps, |&i| i, open_steps(&grid)));
        }

        #[test]
        fn prop_reach_grows_with_budget((grid, start) in garden(), budget in 0usize..12) {
            let smaller = reach(start, budget, |&i| i, open_steps(&grid));
            let larger = reach(start, budget + 1, |&i| i, open_steps(&grid));
            let two_more = reach(start, budget + 2, |&i| i, open_steps(&grid));

            prop_assert!(smaller.within <= larger.within);
            prop_assert!(smaller.exact <= two_more.exact);
        }
    }
}
