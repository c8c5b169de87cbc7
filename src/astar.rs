//! A* over partial placements, one row filled per expansion.
//!
//! Nodes live in an arena and point at their parent by [`NodeId`]; the arena
//! is dropped when the solve returns. The open set is ordered by
//! `(f, insertion order)`, so among nodes of equal `f` the one inserted first
//! is expanded first.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

use log::debug;

use crate::board::{Board, N};
use crate::conflict::{attacking_pairs, is_safe};

/// Index of a node in the solve's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

/// Immutable snapshot of one search state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchNode {
    pub state: Board,
    /// Queens placed so far, fixed ones included.
    pub g: u32,
    /// Attacking pairs in `state`.
    pub h: u32,
    pub parent: Option<NodeId>,
}

impl SearchNode {
    pub fn f(&self) -> u32 {
        self.g + self.h
    }

    fn is_goal(&self) -> bool {
        self.state.is_full() && self.h == 0
    }
}

/// Frontier ordering key: lower `f` first, then older insertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct OpenKey {
    f: u32,
    order: u64,
    id: NodeId,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes taken off the open set and expanded.
    pub expanded: usize,
    /// Safe children formed.
    pub generated: usize,
    /// Children dropped because an equal-or-better `f` was already seen.
    pub pruned: usize,
    /// Open entries skipped on pop because a better `f` arrived later.
    pub stale: usize,
    pub max_open: usize,
}

/// Result of one A* run. An empty `path` means no completion exists for the
/// given fixed queens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AStarOutcome {
    pub path: Vec<SearchNode>,
    pub stats: SearchStats,
}

impl AStarOutcome {
    pub fn is_solved(&self) -> bool {
        !self.path.is_empty()
    }

    /// Board of every node on the path, root first.
    pub fn states(&self) -> Vec<Board> {
        self.path.iter().map(|n| n.state).collect()
    }
}

struct Search {
    fixed: Board,
    arena: Vec<SearchNode>,
    open: BinaryHeap<Reverse<OpenKey>>,
    seen: HashMap<Board, u32>,
    next_order: u64,
    stats: SearchStats,
}

impl Search {
    fn new(fixed: Board) -> Self {
        Self {
            fixed,
            arena: Vec::new(),
            open: BinaryHeap::new(),
            seen: HashMap::new(),
            next_order: 0,
            stats: SearchStats::default(),
        }
    }

    fn push(&mut self, node: SearchNode) {
        let id = NodeId(self.arena.len());
        let f = node.f();
        self.seen.insert(node.state, f);
        self.arena.push(node);
        self.open.push(Reverse(OpenKey {
            f,
            order: self.next_order,
            id,
        }));
        self.next_order += 1;
        self.stats.max_open = self.stats.max_open.max(self.open.len());
    }

    fn expand(&mut self, id: NodeId) {
        let node = self.arena[id.0];
        let Some(row) = node.state.first_empty_row_from(0) else {
            return;
        };
        self.stats.expanded += 1;
        for col in 0..N {
            if self.fixed.get(row).is_some_and(|fixed| fixed != col) {
                continue;
            }
            let state = node.state.with(row, col);
            if !is_safe(&state, row, Some(col)) {
                continue;
            }
            self.stats.generated += 1;
            let child = SearchNode {
                state,
                g: node.g + 1,
                h: attacking_pairs(&state),
                parent: Some(id),
            };
            if self.seen.get(&state).is_some_and(|&best| best <= child.f()) {
                self.stats.pruned += 1;
                continue;
            }
            self.push(child);
        }
    }

    fn path_to(&self, goal: NodeId) -> Vec<SearchNode> {
        let mut path = Vec::new();
        let mut cursor = Some(goal);
        while let Some(id) = cursor {
            let node = self.arena[id.0];
            path.push(node);
            cursor = node.parent;
        }
        path.reverse();
        path
    }

    fn run(mut self) -> AStarOutcome {
        let root = SearchNode {
            state: self.fixed,
            g: self.fixed.placed() as u32,
            h: attacking_pairs(&self.fixed),
            parent: None,
        };
        self.push(root);

        while let Some(Reverse(key)) = self.open.pop() {
            let node = self.arena[key.id.0];
            if self.seen.get(&node.state).is_some_and(|&best| best < key.f) {
                self.stats.stale += 1;
                continue;
            }
            if node.is_goal() {
                let path = self.path_to(key.id);
                debug!(
                    "a*: goal {} at g={} ({:?}, {} nodes)",
                    node.state,
                    node.g,
                    self.stats,
                    self.arena.len()
                );
                return AStarOutcome {
                    path,
                    stats: self.stats,
                };
            }
            self.expand(key.id);
        }

        debug!(
            "a*: open set exhausted from {} ({:?})",
            self.fixed, self.stats
        );
        AStarOutcome {
            path: Vec::new(),
            stats: self.stats,
        }
    }
}

/// Search for a conflict-free completion of `start`, keeping its queens.
pub fn solve(start: &Board) -> AStarOutcome {
    Search::new(*start).run()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(cols: [i8; N]) -> Board {
        Board::from_columns(&cols).unwrap()
    }

    #[test]
    fn empty_board_reaches_first_solution_in_row_order() {
        let outcome = solve(&Board::empty());
        assert_eq!(outcome.path.len(), N + 1);
        let goal = outcome.path.last().unwrap();
        assert_eq!(goal.state, board([0, 4, 7, 5, 2, 6, 1, 3]));
        assert_eq!(goal.g, N as u32);
        assert_eq!(goal.h, 0);
        assert_eq!(outcome.path[0].state, Board::empty());
        assert_eq!(outcome.path[0].parent, None);
    }

    #[test]
    fn path_fills_one_row_per_step() {
        let outcome = solve(&Board::empty());
        for pair in outcome.path.windows(2) {
            let changed = (0..N)
                .filter(|&r| pair[0].state.get(r) != pair[1].state.get(r))
                .count();
            assert_eq!(changed, 1);
            assert_eq!(pair[1].g, pair[0].g + 1);
        }
    }

    #[test]
    fn fixed_queens_survive_and_count_towards_g() {
        let start = board([-1, -1, -1, 0, -1, -1, -1, -1]);
        let outcome = solve(&start);
        assert!(outcome.is_solved());
        assert_eq!(outcome.path[0].g, 1);
        for node in &outcome.path {
            assert_eq!(node.state.get(3), Some(0));
        }
        let goal = outcome.path.last().unwrap().state;
        assert!(goal.is_full());
        assert_eq!(attacking_pairs(&goal), 0);
    }

    #[test]
    fn solved_input_is_its_own_path() {
        let start = board([0, 4, 7, 5, 2, 6, 1, 3]);
        let outcome = solve(&start);
        assert_eq!(outcome.states(), vec![start]);
        assert_eq!(outcome.stats.expanded, 0);
    }

    #[test]
    fn attacking_fixed_queens_yield_empty_path() {
        let outcome = solve(&board([3, 3, -1, -1, -1, -1, -1, -1]));
        assert!(!outcome.is_solved());
        assert!(outcome.stats.expanded > 0);
    }

    #[test]
    fn full_board_with_conflicts_has_nothing_to_expand() {
        let outcome = solve(&board([0, 1, 2, 3, 4, 5, 6, 7]));
        assert!(outcome.path.is_empty());
        assert_eq!(outcome.stats.expanded, 0);
    }

    #[test]
    fn open_key_breaks_ties_by_insertion() {
        let early = OpenKey {
            f: 2,
            order: 0,
            id: NodeId(9),
        };
        let late = OpenKey {
            f: 2,
            order: 1,
            id: NodeId(1),
        };
        assert!(early < late);
        let cheaper = OpenKey {
            f: 1,
            order: 7,
            id: NodeId(3),
        };
        assert!(cheaper < early);
    }
}
