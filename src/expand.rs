//! Turns solver output into user-facing step sequences.

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::astar::{self, SearchNode};
use crate::backtrack;
use crate::board::{Board, N};
use crate::step::{Step, StepKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Algorithm {
    #[default]
    AStar,
    Backtracking,
}

impl Algorithm {
    pub fn label(self) -> &'static str {
        match self {
            Self::AStar => "A* Search",
            Self::Backtracking => "Backtracking",
        }
    }
}

/// Coarse shows committed moves only; fine also shows every candidate tried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Granularity {
    #[default]
    Coarse,
    Fine,
}

/// Rows whose value differs between consecutive path states.
fn changed_rows<'a>(prev: &'a Board, cur: &'a Board) -> impl Iterator<Item = usize> + 'a {
    (0..N).filter(move |&row| prev.get(row) != cur.get(row))
}

/// Path walk shared by both A* views. `commit` is called for every changed
/// row with the displayed board before the row is revealed.
fn walk_path(
    path: &[SearchNode],
    mut commit: impl FnMut(&mut Vec<Step>, &Board, &SearchNode, usize),
) -> Vec<Step> {
    let Some(root) = path.first() else {
        return Vec::new();
    };
    let mut shown = root.state;
    let mut out = vec![Step::new(StepKind::Start, shown, root.h)];
    for pair in path.windows(2) {
        let (prev, cur) = (&pair[0], &pair[1]);
        for row in changed_rows(&prev.state, &cur.state) {
            commit(&mut out, &shown, cur, row);
            if let Some(col) = cur.state.get(row) {
                shown.set(row, col);
            }
        }
    }
    out.push(Step::done(shown));
    out
}

/// A*, one `move` per committed row.
pub fn astar_coarse(start: &Board) -> Vec<Step> {
    let outcome = astar::solve(start);
    if !outcome.is_solved() {
        return vec![Step::error(*start)];
    }
    walk_path(&outcome.path, |out, shown, node, row| {
        let col = node.state.get(row).unwrap_or_default();
        out.push(Step::at(StepKind::Move, shown.with(row, col), row, col).with_h(node.h));
    })
}

/// A*, sweeping every candidate column of a row (`discover`) before the
/// chosen one is committed (`expand`).
pub fn astar_fine(start: &Board) -> Vec<Step> {
    let outcome = astar::solve(start);
    if !outcome.is_solved() {
        return vec![Step::error(*start)];
    }
    walk_path(&outcome.path, |out, shown, node, row| {
        for col in 0..N {
            out.push(
                Step::at(StepKind::Discover, shown.with(row, col), row, col)
                    .with_h(node.h)
                    .with_cost(node.g, node.f()),
            );
        }
        let target = node.state.get(row).unwrap_or_default();
        out.push(
            Step::at(StepKind::Expand, shown.with(row, target), row, target)
                .with_h(node.h)
                .with_cost(node.g, node.f()),
        );
    })
}

/// Backtracking, every try/place/conflict/backtrack.
pub fn backtracking_verbose(start: &Board) -> Vec<Step> {
    backtrack::trace(start)
}

/// Backtracking without the `try`/`conflict` noise.
pub fn backtracking_compact(start: &Board) -> Vec<Step> {
    compact(backtrack::trace(start))
}

/// Keep only start, place, backtrack, done and error steps.
pub fn compact(steps: Vec<Step>) -> Vec<Step> {
    steps
        .into_iter()
        .filter(|s| s.kind.is_milestone())
        .collect()
}

/// The single entry point for the UI: deterministic for a given board,
/// algorithm and granularity.
pub fn solve(board: &Board, algorithm: Algorithm, granularity: Granularity) -> Vec<Step> {
    let steps = match (algorithm, granularity) {
        (Algorithm::AStar, Granularity::Coarse) => astar_coarse(board),
        (Algorithm::AStar, Granularity::Fine) => astar_fine(board),
        (Algorithm::Backtracking, Granularity::Coarse) => backtracking_compact(board),
        (Algorithm::Backtracking, Granularity::Fine) => backtracking_verbose(board),
    };
    match steps.last() {
        Some(last) if last.kind == StepKind::Error => {
            warn!("{algorithm:?}: no completion for {board}");
        }
        _ => info!(
            "{algorithm:?}/{granularity:?}: {} steps from {board}",
            steps.len()
        ),
    }
    steps
}
