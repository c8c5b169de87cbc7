//! Depth-first constructive search that records every attempt.
//!
//! The solver owns one working board that it mutates and restores while
//! recursing; each emitted [`Step`] takes its own copy.

use log::debug;

use crate::board::{Board, N};
use crate::conflict::{attacking_pairs, is_safe};
use crate::step::{Step, StepKind};

struct Backtracker {
    fixed: Board,
    board: Board,
    steps: Vec<Step>,
}

impl Backtracker {
    fn new(fixed: Board) -> Self {
        Self {
            fixed,
            board: fixed,
            steps: Vec::new(),
        }
    }

    fn emit(&mut self, kind: StepKind, row: usize, col: usize) {
        self.steps.push(Step::at(kind, self.board, row, col));
    }

    /// First fixed queen already attacked by another fixed queen.
    fn first_unsafe_fixed(&self) -> Option<(usize, usize)> {
        self.fixed
            .occupied()
            .find(|&(row, col)| !is_safe(&self.fixed, row, Some(col)))
    }

    /// Fill every empty row at or after `from`. Returns `true` once the board
    /// is complete; callers then unwind without undoing their placement.
    fn place_from(&mut self, from: usize) -> bool {
        let Some(row) = self.board.first_empty_row_from(from) else {
            self.steps.push(Step::done(self.board));
            return true;
        };

        for col in 0..N {
            if self.fixed.get(row).is_some_and(|fixed| fixed != col) {
                continue;
            }
            self.emit(StepKind::Try, row, col);
            if is_safe(&self.board, row, Some(col)) {
                self.board.set(row, col);
                self.emit(StepKind::Place, row, col);
                if self.place_from(row + 1) {
                    return true;
                }
                self.board.clear(row);
                self.emit(StepKind::Backtrack, row, col);
            } else {
                self.emit(StepKind::Conflict, row, col);
            }
        }
        false
    }

    fn run(mut self) -> Vec<Step> {
        if let Some((row, col)) = self.first_unsafe_fixed() {
            debug!("backtracking: fixed queen at ({row}, {col}) is attacked");
            self.emit(StepKind::Error, row, col);
            return self.steps;
        }

        self.steps.push(Step::new(
            StepKind::Start,
            self.board,
            attacking_pairs(&self.board),
        ));
        let solved = self.place_from(0);
        debug!(
            "backtracking: {} after {} steps",
            if solved { "solved" } else { "exhausted" },
            self.steps.len()
        );
        self.steps
    }
}

/// Full try/place/conflict/backtrack trace for completing `start`.
///
/// A fixed queen that is already attacked produces a single
/// [`StepKind::Error`] step and no search.
pub fn trace(start: &Board) -> Vec<Step> {
    Backtracker::new(*start).run()
}
