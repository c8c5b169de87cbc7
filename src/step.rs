//! Replayable trace records.

use serde::Serialize;

use crate::board::Board;
use crate::conflict::attacking_pairs;

/// Row/column value meaning "no cell in particular".
pub const NO_CELL: i8 = -1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StepKind {
    Start,
    Move,
    Try,
    Place,
    Conflict,
    Backtrack,
    Discover,
    Expand,
    Done,
    Error,
}

impl StepKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Start => "Start",
            Self::Move => "Move",
            Self::Try => "Try",
            Self::Place => "Place",
            Self::Conflict => "Conflict",
            Self::Backtrack => "Backtrack",
            Self::Discover => "Discover",
            Self::Expand => "Expand",
            Self::Done => "Done",
            Self::Error => "Error",
        }
    }

    /// Kinds kept by the compact backtracking view.
    pub fn is_milestone(self) -> bool {
        matches!(
            self,
            Self::Start | Self::Place | Self::Backtrack | Self::Done | Self::Error
        )
    }

    /// Kinds whose `(row, col)` names a candidate cell worth marking.
    pub fn marks_candidate(self) -> bool {
        matches!(
            self,
            Self::Try | Self::Conflict | Self::Discover | Self::Expand
        )
    }
}

/// One frozen unit of algorithm progress.
///
/// `state` is an owned copy; nothing emitted later can alter it. `g`/`f` are
/// only filled in by the fine-grained A* trace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Step {
    pub kind: StepKind,
    pub state: Board,
    pub row: i8,
    pub col: i8,
    pub h: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub g: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub f: Option<u32>,
}

impl Step {
    /// Step with no particular cell.
    pub fn new(kind: StepKind, state: Board, h: u32) -> Self {
        Self {
            kind,
            state,
            row: NO_CELL,
            col: NO_CELL,
            h,
            g: None,
            f: None,
        }
    }

    /// Step about `(row, col)`, with `h` taken from `state`.
    pub fn at(kind: StepKind, state: Board, row: usize, col: usize) -> Self {
        Self {
            row: row as i8,
            col: col as i8,
            ..Self::new(kind, state, attacking_pairs(&state))
        }
    }

    pub fn with_h(mut self, h: u32) -> Self {
        self.h = h;
        self
    }

    pub fn with_cost(mut self, g: u32, f: u32) -> Self {
        self.g = Some(g);
        self.f = Some(f);
        self
    }

    /// Terminal failure carrying the unsolved input and its attack count.
    pub fn error(state: Board) -> Self {
        Self::new(StepKind::Error, state, attacking_pairs(&state))
    }

    pub fn done(state: Board) -> Self {
        Self::new(StepKind::Done, state, 0)
    }

    pub fn active_row(&self) -> Option<usize> {
        usize::try_from(self.row).ok()
    }

    pub fn active_col(&self) -> Option<usize> {
        usize::try_from(self.col).ok()
    }

    /// `f=.. g=.. h=..` when costs are known, otherwise `h=..`.
    pub fn metrics(&self) -> String {
        match (self.g, self.f) {
            (Some(g), Some(f)) => format!("f={f} g={g} h={}", self.h),
            _ => format!("h={}", self.h),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_less_steps_report_no_active_cell() {
        let s = Step::done(Board::empty());
        assert_eq!((s.row, s.col), (NO_CELL, NO_CELL));
        assert_eq!(s.active_row(), None);
        assert_eq!(s.metrics(), "h=0");
    }

    #[test]
    fn at_derives_h_from_state() {
        let state = Board::from_columns(&[3, 3, -1, -1, -1, -1, -1, -1]).unwrap();
        let s = Step::at(StepKind::Place, state, 1, 3);
        assert_eq!(s.h, 1);
        assert_eq!(s.active_row(), Some(1));
        assert_eq!(s.active_col(), Some(3));
    }

    #[test]
    fn metrics_show_costs_when_present() {
        let s = Step::new(StepKind::Expand, Board::empty(), 0).with_cost(3, 3);
        assert_eq!(s.metrics(), "f=3 g=3 h=0");
    }

    #[test]
    fn milestones_match_the_compact_view() {
        let kept: Vec<_> = [
            StepKind::Start,
            StepKind::Try,
            StepKind::Place,
            StepKind::Conflict,
            StepKind::Backtrack,
            StepKind::Done,
            StepKind::Error,
        ]
        .into_iter()
        .filter(|k| k.is_milestone())
        .collect();
        assert_eq!(
            kept,
            [
                StepKind::Start,
                StepKind::Place,
                StepKind::Backtrack,
                StepKind::Done,
                StepKind::Error
            ]
        );
    }
}
