//! Attack counting over a board snapshot.

use std::collections::BTreeSet;

use crate::board::{Board, N};

fn attacks(r1: usize, c1: usize, r2: usize, c2: usize) -> bool {
    c1 == c2 || r1.abs_diff(r2) == c1.abs_diff(c2)
}

/// Number of unordered pairs of queens sharing a column or a diagonal.
/// Empty rows take no part in any pair.
pub fn attacking_pairs(board: &Board) -> u32 {
    let mut pairs = 0;
    for r1 in 0..N {
        let Some(c1) = board.get(r1) else { continue };
        for r2 in r1 + 1..N {
            let Some(c2) = board.get(r2) else { continue };
            if attacks(r1, c1, r2, c2) {
                pairs += 1;
            }
        }
    }
    pairs
}

/// Whether a queen at `(row, col)` is attacked by no queen on any other row.
///
/// `None` (an empty cell) is never safe. Whatever currently sits on `row`
/// itself is ignored.
pub fn is_safe(board: &Board, row: usize, col: Option<usize>) -> bool {
    let Some(col) = col else { return false };
    board
        .occupied()
        .filter(|&(r, _)| r != row)
        .all(|(r, c)| !attacks(row, col, r, c))
}

/// Rows whose queen takes part in at least one attacking pair.
pub fn conflict_rows(board: &Board) -> BTreeSet<usize> {
    let mut rows = BTreeSet::new();
    for r1 in 0..N {
        let Some(c1) = board.get(r1) else { continue };
        for r2 in r1 + 1..N {
            let Some(c2) = board.get(r2) else { continue };
            if attacks(r1, c1, r2, c2) {
                rows.insert(r1);
                rows.insert(r2);
            }
        }
    }
    rows
}

/// Outcome of checking a hand-placed board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Incomplete { missing: usize },
    Solved,
    Conflicts { pairs: u32, rows: BTreeSet<usize> },
}

impl Verdict {
    pub fn message(&self) -> String {
        match self {
            Self::Incomplete { missing } => {
                format!("Place one queen in every row first. Missing rows: {missing}.")
            }
            Self::Solved => "Nice, no queens attack each other!".to_owned(),
            Self::Conflicts { pairs, .. } => format!(
                "{pairs} attacking pair(s) detected. Conflicting rows are highlighted."
            ),
        }
    }

    /// Rows to outline on the board.
    pub fn highlighted_rows(&self) -> BTreeSet<usize> {
        match self {
            Self::Conflicts { rows, .. } => rows.clone(),
            _ => BTreeSet::new(),
        }
    }
}

/// Edit-mode "check answer".
pub fn check_answer(board: &Board) -> Verdict {
    let missing = N - board.placed();
    if missing > 0 {
        return Verdict::Incomplete { missing };
    }
    match attacking_pairs(board) {
        0 => Verdict::Solved,
        pairs => Verdict::Conflicts {
            pairs,
            rows: conflict_rows(board),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(cols: [i8; N]) -> Board {
        Board::from_columns(&cols).unwrap()
    }

    #[test]
    fn empty_board_has_no_pairs() {
        assert_eq!(attacking_pairs(&Board::empty()), 0);
        assert!(conflict_rows(&Board::empty()).is_empty());
    }

    #[test]
    fn column_and_diagonal_pairs_are_counted_once() {
        // rows 0,1 share column 3
        assert_eq!(attacking_pairs(&board([3, 3, -1, -1, -1, -1, -1, -1])), 1);
        // rows 0,2 on a diagonal, row 1 unrelated
        assert_eq!(attacking_pairs(&board([0, 5, 2, -1, -1, -1, -1, -1])), 1);
        // all on the main diagonal: C(8,2)
        assert_eq!(attacking_pairs(&board([0, 1, 2, 3, 4, 5, 6, 7])), 28);
        // all in one column
        assert_eq!(attacking_pairs(&board([4; N])), 28);
    }

    #[test]
    fn known_solution_is_conflict_free() {
        let b = board([0, 4, 7, 5, 2, 6, 1, 3]);
        assert_eq!(attacking_pairs(&b), 0);
        assert!(conflict_rows(&b).is_empty());
        assert_eq!(check_answer(&b), Verdict::Solved);
    }

    #[test]
    fn is_safe_ignores_own_row_and_empty_cells() {
        let b = board([0, -1, -1, -1, -1, -1, -1, -1]);
        assert!(!is_safe(&b, 1, Some(0)));
        assert!(!is_safe(&b, 1, Some(1)));
        assert!(is_safe(&b, 1, Some(2)));
        // row 0's own queen does not attack itself
        assert!(is_safe(&b, 0, Some(0)));
        assert!(!is_safe(&b, 3, None));
    }

    #[test]
    fn conflict_rows_lists_both_ends() {
        let b = board([3, 3, -1, -1, -1, 0, -1, -1]);
        assert_eq!(conflict_rows(&b), BTreeSet::from([0, 1]));
    }

    #[test]
    fn check_answer_reports_missing_rows_first() {
        let b = board([3, 3, -1, -1, -1, -1, -1, -1]);
        assert_eq!(check_answer(&b), Verdict::Incomplete { missing: 6 });

        let clash = board([0, 1, 2, 3, 4, 5, 6, 7]);
        let verdict = check_answer(&clash);
        assert_eq!(verdict.highlighted_rows().len(), N);
        assert!(verdict.message().starts_with("28 attacking pair(s)"));
    }
}
