use thiserror::Error;

/// Rejected raw board input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("board must have 8 rows, got {0}")]
    WrongLength(usize),

    #[error("row {row} holds column {value}, expected -1 or 0..=7")]
    OutOfRange { row: usize, value: i8 },
}

/// Failure while writing a step trace.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("nothing to export: the trace is empty")]
    Empty,
}
