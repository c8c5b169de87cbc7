//! Eight-queens search engine with replayable traces.
//!
//! Two solvers complete a partially filled 8×8 board while keeping the
//! queens already on it:
//!
//! - [`astar`]: best-first search over row-by-row placements, `f = g + h`
//!   with `h` the number of attacking pairs.
//! - [`backtrack`]: depth-first constructive search that records every try,
//!   placement, conflict and backtrack.
//!
//! [`solve`] turns either into a sequence of [`Step`]s at coarse or fine
//! granularity, and [`Playback`] walks such a sequence with a cancellable
//! auto-advance. A board with no completion yields a single
//! [`StepKind::Error`] step rather than an `Err`.

pub mod astar;
pub mod backtrack;
pub mod board;
pub mod conflict;
pub mod error;
pub mod expand;
pub mod export;
pub mod playback;
pub mod settings;
pub mod step;

pub use board::{Board, EMPTY, N};
pub use conflict::{attacking_pairs, check_answer, conflict_rows, is_safe, Verdict};
pub use error::{BoardError, ExportError};
pub use expand::{solve, Algorithm, Granularity};
pub use playback::Playback;
pub use settings::Settings;
pub use step::{Step, StepKind};
