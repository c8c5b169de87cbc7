//! CSV dump of a step trace.

use std::io;

use log::info;

use crate::error::ExportError;
use crate::expand::Algorithm;
use crate::step::Step;

pub const HEADER: [&str; 8] = ["step", "kind", "row", "col", "h", "g", "f", "state"];

fn opt(v: Option<u32>) -> String {
    v.map(|v| v.to_string()).unwrap_or_default()
}

/// Write one record per step, 1-based, under [`HEADER`].
pub fn write_trace_csv<W: io::Write>(steps: &[Step], writer: W) -> Result<(), ExportError> {
    if steps.is_empty() {
        return Err(ExportError::Empty);
    }
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(HEADER)?;
    for (i, step) in steps.iter().enumerate() {
        wtr.write_record([
            (i + 1).to_string(),
            step.kind.label().to_lowercase(),
            step.row.to_string(),
            step.col.to_string(),
            step.h.to_string(),
            opt(step.g),
            opt(step.f),
            step.state.to_string(),
        ])?;
    }
    wtr.flush()?;
    info!("exported {} steps", steps.len());
    Ok(())
}

/// The whole trace as a CSV string.
pub fn trace_csv(steps: &[Step]) -> Result<String, ExportError> {
    let mut buf = Vec::new();
    write_trace_csv(steps, &mut buf)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Suggested file name for a trace export.
pub fn file_name(algorithm: Algorithm) -> &'static str {
    match algorithm {
        Algorithm::AStar => "queens_astar_trace.csv",
        Algorithm::Backtracking => "queens_backtracking_trace.csv",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;
    use crate::step::StepKind;

    #[test]
    fn writes_header_and_one_row_per_step() {
        let steps = vec![
            Step::new(StepKind::Start, Board::empty(), 0),
            Step::at(StepKind::Expand, Board::empty().with(0, 0), 0, 0).with_cost(1, 1),
        ];
        let csv = trace_csv(&steps).unwrap();
        let lines: Vec<_> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "step,kind,row,col,h,g,f,state");
        assert_eq!(
            lines[1],
            "1,start,-1,-1,0,,,\"[-1, -1, -1, -1, -1, -1, -1, -1]\""
        );
        assert!(lines[2].starts_with("2,expand,0,0,0,1,1,"));
    }

    #[test]
    fn empty_trace_is_rejected() {
        assert!(matches!(trace_csv(&[]), Err(ExportError::Empty)));
    }
}
