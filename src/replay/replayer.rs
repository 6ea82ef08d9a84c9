//! Replays recorded traces against a fresh simulation.

use super::TraceRecord;
use crate::error::{Error, ReplayError};
use crate::simulate::simulate;
use similar::{ChangeTag, TextDiff};
use std::path::Path;
use tracing::{debug, info};

/// Check recorded entries against a fresh simulation of `input`.
///
/// Entries are compared step by step; the first differing state or symbol
/// fails with a unified diff of the recorded and simulated traces.
pub fn replay_records(input: &str, recorded: &[TraceRecord]) -> Result<(), Error> {
    if recorded.is_empty() {
        return Err(ReplayError::EmptyTrace.into());
    }

    let run = simulate(input);
    let simulated = TraceRecord::from_run(input, &run);

    debug!(
        recorded = recorded.len(),
        simulated = simulated.len(),
        "Replaying trace"
    );

    for (rec, sim) in recorded.iter().zip(&simulated) {
        if rec.state != sim.state {
            return Err(ReplayError::StateMismatch {
                step: sim.step,
                recorded: rec.state.label(),
                simulated: sim.state.label(),
                diff: trace_diff(recorded, &simulated),
            }
            .into());
        }
        if rec.symbol != sim.symbol {
            return Err(ReplayError::SymbolMismatch {
                step: sim.step,
                recorded: rec.symbol,
                simulated: sim.symbol,
            }
            .into());
        }
    }

    if recorded.len() != simulated.len() {
        return Err(ReplayError::LengthMismatch {
            recorded: recorded.len(),
            simulated: simulated.len(),
            diff: trace_diff(recorded, &simulated),
        }
        .into());
    }

    info!(steps = recorded.len(), "Trace replay successful");
    Ok(())
}

/// Replay a trace held in an NDJSON string.
///
/// Convenience function for testing with inline trace data.
pub fn replay_trace_str(input: &str, ndjson: &str) -> Result<(), Error> {
    let records = parse_records(ndjson)?;
    replay_records(input, &records)
}

/// Replay a trace recorded to an NDJSON file.
pub fn replay_file(input: &str, path: &Path) -> Result<(), Error> {
    let records = load_records(path)?;
    replay_records(input, &records)
}

/// Read trace records from an NDJSON file.
pub fn load_records(path: &Path) -> Result<Vec<TraceRecord>, Error> {
    if !path.is_file() {
        return Err(ReplayError::TraceFileNotFound(path.to_path_buf()).into());
    }
    let content = std::fs::read_to_string(path).map_err(ReplayError::Io)?;
    let records = parse_records(&content)?;
    debug!(path = %path.display(), records = records.len(), "Loaded trace");
    Ok(records)
}

/// Parse NDJSON trace records, skipping blank lines.
///
/// Steps must count up from 0 in file order.
pub fn parse_records(content: &str) -> Result<Vec<TraceRecord>, ReplayError> {
    let mut records = Vec::new();

    for (i, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let line_num = i + 1;

        let record: TraceRecord =
            serde_json::from_str(line).map_err(|e| ReplayError::InvalidJson {
                line: line_num,
                reason: e.to_string(),
            })?;

        if record.step != records.len() {
            return Err(ReplayError::StepOutOfOrder {
                line: line_num,
                expected: records.len(),
                found: record.step,
            });
        }

        records.push(record);
    }

    if records.is_empty() {
        return Err(ReplayError::EmptyTrace);
    }

    Ok(records)
}

fn trace_diff(recorded: &[TraceRecord], simulated: &[TraceRecord]) -> String {
    unified_diff(&render_lines(recorded), &render_lines(simulated))
}

fn render_lines(records: &[TraceRecord]) -> String {
    let mut out = String::new();
    for record in records {
        let symbol = record
            .symbol
            .map_or_else(|| "-".to_string(), |c| format!("{c:?}"));
        out.push_str(&format!("{:>3} {:<6} {}\n", record.step, symbol, record.state));
    }
    out
}

/// Produce a unified diff between two line-oriented strings.
fn unified_diff(left: &str, right: &str) -> String {
    let diff = TextDiff::from_lines(left, right);
    let mut output = String::from("--- recorded\n+++ simulated\n");

    for change in diff.iter_all_changes() {
        let sign = match change.tag() {
            ChangeTag::Delete => "-",
            ChangeTag::Insert => "+",
            ChangeTag::Equal => " ",
        };
        output.push_str(sign);
        output.push_str(change.value());
        if !change.value().ends_with('\n') {
            output.push('\n');
        }
    }

    output
}
