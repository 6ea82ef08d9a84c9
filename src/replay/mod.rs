//! Trace recording and replay.
//!
//! A run can be recorded as NDJSON, one [`TraceRecord`] per line, and later
//! checked against a fresh simulation of the same input. The check catches
//! recordings made by an older automaton or edited by hand.
//!
//! ## Workflow
//!
//! 1. Simulate an address and record it with [`TraceEmitter`]
//! 2. Keep the `.ndjson` file next to rendered frames or test fixtures
//! 3. Run [`replay_file`] to confirm the recording still matches
//!
//! # Example
//!
//! ```no_run
//! use email_dfa::{simulate, replay_file, TraceEmitter};
//! use std::path::Path;
//!
//! let input = "ada@example.org";
//! let run = simulate(input);
//!
//! let mut emitter = TraceEmitter::new(Path::new("trace.ndjson"))?;
//! emitter.emit_run(input, &run)?;
//! emitter.finish()?;
//!
//! replay_file(input, Path::new("trace.ndjson"))?;
//! # Ok::<(), email_dfa::Error>(())
//! ```

pub mod emitter;
pub mod replayer;

pub use emitter::TraceEmitter;
pub use replayer::{load_records, parse_records, replay_file, replay_records, replay_trace_str};

use crate::simulate::Run;
use crate::state::State;
use serde::{Deserialize, Serialize};

/// One trace entry.
///
/// `symbol` is the character consumed to reach `state`. It is `None` for
/// `Start`, for the synthetic `Accept`, and for the `Error` recorded for
/// empty input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceRecord {
    pub step: usize,
    pub symbol: Option<char>,
    pub state: State,
}

impl TraceRecord {
    /// Pair each state of `run` with the character of `input` that produced it.
    ///
    /// `run` must come from simulating `input`.
    pub fn from_run(input: &str, run: &Run) -> Vec<TraceRecord> {
        let mut chars = input.chars();
        run.trace
            .iter()
            .enumerate()
            .map(|(step, &state)| {
                let symbol = if step == 0 || state == State::Accept {
                    None
                } else {
                    chars.next()
                };
                TraceRecord {
                    step,
                    symbol,
                    state,
                }
            })
            .collect()
    }
}
