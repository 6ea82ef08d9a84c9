//! email-dfa: a deterministic finite automaton for email address syntax.
//!
//! The automaton reads an address one character at a time and records every
//! state it visits, so a run can be shown step by step as well as judged.
//! It is a small teaching model of the common address shape, not an RFC 5322
//! validator: no quoted local parts, comments, IP literals or
//! internationalized names.
//!
//! The pieces:
//!
//! 1. **[`classify`]**: maps each `char` to one of a few disjoint classes.
//! 2. **[`state`]**: the finite state set. Positions inside the local part,
//!    a domain label and the top-level domain are bounded counters, so the
//!    set can be enumerated.
//! 3. **[`transition`]**: the total transition function.
//! 4. **[`simulate`](mod@simulate)**: runs the automaton and returns the trace
//!    and verdict.
//!
//! Around them, [`replay`] records runs as NDJSON and checks recordings
//! against fresh runs, and [`render`] turns traces and the automaton into
//! Graphviz DOT.
//!
//! # Quick Start
//!
//! ```
//! use email_dfa::{simulate, State};
//!
//! let run = simulate("ada@example.org");
//! assert!(run.is_accepted());
//! assert_eq!(run.trace.first(), State::Start);
//! assert_eq!(run.trace.last(), State::Accept);
//!
//! let run = simulate("ada@example.o");
//! assert!(!run.is_accepted());
//! ```
//!
//! # Accepted shape
//!
//! - local part: alphanumerics, optionally separated by single `.`, `_`, `+`
//!   or `-`; it starts and ends with an alphanumeric
//! - one `@`
//! - domain: labels of alphanumerics and inner single hyphens, separated by
//!   `.`; there is at least one dot
//! - the last label is 2 to 6 letters

#[cfg(feature = "render")]
mod builder;
pub mod classify;
pub mod error;
#[cfg(feature = "render")]
pub mod render;
#[cfg(feature = "replay")]
pub mod replay;
pub mod simulate;
pub mod state;
pub mod transition;

// Re-export core types for convenience
pub use classify::CharClass;
pub use error::{
    BuilderError, DfaResult, Error, ParseStateError, RenderError, ReplayError,
};
#[cfg(feature = "render")]
pub use render::{
    render_automaton, render_frame, render_frames, write_frames, RankDir, RenderConfig,
    RenderConfigBuilder,
};
#[cfg(feature = "replay")]
pub use replay::{
    load_records, parse_records, replay_file, replay_records, replay_trace_str, TraceEmitter,
    TraceRecord,
};
pub use simulate::{is_valid_email, simulate, simulate_batch, Rejection, Run, Trace, Verdict};
pub use state::{Depth, DomainDepth, LocalDepth, State, TldLength, TLD_MAX, TLD_MIN};
