//! Typed errors for email-dfa.
//!
//! A rejected address is not an error: it is a [`Verdict`](crate::Verdict).
//! The types here cover the surfaces around the automaton: parsing state
//! labels, replaying recorded traces, rendering and building configs.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for email-dfa operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// Error while parsing a state label.
    #[error("State label error: {0}")]
    ParseState(#[from] ParseStateError),

    /// Error during trace replay.
    #[error("Replay error: {0}")]
    Replay(#[from] ReplayError),

    /// Error during DOT rendering.
    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    /// Error building a configuration.
    #[error("Builder error: {0}")]
    Builder(#[from] BuilderError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A string that is not the label of any state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ParseStateError {
    /// No state has this label.
    #[error("Unknown state label: '{0}'")]
    UnknownLabel(String),

    /// The band exists but the position is outside `1..=max`.
    #[error("State label '{label}' is out of range (max {max})")]
    DepthOutOfRange { label: String, max: u8 },
}

/// Error while checking a recorded trace against a fresh simulation.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ReplayError {
    /// Trace file not found.
    #[error("Trace file not found: {}", .0.display())]
    TraceFileNotFound(PathBuf),

    /// Trace holds no records.
    #[error("Trace is empty")]
    EmptyTrace,

    /// Invalid JSON in trace input.
    #[error("Invalid JSON on line {line}: {reason}")]
    InvalidJson { line: usize, reason: String },

    /// Record's step number does not match its position.
    #[error("Line {line}: expected step {expected}, found step {found}")]
    StepOutOfOrder {
        line: usize,
        expected: usize,
        found: usize,
    },

    /// Recorded state differs from the simulated one.
    #[error("State mismatch at step {step}: recorded '{recorded}', simulated '{simulated}':\n{diff}")]
    StateMismatch {
        step: usize,
        recorded: String,
        simulated: String,
        diff: String,
    },

    /// Recorded symbol differs from the input character at that step.
    #[error("Symbol mismatch at step {step}: recorded {recorded:?}, input {simulated:?}")]
    SymbolMismatch {
        step: usize,
        recorded: Option<char>,
        simulated: Option<char>,
    },

    /// Recorded trace is shorter or longer than the simulated one.
    #[error("Trace length mismatch: recorded {recorded} steps, simulated {simulated}:\n{diff}")]
    LengthMismatch {
        recorded: usize,
        simulated: usize,
        diff: String,
    },

    /// IO error while reading a trace.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error while producing DOT output.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RenderError {
    /// Requested frame is past the end of the trace.
    #[error("Step {step} is out of range for a trace of {len} states")]
    StepOutOfRange { step: usize, len: usize },

    /// Failed to create the frame directory.
    #[error("Failed to create directory {}: {reason}", path.display())]
    CreateDir { path: PathBuf, reason: String },

    /// Failed to write a frame file.
    #[error("Failed to write frame {}: {reason}", path.display())]
    WriteFrame { path: PathBuf, reason: String },
}

/// Error during builder construction.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BuilderError {
    /// A required field was not set.
    #[error("{builder}: missing required field '{field}'")]
    MissingRequiredField {
        builder: &'static str,
        field: &'static str,
    },

    /// A field was set to a value the config cannot use.
    #[error("{builder}: invalid value for '{field}': {reason}")]
    InvalidField {
        builder: &'static str,
        field: &'static str,
        reason: String,
    },
}

/// Result type alias using email-dfa's Error.
pub type DfaResult<T> = std::result::Result<T, Error>;
