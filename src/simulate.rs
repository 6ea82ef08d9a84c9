//! Drives the automaton over an input string and records every state visited.

use crate::classify::CharClass;
use crate::state::State;
use crate::transition;
use serde::Serialize;
use std::ops::Index;
use tracing::{debug, trace};

/// The ordered states visited by one run.
///
/// Always starts with [`State::Start`] and is never empty. If it contains
/// [`State::Error`], that is the last entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Trace(Vec<State>);

impl Trace {
    pub fn states(&self) -> &[State] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Never true: a trace holds at least `Start`.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, step: usize) -> Option<State> {
        self.0.get(step).copied()
    }

    pub fn first(&self) -> State {
        self.0.first().copied().unwrap_or(State::Start)
    }

    pub fn last(&self) -> State {
        self.0.last().copied().unwrap_or(State::Start)
    }

    /// Entries `0..=step`, clamped to the trace length.
    pub fn prefix(&self, step: usize) -> &[State] {
        let end = step.saturating_add(1).min(self.0.len());
        &self.0[..end]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, State> {
        self.0.iter()
    }

    pub fn labels(&self) -> Vec<String> {
        self.0.iter().map(|s| s.label()).collect()
    }
}

impl Index<usize> for Trace {
    type Output = State;

    fn index(&self, step: usize) -> &State {
        &self.0[step]
    }
}

impl<'a> IntoIterator for &'a Trace {
    type Item = &'a State;
    type IntoIter = std::slice::Iter<'a, State>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Why an input was not accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum Rejection {
    EmptyInput,
    /// The character at `index` (counted in chars) drove the run into `Error`.
    UnexpectedChar { index: usize, ch: char },
    /// Input ended in a non-accepting state.
    UnexpectedEnd { state: State },
}

/// Outcome of one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum Verdict {
    Accepted,
    Rejected(Rejection),
}

impl Verdict {
    pub fn is_accepted(self) -> bool {
        self == Verdict::Accepted
    }
}

/// A trace together with its verdict. Owned entirely by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[non_exhaustive]
pub struct Run {
    pub trace: Trace,
    pub verdict: Verdict,
}

impl Run {
    pub fn is_accepted(&self) -> bool {
        self.verdict.is_accepted()
    }

    pub fn rejection(&self) -> Option<Rejection> {
        match self.verdict {
            Verdict::Accepted => None,
            Verdict::Rejected(rejection) => Some(rejection),
        }
    }

    /// The trace and the boolean verdict.
    pub fn into_parts(self) -> (Trace, bool) {
        let accepted = self.verdict.is_accepted();
        (self.trace, accepted)
    }
}

/// Run the automaton over `input`.
///
/// Consumption stops at the first character that leads to `Error`. When the
/// input ends in an accepting state after an `@` was seen, a synthetic
/// `Accept` is appended to the trace.
pub fn simulate(input: &str) -> Run {
    if input.is_empty() {
        debug!("Empty input rejected");
        return Run {
            trace: Trace(vec![State::Start, State::Error]),
            verdict: Verdict::Rejected(Rejection::EmptyInput),
        };
    }

    let mut state = State::Start;
    let mut states = Vec::with_capacity(input.len() + 2);
    states.push(state);
    let mut saw_separator = false;

    for (index, ch) in input.chars().enumerate() {
        let class = CharClass::of(ch);
        let next = if class.is_in_alphabet() {
            transition::next(state, class)
        } else {
            State::Error
        };

        trace!(index, ?ch, from = %state, to = %next, "Transition");

        if next == State::AfterAt {
            saw_separator = true;
        }
        states.push(next);
        state = next;

        if state.is_error() {
            debug!(index, ?ch, steps = states.len(), "Rejected");
            return Run {
                trace: Trace(states),
                verdict: Verdict::Rejected(Rejection::UnexpectedChar { index, ch }),
            };
        }
    }

    let verdict = if saw_separator && state.is_accepting() {
        states.push(State::Accept);
        Verdict::Accepted
    } else {
        Verdict::Rejected(Rejection::UnexpectedEnd { state })
    };

    debug!(
        chars = states.len() - 1,
        steps = states.len(),
        accepted = verdict.is_accepted(),
        "Simulation finished"
    );

    Run {
        trace: Trace(states),
        verdict,
    }
}

/// True when `input` is accepted by the automaton.
pub fn is_valid_email(input: &str) -> bool {
    simulate(input).is_accepted()
}

/// Simulate every input, preserving order.
#[cfg(feature = "parallel")]
pub fn simulate_batch<S: AsRef<str> + Sync>(inputs: &[S]) -> Vec<Run> {
    use rayon::prelude::*;
    inputs.par_iter().map(|s| simulate(s.as_ref())).collect()
}

/// Simulate every input, preserving order.
#[cfg(not(feature = "parallel"))]
pub fn simulate_batch<S: AsRef<str> + Sync>(inputs: &[S]) -> Vec<Run> {
    inputs.iter().map(|s| simulate(s.as_ref())).collect()
}
