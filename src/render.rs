//! Graphviz DOT output for traces and for the automaton itself.
//!
//! A trace renders as one frame per step: every state the run visits is
//! drawn in every frame so the layout stays put, the edges taken so far are
//! labelled with their step number, and the active state is highlighted.
//! [`render_automaton`] draws the full transition table, derived from
//! [`transition::next`] rather than maintained by hand.

use crate::builder::impl_builder;
use crate::classify::CharClass;
use crate::error::{BuilderError, Error, RenderError};
use crate::simulate::Trace;
use crate::state::State;
use crate::transition;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Graph layout direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RankDir {
    /// Left to right.
    #[default]
    LeftRight,
    /// Top to bottom.
    TopBottom,
}

impl RankDir {
    fn as_dot(self) -> &'static str {
        match self {
            RankDir::LeftRight => "LR",
            RankDir::TopBottom => "TB",
        }
    }
}

/// Options for DOT rendering.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct RenderConfig {
    /// DOT graph identifier (default: "email_dfa").
    pub graph_name: String,

    /// Layout direction (default: left to right).
    pub rank_dir: RankDir,

    /// Draw every state, not only the ones the trace visits (default: false).
    pub all_states: bool,

    /// Draw transitions into `Error` in the automaton diagram (default: false).
    pub error_edges: bool,

    /// Fill color of the active state.
    pub current_color: String,

    /// Fill color of `Accept`.
    pub accept_color: String,

    /// Fill color of `Error`.
    pub error_color: String,

    /// Caption drawn above the graph.
    pub title: Option<String>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            graph_name: "email_dfa".into(),
            rank_dir: RankDir::LeftRight,
            all_states: false,
            error_edges: false,
            current_color: "#cfe2ff".into(),
            accept_color: "#d4edda".into(),
            error_color: "#f8d7da".into(),
            title: None,
        }
    }
}

impl RenderConfig {
    fn validate(&self) -> Result<(), BuilderError> {
        let invalid = |field, reason: &str| BuilderError::InvalidField {
            builder: "RenderConfigBuilder",
            field,
            reason: reason.to_string(),
        };

        let mut chars = self.graph_name.chars();
        let valid_start = chars
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
        if !valid_start || !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(invalid(
                "graph_name",
                "must be an identifier of ASCII letters, digits and '_'",
            ));
        }

        for (field, color) in [
            ("current_color", &self.current_color),
            ("accept_color", &self.accept_color),
            ("error_color", &self.error_color),
        ] {
            if color.trim().is_empty() {
                return Err(invalid(field, "must not be empty"));
            }
        }
        Ok(())
    }
}

impl_builder!(RenderConfig, RenderConfigBuilder {
    required {}
    optional {
        graph_name: String,
        rank_dir: RankDir,
        all_states: bool,
        error_edges: bool,
        current_color: String,
        accept_color: String,
        error_color: String,
    }
    optional_or { title: String }
    validate: RenderConfig::validate
});

/// Render the frame for the trace prefix ending at `step`.
pub fn render_frame(trace: &Trace, step: usize, config: &RenderConfig) -> Result<String, RenderError> {
    if step >= trace.len() {
        return Err(RenderError::StepOutOfRange {
            step,
            len: trace.len(),
        });
    }
    Ok(frame(trace, step, config))
}

/// Render one frame per trace entry.
pub fn render_frames(trace: &Trace, config: &RenderConfig) -> Vec<String> {
    (0..trace.len())
        .map(|step| frame(trace, step, config))
        .collect()
}

/// Write every frame to `dir` as `step_<n>.dot`, numbered from 1.
///
/// Returns the written paths in step order; the last one is the final frame.
pub fn write_frames(trace: &Trace, dir: &Path, config: &RenderConfig) -> Result<Vec<PathBuf>, Error> {
    std::fs::create_dir_all(dir).map_err(|e| RenderError::CreateDir {
        path: dir.to_path_buf(),
        reason: e.to_string(),
    })?;

    let mut paths = Vec::with_capacity(trace.len());
    for (step, dot) in render_frames(trace, config).into_iter().enumerate() {
        let path = dir.join(format!("step_{}.dot", step + 1));
        std::fs::write(&path, dot).map_err(|e| RenderError::WriteFrame {
            path: path.clone(),
            reason: e.to_string(),
        })?;
        debug!(path = %path.display(), "Wrote frame");
        paths.push(path);
    }

    info!(dir = %dir.display(), frames = paths.len(), "Rendered trace frames");
    Ok(paths)
}

/// Render the complete automaton.
pub fn render_automaton(config: &RenderConfig) -> String {
    let states: Vec<State> = State::all().collect();

    // (from, to) ordinals -> classes taking that edge
    let mut edges: BTreeMap<(usize, usize), Vec<CharClass>> = BTreeMap::new();
    for &from in states.iter().filter(|s| !s.is_terminal()) {
        for class in CharClass::ALL {
            let to = transition::next(from, class);
            if to.is_error() && !config.error_edges {
                continue;
            }
            edges
                .entry((from.ordinal(), to.ordinal()))
                .or_default()
                .push(class);
        }
    }
    if config.error_edges {
        edges.insert(
            (State::Error.ordinal(), State::Error.ordinal()),
            CharClass::ALL.to_vec(),
        );
    }

    let mut out = header(config);
    for &state in &states {
        out.push_str(&node(state, None, config));
    }
    for ((from, to), classes) in &edges {
        let label = classes
            .iter()
            .map(|c| c.name())
            .collect::<Vec<_>>()
            .join(", ");
        out.push_str(&edge(states[*from], states[*to], &label));
    }
    for &state in states.iter().filter(|s| s.is_accepting()) {
        out.push_str(&edge(state, State::Accept, "end"));
    }
    out.push_str("}\n");

    debug!(states = states.len(), edges = edges.len(), "Rendered automaton");
    out
}

fn frame(trace: &Trace, step: usize, config: &RenderConfig) -> String {
    let current = trace[step];

    let nodes: Vec<State> = if config.all_states {
        State::all().collect()
    } else {
        let mut visited = Vec::new();
        for &state in trace {
            if !visited.contains(&state) {
                visited.push(state);
            }
        }
        visited
    };

    let mut out = header(config);
    for state in nodes {
        out.push_str(&node(state, Some(current), config));
    }
    for (i, pair) in trace.prefix(step).windows(2).enumerate() {
        out.push_str(&edge(pair[0], pair[1], &(i + 1).to_string()));
    }
    out.push_str("}\n");
    out
}

fn header(config: &RenderConfig) -> String {
    let mut out = format!("digraph {} {{\n", config.graph_name);
    out.push_str(&format!("  rankdir={};\n", config.rank_dir.as_dot()));
    if let Some(title) = &config.title {
        out.push_str(&format!("  labelloc=t;\n  label=\"{}\";\n", escape_dot(title)));
    }
    out.push_str("  node [shape=circle];\n");
    out.push_str("  __begin [shape=point];\n");
    out.push_str(&format!("  __begin -> \"{}\";\n", State::Start));
    out
}

fn node(state: State, current: Option<State>, config: &RenderConfig) -> String {
    let attrs = match state {
        State::Accept => format!(
            "shape=doublecircle, color=green, style=filled, fillcolor=\"{}\"",
            escape_dot(&config.accept_color)
        ),
        State::Error => format!(
            "color=red, style=filled, fillcolor=\"{}\"",
            escape_dot(&config.error_color)
        ),
        s if Some(s) == current => {
            let shape = if s.is_accepting() { "doublecircle" } else { "circle" };
            format!(
                "shape={shape}, color=blue, style=filled, fillcolor=\"{}\"",
                escape_dot(&config.current_color)
            )
        }
        s if s.is_accepting() => "shape=doublecircle".to_string(),
        _ => String::new(),
    };

    if attrs.is_empty() {
        format!("  \"{state}\";\n")
    } else {
        format!("  \"{state}\" [{attrs}];\n")
    }
}

fn edge(from: State, to: State, label: &str) -> String {
    format!("  \"{from}\" -> \"{to}\" [label=\"{}\"];\n", escape_dot(label))
}

/// Escape a string for use in a DOT double-quoted string.
fn escape_dot(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulate::simulate;

    #[test]
    fn escape_dot_special_chars() {
        assert_eq!(escape_dot("plain"), "plain");
        assert_eq!(escape_dot("a\"b"), "a\\\"b");
        assert_eq!(escape_dot("a\\b"), "a\\\\b");
        assert_eq!(escape_dot("a\nb"), "a\\nb");
    }

    #[test]
    fn builder_defaults() {
        let config = RenderConfig::builder().build().unwrap();
        assert_eq!(config.graph_name, "email_dfa");
        assert_eq!(config.rank_dir, RankDir::LeftRight);
        assert!(config.title.is_none());
    }

    #[test]
    fn builder_sets_fields() {
        let config = RenderConfig::builder()
            .graph_name("frames")
            .rank_dir(RankDir::TopBottom)
            .all_states(true)
            .title("x@y.org")
            .build()
            .unwrap();
        assert_eq!(config.graph_name, "frames");
        assert!(config.all_states);
        assert_eq!(config.title.as_deref(), Some("x@y.org"));
    }

    #[test]
    fn builder_rejects_bad_graph_name() {
        for name in ["", "1abc", "has space", "dash-ed"] {
            let err = RenderConfig::builder().graph_name(name).build().unwrap_err();
            assert!(err.to_string().contains("graph_name"), "{name}: {err}");
        }
    }

    #[test]
    fn builder_rejects_empty_color() {
        let err = RenderConfig::builder().error_color(" ").build().unwrap_err();
        assert!(err.to_string().contains("error_color"));
    }

    #[test]
    fn frame_edges_follow_prefix() {
        let run = simulate("ab@c.de");
        let config = RenderConfig::default();
        let first = render_frame(&run.trace, 0, &config).unwrap();
        assert!(!first.contains("[label=\"1\"]"));
        let third = render_frame(&run.trace, 2, &config).unwrap();
        assert!(third.contains("\"start\" -> \"local_alnum_1\" [label=\"1\"];"));
        assert!(third.contains("\"local_alnum_1\" -> \"local_alnum_1\" [label=\"2\"];"));
        assert!(!third.contains("[label=\"3\"]"));
    }

    #[test]
    fn frame_out_of_range() {
        let run = simulate("a");
        let err = render_frame(&run.trace, 5, &RenderConfig::default()).unwrap_err();
        assert!(matches!(err, RenderError::StepOutOfRange { step: 5, len: 2 }));
    }
}
