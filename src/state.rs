//! The automaton's finite state set.
//!
//! States are grouped in bands. Bands that need to remember a position carry
//! a [`Depth`], a counter that is bounded by its type, so the whole state set
//! stays finite and can be enumerated with [`State::all`].
//!
//! # Labels
//!
//! Every state has a stable label used for display, serialization and
//! diagram node ids:
//!
//! | State                  | Label              |
//! |------------------------|--------------------|
//! | `Start`                | `start`            |
//! | `LocalAlnum(3)`        | `local_alnum_3`    |
//! | `LocalSymbolWait(3)`   | `local_symbol_3`   |
//! | `AfterAt`              | `after_at`         |
//! | `DomainAlnum(1)`       | `domain_alnum_1`   |
//! | `DomainHyphenWait(2)`  | `domain_hyphen_2`  |
//! | `AfterDomainDot`       | `domain_dot`       |
//! | `TldLetter(4)`         | `tld_4`            |
//! | `Error`                | `error`            |
//! | `Accept`               | `accept`           |

use crate::error::ParseStateError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Number of local-part segments tracked before the counter saturates.
pub const LOCAL_DEPTH: u8 = 8;

/// Number of hyphen-separated segments tracked inside one domain label.
pub const DOMAIN_DEPTH: u8 = 5;

/// Longest top-level domain, in letters.
pub const TLD_MAX: u8 = 6;

/// Shortest top-level domain, in letters.
pub const TLD_MIN: u8 = 2;

const _: () = assert!(LOCAL_DEPTH >= 1 && DOMAIN_DEPTH >= 1);
const _: () = assert!(TLD_MIN >= 1 && TLD_MIN <= TLD_MAX);

/// A counter in `1..=CAP`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Depth<const CAP: u8>(u8);

pub type LocalDepth = Depth<LOCAL_DEPTH>;
pub type DomainDepth = Depth<DOMAIN_DEPTH>;
pub type TldLength = Depth<TLD_MAX>;

impl<const CAP: u8> Depth<CAP> {
    pub const FIRST: Self = Self(1);
    pub const LAST: Self = Self(CAP);

    /// Returns `None` outside `1..=CAP`.
    pub fn new(value: u8) -> Option<Self> {
        (1..=CAP).contains(&value).then_some(Self(value))
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// The successor, saturating at `CAP`.
    pub fn next(self) -> Self {
        self.checked_next().unwrap_or(self)
    }

    /// The successor, or `None` at `CAP`.
    pub fn checked_next(self) -> Option<Self> {
        Self::new(self.0.checked_add(1)?)
    }

    /// All values in ascending order.
    pub fn iter() -> impl Iterator<Item = Self> {
        (1..=CAP).map(Self)
    }
}

/// One state of the email automaton.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum State {
    /// Nothing consumed yet.
    Start,
    /// Local part, after an alphanumeric character.
    LocalAlnum(LocalDepth),
    /// Local part, after one of `._+-`; an alphanumeric must follow.
    LocalSymbolWait(LocalDepth),
    /// Right after `@`; a domain label must start.
    AfterAt,
    /// Domain label, after an alphanumeric character.
    DomainAlnum(DomainDepth),
    /// Domain label, after `-`; an alphanumeric must follow.
    DomainHyphenWait(DomainDepth),
    /// Right after a `.` in the domain.
    AfterDomainDot,
    /// All-letter label after a domain dot, counting its letters.
    TldLetter(TldLength),
    /// Absorbing sink.
    Error,
    /// Appended at end of input when the address is accepted. Never entered
    /// by a transition.
    Accept,
}

const LOCAL_ALNUM: &str = "local_alnum_";
const LOCAL_SYMBOL: &str = "local_symbol_";
const DOMAIN_ALNUM: &str = "domain_alnum_";
const DOMAIN_HYPHEN: &str = "domain_hyphen_";
const TLD: &str = "tld_";

impl State {
    /// Total number of states, `Accept` included.
    pub const COUNT: usize =
        5 + 2 * LOCAL_DEPTH as usize + 2 * DOMAIN_DEPTH as usize + TLD_MAX as usize;

    /// Every state, in band order. [`State::ordinal`] indexes into this order.
    pub fn all() -> impl Iterator<Item = State> {
        std::iter::once(State::Start)
            .chain(LocalDepth::iter().map(State::LocalAlnum))
            .chain(LocalDepth::iter().map(State::LocalSymbolWait))
            .chain(std::iter::once(State::AfterAt))
            .chain(DomainDepth::iter().map(State::DomainAlnum))
            .chain(DomainDepth::iter().map(State::DomainHyphenWait))
            .chain(std::iter::once(State::AfterDomainDot))
            .chain(TldLength::iter().map(State::TldLetter))
            .chain([State::Error, State::Accept])
    }

    /// Dense index of this state in [`State::all`].
    pub fn ordinal(self) -> usize {
        let local = LOCAL_DEPTH as usize;
        let domain = DOMAIN_DEPTH as usize;
        let tld = TLD_MAX as usize;
        let at = 1 + 2 * local;
        let dot = at + 1 + 2 * domain;
        match self {
            State::Start => 0,
            State::LocalAlnum(d) => d.get() as usize,
            State::LocalSymbolWait(d) => local + d.get() as usize,
            State::AfterAt => at,
            State::DomainAlnum(d) => at + d.get() as usize,
            State::DomainHyphenWait(d) => at + domain + d.get() as usize,
            State::AfterDomainDot => dot,
            State::TldLetter(n) => dot + n.get() as usize,
            State::Error => dot + tld + 1,
            State::Accept => dot + tld + 2,
        }
    }

    /// True when input may end here and the address be accepted.
    pub fn is_accepting(self) -> bool {
        matches!(self, State::TldLetter(n) if n.get() >= TLD_MIN)
    }

    /// `Error` and `Accept`: no further characters are consumed.
    pub fn is_terminal(self) -> bool {
        matches!(self, State::Error | State::Accept)
    }

    pub fn is_error(self) -> bool {
        self == State::Error
    }

    /// Stable printable label.
    pub fn label(self) -> String {
        self.to_string()
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            State::Start => f.write_str("start"),
            State::LocalAlnum(d) => write!(f, "{LOCAL_ALNUM}{}", d.get()),
            State::LocalSymbolWait(d) => write!(f, "{LOCAL_SYMBOL}{}", d.get()),
            State::AfterAt => f.write_str("after_at"),
            State::DomainAlnum(d) => write!(f, "{DOMAIN_ALNUM}{}", d.get()),
            State::DomainHyphenWait(d) => write!(f, "{DOMAIN_HYPHEN}{}", d.get()),
            State::AfterDomainDot => f.write_str("domain_dot"),
            State::TldLetter(n) => write!(f, "{TLD}{}", n.get()),
            State::Error => f.write_str("error"),
            State::Accept => f.write_str("accept"),
        }
    }
}

impl FromStr for State {
    type Err = ParseStateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "start" => return Ok(State::Start),
            "after_at" => return Ok(State::AfterAt),
            "domain_dot" => return Ok(State::AfterDomainDot),
            "error" => return Ok(State::Error),
            "accept" => return Ok(State::Accept),
            _ => {}
        }

        if let Some(n) = s.strip_prefix(LOCAL_ALNUM) {
            parse_depth(s, n).map(State::LocalAlnum)
        } else if let Some(n) = s.strip_prefix(LOCAL_SYMBOL) {
            parse_depth(s, n).map(State::LocalSymbolWait)
        } else if let Some(n) = s.strip_prefix(DOMAIN_ALNUM) {
            parse_depth(s, n).map(State::DomainAlnum)
        } else if let Some(n) = s.strip_prefix(DOMAIN_HYPHEN) {
            parse_depth(s, n).map(State::DomainHyphenWait)
        } else if let Some(n) = s.strip_prefix(TLD) {
            parse_depth(s, n).map(State::TldLetter)
        } else {
            Err(ParseStateError::UnknownLabel(s.to_string()))
        }
    }
}

fn parse_depth<const CAP: u8>(label: &str, digits: &str) -> Result<Depth<CAP>, ParseStateError> {
    let out_of_range = || ParseStateError::DepthOutOfRange {
        label: label.to_string(),
        max: CAP,
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseStateError::UnknownLabel(label.to_string()));
    }
    let value: u8 = digits.parse().map_err(|_| out_of_range())?;
    Depth::new(value).ok_or_else(out_of_range)
}

impl Serialize for State {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for State {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        label.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn depth_saturates_at_cap() {
        let mut d = TldLength::FIRST;
        for _ in 0..20 {
            d = d.next();
        }
        assert_eq!(d, TldLength::LAST);
        assert_eq!(d.get(), TLD_MAX);
        assert!(d.checked_next().is_none());
    }

    #[test]
    fn depth_rejects_zero_and_overflow() {
        assert!(LocalDepth::new(0).is_none());
        assert!(LocalDepth::new(LOCAL_DEPTH + 1).is_none());
        assert_eq!(LocalDepth::new(LOCAL_DEPTH), Some(LocalDepth::LAST));
    }

    #[test]
    fn all_matches_count_and_ordinals() {
        let states: Vec<State> = State::all().collect();
        assert_eq!(states.len(), State::COUNT);
        for (i, state) in states.iter().enumerate() {
            assert_eq!(state.ordinal(), i, "{state}");
        }
    }

    #[test]
    fn labels_are_unique_and_parse_back() {
        let mut seen = std::collections::HashSet::new();
        for state in State::all() {
            let label = state.label();
            assert!(seen.insert(label.clone()), "duplicate label {label}");
            assert_eq!(label.parse::<State>().unwrap(), state);
        }
    }

    #[test]
    fn parse_rejects_unknown_and_out_of_range() {
        assert!(matches!(
            "q17".parse::<State>(),
            Err(ParseStateError::UnknownLabel(_))
        ));
        assert!(matches!(
            "tld_x".parse::<State>(),
            Err(ParseStateError::UnknownLabel(_))
        ));
        assert!(matches!(
            "tld_7".parse::<State>(),
            Err(ParseStateError::DepthOutOfRange { max: 6, .. })
        ));
        assert!(matches!(
            "local_alnum_0".parse::<State>(),
            Err(ParseStateError::DepthOutOfRange { .. })
        ));
    }

    #[test]
    fn accepting_band_starts_at_tld_min() {
        let accepting: Vec<String> = State::all()
            .filter(|s| s.is_accepting())
            .map(State::label)
            .collect();
        assert_eq!(accepting, vec!["tld_2", "tld_3", "tld_4", "tld_5", "tld_6"]);
    }

    #[test]
    fn serde_uses_labels() {
        let json = serde_json::to_string(&State::DomainHyphenWait(DomainDepth::LAST)).unwrap();
        assert_eq!(json, "\"domain_hyphen_5\"");
        let back: State = serde_json::from_str("\"local_symbol_2\"").unwrap();
        assert_eq!(back, State::LocalSymbolWait(LocalDepth::new(2).unwrap()));
        assert!(serde_json::from_str::<State>("\"nope\"").is_err());
    }
}
