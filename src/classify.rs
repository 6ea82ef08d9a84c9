//! Character classification for the automaton's input alphabet.
//!
//! Every `char` maps to exactly one [`CharClass`]. The classes are disjoint;
//! the overlapping sets the automaton talks about (local-part symbols,
//! domain symbols) are expressed as predicates over classes.

use std::fmt;

/// Disjoint input classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CharClass {
    /// ASCII letter.
    Alpha,
    /// ASCII digit.
    Digit,
    /// `.`: local-part symbol and domain label separator.
    Dot,
    /// `-`: local-part symbol and the only symbol allowed inside a domain label.
    Hyphen,
    /// `_` or `+`: local-part only.
    Symbol,
    /// `@`, the local/domain separator.
    At,
    /// Anything else, including all non-ASCII input.
    Other,
}

impl CharClass {
    /// Every class, in declaration order.
    pub const ALL: [CharClass; 7] = [
        CharClass::Alpha,
        CharClass::Digit,
        CharClass::Dot,
        CharClass::Hyphen,
        CharClass::Symbol,
        CharClass::At,
        CharClass::Other,
    ];

    /// Classify a single character.
    pub fn of(ch: char) -> Self {
        match ch {
            'a'..='z' | 'A'..='Z' => CharClass::Alpha,
            '0'..='9' => CharClass::Digit,
            '.' => CharClass::Dot,
            '-' => CharClass::Hyphen,
            '_' | '+' => CharClass::Symbol,
            '@' => CharClass::At,
            _ => CharClass::Other,
        }
    }

    pub fn is_alphanumeric(self) -> bool {
        matches!(self, CharClass::Alpha | CharClass::Digit)
    }

    /// `.`, `_`, `+` or `-`.
    pub fn is_local_symbol(self) -> bool {
        matches!(self, CharClass::Dot | CharClass::Hyphen | CharClass::Symbol)
    }

    pub fn is_domain_symbol(self) -> bool {
        self == CharClass::Hyphen
    }

    /// False only for [`CharClass::Other`].
    pub fn is_in_alphabet(self) -> bool {
        self != CharClass::Other
    }

    /// Short name used in diagram edge labels.
    pub fn name(self) -> &'static str {
        match self {
            CharClass::Alpha => "letter",
            CharClass::Digit => "digit",
            CharClass::Dot => ".",
            CharClass::Hyphen => "-",
            CharClass::Symbol => "_ +",
            CharClass::At => "@",
            CharClass::Other => "other",
        }
    }
}

impl fmt::Display for CharClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_alphanumerics() {
        assert_eq!(CharClass::of('a'), CharClass::Alpha);
        assert_eq!(CharClass::of('Z'), CharClass::Alpha);
        assert_eq!(CharClass::of('0'), CharClass::Digit);
        assert_eq!(CharClass::of('9'), CharClass::Digit);
    }

    #[test]
    fn symbols() {
        assert_eq!(CharClass::of('.'), CharClass::Dot);
        assert_eq!(CharClass::of('-'), CharClass::Hyphen);
        assert_eq!(CharClass::of('_'), CharClass::Symbol);
        assert_eq!(CharClass::of('+'), CharClass::Symbol);
        assert_eq!(CharClass::of('@'), CharClass::At);
    }

    #[test]
    fn non_ascii_is_other() {
        for ch in ['é', 'ß', 'Ω', '日', '\u{1F600}', '\u{0}', '\n', ' ', '!', '#'] {
            assert_eq!(CharClass::of(ch), CharClass::Other, "{ch:?}");
        }
    }

    #[test]
    fn local_symbol_set() {
        let local: Vec<char> = "._+-"
            .chars()
            .filter(|c| CharClass::of(*c).is_local_symbol())
            .collect();
        assert_eq!(local, vec!['.', '_', '+', '-']);
        assert!(!CharClass::At.is_local_symbol());
        assert!(!CharClass::Alpha.is_local_symbol());
    }

    #[test]
    fn only_hyphen_is_domain_symbol() {
        let domain: Vec<_> = CharClass::ALL
            .iter()
            .filter(|c| c.is_domain_symbol())
            .collect();
        assert_eq!(domain, vec![&CharClass::Hyphen]);
    }

    #[test]
    fn alphabet_excludes_only_other() {
        let outside: Vec<_> = CharClass::ALL
            .iter()
            .filter(|c| !c.is_in_alphabet())
            .collect();
        assert_eq!(outside, vec![&CharClass::Other]);
    }
}
