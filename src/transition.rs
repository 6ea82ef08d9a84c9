//! The transition function.
//!
//! [`next`] is total over `State × CharClass`. Every region function matches
//! on [`CharClass`] without a wildcard arm, so a new class or state does not
//! compile until it is routed somewhere.
//!
//! Labels after a domain dot start out as TLD candidates ([`State::TldLetter`]).
//! A digit, a hyphen or a seventh letter proves the label is not the final
//! one and moves it back into the ordinary domain label band; a dot starts
//! the next candidate. Only the letter count of the last label matters at
//! end of input.

use crate::classify::CharClass;
use crate::state::{DomainDepth, LocalDepth, State, TldLength};

/// The state reached from `state` on one character of class `class`.
pub fn next(state: State, class: CharClass) -> State {
    match state {
        State::Start => start(class),
        State::LocalAlnum(depth) => local_alnum(depth, class),
        State::LocalSymbolWait(depth) => local_symbol_wait(depth, class),
        State::AfterAt => after_at(class),
        State::DomainAlnum(depth) => domain_alnum(depth, class),
        State::DomainHyphenWait(depth) => domain_hyphen_wait(depth, class),
        State::AfterDomainDot => after_domain_dot(class),
        State::TldLetter(len) => tld_letter(len, class),
        State::Error => State::Error,
        // Accept only exists past end of input.
        State::Accept => State::Error,
    }
}

/// Convenience wrapper classifying `ch` first.
pub fn next_char(state: State, ch: char) -> State {
    next(state, CharClass::of(ch))
}

fn start(class: CharClass) -> State {
    match class {
        CharClass::Alpha | CharClass::Digit => State::LocalAlnum(LocalDepth::FIRST),
        CharClass::Dot
        | CharClass::Hyphen
        | CharClass::Symbol
        | CharClass::At
        | CharClass::Other => State::Error,
    }
}

fn local_alnum(depth: LocalDepth, class: CharClass) -> State {
    match class {
        CharClass::Alpha | CharClass::Digit => State::LocalAlnum(depth),
        CharClass::Dot | CharClass::Hyphen | CharClass::Symbol => State::LocalSymbolWait(depth),
        CharClass::At => State::AfterAt,
        CharClass::Other => State::Error,
    }
}

fn local_symbol_wait(depth: LocalDepth, class: CharClass) -> State {
    match class {
        CharClass::Alpha | CharClass::Digit => State::LocalAlnum(depth.next()),
        // No adjacent symbols, and the local part never ends on one.
        CharClass::Dot
        | CharClass::Hyphen
        | CharClass::Symbol
        | CharClass::At
        | CharClass::Other => State::Error,
    }
}

fn after_at(class: CharClass) -> State {
    match class {
        CharClass::Alpha | CharClass::Digit => State::DomainAlnum(DomainDepth::FIRST),
        CharClass::Dot
        | CharClass::Hyphen
        | CharClass::Symbol
        | CharClass::At
        | CharClass::Other => State::Error,
    }
}

fn domain_alnum(depth: DomainDepth, class: CharClass) -> State {
    match class {
        CharClass::Alpha | CharClass::Digit => State::DomainAlnum(depth),
        CharClass::Hyphen => State::DomainHyphenWait(depth),
        CharClass::Dot => State::AfterDomainDot,
        CharClass::Symbol | CharClass::At | CharClass::Other => State::Error,
    }
}

fn domain_hyphen_wait(depth: DomainDepth, class: CharClass) -> State {
    match class {
        CharClass::Alpha | CharClass::Digit => State::DomainAlnum(depth.next()),
        CharClass::Dot
        | CharClass::Hyphen
        | CharClass::Symbol
        | CharClass::At
        | CharClass::Other => State::Error,
    }
}

fn after_domain_dot(class: CharClass) -> State {
    match class {
        CharClass::Alpha => State::TldLetter(TldLength::FIRST),
        CharClass::Digit => State::DomainAlnum(DomainDepth::FIRST),
        CharClass::Dot
        | CharClass::Hyphen
        | CharClass::Symbol
        | CharClass::At
        | CharClass::Other => State::Error,
    }
}

fn tld_letter(len: TldLength, class: CharClass) -> State {
    match class {
        CharClass::Alpha => len
            .checked_next()
            .map_or(State::DomainAlnum(DomainDepth::FIRST), State::TldLetter),
        CharClass::Digit => State::DomainAlnum(DomainDepth::FIRST),
        CharClass::Hyphen => State::DomainHyphenWait(DomainDepth::FIRST),
        CharClass::Dot => State::AfterDomainDot,
        CharClass::Symbol | CharClass::At | CharClass::Other => State::Error,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{LOCAL_DEPTH, TLD_MAX};

    fn run(input: &str) -> State {
        input.chars().fold(State::Start, next_char)
    }

    #[test]
    fn every_pair_has_a_successor_in_the_state_set() {
        let states: Vec<State> = State::all().collect();
        for &state in &states {
            for class in CharClass::ALL {
                let to = next(state, class);
                assert!(states.contains(&to), "{state} --{class}--> {to}");
                assert_ne!(to, State::Accept, "{state} --{class}--> accept");
            }
        }
    }

    #[test]
    fn error_is_absorbing() {
        for class in CharClass::ALL {
            assert_eq!(next(State::Error, class), State::Error);
        }
    }

    #[test]
    fn accept_is_not_left_by_input() {
        for class in CharClass::ALL {
            assert_eq!(next(State::Accept, class), State::Error);
        }
    }

    #[test]
    fn other_always_errors() {
        for state in State::all() {
            assert_eq!(next(state, CharClass::Other), State::Error, "{state}");
        }
    }

    #[test]
    fn at_only_from_local_alnum() {
        for state in State::all() {
            let to = next(state, CharClass::At);
            if matches!(state, State::LocalAlnum(_)) {
                assert_eq!(to, State::AfterAt);
            } else {
                assert_eq!(to, State::Error, "{state}");
            }
        }
    }

    #[test]
    fn entry_states_need_an_alphanumeric() {
        for class in CharClass::ALL {
            let (from_start, from_at) = (next(State::Start, class), next(State::AfterAt, class));
            if class.is_alphanumeric() {
                assert_eq!(from_start, State::LocalAlnum(LocalDepth::FIRST));
                assert_eq!(from_at, State::DomainAlnum(DomainDepth::FIRST));
            } else {
                assert_eq!(from_start, State::Error, "{class}");
                assert_eq!(from_at, State::Error, "{class}");
            }
        }
    }

    #[test]
    fn local_band_follows_class_predicates() {
        for depth in LocalDepth::iter() {
            for class in CharClass::ALL {
                let from_alnum = next(State::LocalAlnum(depth), class);
                let from_symbol = next(State::LocalSymbolWait(depth), class);
                if class.is_alphanumeric() {
                    assert_eq!(from_alnum, State::LocalAlnum(depth));
                    assert_eq!(from_symbol, State::LocalAlnum(depth.next()));
                } else if class.is_local_symbol() {
                    assert_eq!(from_alnum, State::LocalSymbolWait(depth));
                    assert_eq!(from_symbol, State::Error);
                } else if class == CharClass::At {
                    assert_eq!(from_alnum, State::AfterAt);
                    assert_eq!(from_symbol, State::Error);
                } else {
                    assert_eq!(from_alnum, State::Error);
                    assert_eq!(from_symbol, State::Error);
                }
            }
        }
    }

    #[test]
    fn domain_band_follows_class_predicates() {
        for depth in DomainDepth::iter() {
            for class in CharClass::ALL {
                let from_alnum = next(State::DomainAlnum(depth), class);
                let from_hyphen = next(State::DomainHyphenWait(depth), class);
                if class.is_alphanumeric() {
                    assert_eq!(from_alnum, State::DomainAlnum(depth));
                    assert_eq!(from_hyphen, State::DomainAlnum(depth.next()));
                } else if class.is_domain_symbol() {
                    assert_eq!(from_alnum, State::DomainHyphenWait(depth));
                    assert_eq!(from_hyphen, State::Error);
                } else if class == CharClass::Dot {
                    assert_eq!(from_alnum, State::AfterDomainDot);
                    assert_eq!(from_hyphen, State::Error);
                } else {
                    assert_eq!(from_alnum, State::Error, "{class}");
                    assert_eq!(from_hyphen, State::Error, "{class}");
                }
            }
        }
    }

    #[test]
    fn local_part_segments() {
        assert_eq!(run("ab"), State::LocalAlnum(LocalDepth::FIRST));
        assert_eq!(run("a."), State::LocalSymbolWait(LocalDepth::FIRST));
        assert_eq!(
            run("a.b"),
            State::LocalAlnum(LocalDepth::new(2).unwrap())
        );
        assert_eq!(run("a._"), State::Error);
        assert_eq!(run("a.@"), State::Error);
        assert_eq!(run(".a"), State::Error);
    }

    #[test]
    fn local_depth_saturates() {
        let input = "a.".repeat(LOCAL_DEPTH as usize * 3) + "a";
        assert_eq!(run(&input), State::LocalAlnum(LocalDepth::LAST));
        let input = "a-".repeat(LOCAL_DEPTH as usize * 3);
        assert_eq!(run(&input), State::LocalSymbolWait(LocalDepth::LAST));
    }

    #[test]
    fn domain_labels() {
        assert_eq!(run("a@b"), State::DomainAlnum(DomainDepth::FIRST));
        assert_eq!(run("a@b-"), State::DomainHyphenWait(DomainDepth::FIRST));
        assert_eq!(
            run("a@b-c"),
            State::DomainAlnum(DomainDepth::new(2).unwrap())
        );
        assert_eq!(run("a@b--c"), State::Error);
        assert_eq!(run("a@b-.c"), State::Error);
        assert_eq!(run("a@b..c"), State::Error);
        assert_eq!(run("a@.b"), State::Error);
        assert_eq!(run("a@b_c"), State::Error);
        assert_eq!(run("a@b@c"), State::Error);
    }

    #[test]
    fn tld_counts_letters() {
        assert_eq!(run("a@b.c"), State::TldLetter(TldLength::FIRST));
        assert_eq!(run("a@b.co"), State::TldLetter(TldLength::new(2).unwrap()));
        assert_eq!(run("a@b.museum"), State::TldLetter(TldLength::LAST));
    }

    #[test]
    fn letter_past_tld_max_leaves_tld_band() {
        let input = format!("a@b.{}", "x".repeat(TLD_MAX as usize + 1));
        assert_eq!(run(&input), State::DomainAlnum(DomainDepth::FIRST));
    }

    #[test]
    fn tld_candidate_can_become_a_label() {
        assert_eq!(run("a@b.c1"), State::DomainAlnum(DomainDepth::FIRST));
        assert_eq!(run("a@b.my-"), State::DomainHyphenWait(DomainDepth::FIRST));
        assert_eq!(run("a@b.mail."), State::AfterDomainDot);
        assert_eq!(run("a@b.1"), State::DomainAlnum(DomainDepth::FIRST));
        assert_eq!(run("a@b.-"), State::Error);
    }
}
