//! Rule file parser.
//!
//! Rule files are line oriented and grouped into sections separated by blank
//! lines:
//!
//! ```text
//! # comment (ignored anywhere, never ends a section)
//! I need (.*)              <- pattern line: first line of a section
//! Why do you need $1?      <- candidate lines, in order
//! Would $1 really help?
//!                          <- blank line(s): end of section
//! I am (.*)
//! How long have you been $1?
//! ```
//!
//! Parsing runs a three-state machine:
//!
//! ```text
//!              pattern line                 candidate line
//! ExpectPattern ───────────▶ ExpectCandidate ───────────▶ ExpectMore ─┐
//!      ▲                          │ blank / EOF               │  ▲    │ candidate
//!      │                          v                           │  └────┘
//!      │                    EmptySection error                │
//!      └────────────────── blank: push finished Rule ◀────────┘
//! ```
//!
//! Rules only become visible as a `RuleSet` once the whole file parsed.

use crate::error::{ParseError, ParseErrorKind};
use crate::{Pattern, Rule, RuleSet};

/// A section whose pattern compiled; candidates are still being collected.
struct Section {
    line: usize,
    pattern: Pattern,
    candidates: Vec<String>,
}

impl Section {
    fn empty_error(self) -> ParseError {
        ParseError { line: self.line, kind: ParseErrorKind::EmptySection { pattern: self.pattern.source } }
    }

    fn into_rule(self) -> Rule {
        Rule { pattern: self.pattern, candidates: self.candidates }
    }
}

enum State {
    ExpectPattern,
    ExpectCandidate(Section),
    ExpectMore(Section),
}

/// Parse rule-file text into an ordered `RuleSet`.
///
/// Rule order equals section order in `text`. Fails on the first malformed
/// line or section.
pub fn parse_rules(text: &str) -> Result<RuleSet, ParseError> {
    let mut rules = Vec::new();
    let mut state = State::ExpectPattern;

    for (idx, line) in text.lines().enumerate() {
        if line.starts_with('#') {
            continue;
        }
        state = step(state, line, idx + 1, &mut rules)?;
    }

    match state {
        State::ExpectPattern => {}
        State::ExpectCandidate(section) => return Err(section.empty_error()),
        State::ExpectMore(section) => rules.push(section.into_rule()),
    }

    Ok(RuleSet::from_rules(rules))
}

fn step(state: State, line: &str, line_no: usize, rules: &mut Vec<Rule>) -> Result<State, ParseError> {
    let blank = line.trim().is_empty();

    let next = match state {
        State::ExpectPattern if blank => State::ExpectPattern,
        State::ExpectPattern => {
            let pattern = Pattern::new(line).map_err(|source| {
                // An indented line that is not a regex reads as a stray reply.
                let kind = if line.starts_with(char::is_whitespace) {
                    ParseErrorKind::CandidateBeforePattern { text: line.trim().to_string() }
                } else {
                    ParseErrorKind::InvalidPattern { pattern: line.to_string(), source }
                };
                ParseError { line: line_no, kind }
            })?;
            State::ExpectCandidate(Section { line: line_no, pattern, candidates: Vec::new() })
        }
        State::ExpectCandidate(section) if blank => return Err(section.empty_error()),
        State::ExpectMore(section) if blank => {
            rules.push(section.into_rule());
            State::ExpectPattern
        }
        State::ExpectCandidate(mut section) | State::ExpectMore(mut section) => {
            section.candidates.push(line.to_string());
            State::ExpectMore(section)
        }
    };

    Ok(next)
}
