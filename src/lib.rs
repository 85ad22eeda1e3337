//! A rule-driven conversational responder.
//!
//! Replies are chosen from ordered regex rule files and filled with the
//! user's own words after a pronoun "reflection" pass:
//!
//! ```text
//! input ── RuleSet::find_first_match (responses) ──▶ rule + captured groups
//!                                                      │
//!        pick template ◀───────────────────────────────┘
//!              │
//!              ├─ per group: tokenize ─▶ reflect (substitutions)
//!              └─ interpolate $1..$N ─▶ strip `~~` ─▶ reply
//! ```
//!
//! Rule files are loaded once; a [`ResponseEngine`] is immutable afterwards
//! and can be shared between threads.

use regex::Regex;

#[macro_use]
mod macros;
mod api;
mod engine;
mod error;

pub use api::{FALLBACK_RESPONSE, ResponseEngine, load_rule_file};
pub use engine::{Chooser, RespondTrace, RngChooser, RuleMatch, interpolate, parse_rules, reflect};
pub use error::{LoadError, ParseError, ParseErrorKind, error_chain};

// --- Data model -------------------------------------------------------------

/// A compiled rule pattern.
///
/// Two forms are kept: an unanchored regex for response matching (substring
/// search) and an anchored copy for whole-token substitution matching.
#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    search: Regex,
    whole: Regex,
}

impl Pattern {
    /// Compile `source` as a regular expression.
    pub fn new(source: &str) -> Result<Self, regex::Error> {
        let search = Regex::new(source)?;
        // In verbose mode a trailing `# comment` would swallow the closing
        // `)$`; a newline ends the comment and is ignored under `x`.
        let whole = Regex::new(&format!("^(?:{source})$"))
            .or_else(|_| Regex::new(&format!("^(?:{source}\n)$")))?;
        Ok(Pattern { source: source.to_string(), search, whole })
    }

    /// The pattern text as written in the rule file.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Search `text` and return captured groups `1..=N` in order.
    ///
    /// Group 0 is dropped. A group that captured nothing (or did not take part
    /// in the match) is reported as an empty string.
    pub fn captures(&self, text: &str) -> Option<Vec<String>> {
        let caps = self.search.captures(text)?;
        let groups = caps.iter().skip(1).map(|g| g.map(|m| m.as_str().to_string()).unwrap_or_default()).collect();
        Some(groups)
    }

    /// True when the pattern matches the whole of `text`.
    pub fn matches_whole(&self, text: &str) -> bool {
        self.whole.is_match(text)
    }
}

/// A pattern paired with its ordered candidate outputs.
///
/// For response files the candidates are reply templates; for substitution
/// files they are replacement words. A rule always has at least one candidate.
#[derive(Debug, Clone)]
pub struct Rule {
    pub(crate) pattern: Pattern,
    pub(crate) candidates: Vec<String>,
}

impl Rule {
    /// Build a rule. Returns `None` when `candidates` is empty.
    pub fn new(pattern: Pattern, candidates: Vec<String>) -> Option<Self> {
        if candidates.is_empty() {
            return None;
        }
        Some(Rule { pattern, candidates })
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }
}

/// Ordered, immutable collection of rules. The first matching rule wins.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    /// Wrap an ordered list of rules.
    pub fn from_rules(rules: Vec<Rule>) -> Self {
        RuleSet { rules }
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.rules.iter()
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

impl std::str::FromStr for RuleSet {
    type Err = ParseError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        parse_rules(text)
    }
}
