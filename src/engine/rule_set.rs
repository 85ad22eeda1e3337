//! Ordered first-match lookup over a `RuleSet`.
//!
//! Two lookups share the same first-match-wins policy:
//!
//! - [`RuleSet::find_first_match`]: substring search, used for response rules.
//!   Returns the captured groups so they can be interpolated.
//! - [`RuleSet::find_whole_token`]: whole-token match, used for substitution
//!   rules so `my` never fires inside `myself`.

use crate::{Rule, RuleSet};

/// The first rule that matched some input, with its captured groups.
#[derive(Debug, Clone)]
pub struct RuleMatch<'a> {
    /// Position of the rule in its set.
    pub index: usize,
    pub rule: &'a Rule,
    /// Captured groups `1..=N`, in order. Never contains group 0.
    pub groups: Vec<String>,
}

impl RuleSet {
    /// Scan rules in order and return the first whose pattern occurs in `text`.
    ///
    /// `None` is the ordinary "nothing applies" outcome, not an error.
    pub fn find_first_match(&self, text: &str) -> Option<RuleMatch<'_>> {
        self.iter()
            .enumerate()
            .find_map(|(index, rule)| rule.pattern.captures(text).map(|groups| RuleMatch { index, rule, groups }))
    }

    /// Return the first rule whose pattern matches all of `token`.
    pub fn find_whole_token(&self, token: &str) -> Option<&Rule> {
        self.iter().find(|rule| rule.pattern.matches_whole(token))
    }
}
