//! Reflection: rewrite a captured fragment word by word.
//!
//! ```text
//! "my mother, and me!" ── split on [\s,.?!]+ ──▶ ["my", "mother", "and", "me"]
//!                        ── whole-token substitution (first rule wins)
//!                                               ──▶ ["your", "mother", "and", "you"]
//!                        ── join " " + trim   ──▶ "your mother and you"
//! ```
//!
//! Boundary characters are dropped, so punctuation inside a fragment does not
//! survive reflection.

use tracing::trace;

use super::chooser::{Chooser, choose};
use crate::RuleSet;

/// Apply `substitutions` to each token of `text` and rejoin with single spaces.
///
/// Tokens that no substitution rule matches pass through unchanged. The
/// chooser is consulted once per substituted token, left to right.
pub fn reflect<C>(substitutions: &RuleSet, text: &str, chooser: &mut C) -> String
where
    C: Chooser + ?Sized,
{
    let tokens: Vec<&str> = regex!(r"[\s,.?!]+")
        .split(text)
        .filter(|token| !token.is_empty())
        .map(|token| match substitutions.find_whole_token(token) {
            Some(rule) => {
                let (_, replacement) = choose(chooser, rule.candidates());
                trace!(token, replacement, pattern = rule.pattern().as_str(), "substituted token");
                replacement
            }
            None => token,
        })
        .collect();

    tokens.join(" ").trim().to_string()
}
