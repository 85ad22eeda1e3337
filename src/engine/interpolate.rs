//! Template interpolation.
//!
//! Placeholders are `$N` with `N >= 1` written without leading zeros. They are
//! replaced in a single left-to-right pass, so:
//!
//! - `$10` is read as index 10, never as `$1` followed by `0`.
//! - Text inserted for one placeholder is never rescanned for another.
//! - A placeholder with no matching value stays in the output verbatim.
//!
//! The `~~` escape marker is removed only after all placeholders are filled,
//! so a marker may straddle a placeholder.

use regex::Captures;

pub(crate) const ESCAPE_MARKER: &str = "~~";

/// Fill `$1..$N` in `template` from `values` (1-based) and strip `~~` markers.
pub fn interpolate(template: &str, values: &[String]) -> String {
    let filled = regex!(r"\$([1-9][0-9]*)").replace_all(template, |caps: &Captures<'_>| {
        let value = caps[1].parse::<usize>().ok().and_then(|n| values.get(n - 1));
        match value {
            Some(value) => value.clone(),
            None => caps[0].to_string(),
        }
    });

    filled.replace(ESCAPE_MARKER, "")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn fills_every_occurrence() {
        let out = interpolate("$1? Why $1? Because of $2.", &values(&["tired", "work"]));
        assert_eq!(out, "tired? Why tired? Because of work.");
    }

    #[test]
    fn template_without_placeholders_or_markers_is_returned_as_is() {
        let template = "Please go on.";
        assert_eq!(interpolate(template, &values(&["ignored", "also ignored"])), template);
    }

    #[test]
    fn out_of_range_placeholder_is_left_verbatim() {
        assert_eq!(interpolate("You said $1 and $3.", &values(&["a"])), "You said a and $3.");
    }

    #[test]
    fn two_digit_index_is_not_split() {
        let vals: Vec<String> = (1..=10).map(|i| format!("g{i}")).collect();
        assert_eq!(interpolate("$10/$1", &vals), "g10/g1");
        assert_eq!(interpolate("$10", &vals[..1]), "$10");
    }

    #[test]
    fn zero_and_leading_zero_are_not_placeholders() {
        assert_eq!(interpolate("$0 $01", &values(&["x"])), "$0 $01");
    }

    #[test]
    fn inserted_text_is_not_rescanned() {
        assert_eq!(interpolate("$1 $2", &values(&["$2", "b"])), "$2 b");
    }

    #[test]
    fn markers_are_stripped_after_interpolation() {
        assert_eq!(interpolate("~~I hear you~~ say $1", &values(&["tired"])), "I hear you say tired");
        assert_eq!(interpolate("~$1 ok", &values(&["~"])), " ok");
    }
}
