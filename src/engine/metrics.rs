//! Per-call response trace.
//!
//! `ResponseEngine::respond_with` returns only the reply. The verbose path
//! returns a [`RespondTrace`] describing how that reply was built, for the CLI
//! `--verbose` report and for debugging rule files.

use std::time::Duration;

#[derive(Debug, Clone, Default)]
pub struct RespondTrace {
    /// The reply, identical to what the non-verbose path would return.
    pub reply: String,
    /// Index of the matched response rule; `None` means the fallback was used.
    pub rule: Option<usize>,
    /// Pattern text of the matched rule.
    pub pattern: Option<String>,
    /// Index of the chosen template within the rule's candidates.
    pub template: Option<usize>,
    /// Raw captured groups `1..=N`.
    pub groups: Vec<String>,
    /// Captured groups after reflection, aligned with `groups`.
    pub reflected: Vec<String>,
    /// Wall time spent building the reply.
    pub elapsed: Duration,
}

impl RespondTrace {
    pub fn is_fallback(&self) -> bool {
        self.rule.is_none()
    }
}
