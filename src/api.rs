use crate::engine::{self, Chooser, RespondTrace, RngChooser};
use crate::error::LoadError;
use crate::RuleSet;
use std::path::Path;
use std::time::Instant;
use tracing::debug;

/// Reply used when no response rule matches the input.
pub const FALLBACK_RESPONSE: &str = "I don't know what to say.";

/// Read and parse a rule file.
///
/// Used identically for response files and substitution files.
pub fn load_rule_file(path: impl AsRef<Path>) -> Result<RuleSet, LoadError> {
    let path = path.as_ref();
    let text =
        std::fs::read_to_string(path).map_err(|source| LoadError::Io { path: path.to_path_buf(), source })?;
    let rules = engine::parse_rules(&text).map_err(|source| LoadError::Parse { path: path.to_path_buf(), source })?;

    debug!(path = %path.display(), rules = rules.len(), "loaded rule file");
    Ok(rules)
}

/// A conversational responder built from two rule sets.
///
/// `responses` select and fill reply templates; `substitutions` reflect
/// captured text before it is echoed back. Both are fixed at construction and
/// no state carries over between calls, so one engine can serve many threads.
///
/// # Example
/// ```
/// use echolalia::{ResponseEngine, RuleSet};
///
/// let responses: RuleSet = "I need (.*)\nWhy do you need $1?\n".parse().unwrap();
/// let substitutions: RuleSet = "my\nyour\n".parse().unwrap();
/// let engine = ResponseEngine::new(responses, substitutions);
///
/// assert_eq!(engine.respond("I need my mother"), "Why do you need your mother?");
/// assert_eq!(engine.respond("xyzzy"), "I don't know what to say.");
/// ```
#[derive(Debug, Clone)]
pub struct ResponseEngine {
    responses: RuleSet,
    substitutions: RuleSet,
}

/// What the matching step decided, before timing is attached.
struct Selection {
    rule: usize,
    template: usize,
    groups: Vec<String>,
    reflected: Vec<String>,
}

impl ResponseEngine {
    pub fn new(responses: RuleSet, substitutions: RuleSet) -> Self {
        ResponseEngine { responses, substitutions }
    }

    /// Load both rule files. Any read or parse failure is returned and no
    /// engine is built.
    pub fn from_files(responses: impl AsRef<Path>, substitutions: impl AsRef<Path>) -> Result<Self, LoadError> {
        Ok(Self::new(load_rule_file(responses)?, load_rule_file(substitutions)?))
    }

    pub fn responses(&self) -> &RuleSet {
        &self.responses
    }

    pub fn substitutions(&self) -> &RuleSet {
        &self.substitutions
    }

    /// Reply to `input` using the thread-local random generator.
    pub fn respond(&self, input: &str) -> String {
        self.respond_with(input, &mut RngChooser(rand::thread_rng()))
    }

    /// Reply to `input`, drawing every random choice from `chooser`.
    ///
    /// Draw order: one pick for the template, then one pick per substituted
    /// token, groups in index order and tokens left to right.
    pub fn respond_with<C>(&self, input: &str, chooser: &mut C) -> String
    where
        C: Chooser + ?Sized,
    {
        self.answer(input, chooser).0
    }

    /// Like [`respond_with`](Self::respond_with), but also report which rule,
    /// template, and groups produced the reply.
    pub fn respond_verbose_with<C>(&self, input: &str, chooser: &mut C) -> RespondTrace
    where
        C: Chooser + ?Sized,
    {
        let started = Instant::now();
        let (reply, selection) = self.answer(input, chooser);
        let elapsed = started.elapsed();

        match selection {
            Some(sel) => RespondTrace {
                reply,
                rule: Some(sel.rule),
                pattern: Some(self.responses.rules()[sel.rule].pattern().as_str().to_string()),
                template: Some(sel.template),
                groups: sel.groups,
                reflected: sel.reflected,
                elapsed,
            },
            None => RespondTrace { reply, elapsed, ..RespondTrace::default() },
        }
    }

    fn answer<C>(&self, input: &str, chooser: &mut C) -> (String, Option<Selection>)
    where
        C: Chooser + ?Sized,
    {
        let Some(found) = self.responses.find_first_match(input) else {
            debug!(input, "no response rule matched; using fallback");
            return (FALLBACK_RESPONSE.to_string(), None);
        };

        let (template_idx, template) = engine::choose(chooser, found.rule.candidates());
        let reflected: Vec<String> =
            found.groups.iter().map(|group| engine::reflect(&self.substitutions, group, chooser)).collect();
        let reply = engine::interpolate(template, &reflected);

        debug!(
            rule = found.index,
            pattern = found.rule.pattern().as_str(),
            groups = found.groups.len(),
            template = template_idx,
            "matched response rule"
        );

        let selection = Selection { rule: found.index, template: template_idx, groups: found.groups, reflected };
        (reply, Some(selection))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_rules;
    use crate::ParseErrorKind;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::io::Write;

    fn first(_: usize) -> usize {
        0
    }

    fn engine(responses: &str, substitutions: &str) -> ResponseEngine {
        ResponseEngine::new(parse_rules(responses).unwrap(), parse_rules(substitutions).unwrap())
    }

    fn shipped_engine() -> ResponseEngine {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("data");
        ResponseEngine::from_files(dir.join("responses.txt"), dir.join("substitutions.txt")).unwrap()
    }

    #[test]
    fn i_am_tired() {
        let eng = engine("I am (.*)\nWhy are you $1?\n", "^am$\nare\n");
        assert_eq!(eng.respond_with("I am tired", &mut first), "Why are you tired?");
    }

    #[test]
    fn i_need_my_mother() {
        let eng = engine("I need (.*)\nWhy do you need $1?\n", "my\nyour\n");
        assert_eq!(eng.respond_with("I need my mother", &mut first), "Why do you need your mother?");
    }

    #[test]
    fn unmatched_input_gets_fallback() {
        let eng = engine("I need (.*)\nWhy do you need $1?\n", "my\nyour\n");
        assert_eq!(eng.respond_with("xyzzy", &mut first), "I don't know what to say.");
        assert_eq!(eng.respond("xyzzy"), FALLBACK_RESPONSE);
    }

    #[test]
    fn empty_engine_always_falls_back() {
        let eng = ResponseEngine::new(RuleSet::default(), RuleSet::default());
        assert_eq!(eng.respond(""), FALLBACK_RESPONSE);
    }

    #[test]
    fn markers_and_placeholders() {
        let eng = engine("I am (.*)\n~~I hear you~~ say $1\n", "");
        assert_eq!(eng.respond_with("I am tired", &mut first), "I hear you say tired");
    }

    #[test]
    fn fixed_template_ignores_groups() {
        let eng = engine("(\\w+) (\\w+)\nPlease go on.\n", "my\nyour\n");
        assert_eq!(eng.respond_with("my words", &mut first), "Please go on.");
    }

    #[test]
    fn candidates_only_come_from_first_matching_rule() {
        let eng = engine("hello\nA1\nA2\nA3\n\nhello (.*)\nB1\nB2\n\n(.*)\nC1\n", "");
        let mut rng = RngChooser(StdRng::seed_from_u64(42));

        for _ in 0..50 {
            let reply = eng.respond_with("hello there", &mut rng);
            assert!(reply.starts_with('A'), "unexpected reply {reply}");
        }
    }

    #[test]
    fn template_draw_happens_before_reflection_draws() {
        let eng = engine("I feel (.*)\nT0 $1\nT1 $1\n", "you\nI\nme\n");
        let mut script = vec![1, 1, 0].into_iter();
        let mut scripted = |_: usize| script.next().unwrap_or(0);

        assert_eq!(eng.respond_with("I feel you hate you", &mut scripted), "T1 me hate I");
    }

    #[test]
    fn missing_groups_leave_placeholders() {
        let eng = engine("I am (.*)\nYou are $1, not $2.\n", "");
        assert_eq!(eng.respond_with("I am here", &mut first), "You are here, not $2.");
    }

    #[test]
    fn reflection_drops_punctuation_from_groups() {
        let eng = engine("(?i)because (.*)\nIs that the real reason you say $1?\n", "(?i)i\nyou\n");
        assert_eq!(
            eng.respond_with("Because I said so, okay?", &mut first),
            "Is that the real reason you say you said so okay?"
        );
    }

    #[test]
    fn verbose_trace_agrees_with_plain_reply() {
        let eng = engine("nope\nx\n\nI need (.*)\nWhy do you need $1?\nGet $1!\n", "my\nyour\n");

        let plain = eng.respond_with("I need my coat.", &mut |len: usize| len - 1);
        let trace = eng.respond_verbose_with("I need my coat.", &mut |len: usize| len - 1);

        assert_eq!(trace.reply, plain);
        assert_eq!(trace.reply, "Get your coat!");
        assert_eq!(trace.rule, Some(1));
        assert_eq!(trace.pattern.as_deref(), Some("I need (.*)"));
        assert_eq!(trace.template, Some(1));
        assert_eq!(trace.groups, vec!["my coat.".to_string()]);
        assert_eq!(trace.reflected, vec!["your coat".to_string()]);
        assert!(!trace.is_fallback());
    }

    #[test]
    fn verbose_trace_marks_fallback() {
        let eng = engine("I need (.*)\nx\n", "");
        let trace = eng.respond_verbose_with("xyzzy", &mut first);

        assert!(trace.is_fallback());
        assert_eq!(trace.reply, FALLBACK_RESPONSE);
        assert!(trace.groups.is_empty());
    }

    #[test]
    fn engine_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ResponseEngine>();

        let eng = std::sync::Arc::new(engine("I need (.*)\nWhy do you need $1?\n", "my\nyour\n"));
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let eng = eng.clone();
                std::thread::spawn(move || eng.respond("I need my tea"))
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), "Why do you need your tea?");
        }
    }

    #[test]
    fn load_rule_file_reads_and_parses() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# greetings\nhello\nHi.\nHey.\n\nbye\nBye.").unwrap();

        let set = load_rule_file(file.path()).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.rules()[0].candidates().len(), 2);
    }

    #[test]
    fn load_rule_file_missing_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.txt");

        let err = load_rule_file(&missing).unwrap_err();
        assert!(matches!(err, LoadError::Io { ref path, .. } if path == &missing));
        assert!(err.to_string().contains("nope.txt"));
    }

    #[test]
    fn load_rule_file_malformed_is_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "hello\n\nbye\nBye.").unwrap();

        match load_rule_file(file.path()).unwrap_err() {
            LoadError::Parse { source, .. } => {
                assert_eq!(source.line, 1);
                assert!(matches!(source.kind, ParseErrorKind::EmptySection { .. }));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn from_files_fails_when_either_file_is_missing() {
        let dir = tempfile::tempdir().unwrap();
        let mut responses = tempfile::NamedTempFile::new().unwrap();
        writeln!(responses, "hello\nHi.").unwrap();

        let err = ResponseEngine::from_files(responses.path(), dir.path().join("missing.txt")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }

    #[test]
    fn shipped_rule_files_load_and_converse() {
        let eng = shipped_engine();
        assert!(!eng.responses().is_empty());
        assert!(!eng.substitutions().is_empty());

        let trace = eng.respond_verbose_with("I need my mother", &mut first);
        assert_eq!(trace.reply, "Why do you need your mother?");

        let trace = eng.respond_verbose_with("quit", &mut first);
        assert!(!trace.is_fallback());
    }
}
