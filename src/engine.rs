//! Rule engine.
//!
//! The engine is split into small submodules that each own one step of turning
//! user text into a reply:
//!
//! ```text
//! rule file text ── parse_rules (parser.rs) ──▶ RuleSet
//!
//! input ── RuleSet::find_first_match (rule_set.rs)
//!            │  rule + groups 1..N
//!            v
//!          Chooser::pick (chooser.rs)          template index
//!            │
//!            v
//!          reflect (reflect.rs)                one call per group
//!            │  tokenize, whole-token substitution, rejoin
//!            v
//!          interpolate (interpolate.rs)        $1..$N, then strip `~~`
//!            │
//!            v
//!          reply (+ RespondTrace, metrics.rs, when asked for)
//! ```
//!
//! Every step is a pure function of its inputs plus the injected [`Chooser`],
//! so a scripted chooser makes the whole pipeline deterministic.
//!
//! ## Debugging
//!
//! The engine emits `tracing` events under the `echolalia` target. The binary
//! turns them on with `ECHOLALIA_DEBUG_RULES=1` or `RUST_LOG=echolalia=trace`.

#[path = "engine/chooser.rs"]
mod chooser;
#[path = "engine/interpolate.rs"]
mod interpolate;
#[path = "engine/metrics.rs"]
mod metrics;
#[path = "engine/parser.rs"]
mod parser;
#[path = "engine/reflect.rs"]
mod reflect;
#[path = "engine/rule_set.rs"]
mod rule_set;

pub use chooser::{Chooser, RngChooser};
pub(crate) use chooser::choose;
pub use interpolate::interpolate;
pub use metrics::RespondTrace;
pub use parser::parse_rules;
pub use reflect::reflect;
pub use rule_set::RuleMatch;
