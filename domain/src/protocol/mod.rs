//! Tip protocol
//!
//! The rules the reasoning engine must follow while writing a tip, expressed
//! as a finite-state machine:
//!
//! ```text
//!       evidence delivered        final_answer / end-turn text
//!  Idle ─────────────────▶ Gathering ───────────────────────────▶ Terminated
//!   │  ▲                     │  ▲
//!   └──┘ rejected / refused  └──┘ more evidence calls / rejected
//! ```
//!
//! - No answer is accepted while `Idle`; at least one evidence call must reach
//!   a registered source with a valid `name` first. Calls to unknown tools or
//!   without a subject are refused and count as violations.
//! - Exactly one `final_answer` per response, never mixed with evidence calls.
//! - The answer must be non-empty after trimming.
//!
//! [`TipProtocol::advance`] classifies one engine response into a
//! [`TurnAction`]; the caller executes the action, reports gathered calls
//! through [`TipProtocol::record_evidence`], and re-prompts on rejection
//! until [`TipProtocol::violation_budget_exhausted`].

mod state;

pub use state::{
    DEFAULT_MAX_PROTOCOL_VIOLATIONS, DEFAULT_MAX_TOOL_TURNS, ProtocolState, ProtocolViolation,
    TipProtocol, TurnAction,
};
