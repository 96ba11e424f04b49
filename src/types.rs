//! Core data structures shared across the crate: symbols, transition rules,
//! head motions, execution outcomes, trace records, and error types.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Marker trait for tape symbols.
///
/// The engine treats the alphabet as open: any cheaply clonable,
/// equality-comparable type works as a symbol. The blanket impl means
/// callers never implement this by hand.
pub trait Symbol: Clone + PartialEq + fmt::Debug {}

impl<T: Clone + PartialEq + fmt::Debug> Symbol for T {}

/// The alphabet used by the bundled sample programs: a blank marker, the
/// binary digits, and a start-of-tape marker conventionally held at cell 0.
///
/// The start marker is a convention of the sample programs, not an engine
/// invariant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sym {
    /// The designated "no content" symbol.
    #[serde(rename = "_")]
    Blank,
    #[serde(rename = "0")]
    Zero,
    #[serde(rename = "1")]
    One,
    /// Start-of-tape marker.
    #[serde(rename = "start")]
    Start,
}

/// What the head does after a rule's write has been applied.
///
/// Unlike a plain direction, `Halt` is a first-class motion: the rule that
/// carries it still writes its symbol, then the run terminates normally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Motion {
    /// Move the head one cell to the left. Moving left of cell 0 is a
    /// malformed-program error.
    Left,
    /// Move the head one cell to the right.
    Right,
    /// Terminate the run after this step's write.
    Halt,
}

/// A single transition rule: when the scanned symbol equals `match_symbol`,
/// write `write_symbol`, shift the state index by `state_delta`, and apply
/// `motion`.
///
/// `state_delta` is a signed offset: `0` stays, `1` advances, `-1` returns,
/// and any other value jumps (the bundled addition program uses `-8` to
/// restart its table). The resulting index is validated lazily at the next
/// lookup, never here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule<S> {
    pub match_symbol: S,
    pub write_symbol: S,
    pub motion: Motion,
    #[serde(default)]
    pub state_delta: i64,
}

/// Outcome of a single executed step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// The machine performed a step and can take another.
    Continue,
    /// The machine executed a halt rule (or was already halted).
    Halted,
}

/// Observational record of one executed step, emitted to a caller-supplied
/// sink. `state` and `head` are the values *before* the step; `next_state`
/// is the index the following lookup will use. Tracing never influences
/// control flow.
#[derive(Debug, Clone, PartialEq)]
pub struct TraceEvent<S> {
    /// 1-based number of the step that produced this event.
    pub step: usize,
    pub state: i64,
    pub head: usize,
    pub scanned: S,
    pub wrote: S,
    pub motion: Motion,
    pub next_state: i64,
}

/// Errors that terminate a run. All are local to a single run; the engine
/// holds no global state to corrupt. Transitions are deterministic, so a
/// failed run fails identically on retry and is never retried internally.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MachineError<S: fmt::Debug> {
    /// No rule in the current state's list matches the scanned symbol.
    #[error("no rule in state {state} matches symbol {symbol:?}")]
    NoMatchingRule { state: i64, symbol: S },
    /// A rule asked the head to move left of cell 0.
    #[error("head underflow: move left attempted at cell {head}")]
    HeadUnderflow { head: usize },
    /// A state delta produced an index outside the program table.
    #[error("state {state} is outside the program table")]
    StateOutOfRange { state: i64 },
    /// The configured step bound was reached before a halt rule.
    #[error("no halt reached within {limit} steps")]
    StepLimitExceeded { limit: usize },
}

/// Errors from the ambient program-handling surface: loading blueprints from
/// disk and static analysis. Distinct from [`MachineError`], which covers
/// run-time failures only.
#[derive(Debug, Error)]
pub enum ProgramError {
    #[error("program parsing error: {0}")]
    ParseError(#[from] serde_json::Error),
    #[error("program validation error: {0}")]
    ValidationError(String),
    #[error("file error: {0}")]
    FileError(String),
}
