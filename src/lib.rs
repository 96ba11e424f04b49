//! Execution engine for a deterministic single-tape Turing machine.
//!
//! A program is a table of per-state, per-symbol transition rules; the
//! machine repeatedly reads the symbol under its head, writes a
//! replacement, shifts its state by the rule's signed delta, and moves the
//! head, until a halt rule fires or a defined error ends the run. The
//! engine is usable as a pure function from an initial configuration to a
//! final tape, with an optional trace stream for diagnostics.
//!
//! ```
//! use machina::{run, Motion, Program, Rule, Sym, Tape};
//!
//! // One state: skip Ones rightward, mark the first blank and halt.
//! let program = Program::new(
//!     "mark first blank",
//!     vec![vec![
//!         Rule { match_symbol: Sym::One, write_symbol: Sym::One, motion: Motion::Right, state_delta: 0 },
//!         Rule { match_symbol: Sym::Blank, write_symbol: Sym::Zero, motion: Motion::Halt, state_delta: 0 },
//!     ]],
//! );
//! let tape = Tape::new(vec![Sym::One, Sym::One], Sym::Blank);
//! let final_tape = run(tape, program, 0, 0).unwrap();
//! assert_eq!(final_tape.cells(), &[Sym::One, Sym::One, Sym::Zero]);
//! ```

pub mod analyzer;
pub mod encoder;
pub mod loader;
pub mod machine;
pub mod program;
pub mod programs;
pub mod tape;
pub mod types;

/// Re-exports the static analysis entry point and its error type.
pub use analyzer::{analyze, AnalysisError};
/// Re-exports the numeral helpers for the sample alphabet.
pub use encoder::{decode, encode, DecodeError};
/// Re-exports the blueprint document and the file loader.
pub use loader::{Blueprint, ProgramLoader};
/// Re-exports the machine and the run entry point.
pub use machine::{run, Machine};
/// Re-exports the program table.
pub use program::Program;
/// Re-exports the embedded sample program registry.
pub use programs::{ProgramInfo, ProgramManager, PROGRAMS};
/// Re-exports the tape.
pub use tape::Tape;
/// Re-exports the shared data model and error types.
pub use types::{MachineError, Motion, ProgramError, Rule, Step, Sym, Symbol, TraceEvent};
