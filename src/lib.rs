//! This crate provides the core of a single-tape Turing machine that decides the
//! language aⁿbⁿcⁿ. It includes the auto-extending tape, the fixed transition table,
//! the automaton that steps through it, and a recorder for complete runs.

pub mod machine;
pub mod tape;
pub mod trace;
pub mod transition;
pub mod types;

/// Re-exports the `Automaton` struct and the `Observer` trait from the machine module.
pub use machine::{Automaton, Observer};
/// Re-exports the `Tape` and `Snapshot` structs from the tape module.
pub use tape::{Snapshot, Tape};
/// Re-exports the `Trace` and `Frame` structs from the trace module.
pub use trace::{Frame, Trace};
/// Re-exports the transition table lookup from the transition module.
pub use transition::{transition, Action, Transition};
/// Re-exports the symbol, state and outcome types from the types module.
pub use types::{
    Direction, PreconditionViolation, Rejection, State, Step, Symbol, Verdict, MARKER_SYMBOL,
};
