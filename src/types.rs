//! This module defines the core data structures and types shared by the tape and the
//! automaton: tape symbols, machine states, head directions, step outcomes and error types.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// The symbol the automaton writes over a letter once it has been matched.
pub const MARKER_SYMBOL: char = '#';
/// The character used to display (and to type) a blank cell.
pub const INPUT_BLANK_SYMBOL: char = '_';

/// A single cell of the tape.
///
/// Symbols serialize as the character they are displayed with, so a tape
/// `[A, Marker, Blank]` becomes `["a", "#", "_"]` in JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "char", from = "char")]
pub enum Symbol {
    A,
    B,
    C,
    /// A letter that has already been matched.
    Marker,
    /// No symbol written.
    Blank,
    /// Any character outside the machine's alphabet, including whitespace inside
    /// the input. It stays on the tape and is rejected by the transition table.
    Other(char),
}

impl Symbol {
    /// Returns `true` for the letters the automaton is allowed to mark.
    pub fn is_markable(self) -> bool {
        matches!(self, Symbol::A | Symbol::B | Symbol::C)
    }

    /// Returns the character used when displaying this symbol.
    pub fn as_char(self) -> char {
        match self {
            Symbol::A => 'a',
            Symbol::B => 'b',
            Symbol::C => 'c',
            Symbol::Marker => MARKER_SYMBOL,
            Symbol::Blank => INPUT_BLANK_SYMBOL,
            Symbol::Other(c) => c,
        }
    }
}

impl From<char> for Symbol {
    fn from(c: char) -> Self {
        match c {
            'a' => Symbol::A,
            'b' => Symbol::B,
            'c' => Symbol::C,
            MARKER_SYMBOL => Symbol::Marker,
            INPUT_BLANK_SYMBOL => Symbol::Blank,
            c => Symbol::Other(c),
        }
    }
}

impl From<Symbol> for char {
    fn from(symbol: Symbol) -> Self {
        symbol.as_char()
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// The states of the aⁿbⁿcⁿ decider.
///
/// - `Q0`: looks for the leftmost unmatched `a`, skipping marks.
/// - `Q1`: hunts right for the matching `b`.
/// - `Q2`: hunts right for the matching `c`.
/// - `Q3`: checks the cell after the matched `c` and turns back.
/// - `Q4`: rewinds over marks and `b`s.
/// - `Q5`: rewinds over the remaining unmatched `a`s.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum State {
    Q0,
    Q1,
    Q2,
    Q3,
    Q4,
    Q5,
    Accept,
    Reject,
}

impl State {
    /// Accept and Reject have no outgoing transitions.
    pub fn is_terminal(self) -> bool {
        matches!(self, State::Accept | State::Reject)
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            State::Q0 => "q0",
            State::Q1 => "q1",
            State::Q2 => "q2",
            State::Q3 => "q3",
            State::Q4 => "q4",
            State::Q5 => "q5",
            State::Accept => "accept",
            State::Reject => "reject",
        };
        f.write_str(name)
    }
}

/// Represents the possible directions the head can move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Move the head one position to the left.
    Left,
    /// Move the head one position to the right.
    Right,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Left => f.write_str("left"),
            Direction::Right => f.write_str("right"),
        }
    }
}

/// Represents the outcome of a step, or of a run that was asked to stop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// The machine has not reached a terminal state yet.
    Continue,
    /// The machine has reached Accept or Reject.
    Halt(Verdict),
}

/// The final answer of the decider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Accept,
    Reject(Rejection),
}

impl Verdict {
    pub fn is_accept(&self) -> bool {
        matches!(self, Verdict::Accept)
    }

    /// Returns the terminal state this verdict corresponds to.
    pub fn state(&self) -> State {
        match self {
            Verdict::Accept => State::Accept,
            Verdict::Reject(_) => State::Reject,
        }
    }
}

/// Details of a rejection: the symbol under the head when no transition
/// applied, and the tape index it was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rejection {
    pub symbol: Symbol,
    pub index: usize,
}

/// Programming errors: operations invoked outside of their contract.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PreconditionViolation {
    /// Only `a`, `b` and `c` may be overwritten with the marker.
    #[error("Cannot mark symbol '{symbol}' at index {index}")]
    Unmarkable { symbol: Symbol, index: usize },
    /// The automaton has already reached a terminal state.
    #[error("Automaton already halted in state {0}")]
    Halted(State),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_from_char() {
        assert_eq!(Symbol::from('a'), Symbol::A);
        assert_eq!(Symbol::from('#'), Symbol::Marker);
        assert_eq!(Symbol::from('_'), Symbol::Blank);
        assert_eq!(Symbol::from(' '), Symbol::Other(' '));
        assert_eq!(Symbol::from('\t'), Symbol::Other('\t'));
        assert_eq!(Symbol::from('x'), Symbol::Other('x'));
    }

    #[test]
    fn test_symbol_serialization() {
        let cells = vec![Symbol::A, Symbol::Marker, Symbol::Blank, Symbol::Other('z')];

        let json = serde_json::to_string(&cells).unwrap();
        assert_eq!(json, r##"["a","#","_","z"]"##);

        let deserialized: Vec<Symbol> = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, cells);
    }

    #[test]
    fn test_markable_symbols() {
        assert!(Symbol::A.is_markable());
        assert!(Symbol::C.is_markable());
        assert!(!Symbol::Marker.is_markable());
        assert!(!Symbol::Blank.is_markable());
    }

    #[test]
    fn test_terminal_states() {
        assert!(State::Accept.is_terminal());
        assert!(State::Reject.is_terminal());
        assert!(!State::Q0.is_terminal());
        assert!(!State::Q5.is_terminal());
    }

    #[test]
    fn test_error_display() {
        let error = PreconditionViolation::Unmarkable {
            symbol: Symbol::Blank,
            index: 3,
        };
        let error_msg = format!("{}", error);
        assert!(error_msg.contains("'_'"));
        assert!(error_msg.contains("index 3"));

        let error = PreconditionViolation::Halted(State::Accept);
        assert!(format!("{}", error).contains("accept"));
    }
}
