//! The fixed transition table of the aⁿbⁿcⁿ decider.
//!
//! Each pass marks the leftmost unmatched `a`, then the first unmatched `b` and `c`
//! to its right, and rewinds to the start of the unmatched prefix. Once no unmatched
//! `a` remains, `Q0` walks over the marks and accepts on the first blank.

use crate::types::{Direction, State, Symbol};

/// What the machine does to the tape before moving on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Leave the cell as it is.
    Keep,
    /// Overwrite the cell with the marker symbol.
    Mark,
}

/// One entry of the transition table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub action: Action,
    pub direction: Direction,
    pub next_state: State,
}

impl Transition {
    const fn new(action: Action, direction: Direction, next_state: State) -> Self {
        Self {
            action,
            direction,
            next_state,
        }
    }
}

/// Looks up the transition for `state` reading `symbol`.
///
/// Returns `None` when the pair has no entry, which means the machine rejects.
/// Terminal states have no entries at all.
pub fn transition(state: State, symbol: Symbol) -> Option<Transition> {
    use Action::{Keep, Mark};
    use Direction::{Left, Right};

    let (action, direction, next_state) = match (state, symbol) {
        (State::Q0, Symbol::A) => (Mark, Right, State::Q1),
        (State::Q0, Symbol::Marker) => (Keep, Right, State::Q0),
        (State::Q0, Symbol::Blank) => (Keep, Right, State::Accept),

        (State::Q1, Symbol::A | Symbol::Marker) => (Keep, Right, State::Q1),
        (State::Q1, Symbol::B) => (Mark, Right, State::Q2),

        (State::Q2, Symbol::B | Symbol::Marker) => (Keep, Right, State::Q2),
        (State::Q2, Symbol::C) => (Mark, Right, State::Q3),

        (State::Q3, Symbol::C | Symbol::Blank) => (Keep, Left, State::Q4),

        (State::Q4, Symbol::A) => (Keep, Left, State::Q5),
        (State::Q4, Symbol::B | Symbol::Marker) => (Keep, Left, State::Q4),
        (State::Q4, Symbol::Blank) => (Keep, Right, State::Q0),

        (State::Q5, Symbol::A) => (Keep, Left, State::Q5),
        (State::Q5, Symbol::Marker) => (Keep, Right, State::Q0),

        _ => return None,
    };

    Some(Transition::new(action, direction, next_state))
}

#[cfg(test)]
mod tests {
    use super::*;

    const STATES: [State; 8] = [
        State::Q0,
        State::Q1,
        State::Q2,
        State::Q3,
        State::Q4,
        State::Q5,
        State::Accept,
        State::Reject,
    ];

    const SYMBOLS: [Symbol; 6] = [
        Symbol::A,
        Symbol::B,
        Symbol::C,
        Symbol::Marker,
        Symbol::Blank,
        Symbol::Other('x'),
    ];

    #[test]
    fn test_marking_transitions() {
        assert_eq!(
            transition(State::Q0, Symbol::A),
            Some(Transition::new(Action::Mark, Direction::Right, State::Q1))
        );
        assert_eq!(
            transition(State::Q1, Symbol::B),
            Some(Transition::new(Action::Mark, Direction::Right, State::Q2))
        );
        assert_eq!(
            transition(State::Q2, Symbol::C),
            Some(Transition::new(Action::Mark, Direction::Right, State::Q3))
        );
    }

    #[test]
    fn test_only_q0_accepts() {
        for state in STATES {
            for symbol in SYMBOLS {
                if let Some(t) = transition(state, symbol) {
                    if t.next_state == State::Accept {
                        assert_eq!((state, symbol), (State::Q0, Symbol::Blank));
                    }
                }
            }
        }
    }

    #[test]
    fn test_marks_only_letters() {
        for state in STATES {
            for symbol in SYMBOLS {
                if let Some(t) = transition(state, symbol) {
                    if t.action == Action::Mark {
                        assert!(symbol.is_markable(), "{state} marks {symbol}");
                    }
                }
            }
        }
    }

    #[test]
    fn test_terminal_states_have_no_transitions() {
        for symbol in SYMBOLS {
            assert_eq!(transition(State::Accept, symbol), None);
            assert_eq!(transition(State::Reject, symbol), None);
        }
    }

    #[test]
    fn test_unknown_symbols_reject() {
        for state in STATES {
            assert_eq!(transition(state, Symbol::Other('x')), None);
        }
    }

    #[test]
    fn test_table_size() {
        let defined = STATES
            .iter()
            .flat_map(|&state| SYMBOLS.iter().map(move |&symbol| (state, symbol)))
            .filter(|&(state, symbol)| transition(state, symbol).is_some())
            .count();

        assert_eq!(defined, 17);
    }

    #[test]
    fn test_rewind_transitions() {
        assert_eq!(
            transition(State::Q3, Symbol::Blank).map(|t| (t.direction, t.next_state)),
            Some((Direction::Left, State::Q4))
        );
        assert_eq!(
            transition(State::Q4, Symbol::Blank).map(|t| (t.direction, t.next_state)),
            Some((Direction::Right, State::Q0))
        );
        assert_eq!(
            transition(State::Q5, Symbol::Marker).map(|t| (t.direction, t.next_state)),
            Some((Direction::Right, State::Q0))
        );
        assert_eq!(transition(State::Q4, Symbol::C), None);
    }
}
