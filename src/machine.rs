//! This module defines the `Automaton`, which drives a `Tape` through the fixed
//! transition table until it accepts or rejects, and the `Observer` hook used by
//! front ends to watch every step.

use crate::tape::{Snapshot, Tape};
use crate::transition::{transition, Action};
use crate::types::{Direction, PreconditionViolation, Rejection, State, Step, Verdict};
use std::ops::ControlFlow;

/// Receives the tape and the new state after every step of a run.
///
/// Returning `ControlFlow::Break(())` stops the run between two steps; the
/// automaton can be resumed later with another call to `run` or `step`.
pub trait Observer {
    fn observe(&mut self, snapshot: &Snapshot, state: State) -> ControlFlow<()>;
}

impl<F> Observer for F
where
    F: FnMut(&Snapshot, State) -> ControlFlow<()>,
{
    fn observe(&mut self, snapshot: &Snapshot, state: State) -> ControlFlow<()> {
        self(snapshot, state)
    }
}

/// A deterministic single-tape machine deciding aⁿbⁿcⁿ.
///
/// The automaton exclusively owns its tape. Once it reaches Accept or Reject it
/// never changes again; build a new one from a fresh `Tape` to run another input.
pub struct Automaton {
    state: State,
    tape: Tape,
    verdict: Option<Verdict>,
    step_count: usize,
}

impl Automaton {
    /// Creates an automaton in state `Q0` with the head wherever the tape left it.
    pub fn new(tape: Tape) -> Self {
        Self {
            state: State::Q0,
            tape,
            verdict: None,
            step_count: 0,
        }
    }

    /// Executes a single transition.
    ///
    /// Reads the symbol under the head, applies the table entry for the current
    /// state (mark, then move) and switches state. A missing entry moves the machine
    /// to Reject and records the offending symbol and its index. An empty tape is
    /// accepted immediately without touching it.
    ///
    /// # Returns
    ///
    /// * `Ok(Step::Continue)` if the machine is still running.
    /// * `Ok(Step::Halt(_))` if this step reached Accept or Reject.
    /// * `Err(PreconditionViolation::Halted)` if the machine had already halted.
    pub fn step(&mut self) -> Result<Step, PreconditionViolation> {
        if self.state.is_terminal() {
            return Err(PreconditionViolation::Halted(self.state));
        }

        if self.tape.is_empty() {
            return Ok(self.halt(Verdict::Accept));
        }

        let symbol = self.tape.symbol_at_head();
        let Some(transition) = transition(self.state, symbol) else {
            let index = self.tape.head();
            log::debug!(
                "No transition from {} on character {} at index {}",
                self.state,
                symbol,
                index
            );

            self.step_count += 1;
            return Ok(self.halt(Verdict::Reject(Rejection { symbol, index })));
        };

        let mut current = symbol;
        if transition.action == Action::Mark {
            self.tape.mark_current()?;
            current = self.tape.symbol_at_head();
            log::debug!("Marked character {} with {}", symbol, current);
        }

        match transition.direction {
            Direction::Left => self.tape.move_left(),
            Direction::Right => self.tape.move_right(),
        }
        log::debug!("Moved {} from character {}", transition.direction, current);

        self.state = transition.next_state;
        self.step_count += 1;

        match self.state {
            State::Accept => Ok(self.halt(Verdict::Accept)),
            _ => Ok(Step::Continue),
        }
    }

    /// Runs the machine until it halts or the observer asks it to stop.
    ///
    /// The observer, if any, is called after every step including the final one.
    /// An empty tape is accepted without stepping, so the observer is never called.
    ///
    /// # Returns
    ///
    /// * `Ok(Step::Halt(verdict))` once the machine reaches Accept or Reject.
    /// * `Ok(Step::Continue)` if the observer stopped the run early.
    /// * `Err(PreconditionViolation::Halted)` if the machine had already halted.
    pub fn run(
        &mut self,
        mut observer: Option<&mut dyn Observer>,
    ) -> Result<Step, PreconditionViolation> {
        if self.state.is_terminal() {
            return Err(PreconditionViolation::Halted(self.state));
        }

        if self.tape.is_empty() {
            return Ok(self.halt(Verdict::Accept));
        }

        loop {
            let step = self.step()?;

            let flow = match observer.as_deref_mut() {
                Some(observer) => observer.observe(&self.tape.snapshot(), self.state),
                None => ControlFlow::Continue(()),
            };

            match step {
                Step::Halt(_) => return Ok(step),
                Step::Continue if flow.is_break() => return Ok(Step::Continue),
                Step::Continue => {}
            }
        }
    }

    fn halt(&mut self, verdict: Verdict) -> Step {
        self.state = verdict.state();
        self.verdict = Some(verdict.clone());
        Step::Halt(verdict)
    }

    /// Returns the current state of the machine.
    pub fn state(&self) -> State {
        self.state
    }

    /// Returns the tape the machine is working on.
    pub fn tape(&self) -> &Tape {
        &self.tape
    }

    /// Returns the verdict once the machine has halted.
    pub fn verdict(&self) -> Option<&Verdict> {
        self.verdict.as_ref()
    }

    /// Returns the total number of steps executed.
    pub fn step_count(&self) -> usize {
        self.step_count
    }

    /// Checks if the machine has reached Accept or Reject.
    pub fn is_halted(&self) -> bool {
        self.state.is_terminal()
    }

    /// Returns a copy of the tape and head position.
    pub fn snapshot(&self) -> Snapshot {
        self.tape.snapshot()
    }
}
