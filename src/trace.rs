//! Records a complete run as a list of frames that can be replayed or exported as JSON.

use crate::machine::Automaton;
use crate::tape::{Snapshot, Tape};
use crate::types::{PreconditionViolation, State, Step, Verdict};
use serde::{Deserialize, Serialize};
use std::ops::ControlFlow;

/// The configuration of the machine after a given number of steps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frame {
    pub step: usize,
    pub state: State,
    pub snapshot: Snapshot,
}

/// Every configuration a run went through, from the initial tape to the verdict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trace {
    /// The case-folded, trimmed input.
    pub input: String,
    /// Whether the input already contained marker symbols.
    pub premarked: bool,
    /// Frame 0 is the initial configuration.
    pub frames: Vec<Frame>,
    pub verdict: Verdict,
}

impl Trace {
    /// Runs a fresh machine on `raw` and records every step.
    pub fn record(raw: &str) -> Result<Self, PreconditionViolation> {
        let tape = Tape::new(raw);
        let input = tape.input().to_string();
        let premarked = tape.is_premarked();

        let mut machine = Automaton::new(tape);
        let mut frames = vec![Frame {
            step: 0,
            state: machine.state(),
            snapshot: machine.snapshot(),
        }];

        let mut record = |snapshot: &Snapshot, state: State| -> ControlFlow<()> {
            let step = frames.len();
            frames.push(Frame {
                step,
                state,
                snapshot: snapshot.clone(),
            });
            ControlFlow::Continue(())
        };

        let verdict = loop {
            if let Step::Halt(verdict) = machine.run(Some(&mut record))? {
                break verdict;
            }
        };

        Ok(Self {
            input,
            premarked,
            frames,
            verdict,
        })
    }

    /// Returns the number of steps the run took.
    pub fn steps(&self) -> usize {
        self.frames.len() - 1
    }

    /// Serializes the trace as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
