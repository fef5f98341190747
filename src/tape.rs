//! This module defines the `Tape`, the machine's auto-extending memory, and `Snapshot`,
//! the read-only view of it handed to observers.

use crate::types::{PreconditionViolation, Symbol, INPUT_BLANK_SYMBOL, MARKER_SYMBOL};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single tape whose ends grow by one blank cell whenever the head steps past them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tape {
    cells: Vec<Symbol>,
    head: usize,
    input: String,
    premarked: bool,
}

impl Tape {
    /// Creates a tape from a raw line of user input.
    ///
    /// The input is case-folded and trimmed, leading blanks (`_` or whitespace) are
    /// stripped and the head is placed on the first remaining cell. An input that
    /// already contains the marker symbol is logged as a warning but kept as is.
    ///
    /// # Arguments
    ///
    /// * `raw` - The candidate string, exactly as the user typed it.
    pub fn new(raw: &str) -> Self {
        let input = raw.trim().to_lowercase();

        let premarked = input.contains(MARKER_SYMBOL);
        if premarked {
            log::warn!(
                "Input '{}' already contains pre-marked '{}' symbols; running it anyway",
                input,
                MARKER_SYMBOL
            );
        }

        let cells = input
            .trim_start_matches(|c: char| c == INPUT_BLANK_SYMBOL || c.is_whitespace())
            .trim_end()
            .chars()
            .map(Symbol::from)
            .collect();

        Self {
            cells,
            head: 0,
            input,
            premarked,
        }
    }

    /// Returns the symbol under the head. An empty tape reads as blank.
    pub fn symbol_at_head(&self) -> Symbol {
        self.cells.get(self.head).copied().unwrap_or(Symbol::Blank)
    }

    /// Overwrites the cell under the head with the marker symbol and returns the
    /// symbol that was there.
    ///
    /// # Returns
    ///
    /// * `Ok(Symbol)` if the head was over `a`, `b` or `c`.
    /// * `Err(PreconditionViolation::Unmarkable)` for any other cell; the tape is left untouched.
    pub fn mark_current(&mut self) -> Result<Symbol, PreconditionViolation> {
        let symbol = self.symbol_at_head();
        if !symbol.is_markable() {
            return Err(PreconditionViolation::Unmarkable {
                symbol,
                index: self.head,
            });
        }

        self.cells[self.head] = Symbol::Marker;
        Ok(symbol)
    }

    /// Moves the head one cell to the left, prepending a blank when it is
    /// already on the leftmost cell. The head then sits on the new blank.
    pub fn move_left(&mut self) {
        if self.head == 0 {
            self.cells.insert(0, Symbol::Blank);
        } else {
            self.head -= 1;
        }
    }

    /// Moves the head one cell to the right, appending a blank when it is
    /// already on the rightmost cell. The head then sits on the new blank.
    pub fn move_right(&mut self) {
        self.head += 1;
        if self.head >= self.cells.len() {
            self.cells.push(Symbol::Blank);
            self.head = self.cells.len() - 1;
        }
    }

    /// Returns a copy of the cells and the head position.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            cells: self.cells.clone(),
            head: self.head,
        }
    }

    /// Returns the index of the cell under the head.
    pub fn head(&self) -> usize {
        self.head
    }

    /// Returns the cells from the leftmost to the rightmost.
    pub fn cells(&self) -> &[Symbol] {
        &self.cells
    }

    /// Returns the number of cells, including blanks added by head moves.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns `true` only for a tape built from an input with nothing but blanks.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Returns the case-folded, trimmed input the tape was created from.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Returns `true` if the input already contained marker symbols.
    pub fn is_premarked(&self) -> bool {
        self.premarked
    }
}

/// A read-only copy of the tape at one point of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub cells: Vec<Symbol>,
    pub head: usize,
}

impl Snapshot {
    /// Returns the symbol under the head, if any.
    pub fn symbol(&self) -> Option<Symbol> {
        self.cells.get(self.head).copied()
    }

    /// Renders a caret line that lines up with the tape line.
    ///
    /// ```text
    /// ##bb#c
    ///   ^
    /// ```
    pub fn pointer(&self) -> String {
        format!("{}^", " ".repeat(self.head))
    }
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for symbol in &self.cells {
            write!(f, "{}", symbol)?;
        }
        Ok(())
    }
}
