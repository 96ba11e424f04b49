//! A one-directional, right-extensible tape of symbols.

use crate::types::Symbol;

/// The machine's working storage: an index-addressable sequence of symbols,
/// conceptually infinite to the right. Reads beyond the current length yield
/// the blank symbol; writes beyond it extend the tape with blanks first.
///
/// A tape is owned exclusively by one running machine; independent runs use
/// independent (cloned) tapes.
#[derive(Debug, Clone, PartialEq)]
pub struct Tape<S> {
    cells: Vec<S>,
    blank: S,
}

impl<S: Symbol> Tape<S> {
    pub fn new(cells: Vec<S>, blank: S) -> Self {
        Self { cells, blank }
    }

    /// Creates an empty tape holding only blanks.
    pub fn blanks(blank: S) -> Self {
        Self::new(Vec::new(), blank)
    }

    /// Returns the symbol at `index`, or blank past the right end.
    pub fn read(&self, index: usize) -> S {
        self.cells.get(index).unwrap_or(&self.blank).clone()
    }

    /// Sets the symbol at `index`, extending the tape with blanks as needed.
    pub fn write(&mut self, index: usize, symbol: S) {
        if index >= self.cells.len() {
            self.cells.resize(index + 1, self.blank.clone());
        }
        self.cells[index] = symbol;
    }

    pub fn blank(&self) -> &S {
        &self.blank
    }

    /// Current materialized length. Cells past this read as blank.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cells(&self) -> &[S] {
        &self.cells
    }

    pub fn into_cells(self) -> Vec<S> {
        self.cells
    }
}
