//! The immutable program table: an ordered sequence of states, each an
//! ordered list of transition rules.

use crate::types::{MachineError, Rule, Symbol};
use serde::{Deserialize, Serialize};

/// A Turing-machine program.
///
/// The outer dimension of `table` is indexed by state (Turing's
/// "m-configuration"); each state holds its rules in declaration order.
/// Within one state the match symbols are expected to be pairwise distinct;
/// lookup resolves to the *first* rule whose match symbol equals the scanned
/// symbol, so a duplicate would shadow everything after it (the
/// [`analyzer`](crate::analyzer) flags this).
///
/// The table is immutable for the duration of a run and is never consulted
/// for anything except lookups; the machine reads and writes the tape only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Program<S> {
    pub name: String,
    pub table: Vec<Vec<Rule<S>>>,
}

impl<S: Symbol> Program<S> {
    pub fn new(name: impl Into<String>, table: Vec<Vec<Rule<S>>>) -> Self {
        Self {
            name: name.into(),
            table,
        }
    }

    /// Finds the rule governing `(state, symbol)`.
    ///
    /// This is where state bounds are enforced: a delta applied on the
    /// previous step may have produced any integer, and only the index that
    /// is actually looked up next has to be valid.
    ///
    /// # Errors
    ///
    /// * [`MachineError::StateOutOfRange`] if `state` is negative or past
    ///   the table.
    /// * [`MachineError::NoMatchingRule`] if no rule in the state's list
    ///   matches `symbol`.
    pub fn lookup(&self, state: i64, symbol: &S) -> Result<&Rule<S>, MachineError<S>> {
        let rules = usize::try_from(state)
            .ok()
            .and_then(|index| self.table.get(index))
            .ok_or(MachineError::StateOutOfRange { state })?;

        rules
            .iter()
            .find(|rule| rule.match_symbol == *symbol)
            .ok_or_else(|| MachineError::NoMatchingRule {
                state,
                symbol: symbol.clone(),
            })
    }

    /// Number of states in the table.
    pub fn state_count(&self) -> usize {
        self.table.len()
    }

    /// Total number of rules across all states.
    pub fn rule_count(&self) -> usize {
        self.table.iter().map(Vec::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Motion, Sym};

    fn rule(match_symbol: Sym, write_symbol: Sym, motion: Motion, state_delta: i64) -> Rule<Sym> {
        Rule {
            match_symbol,
            write_symbol,
            motion,
            state_delta,
        }
    }

    #[test]
    fn lookup_returns_first_match_in_order() {
        // Two rules for One: the first must win.
        let program = Program::new(
            "shadowed",
            vec![vec![
                rule(Sym::One, Sym::Zero, Motion::Right, 0),
                rule(Sym::One, Sym::One, Motion::Left, 1),
            ]],
        );

        let found = program.lookup(0, &Sym::One).unwrap();
        assert_eq!(found.write_symbol, Sym::Zero);
        assert_eq!(found.motion, Motion::Right);
    }

    #[test]
    fn lookup_unmatched_symbol_is_an_error() {
        let program = Program::new(
            "partial",
            vec![vec![rule(Sym::Zero, Sym::Zero, Motion::Right, 0)]],
        );

        let err = program.lookup(0, &Sym::Start).unwrap_err();
        assert_eq!(
            err,
            MachineError::NoMatchingRule {
                state: 0,
                symbol: Sym::Start
            }
        );
    }

    #[test]
    fn lookup_state_past_table_is_an_error() {
        let program: Program<Sym> = Program::new("one state", vec![Vec::new()]);
        let err = program.lookup(3, &Sym::Blank).unwrap_err();
        assert_eq!(err, MachineError::StateOutOfRange { state: 3 });
    }

    #[test]
    fn lookup_negative_state_is_an_error() {
        let program: Program<Sym> = Program::new("one state", vec![Vec::new()]);
        let err = program.lookup(-2, &Sym::Blank).unwrap_err();
        assert_eq!(err, MachineError::StateOutOfRange { state: -2 });
    }

    #[test]
    fn counts() {
        let program = Program::new(
            "counts",
            vec![
                vec![
                    rule(Sym::Zero, Sym::Zero, Motion::Right, 0),
                    rule(Sym::One, Sym::One, Motion::Right, 0),
                ],
                vec![rule(Sym::Blank, Sym::Blank, Motion::Halt, 0)],
            ],
        );
        assert_eq!(program.state_count(), 2);
        assert_eq!(program.rule_count(), 3);
    }
}
