//! Optional static analysis of program tables.
//!
//! The engine itself validates nothing at load time: state deltas are
//! checked lazily at the next lookup, faithful to the run-time contract.
//! This module is an opt-in convenience that catches common program-design
//! errors before a run: shadowed rules, deltas that can only ever land
//! outside the table, states no run can reach, and tables with no halt rule
//! at all.

use crate::program::Program;
use crate::types::{Motion, ProgramError, Symbol};
use std::collections::HashSet;
use std::fmt;

/// Defects a static pass can prove without executing the program.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum AnalysisError<S> {
    /// The table has no states.
    EmptyTable,
    /// Two rules in one state share a match symbol; the second can never
    /// fire because lookup is first-match.
    DuplicateMatchSymbol { state: usize, symbol: S },
    /// A non-halt rule's delta lands outside the table. Deltas are relative
    /// to the state that declares them, so the target is known statically.
    DanglingDelta { state: usize, delta: i64 },
    /// States that no chain of rules from state 0 can enter.
    UnreachableStates(Vec<usize>),
    /// No rule anywhere halts; every run ends in an error or runs forever.
    NoHaltRule,
}

impl<S: fmt::Debug> From<AnalysisError<S>> for ProgramError {
    fn from(error: AnalysisError<S>) -> Self {
        match error {
            AnalysisError::EmptyTable => {
                ProgramError::ValidationError("program table has no states".to_string())
            }
            AnalysisError::DuplicateMatchSymbol { state, symbol } => {
                ProgramError::ValidationError(format!(
                    "state {} has a duplicate rule for symbol {:?}",
                    state, symbol
                ))
            }
            AnalysisError::DanglingDelta { state, delta } => ProgramError::ValidationError(
                format!("state {} has delta {} landing outside the table", state, delta),
            ),
            AnalysisError::UnreachableStates(states) => ProgramError::ValidationError(format!(
                "unreachable states detected: {:?}",
                states
            )),
            AnalysisError::NoHaltRule => {
                ProgramError::ValidationError("program has no halt rule".to_string())
            }
        }
    }
}

/// Runs every check against `program`, surfacing the first defect found.
///
/// Reachability is computed from state 0, the conventional initial state of
/// the bundled programs; a caller starting elsewhere can still run an
/// "unreachable" state.
pub fn analyze<S: Symbol>(program: &Program<S>) -> Result<(), ProgramError> {
    check_structure(program)?;
    check_duplicate_match_symbols(program)?;
    check_rule_targets(program)?;
    check_reachability(program)?;
    check_halt_rule(program)?;
    Ok(())
}

fn check_structure<S: Symbol>(program: &Program<S>) -> Result<(), AnalysisError<S>> {
    if program.table.is_empty() {
        return Err(AnalysisError::EmptyTable);
    }
    Ok(())
}

/// Match symbols within one state must be pairwise distinct.
fn check_duplicate_match_symbols<S: Symbol>(
    program: &Program<S>,
) -> Result<(), AnalysisError<S>> {
    for (state, rules) in program.table.iter().enumerate() {
        for (i, rule) in rules.iter().enumerate() {
            if rules[..i]
                .iter()
                .any(|earlier| earlier.match_symbol == rule.match_symbol)
            {
                return Err(AnalysisError::DuplicateMatchSymbol {
                    state,
                    symbol: rule.match_symbol.clone(),
                });
            }
        }
    }
    Ok(())
}

/// Every non-halt rule leads to another lookup, so its target must exist.
/// Halt rules are exempt: their delta is applied but never looked up.
fn check_rule_targets<S: Symbol>(program: &Program<S>) -> Result<(), AnalysisError<S>> {
    let states = program.table.len() as i64;

    for (state, rules) in program.table.iter().enumerate() {
        for rule in rules {
            if rule.motion == Motion::Halt {
                continue;
            }
            let target = state as i64 + rule.state_delta;
            if target < 0 || target >= states {
                return Err(AnalysisError::DanglingDelta {
                    state,
                    delta: rule.state_delta,
                });
            }
        }
    }
    Ok(())
}

/// Breadth-first traversal over state deltas from state 0.
fn check_reachability<S: Symbol>(program: &Program<S>) -> Result<(), AnalysisError<S>> {
    let mut visited = HashSet::new();
    let mut queue = vec![0usize];

    while let Some(state) = queue.pop() {
        if !visited.insert(state) {
            continue;
        }

        if let Some(rules) = program.table.get(state) {
            for rule in rules {
                if rule.motion == Motion::Halt {
                    continue;
                }
                let target = state as i64 + rule.state_delta;
                if target >= 0 && (target as usize) < program.table.len() {
                    queue.push(target as usize);
                }
            }
        }
    }

    let mut unreachable: Vec<usize> = (0..program.table.len())
        .filter(|state| !visited.contains(state))
        .collect();

    if !unreachable.is_empty() {
        unreachable.sort_unstable();
        return Err(AnalysisError::UnreachableStates(unreachable));
    }

    Ok(())
}

fn check_halt_rule<S: Symbol>(program: &Program<S>) -> Result<(), AnalysisError<S>> {
    let has_halt = program
        .table
        .iter()
        .flatten()
        .any(|rule| rule.motion == Motion::Halt);

    if !has_halt {
        return Err(AnalysisError::NoHaltRule);
    }
    Ok(())
}
