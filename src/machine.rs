//! The controller: drives the step loop over (tape, head, state) until a
//! halt rule or a defined error.
//!
//! The loop is explicitly iterative with mutable locals. Long-running
//! programs (the bundled addition table revisits its own start thousands of
//! times for large inputs) must not grow the call stack.

use crate::program::Program;
use crate::tape::Tape;
use crate::types::{MachineError, Motion, Step, Symbol, TraceEvent};

/// Runs `program` on `tape` from the given head position and state until a
/// halt rule fires, then returns the final tape.
///
/// This is the crate's entry point for callers that treat the engine as a
/// pure function from an initial configuration to a final tape. The program
/// is always an explicit argument; there is no compiled-in default.
///
/// # Errors
///
/// Any [`MachineError`] raised by the run: no matching rule, head underflow,
/// or state out of range. No step limit applies here; use [`Machine`]
/// directly to configure one.
pub fn run<S: Symbol>(
    tape: Tape<S>,
    program: Program<S>,
    initial_head: usize,
    initial_state: usize,
) -> Result<Tape<S>, MachineError<S>> {
    let mut machine = Machine::new(program, tape, initial_head, initial_state);
    machine.run()?;
    Ok(machine.into_tape())
}

/// A single-tape Turing machine mid-execution.
///
/// The machine owns its program and tape exclusively for the duration of a
/// run; nothing is shared across runs or threads. Stepping is fully
/// sequential with no suspension points.
#[derive(Debug, Clone)]
pub struct Machine<S> {
    program: Program<S>,
    tape: Tape<S>,
    head: usize,
    /// Held as `i64` so that an out-of-range delta is representable until
    /// the next lookup rejects it.
    state: i64,
    step_count: usize,
    halted: bool,
    step_limit: Option<usize>,
    initial_tape: Tape<S>,
    initial_head: usize,
    initial_state: i64,
}

impl<S: Symbol> Machine<S> {
    /// Creates a machine over `program` with the supplied initial
    /// configuration. Nothing is validated eagerly; a bad initial state
    /// surfaces as [`MachineError::StateOutOfRange`] on the first step.
    pub fn new(program: Program<S>, tape: Tape<S>, head: usize, state: usize) -> Self {
        Self {
            program,
            initial_tape: tape.clone(),
            tape,
            head,
            state: state as i64,
            step_count: 0,
            halted: false,
            step_limit: None,
            initial_head: head,
            initial_state: state as i64,
        }
    }

    /// Bounds [`run`](Self::run) to at most `limit` steps, after which the
    /// run aborts with [`MachineError::StepLimitExceeded`]. There is no
    /// default bound; runaway protection is strictly opt-in.
    pub fn with_step_limit(mut self, limit: usize) -> Self {
        self.step_limit = Some(limit);
        self
    }

    /// Executes one step: read, lookup, write, state change, move.
    ///
    /// On an already-halted machine this is a no-op returning
    /// [`Step::Halted`]; the tape is not touched again.
    pub fn step(&mut self) -> Result<Step, MachineError<S>> {
        self.step_traced(&mut |_| {})
    }

    /// Like [`step`](Self::step), emitting a [`TraceEvent`] to `sink` for
    /// the executed step. The sink is observational only.
    pub fn step_traced(
        &mut self,
        sink: &mut dyn FnMut(TraceEvent<S>),
    ) -> Result<Step, MachineError<S>> {
        if self.halted {
            return Ok(Step::Halted);
        }

        let head = self.head;
        let state = self.state;
        let scanned = self.tape.read(head);
        let rule = self.program.lookup(state, &scanned)?.clone();

        // The write applies unconditionally, including on the halting step.
        self.tape.write(head, rule.write_symbol.clone());

        // Bounds of the new index are checked lazily at the next lookup.
        self.state = state + rule.state_delta;

        match rule.motion {
            Motion::Right => self.head += 1,
            Motion::Left => {
                if self.head == 0 {
                    return Err(MachineError::HeadUnderflow { head: 0 });
                }
                self.head -= 1;
            }
            Motion::Halt => self.halted = true,
        }

        self.step_count += 1;
        sink(TraceEvent {
            step: self.step_count,
            state,
            head,
            scanned,
            wrote: rule.write_symbol,
            motion: rule.motion,
            next_state: self.state,
        });

        Ok(if self.halted {
            Step::Halted
        } else {
            Step::Continue
        })
    }

    /// Steps until a halt rule fires or a failure terminates the run.
    pub fn run(&mut self) -> Result<(), MachineError<S>> {
        self.run_traced(&mut |_| {})
    }

    /// Like [`run`](Self::run), emitting one [`TraceEvent`] per executed
    /// step. Trace output is delegated entirely to the sink; the loop itself
    /// performs no I/O.
    pub fn run_traced(
        &mut self,
        sink: &mut dyn FnMut(TraceEvent<S>),
    ) -> Result<(), MachineError<S>> {
        loop {
            if let Some(limit) = self.step_limit {
                if !self.halted && self.step_count >= limit {
                    return Err(MachineError::StepLimitExceeded { limit });
                }
            }

            match self.step_traced(sink)? {
                Step::Continue => continue,
                Step::Halted => return Ok(()),
            }
        }
    }

    /// Restores the initial configuration: tape, head, state, step count.
    pub fn reset(&mut self) {
        self.tape = self.initial_tape.clone();
        self.head = self.initial_head;
        self.state = self.initial_state;
        self.step_count = 0;
        self.halted = false;
    }

    pub fn state(&self) -> i64 {
        self.state
    }

    pub fn head(&self) -> usize {
        self.head
    }

    pub fn step_count(&self) -> usize {
        self.step_count
    }

    pub fn is_halted(&self) -> bool {
        self.halted
    }

    pub fn tape(&self) -> &Tape<S> {
        &self.tape
    }

    pub fn program(&self) -> &Program<S> {
        &self.program
    }

    /// Consumes the machine, yielding the tape — the machine's output once
    /// a run has halted.
    pub fn into_tape(self) -> Tape<S> {
        self.tape
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Rule, Sym};

    fn rule(match_symbol: Sym, write_symbol: Sym, motion: Motion, state_delta: i64) -> Rule<Sym> {
        Rule {
            match_symbol,
            write_symbol,
            motion,
            state_delta,
        }
    }

    /// state 0 skips One cells to the right; on Blank it writes Zero and halts.
    fn seek_and_mark() -> Program<Sym> {
        Program::new(
            "seek and mark",
            vec![vec![
                rule(Sym::One, Sym::One, Motion::Right, 0),
                rule(Sym::Blank, Sym::Zero, Motion::Halt, 0),
            ]],
        )
    }

    #[test]
    fn halting_step_still_writes_then_stops() {
        let tape = Tape::new(vec![Sym::One, Sym::One], Sym::Blank);
        let mut machine = Machine::new(seek_and_mark(), tape, 0, 0);

        machine.run().unwrap();

        assert!(machine.is_halted());
        assert_eq!(machine.tape().cells(), &[Sym::One, Sym::One, Sym::Zero]);
        assert_eq!(machine.step_count(), 3);

        // No further mutation once halted.
        assert_eq!(machine.step().unwrap(), Step::Halted);
        assert_eq!(machine.step_count(), 3);
        assert_eq!(machine.tape().cells(), &[Sym::One, Sym::One, Sym::Zero]);
    }

    #[test]
    fn run_entry_point_returns_final_tape() {
        let tape = Tape::new(vec![Sym::One], Sym::Blank);
        let final_tape = run(tape, seek_and_mark(), 0, 0).unwrap();
        assert_eq!(final_tape.cells(), &[Sym::One, Sym::Zero]);
    }

    #[test]
    fn move_left_at_cell_zero_underflows() {
        let program = Program::new(
            "walk off the edge",
            vec![vec![rule(Sym::Blank, Sym::Blank, Motion::Left, 0)]],
        );
        let mut machine = Machine::new(program, Tape::blanks(Sym::Blank), 0, 0);

        let err = machine.run().unwrap_err();
        assert_eq!(err, MachineError::HeadUnderflow { head: 0 });
        assert!(!machine.is_halted());
    }

    #[test]
    fn unmatched_symbol_fails_instead_of_defaulting() {
        let program = Program::new(
            "zeros only",
            vec![vec![rule(Sym::Zero, Sym::Zero, Motion::Right, 0)]],
        );
        let tape = Tape::new(vec![Sym::Zero, Sym::One], Sym::Blank);
        let mut machine = Machine::new(program, tape, 0, 0);

        let err = machine.run().unwrap_err();
        assert_eq!(
            err,
            MachineError::NoMatchingRule {
                state: 0,
                symbol: Sym::One
            }
        );
        // The failing step never wrote anything.
        assert_eq!(machine.tape().cells(), &[Sym::Zero, Sym::One]);
    }

    #[test]
    fn delta_bounds_are_checked_at_the_next_lookup() {
        // The delta lands out of range, but the error surfaces only when
        // the next step looks the state up.
        let program = Program::new(
            "long jump",
            vec![vec![rule(Sym::Blank, Sym::Blank, Motion::Right, 5)]],
        );
        let mut machine = Machine::new(program, Tape::blanks(Sym::Blank), 0, 0);

        assert_eq!(machine.step().unwrap(), Step::Continue);
        assert_eq!(machine.state(), 5);

        let err = machine.step().unwrap_err();
        assert_eq!(err, MachineError::StateOutOfRange { state: 5 });
    }

    #[test]
    fn negative_delta_past_state_zero_is_caught_lazily() {
        let program = Program::new(
            "under jump",
            vec![vec![rule(Sym::Blank, Sym::Blank, Motion::Right, -3)]],
        );
        let mut machine = Machine::new(program, Tape::blanks(Sym::Blank), 0, 0);

        assert_eq!(machine.step().unwrap(), Step::Continue);
        let err = machine.step().unwrap_err();
        assert_eq!(err, MachineError::StateOutOfRange { state: -3 });
    }

    #[test]
    fn halt_rule_delta_is_never_looked_up() {
        // A halt rule may carry any delta; laziness means it is never
        // validated because no further lookup happens.
        let program = Program::new(
            "halt with junk delta",
            vec![vec![rule(Sym::Blank, Sym::Zero, Motion::Halt, -100)]],
        );
        let mut machine = Machine::new(program, Tape::blanks(Sym::Blank), 0, 0);

        machine.run().unwrap();
        assert!(machine.is_halted());
        assert_eq!(machine.state(), -100);
    }

    #[test]
    fn general_delta_restarts_the_table() {
        // state 0 consumes a One and jumps to state 2; state 2 jumps back
        // with -2, exercising arbitrary offsets in both directions.
        let program = Program::new(
            "shuttle",
            vec![
                vec![
                    rule(Sym::One, Sym::Zero, Motion::Right, 2),
                    rule(Sym::Blank, Sym::Blank, Motion::Halt, 0),
                ],
                Vec::new(),
                vec![
                    rule(Sym::One, Sym::One, Motion::Right, -2),
                    rule(Sym::Blank, Sym::Blank, Motion::Halt, 0),
                ],
            ],
        );
        let tape = Tape::new(vec![Sym::One, Sym::One, Sym::One], Sym::Blank);
        let mut machine = Machine::new(program, tape, 0, 0);

        machine.run().unwrap();
        assert!(machine.is_halted());
        assert_eq!(
            machine.tape().cells(),
            &[Sym::Zero, Sym::One, Sym::Zero, Sym::Blank]
        );
    }

    #[test]
    fn step_limit_aborts_a_runaway_program() {
        let program = Program::new(
            "spin",
            vec![vec![rule(Sym::Blank, Sym::Blank, Motion::Right, 0)]],
        );
        let mut machine =
            Machine::new(program, Tape::blanks(Sym::Blank), 0, 0).with_step_limit(50);

        let err = machine.run().unwrap_err();
        assert_eq!(err, MachineError::StepLimitExceeded { limit: 50 });
        assert_eq!(machine.step_count(), 50);
    }

    #[test]
    fn no_step_limit_by_default() {
        // A run that takes many steps completes without a bound.
        let cells = vec![Sym::One; 10_000];
        let tape = Tape::new(cells, Sym::Blank);
        let mut machine = Machine::new(seek_and_mark(), tape, 0, 0);

        machine.run().unwrap();
        assert_eq!(machine.step_count(), 10_001);
    }

    #[test]
    fn traces_are_deterministic_across_runs() {
        let tape = Tape::new(vec![Sym::One, Sym::One], Sym::Blank);

        let mut first_trace = Vec::new();
        let mut first = Machine::new(seek_and_mark(), tape.clone(), 0, 0);
        first.run_traced(&mut |event| first_trace.push(event)).unwrap();

        let mut second_trace = Vec::new();
        let mut second = Machine::new(seek_and_mark(), tape, 0, 0);
        second
            .run_traced(&mut |event| second_trace.push(event))
            .unwrap();

        assert_eq!(first_trace, second_trace);
        assert_eq!(first.tape(), second.tape());
    }

    #[test]
    fn trace_records_the_step_as_executed() {
        let tape = Tape::new(vec![Sym::One], Sym::Blank);
        let mut machine = Machine::new(seek_and_mark(), tape, 0, 0);

        let mut trace = Vec::new();
        machine.run_traced(&mut |event| trace.push(event)).unwrap();

        assert_eq!(trace.len(), 2);
        assert_eq!(
            trace[0],
            TraceEvent {
                step: 1,
                state: 0,
                head: 0,
                scanned: Sym::One,
                wrote: Sym::One,
                motion: Motion::Right,
                next_state: 0,
            }
        );
        assert_eq!(trace[1].scanned, Sym::Blank);
        assert_eq!(trace[1].wrote, Sym::Zero);
        assert_eq!(trace[1].motion, Motion::Halt);
    }

    #[test]
    fn reset_restores_the_initial_configuration() {
        let tape = Tape::new(vec![Sym::One], Sym::Blank);
        let mut machine = Machine::new(seek_and_mark(), tape, 0, 0);

        machine.run().unwrap();
        assert!(machine.is_halted());

        machine.reset();
        assert!(!machine.is_halted());
        assert_eq!(machine.head(), 0);
        assert_eq!(machine.state(), 0);
        assert_eq!(machine.step_count(), 0);
        assert_eq!(machine.tape().cells(), &[Sym::One]);

        // The rerun produces the same output.
        machine.run().unwrap();
        assert_eq!(machine.tape().cells(), &[Sym::One, Sym::Zero]);
    }

    #[test]
    fn independent_runs_of_one_program_share_no_state() {
        let program = seek_and_mark();
        let tape = Tape::new(vec![Sym::One, Sym::One], Sym::Blank);

        let first = run(tape.clone(), program.clone(), 0, 0).unwrap();
        let second = run(tape, program, 0, 0).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn engine_is_generic_over_the_alphabet() {
        // A char-alphabet machine: uppercase a single 'a' then halt.
        let program = Program::new(
            "uppercase",
            vec![vec![
                Rule {
                    match_symbol: 'a',
                    write_symbol: 'A',
                    motion: Motion::Halt,
                    state_delta: 0,
                },
            ]],
        );
        let tape = Tape::new(vec!['a'], ' ');
        let final_tape = run(tape, program, 0, 0).unwrap();
        assert_eq!(final_tape.cells(), &['A']);
    }
}
