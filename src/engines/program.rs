//! Compiled-tape execution engine
//!
//! # Background
//!
//! This engine is the "JIT" rung of the overhead ladder: it lowers a
//! [`TracedModel`](crate::engines::graph::TracedModel) into a flat
//! register tape exactly once, at construction time, then executes the
//! tape per iteration. Compared to the graph interpreter it removes the
//! per-iteration node resolution and the per-evaluation value-buffer
//! allocation; what remains is one dispatch per instruction.
//!
//! The lowering is the compile step the demos time separately: building
//! a `ProgramEngine` is "first run" cost, calling it afterwards is the
//! warm path.
//!
//! # Tape Summary
//!
//! Registers are numbered 0..regs; each graph node gets the register
//! matching its node id, so lowering is a one-pass translation. State
//! slots live outside the register file and are read in explicitly at
//! the top of each section — the tape has no hidden inputs.

use serde::{Deserialize, Serialize};

use crate::counting::{ClassCounts, CountRun, Engine, Workload};
use crate::engines::graph::{Op, TracedModel};

// =================================================================================================
// Instructions
// =================================================================================================

/// One tape instruction
///
/// All operands are register indices except the immediates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Instr {
    /// `r[dst] = value`
    Const { dst: usize, value: i64 },

    /// `r[dst] = n` (the run-time loop bound)
    Arg { dst: usize },

    /// `r[dst] = state[slot]`
    State { dst: usize, slot: usize },

    /// `r[dst] = r[lhs] + r[rhs]`
    Add { dst: usize, lhs: usize, rhs: usize },

    /// `r[dst] = r[lhs] % r[rhs]`
    Rem { dst: usize, lhs: usize, rhs: usize },

    /// `r[dst] = (r[lhs] == r[rhs]) as i64`
    Eq { dst: usize, lhs: usize, rhs: usize },

    /// `r[dst] = (r[lhs] < r[rhs]) as i64`
    Lt { dst: usize, lhs: usize, rhs: usize },

    /// `r[dst] = r[cond] != 0 ? r[on_true] : r[on_false]`
    Select {
        dst: usize,
        cond: usize,
        on_true: usize,
        on_false: usize,
    },
}

// =================================================================================================
// Program (Lowered Model)
// =================================================================================================

/// A lowered counting program: two instruction tapes over one register
/// file, plus the loop-state bookkeeping carried over from the model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Program {
    /// Initial loop-carried state
    pub state_init: Vec<i64>,

    /// Condition tape
    pub cond: Vec<Instr>,

    /// Register holding the condition value after the cond tape runs
    pub cond_output: usize,

    /// Body tape
    pub body: Vec<Instr>,

    /// Registers forming the next state after the body tape runs
    pub body_outputs: Vec<usize>,

    /// Size of the register file (shared by both tapes)
    pub registers: usize,
}

impl Program {
    /// Lower a traced model into a program
    ///
    /// Node ids become register indices unchanged, so the tape length
    /// equals the node count and no register allocation is needed.
    ///
    /// # Errors
    ///
    /// Fails when the model does not pass its own
    /// [`check`](TracedModel::check); a malformed model must not become
    /// a malformed tape.
    pub fn compile(model: &TracedModel) -> Result<Self, String> {
        model.check()?;

        let cond = Self::lower_graph(&model.cond.nodes);
        let body = Self::lower_graph(&model.body.nodes);
        let registers = model.cond.len().max(model.body.len());

        Ok(Self {
            state_init: model.state_init.clone(),
            cond,
            cond_output: model.cond_output,
            body,
            body_outputs: model.body_outputs.clone(),
            registers,
        })
    }

    fn lower_graph(nodes: &[Op]) -> Vec<Instr> {
        nodes
            .iter()
            .enumerate()
            .map(|(dst, op)| match *op {
                Op::Const(value) => Instr::Const { dst, value },
                Op::Arg => Instr::Arg { dst },
                Op::State(slot) => Instr::State { dst, slot },
                Op::Add(lhs, rhs) => Instr::Add { dst, lhs, rhs },
                Op::Rem(lhs, rhs) => Instr::Rem { dst, lhs, rhs },
                Op::Eq(lhs, rhs) => Instr::Eq { dst, lhs, rhs },
                Op::Lt(lhs, rhs) => Instr::Lt { dst, lhs, rhs },
                Op::Select(cond, on_true, on_false) => Instr::Select {
                    dst,
                    cond,
                    on_true,
                    on_false,
                },
            })
            .collect()
    }

    /// Run one tape over the register file
    fn run_tape(
        tape: &[Instr],
        regs: &mut [i64],
        state: &[i64],
        arg: i64,
    ) -> Result<(), String> {
        for instr in tape {
            match *instr {
                Instr::Const { dst, value } => regs[dst] = value,
                Instr::Arg { dst } => regs[dst] = arg,
                Instr::State { dst, slot } => regs[dst] = state[slot],
                Instr::Add { dst, lhs, rhs } => regs[dst] = regs[lhs] + regs[rhs],
                Instr::Rem { dst, lhs, rhs } => {
                    if regs[rhs] == 0 {
                        return Err("program divides by zero".to_string());
                    }
                    regs[dst] = regs[lhs] % regs[rhs];
                }
                Instr::Eq { dst, lhs, rhs } => regs[dst] = (regs[lhs] == regs[rhs]) as i64,
                Instr::Lt { dst, lhs, rhs } => regs[dst] = (regs[lhs] < regs[rhs]) as i64,
                Instr::Select {
                    dst,
                    cond,
                    on_true,
                    on_false,
                } => {
                    regs[dst] = if regs[cond] != 0 {
                        regs[on_true]
                    } else {
                        regs[on_false]
                    };
                }
            }
        }
        Ok(())
    }

    /// Execute the program for the bound `n`
    ///
    /// The register file is allocated once per call and reused across
    /// iterations; that reuse is the whole point of the lowering.
    pub fn execute(&self, n: i64) -> Result<Vec<i64>, String> {
        let mut state = self.state_init.clone();
        let mut regs = vec![0_i64; self.registers];
        let mut next_state = self.state_init.clone();

        // Loop-free program: one body pass, same as the source model.
        if self.cond.is_empty() {
            Self::run_tape(&self.body, &mut regs, &state, n)?;
            for (slot, &output) in self.body_outputs.iter().enumerate() {
                state[slot] = regs[output];
            }
            return Ok(state);
        }

        loop {
            Self::run_tape(&self.cond, &mut regs, &state, n)?;
            if regs[self.cond_output] == 0 {
                break;
            }

            Self::run_tape(&self.body, &mut regs, &state, n)?;
            for (slot, &output) in self.body_outputs.iter().enumerate() {
                next_state[slot] = regs[output];
            }
            state.copy_from_slice(&next_state);
        }

        Ok(state)
    }

    /// Total instruction count across both tapes
    pub fn instruction_count(&self) -> usize {
        self.cond.len() + self.body.len()
    }
}

// =================================================================================================
// Program Engine
// =================================================================================================

/// Engine that executes a pre-compiled tape
///
/// # Example
///
/// ```rust
/// use fizz_rs::counting::{Engine, Workload};
/// use fizz_rs::engines::ProgramEngine;
/// use fizz_rs::engines::graph::trace_counting_model;
///
/// let engine = ProgramEngine::compile(&trace_counting_model()).unwrap();
/// let run = engine.count(&Workload::new(12)).unwrap();
/// assert_eq!(run.counts.fizzbuzz, 2);
/// ```
#[derive(Debug, Clone)]
pub struct ProgramEngine {
    program: Program,
}

impl ProgramEngine {
    /// Compile a traced model into an executable engine
    ///
    /// This is the one-time "JIT" step; keep the engine around to
    /// measure warm-run cost separately from compile cost.
    pub fn compile(model: &TracedModel) -> Result<Self, String> {
        Ok(Self {
            program: Program::compile(model)?,
        })
    }

    /// Wrap an already-lowered program
    pub fn from_program(program: Program) -> Self {
        Self { program }
    }

    /// Access the lowered program (for artifacts)
    pub fn program(&self) -> &Program {
        &self.program
    }
}

impl Engine for ProgramEngine {
    fn count(&self, workload: &Workload) -> Result<CountRun, String> {
        let state = self.program.execute(workload.upper_bound as i64)?;

        // Same state layout as the traced model: (i, fizz, buzz, fizzbuzz)
        let counts = ClassCounts::new(state[1] as u64, state[2] as u64, state[3] as u64);

        let mut run = CountRun::new(counts);
        run.add_metadata("engine", self.name());
        run.add_metadata("instructions", &self.program.instruction_count().to_string());
        run.add_metadata("registers", &self.program.registers.to_string());

        Ok(run)
    }

    fn name(&self) -> &str {
        "Compiled Tape"
    }

    fn description(&self) -> Option<&str> {
        Some("Traced graph lowered once to a register tape, then executed")
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engines::graph::trace_counting_model;

    #[test]
    fn test_compile_succeeds_for_traced_model() {
        let program = Program::compile(&trace_counting_model()).unwrap();
        assert!(program.registers > 0);
        assert_eq!(
            program.instruction_count(),
            trace_counting_model().node_count()
        );
    }

    #[test]
    fn test_compile_rejects_broken_model() {
        let mut model = trace_counting_model();
        model.body_outputs.clear();
        assert!(Program::compile(&model).is_err());
    }

    #[test]
    fn test_program_matches_closed_form() {
        let engine = ProgramEngine::compile(&trace_counting_model()).unwrap();

        for n in [0_u32, 1, 6, 12, 100, 1_000] {
            let workload = Workload::new(n);
            let run = engine.count(&workload).unwrap();
            assert_eq!(run.counts, workload.expected(), "n = {}", n);
        }
    }

    #[test]
    fn test_program_agrees_with_graph_interpreter() {
        // Lowering must preserve semantics exactly: the tape and the
        // interpreter walk the same model.
        let model = trace_counting_model();
        let program = Program::compile(&model).unwrap();

        for n in [0_i64, 1, 7, 12, 500] {
            assert_eq!(model.run(n).unwrap(), program.execute(n).unwrap(), "n = {}", n);
        }
    }

    #[test]
    fn test_program_twelve_integers() {
        let engine = ProgramEngine::compile(&trace_counting_model()).unwrap();
        let run = engine.count(&Workload::new(12)).unwrap();
        assert_eq!(run.counts, ClassCounts::new(4, 2, 2));
    }

    #[test]
    fn test_program_serde_round_trip() {
        let program = Program::compile(&trace_counting_model()).unwrap();
        let json = serde_json::to_string(&program).unwrap();
        let loaded: Program = serde_json::from_str(&json).unwrap();
        assert_eq!(program, loaded);

        let engine = ProgramEngine::from_program(loaded);
        let run = engine.count(&Workload::new(60)).unwrap();
        assert_eq!(run.counts, ClassCounts::closed_form(60));
    }
}
