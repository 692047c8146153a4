//! Executing assembled VC8000 programs.
//!
//! This module manages the execution of assembled programs. The
//! main attraction is [`Emulator`], which loads an object image and
//! runs the fetch-decode-execute loop until the program halts, runs off
//! the end of memory, or hits a fatal error. The other components of
//! this module:
//! - [`mem`]: the memory array and register file,
//! - [`io`]: the input/output collaborators the read and write
//!   instructions talk to,
//! - [`SimErr`]: the fatal execution errors,
//! - and [`run_assembly`]: the one-call wrapper that refuses to execute
//!   an assembly with diagnostics.
//!
//! ```
//! use vc8000::parse::StrLineSource;
//! use vc8000::asm::assemble;
//! use vc8000::sim::{Emulator, Exit};
//! use vc8000::sim::io::BufferedIo;
//!
//! let assembly = assemble(&mut StrLineSource::from("      LOAD 1,A
//!       ADD 1,A
//!       STORE 1,B
//!       WRITE B
//!       HALT
//! A     DC 21
//! B     DS 1
//!       END"));
//! assert!(assembly.is_clean());
//!
//! let io = BufferedIo::new();
//! let (mut input, mut output) = (io.clone(), io.clone());
//!
//! let mut emu = Emulator::new();
//! emu.load_image(&assembly.image);
//! assert_eq!(emu.run(&mut input, &mut output), Ok(Exit::Halted));
//! assert_eq!(*io.get_output().read().unwrap(), vec![42]);
//! ```

pub mod io;
pub mod mem;

use std::fmt;

use crate::asm::{encoding, Assembly, ObjectImage};
use crate::ast::Opcode;
use io::{InputSource, OutputSink};
use mem::{MemArray, RegFile, MEM_SIZE};

/// Errors that can occur during execution.
///
/// These are fatal: the fetch-execute loop stops at the failing
/// instruction. They are runtime conditions of a well-formed program,
/// reported separately from assembly diagnostics.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum SimErr {
    /// The word at `pc` is non-zero but its opcode digits are not a
    /// known instruction.
    IllegalOpcode {
        /// Where the bad word was fetched.
        pc: i64,
        /// The bad word itself.
        word: i64,
    },
    /// A divide instruction met a zero divisor.
    DivisionByZero {
        /// Where the divide was fetched.
        pc: i64,
    },
    /// A read instruction found the input source exhausted.
    InputExhausted {
        /// Where the read was fetched.
        pc: i64,
    },
}
impl fmt::Display for SimErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IllegalOpcode { pc, word } => {
                write!(f, "illegal opcode in word {word} at location {pc}")
            }
            Self::DivisionByZero { pc } => {
                write!(f, "division by zero at location {pc}")
            }
            Self::InputExhausted { pc } => {
                write!(f, "input exhausted at location {pc}")
            }
        }
    }
}
impl std::error::Error for SimErr {}
impl crate::err::Error for SimErr {
    fn help(&self) -> Option<std::borrow::Cow<str>> {
        match self {
            Self::IllegalOpcode { .. } => Some(
                "execution may have run into data; check for a missing HALT or branch".into(),
            ),
            Self::InputExhausted { .. } => {
                Some("the program executed READ with no input value left".into())
            }
            Self::DivisionByZero { .. } => None,
        }
    }
}

/// How a program run ended. Both states count as success.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Exit {
    /// The program executed a halt instruction.
    Halted,
    /// The program counter ran past the last memory location without
    /// halting. Memory past the program is zero and zero words are
    /// no-ops, so a program that simply never halts drains the rest of
    /// memory and lands here.
    Exhausted,
}

/// A concluding condition for one emulator step.
enum StepBreak {
    /// A halt was executed.
    Halt,
    /// A fatal error occurred.
    Err(SimErr),
}
impl From<SimErr> for StepBreak {
    fn from(value: SimErr) -> Self {
        StepBreak::Err(value)
    }
}

/// Executes an assembly, unless it has diagnostics.
///
/// Returns `None` without running anything if the assembly recorded any
/// diagnostic; a program known to be malformed is never executed.
pub fn run_assembly(
    assembly: &Assembly,
    input: &mut impl InputSource,
    output: &mut impl OutputSink,
) -> Option<Result<Exit, SimErr>> {
    if !assembly.is_clean() {
        return None;
    }
    let mut emu = Emulator::new();
    emu.load_image(&assembly.image);
    Some(emu.run(input, output))
}

/// Executes VC8000 machine code.
pub struct Emulator {
    /// The memory.
    pub mem: MemArray,
    /// The registers.
    pub reg_file: RegFile,
    /// The program counter: the location of the instruction currently
    /// being executed.
    pub pc: i64,
    /// The number of non-zero words executed since the last reset.
    pub instructions_run: u64,
}

impl Emulator {
    /// Creates an emulator with zeroed memory and registers.
    pub fn new() -> Self {
        Self {
            mem: MemArray::new(),
            reg_file: RegFile::new(),
            pc: 0,
            instructions_run: 0,
        }
    }

    /// Copies an object image into memory.
    pub fn load_image(&mut self, image: &ObjectImage) {
        for (loc, word) in image.iter() {
            self.mem[loc as usize] = word;
        }
    }

    /// Writes one word into memory, reporting whether the location was
    /// in bounds.
    pub fn insert_memory(&mut self, loc: i64, word: i64) -> bool {
        let Ok(loc) = usize::try_from(loc) else {
            return false;
        };
        if loc < MEM_SIZE {
            self.mem[loc] = word;
            true
        } else {
            false
        }
    }

    /// Zeroes memory and registers and rewinds the program counter.
    pub fn reset(&mut self) {
        self.mem = MemArray::new();
        self.reg_file = RegFile::new();
        self.pc = 0;
        self.instructions_run = 0;
    }

    /// Runs from the current program counter to a terminal state.
    ///
    /// Every step is followed by a uniform `pc` increment. The branch
    /// instructions account for it: an unconditional branch sets
    /// `pc = address`, so execution resumes at `address + 1`, while a
    /// taken conditional branch sets `pc = address - 1`, so execution
    /// resumes exactly at `address`.
    pub fn run(
        &mut self,
        input: &mut impl InputSource,
        output: &mut impl OutputSink,
    ) -> Result<Exit, SimErr> {
        while (0..MEM_SIZE as i64).contains(&self.pc) {
            match self.step(input, output) {
                Ok(()) => {}
                Err(StepBreak::Halt) => return Ok(Exit::Halted),
                Err(StepBreak::Err(e)) => return Err(e),
            }
            self.pc += 1;
        }
        Ok(Exit::Exhausted)
    }

    fn step(
        &mut self,
        input: &mut impl InputSource,
        output: &mut impl OutputSink,
    ) -> Result<(), StepBreak> {
        let word = self.mem[self.pc as usize];
        // A zero word is inert, making un-assembled memory skippable.
        if word == 0 {
            return Ok(());
        }

        let d = encoding::decode(word);
        let Some(op) = Opcode::from_code(d.opcode) else {
            return Err(SimErr::IllegalOpcode { pc: self.pc, word }.into());
        };
        self.instructions_run += 1;

        // A valid opcode implies a non-negative word, so the fields are
        // safe to narrow.
        let r1 = d.reg1 as usize;
        let r2 = d.reg2 as usize;
        let addr = d.address as usize;

        match op {
            Opcode::ADD => {
                self.reg_file[r1] = self.reg_file[r1].wrapping_add(self.mem[addr]);
            }
            Opcode::SUB => {
                self.reg_file[r1] = self.reg_file[r1].wrapping_sub(self.mem[addr]);
            }
            Opcode::MULT => {
                self.reg_file[r1] = self.reg_file[r1].wrapping_mul(self.mem[addr]);
            }
            Opcode::DIV => {
                let divisor = self.mem[addr];
                if divisor == 0 {
                    return Err(SimErr::DivisionByZero { pc: self.pc }.into());
                }
                self.reg_file[r1] = self.reg_file[r1].wrapping_div(divisor);
            }
            Opcode::LOAD => self.reg_file[r1] = self.mem[addr],
            Opcode::STORE => self.mem[addr] = self.reg_file[r1],
            Opcode::ADDR => {
                self.reg_file[r1] = self.reg_file[r1].wrapping_add(self.reg_file[r2]);
            }
            Opcode::SUBR => {
                self.reg_file[r1] = self.reg_file[r1].wrapping_sub(self.reg_file[r2]);
            }
            Opcode::MULTR => {
                self.reg_file[r1] = self.reg_file[r1].wrapping_mul(self.reg_file[r2]);
            }
            Opcode::DIVR => {
                let divisor = self.reg_file[r2];
                if divisor == 0 {
                    return Err(SimErr::DivisionByZero { pc: self.pc }.into());
                }
                self.reg_file[r1] = self.reg_file[r1].wrapping_div(divisor);
            }
            Opcode::READ => {
                let Some(value) = input.read_value() else {
                    return Err(SimErr::InputExhausted { pc: self.pc }.into());
                };
                if value < MEM_SIZE as i64 {
                    self.mem[addr] = value;
                } else {
                    output.write_note(&format!(
                        "input value {value} is too large, ignoring"
                    ));
                }
            }
            Opcode::WRITE => output.write_value(self.mem[addr]),
            Opcode::B => self.pc = d.address,
            Opcode::BM => {
                if self.reg_file[r1] < 0 {
                    self.pc = d.address - 1;
                }
            }
            Opcode::BZ => {
                if self.reg_file[r1] == 0 {
                    self.pc = d.address - 1;
                }
            }
            Opcode::BP => {
                if self.reg_file[r1] > 0 {
                    self.pc = d.address - 1;
                }
            }
            Opcode::HALT => return Err(StepBreak::Halt),
        }
        Ok(())
    }
}
impl Default for Emulator {
    fn default() -> Self {
        Self::new()
    }
}
