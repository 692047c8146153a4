//! A VC8000 assembler and emulator.
//!
//! The VC8000 is a teaching machine with a decimal instruction set:
//! every memory word is a 9-digit decimal integer, and machine
//! instructions pack an opcode, a register digit, and a 6-digit address
//! into one word. This crate translates VC8000 assembly source into
//! encoded words with a classic two-pass assembler, then executes the
//! words on a register/memory emulator.
//!
//! # Usage
//!
//! Source lines come from a rewindable [`parse::LineSource`] (the second
//! assembler pass re-reads the program from the start). To assemble a
//! program:
//!
//! ```
//! use vc8000::parse::StrLineSource;
//! use vc8000::asm::assemble;
//!
//! let src = "      LOAD 1,FIVE     ; r1 <- 5
//!       ADD 1,FIVE      ; r1 <- r1 + 5
//!       STORE 1,TOTAL
//!       HALT
//! FIVE  DC 5
//! TOTAL DS 1
//!       END";
//!
//! let assembly = assemble(&mut StrLineSource::from(src));
//! assert!(assembly.is_clean());
//! assert_eq!(assembly.image.get(4), 5); // FIVE's constant, at location 4
//! ```
//!
//! Once assembled, the program can be executed with the emulator. The
//! emulator only runs programs whose assembly recorded no diagnostics:
//!
//! ```
//! # use vc8000::parse::StrLineSource;
//! # use vc8000::asm::assemble;
//! # let src = "      LOAD 1,FIVE
//! #       WRITE FIVE
//! #       HALT
//! # FIVE  DC 5
//! #       END";
//! # let assembly = assemble(&mut StrLineSource::from(src));
//! use vc8000::sim::run_assembly;
//! use vc8000::sim::io::BufferedIo;
//!
//! let io = BufferedIo::new();
//! let (mut input, mut output) = (io.clone(), io.clone());
//!
//! let exit = run_assembly(&assembly, &mut input, &mut output);
//! assert!(exit.is_some()); // assembly was clean, so the emulator ran
//! assert_eq!(*io.get_output().read().unwrap(), vec![5]);
//! ```
//!
//! If more granularity is needed, [`sim::Emulator`] can be driven
//! directly. See the [`sim`] module for more details.
#![warn(missing_docs)]

pub mod parse;
pub mod ast;
pub mod asm;
pub mod sim;
pub mod err;
