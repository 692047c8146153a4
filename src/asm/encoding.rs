//! Encoding and decoding of VC8000 memory words.
//!
//! A machine instruction occupies one 9-digit decimal word:
//!
//! ```text
//! o o r a a a a a a     address form      opcode, register, address
//! o o r r 0 0 0 0 0     register form     opcode, two registers
//! o o 9 a a a a a a     register-less     opcode, marker 9, address
//! ```
//!
//! The fields are packed with plain integer arithmetic against the
//! powers of ten below. Note that the register-form second register
//! shares a digit with the top of the address field: the register form
//! is an address-form word whose "address" is `r2 * 100_000`.
//!
//! [`encode`] is pure: the same statement against the same symbol table
//! always yields the same word. Operand problems are returned alongside
//! the word rather than aborting, with the offending field encoded as 0,
//! so a listing line is produced even for a bad statement.

use crate::asm::{AsmErrKind, SymbolTable};
use crate::ast::{Opcode, Operand, Reg};

/// The multiplier placing the opcode in the top two digits of a word.
pub const OPCODE_UNIT: i64 = 10_000_000;
/// The multiplier placing the (first) register digit.
pub const REG1_UNIT: i64 = 1_000_000;
/// The multiplier placing the second register digit of a register-form
/// word. This digit overlaps the top digit of the address field.
pub const REG2_UNIT: i64 = 100_000;
/// The exclusive upper bound of the 6-digit address field.
pub const ADDR_UNIT: i64 = 1_000_000;
/// The register-field marker for instructions that take no register.
pub const NO_REG_MARK: i64 = 9;

/// The fields of a decoded memory word.
///
/// Decoding is purely positional; it does not check that the opcode is
/// valid or that the fields make sense for it. The emulator validates
/// the opcode itself so that a bad word is its error to report.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Decoded {
    /// The top two digits.
    pub opcode: i64,
    /// The register digit (first register digit, in register form).
    pub reg1: i64,
    /// The digit below [`reg1`], the second register of a register-form
    /// word. For other forms this is just the top address digit.
    ///
    /// [`reg1`]: Decoded::reg1
    pub reg2: i64,
    /// The bottom six digits.
    pub address: i64,
}

/// Splits a memory word into its instruction fields.
pub fn decode(word: i64) -> Decoded {
    Decoded {
        opcode: word / OPCODE_UNIT,
        reg1: (word / REG1_UNIT) % 10,
        reg2: (word / REG2_UNIT) % 10,
        address: word % ADDR_UNIT,
    }
}

/// Encodes one machine instruction into a memory word.
///
/// Symbolic address operands are resolved against `symbols`; a symbol
/// that cannot be resolved to a location in `0..1_000_000` (undefined,
/// or multiply defined) encodes address 0 and reports
/// [`AsmErrKind::UnresolvedSymbol`]. All operand problems for the
/// statement are collected; each bad field encodes as 0.
pub fn encode(
    op: Opcode,
    operand1: Option<&Operand>,
    operand2: Option<&Operand>,
    symbols: &SymbolTable,
) -> (i64, Vec<AsmErrKind>) {
    let mut errs = Vec::new();
    let base = op.code() * OPCODE_UNIT;

    let word = if op.is_register_form() {
        let r1 = register(operand1, &mut errs);
        let r2 = register(operand2, &mut errs);
        base + r1 * REG1_UNIT + r2 * REG2_UNIT
    } else if op.is_register_less() {
        if op == Opcode::HALT {
            if operand1.is_some() {
                errs.push(AsmErrKind::OperandOnHalt);
            }
            base + NO_REG_MARK * REG1_UNIT
        } else {
            let addr = match operand1 {
                None => {
                    errs.push(AsmErrKind::MissingOperand);
                    0
                }
                Some(o) if o.is_numeric() => {
                    errs.push(AsmErrKind::OperandNotSymbolic);
                    0
                }
                Some(o) => resolve(o, symbols, &mut errs),
            };
            if operand2.is_some() {
                errs.push(AsmErrKind::ExtraOperand);
            }
            base + NO_REG_MARK * REG1_UNIT + addr
        }
    } else {
        let r1 = register(operand1, &mut errs);
        let addr = match operand2 {
            None => {
                errs.push(AsmErrKind::MissingOperand);
                0
            }
            Some(o) => resolve(o, symbols, &mut errs),
        };
        base + r1 * REG1_UNIT + addr
    };

    (word, errs)
}

/// Interprets an operand as a register number, pushing an error and
/// yielding 0 if it is absent, non-numeric, or out of range.
fn register(operand: Option<&Operand>, errs: &mut Vec<AsmErrKind>) -> i64 {
    let Some(operand) = operand else {
        errs.push(AsmErrKind::MissingOperand);
        return 0;
    };
    let Some(value) = operand.value() else {
        errs.push(AsmErrKind::RegisterNotNumeric);
        return 0;
    };
    match Reg::new(value) {
        Some(r) => r.into(),
        None => {
            errs.push(AsmErrKind::InvalidRegister);
            0
        }
    }
}

/// Resolves a symbolic operand to an address in `0..ADDR_UNIT`.
///
/// The lookup uses the operand's exact text. A multiply-defined symbol
/// carries the out-of-range sentinel location, so it fails the range
/// check here and reports the same way an undefined symbol does.
fn resolve(operand: &Operand, symbols: &SymbolTable, errs: &mut Vec<AsmErrKind>) -> i64 {
    match symbols.lookup(operand.text()) {
        Some(loc) if (0..ADDR_UNIT).contains(&loc) => loc,
        _ => {
            errs.push(AsmErrKind::UnresolvedSymbol(operand.text().to_string()));
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{decode, encode, Decoded};
    use crate::asm::{AsmErrKind, SymbolTable};
    use crate::ast::{Opcode, Operand};

    fn operand(s: &str) -> Operand {
        Operand::new(s.to_string())
    }

    fn table(entries: &[(&str, i64)]) -> SymbolTable {
        let mut t = SymbolTable::new();
        for &(name, loc) in entries {
            t.define(name, loc);
        }
        t
    }

    #[test]
    fn test_register_form() {
        let syms = SymbolTable::new();
        let (word, errs) = encode(Opcode::ADDR, Some(&operand("2")), Some(&operand("3")), &syms);
        assert_eq!(word, 72_300_000);
        assert!(errs.is_empty());
    }

    #[test]
    fn test_address_form() {
        let syms = table(&[("COUNT", 42)]);
        let (word, errs) = encode(Opcode::LOAD, Some(&operand("1")), Some(&operand("COUNT")), &syms);
        assert_eq!(word, 51_000_042);
        assert!(errs.is_empty());
    }

    #[test]
    fn test_register_less_form() {
        let syms = table(&[("N", 7)]);
        let (word, errs) = encode(Opcode::WRITE, Some(&operand("N")), None, &syms);
        assert_eq!(word, 129_000_007);
        assert!(errs.is_empty());

        let (word, errs) = encode(Opcode::HALT, None, None, &syms);
        assert_eq!(word, 179_000_000);
        assert!(errs.is_empty());
    }

    #[test]
    fn test_unresolved_symbol() {
        let syms = SymbolTable::new();
        let (word, errs) = encode(Opcode::LOAD, Some(&operand("5")), Some(&operand("200")), &syms);
        // The address field falls back to 0 and the word is still produced.
        assert_eq!(word, 55_000_000);
        assert_eq!(errs, vec![AsmErrKind::UnresolvedSymbol("200".to_string())]);
    }

    #[test]
    fn test_register_errors() {
        let syms = table(&[("X", 3)]);
        let (word, errs) = encode(Opcode::ADD, Some(&operand("12")), Some(&operand("X")), &syms);
        assert_eq!(word, 10_000_003);
        assert_eq!(errs, vec![AsmErrKind::InvalidRegister]);

        let (_, errs) = encode(Opcode::ADD, Some(&operand("R1")), Some(&operand("X")), &syms);
        assert_eq!(errs, vec![AsmErrKind::RegisterNotNumeric]);

        let (_, errs) = encode(Opcode::ADD, None, None, &syms);
        assert_eq!(
            errs,
            vec![AsmErrKind::MissingOperand, AsmErrKind::MissingOperand]
        );
    }

    #[test]
    fn test_halt_takes_no_operand() {
        let syms = SymbolTable::new();
        let (word, errs) = encode(Opcode::HALT, Some(&operand("X")), None, &syms);
        assert_eq!(word, 179_000_000);
        assert_eq!(errs, vec![AsmErrKind::OperandOnHalt]);
    }

    #[test]
    fn test_decode_fields() {
        assert_eq!(
            decode(51_000_042),
            Decoded { opcode: 5, reg1: 1, reg2: 0, address: 42 }
        );
        // Register form reads back through the shared digit.
        assert_eq!(
            decode(72_300_000),
            Decoded { opcode: 7, reg1: 2, reg2: 3, address: 300_000 }
        );
        assert_eq!(decode(0), Decoded { opcode: 0, reg1: 0, reg2: 0, address: 0 });
    }

    #[test]
    fn test_encode_is_deterministic() {
        let syms = table(&[("A", 10), ("B", 20)]);
        let a = encode(Opcode::STORE, Some(&operand("4")), Some(&operand("B")), &syms);
        let b = encode(Opcode::STORE, Some(&operand("4")), Some(&operand("B")), &syms);
        assert_eq!(a, b);
    }
}
