//! Components representing VC8000 source statements.
//!
//! These components together describe a single classified line of
//! source code:
//! - [`Opcode`]: the machine-language operations and their numeric codes,
//! - [`Directive`]: the assembler directives (`DC`, `DS`, `ORG`),
//! - [`Operand`]: one operand field, with its numeric value if it has one,
//! - and [`Stmt`]/[`StmtKind`]: the classified statement itself.
//!
//! Statements are produced from source text by [`crate::parse::classify`].

use std::fmt;

macro_rules! opcode_enum {
    ($($instr:ident = $code:literal),+ $(,)?) => {
        /// A machine-language opcode.
        ///
        /// Each mnemonic is bound to a fixed numeric code, 1 through 17 in
        /// declaration order. That code occupies the two most significant
        /// digits of an encoded memory word, so the ordering of this table
        /// is load-bearing: both the encoder and the emulator's decoder
        /// rely on it.
        #[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
        pub enum Opcode {
            $(
                #[allow(missing_docs)]
                $instr = $code
            ),+
        }

        impl Opcode {
            /// The numeric code for this opcode.
            pub fn code(self) -> i64 {
                self as i64
            }

            /// Looks up a mnemonic, case-insensitively.
            pub fn from_mnemonic(m: &str) -> Option<Self> {
                match &*m.to_uppercase() {
                    $(stringify!($instr) => Some(Self::$instr)),+,
                    _ => None,
                }
            }

            /// Recovers an opcode from its numeric code, as found in the
            /// two most significant digits of a memory word.
            pub fn from_code(code: i64) -> Option<Self> {
                match code {
                    $($code => Some(Self::$instr)),+,
                    _ => None,
                }
            }
        }

        impl fmt::Display for Opcode {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                match self {
                    $(Self::$instr => f.write_str(stringify!($instr))),+
                }
            }
        }
    };
}
opcode_enum! {
    ADD = 1, SUB = 2, MULT = 3, DIV = 4, LOAD = 5, STORE = 6,
    ADDR = 7, SUBR = 8, MULTR = 9, DIVR = 10,
    READ = 11, WRITE = 12, B = 13, BM = 14, BZ = 15, BP = 16,
    HALT = 17,
}

impl Opcode {
    /// Whether this opcode takes two register operands
    /// (the register-to-register arithmetic group, codes 7-10).
    pub fn is_register_form(self) -> bool {
        matches!(self, Self::ADDR | Self::SUBR | Self::MULTR | Self::DIVR)
    }

    /// Whether this opcode takes no register operand at all
    /// (input, output, and halt; codes 11, 12, 17).
    ///
    /// These encode the reserved marker digit `9` in the register field.
    pub fn is_register_less(self) -> bool {
        matches!(self, Self::READ | Self::WRITE | Self::HALT)
    }
}

/// An assembler directive: `DC` (define constant), `DS` (define
/// storage), or `ORG` (set origin).
///
/// `END` is not listed here; the end marker is its own statement kind
/// ([`StmtKind::End`]) because it terminates a pass rather than
/// generating anything.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum Directive {
    #[allow(missing_docs)]
    DC,
    #[allow(missing_docs)]
    DS,
    #[allow(missing_docs)]
    ORG,
}
impl Directive {
    /// Looks up a directive mnemonic, case-insensitively.
    pub fn from_mnemonic(m: &str) -> Option<Self> {
        match &*m.to_uppercase() {
            "DC" => Some(Self::DC),
            "DS" => Some(Self::DS),
            "ORG" => Some(Self::ORG),
            _ => None,
        }
    }
}
impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DC => f.write_str("DC"),
            Self::DS => f.write_str("DS"),
            Self::ORG => f.write_str("ORG"),
        }
    }
}

/// A register number. Must be between 0 and 9.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub struct Reg(pub(crate) u8);

impl Reg {
    /// Creates a register from a numeric operand value,
    /// returning `None` if the value is outside `[0, 9]`.
    pub fn new(value: i64) -> Option<Self> {
        match value {
            0..=9 => Some(Reg(value as u8)),
            _ => None,
        }
    }

    /// Gets the register number. This is always between 0 and 9.
    pub fn reg_no(self) -> u8 {
        self.0
    }
}
impl fmt::Display for Reg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
impl From<Reg> for i64 {
    fn from(value: Reg) -> Self {
        i64::from(value.0)
    }
}

/// One operand field of a statement.
///
/// An operand keeps the raw token text (symbol lookups are performed on
/// the exact text, case-sensitively) alongside its numeric value, if the
/// token is numeric. A token is numeric if it is non-empty, optionally
/// prefixed with a single sign character, and otherwise all decimal
/// digits; a lone sign is not numeric. Tokens whose value does not fit a
/// signed 64-bit integer are treated as non-numeric.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Operand {
    raw: String,
    value: Option<i64>,
}

impl Operand {
    /// Creates an operand from a raw field token.
    pub fn new(raw: String) -> Self {
        let value = parse_numeric(&raw);
        Operand { raw, value }
    }

    /// Whether this operand is a numeric literal.
    pub fn is_numeric(&self) -> bool {
        self.value.is_some()
    }

    /// The numeric value of this operand, if it is numeric.
    pub fn value(&self) -> Option<i64> {
        self.value
    }

    /// The raw operand text.
    pub fn text(&self) -> &str {
        &self.raw
    }
}
impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

fn parse_numeric(s: &str) -> Option<i64> {
    let digits = s.strip_prefix(['+', '-']).unwrap_or(s);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// The classification of one source statement.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum StmtKind {
    /// A machine-language instruction.
    Machine(Opcode),
    /// An assembler directive (`DC`, `DS`, `ORG`).
    Directive(Directive),
    /// A comment or blank line.
    Comment,
    /// The `END` marker terminating the program.
    End,
    /// A statement with an unrecognized operation.
    Malformed,
}

/// One classified source statement.
///
/// Both assembler passes recompute this from the same source text, so a
/// given line always classifies identically in pass 1 and pass 2.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Stmt {
    /// 1-based source line number.
    pub line: usize,
    /// The label, if the line began in column one.
    pub label: Option<String>,
    /// What this statement is.
    pub kind: StmtKind,
    /// The first operand field.
    pub operand1: Option<Operand>,
    /// The second operand field.
    pub operand2: Option<Operand>,
    /// The original statement text, untouched, for listings and
    /// diagnostics.
    pub raw: String,
    /// True if fields remained after the operands. Recorded as a format
    /// error by pass 2; classification itself carries on.
    pub trailing_fields: bool,
}

impl Stmt {
    /// Computes the location of the next instruction, given the location
    /// of this one.
    ///
    /// `DS` and `ORG` advance the location counter by their numeric
    /// operand (`ORG` is additive, not absolute); every other statement
    /// occupies exactly one word.
    ///
    /// The addition saturates: an absurd operand pins the counter at the
    /// numeric extreme, which the capacity check then reports.
    pub fn next_location(&self, loc: i64) -> i64 {
        match self.kind {
            StmtKind::Directive(Directive::DS | Directive::ORG) => {
                let n = self.operand1.as_ref().and_then(Operand::value).unwrap_or(0);
                loc.saturating_add(n)
            }
            _ => loc.saturating_add(1),
        }
    }
}
