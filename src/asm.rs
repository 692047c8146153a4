//! Assembly for the VC8000.
//!
//! The assembler makes two passes over the source. Pass 1
//! ([`SymbolTable::build`]) walks the program once, tracking only the
//! location counter and defining each label at its location. Pass 2
//! ([`assemble`]) rewinds the source, validates every statement against
//! the completed symbol table, and produces an [`Assembly`]: the
//! listing, the diagnostics, and the object image.
//!
//! Assembly-time problems are not fatal; each one appends a
//! [`Diagnostic`] and the pass continues, so a single run reports every
//! problem in the program. An [`Assembly`] with diagnostics is still
//! returned in full, but [`crate::sim::run_assembly`] refuses to execute
//! it.
//!
//! ```
//! use vc8000::parse::StrLineSource;
//! use vc8000::asm::assemble;
//!
//! let assembly = assemble(&mut StrLineSource::from("      READ N
//!       WRITE N
//!       HALT
//! N     DS 1
//!       END"));
//!
//! assert!(assembly.is_clean());
//! assert_eq!(assembly.image.get(0), 119_000_003); // READ, marker 9, N at 3
//! ```

pub mod encoding;

use std::collections::BTreeMap;
use std::fmt;

use crate::ast::{Directive, Opcode, Stmt, StmtKind};
use crate::parse::{classify, LineSource};

/// The largest valid memory location.
pub const MAX_LOCATION: i64 = 999_999;
/// The largest magnitude a `DC`/`DS` operand may have.
pub const MAX_OPERAND: i64 = 10_000;
/// The longest a label may be, in characters.
pub const MAX_LABEL_LEN: usize = 15;

/// The location recorded for a multiply-defined symbol. Deliberately
/// outside `0..=MAX_LOCATION` so the symbol can never resolve.
const MULTIPLY_DEFINED_LOC: i64 = -999;

/// The symbol table built by Pass 1 and consulted by Pass 2.
///
/// Symbol names are matched exactly; there is no case folding and no
/// scoping. Defining a name twice poisons it: its location becomes an
/// out-of-range sentinel, so later lookups see it as unresolvable, and
/// it can never be un-poisoned.
///
/// ```
/// use vc8000::asm::SymbolTable;
///
/// let mut table = SymbolTable::new();
/// table.define("LOOP", 4);
/// assert_eq!(table.lookup("LOOP"), Some(4));
/// assert_eq!(table.lookup("loop"), None);
///
/// table.define("LOOP", 9);
/// assert!(table.is_multiply_defined("LOOP"));
/// ```
#[derive(Debug, Default, Clone)]
pub struct SymbolTable {
    symbols: BTreeMap<String, i64>,
}

impl SymbolTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs Pass 1: walks the source from its current position, defining
    /// every label at its location. `END` stops the pass; running out of
    /// input does too, and is not an error here (Pass 2 reports it).
    pub fn build(src: &mut impl LineSource) -> Self {
        let mut table = SymbolTable::new();
        let mut loc = 0;
        let mut line_no = 0;
        while let Some(line) = src.next_line() {
            line_no += 1;
            let stmt = classify(line_no, &line);
            match stmt.kind {
                StmtKind::End => break,
                StmtKind::Comment => continue,
                _ => {}
            }
            if let Some(label) = &stmt.label {
                table.define(label, loc);
            }
            loc = stmt.next_location(loc);
        }
        table
    }

    /// Binds `name` to `loc`. A second definition of the same name marks
    /// it multiply defined instead; this never fails.
    pub fn define(&mut self, name: &str, loc: i64) {
        self.symbols
            .entry(name.to_string())
            .and_modify(|l| *l = MULTIPLY_DEFINED_LOC)
            .or_insert(loc);
    }

    /// Looks up a symbol's location, exact-match. Multiply-defined
    /// symbols report their sentinel location.
    pub fn lookup(&self, name: &str) -> Option<i64> {
        self.symbols.get(name).copied()
    }

    /// Whether `name` was defined more than once.
    pub fn is_multiply_defined(&self, name: &str) -> bool {
        self.lookup(name) == Some(MULTIPLY_DEFINED_LOC)
    }

    /// Iterates over the defined symbols in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> {
        self.symbols.iter().map(|(name, &loc)| (&**name, loc))
    }
}

/// Any error that can be raised during assembly.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum AsmErrKind {
    /// Input ran out without an `END` statement.
    NoEndStatement,
    /// A non-blank statement appeared after `END`.
    StatementAfterEnd,
    /// The operation field is not a known mnemonic.
    InvalidOperation,
    /// Extra fields appeared after the operands.
    TrailingFields,
    /// A label is longer than [`MAX_LABEL_LEN`] characters.
    LabelTooLong,
    /// A label starts with a digit.
    LabelStartsWithDigit,
    /// The projected next location exceeds [`MAX_LOCATION`].
    MemoryOverflow,
    /// An `ORG` statement carries a label.
    LabelOnOrg,
    /// A `DC`/`DS` statement is missing its label.
    MissingLabel,
    /// A label was defined more than once.
    MultiplyDefinedLabel,
    /// A required operand is absent.
    MissingOperand,
    /// A `DC`/`DS` operand is not numeric.
    OperandNotNumeric,
    /// A `DC`/`DS` operand's magnitude exceeds [`MAX_OPERAND`].
    OperandTooLarge,
    /// An operand appeared where none is allowed.
    ExtraOperand,
    /// A register operand is not numeric.
    RegisterNotNumeric,
    /// A register operand is outside `[0, 9]`.
    InvalidRegister,
    /// A symbolic operand could not be resolved to a location.
    UnresolvedSymbol(String),
    /// A numeric operand appeared where a symbol is required.
    OperandNotSymbolic,
    /// A `HALT` statement carries an operand.
    OperandOnHalt,
    /// A `HALT` statement carries a label.
    LabelOnHalt,
}

impl fmt::Display for AsmErrKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoEndStatement => f.write_str("no END statement found"),
            Self::StatementAfterEnd => f.write_str("last statement is not END"),
            Self::InvalidOperation => f.write_str("invalid operation"),
            Self::TrailingFields => f.write_str("extra fields after the operands"),
            Self::LabelTooLong => {
                write!(f, "label is longer than {MAX_LABEL_LEN} characters")
            }
            Self::LabelStartsWithDigit => f.write_str("label starts with a digit"),
            Self::MemoryOverflow => {
                write!(f, "location exceeds the last memory address {MAX_LOCATION}")
            }
            Self::LabelOnOrg => f.write_str("ORG cannot have a label"),
            Self::MissingLabel => f.write_str("missing label"),
            Self::MultiplyDefinedLabel => f.write_str("label is multiply defined"),
            Self::MissingOperand => f.write_str("missing operand"),
            Self::OperandNotNumeric => f.write_str("operand must be numeric"),
            Self::OperandTooLarge => {
                write!(f, "operand magnitude exceeds {MAX_OPERAND}")
            }
            Self::ExtraOperand => f.write_str("unexpected second operand"),
            Self::RegisterNotNumeric => f.write_str("register must be numeric"),
            Self::InvalidRegister => f.write_str("register must be between 0 and 9"),
            Self::UnresolvedSymbol(name) => {
                write!(f, "cannot find the location of symbol `{name}`")
            }
            Self::OperandNotSymbolic => f.write_str("operand must be a symbol"),
            Self::OperandOnHalt => f.write_str("HALT cannot have an operand"),
            Self::LabelOnHalt => f.write_str("HALT cannot have a label"),
        }
    }
}
impl std::error::Error for AsmErrKind {}
impl crate::err::Error for AsmErrKind {
    fn help(&self) -> Option<std::borrow::Cow<str>> {
        match self {
            Self::NoEndStatement => Some("add an END statement after the last line".into()),
            Self::StatementAfterEnd => Some("END must be the last statement".into()),
            Self::MultiplyDefinedLabel => {
                Some("each label may only be defined once".into())
            }
            Self::UnresolvedSymbol(_) => {
                Some("address operands must name a label defined somewhere in the program".into())
            }
            Self::OperandNotSymbolic => {
                Some("READ and WRITE take a labeled memory location, not a literal".into())
            }
            _ => None,
        }
    }
}

/// One recorded assembly error: where it happened and what it was.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Diagnostic {
    /// 1-based source line number.
    pub line: usize,
    /// The offending statement's original text.
    pub stmt: String,
    /// What went wrong.
    pub kind: AsmErrKind,
}
impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {} ({})", self.line, self.kind, self.stmt.trim())
    }
}

/// The ordered, append-only record of everything that went wrong during
/// one assembly run.
#[derive(Debug, Default, Clone)]
pub struct Diagnostics {
    msgs: Vec<Diagnostic>,
}

impl Diagnostics {
    fn record(&mut self, line: usize, stmt: &str, kind: AsmErrKind) {
        self.msgs.push(Diagnostic {
            line,
            stmt: stmt.to_string(),
            kind,
        });
    }

    /// Whether nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.msgs.is_empty()
    }

    /// The number of recorded diagnostics.
    pub fn len(&self) -> usize {
        self.msgs.len()
    }

    /// Iterates over the diagnostics in the order they were recorded.
    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.msgs.iter()
    }
}
impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for d in &self.msgs {
            writeln!(f, "{d}")?;
        }
        Ok(())
    }
}

/// One line of the assembly listing.
///
/// Directives and machine instructions carry their location, and
/// instructions and `DC` also carry the encoded word. Comments and the
/// end marker carry original text only.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct ListingEntry {
    /// The statement's location, if it occupies one.
    pub location: Option<i64>,
    /// The word generated at that location, if any.
    pub word: Option<i64>,
    /// The original statement text.
    pub source: String,
}
impl fmt::Display for ListingEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.location, self.word) {
            // The sign sits outside the padding so the word keeps its
            // nine digits.
            (Some(loc), Some(word)) if word < 0 => {
                write!(f, "{loc}\t-{:09}\t{}", word.unsigned_abs(), self.source)
            }
            (Some(loc), Some(word)) => write!(f, "{loc}\t{word:09}\t{}", self.source),
            (Some(loc), None) => write!(f, "{loc}\t\t{}", self.source),
            _ => write!(f, "\t\t{}", self.source),
        }
    }
}

/// The assembled program: a sparse map from location to memory word.
#[derive(Debug, Default, Clone)]
pub struct ObjectImage {
    words: BTreeMap<i64, i64>,
}

impl ObjectImage {
    /// Writes `word` at `loc`, silently overwriting any previous word
    /// there. Out-of-range locations are ignored.
    pub fn write(&mut self, loc: i64, word: i64) {
        if (0..=MAX_LOCATION).contains(&loc) {
            self.words.insert(loc, word);
        }
    }

    /// The word at `loc`, or 0 if nothing was assembled there.
    pub fn get(&self, loc: i64) -> i64 {
        self.words.get(&loc).copied().unwrap_or(0)
    }

    /// Iterates over the assembled words in location order.
    pub fn iter(&self) -> impl Iterator<Item = (i64, i64)> + '_ {
        self.words.iter().map(|(&loc, &word)| (loc, word))
    }
}

/// Everything produced by one assembly run.
#[derive(Debug, Default, Clone)]
pub struct Assembly {
    /// The listing, one entry per processed statement.
    pub listing: Vec<ListingEntry>,
    /// Everything that went wrong.
    pub diagnostics: Diagnostics,
    /// The assembled memory words.
    pub image: ObjectImage,
}

impl Assembly {
    /// Whether assembly completed without recording any diagnostic.
    /// Only a clean assembly may be executed.
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Assembles a program.
///
/// The source is rewound, walked once to build the symbol table
/// (Pass 1), rewound again, and walked a second time to validate and
/// encode every statement (Pass 2). Errors never abort the run; they
/// accumulate in the returned [`Assembly::diagnostics`].
pub fn assemble(src: &mut impl LineSource) -> Assembly {
    src.rewind();
    let symbols = SymbolTable::build(src);
    src.rewind();

    let mut pass = Pass2 {
        symbols,
        out: Assembly::default(),
        loc: 0,
    };
    pass.run(src);
    pass.out
}

/// Pass 2 state: the completed symbol table, the accumulating output,
/// and the location counter.
struct Pass2 {
    symbols: SymbolTable,
    out: Assembly,
    loc: i64,
}

impl Pass2 {
    fn run(&mut self, src: &mut impl LineSource) {
        let mut line_no = 0;
        loop {
            let Some(line) = src.next_line() else {
                self.out
                    .diagnostics
                    .record(line_no, "", AsmErrKind::NoEndStatement);
                return;
            };
            line_no += 1;
            let stmt = classify(line_no, &line);

            if stmt.trailing_fields {
                self.record(&stmt, AsmErrKind::TrailingFields);
            }
            match stmt.kind {
                StmtKind::End => {
                    self.push_listing(None, None, &stmt.raw);
                    self.check_after_end(src, line_no);
                    return;
                }
                StmtKind::Comment => {
                    self.push_listing(None, None, &stmt.raw);
                }
                StmtKind::Malformed => {
                    self.record(&stmt, AsmErrKind::InvalidOperation);
                }
                StmtKind::Directive(dir) => {
                    if self.check_line(&stmt) {
                        self.handle_directive(dir, &stmt);
                    }
                    self.loc = stmt.next_location(self.loc);
                }
                StmtKind::Machine(op) => {
                    if self.check_line(&stmt) {
                        self.handle_machine(op, &stmt);
                    }
                    self.loc = stmt.next_location(self.loc);
                }
            }
        }
    }

    /// After `END`, any remaining non-blank line is an error. Only the
    /// first is reported; the pass terminates regardless.
    fn check_after_end(&mut self, src: &mut impl LineSource, mut line_no: usize) {
        while let Some(line) = src.next_line() {
            line_no += 1;
            if !line.trim().is_empty() {
                self.out
                    .diagnostics
                    .record(line_no, &line, AsmErrKind::StatementAfterEnd);
                return;
            }
        }
    }

    /// Line-level checks shared by directives and machine instructions.
    /// Each failure is reported independently; only the capacity check
    /// suppresses encoding (the other checks leave the statement
    /// encodable).
    fn check_line(&mut self, stmt: &Stmt) -> bool {
        if let Some(label) = &stmt.label {
            if label.chars().count() > MAX_LABEL_LEN {
                self.record(stmt, AsmErrKind::LabelTooLong);
            }
            if label.starts_with(|c: char| c.is_ascii_digit()) {
                self.record(stmt, AsmErrKind::LabelStartsWithDigit);
            }
        }
        if stmt.next_location(self.loc) > MAX_LOCATION {
            self.record(stmt, AsmErrKind::MemoryOverflow);
            return false;
        }
        true
    }

    fn handle_directive(&mut self, dir: Directive, stmt: &Stmt) {
        if dir == Directive::ORG {
            if stmt.label.is_some() {
                self.record(stmt, AsmErrKind::LabelOnOrg);
            }
            self.push_listing(Some(self.loc), None, &stmt.raw);
            return;
        }

        // DC and DS share their label and operand validation.
        if stmt.operand2.is_some() {
            self.record(stmt, AsmErrKind::ExtraOperand);
        }
        let value = match &stmt.operand1 {
            None => {
                self.record(stmt, AsmErrKind::MissingOperand);
                None
            }
            Some(o) => match o.value() {
                None => {
                    self.record(stmt, AsmErrKind::OperandNotNumeric);
                    None
                }
                Some(v) => {
                    if v.unsigned_abs() > MAX_OPERAND as u64 {
                        self.record(stmt, AsmErrKind::OperandTooLarge);
                    }
                    Some(v)
                }
            },
        };
        match &stmt.label {
            None => self.record(stmt, AsmErrKind::MissingLabel),
            Some(label) => {
                if self.symbols.is_multiply_defined(label) {
                    self.record(stmt, AsmErrKind::MultiplyDefinedLabel);
                }
            }
        }

        match (dir, value) {
            (Directive::DC, Some(v)) => {
                self.out.image.write(self.loc, v);
                self.push_listing(Some(self.loc), Some(v), &stmt.raw);
            }
            _ => self.push_listing(Some(self.loc), None, &stmt.raw),
        }
    }

    fn handle_machine(&mut self, op: Opcode, stmt: &Stmt) {
        if let Some(label) = &stmt.label {
            if op == Opcode::HALT {
                self.record(stmt, AsmErrKind::LabelOnHalt);
            }
            if self.symbols.is_multiply_defined(label) {
                self.record(stmt, AsmErrKind::MultiplyDefinedLabel);
            }
        }

        let (word, errs) = encoding::encode(
            op,
            stmt.operand1.as_ref(),
            stmt.operand2.as_ref(),
            &self.symbols,
        );
        for kind in errs {
            self.record(stmt, kind);
        }
        self.out.image.write(self.loc, word);
        self.push_listing(Some(self.loc), Some(word), &stmt.raw);
    }

    fn record(&mut self, stmt: &Stmt, kind: AsmErrKind) {
        self.out.diagnostics.record(stmt.line, &stmt.raw, kind);
    }

    fn push_listing(&mut self, location: Option<i64>, word: Option<i64>, source: &str) {
        self.out.listing.push(ListingEntry {
            location,
            word,
            source: source.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::{assemble, AsmErrKind, Assembly, SymbolTable};
    use crate::parse::StrLineSource;

    fn assemble_src(src: &str) -> Assembly {
        assemble(&mut StrLineSource::from(src))
    }

    fn kinds(assembly: &Assembly) -> Vec<&AsmErrKind> {
        assembly.diagnostics.iter().map(|d| &d.kind).collect()
    }

    #[test]
    fn test_pass1_locations() {
        let mut src = StrLineSource::from(
            "START READ N
      ORG 10
TABLE DS 5
N     DC 0
      END",
        );
        let table = SymbolTable::build(&mut src);
        assert_eq!(table.lookup("START"), Some(0));
        // ORG advances by its operand; the counter was at 1.
        assert_eq!(table.lookup("TABLE"), Some(11));
        assert_eq!(table.lookup("N"), Some(16));
    }

    #[test]
    fn test_multiply_defined_symbol() {
        let mut src = StrLineSource::from(
            "X     DC 1
X     DC 2
      END",
        );
        let table = SymbolTable::build(&mut src);
        assert!(table.is_multiply_defined("X"));
        assert_eq!(table.lookup("Y"), None);
    }

    #[test]
    fn test_dc_and_ds() {
        let assembly = assemble_src(
            "FIVE  DC 5
NEG   DC -17
BUF   DS 3
AFTER DC 123
      END",
        );
        assert!(assembly.is_clean());
        assert_eq!(assembly.image.get(0), 5);
        assert_eq!(assembly.image.get(1), -17);
        // DS reserves without writing.
        assert_eq!(assembly.image.get(2), 0);
        assert_eq!(assembly.image.get(5), 123);
    }

    #[test]
    fn test_address_form_symbol() {
        let mut src = String::new();
        // Pad COUNT out to location 42.
        src.push_str("      LOAD 1,COUNT\n");
        src.push_str("PAD   DS 41\n");
        src.push_str("COUNT DC 7\n");
        src.push_str("      END\n");
        let assembly = assemble_src(&src);
        assert!(assembly.is_clean());
        assert_eq!(assembly.image.get(0), 51_000_042);
    }

    #[test]
    fn test_missing_end() {
        let assembly = assemble_src("N     DC 1");
        assert_eq!(kinds(&assembly), vec![&AsmErrKind::NoEndStatement]);
    }

    #[test]
    fn test_statement_after_end() {
        let assembly = assemble_src(
            "      HALT
      END

      DC 5",
        );
        assert_eq!(kinds(&assembly), vec![&AsmErrKind::StatementAfterEnd]);
    }

    #[test]
    fn test_unresolved_symbol_diagnostic() {
        let assembly = assemble_src(
            "LOOP  LOAD 5,200
      END",
        );
        assert_eq!(
            kinds(&assembly),
            vec![&AsmErrKind::UnresolvedSymbol("200".to_string())]
        );
        // The word is still emitted, with address sentinel 0.
        assert_eq!(assembly.image.get(0), 55_000_000);
    }

    #[test]
    fn test_label_checks() {
        let assembly = assemble_src(
            "AVERYLONGLABELNAME DC 1
9LIVES DC 2
      END",
        );
        assert_eq!(
            kinds(&assembly),
            vec![&AsmErrKind::LabelTooLong, &AsmErrKind::LabelStartsWithDigit]
        );
    }

    #[test]
    fn test_directive_operand_checks() {
        let assembly = assemble_src(
            "A     DC 20000
B     DS FIVE
      DC 1
C     DC 1,2
      END",
        );
        assert_eq!(
            kinds(&assembly),
            vec![
                &AsmErrKind::OperandTooLarge,
                &AsmErrKind::OperandNotNumeric,
                &AsmErrKind::MissingLabel,
                &AsmErrKind::ExtraOperand,
            ]
        );
        // The too-large constant is still written.
        assert_eq!(assembly.image.get(0), 20000);
    }

    #[test]
    fn test_org_rules() {
        let assembly = assemble_src(
            "HERE  ORG 10
      END",
        );
        assert_eq!(kinds(&assembly), vec![&AsmErrKind::LabelOnOrg]);
    }

    #[test]
    fn test_halt_rules() {
        let assembly = assemble_src(
            "STOP  HALT
      END",
        );
        assert_eq!(kinds(&assembly), vec![&AsmErrKind::LabelOnHalt]);
        assert_eq!(assembly.image.get(0), 179_000_000);
    }

    #[test]
    fn test_multiply_defined_operand() {
        let assembly = assemble_src(
            "X     DC 1
X     DC 2
      LOAD 1,X
      END",
        );
        let kinds = kinds(&assembly);
        // Both definitions flag the label; the use cannot resolve it.
        assert!(kinds.contains(&&AsmErrKind::MultiplyDefinedLabel));
        assert!(kinds.contains(&&AsmErrKind::UnresolvedSymbol("X".to_string())));
        assert_eq!(assembly.image.get(2), 51_000_000);
    }

    #[test]
    fn test_memory_overflow() {
        let assembly = assemble_src(
            "BIG   ORG 999999
      HALT
      END",
        );
        assert_eq!(
            kinds(&assembly),
            vec![&AsmErrKind::LabelOnOrg, &AsmErrKind::MemoryOverflow]
        );
        // The overflowing instruction is not encoded.
        assert_eq!(assembly.image.get(1_000_000), 0);
    }

    #[test]
    fn test_huge_reservation_reports_overflow() {
        // The location counter saturates instead of wrapping, so every
        // statement past the blowup reports the capacity error.
        let assembly = assemble_src(
            "A     DS 9223372036854775807
B     DS 2
      HALT
      END",
        );
        assert_eq!(
            kinds(&assembly),
            vec![
                &AsmErrKind::MemoryOverflow,
                &AsmErrKind::MemoryOverflow,
                &AsmErrKind::MemoryOverflow,
            ]
        );
    }

    #[test]
    fn test_most_negative_operand() {
        let assembly = assemble_src(
            "N     DS -9223372036854775808
M     DC 1
      END",
        );
        assert!(kinds(&assembly).contains(&&AsmErrKind::OperandTooLarge));
    }

    #[test]
    fn test_listing_negative_word() {
        let assembly = assemble_src(
            "NEG   DC -17
      END",
        );
        // Nine digits with the sign outside the padding.
        assert_eq!(
            assembly.listing[0].to_string(),
            "0\t-000000017\tNEG   DC -17"
        );
    }

    #[test]
    fn test_invalid_operation() {
        let assembly = assemble_src(
            "      FROB 1,2
      HALT
      END",
        );
        assert_eq!(kinds(&assembly), vec![&AsmErrKind::InvalidOperation]);
    }

    #[test]
    fn test_trailing_fields() {
        // `junk` lands in the operand2 slot, `here` is the trailing
        // field; both are reported.
        let assembly = assemble_src(
            "N     DC 5 junk here
      END",
        );
        assert_eq!(
            kinds(&assembly),
            vec![&AsmErrKind::TrailingFields, &AsmErrKind::ExtraOperand]
        );
    }

    #[test]
    fn test_listing_shape() {
        let assembly = assemble_src(
            "; a program
N     DC 5
      HALT
      END",
        );
        assert!(assembly.is_clean());
        let listing = &assembly.listing;
        assert_eq!(listing.len(), 4);
        assert_eq!(listing[0].location, None);
        assert_eq!(listing[1].location, Some(0));
        assert_eq!(listing[1].word, Some(5));
        assert_eq!(listing[2].word, Some(179_000_000));
        assert_eq!(listing[3].location, None);
        assert_eq!(listing[1].to_string(), "0\t000000005\tN     DC 5");
    }
}
