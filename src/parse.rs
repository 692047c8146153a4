//! Parsing VC8000 source into statements.
//!
//! This module takes each line of source code and classifies it into a
//! [`Stmt`], the form the assembler passes operate on. Classification is
//! a pure function of the line's text, so both assembler passes see the
//! same statement for the same line.
//!
//! Lines are delivered by a [`LineSource`], which must be rewindable
//! because the assembler reads the program twice.
//!
//! ```
//! use vc8000::parse::{classify, StrLineSource, LineSource};
//! use vc8000::ast::{StmtKind, Opcode};
//!
//! let mut src = StrLineSource::from("LOOP ADD 1,COUNT ; accumulate");
//! let line = src.next_line().unwrap();
//! let stmt = classify(1, &line);
//!
//! assert_eq!(stmt.label.as_deref(), Some("LOOP"));
//! assert_eq!(stmt.kind, StmtKind::Machine(Opcode::ADD));
//! ```

pub mod lex;

use crate::ast::{Directive, Opcode, Operand, Stmt, StmtKind};

/// A rewindable source of program lines.
///
/// The assembler's two passes each walk the program from the beginning,
/// so a line source must be able to start over.
pub trait LineSource {
    /// Produces the next line, without its terminator,
    /// or `None` at the end of the program.
    fn next_line(&mut self) -> Option<String>;

    /// Returns this source to its first line.
    fn rewind(&mut self);
}

/// A [`LineSource`] over in-memory source text.
pub struct StrLineSource {
    lines: Vec<String>,
    pos: usize,
}

impl LineSource for StrLineSource {
    fn next_line(&mut self) -> Option<String> {
        let line = self.lines.get(self.pos)?;
        self.pos += 1;
        Some(line.clone())
    }

    fn rewind(&mut self) {
        self.pos = 0;
    }
}
impl From<&str> for StrLineSource {
    fn from(src: &str) -> Self {
        StrLineSource {
            lines: src.lines().map(str::to_string).collect(),
            pos: 0,
        }
    }
}
impl From<String> for StrLineSource {
    fn from(src: String) -> Self {
        StrLineSource::from(&*src)
    }
}

/// Classifies one source line into a statement.
///
/// The line's fields (separated by blanks, tabs, or commas; comment tail
/// dropped) are read positionally: a label if the line starts in column
/// one, then the operation mnemonic, then up to two operands. A fifth
/// field is not consumed; its presence is flagged via
/// [`Stmt::trailing_fields`].
///
/// Classification never fails. A line whose operation field is not a
/// known mnemonic becomes [`StmtKind::Malformed`], and a line with a
/// label but nothing else does too (a label cannot stand alone). A line
/// with no fields at all, or only a comment, is [`StmtKind::Comment`].
pub fn classify(line_no: usize, raw: &str) -> Stmt {
    let mut fields = lex::fields(raw).into_iter();

    // A statement is labeled exactly when its first character is not
    // blank. Commas count as blanks, like everywhere else in a line.
    // The first field then belongs to the label position.
    let labeled = raw
        .chars()
        .next()
        .is_some_and(|c| c != ' ' && c != '\t' && c != ',');
    let label = if labeled { fields.next() } else { None };

    let operation = fields.next();
    let operand1 = fields.next().map(Operand::new);
    let operand2 = fields.next().map(Operand::new);
    let trailing_fields = fields.next().is_some();

    let kind = match operation.as_deref() {
        None if label.is_none() => StmtKind::Comment,
        None => StmtKind::Malformed,
        Some(m) if m.eq_ignore_ascii_case("END") => StmtKind::End,
        Some(m) => match Opcode::from_mnemonic(m) {
            Some(op) => StmtKind::Machine(op),
            None => match Directive::from_mnemonic(m) {
                Some(dir) => StmtKind::Directive(dir),
                None => StmtKind::Malformed,
            },
        },
    };

    Stmt {
        line: line_no,
        label,
        kind,
        operand1,
        operand2,
        raw: raw.to_string(),
        trailing_fields,
    }
}

#[cfg(test)]
mod tests {
    use super::{classify, LineSource, StrLineSource};
    use crate::ast::{Directive, Opcode, StmtKind};

    #[test]
    fn test_label_column_one() {
        let stmt = classify(1, "TOTAL DS 1");
        assert_eq!(stmt.label.as_deref(), Some("TOTAL"));
        assert_eq!(stmt.kind, StmtKind::Directive(Directive::DS));

        let stmt = classify(2, "  TOTAL DS 1");
        assert_eq!(stmt.label, None);
        // Indented, so TOTAL lands in the operation position.
        assert_eq!(stmt.kind, StmtKind::Malformed);

        // A leading comma is a separator, not a label start.
        let stmt = classify(3, ",ADD 1,X");
        assert_eq!(stmt.label, None);
        assert_eq!(stmt.kind, StmtKind::Machine(Opcode::ADD));
    }

    #[test]
    fn test_comment_lines() {
        assert_eq!(classify(1, "").kind, StmtKind::Comment);
        assert_eq!(classify(2, "   ").kind, StmtKind::Comment);
        assert_eq!(classify(3, "; setup section").kind, StmtKind::Comment);
        assert_eq!(classify(4, "    ; indented comment").kind, StmtKind::Comment);
    }

    #[test]
    fn test_comment_tail_stripped() {
        let stmt = classify(1, "  ADD 1,FIVE ; accumulate");
        assert_eq!(stmt.kind, StmtKind::Machine(Opcode::ADD));
        assert_eq!(stmt.operand2.as_ref().map(|o| o.text()), Some("FIVE"));
        assert!(!stmt.trailing_fields);
    }

    #[test]
    fn test_operands() {
        let stmt = classify(1, "  LOAD 1,COUNT");
        let op1 = stmt.operand1.unwrap();
        let op2 = stmt.operand2.unwrap();
        assert_eq!(op1.value(), Some(1));
        assert!(!op2.is_numeric());
        assert_eq!(op2.text(), "COUNT");
    }

    #[test]
    fn test_end_and_malformed() {
        assert_eq!(classify(1, "  END").kind, StmtKind::End);
        assert_eq!(classify(2, "  end").kind, StmtKind::End);
        assert_eq!(classify(3, "  FROB 1,2").kind, StmtKind::Malformed);
        // A label with no operation cannot be a comment.
        assert_eq!(classify(4, "ORPHAN").kind, StmtKind::Malformed);
    }

    #[test]
    fn test_trailing_fields() {
        let stmt = classify(1, "L ADD 1,FIVE extra");
        assert_eq!(stmt.kind, StmtKind::Machine(Opcode::ADD));
        assert!(stmt.trailing_fields);

        // The fifth field only counts if it survives comment stripping.
        assert!(!classify(2, "L ADD 1,FIVE ; extra").trailing_fields);
    }

    #[test]
    fn test_str_line_source_rewind() {
        let mut src = StrLineSource::from("  HALT\n  END");
        assert_eq!(src.next_line().as_deref(), Some("  HALT"));
        assert_eq!(src.next_line().as_deref(), Some("  END"));
        assert_eq!(src.next_line(), None);
        src.rewind();
        assert_eq!(src.next_line().as_deref(), Some("  HALT"));
    }
}
