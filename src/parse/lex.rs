//! Tokenizing VC8000 assembly lines.
//!
//! VC8000 source is line-oriented and the fields of a line carry no
//! inherent type: a token like `200` may be a register, an address, or a
//! symbol name depending on where it sits in the statement. The lexer
//! therefore only separates a line into raw [`Field`]s and drops the
//! comment tail; all interpretation happens in [`crate::parse::classify`].
//!
//! [`Field`]: Token::Field

use logos::Logos;

/// A unit of information in one line of VC8000 source code.
///
/// Fields are separated by blanks, tabs, or commas; a semicolon starts a
/// comment that spans the rest of the line. Every character belongs to
/// one of those three classes, so lexing a line never fails.
#[derive(Debug, Logos, PartialEq, Eq)]
#[logos(skip r"[ \t,]+")]
pub enum Token {
    /// One field of a statement: a label, a mnemonic, or an operand.
    #[regex(r"[^ \t,;]+", |lx| lx.slice().to_string())]
    Field(String),

    /// A comment, which starts with a semicolon and spans the remaining
    /// part of the line.
    #[regex(r";.*")]
    Comment,
}

/// Splits a line into its raw fields, dropping any comment.
pub fn fields(line: &str) -> Vec<String> {
    // A comment token always extends to the end of the line, so stopping
    // at the first non-field also covers the (unreachable) lex error.
    Token::lexer(line)
        .map_while(|t| match t {
            Ok(Token::Field(f)) => Some(f),
            Ok(Token::Comment) | Err(()) => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::fields;

    #[test]
    fn test_fields_split() {
        assert_eq!(fields("LOOP LOAD 1,COUNT"), vec!["LOOP", "LOAD", "1", "COUNT"]);
        assert_eq!(fields("    ADD 1, FIVE"), vec!["ADD", "1", "FIVE"]);
        assert_eq!(fields("\tHALT"), vec!["HALT"]);
    }

    #[test]
    fn test_fields_comment() {
        assert_eq!(fields("; a full comment line"), Vec::<String>::new());
        assert_eq!(fields("  WRITE N ; print it"), vec!["WRITE", "N"]);
        // No blank needed before the semicolon.
        assert_eq!(fields("HALT; stop"), vec!["HALT"]);
    }

    #[test]
    fn test_fields_empty() {
        assert_eq!(fields(""), Vec::<String>::new());
        assert_eq!(fields("   \t  "), Vec::<String>::new());
        assert_eq!(fields(",,,"), Vec::<String>::new());
    }
}
