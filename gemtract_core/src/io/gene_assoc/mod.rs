//! Module for parsing gene association strings into alternative gene sets

use thiserror::Error;

use crate::io::gene_assoc::lexer::LexerError;
use crate::io::gene_assoc::parser::{Expr, ParseError};
use crate::network::gene_complex::ComplexBuilder;

pub mod lexer;
pub mod parser;
pub mod token;
pub mod unfold;

/// Parse a gene association string into an association tree
///
/// # Parameters
/// - `input`: &str representing the gene association rule
///
/// # Returns
/// Parse result which is
/// - `Ok`: the root node of the association tree.
/// - `Err`: Returns the AssociationError describing the issue with the
///     association rule which was being parsed.
///
/// # Examples
/// ```rust
/// use gemtract_core::io::gene_assoc::parse_association;
/// let association: &str = "Rv0001 and Rv0002";
/// let tree = parse_association(association).unwrap();
/// ```
pub fn parse_association(input: &str) -> Result<Expr, AssociationError> {
    // Start by creating a lexer
    let mut lexer = lexer::Lexer::new(input);
    // Convert the association string into tokens
    let tokens = lexer.scan_tokens()?;

    // Now parse those tokens into an association tree
    let mut parser = parser::Parser::new(tokens);
    let expr = parser.parse()?;
    Ok(expr)
}

/// Parse a gene association string and unfold it into its alternative gene
/// sets, one [`ComplexBuilder`] per alternative
///
/// # Examples
/// ```rust
/// use gemtract_core::io::gene_assoc::unfold_association;
/// let alternatives = unfold_association("a or (b and c)").unwrap();
/// assert_eq!(alternatives.len(), 2);
/// ```
pub fn unfold_association(input: &str) -> Result<Vec<ComplexBuilder>, AssociationError> {
    let expr = parse_association(input)?;
    Ok(unfold::unfold_expression(&expr))
}

/// Enum representing possible lex and parse errors
#[derive(Debug, Error)]
pub enum AssociationError {
    /// Lexing Error
    #[error("Error occurred during lexing (conversion of association string to tokens)")]
    LexingError(#[from] LexerError),
    /// Parsing Error
    #[error("Error occurred during parsing (conversion of tokens to association tree)")]
    ParsingError(#[from] ParseError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::gene_assoc::parser::Op;

    #[test]
    fn test_parse_association() {
        let tree = parse_association("Rv0001 and (Rv0002 or Rv0003)").unwrap();
        assert_eq!(
            tree,
            Expr::Chain {
                op: Op::And,
                operands: vec![
                    Expr::Leaf("rv0001".to_string()),
                    Expr::Chain {
                        op: Op::Or,
                        operands: vec![
                            Expr::Leaf("rv0002".to_string()),
                            Expr::Leaf("rv0003".to_string()),
                        ],
                    },
                ],
            }
        );
    }

    #[test]
    fn test_unfold_association() {
        let alternatives = unfold_association("a or (b and c)").unwrap();
        assert_eq!(alternatives.len(), 2);
        assert_eq!(alternatives[0].len(), 1);
        assert_eq!(alternatives[1].len(), 2);
    }

    #[test]
    fn test_unfold_association_mixed_operators() {
        match unfold_association("a and b or c") {
            Ok(_) => panic!("Should not have parsed"),
            Err(AssociationError::ParsingError(ParseError::MixedOperators)) => {}
            Err(_) => panic!("Incorrect error returned"),
        }
    }
}
