//! Unfold an association AST into its disjunctive normal form
//!
//! Every alternative of the resulting disjunction is a set of genes that
//! together catalyze a reaction, collected in a [`ComplexBuilder`].

use crate::io::gene_assoc::parser::{Expr, Op};
use crate::network::gene_complex::ComplexBuilder;

/// Unfold an association expression into a list of alternative gene sets
///
/// An `or` chain contributes the alternatives of all its operands. An `and`
/// chain starts from the alternatives of its first operand and merges the
/// genes of every alternative of the remaining operands into each of them,
/// so the number of alternatives stays that of the first operand.
pub fn unfold_expression(expression: &Expr) -> Vec<ComplexBuilder> {
    match expression {
        Expr::Leaf(gene) => vec![ComplexBuilder::with_gene(gene)],
        Expr::Chain {
            op: Op::Or,
            operands,
        } => {
            let mut alternatives = Vec::new();
            for operand in operands {
                alternatives.extend(unfold_expression(operand));
            }
            alternatives
        }
        Expr::Chain {
            op: Op::And,
            operands,
        } => {
            let mut operands_iter = operands.iter();
            let mut alternatives = match operands_iter.next() {
                Some(first) => unfold_expression(first),
                None => return Vec::new(),
            };
            for operand in operands_iter {
                let additions = unfold_expression(operand);
                for alternative in alternatives.iter_mut() {
                    for addition in &additions {
                        alternative.merge(addition);
                    }
                }
            }
            alternatives
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::gene_assoc::lexer::Lexer;
    use crate::io::gene_assoc::parser::Parser;

    fn unfold(source: &str) -> Vec<ComplexBuilder> {
        let mut lexer = Lexer::new(source);
        let tokens = lexer.scan_tokens().unwrap();
        let mut parser = Parser::new(tokens);
        unfold_expression(&parser.parse().unwrap())
    }

    #[test]
    fn test_single_gene() {
        let alternatives = unfold("a");
        assert_eq!(alternatives.len(), 1);
        assert_eq!(alternatives[0].len(), 1);
    }

    #[test]
    fn test_or_of_ands() {
        let alternatives = unfold("a or ((b and c) or (d and e and f)) or (g and h) or (i or j)");
        assert_eq!(alternatives.len(), 6);
        assert_eq!(alternatives[0].len(), 1);
        assert_eq!(alternatives[1].len(), 2);
        assert_eq!(alternatives[2].len(), 3);
        assert_eq!(alternatives[3].len(), 2);
        assert_eq!(alternatives[4].len(), 1);
        assert_eq!(alternatives[5].len(), 1);
    }

    #[test]
    fn test_and_absorbs_all_alternatives() {
        // The first operand fixes the number of alternatives, each of them
        // absorbs every gene of the remaining operands
        let alternatives = unfold("(a or b) and (c or d)");
        assert_eq!(alternatives.len(), 2);
        let first: Vec<&String> = alternatives[0].genes().iter().collect();
        assert_eq!(first, ["a", "c", "d"]);
        let second: Vec<&String> = alternatives[1].genes().iter().collect();
        assert_eq!(second, ["b", "c", "d"]);
    }

    #[test]
    fn test_repeated_gene_collapses() {
        let alternatives = unfold("a and a");
        assert_eq!(alternatives.len(), 1);
        assert_eq!(alternatives[0].len(), 1);
    }

    #[test]
    fn test_nested_groups() {
        let alternatives = unfold("((a))");
        assert_eq!(alternatives.len(), 1);
        assert_eq!(alternatives[0].len(), 1);
    }
}
