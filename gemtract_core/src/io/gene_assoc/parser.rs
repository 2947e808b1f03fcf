use thiserror::Error;

use crate::io::gene_assoc::token::Token;

/*
Association Grammar:
expression -> chain
chain -> operand (("and" | "or") operand)* ;
operand -> GENE | "(" expression ")" ;

All operators within one chain must agree: mixing `and` and `or` without
parentheses is rejected instead of guessing a precedence.

e.g. gene1 or (gene2 and gene3) or (gene4 and gene5)
 */

/// A gene association expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// A single gene
    Leaf(String),
    /// Two or more sub expressions joined by a single operator
    Chain { op: Op, operands: Vec<Expr> },
}

/// Operator joining the operands of a chain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    And,
    Or,
}

/// Association Parser
pub struct Parser {
    /// Vector of tokens from the association string
    tokens: Vec<Token>,
    /// Current token being processed
    current: usize,
}

impl Parser {
    /// Create a new Parser
    pub fn new(tokens: Vec<Token>) -> Parser {
        Parser { tokens, current: 0 }
    }

    // region Parsing Functions

    /// Parse the token vector into an association AST
    pub fn parse(&mut self) -> Result<Expr, ParseError> {
        let expr = self.chain()?;
        if !self.is_at_end() {
            // If the entire expression has not been parsed, an error has occured
            return Err(ParseError::TrailingInput);
        }
        Ok(expr)
    }

    fn chain(&mut self) -> Result<Expr, ParseError> {
        let mut operands = vec![self.operand()?];
        let mut op: Option<Op> = None;

        while self.match_token(&[Token::And, Token::Or]) {
            let operator = if self.previous() == Token::And {
                Op::And
            } else {
                Op::Or
            };
            match op {
                None => op = Some(operator),
                Some(existing) if existing != operator => {
                    return Err(ParseError::MixedOperators)
                }
                Some(_) => {}
            }
            operands.push(self.operand()?);
        }

        match op {
            // No operator seen, the chain is its single operand
            None => Ok(operands.remove(0)),
            Some(op) => Ok(Expr::Chain { op, operands }),
        }
    }

    fn operand(&mut self) -> Result<Expr, ParseError> {
        if let Some(identifier) = self.match_identifier() {
            return Ok(Expr::Leaf(identifier));
        }

        if self.match_token(&[Token::LeftParen]) {
            let expr = self.chain()?;
            self.consume(&Token::RightParen, "Expect ')' after expression.")?;
            return Ok(expr);
        }

        Err(ParseError::ExpectedExpression)
    }

    // endregion Parsing Functions

    // region parsing helper functions

    /// Check whether the token at the current position matches one of the provided `tokens`,
    /// if it does advance [`self.current`] and return true, otherwise return false
    fn match_token(&mut self, tokens: &[Token]) -> bool {
        for t in tokens {
            if self.check(t) {
                self.advance();
                return true;
            }
        }
        false
    }

    /// Similar to [`match_token`], but for matching an identifier token. If the current
    /// token is an identifier return `Some(GeneId)`, where GeneId is the gene's string
    /// identifier, otherwise return None
    fn match_identifier(&mut self) -> Option<String> {
        if self.is_at_end() {
            return None;
        }
        if let Token::Identifier(id) = self.peek() {
            self.advance();
            return Some(id);
        }
        None
    }

    /// Check whether the current token matches the provided `token`
    fn check(&mut self, token: &Token) -> bool {
        if self.is_at_end() {
            return false;
        }
        &self.peek() == token
    }

    /// Advance `self.current` one position unless at end of the token Vec, then return the
    /// previous token.
    fn advance(&mut self) -> Token {
        if !self.is_at_end() {
            self.current += 1;
        }
        self.previous()
    }

    /// Check whether the parser is at the end of the source Vec
    fn is_at_end(&self) -> bool {
        self.peek() == Token::Eof
    }

    /// Get a copy of the current token
    fn peek(&self) -> Token {
        self.tokens[self.current].clone()
    }

    /// Get a copy of the previous token
    fn previous(&self) -> Token {
        self.tokens[self.current - 1].clone()
    }

    /// Check whether the current token matches an input token, if it matches advance to the
    /// next token, and if it doesn't return an error. Used mainly for matching parenthesis in
    /// the source token vec.
    fn consume(&mut self, token: &Token, msg: &str) -> Result<Token, ParseError> {
        if self.check(token) {
            return Ok(self.advance());
        }

        Err(ParseError::MissingToken(msg.to_string()))
    }

    // endregion parsing helper functions
}

/// Enum representing possible parse errors
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParseError {
    /// Chain joins operands with both `and` and `or` without parentheses
    #[error("Unsupported expression, mixing `and` and `or` without parentheses is ambiguous")]
    MixedOperators,
    /// Missing expected token (e.g. a right parenthesis)
    #[error("Missing expected token: {0}")]
    MissingToken(String),
    /// No expression found when one was expected
    #[error("No expression found, check that the association string is not empty")]
    ExpectedExpression,
    /// Expression was not completed when parsing terminated
    #[error("Parsing terminated early, check for a missing operator between genes/grouped expressions")]
    TrailingInput,
}
