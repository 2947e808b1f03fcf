//! Lex a gene association string into a series of tokens for later parsing

use std::borrow::Borrow;
use std::collections::VecDeque;

use thiserror::Error;

use crate::io::gene_assoc::token::Token;

pub struct Lexer {
    source: Vec<char>,
    tokens: VecDeque<Token>,
    start: usize,
    current: usize,
}

impl Lexer {
    /// Create a new Lexer from a gene association string
    ///
    /// The source is lowercased up front, so gene identifiers and the
    /// `and`/`or` operators are matched case insensitively.
    pub fn new(source: &str) -> Self {
        Lexer {
            source: source.to_lowercase().chars().collect(),
            tokens: VecDeque::new(),
            start: 0,
            current: 0,
        }
    }

    pub fn scan_tokens(&mut self) -> Result<Vec<Token>, LexerError> {
        while !self.is_at_end() {
            self.start = self.current;
            self.scan_token()?;
        }

        self.tokens.push_back(Token::Eof);
        Ok(self.tokens.drain(..).collect())
    }

    fn scan_token(&mut self) -> Result<(), LexerError> {
        let c: char = self.advance();
        match c {
            // Single Character Tokens
            '(' => self.add_token(Token::LeftParen),
            ')' => self.add_token(Token::RightParen),
            // Identifiers and Operators
            c if Lexer::is_identifier_char(c) => self.read_identifier(),
            // Whitespace
            ' ' | '\r' | '\n' | '\t' => {}
            // Anything else is not part of a valid association
            _ => return Err(LexerError::InvalidCharacter(c)),
        };
        Ok(())
    }

    fn advance(&mut self) -> char {
        let char_at_current = self.source[self.current];
        self.current += 1;
        char_at_current
    }

    fn read_identifier(&mut self) {
        while Lexer::is_identifier_char(self.peek()) {
            self.advance();
        }

        let text: String = self.source[self.start..self.current].iter().collect();

        // The source was lowercased in new, so matching the lowercase
        // operator spellings covers all casings of the input.
        match text.borrow() {
            "and" => self.add_token(Token::And),
            "or" => self.add_token(Token::Or),
            gene => self.add_token(Token::Identifier(gene.to_string())),
        }
    }

    /// Gene identifiers may contain letters, digits, underscores, dashes and
    /// dots, and unlike most languages they may also start with a digit.
    fn is_identifier_char(c: char) -> bool {
        c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.')
    }

    fn peek(&self) -> char {
        if self.is_at_end() {
            return '\0';
        }
        self.source[self.current]
    }

    fn add_token(&mut self, token: Token) {
        self.tokens.push_back(token);
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.source.len()
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum LexerError {
    #[error("invalid character in gene association: {0:?}")]
    InvalidCharacter(char),
}

#[cfg(test)]
mod tests {
    use crate::io::gene_assoc::lexer::{Lexer, LexerError};
    use crate::io::gene_assoc::token::Token;

    #[test]
    fn test_single_gene() {
        let mut lexer = Lexer::new("Rv0023");
        let tokens = match lexer.scan_tokens() {
            Ok(t) => t,
            Err(_) => panic!("Failed to lex during test"),
        };
        assert_eq!(tokens.len(), 2);
        // Identifiers are folded to lowercase
        assert_eq!(tokens[0], Token::Identifier(String::from("rv0023")));
        assert_eq!(tokens[1], Token::Eof);
    }

    #[test]
    fn test_grouping() {
        let mut lexer = Lexer::new("(Rv0023 OR Rv0123)");
        let tokens = match lexer.scan_tokens() {
            Ok(t) => t,
            Err(_) => panic!("Failed to lex during test"),
        };
        let expected_tokens = vec![
            Token::LeftParen,
            Token::Identifier(String::from("rv0023")),
            Token::Or,
            Token::Identifier(String::from("rv0123")),
            Token::RightParen,
            Token::Eof,
        ];
        assert_eq!(tokens, expected_tokens);
    }

    #[test]
    fn test_identifier_charset() {
        let mut lexer = Lexer::new("glm-1.2_x and 42b");
        let tokens = match lexer.scan_tokens() {
            Ok(t) => t,
            Err(_) => panic!("Failed to lex during test"),
        };
        let expected_tokens = vec![
            Token::Identifier(String::from("glm-1.2_x")),
            Token::And,
            Token::Identifier(String::from("42b")),
            Token::Eof,
        ];
        assert_eq!(tokens, expected_tokens);
    }

    #[test]
    fn test_invalid_character() {
        let mut lexer = Lexer::new("a & b");
        match lexer.scan_tokens() {
            Ok(_) => panic!("Lexer accepted an invalid character"),
            Err(e) => assert_eq!(e, LexerError::InvalidCharacter('&')),
        }
    }
}
