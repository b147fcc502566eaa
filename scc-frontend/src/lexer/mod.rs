//! SubC Lexer
//!
//! Tokenizes SubC source code into a stream of tokens.
//! Handles keywords, operators, integer and string literals, identifiers,
//! and `//` line comments.

pub mod token;

pub use token::{Token, TokenKind};

use scc_common::{CompilerError, SourceLocation};
use std::collections::HashMap;

/// SubC Lexer
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    line: u32,
    column: u32,
    keywords: HashMap<String, TokenKind>,
}

impl Lexer {
    /// Create a new lexer
    pub fn new(input: &str) -> Self {
        let mut lexer = Self {
            input: input.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
            keywords: HashMap::new(),
        };

        lexer.initialize_keywords();
        lexer
    }

    /// Initialize keyword map
    fn initialize_keywords(&mut self) {
        let keywords = [
            ("int", TokenKind::Int),
            ("if", TokenKind::If),
            ("while", TokenKind::While),
            ("return", TokenKind::Return),
        ];

        for (keyword, kind) in keywords {
            self.keywords.insert(keyword.to_string(), kind);
        }
    }

    /// Get current character
    fn current_char(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    /// Peek ahead n characters
    fn peek_char(&self, offset: usize) -> Option<char> {
        self.input.get(self.position + offset).copied()
    }

    /// Advance to next character
    fn advance(&mut self) -> Option<char> {
        if let Some(ch) = self.current_char() {
            self.position += 1;
            if ch == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
            Some(ch)
        } else {
            None
        }
    }

    /// Get current location
    fn current_location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column)
    }

    /// Skip whitespace and `//` comments
    fn skip_trivia(&mut self) {
        loop {
            match self.current_char() {
                Some(ch) if ch.is_whitespace() => {
                    self.advance();
                }
                Some('/') if self.peek_char(1) == Some('/') => {
                    while let Some(ch) = self.current_char() {
                        if ch == '\n' {
                            break;
                        }
                        self.advance();
                    }
                }
                _ => break,
            }
        }
    }

    /// Tokenize an identifier or keyword
    fn lex_identifier(&mut self) -> TokenKind {
        let mut identifier = String::new();

        while let Some(ch) = self.current_char() {
            if ch.is_alphanumeric() || ch == '_' {
                identifier.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        match self.keywords.get(&identifier) {
            Some(kind) => kind.clone(),
            None => TokenKind::Identifier(identifier),
        }
    }

    /// Tokenize an integer literal
    fn lex_number(&mut self) -> Result<TokenKind, CompilerError> {
        let location = self.current_location();
        let mut digits = String::new();

        while let Some(ch) = self.current_char() {
            if ch.is_ascii_digit() {
                digits.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        digits
            .parse::<i32>()
            .map(TokenKind::IntLiteral)
            .map_err(|_| {
                CompilerError::lexer_error(format!("integer literal too large: {digits}"), location)
            })
    }

    /// Tokenize a string literal (double-quoted, no escapes in SubC)
    fn lex_string(&mut self) -> Result<TokenKind, CompilerError> {
        let location = self.current_location();
        self.advance(); // opening quote

        let mut text = String::new();
        loop {
            match self.current_char() {
                Some('"') => {
                    self.advance();
                    return Ok(TokenKind::StringLiteral(text));
                }
                Some('\n') | None => {
                    return Err(CompilerError::lexer_error(
                        "unterminated string literal".to_string(),
                        location,
                    ));
                }
                Some(ch) => {
                    text.push(ch);
                    self.advance();
                }
            }
        }
    }

    /// Tokenize an operator or delimiter
    fn lex_operator(&mut self) -> Result<TokenKind, CompilerError> {
        let location = self.current_location();
        let ch = self.advance().unwrap();

        let kind = match ch {
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Star,
            '(' => TokenKind::LeftParen,
            ')' => TokenKind::RightParen,
            '{' => TokenKind::LeftBrace,
            '}' => TokenKind::RightBrace,
            ';' => TokenKind::Semicolon,
            ',' => TokenKind::Comma,
            '<' => {
                if self.current_char() == Some('=') {
                    self.advance();
                    TokenKind::LessEqual
                } else {
                    TokenKind::Less
                }
            }
            '>' => {
                if self.current_char() == Some('=') {
                    self.advance();
                    TokenKind::GreaterEqual
                } else {
                    TokenKind::Greater
                }
            }
            '=' => {
                if self.current_char() == Some('=') {
                    self.advance();
                    TokenKind::EqualEqual
                } else {
                    TokenKind::Equal
                }
            }
            '!' => {
                if self.current_char() == Some('=') {
                    self.advance();
                    TokenKind::BangEqual
                } else {
                    return Err(CompilerError::lexer_error(
                        "expected '=' after '!'".to_string(),
                        location,
                    ));
                }
            }
            other => {
                return Err(CompilerError::lexer_error(
                    format!("unexpected character '{other}'"),
                    location,
                ));
            }
        };

        Ok(kind)
    }

    /// Tokenize the whole input
    pub fn tokenize(&mut self) -> Result<Vec<Token>, CompilerError> {
        let mut tokens = Vec::new();

        loop {
            self.skip_trivia();
            let location = self.current_location();

            let kind = match self.current_char() {
                None => {
                    tokens.push(Token::new(TokenKind::EndOfFile, location));
                    break;
                }
                Some(ch) if ch.is_alphabetic() || ch == '_' => self.lex_identifier(),
                Some(ch) if ch.is_ascii_digit() => self.lex_number()?,
                Some('"') => self.lex_string()?,
                Some(_) => self.lex_operator()?,
            };

            tokens.push(Token::new(kind, location));
        }

        Ok(tokens)
    }
}
