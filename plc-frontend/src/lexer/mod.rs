//! Lexer
//!
//! Tokenizes procedure language source into a stream of tokens.
//! Handles keywords, operators, integer literals, identifiers and `//` comments.

pub mod token;

pub use token::{Token, TokenType};

use plc_common::{CompilerError, SourceLocation, SourceSpan};
use std::collections::HashMap;

pub struct Lexer {
    input: Vec<char>,
    position: usize,
    line: u32,
    column: u32,
    keywords: HashMap<&'static str, TokenType>,
}

impl Lexer {
    /// Create a new lexer
    pub fn new(input: &str) -> Self {
        let keywords = [
            ("proc", TokenType::Proc),
            ("var", TokenType::Var),
            ("begin", TokenType::Begin),
            ("end", TokenType::End),
            ("if", TokenType::If),
            ("then", TokenType::Then),
            ("else", TokenType::Else),
            ("while", TokenType::While),
            ("do", TokenType::Do),
            ("and", TokenType::And),
            ("or", TokenType::Or),
            ("xor", TokenType::Xor),
            ("not", TokenType::Not),
        ]
        .into_iter()
        .collect();

        Self {
            input: input.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
            keywords,
        }
    }

    fn current_char(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn peek_char(&self, offset: usize) -> Option<char> {
        self.input.get(self.position + offset).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.current_char()?;
        self.position += 1;
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    fn current_location(&self) -> SourceLocation {
        SourceLocation::new_simple(self.line, self.column)
    }

    /// Skip whitespace and line comments
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

    fn tokenize_identifier(&mut self) -> TokenType {
        let mut identifier = String::new();
        while let Some(ch) = self.current_char() {
            if ch.is_ascii_alphanumeric() || ch == '_' {
                identifier.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        match self.keywords.get(identifier.as_str()) {
            Some(keyword) => keyword.clone(),
            None => TokenType::Identifier(identifier),
        }
    }

    fn tokenize_integer(&mut self) -> Result<TokenType, CompilerError> {
        let start = self.current_location();
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
            .map(TokenType::IntLiteral)
            .map_err(|_| CompilerError::lexer_error(format!("Integer literal out of range: {}", digits), start))
    }

    /// Consume `second` if it follows, producing `double`; otherwise `single`
    fn one_or_two(&mut self, second: char, double: TokenType, single: Option<TokenType>) -> Result<TokenType, CompilerError> {
        let location = self.current_location();
        let first = self.advance();
        if self.current_char() == Some(second) {
            self.advance();
            return Ok(double);
        }
        single.ok_or_else(|| {
            CompilerError::lexer_error(
                format!("Unexpected character '{}'", first.unwrap_or_default()),
                location,
            )
        })
    }

    /// Get next token
    pub fn next_token(&mut self) -> Result<Token, CompilerError> {
        self.skip_trivia();

        let start_location = self.current_location();

        let token_type = match self.current_char() {
            None => TokenType::EndOfFile,

            Some(ch) if ch.is_ascii_alphabetic() || ch == '_' => self.tokenize_identifier(),

            Some(ch) if ch.is_ascii_digit() => self.tokenize_integer()?,

            Some(':') => self.one_or_two('=', TokenType::Assign, None)?,
            Some('=') => self.one_or_two('=', TokenType::EqualEqual, None)?,
            Some('!') => self.one_or_two('=', TokenType::BangEqual, None)?,

            Some(ch) => {
                let single = match ch {
                    '+' => TokenType::Plus,
                    '-' => TokenType::Minus,
                    '*' => TokenType::Star,
                    '/' => TokenType::Slash,
                    '%' => TokenType::Percent,
                    '<' => TokenType::Less,
                    '>' => TokenType::Greater,
                    '(' => TokenType::LeftParen,
                    ')' => TokenType::RightParen,
                    '[' => TokenType::LeftBracket,
                    ']' => TokenType::RightBracket,
                    ',' => TokenType::Comma,
                    ';' => TokenType::Semicolon,
                    other => {
                        return Err(CompilerError::lexer_error(
                            format!("Unexpected character '{}'", other),
                            start_location,
                        ));
                    }
                };
                self.advance();
                single
            }
        };

        let span = SourceSpan::new(start_location, self.current_location());
        Ok(Token::new(token_type, span))
    }

    /// Tokenize the whole input; the last token is always `EndOfFile`
    pub fn tokenize(&mut self) -> Result<Vec<Token>, CompilerError> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let done = token.token_type == TokenType::EndOfFile;
            tokens.push(token);
            if done {
                return Ok(tokens);
            }
        }
    }
}
