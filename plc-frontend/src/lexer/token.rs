//! Token definitions for the lexer
//!
//! This module defines token types and the Token struct.

use plc_common::SourceSpan;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Token types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TokenType {
    // Literals
    IntLiteral(i32),

    // Identifiers and keywords
    Identifier(String),

    // Keywords
    Proc, Var, Begin, End, If, Then, Else, While, Do,
    And, Or, Xor, Not,

    // Operators
    Assign,         // :=
    Plus,           // +
    Minus,          // -
    Star,           // *
    Slash,          // /
    Percent,        // %
    EqualEqual,     // ==
    BangEqual,      // !=
    Less,           // <
    Greater,        // >

    // Delimiters
    LeftParen,      // (
    RightParen,     // )
    LeftBracket,    // [
    RightBracket,   // ]
    Comma,          // ,
    Semicolon,      // ;

    EndOfFile,
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenType::IntLiteral(value) => write!(f, "{}", value),
            TokenType::Identifier(name) => write!(f, "{}", name),
            TokenType::Proc => write!(f, "proc"),
            TokenType::Var => write!(f, "var"),
            TokenType::Begin => write!(f, "begin"),
            TokenType::End => write!(f, "end"),
            TokenType::If => write!(f, "if"),
            TokenType::Then => write!(f, "then"),
            TokenType::Else => write!(f, "else"),
            TokenType::While => write!(f, "while"),
            TokenType::Do => write!(f, "do"),
            TokenType::And => write!(f, "and"),
            TokenType::Or => write!(f, "or"),
            TokenType::Xor => write!(f, "xor"),
            TokenType::Not => write!(f, "not"),
            TokenType::Assign => write!(f, ":="),
            TokenType::Plus => write!(f, "+"),
            TokenType::Minus => write!(f, "-"),
            TokenType::Star => write!(f, "*"),
            TokenType::Slash => write!(f, "/"),
            TokenType::Percent => write!(f, "%"),
            TokenType::EqualEqual => write!(f, "=="),
            TokenType::BangEqual => write!(f, "!="),
            TokenType::Less => write!(f, "<"),
            TokenType::Greater => write!(f, ">"),
            TokenType::LeftParen => write!(f, "("),
            TokenType::RightParen => write!(f, ")"),
            TokenType::LeftBracket => write!(f, "["),
            TokenType::RightBracket => write!(f, "]"),
            TokenType::Comma => write!(f, ","),
            TokenType::Semicolon => write!(f, ";"),
            TokenType::EndOfFile => write!(f, "end of file"),
        }
    }
}

/// A token with its type and source location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub token_type: TokenType,
    pub span: SourceSpan,
}

impl Token {
    pub fn new(token_type: TokenType, span: SourceSpan) -> Self {
        Self { token_type, span }
    }
}
