//! Expression parsing with operator precedence
//!
//! Loosest to tightest: `or`, `xor`, `and`, comparisons, additive,
//! multiplicative, unary. All binary levels are left-associative.

use crate::ast::{BinaryOp, Node, UnaryOp};
use crate::lexer::TokenType;
use crate::parser::Parser;
use plc_common::CompilerError;

type Level = fn(&mut Parser) -> Result<Node, CompilerError>;

impl Parser {
    pub fn parse_expression(&mut self) -> Result<Node, CompilerError> {
        self.parse_or_expression()
    }

    fn parse_or_expression(&mut self) -> Result<Node, CompilerError> {
        self.parse_binary_level(&[(TokenType::Or, BinaryOp::Or)], Parser::parse_xor_expression)
    }

    fn parse_xor_expression(&mut self) -> Result<Node, CompilerError> {
        self.parse_binary_level(&[(TokenType::Xor, BinaryOp::Xor)], Parser::parse_and_expression)
    }

    fn parse_and_expression(&mut self) -> Result<Node, CompilerError> {
        self.parse_binary_level(&[(TokenType::And, BinaryOp::And)], Parser::parse_comparison_expression)
    }

    fn parse_comparison_expression(&mut self) -> Result<Node, CompilerError> {
        self.parse_binary_level(
            &[
                (TokenType::EqualEqual, BinaryOp::Equal),
                (TokenType::BangEqual, BinaryOp::NotEqual),
                (TokenType::Less, BinaryOp::Less),
                (TokenType::Greater, BinaryOp::Greater),
            ],
            Parser::parse_additive_expression,
        )
    }

    fn parse_additive_expression(&mut self) -> Result<Node, CompilerError> {
        self.parse_binary_level(
            &[(TokenType::Plus, BinaryOp::Add), (TokenType::Minus, BinaryOp::Sub)],
            Parser::parse_multiplicative_expression,
        )
    }

    fn parse_multiplicative_expression(&mut self) -> Result<Node, CompilerError> {
        self.parse_binary_level(
            &[
                (TokenType::Star, BinaryOp::Mul),
                (TokenType::Slash, BinaryOp::Div),
                (TokenType::Percent, BinaryOp::Mod),
            ],
            Parser::parse_unary_expression,
        )
    }

    fn parse_binary_level(&mut self, operators: &[(TokenType, BinaryOp)], next: Level) -> Result<Node, CompilerError> {
        let mut left = next(self)?;

        'operators: loop {
            for (token, op) in operators {
                if self.match_token(token) {
                    let right = next(self)?;
                    left = Node::binop(*op, left, right);
                    continue 'operators;
                }
            }
            return Ok(left);
        }
    }

    /// Parse prefix operators
    pub fn parse_unary_expression(&mut self) -> Result<Node, CompilerError> {
        let op = if self.match_token(&TokenType::Minus) {
            UnaryOp::Minus
        } else if self.match_token(&TokenType::Plus) {
            UnaryOp::Plus
        } else if self.match_token(&TokenType::Not) {
            UnaryOp::Not
        } else if self.match_token(&TokenType::Star) {
            UnaryOp::Dereference
        } else {
            return self.parse_primary_expression();
        };

        let arg = self.parse_unary_expression()?;
        Ok(Node::unop(op, arg))
    }

    fn parse_primary_expression(&mut self) -> Result<Node, CompilerError> {
        if self.match_token(&TokenType::LeftParen) {
            let expr = self.parse_expression()?;
            self.expect(TokenType::RightParen, "parenthesized expression")?;
            return Ok(expr);
        }

        if self.check(&TokenType::IntLiteral(0)) {
            let value = self.expect_integer("expression")?;
            return Ok(Node::constant(value));
        }

        if self.check(&TokenType::Identifier(String::new())) {
            let name = self.expect_identifier("expression")?;

            if self.check(&TokenType::LeftParen) {
                return self.parse_call(&name);
            }

            if self.match_token(&TokenType::LeftBracket) {
                let index = self.parse_expression()?;
                self.expect(TokenType::RightBracket, "index expression")?;
                return Ok(Node::index(Node::refname(&name), index));
            }

            return Ok(Node::refname(&name));
        }

        Err(self.unexpected("expression").into())
    }
}
