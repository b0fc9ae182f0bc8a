//! Statement parsing

use crate::ast::Node;
use crate::lexer::TokenType;
use crate::parser::{ParseError, Parser};
use plc_common::CompilerError;

impl Parser {
    /// Parse statements up to (not including) `end`, `else` or end of input
    pub fn parse_statements(&mut self) -> Result<Vec<Node>, CompilerError> {
        let mut statements = Vec::new();
        while !self.check(&TokenType::End)
            && !self.check(&TokenType::Else)
            && !self.check(&TokenType::EndOfFile)
        {
            statements.push(self.parse_statement()?);
        }
        Ok(statements)
    }

    /// Parse one statement and its optional trailing `;`
    pub fn parse_statement(&mut self) -> Result<Node, CompilerError> {
        let is_call = matches!(
            (self.peek().map(|t| &t.token_type), self.peek_nth(1).map(|t| &t.token_type)),
            (Some(TokenType::Identifier(_)), Some(TokenType::LeftParen))
        );

        let statement = if self.check(&TokenType::If) {
            self.parse_if_statement()?
        } else if self.check(&TokenType::While) {
            self.parse_while_statement()?
        } else if self.match_token(&TokenType::Begin) {
            let body = self.parse_statements()?;
            self.expect(TokenType::End, "block")?;
            Node::op_list(body)
        } else if is_call {
            let name = self.expect_identifier("call")?;
            self.parse_call(&name)?
        } else {
            self.parse_assignment()?
        };

        self.match_token(&TokenType::Semicolon);
        Ok(statement)
    }

    fn parse_if_statement(&mut self) -> Result<Node, CompilerError> {
        self.expect(TokenType::If, "if statement")?;
        let cond = self.parse_expression()?;
        self.expect(TokenType::Then, "if statement")?;
        let if_true = Node::op_list(self.parse_statements()?);

        let if_false = if self.match_token(&TokenType::Else) {
            Some(Node::op_list(self.parse_statements()?))
        } else {
            None
        };
        self.expect(TokenType::End, "if statement")?;

        Ok(Node::if_(cond, if_true, if_false))
    }

    fn parse_while_statement(&mut self) -> Result<Node, CompilerError> {
        self.expect(TokenType::While, "while statement")?;
        let cond = self.parse_expression()?;
        self.expect(TokenType::Do, "while statement")?;
        let body = Node::op_list(self.parse_statements()?);
        self.expect(TokenType::End, "while statement")?;

        Ok(Node::while_(cond, body))
    }

    fn parse_assignment(&mut self) -> Result<Node, CompilerError> {
        let location = self.current_location();
        let lvalue = self.parse_unary_expression()?;

        if !lvalue.is_lvalue() {
            return Err(ParseError::InvalidConstruct {
                message: "Left side of ':=' is not assignable".to_string(),
                location,
            }
            .into());
        }

        self.expect(TokenType::Assign, "assignment")?;
        let expr = self.parse_expression()?;
        Ok(Node::assign(lvalue, expr))
    }

    /// Parse `(args)` after an already consumed callee name
    pub(crate) fn parse_call(&mut self, name: &str) -> Result<Node, CompilerError> {
        let location = self.current_location();
        self.expect(TokenType::LeftParen, "call")?;

        let mut args = Vec::new();
        if !self.check(&TokenType::RightParen) {
            loop {
                args.push(self.parse_expression()?);
                if !self.match_token(&TokenType::Comma) {
                    break;
                }
            }
        }
        self.expect(TokenType::RightParen, "call")?;

        if name == "read" || name == "write" {
            if args.len() != 1 {
                return Err(ParseError::InvalidConstruct {
                    message: format!("'{}' takes exactly one argument, found {}", name, args.len()),
                    location,
                }
                .into());
            }
            if name == "read" && !args[0].is_lvalue() {
                return Err(ParseError::InvalidConstruct {
                    message: "'read' needs an assignable argument".to_string(),
                    location,
                }
                .into());
            }
        }

        Ok(Node::call(name, args))
    }
}
