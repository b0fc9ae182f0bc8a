//! Top-level items: global declarations and procedures

use crate::ast::{DeclVar, Node, ProcHeader, Procedure, MAX_FRAME_WORDS};
use crate::lexer::TokenType;
use crate::parser::{ParseError, Parser};
use log::trace;
use plc_common::CompilerError;

impl Parser {
    /// Parse one `var` line or one procedure
    pub fn parse_top_level_item(&mut self) -> Result<Node, CompilerError> {
        if self.match_token(&TokenType::Var) {
            let decls = self.parse_declarations()?;
            self.match_token(&TokenType::Semicolon);
            return Ok(Node::var_list(decls));
        }

        if self.check(&TokenType::Proc) {
            return self.parse_procedure();
        }

        Err(self.unexpected("'var' or 'proc' at top level").into())
    }

    /// Parse `decl { ',' decl }`
    pub fn parse_declarations(&mut self) -> Result<Vec<DeclVar>, CompilerError> {
        let mut decls = vec![self.parse_declaration()?];
        while self.match_token(&TokenType::Comma) {
            decls.push(self.parse_declaration()?);
        }
        Ok(decls)
    }

    /// Parse `name` or `name[size]`
    fn parse_declaration(&mut self) -> Result<DeclVar, CompilerError> {
        let name = self.expect_identifier("declaration")?;

        if !self.match_token(&TokenType::LeftBracket) {
            return Ok(DeclVar::new(&name, 1));
        }

        let location = self.current_location();
        let size = self.expect_integer("array size")?;
        self.expect(TokenType::RightBracket, "array size")?;

        if size < 1 {
            return Err(ParseError::InvalidConstruct {
                message: format!("Declaration '{}' must have a positive size, found {}", name, size),
                location,
            }
            .into());
        }

        trace!("Declared '{}' with {} words", name, size);
        Ok(DeclVar::new(&name, size as u32))
    }

    /// Parse `proc name(args) [var decls] begin stmts end`
    pub fn parse_procedure(&mut self) -> Result<Node, CompilerError> {
        let location = self.current_location();
        self.expect(TokenType::Proc, "procedure")?;
        let name = self.expect_identifier("procedure name")?;

        self.expect(TokenType::LeftParen, "parameter list")?;
        let mut args = Vec::new();
        if !self.check(&TokenType::RightParen) {
            loop {
                args.push(self.expect_identifier("parameter list")?);
                if !self.match_token(&TokenType::Comma) {
                    break;
                }
            }
        }
        self.expect(TokenType::RightParen, "parameter list")?;

        let vars = if self.match_token(&TokenType::Var) {
            let decls = self.parse_declarations()?;
            self.match_token(&TokenType::Semicolon);
            decls
        } else {
            Vec::new()
        };

        self.expect(TokenType::Begin, "procedure body")?;
        let body = self.parse_statements()?;
        self.expect(TokenType::End, "procedure body")?;
        self.match_token(&TokenType::Semicolon);

        let procedure = Procedure {
            header: ProcHeader { name, args },
            vars,
            code: Box::new(Node::op_list(body)),
        };
        if procedure.frame_extent().is_none() {
            return Err(ParseError::InvalidConstruct {
                message: format!(
                    "Frame of procedure '{}' exceeds {} words",
                    procedure.header.name, MAX_FRAME_WORDS
                ),
                location,
            }
            .into());
        }

        trace!(
            "Parsed procedure '{}' ({} args, {} locals)",
            procedure.header.name,
            procedure.header.args.len(),
            procedure.vars.len()
        );
        Ok(Node::Procedure(procedure))
    }
}
