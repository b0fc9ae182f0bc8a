//! Recursive descent parser
//! 
//! Parses tokens into the syntax tree. The whole program becomes a
//! single `Global` root; every `var` line becomes a `VarList` and every
//! procedure body an `OpList`.

pub mod errors;
pub mod declarations;
pub mod statements;
pub mod expressions;

use crate::ast::Node;
use crate::lexer::{Token, TokenType};
use log::debug;
use plc_common::{CompilerError, SourceLocation};
use std::collections::VecDeque;

pub use errors::ParseError;

pub struct Parser {
    tokens: VecDeque<Token>,
    eof_location: SourceLocation,
}

impl Parser {
    /// Create a new parser
    pub fn new(tokens: Vec<Token>) -> Self {
        let eof_location = tokens
            .last()
            .map(|t| t.span.start.clone())
            .unwrap_or_else(|| SourceLocation::new_simple(1, 1));

        Self {
            tokens: tokens.into(),
            eof_location,
        }
    }

    /// Peek at current token without consuming
    pub(crate) fn peek(&self) -> Option<&Token> {
        self.tokens.front()
    }

    pub(crate) fn peek_nth(&self, n: usize) -> Option<&Token> {
        self.tokens.get(n)
    }

    /// Get current token and advance
    pub(crate) fn advance(&mut self) -> Option<Token> {
        self.tokens.pop_front()
    }

    /// Check if current token matches expected type
    pub(crate) fn check(&self, token_type: &TokenType) -> bool {
        if let Some(token) = self.peek() {
            std::mem::discriminant(&token.token_type) == std::mem::discriminant(token_type)
        } else {
            matches!(token_type, TokenType::EndOfFile)
        }
    }

    /// Consume token if it matches expected type
    pub(crate) fn match_token(&mut self, token_type: &TokenType) -> bool {
        if self.check(token_type) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume the next real token; running into `EndOfFile` is an error
    fn take(&mut self, expected: &str) -> Result<Token, ParseError> {
        match self.advance() {
            Some(token) if token.token_type != TokenType::EndOfFile => Ok(token),
            _ => Err(self.end_of_file(expected.to_string())),
        }
    }

    /// Expect and consume a specific token type
    pub(crate) fn expect(&mut self, token_type: TokenType, context: &str) -> Result<Token, ParseError> {
        let expected = format!("'{}' in {}", token_type, context);
        let token = self.take(&expected)?;
        if std::mem::discriminant(&token.token_type) == std::mem::discriminant(&token_type) {
            Ok(token)
        } else {
            Err(ParseError::UnexpectedToken { expected, found: token })
        }
    }

    pub(crate) fn expect_identifier(&mut self, context: &str) -> Result<String, ParseError> {
        let expected = format!("identifier in {}", context);
        match self.take(&expected)? {
            Token { token_type: TokenType::Identifier(name), .. } => Ok(name),
            token => Err(ParseError::UnexpectedToken { expected, found: token }),
        }
    }

    pub(crate) fn expect_integer(&mut self, context: &str) -> Result<i32, ParseError> {
        let expected = format!("integer in {}", context);
        match self.take(&expected)? {
            Token { token_type: TokenType::IntLiteral(value), .. } => Ok(value),
            token => Err(ParseError::UnexpectedToken { expected, found: token }),
        }
    }

    fn end_of_file(&self, expected: String) -> ParseError {
        ParseError::UnexpectedEndOfFile {
            expected,
            location: self.eof_location.clone(),
        }
    }

    /// Error for the token at the cursor when nothing valid can start there
    pub(crate) fn unexpected(&self, expected: &str) -> ParseError {
        match self.peek() {
            Some(token) if token.token_type != TokenType::EndOfFile => ParseError::UnexpectedToken {
                expected: expected.to_string(),
                found: token.clone(),
            },
            _ => self.end_of_file(expected.to_string()),
        }
    }

    /// Get current location for error reporting
    pub(crate) fn current_location(&self) -> SourceLocation {
        match self.peek() {
            Some(token) => token.span.start.clone(),
            None => self.eof_location.clone(),
        }
    }

    /// Parse a complete program
    pub fn parse_program(&mut self) -> Result<Node, CompilerError> {
        let mut items = Vec::new();

        while !self.check(&TokenType::EndOfFile) {
            items.push(self.parse_top_level_item()?);
        }

        debug!("Parsed program with {} top-level items", items.len());
        Ok(Node::global(items))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{BinaryOp, DeclVar, UnaryOp};
    use crate::lexer::Lexer;
    use pretty_assertions::assert_eq;

    fn parser_for(input: &str) -> Parser {
        let tokens = Lexer::new(input).tokenize().unwrap();
        Parser::new(tokens)
    }

    fn parse_expression_from_str(input: &str) -> Result<Node, CompilerError> {
        parser_for(input).parse_expression()
    }

    fn parse_statement_from_str(input: &str) -> Result<Node, CompilerError> {
        parser_for(input).parse_statement()
    }

    fn parse_program_from_str(input: &str) -> Result<Node, CompilerError> {
        parser_for(input).parse_program()
    }

    #[test]
    fn test_precedence_mul_over_add() {
        let expr = parse_expression_from_str("1 + 2 * 3").unwrap();
        assert_eq!(
            expr,
            Node::binop(
                BinaryOp::Add,
                Node::constant(1),
                Node::binop(BinaryOp::Mul, Node::constant(2), Node::constant(3)),
            )
        );
    }

    #[test]
    fn test_left_associativity() {
        let expr = parse_expression_from_str("a - b - c").unwrap();
        assert_eq!(
            expr,
            Node::binop(
                BinaryOp::Sub,
                Node::binop(BinaryOp::Sub, Node::refname("a"), Node::refname("b")),
                Node::refname("c"),
            )
        );
    }

    #[test]
    fn test_logical_levels() {
        // or < xor < and < comparison
        let expr = parse_expression_from_str("a or b xor c and d < e").unwrap();
        assert_eq!(
            expr,
            Node::binop(
                BinaryOp::Or,
                Node::refname("a"),
                Node::binop(
                    BinaryOp::Xor,
                    Node::refname("b"),
                    Node::binop(
                        BinaryOp::And,
                        Node::refname("c"),
                        Node::binop(BinaryOp::Less, Node::refname("d"), Node::refname("e")),
                    ),
                ),
            )
        );
    }

    #[test]
    fn test_unary_and_index() {
        let expr = parse_expression_from_str("-a[i + 1]").unwrap();
        assert_eq!(
            expr,
            Node::unop(
                UnaryOp::Minus,
                Node::index(
                    Node::refname("a"),
                    Node::binop(BinaryOp::Add, Node::refname("i"), Node::constant(1)),
                ),
            )
        );
        let expr = parse_expression_from_str("not *p").unwrap();
        assert_eq!(
            expr,
            Node::unop(UnaryOp::Not, Node::unop(UnaryOp::Dereference, Node::refname("p")))
        );
    }

    #[test]
    fn test_parenthesized_expression() {
        let expr = parse_expression_from_str("(1 + 2) * 3").unwrap();
        assert!(matches!(expr, Node::Binop { op: BinaryOp::Mul, .. }));
    }

    #[test]
    fn test_assignment_statement() {
        let stmt = parse_statement_from_str("a[2] := x;").unwrap();
        assert_eq!(
            stmt,
            Node::assign(
                Node::index(Node::refname("a"), Node::constant(2)),
                Node::refname("x"),
            )
        );
    }

    #[test]
    fn test_assignment_to_non_lvalue_rejected() {
        let err = parse_statement_from_str("1 := x").unwrap_err();
        assert!(err.to_string().contains("not assignable"), "{}", err);
    }

    #[test]
    fn test_if_without_else() {
        let stmt = parse_statement_from_str("if x then write(x); end").unwrap();
        match stmt {
            Node::If { if_false, .. } => assert!(if_false.is_none()),
            other => panic!("Expected if, got {:?}", other),
        }
    }

    #[test]
    fn test_while_statement() {
        let stmt = parse_statement_from_str("while i < 10 do i := i + 1; end;").unwrap();
        match stmt {
            Node::While { cond, body } => {
                assert!(matches!(*cond, Node::Binop { op: BinaryOp::Less, .. }));
                assert_eq!(*body, Node::op_list(vec![Node::assign(
                    Node::refname("i"),
                    Node::binop(BinaryOp::Add, Node::refname("i"), Node::constant(1)),
                )]));
            }
            other => panic!("Expected while, got {:?}", other),
        }
    }

    #[test]
    fn test_intrinsic_arity_checked() {
        let err = parse_statement_from_str("write(1, 2)").unwrap_err();
        assert!(err.to_string().contains("exactly one argument"), "{}", err);
        let err = parse_statement_from_str("read(1 + 2)").unwrap_err();
        assert!(err.to_string().contains("assignable"), "{}", err);
    }

    #[test]
    fn test_program_structure() {
        let program = parse_program_from_str(
            "var g[5], h;\nproc main(a, b) var x, y[2] begin f(a, 1 + b); end",
        )
        .unwrap();
        let Node::Global(items) = program else {
            panic!("Expected global list");
        };
        assert_eq!(items.len(), 2);
        assert_eq!(items[0], Node::var_list(vec![DeclVar::new("g", 5), DeclVar::new("h", 1)]));
        match &items[1] {
            Node::Procedure(proc) => {
                assert_eq!(proc.header.name, "main");
                assert_eq!(proc.header.args, vec!["a".to_string(), "b".to_string()]);
                assert_eq!(proc.vars, vec![DeclVar::new("x", 1), DeclVar::new("y", 2)]);
                assert_eq!(proc.frame_size(), 3);
            }
            other => panic!("Expected procedure, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_sized_declaration_rejected() {
        let err = parse_program_from_str("var a[0];").unwrap_err();
        assert!(matches!(err, CompilerError::ParseError { .. }));
    }

    #[test]
    fn test_oversized_frame_rejected() {
        let err = parse_program_from_str("proc main() var a[2000000000], b[2000000000] begin end").unwrap_err();
        assert!(matches!(err, CompilerError::ParseError { .. }));
        assert!(err.to_string().contains("Frame of procedure 'main'"), "{}", err);

        // the running total would wrap a u32 here
        let source = "proc main() var a[2000000000], b[2000000000], c[2000000000] begin end";
        assert!(parse_program_from_str(source).is_err());

        // one argument slot on top of a maximal local frame
        assert!(parse_program_from_str("proc f(n) var a[2147483647] begin end").is_err());
        assert!(parse_program_from_str("proc f() var a[2147483647] begin end").is_ok());
    }

    #[test]
    fn test_missing_end_reports_end_of_file() {
        let err = parse_program_from_str("proc main() begin x := 1;").unwrap_err();
        assert!(err.to_string().contains("Unexpected end of file"), "{}", err);
    }
}
