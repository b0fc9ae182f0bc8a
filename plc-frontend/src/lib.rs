//! Procedure Language Compiler - Frontend
//!
//! This crate provides everything that produces or inspects the syntax tree:
//! - AST: the closed node model handed to the backend
//! - Printer: depth-indented debug dump
//! - Lexer / Parser: builds the tree from source text
//! - JSON: serialized trees from an external parser

pub mod ast;
pub mod lexer;
pub mod parser;
pub mod printer;

pub use ast::{BinaryOp, DeclVar, Node, ProcCall, ProcHeader, Procedure, UnaryOp, MAX_FRAME_WORDS};
pub use lexer::{Lexer, Token, TokenType};
pub use parser::{ParseError, Parser};
pub use printer::print_tree;

use plc_common::{CompilerError, SourceLocation};

/// High-level frontend interface
pub struct Frontend;

impl Frontend {
    /// Parse source code into a single `Global` root
    pub fn parse_source(source: &str) -> Result<Node, CompilerError> {
        let mut lexer = Lexer::new(source);
        let tokens = lexer.tokenize()?;

        let mut parser = Parser::new(tokens);
        parser.parse_program()
    }

    /// Tokenize source code (for debugging)
    pub fn tokenize_source(source: &str) -> Result<Vec<Token>, CompilerError> {
        let mut lexer = Lexer::new(source);
        lexer.tokenize()
    }

    /// Read a tree serialized by [`Frontend::tree_to_json`] or an external parser
    pub fn tree_from_json(json: &str) -> Result<Node, CompilerError> {
        let root: Node = serde_json::from_str(json).map_err(|e| {
            CompilerError::parse_error(
                format!("Malformed syntax tree: {}", e),
                SourceLocation::new_simple(e.line() as u32, e.column() as u32),
            )
        })?;
        check_tree(&root)?;
        Ok(root)
    }

    pub fn tree_to_json(root: &Node) -> Result<String, CompilerError> {
        serde_json::to_string_pretty(root).map_err(|e| CompilerError::InternalError {
            message: format!("Cannot serialize syntax tree: {}", e),
        })
    }
}

/// Apply the declaration checks the parser makes to a deserialized tree
fn check_tree(node: &Node) -> Result<(), CompilerError> {
    match node {
        Node::Global(items) => items.iter().try_for_each(check_tree),
        Node::VarList(decls) => check_declarations(decls),
        Node::DeclVar(decl) => check_declarations(std::slice::from_ref(decl)),
        Node::Procedure(proc) => {
            check_declarations(&proc.vars)?;
            match proc.frame_extent() {
                Some(_) => Ok(()),
                None => Err(tree_error(format!(
                    "Frame of procedure '{}' exceeds {} words",
                    proc.header.name, MAX_FRAME_WORDS
                ))),
            }
        }
        _ => Ok(()),
    }
}

fn check_declarations(decls: &[DeclVar]) -> Result<(), CompilerError> {
    match decls.iter().find(|decl| decl.size == 0) {
        Some(decl) => Err(tree_error(format!(
            "Declaration '{}' must have a positive size",
            decl.name
        ))),
        None => Ok(()),
    }
}

fn tree_error(message: String) -> CompilerError {
    CompilerError::parse_error(message, SourceLocation::new(JSON_TREE, 0, 0))
}

const JSON_TREE: &str = "<json>";
