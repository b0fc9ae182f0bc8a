//! Depth-indented debug dump of a syntax tree
//!
//! One line per node: `"|   "` per depth level, the node kind in snake
//! case, then its scalar payload. List nodes have no line of their own;
//! their members print at the list's depth.

use crate::ast::{DeclVar, Node, ProcHeader};
use std::fmt::Write;

const INDENT: &str = "|   ";

/// Render `node` and its whole subtree
pub fn print_tree(node: &Node) -> String {
    let mut printer = TreePrinter::new();
    printer.node(node, 0);
    printer.finish()
}

struct TreePrinter {
    out: String,
}

impl TreePrinter {
    fn new() -> Self {
        Self { out: String::new() }
    }

    fn finish(self) -> String {
        self.out
    }

    fn line(&mut self, indent: usize, text: &str) {
        for _ in 0..indent {
            self.out.push_str(INDENT);
        }
        // Writing into a String cannot fail
        let _ = writeln!(self.out, "{}", text);
    }

    fn node(&mut self, node: &Node, indent: usize) {
        match node {
            Node::Global(items) => {
                for item in items {
                    self.node(item, indent);
                }
            }
            Node::Procedure(proc) => {
                self.line(indent, "procedure");
                self.header(&proc.header, indent + 1);
                for decl in &proc.vars {
                    self.decl(decl, indent + 1);
                }
                self.node(&proc.code, indent + 1);
            }
            Node::ProcHeader(header) => self.header(header, indent),
            Node::VarList(decls) => {
                for decl in decls {
                    self.decl(decl, indent);
                }
            }
            Node::DeclVar(decl) => self.decl(decl, indent),
            Node::OpList(ops) => {
                for op in ops {
                    self.node(op, indent);
                }
            }
            Node::ProcCall(call) => {
                self.line(indent, &format!("proc_call {}", call.name));
                for arg in &call.args {
                    self.node(arg, indent + 1);
                }
            }
            Node::Assign { lvalue, expr } => {
                self.line(indent, "assign");
                self.node(lvalue, indent + 1);
                self.node(expr, indent + 1);
            }
            Node::If { cond, if_true, if_false } => {
                self.line(indent, "if");
                self.node(cond, indent + 1);
                self.node(if_true, indent + 1);
                if let Some(if_false) = if_false {
                    self.node(if_false, indent + 1);
                }
            }
            Node::While { cond, body } => {
                self.line(indent, "while");
                self.node(cond, indent + 1);
                self.node(body, indent + 1);
            }
            Node::Binop { op, left, right } => {
                self.line(indent, &format!("binop {}", op));
                self.node(left, indent + 1);
                self.node(right, indent + 1);
            }
            Node::Unop { op, arg } => {
                self.line(indent, &format!("unop {}", op));
                self.node(arg, indent + 1);
            }
            Node::Constant(value) => self.line(indent, &format!("constant {}", value)),
            Node::Refname(name) => self.line(indent, &format!("refname {}", name)),
        }
    }

    fn header(&mut self, header: &ProcHeader, indent: usize) {
        self.line(indent, &format!("proc_header {}", header.name));
        for arg in &header.args {
            self.line(indent + 1, &format!("arg_list {}", arg));
        }
    }

    fn decl(&mut self, decl: &DeclVar, indent: usize) {
        self.line(indent, &format!("decl_var {} [ {} ]", decl.name, decl.size));
    }
}
