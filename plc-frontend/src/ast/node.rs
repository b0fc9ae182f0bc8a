//! Node definitions
//!
//! One closed sum type covers every construct. The sibling chains of
//! the grammar (top-level items, statements, declarations, formal and
//! actual arguments) are stored as ordered vectors; their order is the
//! source order and later layout decisions depend on it.

use super::ops::{BinaryOp, UnaryOp};
use serde::{Deserialize, Serialize};

/// A syntax tree node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Node {
    /// Top-level sequence of procedures and global declarations
    Global(Vec<Node>),

    /// One compiled unit
    Procedure(Procedure),

    /// Entry label plus formal parameter names
    ProcHeader(ProcHeader),

    /// Declarations in declaration order
    VarList(Vec<DeclVar>),

    /// A single named storage declaration
    DeclVar(DeclVar),

    /// Statement sequence
    OpList(Vec<Node>),

    /// Procedure call or intrinsic invocation
    ProcCall(ProcCall),

    /// Store `expr` into the address of `lvalue`
    Assign {
        lvalue: Box<Node>,
        expr: Box<Node>,
    },

    If {
        cond: Box<Node>,
        if_true: Box<Node>,
        if_false: Option<Box<Node>>,
    },

    While {
        cond: Box<Node>,
        body: Box<Node>,
    },

    Binop {
        op: BinaryOp,
        left: Box<Node>,
        right: Box<Node>,
    },

    Unop {
        op: UnaryOp,
        arg: Box<Node>,
    },

    Constant(i32),

    /// Variable or array reference by name
    Refname(String),
}

/// A procedure: header, local declarations and body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Procedure {
    pub header: ProcHeader,
    pub vars: Vec<DeclVar>,
    pub code: Box<Node>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcHeader {
    pub name: String,
    /// Formal parameters in declaration order
    pub args: Vec<String>,
}

/// Named storage of `size` words (an array when `size > 1`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeclVar {
    pub name: String,
    pub size: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcCall {
    pub name: String,
    /// Actual argument expressions in source order
    pub args: Vec<Node>,
}

impl DeclVar {
    pub fn new(name: &str, size: u32) -> Self {
        Self {
            name: name.to_string(),
            size,
        }
    }
}

impl ProcHeader {
    pub fn new(name: &str, args: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }
}

/// Largest frame, in words, that a frame-relative immediate can reach
pub const MAX_FRAME_WORDS: u32 = i32::MAX as u32;

impl Procedure {
    /// Total number of words taken by the local declarations
    pub fn frame_size(&self) -> u32 {
        self.vars.iter().fold(0u32, |total, v| total.saturating_add(v.size))
    }

    /// Words addressed below the frame top (locals, then one per
    /// argument), or `None` once that exceeds [`MAX_FRAME_WORDS`]
    pub fn frame_extent(&self) -> Option<u32> {
        let locals = self.vars.iter().map(|v| v.size);
        let args = self.header.args.iter().map(|_| 1);
        locals.chain(args).try_fold(0u32, |total, size| {
            total.checked_add(size).filter(|words| *words <= MAX_FRAME_WORDS)
        })
    }
}

// Constructors copy every name so each node owns its strings outright.
impl Node {
    pub fn global(items: Vec<Node>) -> Self {
        Node::Global(items)
    }

    pub fn procedure(header: ProcHeader, vars: Vec<DeclVar>, code: Node) -> Self {
        Node::Procedure(Procedure {
            header,
            vars,
            code: Box::new(code),
        })
    }

    pub fn var_list(decls: Vec<DeclVar>) -> Self {
        Node::VarList(decls)
    }

    pub fn decl_var(name: &str, size: u32) -> Self {
        Node::DeclVar(DeclVar::new(name, size))
    }

    pub fn op_list(ops: Vec<Node>) -> Self {
        Node::OpList(ops)
    }

    pub fn call(name: &str, args: Vec<Node>) -> Self {
        Node::ProcCall(ProcCall {
            name: name.to_string(),
            args,
        })
    }

    pub fn assign(lvalue: Node, expr: Node) -> Self {
        Node::Assign {
            lvalue: Box::new(lvalue),
            expr: Box::new(expr),
        }
    }

    pub fn if_(cond: Node, if_true: Node, if_false: Option<Node>) -> Self {
        Node::If {
            cond: Box::new(cond),
            if_true: Box::new(if_true),
            if_false: if_false.map(Box::new),
        }
    }

    pub fn while_(cond: Node, body: Node) -> Self {
        Node::While {
            cond: Box::new(cond),
            body: Box::new(body),
        }
    }

    pub fn binop(op: BinaryOp, left: Node, right: Node) -> Self {
        Node::Binop {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn unop(op: UnaryOp, arg: Node) -> Self {
        Node::Unop {
            op,
            arg: Box::new(arg),
        }
    }

    pub fn constant(value: i32) -> Self {
        Node::Constant(value)
    }

    pub fn refname(name: &str) -> Self {
        Node::Refname(name.to_string())
    }

    /// `base[index]`, spelled as a load from `base + index`
    pub fn index(base: Node, index: Node) -> Self {
        Node::unop(UnaryOp::Dereference, Node::binop(BinaryOp::Add, base, index))
    }

    /// True for nodes with a storage address
    pub fn is_lvalue(&self) -> bool {
        matches!(
            self,
            Node::Refname(_) | Node::Unop { op: UnaryOp::Dereference, .. }
        )
    }
}
