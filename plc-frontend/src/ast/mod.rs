//! Syntax tree for the procedure language
//! 
//! The tree is built once by the parser (or deserialized from JSON),
//! handed to the backend as a single root, and dropped once at the end.
//! Every child is owned by exactly one parent, so teardown is the
//! ordinary recursive `Drop`.

pub mod ops;
pub mod node;

pub use ops::{BinaryOp, UnaryOp};
pub use node::{DeclVar, Node, ProcCall, ProcHeader, Procedure, MAX_FRAME_WORDS};
