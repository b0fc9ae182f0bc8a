//! Procedure Language Compiler - Backend
//!
//! This crate translates the syntax tree into target instructions in a
//! single depth-first pass. There is no intermediate representation:
//! - `resolver` maps names to frame slots or global labels
//! - `expr` / `stmt` translate expressions and statements
//! - `control_flow` lowers `if` and `while` to labels and branches
//! - `calling_convention` handles calls, intrinsics and stack frames
//! - `program` lays out the whole program

pub mod calling_convention;
pub mod context;
pub mod control_flow;
pub mod expr;
pub mod program;
pub mod resolver;
pub mod stmt;

pub use context::TranslateContext;
pub use program::translate_program;
pub use resolver::Address;

/// Options for translation
#[derive(Debug, Clone)]
pub struct CodegenOptions {
    /// Procedure called by the program prologue
    pub entry: String,
    /// Emit `;` comments with frame sizes and argument counts
    pub annotate: bool,
}

impl Default for CodegenOptions {
    fn default() -> Self {
        Self {
            entry: "main".to_string(),
            annotate: false,
        }
    }
}

#[cfg(test)]
mod tests;
