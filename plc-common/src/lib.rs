//! Procedure Language Compiler - Common Types and Utilities
//! 
//! This crate contains the error type and source location tracking
//! shared by the frontend, backend and driver.

pub mod error;
pub mod source_loc;

pub use error::CompilerError;
pub use source_loc::{SourceLocation, SourceSpan};

/// Label identifier for control-flow labels (`if_<n>_...`, `while_<n>_...`)
pub type LabelId = u32;
