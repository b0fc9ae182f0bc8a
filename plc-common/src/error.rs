//! Error handling for the procedure language compiler
//! 
//! Only malformed input is an error: translation of a well-formed tree
//! never fails, and unresolved names are deferred to the assembler.

use crate::source_loc::SourceLocation;
use thiserror::Error;

/// Main compiler error type that encompasses every failure the driver reports
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompilerError {
    #[error("Lexical error at {location}: {message}")]
    LexError {
        location: SourceLocation,
        message: String,
    },

    #[error("Parse error at {location}: {message}")]
    ParseError {
        location: SourceLocation,
        message: String,
    },

    #[error("IO error: {message}")]
    IoError { message: String },

    #[error("Internal compiler error: {message}")]
    InternalError { message: String },
}

impl CompilerError {
    /// Create a lexer error
    pub fn lexer_error(message: String, location: SourceLocation) -> Self {
        CompilerError::LexError { location, message }
    }

    /// Create a parse error
    pub fn parse_error(message: String, location: SourceLocation) -> Self {
        CompilerError::ParseError { location, message }
    }

    /// True for errors caused by the program text rather than the environment
    pub fn is_input_error(&self) -> bool {
        matches!(self, CompilerError::LexError { .. } | CompilerError::ParseError { .. })
    }
}

/// Convert from std::io::Error
impl From<std::io::Error> for CompilerError {
    fn from(err: std::io::Error) -> Self {
        CompilerError::IoError {
            message: err.to_string(),
        }
    }
}
