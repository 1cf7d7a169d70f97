//! Unified error type for the three pipeline stages (spec.md §7).

use std::fmt;

use crate::lexer::LexError;
use crate::parser::ParseError;

/// A runtime error raised by the interpreter: undefined variable, type
/// mismatch, division by zero, out-of-range index, missing dict key, wrong
/// builtin argument count/type, or invalid conversion.
///
/// Unlike lexical and syntax errors, runtime errors are not tied to a single
/// source line here: the AST is position-erased after parsing, so there is
/// no line to attach once execution is underway. Spec.md §7 marks the line
/// number on every error kind as present only "where known" — for runtime
/// errors it usually isn't, so this matches that qualifier rather than
/// threading a best-effort line through every expression node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeError {
    pub message: String,
}

impl RuntimeError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Runtime error: {}", self.message)
    }
}

impl std::error::Error for RuntimeError {}

/// Any error that can propagate out of the lex/parse/execute pipeline.
#[derive(Debug, Clone)]
pub enum MiniPyError {
    Lex(LexError),
    Parse(ParseError),
    Runtime(RuntimeError),
}

impl fmt::Display for MiniPyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MiniPyError::Lex(e) => write!(f, "{e}"),
            MiniPyError::Parse(e) => write!(f, "{e}"),
            MiniPyError::Runtime(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for MiniPyError {}

impl From<LexError> for MiniPyError {
    fn from(e: LexError) -> Self {
        MiniPyError::Lex(e)
    }
}

impl From<ParseError> for MiniPyError {
    fn from(e: ParseError) -> Self {
        MiniPyError::Parse(e)
    }
}

impl From<RuntimeError> for MiniPyError {
    fn from(e: RuntimeError) -> Self {
        MiniPyError::Runtime(e)
    }
}
