//! Error types for every stage of the compiler.
//!
//! Syntactic and semantic failures travel on separate channels: the lexer and
//! parser report a [`SyntaxError`], the analyzer reports an [`AnalysisError`].
//! Both are fatal; the first one aborts the compilation.

use crate::compiler::lexer::Span;
use crate::compiler::types::Type;
use std::fmt;
use thiserror::Error;

/// The input does not match the grammar.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct SyntaxError {
    pub message: String,
    pub span: Span,
}

impl SyntaxError {
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            span,
        }
    }
}

/// What a failed type predicate wanted to see.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expectation {
    Boolean,
    Number,
    Integer,
    Iterable,
    ArrayOrObject,
    Object,
}

impl fmt::Display for Expectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Expectation::Boolean => "a boolean",
            Expectation::Number => "a number",
            Expectation::Integer => "an integer",
            Expectation::Iterable => "an iterable",
            Expectation::ArrayOrObject => "an array or object",
            Expectation::Object => "an object",
        };
        write!(f, "{}", text)
    }
}

/// A violated static contract.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SemanticError {
    #[error("identifier '{name}' already declared")]
    AlreadyDeclared { name: String },

    #[error("identifier '{name}' not declared")]
    NotDeclared { name: String },

    #[error("cannot assign to constant '{name}'")]
    AssignToConstant { name: String },

    #[error("expected {expected}, found {found}")]
    TypeMismatch { expected: Expectation, found: Type },

    #[error("call of non-function (found {found})")]
    NotCallable { found: Type },

    #[error("expected a class, found {found}")]
    NotAClass { found: Type },

    #[error("object keys must be distinct (duplicate key {key})")]
    DuplicateKeys { key: String },

    #[error("break and continue can only appear in a loop")]
    LoopControlOutsideLoop,

    #[error("return can only appear in a function")]
    ReturnOutsideFunction,

    #[error("this can only appear in a class")]
    ThisOutsideClass,
}

/// A semantic error with the location it was detected at.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{kind}")]
pub struct AnalysisError {
    pub kind: SemanticError,
    pub span: Span,
}

impl AnalysisError {
    pub fn new(kind: SemanticError, span: Span) -> Self {
        Self { kind, span }
    }
}

/// Any failure of the full pipeline.
#[derive(Debug, Error)]
pub enum CompileError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("syntax error: {0}")]
    Syntax(#[from] SyntaxError),

    #[error("semantic error: {0}")]
    Semantic(#[from] AnalysisError),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl CompileError {
    pub fn span(&self) -> Option<Span> {
        match self {
            CompileError::Syntax(e) => Some(e.span),
            CompileError::Semantic(e) => Some(e.span),
            CompileError::Io { .. } | CompileError::Config(_) => None,
        }
    }

    /// Formats the error for a terminal, pointing into `filename`.
    pub fn render(&self, filename: &str) -> String {
        match self.span() {
            Some(span) => format!(
                "error: {}\n  --> {}:{}:{}",
                self, filename, span.line, span.column
            ),
            None => format!("error: {}", self),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_semantic_messages() {
        let err = SemanticError::TypeMismatch {
            expected: Expectation::Boolean,
            found: Type::Int,
        };
        assert_eq!(err.to_string(), "expected a boolean, found Int");

        let err = SemanticError::AssignToConstant {
            name: "total".to_string(),
        };
        assert_eq!(err.to_string(), "cannot assign to constant 'total'");
    }

    #[test]
    fn test_render_with_span() {
        let err = CompileError::from(AnalysisError::new(
            SemanticError::ReturnOutsideFunction,
            Span::new(3, 7),
        ));
        assert_eq!(
            err.render("main.as"),
            "error: semantic error: return can only appear in a function\n  --> main.as:3:7"
        );
    }

    #[test]
    fn test_render_without_span() {
        let err = CompileError::Config("bad timeout".to_string());
        assert_eq!(err.render("x.as"), "error: invalid configuration: bad timeout");
    }
}
