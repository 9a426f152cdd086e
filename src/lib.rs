//! ArabScript - a compiler from an Arabic-keyword scripting language to JavaScript
//!
//! The pipeline is lexer → parser → analyzer → generator; see [`compiler`].

pub mod compiler;
pub mod config;

pub use compiler::{CompileError, OutputMode, compile_file, compile_source};
pub use config::CompilerConfig;
