pub mod analyzer;
pub mod ast;
mod codegen;
pub mod dump;
pub mod entity;
pub mod error;
pub mod lexer;
pub mod naming;
mod parser;
mod scope;
pub mod types;

pub use analyzer::Analyzer;
pub use codegen::{Generator, generate};
pub use error::CompileError;
pub use lexer::Lexer;
pub use naming::{CommandOracle, DictionaryOracle, NameTable, NamingOracle, NoOracle};
pub use parser::Parser;

use crate::config::{CompilerConfig, NamingConfig, TimingsFormat};
use ast::{BoundProgram, Program};
use std::path::Path;
use std::time::{Duration, Instant};

/// What the pipeline prints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputMode {
    /// The raw syntax tree
    Ast,
    /// The bound tree with types and entities
    Analyzed,
    /// JavaScript source
    #[default]
    Js,
}

/// Wall-clock time spent in each pipeline stage.
#[derive(Debug, Clone, Copy, Default)]
pub struct Timings {
    pub lexer: Duration,
    pub parser: Duration,
    pub analyzer: Duration,
    pub generator: Duration,
}

impl Timings {
    pub fn total(&self) -> Duration {
        self.lexer + self.parser + self.analyzer + self.generator
    }

    pub fn format(&self, format: TimingsFormat) -> String {
        match format {
            TimingsFormat::Human => self.format_human(),
            TimingsFormat::Json => self.format_json(),
        }
    }

    fn format_human(&self) -> String {
        let row = |name: &str, d: Duration| format!("  {:<10} {:>10.3}ms\n", name, ms(d));
        let mut output = String::from("Compiler timings:\n");
        output.push_str(&row("lexer", self.lexer));
        output.push_str(&row("parser", self.parser));
        output.push_str(&row("analyzer", self.analyzer));
        output.push_str(&row("generator", self.generator));
        output.push_str(&row("total", self.total()));
        output
    }

    fn format_json(&self) -> String {
        serde_json::json!({
            "lexer_ms": ms(self.lexer),
            "parser_ms": ms(self.parser),
            "analyzer_ms": ms(self.analyzer),
            "generator_ms": ms(self.generator),
            "total_ms": ms(self.total()),
        })
        .to_string()
    }
}

fn ms(d: Duration) -> f64 {
    d.as_secs_f64() * 1000.0
}

/// Result of a full compilation.
#[derive(Debug, Clone)]
pub struct Compiled {
    pub output: String,
    pub timings: Timings,
}

/// Lex and parse `source`.
pub fn parse_source(filename: &str, source: &str) -> Result<Program, CompileError> {
    let mut timings = Timings::default();
    parse_timed(filename, source, &mut timings)
}

fn parse_timed(filename: &str, source: &str, timings: &mut Timings) -> Result<Program, CompileError> {
    let start = Instant::now();
    let tokens = Lexer::new(source).scan_tokens()?;
    timings.lexer = start.elapsed();
    tracing::debug!(file = filename, tokens = tokens.len(), "lexed");

    let start = Instant::now();
    let program = Parser::new(tokens).parse()?;
    timings.parser = start.elapsed();
    tracing::debug!(file = filename, statements = program.statements.len(), "parsed");

    Ok(program)
}

/// Bind and type-check a parsed program.
pub fn analyze(program: Program) -> Result<BoundProgram, CompileError> {
    Ok(analyzer::analyze(program)?)
}

/// Build the naming oracle selected by the configuration.
pub fn naming_oracle(config: &NamingConfig) -> Result<Box<dyn NamingOracle>, CompileError> {
    if let Some(command) = &config.command {
        let timeout = Duration::from_millis(config.timeout_ms);
        return Ok(Box::new(CommandOracle::new(command.clone(), timeout)?));
    }
    if let Some(path) = &config.dictionary {
        let oracle = DictionaryOracle::load(path)?;
        tracing::debug!(path = %path.display(), names = oracle.len(), "loaded name dictionary");
        return Ok(Box::new(oracle));
    }
    Ok(Box::new(NoOracle))
}

/// Run the pipeline on `source` up to the stage `mode` asks for.
pub fn compile_source(
    filename: &str,
    source: &str,
    mode: OutputMode,
    config: &CompilerConfig,
) -> Result<Compiled, CompileError> {
    let mut timings = Timings::default();
    let program = parse_timed(filename, source, &mut timings)?;

    if mode == OutputMode::Ast {
        return Ok(Compiled {
            output: dump::format_ast(&program),
            timings,
        });
    }

    let start = Instant::now();
    let bound = analyze(program)?;
    timings.analyzer = start.elapsed();
    tracing::debug!(file = filename, entities = bound.entities.len(), "analyzed");

    if mode == OutputMode::Analyzed {
        return Ok(Compiled {
            output: dump::format_bound(&bound),
            timings,
        });
    }

    let oracle = naming_oracle(&config.naming)?;
    let start = Instant::now();
    let output = generate(&bound, oracle, config.indent);
    timings.generator = start.elapsed();
    tracing::debug!(file = filename, bytes = output.len(), "generated");

    Ok(Compiled { output, timings })
}

fn read_source(path: &Path) -> Result<String, CompileError> {
    std::fs::read_to_string(path).map_err(|source| CompileError::Io {
        path: path.display().to_string(),
        source,
    })
}

/// Compile a file.
pub fn compile_file(
    path: &Path,
    mode: OutputMode,
    config: &CompilerConfig,
) -> Result<Compiled, CompileError> {
    let source = read_source(path)?;
    compile_source(&path.display().to_string(), &source, mode, config)
}

/// Parse and analyze a file without generating anything.
pub fn check_file(path: &Path) -> Result<BoundProgram, CompileError> {
    let source = read_source(path)?;
    let program = parse_source(&path.display().to_string(), &source)?;
    analyze(program)
}
