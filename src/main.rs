use arabscript::compiler::{self, CompileError, OutputMode};
use arabscript::config::{CompilerConfig, TimingsFormat};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
pub enum EmitArg {
    Ast,
    Analyzed,
    #[default]
    Js,
}

impl From<EmitArg> for OutputMode {
    fn from(arg: EmitArg) -> Self {
        match arg {
            EmitArg::Ast => OutputMode::Ast,
            EmitArg::Analyzed => OutputMode::Analyzed,
            EmitArg::Js => OutputMode::Js,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
pub enum TimingsFormatArg {
    #[default]
    Human,
    Json,
}

impl From<TimingsFormatArg> for TimingsFormat {
    fn from(arg: TimingsFormatArg) -> Self {
        match arg {
            TimingsFormatArg::Human => TimingsFormat::Human,
            TimingsFormatArg::Json => TimingsFormat::Json,
        }
    }
}

#[derive(Parser)]
#[command(name = "arabscript")]
#[command(about = "Compile Arabic-keyword scripts to JavaScript", long_about = None)]
struct Cli {
    /// Log pipeline stages to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a source file and print the result
    Compile {
        /// The source file to compile
        file: PathBuf,

        /// What to print (ast, analyzed, js)
        #[arg(long, value_enum, default_value = "js")]
        emit: EmitArg,

        /// TOML dictionary mapping identifiers to names
        #[arg(long, value_name = "FILE")]
        names: Option<PathBuf>,

        /// Program asked for a name for each identifier (identifier appended as last argument)
        #[arg(long, value_name = "CMD", num_args = 1.., allow_hyphen_values = true)]
        namer_command: Option<Vec<String>>,

        /// Timeout for one namer command lookup
        #[arg(long, value_name = "MS")]
        namer_timeout_ms: Option<u64>,

        /// Configuration file (defaults to ./arabscript.toml if present)
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Print compiler pipeline timings (human or json format)
        #[arg(long, value_enum, require_equals = true, num_args = 0..=1, default_missing_value = "human")]
        timings: Option<TimingsFormatArg>,
    },
    /// Parse and analyze a source file without generating code
    Check {
        /// The source file to check
        file: PathBuf,
    },
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<CompilerConfig, CompileError> {
    match path {
        Some(path) => CompilerConfig::load(path),
        None => {
            let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
            CompilerConfig::discover(&cwd)
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Compile {
            file,
            emit,
            names,
            namer_command,
            namer_timeout_ms,
            config,
            timings,
        } => {
            let filename = file.display().to_string();

            let mut config = match load_config(config.as_deref()) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("{}", e.render(&filename));
                    return ExitCode::FAILURE;
                }
            };
            if names.is_some() {
                config.naming.dictionary = names;
            }
            if namer_command.is_some() {
                config.naming.command = namer_command;
            }
            if let Some(timeout_ms) = namer_timeout_ms {
                config.naming.timeout_ms = timeout_ms;
            }

            match compiler::compile_file(&file, emit.into(), &config) {
                Ok(compiled) => {
                    println!("{}", compiled.output.trim_end_matches('\n'));
                    if let Some(format) = timings {
                        eprintln!("{}", compiled.timings.format(format.into()));
                    }
                }
                Err(e) => {
                    eprintln!("{}", e.render(&filename));
                    return ExitCode::FAILURE;
                }
            }
        }
        Commands::Check { file } => {
            if let Err(e) = compiler::check_file(&file) {
                eprintln!("{}", e.render(&file.display().to_string()));
                return ExitCode::FAILURE;
            }
            println!("Analysis passed.");
        }
    }

    ExitCode::SUCCESS
}
