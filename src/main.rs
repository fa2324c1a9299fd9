//! WhileLang compiler frontend - CLI

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use wlc_frontend::frontend::FrontendError;
use wlc_frontend::util::diagnostic::{render_syntax_error, EmitterConfig};
use wlc_frontend::util::logger::{self, LogLevel};
use wlc_frontend::util::span::SourceFile;
use wlc_frontend::{File, Frontend, FrontendConfig, NAME, VERSION};

/// Parse and macro-expand WhileLang token streams
#[derive(Parser, Debug)]
#[command(name = "wlc-frontend")]
#[command(version = VERSION)]
#[command(about = NAME, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (RON)
    #[arg(short, long, value_name = "FILE.ron", global = true)]
    config: Option<PathBuf>,

    /// Original source text, used to render diagnostics
    #[arg(short, long, value_name = "FILE", global = true)]
    source: Option<PathBuf>,

    /// Print the AST as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Parse a token file without expanding macros
    Parse {
        #[arg(value_name = "TOKENS.json")]
        tokens: PathBuf,
    },

    /// Parse a token file and expand its macros
    Expand {
        #[arg(value_name = "TOKENS.json")]
        tokens: PathBuf,
    },

    /// Print version information
    Version,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => FrontendConfig::load(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => FrontendConfig::default(),
    };
    logger::init_with_level(if args.verbose {
        LogLevel::Debug
    } else {
        config.log_level
    });

    match &args.command {
        Commands::Parse { tokens } => {
            let frontend = Frontend::with_config(config.with_expand_macros(false));
            run(&frontend, tokens, &args)
        }
        Commands::Expand { tokens } => {
            let frontend = Frontend::with_config(config.with_expand_macros(true));
            run(&frontend, tokens, &args)
        }
        Commands::Version => {
            println!("{} {}", NAME, VERSION);
            Ok(())
        }
    }
}

fn run(
    frontend: &Frontend,
    tokens: &Path,
    args: &Args,
) -> Result<()> {
    let file = match frontend.compile_file(tokens) {
        Ok(file) => file,
        Err(FrontendError::Syntax(error)) => {
            let source = match &args.source {
                Some(path) => {
                    let text = std::fs::read_to_string(path)
                        .with_context(|| format!("Failed to read source: {}", path.display()))?;
                    Some(SourceFile::new(path.display().to_string(), text))
                }
                None => None,
            };
            eprint!("{}", render_syntax_error(&error, source.as_ref(), &EmitterConfig::default()));
            std::process::exit(1);
        }
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to compile: {}", tokens.display()));
        }
    };

    print_file(&file, args.json)
}

fn print_file(
    file: &File,
    json: bool,
) -> Result<()> {
    if json {
        let text = serde_json::to_string_pretty(file).context("Failed to serialise AST")?;
        println!("{}", text);
    } else {
        println!("{:#?}", file);
    }
    Ok(())
}
