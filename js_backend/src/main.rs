//! js_gen: translate a C-like source file to JavaScript
//!
//! Usage:
//!   js_gen [OPTIONS] <FILE>
//!
//! Examples:
//!   js_gen loop.c                    # Print generated JavaScript
//!   js_gen --emit=ast loop.c         # Dump the syntax tree
//!   js_gen --run loop.c              # Run with node and print final variable values

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use compiler_core::{CompilerSession, SessionConfig};
use frontend::RedeclarationPolicy;
use js_backend::runner::{self, NodeRunner};
use js_backend::{CodegenOptions, JsBackend};
use log::{debug, info};
use std::fs;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "js_gen")]
#[command(version)]
#[command(about = "Translate a small C-like language to JavaScript", long_about = None)]
struct Cli {
    /// Source file to translate
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Output file (defaults to stdout)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// What to emit
    #[arg(long, default_value = "js")]
    emit: EmitKind,

    /// Execute the generated code and print every top-level variable
    #[arg(long)]
    run: bool,

    /// Interpreter used by --run
    #[arg(long, value_name = "PATH", default_value = "node")]
    node: PathBuf,

    /// Spaces per indentation level (0 for flat output)
    #[arg(long, default_value_t = 2)]
    indent: usize,

    /// Treat a second declaration of the same name as an error
    #[arg(long)]
    reject_redeclaration: bool,

    /// Verbose output (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Quiet mode (errors only)
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum EmitKind {
    /// Token stream, one per line
    Tokens,
    /// Syntax tree dump
    Ast,
    /// Symbol table after checking
    Symbols,
    /// Generated JavaScript
    Js,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.quiet {
        log::LevelFilter::Error
    } else {
        match cli.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    };

    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .format_timestamp(None)
        .init();

    debug!("Input file: {:?}", cli.input);
    let source = fs::read_to_string(&cli.input)
        .with_context(|| format!("Failed to read input file: {:?}", cli.input))?;

    let session = CompilerSession::with_config(build_config(&cli));

    match cli.emit {
        EmitKind::Tokens => {
            let tokens = session.tokenize(&source)?;
            let listing: Vec<String> = tokens.iter().map(|t| t.to_string()).collect();
            return write_output(&cli.output, &listing.join("\n"));
        }
        EmitKind::Ast => {
            let program = session.parse_program(&source)?;
            return write_output(&cli.output, program.dump().trim_end());
        }
        EmitKind::Symbols => {
            let program = session.parse_program(&source)?;
            let symbols = session.check(&program)?;
            return write_output(&cli.output, &symbols.to_string());
        }
        EmitKind::Js => {}
    }

    let backend = JsBackend::new(CodegenOptions { indent_width: cli.indent });
    let compilation = session.compile(&source, &backend)?;
    write_output(&cli.output, &compilation.output)?;

    if cli.run {
        let names = runner::top_level_declarations(&compilation.program);
        let script = runner::with_report(&compilation.output, &names);
        let stdout = NodeRunner::new(&cli.node)
            .run(&script)
            .context("Failed to run generated code")?;
        println!("{stdout}");
    }

    Ok(())
}

fn build_config(cli: &Cli) -> SessionConfig {
    let redeclaration = if cli.reject_redeclaration {
        RedeclarationPolicy::Reject
    } else {
        RedeclarationPolicy::Overwrite
    };
    SessionConfig { redeclaration }
}

fn write_output(path: &Option<PathBuf>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            fs::write(path, format!("{content}\n"))
                .with_context(|| format!("Failed to write output file: {:?}", path))?;
            info!("Wrote {:?}", path);
        }
        None => println!("{content}"),
    }
    Ok(())
}
