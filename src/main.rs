//! CLI tool that prints the tokens of a VCL source file, one per line.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};
use vcl_lexer::{LexError, Lexer};

/// Exit code for a lexical error in the middle of a file.
const EXIT_LEX_ERROR: u8 = 2;

/// Print the tokens of a VCL source file
#[derive(Parser, Debug)]
#[command(name = "vcl-lex", version, about, long_about = None)]
struct Cli {
    /// Source file to scan
    source: Option<PathBuf>,

    /// Log scanner activity to stderr (-v debug, -vv trace); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Disable color in log output
    #[arg(long, env = "VCL_LEX_NO_COLOR")]
    no_color: bool,
}

/// Why printing the listing stopped early.
#[derive(Debug, thiserror::Error)]
enum ListingError {
    #[error("{0}")]
    Lex(#[from] LexError),
    #[error("cannot write listing: {0}")]
    Write(#[from] io::Error),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_logging(cli.verbose, cli.no_color) {
        eprintln!("Failed to initialize logging: {e}");
    }

    let program = std::env::args_os()
        .next()
        .map_or_else(|| "vcl-lex".to_string(), |arg| arg.to_string_lossy().into_owned());

    let Some(source) = cli.source else {
        println!("Usage: {program} <source.vcl>");
        println!("No source file is provided.");
        return ExitCode::FAILURE;
    };

    let mut lexer = Lexer::open(&source);

    if !lexer.is_live() {
        println!("Usage: {program} <source.vcl>");
        println!("Source file {} may not exist.", lexer.file_path());
        return ExitCode::FAILURE;
    }

    match write_listing(&mut lexer, &mut io::stdout().lock()) {
        Ok(()) => ExitCode::SUCCESS,
        // reader went away (e.g. `| head`); nothing left to report
        Err(ListingError::Write(e)) if e.kind() == io::ErrorKind::BrokenPipe => ExitCode::SUCCESS,
        Err(ListingError::Write(e)) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
        Err(e @ ListingError::Lex(_)) => {
            eprintln!("error: {e}");
            ExitCode::from(EXIT_LEX_ERROR)
        }
    }
}

/// Write one rendered line per token until the lexer is exhausted.
fn write_listing<R: BufRead, W: Write>(
    lexer: &mut Lexer<R>,
    out: &mut W,
) -> Result<(), ListingError> {
    while let Some(token) = lexer.next_token()? {
        writeln!(out, "{token}")?;
    }
    out.flush()?;
    Ok(())
}

fn init_logging(verbose: u8, no_color: bool) -> Result<(), tracing_subscriber::util::TryInitError> {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let layer = fmt::layer()
        .with_writer(io::stderr)
        .with_ansi(!no_color)
        .with_target(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init()
}
