//! helium - CLI driver: lex, parse, and compile a Helium source file.
//!
//! Grounded on `faxt::main`'s `clap`-derive `Cli` + `tracing-subscriber`
//! init, and `faxc_drv::Session`'s read-then-pipeline shape. Scoped to
//! this spec's one real subcommand: compile a file and report
//! success/failure with a nonzero exit code on error (the reference's
//! `exit(0)`-on-error behavior is intentionally not reproduced).

mod error;
mod session;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use error::HeliumError;
use session::Session;

/// Lex, parse, and compile a Helium source file to bytecode.
#[derive(Parser, Debug)]
#[command(name = "helium")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Lex, parse, and compile a Helium source file", long_about = None)]
struct Cli {
    /// Source file to compile.
    #[arg(short = 'f', long = "file")]
    file: PathBuf,

    /// Dump the token stream and stop before parsing.
    #[arg(long)]
    emit_tokens: bool,

    /// Dump the parsed AST and stop before compiling.
    #[arg(long)]
    emit_ast: bool,

    /// Enable debug-level logging.
    #[arg(short, long, env = "HELIUM_VERBOSE")]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(e) = init_logging(cli.verbose) {
        eprintln!("error: {e:#}");
        return ExitCode::FAILURE;
    }

    let mut session = Session::new(cli.file, cli.emit_tokens, cli.emit_ast);
    match session.run() {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            report(&err, &session);
            ExitCode::FAILURE
        }
    }
}

/// `anyhow`-wrapped since a logging-init failure is a driver-level setup
/// problem, not a pipeline [`HeliumError`] with a source position.
fn init_logging(verbose: bool) -> anyhow::Result<()> {
    let filter = if verbose { EnvFilter::new("debug") } else { EnvFilter::new("info") };
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_ansi(true))
        .try_init()
        .context("failed to initialize logging")?;
    Ok(())
}

fn report(err: &HeliumError, session: &Session) {
    match session.handler.take() {
        Some(diag) => {
            let source = session.source_map.get(&diag.pos.origin).map(|f| f.text.as_str());
            eprint!("{}", diag.render(source));
        }
        None => eprintln!("error: {err}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_short_file_flag() {
        let cli = Cli::parse_from(["helium", "-f", "main.he"]);
        assert_eq!(cli.file, PathBuf::from("main.he"));
        assert!(!cli.emit_tokens);
        assert!(!cli.emit_ast);
    }

    #[test]
    fn cli_parses_emit_flags() {
        let cli = Cli::parse_from(["helium", "-f", "main.he", "--emit-tokens"]);
        assert!(cli.emit_tokens);
    }

    #[test]
    fn cli_parses_verbose_flag() {
        let cli = Cli::parse_from(["helium", "-f", "main.he", "-v"]);
        assert!(cli.verbose);
    }
}
