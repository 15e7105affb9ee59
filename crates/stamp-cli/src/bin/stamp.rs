#![allow(clippy::print_stderr)]

use std::io::Write;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;

use stamp_cli::args::CliArgs;
use stamp_cli::driver::{self, Outcome};

fn main() -> ExitCode {
    // Installs a subscriber only when STAMP_LOG or RUST_LOG is set.
    stamp_cli::tracing_config::init_tracing();

    let args = CliArgs::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{} {error:#}", "error:".red().bold());
            ExitCode::FAILURE
        }
    }
}

fn run(args: &CliArgs) -> Result<()> {
    let cwd = std::env::current_dir().context("failed to resolve current directory")?;
    let result = driver::run(args, &cwd, std::io::stdin().lock())?;
    for warning in &result.warnings {
        eprintln!("{} {warning}", "warning:".yellow().bold());
    }

    let mut stdout = std::io::stdout().lock();
    match result.outcome {
        Outcome::Document(text) => stdout.write_all(text.as_bytes())?,
        Outcome::Report(json) => writeln!(stdout, "{json}")?,
        Outcome::Written { path, generated } => {
            eprintln!(
                "{} {} ({generated} mapping method{})",
                "updated".green(),
                path.display(),
                if generated == 1 { "" } else { "s" }
            );
        }
    }
    stdout.flush()?;
    Ok(())
}
