mod blob;
mod cli;
mod duration;
mod error;
mod framerate;
mod logging;
mod number_scanner;
mod session;

use anyhow::{Context, Result};
use cli::Cli;
use error::{RetimeError, EXIT_BAD_FPS, EXIT_FAILURE, EXIT_OK};
use log::debug;
use logging::{init_logging, LoggingConfig};
use session::{RetimeSession, SessionOptions};
use std::io::{self, IsTerminal, Write};
use std::process::ExitCode;

/*
Retime a segment of a video from two pastes of the player's debug info:

    -f = frame rate - Optional, prompted for when missing
    -m = print a moderation note instead of the final time
    -b = keep retiming until input closes

Prompts go to stderr, results to stdout.
*/

fn main() -> ExitCode {
    let cli = match Cli::try_parse_args() {
        Ok(cli) => cli,
        Err(err) => return ExitCode::from(report_usage(&err)),
    };

    init_logging(LoggingConfig::from_verbosity(cli.verbose));

    match run(cli) {
        Ok(()) => ExitCode::from(EXIT_OK),
        Err(err) => {
            eprintln!("cretime: {}", err);
            ExitCode::from(exit_code_for(&err))
        }
    }
}

/// Exit status for a failed run: the `RetimeError` code when one is in the
/// chain, otherwise the generic failure status.
fn exit_code_for(err: &anyhow::Error) -> u8 {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<RetimeError>())
        .map(RetimeError::exit_code)
        .unwrap_or(EXIT_FAILURE)
}

/// Print a clap parse outcome to stderr and pick the exit status for it.
fn report_usage(err: &clap::Error) -> u8 {
    eprint!("{}", err);

    if cli::is_help_request(err) {
        EXIT_OK
    } else if cli::is_missing_fps(err) {
        EXIT_BAD_FPS
    } else {
        EXIT_FAILURE
    }
}

fn run(cli: Cli) -> Result<()> {
    // A bad --fps is reported even when -v is also given
    let options = SessionOptions::from_cli(&cli, io::stderr().is_terminal())?;

    if cli.version {
        io::stderr()
            .write_all(cli::VERSION_TEXT.as_bytes())
            .context("Unable to write version information")?;
        return Ok(());
    }

    debug!("session options: {:?}", options);

    let stdin = io::stdin();
    let mut session = RetimeSession::new(stdin.lock(), io::stdout().lock(), io::stderr(), options);
    session.run()?;

    Ok(())
}
