use clap::error::{ContextKind, ContextValue, ErrorKind};
use clap::Parser;

/// Example, exit status listing and contact lines shown under `--help`
const AFTER_HELP: &str = "\
Example: cretime -mf 30

Exit status:
 0  if OK,
 1  if invalid flag or missing option,
 2  if invalid youtube debug info,
 3  if invalid fps.

Report bugs to: thomasvoss@live.com
Source code: <https://www.github.com/Mango0x45/Cretime>";

/// Text printed by `-v/--version`
pub const VERSION_TEXT: &str = "\
cretime v1.3
Licence Unlicense: <https://unlicense.org>
This is free software: you are free to change and redistribute it.
There is NO WARRANTY, to the extent permitted by law.

Written by Thomas Voss; see
<https://www.github.com/Mango0x45/Cretime>
";

#[derive(Parser, Debug)]
#[command(name = "cretime")]
#[command(about = "Retime a segment of a youtube video from its debug info")]
#[command(after_help = AFTER_HELP)]
pub struct Cli {
    /// Bulk retime videos; the b and m flags are preserved
    #[arg(short, long = "bulk-retime")]
    pub bulk_retime: bool,

    /// Set the FPS of the video being retimed (whole number from 1 to 60)
    #[arg(short, long, value_name = "FPS")]
    pub fps: Option<String>,

    /// Output a mod retime note as opposed to the end duration
    #[arg(short, long = "mod-note")]
    pub mod_note: bool,

    /// Increase log verbosity (-V info, -VV debug, -VVV trace)
    #[arg(short = 'V', long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    // Plain flag rather than clap's version action: --fps is validated first
    /// Display the version information and exit
    #[arg(short = 'v', long)]
    pub version: bool,
}

impl Cli {
    pub fn try_parse_args() -> Result<Self, clap::Error> {
        Self::try_parse()
    }
}

/// Whether a parse error is `-f/--fps` given without its value.
///
/// That case exits with the frame rate status instead of the generic
/// flag error.
pub fn is_missing_fps(err: &clap::Error) -> bool {
    if err.kind() != ErrorKind::InvalidValue {
        return false;
    }

    matches!(
        err.get(ContextKind::InvalidArg),
        Some(ContextValue::String(arg)) if arg.starts_with("--fps")
    )
}

/// Whether clap stopped parsing only to show help text.
pub fn is_help_request(err: &clap::Error) -> bool {
    matches!(
        err.kind(),
        ErrorKind::DisplayHelp | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
    )
}
