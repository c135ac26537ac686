use crate::blob::read_blob;
use crate::cli::Cli;
use crate::duration::format_duration;
use crate::error::{Result, RetimeError};
use crate::framerate::FrameRate;
use crate::number_scanner::parse_decimal;
use log::{debug, info, warn};
use std::io::{BufRead, Write};

const FPS_PROMPT: &str = "Video Framerate: ";
const START_PROMPT: &str = "Paste the debug info of the start of the run:";
const END_PROMPT: &str = "Paste the debug info of the end of the run:";

/// ANSI "erase display" followed by "cursor home"
const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// Runtime settings for a retime session
#[derive(Debug, Clone, Default)]
pub struct SessionOptions {
    pub bulk_retime: bool,
    pub mod_note: bool,
    /// Frame rate supplied up front; only used for the first cycle
    pub fps: Option<FrameRate>,
    /// Wipe the pasted debug info off the terminal before printing a result
    pub clear_screen: bool,
}

impl SessionOptions {
    /// Build session settings from parsed flags, validating `--fps`.
    pub fn from_cli(cli: &Cli, clear_screen: bool) -> Result<Self> {
        let fps = cli.fps.as_deref().map(FrameRate::parse).transpose()?;

        Ok(Self {
            bulk_retime: cli.bulk_retime,
            mod_note: cli.mod_note,
            fps,
            clear_screen,
        })
    }
}

/// Outcome of one retime cycle
#[derive(Debug, Clone, PartialEq)]
pub struct Retime {
    pub fps: FrameRate,
    pub start_frame: u64,
    pub end_frame: u64,
    pub duration: f64,
    pub formatted: String,
}

impl Retime {
    pub fn new(fps: FrameRate, start_frame: u64, end_frame: u64) -> Self {
        let duration = fps.duration_between(start_frame, end_frame);
        if duration < 0.0 {
            warn!(
                "end frame {} is before start frame {}; reporting a negative time",
                end_frame, start_frame
            );
        }

        Self {
            fps,
            start_frame,
            end_frame,
            duration,
            formatted: format_duration(duration),
        }
    }

    /// The line written to stdout for this cycle
    pub fn render(&self, mod_note: bool) -> String {
        if mod_note {
            format!(
                "Mod Note: Retimed (Start: Frame {}, End: Frame {}, FPS: {}, Total Time: {})",
                self.start_frame, self.end_frame, self.fps, self.formatted
            )
        } else {
            format!("Final Time: {}", self.formatted)
        }
    }
}

/// Interactive retime loop over an input stream.
///
/// Prompts and screen control go to `prompts`, result lines to `output`.
pub struct RetimeSession<R, W, E> {
    input: R,
    output: W,
    prompts: E,
    options: SessionOptions,
}

impl<R: BufRead, W: Write, E: Write> RetimeSession<R, W, E> {
    pub fn new(input: R, output: W, prompts: E, options: SessionOptions) -> Self {
        Self {
            input,
            output,
            prompts,
            options,
        }
    }

    /// Run cycles until a single retime is done or, in bulk mode, until the
    /// input closes at a frame rate prompt.
    pub fn run(&mut self) -> Result<()> {
        let mut fps = self.options.fps;
        let mut cycles = 0usize;

        loop {
            let rate = match fps {
                Some(rate) => rate,
                None => match self.prompt_frame_rate()? {
                    Some(rate) => rate,
                    None if cycles > 0 => {
                        info!("input closed after {} retimes", cycles);
                        return Ok(());
                    }
                    None => return Err(RetimeError::InputClosed),
                },
            };

            let retime = self.retime_once(rate)?;
            self.emit(&retime)?;
            cycles += 1;

            if !self.options.bulk_retime {
                return Ok(());
            }

            // Drop whatever followed the end blob on its line
            let mut rest = Vec::new();
            self.input.read_until(b'\n', &mut rest)?;

            // Every bulk cycle asks again, even when --fps was given
            fps = None;
        }
    }

    /// Read and time both blobs at the given frame rate.
    pub fn retime_once(&mut self, fps: FrameRate) -> Result<Retime> {
        writeln!(self.prompts, "{}", START_PROMPT)?;
        let start_frame = self.read_frame(fps)?;

        writeln!(self.prompts, "{}", END_PROMPT)?;
        let end_frame = self.read_frame(fps)?;

        let retime = Retime::new(fps, start_frame, end_frame);
        debug!(
            "frames {}..{} at {}fps = {}s",
            start_frame, end_frame, fps, retime.duration
        );

        Ok(retime)
    }

    fn read_frame(&mut self, fps: FrameRate) -> Result<u64> {
        self.prompts.flush()?;
        let cmt = read_blob(&mut self.input)?;
        let seconds = parse_decimal(&cmt);
        let frame = fps.frame_of(seconds).ok_or_else(|| {
            RetimeError::MalformedBlob(format!("\"cmt\" value {} is too large to retime at {}fps", cmt, fps))
        })?;
        debug!("cmt {}s -> frame {}", seconds, frame);
        Ok(frame)
    }

    /// Ask for a frame rate until a valid one is entered.
    ///
    /// Returns `None` when the input closes before a line is read.
    fn prompt_frame_rate(&mut self) -> Result<Option<FrameRate>> {
        loop {
            write!(self.prompts, "{}", FPS_PROMPT)?;
            self.prompts.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Ok(None);
            }

            let text = line.trim_end_matches(['\n', '\r']);
            match FrameRate::parse(text) {
                Ok(rate) => return Ok(Some(rate)),
                Err(err) => {
                    debug!("rejected frame rate {:?}", text);
                    writeln!(self.prompts, "cretime: {}", err)?;
                }
            }
        }
    }

    fn emit(&mut self, retime: &Retime) -> Result<()> {
        if self.options.clear_screen {
            write!(self.prompts, "{}", CLEAR_SCREEN)?;
            self.prompts.flush()?;
        }

        writeln!(self.output, "{}", retime.render(self.options.mod_note))?;
        self.output.flush()?;
        Ok(())
    }
}
