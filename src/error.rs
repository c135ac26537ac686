use thiserror::Error;

/// Process exit status for a clean run.
pub const EXIT_OK: u8 = 0;
/// Invalid flag, missing option, closed input or I/O failure.
pub const EXIT_FAILURE: u8 = 1;
/// The pasted debug info could not be used.
pub const EXIT_BAD_DEBUG_INFO: u8 = 2;
/// The frame rate was not a whole number from 1 to 60.
pub const EXIT_BAD_FPS: u8 = 3;

#[derive(Error, Debug)]
pub enum RetimeError {
    #[error("'fps' option must be a whole number from 1 to 60")]
    InvalidFrameRate(String),

    #[error("invalid debug info: {0}")]
    MalformedBlob(String),

    #[error("debug info ended before a closing '}}' was read")]
    TruncatedBlob,

    #[error("input closed while waiting for the video framerate")]
    InputClosed,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl RetimeError {
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::InvalidFrameRate(_) => EXIT_BAD_FPS,
            Self::MalformedBlob(_) | Self::TruncatedBlob => EXIT_BAD_DEBUG_INFO,
            Self::InputClosed | Self::Io(_) => EXIT_FAILURE,
        }
    }
}

pub type Result<T> = std::result::Result<T, RetimeError>;
