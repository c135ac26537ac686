use crate::error::{Result, RetimeError};
use crate::number_scanner::parse_decimal;
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

/// Lowest frame rate a video can be retimed at
pub const MIN_FPS: u32 = 1;
/// Highest frame rate a video can be retimed at
pub const MAX_FPS: u32 = 60;

fn digits_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[0-9]+$").expect("frame rate pattern is valid"))
}

/// A validated whole-number frame rate in `MIN_FPS..=MAX_FPS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameRate(u32);

impl FrameRate {
    /// Validate user supplied frame rate text.
    ///
    /// The text must be all ASCII digits (so no sign, whitespace or decimal
    /// point) and within range. Empty text is rejected.
    pub fn parse(text: &str) -> Result<Self> {
        if !digits_regex().is_match(text) {
            return Err(RetimeError::InvalidFrameRate(text.to_string()));
        }

        // Long digit strings saturate well above MAX_FPS
        let fps = parse_decimal(text);
        if fps < MIN_FPS as f64 || fps > MAX_FPS as f64 {
            return Err(RetimeError::InvalidFrameRate(text.to_string()));
        }

        Ok(Self(fps as u32))
    }

    pub fn get(self) -> u32 {
        self.0
    }

    /// Quantize a timestamp in seconds down to a whole frame count.
    ///
    /// Returns `None` when the frame count is not finite or does not fit a
    /// `u64`.
    pub fn frame_of(self, seconds: f64) -> Option<u64> {
        let frames = (seconds * self.0 as f64).trunc();
        // u64::MAX as f64 rounds up to 2^64, which is itself out of range
        if frames.is_finite() && frames >= 0.0 && frames < u64::MAX as f64 {
            Some(frames as u64)
        } else {
            None
        }
    }

    /// Length in seconds of the span between two frames; negative when the
    /// end frame comes first.
    pub fn duration_between(self, start_frame: u64, end_frame: u64) -> f64 {
        let frames = end_frame as i128 - start_frame as i128;
        frames as f64 / self.0 as f64
    }
}

impl fmt::Display for FrameRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_boundaries() {
        assert_eq!(FrameRate::parse("1").unwrap().get(), 1);
        assert_eq!(FrameRate::parse("60").unwrap().get(), 60);
        assert_eq!(FrameRate::parse("30").unwrap().get(), 30);
        assert_eq!(FrameRate::parse("030").unwrap().get(), 30);
    }

    #[test]
    fn test_invalid_input() {
        for text in ["0", "61", "abc", "", "29.97", "-30", " 30", "30 ", "99999999999999999999999"] {
            let err = FrameRate::parse(text).unwrap_err();
            assert!(matches!(err, RetimeError::InvalidFrameRate(_)), "{:?} accepted", text);
            assert_eq!(err.exit_code(), 3);
        }
    }

    #[test]
    fn test_frame_quantization() {
        let fps = FrameRate::parse("30").unwrap();
        assert_eq!(fps.frame_of(10.0), Some(300));
        assert_eq!(fps.frame_of(15.5), Some(465));
        // floored, never rounded up
        assert_eq!(fps.frame_of(0.05), Some(1));
        assert_eq!(fps.frame_of(0.0), Some(0));
    }

    #[test]
    fn test_frame_of_out_of_range() {
        let fps = FrameRate::parse("30").unwrap();
        assert_eq!(fps.frame_of(400000000000000000000.0), None);
        assert_eq!(fps.frame_of(f64::INFINITY), None);
        assert_eq!(fps.frame_of(f64::NAN), None);
        // past i64::MAX but still a valid frame count
        assert_eq!(fps.frame_of(400000000000000000.0), Some(12_000_000_000_000_000_000));
    }

    #[test]
    fn test_duration_between_large_frames() {
        let fps = FrameRate::parse("30").unwrap();
        let end = u64::MAX - 29;
        assert!(fps.duration_between(0, end) > 0.0);
        assert!(fps.duration_between(end, 0) < 0.0);
        assert_eq!(fps.duration_between(end - 30, end), 1.0);
    }

    #[test]
    fn test_digits_regex_is_shared() {
        assert!(std::ptr::eq(digits_regex(), digits_regex()));
    }

    #[test]
    fn test_duration_between() {
        let fps = FrameRate::parse("30").unwrap();
        assert_eq!(fps.duration_between(300, 465), 5.5);
        assert_eq!(fps.duration_between(465, 300), -5.5);
        assert_eq!(fps.duration_between(42, 42), 0.0);
    }
}
