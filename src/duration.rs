use log::warn;

/// Longest time string the leaderboard accepts
pub const MAX_FORMATTED_LEN: usize = 14;

/// Convert a duration in seconds to a `[H:][MM:]SS.mmm` string.
///
/// Leading zero hours and minutes are left out rather than padded, so 5.5s
/// is `5.500` and 65s is `1:05.000`. Milliseconds are rounded to the nearest
/// millisecond and then reduced modulo 1000. Negative durations keep their
/// sign in front of the formatted magnitude.
pub fn format_duration(seconds: f64) -> String {
    let negative = seconds < 0.0;
    let seconds = seconds.abs();

    let hours = (seconds / 3600.0) as u64;
    let minutes = ((seconds % 3600.0) / 60.0) as u64;
    let secs = (seconds % 60.0) as u64;
    let milliseconds = (seconds * 1000.0).round() as u64 % 1000;

    let time = if hours == 0 {
        if minutes == 0 {
            format!("{}.{:03}", secs, milliseconds)
        } else {
            format!("{}:{:02}.{:03}", minutes, secs, milliseconds)
        }
    } else {
        format!("{}:{:02}:{:02}.{:03}", hours, minutes, secs, milliseconds)
    };

    let mut formatted = if negative { format!("-{}", time) } else { time };

    if formatted.len() > MAX_FORMATTED_LEN {
        warn!(
            "formatted time {} exceeds {} characters and was cut short",
            formatted, MAX_FORMATTED_LEN
        );
        formatted.truncate(MAX_FORMATTED_LEN);
    }

    formatted
}
