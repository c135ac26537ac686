use crate::error::{Result, RetimeError};
use log::debug;
use regex::Regex;
use std::io::BufRead;
use std::sync::OnceLock;

/// Sentinel byte marking the end of a pasted debug info blob
pub const BLOB_TERMINATOR: u8 = b'}';

/// Label of the current media time field in the player's debug info
pub const CMT_LABEL: &str = "cmt";

fn cmt_value_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[0-9]+(\.[0-9]*)?$").expect("cmt value pattern is valid"))
}

/// Read one pasted blob (up to and including the closing brace) and return
/// the text of its `cmt` field.
///
/// Blocks until the terminator arrives. A stream that closes first yields
/// `TruncatedBlob`; the rest of the blob is treated as opaque text.
pub fn read_blob<R: BufRead>(reader: &mut R) -> Result<String> {
    let mut buf = Vec::new();
    reader.read_until(BLOB_TERMINATOR, &mut buf)?;

    if buf.last() != Some(&BLOB_TERMINATOR) {
        return Err(RetimeError::TruncatedBlob);
    }

    let text = String::from_utf8_lossy(&buf);
    let value = extract_cmt(&text)?;
    debug!("read {} bytes of debug info, cmt = {}", buf.len(), value);

    Ok(value.to_string())
}

/// Locate the `cmt` field in a blob and return its value text.
///
/// The blob is split on double quotes with empty pieces dropped, so
/// `"cmt":"10.000"` becomes `cmt`, `:`, `10.000`. The piece after the
/// separator is the value.
pub fn extract_cmt(text: &str) -> Result<&str> {
    let mut tokens = text.split('"').filter(|token| !token.is_empty());

    if !tokens.by_ref().any(|token| token == CMT_LABEL) {
        return Err(RetimeError::MalformedBlob(format!(
            "no \"{}\" field found",
            CMT_LABEL
        )));
    }

    let value = tokens
        .nth(1)
        .ok_or_else(|| RetimeError::MalformedBlob(format!("\"{}\" has no value", CMT_LABEL)))?;

    if !cmt_value_regex().is_match(value) {
        return Err(RetimeError::MalformedBlob(format!(
            "\"{}\" value is not a number: {}",
            CMT_LABEL, value
        )));
    }

    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const DEBUG_INFO: &str = r#"{"ns":"yt","el":"detailpage","cpn":"aBcDeFgHiJkLmNoP","ver":2,"cmt":"15.517","fs":"0","rt":"42.318","euri":"","lact":3,"cl":"512345678","mos":0,"state":"8","vm":"CAEQAQ","volume":100}"#;

    #[test]
    fn test_extract_cmt() {
        assert_eq!(extract_cmt(DEBUG_INFO).unwrap(), "15.517");
        assert_eq!(extract_cmt(r#"{"cmt":"3"}"#).unwrap(), "3");
    }

    #[test]
    fn test_extract_cmt_missing_field() {
        let err = extract_cmt(r#"{"ns":"yt","rt":"42.318"}"#).unwrap_err();
        assert!(matches!(err, RetimeError::MalformedBlob(_)));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_extract_cmt_missing_value() {
        let err = extract_cmt(r#"{"cmt"}"#).unwrap_err();
        assert!(matches!(err, RetimeError::MalformedBlob(_)));
    }

    #[test]
    fn test_extract_cmt_non_numeric_value() {
        let err = extract_cmt(r#"{"cmt":"-1.5"}"#).unwrap_err();
        assert!(matches!(err, RetimeError::MalformedBlob(_)));

        let err = extract_cmt(r#"{"cmt":"1e3"}"#).unwrap_err();
        assert!(matches!(err, RetimeError::MalformedBlob(_)));
    }

    #[test]
    fn test_read_blob_stops_at_brace() {
        let input = format!("{}\nleftover", DEBUG_INFO);
        let mut reader = Cursor::new(input.into_bytes());

        assert_eq!(read_blob(&mut reader).unwrap(), "15.517");

        let mut rest = String::new();
        reader.read_line(&mut rest).unwrap();
        assert_eq!(rest, "\n");
    }

    #[test]
    fn test_read_blob_ignores_surrounding_text() {
        let mut reader = Cursor::new(b"copied from stats: \"cmt\":\"10.000\", \"fs\":\"0\" }".to_vec());
        assert_eq!(read_blob(&mut reader).unwrap(), "10.000");
    }

    #[test]
    fn test_cmt_value_regex_is_shared() {
        assert!(std::ptr::eq(cmt_value_regex(), cmt_value_regex()));
        assert!(cmt_value_regex().is_match("12.5"));
        assert!(cmt_value_regex().is_match("7."));
        assert!(!cmt_value_regex().is_match(".5"));
    }

    #[test]
    fn test_read_blob_truncated() {
        let mut reader = Cursor::new(b"{\"cmt\":\"10.000\"".to_vec());
        assert!(matches!(read_blob(&mut reader), Err(RetimeError::TruncatedBlob)));
    }
}
