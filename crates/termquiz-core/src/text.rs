//! Character/code point conversions.

use crate::error::SeqError;

/// Code point of a single-character string.
pub fn ord(s: &str) -> Result<u32, SeqError> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c as u32),
        _ => Err(SeqError::argument(
            "ord",
            "argument needs to be a string of length 1",
        )),
    }
}

/// Character for a code point.
pub fn chr(code: u32) -> Result<char, SeqError> {
    char::from_u32(code)
        .ok_or_else(|| SeqError::argument("chr", format!("invalid code point {code:#x}")))
}
