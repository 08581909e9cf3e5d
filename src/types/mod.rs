//! Common types for arena-backed hashing

use std::borrow::Cow;

use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine as _;

use crate::error::{Error, Result};

mod digest;
pub use digest::Digest;

/// Text encodings accepted by [`crate::Sha384::update_text`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEncoding {
    /// Feed the UTF-8 bytes of the string through unchanged
    Utf8,
    /// Decode the string as hexadecimal, two characters per byte
    Hex,
    /// Decode the string as standard padded base64
    Base64,
}

impl InputEncoding {
    /// Decode `text` into raw bytes under this encoding
    pub fn decode<'a>(self, text: &'a str) -> Result<Cow<'a, [u8]>> {
        match self {
            InputEncoding::Utf8 => Ok(Cow::Borrowed(text.as_bytes())),
            InputEncoding::Hex => hex::decode(text)
                .map(Cow::Owned)
                .map_err(|_| Error::input("text", "invalid hexadecimal string")),
            InputEncoding::Base64 => BASE64_STANDARD
                .decode(text)
                .map(Cow::Owned)
                .map_err(|_| Error::input("text", "invalid base64 string")),
        }
    }
}
