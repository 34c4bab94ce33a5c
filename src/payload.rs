use std::io::{Read, Write};

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use flate2::Compression;
use flate2::read::DeflateDecoder;
use flate2::write::DeflateEncoder;

use crate::error::Result;

/// Raw deflate (no zlib header), then standard padded base64.
pub fn encode(markup: &str) -> Result<String> {
    let mut encoder = DeflateEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(markup.as_bytes())?;
    let compressed = encoder.finish()?;
    Ok(BASE64_STANDARD.encode(compressed))
}

pub fn decode(payload: &str) -> Result<String> {
    let compressed = BASE64_STANDARD.decode(payload.trim())?;
    let mut inflated = Vec::new();
    DeflateDecoder::new(compressed.as_slice()).read_to_end(&mut inflated)?;
    Ok(String::from_utf8(inflated)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use pretty_assertions::assert_eq;

    #[test]
    fn decode_reverses_encode() {
        let markup = "<mxfile><diagram /></mxfile>";
        let payload = encode(markup).unwrap();
        assert_eq!(decode(&payload).unwrap(), markup);
    }

    #[test]
    fn encode_has_no_zlib_header() {
        let payload = encode("<mxfile />").unwrap();
        let bytes = BASE64_STANDARD.decode(payload).unwrap();
        // A zlib stream would open with 0x78.
        assert_ne!(bytes[0], 0x78);
    }

    #[test]
    fn decode_ignores_surrounding_whitespace() {
        let payload = format!("  {}\n", encode("abc").unwrap());
        assert_eq!(decode(&payload).unwrap(), "abc");
    }

    #[test]
    fn decode_rejects_bad_base64() {
        assert!(matches!(decode("not base64!"), Err(Error::Base64(_))));
    }
}
