//! Character-set detection for delimited text files.
//!
//! Exports from legacy spreadsheet tooling are rarely UTF-8. Decoding runs
//! in three steps: take valid UTF-8 as-is, otherwise detect a charset from
//! the header line, and if that detection fails to decode the whole file,
//! retry with the configured fallback encoding.

use std::fs;
use std::path::Path;

use chardetng::EncodingDetector;
use encoding_rs::{Encoding, UTF_8};

use crate::error::Error;

/// A file decoded to UTF-8, along with the encoding that produced it.
#[derive(Debug)]
pub struct DecodedText {
    pub text: String,
    pub encoding: &'static Encoding,
    pub used_fallback: bool,
}

/// Read `path` and decode its contents to UTF-8.
pub fn read_to_string_with_fallback(
    path: &Path,
    fallback: &'static Encoding,
) -> Result<DecodedText, Error> {
    let bytes = fs::read(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let bytes = match String::from_utf8(bytes) {
        Ok(mut text) => {
            // A UTF-8 BOM survives validation; drop it so the first
            // header name starts clean.
            if text.starts_with('\u{feff}') {
                text.remove(0);
            }
            log::debug!("{}: valid UTF-8", path.display());
            return Ok(DecodedText {
                text,
                encoding: UTF_8,
                used_fallback: false,
            });
        }
        Err(err) => err.into_bytes(),
    };

    let guessed = guess_from_first_line(&bytes);
    decode_with_fallback(path, &bytes, guessed, fallback)
}

/// Guess the encoding from the header line only. The first line of a
/// delimited file is representative of the rest and keeps detection cheap
/// on large snapshots.
fn guess_from_first_line(bytes: &[u8]) -> &'static Encoding {
    let first_line = bytes.split(|&b| b == b'\n').next().unwrap_or(bytes);
    let mut detector = EncodingDetector::new();
    detector.feed(first_line, true);
    detector.guess(None, true)
}

/// Decode with the guessed encoding, retrying with the fallback when it
/// leaves malformed sequences. A byte-order mark in the input overrides
/// the guess entirely.
fn decode_with_fallback(
    path: &Path,
    bytes: &[u8],
    guessed: &'static Encoding,
    fallback: &'static Encoding,
) -> Result<DecodedText, Error> {
    let (text, encoding, had_errors) = guessed.decode(bytes);
    if !had_errors {
        log::debug!("{}: decoded as {}", path.display(), encoding.name());
        return Ok(DecodedText {
            text: text.into_owned(),
            encoding,
            used_fallback: false,
        });
    }

    log::debug!(
        "{}: {} left malformed sequences, retrying as {}",
        path.display(),
        guessed.name(),
        fallback.name()
    );
    let (text, encoding, had_errors) = fallback.decode(bytes);
    if had_errors {
        return Err(Error::Decode {
            path: path.to_path_buf(),
            encoding: fallback.name().to_string(),
        });
    }

    Ok(DecodedText {
        text: text.into_owned(),
        encoding,
        used_fallback: true,
    })
}
