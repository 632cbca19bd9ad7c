//! # Large-Object Wrappers
//!
//! [`BlobValue`] and [`ClobValue`] are lightweight stand-ins for streamed
//! large objects: each wraps either already-materialized data or a
//! caller-supplied reader plus a declared length. Construction performs no
//! I/O; a wrapped stream is consumed when the wrapper is normalized
//! ([`BlobValue::into_bytes`], [`ClobValue::into_string`]) or when the
//! caller reads a returned stream.
//!
//! ## Declared Lengths and Encodings
//!
//! A stream-backed blob is exactly `declared_len` bytes; a shorter stream
//! is an error at normalization. A stream-backed clob is `declared_len`
//! characters in its declared encoding:
//!
//! - US-ASCII: one byte per character; any byte above 0x7f fails with the
//!   encoding error kind (no fallback to another encoding)
//! - UTF-8: the stream is decoded and truncated to the declared number of
//!   characters; an invalid sequence fails with the encoding error kind
//!
//! Ownership transfers to the caller on read and to the update primitive on
//! write; the wrappers carry no other lifecycle.

use crate::error::AccessError;
use eyre::{bail, ensure, Result};
use std::fmt;
use std::io::{Cursor, Read};

#[derive(Clone, Copy, PartialEq, Eq)]
enum TextEncoding {
    Utf8,
    Ascii,
}

impl TextEncoding {
    fn name(self) -> &'static str {
        match self {
            TextEncoding::Utf8 => "UTF-8",
            TextEncoding::Ascii => "US-ASCII",
        }
    }
}

enum BlobBody {
    Bytes(Vec<u8>),
    Stream {
        reader: Box<dyn Read>,
        declared_len: u64,
    },
}

/// In-memory binary large-object value.
pub struct BlobValue {
    body: BlobBody,
}

impl BlobValue {
    /// Wraps already-materialized bytes.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self {
            body: BlobBody::Bytes(bytes),
        }
    }

    /// Wraps a caller-supplied stream of exactly `declared_len` bytes.
    /// The stream is not read until the wrapper is normalized.
    pub fn from_stream(reader: impl Read + 'static, declared_len: u64) -> Self {
        Self {
            body: BlobBody::Stream {
                reader: Box::new(reader),
                declared_len,
            },
        }
    }

    /// Length in bytes: actual for materialized data, declared for streams.
    pub fn declared_len(&self) -> u64 {
        match &self.body {
            BlobBody::Bytes(b) => b.len() as u64,
            BlobBody::Stream { declared_len, .. } => *declared_len,
        }
    }

    /// One-shot stream over the wrapped bytes.
    pub fn binary_stream(self) -> Box<dyn Read> {
        match self.body {
            BlobBody::Bytes(b) => Box::new(Cursor::new(b)),
            BlobBody::Stream {
                reader,
                declared_len,
            } => Box::new(reader.take(declared_len)),
        }
    }

    /// Materializes the wrapped data, consuming a backing stream.
    pub fn into_bytes(self) -> Result<Vec<u8>> {
        match self.body {
            BlobBody::Bytes(b) => Ok(b),
            BlobBody::Stream {
                reader,
                declared_len,
            } => {
                let mut buf = Vec::new();
                reader.take(declared_len).read_to_end(&mut buf)?;
                ensure!(
                    buf.len() as u64 == declared_len,
                    "binary stream ended after {} of {} declared bytes",
                    buf.len(),
                    declared_len
                );
                Ok(buf)
            }
        }
    }
}

impl fmt::Debug for BlobValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.body {
            BlobBody::Bytes(b) => write!(f, "BlobValue({} bytes)", b.len()),
            BlobBody::Stream { declared_len, .. } => {
                write!(f, "BlobValue(stream, {} declared bytes)", declared_len)
            }
        }
    }
}

enum ClobBody {
    Text(String),
    Stream {
        reader: Box<dyn Read>,
        declared_len: u64,
        encoding: TextEncoding,
    },
}

/// In-memory character large-object value.
pub struct ClobValue {
    body: ClobBody,
}

impl ClobValue {
    /// Wraps an already-materialized string.
    pub fn from_string(text: impl Into<String>) -> Self {
        Self {
            body: ClobBody::Text(text.into()),
        }
    }

    /// Wraps a UTF-8 stream of `declared_len` characters.
    pub fn from_reader(reader: impl Read + 'static, declared_len: u64) -> Self {
        Self {
            body: ClobBody::Stream {
                reader: Box::new(reader),
                declared_len,
                encoding: TextEncoding::Utf8,
            },
        }
    }

    /// Wraps a US-ASCII stream of `declared_len` characters (one byte
    /// each). Bytes above 0x7f fail at normalization with the encoding
    /// error kind.
    pub fn from_ascii_stream(reader: impl Read + 'static, declared_len: u64) -> Self {
        Self {
            body: ClobBody::Stream {
                reader: Box::new(reader),
                declared_len,
                encoding: TextEncoding::Ascii,
            },
        }
    }

    /// Length in characters: actual for materialized text, declared for
    /// streams.
    pub fn declared_len(&self) -> u64 {
        match &self.body {
            ClobBody::Text(s) => s.chars().count() as u64,
            ClobBody::Stream { declared_len, .. } => *declared_len,
        }
    }

    /// One-shot stream over the UTF-8 bytes of the wrapped text.
    pub fn character_stream(self) -> Result<Box<dyn Read>> {
        let text = self.into_string()?;
        Ok(Box::new(Cursor::new(text.into_bytes())))
    }

    /// One-shot stream over the text as US-ASCII bytes. Fails with the
    /// encoding error kind if any character is outside US-ASCII.
    pub fn ascii_stream(self) -> Result<Box<dyn Read>> {
        let text = self.into_string()?;
        if let Some(pos) = text.bytes().position(|b| b > 0x7f) {
            bail!(AccessError::encoding(
                TextEncoding::Ascii.name(),
                text.as_bytes()[pos],
                pos as u64
            ));
        }
        Ok(Box::new(Cursor::new(text.into_bytes())))
    }

    /// Materializes the wrapped text, consuming and decoding a backing
    /// stream in its declared encoding.
    pub fn into_string(self) -> Result<String> {
        match self.body {
            ClobBody::Text(s) => Ok(s),
            ClobBody::Stream {
                reader,
                declared_len,
                encoding: TextEncoding::Ascii,
            } => {
                let mut buf = Vec::new();
                reader.take(declared_len).read_to_end(&mut buf)?;
                ensure!(
                    buf.len() as u64 == declared_len,
                    "character stream ended after {} of {} declared characters",
                    buf.len(),
                    declared_len
                );
                if let Some(pos) = buf.iter().position(|b| *b > 0x7f) {
                    bail!(AccessError::encoding(
                        TextEncoding::Ascii.name(),
                        buf[pos],
                        pos as u64
                    ));
                }
                Ok(String::from_utf8(buf)?)
            }
            ClobBody::Stream {
                mut reader,
                declared_len,
                encoding: TextEncoding::Utf8,
            } => {
                let mut buf = Vec::new();
                reader.read_to_end(&mut buf)?;
                let text = match std::str::from_utf8(&buf) {
                    Ok(s) => s,
                    Err(e) => {
                        let pos = e.valid_up_to();
                        bail!(AccessError::encoding(
                            TextEncoding::Utf8.name(),
                            buf[pos],
                            pos as u64
                        ));
                    }
                };
                let mut end = text.len();
                let mut chars = 0u64;
                for (i, _) in text.char_indices() {
                    if chars == declared_len {
                        end = i;
                        break;
                    }
                    chars += 1;
                }
                if chars < declared_len {
                    bail!(
                        "character stream ended after {} of {} declared characters",
                        chars,
                        declared_len
                    );
                }
                Ok(text[..end].to_string())
            }
        }
    }
}

impl fmt::Debug for ClobValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.body {
            ClobBody::Text(s) => write!(f, "ClobValue({} chars)", s.chars().count()),
            ClobBody::Stream {
                declared_len,
                encoding,
                ..
            } => write!(
                f,
                "ClobValue(stream, {} declared {} chars)",
                declared_len,
                encoding.name()
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blob_stream_reproduces_bytes() {
        let blob = BlobValue::from_bytes(vec![1, 2, 3, 4]);
        let mut out = Vec::new();
        blob.binary_stream().read_to_end(&mut out).unwrap();
        assert_eq!(out, vec![1, 2, 3, 4]);
    }

    #[test]
    fn stream_backed_blob_honors_declared_length() {
        let blob = BlobValue::from_stream(Cursor::new(b"abcdef".to_vec()), 4);
        assert_eq!(blob.declared_len(), 4);
        assert_eq!(blob.into_bytes().unwrap(), b"abcd".to_vec());
    }

    #[test]
    fn short_blob_stream_is_an_error() {
        let blob = BlobValue::from_stream(Cursor::new(b"ab".to_vec()), 5);
        let err = blob.into_bytes().unwrap_err();
        assert!(err.to_string().contains("2 of 5"));
    }

    #[test]
    fn clob_round_trips_text() {
        let clob = ClobValue::from_string("héllo");
        let mut out = String::new();
        clob.character_stream()
            .unwrap()
            .read_to_string(&mut out)
            .unwrap();
        assert_eq!(out, "héllo");
    }

    #[test]
    fn ascii_stream_takes_declared_prefix() {
        let clob = ClobValue::from_ascii_stream(Cursor::new(b"hello world".to_vec()), 5);
        assert_eq!(clob.into_string().unwrap(), "hello");
    }

    #[test]
    fn non_ascii_byte_fails_with_encoding_kind() {
        let clob = ClobValue::from_ascii_stream(Cursor::new(vec![b'h', 0xc3, b'i']), 3);
        let err = clob.into_string().unwrap_err();
        match err.downcast_ref::<AccessError>() {
            Some(AccessError::Encoding {
                encoding,
                byte,
                offset,
            }) => {
                assert_eq!(*encoding, "US-ASCII");
                assert_eq!(*byte, 0xc3);
                assert_eq!(*offset, 1);
            }
            other => panic!("expected encoding error, got {:?}", other),
        }
    }

    #[test]
    fn ascii_view_of_non_ascii_text_fails() {
        let err = ClobValue::from_string("héllo").ascii_stream().err().unwrap();
        assert!(matches!(
            err.downcast_ref::<AccessError>(),
            Some(AccessError::Encoding { .. })
        ));
    }

    #[test]
    fn utf8_stream_truncates_to_declared_chars() {
        let clob = ClobValue::from_reader(Cursor::new("héllo".as_bytes().to_vec()), 3);
        assert_eq!(clob.into_string().unwrap(), "hél");
    }

    #[test]
    fn short_utf8_stream_is_an_error() {
        let clob = ClobValue::from_reader(Cursor::new(b"hi".to_vec()), 5);
        let err = clob.into_string().unwrap_err();
        assert!(err.to_string().contains("2 of 5"));
    }

    #[test]
    fn invalid_utf8_fails_with_encoding_kind() {
        let clob = ClobValue::from_reader(Cursor::new(vec![b'a', 0xff, b'b']), 3);
        let err = clob.into_string().unwrap_err();
        match err.downcast_ref::<AccessError>() {
            Some(AccessError::Encoding { encoding, .. }) => assert_eq!(*encoding, "UTF-8"),
            other => panic!("expected encoding error, got {:?}", other),
        }
    }

    #[test]
    fn construction_does_not_touch_the_stream() {
        struct PanicReader;
        impl Read for PanicReader {
            fn read(&mut self, _: &mut [u8]) -> std::io::Result<usize> {
                panic!("stream read during construction");
            }
        }
        let blob = BlobValue::from_stream(PanicReader, 10);
        assert_eq!(blob.declared_len(), 10);
        let clob = ClobValue::from_ascii_stream(PanicReader, 10);
        assert_eq!(clob.declared_len(), 10);
    }
}
