//! Response content decoding.
//!
//! Maps a `content-encoding` header to an incremental decompressor. Compressed
//! bytes are pushed in as they arrive and decoded output is drained after every
//! chunk, so the compressed body is never buffered in full.

use crate::base::neterror::NetError;
use bytes::Bytes;
use flate2::write::{GzDecoder, ZlibDecoder};
use http::HeaderValue;
use std::io::Write;

/// Value sent in `accept-encoding` when decompression is requested.
pub const ACCEPT_ENCODING: &str = "deflate, gzip, br";

const BROTLI_BUFFER_SIZE: usize = 4096;

/// Compression formats the decoder understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentEncoding {
    /// zlib-wrapped deflate, as HTTP defines `deflate`.
    Deflate,
    Gzip,
    Brotli,
}

impl ContentEncoding {
    /// Look up the encoding declared by a `content-encoding` header.
    ///
    /// A missing header or an unmapped value is an error: the caller asked for
    /// decompression and it cannot be honored.
    pub fn from_header(value: Option<&HeaderValue>) -> Result<Self, NetError> {
        let raw = value
            .map(|v| String::from_utf8_lossy(v.as_bytes()).trim().to_string())
            .ok_or(NetError::UnsupportedEncoding(None))?;

        match raw.to_ascii_lowercase().as_str() {
            "deflate" => Ok(ContentEncoding::Deflate),
            "gzip" => Ok(ContentEncoding::Gzip),
            "br" => Ok(ContentEncoding::Brotli),
            _ => Err(NetError::UnsupportedEncoding(Some(raw))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ContentEncoding::Deflate => "deflate",
            ContentEncoding::Gzip => "gzip",
            ContentEncoding::Brotli => "br",
        }
    }
}

enum Codec {
    Deflate(ZlibDecoder<Vec<u8>>),
    Gzip(GzDecoder<Vec<u8>>),
    Brotli(Box<brotli::DecompressorWriter<Vec<u8>>>),
}

/// Streaming decompressor for one response body.
///
/// A body that never delivered a byte decodes to an empty body, so HEAD,
/// 204 and 304 responses that still declare an encoding pass through.
pub struct Decoder {
    codec: Codec,
    received: bool,
}

impl std::fmt::Debug for Decoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Decoder")
            .field("encoding", &self.encoding().as_str())
            .field("received", &self.received)
            .finish()
    }
}

impl Decoder {
    pub fn new(encoding: ContentEncoding) -> Self {
        let codec = match encoding {
            ContentEncoding::Deflate => Codec::Deflate(ZlibDecoder::new(Vec::new())),
            ContentEncoding::Gzip => Codec::Gzip(GzDecoder::new(Vec::new())),
            ContentEncoding::Brotli => Codec::Brotli(Box::new(brotli::DecompressorWriter::new(
                Vec::new(),
                BROTLI_BUFFER_SIZE,
            ))),
        };
        Self {
            codec,
            received: false,
        }
    }

    /// Build a decoder from the response's `content-encoding` header.
    pub fn for_header(value: Option<&HeaderValue>) -> Result<Self, NetError> {
        ContentEncoding::from_header(value).map(Decoder::new)
    }

    pub fn encoding(&self) -> ContentEncoding {
        match self.codec {
            Codec::Deflate(_) => ContentEncoding::Deflate,
            Codec::Gzip(_) => ContentEncoding::Gzip,
            Codec::Brotli(_) => ContentEncoding::Brotli,
        }
    }

    /// Feed one compressed chunk and return whatever output it produced.
    /// The returned chunk may be empty.
    pub fn decode(&mut self, chunk: &[u8]) -> Result<Bytes, NetError> {
        if chunk.is_empty() {
            return Ok(Bytes::new());
        }
        self.received = true;
        let output = match &mut self.codec {
            Codec::Deflate(d) => {
                write_and_flush(d, chunk)?;
                d.get_mut()
            }
            Codec::Gzip(d) => {
                write_and_flush(d, chunk)?;
                d.get_mut()
            }
            Codec::Brotli(d) => {
                write_and_flush(d.as_mut(), chunk)?;
                d.get_mut()
            }
        };
        Ok(Bytes::from(std::mem::take(output)))
    }

    /// Signal end of input, verify the stream is complete and return the
    /// remaining output.
    pub fn finish(self) -> Result<Bytes, NetError> {
        if !self.received {
            return Ok(Bytes::new());
        }
        let output = match self.codec {
            Codec::Deflate(d) => d.finish().map_err(decode_error)?,
            Codec::Gzip(d) => d.finish().map_err(decode_error)?,
            Codec::Brotli(mut d) => {
                d.close().map_err(decode_error)?;
                d.into_inner().map_err(|_| NetError::ContentDecodingFailed)?
            }
        };
        Ok(Bytes::from(output))
    }
}

fn write_and_flush<W: Write + ?Sized>(writer: &mut W, chunk: &[u8]) -> Result<(), NetError> {
    writer.write_all(chunk).map_err(decode_error)?;
    writer.flush().map_err(decode_error)
}

fn decode_error(err: std::io::Error) -> NetError {
    tracing::debug!(error = %err, "content decoding failed");
    NetError::ContentDecodingFailed
}
