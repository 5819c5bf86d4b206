//! HTTP Response with buffered body access.

use crate::base::neterror::NetError;
use bytes::{Bytes, BytesMut};
use http::{HeaderMap, StatusCode, Version};
use serde::de::DeserializeOwned;

/// Default cap on accumulated response body bytes (32 MiB).
pub const DEFAULT_MAX_BODY_SIZE: usize = 32 * 1024 * 1024;

/// HTTP Response with an accumulated body.
///
/// Status, version and headers are fixed when the response head arrives;
/// chunks are appended in arrival order while the body streams in. Once the
/// dispatch resolves the caller only gets read access.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    status: StatusCode,
    version: Version,
    headers: HeaderMap,
    chunks: Vec<Bytes>,
    len: usize,
    max_body_size: Option<usize>,
}

impl HttpResponse {
    /// Create an empty accumulator from a response head.
    pub fn new(parts: http::response::Parts, max_body_size: Option<usize>) -> Self {
        Self {
            status: parts.status,
            version: parts.version,
            headers: parts.headers,
            chunks: Vec::new(),
            len: 0,
            max_body_size,
        }
    }

    /// Append a chunk of (already decoded) body bytes.
    ///
    /// Fails once the total exceeds the configured cap; the caller must then
    /// abandon the response.
    pub fn add(&mut self, chunk: Bytes) -> Result<(), NetError> {
        if chunk.is_empty() {
            return Ok(());
        }
        let len = self.len + chunk.len();
        if let Some(limit) = self.max_body_size {
            if len > limit {
                return Err(NetError::ResponseBodyTooBig { limit });
            }
        }
        self.len = len;
        self.chunks.push(chunk);
        Ok(())
    }

    /// Get the status code.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Get the HTTP version.
    pub fn version(&self) -> Version {
        self.version
    }

    /// Get a reference to the headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Total body length in bytes.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The body chunks, in arrival order.
    pub fn raw(&self) -> &[Bytes] {
        &self.chunks
    }

    /// The whole body as one contiguous buffer.
    pub fn bytes(&self) -> Bytes {
        match self.chunks.as_slice() {
            [] => Bytes::new(),
            [single] => single.clone(),
            chunks => {
                let mut buf = BytesMut::with_capacity(self.len);
                for chunk in chunks {
                    buf.extend_from_slice(chunk);
                }
                buf.freeze()
            }
        }
    }

    /// The whole body decoded as UTF-8.
    ///
    /// Chunks are joined before decoding, so multi-byte characters split
    /// across chunk boundaries survive. Invalid sequences become U+FFFD.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.bytes()).into_owned()
    }

    /// Parse the body as JSON.
    pub fn json(&self) -> Result<serde_json::Value, NetError> {
        self.json_as()
    }

    /// Parse the body as JSON into `T`.
    pub fn json_as<T: DeserializeOwned>(&self) -> Result<T, NetError> {
        serde_json::from_slice(&self.bytes()).map_err(|e| NetError::Parse(e.to_string()))
    }
}
