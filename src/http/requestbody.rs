//! Request body for POST/PUT/PATCH operations.

use crate::base::neterror::NetError;
use bytes::Bytes;
use serde::Serialize;
use serde_json::Value;
use std::str::FromStr;

/// How a request body was encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    /// Serialized with `serde_json`.
    Json,
    /// Raw bytes, sent unchanged.
    Buffer,
    /// `application/x-www-form-urlencoded` key/value pairs.
    Form,
}

impl BodyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BodyKind::Json => "json",
            BodyKind::Buffer => "buffer",
            BodyKind::Form => "form",
        }
    }

    /// Default `content-type` for this encoding.
    pub fn content_type(&self) -> &'static str {
        match self {
            BodyKind::Json => "application/json",
            BodyKind::Buffer => "application/octet-stream",
            BodyKind::Form => "application/x-www-form-urlencoded",
        }
    }

    /// Encode `data` according to this kind.
    pub fn encode<T: Serialize + ?Sized>(&self, data: &T) -> Result<Bytes, NetError> {
        match self {
            BodyKind::Json => serde_json::to_vec(data)
                .map(Bytes::from)
                .map_err(|e| NetError::BodyEncoding(e.to_string())),
            BodyKind::Buffer => {
                let value =
                    serde_json::to_value(data).map_err(|e| NetError::BodyEncoding(e.to_string()))?;
                buffer_from_value(value)
            }
            BodyKind::Form => serde_urlencoded::to_string(data)
                .map(Bytes::from)
                .map_err(|e| NetError::BodyEncoding(e.to_string())),
        }
    }
}

impl FromStr for BodyKind {
    type Err = NetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "json" => Ok(BodyKind::Json),
            "buffer" => Ok(BodyKind::Buffer),
            "form" => Ok(BodyKind::Form),
            other => Err(NetError::UnsupportedBodyType(other.to_string())),
        }
    }
}

/// A buffer body is either text or a sequence of byte values.
fn buffer_from_value(value: Value) -> Result<Bytes, NetError> {
    match value {
        Value::String(s) => Ok(Bytes::from(s)),
        Value::Array(items) => items
            .iter()
            .map(|item| {
                item.as_u64()
                    .and_then(|n| u8::try_from(n).ok())
                    .ok_or(NetError::TypeMismatch {
                        field: "buffer body",
                        expected: "bytes in 0..=255",
                        found: json_type_name(item),
                    })
            })
            .collect::<Result<Vec<u8>, _>>()
            .map(Bytes::from),
        other => Err(NetError::TypeMismatch {
            field: "buffer body",
            expected: "a string or byte array",
            found: json_type_name(&other),
        }),
    }
}

/// Name of a JSON value's type, for error messages.
pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Request body for HTTP methods that send data.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RequestBody {
    /// No body (GET, HEAD, DELETE).
    #[default]
    Empty,
    /// Body already encoded according to `kind`.
    Encoded { kind: BodyKind, bytes: Bytes },
}

impl RequestBody {
    /// Encode `data` as a body of the given kind.
    pub fn encode<T: Serialize + ?Sized>(data: &T, kind: BodyKind) -> Result<Self, NetError> {
        Ok(RequestBody::Encoded {
            kind,
            bytes: kind.encode(data)?,
        })
    }

    /// Check if the body is empty.
    pub fn is_empty(&self) -> bool {
        matches!(self, RequestBody::Empty)
    }

    /// Get the length of the body in bytes.
    pub fn len(&self) -> usize {
        match self {
            RequestBody::Empty => 0,
            RequestBody::Encoded { bytes, .. } => bytes.len(),
        }
    }

    pub fn kind(&self) -> Option<BodyKind> {
        match self {
            RequestBody::Empty => None,
            RequestBody::Encoded { kind, .. } => Some(*kind),
        }
    }

    /// Encoded bytes, empty for [`RequestBody::Empty`].
    pub fn as_bytes(&self) -> Bytes {
        match self {
            RequestBody::Empty => Bytes::new(),
            RequestBody::Encoded { bytes, .. } => bytes.clone(),
        }
    }

    /// Convert into a sized hyper body.
    pub fn into_full(self) -> http_body_util::Full<Bytes> {
        http_body_util::Full::new(self.as_bytes())
    }
}
