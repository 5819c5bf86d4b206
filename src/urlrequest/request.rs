//! Fluent request configuration.
//!
//! Every method consumes the builder and returns the next one, so a builder is
//! a plain value: clone it to branch a configuration, or call
//! [`build`](RequestBuilder::build) to freeze it into a [`RequestSpec`].
//!
//! ```rust,ignore
//! use reqwu::RequestBuilder;
//! use serde_json::json;
//!
//! let resp = RequestBuilder::new("https://httpbin.org/post", "post")?
//!     .body(&json!({"key": "value"}), "json")?
//!     .header("user-agent", "reqwu")?
//!     .send()
//!     .await?;
//! println!("{} {}", resp.status(), resp.json()?);
//! ```

use crate::base::neterror::NetError;
use crate::http::decoder::ACCEPT_ENCODING;
use crate::http::method::Method;
use crate::http::requestbody::{json_type_name, BodyKind, RequestBody};
use crate::http::response::HttpResponse;
use crate::urlrequest::spec::RequestSpec;
use bytes::Bytes;
use http::header::{HeaderValue, CONTENT_TYPE};
use serde::Serialize;
use serde_json::Value;
use std::fmt::Display;
use std::time::Duration;
use url::Url;

/// Builder for a single request.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    spec: RequestSpec,
}

impl RequestBuilder {
    /// Start a request. `method` is case-insensitive and must be one of
    /// [`ACCEPTED_METHODS`](crate::http::method::ACCEPTED_METHODS).
    pub fn new(url: &str, method: &str) -> Result<Self, NetError> {
        let url = Url::parse(url).map_err(|_| NetError::InvalidUrl)?;
        if !url.has_host() {
            return Err(NetError::InvalidUrl);
        }
        let method = Method::parse(method)?;
        Ok(Self {
            spec: RequestSpec::new(url, method),
        })
    }

    /// Start a request with an initial set of headers.
    pub fn with_headers<I, K, V>(url: &str, method: &str, headers: I) -> Result<Self, NetError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        Self::new(url, method)?.headers(headers)
    }

    /// Start building a GET request.
    pub fn get(url: &str) -> Result<Self, NetError> {
        Self::new(url, "GET")
    }

    /// Start building a POST request.
    pub fn post(url: &str) -> Result<Self, NetError> {
        Self::new(url, "POST")
    }

    /// Start building a PUT request.
    pub fn put(url: &str) -> Result<Self, NetError> {
        Self::new(url, "PUT")
    }

    /// Start building a PATCH request.
    pub fn patch(url: &str) -> Result<Self, NetError> {
        Self::new(url, "PATCH")
    }

    /// Start building a DELETE request.
    pub fn delete(url: &str) -> Result<Self, NetError> {
        Self::new(url, "DELETE")
    }

    /// Start building a HEAD request.
    pub fn head(url: &str) -> Result<Self, NetError> {
        Self::new(url, "HEAD")
    }

    /// The target URL as configured so far.
    pub fn url(&self) -> &Url {
        &self.spec.url
    }

    /// Replace the URL path.
    pub fn path(mut self, name: &str) -> Self {
        self.spec.url.set_path(name);
        self
    }

    /// Set the URL port. `value` must be a number in `0..=65535`.
    pub fn port<V: Into<Value>>(mut self, value: V) -> Result<Self, NetError> {
        let value = value.into();
        let number = expect_number("port", &value)?;
        let port = number
            .as_u64()
            .and_then(|n| u16::try_from(n).ok())
            .ok_or_else(|| NetError::InvalidPort(number.to_string()))?;
        self.spec
            .url
            .set_port(Some(port))
            .map_err(|_| NetError::InvalidUrl)?;
        Ok(self)
    }

    /// Set the body, encoded as `kind` (`"json"`, `"buffer"` or `"form"`).
    ///
    /// The kind is checked before `data` is looked at. A `content-type`
    /// matching the kind is added unless one is already set.
    pub fn body<T: Serialize + ?Sized>(self, data: &T, kind: &str) -> Result<Self, NetError> {
        let kind: BodyKind = kind.parse()?;
        let body = RequestBody::encode(data, kind)?;
        Ok(self.with_body(body))
    }

    /// Set a JSON body.
    pub fn json<T: Serialize + ?Sized>(self, data: &T) -> Result<Self, NetError> {
        let body = RequestBody::encode(data, BodyKind::Json)?;
        Ok(self.with_body(body))
    }

    /// Set a raw byte body.
    pub fn bytes<B: Into<Bytes>>(self, data: B) -> Self {
        self.with_body(RequestBody::Encoded {
            kind: BodyKind::Buffer,
            bytes: data.into(),
        })
    }

    /// Set a URL-encoded form body from a flat key/value structure.
    pub fn form<T: Serialize + ?Sized>(self, data: &T) -> Result<Self, NetError> {
        let body = RequestBody::encode(data, BodyKind::Form)?;
        Ok(self.with_body(body))
    }

    fn with_body(mut self, body: RequestBody) -> Self {
        if let Some(kind) = body.kind() {
            self.spec
                .headers
                .set_if_absent(CONTENT_TYPE, HeaderValue::from_static(kind.content_type()));
        }
        self.spec.body = body;
        self
    }

    /// Append one query pair. Existing pairs with the same name are kept.
    pub fn query<V: Display>(mut self, name: &str, value: V) -> Self {
        self.spec
            .url
            .query_pairs_mut()
            .append_pair(name, &value.to_string());
        self
    }

    /// Append every pair from `pairs`, in iteration order.
    pub fn query_pairs<I, K, V>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Display,
    {
        {
            let mut serializer = self.spec.url.query_pairs_mut();
            for (name, value) in pairs {
                serializer.append_pair(name.as_ref(), &value.to_string());
            }
        }
        self
    }

    /// Set one header. The name is stored lower case and replaces any
    /// earlier value for it.
    pub fn header(mut self, name: &str, value: &str) -> Result<Self, NetError> {
        self.spec.headers.insert(name, value)?;
        Ok(self)
    }

    /// Set every header from `headers`, as [`header`](Self::header) does.
    pub fn headers<I, K, V>(mut self, headers: I) -> Result<Self, NetError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        for (name, value) in headers {
            self.spec.headers.insert(name.as_ref(), value.as_ref())?;
        }
        Ok(self)
    }

    /// Ask for a compressed response and decompress it on arrival.
    ///
    /// Sets `accept-encoding: deflate, gzip, br` unless the header is
    /// already present.
    pub fn compress(mut self) -> Self {
        self.spec.decompress = true;
        self.spec.headers.set_if_absent(
            http::header::ACCEPT_ENCODING,
            HeaderValue::from_static(ACCEPT_ENCODING),
        );
        self
    }

    /// Bound the whole dispatch to `value` milliseconds.
    pub fn timeout<V: Into<Value>>(mut self, value: V) -> Result<Self, NetError> {
        let value = value.into();
        let number = expect_number("timeout", &value)?;
        let timeout = match number.as_u64() {
            Some(0) => return Err(NetError::InvalidTimeout),
            Some(ms) => Duration::from_millis(ms),
            None => match number.as_f64() {
                Some(ms) if ms.is_finite() && ms > 0.0 => {
                    Duration::from_nanos((ms * 1_000_000.0).round() as u64)
                }
                _ => return Err(NetError::InvalidTimeout),
            },
        };
        self.spec.timeout = Some(timeout);
        Ok(self)
    }

    /// Cap the accumulated response body; `None` removes the cap.
    pub fn max_body_size(mut self, limit: Option<usize>) -> Self {
        self.spec.max_body_size = limit;
        self
    }

    /// Freeze the configuration.
    pub fn build(self) -> RequestSpec {
        self.spec
    }

    /// Build and dispatch with the default transports.
    pub async fn send(self) -> Result<HttpResponse, NetError> {
        self.build().send().await
    }
}

fn expect_number<'a>(
    field: &'static str,
    value: &'a Value,
) -> Result<&'a serde_json::Number, NetError> {
    match value {
        Value::Number(n) => Ok(n),
        other => Err(NetError::TypeMismatch {
            field,
            expected: "a number",
            found: json_type_name(other),
        }),
    }
}
