//! Frozen description of one outbound request.

use crate::base::neterror::NetError;
use crate::http::method::Method;
use crate::http::orderedheaders::OrderedHeaderMap;
use crate::http::requestbody::RequestBody;
use crate::http::response::{HttpResponse, DEFAULT_MAX_BODY_SIZE};
use crate::socket::transport::TransportOptions;
use std::time::Duration;
use url::Url;

/// Everything needed to dispatch one request.
///
/// Produced by [`RequestBuilder::build`](crate::urlrequest::request::RequestBuilder::build).
/// A spec has no interior mutability; clone it to dispatch the same request
/// more than once or from several tasks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestSpec {
    pub(crate) url: Url,
    pub(crate) method: Method,
    pub(crate) headers: OrderedHeaderMap,
    pub(crate) body: RequestBody,
    pub(crate) timeout: Option<Duration>,
    pub(crate) decompress: bool,
    pub(crate) max_body_size: Option<usize>,
}

impl RequestSpec {
    pub(crate) fn new(url: Url, method: Method) -> Self {
        Self {
            url,
            method,
            headers: OrderedHeaderMap::new(),
            body: RequestBody::Empty,
            timeout: None,
            decompress: false,
            max_body_size: Some(DEFAULT_MAX_BODY_SIZE),
        }
    }

    /// The full target URL, including path and query.
    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn headers(&self) -> &OrderedHeaderMap {
        &self.headers
    }

    pub fn body(&self) -> &RequestBody {
        &self.body
    }

    /// Deadline for the whole dispatch, if any.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Whether the response must be decompressed.
    pub fn decompress(&self) -> bool {
        self.decompress
    }

    pub fn max_body_size(&self) -> Option<usize> {
        self.max_body_size
    }

    /// Connection-level options the transport receives.
    pub fn transport_options(&self) -> Result<TransportOptions, NetError> {
        TransportOptions::new(&self.url, self.method.clone(), self.headers.clone())
    }

    /// Dispatch with the default transports.
    pub async fn send(self) -> Result<HttpResponse, NetError> {
        crate::client::dispatch(self).await
    }
}
