//! Transport seam between the dispatcher and the network.
//!
//! A [`Transport`] turns [`TransportOptions`] into a connected byte stream.
//! The dispatcher picks the plain or encrypted implementation by URL scheme.

use crate::base::neterror::NetError;
use crate::http::method::Method;
use crate::http::orderedheaders::OrderedHeaderMap;
use crate::socket::stream::BoxedSocket;
use futures::future::BoxFuture;
use url::Url;

/// Connection-level description of one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportOptions {
    /// URL scheme, e.g. `"https"`.
    pub protocol: String,
    pub host: String,
    /// Explicit port, or the scheme's default.
    pub port: u16,
    /// Path plus query string, the HTTP/1.1 request target.
    pub path: String,
    pub method: Method,
    pub headers: OrderedHeaderMap,
}

impl TransportOptions {
    pub fn new(url: &Url, method: Method, headers: OrderedHeaderMap) -> Result<Self, NetError> {
        let host = url.host_str().ok_or(NetError::InvalidUrl)?;
        let port = url
            .port_or_known_default()
            .ok_or_else(|| NetError::UnknownUrlScheme(url.scheme().to_string()))?;

        let mut path = url.path().to_string();
        if let Some(query) = url.query() {
            path.push('?');
            path.push_str(query);
        }

        Ok(Self {
            protocol: url.scheme().to_string(),
            host: host.to_string(),
            port,
            path,
            method,
            headers,
        })
    }

    /// Value for the `host` header: the port is omitted when it is the
    /// scheme default.
    pub fn host_header(&self) -> String {
        let default = match self.protocol.as_str() {
            "http" => Some(80),
            "https" => Some(443),
            _ => None,
        };
        if default == Some(self.port) {
            self.host.clone()
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }
}

/// Opens connections for one URL scheme.
pub trait Transport: Send + Sync {
    fn connect<'a>(
        &'a self,
        options: &'a TransportOptions,
    ) -> BoxFuture<'a, Result<BoxedSocket, NetError>>;
}
