//! Request methods accepted by the builder.

use crate::base::neterror::NetError;
use std::fmt;
use std::str::FromStr;

/// Every verb a request may carry, upper case, sorted.
pub const ACCEPTED_METHODS: &[&str] = &[
    "ACL",
    "BIND",
    "CHECKOUT",
    "CONNECT",
    "COPY",
    "DELETE",
    "GET",
    "HEAD",
    "LINK",
    "LOCK",
    "M-SEARCH",
    "MERGE",
    "MKACTIVITY",
    "MKCALENDAR",
    "MKCOL",
    "MOVE",
    "NOTIFY",
    "OPTIONS",
    "PATCH",
    "POST",
    "PROPFIND",
    "PROPPATCH",
    "PURGE",
    "PUT",
    "QUERY",
    "REBIND",
    "REPORT",
    "SEARCH",
    "SOURCE",
    "SUBSCRIBE",
    "TRACE",
    "UNBIND",
    "UNLINK",
    "UNLOCK",
    "UNSUBSCRIBE",
];

/// A request method from [`ACCEPTED_METHODS`].
///
/// Only constructible through [`Method::parse`], so a value always holds an
/// upper-case accepted verb.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Method(http::Method);

impl Method {
    pub const GET: Method = Method(http::Method::GET);
    pub const POST: Method = Method(http::Method::POST);
    pub const PUT: Method = Method(http::Method::PUT);
    pub const PATCH: Method = Method(http::Method::PATCH);
    pub const DELETE: Method = Method(http::Method::DELETE);
    pub const HEAD: Method = Method(http::Method::HEAD);

    /// Normalize `name` to upper case and check it against the accepted set.
    pub fn parse(name: &str) -> Result<Self, NetError> {
        let upper = name.to_ascii_uppercase();
        if ACCEPTED_METHODS.binary_search(&upper.as_str()).is_err() {
            return Err(NetError::InvalidMethod(name.to_string()));
        }
        http::Method::from_bytes(upper.as_bytes())
            .map(Method)
            .map_err(|_| NetError::InvalidMethod(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// The `http` crate representation used on the wire.
    pub fn as_http(&self) -> &http::Method {
        &self.0
    }
}

impl FromStr for Method {
    type Err = NetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Method::parse(s)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
