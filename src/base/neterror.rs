use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum NetError {
    // Configuration Errors
    #[error("Invalid URL")]
    InvalidUrl,
    #[error("Invalid method: {0}")]
    InvalidMethod(String),
    #[error("{field} expects {expected}, but got {found}")]
    TypeMismatch {
        field: &'static str,
        expected: &'static str,
        found: &'static str,
    },
    #[error("Port {0} is out of range")]
    InvalidPort(String),
    #[error("Timeout must be a positive number of milliseconds")]
    InvalidTimeout,
    #[error("\"{0}\" isn't a valid body type")]
    UnsupportedBodyType(String),
    #[error("Body encoding failed: {0}")]
    BodyEncoding(String),
    #[error("Invalid header")]
    InvalidHeader,
    #[error("Unknown URL scheme: {0}")]
    UnknownUrlScheme(String),

    // Connection Errors
    #[error("Connection closed (TCP FIN)")]
    ConnectionClosed,
    #[error("Connection reset (TCP RST)")]
    ConnectionReset,
    #[error("Connection refused")]
    ConnectionRefused,
    #[error("Connection aborted")]
    ConnectionAborted,
    #[error("Connection failed")]
    ConnectionFailed,
    #[error("Name not resolved")]
    NameNotResolved,
    #[error("SSL protocol error")]
    SslProtocolError,
    #[error("Request timed out after {timeout_ms}ms")]
    TimedOut { timeout_ms: u64 },

    // HTTP Errors
    #[error("Invalid response")]
    InvalidResponse,
    #[error("Content encoding {} isn't supported", .0.as_deref().unwrap_or("<none>"))]
    UnsupportedEncoding(Option<String>),
    #[error("Content decoding failed")]
    ContentDecodingFailed,
    #[error("Response body exceeds {limit} bytes")]
    ResponseBodyTooBig { limit: usize },

    // Body Access Errors
    #[error("Response body is not valid JSON: {0}")]
    Parse(String),
}

impl NetError {
    /// Chromium `net_error_list.h` code for this error.
    ///
    /// Errors without a Chromium counterpart use the custom range starting at -10000.
    pub fn as_i32(&self) -> i32 {
        match self {
            NetError::ConnectionClosed => -100,
            NetError::ConnectionReset => -101,
            NetError::ConnectionRefused => -102,
            NetError::ConnectionAborted => -103,
            NetError::ConnectionFailed => -104,
            NetError::NameNotResolved => -105,
            NetError::SslProtocolError => -107,
            NetError::TimedOut { .. } => -7,
            NetError::InvalidUrl => -300,
            NetError::UnknownUrlScheme(_) => -302,
            NetError::InvalidResponse => -320,
            NetError::InvalidMethod(_) => -322,
            NetError::ContentDecodingFailed => -330,
            NetError::UnsupportedEncoding(_) => -371,
            NetError::ResponseBodyTooBig { .. } => -345,
            NetError::TypeMismatch { .. } => -10000,
            NetError::InvalidPort(_) => -10001,
            NetError::InvalidTimeout => -10002,
            NetError::UnsupportedBodyType(_) => -10003,
            NetError::BodyEncoding(_) => -10004,
            NetError::InvalidHeader => -10005,
            NetError::Parse(_) => -10006,
        }
    }

    /// True for errors raised while configuring a request, before any I/O.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            NetError::InvalidUrl
                | NetError::InvalidMethod(_)
                | NetError::TypeMismatch { .. }
                | NetError::InvalidPort(_)
                | NetError::InvalidTimeout
                | NetError::UnsupportedBodyType(_)
                | NetError::BodyEncoding(_)
                | NetError::InvalidHeader
        )
    }
}
