//! Socket and connection management.
//!
//! - [`transport`]: the `Transport` trait and connection options
//! - [`connectjob`]: DNS → TCP → TLS connection flow
//! - [`stream`]: boxed socket type shared by all transports
//! - [`tls`]: TLS configuration with BoringSSL

pub mod connectjob;
pub mod stream;
pub mod tls;
pub mod transport;

pub use connectjob::{TcpTransport, TlsTransport};
pub use tls::TlsConfig;
pub use transport::{Transport, TransportOptions};
