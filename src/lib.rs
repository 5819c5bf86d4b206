//! # reqwu
//!
//! A single-request HTTP client.
//!
//! Configure one request with the fluent [`RequestBuilder`], freeze it into a
//! [`RequestSpec`], and dispatch it. The response body is buffered in full and
//! can be read as text, JSON or raw chunks. With
//! [`compress`](RequestBuilder::compress) the body is transparently decoded
//! from `deflate`, `gzip` or `br`.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use reqwu::RequestBuilder;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), reqwu::NetError> {
//!     let response = RequestBuilder::new("https://httpbin.org/get", "get")?
//!         .header("accept", "application/json")?
//!         .timeout(5_000)?
//!         .send()
//!         .await?;
//!     println!("Status: {}", response.status());
//!     println!("{}", response.json()?);
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`base`] - Error type and load states
//! - [`http`] - Methods, headers, bodies, decoding and dispatch
//! - [`socket`] - Plain and TLS transports
//! - [`urlrequest`] - Request builder and request spec
//! - [`client`] - Transport selection and dispatch entry points
//!
//! Not supported: connection reuse, retries, redirects, HTTP/2.

pub mod base;
pub mod client;
pub mod http;
pub mod socket;
pub mod urlrequest;

pub use crate::base::neterror::NetError;
pub use crate::client::{dispatch, Client, ClientBuilder};
pub use crate::http::{HttpResponse, Method, RequestBody};
pub use crate::socket::{TlsConfig, Transport, TransportOptions};
pub use crate::urlrequest::{RequestBuilder, RequestSpec};
