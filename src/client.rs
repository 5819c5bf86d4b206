//! Transport selection and dispatch entry points.
//!
//! A [`Client`] holds one transport per URL scheme and nothing else, so it is
//! cheap to clone and safe to share. Requests themselves carry all
//! per-request state in their [`RequestSpec`].
//!
//! # Example
//!
//! ```rust,ignore
//! use reqwu::{Client, RequestBuilder, TlsConfig};
//!
//! let client = Client::builder()
//!     .tls_config(TlsConfig::default())
//!     .build();
//!
//! let spec = RequestBuilder::get("https://example.com")?.build();
//! let resp = client.dispatch(spec).await?;
//! ```

use crate::base::neterror::NetError;
use crate::http::response::HttpResponse;
use crate::http::transaction::HttpNetworkTransaction;
use crate::socket::connectjob::{TcpTransport, TlsTransport};
use crate::socket::tls::TlsConfig;
use crate::socket::transport::Transport;
use crate::urlrequest::spec::RequestSpec;
use std::sync::Arc;

/// Dispatcher for [`RequestSpec`]s.
///
/// Use [`Client::builder()`] to configure transports.
#[derive(Clone)]
pub struct Client {
    plain: Arc<dyn Transport>,
    tls: Arc<dyn Transport>,
}

impl Default for Client {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client").finish_non_exhaustive()
    }
}

impl Client {
    /// Create a new client with default settings.
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Create a new client builder.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    /// Pick the transport for a URL scheme.
    pub fn transport_for(&self, scheme: &str) -> Result<&dyn Transport, NetError> {
        match scheme {
            "http" => Ok(self.plain.as_ref()),
            "https" => Ok(self.tls.as_ref()),
            other => Err(NetError::UnknownUrlScheme(other.to_string())),
        }
    }

    /// Send `spec` and wait for the full response.
    pub async fn dispatch(&self, spec: RequestSpec) -> Result<HttpResponse, NetError> {
        let transport = self.transport_for(spec.url().scheme())?;
        HttpNetworkTransaction::new(transport, spec).start().await
    }
}

/// Builder for creating a [`Client`].
#[derive(Default)]
pub struct ClientBuilder {
    tls_config: Option<TlsConfig>,
    plain: Option<Arc<dyn Transport>>,
    tls: Option<Arc<dyn Transport>>,
}

impl ClientBuilder {
    /// Set TLS options for the built-in encrypted transport.
    pub fn tls_config(mut self, config: TlsConfig) -> Self {
        self.tls_config = Some(config);
        self
    }

    /// Replace the transport used for `http` URLs.
    pub fn plain_transport<T: Transport + 'static>(mut self, transport: T) -> Self {
        self.plain = Some(Arc::new(transport));
        self
    }

    /// Replace the transport used for `https` URLs. Overrides `tls_config`.
    pub fn tls_transport<T: Transport + 'static>(mut self, transport: T) -> Self {
        self.tls = Some(Arc::new(transport));
        self
    }

    /// Build the client.
    pub fn build(self) -> Client {
        let tls_config = self.tls_config.unwrap_or_default();
        Client {
            plain: self.plain.unwrap_or_else(|| Arc::new(TcpTransport)),
            tls: self
                .tls
                .unwrap_or_else(|| Arc::new(TlsTransport::new(tls_config))),
        }
    }
}

/// Send `spec` with the default transports.
pub async fn dispatch(spec: RequestSpec) -> Result<HttpResponse, NetError> {
    Client::new().dispatch(spec).await
}
