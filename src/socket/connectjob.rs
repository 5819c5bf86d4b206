use crate::base::context::IoResultExt;
use crate::base::neterror::NetError;
use crate::socket::stream::BoxedSocket;
use crate::socket::tls::TlsConfig;
use crate::socket::transport::{Transport, TransportOptions};
use boring::ssl::{SslConnector, SslMethod};
use futures::future::BoxFuture;
use futures::FutureExt;
use tokio::net::TcpStream;

/// Manages the connection process: DNS -> TCP.
/// Roughly equivalent to net::ConnectJob.
pub struct ConnectJob;

impl ConnectJob {
    /// Resolve `host` and connect to the first address that accepts.
    pub async fn connect_tcp(host: &str, port: u16) -> Result<TcpStream, NetError> {
        // Url::host_str keeps the brackets around IPv6 literals.
        let bare = host.trim_start_matches('[').trim_end_matches(']');
        let addrs: Vec<_> = tokio::net::lookup_host((bare, port))
            .await
            .dns_context(host)?
            .collect();
        tracing::debug!(host = %host, port, count = addrs.len(), "resolved host");

        let mut last_error = NetError::NameNotResolved;
        for addr in addrs {
            match TcpStream::connect(addr).await.connection_context(host, port) {
                Ok(stream) => {
                    if let Err(e) = stream.set_nodelay(true) {
                        tracing::debug!(%addr, error = %e, "failed to set TCP_NODELAY");
                    }
                    tracing::debug!(%addr, "tcp connected");
                    return Ok(stream);
                }
                Err(e) => last_error = e,
            }
        }
        Err(last_error)
    }
}

/// Plain-text transport for `http` URLs.
#[derive(Debug, Clone, Copy, Default)]
pub struct TcpTransport;

impl Transport for TcpTransport {
    fn connect<'a>(
        &'a self,
        options: &'a TransportOptions,
    ) -> BoxFuture<'a, Result<BoxedSocket, NetError>> {
        async move {
            let stream = ConnectJob::connect_tcp(&options.host, options.port).await?;
            Ok(BoxedSocket::new(stream))
        }
        .boxed()
    }
}

/// BoringSSL transport for `https` URLs.
#[derive(Debug, Clone, Default)]
pub struct TlsTransport {
    config: TlsConfig,
}

impl TlsTransport {
    pub fn new(config: TlsConfig) -> Self {
        Self { config }
    }
}

impl Transport for TlsTransport {
    fn connect<'a>(
        &'a self,
        options: &'a TransportOptions,
    ) -> BoxFuture<'a, Result<BoxedSocket, NetError>> {
        async move {
            let stream = ConnectJob::connect_tcp(&options.host, options.port).await?;

            let mut builder =
                SslConnector::builder(SslMethod::tls()).map_err(|_| NetError::SslProtocolError)?;
            self.config.apply_to_builder(&mut builder)?;

            let mut config = builder
                .build()
                .configure()
                .map_err(|_| NetError::SslProtocolError)?;
            config.set_use_server_name_indication(TlsConfig::should_set_sni(&options.host));
            config.set_verify_hostname(self.config.verify_peer);

            let tls_stream = tokio_boring::connect(config, &options.host, stream)
                .await
                .map_err(|e| {
                    tracing::debug!(host = %options.host, error = ?e, "SSL handshake failed");
                    NetError::SslProtocolError
                })?;

            tracing::debug!(host = %options.host, "tls established");
            Ok(BoxedSocket::new(tls_stream))
        }
        .boxed()
    }
}
