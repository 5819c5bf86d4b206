use crate::base::context::from_io_error;
use crate::base::neterror::NetError;
use crate::socket::stream::BoxedSocket;
use bytes::Bytes;
use http::{Request, Response};
use http_body_util::Full;
use hyper::body::Incoming;
use hyper::client::conn::http1;
use hyper_util::rt::TokioIo;
use tokio::task::JoinHandle;

/// One HTTP/1.1 exchange over a freshly connected socket.
/// Equivalent to net::HttpStream.
///
/// The connection driver runs in its own task; dropping the stream aborts it,
/// which closes the socket.
pub struct HttpStream {
    sender: http1::SendRequest<Full<Bytes>>,
    driver: JoinHandle<()>,
}

impl HttpStream {
    /// Perform the HTTP/1.1 handshake and spawn the connection driver.
    pub async fn handshake(socket: BoxedSocket) -> Result<Self, NetError> {
        let io = TokioIo::new(socket);
        let (sender, conn) = http1::handshake(io).await.map_err(|e| {
            tracing::debug!(error = %e, "HTTP/1.1 handshake failed");
            NetError::ConnectionFailed
        })?;

        let driver = tokio::spawn(async move {
            if let Err(e) = conn.await {
                tracing::debug!(error = %e, "connection closed with error");
            }
        });

        Ok(Self { sender, driver })
    }

    pub async fn send_request(
        &mut self,
        req: Request<Full<Bytes>>,
    ) -> Result<Response<Incoming>, NetError> {
        self.sender
            .send_request(req)
            .await
            .map_err(|e| map_hyper_error(&e))
    }
}

impl Drop for HttpStream {
    fn drop(&mut self) {
        self.driver.abort();
    }
}

/// Classify a hyper error, preferring the underlying IO error kind.
pub fn map_hyper_error(err: &hyper::Error) -> NetError {
    let mut source = std::error::Error::source(err);
    while let Some(inner) = source {
        if let Some(io) = inner.downcast_ref::<std::io::Error>() {
            return from_io_error(io);
        }
        source = inner.source();
    }

    if err.is_parse() || err.is_parse_status() {
        NetError::InvalidResponse
    } else if err.is_incomplete_message() || err.is_closed() || err.is_canceled() {
        NetError::ConnectionClosed
    } else {
        tracing::debug!(error = %err, "unclassified hyper error");
        NetError::ConnectionFailed
    }
}
