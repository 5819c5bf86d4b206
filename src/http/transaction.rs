//! Request dispatch.
//!
//! An [`HttpNetworkTransaction`] drives one [`RequestSpec`] through
//! connect → send → read headers → read body, decoding the body when
//! decompression was requested. The optional timeout bounds the whole run.

use crate::base::loadstate::LoadState;
use crate::base::neterror::NetError;
use crate::http::decoder::Decoder;
use crate::http::response::HttpResponse;
use crate::http::streamfactory::{map_hyper_error, HttpStream};
use crate::socket::transport::{Transport, TransportOptions};
use crate::urlrequest::spec::RequestSpec;
use http::header::{HeaderValue, CONTENT_ENCODING, HOST};
use http::{Request, Version};
use http_body_util::BodyExt;
use hyper::body::Incoming;
use std::time::Duration;

/// Internal state machine states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Idle,
    Connect,
    SendRequest,
    ReadHeaders,
    ReadBody,
    Done,
}

impl State {
    /// Map internal state to public LoadState.
    fn to_load_state(self) -> LoadState {
        match self {
            State::Idle | State::Done => LoadState::Idle,
            State::Connect => LoadState::Connecting,
            State::SendRequest => LoadState::SendingRequest,
            State::ReadHeaders => LoadState::WaitingForResponse,
            State::ReadBody => LoadState::ReadingResponse,
        }
    }
}

pub struct HttpNetworkTransaction<'a> {
    transport: &'a dyn Transport,
    spec: RequestSpec,
    state: State,
}

impl<'a> HttpNetworkTransaction<'a> {
    pub fn new(transport: &'a dyn Transport, spec: RequestSpec) -> Self {
        Self {
            transport,
            spec,
            state: State::Idle,
        }
    }

    /// Get the current load state (for progress reporting).
    pub fn get_load_state(&self) -> LoadState {
        self.state.to_load_state()
    }

    /// Run the transaction to completion.
    ///
    /// Resolves exactly once: with the full response, with the first transport
    /// or decoding error, or with [`NetError::TimedOut`] when the deadline
    /// passes first. Partial bodies are never returned.
    pub async fn start(&mut self) -> Result<HttpResponse, NetError> {
        let result = match self.spec.timeout() {
            Some(timeout) => {
                match tokio::time::timeout(timeout, self.do_loop()).await {
                    Ok(result) => result,
                    Err(_) => {
                        let timeout_ms = duration_ms(timeout);
                        tracing::warn!(
                            url = %self.spec.url(),
                            timeout_ms,
                            state = self.get_load_state().as_str(),
                            "request timed out"
                        );
                        Err(NetError::TimedOut { timeout_ms })
                    }
                }
            }
            None => self.do_loop().await,
        };
        self.state = State::Done;
        result
    }

    async fn do_loop(&mut self) -> Result<HttpResponse, NetError> {
        let options = self.spec.transport_options()?;

        self.state = State::Connect;
        tracing::debug!(
            method = %options.method,
            protocol = %options.protocol,
            host = %options.host,
            port = options.port,
            path = %options.path,
            "dispatching request"
        );
        let socket = self.transport.connect(&options).await?;
        let mut stream = HttpStream::handshake(socket).await?;

        self.state = State::SendRequest;
        let req = self.build_request(&options)?;

        self.state = State::ReadHeaders;
        let resp = stream.send_request(req).await?;
        let (parts, body) = resp.into_parts();
        tracing::debug!(status = %parts.status, "response headers received");

        let decoder = if self.spec.decompress() {
            let decoder = Decoder::for_header(parts.headers.get(CONTENT_ENCODING))?;
            tracing::debug!(encoding = decoder.encoding().as_str(), "decoding response body");
            Some(decoder)
        } else {
            None
        };
        let mut response = HttpResponse::new(parts, self.spec.max_body_size());

        self.state = State::ReadBody;
        read_body(body, decoder, &mut response).await?;
        tracing::debug!(bytes = response.len(), "response complete");

        // `stream` stays alive until the body is read; dropping it closes
        // the connection.
        drop(stream);
        Ok(response)
    }

    fn build_request(
        &self,
        options: &TransportOptions,
    ) -> Result<Request<http_body_util::Full<bytes::Bytes>>, NetError> {
        let mut headers = options.headers.clone();
        if !headers.contains("host") {
            let host = HeaderValue::from_str(&options.host_header())
                .map_err(|_| NetError::InvalidUrl)?;
            headers.set(HOST, host);
        }

        let mut req = Request::builder()
            .method(options.method.as_http().clone())
            .uri(options.path.as_str())
            .version(Version::HTTP_11)
            .body(self.spec.body().clone().into_full())
            .map_err(|_| NetError::InvalidUrl)?;
        *req.headers_mut() = headers.to_header_map();
        Ok(req)
    }
}

/// Stream body frames into `response`, decoding on the way.
async fn read_body(
    mut body: Incoming,
    mut decoder: Option<Decoder>,
    response: &mut HttpResponse,
) -> Result<(), NetError> {
    while let Some(frame) = body.frame().await {
        let frame = frame.map_err(|e| map_hyper_error(&e))?;
        let Ok(data) = frame.into_data() else {
            // Trailers carry no body bytes.
            continue;
        };
        let chunk = match decoder.as_mut() {
            Some(decoder) => decoder.decode(&data)?,
            None => data,
        };
        response.add(chunk)?;
    }

    if let Some(decoder) = decoder {
        response.add(decoder.finish()?)?;
    }
    Ok(())
}

fn duration_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
