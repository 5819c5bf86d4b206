/// The current state of a dispatch.
/// This roughly matches net/base/load_states.h
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    /// The request is idle.
    #[default]
    Idle,

    /// Resolving the host and opening the plain or encrypted connection.
    Connecting,

    /// Writing the request head and body.
    SendingRequest,

    /// Waiting for the response head.
    WaitingForResponse,

    /// Reading (and decoding) the response body.
    ReadingResponse,
}

impl LoadState {
    /// Human-readable description of the state, used in log output.
    pub fn as_str(&self) -> &'static str {
        match self {
            LoadState::Idle => "idle",
            LoadState::Connecting => "connecting",
            LoadState::SendingRequest => "sending request",
            LoadState::WaitingForResponse => "waiting for response",
            LoadState::ReadingResponse => "reading response",
        }
    }
}
