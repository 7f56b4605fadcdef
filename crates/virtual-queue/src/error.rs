/// Error is a hard failure of a virtual-queue request.
///
/// Guests which are rejected from a queue are *not* errors: they're reported
/// as conflicts of a [`JoinQueueResult`](crate::JoinQueueResult).
/// Variants which were caused by a specific service response carry that
/// response for diagnostics.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The request couldn't be sent or its reply couldn't be read,
    /// including requests which were aborted.
    #[error("failed to send {resource} request")]
    Request {
        resource: &'static str,
        #[source]
        source: anyhow::Error,
    },
    #[error("failed to encode {resource} request")]
    Encode {
        resource: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("{resource} request failed with server error {status}: {response}")]
    Server {
        resource: &'static str,
        status: reqwest::StatusCode,
        response: serde_json::Value,
    },
    #[error("unexpected response status {status:?}: {response}")]
    UnexpectedStatus {
        status: Option<String>,
        response: serde_json::Value,
    },
    #[error("failed to decode {resource} response: {response}")]
    MalformedResponse {
        resource: &'static str,
        response: serde_json::Value,
        #[source]
        source: serde_json::Error,
    },
    #[error("joined queue {queue_id} but response has no matching position: {response}")]
    NoMatchingPosition {
        queue_id: String,
        response: serde_json::Value,
    },
    #[error("queue {queue_id} rejected the party without naming a submitted guest: {response}")]
    UnresolvedConflicts {
        queue_id: String,
        response: serde_json::Value,
    },
    #[error("queue {0} not found")]
    QueueNotFound(String),
    #[error("failed to obtain access token")]
    Token(#[source] anyhow::Error),
    #[error("invalid endpoint URL")]
    Url(#[from] url::ParseError),
}

impl Error {
    /// Raw service response which caused this Error, if there is one.
    pub fn response(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Server { response, .. }
            | Self::UnexpectedStatus { response, .. }
            | Self::MalformedResponse { response, .. }
            | Self::NoMatchingPosition { response, .. }
            | Self::UnresolvedConflicts { response, .. } => Some(response),
            Self::Request { .. }
            | Self::Encode { .. }
            | Self::QueueNotFound(_)
            | Self::Token(_)
            | Self::Url(_) => None,
        }
    }
}
