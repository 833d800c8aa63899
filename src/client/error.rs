//! Errors surfaced by the transcription client.

use thiserror::Error;

// ---------------------------------------------------------------------------
// ClientError
// ---------------------------------------------------------------------------

/// Failures of a backend call.  Nothing is retried; every variant reaches the
/// caller so setup can tell bad credentials from an unreachable server.
#[derive(Debug, Clone, Error)]
pub enum ClientError {
    /// The backend rejected the credentials (HTTP 401).
    #[error("authentication rejected: {0}")]
    Authentication(String),

    /// The server could not be reached (refused, DNS failure, unreachable).
    #[error("cannot connect to transcription backend: {0}")]
    Connection(String),

    /// Any other non-success HTTP status.
    #[error("backend returned HTTP {status}: {message}")]
    Api { status: u16, message: String },

    /// The response body or an event could not be decoded.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// Transport failure after the connection was established, e.g. the
    /// event stream dropped mid-way.
    #[error("transport error: {0}")]
    Transport(String),

    /// The request could not be built (bad URL, header or form part).
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl ClientError {
    /// Map a non-success HTTP status and its body to the matching variant.
    pub fn from_status(status: reqwest::StatusCode, body: String) -> Self {
        if status == reqwest::StatusCode::UNAUTHORIZED {
            ClientError::Authentication(body)
        } else {
            ClientError::Api {
                status: status.as_u16(),
                message: body,
            }
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_connect() {
            ClientError::Connection(e.to_string())
        } else if e.is_decode() {
            ClientError::MalformedResponse(e.to_string())
        } else if e.is_builder() {
            ClientError::InvalidRequest(e.to_string())
        } else if let Some(status) = e.status() {
            ClientError::from_status(status, e.to_string())
        } else {
            ClientError::Transport(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn unauthorized_maps_to_authentication() {
        let err = ClientError::from_status(StatusCode::UNAUTHORIZED, "bad key".into());
        assert!(matches!(err, ClientError::Authentication(ref m) if m == "bad key"));
    }

    #[test]
    fn other_statuses_keep_their_code() {
        let err = ClientError::from_status(StatusCode::FORBIDDEN, "nope".into());
        assert!(matches!(err, ClientError::Api { status: 403, .. }));

        let err = ClientError::from_status(StatusCode::INTERNAL_SERVER_ERROR, String::new());
        assert!(err.to_string().contains("500"));
    }
}
