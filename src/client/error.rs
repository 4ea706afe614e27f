use thiserror::Error;

/// Failure of one gateway call, as seen by the client.
///
/// `Display` is the string the collection surfaces as its `error`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// The server answered with a failure envelope or a non-success status.
    #[error("{message}")]
    Api { status: u16, message: String },
    /// The request never produced a response.
    #[error("network error: {0}")]
    Transport(String),
    /// The response body was not the expected envelope.
    #[error("invalid response: {0}")]
    Decode(String),
}

impl ClientError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(feature = "client")]
impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else {
            ClientError::Transport(err.to_string())
        }
    }
}
