/// Failure of a call to the upstream CRM API.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The API answered with a non-success status.
    #[error("Upstream rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// The request never completed (connection, timeout, TLS).
    #[error("Upstream unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    /// The API answered 2xx with a body we cannot use.
    #[error("Malformed upstream response: {0}")]
    Decode(String),
}

impl ClientError {
    /// `true` when the upstream refused the credentials or the token.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ClientError::Rejected { status: 401 | 403, .. })
    }
}
