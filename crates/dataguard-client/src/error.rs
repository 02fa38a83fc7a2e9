/// Errors from one fetch against the validation-runs API.
///
/// Exactly three failure classes exist: transport, protocol (non-2xx
/// status), and decode. `RunsClient::fetch_recent_runs` collapses all of
/// them to an empty result set; `RunsClient::try_fetch_runs` surfaces them.
///
/// # Examples
///
/// ```rust
/// use dataguard_client::error::ClientError;
///
/// let err = ClientError::Status(reqwest::StatusCode::BAD_GATEWAY);
/// assert!(err.to_string().contains("502"));
/// ```
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Network-level failure: connect, write, or read on the request.
    #[error("Runs API: transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-success status code.
    #[error("Runs API: unexpected status {0}")]
    Status(reqwest::StatusCode),

    /// The response body is not a valid JSON array of validation results.
    #[error("Runs API: response decode failed: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Convenience `Result` alias for API client operations.
pub type Result<T> = std::result::Result<T, ClientError>;
