pub mod error;

use dataguard_common::types::ValidationResult;
use error::{ClientError, Result};
use reqwest::header;

/// Query parameters accepted by `GET /api/runs`.
///
/// The server defaults to the 20 most recent runs when `limit` is absent
/// and to all sources when `source_id` is absent.
#[derive(Debug, Clone, Default)]
pub struct RunsQuery {
    pub source_id: Option<String>,
    pub limit: Option<u32>,
}

impl RunsQuery {
    fn as_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(source_id) = &self.source_id {
            pairs.push(("source_id", source_id.clone()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        pairs
    }
}

/// Client for the DataGuard validation-runs API.
///
/// Cheap to clone; the underlying `reqwest::Client` shares its connection
/// pool across clones.
///
/// # Examples
///
/// ```rust
/// use dataguard_client::RunsClient;
///
/// let client = RunsClient::new("http://localhost:8080");
/// ```
#[derive(Clone)]
pub struct RunsClient {
    http: reqwest::Client,
    base_url: String,
}

impl RunsClient {
    /// Create a client against the given base URL. A trailing slash on the
    /// base is tolerated.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    /// Fetch recent validation runs, never failing.
    ///
    /// This is the baseline dashboard contract: any transport, protocol, or
    /// decode failure is logged and collapsed to an empty sequence. The
    /// caller cannot distinguish "no data" from "fetch failed"; callers that
    /// need the distinction should use [`RunsClient::try_fetch_runs`].
    pub async fn fetch_recent_runs(&self, source_filter: Option<&str>) -> Vec<ValidationResult> {
        let query = RunsQuery {
            source_id: source_filter.map(str::to_string),
            limit: None,
        };
        match self.try_fetch_runs(&query).await {
            Ok(runs) => runs,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to fetch validation runs, returning empty set");
                Vec::new()
            }
        }
    }

    /// Fetch validation runs, surfacing failures as [`ClientError`].
    ///
    /// Response order is preserved; a JSON `null` or empty body yields an
    /// empty vec (the server encodes a nil result set as `null`).
    pub async fn try_fetch_runs(&self, query: &RunsQuery) -> Result<Vec<ValidationResult>> {
        let url = format!("{}/api/runs", self.base_url);

        // Every call must hit the live endpoint, never a cached response.
        let mut request = self
            .http
            .get(&url)
            .header(header::CACHE_CONTROL, "no-cache")
            .header(header::PRAGMA, "no-cache");

        let pairs = query.as_pairs();
        if !pairs.is_empty() {
            request = request.query(&pairs);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status(status));
        }

        let body = response.bytes().await?;
        if body.is_empty() {
            return Ok(Vec::new());
        }
        let runs: Option<Vec<ValidationResult>> = serde_json::from_slice(&body)?;
        Ok(runs.unwrap_or_default())
    }
}
