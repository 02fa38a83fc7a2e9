use dataguard_common::types::ValidationResult;

/// Mutable dashboard state: the current run set plus the loading flag.
///
/// Loads are tagged with a monotonically increasing token so that under
/// rapid manual refresh the state reflects the most recently *initiated*
/// request: a completion carrying a superseded token is discarded.
pub struct App {
    pub results: Vec<ValidationResult>,
    pub loading: bool,
    latest_token: u64,
}

impl App {
    pub fn new() -> Self {
        Self {
            results: Vec::new(),
            loading: true,
            latest_token: 0,
        }
    }

    /// Enter the loading state and issue a token for the fetch about to be
    /// spawned. The previously displayed table is replaced by the loading
    /// indicator until that fetch (or a newer one) completes.
    pub fn begin_load(&mut self) -> u64 {
        self.latest_token += 1;
        self.loading = true;
        self.latest_token
    }

    /// Apply a completed fetch. The run set is wholesale-replaced; returns
    /// false when `token` has been superseded by a newer `begin_load`.
    pub fn apply_fetch(&mut self, token: u64, runs: Vec<ValidationResult>) -> bool {
        if token != self.latest_token {
            tracing::debug!(
                token,
                latest = self.latest_token,
                "Discarding stale fetch result"
            );
            return false;
        }
        self.results = runs;
        self.loading = false;
        true
    }
}

/// A completed fetch delivered back to the event loop.
pub struct FetchOutcome {
    pub token: u64,
    pub runs: Vec<ValidationResult>,
}
