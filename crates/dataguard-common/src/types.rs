use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Outcome of a validation run, as reported by the DataGuard API.
///
/// The wire format is a closed two-value enumeration; anything other than
/// `"PASS"` or `"FAIL"` is rejected at deserialization rather than mapped
/// to a default.
///
/// # Examples
///
/// ```
/// use dataguard_common::types::RunStatus;
///
/// let status: RunStatus = "PASS".parse().unwrap();
/// assert_eq!(status, RunStatus::Pass);
/// assert_eq!(status.to_string(), "PASS");
/// assert!("DEGRADED".parse::<RunStatus>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RunStatus {
    Pass,
    Fail,
}

impl std::fmt::Display for RunStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunStatus::Pass => write!(f, "PASS"),
            RunStatus::Fail => write!(f, "FAIL"),
        }
    }
}

impl std::str::FromStr for RunStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PASS" => Ok(RunStatus::Pass),
            "FAIL" => Ok(RunStatus::Fail),
            _ => Err(format!("unknown run status: {s}")),
        }
    }
}

/// One validation run against a named source.
///
/// `status`, `rules_failed` and `errors` are independent signals from the
/// producer: a `FAIL` run may report `rules_failed == 0` and no error
/// details. Consumers must not assume consistency between them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationResult {
    pub source_id: String,
    pub status: RunStatus,
    pub records_checked: u64,
    pub rules_failed: u64,
    /// Per-rule failure details, present only when the producer recorded any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<ErrorDetail>>,
    /// RFC 3339 on the wire; rendered in local time.
    pub timestamp: DateTime<Utc>,
}

/// A single rule violation within a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub rule_id: String,
    pub field: String,
    /// The offending value, kept untyped (scalar or structured).
    pub value: serde_json::Value,
    pub reason: String,
    /// Identifier of the offending record, when the producer has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record_id: Option<String>,
}
