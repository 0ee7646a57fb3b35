//! The backend contract.
//!
//! A backend runs circuits as jobs:
//!
//! ```text
//! validate ─→ submit ─→ status … status ─→ result
//! ```
//!
//! [`Backend::wait`] wraps the status polling. Backends are built from a
//! [`BackendConfig`] through [`BackendFactory`], usually via
//! [`BackendRegistry`](crate::BackendRegistry).

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use ketlab_ir::Circuit;

use crate::capability::Capabilities;
use crate::error::{HalError, HalResult};
use crate::job::{JobId, JobStatus};
use crate::result::ExecutionResult;

/// Delay between two status polls in [`Backend::wait`].
pub const POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Polls before [`Backend::wait`] gives up (five minutes at [`POLL_INTERVAL`]).
pub const MAX_POLLS: u32 = 600;

/// Backend name plus free-form settings.
///
/// Settings sit next to `name` in serialized form:
/// `{"name": "simulator", "max_qubits": 8}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    pub name: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl BackendConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            extra: serde_json::Map::new(),
        }
    }

    #[must_use]
    pub fn with_extra(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    /// A setting as an unsigned integer; `None` if absent or not a `u64`.
    pub fn get_u64(&self, key: &str) -> Option<u64> {
        self.extra.get(key)?.as_u64()
    }
}

/// Something that executes circuits.
///
/// `capabilities` is synchronous: implementations compute it once at
/// construction. `result` is only meaningful once `status` reports
/// [`JobStatus::Completed`].
#[async_trait]
pub trait Backend: Send + Sync {
    fn name(&self) -> &str;

    fn capabilities(&self) -> &Capabilities;

    async fn availability(&self) -> HalResult<BackendAvailability>;

    /// Check qubit count, gate set and any backend-specific restriction.
    async fn validate(&self, circuit: &Circuit) -> HalResult<ValidationResult>;

    async fn submit(&self, circuit: &Circuit, shots: u32) -> HalResult<JobId>;

    async fn status(&self, job_id: &JobId) -> HalResult<JobStatus>;

    async fn result(&self, job_id: &JobId) -> HalResult<ExecutionResult>;

    /// Cancel a job. Cancelling a finished job has no effect.
    async fn cancel(&self, job_id: &JobId) -> HalResult<()>;

    /// Poll `status` until the job finishes, then fetch its result.
    async fn wait(&self, job_id: &JobId) -> HalResult<ExecutionResult> {
        for _ in 0..MAX_POLLS {
            match self.status(job_id).await? {
                JobStatus::Completed => return self.result(job_id).await,
                JobStatus::Failed(reason) => return Err(HalError::JobFailed(reason)),
                JobStatus::Cancelled => return Err(HalError::JobCancelled),
                JobStatus::Queued | JobStatus::Running => tokio::time::sleep(POLL_INTERVAL).await,
            }
        }
        Err(HalError::Timeout(job_id.to_string()))
    }
}

/// Whether a backend currently accepts jobs.
#[derive(Debug, Clone)]
pub struct BackendAvailability {
    pub is_available: bool,
    /// Jobs ahead in the queue, if the backend reports it.
    pub queue_depth: Option<u32>,
    pub status_message: Option<String>,
}

impl BackendAvailability {
    /// A local backend with no queue.
    pub fn always_available() -> Self {
        Self {
            is_available: true,
            queue_depth: Some(0),
            status_message: None,
        }
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            is_available: false,
            queue_depth: None,
            status_message: Some(reason.into()),
        }
    }
}

/// Outcome of [`Backend::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    Valid,
    Invalid { reasons: Vec<String> },
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        *self == ValidationResult::Valid
    }
}

/// Construction of a backend from a [`BackendConfig`].
pub trait BackendFactory: Backend + Sized {
    fn from_config(config: BackendConfig) -> HalResult<Self>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_settings() {
        let config = BackendConfig::new("simulator").with_extra("max_qubits", serde_json::json!(8));
        assert_eq!(config.name, "simulator");
        assert_eq!(config.get_u64("max_qubits"), Some(8));
        assert_eq!(config.get_u64("missing"), None);

        let negative = config.with_extra("seed", serde_json::json!(-1));
        assert_eq!(negative.get_u64("seed"), None);
    }

    #[test]
    fn test_config_settings_are_flattened() {
        let config: BackendConfig =
            serde_json::from_str(r#"{"name": "simulator", "max_qubits": 12}"#).unwrap();
        assert_eq!(config.get_u64("max_qubits"), Some(12));

        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json, serde_json::json!({"name": "simulator", "max_qubits": 12}));
    }

    #[test]
    fn test_availability() {
        let ready = BackendAvailability::always_available();
        assert!(ready.is_available);
        assert_eq!(ready.queue_depth, Some(0));

        let down = BackendAvailability::unavailable("maintenance");
        assert!(!down.is_available);
        assert_eq!(down.status_message.as_deref(), Some("maintenance"));
    }

    #[test]
    fn test_validation_result() {
        assert!(ValidationResult::Valid.is_valid());
        assert!(!ValidationResult::Invalid { reasons: vec![] }.is_valid());
    }
}
