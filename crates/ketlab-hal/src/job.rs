//! Job handles and the records backends keep for them.
//!
//! A backend may report `Queued` or `Running` while work is outstanding;
//! [`Backend::wait`](crate::Backend::wait) polls until the status settles.
//! Backends that execute inside `submit` store a [`JobRecord`] that is
//! already settled when the id is handed out.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{HalError, HalResult};
use crate::result::ExecutionResult;

/// Opaque job handle returned by [`Backend::submit`](crate::Backend::submit).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JobId(pub String);

impl JobId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for JobId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobStatus {
    Queued,
    Running,
    Completed,
    Failed(String),
    Cancelled,
}

impl JobStatus {
    /// `Completed`, `Failed` and `Cancelled` never change again.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, JobStatus::Queued | JobStatus::Running)
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JobStatus::Queued => f.write_str("queued"),
            JobStatus::Running => f.write_str("running"),
            JobStatus::Completed => f.write_str("completed"),
            JobStatus::Failed(msg) => write!(f, "failed: {msg}"),
            JobStatus::Cancelled => f.write_str("cancelled"),
        }
    }
}

/// A submission that finished before its id was returned.
#[derive(Debug, Clone)]
pub struct JobRecord {
    pub id: JobId,
    pub shots: u32,
    pub submitted_at: DateTime<Utc>,
    status: JobStatus,
    result: Option<ExecutionResult>,
}

impl JobRecord {
    /// Settle a job from the outcome of running it.
    pub fn settled(id: JobId, shots: u32, outcome: HalResult<ExecutionResult>) -> Self {
        let (status, result) = match outcome {
            Ok(result) => (JobStatus::Completed, Some(result)),
            Err(e) => (JobStatus::Failed(e.to_string()), None),
        };
        Self {
            id,
            shots,
            submitted_at: Utc::now(),
            status,
            result,
        }
    }

    pub fn status(&self) -> &JobStatus {
        &self.status
    }

    /// Cancelling a settled job leaves it as it was.
    pub fn cancel(&mut self) {
        if !self.status.is_terminal() {
            self.status = JobStatus::Cancelled;
            self.result = None;
        }
    }

    /// The stored result, or the error matching the job's status.
    pub fn result(&self) -> HalResult<ExecutionResult> {
        match (&self.status, &self.result) {
            (JobStatus::Completed, Some(result)) => Ok(result.clone()),
            (JobStatus::Completed, None) => Err(HalError::MissingData("execution result".into())),
            (JobStatus::Failed(msg), _) => Err(HalError::JobFailed(msg.clone())),
            (JobStatus::Cancelled, _) => Err(HalError::JobCancelled),
            (JobStatus::Queued | JobStatus::Running, _) => {
                Err(HalError::JobFailed(format!("job {} has not finished", self.id)))
            }
        }
    }
}
