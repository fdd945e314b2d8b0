//! Async job errors.

use thiserror::Error;

/// Errors produced while waiting on an async job.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JobError {
    /// The job did not finish before the configured async timeout.
    ///
    /// The job is still running; `job_id` can be polled again later.
    #[error("Timeout waiting for async job {job_id} after {waited_secs}s")]
    Timeout {
        /// The id of the job that is still pending.
        job_id: String,
        /// How long the client waited, in seconds.
        waited_secs: u64,
    },

    /// The job failed and reported a text result.
    #[error("{message}")]
    Failed {
        /// The id of the failed job.
        job_id: String,
        /// The job's own error text, verbatim.
        message: String,
    },

    /// The job failed with a non-text result.
    #[error("Undefined error: {result}")]
    Undefined {
        /// The id of the failed job.
        job_id: String,
        /// The raw job result as JSON text.
        result: String,
    },

    /// An async response carried no job id to poll.
    #[error("Async response did not contain a job id")]
    MissingJobId,
}

impl JobError {
    /// Returns `true` if this is the polling timeout sentinel.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    /// Returns the job id this error refers to, if any.
    pub fn job_id(&self) -> Option<&str> {
        match self {
            Self::Timeout { job_id, .. }
            | Self::Failed { job_id, .. }
            | Self::Undefined { job_id, .. } => Some(job_id),
            Self::MissingJobId => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_displays_text_verbatim() {
        let err = JobError::Failed {
            job_id: "j-1".to_string(),
            message: "Insufficient capacity".to_string(),
        };
        assert_eq!(err.to_string(), "Insufficient capacity");
        assert!(!err.is_timeout());
    }

    #[test]
    fn test_timeout_keeps_job_id() {
        let err = JobError::Timeout {
            job_id: "j-2".to_string(),
            waited_secs: 5,
        };
        assert!(err.is_timeout());
        assert_eq!(err.job_id(), Some("j-2"));
    }
}
