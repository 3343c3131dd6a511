//! Job board record and its claim lifecycle.
//!
//! # Invariants
//! - `taker` is `Some` if and only if `status == JobStatus::Taken`.
//! - `id` never changes after creation.
//! - `Open -> Taken` is the only transition; jobs are never deleted in-app.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Numeric job identifier as written in the sheet `id` column.
pub type JobId = u64;

/// Claim state of a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JobStatus {
    Open,
    Taken,
}

impl JobStatus {
    /// Cell text used by the `status` column.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::Taken => "Taken",
        }
    }

    /// Parses the `status` cell text. Matching is exact, like the sheet filter.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Open" => Some(Self::Open),
            "Taken" => Some(Self::Taken),
            _ => None,
        }
    }
}

impl Display for JobStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One freelance gig on the job board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: JobId,
    pub title: String,
    /// Display date as entered by whoever posted the job.
    pub date: String,
    pub location: String,
    /// Display string, e.g. `"$200"` or `"NT$3000/night"`.
    pub budget: String,
    pub status: JobStatus,
    /// Identity of the claimant; present iff `status == Taken`.
    pub taker: Option<String>,
}

/// Input for posting a new job; id and status are assigned by the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewJob {
    pub title: String,
    pub date: String,
    pub location: String,
    pub budget: String,
}

impl Job {
    /// Creates an open, unclaimed job.
    pub fn open(id: JobId, posting: NewJob) -> Self {
        Self {
            id,
            title: posting.title,
            date: posting.date,
            location: posting.location,
            budget: posting.budget,
            status: JobStatus::Open,
            taker: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.status == JobStatus::Open
    }

    /// Whether `identity` is the recorded claimant.
    pub fn is_taken_by(&self, identity: &str) -> bool {
        self.taker.as_deref() == Some(identity)
    }

    /// Records `identity` as claimant and moves the job to `Taken`.
    ///
    /// Unconditional: a job that is already taken gets its taker replaced.
    /// Callers that must not overwrite check `is_open()` first.
    pub fn mark_taken(&mut self, identity: impl Into<String>) {
        self.status = JobStatus::Taken;
        self.taker = Some(identity.into());
    }

    /// Checks the status/taker pairing.
    pub fn validate(&self) -> Result<(), JobValidationError> {
        match (self.status, self.taker.as_deref()) {
            (JobStatus::Open, None) => Ok(()),
            (JobStatus::Taken, Some(taker)) if !taker.trim().is_empty() => Ok(()),
            (JobStatus::Taken, _) => Err(JobValidationError::TakenWithoutTaker(self.id)),
            (JobStatus::Open, Some(_)) => Err(JobValidationError::OpenWithTaker(self.id)),
        }
    }
}

/// Violations of the status/taker invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobValidationError {
    TakenWithoutTaker(JobId),
    OpenWithTaker(JobId),
}

impl Display for JobValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TakenWithoutTaker(id) => write!(f, "job {id} is Taken but has no taker"),
            Self::OpenWithTaker(id) => write!(f, "job {id} is Open but names a taker"),
        }
    }
}

impl Error for JobValidationError {}
