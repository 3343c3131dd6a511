//! Freelance job board and the claim workflow.
//!
//! # Responsibility
//! - List open jobs and jobs claimed by one identity, in board order.
//! - Move a job from `Open` to `Taken` on claim.
//! - Post new jobs with board-assigned ids.
//!
//! # Invariants
//! - A claim writes `status` and `taker` in one row update.
//! - Under `ClaimPolicy::LastWriteWins` a claim on a taken job overwrites the
//!   taker; two sessions racing for the same job both succeed and the later
//!   write is what remains.
//! - Under `ClaimPolicy::RequireOpen` the status is checked before the write.
//!   The check and the write are separate store calls, so the window between
//!   them is still unguarded.

use crate::model::job::{Job, JobId, NewJob};
use crate::repo::codec::{claim_fields, job_from_record, job_to_record};
use crate::repo::record_store::{RecordStore, StoreError, Table};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// First id handed out on an empty board.
pub const FIRST_JOB_ID: JobId = 101;

pub type JobResult<T> = Result<T, JobError>;

/// What a claim does when the job is already taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClaimPolicy {
    /// Write unconditionally; the latest claimant replaces any earlier one.
    #[default]
    LastWriteWins,
    /// Refuse to claim a job whose status is already `Taken`.
    RequireOpen,
}

impl ClaimPolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::LastWriteWins => "last_write_wins",
            Self::RequireOpen => "require_open",
        }
    }
}

#[derive(Debug)]
pub enum JobError {
    NotFound(JobId),
    AlreadyTaken { id: JobId, taker: String },
    /// Claimant identity is blank.
    InvalidIdentity,
    /// A posting field that must be filled in is blank.
    InvalidPosting(&'static str),
    Store(StoreError),
}

impl Display for JobError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "job not found: {id}"),
            Self::AlreadyTaken { id, taker } => write!(f, "job {id} already taken by {taker}"),
            Self::InvalidIdentity => write!(f, "claimant identity cannot be empty"),
            Self::InvalidPosting(field) => write!(f, "job {field} cannot be empty"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for JobError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StoreError> for JobError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Result of a successful claim.
#[derive(Debug, Clone, PartialEq)]
pub struct ClaimOutcome {
    /// Job state after the write.
    pub job: Job,
    /// Claimant that was replaced, when the job was already taken.
    pub overwritten_taker: Option<String>,
}

/// Job board backed by the `jobs` table.
pub struct JobBoard<S: RecordStore> {
    store: S,
    policy: ClaimPolicy,
}

impl<S: RecordStore> JobBoard<S> {
    pub fn new(store: S) -> Self {
        Self::with_policy(store, ClaimPolicy::default())
    }

    pub fn with_policy(store: S, policy: ClaimPolicy) -> Self {
        Self { store, policy }
    }

    pub fn policy(&self) -> ClaimPolicy {
        self.policy
    }

    /// Every decodable job in board order. Malformed rows are logged and skipped.
    pub fn list_all(&self) -> JobResult<Vec<Job>> {
        let rows = self.store.read_all(Table::Jobs)?;
        let mut jobs = Vec::with_capacity(rows.len());
        for (index, row) in rows.iter().enumerate() {
            match job_from_record(row) {
                Ok(job) => jobs.push(job),
                Err(err) => warn!(
                    "event=job_decode module=job_board status=skipped row_index={index} error={err}"
                ),
            }
        }
        Ok(jobs)
    }

    pub fn list_open(&self) -> JobResult<Vec<Job>> {
        Ok(self.list_all()?.into_iter().filter(Job::is_open).collect())
    }

    pub fn list_claimed_by(&self, identity: &str) -> JobResult<Vec<Job>> {
        Ok(self
            .list_all()?
            .into_iter()
            .filter(|job| job.is_taken_by(identity))
            .collect())
    }

    pub fn get(&self, id: JobId) -> JobResult<Option<Job>> {
        let key = id.to_string();
        let Some(row) = self
            .store
            .read_all(Table::Jobs)?
            .into_iter()
            .find(|row| row.matches_key(Table::Jobs, &key))
        else {
            return Ok(None);
        };
        Ok(Some(job_from_record(&row)?))
    }

    /// Claims `id` for `identity` according to the board's policy.
    ///
    /// # Errors
    /// - `NotFound` when no job has this id.
    /// - `AlreadyTaken` under `RequireOpen` when the job is not open.
    /// - `Store` for any persistence failure; nothing is retried.
    pub fn claim(&self, id: JobId, identity: &str) -> JobResult<ClaimOutcome> {
        let identity = identity.trim();
        if identity.is_empty() {
            return Err(JobError::InvalidIdentity);
        }

        let Some(mut job) = self.get(id)? else {
            info!("event=job_claim module=job_board status=error error_code=not_found job_id={id}");
            return Err(JobError::NotFound(id));
        };

        let overwritten_taker = job.taker.clone();
        if let (ClaimPolicy::RequireOpen, Some(taker)) = (self.policy, overwritten_taker.as_ref())
        {
            info!(
                "event=job_claim module=job_board status=rejected error_code=already_taken job_id={id}"
            );
            return Err(JobError::AlreadyTaken {
                id,
                taker: taker.clone(),
            });
        }

        if !self
            .store
            .find_and_update(Table::Jobs, &id.to_string(), &claim_fields(identity))?
        {
            return Err(JobError::NotFound(id));
        }

        if overwritten_taker.is_some() {
            warn!(
                "event=job_claim module=job_board status=ok job_id={id} policy={} overwrote=true",
                self.policy.as_str()
            );
        } else {
            info!(
                "event=job_claim module=job_board status=ok job_id={id} policy={} overwrote=false",
                self.policy.as_str()
            );
        }

        job.mark_taken(identity);
        Ok(ClaimOutcome {
            job,
            overwritten_taker,
        })
    }

    /// Appends a new open job with the next free id.
    pub fn post(&self, posting: NewJob) -> JobResult<Job> {
        if posting.title.trim().is_empty() {
            return Err(JobError::InvalidPosting("title"));
        }

        let id = self
            .list_all()?
            .iter()
            .map(|job| job.id)
            .max()
            .map_or(FIRST_JOB_ID, |max| max + 1);
        let job = Job::open(id, posting);
        self.store.append(Table::Jobs, &job_to_record(&job))?;
        info!("event=job_post module=job_board status=ok job_id={id}");
        Ok(job)
    }
}
