//! Errors surfaced to the page layer.

use crate::model::job::JobId;
use crate::repo::record_store::StoreError;
use crate::service::inventory_service::InventoryError;
use crate::service::job_board::JobError;
use crate::service::session::SessionError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type AppResult<T> = Result<T, AppError>;

/// Failures shown to the user as a message.
///
/// Store unavailability is not represented here: pages degrade to an empty
/// view with a warning instead.
#[derive(Debug)]
pub enum AppError {
    AuthFailure,
    NotLoggedIn,
    NotFound(JobId),
    AlreadyTaken { id: JobId, taker: String },
    InvalidInput(String),
    /// Stored data or schema problem that an empty view would hide.
    Persistence(StoreError),
}

impl Display for AppError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthFailure => write!(f, "wrong username or password"),
            Self::NotLoggedIn => write!(f, "please log in first"),
            Self::NotFound(id) => write!(f, "job {id} does not exist"),
            Self::AlreadyTaken { id, taker } => {
                write!(f, "job {id} has already been taken by {taker}")
            }
            Self::InvalidInput(message) => f.write_str(message),
            Self::Persistence(err) => write!(f, "storage error: {err}"),
        }
    }
}

impl Error for AppError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Persistence(err) => Some(err),
            _ => None,
        }
    }
}

impl From<SessionError> for AppError {
    fn from(value: SessionError) -> Self {
        match value {
            SessionError::AuthFailure => Self::AuthFailure,
            SessionError::NotLoggedIn => Self::NotLoggedIn,
        }
    }
}

impl From<StoreError> for AppError {
    fn from(value: StoreError) -> Self {
        Self::Persistence(value)
    }
}

impl From<InventoryError> for AppError {
    fn from(value: InventoryError) -> Self {
        match value {
            InventoryError::EmptyName => Self::InvalidInput(value.to_string()),
            InventoryError::Store(err) => Self::Persistence(err),
        }
    }
}

impl From<JobError> for AppError {
    fn from(value: JobError) -> Self {
        match value {
            JobError::NotFound(id) => Self::NotFound(id),
            JobError::AlreadyTaken { id, taker } => Self::AlreadyTaken { id, taker },
            JobError::InvalidIdentity | JobError::InvalidPosting(_) => {
                Self::InvalidInput(value.to_string())
            }
            JobError::Store(err) => Self::Persistence(err),
        }
    }
}
