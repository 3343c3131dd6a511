//! Page router and per-session application state.
//!
//! # Responsibility
//! - Own one session's state (login, current page, last search) together
//!   with the store handle, credentials and claim policy.
//! - Map each user action to exactly one core call and return a fresh
//!   `PageView` snapshot.
//!
//! # Invariants
//! - While logged out every page resolves to `Page::Login`.
//! - Store unavailability degrades a page to empty content plus a warning; it
//!   never ends the session.
//! - No action is retried.

pub mod error;
pub mod view;

use crate::model::job::JobId;
use crate::repo::record_store::{RecordStore, StoreError};
use crate::service::catalog_service::Catalog;
use crate::service::credential_service::CredentialStore;
use crate::service::inventory_service::{Inventory, InventoryError};
use crate::service::job_board::{ClaimPolicy, JobBoard, JobError};
use crate::service::session::Session;
use error::{AppError, AppResult};
use log::warn;
use view::{Notice, Page, PageView, ViewBody};

/// One user interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Open(Page),
    Login { username: String, password: String },
    Search { query: String },
    AddItem { name: String },
    RemoveItem { name: String },
    Claim { job_id: JobId },
    Logout,
}

/// Application state for one interactive session.
pub struct BarApp<S: RecordStore> {
    store: S,
    credentials: CredentialStore,
    policy: ClaimPolicy,
    session: Session,
    page: Page,
    search_query: String,
}

impl<S: RecordStore> BarApp<S> {
    pub fn new(store: S, credentials: CredentialStore, policy: ClaimPolicy) -> Self {
        Self {
            store,
            credentials,
            policy,
            session: Session::new(),
            page: Page::Login,
            search_query: String::new(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Page that `render` would draw right now.
    pub fn current_page(&self) -> Page {
        if self.session.is_logged_in() {
            self.page
        } else {
            Page::Login
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Snapshot of the current page.
    pub fn render(&self) -> AppResult<PageView> {
        let page = self.current_page();
        let identity = self.session.current_identity().map(str::to_string);
        let mut notices = Vec::new();

        let body = match (page, identity.as_deref()) {
            (Page::Login, _) | (_, None) => ViewBody::Login,
            (Page::Recipes, Some(_)) => {
                let recipes = degrade(
                    Catalog::new(&self.store).search(&self.search_query),
                    "recipes",
                    &mut notices,
                )?;
                ViewBody::Recipes {
                    query: self.search_query.clone(),
                    recipes,
                }
            }
            (Page::Inventory, Some(_)) => {
                let items = degrade(
                    Inventory::new(&self.store).list().map_err(store_error_of_inventory),
                    "inventory",
                    &mut notices,
                )?;
                ViewBody::Inventory { items }
            }
            (Page::JobCenter, Some(identity)) => {
                let board = self.job_board();
                let open = degrade(
                    board.list_open().map_err(store_error_of_jobs),
                    "jobs",
                    &mut notices,
                )?;
                let mine = if notices.is_empty() {
                    degrade(
                        board.list_claimed_by(identity).map_err(store_error_of_jobs),
                        "jobs",
                        &mut notices,
                    )?
                } else {
                    Vec::new()
                };
                if open.is_empty() && notices.is_empty() {
                    notices.push(Notice::Info("No open jobs right now.".to_string()));
                }
                ViewBody::JobCenter { open, mine }
            }
            (Page::Profile, Some(identity)) => ViewBody::Profile {
                identity: identity.to_string(),
            },
        };

        Ok(PageView {
            page,
            identity,
            body,
            notices,
        })
    }

    /// Applies one action and returns the refreshed page.
    pub fn dispatch(&mut self, action: Action) -> AppResult<PageView> {
        match action {
            Action::Open(page) => {
                self.page = page;
                self.render()
            }
            Action::Login { username, password } => {
                self.session.login(&self.credentials, &username, &password)?;
                if self.page == Page::Login {
                    self.page = Page::Recipes;
                }
                Ok(self
                    .render()?
                    .with_notice(Notice::Success(format!("Welcome, {username}."))))
            }
            Action::Logout => {
                self.session.logout();
                self.page = Page::Login;
                self.search_query.clear();
                self.render()
            }
            Action::Search { query } => {
                self.session.require_identity()?;
                self.page = Page::Recipes;
                self.search_query = query;
                self.render()
            }
            Action::AddItem { name } => {
                self.session.require_identity()?;
                self.page = Page::Inventory;
                let notice = match Inventory::new(&self.store).add(&name) {
                    Ok(true) => Notice::Success(format!("Added {}.", name.trim())),
                    Ok(false) => Notice::Info(format!("{} is already in stock.", name.trim())),
                    Err(InventoryError::Store(err)) if err.is_unavailable() => {
                        write_failure_notice(&err)
                    }
                    Err(err) => return Err(err.into()),
                };
                Ok(self.render()?.with_notice(notice))
            }
            Action::RemoveItem { name } => {
                self.session.require_identity()?;
                self.page = Page::Inventory;
                let notice = match Inventory::new(&self.store).remove(&name) {
                    Ok(true) => Notice::Success(format!("Removed {}.", name.trim())),
                    Ok(false) => Notice::Info(format!("{} is not in stock.", name.trim())),
                    Err(InventoryError::Store(err)) if err.is_unavailable() => {
                        write_failure_notice(&err)
                    }
                    Err(err) => return Err(err.into()),
                };
                Ok(self.render()?.with_notice(notice))
            }
            Action::Claim { job_id } => {
                let identity = self.session.require_identity()?.to_string();
                self.page = Page::JobCenter;
                let mut notices = Vec::new();
                match self.job_board().claim(job_id, &identity) {
                    Ok(outcome) => {
                        notices.push(Notice::Success(format!(
                            "Claimed job {}: {}.",
                            outcome.job.id, outcome.job.title
                        )));
                        if let Some(previous) = outcome.overwritten_taker {
                            if previous != identity {
                                notices.push(Notice::Warning(format!(
                                    "Job {job_id} was already taken by {previous}; the claim now names {identity}."
                                )));
                            }
                        }
                    }
                    Err(JobError::Store(err)) if err.is_unavailable() => {
                        notices.push(write_failure_notice(&err));
                    }
                    Err(err) => return Err(err.into()),
                }
                let mut view = self.render()?;
                view.notices.extend(notices);
                Ok(view)
            }
        }
    }

    fn job_board(&self) -> JobBoard<&S> {
        JobBoard::with_policy(&self.store, self.policy)
    }
}

/// Turns store unavailability (or a missing table) into empty content plus a
/// warning; other store errors propagate.
fn degrade<T: Default>(
    result: Result<T, StoreError>,
    table: &str,
    notices: &mut Vec<Notice>,
) -> AppResult<T> {
    match result {
        Ok(value) => Ok(value),
        Err(err) if err.is_unavailable() || matches!(err, StoreError::MissingTable(_)) => {
            warn!("event=page_degraded module=app status=warning table={table} error={err}");
            notices.push(Notice::Warning(format!(
                "Could not load {table}; showing nothing for now. ({err})"
            )));
            Ok(T::default())
        }
        Err(err) => Err(AppError::Persistence(err)),
    }
}

fn write_failure_notice(err: &StoreError) -> Notice {
    warn!("event=page_write_failed module=app status=warning error={err}");
    Notice::Warning(format!("Change was not saved: {err}"))
}

fn store_error_of_inventory(err: InventoryError) -> StoreError {
    match err {
        InventoryError::Store(err) => err,
        InventoryError::EmptyName => StoreError::InvalidData(err.to_string()),
    }
}

fn store_error_of_jobs(err: JobError) -> StoreError {
    match err {
        JobError::Store(err) => err,
        other => StoreError::InvalidData(other.to_string()),
    }
}
