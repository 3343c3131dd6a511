//! Render snapshots handed to the presentation layer.
//!
//! A `PageView` is plain data; the front end decides how and when to draw it.

use crate::model::job::Job;
use crate::model::recipe::Recipe;
use serde::Serialize;
use std::fmt::{Display, Formatter};

/// Navigable pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Page {
    Login,
    Recipes,
    Inventory,
    JobCenter,
    Profile,
}

impl Page {
    /// Sidebar menu shown to a logged-in user, in display order.
    pub const MENU: [Page; 4] = [Page::Recipes, Page::Inventory, Page::JobCenter, Page::Profile];

    pub fn title(self) -> &'static str {
        match self {
            Self::Login => "Login",
            Self::Recipes => "Recipes",
            Self::Inventory => "Inventory",
            Self::JobCenter => "Job Center",
            Self::Profile => "Profile",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "login" => Some(Self::Login),
            "recipes" => Some(Self::Recipes),
            "inventory" => Some(Self::Inventory),
            "jobs" | "job_center" => Some(Self::JobCenter),
            "profile" => Some(Self::Profile),
            _ => None,
        }
    }
}

impl Display for Page {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.title())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "level", content = "message", rename_all = "snake_case")]
pub enum Notice {
    Success(String),
    Info(String),
    Warning(String),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ViewBody {
    Login,
    Recipes {
        query: String,
        recipes: Vec<Recipe>,
    },
    Inventory {
        items: Vec<String>,
    },
    JobCenter {
        open: Vec<Job>,
        mine: Vec<Job>,
    },
    Profile {
        identity: String,
    },
}

/// Snapshot of one page after the latest action.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageView {
    pub page: Page,
    /// `None` on the login page.
    pub identity: Option<String>,
    pub body: ViewBody,
    pub notices: Vec<Notice>,
}

impl PageView {
    pub fn with_notice(mut self, notice: Notice) -> Self {
        self.notices.push(notice);
        self
    }

    pub fn warnings(&self) -> impl Iterator<Item = &str> {
        self.notices.iter().filter_map(|notice| match notice {
            Notice::Warning(message) => Some(message.as_str()),
            _ => None,
        })
    }
}
