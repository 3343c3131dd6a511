//! Plain-text drawing of page snapshots.

use barmaster_core::{Job, Notice, Page, PageView, ViewBody};
use std::fmt::{self, Display, Formatter};

/// Text form of a page snapshot, printed by the REPL.
pub struct Screen<'a>(pub &'a PageView);

impl Display for Screen<'_> {
    fn fmt(&self, out: &mut Formatter<'_>) -> fmt::Result {
        render_text(out, self.0)
    }
}

fn render_text(out: &mut Formatter<'_>, view: &PageView) -> fmt::Result {
    writeln!(out, "== {} ==", view.page)?;
    if let Some(identity) = &view.identity {
        let menu = Page::MENU
            .iter()
            .map(|page| {
                if *page == view.page {
                    format!("[{page}]")
                } else {
                    page.to_string()
                }
            })
            .collect::<Vec<_>>()
            .join(" | ");
        writeln!(out, "Hi, {identity}   {menu}")?;
    }

    match &view.body {
        ViewBody::Login => {
            writeln!(out, "Log in with: login <user> <password>")?;
        }
        ViewBody::Recipes { query, recipes } => {
            if !query.is_empty() {
                writeln!(out, "Search: {query}")?;
            }
            if recipes.is_empty() {
                writeln!(out, "(no recipes)")?;
            }
            for recipe in recipes {
                writeln!(out, "* {}", recipe.name)?;
                for ingredient in &recipe.ingredients {
                    let amount = ingredient.quantity.to_string();
                    if amount.is_empty() {
                        writeln!(out, "    - {}", ingredient.name)?;
                    } else {
                        writeln!(out, "    - {}: {amount}", ingredient.name)?;
                    }
                }
            }
        }
        ViewBody::Inventory { items } => {
            if items.is_empty() {
                writeln!(out, "(inventory is empty)")?;
            }
            for item in items {
                writeln!(out, "  - {item}")?;
            }
        }
        ViewBody::JobCenter { open, mine } => {
            writeln!(out, "Open jobs:")?;
            for job in open {
                writeln!(out, "  {}", job_line(job))?;
            }
            writeln!(out, "My jobs:")?;
            if mine.is_empty() {
                writeln!(out, "  (none)")?;
            }
            for job in mine {
                writeln!(out, "  {} [confirmed]", job_line(job))?;
            }
        }
        ViewBody::Profile { identity } => {
            writeln!(out, "ID: {identity}")?;
            writeln!(out, "Type `logout` to sign out.")?;
        }
    }

    for notice in &view.notices {
        match notice {
            Notice::Success(message) => writeln!(out, "ok: {message}")?,
            Notice::Info(message) => writeln!(out, "note: {message}")?,
            Notice::Warning(message) => writeln!(out, "warning: {message}")?,
        }
    }

    Ok(())
}

fn job_line(job: &Job) -> String {
    format!(
        "#{} {} | {} | {} | {}",
        job.id, job.title, job.date, job.location, job.budget
    )
}
