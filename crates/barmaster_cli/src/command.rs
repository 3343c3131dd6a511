//! Line commands typed at the `barmaster>` prompt.

use barmaster_core::{Action, Page};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Action(Action),
    Show,
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  login <user> <password>   log in
  logout                    log out
  open <page>               recipes | inventory | jobs | profile
  search [text]             filter recipes by name (empty shows all)
  add <item>                add an ingredient to inventory
  remove <item>             remove an ingredient from inventory
  claim <job id>            take an open job
  show                      redraw the current page
  help                      this text
  quit                      leave";

pub fn parse_line(line: &str) -> Result<Command, String> {
    let line = line.trim();
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    let command = match verb.to_ascii_lowercase().as_str() {
        "login" => {
            let mut parts = rest.split_whitespace();
            match (parts.next(), parts.next(), parts.next()) {
                (Some(username), Some(password), None) => Action::Login {
                    username: username.to_string(),
                    password: password.to_string(),
                },
                _ => return Err("usage: login <user> <password>".to_string()),
            }
        }
        "logout" => Action::Logout,
        "open" => match Page::parse(rest) {
            Some(page) => Action::Open(page),
            None => return Err(format!("unknown page `{rest}`")),
        },
        "search" => Action::Search {
            query: rest.to_string(),
        },
        "add" => Action::AddItem {
            name: required(rest, "add <item>")?,
        },
        "remove" | "rm" => Action::RemoveItem {
            name: required(rest, "remove <item>")?,
        },
        "claim" => {
            let job_id = rest
                .parse()
                .map_err(|_| format!("`{rest}` is not a job id"))?;
            Action::Claim { job_id }
        }
        "show" | "" => return Ok(Command::Show),
        "help" | "?" => return Ok(Command::Help),
        "quit" | "exit" => return Ok(Command::Quit),
        other => return Err(format!("unknown command `{other}`; type `help`")),
    };

    Ok(Command::Action(command))
}

fn required(value: &str, usage: &str) -> Result<String, String> {
    if value.is_empty() {
        return Err(format!("usage: {usage}"));
    }
    Ok(value.to_string())
}
