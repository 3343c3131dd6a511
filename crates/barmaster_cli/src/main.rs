//! Interactive front end for the Bar Master core.
//!
//! Reads one command per line, dispatches it to a `BarApp` and draws the
//! returned page snapshot.

mod cli;
mod command;
mod render;

use anyhow::{anyhow, Context, Result};
use barmaster_core::db::open_db;
use barmaster_core::seed::seed_demo;
use barmaster_core::{
    init_logging, AppError, BarApp, BarConfig, MemoryRecordStore, PageView, RecordStore,
    SqliteRecordStore, StorageBackend,
};
use clap::Parser;
use cli::Cli;
use command::{parse_line, Command, HELP};
use log::{info, warn};
use std::io::{self, BufRead, Write};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => BarConfig::load(path)?,
        None => BarConfig::default(),
    };
    cli.apply_overrides(&mut config);
    config.validate()?;

    if let Some(dir) = &config.logging.dir {
        init_logging(&config.logging.level, dir).map_err(|err| anyhow!(err))?;
    }

    match config.storage.backend {
        StorageBackend::Sqlite => {
            let conn = open_db(&config.storage.db_path).with_context(|| {
                format!("opening {}", config.storage.db_path.display())
            })?;
            let store = SqliteRecordStore::try_new(&conn)?;
            run(store, &config, cli.json)
        }
        StorageBackend::Memory => run(MemoryRecordStore::new(), &config, cli.json),
    }
}

fn run<S: RecordStore>(store: S, config: &BarConfig, json: bool) -> Result<()> {
    if config.storage.seed_demo {
        seed_demo(&store).context("seeding demo data")?;
    }

    let mut app = BarApp::new(store, config.credential_store(), config.jobs.claim_policy);
    info!(
        "event=session_start module=cli status=ok session={} claim_policy={}",
        app.session().id(),
        config.jobs.claim_policy.as_str()
    );

    draw(&app.render()?, json)?;

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    loop {
        write!(stdout, "barmaster> ")?;
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        match parse_line(&line) {
            Ok(Command::Quit) => break,
            Ok(Command::Help) => println!("{HELP}"),
            Ok(Command::Show) => match app.render() {
                Ok(view) => draw(&view, json)?,
                Err(err) => println!("error: {err}"),
            },
            Ok(Command::Action(action)) => match app.dispatch(action) {
                Ok(view) => draw(&view, json)?,
                Err(err @ AppError::Persistence(_)) => {
                    warn!("event=action_failed module=cli status=error error={err}");
                    println!("error: {err}");
                }
                Err(err) => println!("error: {err}"),
            },
            Err(message) => println!("{message}"),
        }
    }

    Ok(())
}

fn draw(view: &PageView, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(view)?);
    } else {
        print!("{}", render::Screen(view));
    }
    Ok(())
}
