use barmaster_core::{BarConfig, ClaimPolicy, StorageBackend};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "barmaster")]
#[command(author, version, about = "Bar Master back office: recipes, inventory and the job board")]
pub struct Cli {
    /// Path to a TOML config file
    #[arg(long, env = "BARMASTER_CONFIG")]
    pub config: Option<PathBuf>,

    /// SQLite database file (overrides config)
    #[arg(long, env = "BARMASTER_DB")]
    pub db: Option<PathBuf>,

    /// Keep all data in memory for this run
    #[arg(long, conflicts_with = "db")]
    pub memory: bool,

    /// Absolute directory for log files (overrides config)
    #[arg(long)]
    pub log_dir: Option<PathBuf>,

    /// Log level: trace, debug, info, warn or error
    #[arg(long)]
    pub log_level: Option<String>,

    /// What a claim does when the job is already taken
    #[arg(long, value_enum)]
    pub claim_policy: Option<ClaimPolicyArg>,

    /// Do not insert demo rows into empty tables
    #[arg(long)]
    pub no_seed: bool,

    /// Print each page as JSON instead of text
    #[arg(long)]
    pub json: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ClaimPolicyArg {
    LastWriteWins,
    RequireOpen,
}

impl From<ClaimPolicyArg> for ClaimPolicy {
    fn from(value: ClaimPolicyArg) -> Self {
        match value {
            ClaimPolicyArg::LastWriteWins => ClaimPolicy::LastWriteWins,
            ClaimPolicyArg::RequireOpen => ClaimPolicy::RequireOpen,
        }
    }
}

impl Cli {
    /// Layers command-line overrides on top of the file config.
    pub fn apply_overrides(&self, config: &mut BarConfig) {
        if self.memory {
            config.storage.backend = StorageBackend::Memory;
        }
        if let Some(db) = &self.db {
            config.storage.backend = StorageBackend::Sqlite;
            config.storage.db_path = db.clone();
        }
        if let Some(dir) = &self.log_dir {
            config.logging.dir = Some(dir.clone());
        }
        if let Some(level) = &self.log_level {
            config.logging.level = level.clone();
        }
        if let Some(policy) = self.claim_policy {
            config.jobs.claim_policy = policy.into();
        }
        if self.no_seed {
            config.storage.seed_demo = false;
        }
    }
}
