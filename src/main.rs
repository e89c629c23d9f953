mod config;
mod db;
mod engine;
mod export;
mod input;
mod insight;
mod logging;
mod models;
mod run;
mod state;
mod ui;

use anyhow::{Context, Result};
use std::path::PathBuf;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let dirs = project_dirs()?;

    let config = config::Config::load(&dirs.config)?.with_env(|var| std::env::var(var).ok());
    logging::init(&dirs.data.join("yearbudget.log"), &config.log.level)?;

    let db = db::Database::open(&dirs.data.join("yearbudget.db"))?;
    let state = db.load_state(&config.fallback_category)?;
    tracing::info!(
        args = args.len().saturating_sub(1),
        insight_key = config.insight.api_key.is_some(),
        "Starting yearbudget {}",
        env!("CARGO_PKG_VERSION")
    );

    match args.len() {
        1 => run::as_tui(&db, state, &config),
        _ => run::as_cli(&args, &db, state, &config),
    }
}

struct Dirs {
    data: PathBuf,
    /// Path of `config.toml`; the file itself may not exist.
    config: PathBuf,
}

fn project_dirs() -> Result<Dirs> {
    let proj_dirs = directories::ProjectDirs::from("com", "yearbudget", "YearBudget")
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
    let data_dir = proj_dirs.data_dir();
    std::fs::create_dir_all(data_dir)
        .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;
    Ok(Dirs {
        data: data_dir.to_path_buf(),
        config: proj_dirs.config_dir().join("config.toml"),
    })
}
