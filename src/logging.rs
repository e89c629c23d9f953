use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::{Mutex, Once};
use tracing_subscriber::{fmt, EnvFilter};

static TRACING_INIT: Once = Once::new();

/// Send tracing output to `path`. The terminal belongs to the dashboard,
/// so once this returns nothing is written to stdout or stderr. `RUST_LOG`
/// overrides `level`.
pub(crate) fn init(path: &Path, level: &str) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(directive(level)))
        .context("Invalid log filter")?;

    TRACING_INIT.call_once(|| {
        // A subscriber installed elsewhere (tests) is fine to keep.
        let _ = fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_target(false)
            .with_writer(Mutex::new(file))
            .try_init();
    });
    Ok(())
}

/// Filter directive for the configured level. An unknown level falls back
/// to `info` rather than keeping the app from starting.
fn directive(level: &str) -> String {
    let wanted = format!("yearbudget={}", level.trim());
    if EnvFilter::try_new(&wanted).is_ok() {
        return wanted;
    }
    eprintln!("Unknown log level '{level}' in config, using 'info'");
    "yearbudget=info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_levels_kept() {
        assert_eq!(directive("debug"), "yearbudget=debug");
        assert_eq!(directive(" warn "), "yearbudget=warn");
    }

    #[test]
    fn test_unknown_level_falls_back_to_info() {
        assert_eq!(directive("verbose"), "yearbudget=info");
    }
}
