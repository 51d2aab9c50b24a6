//! Where the CLI keeps its store, and how loud it logs.

use std::path::PathBuf;

use tracing_subscriber::EnvFilter;

/// Directory name under the platform data directory.
const APP_DIR: &str = "SigTail";

/// Fallback store when the platform has no data directory.
const FALLBACK_DIR: &str = ".sigtail";

/// Resolve the store directory.
///
/// `--home` / `SIGTAIL_HOME` wins; otherwise the platform's local data
/// directory joined with `SigTail` (e.g. `~/.local/share/SigTail`).
pub fn store_dir(home: Option<PathBuf>) -> PathBuf {
    home.unwrap_or_else(|| {
        dirs::data_local_dir()
            .map(|d| d.join(APP_DIR))
            .unwrap_or_else(|| PathBuf::from(FALLBACK_DIR))
    })
}

/// Default log filter for a given `-v` count. `RUST_LOG` overrides it.
pub fn default_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "sigtail=warn,sigtail_cli=warn",
        1 => "sigtail=info,sigtail_cli=info",
        _ => "sigtail=debug,sigtail_cli=debug",
    }
}

/// Install the stderr `tracing` subscriber.
pub fn init_logging(verbose: u8) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(verbose).into()),
        )
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_home_wins() {
        let dir = PathBuf::from("/tmp/elsewhere");
        assert_eq!(store_dir(Some(dir.clone())), dir);
    }

    #[test]
    fn default_home_ends_with_app_dir() {
        let dir = store_dir(None);
        assert!(dir.ends_with(APP_DIR) || dir.ends_with(FALLBACK_DIR), "got {}", dir.display());
    }

    #[test]
    fn verbosity_raises_level() {
        assert!(default_filter(0).contains("warn"));
        assert!(default_filter(1).contains("info"));
        assert!(default_filter(5).contains("debug"));
    }
}
