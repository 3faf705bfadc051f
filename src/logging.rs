//! Tracing setup for the `pagestack` binary.
//!
//! Two optional sinks: a log file named by `PAGESTACK_LOG` and, with
//! `--verbose`, stderr. Stdout is left to the stack transcript.

use std::fs::File;
use std::path::PathBuf;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable naming the log file.
pub const LOG_ENV: &str = "PAGESTACK_LOG";

/// Where log output goes and how much of it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogSettings {
    /// Base path from `PAGESTACK_LOG`; the actual file gets a suffix.
    pub file: Option<PathBuf>,
    /// Mirror navigator logs to stderr at debug level.
    pub verbose: bool,
}

impl LogSettings {
    /// Settings from the environment plus the `--verbose` flag.
    pub fn from_env(verbose: bool) -> Self {
        Self {
            file: std::env::var_os(LOG_ENV)
                .filter(|path| !path.is_empty())
                .map(PathBuf::from),
            verbose,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.file.is_some() || self.verbose
    }

    /// Filter used when `RUST_LOG` is unset.
    pub fn default_directive(&self) -> &'static str {
        if self.verbose {
            "info,pagestack=debug"
        } else {
            "info"
        }
    }

    /// `{path}.{timestamp}.{pid}`, so concurrent runs never share a file.
    pub fn unique_file_path(&self) -> Option<PathBuf> {
        let base = self.file.as_ref()?;
        let timestamp = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        let mut name = base.as_os_str().to_os_string();
        name.push(format!(".{}.{}", timestamp, std::process::id()));
        Some(PathBuf::from(name))
    }
}

/// Install the global subscriber described by `settings`.
///
/// Does nothing when neither sink is enabled. A log file that cannot be
/// created is reported on stderr and skipped.
pub fn init_tracing(settings: &LogSettings) {
    if !settings.is_enabled() {
        return;
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(settings.default_directive()));

    let file_layer = settings.unique_file_path().and_then(|path| match File::create(&path) {
        Ok(file) => Some(
            fmt::layer()
                .with_writer(file)
                .with_ansi(false)
                .with_target(true),
        ),
        Err(err) => {
            eprintln!("Warning: failed to create log file {}: {}", path.display(), err);
            None
        }
    });

    let stderr_layer = settings.verbose.then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .compact()
    });

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stderr_layer)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_without_sinks() {
        let settings = LogSettings::default();
        assert!(!settings.is_enabled());
        assert!(settings.unique_file_path().is_none());
        assert_eq!(settings.default_directive(), "info");
    }

    #[test]
    fn test_verbose_raises_crate_level() {
        let settings = LogSettings {
            file: None,
            verbose: true,
        };
        assert!(settings.is_enabled());
        assert_eq!(settings.default_directive(), "info,pagestack=debug");
    }

    #[test]
    fn test_file_path_gets_pid_suffix() {
        let settings = LogSettings {
            file: Some(PathBuf::from("/tmp/pagestack.log")),
            verbose: false,
        };
        let path = settings.unique_file_path().unwrap();
        let name = path.to_string_lossy();
        assert!(name.starts_with("/tmp/pagestack.log."));
        assert!(name.ends_with(&format!(".{}", std::process::id())));
    }
}
