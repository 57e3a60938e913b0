use anyhow::Result;
use std::path::Path;
use tracing::level_filters::LevelFilter;
use tracing::warn;
use tracing_appender::rolling::Rotation;
use tracing_subscriber::EnvFilter;

const LOG_FILE_PREFIX: &str = "wlr";

/// Filter directives: `log_level` for this crate, else `RUST_LOG` verbatim,
/// else `info` for this crate
fn filter_directives(log_level: Option<LevelFilter>, rust_log: Option<String>) -> String {
    match (log_level, rust_log) {
        (Some(level), _) => format!("{}={level}", env!("CARGO_CRATE_NAME")),
        (None, Some(rust_log)) if !rust_log.trim().is_empty() => rust_log,
        (None, _) => format!("{}=info", env!("CARGO_CRATE_NAME")),
    }
}

/// Route tracing output to a daily rolling file under `logs_dir`
///
/// The terminal belongs to the UI, so nothing is written to stdout.
pub fn enable_logging(logs_dir: &Path, log_level: Option<LevelFilter>) -> Result<()> {
    let appender = tracing_appender::rolling::Builder::new()
        .rotation(Rotation::DAILY)
        .max_log_files(5)
        .filename_prefix(LOG_FILE_PREFIX)
        .filename_suffix("log")
        .build(logs_dir)?;

    let directives = filter_directives(log_level, std::env::var("RUST_LOG").ok());
    let (filter, rejected) = match EnvFilter::try_new(&directives) {
        Ok(filter) => (filter, None),
        Err(e) => (EnvFilter::new(filter_directives(None, None)), Some(e)),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(appender)
        .with_ansi(false)
        .init();

    if let Some(e) = rejected {
        warn!("Ignoring invalid log filter {:?}: {}", directives, e);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_flag_applies_to_this_crate() {
        let directives = filter_directives(Some(LevelFilter::DEBUG), Some("trace".to_string()));
        assert_eq!(directives.to_lowercase(), format!("{}=debug", env!("CARGO_CRATE_NAME")));
    }

    #[test]
    fn test_rust_log_used_verbatim() {
        let rust_log = format!("warn,{}::app=trace", env!("CARGO_CRATE_NAME"));
        let directives = filter_directives(None, Some(rust_log.clone()));
        assert_eq!(directives, rust_log);
        assert!(EnvFilter::try_new(&directives).is_ok());
    }

    #[test]
    fn test_default_is_info() {
        assert_eq!(filter_directives(None, None), format!("{}=info", env!("CARGO_CRATE_NAME")));
        assert_eq!(filter_directives(None, Some("  ".to_string())), format!("{}=info", env!("CARGO_CRATE_NAME")));
    }
}
