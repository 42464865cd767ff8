pub mod audit;
pub mod config;
pub mod error;
pub mod matching;
pub mod router;
pub mod sorter;

use log::{debug, info, warn};

use audit::{AuditSink, Audited, JsonlAuditLog, MemoryAuditSink, RetryPolicy};
use config::Config;
use error::Result;
use matching::Matcher;
use sorter::{SortReport, Sorter};

pub use matching::{MatchResult, exact_match, find_name_in_string, normalize};

/// Sort the configured source directory into the target folders.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or a directory cannot
/// be read. Individual failed moves are reported, not returned.
pub fn run() -> Result<SortReport> {
    info!("Initializing sorter");
    let config = Config::from_env()?;
    sort_configured(&config)
}

/// Sort according to an already loaded [`Config`]. Dry runs keep their
/// audit rows in memory and never touch the audit log.
///
/// # Errors
///
/// Returns an error if a directory cannot be read.
pub fn sort_configured(config: &Config) -> Result<SortReport> {
    if config.dry_run {
        debug!("Dry run, audit rows stay in memory");
        return sort_with(config, MemoryAuditSink::new());
    }

    debug!("Opening audit log at {}", config.audit_log.display());
    let audit_log = JsonlAuditLog::new(&config.audit_log).with_retry(RetryPolicy {
        max_attempts: config.lock_retries,
        ..RetryPolicy::default()
    });
    sort_with(config, audit_log)
}

fn sort_with<S: AuditSink>(config: &Config, sink: S) -> Result<SortReport> {
    let audited = Audited::new(sink).record_successes(config.record_successes);
    let matcher = Matcher::new()
        .with_threshold(config.threshold)
        .with_strategy(config.strategy)
        .with_scorer(config.scorer);

    let sorter = Sorter::new(matcher, audited).dry_run(config.dry_run);
    let report = sorter.sort(&config.source_dir, &config.target_dir)?;

    for failed in &report.failed {
        warn!("Could not move {}: {}", failed.source.display(), failed.error);
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::*;
    use crate::matching::{DEFAULT_THRESHOLD, MatchStrategy, Scorer};

    #[test]
    fn dry_run_never_writes_the_audit_log() -> Result<()> {
        let root = tempdir()?;
        let source_dir = root.path().join("in");
        let target_dir = root.path().join("out");
        fs::create_dir(&source_dir)?;
        fs::create_dir_all(target_dir.join("John Doe"))?;
        fs::write(source_dir.join("AG John Doe.pdf"), "pdf")?;

        let config = Config {
            source_dir: source_dir.clone(),
            target_dir,
            threshold: DEFAULT_THRESHOLD,
            strategy: MatchStrategy::First,
            scorer: Scorer::Ratio,
            audit_log: root.path().join("errors").join("error_log.jsonl"),
            record_successes: true,
            dry_run: true,
            lock_retries: 1,
        };

        let report = sort_configured(&config)?;

        assert_eq!(report.moved.len(), 1);
        assert!(source_dir.join("AG John Doe.pdf").exists());
        assert!(!config.audit_log.exists());
        assert!(!root.path().join("errors").exists());
        Ok(())
    }
}
