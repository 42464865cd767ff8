use std::{env, env::VarError, path::PathBuf, str::FromStr};

use log::{debug, error, info};

use crate::{
    audit::DEFAULT_AUDIT_LOG,
    error::{Result, SortError},
    matching::{DEFAULT_THRESHOLD, MatchStrategy, Scorer},
};

const DEFAULT_LOCK_RETRIES: u32 = 5;

#[derive(Debug, Clone)]
pub struct Config {
    pub source_dir: PathBuf,
    pub target_dir: PathBuf,
    pub threshold: u8,
    pub strategy: MatchStrategy,
    pub scorer: Scorer,
    pub audit_log: PathBuf,
    pub record_successes: bool,
    pub dry_run: bool,
    pub lock_retries: u32,
}

impl Config {
    /// Load configuration from the process environment, reading `.env`
    /// first when present.
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is missing or a value does
    /// not parse.
    pub fn from_env() -> Result<Self> {
        debug!("Loading configuration from environment");
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key))
    }

    /// Build the configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is missing or a value does
    /// not parse.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> std::result::Result<String, VarError>,
    {
        let source_dir = required(&lookup, "DOCSORT_SOURCE_DIR")?;
        let target_dir = required(&lookup, "DOCSORT_TARGET_DIR")?;

        let threshold = optional(&lookup, "DOCSORT_THRESHOLD", DEFAULT_THRESHOLD)?;
        if threshold > 100 {
            return Err(SortError::Config(format!(
                "DOCSORT_THRESHOLD must be between 0 and 100, got {threshold}"
            )));
        }

        let config = Self {
            source_dir: PathBuf::from(source_dir),
            target_dir: PathBuf::from(target_dir),
            threshold,
            strategy: optional(&lookup, "DOCSORT_STRATEGY", MatchStrategy::default())?,
            scorer: optional(&lookup, "DOCSORT_SCORER", Scorer::default())?,
            audit_log: optional(&lookup, "DOCSORT_AUDIT_LOG", PathBuf::from(DEFAULT_AUDIT_LOG))?,
            record_successes: optional(&lookup, "DOCSORT_RECORD_SUCCESSES", false)?,
            dry_run: optional(&lookup, "DOCSORT_DRY_RUN", false)?,
            lock_retries: optional(&lookup, "DOCSORT_LOCK_RETRIES", DEFAULT_LOCK_RETRIES)?,
        };

        info!("Configuration loaded successfully");
        debug!("Source directory: {}", config.source_dir.display());
        debug!("Target directory: {}", config.target_dir.display());
        debug!(
            "Matching: threshold={}, strategy={}, scorer={}",
            config.threshold, config.strategy, config.scorer
        );
        debug!("Audit log: {}", config.audit_log.display());

        Ok(config)
    }
}

fn required<F>(lookup: &F, key: &str) -> Result<String>
where
    F: Fn(&str) -> std::result::Result<String, VarError>,
{
    lookup(key).map_err(|e| {
        error!("Failed to load {key} from environment: {e}");
        e.into()
    })
}

fn optional<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> std::result::Result<String, VarError>,
    T: FromStr,
{
    match lookup(key) {
        Ok(value) => value.trim().parse().map_err(|_| {
            error!("Invalid value for {key}: '{value}'");
            SortError::Config(format!("invalid value for {key}: '{value}'"))
        }),
        Err(VarError::NotPresent) => Ok(default),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> std::result::Result<String, VarError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned().ok_or(VarError::NotPresent)
    }

    const DIRS: [(&str, &str); 2] = [
        ("DOCSORT_SOURCE_DIR", "Generated_PDF"),
        ("DOCSORT_TARGET_DIR", "Generated_FOLDER"),
    ];

    #[test]
    fn defaults_apply() -> Result<()> {
        let config = Config::from_lookup(lookup(&DIRS))?;
        assert_eq!(config.source_dir, PathBuf::from("Generated_PDF"));
        assert_eq!(config.threshold, 80);
        assert_eq!(config.strategy, MatchStrategy::First);
        assert_eq!(config.scorer, Scorer::Ratio);
        assert_eq!(config.audit_log, PathBuf::from("errors/error_log.jsonl"));
        assert!(!config.record_successes);
        assert!(!config.dry_run);
        assert_eq!(config.lock_retries, 5);
        Ok(())
    }

    #[test]
    fn overrides_parse() -> Result<()> {
        let mut vars = DIRS.to_vec();
        vars.extend([
            ("DOCSORT_THRESHOLD", "90"),
            ("DOCSORT_STRATEGY", "best"),
            ("DOCSORT_SCORER", "jaro_winkler"),
            ("DOCSORT_DRY_RUN", "true"),
            ("DOCSORT_LOCK_RETRIES", " 2 "),
        ]);
        let config = Config::from_lookup(lookup(&vars))?;
        assert_eq!(config.threshold, 90);
        assert_eq!(config.strategy, MatchStrategy::Best);
        assert_eq!(config.scorer, Scorer::JaroWinkler);
        assert!(config.dry_run);
        assert_eq!(config.lock_retries, 2);
        Ok(())
    }

    #[test]
    fn missing_required_variable_fails() {
        let result = Config::from_lookup(lookup(&DIRS[..1]));
        assert!(matches!(result, Err(SortError::EnvVar(VarError::NotPresent))));
    }

    #[test]
    fn out_of_range_threshold_fails() {
        let mut vars = DIRS.to_vec();
        vars.push(("DOCSORT_THRESHOLD", "150"));
        assert!(matches!(Config::from_lookup(lookup(&vars)), Err(SortError::Config(_))));
    }

    #[test]
    fn unparsable_value_fails() {
        let mut vars = DIRS.to_vec();
        vars.push(("DOCSORT_STRATEGY", "random"));
        assert!(matches!(Config::from_lookup(lookup(&vars)), Err(SortError::Config(_))));
    }
}
