use std::time::Duration;

use crate::best_score::BEST_SCORE_KEY;
use crate::error::ConfigError;

const DB_URL_VAR: &str = "QUIZ_DB_URL";
const TICK_MS_VAR: &str = "QUIZ_TICK_MS";

/// Default refresh period of the elapsed-time display.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(250);

/// Runtime settings for quiz services.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizSettings {
    /// `SQLite` URL for the best score; in-memory storage when unset.
    pub db_url: Option<String>,
    pub tick_interval: Duration,
    pub best_score_key: String,
}

impl Default for QuizSettings {
    fn default() -> Self {
        Self {
            db_url: None,
            tick_interval: DEFAULT_TICK_INTERVAL,
            best_score_key: BEST_SCORE_KEY.to_owned(),
        }
    }
}

impl QuizSettings {
    /// Read settings from `QUIZ_DB_URL` and `QUIZ_TICK_MS`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unusable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Same as `from_env`, reading variables through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unusable value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut settings = Self::default();

        if let Some(raw) = lookup(DB_URL_VAR) {
            let url = raw.trim();
            if url.is_empty() {
                return Err(ConfigError::BlankDbUrl { var: DB_URL_VAR });
            }
            settings.db_url = Some(normalize_sqlite_url(url));
        }

        if let Some(raw) = lookup(TICK_MS_VAR) {
            let millis = raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|ms| *ms > 0)
                .ok_or(ConfigError::InvalidTickInterval {
                    var: TICK_MS_VAR,
                    raw: raw.clone(),
                })?;
            settings.tick_interval = Duration::from_millis(millis);
        }

        Ok(settings)
    }

    #[must_use]
    pub fn with_db_url(mut self, url: impl Into<String>) -> Self {
        self.db_url = Some(normalize_sqlite_url(&url.into()));
        self
    }
}

/// Bare paths become `sqlite://` URLs; anything with a scheme is kept.
fn normalize_sqlite_url(raw: &str) -> String {
    if raw.starts_with("sqlite:") {
        raw.to_owned()
    } else {
        format!("sqlite://{raw}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_without_variables() {
        let settings = QuizSettings::from_lookup(lookup(&[])).unwrap();
        assert_eq!(settings, QuizSettings::default());
        assert_eq!(settings.tick_interval, Duration::from_millis(250));
        assert_eq!(settings.best_score_key, "bestScore");
    }

    #[test]
    fn reads_db_url_and_tick() {
        let settings = QuizSettings::from_lookup(lookup(&[
            ("QUIZ_DB_URL", "quiz.sqlite3"),
            ("QUIZ_TICK_MS", "1000"),
        ]))
        .unwrap();
        assert_eq!(settings.db_url.as_deref(), Some("sqlite://quiz.sqlite3"));
        assert_eq!(settings.tick_interval, Duration::from_secs(1));
    }

    #[test]
    fn keeps_explicit_sqlite_urls() {
        let settings =
            QuizSettings::from_lookup(lookup(&[("QUIZ_DB_URL", "sqlite::memory:")])).unwrap();
        assert_eq!(settings.db_url.as_deref(), Some("sqlite::memory:"));
    }

    #[test]
    fn rejects_zero_or_garbage_tick() {
        for raw in ["0", "-5", "fast"] {
            let err = QuizSettings::from_lookup(lookup(&[("QUIZ_TICK_MS", raw)])).unwrap_err();
            assert!(matches!(err, ConfigError::InvalidTickInterval { .. }));
        }
    }

    #[test]
    fn rejects_blank_db_url() {
        let err = QuizSettings::from_lookup(lookup(&[("QUIZ_DB_URL", "  ")])).unwrap_err();
        assert_eq!(err, ConfigError::BlankDbUrl { var: "QUIZ_DB_URL" });
    }
}
