//! Configuration management for the moodlog application.
//!
//! This module loads and validates configuration settings from environment
//! variables, with sensible defaults. The shared entry secret is deliberately
//! not part of `Config`; it is read by a `KeyProvider` at startup.
//!
//! # Environment Variables
//!
//! - `MOODLOG_DB`: Path to the SQLite database (defaults to ~/.local/share/moodlog/moodlog.db)
//! - `MOODLOG_USER`: Identity of the journal owner
//! - `USER`: Fallback owner identity if MOODLOG_USER is not set
//! - `MOODLOG_DISPLAY_NAME`: Name community posts are attributed to (defaults to the owner)
//! - `MOODLOG_UTC_OFFSET`: Reference frame for calendar days (defaults to +00:00)
//! - `HOME`: Used for expanding the default database path

use crate::constants::{
    DEFAULT_DB_SUBPATH, DEFAULT_UTC_OFFSET, ENV_VAR_HOME, ENV_VAR_MOODLOG_DB,
    ENV_VAR_MOODLOG_DISPLAY_NAME, ENV_VAR_MOODLOG_USER, ENV_VAR_MOODLOG_UTC_OFFSET,
    ENV_VAR_USER, REDACTED_PLACEHOLDER,
};
use crate::errors::{AppError, AppResult};
use crate::journal_core::ReferenceFrame;
use std::env;
use std::fmt;
use std::path::PathBuf;

/// Configuration for the moodlog application.
///
/// # Examples
///
/// Creating a configuration manually:
/// ```
/// use moodlog::Config;
/// use moodlog::journal_core::ReferenceFrame;
/// use std::path::PathBuf;
///
/// let config = Config {
///     db_path: PathBuf::from("/tmp/moodlog.db"),
///     user: "alice".to_string(),
///     display_name: "Alice".to_string(),
///     frame: ReferenceFrame::utc(),
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone)]
pub struct Config {
    /// Location of the SQLite database file.
    pub db_path: PathBuf,

    /// Owner identity supplied by the host environment.
    pub user: String,

    /// Author name for community posts.
    pub display_name: String,

    /// Timezone in which entry timestamps become calendar days.
    pub frame: ReferenceFrame,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("db_path", &REDACTED_PLACEHOLDER)
            .field("user", &REDACTED_PLACEHOLDER)
            .field("display_name", &REDACTED_PLACEHOLDER)
            .field("frame", &self.frame)
            .finish()
    }
}

impl Config {
    /// Loads configuration from environment variables with sensible defaults.
    ///
    /// The database path is expanded with `shellexpand`, so `~` and
    /// `$VAR` references work.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if:
    /// - The database path expansion fails
    /// - Neither MOODLOG_USER nor USER is set
    /// - MOODLOG_UTC_OFFSET is not a valid offset
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use moodlog::Config;
    ///
    /// match Config::load() {
    ///     Ok(config) => println!("Loaded config for frame {}", config.frame),
    ///     Err(err) => eprintln!("Failed to load config: {}", err),
    /// }
    /// ```
    pub fn load() -> AppResult<Self> {
        Self::load_with_overrides(None, None)
    }

    /// Like [`Config::load`], with command-line values taking the place of
    /// `MOODLOG_DB` and `MOODLOG_USER` when given.
    ///
    /// An overridden user also becomes the default display name.
    ///
    /// # Errors
    ///
    /// Same as [`Config::load`].
    pub fn load_with_overrides(db: Option<&str>, user: Option<&str>) -> AppResult<Self> {
        let db_path_str = match db {
            Some(path) => path.to_string(),
            None => env::var(ENV_VAR_MOODLOG_DB).unwrap_or_else(|_| {
                let home = env::var(ENV_VAR_HOME).unwrap_or_default();
                format!("{}/{}", home, DEFAULT_DB_SUBPATH)
            }),
        };
        let expanded_path = shellexpand::full(&db_path_str)
            .map_err(|e| AppError::Config(format!("Failed to expand path: {}", e)))?;
        let db_path = PathBuf::from(expanded_path.into_owned());

        let user = match user {
            Some(user) => user.to_string(),
            None => env::var(ENV_VAR_MOODLOG_USER)
                .or_else(|_| env::var(ENV_VAR_USER))
                .map_err(|_| {
                    AppError::Config(format!(
                        "No user identity found. Set {} or {}",
                        ENV_VAR_MOODLOG_USER, ENV_VAR_USER
                    ))
                })?,
        };

        let display_name = env::var(ENV_VAR_MOODLOG_DISPLAY_NAME)
            .ok()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| user.clone());

        let offset =
            env::var(ENV_VAR_MOODLOG_UTC_OFFSET).unwrap_or_else(|_| DEFAULT_UTC_OFFSET.to_string());
        let frame = ReferenceFrame::parse(&offset)?;

        let config = Config {
            db_path,
            user,
            display_name,
            frame,
        };
        config.validate()?;

        Ok(config)
    }

    /// Validates that the configuration is usable.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` with one of the following messages:
    /// - "Database path is empty"
    /// - "Database path must be an absolute path"
    /// - "User identity is empty"
    /// - "Display name is empty"
    pub fn validate(&self) -> AppResult<()> {
        if self.db_path.as_os_str().is_empty() {
            return Err(AppError::Config("Database path is empty".to_string()));
        }

        if !self.db_path.is_absolute() {
            return Err(AppError::Config(
                "Database path must be an absolute path".to_string(),
            ));
        }

        if self.user.trim().is_empty() {
            return Err(AppError::Config("User identity is empty".to_string()));
        }

        if self.display_name.trim().is_empty() {
            return Err(AppError::Config("Display name is empty".to_string()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    const VARS: [&str; 5] = [
        ENV_VAR_MOODLOG_DB,
        ENV_VAR_MOODLOG_USER,
        ENV_VAR_USER,
        ENV_VAR_MOODLOG_DISPLAY_NAME,
        ENV_VAR_MOODLOG_UTC_OFFSET,
    ];

    /// Runs `f` with the given variables set and every other config variable
    /// cleared, restoring the original environment afterwards.
    fn with_env<F: FnOnce()>(vars: &[(&str, &str)], f: F) {
        let saved: Vec<(&str, Option<String>)> =
            VARS.iter().map(|name| (*name, env::var(name).ok())).collect();
        for name in VARS {
            env::remove_var(name);
        }
        for (name, value) in vars {
            env::set_var(name, value);
        }

        f();

        for (name, value) in saved {
            match value {
                Some(v) => env::set_var(name, v),
                None => env::remove_var(name),
            }
        }
    }

    fn sample() -> Config {
        Config {
            db_path: PathBuf::from("/home/alice/private/moodlog.db"),
            user: "alice".to_string(),
            display_name: "Alice".to_string(),
            frame: ReferenceFrame::utc(),
        }
    }

    #[test]
    fn test_debug_impl_redacts_sensitive_info() {
        let debug_output = format!("{:?}", sample());

        assert!(debug_output.contains(REDACTED_PLACEHOLDER));
        assert!(!debug_output.contains("/home/alice/private"));
        assert!(!debug_output.contains("alice"));
        assert!(!debug_output.contains("Alice"));
    }

    #[test]
    #[serial]
    fn test_load_from_env() {
        with_env(
            &[
                (ENV_VAR_MOODLOG_DB, "/tmp/moodlog-test/db.sqlite"),
                (ENV_VAR_MOODLOG_USER, "alice"),
                (ENV_VAR_MOODLOG_DISPLAY_NAME, "Alice"),
                (ENV_VAR_MOODLOG_UTC_OFFSET, "+02:00"),
            ],
            || {
                let config = Config::load().unwrap();
                assert_eq!(config.db_path, PathBuf::from("/tmp/moodlog-test/db.sqlite"));
                assert_eq!(config.user, "alice");
                assert_eq!(config.display_name, "Alice");
                assert_eq!(config.frame, ReferenceFrame::parse("+02:00").unwrap());
            },
        );
    }

    #[test]
    #[serial]
    fn test_load_defaults() {
        with_env(
            &[
                (ENV_VAR_MOODLOG_DB, "/tmp/moodlog-test/db.sqlite"),
                (ENV_VAR_USER, "bob"),
            ],
            || {
                let config = Config::load().unwrap();
                assert_eq!(config.user, "bob");
                assert_eq!(config.display_name, "bob");
                assert_eq!(config.frame, ReferenceFrame::utc());
            },
        );
    }

    #[test]
    #[serial]
    fn test_moodlog_user_takes_precedence() {
        with_env(
            &[
                (ENV_VAR_MOODLOG_DB, "/tmp/moodlog-test/db.sqlite"),
                (ENV_VAR_USER, "bob"),
                (ENV_VAR_MOODLOG_USER, "carol"),
            ],
            || {
                assert_eq!(Config::load().unwrap().user, "carol");
            },
        );
    }

    #[test]
    #[serial]
    fn test_load_without_user_fails() {
        with_env(&[(ENV_VAR_MOODLOG_DB, "/tmp/moodlog-test/db.sqlite")], || {
            match Config::load() {
                Err(AppError::Config(msg)) => assert!(msg.contains(ENV_VAR_MOODLOG_USER)),
                other => panic!("Expected Config error, got {:?}", other),
            }
        });
    }

    #[test]
    #[serial]
    fn test_load_rejects_bad_offset() {
        with_env(
            &[
                (ENV_VAR_MOODLOG_DB, "/tmp/moodlog-test/db.sqlite"),
                (ENV_VAR_MOODLOG_USER, "alice"),
                (ENV_VAR_MOODLOG_UTC_OFFSET, "Europe/Paris"),
            ],
            || {
                assert!(matches!(Config::load(), Err(AppError::Config(_))));
            },
        );
    }

    #[test]
    #[serial]
    fn test_load_expands_db_path() {
        let home = env::var(ENV_VAR_HOME).unwrap_or_else(|_| "/".to_string());
        with_env(
            &[
                (ENV_VAR_MOODLOG_DB, "~/moodlog.db"),
                (ENV_VAR_MOODLOG_USER, "alice"),
            ],
            || {
                if home.starts_with('/') {
                    let config = Config::load().unwrap();
                    assert!(config.db_path.starts_with(&home));
                    assert!(config.db_path.ends_with("moodlog.db"));
                }
            },
        );
    }

    #[test]
    fn test_validate_rejects_relative_path() {
        let config = Config {
            db_path: PathBuf::from("relative/moodlog.db"),
            ..sample()
        };
        match config.validate() {
            Err(AppError::Config(msg)) => assert!(msg.contains("absolute")),
            _ => panic!("Expected Config error for relative path"),
        }
    }

    #[test]
    fn test_validate_rejects_empty_user() {
        let config = Config {
            user: " ".to_string(),
            ..sample()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    #[serial]
    fn test_overrides_replace_env() {
        with_env(
            &[
                (ENV_VAR_MOODLOG_DB, "/tmp/moodlog-test/db.sqlite"),
                (ENV_VAR_MOODLOG_USER, "alice"),
            ],
            || {
                let config =
                    Config::load_with_overrides(Some("/tmp/other/db.sqlite"), Some("dave")).unwrap();
                assert_eq!(config.db_path, PathBuf::from("/tmp/other/db.sqlite"));
                assert_eq!(config.user, "dave");
                assert_eq!(config.display_name, "dave");
            },
        );
    }

    #[test]
    #[serial]
    fn test_user_override_without_env_user() {
        with_env(&[(ENV_VAR_MOODLOG_DB, "/tmp/moodlog-test/db.sqlite")], || {
            let config = Config::load_with_overrides(None, Some("erin")).unwrap();
            assert_eq!(config.user, "erin");
        });
    }
}
