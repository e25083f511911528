//! Constants used throughout the application.
//!
//! This module contains all constants used in the moodlog application, organized
//! into logical groups. Having constants centralized makes them easier to find,
//! modify, and reference consistently.

// Application Metadata
/// The name of the application.
pub const APP_NAME: &str = "moodlog";
/// The description of the application used in CLI help text.
pub const APP_DESCRIPTION: &str = "A private mood journal with encrypted entries";

// CLI Arguments & Defaults
/// Log format identifier for plain text.
pub const LOG_FORMAT_TEXT: &str = "text";
/// Log format identifier for JSON.
pub const LOG_FORMAT_JSON: &str = "json";
/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

// Configuration Keys & Environment Variables
/// Environment variable for the database path.
pub const ENV_VAR_MOODLOG_DB: &str = "MOODLOG_DB";
/// Environment variable for the owner identity supplied by the host.
pub const ENV_VAR_MOODLOG_USER: &str = "MOODLOG_USER";
/// Standard environment variable for the login name, used as a fallback identity.
pub const ENV_VAR_USER: &str = "USER";
/// Environment variable for the display name used for community posts.
pub const ENV_VAR_MOODLOG_DISPLAY_NAME: &str = "MOODLOG_DISPLAY_NAME";
/// Environment variable for the reference frame offset (`±HH:MM`).
pub const ENV_VAR_MOODLOG_UTC_OFFSET: &str = "MOODLOG_UTC_OFFSET";
/// Environment variable holding the shared entry secret.
pub const ENV_VAR_MOODLOG_KEY: &str = "MOODLOG_KEY";
/// Standard environment variable for the user's home directory.
pub const ENV_VAR_HOME: &str = "HOME";
/// Default database location relative to the user's home directory.
pub const DEFAULT_DB_SUBPATH: &str = ".local/share/moodlog/moodlog.db";
/// Default reference frame offset.
pub const DEFAULT_UTC_OFFSET: &str = "+00:00";

// Validation
/// Placeholder string for redacted information in debug output.
pub const REDACTED_PLACEHOLDER: &str = "[REDACTED]";

// Crypto
/// Prefix identifying version 1 of the entry ciphertext format.
pub const CIPHERTEXT_V1_PREFIX: &str = "v1:";
/// Associated data bound into every version 1 ciphertext.
pub const CIPHERTEXT_V1_AAD: &[u8] = b"moodlog.entry.v1";
/// XChaCha20-Poly1305 nonce length in bytes.
pub const NONCE_LEN: usize = 24;
/// Poly1305 authentication tag length in bytes.
pub const TAG_LEN: usize = 16;
/// Length of the derived entry key in bytes.
pub const ENTRY_KEY_LEN: usize = 32;
/// Fixed Argon2id salt. The secret is shared and static, so the salt only
/// separates this derivation from other uses of the same secret.
pub const KEY_DERIVATION_SALT: &[u8] = b"moodlog.entry-key.v1";
/// Number of hex characters shown for a key fingerprint.
pub const KEY_FINGERPRINT_HEX_LEN: usize = 16;
/// Text shown in place of an entry that could not be decrypted.
pub const UNDECRYPTABLE_PLACEHOLDER: &str = "[unable to decrypt entry]";

// Date/Time Logic
/// Date format string for ISO date format (YYYY-MM-DD).
pub const DATE_FORMAT_ISO: &str = "%Y-%m-%d";
/// Time format used when listing entries.
pub const LIST_TIME_FORMAT: &str = "%H:%M";

// Logging Configuration
/// Service name used in tracing spans and structured logs.
pub const TRACING_SERVICE_NAME: &str = "moodlog";
/// Name for the root tracing span covering an application invocation.
pub const TRACING_ROOT_SPAN_NAME: &str = "app_invocation";
