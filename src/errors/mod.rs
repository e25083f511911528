//! Error handling utilities for the moodlog application.
//!
//! This module provides the central error type `AppError` which represents all
//! possible error conditions that might occur in the application, as well as the
//! convenience type alias `AppResult` for functions that can return these errors.
//!
//! `DecodeFailure` is deliberately separate from `AppError`: it is the per-entry
//! outcome of decrypting stored text and is handled by the caller (usually by
//! showing a placeholder) rather than propagated as a fault.

use thiserror::Error;

/// Reasons a stored ciphertext could not be turned back into entry text.
///
/// Every variant is recoverable. Wrong keys and tampered bytes both surface as
/// `Authentication`, since the AEAD tag cannot tell the two apart.
///
/// # Examples
///
/// ```
/// use moodlog::errors::DecodeFailure;
///
/// let failure = DecodeFailure::Authentication;
/// assert!(format!("{}", failure).contains("wrong key"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeFailure {
    /// The ciphertext does not start with a recognised format prefix.
    #[error("Unsupported ciphertext format")]
    UnsupportedFormat,

    /// The ciphertext body is not valid base64 or is too short to hold a nonce and tag.
    #[error("Malformed ciphertext: {0}")]
    Malformed(String),

    /// The authentication tag did not verify (wrong key or tampered data).
    #[error("Ciphertext failed authentication (wrong key or corrupted data)")]
    Authentication,

    /// Decryption succeeded but the plaintext is not UTF-8.
    #[error("Decrypted entry is not valid UTF-8")]
    InvalidUtf8,
}

/// Represents specific error cases that can occur during cryptographic operations.
///
/// # Examples
///
/// ```
/// use moodlog::errors::CryptoError;
///
/// let error = CryptoError::MissingKey("MOODLOG_KEY".to_string());
/// let message = format!("{}", error);
/// assert!(message.contains("MOODLOG_KEY"));
/// ```
#[derive(Debug, Error)]
pub enum CryptoError {
    /// No shared secret was available from the configured provider.
    #[error("No entry key configured. Set {0} to the shared journal secret.\n\nNote: entries written under a different secret cannot be decrypted.")]
    MissingKey(String),

    /// The shared secret was present but empty.
    #[error("Entry key cannot be empty")]
    EmptyKey,

    /// Reading the secret from the terminal failed.
    #[error("Failed to read entry key: {0}")]
    KeyPrompt(String),

    /// Argon2 rejected the derivation parameters or input.
    #[error("Key derivation failed: {0}")]
    KeyDerivation(String),

    /// The AEAD cipher refused to encrypt the payload.
    #[error("Encryption failed")]
    EncryptionFailed,

    /// Decryption failed where the caller chose to treat it as fatal.
    #[error("Decryption failed: {0}")]
    Decode(#[from] DecodeFailure),
}

/// Represents specific error cases that can occur during database operations.
///
/// # Examples
///
/// ```
/// use moodlog::errors::DatabaseError;
///
/// let error = DatabaseError::NotFound("Entry with id 123 not found".to_string());
/// assert!(format!("{}", error).contains("not found"));
/// ```
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// SQLite database error.
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Connection pool error.
    #[error("Failed to get connection from pool: {0}\n\nThis may indicate database connection issues. Try closing other moodlog instances.")]
    Pool(#[from] r2d2::Error),

    /// Requested record not found in database.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Custom database error with detailed message.
    #[error("Database error: {0}")]
    Custom(String),
}

/// Represents all possible errors that can occur in the moodlog application.
///
/// This enum is the central error type used across the application, with variants
/// for different error categories. It uses `thiserror` for deriving the `Error` trait
/// implementation and formatted error messages.
///
/// # Examples
///
/// Creating a configuration error:
/// ```
/// use moodlog::errors::AppError;
///
/// let error = AppError::Config("Database path is empty".to_string());
/// assert_eq!(format!("{}", error), "Configuration error: Database path is empty");
/// ```
///
/// Converting from an IO error:
/// ```
/// use moodlog::errors::AppError;
/// use std::io::{self, ErrorKind};
///
/// let io_error = io::Error::new(ErrorKind::NotFound, "file not found");
/// let app_error: AppError = io_error.into();
///
/// match app_error {
///     AppError::Io(inner) => assert_eq!(inner.kind(), ErrorKind::NotFound),
///     _ => panic!("Expected Io variant"),
/// }
/// ```
#[derive(Debug, Error)]
pub enum AppError {
    /// Errors related to configuration loading or validation.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Input/output errors from filesystem or terminal operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Errors in journal entry logic (e.g., unknown mood labels, empty text).
    #[error("Journal logic error: {0}")]
    Journal(String),

    /// Errors related to cryptographic operations.
    #[error("Cryptographic error: {0}")]
    Crypto(#[from] CryptoError),

    /// Errors related to database operations.
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),
}

impl From<DecodeFailure> for AppError {
    fn from(failure: DecodeFailure) -> Self {
        AppError::Crypto(CryptoError::Decode(failure))
    }
}

/// A type alias for `Result<T, AppError>` to simplify function signatures.
///
/// # Examples
///
/// ```
/// use moodlog::errors::{AppResult, AppError};
///
/// fn might_fail() -> AppResult<String> {
///     if false {
///         return Err(AppError::Journal("Something went wrong".to_string()));
///     }
///     Ok("Operation succeeded".to_string())
/// }
/// ```
pub type AppResult<T> = Result<T, AppError>;
