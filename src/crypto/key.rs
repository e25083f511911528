//! Entry key acquisition and derivation.
//!
//! The shared secret is external configuration. It is read once per process
//! through a `KeyProvider`, stretched into a 256-bit `EntryKey` with Argon2id,
//! and then only borrowed by the codec. Nothing here generates, rotates or
//! persists keys.
//!
//! Changing or losing the secret makes every previously stored entry
//! permanently undecryptable.

use crate::constants::{
    ENTRY_KEY_LEN, ENV_VAR_MOODLOG_KEY, KEY_DERIVATION_SALT, KEY_FINGERPRINT_HEX_LEN,
    REDACTED_PLACEHOLDER,
};
use crate::errors::{AppResult, CryptoError};
use argon2::Argon2;
use secrecy::{ExposeSecret, SecretString};
use std::env;
use std::fmt;
use tracing::{debug, info};
use zeroize::ZeroizeOnDrop;

/// Source of the shared entry secret.
///
/// Implementations decide where the secret lives (environment, terminal,
/// a secret manager). Swapping the provider never touches codec logic.
pub trait KeyProvider {
    /// Returns the shared secret, or an error if none is available.
    fn secret(&self) -> AppResult<SecretString>;

    /// Short human-readable description of where the secret comes from.
    fn source(&self) -> String;
}

/// Reads the secret from an environment variable (`MOODLOG_KEY` by default).
#[derive(Debug, Clone)]
pub struct EnvKeyProvider {
    var: String,
}

impl EnvKeyProvider {
    /// Creates a provider reading the given environment variable.
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

impl Default for EnvKeyProvider {
    fn default() -> Self {
        Self::new(ENV_VAR_MOODLOG_KEY)
    }
}

impl KeyProvider for EnvKeyProvider {
    fn secret(&self) -> AppResult<SecretString> {
        let value = env::var(&self.var).map_err(|_| CryptoError::MissingKey(self.var.clone()))?;
        if value.is_empty() {
            return Err(CryptoError::EmptyKey.into());
        }
        Ok(SecretString::from(value))
    }

    fn source(&self) -> String {
        format!("environment variable {}", self.var)
    }
}

/// Prompts for the secret on the controlling terminal without echo.
#[derive(Debug, Clone, Default)]
pub struct PromptKeyProvider;

impl KeyProvider for PromptKeyProvider {
    fn secret(&self) -> AppResult<SecretString> {
        debug!("Prompting for entry key");
        let value = rpassword::prompt_password("Entry key: ")
            .map_err(|e| CryptoError::KeyPrompt(e.to_string()))?;
        if value.is_empty() {
            return Err(CryptoError::EmptyKey.into());
        }
        Ok(SecretString::from(value))
    }

    fn source(&self) -> String {
        "terminal prompt".to_string()
    }
}

/// Holds a secret supplied directly by the embedding program.
pub struct StaticKeyProvider {
    secret: SecretString,
}

impl StaticKeyProvider {
    pub fn new(secret: SecretString) -> Self {
        Self { secret }
    }
}

impl KeyProvider for StaticKeyProvider {
    fn secret(&self) -> AppResult<SecretString> {
        if self.secret.expose_secret().is_empty() {
            return Err(CryptoError::EmptyKey.into());
        }
        Ok(SecretString::from(self.secret.expose_secret().to_string()))
    }

    fn source(&self) -> String {
        "static secret".to_string()
    }
}

/// A 256-bit symmetric key used to seal entry text.
///
/// Key bytes are zeroized when the value is dropped and never appear in
/// `Debug` output.
#[derive(ZeroizeOnDrop)]
pub struct EntryKey {
    key: [u8; ENTRY_KEY_LEN],
}

impl EntryKey {
    /// Derives the entry key from the shared secret with Argon2id.
    ///
    /// The salt is fixed, so the same secret always yields the same key on
    /// every machine that holds it.
    ///
    /// # Errors
    ///
    /// Returns `CryptoError::EmptyKey` for an empty secret and
    /// `CryptoError::KeyDerivation` if Argon2 fails.
    ///
    /// # Example
    ///
    /// ```
    /// use moodlog::crypto::EntryKey;
    /// use secrecy::SecretString;
    ///
    /// let a = EntryKey::derive(&SecretString::from("shared".to_string()))?;
    /// let b = EntryKey::derive(&SecretString::from("shared".to_string()))?;
    /// assert_eq!(a.fingerprint(), b.fingerprint());
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn derive(secret: &SecretString) -> Result<Self, CryptoError> {
        let material = secret.expose_secret();
        if material.is_empty() {
            return Err(CryptoError::EmptyKey);
        }

        let mut key = [0u8; ENTRY_KEY_LEN];
        Argon2::default()
            .hash_password_into(material.as_bytes(), KEY_DERIVATION_SALT, &mut key)
            .map_err(|e| CryptoError::KeyDerivation(e.to_string()))?;

        Ok(Self { key })
    }

    /// Wraps raw key bytes, e.g. a key already derived by another component.
    pub fn from_bytes(key: [u8; ENTRY_KEY_LEN]) -> Self {
        Self { key }
    }

    /// Raw key bytes for immediate cipher construction. Do not store or log.
    pub fn as_bytes(&self) -> &[u8; ENTRY_KEY_LEN] {
        &self.key
    }

    /// Short BLAKE3-based identifier of the key, safe to log.
    pub fn fingerprint(&self) -> String {
        let hash = blake3::hash(&self.key);
        hash.to_hex().as_str()[..KEY_FINGERPRINT_HEX_LEN].to_string()
    }
}

impl fmt::Debug for EntryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntryKey")
            .field("key", &REDACTED_PLACEHOLDER)
            .finish()
    }
}

/// Reads the secret from `provider` and derives the process-wide entry key.
pub fn load_entry_key(provider: &dyn KeyProvider) -> AppResult<EntryKey> {
    debug!("Loading entry key from {}", provider.source());
    let secret = provider.secret()?;
    let key = EntryKey::derive(&secret)?;
    info!(fingerprint = %key.fingerprint(), "Entry key loaded");
    Ok(key)
}
