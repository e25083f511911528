//! Entry text encryption and decryption.
//!
//! Entries are sealed with XChaCha20-Poly1305 under the shared `EntryKey`.
//! Each call draws a fresh 24-byte random nonce, which travels inside the
//! ciphertext so decryption needs nothing but the key.
//!
//! Wire format (version 1):
//!
//! ```text
//! v1:<base64( nonce (24 bytes) | ciphertext | tag (16 bytes) )>
//! ```

use crate::constants::{CIPHERTEXT_V1_AAD, CIPHERTEXT_V1_PREFIX, NONCE_LEN, TAG_LEN};
use crate::crypto::key::EntryKey;
use crate::errors::{CryptoError, DecodeFailure};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use chacha20poly1305::aead::{Aead, AeadCore, KeyInit, OsRng, Payload};
use chacha20poly1305::{Key, XChaCha20Poly1305, XNonce};
use serde::Serialize;
use std::fmt;

/// Opaque encrypted form of an entry's text, as stored and transmitted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct CipherText(String);

impl CipherText {
    /// Wraps a stored ciphertext string without validating it.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CipherText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn cipher_for(key: &EntryKey) -> XChaCha20Poly1305 {
    XChaCha20Poly1305::new(Key::from_slice(key.as_bytes()))
}

/// Encrypts entry text under `key`.
///
/// Two encryptions of the same text produce different ciphertexts because the
/// nonce is random; both decrypt to the same text.
///
/// # Errors
///
/// Returns `CryptoError::EncryptionFailed` if the cipher rejects the payload.
///
/// # Example
///
/// ```
/// use moodlog::crypto::{decrypt, encrypt, EntryKey};
///
/// let key = EntryKey::from_bytes([42u8; 32]);
/// let sealed = encrypt("Slept well, long walk after lunch.", &key)?;
/// assert_eq!(decrypt(&sealed, &key)?, "Slept well, long walk after lunch.");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn encrypt(plaintext: &str, key: &EntryKey) -> Result<CipherText, CryptoError> {
    let cipher = cipher_for(key);
    let nonce = XChaCha20Poly1305::generate_nonce(&mut OsRng);

    let sealed = cipher
        .encrypt(
            &nonce,
            Payload {
                msg: plaintext.as_bytes(),
                aad: CIPHERTEXT_V1_AAD,
            },
        )
        .map_err(|_| CryptoError::EncryptionFailed)?;

    let mut framed = Vec::with_capacity(NONCE_LEN + sealed.len());
    framed.extend_from_slice(&nonce);
    framed.extend_from_slice(&sealed);

    Ok(CipherText(format!(
        "{}{}",
        CIPHERTEXT_V1_PREFIX,
        STANDARD.encode(framed)
    )))
}

/// Decrypts a ciphertext produced by [`encrypt`] under the same key.
///
/// Never returns plausible-looking text for a foreign or damaged ciphertext:
/// the Poly1305 tag must verify before any plaintext is released.
///
/// # Errors
///
/// - `DecodeFailure::UnsupportedFormat` if the version prefix is missing or unknown
/// - `DecodeFailure::Malformed` if the body is not base64 or is truncated
/// - `DecodeFailure::Authentication` for a wrong key or tampered bytes
/// - `DecodeFailure::InvalidUtf8` if the recovered bytes are not text
pub fn decrypt(cipher_text: &CipherText, key: &EntryKey) -> Result<String, DecodeFailure> {
    let body = cipher_text
        .as_str()
        .strip_prefix(CIPHERTEXT_V1_PREFIX)
        .ok_or(DecodeFailure::UnsupportedFormat)?;

    let framed = STANDARD
        .decode(body)
        .map_err(|e| DecodeFailure::Malformed(e.to_string()))?;

    if framed.len() < NONCE_LEN + TAG_LEN {
        return Err(DecodeFailure::Malformed(format!(
            "expected at least {} bytes, found {}",
            NONCE_LEN + TAG_LEN,
            framed.len()
        )));
    }

    let (nonce, sealed) = framed.split_at(NONCE_LEN);
    let plaintext = cipher_for(key)
        .decrypt(
            XNonce::from_slice(nonce),
            Payload {
                msg: sealed,
                aad: CIPHERTEXT_V1_AAD,
            },
        )
        .map_err(|_| DecodeFailure::Authentication)?;

    String::from_utf8(plaintext).map_err(|_| DecodeFailure::InvalidUtf8)
}
