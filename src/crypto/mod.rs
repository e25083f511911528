//! Confidentiality codec for journal entry text.
//!
//! Entry text is encrypted at the point of creation and only decrypted in the
//! display context, which holds the shared key. The storage layer only ever
//! sees ciphertext.
//!
//! # Module Structure
//!
//! - `codec`: `encrypt` / `decrypt` over the versioned ciphertext format
//! - `key`: `EntryKey` derivation and the `KeyProvider` seam
//!
//! # Trust boundary
//!
//! The shared key lives in the display context. Whoever operates that
//! context can read every entry; this design only keeps text secret from the
//! storage layer and its operator.
//!
//! # Example
//!
//! ```
//! use moodlog::crypto::{decrypt, encrypt, load_entry_key, StaticKeyProvider};
//! use secrecy::SecretString;
//!
//! let provider = StaticKeyProvider::new(SecretString::from("shared secret".to_string()));
//! let key = load_entry_key(&provider)?;
//!
//! let sealed = encrypt("Secret journal entry", &key)?;
//! assert_eq!(decrypt(&sealed, &key)?, "Secret journal entry");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod codec;
pub mod key;

// Re-export commonly used types
pub use self::codec::{decrypt, encrypt, CipherText};
pub use self::key::{
    load_entry_key, EntryKey, EnvKeyProvider, KeyProvider, PromptKeyProvider, StaticKeyProvider,
};
