//! Encrypted history export pipeline.
//!
//! Merchants bootstrap a new platform account by exporting their existing
//! order and product history. The export payload crosses the public
//! internet, so it is authenticated-encrypted under a key derived from the
//! account's pre-shared secret token.
//!
//! # Wire layout
//!
//! The envelope is a raw byte string with fixed offsets and no length
//! prefix:
//!
//! ```text
//! nonce (12 bytes, random) ‖ ciphertext (N bytes) ‖ auth tag (16 bytes)
//! ```
//!
//! The consumer recovers the parts by position: first 12 bytes are the
//! AES-256-GCM nonce, last 16 bytes the authentication tag, everything in
//! between the ciphertext. The key on both sides is
//! `SHA3-256(base64_decode(secret_token))`.
//!
//! # Skip semantics
//!
//! An account with no secret token has nothing to export: [`export`]
//! returns an EMPTY envelope rather than an error, and the history
//! operation treats that as "export skipped", a success.
//!
//! # Examples
//!
//! ```
//! use recotag::{dto::Product, export, serialize::Taggable};
//!
//! let product = Product::new(1, "Test Product", "https://shop.example.com/p/1");
//! let items: Vec<&dyn Taggable> = vec![&product];
//!
//! let secret = "c2hhcmVkLXNlY3JldC10b2tlbg==";
//! let envelope = export::export(secret, items.iter().copied())?;
//! assert!(envelope.len() > 28); // nonce + tag + at least some ciphertext
//!
//! let plaintext = export::decrypt(secret, &envelope)?;
//! assert!(plaintext.contains("\"product_id\":1"));
//! # Ok::<(), recotag::error::SdkError>(())
//! ```

use aes_gcm::{
    Aes256Gcm, Key, Nonce,
    aead::{Aead, AeadCore, KeyInit, OsRng},
};
use base64::Engine;
use sha3::{Digest, Sha3_256};
use zeroize::Zeroizing;

use crate::{
    error::{Result, SdkError},
    serialize::{Taggable, json},
};

/// Nonce length in bytes, prepended to the envelope.
pub const NONCE_LEN: usize = 12;

/// Authentication tag length in bytes, appended to the envelope.
pub const TAG_LEN: usize = 16;

/// Serializes and encrypts a collection for history export.
///
/// The collection is serialized with the JSON object serializer (so the
/// plaintext is the same deterministic document [`json::serialize_collection`]
/// produces) and sealed with AES-256-GCM under a fresh random nonce.
///
/// An empty `secret_token` yields an empty envelope: the caller treats
/// that as "export skipped", not a failure.
///
/// # Errors
///
/// Returns [`SdkError::CryptoError`] if the token is not valid base64 or
/// encryption fails, and serialization errors from the underlying
/// serializer.
pub fn export<'a, I>(secret_token: &str, collection: I) -> Result<Vec<u8>>
where
    I: IntoIterator<Item = &'a dyn Taggable>,
{
    if secret_token.is_empty() {
        return Ok(Vec::new());
    }

    let key = derive_key(secret_token)?;
    let plaintext = json::serialize_collection(collection)?;

    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key.as_ref()));
    let nonce = Aes256Gcm::generate_nonce(&mut OsRng);
    let sealed = cipher
        .encrypt(&nonce, plaintext.as_bytes())
        .map_err(|e| SdkError::CryptoError(format!("export encryption failed: {e}")))?;

    let mut envelope = Vec::with_capacity(NONCE_LEN + sealed.len());
    envelope.extend_from_slice(&nonce);
    envelope.extend_from_slice(&sealed);
    Ok(envelope)
}

/// Decrypts an export envelope, mirroring the server-side consumer.
///
/// Splits the envelope at its fixed offsets (first [`NONCE_LEN`] bytes,
/// trailing [`TAG_LEN`] bytes implied by the AEAD) and returns the JSON
/// plaintext.
///
/// # Errors
///
/// Returns [`SdkError::CryptoError`] when the token is empty or invalid,
/// the envelope is shorter than nonce + tag, or authentication fails
/// (wrong key or tampered bytes).
pub fn decrypt(secret_token: &str, envelope: &[u8]) -> Result<String> {
    if secret_token.is_empty() {
        return Err(SdkError::CryptoError("export secret token is empty".to_owned()));
    }
    if envelope.len() < NONCE_LEN + TAG_LEN {
        return Err(SdkError::CryptoError(format!(
            "export envelope too short: {} bytes, need at least {}",
            envelope.len(),
            NONCE_LEN + TAG_LEN
        )));
    }

    let key = derive_key(secret_token)?;
    let (nonce, sealed) = envelope.split_at(NONCE_LEN);

    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key.as_ref()));
    let plaintext = cipher
        .decrypt(Nonce::from_slice(nonce), sealed)
        .map_err(|e| SdkError::CryptoError(format!("export decryption failed: {e}")))?;

    String::from_utf8(plaintext)
        .map_err(|e| SdkError::CryptoError(format!("decrypted payload is not UTF-8: {e}")))
}

/// Derives the 256-bit AEAD key from the account's secret token.
///
/// The token is issued base64-encoded; the key is the SHA3-256 digest of
/// its decoded bytes. Both the decoded token and the derived key are
/// zeroized when dropped.
fn derive_key(secret_token: &str) -> Result<Zeroizing<[u8; 32]>> {
    let raw = Zeroizing::new(
        base64::engine::general_purpose::STANDARD.decode(secret_token).map_err(|e| {
            SdkError::CryptoError(format!("export secret token is not valid base64: {e}"))
        })?,
    );

    let mut key = Zeroizing::new([0u8; 32]);
    key.copy_from_slice(Sha3_256::digest(raw.as_slice()).as_slice());
    Ok(key)
}
