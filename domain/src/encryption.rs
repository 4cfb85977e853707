//! AES-256-GCM encryption for OAuth tokens stored in the database.
//!
//! Access and refresh tokens are encrypted before they reach the
//! `calendar_connections` table and decrypted on read. The key is a 32-byte
//! value provided hex-encoded via the ENCRYPTION_KEY environment variable.

use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes256Gcm, Nonce,
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use rand::Rng;
use thiserror::Error;

/// 12-byte nonce size for AES-GCM
const NONCE_SIZE: usize = 12;

/// Errors that can occur during encryption/decryption operations
#[derive(Debug, Error)]
pub enum EncryptionError {
    #[error("Invalid encryption key: must be 32 bytes (64 hex characters)")]
    InvalidKey,

    #[error("Failed to decode hex key: {0}")]
    HexDecodeError(#[from] hex::FromHexError),

    #[error("Failed to decode base64 ciphertext: {0}")]
    Base64DecodeError(#[from] base64::DecodeError),

    #[error("Encryption failed")]
    EncryptionFailed,

    #[error("Decryption failed - data may be corrupted or key is incorrect")]
    DecryptionFailed,

    #[error("Ciphertext too short - missing nonce")]
    CiphertextTooShort,
}

/// Encrypts plaintext using AES-256-GCM with a random nonce.
///
/// The nonce is prepended to the ciphertext, and the result is base64-encoded
/// for safe storage in a text database column.
pub fn encrypt(plaintext: &str, key_hex: &str) -> Result<String, EncryptionError> {
    let key = parse_key(key_hex)?;
    let cipher = Aes256Gcm::new_from_slice(&key).map_err(|_| EncryptionError::InvalidKey)?;

    let mut nonce_bytes = [0u8; NONCE_SIZE];
    rand::thread_rng().fill(&mut nonce_bytes);
    let nonce = Nonce::from_slice(&nonce_bytes);

    let ciphertext = cipher
        .encrypt(nonce, plaintext.as_bytes())
        .map_err(|_| EncryptionError::EncryptionFailed)?;

    // Prepend nonce to ciphertext and base64 encode
    let mut combined = nonce_bytes.to_vec();
    combined.extend(ciphertext);

    Ok(BASE64.encode(combined))
}

/// Decrypts a base64-encoded ciphertext that was encrypted with `encrypt()`.
pub fn decrypt(ciphertext_b64: &str, key_hex: &str) -> Result<String, EncryptionError> {
    let key = parse_key(key_hex)?;
    let cipher = Aes256Gcm::new_from_slice(&key).map_err(|_| EncryptionError::InvalidKey)?;

    let combined = BASE64.decode(ciphertext_b64)?;

    if combined.len() < NONCE_SIZE {
        return Err(EncryptionError::CiphertextTooShort);
    }

    let (nonce_bytes, ciphertext) = combined.split_at(NONCE_SIZE);
    let nonce = Nonce::from_slice(nonce_bytes);

    let plaintext_bytes = cipher
        .decrypt(nonce, ciphertext)
        .map_err(|_| EncryptionError::DecryptionFailed)?;

    String::from_utf8(plaintext_bytes).map_err(|_| EncryptionError::DecryptionFailed)
}

/// Parses a hex-encoded 32-byte key
fn parse_key(key_hex: &str) -> Result<[u8; 32], EncryptionError> {
    let bytes = hex::decode(key_hex)?;
    if bytes.len() != 32 {
        return Err(EncryptionError::InvalidKey);
    }
    let mut key = [0u8; 32];
    key.copy_from_slice(&bytes);
    Ok(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Test key: 32 bytes = 64 hex characters
    const TEST_KEY: &str = "0123456789abcdef0123456789abcdef0123456789abcdef0123456789abcdef";

    #[test]
    fn encrypt_decrypt_round_trips() {
        let plaintext = "ya29.a0AfB_access-token-value";
        let encrypted = encrypt(plaintext, TEST_KEY).expect("encryption should succeed");

        assert_ne!(encrypted, plaintext);

        let decrypted = decrypt(&encrypted, TEST_KEY).expect("decryption should succeed");
        assert_eq!(decrypted, plaintext);
    }

    #[test]
    fn encrypt_produces_different_ciphertexts_for_same_input() {
        // Random nonce means no two encryptions of the same token look alike
        let plaintext = "refresh-token";
        let encrypted1 = encrypt(plaintext, TEST_KEY).unwrap();
        let encrypted2 = encrypt(plaintext, TEST_KEY).unwrap();

        assert_ne!(encrypted1, encrypted2);
        assert_eq!(decrypt(&encrypted1, TEST_KEY).unwrap(), plaintext);
        assert_eq!(decrypt(&encrypted2, TEST_KEY).unwrap(), plaintext);
    }

    #[test]
    fn invalid_key_length_is_rejected() {
        let result = encrypt("test", "abcd");
        assert!(matches!(result, Err(EncryptionError::InvalidKey)));
    }

    #[test]
    fn wrong_key_fails_decryption() {
        let encrypted = encrypt("secret", TEST_KEY).unwrap();

        let wrong_key = "ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff";
        let result = decrypt(&encrypted, wrong_key);

        assert!(matches!(result, Err(EncryptionError::DecryptionFailed)));
    }

    #[test]
    fn corrupted_ciphertext_fails() {
        let result = decrypt("not_valid_base64!!!", TEST_KEY);
        assert!(matches!(result, Err(EncryptionError::Base64DecodeError(_))));
    }

    #[test]
    fn ciphertext_shorter_than_nonce_fails() {
        // Valid base64 but too short to contain a nonce
        let result = decrypt("YWJj", TEST_KEY);
        assert!(matches!(result, Err(EncryptionError::CiphertextTooShort)));
    }
}
