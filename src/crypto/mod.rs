// wblogtool/src/crypto/mod.rs
use aes_gcm::aead::{Aead, KeyInit, OsRng};
use aes_gcm::{AeadCore, Aes256Gcm, Nonce};

use crate::errors::CryptoError;

/// Required key length for AES-256-GCM.
pub const KEY_LEN: usize = 32;

const MAGIC: &[u8; 4] = b"WBK1";
const NONCE_LEN: usize = 12;
const TAG_LEN: usize = 16;

/// Encrypts `plaintext` under `key` with AES-256-GCM.
///
/// A fresh random nonce is generated per call and embedded in the output, so
/// encrypting the same plaintext twice yields different ciphertexts and
/// decryption needs only the ciphertext and the key.
///
/// Output layout: `WBK1` magic, 12-byte nonce, GCM ciphertext + tag.
pub fn encrypt(plaintext: &[u8], key: &[u8]) -> Result<Vec<u8>, CryptoError> {
    let cipher = cipher_for(key)?;
    let nonce = Aes256Gcm::generate_nonce(&mut OsRng);
    let sealed = cipher
        .encrypt(&nonce, plaintext)
        .map_err(|_| CryptoError::MalformedInput("encryption failed".to_string()))?;

    let mut out = Vec::with_capacity(MAGIC.len() + NONCE_LEN + sealed.len());
    out.extend_from_slice(MAGIC);
    out.extend_from_slice(nonce.as_slice());
    out.extend_from_slice(&sealed);
    Ok(out)
}

/// Decrypts a ciphertext produced by [`encrypt`].
///
/// Fails with `MalformedInput` when the header cannot be parsed or the key
/// has the wrong length, and with `AuthenticationFailure` when the integrity
/// tag does not verify (wrong key, or any corrupted byte).
pub fn decrypt(ciphertext: &[u8], key: &[u8]) -> Result<Vec<u8>, CryptoError> {
    let cipher = cipher_for(key)?;

    if ciphertext.len() < MAGIC.len() + NONCE_LEN + TAG_LEN {
        return Err(CryptoError::MalformedInput(format!(
            "ciphertext too short to contain a valid header ({} bytes)",
            ciphertext.len()
        )));
    }
    if &ciphertext[..MAGIC.len()] != MAGIC {
        return Err(CryptoError::MalformedInput(
            "missing WBK1 header, not a wblog backup artifact".to_string(),
        ));
    }

    let nonce = Nonce::from_slice(&ciphertext[MAGIC.len()..MAGIC.len() + NONCE_LEN]);
    cipher
        .decrypt(nonce, &ciphertext[MAGIC.len() + NONCE_LEN..])
        .map_err(|_| CryptoError::AuthenticationFailure)
}

fn cipher_for(key: &[u8]) -> Result<Aes256Gcm, CryptoError> {
    Aes256Gcm::new_from_slice(key).map_err(|_| {
        CryptoError::MalformedInput(format!(
            "backup key must be {} bytes, got {}",
            KEY_LEN,
            key.len()
        ))
    })
}
