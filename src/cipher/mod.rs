//! Field-level authenticated encryption for personally-identifiable data.
//!
//! # Wire format
//!
//! ```text
//! enc:<base64(iv[16] || tag[16] || ciphertext)>
//! ```
//!
//! Standard (padded) base64. AES-256-GCM with a 16-byte IV, no associated data.
//! Values without the `enc:` prefix are plaintext and pass through `decrypt`
//! untouched, so legacy rows need no migration. A value that already carries
//! the prefix is never encrypted again.

pub mod key;

use aes_gcm::aead::consts::U16;
use aes_gcm::aead::{AeadInPlace, KeyInit};
use aes_gcm::aes::Aes256;
use aes_gcm::{AesGcm, Nonce, Tag};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use once_cell::sync::OnceCell;
use rand::{rngs::OsRng, RngCore};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::config::EncryptionConfig;
pub use key::{derive_key, DerivedKey, DEFAULT_SCRYPT_LOG_N, KEY_LEN};

/// Marker carried by every protected value
pub const PROTECTED_PREFIX: &str = "enc:";

const IV_LEN: usize = 16;
const TAG_LEN: usize = 16;

type Aes256Gcm16 = AesGcm<Aes256, U16>;

/// Derived key together with its expanded AES key schedule
struct KeyMaterial {
    key: DerivedKey,
    aead: Aes256Gcm16,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CipherError {
    /// Tampered ciphertext, wrong or rotated key, malformed envelope, or no key
    #[error("Decryption failed: {0}")]
    Decryption(String),

    #[error("Field encryption key is not configured")]
    KeyUnavailable,

    #[error("Key derivation failed: {0}")]
    KeyDerivation(String),

    #[error("Encryption failed: {0}")]
    Encryption(String),
}

/// Prefix test only, no cryptographic work
pub fn is_protected(value: &str) -> bool {
    value.starts_with(PROTECTED_PREFIX)
}

/// Encrypts and decrypts individual string fields.
///
/// Construct once at startup and share by reference or `Arc`. The key is
/// derived and expanded on first use and cached for the lifetime of the cipher.
pub struct FieldCipher {
    secret: Option<String>,
    salt: String,
    scrypt_log_n: u8,
    material: OnceCell<KeyMaterial>,
}

impl std::fmt::Debug for FieldCipher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldCipher")
            .field("enabled", &self.is_protection_enabled())
            .field("scrypt_log_n", &self.scrypt_log_n)
            .field("key_derived", &self.material.get().is_some())
            .finish()
    }
}

impl FieldCipher {
    pub fn new(secret: impl Into<String>, salt: impl Into<String>) -> Self {
        Self::with_cost(secret, salt, DEFAULT_SCRYPT_LOG_N)
    }

    /// Like [`FieldCipher::new`] with an explicit scrypt cost (`N = 2^log_n`)
    pub fn with_cost(secret: impl Into<String>, salt: impl Into<String>, scrypt_log_n: u8) -> Self {
        let secret = secret.into();
        Self {
            secret: if secret.is_empty() { None } else { Some(secret) },
            salt: salt.into(),
            scrypt_log_n,
            material: OnceCell::new(),
        }
    }

    /// Cipher with no secret: every operation is a passthrough
    pub fn disabled() -> Self {
        Self {
            secret: None,
            salt: String::new(),
            scrypt_log_n: DEFAULT_SCRYPT_LOG_N,
            material: OnceCell::new(),
        }
    }

    pub fn from_config(config: &EncryptionConfig) -> Self {
        match config.key.as_deref() {
            Some(secret) => Self::with_cost(secret, config.salt.clone(), config.scrypt_log_n),
            None => Self::disabled(),
        }
    }

    pub fn is_protection_enabled(&self) -> bool {
        self.secret.is_some()
    }

    /// Derived key, computed once on first call
    pub fn derive_key(&self) -> Result<&DerivedKey, CipherError> {
        Ok(&self.material()?.key)
    }

    pub fn is_protected(&self, value: &str) -> bool {
        is_protected(value)
    }

    /// Protect `plaintext` with a fresh random IV. Empty values, already
    /// protected values and a disabled cipher return the input unchanged.
    pub fn encrypt(&self, plaintext: &str) -> Result<String, CipherError> {
        if plaintext.is_empty() || is_protected(plaintext) || !self.is_protection_enabled() {
            return Ok(plaintext.to_string());
        }

        let cipher = self.aead()?;

        let mut iv = [0u8; IV_LEN];
        OsRng.fill_bytes(&mut iv);

        let mut buffer = plaintext.as_bytes().to_vec();
        let tag = cipher
            .encrypt_in_place_detached(Nonce::<U16>::from_slice(&iv), b"", &mut buffer)
            .map_err(|_| CipherError::Encryption("AES-GCM encryption failed".to_string()))?;

        let mut envelope = Vec::with_capacity(IV_LEN + TAG_LEN + buffer.len());
        envelope.extend_from_slice(&iv);
        envelope.extend_from_slice(tag.as_slice());
        envelope.extend_from_slice(&buffer);

        Ok(format!("{}{}", PROTECTED_PREFIX, STANDARD.encode(envelope)))
    }

    /// Reverse of [`FieldCipher::encrypt`]. Values without the prefix pass through.
    pub fn decrypt(&self, value: &str) -> Result<String, CipherError> {
        let Some(encoded) = value.strip_prefix(PROTECTED_PREFIX) else {
            return Ok(value.to_string());
        };

        let cipher = self
            .aead()
            .map_err(|e| CipherError::Decryption(e.to_string()))?;

        let envelope = STANDARD
            .decode(encoded)
            .map_err(|_| CipherError::Decryption("protected value is not valid base64".to_string()))?;

        if envelope.len() < IV_LEN + TAG_LEN {
            return Err(CipherError::Decryption("protected value is truncated".to_string()));
        }

        let (iv, rest) = envelope.split_at(IV_LEN);
        let (tag, ciphertext) = rest.split_at(TAG_LEN);

        let mut buffer = ciphertext.to_vec();
        cipher
            .decrypt_in_place_detached(
                Nonce::<U16>::from_slice(iv),
                b"",
                &mut buffer,
                Tag::from_slice(tag),
            )
            .map_err(|_| CipherError::Decryption("authentication tag mismatch".to_string()))?;

        String::from_utf8(buffer)
            .map_err(|_| CipherError::Decryption("plaintext is not valid UTF-8".to_string()))
    }

    /// Copy of `record` with each named non-empty string field encrypted
    pub fn encrypt_fields(
        &self,
        record: &Map<String, Value>,
        fields: &[&str],
    ) -> Result<Map<String, Value>, CipherError> {
        let mut out = record.clone();
        if !self.is_protection_enabled() {
            return Ok(out);
        }

        for field in fields {
            if let Some(Value::String(s)) = out.get_mut(*field) {
                if !s.is_empty() {
                    *s = self.encrypt(s)?;
                }
            }
        }
        Ok(out)
    }

    /// Copy of `record` with each named protected field decrypted. Plaintext
    /// fields pass through, so mixed legacy and protected rows both work.
    pub fn decrypt_fields(
        &self,
        record: &Map<String, Value>,
        fields: &[&str],
    ) -> Result<Map<String, Value>, CipherError> {
        let mut out = record.clone();
        for field in fields {
            if let Some(Value::String(s)) = out.get_mut(*field) {
                if is_protected(s) {
                    *s = self.decrypt(s)?;
                }
            }
        }
        Ok(out)
    }

    fn aead(&self) -> Result<&Aes256Gcm16, CipherError> {
        Ok(&self.material()?.aead)
    }

    fn material(&self) -> Result<&KeyMaterial, CipherError> {
        let secret = self.secret.as_deref().ok_or(CipherError::KeyUnavailable)?;
        self.material.get_or_try_init(|| {
            tracing::debug!("Deriving field encryption key (scrypt log_n={})", self.scrypt_log_n);
            let key = derive_key(secret, &self.salt, self.scrypt_log_n)?;
            let aead = Aes256Gcm16::new_from_slice(key.as_bytes())
                .map_err(|e| CipherError::KeyDerivation(e.to_string()))?;
            Ok(KeyMaterial { key, aead })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn cipher() -> FieldCipher {
        FieldCipher::with_cost("unit-test-secret", "unit-test-salt", 4)
    }

    fn as_map(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn round_trip() {
        let c = cipher();
        for p in ["a", "0501234567", "Ünïcödé ✓", "enc without colon"] {
            let protected = c.encrypt(p).unwrap();
            assert!(is_protected(&protected));
            assert_eq!(c.decrypt(&protected).unwrap(), p);
        }
    }

    #[test]
    fn envelope_layout() {
        let c = cipher();
        let protected = c.encrypt("hello").unwrap();
        let raw = STANDARD.decode(protected.strip_prefix(PROTECTED_PREFIX).unwrap()).unwrap();
        assert_eq!(raw.len(), IV_LEN + TAG_LEN + "hello".len());
    }

    #[test]
    fn fresh_iv_per_call() {
        let c = cipher();
        assert_ne!(c.encrypt("same").unwrap(), c.encrypt("same").unwrap());
    }

    #[test]
    fn never_double_encrypts() {
        let c = cipher();
        let once = c.encrypt("secret").unwrap();
        assert_eq!(c.encrypt(&once).unwrap(), once);
        let plain = c.decrypt(&once).unwrap();
        assert_eq!(c.decrypt(&plain).unwrap(), plain);
    }

    #[test]
    fn empty_values_pass_through() {
        let c = cipher();
        assert_eq!(c.encrypt("").unwrap(), "");
        assert_eq!(c.decrypt("").unwrap(), "");
    }

    #[test]
    fn disabled_cipher_is_passthrough() {
        let c = FieldCipher::disabled();
        assert!(!c.is_protection_enabled());
        assert_eq!(c.encrypt("0501234567").unwrap(), "0501234567");
        assert!(!c.is_protected("0501234567"));
        assert_eq!(FieldCipher::with_cost("", "salt", 4).is_protection_enabled(), false);
    }

    #[test]
    fn disabled_cipher_cannot_open_protected_values() {
        let protected = cipher().encrypt("x").unwrap();
        let err = FieldCipher::disabled().decrypt(&protected).unwrap_err();
        assert!(matches!(err, CipherError::Decryption(_)));
    }

    #[test]
    fn tampering_is_detected() {
        let c = cipher();
        let protected = c.encrypt("salary: 12000").unwrap();
        let mut raw = STANDARD.decode(&protected[PROTECTED_PREFIX.len()..]).unwrap();
        let last = raw.len() - 1;
        raw[last] ^= 0x01;
        let tampered = format!("{}{}", PROTECTED_PREFIX, STANDARD.encode(raw));
        assert!(matches!(c.decrypt(&tampered), Err(CipherError::Decryption(_))));
    }

    #[test]
    fn wrong_key_is_detected() {
        let protected = cipher().encrypt("x").unwrap();
        let other = FieldCipher::with_cost("another-secret", "unit-test-salt", 4);
        assert!(matches!(other.decrypt(&protected), Err(CipherError::Decryption(_))));
    }

    #[test]
    fn key_schedule_built_once() {
        let c = cipher();
        assert!(c.material.get().is_none());
        let first = c.aead().unwrap() as *const Aes256Gcm16;
        c.encrypt("warm").unwrap();
        assert!(std::ptr::eq(first, c.aead().unwrap()));
        assert!(std::ptr::eq(c.derive_key().unwrap(), c.derive_key().unwrap()));
    }

    #[test]
    fn malformed_envelopes_fail_locally() {
        let c = cipher();
        assert!(matches!(c.decrypt("enc:!!!not-base64"), Err(CipherError::Decryption(_))));
        assert!(matches!(c.decrypt("enc:AAAA"), Err(CipherError::Decryption(_))));
    }

    #[test]
    fn encrypt_fields_only_touches_named_non_empty_strings() {
        let c = cipher();
        let record = as_map(json!({
            "nationalId": "29001011234567",
            "address": "",
            "age": 41,
            "fullName": "Sara Adel"
        }));
        let out = c.encrypt_fields(&record, &["nationalId", "address", "age", "missing"]).unwrap();
        assert!(is_protected(out["nationalId"].as_str().unwrap()));
        assert_eq!(out["address"], json!(""));
        assert_eq!(out["age"], json!(41));
        assert_eq!(out["fullName"], json!("Sara Adel"));
        // input untouched
        assert_eq!(record["nationalId"], json!("29001011234567"));
    }

    #[test]
    fn decrypt_fields_handles_mixed_legacy_rows() {
        let c = cipher();
        let mut record = as_map(json!({ "nationalId": "legacy-plain", "passportNumber": "A1234567" }));
        record = c.encrypt_fields(&record, &["passportNumber"]).unwrap();
        let out = c.decrypt_fields(&record, &["nationalId", "passportNumber"]).unwrap();
        assert_eq!(out["nationalId"], json!("legacy-plain"));
        assert_eq!(out["passportNumber"], json!("A1234567"));
    }

    #[test]
    fn key_is_derived_once() {
        let c = cipher();
        let first = c.derive_key().unwrap() as *const DerivedKey;
        let second = c.derive_key().unwrap() as *const DerivedKey;
        assert_eq!(first, second);
    }
}
