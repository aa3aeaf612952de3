use super::CipherError;

/// Length of the AES-256 key produced by derivation
pub const KEY_LEN: usize = 32;

/// scrypt cost `N = 2^14`, `r = 8`, `p = 1`. Stored data only decrypts under
/// the same parameters, secret and salt.
pub const DEFAULT_SCRYPT_LOG_N: u8 = 14;
const SCRYPT_R: u32 = 8;
const SCRYPT_P: u32 = 1;

/// Symmetric key derived from the configured master secret.
pub struct DerivedKey([u8; KEY_LEN]);

impl DerivedKey {
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("DerivedKey(<redacted>)")
    }
}

/// Stretch `secret` with scrypt. Deliberately slow; callers memoize the result.
pub fn derive_key(secret: &str, salt: &str, log_n: u8) -> Result<DerivedKey, CipherError> {
    let params = scrypt::Params::new(log_n, SCRYPT_R, SCRYPT_P, KEY_LEN)
        .map_err(|e| CipherError::KeyDerivation(e.to_string()))?;

    let mut output = [0u8; KEY_LEN];
    scrypt::scrypt(secret.as_bytes(), salt.as_bytes(), &params, &mut output)
        .map_err(|e| CipherError::KeyDerivation(e.to_string()))?;

    Ok(DerivedKey(output))
}
