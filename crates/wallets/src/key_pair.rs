//! Ed25519 key pairs.

use crate::error::{WalletError, WalletResult};
use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};
use rand::rngs::OsRng;
use std::fmt;

/// Length of a private key seed.
pub const PRIVATE_KEY_LENGTH: usize = 32;

/// Length of an expanded secret key (seed followed by public key).
pub const SECRET_KEY_LENGTH: usize = 64;

/// An Ed25519 signing key with its public half.
#[derive(Clone)]
pub struct KeyPair {
    signing_key: SigningKey,
}

impl KeyPair {
    /// Generates a new random key pair.
    pub fn generate() -> Self {
        Self {
            signing_key: SigningKey::generate(&mut OsRng),
        }
    }

    /// Creates a key pair from a 32-byte seed or a 64-byte secret key.
    ///
    /// A 64-byte key must end with the public key its seed derives.
    pub fn from_private_key(bytes: &[u8]) -> WalletResult<Self> {
        let seed: [u8; PRIVATE_KEY_LENGTH] = match bytes.len() {
            PRIVATE_KEY_LENGTH | SECRET_KEY_LENGTH => bytes[..PRIVATE_KEY_LENGTH]
                .try_into()
                .map_err(|_| WalletError::invalid_private_key("bad seed"))?,
            len => {
                return Err(WalletError::invalid_private_key(format!(
                    "expected {PRIVATE_KEY_LENGTH} or {SECRET_KEY_LENGTH} bytes, got {len}"
                )))
            }
        };
        let key_pair = Self {
            signing_key: SigningKey::from_bytes(&seed),
        };
        if bytes.len() == SECRET_KEY_LENGTH && bytes[PRIVATE_KEY_LENGTH..] != key_pair.public_key() {
            return Err(WalletError::invalid_private_key(
                "public half does not match the seed",
            ));
        }
        Ok(key_pair)
    }

    /// Creates a key pair from a hex-encoded seed or secret key.
    pub fn from_secret_hex(secret: &str) -> WalletResult<Self> {
        let bytes = hex::decode(secret.trim().trim_start_matches("0x"))
            .map_err(|e| WalletError::invalid_private_key(e.to_string()))?;
        Self::from_private_key(&bytes)
    }

    /// The 32-byte seed.
    pub fn private_key(&self) -> [u8; PRIVATE_KEY_LENGTH] {
        self.signing_key.to_bytes()
    }

    /// The 32-byte public key.
    pub fn public_key(&self) -> [u8; 32] {
        self.signing_key.verifying_key().to_bytes()
    }

    /// Signs `message`.
    pub fn sign(&self, message: &[u8]) -> [u8; 64] {
        self.signing_key.sign(message).to_bytes()
    }

    /// Checks `signature` over `message` against `public_key`.
    pub fn verify(public_key: &[u8; 32], message: &[u8], signature: &[u8; 64]) -> WalletResult<()> {
        let key = VerifyingKey::from_bytes(public_key).map_err(|_| WalletError::InvalidSignature)?;
        key.verify(message, &Signature::from_bytes(signature))
            .map_err(|_| WalletError::InvalidSignature)
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("public_key", &hex::encode(self.public_key()))
            .finish()
    }
}
