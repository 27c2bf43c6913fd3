//! # Ed25519 Keys
//!
//! A [`Key`] always carries its public half and optionally its secret half.
//! Its identifier is the SHA-256 digest of the encoded public half, which is
//! the form addresses, directory entries and issuer ids take on the wire.
//!
//! ## Security Properties
//!
//! - Deterministic signatures (no RNG dependency when signing)
//! - Secret material is zeroized on drop and only exported wrapped in
//!   [`Zeroizing`]

use crate::hashing::{sha256, Digest32};
use crate::CryptoError;
use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};
use std::fmt;
use zeroize::Zeroizing;

/// Encoded public key length.
pub const PUBLIC_KEY_LEN: usize = 32;

/// Secret seed length.
pub const SECRET_KEY_LEN: usize = 32;

/// Encoded signature length.
pub const SIGNATURE_LEN: usize = 64;

/// Signing or verification key.
#[derive(Clone)]
pub struct Key {
    public: VerifyingKey,
    secret: Option<SigningKey>,
}

impl Key {
    /// Generate a fresh keypair.
    pub fn generate() -> Self {
        let signing_key = SigningKey::generate(&mut rand::thread_rng());
        Self {
            public: signing_key.verifying_key(),
            secret: Some(signing_key),
        }
    }

    /// Restore a keypair from its 32-byte secret seed.
    pub fn from_secret(seed: &[u8]) -> Result<Self, CryptoError> {
        let bytes: [u8; SECRET_KEY_LEN] =
            seed.try_into()
                .map_err(|_| CryptoError::InvalidSecretLength {
                    expected: SECRET_KEY_LEN,
                    actual: seed.len(),
                })?;
        let signing_key = SigningKey::from_bytes(&bytes);
        Ok(Self {
            public: signing_key.verifying_key(),
            secret: Some(signing_key),
        })
    }

    /// Import a public-only key from its encoding.
    pub fn from_public(encoded: &[u8]) -> Result<Self, CryptoError> {
        let bytes: [u8; PUBLIC_KEY_LEN] =
            encoded.try_into().map_err(|_| CryptoError::InvalidPublicKey)?;
        let public = VerifyingKey::from_bytes(&bytes).map_err(|_| CryptoError::InvalidPublicKey)?;
        Ok(Self {
            public,
            secret: None,
        })
    }

    /// Key identifier: SHA-256 of the encoded public half.
    pub fn id(&self) -> Digest32 {
        sha256(self.public.as_bytes())
    }

    /// Whether the secret half is present.
    pub fn has_secret(&self) -> bool {
        self.secret.is_some()
    }

    /// Encoded public half.
    pub fn export_public(&self) -> [u8; PUBLIC_KEY_LEN] {
        self.public.to_bytes()
    }

    /// Secret seed, if this key can sign.
    pub fn export_secret(&self) -> Option<Zeroizing<[u8; SECRET_KEY_LEN]>> {
        self.secret.as_ref().map(|sk| Zeroizing::new(sk.to_bytes()))
    }

    /// Sign a message.
    pub fn sign(&self, message: &[u8]) -> Result<[u8; SIGNATURE_LEN], CryptoError> {
        let signing_key = self.secret.as_ref().ok_or(CryptoError::MissingSecret)?;
        Ok(signing_key.sign(message).to_bytes())
    }

    /// Verify a signature over a message.
    pub fn verify(&self, message: &[u8], signature: &[u8]) -> Result<(), CryptoError> {
        let sig = Signature::from_slice(signature).map_err(|_| CryptoError::InvalidSignatureFormat)?;
        self.public
            .verify(message, &sig)
            .map_err(|_| CryptoError::SignatureVerificationFailed)
    }

    /// Public-only copy of this key.
    pub fn public_only(&self) -> Self {
        Self {
            public: self.public,
            secret: None,
        }
    }
}

impl PartialEq for Key {
    fn eq(&self, other: &Self) -> bool {
        self.public == other.public
    }
}

impl Eq for Key {}

impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let id = self.id();
        f.debug_struct("Key")
            .field("id", &format_args!("{:02x}{:02x}{:02x}{:02x}..", id[0], id[1], id[2], id[3]))
            .field("has_secret", &self.has_secret())
            .finish()
    }
}
