//! # Key Pairs
//!
//! Generates the signing key pairs DIDs are derived from. The randomness
//! source is always supplied by the caller: production code passes
//! [`rand::rngs::OsRng`], tests pass a seeded generator to get reproducible
//! keys.

use std::fmt::{self, Debug, Formatter};

use ed25519_dalek::SigningKey as Ed25519SigningKey;
use k256::ecdsa::SigningKey as Secp256k1SigningKey;
use rand::{CryptoRng, RngCore};
use zeroize::Zeroizing;

/// Signature algorithms a key pair can be generated for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Algorithm {
    /// Edwards-curve signatures (`did:key`).
    Ed25519,

    /// ECDSA over secp256k1 (`did:ethr`).
    Secp256k1,
}

/// Private key material. Zeroized on drop and never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretKey(Zeroizing<Vec<u8>>);

impl SecretKey {
    /// Wrap raw private key bytes.
    #[must_use]
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(Zeroizing::new(bytes))
    }

    /// The raw private key bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// The private key as a `z`-prefixed base-58-btc string.
    #[must_use]
    pub fn to_base58(&self) -> Zeroizing<String> {
        Zeroizing::new(crate::multibase::encode(&self.0))
    }

    /// The private key as `0x`-prefixed hex.
    #[must_use]
    pub fn to_hex(&self) -> Zeroizing<String> {
        Zeroizing::new(format!("0x{}", hex::encode(self.0.as_slice())))
    }
}

impl Debug for SecretKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("SecretKey([REDACTED])")
    }
}

/// A freshly generated asymmetric key pair.
#[derive(Clone, Debug)]
pub struct KeyPair {
    algorithm: Algorithm,
    public_key: Vec<u8>,
    secret_key: SecretKey,
}

impl KeyPair {
    /// Generate a key pair for `algorithm` from a cryptographically secure
    /// randomness source.
    ///
    /// There is no fallback source: an RNG that cannot produce entropy (for
    /// example `OsRng` on a broken platform) panics.
    pub fn generate<R: CryptoRng + RngCore>(algorithm: Algorithm, rng: &mut R) -> Self {
        match algorithm {
            Algorithm::Ed25519 => {
                let signing_key = Ed25519SigningKey::generate(rng);
                Self {
                    algorithm,
                    public_key: signing_key.verifying_key().to_bytes().to_vec(),
                    secret_key: SecretKey::new(signing_key.to_keypair_bytes().to_vec()),
                }
            }
            Algorithm::Secp256k1 => {
                let signing_key = Secp256k1SigningKey::random(rng);
                let public_key = signing_key.verifying_key().to_encoded_point(true);
                Self {
                    algorithm,
                    public_key: public_key.as_bytes().to_vec(),
                    secret_key: SecretKey::new(signing_key.to_bytes().to_vec()),
                }
            }
        }
    }

    /// The algorithm the key pair was generated for.
    #[must_use]
    pub const fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Public key bytes: 32 bytes for Ed25519, 33 (SEC1 compressed) for
    /// secp256k1.
    #[must_use]
    pub fn public_key(&self) -> &[u8] {
        &self.public_key
    }

    /// Private key bytes: the 64-byte `seed || public key` form for Ed25519,
    /// the 32-byte scalar for secp256k1.
    #[must_use]
    pub const fn secret_key(&self) -> &SecretKey {
        &self.secret_key
    }

    /// Consume the key pair, keeping only the private key.
    #[must_use]
    pub fn into_secret_key(self) -> SecretKey {
        self.secret_key
    }
}
