//! # DID Key Issuance

use rand::{CryptoRng, RngCore};

use super::{DidKey, PREFIX};
use crate::document::Document;
use crate::keys::{Algorithm, KeyPair, SecretKey};

/// The result of issuing a new `did:key`.
#[derive(Clone, Debug)]
pub struct KeyIssuance {
    /// The issued DID, `did:key:z...`.
    pub did: String,

    /// The Ed25519 private key in 64-byte `seed || public key` form.
    pub private_key: SecretKey,

    /// The DID document for the issued DID.
    pub document: Document,
}

impl DidKey {
    /// Issue a new `did:key` backed by a freshly generated Ed25519 key pair.
    #[must_use]
    pub fn issue<R: CryptoRng + RngCore>(rng: &mut R) -> KeyIssuance {
        let key_pair = KeyPair::generate(Algorithm::Ed25519, rng);

        let mut public_key = [0u8; 32];
        public_key.copy_from_slice(key_pair.public_key());

        let document = Self::document(&public_key);
        let did = format!("{PREFIX}{}", Self::multikey(&public_key));
        tracing::debug!(did = %did, "issued did:key");

        KeyIssuance {
            did,
            private_key: key_pair.into_secret_key(),
            document,
        }
    }
}

#[cfg(test)]
mod test {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::document::{MethodType, PublicKeyFormat};

    #[test]
    fn issue() {
        let issued = DidKey::issue(&mut rand::rngs::OsRng);

        // Ed25519 multikeys always start "z6Mk"
        assert!(issued.did.starts_with("did:key:z6Mk"));
        assert_eq!(issued.document.id, issued.did);
        assert_eq!(issued.private_key.as_bytes().len(), 64);

        let vms = issued.document.verification_method.as_ref().expect("should have methods");
        assert_eq!(vms.len(), 1);

        let multikey = &issued.did[PREFIX.len()..];
        assert_eq!(vms[0].id, format!("{}#{multikey}", issued.did));
        assert_eq!(vms[0].type_, MethodType::Ed25519VerificationKey2020);
        assert_eq!(vms[0].controller, issued.did);
        assert_eq!(
            vms[0].key,
            PublicKeyFormat::PublicKeyMultibase {
                public_key_multibase: multikey.to_string()
            }
        );
    }

    #[test]
    fn seeded_issue_is_reproducible() {
        let first = DidKey::issue(&mut StdRng::seed_from_u64(42));
        let second = DidKey::issue(&mut StdRng::seed_from_u64(42));
        assert_eq!(first.did, second.did);
        assert_eq!(first.document, second.document);
    }
}
