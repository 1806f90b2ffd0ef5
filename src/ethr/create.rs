//! # DID Ethr Issuance

use rand::{CryptoRng, RngCore};

use super::{address, DidEthr, PREFIX};
use crate::keys::{Algorithm, KeyPair, SecretKey};

/// The result of issuing a new `did:ethr`.
///
/// No document is returned: the document for a fresh account is whatever the
/// ledger reports, which for an unused account is
/// [`DidEthr::document`] with the account as owner.
#[derive(Clone, Debug)]
pub struct EthrIssuance {
    /// The issued DID, `did:ethr:<network>:<address>`.
    pub did: String,

    /// The 32-byte secp256k1 private key. Use [`SecretKey::to_hex`] for the
    /// `0x`-prefixed form wallets expect.
    pub private_key: SecretKey,

    /// EIP-55 checksummed account address.
    pub address: String,
}

impl DidEthr {
    /// Issue a new `did:ethr` on `network` backed by a freshly generated
    /// secp256k1 key pair.
    ///
    /// # Errors
    ///
    /// Only fails if the generated public key cannot be re-parsed, which
    /// indicates a broken key generator.
    pub fn issue<R: CryptoRng + RngCore>(
        network: &str, rng: &mut R,
    ) -> crate::Result<EthrIssuance> {
        let key_pair = KeyPair::generate(Algorithm::Secp256k1, rng);
        let address = address(key_pair.public_key())?;
        let did = format!("{PREFIX}{network}:{address}");
        tracing::debug!(did = %did, "issued did:ethr");

        Ok(EthrIssuance {
            did,
            private_key: key_pair.into_secret_key(),
            address,
        })
    }
}
