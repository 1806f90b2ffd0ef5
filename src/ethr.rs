//! # DID Ethr
//!
//! The `did:ethr` method identifies an Ethereum account. The DID document is
//! not carried in the identifier: it is read from the ERC-1056 registry on the
//! ledger named by the DID, so resolution is delegated to a
//! [`LedgerResolver`](crate::LedgerResolver).
//!
//! Identifiers take the form `did:ethr[:<network>]:<address>`, where the
//! network is a name (`sepolia`) or hex chain id (`0xaa36a7`) and defaults to
//! `mainnet` when omitted.
//!
//! See <https://github.com/decentralized-identity/ethr-did-resolver/blob/master/doc/did-method-spec.md>

mod create;
mod resolve;
mod rpc;

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;
use std::sync::LazyLock;

use k256::elliptic_curve::sec1::ToEncodedPoint;
use k256::PublicKey;
use regex::Regex;
use sha3::{Digest, Keccak256};

pub use self::create::*;
pub use self::rpc::*;
use crate::document::{
    Document, DocumentBuilder, KeyId, MethodType, PublicKeyFormat, VerificationMethodBuilder,
    VerificationRelationship,
};
use crate::error::Error;

/// The `did:ethr` prefix, including the trailing separator.
pub const PREFIX: &str = "did:ethr:";

/// Network assumed when a DID does not name one.
pub const DEFAULT_NETWORK: &str = "mainnet";

static DID_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new("^did:ethr:(?:(?<network>[a-zA-Z0-9_.-]+):)?(?<address>0x[0-9a-fA-F]{40})$")
        .expect("should compile")
});

/// `DidEthr` provides a type for implementing `did:ethr` issuance and
/// resolution.
#[allow(clippy::module_name_repetitions)]
pub struct DidEthr;

/// A parsed `did:ethr` identifier.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EthrDid {
    /// Network name or hex chain id.
    pub network: String,

    /// `0x`-prefixed account address, as written in the DID.
    pub address: String,
}

impl FromStr for EthrDid {
    type Err = Error;

    fn from_str(did: &str) -> crate::Result<Self> {
        if !did.starts_with(PREFIX) {
            return Err(Error::InvalidDid(format!("DID is not a valid did:ethr: {did}")));
        }
        let Some(caps) = DID_REGEX.captures(did) else {
            return Err(Error::InvalidDid(format!(
                "did:ethr must end in a 20-byte hex account address: {did}"
            )));
        };

        Ok(Self {
            network: caps
                .name("network")
                .map_or_else(|| DEFAULT_NETWORK.to_string(), |m| m.as_str().to_string()),
            address: caps["address"].to_string(),
        })
    }
}

impl Display for EthrDid {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{PREFIX}{}:{}", self.network, self.address)
    }
}

/// Derive the EIP-55 checksummed account address for a secp256k1 public key
/// in SEC1 form (compressed or uncompressed).
///
/// # Errors
///
/// Returns [`Error::InvalidPublicKey`] if the bytes are not a secp256k1 point.
pub fn address(public_key: &[u8]) -> crate::Result<String> {
    let public_key = PublicKey::from_sec1_bytes(public_key)
        .map_err(|e| Error::InvalidPublicKey(format!("not a secp256k1 public key: {e}")))?;
    let uncompressed = public_key.to_encoded_point(false);

    // skip the 0x04 SEC1 tag
    let hash = Keccak256::digest(&uncompressed.as_bytes()[1..]);
    let mut account = [0u8; 20];
    account.copy_from_slice(&hash[12..]);
    Ok(checksum(&account))
}

/// EIP-55 mixed-case checksum encoding of an account address.
///
/// See <https://eips.ethereum.org/EIPS/eip-55>.
#[must_use]
pub fn checksum(account: &[u8; 20]) -> String {
    let lower = hex::encode(account);
    let hash = Keccak256::digest(lower.as_bytes());

    let mut out = String::with_capacity(42);
    out.push_str("0x");
    for (i, c) in lower.chars().enumerate() {
        let nibble = if i % 2 == 0 { hash[i / 2] >> 4 } else { hash[i / 2] & 0x0f };
        if nibble >= 8 {
            out.push(c.to_ascii_uppercase());
        } else {
            out.push(c);
        }
    }
    out
}

impl DidEthr {
    /// Build the default ERC-1056 DID document: the account `owner` as the
    /// sole controller, identified by its CAIP-10 blockchain account id and
    /// authorized for authentication and assertion.
    ///
    /// This is the document a registry returns for an identity with no
    /// delegates or attributes.
    #[must_use]
    pub fn document(did: &str, chain_id: u64, owner: &str) -> Document {
        let vm = VerificationMethodBuilder::new(PublicKeyFormat::BlockchainAccountId {
            blockchain_account_id: format!("eip155:{chain_id}:{owner}"),
        })
        .method_type(MethodType::EcdsaSecp256k1RecoveryMethod2020)
        .key_id(KeyId::Fragment("controller".into()))
        .build(did);
        let kid = vm.id.clone();

        DocumentBuilder::new(did)
            .verification_method(vm)
            .relationship(VerificationRelationship::Authentication, &kid)
            .relationship(VerificationRelationship::AssertionMethod, &kid)
            .build()
    }
}

#[cfg(test)]
mod test {
    use k256::ecdsa::SigningKey;

    use super::*;

    #[test]
    fn parse() {
        let did: EthrDid = "did:ethr:sepolia:0xb9c5714089478a327f09197987f16f9e5d936e8a"
            .parse()
            .expect("should parse");
        assert_eq!(did.network, "sepolia");
        assert_eq!(did.address, "0xb9c5714089478a327f09197987f16f9e5d936e8a");

        let did: EthrDid =
            "did:ethr:0xb9c5714089478a327f09197987f16f9e5d936e8a".parse().expect("should parse");
        assert_eq!(did.network, "mainnet");

        let did: EthrDid = "did:ethr:0xaa36a7:0xb9c5714089478a327f09197987f16f9e5d936e8a"
            .parse()
            .expect("should parse");
        assert_eq!(did.network, "0xaa36a7");
    }

    #[test]
    fn parse_invalid() {
        for did in [
            "did:key:z6MkhaXgBZDvotDkL5257faiztiGiC2QtKLGpbnnEGta2doK",
            "did:ethr:sepolia:0xabc",
            "did:ethr:",
            "did:ethr:sepolia:b9c5714089478a327f09197987f16f9e5d936e8a",
        ] {
            let err = did.parse::<EthrDid>().expect_err("should fail");
            assert!(matches!(err, Error::InvalidDid(_)), "{did}");
        }
    }

    #[test]
    fn eip55() {
        // test vectors from EIP-55
        for expected in [
            "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed",
            "0xfB6916095ca1df60bB79Ce92cE3Ea74c37c5d359",
            "0xdbF03B407c01E7cD3CBea99509d93f8DDDC8C6FB",
            "0xD1220A0cf47c7B9Be7A2E6BA89F429762e7b9aDb",
        ] {
            let bytes = hex::decode(&expected[2..]).expect("should decode");
            let account: [u8; 20] = bytes.try_into().expect("should be 20 bytes");
            assert_eq!(checksum(&account), expected);
        }
    }

    #[test]
    fn address_from_key() {
        // private key 1 is the generator point
        let mut scalar = [0u8; 32];
        scalar[31] = 1;
        let signing_key = SigningKey::from_slice(&scalar).expect("should be a valid scalar");
        let public_key = signing_key.verifying_key().to_encoded_point(true);

        let address = address(public_key.as_bytes()).expect("should derive address");
        assert_eq!(address, "0x7E5F4552091A69125d5DfCb7b8C2659029395Bdf");
    }

    #[test]
    fn default_document() {
        let did = "did:ethr:sepolia:0x7E5F4552091A69125d5DfCb7b8C2659029395Bdf";
        let doc = DidEthr::document(did, 11_155_111, "0x7E5F4552091A69125d5DfCb7b8C2659029395Bdf");

        let json = serde_json::to_value(&doc).expect("should serialize");
        assert_eq!(
            json,
            serde_json::json!({
                "@context": [
                    "https://www.w3.org/ns/did/v1",
                    "https://w3id.org/security/suites/secp256k1recovery-2020/v2"
                ],
                "id": did,
                "verificationMethod": [{
                    "id": format!("{did}#controller"),
                    "type": "EcdsaSecp256k1RecoveryMethod2020",
                    "controller": did,
                    "blockchainAccountId": "eip155:11155111:0x7E5F4552091A69125d5DfCb7b8C2659029395Bdf"
                }],
                "authentication": [format!("{did}#controller")],
                "assertionMethod": [format!("{did}#controller")]
            })
        );
    }
}
