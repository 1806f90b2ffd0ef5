//! # DID Key
//!
//! The `did:key` method is a DID method for static cryptographic keys. At its
//! core, it is based on expanding a cryptographic public key into a DID
//! Document.
//!
//! A `did:key` identifier is `did:key:` followed by the multibase
//! (base-58-btc, `z`) encoding of the multicodec-prefixed public key. Only
//! Ed25519 keys (multicodec `0xed`) are supported.
//!
//! See:
//!
//! - <https://w3c-ccg.github.io/did-method-key>
//! - <https://w3c.github.io/did-resolution>

mod create;
mod resolve;

pub use self::create::*;

use crate::document::{
    Document, DocumentBuilder, MethodType, PublicKeyFormat, VerificationMethodBuilder,
    VerificationRelationship,
};
use crate::{multibase, multicodec};

/// The `did:key` prefix, including the trailing separator.
pub const PREFIX: &str = "did:key:";

/// `DidKey` provides a type for implementing `did:key` issuance and
/// resolution.
#[allow(clippy::module_name_repetitions)]
pub struct DidKey;

impl DidKey {
    /// Encode an Ed25519 public key as a `did:key` multibase identifier
    /// (without the `did:key:` prefix).
    #[must_use]
    pub fn multikey(public_key: &[u8; 32]) -> String {
        multibase::encode(&multicodec::encode(multicodec::ED25519_PUB, public_key))
    }

    /// Build the DID Document for an Ed25519 public key.
    ///
    /// The document is a pure function of the key: it has a single
    /// `Ed25519VerificationKey2020` verification method identified by
    /// `<did>#<multibase>`, referenced from `authentication` and
    /// `assertionMethod`.
    #[must_use]
    pub fn document(public_key: &[u8; 32]) -> Document {
        let multikey = Self::multikey(public_key);
        let did = format!("{PREFIX}{multikey}");

        let vm = VerificationMethodBuilder::new(PublicKeyFormat::PublicKeyMultibase {
            public_key_multibase: multikey,
        })
        .method_type(MethodType::Ed25519VerificationKey2020)
        .build(&did);
        let kid = vm.id.clone();

        DocumentBuilder::new(did)
            .verification_method(vm)
            .relationship(VerificationRelationship::Authentication, &kid)
            .relationship(VerificationRelationship::AssertionMethod, &kid)
            .build()
    }
}
