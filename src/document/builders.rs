//! # Document Builders
//!
//! Method-independent helpers for assembling DID documents.

use serde_json::Value;

use super::{DID_CONTEXT, Document, MethodType, PublicKeyFormat, VerificationMethod};
use crate::core::Kind;

/// A builder for creating a DID Document.
///
/// The document always starts with the DID Core context. Contexts required by
/// verification method types are added as methods are added.
pub struct DocumentBuilder {
    // Document under construction
    doc: Document,
}

impl DocumentBuilder {
    /// Creates a new `DocumentBuilder` for the given DID.
    #[must_use]
    pub fn new(did: impl Into<String>) -> Self {
        let doc = Document {
            context: vec![Kind::String(DID_CONTEXT.to_string())],
            id: did.into(),
            ..Document::default()
        };
        Self { doc }
    }

    /// Add a context.
    ///
    /// Duplicates are ignored. Chain to add multiple contexts.
    #[must_use]
    pub fn context(mut self, context: Kind<Value>) -> Self {
        if !self.doc.context.contains(&context) {
            self.doc.context.push(context);
        }
        self
    }

    /// Add a verification method, along with the context its type requires.
    ///
    /// Chain to add multiple verification methods.
    #[must_use]
    pub fn verification_method(mut self, vm: VerificationMethod) -> Self {
        if let Some(context) = vm.type_.context() {
            self = self.context(Kind::String(context.to_string()));
        }
        self.doc.verification_method.get_or_insert_with(Vec::new).push(vm);
        self
    }

    /// Reference a verification method (by ID) from a verification
    /// relationship.
    ///
    /// Chain to add multiple relationships.
    #[must_use]
    pub fn relationship(mut self, relationship: VerificationRelationship, id: &str) -> Self {
        let entry = Kind::String(id.to_string());
        let list = match relationship {
            VerificationRelationship::Authentication => &mut self.doc.authentication,
            VerificationRelationship::AssertionMethod => &mut self.doc.assertion_method,
            VerificationRelationship::KeyAgreement => &mut self.doc.key_agreement,
            VerificationRelationship::CapabilityInvocation => &mut self.doc.capability_invocation,
            VerificationRelationship::CapabilityDelegation => &mut self.doc.capability_delegation,
        };
        list.get_or_insert_with(Vec::new).push(entry);
        self
    }

    /// Build the DID Document.
    #[must_use]
    pub fn build(self) -> Document {
        self.doc
    }
}

/// Verification relationships.
///
/// <https://www.w3.org/TR/did-1.0/#verification-relationships>
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerificationRelationship {
    /// <https://www.w3.org/TR/did-1.0/#authentication>
    Authentication,

    /// <https://www.w3.org/TR/did-1.0/#assertion>
    AssertionMethod,

    /// <https://www.w3.org/TR/did-1.0/#key-agreement>
    KeyAgreement,

    /// <https://www.w3.org/TR/did-1.0/#capability-invocation>
    CapabilityInvocation,

    /// <https://www.w3.org/TR/did-1.0/#capability-delegation>
    CapabilityDelegation,
}

/// A builder for creating a verification method.
pub struct VerificationMethodBuilder {
    key: PublicKeyFormat,
    method_type: MethodType,
    key_id: KeyId,
}

impl VerificationMethodBuilder {
    /// Creates a new `VerificationMethodBuilder` with the given public key.
    #[must_use]
    pub fn new(key: PublicKeyFormat) -> Self {
        Self {
            key,
            method_type: MethodType::default(),
            key_id: KeyId::Multibase,
        }
    }

    /// Specify the verification method type.
    #[must_use]
    pub fn method_type(mut self, method_type: MethodType) -> Self {
        self.method_type = method_type;
        self
    }

    /// Specify how to construct the key ID.
    #[must_use]
    pub fn key_id(mut self, key_id: KeyId) -> Self {
        self.key_id = key_id;
        self
    }

    /// Build the verification method for, and controlled by, `did`.
    #[must_use]
    pub fn build(self, did: &str) -> VerificationMethod {
        let fragment = match self.key_id {
            KeyId::Multibase => match &self.key {
                PublicKeyFormat::PublicKeyMultibase { public_key_multibase } => {
                    public_key_multibase.clone()
                }
                _ => "key-0".to_string(),
            },
            KeyId::Fragment(fragment) => fragment,
        };

        VerificationMethod {
            id: format!("{did}#{fragment}"),
            type_: self.method_type,
            controller: did.to_string(),
            key: self.key,
        }
    }
}

/// Instruction to the `VerificationMethodBuilder` on how to construct the key
/// ID.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum KeyId {
    /// Append the multibase-encoded key to the DID (`did:key` style). Falls
    /// back to `key-0` for keys not held in multibase form.
    Multibase,

    /// Append the given fragment to the DID, e.g. `controller` or `key-1`.
    Fragment(String),
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn relationships() {
        let vm = VerificationMethodBuilder::new(PublicKeyFormat::PublicKeyMultibase {
            public_key_multibase: "z6MkmM42vxfqZQsv4ehtTjFFxQ4sQKS2w6WR7emozFAn5cxu".into(),
        })
        .method_type(MethodType::Ed25519VerificationKey2020)
        .build("did:key:z6MkmM42vxfqZQsv4ehtTjFFxQ4sQKS2w6WR7emozFAn5cxu");

        assert_eq!(
            vm.id,
            "did:key:z6MkmM42vxfqZQsv4ehtTjFFxQ4sQKS2w6WR7emozFAn5cxu#z6MkmM42vxfqZQsv4ehtTjFFxQ4sQKS2w6WR7emozFAn5cxu"
        );

        let id = vm.id.clone();
        let doc = DocumentBuilder::new("did:key:z6MkmM42vxfqZQsv4ehtTjFFxQ4sQKS2w6WR7emozFAn5cxu")
            .verification_method(vm)
            .relationship(VerificationRelationship::Authentication, &id)
            .relationship(VerificationRelationship::AssertionMethod, &id)
            .build();

        assert_eq!(doc.context.len(), 2);
        assert_eq!(doc.authentication, Some(vec![Kind::String(id.clone())]));
        assert_eq!(doc.assertion_method, Some(vec![Kind::String(id)]));
        assert!(doc.key_agreement.is_none());
    }

    #[test]
    fn fragment_key_id() {
        let vm = VerificationMethodBuilder::new(PublicKeyFormat::BlockchainAccountId {
            blockchain_account_id: "eip155:1:0xb9c5714089478a327f09197987f16f9e5d936e8a".into(),
        })
        .method_type(MethodType::EcdsaSecp256k1RecoveryMethod2020)
        .key_id(KeyId::Fragment("controller".into()))
        .build("did:ethr:0xb9c5714089478a327f09197987f16f9e5d936e8a");

        assert_eq!(vm.id, "did:ethr:0xb9c5714089478a327f09197987f16f9e5d936e8a#controller");
        assert_eq!(vm.controller, "did:ethr:0xb9c5714089478a327f09197987f16f9e5d936e8a");
    }
}
