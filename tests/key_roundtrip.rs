//! Tests issuing a `did:key` and resolving it back to the same document.

use test_utils::{seeded_rng, MockLedger};
use vercre_did_codec::{DidKey, Kind, PublicKeyFormat, Resolver};

// Issue a new `did:key` and resolve it. The resolved document should be
// identical to the one returned at issuance and the ledger never consulted.
#[tokio::test]
async fn issue_then_resolve() {
    let ledger = MockLedger::new();
    let resolver = Resolver::new(ledger.clone());

    let issued = DidKey::issue(&mut seeded_rng(42));
    assert!(issued.did.starts_with("did:key:z6Mk"));

    let doc = resolver.resolve(&issued.did).await.expect("should resolve");
    assert_eq!(doc, issued.document);
    assert_eq!(ledger.calls(), 0);
}

// Every identifier issued from the same seed is the same.
#[test]
fn seeded_issuance() {
    let first = DidKey::issue(&mut seeded_rng(7));
    let second = DidKey::issue(&mut seeded_rng(7));
    let third = DidKey::issue(&mut seeded_rng(8));

    assert_eq!(first.did, second.did);
    assert_eq!(first.private_key.as_bytes(), second.private_key.as_bytes());
    assert_ne!(first.did, third.did);
}

// The verification method carries the same multibase key as the DID and is
// referenced by the authentication and assertion relationships.
#[tokio::test]
async fn document_shape() {
    let issued = DidKey::issue(&mut seeded_rng(1));
    let multikey = issued.did.strip_prefix("did:key:").expect("should have prefix");
    let kid = format!("{}#{multikey}", issued.did);

    let doc = Resolver::new(MockLedger::new()).resolve(&issued.did).await.expect("should resolve");
    let vm = doc.verification_method(&kid).expect("should have verification method");
    assert_eq!(vm.controller, issued.did);
    assert_eq!(
        vm.key,
        PublicKeyFormat::PublicKeyMultibase {
            public_key_multibase: multikey.to_string()
        }
    );

    let expected = Some(vec![Kind::String(kid)]);
    assert_eq!(doc.authentication, expected);
    assert_eq!(doc.assertion_method, expected);
}

// The public key recovered from the DID matches the generated key.
#[test]
fn recover_public_key() {
    let issued = DidKey::issue(&mut seeded_rng(9));
    let public_key = DidKey::public_key(&issued.did).expect("should decode");
    assert_eq!(&issued.private_key.as_bytes()[32..], public_key.as_slice());
}
