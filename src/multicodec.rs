//! # Multicodec
//!
//! A multicodec value is a self-describing byte string: an unsigned varint
//! code identifying the content type, followed by the content itself.
//!
//! See <https://github.com/multiformats/multicodec> and
//! <https://github.com/multiformats/unsigned-varint>.

use crate::error::Error;

/// Multicodec code for an Ed25519 public key.
pub const ED25519_PUB: u64 = 0xed;

/// Multicodec code for a compressed secp256k1 public key.
pub const SECP256K1_PUB: u64 = 0xe7;

/// The multiformats unsigned varint is capped at 9 bytes (63 bits).
const MAX_VARINT_LEN: usize = 9;

/// bitmask for the 7 least significant bits
const LSB_7: u8 = 0x7f;
/// bitmask for the continuation bit
const MSB: u8 = 0x80;

/// A decoded multicodec value.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MulticodecValue {
    /// The content type code.
    pub code: u64,

    /// The bytes following the varint prefix.
    pub payload: Vec<u8>,
}

/// Prefix `payload` with the varint encoding of `code`.
#[must_use]
pub fn encode(code: u64, payload: &[u8]) -> Vec<u8> {
    let mut out = encode_varint(code);
    out.extend_from_slice(payload);
    out
}

/// Split `bytes` into its varint code and the remaining payload.
///
/// # Errors
///
/// Returns [`Error::MalformedCodec`] if `bytes` is empty, the varint is
/// truncated (the last available byte has its continuation bit set), longer
/// than 9 bytes, or not minimally encoded.
pub fn decode(bytes: &[u8]) -> crate::Result<MulticodecValue> {
    let (code, len) = decode_varint(bytes)?;
    Ok(MulticodecValue {
        code,
        payload: bytes[len..].to_vec(),
    })
}

/// Unsigned LEB128: 7 bits per byte, least significant group first, with the
/// high bit set on every byte except the last.
#[must_use]
pub fn encode_varint(mut value: u64) -> Vec<u8> {
    let mut out = Vec::with_capacity(MAX_VARINT_LEN);
    loop {
        #[allow(clippy::cast_possible_truncation)]
        let group = (value as u8) & LSB_7;
        value >>= 7;
        if value == 0 {
            out.push(group);
            return out;
        }
        out.push(group | MSB);
    }
}

/// Decode a leading varint, returning the value and the number of bytes
/// consumed.
///
/// # Errors
///
/// Returns [`Error::MalformedCodec`] when the varint is missing, truncated,
/// too long or not minimally encoded.
pub fn decode_varint(bytes: &[u8]) -> crate::Result<(u64, usize)> {
    if bytes.is_empty() {
        return Err(Error::MalformedCodec("no bytes to decode".into()));
    }

    let mut value = 0u64;
    for (i, byte) in bytes.iter().enumerate() {
        if i == MAX_VARINT_LEN {
            return Err(Error::MalformedCodec(format!(
                "varint exceeds {MAX_VARINT_LEN} bytes"
            )));
        }
        value |= u64::from(byte & LSB_7) << (7 * i);
        if byte & MSB == 0 {
            // a trailing zero group adds nothing, so only the minimal form is accepted
            if i > 0 && *byte == 0 {
                return Err(Error::MalformedCodec("varint is not minimally encoded".into()));
            }
            return Ok((value, i + 1));
        }
    }

    Err(Error::MalformedCodec("varint is truncated: continuation bit set on last byte".into()))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn known_varints() {
        // See https://github.com/multiformats/unsigned-varint
        let examples: [(u64, &[u8]); 10] = [
            (0x01, &[0x01]),
            (0x7f, &[0x7f]),
            (0x80, &[0x80, 0x01]),
            (0xff, &[0xff, 0x01]),
            (0x012c, &[0xac, 0x02]),
            (0x4000, &[0x80, 0x80, 0x01]),
            (ED25519_PUB, &[0xed, 0x01]),
            (SECP256K1_PUB, &[0xe7, 0x01]),
            (0x1200, &[0x80, 0x24]),
            (0, &[0x00]),
        ];

        for (value, encoded) in examples {
            assert_eq!(encode_varint(value), encoded, "encoding {value:#x}");
            assert_eq!(decode_varint(encoded), Ok((value, encoded.len())), "decoding {value:#x}");
        }
    }

    #[test]
    fn ed25519_prefix() {
        let public_key: Vec<u8> = (0x01..=0x20).collect();

        let encoded = encode(ED25519_PUB, &public_key);
        assert_eq!(encoded.len(), 34);
        assert_eq!(&encoded[..2], &[0xed, 0x01]);
        assert_eq!(&encoded[2..], public_key.as_slice());

        let decoded = decode(&encoded).expect("should decode");
        assert_eq!(decoded.code, 237);
        assert_eq!(decoded.payload, public_key);
    }

    #[test]
    fn empty_payload() {
        let decoded = decode(&[0xed, 0x01]).expect("should decode");
        assert_eq!(decoded.code, ED25519_PUB);
        assert!(decoded.payload.is_empty());
    }

    #[test]
    fn truncated() {
        let err = decode(&[0xed]).expect_err("should fail");
        assert!(matches!(err, Error::MalformedCodec(_)));

        let err = decode(&[]).expect_err("should fail");
        assert!(matches!(err, Error::MalformedCodec(_)));
    }

    #[test]
    fn too_long() {
        let err = decode(&[0xff; 10]).expect_err("should fail");
        assert!(matches!(err, Error::MalformedCodec(_)));
    }

    #[test]
    fn not_minimal() {
        // 0xed padded with an empty continuation group
        let err = decode(&[0xed, 0x81, 0x00, 0x01]).expect_err("should fail");
        assert!(matches!(err, Error::MalformedCodec(_)));

        let err = decode_varint(&[0x80, 0x00]).expect_err("should fail");
        assert!(matches!(err, Error::MalformedCodec(_)));

        // a lone zero byte is the minimal encoding of 0
        assert_eq!(decode_varint(&[0x00, 0x01]), Ok((0, 1)));
    }
}
