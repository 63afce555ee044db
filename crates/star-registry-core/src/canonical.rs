//! Canonical CBOR encoding of block content.
//!
//! The block hash covers exactly these fields, encoded with RFC 8949 core
//! deterministic rules:
//! - Map keys sorted by encoded byte comparison
//! - Integers use smallest valid encoding
//! - Definite lengths only
//!
//! The stored hash itself is never part of the encoding.

use ciborium::value::Value;

use crate::types::BlockHash;

/// Content field keys (integer keys for compact encoding).
mod keys {
    pub const HEIGHT: u64 = 0;
    pub const TIMESTAMP: u64 = 1;
    pub const PREVIOUS_HASH: u64 = 2;
    pub const PAYLOAD: u64 = 3;
}

/// Encode the hashed content of a block to canonical CBOR bytes.
pub fn canonical_content_bytes(
    height: u64,
    timestamp: i64,
    previous_hash: Option<&BlockHash>,
    payload: &[u8],
) -> Vec<u8> {
    let value = content_to_cbor_value(height, timestamp, previous_hash, payload);
    let mut buf = Vec::new();
    encode_value_to(&mut buf, &value);
    buf
}

/// Blake3 over the canonical content bytes.
pub fn content_hash(
    height: u64,
    timestamp: i64,
    previous_hash: Option<&BlockHash>,
    payload: &[u8],
) -> BlockHash {
    let bytes = canonical_content_bytes(height, timestamp, previous_hash, payload);
    BlockHash(*blake3::hash(&bytes).as_bytes())
}

fn content_to_cbor_value(
    height: u64,
    timestamp: i64,
    previous_hash: Option<&BlockHash>,
    payload: &[u8],
) -> Value {
    let previous = match previous_hash {
        Some(hash) => Value::Bytes(hash.0.to_vec()),
        None => Value::Null,
    };

    Value::Map(vec![
        (Value::Integer(keys::HEIGHT.into()), Value::Integer(height.into())),
        (Value::Integer(keys::TIMESTAMP.into()), Value::Integer(timestamp.into())),
        (Value::Integer(keys::PREVIOUS_HASH.into()), previous),
        (Value::Integer(keys::PAYLOAD.into()), Value::Bytes(payload.to_vec())),
    ])
}

fn encode_value_to(buf: &mut Vec<u8>, value: &Value) {
    match value {
        Value::Integer(i) => encode_integer(buf, *i),
        Value::Bytes(b) => {
            encode_uint(buf, 2, b.len() as u64);
            buf.extend_from_slice(b);
        }
        Value::Map(entries) => encode_map_canonical(buf, entries),
        Value::Null => buf.push(0xf6),
        _ => panic!("unsupported CBOR value type in block content"),
    }
}

/// Encode a CBOR integer (major types 0 and 1).
fn encode_integer(buf: &mut Vec<u8>, i: ciborium::value::Integer) {
    let n: i128 = i.into();

    if n >= 0 {
        encode_uint(buf, 0, n as u64);
    } else {
        // CBOR encodes -1 as 0, -2 as 1, etc.
        encode_uint(buf, 1, (-1 - n) as u64);
    }
}

/// Encode an unsigned integer with the given major type.
fn encode_uint(buf: &mut Vec<u8>, major: u8, n: u64) {
    let mt = major << 5;
    if n < 24 {
        buf.push(mt | (n as u8));
    } else if n <= 0xff {
        buf.push(mt | 24);
        buf.push(n as u8);
    } else if n <= 0xffff {
        buf.push(mt | 25);
        buf.extend_from_slice(&(n as u16).to_be_bytes());
    } else if n <= 0xffff_ffff {
        buf.push(mt | 26);
        buf.extend_from_slice(&(n as u32).to_be_bytes());
    } else {
        buf.push(mt | 27);
        buf.extend_from_slice(&n.to_be_bytes());
    }
}

/// Encode a map canonically (major type 5), keys sorted by encoded bytes.
fn encode_map_canonical(buf: &mut Vec<u8>, entries: &[(Value, Value)]) {
    let mut pairs: Vec<(Vec<u8>, &Value)> = entries
        .iter()
        .map(|(k, v)| {
            let mut key_buf = Vec::new();
            encode_value_to(&mut key_buf, k);
            (key_buf, v)
        })
        .collect();

    pairs.sort_by(|a, b| a.0.cmp(&b.0));

    encode_uint(buf, 5, pairs.len() as u64);
    for (key_bytes, value) in pairs {
        buf.extend_from_slice(&key_bytes);
        encode_value_to(buf, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_encoding_deterministic() {
        let prev = BlockHash::from_bytes([0x11; 32]);
        let a = canonical_content_bytes(3, 1_700_000_000, Some(&prev), b"payload");
        let b = canonical_content_bytes(3, 1_700_000_000, Some(&prev), b"payload");
        assert_eq!(a, b);
    }

    #[test]
    fn test_genesis_encodes_null_link() {
        let bytes = canonical_content_bytes(0, 0, None, b"");
        // map(4), key 0 -> 0, key 1 -> 0, key 2 -> null, key 3 -> bytes(0)
        assert_eq!(bytes, vec![0xa4, 0x00, 0x00, 0x01, 0x00, 0x02, 0xf6, 0x03, 0x40]);
    }

    #[test]
    fn test_every_field_affects_hash() {
        let prev = BlockHash::from_bytes([0x22; 32]);
        let base = content_hash(1, 100, Some(&prev), b"x");

        assert_ne!(base, content_hash(2, 100, Some(&prev), b"x"));
        assert_ne!(base, content_hash(1, 101, Some(&prev), b"x"));
        assert_ne!(base, content_hash(1, 100, None, b"x"));
        assert_ne!(base, content_hash(1, 100, Some(&prev), b"y"));
    }

    #[test]
    fn test_integer_encoding() {
        let mut buf = Vec::new();

        encode_uint(&mut buf, 0, 23);
        assert_eq!(buf, vec![0x17]);

        buf.clear();
        encode_uint(&mut buf, 0, 24);
        assert_eq!(buf, vec![0x18, 24]);

        buf.clear();
        encode_uint(&mut buf, 0, 256);
        assert_eq!(buf, vec![0x19, 0x01, 0x00]);

        buf.clear();
        encode_integer(&mut buf, (-1i64).into());
        assert_eq!(buf, vec![0x20]);
    }

    #[test]
    fn test_map_key_ordering() {
        let mut buf = Vec::new();
        let entries = vec![
            (Value::Integer(3.into()), Value::Integer(30.into())),
            (Value::Integer(0.into()), Value::Integer(0.into())),
        ];
        encode_map_canonical(&mut buf, &entries);

        assert_eq!(buf, vec![0xa2, 0x00, 0x00, 0x03, 0x18, 30]);
    }
}
