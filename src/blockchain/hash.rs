//! Canonical hashing of blocks.
//!
//! Two nodes must derive the same digest for the same block no matter how
//! they happened to build or receive it, so the preimage is written with one
//! fixed encoding: object keys sorted by name, arrays in order, no
//! whitespace, integers in decimal and reals in shortest round-trip form.

use serde::Serialize;
use serde_json::Value;
use sha2::{Digest, Sha256};

/// SHA-256 (lowercase hex) of the canonical JSON encoding of `item`.
pub fn hash<T: Serialize>(item: &T) -> String {
    let value = serde_json::to_value(item).expect("block serializes to a JSON value");
    hash_value(&value)
}

/// Same as [`hash`], for a block that is already a loose JSON value.
pub fn hash_value(value: &Value) -> String {
    sha256_hex(canonical_json(value).as_bytes())
}

/// Lowercase hex SHA-256 of raw bytes.
pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

pub fn canonical_json(value: &Value) -> String {
    let mut out = String::new();
    write_canonical(value, &mut out);
    out
}

fn write_canonical(value: &Value, out: &mut String) {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            out.push('{');
            for (i, (key, val)) in entries.into_iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_string(key, out);
                out.push(':');
                write_canonical(val, out);
            }
            out.push('}');
        }
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_canonical(item, out);
            }
            out.push(']');
        }
        Value::String(s) => write_string(s, out),
        // Number, Bool and Null already have a single textual form.
        other => out.push_str(&other.to_string()),
    }
}

fn write_string(s: &str, out: &mut String) {
    out.push_str(&Value::from(s).to_string());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blockchain::Block;
    use crate::transaction::Transaction;
    use serde_json::json;

    fn sample_block() -> Block {
        Block {
            index: 2,
            timestamp: 1_700_000_000.25,
            transactions: vec![Transaction::new("A", "B", 10), Transaction::new("B", "C", 5)],
            proof: 35293,
            previous_hash: "abc".into(),
        }
    }

    #[test]
    fn hash_is_stable_across_calls() {
        let b = sample_block();
        assert_eq!(hash(&b), hash(&b));
        assert_eq!(hash(&b), hash(&b.clone()));
        assert_eq!(hash(&b).len(), 64);
    }

    #[test]
    fn field_order_does_not_matter() {
        let b = sample_block();
        let reordered = json!({
            "transactions": [
                {"amount": 10, "recipient": "B", "sender": "A"},
                {"recipient": "C", "amount": 5, "sender": "B"}
            ],
            "proof": 35293,
            "previous_hash": "abc",
            "timestamp": 1_700_000_000.25,
            "index": 2
        });
        assert_eq!(hash(&b), hash_value(&reordered));
    }

    #[test]
    fn fractional_amounts_hash_like_their_json() {
        let mut b = sample_block();
        b.transactions[0].amount = serde_json::Number::from_f64(2.5).unwrap();
        b.transactions[1].amount = (-3).into();
        let loose = json!({
            "index": 2,
            "timestamp": 1_700_000_000.25,
            "transactions": [
                {"sender": "A", "recipient": "B", "amount": 2.5},
                {"sender": "B", "recipient": "C", "amount": -3}
            ],
            "proof": 35293,
            "previous_hash": "abc"
        });
        assert_eq!(hash(&b), hash_value(&loose));
        assert!(canonical_json(&loose).contains(r#""amount":2.5"#));
    }

    #[test]
    fn transaction_order_matters() {
        let a = sample_block();
        let mut b = sample_block();
        b.transactions.reverse();
        assert_ne!(hash(&a), hash(&b));
    }

    #[test]
    fn canonical_form_sorts_keys_without_whitespace() {
        let v = json!({"b": 1, "a": [true, null, "x\"y"], "c": {"z": 0.5, "y": -3}});
        assert_eq!(
            canonical_json(&v),
            r#"{"a":[true,null,"x\"y"],"b":1,"c":{"y":-3,"z":0.5}}"#
        );
    }

    #[test]
    fn sha256_matches_known_vector() {
        assert_eq!(
            sha256_hex(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }
}
