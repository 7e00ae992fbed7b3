//! Depth-first search for key-shaped objects in JSON documents.

use rsaio::{ExtractOptions, RsaKey};
use serde_json::Value;

use crate::error::Result;
use crate::fields::object_to_key;

/// Collects every key-shaped object under `roots`, in document pre-order.
///
/// Objects and arrays are both descended into, and a matching object is
/// still searched for nested keys. A key-shaped object with a member that
/// is not base64 fails the whole walk. Fails with
/// [`rsaio::Error::DepthLimitExceeded`] when a node lies deeper than
/// `options.max_depth` (roots are at depth 0).
pub fn extract_keys(roots: &[Value], options: &ExtractOptions) -> Result<Vec<RsaKey>> {
    let mut keys = Vec::new();
    let mut stack: Vec<(&Value, usize)> = roots.iter().rev().map(|root| (root, 0)).collect();

    while let Some((value, depth)) = stack.pop() {
        if depth > options.max_depth {
            return Err(rsaio::Error::DepthLimitExceeded(options.max_depth).into());
        }
        match value {
            Value::Object(object) => {
                if let Some(key) = object_to_key(object)? {
                    tracing::trace!(depth, private = key.is_private(), "key-shaped object");
                    keys.push(key);
                }
                stack.extend(object.values().rev().map(|child| (child, depth + 1)));
            }
            Value::Array(items) => {
                stack.extend(items.iter().rev().map(|child| (child, depth + 1)));
            }
            Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => {}
        }
    }

    Ok(keys)
}

#[cfg(test)]
mod tests {
    use rsaio::PublicKey;
    use rstest::rstest;
    use serde_json::json;

    use super::*;
    use crate::error::Error;

    fn key(modulus: u8) -> RsaKey {
        RsaKey::Public(PublicKey::new(vec![modulus], vec![0x03]).unwrap())
    }

    fn extract(roots: &[Value]) -> Vec<RsaKey> {
        extract_keys(roots, &ExtractOptions::default()).unwrap()
    }

    #[test]
    fn test_unrelated_object_then_key() {
        let roots = [json!({ "name": "other" }), json!({ "n": "AQ==", "e": "Aw==" })];
        assert_eq!(extract(&roots), vec![key(0x01)]);
    }

    #[test]
    fn test_nested_keys_parent_first() {
        let root = json!({
            "n": "AQ==",
            "e": "Aw==",
            "child": { "n": "Ag==", "e": "Aw==" }
        });
        assert_eq!(extract(&[root]), vec![key(0x01), key(0x02)]);
    }

    #[rstest]
    #[case::top_level_array(json!([
        { "n": "AQ==", "e": "Aw==" },
        { "n": "Ag==", "e": "Aw==" }
    ]))]
    #[case::nested_array(json!({
        "keys": [ { "n": "AQ==", "e": "Aw==" }, 42, [ { "n": "Ag==", "e": "Aw==" } ] ]
    }))]
    fn test_arrays_are_descended(#[case] root: Value) {
        assert_eq!(extract(&[root]), vec![key(0x01), key(0x02)]);
    }

    #[test]
    fn test_pre_order_across_siblings() {
        let root = json!({
            "a": { "inner": { "n": "AQ==", "e": "Aw==" } },
            "b": { "n": "Ag==", "e": "Aw==" },
            "c": [ { "n": "Aw==", "e": "Aw==" } ]
        });
        assert_eq!(extract(&[root]), vec![key(0x01), key(0x02), key(0x03)]);
    }

    #[rstest]
    #[case::scalar(json!("n"))]
    #[case::empty_object(json!({}))]
    #[case::empty_array(json!([]))]
    fn test_no_keys(#[case] root: Value) {
        assert!(extract(&[root]).is_empty());
    }

    #[rstest]
    #[case::within_limit(2, true)]
    #[case::over_limit(1, false)]
    fn test_depth_limit(#[case] max_depth: usize, #[case] ok: bool) {
        // the key's member strings sit at depth 2
        let root = json!({ "a": { "n": "AQ==", "e": "Aw==" } });
        let result = extract_keys(&[root], &ExtractOptions { max_depth });
        if ok {
            assert_eq!(result.unwrap().len(), 1);
        } else {
            assert!(matches!(
                result,
                Err(Error::Key(rsaio::Error::DepthLimitExceeded(1)))
            ));
        }
    }
}
