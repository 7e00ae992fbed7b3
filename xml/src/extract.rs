//! Depth-first search for key-shaped elements.

use rsaio::{ExtractOptions, RsaKey};

use crate::document::Element;
use crate::error::Result;
use crate::fields::element_to_key;

/// Collects every key-shaped element under `roots`, in document pre-order.
///
/// Only child elements are descended into; text is skipped. A matching
/// element is still searched for nested keys. A key-shaped element with a
/// component that is not base64 fails the whole walk.
pub fn extract_keys(roots: &[Element], options: &ExtractOptions) -> Result<Vec<RsaKey>> {
    let mut keys = Vec::new();
    let mut stack: Vec<(&Element, usize)> = roots.iter().rev().map(|root| (root, 0)).collect();

    while let Some((element, depth)) = stack.pop() {
        if depth > options.max_depth {
            return Err(rsaio::Error::DepthLimitExceeded(options.max_depth).into());
        }
        if let Some(key) = element_to_key(element)? {
            tracing::trace!(
                element = element.name(),
                depth,
                private = key.is_private(),
                "key-shaped element"
            );
            keys.push(key);
        }
        stack.extend(element.child_elements().rev().map(|child| (child, depth + 1)));
    }

    Ok(keys)
}
