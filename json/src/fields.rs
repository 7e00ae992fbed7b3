//! Mapping between key components and JSON object members.
//!
//! ```json
//! { "n": "...", "e": "...", "d": "...", "p": "...", "q": "...",
//!   "dp": "...", "dq": "...", "qi": "..." }
//! ```
//!
//! Values are standard padded base64 of the unsigned magnitudes.

use base64::{Engine, engine::general_purpose::STANDARD};
use rsaio::{Component, KeyForm, PrivateComponents, PrivateKey, PublicKey, RsaKey};
use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// JSON member name for each component.
pub fn member_name(component: Component) -> &'static str {
    match component {
        Component::Modulus => "n",
        Component::Exponent => "e",
        Component::D => "d",
        Component::P => "p",
        Component::Q => "q",
        Component::DP => "dp",
        Component::DQ => "dq",
        Component::InverseQ => "qi",
    }
}

/// Builds the JSON object for `key`.
///
/// Members are inserted in the order `n, e, d, p, q, dp, dq, qi`.
pub fn key_to_object(key: &RsaKey, form: KeyForm) -> Result<Map<String, Value>> {
    let components: Vec<(Component, &[u8])> = match form {
        KeyForm::Public => key.public_key().components().to_vec(),
        KeyForm::Private => key.require_private()?.components().to_vec(),
    };

    let object = components
        .into_iter()
        .map(|(component, bytes)| {
            (
                member_name(component).to_string(),
                Value::String(STANDARD.encode(bytes)),
            )
        })
        .collect();
    Ok(object)
}

fn member<'a>(object: &'a Map<String, Value>, component: Component) -> Option<&'a str> {
    match object.get(member_name(component))? {
        Value::String(text) => Some(text),
        _ => None,
    }
}

fn decode_member(component: Component, text: &str) -> Result<Vec<u8>> {
    STANDARD.decode(text).map_err(|source| Error::Base64 {
        member: member_name(component),
        source,
    })
}

/// Reads a key from a key-shaped JSON object.
///
/// Returns `Ok(None)` unless `n` and `e` are string members. The key is
/// private only when all six private members are strings as well. A
/// member that passes that test but is not base64, or decodes to nothing,
/// is an error.
pub fn object_to_key(object: &Map<String, Value>) -> Result<Option<RsaKey>> {
    let (Some(modulus), Some(exponent)) = (
        member(object, Component::Modulus),
        member(object, Component::Exponent),
    ) else {
        return Ok(None);
    };
    let public = PublicKey::new(
        decode_member(Component::Modulus, modulus)?,
        decode_member(Component::Exponent, exponent)?,
    )?;

    let found = [
        Component::D,
        Component::P,
        Component::Q,
        Component::DP,
        Component::DQ,
        Component::InverseQ,
    ]
    .map(|c| member(object, c));

    match found {
        [Some(d), Some(p), Some(q), Some(dp), Some(dq), Some(inverse_q)] => {
            let private = PrivateComponents {
                d: decode_member(Component::D, d)?,
                p: decode_member(Component::P, p)?,
                q: decode_member(Component::Q, q)?,
                dp: decode_member(Component::DP, dp)?,
                dq: decode_member(Component::DQ, dq)?,
                inverse_q: decode_member(Component::InverseQ, inverse_q)?,
            };
            Ok(Some(RsaKey::Private(PrivateKey::new(public, private)?)))
        }
        [None, None, None, None, None, None] => Ok(Some(RsaKey::Public(public))),
        _ => {
            tracing::debug!("incomplete private components, reading public part only");
            Ok(Some(RsaKey::Public(public)))
        }
    }
}

/// Serializes `key` as pretty printed JSON.
pub fn to_json(key: &RsaKey, form: KeyForm) -> Result<String> {
    let object = key_to_object(key, form)?;
    Ok(serde_json::to_string_pretty(&Value::Object(object))?)
}
