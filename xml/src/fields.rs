//! Mapping between key components and XML elements.
//!
//! ```xml
//! <RSAKeyValue>
//!   <Modulus>...</Modulus>
//!   <Exponent>...</Exponent>
//!   <P>...</P> <Q>...</Q> <DP>...</DP> <DQ>...</DQ>
//!   <InverseQ>...</InverseQ> <D>...</D>
//! </RSAKeyValue>
//! ```

use base64::{Engine, engine::general_purpose::STANDARD};
use rsaio::{Component, KeyForm, PrivateComponents, PrivateKey, PublicKey, RsaKey};

use crate::document::{Element, Node};
use crate::error::{Error, Result};

pub const KEY_VALUE: &str = "RSAKeyValue";
pub const KEY_PAIR: &str = "RSAKeyPair";

/// Root element naming for private keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum XmlFlavor {
    /// `RSAKeyValue` for public keys, `RSAKeyPair` for private keys.
    #[default]
    W3c,
    /// `RSAKeyValue` for both.
    DotNet,
}

impl XmlFlavor {
    pub fn root_name(&self, form: KeyForm) -> &'static str {
        match (self, form) {
            (XmlFlavor::W3c, KeyForm::Private) => KEY_PAIR,
            _ => KEY_VALUE,
        }
    }
}

/// Element order of the written document.
const WRITE_ORDER: [Component; 8] = [
    Component::Modulus,
    Component::Exponent,
    Component::P,
    Component::Q,
    Component::DP,
    Component::DQ,
    Component::InverseQ,
    Component::D,
];

/// Builds the key element for `key`.
pub fn key_to_element(key: &RsaKey, form: KeyForm, flavor: XmlFlavor) -> Result<Element> {
    let mut root = Element::new(flavor.root_name(form));
    match form {
        KeyForm::Public => {
            for (component, bytes) in key.public_key().components() {
                root.push(component_element(component, bytes));
            }
        }
        KeyForm::Private => {
            let private = key.require_private()?;
            let components = private.components();
            for wanted in WRITE_ORDER {
                if let Some((component, bytes)) = components.iter().find(|(c, _)| *c == wanted) {
                    root.push(component_element(*component, bytes));
                }
            }
        }
    }
    Ok(root)
}

fn component_element(component: Component, bytes: &[u8]) -> Node {
    Node::Element(Element::with_text(
        component.to_string(),
        STANDARD.encode(bytes),
    ))
}

/// Serializes `key` as indented XML.
pub fn to_xml(key: &RsaKey, form: KeyForm, flavor: XmlFlavor) -> Result<String> {
    key_to_element(key, form, flavor)?.to_xml_string()
}

fn component_text(element: &Element, component: Component) -> Option<&str> {
    element.find_child(&component.to_string())?.single_text()
}

fn decode_component(component: Component, text: &str) -> Result<Vec<u8>> {
    // base64 text may be wrapped over several lines
    let compact = text.split_ascii_whitespace().collect::<String>();
    STANDARD
        .decode(compact)
        .map_err(|source| Error::Base64 { component, source })
}

/// Reads a key from a key-shaped element.
///
/// The element name itself is not checked; any element whose `Modulus`
/// and `Exponent` children hold a single text node qualifies. A qualifying
/// child that is not base64, or decodes to nothing, is an error.
pub fn element_to_key(element: &Element) -> Result<Option<RsaKey>> {
    let (Some(modulus), Some(exponent)) = (
        component_text(element, Component::Modulus),
        component_text(element, Component::Exponent),
    ) else {
        return Ok(None);
    };
    let public = PublicKey::new(
        decode_component(Component::Modulus, modulus)?,
        decode_component(Component::Exponent, exponent)?,
    )?;

    let found = [
        Component::D,
        Component::P,
        Component::Q,
        Component::DP,
        Component::DQ,
        Component::InverseQ,
    ]
    .map(|c| component_text(element, c));

    match found {
        [Some(d), Some(p), Some(q), Some(dp), Some(dq), Some(inverse_q)] => {
            let private = PrivateComponents {
                d: decode_component(Component::D, d)?,
                p: decode_component(Component::P, p)?,
                q: decode_component(Component::Q, q)?,
                dp: decode_component(Component::DP, dp)?,
                dq: decode_component(Component::DQ, dq)?,
                inverse_q: decode_component(Component::InverseQ, inverse_q)?,
            };
            Ok(Some(RsaKey::Private(PrivateKey::new(public, private)?)))
        }
        [None, None, None, None, None, None] => Ok(Some(RsaKey::Public(public))),
        _ => {
            tracing::debug!(
                element = element.name(),
                "incomplete private components, reading public part only"
            );
            Ok(Some(RsaKey::Public(public)))
        }
    }
}
