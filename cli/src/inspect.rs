use std::fmt::Write;

use clap::Args;
use rsaio::{KeyForm, RsaKey};
use serde::Serialize;

use crate::error::Result;
use crate::format::{KeyFormat, decode_keys};
use crate::output::OutputFormat;
use crate::utils::read_input;

#[derive(Args)]
pub(crate) struct Config {
    /// Path to the input file. If not specified, reads from stdin
    file: Option<String>,

    /// Encoding of the input
    #[arg(long, value_enum)]
    from: KeyFormat,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text")]
    output: OutputFormat,

    /// Byte offset in the input to start decoding at
    #[arg(long, default_value_t = 0)]
    start: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
enum KeyKind {
    Public,
    Private,
}

impl From<KeyForm> for KeyKind {
    fn from(form: KeyForm) -> Self {
        match form {
            KeyForm::Public => KeyKind::Public,
            KeyForm::Private => KeyKind::Private,
        }
    }
}

impl KeyKind {
    fn title(&self) -> &'static str {
        match self {
            KeyKind::Public => "RSA Public Key",
            KeyKind::Private => "RSA Private Key",
        }
    }
}

#[derive(Serialize)]
struct KeyInfo {
    kind: KeyKind,
    modulus_bits: u32,
    exponent: Option<u64>,
    components: Vec<ComponentInfo>,
}

#[derive(Serialize)]
struct ComponentInfo {
    name: String,
    bytes: usize,
}

impl From<&RsaKey> for KeyInfo {
    fn from(key: &RsaKey) -> Self {
        let components = match key.private_key() {
            Some(private) => private.components().to_vec(),
            None => key.public_key().components().to_vec(),
        };
        KeyInfo {
            kind: KeyKind::from(key.form()),
            modulus_bits: key.public_key().key_size(),
            exponent: key.public_key().exponent_value(),
            components: components
                .into_iter()
                .map(|(component, bytes)| ComponentInfo {
                    name: component.to_string(),
                    bytes: bytes.len(),
                })
                .collect(),
        }
    }
}

pub(crate) fn execute(config: Config) -> Result<()> {
    let input = read_input(config.file.as_deref())?;
    let keys = decode_keys(config.from, input, config.start)?;
    let infos = keys.iter().map(KeyInfo::from).collect::<Vec<_>>();

    match config.output {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&infos)?);
        }
        OutputFormat::Text => {
            let mut output = String::new();
            for (index, info) in infos.iter().enumerate() {
                if index > 0 {
                    writeln!(output)?;
                }
                write_text(&mut output, index, info)?;
            }
            print!("{}", output);
        }
    }

    Ok(())
}

fn write_text(output: &mut String, index: usize, info: &KeyInfo) -> Result<()> {
    writeln!(output, "Key #{}: {}", index, info.kind.title())?;
    writeln!(output, "Modulus (n): {} bits", info.modulus_bits)?;
    match info.exponent {
        Some(exponent) => writeln!(output, "Public Exponent (e): {}", exponent)?,
        None => writeln!(output, "Public Exponent (e): too large")?,
    }
    writeln!(output, "Component Sizes:")?;
    for component in &info.components {
        writeln!(output, "  {}: {} bytes", component.name, component.bytes)?;
    }
    Ok(())
}
