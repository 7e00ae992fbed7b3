use std::io::{self, Write};
use std::str::FromStr;

use clap::Args;
use pem::Label;
use rsaio::{KeyForm, RsaKey};

use crate::error::Result;
use crate::format::{KeyFormat, XmlFlavorArg, decode_keys};
use crate::utils::{format_hex_dump, read_input};

#[derive(Args)]
pub(crate) struct Config {
    /// Path to the input file. If not specified, reads from stdin
    file: Option<String>,

    /// Encoding of the input
    #[arg(long, value_enum)]
    from: KeyFormat,

    /// Encoding of the output
    #[arg(long, value_enum)]
    to: KeyFormat,

    /// Include the private components (fails for public keys)
    #[arg(long)]
    private: bool,

    /// PEM label to write instead of RSA PUBLIC KEY / RSA PRIVATE KEY
    #[arg(long)]
    label: Option<String>,

    /// Root element naming for XML output
    #[arg(long, value_enum, default_value = "w3c")]
    xml_flavor: XmlFlavorArg,

    /// Byte offset in the input to start decoding at
    #[arg(long, default_value_t = 0)]
    start: usize,

    /// Output DER as hexadecimal dump instead of binary
    #[arg(long)]
    hex: bool,
}

pub(crate) fn execute(config: Config) -> Result<()> {
    let input = read_input(config.file.as_deref())?;
    let keys = decode_keys(config.from, input, config.start)?;
    let form = KeyForm::from_private(config.private);

    let mut stdout = io::stdout().lock();
    for key in &keys {
        match config.to {
            KeyFormat::Der => {
                let der = pkcs1::to_der(key, form)?;
                if config.hex {
                    write!(stdout, "{}", format_hex_dump(&der))?;
                } else {
                    stdout.write_all(&der)?;
                }
            }
            KeyFormat::Pem => writeln!(stdout, "{}", encode_pem(key, form, &config)?)?,
            KeyFormat::Json => writeln!(stdout, "{}", json::to_json(key, form)?)?,
            KeyFormat::Xml => writeln!(
                stdout,
                "{}",
                xml::to_xml(key, form, config.xml_flavor.into())?
            )?,
        }
    }
    stdout.flush()?;

    Ok(())
}

fn encode_pem(key: &RsaKey, form: KeyForm, config: &Config) -> Result<String> {
    match config.label.as_deref() {
        Some(label) => Ok(pkcs1::to_pem_with_label(
            key,
            form,
            Label::from_str(label)?,
        )?),
        None => Ok(pkcs1::to_pem(key, form)?),
    }
}
