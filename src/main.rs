//! sealkit demo - derive, seal and open one message

use anyhow::{bail, Context, Result};

use sealkit::telemetry::{self, LogFormat};
use sealkit::{CryptoConfig, CryptoFacade, SecretString};

const DEMO_PASSPHRASE: &str = "myMasterPassword";
const DEMO_PLAINTEXT: &str = "SuperSecret123!";

fn main() {
    telemetry::init_tracing(LogFormat::from_env(), "info");

    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let config = CryptoConfig::from_env().context("failed to load crypto config")?;
    let facade = CryptoFacade::with_config(config).context("crypto runtime unavailable")?;

    let passphrase = SecretString::from(DEMO_PASSPHRASE.to_owned());
    let (key, salt) = facade
        .derive_key(&passphrase)
        .context("key derivation failed")?;

    let bundle = facade.encrypt(&key, DEMO_PLAINTEXT.as_bytes())?;
    println!(
        "Encrypted \"{}\" -> {} bytes ciphertext, {} bytes tag",
        DEMO_PLAINTEXT,
        bundle.data.len(),
        bundle.tag.len()
    );
    println!("   salt: {}", salt.to_hex());
    println!("   iv:   {}", hex::encode(&bundle.iv));

    let recovered = facade.decrypt(&key, &bundle)?;
    let text = recovered
        .as_str()
        .context("decrypted payload is not UTF-8")?;
    println!("Decrypted back to: \"{}\"", text);

    if text != DEMO_PLAINTEXT {
        bail!("decryption output does not match original");
    }
    println!("Round-trip successful");
    Ok(())
}
