//! ALFA Image Crypt - CLI
//!
//! Command-line interface for image encryption/decryption.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use alfa_image_crypt::{
    decrypt_with_options, encrypt_with_options, CipherMode, CryptConfig, CryptError,
    DecryptOptions, EncryptOptions, KeyDisposition, KeyMaterial,
};

#[derive(Parser)]
#[command(name = "alfa-crypt")]
#[command(author = "Karen Tonoyan")]
#[command(version = alfa_image_crypt::VERSION)]
#[command(about = "Encrypt or decrypt images with multiple cipher modes")]
struct Cli {
    /// JSON config file with defaults (e.g. {"default_mode": "CTR"})
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbose logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encrypt an image
    Encrypt {
        /// Input image path
        input: PathBuf,

        /// Output encrypted image path
        output: PathBuf,

        /// Cipher mode: CBC, CFB, OFB or CTR (default: CBC)
        #[arg(short, long)]
        mode: Option<CipherMode>,

        /// Encryption key file (a new key is generated if omitted)
        #[arg(short, long)]
        key: Option<PathBuf>,

        /// Path to save the encryption key
        #[arg(short, long)]
        save_key: Option<PathBuf>,
    },

    /// Decrypt an image
    Decrypt {
        /// Input encrypted image path
        input: PathBuf,

        /// Output decrypted image path
        output: PathBuf,

        /// Cipher mode (must match encryption mode)
        #[arg(short, long)]
        mode: Option<CipherMode>,

        /// Encryption key file
        #[arg(short, long)]
        key: PathBuf,
    },

    /// Generate a new 256-bit key file
    Keygen {
        /// Output key path
        output: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    if let Err(e) = run(cli) {
        match e.downcast_ref::<CryptError>() {
            Some(err) if err.is_not_found() => eprintln!("[ERROR] File not found - {}", err),
            _ => eprintln!("[ERROR] {:#}", e),
        }
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => CryptConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => CryptConfig::default(),
    };

    match cli.command {
        Commands::Encrypt { input, output, mode, key, save_key } => {
            let opts = EncryptOptions {
                mode: config.resolve_mode(mode),
                key,
                save_key,
            };

            let report = encrypt_with_options(&input, &output, &opts)?;

            println!("[OK] Image encrypted successfully!");
            println!("  Input: {}", input.display());
            println!("  Output: {}", output.display());
            println!("  Mode: {}", report.mode);
            println!("  IV: {}", report.iv_hex());

            match report.key {
                KeyDisposition::Saved(path) => {
                    println!("  Key saved to: {}", path.display());
                }
                KeyDisposition::Unsaved(hex) => {
                    println!("  Key (hex): {}", hex);
                    println!("  [WARNING] Save this key securely! You'll need it for decryption.");
                }
            }
        }

        Commands::Decrypt { input, output, mode, key } => {
            let opts = DecryptOptions {
                mode: config.resolve_mode(mode),
                key,
            };

            decrypt_with_options(&input, &output, &opts)?;

            println!("[OK] Image decrypted successfully!");
            println!("  Input: {}", input.display());
            println!("  Output: {}", output.display());
            println!("  Mode: {}", opts.mode);
        }

        Commands::Keygen { output } => {
            let key = KeyMaterial::generate();
            key.save(&output)?;
            println!("[OK] {}-bit key written to: {}", key.size().bits(), output.display());
        }
    }

    Ok(())
}
