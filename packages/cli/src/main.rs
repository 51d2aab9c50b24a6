//! `sigtail` — prove you control a profile URL with an Ed25519 signature.
//!
//! Subcommands:
//!
//! - **`status`** — show the store directory, key and location state.
//! - **`keygen`** — create the keypair (refuses to overwrite without `--yes`).
//! - **`pubkey`** — print the public JWK to publish.
//! - **`location`** — show or save where the JWK is published.
//! - **`sign`** — print a `sigtail:` token for a profile URL.
//! - **`verify`** — check a token offline against a saved JWK document.
//! - **`scan`** — list tokens found in a text file or stdin (`-`).

mod config;

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process;

use clap::{ArgGroup, Parser, Subcommand};
use sigtail::{verifier, Assertion, Error, KeyStore};

/// sigtail — signed proof of profile ownership
///
/// Generate an Ed25519 keypair, publish its public JWK, and sign the
/// profile URLs you want to claim.
#[derive(Parser)]
#[command(name = "sigtail", version, about, long_about = None)]
struct Cli {
    /// Store directory holding the keypair and saved location.
    #[arg(long, global = true, env = "SIGTAIL_HOME", value_name = "DIR")]
    home: Option<PathBuf>,

    /// Increase log output (-v info, -vv debug). RUST_LOG overrides this.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show the store directory, whether keys exist, and the saved location.
    Status,

    /// Generate a new Ed25519 keypair and print its public JWK.
    ///
    /// If a keypair already exists it is replaced permanently; tokens signed
    /// with the old key stop verifying once the new JWK is published. This
    /// requires --yes.
    Keygen {
        /// Overwrite an existing keypair.
        #[arg(long)]
        yes: bool,
    },

    /// Print the public JWK. Upload this as raw text to your paste location.
    Pubkey,

    /// Show or set where the public JWK is published.
    ///
    /// Accepts a bare paste id (`abc123`) or the full raw URL
    /// (`https://pastebin.com/raw/abc123`).
    Location {
        /// New location; omit to show the current one.
        raw: Option<String>,
    },

    /// Sign a profile URL and print the token to paste into your bio.
    ///
    /// Examples:
    ///   sigtail sign https://x.com/YourHandle
    ///   sigtail sign --location abc123 https://example.com/me
    Sign {
        /// The exact profile URL (or any text) to sign.
        message: String,

        /// Use this location instead of the saved one.
        #[arg(long, env = "SIGTAIL_LOCATION", value_name = "ID_OR_URL")]
        location: Option<String>,
    },

    /// Verify a token offline against a JWK document.
    ///
    /// Exits 0 if the signature is valid, 1 if it is not.
    #[command(group(ArgGroup::new("msg").required(true).args(["message", "page_url"])))]
    Verify {
        /// The `sigtail:<location>::<signature>` token.
        token: String,

        /// Path to the published JWK JSON, or `-` for stdin.
        #[arg(long, value_name = "FILE")]
        jwk: PathBuf,

        /// The exact message that was signed.
        #[arg(long, value_name = "TEXT")]
        message: Option<String>,

        /// Derive the message from the page the token was found on.
        #[arg(long, value_name = "URL")]
        page_url: Option<String>,
    },

    /// List every token found in a text file.
    ///
    /// Pass `-` as FILE to read from stdin. Exits 1 if none are found.
    Scan {
        /// Path to a text file, or `-` for stdin.
        file: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    config::init_logging(cli.verbose);

    let store = KeyStore::open(config::store_dir(cli.home));
    tracing::debug!(store = %store.root().display(), "using store");

    match cli.command {
        Command::Status => {
            println!("store:    {}", store.root().display());
            if store.has_keys() {
                let jwk = store.load_public_jwk().unwrap_or_else(|e| fatal(&e.to_string()));
                println!("keys:     present (x = {})", jwk.x);
            } else {
                println!("keys:     none (run `sigtail keygen`)");
            }
            let location = store.load_location().unwrap_or_else(|e| fatal(&e.to_string()));
            if location.is_unset() {
                println!("location: not set (run `sigtail location <id>`)");
            } else {
                println!("location: {} ({})", location, location.raw_url());
            }
        }

        Command::Keygen { yes } => {
            let staged = store.stage_new_keypair();
            if staged.overwrites_existing() && !yes {
                fatal(&format!(
                    "a keypair already exists in {}; pass --yes to replace it \
                     (the old private key is not kept)",
                    store.root().display()
                ));
            }
            let jwk = store
                .commit_and_overwrite(staged)
                .unwrap_or_else(|e| fatal(&e.to_string()));
            eprintln!(
                "keypair saved to {}; upload the JWK below as raw text",
                store.root().display()
            );
            println!("{}", jwk.to_json_pretty());
        }

        Command::Pubkey => {
            let jwk = store.load_public_jwk().unwrap_or_else(|e| fatal(&describe(&e)));
            println!("{}", jwk.to_json_pretty());
        }

        Command::Location { raw: None } => {
            let location = store.load_location().unwrap_or_else(|e| fatal(&e.to_string()));
            if location.is_unset() {
                fatal("no location saved; run `sigtail location <id>`");
            }
            println!("{location}");
            eprintln!("published at {}", location.raw_url());
        }

        Command::Location { raw: Some(raw) } => {
            let location = store
                .save_location(&raw)
                .unwrap_or_else(|e| fatal(&describe(&e)));
            println!("{location}");
        }

        Command::Sign { message, location } => {
            let message = message.trim();
            if message.is_empty() {
                fatal("enter the profile URL you want to sign");
            }
            let location = match location {
                Some(raw) => sigtail::normalize(&raw),
                None => store.load_location().unwrap_or_else(|e| fatal(&e.to_string())),
            };
            let key = store.load_keypair().unwrap_or_else(|e| fatal(&describe(&e)));
            let assertion = Assertion::issue(&key, &location, message)
                .unwrap_or_else(|e| fatal(&describe(&e)));
            println!("{assertion}");
        }

        Command::Verify {
            token,
            jwk,
            message,
            page_url,
        } => {
            let assertion: Assertion = token.parse().unwrap_or_else(|e: Error| fatal(&e.to_string()));
            // clap guarantees one of the two is present.
            let message = match message {
                Some(m) => m,
                None => verifier::page_message(page_url.as_deref().unwrap_or_default())
                    .unwrap_or_else(|e| fatal(&e.to_string())),
            };
            let jwk_json = read_input(&jwk);
            let valid = verifier::verify_with_jwk(&jwk_json, &assertion, &message)
                .unwrap_or_else(|e| fatal(&e.to_string()));
            if valid {
                println!("valid");
            } else {
                println!("invalid");
                process::exit(1);
            }
        }

        Command::Scan { file } => {
            let text = read_input(&file);
            let found = sigtail::find_assertions(&text);
            if found.is_empty() {
                eprintln!("no tokens found");
                process::exit(1);
            }
            for f in &found {
                println!(
                    "{}..{}\t{}\t{}",
                    f.range.start,
                    f.range.end,
                    f.assertion.location(),
                    f.assertion.location().raw_url()
                );
            }
        }
    }
}

/// Turn store errors into instructions where the fix is obvious.
fn describe(e: &Error) -> String {
    match e {
        Error::KeyNotFound(_) => format!("{e}; run `sigtail keygen` first"),
        Error::LocationUnset => format!("{e}; run `sigtail location <id>` or pass --location"),
        _ => e.to_string(),
    }
}

/// Read the full contents of a file, or stdin when the path is `"-"`.
fn read_input(path: &Path) -> String {
    if path.to_str() == Some("-") {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .unwrap_or_else(|e| fatal(&format!("failed to read stdin: {}", e)));
        buf
    } else {
        fs::read_to_string(path).unwrap_or_else(|e| {
            fatal(&format!("failed to read {}: {}", path.display(), e))
        })
    }
}

/// Print an error message to stderr and exit with code 2.
fn fatal(msg: &str) -> ! {
    eprintln!("sigtail: {}", msg);
    process::exit(2);
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn verify_requires_a_message_source() {
        let result = Cli::try_parse_from(["sigtail", "verify", "sigtail:a::b", "--jwk", "k.json"]);
        assert!(result.is_err());
    }

    #[test]
    fn sign_accepts_location_override() {
        let cli = Cli::try_parse_from([
            "sigtail",
            "--home",
            "/tmp/x",
            "sign",
            "--location",
            "abc123",
            "https://example.com/me",
        ])
        .unwrap();
        match cli.command {
            Command::Sign { message, location } => {
                assert_eq!(message, "https://example.com/me");
                assert_eq!(location.as_deref(), Some("abc123"));
            }
            _ => panic!("expected sign"),
        }
        assert_eq!(cli.home, Some(PathBuf::from("/tmp/x")));
    }

    #[test]
    fn describe_adds_hint_for_missing_key() {
        let msg = describe(&Error::KeyNotFound(PathBuf::from("/k.pem")));
        assert!(msg.contains("sigtail keygen"), "got: {msg}");
    }
}
