use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::error::ErrorKind;
use clap::{Parser, Subcommand};
use rand::rngs::OsRng;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mpdh_cli::commands::{self, GeneratePaths, RecoverPaths, SendPaths};
use mpdh_protocol::{CurveKind, DhCurve, NistP256, ProtocolConfig, Secp256k1};

#[derive(Parser, Debug)]
#[command(author, version, about = "Two-party split-key Diffie-Hellman")]
struct Cli {
    /// Curve to run over.
    #[arg(long, global = true, default_value = "p256", value_parser = parse_curve)]
    curve: CurveKind,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Split a fresh private key into two shares and write its public key.
    Generate {
        /// Output: PEM public key.
        pubkey_file: PathBuf,
        /// Output: Chuck's share (a2) as hex.
        chuck_share_file: PathBuf,
        /// Output: Alice's share (a1) as hex.
        alice_share_file: PathBuf,
    },

    /// Run an ephemeral exchange against a public key.
    ///
    /// Prints the sender's shared secret and writes the ephemeral public key.
    Send {
        /// Input: PEM public key of the recipient.
        pubkey_input_file: PathBuf,
        /// Output: PEM ephemeral public key.
        ephemeral_pubkey_output_file: PathBuf,
        /// Check the sender's secret against both shares before writing anything.
        #[arg(long, num_args = 2, value_names = ["CHUCK_SHARE_FILE", "ALICE_SHARE_FILE"])]
        verify_with: Option<Vec<PathBuf>>,
    },

    /// Recover the shared secret from an ephemeral public key and both shares.
    Recover {
        /// Input: PEM ephemeral public key.
        ephemeral_pubkey_input_file: PathBuf,
        /// Input: Chuck's share (a2).
        chuck_share_file: PathBuf,
        /// Input: Alice's share (a1).
        alice_share_file: PathBuf,
        /// Output: recovered secret as hex.
        output_secret_file: PathBuf,
    },
}

fn parse_curve(s: &str) -> Result<CurveKind, String> {
    s.parse::<CurveKind>().map_err(|e| e.to_string())
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mp_dh=info,mpdh_cli=info,mpdh_protocol=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return ExitCode::from(usage_exit_status(&e));
        }
    };
    let config = ProtocolConfig::new(cli.curve);
    let result = match cli.curve {
        CurveKind::P256 => run::<NistP256>(config, cli.cmd),
        CurveKind::Secp256k1 => run::<Secp256k1>(config, cli.cmd),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(1)
        }
    }
}

/// Help and version requests succeed; every other parse failure exits with 1
/// like any other error.
fn usage_exit_status(err: &clap::Error) -> u8 {
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
        _ => 1,
    }
}

fn run<C: DhCurve>(config: ProtocolConfig, cmd: Cmd) -> Result<()> {
    match cmd {
        Cmd::Generate {
            pubkey_file,
            chuck_share_file,
            alice_share_file,
        } => {
            let paths = GeneratePaths {
                public_key: &pubkey_file,
                chuck_share: &chuck_share_file,
                alice_share: &alice_share_file,
            };
            commands::generate::<C, _>(config, paths, &mut OsRng)?;
            println!("Key generation complete.");
        }
        Cmd::Send {
            pubkey_input_file,
            ephemeral_pubkey_output_file,
            verify_with,
        } => {
            let verify_with = verify_with
                .as_deref()
                .and_then(|files| match files {
                    [chuck, alice] => Some((chuck.as_path(), alice.as_path())),
                    _ => None,
                });
            let paths = SendPaths {
                public_key: &pubkey_input_file,
                ephemeral_key: &ephemeral_pubkey_output_file,
                verify_with,
            };
            let secret_hex = commands::send::<C, _>(config, paths, &mut OsRng)?;
            if verify_with.is_some() {
                println!("Verification successful: Sender secret matches recovery from shares.");
            }
            println!("Sender Shared Secret (x-coord): {}", secret_hex);
        }
        Cmd::Recover {
            ephemeral_pubkey_input_file,
            chuck_share_file,
            alice_share_file,
            output_secret_file,
        } => {
            let paths = RecoverPaths {
                ephemeral_key: &ephemeral_pubkey_input_file,
                chuck_share: &chuck_share_file,
                alice_share: &alice_share_file,
                secret: &output_secret_file,
            };
            let secret_hex = commands::recover::<C>(config, paths)?;
            println!("Verification successful: Recovered secret matches direct computation.");
            println!("Recovered Shared Secret (x-coord): {}", secret_hex);
        }
    }
    Ok(())
}
