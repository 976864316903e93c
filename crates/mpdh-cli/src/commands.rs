//! The three `mp-dh` verbs.
//!
//! Each command reads all of its inputs, runs the protocol step, and only
//! then publishes its outputs, so a failing command leaves no files behind.

use std::path::Path;

use anyhow::{Context, Result};
use rand::{CryptoRng, RngCore};

use mpdh_protocol::artifacts::{
    decode_ephemeral_key, decode_public_key, decode_share, encode_point, encode_secret,
    encode_share,
};
use mpdh_protocol::{
    DhCurve, EphemeralExchanger, Holder, KeyShare, KeySplitter, ProtocolConfig, SecretRecoverer,
    SharePair,
};

use crate::files::{read_text, StagedOutputs};

/// Paths used by `generate`.
#[derive(Debug, Clone, Copy)]
pub struct GeneratePaths<'a> {
    pub public_key: &'a Path,
    pub chuck_share: &'a Path,
    pub alice_share: &'a Path,
}

/// Paths used by `send`.
#[derive(Debug, Clone, Copy)]
pub struct SendPaths<'a> {
    pub public_key: &'a Path,
    pub ephemeral_key: &'a Path,
    /// Chuck's and Alice's share files, to verify the sender's secret before
    /// anything is written.
    pub verify_with: Option<(&'a Path, &'a Path)>,
}

/// Paths used by `recover`.
#[derive(Debug, Clone, Copy)]
pub struct RecoverPaths<'a> {
    pub ephemeral_key: &'a Path,
    pub chuck_share: &'a Path,
    pub alice_share: &'a Path,
    pub secret: &'a Path,
}

/// Generate a split key and write the public key and both shares.
pub fn generate<C: DhCurve, R: RngCore + CryptoRng>(
    config: ProtocolConfig,
    paths: GeneratePaths<'_>,
    rng: &mut R,
) -> Result<()> {
    let key_set = KeySplitter::<C>::new(config)?
        .split(rng)
        .context("generating key shares")?;

    let mut outputs = StagedOutputs::new();
    outputs.stage(paths.public_key, encode_point(key_set.public_key())?.as_bytes())?;
    outputs.stage(paths.chuck_share, encode_share(key_set.chuck()).as_bytes())?;
    outputs.stage(paths.alice_share, encode_share(key_set.alice()).as_bytes())?;
    outputs.commit()?;

    tracing::info!(
        curve = C::NAME,
        public_key = %paths.public_key.display(),
        "wrote key set"
    );
    Ok(())
}

/// Run the sender side against a public key file and write the ephemeral key.
///
/// # Returns
/// The sender's shared secret as minimal-length hex.
pub fn send<C: DhCurve, R: RngCore + CryptoRng>(
    config: ProtocolConfig,
    paths: SendPaths<'_>,
    rng: &mut R,
) -> Result<String> {
    let public_key = decode_public_key::<C>(&read_text(paths.public_key)?)
        .with_context(|| format!("loading public key from {}", paths.public_key.display()))?;

    let exchanger = EphemeralExchanger::<C>::new(config)?;
    let exchange = match paths.verify_with {
        Some((chuck_path, alice_path)) => {
            let shares = load_shares::<C>(chuck_path, alice_path)?;
            exchanger
                .send_verified(&public_key, &shares, rng)
                .context("verifying sender shared secret")?
        }
        None => exchanger
            .send(&public_key, rng)
            .context("computing sender shared secret")?,
    };

    let mut outputs = StagedOutputs::new();
    outputs.stage(
        paths.ephemeral_key,
        encode_point(exchange.ephemeral_public())?.as_bytes(),
    )?;
    outputs.commit()?;

    Ok(encode_secret(exchange.shared_secret()))
}

/// Recover the shared secret from an ephemeral key and both shares.
///
/// # Returns
/// The recovered secret as minimal-length hex, which is also written to
/// the secret file. Nothing is written if verification fails.
pub fn recover<C: DhCurve>(config: ProtocolConfig, paths: RecoverPaths<'_>) -> Result<String> {
    let ephemeral = decode_ephemeral_key::<C>(&read_text(paths.ephemeral_key)?).with_context(
        || {
            format!(
                "loading ephemeral public key from {}",
                paths.ephemeral_key.display()
            )
        },
    )?;
    let shares = load_shares::<C>(paths.chuck_share, paths.alice_share)?;

    let secret = SecretRecoverer::<C>::new(config)?
        .recover_pair(&ephemeral, &shares)
        .context("recovering shared secret")?;
    let secret_hex = encode_secret(&secret);

    let mut outputs = StagedOutputs::new();
    outputs.stage(paths.secret, secret_hex.as_bytes())?;
    outputs.commit()?;

    Ok(secret_hex)
}

fn load_shares<C: DhCurve>(chuck_path: &Path, alice_path: &Path) -> Result<SharePair<C>> {
    let chuck = load_share::<C>(Holder::Chuck, chuck_path)?;
    let alice = load_share::<C>(Holder::Alice, alice_path)?;
    Ok(SharePair::new(alice, chuck)?)
}

fn load_share<C: DhCurve>(holder: Holder, path: &Path) -> Result<KeyShare<C>> {
    decode_share::<C>(holder, &read_text(path)?)
        .with_context(|| format!("loading {}'s share from {}", holder, path.display()))
}
