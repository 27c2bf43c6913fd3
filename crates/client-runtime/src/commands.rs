//! # Client Commands
//!
//! Each command loads the stores it needs, does its work and writes a short
//! human-readable report to `out`. Commands that change the wallet hold
//! [`WalletLock`] for their whole duration.
//!
//! ## Payment lifecycle
//!
//! ```text
//! lock → load → build (stages spend) → save → play ─┬─ Done   → promote → save
//!                                                   └─ Failed → rollback → save
//! ```
//!
//! A spend left staged by an interrupted `pay` is settled with `resolve`,
//! which replays it or applies an explicit promote or rollback.

use crate::cli::Command;
use crate::config::ClientConfig;
use anyhow::{anyhow, Context, Result};
use qc_01_directory::{Directory, DirectoryConfig};
use qc_02_broadcast::{TcpTransport, Transport};
use qc_03_wallet::{Keychain, Wallet, WalletLock};
use qc_04_tx_builder::TransactionBuilder;
use qc_05_protocol::{parse_cores, ProtocolEngine, ReplayPool, ReplayReport};
use shared_crypto::Key;
use shared_types::{b64decode, b64encode, decode_id, short_id, KeyId, WireMessage};
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use zeroize::Zeroizing;

/// How `resolve` settles a staged spend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Rebuild the core and play it again; promote on Done.
    Replay,
    /// Treat the spend as committed.
    Promote,
    /// Return the spent entries to the wallet.
    Rollback,
}

/// Command runner over a transport.
///
/// The transport is cloned into a fresh [`ProtocolEngine`] for every
/// networked command.
#[derive(Debug, Clone)]
pub struct Client<T> {
    config: ClientConfig,
    transport: T,
}

impl Client<TcpTransport> {
    /// Client talking TCP with the configured deadlines.
    pub fn tcp(config: ClientConfig) -> Self {
        let transport = TcpTransport::new(config.transport_config());
        Self { config, transport }
    }
}

impl<T: Transport + Clone + 'static> Client<T> {
    /// Client over an arbitrary transport.
    pub fn new(config: ClientConfig, transport: T) -> Self {
        Self { config, transport }
    }

    /// Resolved configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Run one subcommand.
    pub async fn run<W: Write>(&self, command: &Command, out: &mut W) -> Result<()> {
        match command {
            Command::Dir => self.dir(out),
            Command::Balances => self.balances(out),
            Command::Addresses => self.addresses(out),
            Command::NewAddress { name } => self.new_address(name, out),
            Command::ImportAddress { name, key_id } => self.import_address(name, key_id, out),
            Command::Issue { value, name, mock } => self.issue(*value, name, *mock, out).await,
            Command::Pay {
                value,
                dest,
                change,
            } => self.pay(*value, dest, change, out).await,
            Command::Pending => self.pending(out),
            Command::Resolve {
                tx_id,
                promote,
                rollback,
            } => {
                let resolution = match (*promote, *rollback) {
                    (true, _) => Resolution::Promote,
                    (_, true) => Resolution::Rollback,
                    _ => Resolution::Replay,
                };
                self.resolve(tx_id, resolution, out).await
            }
            Command::Play { file, workers } => self.play(file, *workers, out).await.map(|_| ()),
        }
    }

    /// Print `host<TAB>port<TAB>id` for every authority.
    pub fn dir<W: Write>(&self, out: &mut W) -> Result<()> {
        let directory = self.load_directory()?;
        for authority in directory.authorities() {
            writeln!(
                out,
                "{}\t{}\t{}",
                authority.host,
                authority.port,
                b64encode(&authority.id)
            )?;
        }
        Ok(())
    }

    /// Print confirmed balance per owned address, plus value awaiting
    /// promotion where there is any.
    pub fn balances<W: Write>(&self, out: &mut W) -> Result<()> {
        let keychain = self.load_keychain()?;
        let wallet = Wallet::load(&self.config.wallet_path, keychain.owned_ids())
            .context("Failed to load wallet")?;
        let confirmed = wallet.balances();
        let pending = wallet.pending_balances();

        let mut total = 0u64;
        for id in keychain.owned_ids() {
            let name = keychain.name_of(&id).unwrap_or("?");
            let balance = confirmed.get(&id).copied().unwrap_or(0);
            total = total.saturating_add(balance);
            match pending.get(&id) {
                Some(incoming) => writeln!(out, "{}\t{}\t(+{} pending)", name, balance, incoming)?,
                None => writeln!(out, "{}\t{}", name, balance)?,
            }
        }
        writeln!(out, "total\t{}", total)?;
        Ok(())
    }

    /// Print `name<TAB>kind<TAB>id` for every keychain record.
    pub fn addresses<W: Write>(&self, out: &mut W) -> Result<()> {
        let keychain = self.load_keychain()?;
        for record in keychain.records() {
            writeln!(
                out,
                "{}\t{}\t{}",
                record.name(),
                record.kind(),
                b64encode(&record.id())
            )?;
        }
        Ok(())
    }

    /// Generate and store a signing address.
    pub fn new_address<W: Write>(&self, name: &str, out: &mut W) -> Result<()> {
        let mut keychain = self.load_keychain()?;
        let record = keychain
            .create_address(name)
            .with_context(|| format!("Failed to create address {}", name))?;
        writeln!(out, "{}\t{}", record.name(), b64encode(&record.id()))?;
        Ok(())
    }

    /// Store someone else's address under `name`.
    pub fn import_address<W: Write>(&self, name: &str, key_id: &str, out: &mut W) -> Result<()> {
        let id = decode_id(key_id).context("Key id must be 32 bytes of base64")?;
        let mut keychain = self.load_keychain()?;
        let record = keychain
            .import_address(name, id)
            .with_context(|| format!("Failed to import address {}", name))?;
        writeln!(out, "{}\t{}", record.name(), b64encode(&record.id()))?;
        Ok(())
    }

    /// Mint `value` to the address `name` with the issuer key.
    ///
    /// With `mock` set, prints the Commit line and contacts nobody.
    /// Otherwise takes the wallet lock, plays the issuance and records owned
    /// outputs on success.
    pub async fn issue<W: Write>(
        &self,
        value: u64,
        name: &str,
        mock: bool,
        out: &mut W,
    ) -> Result<()> {
        let keychain = self.load_keychain()?;
        let dest = resolve_address(&keychain, name)?;
        let directory = self.load_directory()?;
        let issuer_key = self.load_issuer_key()?;

        let prepared = TransactionBuilder::new(*directory.issuer())
            .build_issuance(value, dest, &issuer_key)
            .context("Failed to build issuance")?;

        if mock {
            let line = WireMessage::Commit {
                core: prepared.core,
                release: Vec::new(),
            }
            .encode();
            writeln!(out, "{}", line)?;
            return Ok(());
        }

        let _lock = WalletLock::acquire(&self.config.wallet_path)?;
        let mut wallet = Wallet::load(&self.config.wallet_path, keychain.owned_ids())
            .context("Failed to load wallet")?;

        let outcome = self
            .engine(directory)
            .play(&prepared.core)
            .await
            .context("Issuance failed")?;

        let added = wallet.add_owned_outputs(&prepared.tx.serialize()?)?;
        wallet.save().context("Failed to save wallet")?;

        tracing::info!(
            "[qc-client] Issued {} to {} ({} owned outputs recorded)",
            value,
            name,
            added
        );
        writeln!(out, "issued\t{}\t{}\t{}", value, name, b64encode(&outcome.tx_id))?;
        Ok(())
    }

    /// Pay `value` to `dest`, returning change to `change`.
    ///
    /// The spend is staged and saved before any network call, then promoted
    /// or rolled back once the play reaches a terminal state.
    pub async fn pay<W: Write>(
        &self,
        value: u64,
        dest: &str,
        change: &str,
        out: &mut W,
    ) -> Result<()> {
        let keychain = self.load_keychain()?;
        let dest_id = resolve_address(&keychain, dest)?;
        let change_id = resolve_address(&keychain, change)?;
        let directory = self.load_directory()?;

        let _lock = WalletLock::acquire(&self.config.wallet_path)?;
        let mut wallet = Wallet::load(&self.config.wallet_path, keychain.owned_ids())
            .context("Failed to load wallet")?;

        let prepared = TransactionBuilder::new(*directory.issuer())
            .build_payment(&mut wallet, &keychain, value, dest_id, change_id)
            .context("Failed to build payment")?;
        wallet.save().context("Failed to save staged spend")?;
        let tx_id = prepared.tx.id()?;

        match self.engine(directory).play(&prepared.core).await {
            Ok(outcome) => {
                wallet.promote(&outcome.tx_id)?;
                wallet.save().context("Failed to save wallet")?;
                writeln!(
                    out,
                    "paid\t{}\t{}\t{}\tchange {}",
                    value,
                    dest,
                    b64encode(&tx_id),
                    prepared.change
                )?;
                Ok(())
            }
            Err(e) => {
                let restored = wallet.rollback(&tx_id)?;
                wallet.save().context("Failed to save wallet after rollback")?;
                tracing::warn!(
                    "[qc-client] Payment failed, {} entries returned to wallet",
                    restored
                );
                Err(anyhow::Error::new(e).context("Payment failed"))
            }
        }
    }

    /// Print staged spends awaiting resolution.
    pub fn pending<W: Write>(&self, out: &mut W) -> Result<()> {
        let keychain = self.load_keychain()?;
        let wallet = Wallet::load(&self.config.wallet_path, keychain.owned_ids())
            .context("Failed to load wallet")?;
        for spend in wallet.pending() {
            writeln!(
                out,
                "{}\tspent {}\tincoming {}",
                b64encode(&spend.tx_id),
                spend.spent_value(),
                spend.incoming_value()
            )?;
        }
        Ok(())
    }

    /// Settle the staged spend `tx_id` (base64).
    ///
    /// [`Resolution::Replay`] rebuilds the spend proof from the wallet and
    /// keychain and plays it. A failed replay leaves the spend staged.
    pub async fn resolve<W: Write>(
        &self,
        tx_id: &str,
        resolution: Resolution,
        out: &mut W,
    ) -> Result<()> {
        let tx_id = decode_id(tx_id).context("Transaction id must be 32 bytes of base64")?;
        let keychain = self.load_keychain()?;

        let _lock = WalletLock::acquire(&self.config.wallet_path)?;
        let mut wallet = Wallet::load(&self.config.wallet_path, keychain.owned_ids())
            .context("Failed to load wallet")?;
        let pending = wallet
            .pending_spend(&tx_id)
            .cloned()
            .ok_or_else(|| anyhow!("No pending spend {}", short_id(&tx_id)))?;

        let promote = match resolution {
            Resolution::Promote => true,
            Resolution::Rollback => false,
            Resolution::Replay => {
                let directory = self.load_directory()?;
                let core = TransactionBuilder::new(*directory.issuer())
                    .rebuild_payment(&pending, &keychain)
                    .context("Failed to rebuild spend proof")?;
                self.engine(directory)
                    .play(&core)
                    .await
                    .context("Replay failed, spend left pending")?;
                true
            }
        };

        let (action, entries) = if promote {
            ("promoted", wallet.promote(&tx_id)?)
        } else {
            ("rolled back", wallet.rollback(&tx_id)?)
        };
        wallet.save().context("Failed to save wallet")?;

        tracing::info!(
            tx_id = %short_id(&tx_id),
            "[qc-client] Pending spend {} ({} entries)",
            action,
            entries
        );
        writeln!(out, "{}\t{}\t{} entries", action, b64encode(&tx_id), entries)?;
        Ok(())
    }

    /// Replay every core in `file` with at most `workers` in flight.
    pub async fn play<W: Write>(
        &self,
        file: &Path,
        workers: usize,
        out: &mut W,
    ) -> Result<ReplayReport> {
        let text = std::fs::read_to_string(file)
            .with_context(|| format!("Failed to read replay file {}", file.display()))?;
        let cores = parse_cores(&text)?;
        let directory = self.load_directory()?;

        let report = ReplayPool::new(workers)
            .run(Arc::new(self.engine(directory)), cores)
            .await;
        writeln!(
            out,
            "played {}\tdone {}\tfailed {}\tpeak {}\t{:.2?}",
            report.completed, report.succeeded, report.failed, report.peak_in_flight, report.elapsed
        )?;
        Ok(report)
    }

    fn engine(&self, directory: Directory) -> ProtocolEngine<T> {
        ProtocolEngine::new(Arc::new(directory), self.transport.clone())
    }

    fn load_directory(&self) -> Result<Directory> {
        DirectoryConfig::load(&self.config.directory_path).with_context(|| {
            format!(
                "Failed to load directory {}",
                self.config.directory_path.display()
            )
        })
    }

    fn load_keychain(&self) -> Result<Keychain> {
        Keychain::load(&self.config.keychain_path).with_context(|| {
            format!(
                "Failed to load keychain {}",
                self.config.keychain_path.display()
            )
        })
    }

    fn load_issuer_key(&self) -> Result<Key> {
        let path = &self.config.secret_path;
        let text = Zeroizing::new(
            std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read issuer key {}", path.display()))?,
        );
        let seed = Zeroizing::new(b64decode(text.trim()).context("Issuer key is not base64")?);
        Key::from_secret(&seed).context("Invalid issuer key")
    }
}

/// Resolve a keychain name, or failing that a base64 key id.
fn resolve_address(keychain: &Keychain, address: &str) -> Result<KeyId> {
    if let Some(record) = keychain.by_name(address) {
        return Ok(record.id());
    }
    decode_id(address).map_err(|_| anyhow!("Unknown address {}", address))
}
