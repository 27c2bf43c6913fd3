//! # Mock Mintettes
//!
//! Real TCP servers speaking the line protocol, one tokio task per
//! connection. Behaviour can be switched while the server runs.

use parking_lot::Mutex;
use qc_01_directory::{Authority, Directory};
use shared_crypto::Key;
use shared_types::{b64encode, Tx, WireMessage};
use std::net::SocketAddr;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// How a mock mintette answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Behaviour {
    /// Release on Query, sign the tx id on Commit.
    Honest,
    /// Answer every request with an error token.
    Reject,
    /// Answer honestly after a delay.
    Delay(Duration),
    /// Close the connection without answering.
    Hangup,
    /// Read the request and never answer.
    Silent,
}

/// One mintette listening on an ephemeral localhost port.
pub struct MockMintette {
    key: Key,
    addr: SocketAddr,
    behaviour: Arc<Mutex<Behaviour>>,
    requests: Arc<AtomicUsize>,
    handle: JoinHandle<()>,
}

impl MockMintette {
    /// Bind and start serving.
    pub async fn spawn(behaviour: Behaviour) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind mock mintette");
        let addr = listener.local_addr().expect("local addr");
        let key = Key::generate();
        let behaviour = Arc::new(Mutex::new(behaviour));
        let requests = Arc::new(AtomicUsize::new(0));

        let handle = tokio::spawn(serve(
            listener,
            key.clone(),
            Arc::clone(&behaviour),
            Arc::clone(&requests),
        ));

        Self {
            key,
            addr,
            behaviour,
            requests,
            handle,
        }
    }

    /// Directory entry for this mintette.
    pub fn authority(&self) -> Authority {
        Authority::new(self.key.id(), self.addr.ip().to_string(), self.addr.port())
    }

    /// Switch behaviour for subsequent requests.
    pub fn set_behaviour(&self, behaviour: Behaviour) {
        *self.behaviour.lock() = behaviour;
    }

    /// Requests received so far.
    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

impl Drop for MockMintette {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn serve(
    listener: TcpListener,
    key: Key,
    behaviour: Arc<Mutex<Behaviour>>,
    requests: Arc<AtomicUsize>,
) {
    while let Ok((stream, _)) = listener.accept().await {
        let key = key.clone();
        let behaviour = Arc::clone(&behaviour);
        let requests = Arc::clone(&requests);
        tokio::spawn(async move {
            let (read, mut write) = stream.into_split();
            let mut reader = BufReader::new(read);
            let mut line = String::new();
            if reader.read_line(&mut line).await.unwrap_or(0) == 0 {
                return;
            }
            requests.fetch_add(1, Ordering::SeqCst);

            let current = *behaviour.lock();
            let reply = match current {
                Behaviour::Honest => honest_reply(&key, line.trim_end()),
                Behaviour::Reject => "Error rejected".to_string(),
                Behaviour::Delay(delay) => {
                    tokio::time::sleep(delay).await;
                    honest_reply(&key, line.trim_end())
                }
                Behaviour::Hangup => return,
                Behaviour::Silent => {
                    std::future::pending::<()>().await;
                    return;
                }
            };
            let _ = write.write_all(format!("{}\r\n", reply).as_bytes()).await;
            let _ = write.flush().await;
        });
    }
}

/// The answer an honest mintette holding `key` gives to `line`.
pub fn honest_reply(key: &Key, line: &str) -> String {
    let public = b64encode(&key.export_public());
    match WireMessage::parse(line) {
        Ok(WireMessage::Query(_)) => format!("OK {} {}", public, b64encode(b"release")),
        Ok(WireMessage::Commit { core, .. }) => {
            let tx = match core.tx_bytes().map(|b| Tx::parse(&b)) {
                Ok(Ok(tx)) => tx,
                _ => return "Error malformed".to_string(),
            };
            let tx_id = match tx.id() {
                Ok(tx_id) => tx_id,
                Err(_) => return "Error malformed".to_string(),
            };
            match key.sign(&tx_id) {
                Ok(sig) => format!("OK {} {}", public, b64encode(&sig)),
                Err(_) => "Error nokey".to_string(),
            }
        }
        Err(_) => "Error parse".to_string(),
    }
}

/// A set of mock mintettes plus an issuer key.
pub struct Network {
    /// Running mintettes, in spawn order.
    pub mintettes: Vec<MockMintette>,
    /// Key the directory names as issuer.
    pub issuer: Key,
}

impl Network {
    /// Spawn one mintette per behaviour.
    pub async fn start(behaviours: &[Behaviour]) -> Self {
        let mut mintettes = Vec::with_capacity(behaviours.len());
        for behaviour in behaviours {
            mintettes.push(MockMintette::spawn(*behaviour).await);
        }
        Self {
            mintettes,
            issuer: Key::generate(),
        }
    }

    /// Spawn `n` honest mintettes.
    pub async fn honest(n: usize) -> Self {
        Self::start(&vec![Behaviour::Honest; n]).await
    }

    /// Directory over every mintette.
    pub fn directory(&self) -> Directory {
        let authorities = self.mintettes.iter().map(MockMintette::authority).collect();
        Directory::new(authorities, self.issuer.id()).expect("valid directory")
    }

    /// The mintette serving `authority`.
    pub fn mintette(&self, authority: &Authority) -> &MockMintette {
        self.mintettes
            .iter()
            .find(|m| m.key.id() == authority.id)
            .expect("authority belongs to this network")
    }

    /// Switch every mintette to `behaviour`.
    pub fn set_all(&self, behaviour: Behaviour) {
        for mintette in &self.mintettes {
            mintette.set_behaviour(behaviour);
        }
    }

    /// Total requests across all mintettes.
    pub fn total_requests(&self) -> usize {
        self.mintettes.iter().map(MockMintette::requests).sum()
    }

    /// Write `directory.toml` and `secret.key` in the client's layout.
    pub fn write_client_files(&self, directory_path: &Path, secret_path: &Path) {
        let mut toml = format!("issuer = \"{}\"\n", b64encode(&self.issuer.id()));
        for authority in self.mintettes.iter().map(MockMintette::authority) {
            toml.push_str(&format!(
                "\n[[authority]]\nid = \"{}\"\nhost = \"{}\"\nport = {}\n",
                b64encode(&authority.id),
                authority.host,
                authority.port
            ));
        }
        std::fs::write(directory_path, toml).expect("write directory");
        let seed = self.issuer.export_secret().expect("issuer has a secret");
        std::fs::write(secret_path, b64encode(seed.as_slice())).expect("write secret");
    }
}
