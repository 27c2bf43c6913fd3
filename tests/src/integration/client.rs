//! # Command-Line Client End to End
//!
//! The `qc-client` commands against TCP mock mintettes, with every store
//! on disk in a temporary directory.

#[cfg(test)]
mod tests {
    use crate::harness::{Behaviour, Network};
    use client_runtime::{Client, ClientConfig, Command};
    use qc_02_broadcast::TcpTransport;
    use shared_types::b64encode;
    use std::time::Duration;
    use tempfile::TempDir;

    struct Session {
        _dir: TempDir,
        net: Network,
        client: Client<TcpTransport>,
    }

    async fn session(mintettes: usize) -> Session {
        let dir = TempDir::new().unwrap();
        let net = Network::honest(mintettes).await;
        let mut config = ClientConfig::in_dir(dir.path());
        config.response_timeout = Some(Duration::from_secs(5));
        net.write_client_files(&config.directory_path, &config.secret_path);
        Session {
            _dir: dir,
            net,
            client: Client::tcp(config),
        }
    }

    async fn run(client: &Client<TcpTransport>, command: Command) -> anyhow::Result<String> {
        let mut out = Vec::new();
        client.run(&command, &mut out).await?;
        Ok(String::from_utf8(out).unwrap())
    }

    async fn setup_funded(s: &Session) {
        run(&s.client, Command::NewAddress { name: "me".into() }).await.unwrap();
        run(
            &s.client,
            Command::ImportAddress {
                name: "bob".into(),
                key_id: b64encode(&[0xB0; 32]),
            },
        )
        .await
        .unwrap();
        let out = run(
            &s.client,
            Command::Issue {
                value: 100,
                name: "me".into(),
                mock: false,
            },
        )
        .await
        .unwrap();
        assert!(out.starts_with("issued\t100\tme\t"));
    }

    #[tokio::test]
    async fn test_dir_lists_every_mintette() {
        let s = session(4).await;
        let out = run(&s.client, Command::Dir).await.unwrap();
        assert_eq!(out.lines().count(), 4);
        for mintette in &s.net.mintettes {
            let authority = mintette.authority();
            let line = format!(
                "{}\t{}\t{}",
                authority.host,
                authority.port,
                b64encode(&authority.id)
            );
            assert!(out.lines().any(|l| l == line));
        }
    }

    #[tokio::test]
    async fn test_issue_then_pay() {
        let s = session(6).await;
        setup_funded(&s).await;
        assert!(run(&s.client, Command::Balances)
            .await
            .unwrap()
            .contains("me\t100\n"));

        let out = run(
            &s.client,
            Command::Pay {
                value: 30,
                dest: "bob".into(),
                change: "me".into(),
            },
        )
        .await
        .unwrap();
        assert!(out.starts_with("paid\t30\tbob\t"));

        let balances = run(&s.client, Command::Balances).await.unwrap();
        assert!(balances.contains("me\t70\n"));
        assert!(run(&s.client, Command::Pending).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_failed_payment_restores_balance() {
        let s = session(5).await;
        setup_funded(&s).await;
        s.net.set_all(Behaviour::Reject);

        let result = run(
            &s.client,
            Command::Pay {
                value: 30,
                dest: "bob".into(),
                change: "me".into(),
            },
        )
        .await;
        assert!(result.is_err());

        assert!(run(&s.client, Command::Balances)
            .await
            .unwrap()
            .contains("me\t100\n"));
        assert!(run(&s.client, Command::Pending).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_failed_issuance_records_nothing() {
        let s = session(4).await;
        run(&s.client, Command::NewAddress { name: "me".into() }).await.unwrap();
        s.net.set_all(Behaviour::Hangup);

        let result = run(
            &s.client,
            Command::Issue {
                value: 10,
                name: "me".into(),
                mock: false,
            },
        )
        .await;
        assert!(result.is_err());
        assert!(run(&s.client, Command::Balances)
            .await
            .unwrap()
            .contains("me\t0\n"));
    }

    #[tokio::test]
    async fn test_mock_issue_contacts_nobody() {
        let s = session(4).await;
        run(&s.client, Command::NewAddress { name: "me".into() }).await.unwrap();
        let out = run(
            &s.client,
            Command::Issue {
                value: 10,
                name: "me".into(),
                mock: true,
            },
        )
        .await
        .unwrap();
        assert!(out.starts_with("Commit 3 "));
        assert_eq!(s.net.total_requests(), 0);
    }
}
