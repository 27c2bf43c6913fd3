//! # Bulk Replay over TCP
//!
//! The replay pool never has more than K plays in flight and drives every
//! core to a terminal state, whatever the outcome.

#[cfg(test)]
mod tests {
    use crate::harness::{Behaviour, Network};
    use qc_02_broadcast::{TcpTransport, TransportConfig};
    use qc_04_tx_builder::TransactionBuilder;
    use qc_05_protocol::{parse_cores, ProtocolEngine, ReplayPool};
    use shared_types::TxCore;
    use std::sync::Arc;
    use std::time::Duration;

    fn issuance_cores(net: &Network, n: u64) -> Vec<TxCore> {
        let builder = TransactionBuilder::new(net.issuer.id());
        (1..=n)
            .map(|value| builder.build_issuance(value, [7; 32], &net.issuer).unwrap().core)
            .collect()
    }

    fn engine(net: &Network) -> Arc<ProtocolEngine<TcpTransport>> {
        Arc::new(ProtocolEngine::new(
            Arc::new(net.directory()),
            TcpTransport::new(TransportConfig::with_timeout(Duration::from_secs(5))),
        ))
    }

    #[tokio::test]
    async fn test_two_workers_over_five_cores() {
        let net = Network::start(&[Behaviour::Delay(Duration::from_millis(100)); 5]).await;
        let cores = issuance_cores(&net, 5);

        let report = ReplayPool::new(2).run(engine(&net), cores).await;
        assert_eq!(report.completed, 5);
        assert_eq!(report.succeeded, 5);
        assert_eq!(report.failed, 0);
        assert_eq!(report.peak_in_flight, 2);
        assert_eq!(net.total_requests(), 15);
    }

    #[tokio::test]
    async fn test_failures_still_complete() {
        let net = Network::honest(5).await;
        net.mintettes[0].set_behaviour(Behaviour::Reject);
        let cores = issuance_cores(&net, 8);

        let report = ReplayPool::new(3).run(engine(&net), cores).await;
        assert_eq!(report.completed, 8);
        assert_eq!(report.succeeded + report.failed, 8);
        assert!(report.peak_in_flight <= 3);
    }

    #[tokio::test]
    async fn test_replay_file_format() {
        let net = Network::honest(4).await;
        let text: String = issuance_cores(&net, 3)
            .iter()
            .map(|c| format!("{}\n", c.to_line()))
            .collect();

        let cores = parse_cores(&format!("\n{}\n", text)).unwrap();
        assert_eq!(cores.len(), 3);
        let report = ReplayPool::default().run(engine(&net), cores).await;
        assert_eq!(report.succeeded, 3);
    }
}
