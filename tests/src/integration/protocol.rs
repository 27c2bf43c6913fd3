//! # Protocol Engine over TCP
//!
//! Builder → engine → broadcast → mock mintettes, checking which
//! authorities are contacted in each phase and how failures surface.

#[cfg(test)]
mod tests {
    use crate::harness::{Behaviour, Network};
    use qc_02_broadcast::{TcpTransport, TransportConfig};
    use qc_03_wallet::{Keychain, Wallet};
    use qc_04_tx_builder::TransactionBuilder;
    use qc_05_protocol::{PlayState, ProtocolEngine, ProtocolError, QuorumFailure};
    use shared_types::{short_id, KeyId, OutputTx, Tx};
    use std::collections::HashSet;
    use std::sync::Arc;
    use std::time::Duration;

    fn engine(net: &Network) -> ProtocolEngine<TcpTransport> {
        ProtocolEngine::new(
            Arc::new(net.directory()),
            TcpTransport::new(TransportConfig::with_timeout(Duration::from_secs(5))),
        )
    }

    #[tokio::test]
    async fn test_issuance_commits_to_tx_shard_only() {
        let net = Network::honest(6).await;
        let builder = TransactionBuilder::new(net.issuer.id());
        let prepared = builder.build_issuance(100, [7; 32], &net.issuer).unwrap();

        let outcome = engine(&net).play(&prepared.core).await.unwrap();
        assert_eq!(outcome.tx_id, prepared.tx.id().unwrap());
        assert_eq!(outcome.queried, 0);
        assert_eq!(outcome.committed, 3);

        let shard = net.directory().authorities_for(&prepared.tx.id().unwrap()).unwrap();
        for authority in &shard {
            assert_eq!(net.mintette(authority).requests(), 1);
        }
        assert_eq!(net.total_requests(), 3);
    }

    #[tokio::test]
    async fn test_one_commit_rejection_fails_issuance() {
        let net = Network::honest(5).await;
        let builder = TransactionBuilder::new(net.issuer.id());
        let prepared = builder.build_issuance(42, [7; 32], &net.issuer).unwrap();

        let shard = net.directory().authorities_for(&prepared.tx.id().unwrap()).unwrap();
        net.mintette(&shard[1]).set_behaviour(Behaviour::Reject);

        let err = engine(&net).play(&prepared.core).await.unwrap_err();
        match err {
            ProtocolError::CommitFailed(QuorumFailure::Rejected { authority, status }) => {
                assert_eq!(authority, short_id(&shard[1].id));
                assert_eq!(status, "Error");
            }
            other => panic!("expected commit rejection, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_payment_queries_input_shards_then_commits() {
        let net = Network::honest(8).await;
        let builder = TransactionBuilder::new(net.issuer.id());

        let mut keychain = Keychain::in_memory();
        let me: KeyId = keychain.create_address("me").unwrap().id();
        let mut wallet = Wallet::in_memory(keychain.owned_ids());

        for value in [5u64, 10, 20] {
            let funding = Tx::new(vec![], vec![OutputTx::new(me, value).unwrap()]).unwrap();
            wallet.add_owned_outputs(&funding.serialize().unwrap()).unwrap();
        }

        let prepared = builder
            .build_payment(&mut wallet, &keychain, 12, [9; 32], me)
            .unwrap();
        assert_eq!(prepared.spent.len(), 2);
        assert_eq!(prepared.change, 3);

        let directory = net.directory();
        let query_targets: HashSet<KeyId> = directory
            .authorities_for_all(prepared.tx.input_locators())
            .unwrap()
            .iter()
            .map(|a| a.id)
            .collect();

        let outcome = engine(&net).play(&prepared.core).await.unwrap();
        assert_eq!(outcome.queried, query_targets.len());
        assert_eq!(outcome.committed, 3);

        wallet.promote(&outcome.tx_id).unwrap();
        assert_eq!(wallet.balances().get(&me), Some(&(20 + 3)));
    }

    #[tokio::test]
    async fn test_query_rejection_skips_commit() {
        let net = Network::honest(5).await;
        let builder = TransactionBuilder::new(net.issuer.id());
        let mut keychain = Keychain::in_memory();
        let me = keychain.create_address("me").unwrap().id();
        let mut wallet = Wallet::in_memory(keychain.owned_ids());
        let funding = Tx::new(vec![], vec![OutputTx::new(me, 50).unwrap()]).unwrap();
        wallet.add_owned_outputs(&funding.serialize().unwrap()).unwrap();

        let prepared = builder
            .build_payment(&mut wallet, &keychain, 10, [9; 32], me)
            .unwrap();
        net.set_all(Behaviour::Reject);

        let err = engine(&net).play(&prepared.core).await.unwrap_err();
        assert!(matches!(err, ProtocolError::QueryFailed(_)));
        assert_eq!(err.label(), "query_failed");
        // Only the input shard saw a request.
        assert_eq!(net.total_requests(), 3);

        wallet.rollback(&prepared.tx.id().unwrap()).unwrap();
        assert_eq!(wallet.balances().get(&me), Some(&50));
    }

    #[tokio::test]
    async fn test_unreachable_commit_member_fails() {
        let net = Network::honest(4).await;
        let builder = TransactionBuilder::new(net.issuer.id());
        let prepared = builder.build_issuance(9, [7; 32], &net.issuer).unwrap();
        let shard = net.directory().authorities_for(&prepared.tx.id().unwrap()).unwrap();
        net.mintette(&shard[0]).set_behaviour(Behaviour::Hangup);

        let err = engine(&net).play(&prepared.core).await.unwrap_err();
        assert!(matches!(
            err,
            ProtocolError::CommitFailed(QuorumFailure::Absent { .. })
        ));
    }

    #[test]
    fn test_terminal_states() {
        assert!(PlayState::Done.is_terminal());
        assert!(PlayState::Failed.is_terminal());
        assert!(!PlayState::Query.is_terminal());
    }
}
