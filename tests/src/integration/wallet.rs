//! # Wallet and Transaction Flows
//!
//! Selection order, idempotent output tracking and persistence across a
//! staged spend, without any network.

#[cfg(test)]
mod tests {
    use qc_03_wallet::{Keychain, Wallet, WalletError, WalletLock};
    use qc_04_tx_builder::{BuilderError, TransactionBuilder};
    use shared_types::{InputTx, KeyId, OutputTx, Tx};
    use tempfile::TempDir;

    fn fund(wallet: &mut Wallet, owner: KeyId, values: &[u64]) {
        for &value in values {
            let funding = Tx::new(vec![], vec![OutputTx::new(owner, value).unwrap()]).unwrap();
            wallet.add_owned_outputs(&funding.serialize().unwrap()).unwrap();
        }
    }

    #[test]
    fn test_tx_roundtrip_keeps_id() {
        let tx = Tx::new(
            vec![InputTx::new([1; 32], 2)],
            vec![
                OutputTx::new([3; 32], 4).unwrap(),
                OutputTx::new([5; 32], 6).unwrap(),
            ],
        )
        .unwrap();
        let parsed = Tx::parse(&tx.serialize().unwrap()).unwrap();
        assert_eq!(parsed, tx);
        assert_eq!(parsed.id().unwrap(), tx.id().unwrap());
    }

    #[test]
    fn test_add_owned_outputs_is_idempotent() {
        let me = [1u8; 32];
        let mut wallet = Wallet::in_memory([me]);
        let tx = Tx::new(
            vec![],
            vec![
                OutputTx::new(me, 10).unwrap(),
                OutputTx::new([2; 32], 20).unwrap(),
                OutputTx::new(me, 30).unwrap(),
            ],
        )
        .unwrap();

        assert_eq!(wallet.add_owned_outputs(&tx.serialize().unwrap()).unwrap(), 2);
        assert_eq!(wallet.add_owned_outputs(&tx.serialize().unwrap()).unwrap(), 0);
        assert_eq!(wallet.len(), 2);
        assert_eq!(wallet.balances().get(&me), Some(&40));
    }

    #[test]
    fn test_selection_smallest_first() {
        let me = [1u8; 32];
        let mut wallet = Wallet::in_memory([me]);
        fund(&mut wallet, me, &[20, 5, 10]);

        let selection = wallet.select_for_value(12);
        let values: Vec<u64> = selection.entries.iter().map(|e| e.value).collect();
        assert_eq!(values, vec![5, 10]);
        assert_eq!(selection.accumulated, 15);
        assert_eq!(selection.change(12), Some(3));

        let short = wallet.select_for_value(50);
        assert!(!short.covers(50));
        assert_eq!(short.accumulated, 35);
    }

    #[test]
    fn test_insufficient_balance_stages_nothing() {
        let mut keychain = Keychain::in_memory();
        let me = keychain.create_address("me").unwrap().id();
        let mut wallet = Wallet::in_memory(keychain.owned_ids());
        fund(&mut wallet, me, &[5, 10, 20]);

        let err = TransactionBuilder::new([0xEE; 32])
            .build_payment(&mut wallet, &keychain, 50, [9; 32], me)
            .unwrap_err();
        assert!(matches!(
            err,
            BuilderError::InsufficientBalance {
                requested: 50,
                available: 35
            }
        ));
        assert_eq!(wallet.pending().count(), 0);
        assert_eq!(wallet.len(), 3);
    }

    #[test]
    fn test_staged_spend_survives_reload() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("activetx.wallet");
        let mut keychain = Keychain::in_memory();
        let me = keychain.create_address("me").unwrap().id();

        let tx_id = {
            let _lock = WalletLock::acquire(&path).unwrap();
            let mut wallet = Wallet::load(&path, keychain.owned_ids()).unwrap();
            fund(&mut wallet, me, &[5, 10, 20]);
            let prepared = TransactionBuilder::new([0xEE; 32])
                .build_payment(&mut wallet, &keychain, 12, [9; 32], me)
                .unwrap();
            wallet.save().unwrap();
            prepared.tx.id().unwrap()
        };

        let mut wallet = Wallet::load(&path, keychain.owned_ids()).unwrap();
        assert_eq!(wallet.pending().count(), 1);
        assert_eq!(wallet.balances().get(&me), Some(&20));
        assert_eq!(wallet.pending_balances().get(&me), Some(&3));

        wallet.rollback(&tx_id).unwrap();
        assert_eq!(wallet.balances().get(&me), Some(&35));
        assert!(matches!(
            wallet.promote(&tx_id),
            Err(WalletError::UnknownPendingTx(_))
        ));
    }

    #[test]
    fn test_second_lock_is_refused() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("activetx.wallet");
        let first = WalletLock::acquire(&path).unwrap();
        assert!(WalletLock::acquire(&path).is_err());
        drop(first);
        assert!(WalletLock::acquire(&path).is_ok());
    }
}
