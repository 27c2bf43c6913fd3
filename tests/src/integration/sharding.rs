//! # Shard Assignment Across the Stack
//!
//! Every id maps to exactly three distinct authorities, independent of the
//! order the directory lists them in, and a payment's Query targets are the
//! union of its inputs' shards.

#[cfg(test)]
mod tests {
    use qc_01_directory::{Authority, Directory, DirectoryError, QUORUM_SIZE};
    use rand::{Rng, RngCore};
    use shared_types::{InputTx, OutputTx, Tx};
    use std::collections::HashSet;

    fn directory(n: usize, seed: u8) -> Directory {
        let authorities = (0..n)
            .map(|i| Authority::new([seed.wrapping_add(i as u8); 32], "10.0.0.1", 9000 + i as u16))
            .collect();
        Directory::new(authorities, [0xEE; 32]).unwrap()
    }

    #[test]
    fn test_three_distinct_authorities_per_id() {
        let dir = directory(10, 1);
        let mut rng = rand::thread_rng();
        for _ in 0..200 {
            let mut id = [0u8; 32];
            rng.fill_bytes(&mut id);
            let shard = dir.authorities_for(&id).unwrap();
            assert_eq!(shard.len(), QUORUM_SIZE);
            let distinct: HashSet<_> = shard.iter().map(|a| a.id).collect();
            assert_eq!(distinct.len(), QUORUM_SIZE);
        }
    }

    #[test]
    fn test_shard_independent_of_listing_order() {
        let forward = directory(7, 40);
        let mut reversed: Vec<Authority> = forward.authorities().to_vec();
        reversed.reverse();
        let reversed = Directory::new(reversed, [0xEE; 32]).unwrap();

        let mut rng = rand::thread_rng();
        for _ in 0..50 {
            let len = rng.gen_range(1..64);
            let id: Vec<u8> = (0..len).map(|_| rng.gen()).collect();
            assert_eq!(
                forward.authorities_for(&id).unwrap(),
                reversed.authorities_for(&id).unwrap()
            );
        }
    }

    #[test]
    fn test_small_directory_is_rejected() {
        let authorities = (0..2u8)
            .map(|i| Authority::new([i; 32], "10.0.0.1", 9000))
            .collect();
        assert!(matches!(
            Directory::new(authorities, [0; 32]),
            Err(DirectoryError::TooFewAuthorities { got: 2, .. })
        ));
    }

    #[test]
    fn test_query_targets_are_union_of_input_shards() {
        let dir = directory(12, 100);
        let tx = Tx::new(
            vec![InputTx::new([1; 32], 0), InputTx::new([2; 32], 5)],
            vec![OutputTx::new([3; 32], 10).unwrap()],
        )
        .unwrap();

        let targets = dir.authorities_for_all(tx.input_locators()).unwrap();
        let mut expected: HashSet<[u8; 32]> = HashSet::new();
        for locator in tx.input_locators() {
            expected.extend(dir.authorities_for(&locator).unwrap().iter().map(|a| a.id));
        }
        let got: HashSet<[u8; 32]> = targets.iter().map(|a| a.id).collect();
        assert_eq!(got, expected);
        assert_eq!(targets.len(), got.len());
    }
}
