//! # Quorum-Cash Subsystem Benchmarks
//!
//! | Subsystem | Operation | Target |
//! |-----------|-----------|--------|
//! | qc-01 Directory | shard lookup, 100 authorities | < 50µs |
//! | qc-03 Wallet | selection over 10k entries | < 5ms |
//! | shared-types | tx encode + id | < 10µs |
//! | shared-crypto | Ed25519 sign / verify | < 100µs |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use qc_01_directory::{Authority, Directory};
use qc_03_wallet::Wallet;
use rand::{Rng, RngCore};
use shared_crypto::Key;
use shared_types::{InputTx, OutputTx, Tx, TxCore, WireMessage};
use std::time::Duration;

// ============================================================================
// QC-01: Shard assignment
// ============================================================================

fn bench_shard_assignment(c: &mut Criterion) {
    let mut group = c.benchmark_group("qc-01-directory");
    group.measurement_time(Duration::from_secs(5));

    for size in [10usize, 100, 1000] {
        let authorities = (0..size)
            .map(|_| {
                let mut id = [0u8; 32];
                rand::thread_rng().fill_bytes(&mut id);
                Authority::new(id, "127.0.0.1", 9000)
            })
            .collect();
        let directory = Directory::new(authorities, [0xEE; 32]).unwrap();
        let id = [0x5A; 36];

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("authorities_for", size), &size, |b, _| {
            b.iter(|| black_box(directory.authorities_for(&id).unwrap()))
        });
    }

    group.finish();
}

// ============================================================================
// QC-03: Entry selection
// ============================================================================

fn bench_wallet_selection(c: &mut Criterion) {
    let mut group = c.benchmark_group("qc-03-wallet");
    let me = [1u8; 32];

    for size in [100usize, 1_000, 10_000] {
        let mut wallet = Wallet::in_memory([me]);
        let mut rng = rand::thread_rng();
        for _ in 0..size {
            let tx = Tx::new(
                vec![InputTx::new(rng.gen(), rng.gen())],
                vec![OutputTx::new(me, rng.gen_range(1..1_000)).unwrap()],
            )
            .unwrap();
            wallet.add_owned_outputs(&tx.serialize().unwrap()).unwrap();
        }
        let target = (size as u64) * 250;

        group.bench_with_input(BenchmarkId::new("select_for_value", size), &size, |b, _| {
            b.iter(|| black_box(wallet.select_for_value(target)))
        });
    }

    group.finish();
}

// ============================================================================
// Shared: encoding, hashing, signatures
// ============================================================================

fn bench_tx_encoding(c: &mut Criterion) {
    let mut group = c.benchmark_group("shared-types");
    let tx = Tx::new(
        (0..8).map(|i| InputTx::new([i as u8; 32], i)).collect(),
        (0..4).map(|i| OutputTx::new([i as u8; 32], 10 + i).unwrap()).collect(),
    )
    .unwrap();
    let bytes = tx.serialize().unwrap();

    group.bench_function("tx_id", |b| b.iter(|| black_box(tx.id().unwrap())));
    group.bench_function("tx_parse", |b| b.iter(|| black_box(Tx::parse(&bytes).unwrap())));

    let core = TxCore::from_raw(&[bytes.clone(), vec![0u8; 32], vec![0u8; 64]]);
    let line = WireMessage::Query(core).encode();
    group.bench_function("wire_parse", |b| {
        b.iter(|| black_box(WireMessage::parse(&line).unwrap()))
    });

    group.finish();
}

fn bench_signatures(c: &mut Criterion) {
    let mut group = c.benchmark_group("shared-crypto");
    let key = Key::generate();
    let message = [0x42u8; 32];
    let signature = key.sign(&message).unwrap();

    group.bench_function("ed25519_sign", |b| b.iter(|| black_box(key.sign(&message).unwrap())));
    group.bench_function("ed25519_verify", |b| {
        b.iter(|| black_box(key.verify(&message, &signature).is_ok()))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_shard_assignment,
    bench_wallet_selection,
    bench_tx_encoding,
    bench_signatures,
);

criterion_main!(benches);
