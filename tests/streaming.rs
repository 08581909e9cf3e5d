//! End-to-end properties of the arena-backed streaming hasher.

use arenahash::{Error, Sha384};

use proptest::prelude::*;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;
use sha2::Digest as _;
use sha2::Sha384 as RefSha384;

// NIST test vector: empty string
const EMPTY: &str =
    "38b060a751ac96384cd9327eb1b1e36a21fdb71114be07434c0cc7bf63f6e1da274edebfe76f65fbd51ad2f14898b95b";

fn reference_hex(data: &[u8]) -> String {
    hex::encode(RefSha384::digest(data))
}

#[test]
fn known_answer_vectors() {
    // (input, expected digest) pairs from FIPS 180-4 / NIST CAVP
    let vectors: &[(&[u8], &str)] = &[
        (b"", EMPTY),
        (
            b"abc",
            "cb00753f45a35e8bb5a03d699ac65007272c32ab0eded1631a8b605a43ff5bed\
8086072ba1e7cc2358baeca134c825a7",
        ),
        (
            b"abcdbcdecdefdefgefghfghighijhijkijkljklmklmnlmnomnopnopq",
            "3391fdddfc8dc7393707a65b1b4709397cf8b1d162af05abfe8f450de5f36bc6\
b0455a8520bc4e6f5fe95b1fe3c8452b",
        ),
        (
            b"abcdefghbcdefghicdefghijdefghijkefghijklfghijklmghijklmnhijklmno\
ijklmnopjklmnopqklmnopqrlmnopqrsmnopqrstnopqrstu",
            "09330c33f71147e83d192fc782cd1b4753111b173b3b05d22fa08086e3b0f712\
fcc7c71a557e2db966c3e9fa91746039",
        ),
    ];

    for (input, expected) in vectors {
        let got = Sha384::hash(input).unwrap().to_hex();
        assert_eq!(&got, expected, "input {:?}", String::from_utf8_lossy(input));
    }
}

#[test]
fn million_a_vector() {
    // FIPS 180-4 long test: one million repetitions of "a"
    let mut hasher = Sha384::new().unwrap();
    let chunk = [b'a'; 10_000];
    for _ in 0..100 {
        hasher.update(&chunk).unwrap();
    }
    assert_eq!(
        hasher.digest_hex().unwrap(),
        "9d0e1809716474cb086e834e310a4a1ced149e9c00f248527972cec5704c2a5b\
07b8b3dc38ecc4ebae97ddd87f3d8985"
    );
}

#[test]
fn digest_length_is_fixed() {
    for len in [0usize, 1, 127, 128, 129, 4096] {
        let digest = Sha384::hash(&vec![7u8; len]).unwrap();
        assert_eq!(digest.len(), 48);
    }
}

#[test]
fn second_digest_fails() {
    let mut hasher = Sha384::new().unwrap();
    hasher.update(b"once").unwrap();
    hasher.digest().unwrap();
    assert!(matches!(
        hasher.digest().unwrap_err(),
        Error::AlreadyFinalized { .. }
    ));
}

#[test]
fn update_order_across_instances_is_invariant() {
    let mut rng = ChaCha20Rng::seed_from_u64(0x384);

    let mut a = Sha384::new().unwrap();
    let mut b = Sha384::new().unwrap();
    let mut reference = RefSha384::new();

    for _ in 0..200 {
        let len = (rng.next_u32() % 3000) as usize;
        let mut buf = vec![0u8; len];
        rng.fill_bytes(&mut buf);

        // the two instances see the same bytes in either visit order
        if rng.next_u32() % 2 == 0 {
            a.update(&buf).unwrap();
            b.update(&buf).unwrap();
        } else {
            b.update(&buf).unwrap();
            a.update(&buf).unwrap();
        }
        reference.update(&buf);
    }

    let expected = hex::encode(reference.finalize());
    assert_eq!(a.digest_hex().unwrap(), expected);
    assert_eq!(b.digest_hex().unwrap(), expected);
}

#[test]
fn differential_against_reference() {
    let mut rng = ChaCha20Rng::seed_from_u64(0xda7a);

    for round in 0..100 {
        let len = (rng.next_u32() as usize) % (1 << 18);
        let mut data = vec![0u8; len];
        rng.fill_bytes(&mut data);

        assert_eq!(
            Sha384::hash(&data).unwrap().to_hex(),
            reference_hex(&data),
            "round {} length {}",
            round,
            len
        );
    }
}

#[test]
fn differential_with_streaming_updates() {
    let mut rng = ChaCha20Rng::seed_from_u64(0x57);
    let mut hasher = Sha384::new().unwrap();
    let mut reference = RefSha384::new();

    for _ in 0..100 {
        let len = (rng.next_u32() as usize) % (1 << 16);
        let mut buf = vec![0u8; len];
        rng.fill_bytes(&mut buf);

        hasher.update(&buf).unwrap();
        reference.update(&buf);
    }

    assert_eq!(
        hasher.digest_hex().unwrap(),
        hex::encode(reference.finalize())
    );
}

#[test]
fn concurrent_instances_across_threads() {
    let handles: Vec<_> = (0..8u64)
        .map(|i| {
            std::thread::spawn(move || {
                let mut rng = ChaCha20Rng::seed_from_u64(i);
                let mut hasher = Sha384::new().unwrap();
                let mut reference = RefSha384::new();

                for _ in 0..50 {
                    let len = (rng.next_u32() % 5000) as usize;
                    let mut buf = vec![0u8; len];
                    rng.fill_bytes(&mut buf);
                    hasher.update(&buf).unwrap();
                    reference.update(&buf);
                }

                assert_eq!(
                    hasher.digest_hex().unwrap(),
                    hex::encode(reference.finalize())
                );
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn recycled_slots_show_no_residue() {
    // churn the pool, then prove a fresh instance starts from zeroed state
    for _ in 0..10 {
        let mut hasher = Sha384::new().unwrap();
        hasher.update(&[0xabu8; 1000]).unwrap();
        hasher.digest().unwrap();
    }

    let mut fresh = Sha384::new().unwrap();
    assert_eq!(fresh.digest_hex().unwrap(), EMPTY);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn chunking_invariance(
        data in proptest::collection::vec(any::<u8>(), 0..4096),
        splits in proptest::collection::vec(any::<usize>(), 0..8),
    ) {
        let whole = Sha384::hash(&data).unwrap().to_hex();

        let mut cuts: Vec<usize> = splits.iter().map(|s| s % (data.len() + 1)).collect();
        cuts.sort_unstable();

        let mut hasher = Sha384::new().unwrap();
        let mut prev = 0;
        for cut in cuts {
            hasher.update(&data[prev..cut]).unwrap();
            prev = cut;
        }
        hasher.update(&data[prev..]).unwrap();

        prop_assert_eq!(hasher.digest_hex().unwrap(), whole);
    }

    #[test]
    fn digest_matches_reference(data in proptest::collection::vec(any::<u8>(), 0..2048)) {
        prop_assert_eq!(Sha384::hash(&data).unwrap().to_hex(), reference_hex(&data));
    }
}
