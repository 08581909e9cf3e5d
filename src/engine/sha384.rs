//! Built-in software compression engine for SHA-384
//!
//! FIPS PUB 180-4 SHA-512 core running with the SHA-384 initial value.
//! Chaining state lives inside the instance's arena slot as eight
//! little-endian 64-bit words followed by a 128-bit processed-byte
//! counter; the slot's remaining bytes are scratch headroom.

use byteorder::{BigEndian, ByteOrder, LittleEndian};
use zeroize::Zeroize;

use crate::error::{validate, Result};
use crate::params::{
    COUNTER_OFFSET, COUNTER_SIZE, SHA384_OUTPUT_SIZE, SHA512_BLOCK_SIZE, SLOT_SIZE, STATE_OFFSET,
    STATE_SIZE,
};

use super::CompressionEngine;

// SHA-512 round constants
const K512: [u64; 80] = [
    0x428a2f98d728ae22, 0x7137449123ef65cd, 0xb5c0fbcfec4d3b2f, 0xe9b5dba58189dbbc,
    0x3956c25bf348b538, 0x59f111f1b605d019, 0x923f82a4af194f9b, 0xab1c5ed5da6d8118,
    0xd807aa98a3030242, 0x12835b0145706fbe, 0x243185be4ee4b28c, 0x550c7dc3d5ffb4e2,
    0x72be5d74f27b896f, 0x80deb1fe3b1696b1, 0x9bdc06a725c71235, 0xc19bf174cf692694,
    0xe49b69c19ef14ad2, 0xefbe4786384f25e3, 0x0fc19dc68b8cd5b5, 0x240ca1cc77ac9c65,
    0x2de92c6f592b0275, 0x4a7484aa6ea6e483, 0x5cb0a9dcbd41fbd4, 0x76f988da831153b5,
    0x983e5152ee66dfab, 0xa831c66d2db43210, 0xb00327c898fb213f, 0xbf597fc7beef0ee4,
    0xc6e00bf33da88fc2, 0xd5a79147930aa725, 0x06ca6351e003826f, 0x142929670a0e6e70,
    0x27b70a8546d22ffc, 0x2e1b21385c26c926, 0x4d2c6dfc5ac42aed, 0x53380d139d95b3df,
    0x650a73548baf63de, 0x766a0abb3c77b2a8, 0x81c2c92e47edaee6, 0x92722c851482353b,
    0xa2bfe8a14cf10364, 0xa81a664bbc423001, 0xc24b8b70d0f89791, 0xc76c51a30654be30,
    0xd192e819d6ef5218, 0xd69906245565a910, 0xf40e35855771202a, 0x106aa07032bbd1b8,
    0x19a4c116b8d2d0c8, 0x1e376c085141ab53, 0x2748774cdf8eeb99, 0x34b0bcb5e19b48a8,
    0x391c0cb3c5c95a63, 0x4ed8aa4ae3418acb, 0x5b9cca4f7763e373, 0x682e6ff3d6b2b8a3,
    0x748f82ee5defb2fc, 0x78a5636f43172f60, 0x84c87814a1f0ab72, 0x8cc702081a6439ec,
    0x90befffa23631e28, 0xa4506cebde82bde9, 0xbef9a3f7b2c67915, 0xc67178f2e372532b,
    0xca273eceea26619c, 0xd186b8c721c0c207, 0xeada7dd6cde0eb1e, 0xf57d4f7fee6ed178,
    0x06f067aa72176fba, 0x0a637dc5a2c898a6, 0x113f9804bef90dae, 0x1b710b35131c471b,
    0x28db77f523047d84, 0x32caab7b40c72493, 0x3c9ebe0a15c9bebc, 0x431d67c49c100d4c,
    0x4cc5d4becb3e42b6, 0x597f299cfc657e2a, 0x5fcb6fab3ad6faec, 0x6c44198c4a475817,
];

// SHA-384 initial hash value
const H384: [u64; 8] = [
    0xcbbb9d5dc1059ed8,
    0x629a292a367cd507,
    0x9159015a3070dd17,
    0x152fecd8f70e5939,
    0x67332667ffc00b31,
    0x8eb44a8768581511,
    0xdb0c2e0d64f98fa7,
    0x47b5481dbefa4fa4,
];

/// Software implementation of the block-compression contract.
#[derive(Debug, Default, Clone, Copy)]
pub struct Sha384Engine;

impl CompressionEngine for Sha384Engine {
    fn init(&self, bytes: &mut [u8], slot: usize) {
        bytes[slot..slot + SLOT_SIZE].fill(0);
        write_state(bytes, slot, &H384);
    }

    fn process(
        &self,
        bytes: &mut [u8],
        slot: usize,
        start: usize,
        end: usize,
        finalize: bool,
    ) -> Result<usize> {
        validate::min_length("engine range", end, start)?;
        validate::max_length("engine range", end, bytes.len())?;
        validate::max_length("engine slot", slot + SLOT_SIZE, bytes.len())?;

        let mut state = read_state(bytes, slot);
        let total = read_counter(bytes, slot);

        if !finalize {
            let len = end - start;
            let trailing = len % SHA512_BLOCK_SIZE;

            let mut offset = start;
            while offset + SHA512_BLOCK_SIZE <= end {
                compress(&mut state, &bytes[offset..offset + SHA512_BLOCK_SIZE]);
                offset += SHA512_BLOCK_SIZE;
            }

            write_state(bytes, slot, &state);
            write_counter(bytes, slot, total.wrapping_add((len - trailing) as u128));
            state.zeroize();
            return Ok(trailing);
        }

        // finalize: [start, end) is the final tail, shorter than one block
        let tail_len = end - start;
        validate::max_length("finalize tail", tail_len, SHA512_BLOCK_SIZE - 1)?;

        let bit_len = total.wrapping_add(tail_len as u128).wrapping_mul(8);

        let mut padded = [0u8; 2 * SHA512_BLOCK_SIZE];
        padded[..tail_len].copy_from_slice(&bytes[start..end]);
        padded[tail_len] = 0x80;

        // the marker plus the 128-bit bit-length field must fit the last block
        let padded_len = if tail_len + 1 + COUNTER_SIZE <= SHA512_BLOCK_SIZE {
            SHA512_BLOCK_SIZE
        } else {
            2 * SHA512_BLOCK_SIZE
        };
        BigEndian::write_u128(&mut padded[padded_len - COUNTER_SIZE..padded_len], bit_len);

        for block in padded[..padded_len].chunks_exact(SHA512_BLOCK_SIZE) {
            compress(&mut state, block);
        }

        // digest words stay native-order in the slot; the streaming layer
        // applies the per-word reversal when reading them out
        for (i, word) in state.iter().take(SHA384_OUTPUT_SIZE / 8).enumerate() {
            let at = slot + STATE_OFFSET + i * 8;
            LittleEndian::write_u64(&mut bytes[at..at + 8], *word);
        }

        padded.zeroize();
        state.zeroize();
        Ok(0)
    }
}

fn read_state(bytes: &[u8], slot: usize) -> [u64; 8] {
    let mut state = [0u64; 8];
    LittleEndian::read_u64_into(
        &bytes[slot + STATE_OFFSET..slot + STATE_OFFSET + STATE_SIZE],
        &mut state,
    );
    state
}

fn write_state(bytes: &mut [u8], slot: usize, state: &[u64; 8]) {
    LittleEndian::write_u64_into(
        state,
        &mut bytes[slot + STATE_OFFSET..slot + STATE_OFFSET + STATE_SIZE],
    );
}

fn read_counter(bytes: &[u8], slot: usize) -> u128 {
    LittleEndian::read_u128(&bytes[slot + COUNTER_OFFSET..slot + COUNTER_OFFSET + COUNTER_SIZE])
}

fn write_counter(bytes: &mut [u8], slot: usize, total: u128) {
    LittleEndian::write_u128(
        &mut bytes[slot + COUNTER_OFFSET..slot + COUNTER_OFFSET + COUNTER_SIZE],
        total,
    );
}

fn compress(state: &mut [u64; 8], block: &[u8]) {
    debug_assert_eq!(block.len(), SHA512_BLOCK_SIZE);

    let mut w = [0u64; 80];
    for i in 0..16 {
        w[i] = BigEndian::read_u64(&block[i * 8..]);
    }
    for i in 16..80 {
        let s0 = w[i - 15].rotate_right(1) ^ w[i - 15].rotate_right(8) ^ (w[i - 15] >> 7);
        let s1 = w[i - 2].rotate_right(19) ^ w[i - 2].rotate_right(61) ^ (w[i - 2] >> 6);
        w[i] = w[i - 16]
            .wrapping_add(s0)
            .wrapping_add(w[i - 7])
            .wrapping_add(s1);
    }

    let mut a = state[0];
    let mut b = state[1];
    let mut c = state[2];
    let mut d = state[3];
    let mut e = state[4];
    let mut f = state[5];
    let mut g = state[6];
    let mut h = state[7];

    for i in 0..80 {
        let s1 = e.rotate_right(14) ^ e.rotate_right(18) ^ e.rotate_right(41);
        let ch = (e & f) ^ ((!e) & g);
        let temp1 = h
            .wrapping_add(s1)
            .wrapping_add(ch)
            .wrapping_add(K512[i])
            .wrapping_add(w[i]);
        let s0 = a.rotate_right(28) ^ a.rotate_right(34) ^ a.rotate_right(39);
        let maj = (a & b) ^ (a & c) ^ (b & c);
        let temp2 = s0.wrapping_add(maj);

        h = g;
        g = f;
        f = e;
        e = d.wrapping_add(temp1);
        d = c;
        c = b;
        b = a;
        a = temp1.wrapping_add(temp2);
    }

    state[0] = state[0].wrapping_add(a);
    state[1] = state[1].wrapping_add(b);
    state[2] = state[2].wrapping_add(c);
    state[3] = state[3].wrapping_add(d);
    state[4] = state[4].wrapping_add(e);
    state[5] = state[5].wrapping_add(f);
    state[6] = state[6].wrapping_add(g);
    state[7] = state[7].wrapping_add(h);

    w.zeroize();
}

/// NIST test vector: empty string
const EMPTY_DIGEST_HEX: &str =
    "38b060a751ac96384cd9327eb1b1e36a21fdb71114be07434c0cc7bf63f6e1da274edebfe76f65fbd51ad2f14898b95b";

/// Empty-input digest against the published constant; memoized by
/// [`super::ready`].
pub(super) fn self_test() -> core::result::Result<(), &'static str> {
    let engine = Sha384Engine;
    let mut bytes = vec![0u8; SLOT_SIZE];
    engine.init(&mut bytes, 0);

    if engine
        .process(&mut bytes, 0, SLOT_SIZE, SLOT_SIZE, true)
        .is_err()
    {
        return Err("self-test compression failed");
    }

    let mut digest = [0u8; SHA384_OUTPUT_SIZE];
    digest.copy_from_slice(&bytes[..SHA384_OUTPUT_SIZE]);
    super::swap_word_bytes(&mut digest);

    if hex::encode(digest) != EMPTY_DIGEST_HEX {
        return Err("empty-input digest mismatch");
    }
    Ok(())
}
