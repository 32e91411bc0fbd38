//! Midori-64: a 64-bit-block, 128-bit-key lightweight SPN cipher.
//!
//! State, S-box and both cell permutations are stored packed as 64-bit
//! constants whose 16 nibbles (MSB first) form the lookup table — a single
//! nibble read/write centralizes access to them (see [`crate::nibble`]).
//!
//! Structure: initial whitening, 15 rounds of SubCell -> ShuffleCell ->
//! MixColumn -> KeyAdd, then a final SubCell and whitening.

use crate::nibble::{nibble_get, nibble_set, Block, NIBBLES};

/// PRESENT-style S-box, packed as a 16-nibble lookup table.
pub const SBOX: Block = 0xCAD3_EBF7_8915_0246;

/// Forward cell permutation; nibble at output index `i` is the source index.
pub const SHUFFLE_P: Block = 0x0A5F_E4B1_93C6_7D28;

/// Inverse of [`SHUFFLE_P`].
pub const SHUFFLE_P_INV: Block = 0x07E9_52BC_F816_AD43;

/// Number of full SPN rounds (a final SubCell+whitening follows).
pub const ROUNDS: usize = 15;

/// 16 hard-coded round constants. Only indices `0..ROUNDS` feed the key
/// schedule (§3/§4.4 of the spec); the 16th is part of the fixed table but
/// unconsumed.
pub const ROUND_CONST: [u16; 16] = [
    0x15B3, 0x78C0, 0xA435, 0x6213, 0x104F, 0xD170, 0x0266, 0x0BCC, 0x9481, 0x40B8, 0x7197,
    0x228E, 0x5130, 0xF8CA, 0xDF90, 0x7C81,
];

/// Substitute every nibble through [`SBOX`].
fn subcell(s: Block) -> Block {
    let mut out: Block = 0;
    for p in 0..NIBBLES {
        let v = nibble_get(s, p);
        out = nibble_set(out, p, nibble_get(SBOX, v as usize));
    }
    out
}

/// Permute nibble positions through `shuffleP` (or its inverse).
fn shuffle_cell(s: Block, inverse: bool) -> Block {
    let table = if inverse { SHUFFLE_P_INV } else { SHUFFLE_P };
    let mut out: Block = 0;
    for p in 0..NIBBLES {
        let src = nibble_get(table, p) as usize;
        out = nibble_set(out, p, nibble_get(s, src));
    }
    out
}

/// Apply the (0,1,1,1) column mix to each of the four 4-nibble columns.
fn mix_column(s: Block) -> Block {
    let mut out: Block = 0;
    for col in 0..4 {
        let base = col * 4;
        let n: [u8; 4] = [
            nibble_get(s, base),
            nibble_get(s, base + 1),
            nibble_get(s, base + 2),
            nibble_get(s, base + 3),
        ];
        let parity = n[0] ^ n[1] ^ n[2] ^ n[3];
        for (k, &nk) in n.iter().enumerate() {
            out = nibble_set(out, base + k, parity ^ nk);
        }
    }
    out
}

/// XOR the state with a round or whitening key.
#[inline(always)]
fn key_add(s: Block, k: Block) -> Block {
    s ^ k
}

/// The whitening key and 15 round keys derived from one 128-bit master key.
#[derive(Debug, Clone, Copy)]
pub struct KeySchedule {
    pub white_key: Block,
    pub round_keys: [Block; ROUNDS],
}

/// Expand `(k0, k1)` into a [`KeySchedule`].
pub fn key_schedule(k0: Block, k1: Block) -> KeySchedule {
    let white_key = k0 ^ k1;
    let mut round_keys = [0 as Block; ROUNDS];
    for (i, rk) in round_keys.iter_mut().enumerate() {
        let src = if i % 2 == 0 { k0 } else { k1 };
        let beta = ROUND_CONST[i];
        let mut acc: Block = 0;
        for j in 0..NIBBLES {
            let bit = (beta >> (15 - j)) & 1;
            let v = nibble_get(src, j) ^ (bit as u8);
            acc = nibble_set(acc, j, v);
        }
        *rk = acc;
    }
    KeySchedule {
        white_key,
        round_keys,
    }
}

/// Encrypt one 64-bit block under an already-expanded key schedule.
///
/// Callers that invoke Midori-64 several times under the same key (as the
/// COFB driver does) should expand the schedule once and reuse it here
/// rather than calling [`midori`] per block.
pub fn midori_with_schedule(state: Block, ks: &KeySchedule) -> Block {
    let mut s = key_add(state, ks.white_key);
    for rk in &ks.round_keys {
        s = subcell(s);
        s = shuffle_cell(s, false);
        s = mix_column(s);
        s = key_add(s, *rk);
    }
    s = subcell(s);
    key_add(s, ks.white_key)
}

/// Encrypt one 64-bit block under master key `(k0, k1)`, expanding the
/// schedule internally. Convenience wrapper over [`midori_with_schedule`].
pub fn midori(state: Block, k0: Block, k1: Block) -> Block {
    midori_with_schedule(state, &key_schedule(k0, k1))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_permutation(table: Block) -> bool {
        let mut seen = [false; 16];
        for p in 0..NIBBLES {
            let v = nibble_get(table, p) as usize;
            if seen[v] {
                return false;
            }
            seen[v] = true;
        }
        seen.iter().all(|&s| s)
    }

    #[test]
    fn sbox_is_a_permutation() {
        assert!(is_permutation(SBOX));
    }

    #[test]
    fn shuffle_tables_are_permutations() {
        assert!(is_permutation(SHUFFLE_P));
        assert!(is_permutation(SHUFFLE_P_INV));
    }

    #[test]
    fn shuffle_cell_forward_then_inverse_is_identity() {
        let blocks: [Block; 4] = [0, u64::MAX, 0x0123_4567_89AB_CDEF, 0xDEAD_BEEF_CAFE_BABE];
        for &b in &blocks {
            let shuffled = shuffle_cell(b, false);
            assert_eq!(shuffle_cell(shuffled, true), b);
        }
    }

    #[test]
    fn mix_column_is_an_involution() {
        let blocks: [Block; 4] = [0, u64::MAX, 0x0123_4567_89AB_CDEF, 0x1111_2222_3333_4444];
        for &b in &blocks {
            assert_eq!(mix_column(mix_column(b)), b);
        }
    }

    #[test]
    fn sbox_chain_cycles_through_every_value() {
        // The S-box is a permutation of 0..16, so iterating it from any
        // starting nibble must eventually return to that nibble.
        for start in 0..16u8 {
            let mut v = start;
            let mut visited = [false; 16];
            loop {
                if visited[v as usize] {
                    break;
                }
                visited[v as usize] = true;
                v = nibble_get(SBOX, v as usize);
            }
            assert!(visited.iter().all(|&x| x), "cycle from {start} did not cover all nibbles");
        }
    }

    #[test]
    fn white_key_is_xor_of_halves() {
        let ks = key_schedule(0x1234_5678_9ABC_DEF0, 0x0FED_CBA9_8765_4321);
        assert_eq!(ks.white_key, 0x1234_5678_9ABC_DEF0 ^ 0x0FED_CBA9_8765_4321);
    }

    #[test]
    fn zero_key_round_keys_are_the_round_constants_expanded() {
        let ks = key_schedule(0, 0);
        assert_eq!(ks.white_key, 0);
        for (i, &rk) in ks.round_keys.iter().enumerate() {
            let beta = ROUND_CONST[i];
            let mut expected: Block = 0;
            for j in 0..NIBBLES {
                let bit = (beta >> (15 - j)) & 1;
                expected = nibble_set(expected, j, bit as u8);
            }
            assert_eq!(rk, expected);
        }
    }

    #[test]
    fn midori_with_schedule_matches_midori_convenience_wrapper() {
        let k0 = 0x0011_2233_4455_6677;
        let k1 = 0x8899_AABB_CCDD_EEFF;
        let ks = key_schedule(k0, k1);
        let state = 0xFEDC_BA98_7654_3210;
        assert_eq!(midori_with_schedule(state, &ks), midori(state, k0, k1));
    }

    #[test]
    fn midori_differs_for_different_keys() {
        let state = 0x0123_4567_89AB_CDEF;
        let out_a = midori(state, 0, 0);
        let out_b = midori(state, 1, 0);
        assert_ne!(out_a, out_b);
    }
}
