//! COFB (COmbined FeedBack) AEAD mode, chained over Midori-64.
//!
//! `encrypt`/`decrypt` run one nonce-initialization step, two fixed priming
//! steps standing in for empty associated-data processing, and one payload
//! step per plaintext/ciphertext block. See SPEC_FULL.md §4.7/§4.8 for the
//! derivation of the mask-class schedule below.

use crate::field::{FieldElt, FieldState};
use crate::midori::{key_schedule, midori_with_schedule, KeySchedule};
use crate::nibble::Block;

/// Extract the middle 32 bits of a cipher output as the base mask `beta`.
#[inline(always)]
pub fn mask_gen(y: Block) -> FieldElt {
    ((y >> 16) & 0xFFFF_FFFF) as FieldElt
}

/// Rotate-left-16 `y`, XOR-folding the top 16 bits into the bottom 16
/// alongside `y`'s own original low 16 bits.
#[inline(always)]
pub fn mul_gy(y: Block) -> Block {
    let low16 = y & 0xFFFF;
    let top16 = y >> 48;
    let folded = (top16 ^ low16) & 0xFFFF;
    (y << 16 & !0xFFFFu64) | folded
}

/// One priming step (`exp` 1 or 2): the implicit input block is all-zero,
/// so `B XOR GY` collapses to `GY`. Identical for encrypt and decrypt.
fn priming_step(y: Block, fs: &mut FieldState, class: u8, ks: &KeySchedule) -> Block {
    let msk = fs.goper(class);
    let gy = mul_gy(y);
    let x = ((msk as Block) << 32) ^ gy;
    midori_with_schedule(x, ks)
}

/// Mask class for payload block `k` (1-indexed) of an `n`-block message.
fn payload_class(k: usize, n: usize) -> u8 {
    if n > 1 && k == n {
        4
    } else {
        3
    }
}

fn init(k0: Block, k1: Block, n: Block) -> (KeySchedule, Block, FieldState) {
    let ks = key_schedule(k0, k1);
    let y0 = midori_with_schedule(n, &ks);
    let beta = mask_gen(y0);
    let mut fs = FieldState::new(beta);
    let y1 = priming_step(y0, &mut fs, 1, &ks);
    let y2 = priming_step(y1, &mut fs, 2, &ks);
    (ks, y2, fs)
}

/// Encrypt `plaintext_blocks` under `(k0, k1)` and nonce `n`.
///
/// Returns the ciphertext (one block per plaintext block) and the 64-bit
/// authentication tag.
pub fn encrypt(k0: Block, k1: Block, n: Block, plaintext_blocks: &[Block]) -> (Vec<Block>, Block) {
    let (ks, mut y, mut fs) = init(k0, k1, n);
    let count = plaintext_blocks.len();
    let mut ciphertext = Vec::with_capacity(count);
    for (idx, &b) in plaintext_blocks.iter().enumerate() {
        let class = payload_class(idx + 1, count);
        let msk = fs.goper(class);
        let gy = mul_gy(y);
        let bgy = b ^ gy;
        let x = ((msk as Block) << 32) ^ bgy;
        ciphertext.push(y ^ b);
        y = midori_with_schedule(x, &ks);
    }
    (ciphertext, y)
}

/// Constant-time 64-bit equality check, for comparing a computed tag
/// against an expected one without branching on the mismatch position.
#[inline(always)]
pub fn ct_eq64(a: u64, b: u64) -> bool {
    (a ^ b) == 0
}

/// Decrypt `ciphertext_blocks` under `(k0, k1)` and nonce `n`.
///
/// Always runs to completion regardless of `expected_tag` (§7): the
/// returned `verified` flag is a constant-time comparison performed only
/// after the full plaintext and tag have been computed, never gating an
/// early return.
pub fn decrypt(
    k0: Block,
    k1: Block,
    n: Block,
    ciphertext_blocks: &[Block],
    expected_tag: Block,
) -> (Vec<Block>, Block, bool) {
    let (ks, mut y, mut fs) = init(k0, k1, n);
    let count = ciphertext_blocks.len();
    let mut plaintext = Vec::with_capacity(count);
    for (idx, &c) in ciphertext_blocks.iter().enumerate() {
        let class = payload_class(idx + 1, count);
        let msk = fs.goper(class);
        let gy = mul_gy(y);
        let m = y ^ c;
        let bgy = m ^ gy;
        let x = ((msk as Block) << 32) ^ bgy;
        plaintext.push(m);
        y = midori_with_schedule(x, &ks);
    }
    let verified = ct_eq64(y, expected_tag);
    (plaintext, y, verified)
}

#[cfg(feature = "parallel")]
mod parallel {
    use super::*;
    use rayon::prelude::*;

    /// One independent message for [`encrypt_batch`].
    pub struct EncryptJob {
        pub k0: Block,
        pub k1: Block,
        pub n: Block,
        pub plaintext_blocks: Vec<Block>,
    }

    /// Run [`encrypt`] over many independent messages in parallel.
    ///
    /// Each job is processed with its own `FieldState` and key schedule
    /// (§5: no shared mutable state across messages) — this is dispatch
    /// parallelism over independent calls, not shared precomputation across
    /// messages.
    pub fn encrypt_batch(jobs: &[EncryptJob]) -> Vec<(Vec<Block>, Block)> {
        jobs.par_iter()
            .map(|job| encrypt(job.k0, job.k1, job.n, &job.plaintext_blocks))
            .collect()
    }

    /// One independent message for [`decrypt_batch`].
    pub struct DecryptJob {
        pub k0: Block,
        pub k1: Block,
        pub n: Block,
        pub ciphertext_blocks: Vec<Block>,
        pub expected_tag: Block,
    }

    /// Run [`decrypt`] over many independent messages in parallel.
    pub fn decrypt_batch(jobs: &[DecryptJob]) -> Vec<(Vec<Block>, Block, bool)> {
        jobs.par_iter()
            .map(|job| {
                decrypt(
                    job.k0,
                    job.k1,
                    job.n,
                    &job.ciphertext_blocks,
                    job.expected_tag,
                )
            })
            .collect()
    }
}

#[cfg(feature = "parallel")]
pub use parallel::{decrypt_batch, encrypt_batch, DecryptJob, EncryptJob};
