// SPDX-License-Identifier: MIT
//! Midori-64 + COFB — a lightweight authenticated-encryption primitive.
//!
//! * Cipher  : Midori-64, a 64-bit-block / 128-bit-key SPN, 15 rounds plus a
//!             final substitution and whitening.
//! * Mode    : COFB (COmbined FeedBack), chaining the cipher via a
//!             GF(2^32)-derived mask sequence and a linear `mulGY` feedback.
//! * Output  : ciphertext (one block per plaintext block) plus a 64-bit tag.
//!
//! Only fixed-width scalar arithmetic is used on the hot path; the only
//! allocation is the `Vec` returned by [`encrypt`] and [`decrypt`], sized to
//! the caller's block count.
//!
//! This crate is the cryptographic core only: there is no byte-level parsing,
//! no associated-data handling and no padding of partial final blocks (the
//! mode's reference carries stubs for these but they are unreachable from the
//! driver — see `DESIGN.md`). A CLI or service embedding this crate owns that
//! surface.

pub mod cofb;
pub mod field;
pub mod midori;
pub mod nibble;

pub use cofb::{ct_eq64, decrypt, encrypt};
pub use midori::{midori, midori_with_schedule};
pub use nibble::Block;

#[cfg(feature = "parallel")]
pub use cofb::{decrypt_batch, encrypt_batch, DecryptJob, EncryptJob};
