//! Architecture-specific implementations of the base field GF(2^255 - 19).
//!
//! Two implementations of the `GF25519` type are provided; the one used
//! is selected at compile time:
//!
//!  - `w64`: five limbs of 51 bits each, held in `u64` words, with
//!    64x64->128 multiplications.
//!
//!  - `w32`: ten limbs of alternating 26 and 25 bits, held in `u32`
//!    words, with 32x32->64 multiplications.
//!
//! Feature `w64_backend` or `w32_backend` forces the choice. If neither
//! is set, the backend follows the target pointer width. The two features
//! cannot be set at the same time.
//!
//! Both backends expose the same set of low-level primitives, which
//! `crate::field` builds upon:
//!
//!  - `ZERO` and `ONE`.
//!
//!  - `const fn w64le(x0, x1, x2, x3)` and `const fn w64be(x3, x2, x1, x0)`
//!    build an element from a 256-bit value given as four 64-bit limbs;
//!    bit 255 is folded back (2^255 = 19 in the field).
//!
//!  - `set_add()`, `set_sub()`, `set_neg()`, `set_mul()` and
//!    `set_square()` compute in place; outputs are always "reduced", i.e.
//!    usable as inputs to any other operation.
//!
//!  - `set_cond(&mut self, a: &Self, ctl: u32)` copies `a` into `self` if
//!    `ctl` is 0xFFFFFFFF, and leaves `self` unchanged if `ctl` is
//!    0x00000000. No other value of `ctl` is allowed.
//!
//!  - `iszero()` and `isnegative()` return 0xFFFFFFFF (true) or
//!    0x00000000 (false).
//!
//!  - `encode32()` produces the canonical little-endian encoding;
//!    `decode32()` accepts only canonical encodings; `decode_reduce()`
//!    reduces any 32-byte value modulo p.
//!
//! All of these are constant-time.

#[cfg(all(feature = "w32_backend", feature = "w64_backend"))]
compile_error!("cannot use the w32 and w64 backends simultaneously");

#[cfg(not(any(
    feature = "w32_backend",
    feature = "w64_backend",
    target_pointer_width = "32",
    target_pointer_width = "64",
)))]
compile_error!("no backend specified; cannot infer from pointer size");

#[cfg(any(
    feature = "w32_backend",
    all(not(feature = "w64_backend"), target_pointer_width = "32"),
))]
pub mod w32;

/// Finite field: integers modulo 2^255 - 19 (32-bit implementation).
#[cfg(any(
    feature = "w32_backend",
    all(not(feature = "w64_backend"), target_pointer_width = "32"),
))]
pub type GF25519 = w32::gf25519::GF25519;

#[cfg(any(
    feature = "w64_backend",
    all(not(feature = "w32_backend"), target_pointer_width = "64"),
))]
pub mod w64;

/// Finite field: integers modulo 2^255 - 19 (64-bit implementation).
#[cfg(any(
    feature = "w64_backend",
    all(not(feature = "w32_backend"), target_pointer_width = "64"),
))]
pub type GF25519 = w64::gf25519::GF25519;

// Read exactly 32 bytes as four 64-bit words (little-endian). The caller
// checks the length.
#[inline]
pub(crate) fn le_words(buf: &[u8]) -> [u64; 4] {
    debug_assert!(buf.len() == 32);
    let mut w = [0u64; 4];
    for i in 0..32 {
        w[i >> 3] |= (buf[i] as u64) << ((i & 7) << 3);
    }
    w
}

// Write four 64-bit words as 32 bytes (little-endian).
#[inline]
pub(crate) fn le_bytes(w: &[u64; 4]) -> [u8; 32] {
    let mut d = [0u8; 32];
    for i in 0..4 {
        d[(i << 3)..((i + 1) << 3)].copy_from_slice(&w[i].to_le_bytes());
    }
    d
}
