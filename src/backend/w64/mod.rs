// 64-bit backend: GF(2^255 - 19) in base 2^51.

pub mod gf25519;

// Compute x*y over 128 bits. On all 64-bit targets of interest, this
// compiles to a single constant-time widening multiplication.
#[inline(always)]
pub(crate) const fn mul128(x: u64, y: u64) -> u128 {
    (x as u128) * (y as u128)
}

// Return 0xFFFFFFFFFFFFFFFF if x >= 0x8000000000000000, 0 otherwise
// (i.e. take the sign bit of the signed interpretation, and expand it
// to 64 bits).
#[inline(always)]
pub(crate) const fn sgnw(x: u64) -> u64 {
    ((x as i64) >> 63) as u64
}
