// 32-bit backend: GF(2^255 - 19) in mixed radix 2^25.5.

pub mod gf25519;

// Compute x*y over 64 bits. Only 32x32->64 multiplications are used by
// this backend, since these are constant-time on the 32-bit cores we
// care about.
#[inline(always)]
pub(crate) const fn mul64(x: u32, y: u32) -> u64 {
    (x as u64) * (y as u64)
}

// Subtract with borrow; borrow is 0 or 1.
// (x, y, c_in) -> x - y - c_in mod 2^32, c_out
#[inline(always)]
pub(crate) const fn subborrow_u32(x: u32, y: u32, c: u8) -> (u32, u8) {
    let z = (x as u64).wrapping_sub(y as u64).wrapping_sub(c as u64);
    (z as u32, (z >> 63) as u8)
}
