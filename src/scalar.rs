//! Validated scalars and their signed-digit recoding.
//!
//! A `ScalarBytes` is a 256-bit unsigned integer, held as 32 bytes in
//! little-endian order, whose most significant byte is at most 127 (i.e.
//! the integer is lower than 2^255). This bound is what keeps the top
//! digit of the recoding in the -8..+8 range; it is checked when the
//! value is built, which is the only place where an out-of-range scalar
//! can be detected. The check is on public information (the caller can
//! only ever hold valid instances), so it may branch and report an
//! `Error`.
//!
//! The value is NOT reduced modulo the curve order: multiplying a point
//! by a `ScalarBytes` multiplies by the plain integer.

use core::convert::TryFrom;
use log::debug;
use super::{CryptoRng, Error, RngCore};

/// A 256-bit scalar with its top bit cleared (little-endian).
#[derive(Clone, Copy, Debug)]
pub struct ScalarBytes([u8; 32]);

impl ScalarBytes {

    /// The scalar zero.
    pub const ZERO: Self = Self([0u8; 32]);

    /// The scalar one.
    pub const ONE: Self = Self([
        1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
        0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    ]);

    /// Decodes a scalar from exactly 32 bytes (unsigned little-endian).
    ///
    /// Decoding fails if the length is not 32 bytes, or if the last
    /// byte is greater than 127.
    pub fn decode(buf: &[u8]) -> Result<Self, Error> {
        if buf.len() != 32 {
            debug!("scalar rejected: length {}", buf.len());
            return Err(Error::InvalidLength { expected: 32, actual: buf.len() });
        }
        let top = buf[31];
        if top > 0x7F {
            debug!("scalar rejected: top byte out of range");
            return Err(Error::ScalarOutOfRange { top });
        }
        let mut b = [0u8; 32];
        b[..].copy_from_slice(buf);
        Ok(Self(b))
    }

    /// Creates a scalar from a 64-bit integer.
    pub const fn from_u64(n: u64) -> Self {
        let mut b = [0u8; 32];
        let mut i = 0;
        while i < 8 {
            b[i] = (n >> (i << 3)) as u8;
            i += 1;
        }
        Self(b)
    }

    /// Applies [RFC 7748] clamping to 32 bytes: the three low bits are
    /// cleared, bit 255 is cleared and bit 254 is set. The result is
    /// always a valid scalar.
    ///
    /// [RFC 7748]: https://datatracker.ietf.org/doc/html/rfc7748
    pub fn clamp(seed: [u8; 32]) -> Self {
        let mut b = seed;
        b[0] &= 0xF8;
        b[31] &= 0x7F;
        b[31] |= 0x40;
        Self(b)
    }

    /// Generates a uniformly random scalar in the 0 to 2^255-1 range.
    pub fn random<T: CryptoRng + RngCore>(rng: &mut T) -> Self {
        let mut b = [0u8; 32];
        rng.fill_bytes(&mut b);
        b[31] &= 0x7F;
        Self(b)
    }

    /// Encodes this scalar over exactly 32 bytes (little-endian).
    #[inline(always)]
    pub fn encode(self) -> [u8; 32] {
        self.0
    }

    /// Returns a reference to the little-endian bytes of this scalar.
    #[inline(always)]
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Recodes this scalar into 64 signed digits in base 16.
    ///
    /// Each digit is in -8..+8, and the sum of digit[i]*16^i is equal to
    /// the scalar (as an integer). The top digit is in 0..+8.
    ///
    /// This function is constant-time.
    pub fn recode(&self) -> [i8; 64] {
        let mut e = [0i8; 64];
        for i in 0..32 {
            e[2 * i] = (self.0[i] & 0x0F) as i8;
            e[2 * i + 1] = (self.0[i] >> 4) as i8;
        }

        // Digits are now in 0..15. Each one is moved to -8..+7 by
        // subtracting 16 when it is 8 or more, with a carry into the
        // next digit; a digit that received a carry may be 16 before
        // adjustment, and 0 after.
        let mut carry = 0i8;
        for i in 0..63 {
            e[i] += carry;
            carry = (e[i] + 8) >> 4;
            e[i] -= carry << 4;
        }

        // Top nibble is at most 7, so the top digit is at most 8.
        e[63] += carry;
        e
    }
}

impl TryFrom<[u8; 32]> for ScalarBytes {
    type Error = Error;

    fn try_from(b: [u8; 32]) -> Result<Self, Error> {
        Self::decode(&b)
    }
}

impl TryFrom<&[u8]> for ScalarBytes {
    type Error = Error;

    fn try_from(b: &[u8]) -> Result<Self, Error> {
        Self::decode(b)
    }
}

// ========================================================================
