use super::{mul128, sgnw};
use super::super::{le_bytes, le_words};

/// An element of GF(2^255 - 19), with five 51-bit limbs.
#[derive(Clone, Copy, Debug)]
pub struct GF25519([u64; 5]);

// 2^51 - 1
const M51: u64 = 0x0007FFFFFFFFFFFF;

impl GF25519 {

    // INTERNAL FORMAT
    // ===============
    //
    // Value is split over five unsigned limbs, in base 2^51. If the limbs
    // are y0 to y4, then the value is:
    //   y0 + y1*2^51 + y2*2^102 + y3*2^153 + y4*2^204
    // The value is implicitly considered modulo p = 2^255 - 19.
    //
    // A stored element has all its limbs lower than 2^51 + 2^13; this is
    // what all operations produce. Multiplications and squarings tolerate
    // limbs up to 2^52 (this covers the sum of two stored elements). The
    // representation is not unique; set_normalized() computes the
    // canonical one (all limbs below 2^51, value below p).

    pub const ZERO: Self = Self([ 0, 0, 0, 0, 0 ]);
    pub const ONE: Self = Self([ 1, 0, 0, 0, 0 ]);

    // p = 2^255 - 19 in base 2^51.
    const MOD_M51: [u64; 5] = [ M51 - 18, M51, M51, M51, M51 ];

    // 2*p in base 2^51; added before subtractions so that limbs never
    // go negative.
    const DMOD_M51: [u64; 5] = [
        2 * (M51 - 18), 2 * M51, 2 * M51, 2 * M51, 2 * M51,
    ];

    // Create an element from a 256-bit value (implicitly reduced modulo
    // the field order) provided as four 64-bit limbs (in low-to-high order).
    pub const fn w64le(x0: u64, x1: u64, x2: u64, x3: u64) -> Self {
        // Bit 255 is dropped from the top limb and folded into y0 as
        // 19 (since 2^255 = 19 mod p).
        let y0 = (x0 & M51) + (19 & sgnw(x3));
        let y1 = (x0 >> 51) | ((x1 << 13) & M51);
        let y2 = (x1 >> 38) | ((x2 << 26) & M51);
        let y3 = (x2 >> 25) | ((x3 << 39) & M51);
        let y4 = (x3 >> 12) & M51;
        Self([ y0, y1, y2, y3, y4 ])
    }

    // Create an element from a 256-bit value (implicitly reduced modulo
    // the field order) provided as four 64-bit limbs (in high-to-low order).
    pub const fn w64be(x3: u64, x2: u64, x1: u64, x0: u64) -> Self {
        Self::w64le(x0, x1, x2, x3)
    }

    // Set this value to the provided limbs, with a single parallel carry
    // propagation step. Input limbs must be lower than 2^54; output limbs
    // are lower than 2^51 + 2^8.
    #[inline(always)]
    fn set_carry_propagate(&mut self, d: [u64; 5]) {
        let h0 = d[0] >> 51;
        let h1 = d[1] >> 51;
        let h2 = d[2] >> 51;
        let h3 = d[3] >> 51;
        let h4 = d[4] >> 51;
        self.0[0] = (d[0] & M51) + 19 * h4;
        self.0[1] = (d[1] & M51) + h0;
        self.0[2] = (d[2] & M51) + h1;
        self.0[3] = (d[3] & M51) + h2;
        self.0[4] = (d[4] & M51) + h3;
    }

    #[inline]
    pub fn set_add(&mut self, rhs: &Self) {
        self.set_carry_propagate([
            self.0[0] + rhs.0[0],
            self.0[1] + rhs.0[1],
            self.0[2] + rhs.0[2],
            self.0[3] + rhs.0[3],
            self.0[4] + rhs.0[4],
        ]);
    }

    #[inline]
    pub fn set_sub(&mut self, rhs: &Self) {
        self.set_carry_propagate([
            (self.0[0] + Self::DMOD_M51[0]) - rhs.0[0],
            (self.0[1] + Self::DMOD_M51[1]) - rhs.0[1],
            (self.0[2] + Self::DMOD_M51[2]) - rhs.0[2],
            (self.0[3] + Self::DMOD_M51[3]) - rhs.0[3],
            (self.0[4] + Self::DMOD_M51[4]) - rhs.0[4],
        ]);
    }

    // Negate this value (in place).
    #[inline]
    pub fn set_neg(&mut self) {
        self.set_carry_propagate([
            Self::DMOD_M51[0] - self.0[0],
            Self::DMOD_M51[1] - self.0[1],
            Self::DMOD_M51[2] - self.0[2],
            Self::DMOD_M51[3] - self.0[3],
            Self::DMOD_M51[4] - self.0[4],
        ]);
    }

    // Reduce five 128-bit coefficients (output of a multiplication or a
    // squaring) into a stored element. Each coefficient must be lower
    // than 2^115, and c4 lower than 2^110.5.
    #[inline(always)]
    fn set_reduce_wide(&mut self, c: [u128; 5]) {
        // Carries are truncated to 64 bits; they fit since all
        // coefficients are lower than 2^115.
        let c1 = c[1] + (((c[0] >> 51) as u64) as u128);
        let c2 = c[2] + (((c1 >> 51) as u64) as u128);
        let c3 = c[3] + (((c2 >> 51) as u64) as u128);
        let c4 = c[4] + (((c3 >> 51) as u64) as u128);
        let h = (c4 >> 51) as u64;

        // h < 2^59.5, hence 19*h < 2^63.8 and d0 does not overflow.
        let d0 = ((c[0] as u64) & M51) + 19 * h;
        let d1 = ((c1 as u64) & M51) + (d0 >> 51);
        self.0[0] = d0 & M51;
        self.0[1] = d1;
        self.0[2] = (c2 as u64) & M51;
        self.0[3] = (c3 as u64) & M51;
        self.0[4] = (c4 as u64) & M51;
    }

    #[inline(always)]
    pub fn set_mul(&mut self, rhs: &Self) {
        let (a0, a1, a2, a3, a4) =
            (self.0[0], self.0[1], self.0[2], self.0[3], self.0[4]);
        let (b0, b1, b2, b3, b4) =
            (rhs.0[0], rhs.0[1], rhs.0[2], rhs.0[3], rhs.0[4]);

        // Products that wrap around 2^255 are multiplied by 19. Limbs
        // are below 2^52, so 19*b < 2^56.3 and each product is below
        // 2^108.3; a sum of five such terms stays below 2^111.
        let b1_19 = b1 * 19;
        let b2_19 = b2 * 19;
        let b3_19 = b3 * 19;
        let b4_19 = b4 * 19;

        let c0 = mul128(a0, b0) + mul128(a1, b4_19) + mul128(a2, b3_19)
               + mul128(a3, b2_19) + mul128(a4, b1_19);
        let c1 = mul128(a0, b1) + mul128(a1, b0) + mul128(a2, b4_19)
               + mul128(a3, b3_19) + mul128(a4, b2_19);
        let c2 = mul128(a0, b2) + mul128(a1, b1) + mul128(a2, b0)
               + mul128(a3, b4_19) + mul128(a4, b3_19);
        let c3 = mul128(a0, b3) + mul128(a1, b2) + mul128(a2, b1)
               + mul128(a3, b0) + mul128(a4, b4_19);
        let c4 = mul128(a0, b4) + mul128(a1, b3) + mul128(a2, b2)
               + mul128(a3, b1) + mul128(a4, b0);

        self.set_reduce_wide([ c0, c1, c2, c3, c4 ]);
    }

    // Square this value (in place).
    #[inline(always)]
    pub fn set_square(&mut self) {
        let (a0, a1, a2, a3, a4) =
            (self.0[0], self.0[1], self.0[2], self.0[3], self.0[4]);

        // Same as set_mul(), with cross products merged by doubling
        // one of the operands.
        let a0_2 = a0 << 1;
        let a1_2 = a1 << 1;
        let a2_2 = a2 << 1;
        let a3_2 = a3 << 1;
        let a3_19 = a3 * 19;
        let a4_19 = a4 * 19;

        let c0 = mul128(a0, a0) + mul128(a1_2, a4_19) + mul128(a2_2, a3_19);
        let c1 = mul128(a0_2, a1) + mul128(a2_2, a4_19) + mul128(a3, a3_19);
        let c2 = mul128(a0_2, a2) + mul128(a1, a1) + mul128(a3_2, a4_19);
        let c3 = mul128(a0_2, a3) + mul128(a1_2, a2) + mul128(a4, a4_19);
        let c4 = mul128(a0_2, a4) + mul128(a1_2, a3) + mul128(a2, a2);

        self.set_reduce_wide([ c0, c1, c2, c3, c4 ]);
    }

    // Fully reduce the value: limbs are set to the canonical
    // representation (each below 2^51, total value below p).
    #[inline]
    fn set_normalized(&mut self) {
        // Bring limbs below 2^51 + 2^8; the value is then below 2*p.
        let d = self.0;
        self.set_carry_propagate(d);

        // q = 1 if value >= p, 0 otherwise; this is the carry out of
        // the addition of 19.
        let q = (self.0[0] + 19) >> 51;
        let q = (self.0[1] + q) >> 51;
        let q = (self.0[2] + q) >> 51;
        let q = (self.0[3] + q) >> 51;
        let q = (self.0[4] + q) >> 51;

        // Add 19*q and drop bit 255: this subtracts q*p.
        let a0 = self.0[0] + 19 * q;
        let a1 = self.0[1] + (a0 >> 51);
        let a2 = self.0[2] + (a1 >> 51);
        let a3 = self.0[3] + (a2 >> 51);
        let a4 = self.0[4] + (a3 >> 51);
        self.0[0] = a0 & M51;
        self.0[1] = a1 & M51;
        self.0[2] = a2 & M51;
        self.0[3] = a3 & M51;
        self.0[4] = a4 & M51;
    }

    // Encode this value into four 64-bit limbs in little-endian order
    // (fully normalized).
    fn to_limbs64(self) -> [u64; 4] {
        let mut x = self;
        x.set_normalized();
        [
            x.0[0] | (x.0[1] << 51),
            (x.0[1] >> 13) | (x.0[2] << 38),
            (x.0[2] >> 26) | (x.0[3] << 25),
            (x.0[3] >> 39) | (x.0[4] << 12),
        ]
    }

    // Conditionally copy the provided value ('a') into self:
    //  - If ctl == 0xFFFFFFFF, then the value of 'a' is copied into self.
    //  - If ctl == 0, then the value of self is unchanged.
    // ctl MUST be equal to 0 or 0xFFFFFFFF.
    #[inline]
    pub fn set_cond(&mut self, a: &Self, ctl: u32) {
        let cw = ((ctl as i32) as i64) as u64;
        self.0[0] ^= cw & (self.0[0] ^ a.0[0]);
        self.0[1] ^= cw & (self.0[1] ^ a.0[1]);
        self.0[2] ^= cw & (self.0[2] ^ a.0[2]);
        self.0[3] ^= cw & (self.0[3] ^ a.0[3]);
        self.0[4] ^= cw & (self.0[4] ^ a.0[4]);
    }

    // Compare this value with zero (constant-time); returned value
    // is 0xFFFFFFFF if this element is zero, 0 otherwise.
    #[inline]
    pub fn iszero(self) -> u32 {
        let mut x = self;
        x.set_normalized();
        let t = x.0[0] | x.0[1] | x.0[2] | x.0[3] | x.0[4];
        (((t | t.wrapping_neg()) >> 63) as u32).wrapping_sub(1)
    }

    // Return 0xFFFFFFFF if the least significant bit of the canonical
    // representation of this value is 1, 0 otherwise. This is the "sign"
    // used in point encodings.
    #[inline]
    pub fn isnegative(self) -> u32 {
        let mut x = self;
        x.set_normalized();
        ((x.0[0] & 1) as u32).wrapping_neg()
    }

    // Encode this value over exactly 32 bytes. Encoding is always canonical
    // (little-endian encoding of the value in the 0..p-1 range, top bit
    // of the last byte is always 0).
    #[inline]
    pub fn encode32(self) -> [u8; 32] {
        le_bytes(&self.to_limbs64())
    }

    // Decode the field element from the provided bytes. If the source
    // slice does not have length exactly 32 bytes, or if the encoding
    // is non-canonical (i.e. does not represent an integer in the 0
    // to p-1 range), then this element is set to zero, and 0 is returned.
    // Otherwise, this element is set to the decoded value, and 0xFFFFFFFF
    // is returned.
    pub fn set_decode32(&mut self, buf: &[u8]) -> u32 {
        if buf.len() != 32 {
            *self = Self::ZERO;
            return 0;
        }

        // Decode the input bytes without any reduction; top limb may thus
        // use 52 bits.
        let d = le_words(buf);
        self.0[0] = d[0] & M51;
        self.0[1] = (d[0] >> 51) | ((d[1] << 13) & M51);
        self.0[2] = (d[1] >> 38) | ((d[2] << 26) & M51);
        self.0[3] = (d[2] >> 25) | ((d[3] << 39) & M51);
        self.0[4] = d[3] >> 12;

        // Try to subtract p from the value; if that does not yield a
        // borrow, then the encoding was not canonical.
        let cc = self.0[0].wrapping_sub(Self::MOD_M51[0]) >> 63;
        let cc = self.0[1].wrapping_sub(Self::MOD_M51[1] + cc) >> 63;
        let cc = self.0[2].wrapping_sub(Self::MOD_M51[2] + cc) >> 63;
        let cc = self.0[3].wrapping_sub(Self::MOD_M51[3] + cc) >> 63;
        let cc = self.0[4].wrapping_sub(Self::MOD_M51[4] + cc) >> 63;

        // Clear the value if not canonical.
        let cc = cc.wrapping_neg();
        self.0[0] &= cc;
        self.0[1] &= cc;
        self.0[2] &= cc;
        self.0[3] &= cc;
        self.0[4] &= cc;

        cc as u32
    }

    // Decode a field element from 32 bytes. On success, this returns
    // (r, cc), where cc has value 0xFFFFFFFF. If the source encoding is not
    // canonical, or does not have length 32, then this returns (0, 0).
    #[inline]
    pub fn decode32(buf: &[u8]) -> (Self, u32) {
        let mut r = Self::ZERO;
        let cc = r.set_decode32(buf);
        (r, cc)
    }

    // Decode 32 bytes (unsigned little-endian) with reduction modulo p.
    // A source slice of any other length yields zero.
    pub fn decode_reduce(buf: &[u8]) -> Self {
        if buf.len() != 32 {
            return Self::ZERO;
        }
        let d = le_words(buf);
        Self::w64le(d[0], d[1], d[2], d[3])
    }
}
