use super::{mul64, subborrow_u32};
use super::super::{le_bytes, le_words};

/// An element of GF(2^255 - 19), with ten limbs of 26 and 25 bits.
#[derive(Clone, Copy, Debug)]
pub struct GF25519([u32; 10]);

const M26: u32 = 0x03FFFFFF;
const M25: u32 = 0x01FFFFFF;

// Bit position of each limb within the 255-bit value.
const POS: [usize; 10] = [ 0, 26, 51, 77, 102, 128, 153, 179, 204, 230 ];

// Width of limb i: 26 bits for even i, 25 bits for odd i.
const fn width(i: usize) -> usize {
    26 - (i & 1)
}

// Extract 'w' bits at position 'p' out of a 256-bit value.
const fn extract(x: &[u64; 4], p: usize, w: usize) -> u32 {
    let k = p >> 6;
    let s = p & 63;
    let mut v = x[k] >> s;
    if s + w > 64 && k < 3 {
        v |= x[k + 1] << (64 - s);
    }
    (v as u32) & ((1u32 << w) - 1)
}

impl GF25519 {

    // INTERNAL FORMAT
    // ===============
    //
    // Value is split over ten limbs y0 to y9; limb i has weight 2^POS[i],
    // with POS[i] = ceil(25.5*i). Even-indexed limbs nominally hold 26 bits,
    // odd-indexed limbs 25 bits. A stored element has limbs only slightly
    // above their nominal size (by at most 2^17 for y1, a few units
    // elsewhere). The value is implicitly considered modulo p = 2^255 - 19.

    pub const ZERO: Self = Self([ 0; 10 ]);
    pub const ONE: Self = Self([ 1, 0, 0, 0, 0, 0, 0, 0, 0, 0 ]);

    // 2*p in radix 2^25.5.
    const DMOD: [u32; 10] = [
        2 * (M26 - 18), 2 * M25, 2 * M26, 2 * M25, 2 * M26,
        2 * M25, 2 * M26, 2 * M25, 2 * M26, 2 * M25,
    ];

    // p as eight 32-bit words (low-to-high), for the canonicity check.
    const MOD_W32: [u32; 8] = [
        0xFFFFFFED, 0xFFFFFFFF, 0xFFFFFFFF, 0xFFFFFFFF,
        0xFFFFFFFF, 0xFFFFFFFF, 0xFFFFFFFF, 0x7FFFFFFF,
    ];

    // Create an element from a 256-bit value (implicitly reduced modulo
    // the field order) provided as four 64-bit limbs (in low-to-high order).
    pub const fn w64le(x0: u64, x1: u64, x2: u64, x3: u64) -> Self {
        let x = [ x0, x1, x2, x3 ];
        let mut y = [0u32; 10];
        let mut i = 0;
        while i < 10 {
            y[i] = extract(&x, POS[i], width(i));
            i += 1;
        }

        // 2^255 = 19 mod p
        y[0] += 19 * ((x3 >> 63) as u32);
        Self(y)
    }

    // Create an element from a 256-bit value (implicitly reduced modulo
    // the field order) provided as four 64-bit limbs (in high-to-low order).
    pub const fn w64be(x3: u64, x2: u64, x1: u64, x0: u64) -> Self {
        Self::w64le(x0, x1, x2, x3)
    }

    // One parallel carry step. Input limbs must be below 2^28.
    #[inline(always)]
    fn set_carry_propagate(&mut self, d: [u32; 10]) {
        let mut h = [0u32; 10];
        for i in 0..10 {
            h[i] = d[i] >> width(i);
        }
        self.0[0] = (d[0] & M26) + 19 * h[9];
        for i in 1..10 {
            let m = if (i & 1) == 0 { M26 } else { M25 };
            self.0[i] = (d[i] & m) + h[i - 1];
        }
    }

    #[inline]
    pub fn set_add(&mut self, rhs: &Self) {
        let mut d = [0u32; 10];
        for i in 0..10 {
            d[i] = self.0[i] + rhs.0[i];
        }
        self.set_carry_propagate(d);
    }

    #[inline]
    pub fn set_sub(&mut self, rhs: &Self) {
        let mut d = [0u32; 10];
        for i in 0..10 {
            d[i] = (self.0[i] + Self::DMOD[i]) - rhs.0[i];
        }
        self.set_carry_propagate(d);
    }

    // Negate this value (in place).
    #[inline]
    pub fn set_neg(&mut self) {
        let mut d = [0u32; 10];
        for i in 0..10 {
            d[i] = Self::DMOD[i] - self.0[i];
        }
        self.set_carry_propagate(d);
    }

    // Reduce ten 64-bit coefficients into a stored element. Coefficients
    // must be below 2^63.
    #[inline(always)]
    fn set_reduce_wide(&mut self, mut c: [u64; 10]) {
        for i in 0..9 {
            let w = width(i);
            c[i + 1] += c[i] >> w;
            c[i] &= (1u64 << w) - 1;
        }
        let h = c[9] >> 25;
        c[9] &= M25 as u64;
        c[0] += 19 * h;
        c[1] += c[0] >> 26;
        c[0] &= M26 as u64;
        for i in 0..10 {
            self.0[i] = c[i] as u32;
        }
    }

    pub fn set_mul(&mut self, rhs: &Self) {
        let a = &self.0;
        let b = &rhs.0;
        let mut b19 = [0u32; 10];
        for j in 1..10 {
            b19[j] = 19 * b[j];
        }

        // Limb products for which both indices are odd are doubled
        // (weights 2^(25.5*i + 0.5) multiply to twice the target weight).
        // Products that wrap past 2^255 use 19*b.
        let mut c = [0u64; 10];
        for i in 0..10 {
            let ai = a[i];
            let ai2 = ai << (i & 1);
            for j in 0..10 {
                let x = if (i & j & 1) != 0 { ai2 } else { ai };
                if i + j < 10 {
                    c[i + j] += mul64(x, b[j]);
                } else {
                    c[i + j - 10] += mul64(x, b19[j]);
                }
            }
        }
        self.set_reduce_wide(c);
    }

    // Square this value (in place).
    #[inline]
    pub fn set_square(&mut self) {
        let a = *self;
        self.set_mul(&a);
    }

    // Fully reduce the value to its canonical representation.
    fn set_normalized(&mut self) {
        let mut c = [0u64; 10];
        for i in 0..10 {
            c[i] = self.0[i] as u64;
        }
        self.set_reduce_wide(c);

        // The value is now below 2*p. q = 1 if value >= p, 0 otherwise.
        let mut q = (self.0[0] + 19) >> 26;
        for i in 1..10 {
            q = (self.0[i] + q) >> width(i);
        }

        // Add 19*q and drop bit 255.
        let mut cc = 19 * q;
        for i in 0..10 {
            let w = width(i);
            let t = self.0[i] + cc;
            self.0[i] = t & ((1u32 << w) - 1);
            cc = t >> w;
        }
    }

    // Encode this value into four 64-bit limbs in little-endian order
    // (fully normalized).
    fn to_limbs64(self) -> [u64; 4] {
        let mut x = self;
        x.set_normalized();
        let mut w = [0u64; 4];
        for i in 0..10 {
            let p = POS[i];
            let v = x.0[i] as u64;
            let k = p >> 6;
            let s = p & 63;
            w[k] |= v << s;
            if s + width(i) > 64 {
                w[k + 1] |= v >> (64 - s);
            }
        }
        w
    }

    // Conditionally copy the provided value ('a') into self:
    //  - If ctl == 0xFFFFFFFF, then the value of 'a' is copied into self.
    //  - If ctl == 0, then the value of self is unchanged.
    // ctl MUST be equal to 0 or 0xFFFFFFFF.
    #[inline]
    pub fn set_cond(&mut self, a: &Self, ctl: u32) {
        for i in 0..10 {
            self.0[i] ^= ctl & (self.0[i] ^ a.0[i]);
        }
    }

    // Compare this value with zero (constant-time); returned value
    // is 0xFFFFFFFF if this element is zero, 0 otherwise.
    #[inline]
    pub fn iszero(self) -> u32 {
        let mut x = self;
        x.set_normalized();
        let mut t = 0u32;
        for i in 0..10 {
            t |= x.0[i];
        }
        ((t | t.wrapping_neg()) >> 31).wrapping_sub(1)
    }

    // Return 0xFFFFFFFF if the least significant bit of the canonical
    // representation of this value is 1, 0 otherwise.
    #[inline]
    pub fn isnegative(self) -> u32 {
        let mut x = self;
        x.set_normalized();
        (x.0[0] & 1).wrapping_neg()
    }

    // Encode this value over exactly 32 bytes (canonical, little-endian).
    #[inline]
    pub fn encode32(self) -> [u8; 32] {
        le_bytes(&self.to_limbs64())
    }

    // Decode the field element from the provided bytes. If the source
    // slice does not have length exactly 32 bytes, or if the encoding
    // is non-canonical, then this element is set to zero, and 0 is returned.
    // Otherwise, this element is set to the decoded value, and 0xFFFFFFFF
    // is returned.
    pub fn set_decode32(&mut self, buf: &[u8]) -> u32 {
        if buf.len() != 32 {
            *self = Self::ZERO;
            return 0;
        }

        // Value is canonical if subtracting p yields a borrow.
        let mut cc = 0u8;
        for i in 0..8 {
            let w = (buf[4 * i] as u32)
                | ((buf[4 * i + 1] as u32) << 8)
                | ((buf[4 * i + 2] as u32) << 16)
                | ((buf[4 * i + 3] as u32) << 24);
            let (_, c) = subborrow_u32(w, Self::MOD_W32[i], cc);
            cc = c;
        }
        let m = (cc as u32).wrapping_neg();

        let d = le_words(buf);
        *self = Self::w64le(d[0], d[1], d[2], d[3]);
        self.set_cond(&Self::ZERO, !m);
        m
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
