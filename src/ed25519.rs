//! Edwards25519 curve implementation.
//!
//! This module implements group operations on the twisted Edwards curve
//! of equation `-x^2 + y^2 = 1 + d*x^2*y^2`, over the finite field
//! GF(2^255 - 19), for the constant `d` = -121665/121666. This curve is
//! described in [RFC 7748].
//!
//! The curve has order `8*L` for a given prime integer `L` (which is
//! slightly greater than 2^252). A conventional base point is defined,
//! that generates the subgroup of order `L`.
//!
//! A curve point is held in one of four coordinate systems, each suited
//! to a different step of the group law:
//!
//!  - `Point`: extended coordinates (X:Y:Z:T), with x = X/Z, y = Y/Z and
//!    x*y = T/Z. This is the general-purpose form, used for inputs and
//!    outputs of all public operations.
//!
//!  - `PointCompleted`: the raw output of an addition or a doubling,
//!    with x = X/Z and y = Y/T. It is converted into extended form (four
//!    multiplications) or projective form (three multiplications).
//!
//!  - `PointProjective`: (X:Y:Z) with x = X/Z and y = Y/Z; this is all
//!    that a doubling needs.
//!
//!  - `PointCached`: (Y+X, Y-X, Z, 2*d*T), precomputed from an extended
//!    point so that adding it to another point is cheaper. Negation of a
//!    cached point only swaps its first two coordinates and negates the
//!    last one.
//!
//! `Point` instances can be used in additions and subtractions with the
//! usual `+` and `-` operators; all combinations of raw values and
//! references are accepted, as well as compound assignment operators `+=`
//! and `-=`. Multiplication by a scalar is in the `scalarmul` module.
//!
//! Points can be encoded over 32 bytes, and decoded back, following
//! [RFC 8032], section 5.1.2 and 5.1.3. Encoding is always canonical,
//! and verified upon decoding.
//!
//! [RFC 7748]: https://datatracker.ietf.org/doc/html/rfc7748
//! [RFC 8032]: https://datatracker.ietf.org/doc/html/rfc8032

// Projective/fractional coordinates traditionally use uppercase letters,
// using lowercase only for affine coordinates.
#![allow(non_snake_case)]

use core::ops::{Add, AddAssign, Neg, Sub, SubAssign};
use log::debug;
use super::field::GF25519;
use super::Error;

/// A point on the twisted Edwards curve edwards25519 (extended
/// coordinates).
#[derive(Clone, Copy, Debug)]
pub struct Point {
    pub(crate) X: GF25519,
    pub(crate) Y: GF25519,
    pub(crate) Z: GF25519,
    pub(crate) T: GF25519,
}

/// A point in completed coordinates: x = X/Z, y = Y/T.
#[derive(Clone, Copy, Debug)]
pub struct PointCompleted {
    X: GF25519,
    Y: GF25519,
    Z: GF25519,
    T: GF25519,
}

/// A point in projective coordinates: x = X/Z, y = Y/Z.
#[derive(Clone, Copy, Debug)]
pub struct PointProjective {
    X: GF25519,
    Y: GF25519,
    Z: GF25519,
}

/// A point in cached coordinates: (Y+X, Y-X, Z, 2*d*T), for an extended
/// point (X:Y:Z:T).
#[derive(Clone, Copy, Debug)]
pub struct PointCached {
    pub(crate) YpX: GF25519,
    pub(crate) YmX: GF25519,
    pub(crate) Z: GF25519,
    pub(crate) T2d: GF25519,
}

impl Point {

    /// The group neutral (identity point) in the curve.
    ///
    /// Affine coordinates of the neutral are (0,1).
    pub const NEUTRAL: Self = Self {
        X: GF25519::ZERO,
        Y: GF25519::ONE,
        Z: GF25519::ONE,
        T: GF25519::ZERO,
    };

    /// The conventional base point in the curve.
    ///
    /// This point generates the subgroup of prime order L.
    pub const BASE: Self = Self {
        X: GF25519::w64be(
            0x216936D3CD6E53FE, 0xC0A4E231FDD6DC5C,
            0x692CC7609525A7B2, 0xC9562D608F25D51A),
        Y: GF25519::w64be(
            0x6666666666666666, 0x6666666666666666,
            0x6666666666666666, 0x6666666666666658),
        Z: GF25519::ONE,
        T: GF25519::w64be(
            0x67875F0FD78B7665, 0x66EA4E8E64ABE37D,
            0x20F09F80775152F5, 0x6DDE8AB3A5B7DDA3),
    };

    /// Curve equation parameter d = -121665 / 121666.
    pub const D: GF25519 = GF25519::w64be(
        0x52036CEE2B6FFE73,
        0x8CC740797779E898,
        0x00700A4D4141D8AB,
        0x75EB4DCA135978A3,
    );

    /// Double of the curve equation parameter: 2*d
    pub const D2: GF25519 = GF25519::w64be(
        0x2406D9DC56DFFCE7,
        0x198E80F2EEF3D130,
        0x00E0149A8283B156,
        0xEBD69B9426B2F159,
    );

    /// 2^((p-1)/4), which is a square root of -1 in GF(2^255-19)
    pub const SQRT_M1: GF25519 = GF25519::w64be(
        0x2B8324804FC1DF0B,
        0x2B4D00993DFBD7A7,
        0x2F431806AD2FE478,
        0xC4EE1B274A0EA0B0,
    );

    /// Tries to decode a point from bytes.
    ///
    /// If the source slice has not length exactly 32 bytes, then
    /// decoding fails. If the source bytes are not a valid, canonical
    /// encoding of a curve point, then decoding fails. On success,
    /// 0xFFFFFFFF is returned; on failure, 0x00000000 is returned. On
    /// failure, this point is set to the neutral.
    ///
    /// If the source length is exactly 32 bytes, then the decoding
    /// outcome (success or failure) should remain hidden from
    /// timing-based side channels.
    pub fn set_decode(&mut self, buf: &[u8]) -> u32 {
        // We follow all steps from RFC 8032, section 5.1.3.

        if buf.len() != 32 {
            *self = Self::NEUTRAL;
            return 0;
        }

        // Extract and clear the sign-of-x bit.
        let mut bb = [0u8; 32];
        bb[..].copy_from_slice(buf);
        let sign_x = bb[31] >> 7;
        bb[31] &= 0x7F;

        // Decode y. This may fail if the source value is not in the
        // proper 0..p-1 range.
        let (mut y, mut r) = GF25519::decode32(&bb[..]);

        // u = y^2 - 1
        // v = d*y^2 + 1
        let y2 = y.square();
        let u = y2 - GF25519::ONE;
        let v = Self::D * y2 + GF25519::ONE;

        // x = u*v^3*(u*v^7)^((p-5)/8)
        let v3 = v.square() * v;
        let uv7 = u * v3.square() * v;
        let mut x = uv7.pow_p58() * u * v3;

        // If v*x^2 == u, then x is correct.
        // If v*x^2 == -u, then we must replace x with x*2^((p-1)/4).
        // If neither holds, then there is no solution.
        // When u == 0, x == 0 and both cases match, which is harmless.
        let w = x.square() * v;
        let r1 = w.equals(u);
        let r2 = w.equals(-u);
        r &= r1 | r2;
        x.set_cond(&(x * Self::SQRT_M1), r2);

        // If the sign bit of x does not match the specified bit, then
        // negate x. This may induce a failure if x == 0 and the requested
        // sign bit is 1.
        let nx = (((x.encode32()[0] & 0x01) ^ sign_x) as u32).wrapping_neg();
        r &= !(x.iszero() & nx);
        x.set_cond(&-x, nx);

        // If the process failed, then set (x,y) to (0,1).
        x.set_cond(&GF25519::ZERO, !r);
        y.set_cond(&GF25519::ONE, !r);

        // Produce extended coordinates.
        self.X = x;
        self.Y = y;
        self.Z = GF25519::ONE;
        self.T = x * y;
        r
    }

    /// Tries to decode a point from some bytes.
    ///
    /// Decoding succeeds only if the source slice has length exactly 32
    /// bytes, and contains the canonical encoding of a valid curve
    /// point. Since this method returns an `Option<Point>`, it
    /// inherently leaks (through timing-based side channels) whether
    /// decoding succeeded or not; to avoid that, consider using
    /// `set_decode()`. The decoded point itself, however, does not leak.
    pub fn decode(buf: &[u8]) -> Option<Point> {
        let mut P = Point::NEUTRAL;
        if P.set_decode(buf) != 0 {
            Some(P)
        } else {
            None
        }
    }

    /// Decodes a point, reporting the reason of a failure.
    ///
    /// Like `decode()`, this leaks whether decoding succeeded.
    pub fn decode_checked(buf: &[u8]) -> Result<Point, Error> {
        if buf.len() != 32 {
            debug!("point decoding rejected: length {}", buf.len());
            return Err(Error::InvalidLength { expected: 32, actual: buf.len() });
        }
        Self::decode(buf).ok_or_else(|| {
            debug!("point decoding rejected: not a canonical encoding");
            Error::InvalidPoint
        })
    }

    /// Encodes this point into exactly 32 bytes.
    ///
    /// Encoding is always canonical.
    pub fn encode(self) -> [u8; 32] {
        let iZ = self.Z.invert();
        let (x, y) = (self.X * iZ, self.Y * iZ);
        let mut r = y.encode32();
        r[31] |= x.encode32()[0] << 7;
        r
    }

    /// Converts this point to cached coordinates.
    #[inline]
    pub fn to_cached(&self) -> PointCached {
        PointCached {
            YpX: self.Y + self.X,
            YmX: self.Y - self.X,
            Z: self.Z,
            T2d: self.T * Self::D2,
        }
    }

    /// Converts this point to projective coordinates (T is dropped).
    #[inline(always)]
    pub fn to_projective(&self) -> PointProjective {
        PointProjective { X: self.X, Y: self.Y, Z: self.Z }
    }

    /// Adds a cached point to this point; the result is in completed
    /// coordinates.
    pub fn add_cached(&self, rhs: &PointCached) -> PointCompleted {
        let (X1, Y1, Z1, T1) = (&self.X, &self.Y, &self.Z, &self.T);

        // Formulas from RFC 8032, section 5.1.4; the second operand
        // already holds Y2+X2, Y2-X2 and 2*d*T2.
        let A = (Y1 + X1) * rhs.YpX;
        let B = (Y1 - X1) * rhs.YmX;
        let C = rhs.T2d * T1;
        let ZZ = Z1 * rhs.Z;
        let D = ZZ + ZZ;
        PointCompleted {
            X: A - B,
            Y: A + B,
            Z: D + C,
            T: D - C,
        }
    }

    /// Subtracts a cached point from this point; the result is in
    /// completed coordinates.
    pub fn sub_cached(&self, rhs: &PointCached) -> PointCompleted {
        let (X1, Y1, Z1, T1) = (&self.X, &self.Y, &self.Z, &self.T);

        // Same as add_cached() with the negation of rhs merged in:
        // YpX and YmX are exchanged, and T2d changes sign.
        let A = (Y1 + X1) * rhs.YmX;
        let B = (Y1 - X1) * rhs.YpX;
        let C = rhs.T2d * T1;
        let ZZ = Z1 * rhs.Z;
        let D = ZZ + ZZ;
        PointCompleted {
            X: A - B,
            Y: A + B,
            Z: D - C,
            T: D + C,
        }
    }

    /// Adds another point (`rhs`) to this point.
    fn set_add(&mut self, rhs: &Self) {
        *self = self.add_cached(&rhs.to_cached()).to_extended();
    }

    /// Subtract another point (`rhs`) from this point.
    fn set_sub(&mut self, rhs: &Self) {
        *self = self.sub_cached(&rhs.to_cached()).to_extended();
    }

    /// Doubles this point (in place).
    #[inline]
    pub fn set_double(&mut self) {
        *self = self.to_projective().double().to_extended();
    }

    /// Doubles this point.
    #[inline(always)]
    pub fn double(self) -> Self {
        let mut r = self;
        r.set_double();
        r
    }

    /// Doubles this point n times (in place).
    pub fn set_xdouble(&mut self, n: u32) {
        if n == 0 {
            return;
        }

        // Doublings do not need T on input; intermediate results stay
        // in projective coordinates, and only the last one is converted
        // back to extended coordinates.
        let mut P = self.to_projective();
        for _ in 1..n {
            P = P.double().to_projective();
        }
        *self = P.double().to_extended();
    }

    /// Doubles this point n times.
    #[inline(always)]
    pub fn xdouble(self, n: u32) -> Self {
        let mut r = self;
        r.set_xdouble(n);
        r
    }

    /// Negates this point (in place).
    #[inline(always)]
    pub fn set_neg(&mut self) {
        self.X.set_neg();
        self.T.set_neg();
    }

    /// Multiplies this point by a small integer.
    ///
    /// This operation is constant-time with regard to the source point,
    /// but NOT with regard to the multiplier; the multiplier `n` MUST
    /// NOT be secret.
    pub fn set_mul_small_vartime(&mut self, n: u64) {
        if n == 0 {
            *self = Self::NEUTRAL;
            return;
        }
        if n == 1 {
            return;
        }

        let nlen = 64 - n.leading_zeros();
        let T = *self;
        let mut ndbl = 0u32;
        for i in (0..(nlen - 1)).rev() {
            ndbl += 1;
            if ((n >> i) & 1) == 0 {
                continue;
            }
            self.set_xdouble(ndbl);
            ndbl = 0;
            self.set_add(&T);
        }
        self.set_xdouble(ndbl);
    }

    /// Returns the product of this point by a small public integer.
    ///
    /// Not constant-time with regard to `n`.
    #[inline]
    pub fn mul_small_vartime(self, n: u64) -> Self {
        let mut r = self;
        r.set_mul_small_vartime(n);
        r
    }

    /// Compares two points for equality.
    ///
    /// Returned value is 0xFFFFFFFF if the two points are equal,
    /// 0x00000000 otherwise.
    #[inline]
    pub fn equals(self, rhs: Self) -> u32 {
        (self.X * rhs.Z).equals(rhs.X * self.Z)
        & (self.Y * rhs.Z).equals(rhs.Y * self.Z)
    }

    /// Tests whether this point is the neutral (identity point on the
    /// curve).
    ///
    /// Returned value is 0xFFFFFFFF for the neutral, 0x00000000
    /// otherwise.
    #[inline(always)]
    pub fn isneutral(self) -> u32 {
        // The neutral is the only point with y == 1.
        self.Y.equals(self.Z)
    }

    /// Conditionally copies the provided point (`P`) into `self`.
    ///
    ///  - If `ctl` = 0xFFFFFFFF, then the value of `P` is copied into `self`.
    ///
    ///  - If `ctl` = 0x00000000, then the value of `self` is unchanged.
    ///
    /// `ctl` MUST be equal to 0x00000000 or 0xFFFFFFFF.
    #[inline]
    pub fn set_cond(&mut self, P: &Self, ctl: u32) {
        self.X.set_cond(&P.X, ctl);
        self.Y.set_cond(&P.Y, ctl);
        self.Z.set_cond(&P.Z, ctl);
        self.T.set_cond(&P.T, ctl);
    }

    /// Returns a point equal to `P0` (if `ctl` = 0x00000000) or `P1` (if
    /// `ctl` = 0xFFFFFFFF).
    ///
    /// Value `ctl` MUST be either 0x00000000 or 0xFFFFFFFF.
    #[inline(always)]
    pub fn select(P0: &Self, P1: &Self, ctl: u32) -> Self {
        let mut P = *P0;
        P.set_cond(P1, ctl);
        P
    }
}

impl PointCompleted {

    /// Converts to extended coordinates.
    #[inline]
    pub fn to_extended(&self) -> Point {
        Point {
            X: self.X * self.T,
            Y: self.Y * self.Z,
            Z: self.Z * self.T,
            T: self.X * self.Y,
        }
    }

    /// Converts to projective coordinates; this skips the product that
    /// computes T.
    #[inline]
    pub fn to_projective(&self) -> PointProjective {
        PointProjective {
            X: self.X * self.T,
            Y: self.Y * self.Z,
            Z: self.Z * self.T,
        }
    }
}

impl PointProjective {

    /// Doubles this point; the result is in completed coordinates.
    pub fn double(&self) -> PointCompleted {
        let (X, Y, Z) = (&self.X, &self.Y, &self.Z);

        // Formulas from RFC 8032, section 5.1.4 (special doubling case),
        // with the final multiplications left to the conversion.
        let XX = X.square();
        let YY = Y.square();
        let ZZ2 = Z.square();
        let B = ZZ2 + ZZ2;
        let AA = (X + Y).square();
        let Y3 = YY + XX;
        let Z3 = YY - XX;
        PointCompleted {
            X: AA - Y3,
            Y: Y3,
            Z: Z3,
            T: B - Z3,
        }
    }
}

impl PointCached {

    /// The neutral point, in cached coordinates.
    pub const NEUTRAL: Self = Self {
        YpX: GF25519::ONE,
        YmX: GF25519::ONE,
        Z: GF25519::ONE,
        T2d: GF25519::ZERO,
    };

    /// Conditionally copies the provided point (`P`) into `self`.
    ///
    /// `ctl` MUST be equal to 0x00000000 or 0xFFFFFFFF.
    #[inline]
    pub fn set_cond(&mut self, P: &Self, ctl: u32) {
        self.YpX.set_cond(&P.YpX, ctl);
        self.YmX.set_cond(&P.YmX, ctl);
        self.Z.set_cond(&P.Z, ctl);
        self.T2d.set_cond(&P.T2d, ctl);
    }

    /// Returns the opposite of this point.
    #[inline]
    pub fn neg(&self) -> Self {
        Self {
            YpX: self.YmX,
            YmX: self.YpX,
            Z: self.Z,
            T2d: -self.T2d,
        }
    }

    /// Conditionally negates this point.
    ///
    /// This point is negated if `ctl` = 0xFFFFFFFF, but kept unchanged
    /// if `ctl` = 0x00000000. `ctl` MUST be equal to 0x00000000 or
    /// 0xFFFFFFFF.
    #[inline]
    pub fn set_condneg(&mut self, ctl: u32) {
        let N = self.neg();
        self.set_cond(&N, ctl);
    }
}

define_binop!(Point, Add, add, AddAssign, add_assign, set_add);
define_binop!(Point, Sub, sub, SubAssign, sub_assign, set_sub);
define_neg!(Point);

// ========================================================================

#[cfg(test)]
mod tests {

    use super::{Point, PointCached};
    use crate::field::GF25519;
    use crate::Error;
    use sha2::{Digest, Sha256};

    // For a point P (randomly generated on the curve with Sage),
    // points i*P for i = 0 to 6, encoded.
    const EPP: [[u8; 32]; 7] = [
        [
            0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00
        ],
        [
            0x91, 0x7E, 0x2B, 0x2F, 0xF9, 0xC9, 0x66, 0x45,
            0x1D, 0x28, 0xC9, 0x3E, 0xD4, 0xDE, 0x9A, 0xE9,
            0xCE, 0x2D, 0x67, 0x2C, 0xD3, 0xCF, 0x74, 0x06,
            0xAE, 0x0D, 0x86, 0xC4, 0x21, 0xB9, 0x02, 0xE6
        ],
        [
            0x18, 0x68, 0xD3, 0xEA, 0xE6, 0x62, 0x1B, 0xAF,
            0xD0, 0x4C, 0x2C, 0xEC, 0x8B, 0xA9, 0xEE, 0xF3,
            0x28, 0xCE, 0xC3, 0x07, 0x5A, 0x57, 0xCE, 0x98,
            0x69, 0x83, 0x3C, 0x8A, 0x8E, 0xF2, 0x90, 0xD4
        ],
        [
            0x37, 0x31, 0xAB, 0x10, 0x85, 0x48, 0x38, 0xC7,
            0x2E, 0x2F, 0xCF, 0x29, 0xD9, 0xCD, 0xA0, 0xBD,
            0xC8, 0xAE, 0xD6, 0x70, 0x58, 0x56, 0x6F, 0xAE,
            0xCD, 0x6F, 0xFC, 0xB7, 0x0D, 0x6A, 0xC5, 0x60
        ],
        [
            0x47, 0x18, 0x8B, 0xDD, 0x31, 0xDE, 0x9E, 0x3E,
            0x29, 0x2B, 0x52, 0x6C, 0x50, 0x0A, 0x91, 0x29,
            0x96, 0x9D, 0xAD, 0xE2, 0x6B, 0x13, 0x3A, 0x8E,
            0xAB, 0x55, 0xED, 0xBA, 0xD9, 0x01, 0x34, 0x26
        ],
        [
            0xE4, 0xD0, 0x2A, 0x56, 0x90, 0xE1, 0x86, 0xCD,
            0xEC, 0x21, 0x41, 0xF0, 0x49, 0x4F, 0x19, 0x70,
            0x7C, 0x3B, 0x4D, 0xC0, 0x0E, 0x6B, 0x90, 0x1C,
            0x9D, 0x8E, 0xF0, 0xE2, 0xC6, 0x91, 0x11, 0xD2
        ],
        [
            0x3B, 0x7F, 0xFC, 0x19, 0x3B, 0x7C, 0xC4, 0x58,
            0xDF, 0x56, 0xE3, 0xD8, 0xBB, 0xEC, 0x71, 0x3F,
            0xE9, 0xE3, 0x97, 0xD8, 0x6E, 0x4A, 0x7E, 0x08,
            0x25, 0x1A, 0xCC, 0x29, 0xED, 0x17, 0x88, 0x32
        ],
    ];

    // Check the curve equation on the affine coordinates.
    fn on_curve(P: Point) -> bool {
        let iZ = P.Z.invert();
        let x = P.X * iZ;
        let y = P.Y * iZ;
        let x2 = x.square();
        let y2 = y.square();
        let lhs = y2 - x2;
        let rhs = GF25519::ONE + Point::D * x2 * y2;
        lhs.equals(rhs) == 0xFFFFFFFF
            && (P.X * P.Y).equals(P.T * P.Z) == 0xFFFFFFFF
    }

    #[test]
    fn constants() {
        // d*121666 = -121665
        let a = GF25519::w64le(121666, 0, 0, 0);
        let b = GF25519::w64le(121665, 0, 0, 0);
        assert!((Point::D * a).equals(-b) == 0xFFFFFFFF);
        assert!((Point::D + Point::D).equals(Point::D2) == 0xFFFFFFFF);
        assert!(Point::SQRT_M1.square().equals(-GF25519::ONE) == 0xFFFFFFFF);

        assert!(on_curve(Point::BASE));
        assert!(on_curve(Point::NEUTRAL));
        let mut enc = [0x66u8; 32];
        enc[0] = 0x58;
        assert!(Point::BASE.encode() == enc);
        let P = Point::decode(&enc).unwrap();
        assert!(P.equals(Point::BASE) == 0xFFFFFFFF);
    }

    #[test]
    fn base_arith() {
        let mut PP = [Point::NEUTRAL; 7];
        for i in 0..7 {
            let P = Point::decode(&EPP[i][..]).unwrap();
            assert!(EPP[i] == P.encode());
            assert!(on_curve(P));
            PP[i] = P;
            if i == 0 {
                assert!(P.isneutral() == 0xFFFFFFFF);
            } else {
                assert!(P.isneutral() == 0x00000000);
            }
        }

        let P0 = PP[0];
        let P1 = PP[1];
        let P2 = PP[2];
        let P3 = PP[3];
        let P4 = PP[4];
        let P5 = PP[5];
        let P6 = PP[6];

        for i in 1..7 {
            assert!(PP[i].equals(PP[i - 1]) == 0);
            let Q = PP[i - 1] + PP[1];
            assert!(PP[i].equals(Q) == 0xFFFFFFFF);
            assert!((Q + Point::NEUTRAL).equals(Q) == 0xFFFFFFFF);
            let R = Q + P0;
            assert!(PP[i].equals(R) == 0xFFFFFFFF);
            assert!(P1.mul_small_vartime(i as u64).equals(PP[i]) == 0xFFFFFFFF);
        }

        let Q2 = P1 + P1;
        assert!(Q2.encode() == EPP[2]);
        let R2 = P1.double();
        assert!(R2.encode() == EPP[2]);
        assert!(R2.equals(Q2) == 0xFFFFFFFF);

        let Q3 = P2 + P1;
        assert!(Q3.encode() == EPP[3]);
        let R3 = Q2 + P1;
        assert!(R3.equals(P3) == 0xFFFFFFFF);

        let Q4 = Q2.double();
        assert!(Q4.encode() == EPP[4]);
        let R4 = P1.xdouble(2);
        assert!(R4.equals(P4) == 0xFFFFFFFF);
        let R4 = P1 + Q3;
        assert!(R4.equals(Q4) == 0xFFFFFFFF);

        let Q5 = Q3 + R2;
        assert!(Q5.encode() == EPP[5]);
        let R5 = R3 + Q2;
        assert!(R5.equals(P5) == 0xFFFFFFFF);

        assert!((R5 - Q3).equals(Q2) == 0xFFFFFFFF);
        assert!((P2 - P3).equals(-P1) == 0xFFFFFFFF);
        assert!((P3 + (-P3)).isneutral() == 0xFFFFFFFF);

        let Q6 = Q3.double();
        assert!(Q6.encode() == EPP[6]);
        let R6 = Q2 + Q4;
        assert!(R6.equals(P6) == 0xFFFFFFFF);

        let mut S = P2;
        S += P4;
        S -= P1;
        assert!(S.equals(P5) == 0xFFFFFFFF);
        assert!(P1.xdouble(0).equals(P1) == 0xFFFFFFFF);
        assert!(P1.mul_small_vartime(0).isneutral() == 0xFFFFFFFF);
    }

    #[test]
    fn coordinate_forms() {
        let P1 = Point::decode(&EPP[1]).unwrap();
        let P3 = Point::decode(&EPP[3]).unwrap();
        let P4 = Point::decode(&EPP[4]).unwrap();

        // Completed output converts to the same point through both paths.
        let C = P3.add_cached(&P1.to_cached());
        assert!(C.to_extended().equals(P4) == 0xFFFFFFFF);
        let Q = C.to_projective().double().to_extended();
        assert!(Q.equals(P4.double()) == 0xFFFFFFFF);
        assert!(on_curve(Q));

        let C = P4.sub_cached(&P1.to_cached());
        assert!(C.to_extended().equals(P3) == 0xFFFFFFFF);

        // The cached neutral is the neutral.
        let C = P3.add_cached(&PointCached::NEUTRAL);
        assert!(C.to_extended().equals(P3) == 0xFFFFFFFF);
        let C = P3.add_cached(&Point::NEUTRAL.to_cached());
        assert!(C.to_extended().equals(P3) == 0xFFFFFFFF);

        // Cached negation.
        let N = P1.to_cached().neg();
        assert!(P4.add_cached(&N).to_extended().equals(P3) == 0xFFFFFFFF);
        let mut N = P1.to_cached();
        N.set_condneg(0);
        assert!(P4.add_cached(&N).to_extended().equals(P1 + P4) == 0xFFFFFFFF);
        N.set_condneg(0xFFFFFFFF);
        assert!(P4.add_cached(&N).to_extended().equals(P3) == 0xFFFFFFFF);

        // Conditional moves.
        let mut A = P1.to_cached();
        A.set_cond(&P3.to_cached(), 0);
        assert!(Point::NEUTRAL.add_cached(&A).to_extended().equals(P1)
            == 0xFFFFFFFF);
        A.set_cond(&P3.to_cached(), 0xFFFFFFFF);
        assert!(Point::NEUTRAL.add_cached(&A).to_extended().equals(P3)
            == 0xFFFFFFFF);
        assert!(Point::select(&P1, &P3, 0).equals(P1) == 0xFFFFFFFF);
        assert!(Point::select(&P1, &P3, 0xFFFFFFFF).equals(P3) == 0xFFFFFFFF);
    }

    #[test]
    fn decode_failures() {
        // Wrong lengths.
        assert!(Point::decode(&EPP[1][..31]).is_none());
        assert!(Point::decode_checked(&[0u8; 33]).err()
            == Some(Error::InvalidLength { expected: 32, actual: 33 }));

        // y = p is not canonical.
        let mut buf = [0xFFu8; 32];
        buf[0] = 0xED;
        buf[31] = 0x7F;
        let mut P = Point::BASE;
        assert!(P.set_decode(&buf) == 0);
        assert!(P.isneutral() == 0xFFFFFFFF);
        assert!(Point::decode_checked(&buf).err() == Some(Error::InvalidPoint));
        assert!(Point::decode_checked(&EPP[2]).is_ok());

        // x = 0 with the sign bit set is rejected.
        let mut buf = EPP[0];
        buf[31] |= 0x80;
        assert!(Point::decode(&buf).is_none());

        // y = 2 is not on the curve (u/v = 3/(4d+1) is not a square).
        let mut buf = [0u8; 32];
        buf[0] = 2;
        assert!(Point::decode(&buf).is_none());

        // About half of the random y values are valid; every successful
        // decoding re-encodes to the same bytes.
        let mut sh = Sha256::new();
        let mut ok = 0;
        for i in 0..100u64 {
            sh.update(i.to_le_bytes());
            let v = sh.finalize_reset();
            let mut P = Point::NEUTRAL;
            let r = P.set_decode(&v);
            if r != 0 {
                assert!(r == 0xFFFFFFFF);
                assert!(P.encode()[..] == v[..]);
                assert!(on_curve(P));
                ok += 1;
            } else {
                assert!(P.isneutral() == 0xFFFFFFFF);
            }
        }
        assert!(ok > 20 && ok < 80);
    }
}
