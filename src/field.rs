//! The base field GF(2^255 - 19).
//!
//! `GF25519` is provided by the backend selected at compile time (see
//! `crate::backend`); this module adds the operations that do not depend
//! on the internal representation: exponentiation chains, comparisons,
//! constant-time selection, and the arithmetic operators.
//!
//! All operations are constant-time, except when explicitly documented.
//! Boolean results use the `u32` convention of this crate: 0xFFFFFFFF for
//! true, 0x00000000 for false.

use core::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

pub use crate::backend::GF25519;

impl GF25519 {

    /// Select `a0` (if `ctl` is 0x00000000) or `a1` (if `ctl` is
    /// 0xFFFFFFFF). `ctl` MUST be 0x00000000 or 0xFFFFFFFF.
    #[inline]
    pub fn select(a0: &Self, a1: &Self, ctl: u32) -> Self {
        let mut r = *a0;
        r.set_cond(a1, ctl);
        r
    }

    /// Return the square of this value.
    #[inline(always)]
    pub fn square(self) -> Self {
        let mut r = self;
        r.set_square();
        r
    }

    // Square this value n times (in place).
    #[inline(always)]
    fn set_xsquare(&mut self, n: u32) {
        for _ in 0..n {
            self.set_square();
        }
    }

    /// Return this value squared `n` times (i.e. raised to 2^n).
    #[inline(always)]
    pub fn xsquare(self, n: u32) -> Self {
        let mut r = self;
        r.set_xsquare(n);
        r
    }

    // Compute self^(2^250 - 1) and self^11; both are shared by inversion
    // and by the (p-5)/8 exponentiation.
    fn pow_2_250_1(self) -> (Self, Self) {
        let z = self;
        let z2 = z.square();
        let z9 = z2.xsquare(2) * z;
        let z11 = z9 * z2;
        let z_5_0 = z11.square() * z9;
        let z_10_0 = z_5_0.xsquare(5) * z_5_0;
        let z_20_0 = z_10_0.xsquare(10) * z_10_0;
        let z_40_0 = z_20_0.xsquare(20) * z_20_0;
        let z_50_0 = z_40_0.xsquare(10) * z_10_0;
        let z_100_0 = z_50_0.xsquare(50) * z_50_0;
        let z_200_0 = z_100_0.xsquare(100) * z_100_0;
        let z_250_0 = z_200_0.xsquare(50) * z_50_0;
        (z_250_0, z11)
    }

    /// Invert this value (in place). If the value is zero, then it
    /// remains zero.
    pub fn set_invert(&mut self) {
        // Fermat: x^(p-2) = x^(2^255 - 21)
        let (t, z11) = self.pow_2_250_1();
        *self = t.xsquare(5) * z11;
    }

    /// Return the inverse of this value; zero yields zero.
    #[inline]
    pub fn invert(self) -> Self {
        let mut r = self;
        r.set_invert();
        r
    }

    /// Return this value raised to (p-5)/8 = 2^252 - 3. This is the
    /// exponent used to extract square roots in point decoding.
    pub fn pow_p58(self) -> Self {
        let (t, _) = self.pow_2_250_1();
        t.xsquare(2) * self
    }

    /// Compare this value with another; returned value is 0xFFFFFFFF
    /// if both are equal, 0x00000000 otherwise.
    #[inline]
    pub fn equals(self, rhs: Self) -> u32 {
        (self - rhs).iszero()
    }
}

define_binop!(GF25519, Add, add, AddAssign, add_assign, set_add);
define_binop!(GF25519, Sub, sub, SubAssign, sub_assign, set_sub);
define_binop!(GF25519, Mul, mul, MulAssign, mul_assign, set_mul);
define_neg!(GF25519);

// ========================================================================
