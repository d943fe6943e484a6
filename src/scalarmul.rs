//! Constant-time multiplication of an arbitrary point by a scalar.
//!
//! The scalar (a `ScalarBytes`, i.e. an integer lower than 2^255) is
//! recoded into 64 signed digits in -8..+8 (see `ScalarBytes::recode()`).
//! For each call, a table of the cached forms of `1*A` to `8*A` is built
//! from the source point `A`; then the digits are processed from most to
//! least significant: the accumulator is doubled four times, and the table
//! entry for the current digit (or its opposite, or the neutral) is added.
//!
//! Cost is fixed: 7 point additions for the table, then 1 + 63 additions
//! and 252 doublings, and 64 table lookups. Each lookup reads all eight
//! table entries and performs one negation, whatever the digit is.
//!
//! All the state (table, digits, accumulator) is local to the call.

#![allow(non_snake_case)]

use core::ops::{Mul, MulAssign};
use super::ed25519::{Point, PointCached};
use super::scalar::ScalarBytes;
use super::Error;


#[inline(always)]
fn cond_move(P: &mut PointCached, Q: &PointCached, ctl: u32) {
    #[cfg(test)]
    probe::record_condmove();
    P.set_cond(Q, ctl);
}

#[inline(always)]
fn negate(P: &PointCached) -> PointCached {
    #[cfg(test)]
    probe::record_negation();
    P.neg()
}

/// Builds the table of multiples: `win[k]` contains `(k+1)*A`, in
/// cached coordinates.
pub(crate) fn build_table(A: &Point) -> [PointCached; 8] {
    let mut win = [PointCached::NEUTRAL; 8];
    win[0] = A.to_cached();
    for k in 1..8 {
        win[k] = A.add_cached(&win[k - 1]).to_extended().to_cached();
    }
    win
}

/// Lookups a point from the table, with sign handling (constant-time).
///
/// Returned value is `b*A` for the digit `b` (in -8..+8), where `win`
/// was built from `A`; a zero digit yields the neutral.
pub(crate) fn lookup(win: &[PointCached; 8], b: i8) -> PointCached {
    // Split b into its sign (1 for negative, 0 otherwise) and its
    // absolute value.
    let bw = (b as i64) as u64;
    let sign = bw >> 63;
    let f = bw.wrapping_sub((sign.wrapping_neg() & bw) << 1) as u32;

    let mut P = PointCached::NEUTRAL;
    for i in 0..8 {
        // win[i] contains (i+1)*A; we want to keep it if (and only if)
        // i+1 == f.
        // Values a-b and b-a both have their high bit equal to 0 only
        // if a == b.
        let j = (i as u32) + 1;
        let w = !(f.wrapping_sub(j) | j.wrapping_sub(f));
        let w = ((w as i32) >> 31) as u32;
        cond_move(&mut P, &win[i], w);
    }

    // Negate the returned value if needed.
    let N = negate(&P);
    cond_move(&mut P, &N, (sign as u32).wrapping_neg());
    P
}

// Evaluates sum(e[i]*16^i)*A for 64 signed digits in -8..+8.
fn mul_digits(A: &Point, e: &[i8; 64]) -> Point {
    let win = build_table(A);

    // Top digit: the accumulator starts at the neutral, no doubling.
    let mut R = Point::NEUTRAL.add_cached(&lookup(&win, e[63]));

    // Process the remaining digits in high-to-low order. Doublings stay
    // in projective coordinates; only the last one goes to extended
    // coordinates, as needed by the addition.
    for i in (0..63).rev() {
        let mut P = R.to_projective();
        for _ in 0..3 {
            P = P.double().to_projective();
        }
        R = P.double().to_extended().add_cached(&lookup(&win, e[i]));
    }
    R.to_extended()
}

/// Multiplies a point by a scalar given as 32 bytes (unsigned
/// little-endian).
///
/// The scalar must have length exactly 32 bytes and its last byte must
/// not exceed 127; otherwise, an error is returned. These checks are the
/// only variable-time part; the multiplication itself is constant-time
/// with regard to both the point and the scalar value.
pub fn mul(scalar: &[u8], point: &Point) -> Result<Point, Error> {
    let s = ScalarBytes::decode(scalar)?;
    Ok(point.mul_scalar(&s))
}

impl Point {

    /// Multiplies this point by a scalar (in place).
    ///
    /// This operation is constant-time with regard to both the point
    /// and the scalar value. The scalar is used as an integer, without
    /// any modular reduction.
    pub fn set_mul_scalar(&mut self, s: &ScalarBytes) {
        *self = mul_digits(self, &s.recode());
    }

    /// Returns the product of this point by a scalar.
    #[inline]
    pub fn mul_scalar(&self, s: &ScalarBytes) -> Point {
        mul_digits(self, &s.recode())
    }
}

impl Mul<ScalarBytes> for Point {
    type Output = Point;

    #[inline(always)]
    fn mul(self, other: ScalarBytes) -> Point {
        self.mul_scalar(&other)
    }
}

impl Mul<&ScalarBytes> for Point {
    type Output = Point;

    #[inline(always)]
    fn mul(self, other: &ScalarBytes) -> Point {
        self.mul_scalar(other)
    }
}

impl Mul<ScalarBytes> for &Point {
    type Output = Point;

    #[inline(always)]
    fn mul(self, other: ScalarBytes) -> Point {
        self.mul_scalar(&other)
    }
}

impl Mul<&ScalarBytes> for &Point {
    type Output = Point;

    #[inline(always)]
    fn mul(self, other: &ScalarBytes) -> Point {
        self.mul_scalar(other)
    }
}

impl MulAssign<ScalarBytes> for Point {
    #[inline(always)]
    fn mul_assign(&mut self, other: ScalarBytes) {
        self.set_mul_scalar(&other);
    }
}

impl MulAssign<&ScalarBytes> for Point {
    #[inline(always)]
    fn mul_assign(&mut self, other: &ScalarBytes) {
        self.set_mul_scalar(other);
    }
}

impl Mul<Point> for ScalarBytes {
    type Output = Point;

    #[inline(always)]
    fn mul(self, other: Point) -> Point {
        other.mul_scalar(&self)
    }
}

impl Mul<&Point> for ScalarBytes {
    type Output = Point;

    #[inline(always)]
    fn mul(self, other: &Point) -> Point {
        other.mul_scalar(&self)
    }
}

impl Mul<Point> for &ScalarBytes {
    type Output = Point;

    #[inline(always)]
    fn mul(self, other: Point) -> Point {
        other.mul_scalar(self)
    }
}

impl Mul<&Point> for &ScalarBytes {
    type Output = Point;

    #[inline(always)]
    fn mul(self, other: &Point) -> Point {
        other.mul_scalar(self)
    }
}

// ========================================================================
