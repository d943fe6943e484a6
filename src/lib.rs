//! Edmul is a Rust library for constant-time variable-base scalar
//! multiplication on the twisted Edwards curve edwards25519.
//!
//! The main operation is `scalarmul::mul()` (also available as
//! `Point::mul_scalar()` and through the `*` operator): given a 256-bit
//! scalar `a` and an arbitrary curve point `A`, it computes `a*A` with an
//! execution trace (instructions and memory accesses) that does not depend
//! on the value of `a`. The scalar is recoded into 64 signed base-16
//! digits; a table of the multiples `1*A` to `8*A` is built for each call,
//! and the digits are processed from most to least significant with four
//! doublings and one constant-time table lookup per digit.
//!
//! The scalar is a plain 256-bit integer, not an integer modulo the curve
//! order: the product really is `a*A` for the integer `a`. The only
//! restriction is that the most significant byte of the (little-endian)
//! scalar must not exceed 127; such scalars are rejected when a
//! `ScalarBytes` is built, before any secret-dependent processing.
//!
//! The supporting modules are public as well: the base field GF(2^255-19)
//! is in `field` (with two implementations in `backend`, selected at
//! compile time), and the curve point types with their group law and
//! RFC 8032 encoding are in `ed25519`.
//!
//! # Conventions
//!
//! All implemented functions should be strictly constant-time, unless
//! explicitly documented otherwise (non-constant-time functions normally
//! have "vartime" in their name). In order to avoid unwanted side-channel
//! leaks, Booleans are avoided (compilers tend to "optimize" things a bit
//! too eagerly when handling `bool` values). All functions that return or
//! use a potentially secret Boolean value use the `u32` type; the convention
//! is that 0xFFFFFFFF means "true", and 0x00000000 means "false". No other
//! value shall be used, for they would lead to unpredictable results.
//! Similarly, the `Eq` or `PartialEq` traits are not implemented on field
//! elements and points.
//!
//! Algebraic operations on field elements and curve points are performed
//! with the usual operators (e.g. `+`); appropriate traits are defined
//! so that structure types and pointers to structure types can be used
//! more or less interchangeably. Functions that modify the object on
//! which they are called have a name in `set_*()` (e.g. for a point `P`,
//! `P.set_mul_scalar(&s)` modifies `P` in place, while `P.mul_scalar(&s)`
//! leaves `P` unmodified and returns the product).
//!
//! Functions that validate public input (lengths, scalar range, point
//! decoding where the caller branches on the outcome anyway) return a
//! `Result` with the crate `Error` type; rejected inputs are reported
//! through the `log` facade at debug level. Nothing below that boundary
//! returns a `Result` or logs.

// Operator traits on a type implementing the core operation as an
// in-place `set_*()` method: all value/reference combinations, and the
// compound assignment forms.
macro_rules! define_binop {
    ($t:ty, $tr:ident, $fname:ident, $asg:ident, $aname:ident, $core:ident) => {
        impl $tr<$t> for $t {
            type Output = $t;

            #[inline(always)]
            fn $fname(self, other: $t) -> $t {
                let mut r = self;
                r.$core(&other);
                r
            }
        }

        impl $tr<&$t> for $t {
            type Output = $t;

            #[inline(always)]
            fn $fname(self, other: &$t) -> $t {
                let mut r = self;
                r.$core(other);
                r
            }
        }

        impl $tr<$t> for &$t {
            type Output = $t;

            #[inline(always)]
            fn $fname(self, other: $t) -> $t {
                let mut r = *self;
                r.$core(&other);
                r
            }
        }

        impl $tr<&$t> for &$t {
            type Output = $t;

            #[inline(always)]
            fn $fname(self, other: &$t) -> $t {
                let mut r = *self;
                r.$core(other);
                r
            }
        }

        impl $asg<$t> for $t {
            #[inline(always)]
            fn $aname(&mut self, other: $t) {
                self.$core(&other);
            }
        }

        impl $asg<&$t> for $t {
            #[inline(always)]
            fn $aname(&mut self, other: &$t) {
                self.$core(other);
            }
        }
    };
}

// Unary negation through an in-place `set_neg()`.
macro_rules! define_neg {
    ($t:ty) => {
        impl Neg for $t {
            type Output = $t;

            #[inline(always)]
            fn neg(self) -> $t {
                let mut r = self;
                r.set_neg();
                r
            }
        }

        impl Neg for &$t {
            type Output = $t;

            #[inline(always)]
            fn neg(self) -> $t {
                let mut r = *self;
                r.set_neg();
                r
            }
        }
    };
}

pub mod backend;
pub mod field;
pub mod ed25519;
pub mod scalar;
pub mod scalarmul;

mod error;

pub use error::Error;
pub use ed25519::Point;
pub use scalar::ScalarBytes;
pub use rand_core::{CryptoRng, RngCore, Error as RngError};
