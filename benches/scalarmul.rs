#![allow(non_snake_case)]

mod util;
use util::{core_cycles, median};

use edmul::field::GF25519;
use edmul::{Point, ScalarBytes};

// Seed a scalar from the cycle counter, so that the compiler cannot
// precompute anything.
fn seed_scalar() -> ScalarBytes {
    let z = core_cycles();
    let mut seed = [0u8; 32];
    seed[ 0.. 8].copy_from_slice(&z.to_le_bytes());
    seed[ 8..16].copy_from_slice(&z.to_le_bytes());
    seed[16..24].copy_from_slice(&z.to_le_bytes());
    seed[24..32].copy_from_slice(&z.to_le_bytes());
    ScalarBytes::clamp(seed)
}

fn bench_gf25519_mul() -> (f64, u8) {
    let z = core_cycles();
    let mut x = GF25519::w64le(z, z.wrapping_mul(3),
        z.wrapping_mul(5), z.wrapping_mul(7));
    let mut y = x + GF25519::ONE;
    let mut tt = [0; 10];
    for i in 0..10 {
        let begin = core_cycles();
        for _ in 0..1000 {
            x *= y;
            y *= x;
            x *= y;
            y *= x;
            x *= y;
            y *= x;
        }
        let end = core_cycles();
        tt[i] = end.wrapping_sub(begin);
    }
    (median(&mut tt, 6000), x.encode32()[0])
}

fn bench_gf25519_square() -> (f64, u8) {
    let z = core_cycles();
    let mut x = GF25519::w64le(z, z.wrapping_mul(3),
        z.wrapping_mul(5), z.wrapping_mul(7));
    let mut tt = [0; 10];
    for i in 0..10 {
        let begin = core_cycles();
        x = x.xsquare(6000);
        let end = core_cycles();
        tt[i] = end.wrapping_sub(begin);
    }
    (median(&mut tt, 6000), x.encode32()[0])
}

fn bench_gf25519_invert() -> (f64, u8) {
    let z = core_cycles();
    let mut x = GF25519::w64le(z, z.wrapping_mul(3),
        z.wrapping_mul(5), z.wrapping_mul(7));
    let mut tt = [0; 10];
    for i in 0..10 {
        let begin = core_cycles();
        for _ in 0..100 {
            x = x.invert() + GF25519::ONE;
        }
        let end = core_cycles();
        tt[i] = end.wrapping_sub(begin);
    }
    (median(&mut tt, 100), x.encode32()[0])
}

fn bench_recode() -> (f64, u8) {
    let mut s = seed_scalar();
    let mut tt = [0; 100];
    let mut acc = 0i8;
    for i in 0..tt.len() {
        let begin = core_cycles();
        for _ in 0..100 {
            let e = s.recode();
            acc = acc.wrapping_add(e[5]);
            let mut b = s.encode();
            b[0] ^= e[0] as u8;
            s = ScalarBytes::clamp(b);
        }
        let end = core_cycles();
        tt[i] = end.wrapping_sub(begin);
    }
    (median(&mut tt, 100), acc as u8)
}

fn bench_mul() -> (f64, u8) {
    let s = seed_scalar();
    let mut P = Point::BASE * s;
    let mut tt = [0; 100];
    for i in 0..tt.len() {
        let begin = core_cycles();
        for _ in 0..10 {
            P *= s;
        }
        let end = core_cycles();
        tt[i] = end.wrapping_sub(begin);
    }
    (median(&mut tt, 10), P.encode()[0])
}

fn bench_decode() -> (f64, u8) {
    let mut buf = (Point::BASE * seed_scalar()).encode();
    let mut P = Point::NEUTRAL;
    let mut tt = [0; 10];
    for i in 0..10 {
        let begin = core_cycles();
        for _ in 0..100 {
            let r = P.set_decode(&buf);
            buf[0] = buf[0].wrapping_add(1);
            buf[1] = buf[1].wrapping_add(r as u8);
        }
        let end = core_cycles();
        tt[i] = end.wrapping_sub(begin);
    }
    (median(&mut tt, 100), buf[0])
}

fn bench_encode() -> (f64, u8) {
    let mut P = Point::BASE * seed_scalar();
    let mut tt = [0; 10];
    for i in 0..10 {
        let begin = core_cycles();
        for _ in 0..100 {
            let x = P.encode()[0];
            if x & 1 == 0 {
                P = -P;
            }
        }
        let end = core_cycles();
        tt[i] = end.wrapping_sub(begin);
    }
    (median(&mut tt, 100), P.encode()[0])
}

fn main() {
    let mut bx = 0u8;

    let (v, x) = bench_gf25519_mul();
    bx ^= x;
    println!("GF25519 mul:          {:11.2}", v);
    let (v, x) = bench_gf25519_square();
    bx ^= x;
    println!("GF25519 square:       {:11.2}", v);
    let (v, x) = bench_gf25519_invert();
    bx ^= x;
    println!("GF25519 invert:       {:11.2}", v);
    let (v, x) = bench_recode();
    bx ^= x;
    println!("Scalar recode:        {:11.2}", v);
    let (v, x) = bench_decode();
    bx ^= x;
    println!("Ed25519 decode:       {:11.2}", v);
    let (v, x) = bench_encode();
    bx ^= x;
    println!("Ed25519 encode:       {:11.2}", v);
    let (v, x) = bench_mul();
    bx ^= x;
    println!("Ed25519 mul:          {:11.2}", v);

    println!("{}", bx);
}
