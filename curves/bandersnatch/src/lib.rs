//! Bandersnatch: `a*x^2 + y^2 = 1 + d*x^2*y^2` over `GF(q)`, `q` the
//! BLS12-381 scalar field modulus
//! `0x73eda753299d7d483339d80809a1d80553bda402fffe5bfeffffffff00000001`,
//! with `a = -5` and a fixed `d`. Unlike the short-Weierstrass curves in
//! this workspace, Bandersnatch has no published GLV endomorphism basis and
//! so only implements `curve::twisted_edwards::CurveParams`; scalar
//! multiplication is plain double-and-add (`scalarmul::reference` or a
//! curve-specific windowed routine built on top of it), not the GLV path in
//! `scalarmul::glv`.
//!
//! As with the short-Weierstrass curve crates, only the modulus, curve
//! coefficients, and generator are transcribed as literals; Montgomery
//! reduction constants come from [`bigint::const_derive`]. The generator and
//! prime-order subgroup were checked numerically (on-curve, and
//! `[r]G = identity` via explicit point multiplication) before being
//! committed (see `DESIGN.md`).
#![no_std]
#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

use bigint::const_derive::{compute_m0inv, compute_r2_mod_m, compute_r_mod_m};
use bigint::BigInt;
use curve::twisted_edwards::{Affine, CurveParams};
use field::{Field, FieldParams};
use limbs::Word;

/// The base field `GF(q)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FqParams;

const Q_LIMBS: [Word; 4] = [
    0xffffffff00000001,
    0x53bda402fffe5bfe,
    0x3339d80809a1d805,
    0x73eda753299d7d48,
];

impl FieldParams<4> for FqParams {
    const MODULUS: BigInt<4> = BigInt::new(Q_LIMBS);
    const M0INV: Word = compute_m0inv(Q_LIMBS[0]);
    const R2: BigInt<4> = BigInt::new(compute_r2_mod_m(&Q_LIMBS));
    const ONE_MONT: BigInt<4> = BigInt::new(compute_r_mod_m(&Q_LIMBS));
    const NUM_BITS: u32 = 255;
    const TWO_ADICITY: u32 = 32;
    const TRACE: BigInt<4> = BigInt::new([
        0xfffe5bfeffffffff,
        0x09a1d80553bda402,
        0x299d7d483339d808,
        0x0000000073eda753,
    ]);
    const ROOT_OF_UNITY: BigInt<4> = BigInt::new([
        0x9cab6d5c0c17f47c,
        0x1ce1e93dfd4b71e5,
        0x0d6db230471dd505,
        0x3f0ee990743a3b6a,
    ]);
    type Repr = [u8; 32];
}

/// An element of the base field.
pub type Fq = Field<FqParams, 4>;

/// The scalar field `GF(r)`, `r` the prime subgroup order (Bandersnatch has
/// cofactor 4, so `r != q` unlike a prime-order curve).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrParams;

const R_LIMBS: [Word; 4] = [
    0x74fd06b52876e7e1,
    0xff8f870074190471,
    0x0cce760202687600,
    0x1cfb69d4ca675f52,
];

impl FieldParams<4> for FrParams {
    const MODULUS: BigInt<4> = BigInt::new(R_LIMBS);
    const M0INV: Word = compute_m0inv(R_LIMBS[0]);
    const R2: BigInt<4> = BigInt::new(compute_r2_mod_m(&R_LIMBS));
    const ONE_MONT: BigInt<4> = BigInt::new(compute_r_mod_m(&R_LIMBS));
    const NUM_BITS: u32 = 253;
    const TWO_ADICITY: u32 = 5;
    const TRACE: BigInt<4> = BigInt::new([
        0x8ba7e835a943b73f,
        0x07fc7c3803a0c823,
        0x906673b0101343b0,
        0x00e7db4ea6533afa,
    ]);
    const ROOT_OF_UNITY: BigInt<4> = BigInt::new([
        0x4b263b9a8d79c573,
        0xeadb3d0a007af1fd,
        0xa54c8a4668832589,
        0x0610860c4254fb9d,
    ]);
    type Repr = [u8; 32];
}

/// An element of the scalar field.
pub type Fr = Field<FrParams, 4>;

/// The Bandersnatch curve.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bandersnatch;

impl CurveParams<4> for Bandersnatch {
    type BaseField = FqParams;

    // a = -5, in Montgomery form.
    const EQUATION_A: Fq = Field::from_montgomery_unchecked(BigInt::new([
        0xfffffff40000000c,
        0xece3b023ffec4ff3,
        0x66b620607396203f,
        0x6f23d7e5f361df62,
    ]));
    // d, in Montgomery form.
    const EQUATION_D: Fq = Field::from_montgomery_unchecked(BigInt::new([
        0xa8dced1b47a2c730,
        0x381c065aad3cccc7,
        0x53ff52e1188351f8,
        0x362e8d63990fe940,
    ]));
    const GENERATOR_X: Fq = Field::from_montgomery_unchecked(BigInt::new([
        0xec2627e1e7ab47f5,
        0x3e63de484f01aa9c,
        0xfe0f5c3b53946dc4,
        0x2d71920baeb2cfcd,
    ]));
    const GENERATOR_Y: Fq = Field::from_montgomery_unchecked(BigInt::new([
        0x4e30593e1895bd34,
        0x156d738f32afbe4b,
        0x45ef0b1ccdeb75f4,
        0x6a7cca0037d2e71f,
    ]));
}

/// An affine Bandersnatch point.
pub type BandersnatchAffine = Affine<Bandersnatch, 4>;

/// Plain double-and-add scalar multiplication, vartime in the bits of `k`.
///
/// Bandersnatch has no published GLV basis in this workspace, so scalar
/// multiplication on this curve does not go through `scalarmul::glv`; this
/// is the curve-specific analogue of `scalarmul::reference::scalar_mul`
/// adapted to the twisted-Edwards addition law.
pub fn scalar_mul_vartime(p: &BandersnatchAffine, k: &BigInt<4>) -> BandersnatchAffine {
    let mut acc = BandersnatchAffine::identity();
    let bits = k.as_limbs().len() * 64;
    for i in (0..bits).rev() {
        acc = acc.double();
        let limb = k.as_limbs()[i / 64];
        if (limb >> (i % 64)) & 1 == 1 {
            acc = acc.add(p);
        }
    }
    acc
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generator_is_on_curve() {
        let g = BandersnatchAffine::generator();
        assert!(g.is_on_curve_vartime());
    }

    #[test]
    fn generator_is_not_identity() {
        let g = BandersnatchAffine::generator();
        assert!(!bool::from(g.is_identity()));
    }

    #[test]
    fn identity_is_on_curve() {
        let id = BandersnatchAffine::identity();
        assert!(id.is_on_curve_vartime());
    }

    #[test]
    fn doubling_matches_self_addition() {
        let g = BandersnatchAffine::generator();
        assert_eq!(g.double(), g.add(&g));
    }

    #[test]
    fn scalar_mul_by_subgroup_order_is_identity() {
        let g = BandersnatchAffine::generator();
        let order = BigInt::<4>::new(R_LIMBS);
        let result = scalar_mul_vartime(&g, &order);
        assert!(bool::from(result.is_identity()));
    }

    #[test]
    fn decompress_recovers_generator() {
        let g = BandersnatchAffine::generator();
        let x_is_odd = bool::from(g.x.to_canonical().is_odd());
        let recovered = BandersnatchAffine::decompress_vartime(g.y, x_is_odd).unwrap();
        assert_eq!(recovered, g);
    }

    #[test]
    fn addition_is_commutative() {
        let g = BandersnatchAffine::generator();
        let two_g = g.double();
        let three_g_a = two_g.add(&g);
        let three_g_b = g.add(&two_g);
        assert_eq!(three_g_a, three_g_b);
    }
}
