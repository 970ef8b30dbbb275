//! secp256k1: `y^2 = x^3 + 7` over `GF(p)`, `p = 2^256 - 2^32 - 977`.
//!
//! Montgomery reduction constants (`M0INV`, `R2`, `ONE_MONT`) are derived at
//! compile time via [`bigint::const_derive`] straight from the modulus, so
//! only the modulus itself, the curve coefficient, the generator, and the
//! GLV lattice basis need to be transcribed as literals. The generator and
//! GLV constants below were checked against the curve equation and the
//! decomposition identity `k = k0 + k1*lambda (mod n)` numerically before
//! being committed (see `DESIGN.md`).
#![no_std]
#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

use bigint::const_derive::{compute_m0inv, compute_r2_mod_m, compute_r_mod_m};
use bigint::BigInt;
use curve::weierstrass::{affine, jacobian, projective, CurveParams};
use field::{Field, FieldParams};
use limbs::Word;
use scalarmul::GlvParams;

/// The base field `GF(p)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FpParams;

const P_LIMBS: [Word; 4] = [
    0xfffffffefffffc2f,
    0xffffffffffffffff,
    0xffffffffffffffff,
    0xffffffffffffffff,
];

impl FieldParams<4> for FpParams {
    const MODULUS: BigInt<4> = BigInt::new(P_LIMBS);
    const M0INV: Word = compute_m0inv(P_LIMBS[0]);
    const R2: BigInt<4> = BigInt::new(compute_r2_mod_m(&P_LIMBS));
    const ONE_MONT: BigInt<4> = BigInt::new(compute_r_mod_m(&P_LIMBS));
    const NUM_BITS: u32 = 256;
    const TWO_ADICITY: u32 = 1;
    const TRACE: BigInt<4> = BigInt::new([
        0xffffffff7ffffe17,
        0xffffffffffffffff,
        0xffffffffffffffff,
        0x7fffffffffffffff,
    ]);
    const ROOT_OF_UNITY: BigInt<4> = BigInt::new([0, 0, 0, 0]);
    type Repr = [u8; 32];
}

/// An element of the base field.
pub type Fp = Field<FpParams, 4>;

/// The scalar field `GF(n)`, `n` the group order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrParams;

const N_LIMBS: [Word; 4] = [
    0xbfd25e8cd0364141,
    0xbaaedce6af48a03b,
    0xfffffffffffffffe,
    0xffffffffffffffff,
];

impl FieldParams<4> for FrParams {
    const MODULUS: BigInt<4> = BigInt::new(N_LIMBS);
    const M0INV: Word = compute_m0inv(N_LIMBS[0]);
    const R2: BigInt<4> = BigInt::new(compute_r2_mod_m(&N_LIMBS));
    const ONE_MONT: BigInt<4> = BigInt::new(compute_r_mod_m(&N_LIMBS));
    const NUM_BITS: u32 = 256;
    const TWO_ADICITY: u32 = 1;
    const TRACE: BigInt<4> = BigInt::new([0, 0, 0, 0]);
    const ROOT_OF_UNITY: BigInt<4> = BigInt::new([0, 0, 0, 0]);
    type Repr = [u8; 32];
}

/// An element of the scalar field.
pub type Fr = Field<FrParams, 4>;

/// The secp256k1 curve.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Secp256k1;

impl CurveParams<4> for Secp256k1 {
    type BaseField = FpParams;

    // b = 7, in Montgomery form.
    const EQUATION_B: Fp = Field::from_montgomery_unchecked(BigInt::new([
        0x00000700001ab7,
        0,
        0,
        0,
    ]));
    // 3*b = 21, in Montgomery form.
    const EQUATION_B3: Fp = Field::from_montgomery_unchecked(BigInt::new([
        0x0000001500005025,
        0,
        0,
        0,
    ]));
    const GENERATOR_X: Fp = Field::from_montgomery_unchecked(BigInt::new([
        0xd7362e5a487e2097,
        0x231e295329bc66db,
        0x979f48c033fd129c,
        0x9981e643e9089f48,
    ]));
    const GENERATOR_Y: Fp = Field::from_montgomery_unchecked(BigInt::new([
        0xb15ea6d2d3dbabe2,
        0x8dfc5d5d1f1dc64d,
        0x70b6b59aac19c136,
        0xcf3f851fd4a582d6,
    ]));
    const ORDER_BITS: u32 = 256;
}

/// An affine secp256k1 point.
pub type Affine = affine::Affine<Secp256k1, 4>;
/// A Jacobian secp256k1 point.
pub type Jacobian = jacobian::Jacobian<Secp256k1, 4>;
/// A projective secp256k1 point.
pub type Projective = projective::Projective<Secp256k1, 4>;

impl GlvParams<4> for Secp256k1 {
    type Curve = Secp256k1;

    // beta, a primitive cube root of unity in Fp with beta^3 = 1, in
    // Montgomery form.
    const BETA: Fp = Field::from_montgomery_unchecked(BigInt::new([
        0x58a4361c8e81894e,
        0x03fde1631c4b80af,
        0xf8e98978d02e3905,
        0x7a4a36aebcbb3d53,
    ]));
    const ORDER: BigInt<4> = BigInt::new(N_LIMBS);
    const ORDER_M0INV: Word = compute_m0inv(N_LIMBS[0]);
    const ORDER_R2: BigInt<4> = BigInt::new(compute_r2_mod_m(&N_LIMBS));

    // GLV lattice basis (a1, b1), (a2, b2), reduced into [0, n), found via
    // Gaussian (Lagrange) reduction of the lattice generated by (n, 0) and
    // (-lambda mod n, 1).
    const A1: BigInt<4> = BigInt::new([0xe86c90e49284eb15, 0x3086d221a7d46bcd, 0, 0]);
    const B1: BigInt<4> = BigInt::new([
        0x507ddee3c5765c7e,
        0xd66b5e10ae3a1813,
        0xfffffffffffffffd,
        0xffffffffffffffff,
    ]);
    const A2: BigInt<4> = BigInt::new([0x57c1108d9d44cfd8, 0x14ca50f7a8e2f3f6, 1, 0]);
    const B2: BigInt<4> = BigInt::new([0xe86c90e49284eb15, 0x3086d221a7d46bcd, 0, 0]);

    // Precomputed Babai vectors g1 = round(2^256 * b2 / n), g2 = round(2^256 * (-b1) / n).
    const G1: BigInt<4> = BigInt::new([0xe86c90e49284eb15, 0x3086d221a7d46bcd, 0, 0]);
    const G2: BigInt<4> = BigInt::new([0x6f547fa90abfe4c4, 0xe4437ed6010e8828, 0, 0]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use bigint::BigInt;

    #[test]
    fn generator_is_on_curve() {
        let g = Affine::generator();
        assert!(g.is_on_curve_vartime());
    }

    #[test]
    fn generator_is_not_identity() {
        let g = Affine::generator();
        assert!(!bool::from(g.is_identity()));
    }

    // lambda: the scalar with phi(P) = [lambda]P for every P in the group,
    // i.e. a primitive cube root of unity mod n matching `BETA` mod p.
    const LAMBDA_LIMBS: [Word; 4] = [
        0xdf02967c1b23bd72,
        0x122e22ea20816678,
        0xa5261c028812645a,
        0x5363ad4cc05c30e0,
    ];

    #[test]
    fn endomorphism_matches_lambda_multiplication() {
        let g = Affine::generator();
        let phi_g = scalarmul::glv::endomorphism::<Secp256k1, 4>(&g);
        let lambda = BigInt::<4>::new(LAMBDA_LIMBS);
        let via_scalar = scalarmul::reference::scalar_mul(&g, &lambda).to_affine();
        assert_eq!(phi_g, via_scalar);
    }

    #[test]
    fn glv_scalar_mul_matches_reference() {
        let g = Affine::generator();
        let k = BigInt::<4>::new([0x1234_5678_9abc_def0, 0xdead_beef_cafe_babe, 1, 0]);
        let accelerated = scalarmul::scalar_mul::<Secp256k1, 4>(&g, &k).to_affine();
        let plain = scalarmul::reference::scalar_mul(&g, &k).to_affine();
        assert_eq!(accelerated, plain);
    }

    #[test]
    fn scalar_mul_by_order_is_identity() {
        let g = Affine::generator();
        let order = BigInt::<4>::new(N_LIMBS);
        let result = scalarmul::reference::scalar_mul(&g, &order);
        assert!(bool::from(result.is_identity()));
    }
}
