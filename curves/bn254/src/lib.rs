//! BN254 (a.k.a. `alt_bn128`): `y^2 = x^3 + 3` over `GF(p)`,
//! `p = 21888242871839275222246405745257275088696311157297823662689037894645226208583`.
//!
//! As with `secp256k1-curve`, only the modulus, curve coefficient, generator,
//! and GLV lattice basis are transcribed as literals; Montgomery reduction
//! constants come from [`bigint::const_derive`]. The generator, endomorphism,
//! and lattice constants were checked numerically (on-curve, `beta^3 = 1 mod
//! p`, `phi(G) = [lambda]G`, and a decomposition round-trip across random
//! scalars) before being committed (see `DESIGN.md`).
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
    0x3c208c16d87cfd47,
    0x97816a916871ca8d,
    0xb85045b68181585d,
    0x30644e72e131a029,
];

impl FieldParams<4> for FpParams {
    const MODULUS: BigInt<4> = BigInt::new(P_LIMBS);
    const M0INV: Word = compute_m0inv(P_LIMBS[0]);
    const R2: BigInt<4> = BigInt::new(compute_r2_mod_m(&P_LIMBS));
    const ONE_MONT: BigInt<4> = BigInt::new(compute_r_mod_m(&P_LIMBS));
    const NUM_BITS: u32 = 254;
    const TWO_ADICITY: u32 = 1;
    const TRACE: BigInt<4> = BigInt::new([
        0x9e10460b6c3e7ea3,
        0xcbc0b548b438e546,
        0xdc2822db40c0ac2e,
        0x183227397098d014,
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
    0x43e1f593f0000001,
    0x2833e84879b97091,
    0xb85045b68181585d,
    0x30644e72e131a029,
];

impl FieldParams<4> for FrParams {
    const MODULUS: BigInt<4> = BigInt::new(N_LIMBS);
    const M0INV: Word = compute_m0inv(N_LIMBS[0]);
    const R2: BigInt<4> = BigInt::new(compute_r2_mod_m(&N_LIMBS));
    const ONE_MONT: BigInt<4> = BigInt::new(compute_r_mod_m(&N_LIMBS));
    const NUM_BITS: u32 = 254;
    const TWO_ADICITY: u32 = 28;
    const TRACE: BigInt<4> = BigInt::new([
        0x9b9709143e1f593f,
        0x181585d2833e8487,
        0x131a029b85045b68,
        0x30644e72e,
    ]);
    const ROOT_OF_UNITY: BigInt<4> = BigInt::new([
        0x636e735580d13d9c,
        0xa22bf3742445ffd6,
        0x56452ac01eb203d8,
        0x1860ef942963f9e7,
    ]);
    type Repr = [u8; 32];
}

/// An element of the scalar field.
pub type Fr = Field<FrParams, 4>;

/// The BN254 G1 curve.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bn254;

impl CurveParams<4> for Bn254 {
    type BaseField = FpParams;

    // b = 3, in Montgomery form.
    const EQUATION_B: Fp = Field::from_montgomery_unchecked(BigInt::new([
        0x7a17caa950ad28d7,
        0x1f6ac17ae15521b9,
        0x334bea4e696bd284,
        0x2a1f6744ce179d8e,
    ]));
    // 3*b = 9, in Montgomery form.
    const EQUATION_B3: Fp = Field::from_montgomery_unchecked(BigInt::new([
        0xf60647ce410d7ff7,
        0x2f3d6f4dd31bd011,
        0x2943337e3940c6d1,
        0x1d9598e8a7e39857,
    ]));
    // Gx = 1, in Montgomery form.
    const GENERATOR_X: Fp = Field::from_montgomery_unchecked(BigInt::new([
        0xd35d438dc58f0d9d,
        0x0a78eb28f5c70b3d,
        0x666ea36f7879462c,
        0x0e0a77c19a07df2f,
    ]));
    // Gy = 2, in Montgomery form.
    const GENERATOR_Y: Fp = Field::from_montgomery_unchecked(BigInt::new([
        0xa6ba871b8b1e1b3a,
        0x14f1d651eb8e167b,
        0xccdd46def0f28c58,
        0x1c14ef83340fbe5e,
    ]));
    const ORDER_BITS: u32 = 254;
}

/// An affine BN254 G1 point.
pub type Affine = affine::Affine<Bn254, 4>;
/// A Jacobian BN254 G1 point.
pub type Jacobian = jacobian::Jacobian<Bn254, 4>;
/// A projective BN254 G1 point.
pub type Projective = projective::Projective<Bn254, 4>;

impl GlvParams<4> for Bn254 {
    type Curve = Bn254;

    // beta, a primitive cube root of unity in Fp with beta^3 = 1, in
    // Montgomery form.
    const BETA: Fp = Field::from_montgomery_unchecked(BigInt::new([
        0x3350c88e13e80b9c,
        0x7dce557cdb5e56b9,
        0x6001b4b8b615564a,
        0x2682e617020217e0,
    ]));
    const ORDER: BigInt<4> = BigInt::new(N_LIMBS);
    const ORDER_M0INV: Word = compute_m0inv(N_LIMBS[0]);
    const ORDER_R2: BigInt<4> = BigInt::new(compute_r2_mod_m(&N_LIMBS));

    // GLV lattice basis (a1, b1), (a2, b2), reduced into [0, n), found via
    // Gaussian (Lagrange) reduction of the lattice generated by (n, 0) and
    // (-lambda mod n, 1).
    const A1: BigInt<4> = BigInt::new([0x8211bbeb7d4f1128, 0x6f4d8248eeb859fc, 0, 0]);
    const B1: BigInt<4> = BigInt::new([
        0xba0ed02b5b2dec1e,
        0x2833e84879b97090,
        0xb85045b68181585d,
        0x30644e72e131a029,
    ]);
    const A2: BigInt<4> = BigInt::new([0x89d3256894d213e3, 0, 0, 0]);
    const B2: BigInt<4> = BigInt::new([0x0be4e1541221250b, 0x6f4d8248eeb859fd, 0, 0]);

    // Precomputed Babai vectors g1 = round(2^256 * b2 / n), g2 = round(2^256 * (-b1) / n).
    const G1: BigInt<4> = BigInt::new([0x5398fd0300ff6565, 0x4ccef014a773d2d2, 0x2, 0]);
    const G2: BigInt<4> = BigInt::new([0xd91d232ec7e0b3d7, 0x2, 0, 0]);
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
        0xb8ca0b2d36636f23,
        0xcc37a73fec2bc5e9,
        0x048b6e193fd84104,
        0x30644e72e131a029,
    ];

    #[test]
    fn endomorphism_matches_lambda_multiplication() {
        let g = Affine::generator();
        let phi_g = scalarmul::glv::endomorphism::<Bn254, 4>(&g);
        let lambda = BigInt::<4>::new(LAMBDA_LIMBS);
        let via_scalar = scalarmul::reference::scalar_mul(&g, &lambda).to_affine();
        assert_eq!(phi_g, via_scalar);
    }

    #[test]
    fn glv_scalar_mul_matches_reference() {
        let g = Affine::generator();
        let k = BigInt::<4>::new([0x1234_5678_9abc_def0, 0xdead_beef_cafe_babe, 1, 0]);
        let accelerated = scalarmul::scalar_mul::<Bn254, 4>(&g, &k).to_affine();
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

    // A fixed scalar's GLV decomposition, computed independently before
    // being hardcoded as a known-answer test.
    #[test]
    fn glv_decomposition_known_answer() {
        let k = BigInt::<4>::new([
            0x6f0ae08f8229b3f3,
            0x373aebf920265c69,
            0xf0018c95d7fab106,
            0x24a0b87203c7a8de,
        ]);
        let decomposed = scalarmul::glv::decompose::<Bn254, 4>(&k);
        assert_eq!(
            decomposed.k1,
            BigInt::<4>::new([0x844b901de6f41660, 0x13a2f911eb48a578, 0, 0])
        );
        assert!(!decomposed.k1_neg);
        assert!(bool::from(decomposed.column0_was_evened));
        let k0_before_evening = bigint::sub_mod(
            &decomposed.k0,
            &BigInt::<4>::new([1, 0, 0, 0]),
            &<Bn254 as scalarmul::GlvParams<4>>::ORDER,
        );
        assert_eq!(
            k0_before_evening,
            BigInt::<4>::new([0xcc9a25d0d953dbfe, 0x14928105460c820c, 0, 0])
        );
        assert!(!decomposed.k0_neg);
    }

    // Regression: negating zero must leave the stored representation all-zero,
    // not the modulus.
    #[test]
    fn negate_zero_regression() {
        let neg_zero = Fp::ZERO.negate();
        assert_eq!(neg_zero, Fp::ZERO);
        assert!(bool::from(neg_zero.is_zero()));
        assert_eq!(neg_zero.to_canonical(), BigInt::<4>::ZERO);
    }
}
