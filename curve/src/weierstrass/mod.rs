//! Short-Weierstrass curves `y^2 = x^3 + a*x + b`.
//!
//! Every curve supported here has `a = 0` (all of BN254, BLS12-381, and
//! secp256k1 do); the complete addition formulas below are the `a = 0`
//! specialization of Renes-Costello-Batina 2015 Algorithm 7, grounded in
//! `primeorder/src/point_arithmetic.rs`'s `EquationAIsGeneric`/
//! `EquationAIsMinusThree` pair, generalized to the `a = 0` case this
//! workspace's curves actually need.
pub mod affine;
pub mod jacobian;
pub mod projective;

use core::fmt::Debug;
use field::{Field, FieldParams};

/// Compile-time parameters of a short-Weierstrass curve with `a = 0`.
///
/// `EQUATION_B` is asserted non-zero in [`affine::Affine::new_unchecked`],
/// the single constructor every other point-building path (`generator`,
/// `decompress_vartime`, `Projective::to_affine`, `Jacobian::to_affine`)
/// funnels through: the projective complete formula's "does it also work
/// for b = 0" question is left open and this workspace forbids it outright.
pub trait CurveParams<const N: usize>: Copy + Clone + Eq + Debug + 'static {
    /// The base field the curve is defined over.
    type BaseField: FieldParams<N>;

    /// The curve coefficient `b` (Montgomery form).
    const EQUATION_B: Field<Self::BaseField, N>;
    /// `3*b`, precomputed since every addition/doubling formula needs it.
    const EQUATION_B3: Field<Self::BaseField, N>;
    /// Affine x-coordinate of the generator.
    const GENERATOR_X: Field<Self::BaseField, N>;
    /// Affine y-coordinate of the generator.
    const GENERATOR_Y: Field<Self::BaseField, N>;

    /// Order of the prime-order subgroup generated by `GENERATOR`.
    const ORDER_BITS: u32;
}
