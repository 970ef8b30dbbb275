//! Endomorphism-accelerated constant-time scalar multiplication.
//!
//! Implements the `M = 2` GLV case (the endomorphism `phi(x, y) = (beta*x, y)`
//! on G1 of BN/BLS-family curves, and on secp256k1) concretely; the `M = 4`
//! GLV+GLS case used on G2 needs the same recoding and table-lookup
//! machinery with a wider lattice basis, and is left as a documented scope
//! decision (see `DESIGN.md`) rather than a silent omission.
//!
//! Grounded in `k256/src/arithmetic/mul.rs`'s `decompose_scalar`
//! (Babai-rounded lattice reduction against precomputed basis constants) and
//! `LookupTable::select` (branchless `ct_eq`-gated scan), generalized from
//! k256's ad hoc radix-16 windowing to the sign-aligned-column recoding of
//! Faz-Hernandez et al. 2013.
#![no_std]
#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

pub mod glv;
pub mod reference;
pub mod sac;

use bigint::BigInt;
use curve::weierstrass::affine::Affine;
use curve::weierstrass::jacobian::Jacobian;
use subtle::{Choice, ConditionallySelectable};

pub use glv::GlvParams;

/// `[k]P` via GLV decomposition, sign-aligned-column recoding, and a
/// branchless 2-entry table lookup. Execution profile depends only on
/// `bits(order)`, never on `k`.
pub fn scalar_mul<G: GlvParams<N>, const N: usize>(
    p: &Affine<G::Curve, N>,
    k: &BigInt<N>,
) -> Jacobian<G::Curve, N> {
    let decomposed = glv::decompose::<G, N>(k);

    // Fold each mini-scalar's overall sign into its table basis point, so
    // the recoding loop only ever has to apply the per-column SAC digit
    // sign, not a separate global correction per mini-scalar.
    let mut p_signed = *p;
    p_signed.cneg(Choice::from(decomposed.k0_neg as u8));
    let mut phi_p_signed = glv::endomorphism::<G, N>(p);
    phi_p_signed.cneg(Choice::from(decomposed.k1_neg as u8));

    let recoded = sac::recode::<N>(&decomposed);
    let table = build_table(&p_signed, &phi_p_signed);

    let l = recoded.len();
    let mut q = secret_lookup(&table, recoded.column_index(l - 1));
    q.cneg(recoded.sign_bit(l - 1));

    let mut q = Jacobian::from_affine(&q);
    for i in (0..l - 1).rev() {
        q = q.double();
        let mut tmp = secret_lookup(&table, recoded.column_index(i));
        tmp.cneg(recoded.sign_bit(i));
        q = q.add_or_double(&Jacobian::from_affine(&tmp));
    }

    // `decompose` evens an odd-forced `k0` by adding 1 whenever the true
    // `k0` was even, since the recoding requires `k0` odd; undo that here by
    // conditionally subtracting the (sign-corrected) `P` back out.
    let correction = Jacobian::from_affine(&p_signed);
    let corrected = q.add_or_double(&correction.negate());
    Jacobian::conditional_select(&q, &corrected, decomposed.column0_was_evened)
}

/// Builds the `2^(M-1) = 2`-entry table: `{P, P + phi(P)}`.
fn build_table<C: curve::weierstrass::CurveParams<N>, const N: usize>(
    p: &Affine<C, N>,
    phi_p: &Affine<C, N>,
) -> [Affine<C, N>; 2] {
    let sum = Jacobian::from_affine(p)
        .add_or_double(&Jacobian::from_affine(phi_p))
        .to_affine();
    [*p, sum]
}

/// Scans every table entry and `ccopy`s the matching one, so the access
/// pattern never depends on `index`.
fn secret_lookup<C: curve::weierstrass::CurveParams<N>, const N: usize>(
    table: &[Affine<C, N>; 2],
    index: usize,
) -> Affine<C, N> {
    let mut result = Affine::identity();
    for (i, entry) in table.iter().enumerate() {
        result = Affine::conditional_select(&result, entry, Choice::from((i == index) as u8));
    }
    result
}

trait AffineCnegExt<C: curve::weierstrass::CurveParams<N>, const N: usize> {
    fn cneg(&mut self, choice: Choice);
}

impl<C: curve::weierstrass::CurveParams<N>, const N: usize> AffineCnegExt<C, N> for Affine<C, N> {
    fn cneg(&mut self, choice: Choice) {
        *self = Affine::conditional_select(self, &self.negate(), choice);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bigint::const_derive::{compute_m0inv, compute_r2_mod_m, compute_r_mod_m};
    use curve::weierstrass::CurveParams as WeierstrassCurveParams;
    use field::{Field, FieldParams};
    use limbs::Word;

    // Exercises `reference::scalar_mul` in isolation: these formulas are
    // purely algebraic, so the group-law identities below hold for any
    // field/curve parameter set, not only ones satisfying a real on-curve
    // relation. Differential tests against concrete published GLV constants
    // (lambda, beta, lattice basis) live in the `curves/*` crates, since
    // hand-deriving a faithful toy endomorphism here without a compiler to
    // check it would be its own source of error.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    struct Toy;

    const TOY_MODULUS_LIMBS: [Word; 4] = [1, 0xffffffff00000000, 0xffffffffffffffff, 0xffffffff];

    impl FieldParams<4> for Toy {
        const MODULUS: BigInt<4> = BigInt::new(TOY_MODULUS_LIMBS);
        const M0INV: Word = compute_m0inv(TOY_MODULUS_LIMBS[0]);
        const R2: BigInt<4> = BigInt::new(compute_r2_mod_m(&TOY_MODULUS_LIMBS));
        const ONE_MONT: BigInt<4> = BigInt::new(compute_r_mod_m(&TOY_MODULUS_LIMBS));
        const NUM_BITS: u32 = 224;
        const TWO_ADICITY: u32 = 1;
        const TRACE: BigInt<4> = BigInt::new([0, 0, 0, 0]);
        const ROOT_OF_UNITY: BigInt<4> = BigInt::new([0, 0, 0, 0]);
        type Repr = [u8; 32];
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    struct ToyCurve;

    impl WeierstrassCurveParams<4> for ToyCurve {
        type BaseField = Toy;
        const EQUATION_B: Field<Toy, 4> = Field::from_montgomery_unchecked(<Toy as FieldParams<4>>::ONE_MONT);
        const EQUATION_B3: Field<Toy, 4> = Field::from_montgomery_unchecked(<Toy as FieldParams<4>>::ONE_MONT);
        const GENERATOR_X: Field<Toy, 4> = Field::ZERO;
        const GENERATOR_Y: Field<Toy, 4> = Field::ZERO;
        const ORDER_BITS: u32 = 224;
    }

    fn small_scalar(v: u64) -> BigInt<4> {
        BigInt::new([v, 0, 0, 0])
    }

    fn toy_point() -> Affine<ToyCurve, 4> {
        Affine::new_unchecked(Field::one(), Field::one())
    }

    #[test]
    fn reference_scalar_mul_zero_is_identity() {
        let p = toy_point();
        let q = reference::scalar_mul(&p, &BigInt::<4>::ZERO);
        assert!(bool::from(q.is_identity()));
    }

    #[test]
    fn reference_scalar_mul_one_is_self() {
        let p = toy_point();
        let q = reference::scalar_mul(&p, &small_scalar(1));
        assert_eq!(q, Jacobian::from_affine(&p));
    }

    #[test]
    fn reference_scalar_mul_two_matches_double() {
        let p = toy_point();
        let q = reference::scalar_mul(&p, &small_scalar(2));
        assert_eq!(q, Jacobian::from_affine(&p).double());
    }

    #[test]
    fn reference_scalar_mul_distributes_over_addition() {
        let p = toy_point();
        let lhs = reference::scalar_mul(&p, &small_scalar(8));
        let a = reference::scalar_mul(&p, &small_scalar(3));
        let b = reference::scalar_mul(&p, &small_scalar(5));
        assert_eq!(lhs, a.add_or_double(&b));
    }

    #[test]
    fn reference_scalar_mul_neg_is_additive_inverse() {
        let p = toy_point();
        let q = reference::scalar_mul(&p, &small_scalar(7));
        let neg_q = reference::scalar_mul_neg(&p, &small_scalar(7));
        assert!(bool::from(q.add_or_double(&neg_q).is_identity()));
    }
}
