//! Jacobian short-Weierstrass points `(X, Y, Z)`, `x = X/Z^2, y = Y/Z^3`.
//!
//! The classical Jacobian addition law is not complete: it degenerates when
//! the two operands are equal. This module works around that with a fused
//! "add-or-double" routine that computes both branches and selects with
//! `ccopy` rather than branching on the exceptional condition: it runs the
//! generic addition formula
//! (hyperelliptic.org's "add-2007-bl") and the `a = 0` doubling formula
//! ("dbl-2009-l") unconditionally and picks between them based on whether
//! `H = U2 - U1` and `R = S2 - S1` are both zero.
use core::marker::PhantomData;
use field::Field;
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};

use super::affine::Affine;
use super::CurveParams;

/// A Jacobian point. The identity is any point with `Z = 0`.
#[derive(Clone, Copy, Debug)]
pub struct Jacobian<C: CurveParams<N>, const N: usize> {
    /// X coordinate.
    pub x: Field<C::BaseField, N>,
    /// Y coordinate.
    pub y: Field<C::BaseField, N>,
    /// Z coordinate; zero encodes the identity.
    pub z: Field<C::BaseField, N>,
    _curve: PhantomData<C>,
}

impl<C: CurveParams<N>, const N: usize> Jacobian<C, N> {
    /// The point at infinity: `(1, 1, 0)`.
    pub fn identity() -> Self {
        Self::new(Field::one(), Field::one(), Field::ZERO)
    }

    /// Wraps raw coordinates without validation.
    pub const fn new(
        x: Field<C::BaseField, N>,
        y: Field<C::BaseField, N>,
        z: Field<C::BaseField, N>,
    ) -> Self {
        Self {
            x,
            y,
            z,
            _curve: PhantomData,
        }
    }

    /// Lifts an affine point: `Z = 0` for the identity, `Z = 1` otherwise.
    pub fn from_affine(p: &Affine<C, N>) -> Self {
        let is_identity = p.is_identity();
        let z = Field::conditional_select(&Field::one(), &Field::ZERO, is_identity);
        Self::new(p.x, p.y, z)
    }

    /// Constant-time infinity test.
    pub fn is_identity(&self) -> Choice {
        self.z.is_zero()
    }

    /// `-self`.
    pub fn negate(&self) -> Self {
        Self::new(self.x, self.y.negate(), self.z)
    }

    /// `a = 0` doubling ("dbl-2009-l"): 1M (for Z3) + 4S + a handful of adds.
    /// Constant-time even when `self` is the identity (the formula is total;
    /// the result is simply another `Z = 0` point).
    pub fn double(&self) -> Self {
        let (x1, y1, z1) = (self.x, self.y, self.z);

        let a = x1.square();
        let b = y1.square();
        let c = b.square();
        let d = x1.add(&b).square().sub(&a).sub(&c);
        let d = d.double();
        let e = a.double().add(&a); // 3*A (a = 0 term drops out)
        let f = e.square();
        let x3 = f.sub(&d.double());
        let eight_c = c.double().double().double();
        let y3 = e.mul(&d.sub(&x3)).sub(&eight_c);
        let z3 = y1.mul(&z1).double();

        Self::new(x3, y3, z3)
    }

    /// Fused add-or-double: see module docs. `self`/`other` at infinity are
    /// handled by a final `ccopy` from the non-infinity operand.
    pub fn add_or_double(&self, other: &Self) -> Self {
        let (x1, y1, z1) = (self.x, self.y, self.z);
        let (x2, y2, z2) = (other.x, other.y, other.z);

        let z1z1 = z1.square();
        let z2z2 = z2.square();
        let u1 = x1.mul(&z2z2);
        let u2 = x2.mul(&z1z1);
        let s1 = y1.mul(&z2).mul(&z2z2);
        let s2 = y2.mul(&z1).mul(&z1z1);

        let h = u2.sub(&u1);
        let r = s2.sub(&s1);

        let i = h.double().square();
        let j = h.mul(&i);
        let r2 = r.double();
        let v = u1.mul(&i);
        let add_x3 = r2.square().sub(&j).sub(&v.double());
        let add_y3 = r2.mul(&v.sub(&add_x3)).sub(&s1.mul(&j).double());
        let add_z3 = z1.add(&z2).square().sub(&z1z1).sub(&z2z2).mul(&h);

        let add_result = Self::new(add_x3, add_y3, add_z3);
        let double_result = self.double();

        let need_double = h.is_zero() & r.is_zero();
        let mut result = Self::conditional_select(&add_result, &double_result, need_double);

        result = Self::conditional_select(&result, other, self.is_identity());
        result = Self::conditional_select(&result, self, other.is_identity());
        result
    }

    /// Converts to affine. The identity maps to `(0, 0)`.
    pub fn to_affine(&self) -> Affine<C, N> {
        let is_identity = self.is_identity();
        let z_inv = self.z.invert().unwrap_or(Field::ZERO);
        let z_inv2 = z_inv.square();
        let z_inv3 = z_inv2.mul(&z_inv);
        let x = self.x.mul(&z_inv2);
        let y = self.y.mul(&z_inv3);
        Affine::conditional_select(&Affine::new_unchecked(x, y), &Affine::identity(), is_identity)
    }
}

impl<C: CurveParams<N>, const N: usize> PartialEq for Jacobian<C, N> {
    fn eq(&self, other: &Self) -> bool {
        bool::from(self.ct_eq(other))
    }
}
impl<C: CurveParams<N>, const N: usize> Eq for Jacobian<C, N> {}

impl<C: CurveParams<N>, const N: usize> ConstantTimeEq for Jacobian<C, N> {
    /// `X1*Z2^2 == X2*Z1^2 AND Y1*Z2^3 == Y2*Z1^3`.
    fn ct_eq(&self, other: &Self) -> Choice {
        let z1z1 = self.z.square();
        let z2z2 = other.z.square();
        let lhs_x = self.x.mul(&z2z2);
        let rhs_x = other.x.mul(&z1z1);
        let lhs_y = self.y.mul(&z2z2).mul(&other.z);
        let rhs_y = other.y.mul(&z1z1).mul(&self.z);
        lhs_x.ct_eq(&rhs_x) & lhs_y.ct_eq(&rhs_y)
    }
}

impl<C: CurveParams<N>, const N: usize> ConditionallySelectable for Jacobian<C, N> {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Self::new(
            Field::conditional_select(&a.x, &b.x, choice),
            Field::conditional_select(&a.y, &b.y, choice),
            Field::conditional_select(&a.z, &b.z, choice),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::weierstrass::projective::Projective;

    // Re-declared rather than imported from a curves/* crate: this module
    // tests the generic formulas in isolation, with a tiny toy curve.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    struct Toy;

    use bigint::BigInt;
    use field::FieldParams;
    use limbs::Word;

    // A small usable prime for test fixtures: 2^224 - 2^96 + 1 (P-224).
    const TOY_MODULUS_LIMBS: [Word; 4] = [1, 0xffffffff00000000, 0xffffffffffffffff, 0xffffffff];

    impl FieldParams<4> for Toy {
        const MODULUS: BigInt<4> = BigInt::new(TOY_MODULUS_LIMBS);
        const M0INV: Word = bigint::const_derive::compute_m0inv(TOY_MODULUS_LIMBS[0]);
        const R2: BigInt<4> = BigInt::new(bigint::const_derive::compute_r2_mod_m(&TOY_MODULUS_LIMBS));
        const ONE_MONT: BigInt<4> = BigInt::new(bigint::const_derive::compute_r_mod_m(&TOY_MODULUS_LIMBS));
        const NUM_BITS: u32 = 224;
        const TWO_ADICITY: u32 = 1;
        const TRACE: BigInt<4> = BigInt::new([0, 0, 0, 0]);
        const ROOT_OF_UNITY: BigInt<4> = BigInt::new([0, 0, 0, 0]);
        type Repr = [u8; 32];
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    struct ToyCurve;

    impl CurveParams<4> for ToyCurve {
        type BaseField = Toy;
        const EQUATION_B: Field<Toy, 4> = Field::from_montgomery_unchecked(<Toy as FieldParams<4>>::ONE_MONT);
        const EQUATION_B3: Field<Toy, 4> = Field::from_montgomery_unchecked(<Toy as FieldParams<4>>::ONE_MONT);
        const GENERATOR_X: Field<Toy, 4> = Field::from_montgomery_unchecked(BigInt::new([0, 0, 0, 0]));
        const GENERATOR_Y: Field<Toy, 4> = Field::from_montgomery_unchecked(BigInt::new([0, 0, 0, 0]));
        const ORDER_BITS: u32 = 224;
    }

    #[test]
    fn identity_both_infinity_stays_infinity() {
        let inf = Jacobian::<ToyCurve, 4>::identity();
        let result = inf.add_or_double(&inf);
        assert!(bool::from(result.is_identity()));
    }

    #[test]
    fn identity_is_left_and_right_unit() {
        let inf = Jacobian::<ToyCurve, 4>::identity();
        let p = Jacobian::<ToyCurve, 4>::new(Field::one(), Field::one(), Field::one());
        assert_eq!(inf.add_or_double(&p), p);
        assert_eq!(p.add_or_double(&inf), p);
    }

    #[test]
    fn double_matches_self_add() {
        let p = Jacobian::<ToyCurve, 4>::new(Field::one(), Field::one(), Field::one());
        assert_eq!(p.add_or_double(&p), p.double());
    }

    #[test]
    fn projective_identity_roundtrips() {
        let inf = Projective::<ToyCurve, 4>::identity();
        assert!(bool::from(inf.is_identity()));
        assert!(bool::from(inf.to_affine().is_identity()));
    }
}
