//! Affine short-Weierstrass points, the compact boundary representation.
use core::marker::PhantomData;
use field::Field;
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq, CtOption};

use super::CurveParams;
use crate::weierstrass::jacobian::Jacobian;
use crate::weierstrass::projective::Projective;
use field::CoreError;

/// An affine short-Weierstrass point `(x, y)`. The identity is encoded as
/// `(0, 0)`, which is never a point on a curve with `b != 0`.
#[derive(Clone, Copy, Debug)]
pub struct Affine<C: CurveParams<N>, const N: usize> {
    /// x-coordinate; `0` in both coordinates signals infinity.
    pub x: Field<C::BaseField, N>,
    /// y-coordinate.
    pub y: Field<C::BaseField, N>,
    _curve: PhantomData<C>,
}

impl<C: CurveParams<N>, const N: usize> Affine<C, N> {
    /// The point at infinity.
    pub const fn identity() -> Self {
        Self {
            x: Field::ZERO,
            y: Field::ZERO,
            _curve: PhantomData,
        }
    }

    /// The curve generator.
    pub fn generator() -> Self {
        Self::new_unchecked(C::GENERATOR_X, C::GENERATOR_Y)
    }

    /// Wraps coordinates without an on-curve check.
    pub fn new_unchecked(x: Field<C::BaseField, N>, y: Field<C::BaseField, N>) -> Self {
        debug_assert!(
            !bool::from(C::EQUATION_B.is_zero()),
            "b = 0 curves are not supported"
        );
        Self {
            x,
            y,
            _curve: PhantomData,
        }
    }

    /// Constant-time infinity test.
    pub fn is_identity(&self) -> Choice {
        self.x.is_zero() & self.y.is_zero()
    }

    /// `-self`.
    pub fn negate(&self) -> Self {
        Self::new_unchecked(self.x, self.y.negate())
    }

    /// Checks `y^2 = x^3 + b` (`a = 0`). Vartime, used only for
    /// deserialization.
    pub fn is_on_curve_vartime(&self) -> bool {
        if bool::from(self.is_identity()) {
            return true;
        }
        let rhs = self.x.square().mul(&self.x).add(&C::EQUATION_B);
        self.y.square() == rhs
    }

    /// Recovers `y` from `x` and a sign bit, rejecting `x` values not on the
    /// curve. Vartime (square root is itself vartime-acceptable here: the
    /// decompressed value is about to be published as a point anyway).
    pub fn decompress_vartime(x: Field<C::BaseField, N>, y_is_odd: bool) -> Result<Self, CoreError> {
        let rhs = x.square().mul(&x).add(&C::EQUATION_B);
        let y = rhs.sqrt();
        if bool::from(y.is_none()) {
            return Err(CoreError::NotOnCurve);
        }
        let mut y = y.unwrap();
        let canon = y.to_canonical();
        let is_odd = bool::from(canon.is_odd());
        if is_odd != y_is_odd {
            y = y.negate();
        }
        Ok(Self::new_unchecked(x, y))
    }

    /// Lifts to projective coordinates (`Z = 1`, or the identity).
    pub fn to_projective(&self) -> Projective<C, N> {
        Projective::from_affine(self)
    }

    /// Lifts to Jacobian coordinates (`Z = 1`, or the identity).
    pub fn to_jacobian(&self) -> Jacobian<C, N> {
        Jacobian::from_affine(self)
    }
}

impl<C: CurveParams<N>, const N: usize> PartialEq for Affine<C, N> {
    fn eq(&self, other: &Self) -> bool {
        bool::from(self.ct_eq(other))
    }
}
impl<C: CurveParams<N>, const N: usize> Eq for Affine<C, N> {}

impl<C: CurveParams<N>, const N: usize> ConstantTimeEq for Affine<C, N> {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.x.ct_eq(&other.x) & self.y.ct_eq(&other.y)
    }
}

impl<C: CurveParams<N>, const N: usize> ConditionallySelectable for Affine<C, N> {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Self::new_unchecked(
            Field::conditional_select(&a.x, &b.x, choice),
            Field::conditional_select(&a.y, &b.y, choice),
        )
    }
}

/// A wrapper signaling whether a decoded point carries the "odd" or "even"
/// sign convention for its `y` coordinate, returned by vartime decompression
/// helpers that need to report both the point and a `CtOption`-style
/// validity flag.
pub fn is_square_candidate<C: CurveParams<N>, const N: usize>(
    x: Field<C::BaseField, N>,
) -> CtOption<Field<C::BaseField, N>> {
    let rhs = x.square().mul(&x).add(&C::EQUATION_B);
    rhs.sqrt()
}
