//! Projective short-Weierstrass points `(X, Y, Z)`, `x = X/Z, y = Y/Z`.
//!
//! Addition, doubling, and mixed addition implement the `a = 0`
//! specialization of Renes-Costello-Batina 2015 (Algorithms 7, 9, 8
//! respectively): complete, branch-free, and correct for every input pair
//! including the identity and `P = -Q`. Grounded in the operation-count and
//! structure of `primeorder/src/point_arithmetic.rs::EquationAIsGeneric`,
//! specialized from general `a` down to `a = 0` and re-derived from the
//! paper's published algorithm listing (the teacher's crate never
//! instantiates the `a = 0` branch since none of its curves use it).
use core::marker::PhantomData;
use field::Field;
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};

use super::affine::Affine;
use super::CurveParams;

/// A projective point. The identity is `X = Z = 0`.
#[derive(Clone, Copy, Debug)]
pub struct Projective<C: CurveParams<N>, const N: usize> {
    /// Homogeneous X coordinate.
    pub x: Field<C::BaseField, N>,
    /// Homogeneous Y coordinate.
    pub y: Field<C::BaseField, N>,
    /// Homogeneous Z coordinate.
    pub z: Field<C::BaseField, N>,
    _curve: PhantomData<C>,
}

impl<C: CurveParams<N>, const N: usize> Projective<C, N> {
    /// The point at infinity: `(0, 1, 0)`.
    pub fn identity() -> Self {
        Self::new(Field::ZERO, Field::one(), Field::ZERO)
    }

    /// Wraps raw homogeneous coordinates without any validation.
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
        self.x.is_zero() & self.z.is_zero()
    }

    /// `-self`.
    pub fn negate(&self) -> Self {
        Self::new(self.x, self.y.negate(), self.z)
    }

    /// Complete addition (RCB2015 Algorithm 7, `a = 0`).
    pub fn add(&self, other: &Self) -> Self {
        let (x1, y1, z1) = (self.x, self.y, self.z);
        let (x2, y2, z2) = (other.x, other.y, other.z);
        let b3 = C::EQUATION_B3;

        let t0 = x1.mul(&x2);
        let t1 = y1.mul(&y2);
        let t2 = z1.mul(&z2);
        let t3 = x1.add(&y1).mul(&x2.add(&y2)).sub(&t0.add(&t1));
        let t4 = y1.add(&z1).mul(&y2.add(&z2)).sub(&t1.add(&t2));
        let x3_tmp = x1.add(&z1).mul(&x2.add(&z2)).sub(&t0.add(&t2));
        let x3_double = t0.add(&t0).add(&t0);
        let t2b = b3.mul(&t2);
        let z3 = t1.add(&t2b);
        let t1_sub = t1.sub(&t2b);
        let y3b = b3.mul(&x3_tmp);

        let x3 = t4.mul(&y3b).sub(&t3.mul(&t1_sub));
        let y3 = y3b.mul(&x3_double).add(&t1_sub.mul(&z3));
        let z3 = z3.mul(&t4).add(&x3_double.mul(&t3));

        Self::new(x3, y3, z3)
    }

    /// Mixed addition: `self + Q`, where `Q` is affine (`Z2 = 1` implicit;
    /// RCB2015 Algorithm 8).
    pub fn add_mixed(&self, other: &Affine<C, N>) -> Self {
        let (x1, y1, z1) = (self.x, self.y, self.z);
        let (x2, y2) = (other.x, other.y);
        let b3 = C::EQUATION_B3;

        let t0 = x1.mul(&x2);
        let t1 = y1.mul(&y2);
        let t3 = x2.add(&y2).mul(&x1.add(&y1)).sub(&t0.add(&t1));
        let t4 = y2.mul(&z1).add(&y1);
        let y3b_pre = x2.mul(&z1).add(&x1);
        let x3_double = t0.add(&t0).add(&t0);
        let t2b = b3.mul(&z1);
        let z3 = t1.add(&t2b);
        let t1_sub = t1.sub(&t2b);
        let y3b = b3.mul(&y3b_pre);

        let x3 = t4.mul(&y3b).sub(&t3.mul(&t1_sub));
        let y3 = y3b.mul(&x3_double).add(&t1_sub.mul(&z3));
        let z3 = z3.mul(&t4).add(&x3_double.mul(&t3));

        let result = Self::new(x3, y3, z3);
        // Algorithm 8 assumes Q != O; recover the edge case by ccopy.
        Self::conditional_select(&result, self, other.is_identity())
    }

    /// Complete doubling (RCB2015 Algorithm 9, `a = 0`). Constant-time even
    /// at the identity.
    pub fn double(&self) -> Self {
        let (x, y, z) = (self.x, self.y, self.z);
        let b3 = C::EQUATION_B3;

        let t0 = y.square();
        let z3 = t0.add(&t0);
        let z3 = z3.add(&z3);
        let z3 = z3.add(&z3); // z3 = 8*t0
        let t1 = y.mul(&z);
        let t2 = z.square();
        let t2 = b3.mul(&t2);
        let x3 = t2.mul(&z3);
        let y3 = t0.add(&t2);
        let z3 = t1.mul(&z3);
        let t1_double = t2.add(&t2);
        let t2_triple = t1_double.add(&t2); // 3 * (b3 * Z^2)
        let t0 = t0.sub(&t2_triple);
        let y3 = t0.mul(&y3);
        let y3 = x3.add(&y3);
        let t1 = x.mul(&y);
        let x3 = t0.mul(&t1);
        let x3 = x3.add(&x3);

        Self::new(x3, y3, z3)
    }

    /// Converts to affine. The identity maps to `(0, 0)`.
    pub fn to_affine(&self) -> Affine<C, N> {
        let is_identity = self.is_identity();
        let z_inv = self.z.invert().unwrap_or(Field::ZERO);
        let x = self.x.mul(&z_inv);
        let y = self.y.mul(&z_inv);
        Affine::conditional_select(&Affine::new_unchecked(x, y), &Affine::identity(), is_identity)
    }

    /// Batch-converts many projective points to affine using one inversion
    /// (Montgomery's trick on the Z coordinates), per `spec.md` §4.4's
    /// "for batch conversions, use `batch_inv` on the Z coordinates".
    pub fn batch_to_affine(points: &[Self], out: &mut [Affine<C, N>]) {
        debug_assert_eq!(points.len(), out.len());
        let zs: [Field<C::BaseField, N>; 64] = {
            let mut zs = [Field::ZERO; 64];
            for (i, p) in points.iter().enumerate() {
                // non-identity Z is used for inversion; identity Z (=0) is
                // handled by batch_invert's zero passthrough.
                zs[i] = p.z;
            }
            zs
        };
        let mut inv_zs = [Field::ZERO; 64];
        Field::batch_invert(&zs[..points.len()], &mut inv_zs[..points.len()]);
        for (i, p) in points.iter().enumerate() {
            let is_identity = p.is_identity();
            let x = p.x.mul(&inv_zs[i]);
            let y = p.y.mul(&inv_zs[i]);
            out[i] = Affine::conditional_select(
                &Affine::new_unchecked(x, y),
                &Affine::identity(),
                is_identity,
            );
        }
    }
}

impl<C: CurveParams<N>, const N: usize> PartialEq for Projective<C, N> {
    fn eq(&self, other: &Self) -> bool {
        bool::from(self.ct_eq(other))
    }
}
impl<C: CurveParams<N>, const N: usize> Eq for Projective<C, N> {}

impl<C: CurveParams<N>, const N: usize> ConstantTimeEq for Projective<C, N> {
    /// `X1*Z2 == X2*Z1 AND Y1*Z2 == Y2*Z1`, per `spec.md` §4.4.
    fn ct_eq(&self, other: &Self) -> Choice {
        let lhs_x = self.x.mul(&other.z);
        let rhs_x = other.x.mul(&self.z);
        let lhs_y = self.y.mul(&other.z);
        let rhs_y = other.y.mul(&self.z);
        lhs_x.ct_eq(&rhs_x) & lhs_y.ct_eq(&rhs_y)
    }
}

impl<C: CurveParams<N>, const N: usize> ConditionallySelectable for Projective<C, N> {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Self::new(
            Field::conditional_select(&a.x, &b.x, choice),
            Field::conditional_select(&a.y, &b.y, choice),
            Field::conditional_select(&a.z, &b.z, choice),
        )
    }
}
