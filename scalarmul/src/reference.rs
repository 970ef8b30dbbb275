//! Plain constant-time double-and-add scalar multiplication, used as a
//! differential check against the GLV-accelerated path in
//! [`crate::scalar_mul`].
//!
//! Grounded in `primeorder::projective::ProjectivePoint::mul`'s
//! fixed-iteration-count structure, generalized from its internal
//! radix-16 window to a plain bit-at-a-time scan (every bit of `order`'s
//! width is visited regardless of `k`'s value).
use bigint::BigInt;
use curve::weierstrass::affine::Affine;
use curve::weierstrass::jacobian::Jacobian;
use curve::weierstrass::CurveParams;
use subtle::ConditionallySelectable;

/// `[k]P` via a fixed-width constant-time double-and-add.
///
/// Iterates exactly `N * 64` times regardless of `k`, scanning from the most
/// significant bit down.
pub fn scalar_mul<C: CurveParams<N>, const N: usize>(
    p: &Affine<C, N>,
    k: &BigInt<N>,
) -> Jacobian<C, N> {
    let mut acc = Jacobian::identity();
    let base = Jacobian::from_affine(p);

    for i in (0..N * 64).rev() {
        acc = acc.double();
        let added = acc.add_or_double(&base);
        acc = Jacobian::conditional_select(&acc, &added, k.bit(i));
    }

    acc
}

/// `[-k]P`, by negating the result of [`scalar_mul`].
pub fn scalar_mul_neg<C: CurveParams<N>, const N: usize>(
    p: &Affine<C, N>,
    k: &BigInt<N>,
) -> Jacobian<C, N> {
    scalar_mul(p, k).negate()
}
