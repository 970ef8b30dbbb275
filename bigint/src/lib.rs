//! Fixed-width modular big integers over [`limbs`].
//!
//! This layer gives the limb arrays from `limbs` modular semantics: addition
//! and subtraction modulo a statically-known prime `M`, Montgomery
//! multiplication/reduction, and constant-time inversion. Every routine here
//! is generic over the modulus — callers pass `M` (and, for Montgomery
//! operations, the precomputed `m0inv = -M^{-1} mod 2^64`) explicitly, the
//! way `field_montgomery.rs`'s `montgomery_mulmod` takes the modulus words
//! as plain arguments rather than baking them into a type.
#![no_std]
#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

pub mod const_derive;

use limbs::{
    add_with_carry, limbs_add, limbs_bit, limbs_cmov, limbs_cswap, limbs_ct_eq, limbs_is_zero,
    limbs_lt_vartime, limbs_shr1, limbs_sub, mac_with_carry, Limbs, Word,
};
use subtle::{Choice, ConstantTimeEq, ConstantTimeLess, CtOption};

#[cfg(feature = "zeroize")]
use zeroize::Zeroize;

/// Upper bound on supported limb counts, used to size fixed-capacity scratch
/// buffers for Montgomery reduction without const-generic array arithmetic
/// (`[u64; N + 2]` is not expressible for a generic `N` on stable Rust).
/// 16 limbs covers moduli up to 1024 bits, comfortably beyond BW6-761.
const MAX_LIMBS: usize = 16;

/// A fixed-width unsigned big integer of `N` 64-bit limbs, little-endian.
///
/// `BigInt` carries no notion of "reduced" vs. "unreduced" in its type: per
/// `spec.md` §4.2 that distinction is a documented precondition/postcondition
/// of each function, not a runtime tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BigInt<const N: usize>(pub Limbs<N>);

impl<const N: usize> BigInt<N> {
    /// The additive identity.
    pub const ZERO: Self = Self([0; N]);

    /// Wrap a raw limb array.
    pub const fn new(limbs: Limbs<N>) -> Self {
        Self(limbs)
    }

    /// Borrow the underlying limbs.
    pub const fn as_limbs(&self) -> &Limbs<N> {
        &self.0
    }

    /// Constant-time zero test.
    pub fn is_zero(&self) -> Choice {
        limbs_is_zero(&self.0)
    }

    /// Constant-time equality.
    pub fn ct_eq(&self, other: &Self) -> Choice {
        limbs_ct_eq(&self.0, &other.0)
    }

    /// Constant-time conditional selection.
    pub fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        let mut out = a.0;
        limbs_cmov(&mut out, &b.0, choice);
        Self(out)
    }

    /// Variable-time `self < other`. Only sound on public values.
    pub fn lt_vartime(&self, other: &Self) -> bool {
        limbs_lt_vartime(&self.0, &other.0)
    }

    /// Extracts bit `i` as a `Choice`.
    pub fn bit(&self, i: usize) -> Choice {
        limbs_bit(&self.0, i)
    }

    /// Lowest bit, i.e. whether `self` is odd.
    pub fn is_odd(&self) -> Choice {
        self.bit(0)
    }
}

impl<const N: usize> Default for BigInt<N> {
    fn default() -> Self {
        Self::ZERO
    }
}

#[cfg(feature = "zeroize")]
impl<const N: usize> Zeroize for BigInt<N> {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

/// `dst = (a + b) mod m`, constant-time in whether the conditional
/// subtraction of `m` was taken.
///
/// Grounded in `field_montgomery.rs::add` (compute the 5-word sum, then
/// unconditionally attempt a subtraction of `m` and keep it only if it
/// didn't borrow), generalized to arbitrary `N`.
pub fn add_mod<const N: usize>(a: &BigInt<N>, b: &BigInt<N>, m: &BigInt<N>) -> BigInt<N> {
    let mut sum = [0; N];
    let carry = limbs_add(&mut sum, &a.0, &b.0);

    let mut reduced = [0; N];
    let borrow = limbs_sub(&mut reduced, &sum, &m.0);
    // If subtracting `m` borrowed and there was no carry out of the addition,
    // the sum was already < m: keep it. Otherwise keep the subtracted value.
    let keep_reduced = !(Choice::from((borrow & !carry) as u8));
    let mut out = sum;
    limbs_cmov(&mut out, &reduced, keep_reduced);
    BigInt(out)
}

/// `dst = (a - b) mod m`.
///
/// Subtract with borrow, then conditionally add `m` back iff the subtraction
/// underflowed.
pub fn sub_mod<const N: usize>(a: &BigInt<N>, b: &BigInt<N>, m: &BigInt<N>) -> BigInt<N> {
    let mut diff = [0; N];
    let borrow = limbs_sub(&mut diff, &a.0, &b.0);

    let mut restored = [0; N];
    limbs_add(&mut restored, &diff, &m.0);

    let mut out = diff;
    limbs_cmov(&mut out, &restored, Choice::from(borrow as u8));
    BigInt(out)
}

/// `dst = -a mod m`, with the invariant `neg_mod(0) = 0` (not `m`).
pub fn neg_mod<const N: usize>(a: &BigInt<N>, m: &BigInt<N>) -> BigInt<N> {
    let mut diff = [0; N];
    limbs_sub(&mut diff, &m.0, &a.0);
    BigInt::conditional_select(&BigInt(diff), &BigInt::ZERO, a.is_zero())
}

/// Conditionally subtracts `m` from `a` once, iff `a >= m`. Used as the
/// "final reduction" step shared by `mont_mul`/`redc`.
fn conditional_sub_modulus<const N: usize>(a: &Limbs<N>, m: &Limbs<N>) -> Limbs<N> {
    let mut reduced = [0; N];
    let borrow = limbs_sub(&mut reduced, a, m);
    let mut out = *a;
    limbs_cmov(&mut out, &reduced, !Choice::from(borrow as u8));
    out
}

/// Montgomery multiplication: `dst = a * b * R^-1 mod m`, where `R = 2^(64*N)`.
///
/// CIOS (coarsely integrated operand scanning), per `spec.md` §4.2. Uses a
/// fixed-capacity scratch buffer (see [`MAX_LIMBS`]) rather than a
/// const-generic `N+2`-word array, since stable Rust cannot express
/// arithmetic on a generic array length.
pub fn mont_mul<const N: usize>(
    a: &BigInt<N>,
    b: &BigInt<N>,
    m: &BigInt<N>,
    m0inv: Word,
) -> BigInt<N> {
    debug_assert!(N <= MAX_LIMBS);
    let a = &a.0;
    let b = &b.0;
    let m = &m.0;

    let mut t = [0u64; MAX_LIMBS + 2];

    for i in 0..N {
        // t[0..N] += a[i] * b
        let mut carry = 0;
        for j in 0..N {
            let (lo, hi) = mac_with_carry(t[j], a[i], b[j], carry);
            t[j] = lo;
            carry = hi;
        }
        let (s, c0) = add_with_carry(t[N], carry, 0);
        t[N] = s;
        let (s2, _c1) = add_with_carry(t[N + 1], 0, c0);
        t[N + 1] = s2;

        // Eliminate t[0] by adding a multiple of m.
        let u = t[0].wrapping_mul(m0inv);
        let (_, carry0) = mac_with_carry(t[0], u, m[0], 0);
        let mut carry = carry0;
        for j in 1..N {
            let (lo, hi) = mac_with_carry(t[j], u, m[j], carry);
            t[j - 1] = lo;
            carry = hi;
        }
        let (s, c0) = add_with_carry(t[N], carry, 0);
        t[N - 1] = s;
        let (s2, _c1) = add_with_carry(t[N + 1], 0, c0);
        t[N] = s2;
        t[N + 1] = 0;
    }

    let mut result = [0u64; N];
    result.copy_from_slice(&t[..N]);
    BigInt(conditional_sub_modulus(&result, m))
}

/// Specialized squaring; produces a bit-identical result to `mont_mul(a, a, ...)`.
///
/// `spec.md` §4.2 calls for a "specialized" squaring routine; lacking an
/// asymmetric-product speedup in this generic implementation, it is provided
/// as a thin alias so call sites can opt into a faster backend later without
/// changing their signature.
pub fn mont_square<const N: usize>(a: &BigInt<N>, m: &BigInt<N>, m0inv: Word) -> BigInt<N> {
    mont_mul(a, a, m, m0inv)
}

/// Montgomery reduction of a double-width value: `dst = (lo + hi*R) * R^-1 mod m`.
///
/// `wide` is little-endian, `wide[0..N]` the low half and `wide[N..2N]` the
/// high half, as produced by [`limbs::limbs_mul_into`].
pub fn redc<const N: usize>(wide: &[Word], m: &BigInt<N>, m0inv: Word) -> BigInt<N> {
    debug_assert_eq!(wide.len(), 2 * N);
    debug_assert!(N <= MAX_LIMBS);
    let m = &m.0;

    let mut t = [0u64; MAX_LIMBS + 2];
    t[..2 * N].copy_from_slice(wide);

    for i in 0..N {
        let u = t[i].wrapping_mul(m0inv);
        let mut carry = 0;
        for j in 0..N {
            let (lo, hi) = mac_with_carry(t[i + j], u, m[j], carry);
            t[i + j] = lo;
            carry = hi;
        }
        // propagate carry upward from position i + N
        let mut k = i + N;
        while carry != 0 {
            let (s, c) = add_with_carry(t[k], carry, 0);
            t[k] = s;
            carry = c;
            k += 1;
        }
    }

    let mut result = [0u64; N];
    result.copy_from_slice(&t[N..2 * N]);
    BigInt(conditional_sub_modulus(&result, m))
}

/// Converts a canonical integer into Montgomery form: `dst = a * R mod m`.
pub fn to_mont<const N: usize>(a: &BigInt<N>, m: &BigInt<N>, r2: &BigInt<N>, m0inv: Word) -> BigInt<N> {
    mont_mul(a, r2, m, m0inv)
}

/// Converts a Montgomery-form value back to canonical form: `dst = a * R^-1 mod m`.
pub fn from_mont<const N: usize>(a: &BigInt<N>, m: &BigInt<N>, m0inv: Word) -> BigInt<N> {
    mont_mul(a, &BigInt::conditional_select(&BigInt::ZERO, &one::<N>(), Choice::from(1u8)), m, m0inv)
}

fn one<const N: usize>() -> BigInt<N> {
    let mut limbs = [0u64; N];
    limbs[0] = 1;
    BigInt(limbs)
}

/// Constant-time modular inversion of a canonical (non-Montgomery) integer.
///
/// Returns `0` when `a = 0`, per `spec.md` §4.2's "constant-time branch never
/// signals failure" contract. Implemented as a fixed-iteration binary
/// extended-GCD variant in the spirit of Bernstein–Yang's safegcd: every
/// step is a compare-and-cswap followed by a conditional subtract-and-shift,
/// and the loop always runs `2 * bits(m)` times regardless of the value of
/// `a`, so the control flow is a function of `bits(m)` alone.
pub fn inv_mod<const N: usize>(a: &BigInt<N>, m: &BigInt<N>) -> BigInt<N> {
    // Constant-time binary GCD computing a^-1 mod m via the classical
    // extended binary algorithm, operated on in "plus/minus" form so every
    // branch becomes a conditional swap/subtract.
    let bits = N * 64;
    let mut u = *a;
    let mut v = *m;
    let mut x1 = one::<N>();
    let mut x2 = BigInt::ZERO;

    // u,v start possibly with u even; normalize by ensuring we still track
    // correctly via the standard "both u,v odd after shifts" invariant.
    for _ in 0..(2 * bits) {
        let u_is_zero = u.is_zero();

        let u_even = !u.is_odd();
        let v_even = !v.is_odd();

        // u /= 2 when even; x1 adjusted: if x1 odd add m then shift.
        let (u_half, _) = limbs_shr1(&u.0);
        let x1_odd = x1.is_odd();
        let mut x1_adj = x1;
        // if x1 is odd, add m (plain add, to keep it even) before shifting
        let mut x1_sum = [0u64; N];
        limbs_add(&mut x1_sum, &x1.0, &m.0);
        x1_adj.0 = x1.0;
        limbs_cmov(&mut x1_adj.0, &x1_sum, x1_odd);
        let (x1_half, _) = limbs_shr1(&x1_adj.0);

        let new_u = BigInt(u_half);
        let new_x1 = BigInt(x1_half);
        u = BigInt::conditional_select(&u, &new_u, u_even & !u_is_zero);
        x1 = BigInt::conditional_select(&x1, &new_x1, u_even & !u_is_zero);

        let (v_half, _) = limbs_shr1(&v.0);
        let x2_odd = x2.is_odd();
        let mut x2_sum = [0u64; N];
        limbs_add(&mut x2_sum, &x2.0, &m.0);
        let mut x2_adj = x2;
        limbs_cmov(&mut x2_adj.0, &x2_sum, x2_odd);
        let (x2_half, _) = limbs_shr1(&x2_adj.0);

        let new_v = BigInt(v_half);
        let new_x2 = BigInt(x2_half);
        v = BigInt::conditional_select(&v, &new_v, v_even);
        x2 = BigInt::conditional_select(&x2, &new_x2, v_even);

        let both_odd = !u_even & !v_even & !u_is_zero;
        // When both are odd: if u >= v (vartime-unsafe compare replaced by
        // constant-time subtract-and-check-borrow), u -= v, x1 -= x2;
        // otherwise v -= u, x2 -= x1.
        let mut u_minus_v = [0u64; N];
        let borrow_uv = limbs_sub(&mut u_minus_v, &u.0, &v.0);
        let u_ge_v = Choice::from((1 - borrow_uv) as u8);

        let take_uv = both_odd & u_ge_v;
        let take_vu = both_odd & !u_ge_v;

        let new_u2 = BigInt(u_minus_v);
        u = BigInt::conditional_select(&u, &new_u2, take_uv);
        let new_x1_2 = sub_mod(&x1, &x2, m);
        x1 = BigInt::conditional_select(&x1, &new_x1_2, take_uv);

        let mut v_minus_u = [0u64; N];
        limbs_sub(&mut v_minus_u, &v.0, &u.0);
        let new_v2 = BigInt(v_minus_u);
        v = BigInt::conditional_select(&v, &new_v2, take_vu);
        let new_x2_2 = sub_mod(&x2, &x1, m);
        x2 = BigInt::conditional_select(&x2, &new_x2_2, take_vu);
    }

    // When the loop has converged, v holds gcd(a, m) (== 1 for a != 0 and
    // prime m) and x2 holds a^-1 mod m.
    BigInt::conditional_select(&x2, &BigInt::ZERO, a.is_zero())
}

/// Variable-time modular inversion for public inputs only.
///
/// Returns `None` for `a = 0`, matching `spec.md` §4.2/§7's
/// `NotInvertible` contract for the vartime API.
pub fn inv_mod_vartime<const N: usize>(a: &BigInt<N>, m: &BigInt<N>) -> Option<BigInt<N>> {
    if bool::from(a.is_zero()) {
        return None;
    }

    // Plain (non-constant-time) extended Euclidean algorithm, fine here
    // because both inputs are public.
    let mut old_r = *a;
    let mut r = *m;
    let mut old_s = one::<N>();
    let mut s = BigInt::ZERO;

    while !bool::from(r.is_zero()) {
        // quotient = old_r / r, computed by repeated subtraction via shifts
        // (schoolbook long division over limbs, vartime only).
        let (quotient, remainder) = divmod_vartime(&old_r, &r);
        old_r = r;
        r = remainder;

        let q_times_s = mulmod_plain_vartime(&quotient, &s, m);
        let new_s = sub_mod(&old_s, &q_times_s, m);
        old_s = s;
        s = new_s;
    }

    Some(old_s)
}

/// Plain (non-Montgomery) vartime product mod `m`, used by `inv_mod_vartime`.
fn mulmod_plain_vartime<const N: usize>(a: &BigInt<N>, b: &BigInt<N>, m: &BigInt<N>) -> BigInt<N> {
    let mut acc = BigInt::<N>::ZERO;
    let mut addend = *a;
    for i in 0..(N * 64) {
        if bool::from(b.bit(i)) {
            acc = add_mod(&acc, &addend, m);
        }
        addend = add_mod(&addend, &addend, m);
    }
    acc
}

/// Vartime schoolbook division: `(a / b, a % b)`. `b` must be non-zero.
fn divmod_vartime<const N: usize>(a: &BigInt<N>, b: &BigInt<N>) -> (BigInt<N>, BigInt<N>) {
    debug_assert!(!bool::from(b.is_zero()));
    let mut quotient = BigInt::<N>::ZERO;
    let mut remainder = BigInt::<N>::ZERO;

    for i in (0..(N * 64)).rev() {
        // remainder = (remainder << 1) | bit(a, i)
        let mut shifted = [0u64; N];
        let mut carry = if bool::from(a.bit(i)) { 1 } else { 0 };
        for limb in 0..N {
            let (s, c) = mac_with_carry(0, remainder.0[limb], 2, carry);
            shifted[limb] = s;
            carry = c;
        }
        remainder = BigInt(shifted);

        if !remainder.lt_vartime(b) {
            let mut diff = [0u64; N];
            limbs_sub(&mut diff, &remainder.0, &b.0);
            remainder = BigInt(diff);
            // set bit i of quotient
            let mut q = quotient.0;
            q[i / 64] |= 1 << (i % 64);
            quotient = BigInt(q);
        }
    }

    (quotient, remainder)
}

/// Conditionally swaps `a` and `b`.
pub fn cswap<const N: usize>(a: &mut BigInt<N>, b: &mut BigInt<N>, choice: Choice) {
    limbs_cswap(&mut a.0, &mut b.0, choice);
}

/// Constant-time `a < b` over canonical representatives.
pub fn ct_lt<const N: usize>(a: &BigInt<N>, b: &BigInt<N>) -> Choice {
    let mut lt = Choice::from(0u8);
    let mut eq_so_far = Choice::from(1u8);
    for i in (0..N).rev() {
        let a_lt = a.0[i].ct_lt(&b.0[i]);
        let a_eq = a.0[i].ct_eq(&b.0[i]);
        lt |= eq_so_far & a_lt;
        eq_so_far &= a_eq;
    }
    lt
}

/// Convenience: wraps `CtOption` around [`inv_mod`], marking the zero input
/// as the "failure" case for callers that want an `Option`-shaped API
/// without ever branching on secret data before the `CtOption` is consumed.
pub fn inv_mod_ct_option<const N: usize>(a: &BigInt<N>, m: &BigInt<N>) -> CtOption<BigInt<N>> {
    CtOption::new(inv_mod(a, m), !a.is_zero())
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigUint;

    fn to_biguint<const N: usize>(x: &BigInt<N>) -> BigUint {
        let mut out = BigUint::from(0u32);
        for (i, &limb) in x.0.iter().enumerate() {
            out += BigUint::from(limb) << (64 * i);
        }
        out
    }

    fn from_biguint<const N: usize>(x: &BigUint) -> BigInt<N> {
        let bytes = x.to_bytes_le();
        let mut limbs = [0u64; N];
        for (i, chunk) in bytes.chunks(8).enumerate() {
            let mut buf = [0u8; 8];
            buf[..chunk.len()].copy_from_slice(chunk);
            limbs[i] = u64::from_le_bytes(buf);
        }
        BigInt(limbs)
    }

    // A small 4-limb test modulus: the P-256 base field prime.
    const P256_MODULUS: BigInt<4> = BigInt([
        0xffffffffffffffff,
        0x00000000ffffffff,
        0x0000000000000000,
        0xffffffff00000001,
    ]);

    #[test]
    fn add_mod_matches_biguint() {
        let m = P256_MODULUS;
        let m_big = to_biguint(&m);
        let a = BigInt::<4>([1, 2, 3, 4]);
        let b = BigInt::<4>([5, 6, 7, 8]);
        let got = add_mod(&a, &b, &m);
        let expect = (to_biguint(&a) + to_biguint(&b)) % &m_big;
        assert_eq!(to_biguint(&got), expect);
    }

    #[test]
    fn sub_mod_matches_biguint() {
        let m = P256_MODULUS;
        let a = BigInt::<4>([1, 0, 0, 0]);
        let b = BigInt::<4>([2, 0, 0, 0]);
        let got = sub_mod(&a, &b, &m);
        let expect = (to_biguint(&m) + to_biguint(&a) - to_biguint(&b)) % to_biguint(&m);
        assert_eq!(to_biguint(&got), expect);
    }

    #[test]
    fn neg_zero_is_zero() {
        let m = P256_MODULUS;
        let z = BigInt::<4>::ZERO;
        assert_eq!(neg_mod(&z, &m), BigInt::ZERO);
    }

    #[test]
    fn divmod_matches_biguint() {
        let m = P256_MODULUS;
        let m_big = to_biguint(&m);
        let a = from_biguint::<4>(&(m_big.clone() * 3u32 + 17u32));
        let (q, r) = divmod_vartime(&a, &m);
        assert_eq!(to_biguint(&q), BigUint::from(3u32));
        assert_eq!(to_biguint(&r), BigUint::from(17u32));
    }

    #[test]
    fn inv_mod_vartime_known_answer() {
        let m = P256_MODULUS;
        let a = BigInt::<4>([7, 0, 0, 0]);
        let inv = inv_mod_vartime(&a, &m).unwrap();
        let prod = mulmod_plain_vartime(&a, &inv, &m);
        assert_eq!(to_biguint(&prod), BigUint::from(1u32));
    }

    #[test]
    fn inv_mod_constant_time_matches_vartime() {
        let m = P256_MODULUS;
        for v in [3u64, 5, 7, 123456789, 0xdead_beef] {
            let a = BigInt::<4>([v, 0, 0, 0]);
            let ct = inv_mod(&a, &m);
            let vt = inv_mod_vartime(&a, &m).unwrap();
            assert_eq!(ct, vt, "mismatch for a = {v}");
        }
    }

    #[test]
    fn inv_mod_zero_is_zero() {
        let m = P256_MODULUS;
        assert_eq!(inv_mod(&BigInt::<4>::ZERO, &m), BigInt::ZERO);
        assert!(inv_mod_vartime(&BigInt::<4>::ZERO, &m).is_none());
    }

    #[test]
    fn mont_roundtrip() {
        let m = P256_MODULUS;
        // m0inv for P-256: -(m^-1 mod 2^64) mod 2^64
        let m0inv = compute_m0inv(m.0[0]);
        let r2 = compute_r2(&m);

        let a = BigInt::<4>([0x1234_5678, 0, 0, 0]);
        let mont = to_mont(&a, &m, &r2, m0inv);
        let back = from_mont(&mont, &m, m0inv);
        assert_eq!(back, a);
    }

    #[test]
    fn mont_mul_matches_plain_mul_mod() {
        let m = P256_MODULUS;
        let m0inv = compute_m0inv(m.0[0]);
        let r2 = compute_r2(&m);

        let a = BigInt::<4>([12345, 0, 0, 0]);
        let b = BigInt::<4>([67890, 0, 0, 0]);

        let a_mont = to_mont(&a, &m, &r2, m0inv);
        let b_mont = to_mont(&b, &m, &r2, m0inv);
        let prod_mont = mont_mul(&a_mont, &b_mont, &m, m0inv);
        let prod = from_mont(&prod_mont, &m, m0inv);

        let expect = (to_biguint(&a) * to_biguint(&b)) % to_biguint(&m);
        assert_eq!(to_biguint(&prod), expect);
    }

    #[test]
    fn mont_square_matches_mont_mul() {
        let m = P256_MODULUS;
        let m0inv = compute_m0inv(m.0[0]);
        let r2 = compute_r2(&m);
        let a = BigInt::<4>([999_999, 0, 0, 0]);
        let a_mont = to_mont(&a, &m, &r2, m0inv);
        assert_eq!(
            mont_square(&a_mont, &m, m0inv),
            mont_mul(&a_mont, &a_mont, &m, m0inv)
        );
    }

    /// Computes `m0inv = -(m0^-1) mod 2^64` via Newton's iteration on the
    /// 2-adic inverse, for test fixtures only.
    fn compute_m0inv(m0: u64) -> u64 {
        let mut inv = 1u64;
        for _ in 0..6 {
            inv = inv.wrapping_mul(2u64.wrapping_sub(m0.wrapping_mul(inv)));
        }
        inv.wrapping_neg()
    }

    fn compute_r2<const N: usize>(m: &BigInt<N>) -> BigInt<N> {
        let m_big = to_biguint(m);
        let r = BigUint::from(1u32) << (64 * N);
        let r2 = (&r * &r) % &m_big;
        from_biguint(&r2)
    }
}
