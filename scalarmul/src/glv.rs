//! GLV scalar decomposition via Babai rounding against a precomputed lattice
//! basis, specialized to `M = 2` (one endomorphism application).
//!
//! Grounded in `k256/src/arithmetic/mul.rs::decompose_scalar`, generalized
//! from secp256k1's specific basis constants to a generic `GlvParams` trait
//! any `M = 2` curve (BN254/BLS12-381 G1, secp256k1) can implement.
use bigint::BigInt;
use curve::weierstrass::affine::Affine;
use curve::weierstrass::CurveParams;
use field::Field;
use limbs::Word;
use subtle::Choice;

/// Compile-time GLV parameters for an `M = 2` endomorphism decomposition.
///
/// `A1`, `B1`, `A2`, `B2` are the lattice basis rows `(a1, b1)`, `(a2, b2)`
/// with `a_i + b_i*lambda = 0 mod ORDER`, already reduced into `[0, ORDER)`
/// (a negative coefficient is stored as `ORDER - magnitude`) so `decompose`
/// never needs its own sign bookkeeping for them — only the implementer
/// computing these constants for a concrete curve needs to think about sign.
pub trait GlvParams<const N: usize>: Copy + Clone + 'static {
    /// The curve this endomorphism acts on.
    type Curve: CurveParams<N>;

    /// `beta`: `phi(x, y) = (beta*x, y)`.
    const BETA: Field<<Self::Curve as CurveParams<N>>::BaseField, N>;
    /// Group order `n`.
    const ORDER: BigInt<N>;
    /// `-(n^-1) mod 2^64`, for Montgomery arithmetic modulo `ORDER`.
    const ORDER_M0INV: Word;
    /// `R^2 mod ORDER`, for Montgomery arithmetic modulo `ORDER`.
    const ORDER_R2: BigInt<N>;
    /// `a1 mod ORDER`.
    const A1: BigInt<N>;
    /// `b1 mod ORDER`.
    const B1: BigInt<N>;
    /// `a2 mod ORDER`.
    const A2: BigInt<N>;
    /// `b2 mod ORDER`.
    const B2: BigInt<N>;
    /// Precomputed Babai vector `g1 = round(2^(64N) * b2 / n)`.
    const G1: BigInt<N>;
    /// Precomputed Babai vector `g2 = round(2^(64N) * (-b1) / n)`.
    const G2: BigInt<N>;
}

/// The result of decomposing `k` into two half-width mini-scalars.
#[derive(Clone, Copy, Debug)]
pub struct Decomposed<const N: usize> {
    /// `|k0|`.
    pub k0: BigInt<N>,
    /// Sign of `k0` (`true` = negative).
    pub k0_neg: bool,
    /// `|k1|`.
    pub k1: BigInt<N>,
    /// Sign of `k1` (`true` = negative).
    pub k1_neg: bool,
    /// Whether the sign-column mini-scalar had to be evened (made odd) by
    /// adding 1, requiring a final conditional subtraction of `P`.
    pub column0_was_evened: Choice,
}

/// `round(a*b / 2^(64N))`, the high `N` limbs of the double-width product
/// after rounding on the top bit of the low half. The underlying `N x N ->
/// 2N` multiply performs the same word-level operations regardless of
/// operand value, so this has no secret-dependent control flow.
fn mul_shift<const N: usize>(a: &BigInt<N>, b: &BigInt<N>) -> BigInt<N> {
    const MAX: usize = 32;
    debug_assert!(N <= MAX / 2);
    let mut wide = [0u64; MAX];
    limbs::limbs_mul_into(&mut wide[..2 * N], a.as_limbs(), b.as_limbs());

    let round_bit = 1u64 << 63;
    let (sum, mut carry) = limbs::add_with_carry(wide[N - 1], round_bit, 0);
    wide[N - 1] = sum;
    let mut i = N;
    while carry != 0 && i < 2 * N {
        let (s, c) = limbs::add_with_carry(wide[i], 0, carry);
        wide[i] = s;
        carry = c;
        i += 1;
    }

    let mut out = [0u64; N];
    out.copy_from_slice(&wide[N..2 * N]);
    BigInt::new(out)
}

/// Constant-time `a*b mod ORDER`, built from the already-tested Montgomery
/// primitives rather than the bit-scanning vartime multiply in `bigint`
/// (which branches on the multiplier's bits and so is unsuitable once one
/// operand is derived from the secret scalar).
fn mulmod_ct<G: GlvParams<N>, const N: usize>(a: &BigInt<N>, b: &BigInt<N>) -> BigInt<N> {
    let am = bigint::to_mont(a, &G::ORDER, &G::ORDER_R2, G::ORDER_M0INV);
    let bm = bigint::to_mont(b, &G::ORDER, &G::ORDER_R2, G::ORDER_M0INV);
    let prod_m = bigint::mont_mul(&am, &bm, &G::ORDER, G::ORDER_M0INV);
    bigint::from_mont(&prod_m, &G::ORDER, G::ORDER_M0INV)
}

fn one_limbs<const N: usize>() -> [Word; N] {
    let mut limbs = [0u64; N];
    limbs[0] = 1;
    limbs
}

/// Maps a value in `[0, order)` to sign-magnitude form: values in the top
/// half represent `-(order - value)`, the standard GLV "centered residue"
/// convention that keeps both mini-scalars close to `sqrt(order)` in size.
fn to_signed_small<const N: usize>(value: &BigInt<N>, order: &BigInt<N>) -> (BigInt<N>, bool) {
    let (half, _) = limbs::limbs_shr1(order.as_limbs());
    let half = BigInt::new(half);
    let is_large = !value.lt_vartime(&half);
    if is_large {
        (bigint::sub_mod(order, value, order), true)
    } else {
        (*value, false)
    }
}

/// Decomposes `k` such that `k = k0 + k1*lambda (mod order)`, with `k0`,
/// `k1` each about half the bit width of `order`.
pub fn decompose<G: GlvParams<N>, const N: usize>(k: &BigInt<N>) -> Decomposed<N> {
    let c1 = mul_shift(k, &G::G1);
    let c2 = mul_shift(k, &G::G2);

    let c1a1 = mulmod_ct::<G, N>(&c1, &G::A1);
    let c2a2 = mulmod_ct::<G, N>(&c2, &G::A2);
    let c1b1 = mulmod_ct::<G, N>(&c1, &G::B1);
    let c2b2 = mulmod_ct::<G, N>(&c2, &G::B2);

    let k0_mod = bigint::sub_mod(&bigint::sub_mod(k, &c1a1, &G::ORDER), &c2a2, &G::ORDER);
    let sum_b = bigint::add_mod(&c1b1, &c2b2, &G::ORDER);
    let k1_mod = bigint::neg_mod(&sum_b, &G::ORDER);

    let (k0, k0_neg) = to_signed_small(&k0_mod, &G::ORDER);
    let (k1, k1_neg) = to_signed_small(&k1_mod, &G::ORDER);

    let k0_is_odd = k0.is_odd();
    let k0_plus_one = bigint::add_mod(&k0, &BigInt::new(one_limbs::<N>()), &G::ORDER);
    let k0_final = BigInt::conditional_select(&k0_plus_one, &k0, k0_is_odd);

    Decomposed {
        k0: k0_final,
        k0_neg,
        k1,
        k1_neg,
        column0_was_evened: !k0_is_odd,
    }
}

/// Applies the curve endomorphism `phi(x, y) = (beta*x, y)`.
pub fn endomorphism<G: GlvParams<N>, const N: usize>(
    p: &Affine<G::Curve, N>,
) -> Affine<G::Curve, N> {
    Affine::new_unchecked(p.x.mul(&G::BETA), p.y)
}
