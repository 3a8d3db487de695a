//! Field element modulo the P-256 base field prime using 32-bit limbs.
//!
//! `p = 2^256 - 2^224 + 2^192 + 2^96 - 1`
//!
//! Values are stored as ten signed 32-bit limbs holding 26 bits each
//! (the last limb holds only 22 bits once normalized), least
//! significant limb first. Limbs are signed so that subtraction can
//! leave a limb temporarily negative without wrapping; `normalize`
//! restores the canonical range. This radix is wide enough that
//! schoolbook multiplication never overflows a `u64`/`i64`
//! accumulator, and narrow enough that Montgomery reduction by this
//! prime collapses to a handful of shifts and adds. Inspired by the
//! secp256k1 10x26 limb layout used by `k256::arithmetic::field_10x26`,
//! adapted to P-256's modulus and to Montgomery form (secp256k1's
//! pseudo-Mersenne prime doesn't need one; P-256's does).

use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};
use zeroize::Zeroize;

/// Number of 26-bit limbs in a field element.
const LIMBS: usize = 10;

/// Mask selecting the low 26 bits of a limb.
const LIMB_MASK: i64 = 0x3ff_ffff;

/// `p = 2^256 - 2^224 + 2^192 + 2^96 - 1`, in 26-bit limbs.
const MODULUS: FieldElement = FieldElement([
    0x3ff_ffff,
    0x3ff_ffff,
    0x3ff_ffff,
    0x003_ffff,
    0x000_0000,
    0x000_0000,
    0x000_0000,
    0x000_0400,
    0x3ff_0000,
    0x03f_ffff,
]);

/// A P-256 base field element.
///
/// Not necessarily in canonical range except where documented; most
/// operations here produce a *normalized* element (limbs 0..=8 in
/// `[0, 2^26)`, limb 9 in `[0, 2^22)`, value `< p`) but intermediate
/// computations (in particular the output of [`FieldElement::mul`] and
/// [`FieldElement::square`]) are wider and must be reduced with
/// Montgomery reduction before use.
#[derive(Clone, Copy, Debug)]
pub struct FieldElement(pub(crate) [i32; LIMBS]);

/// Wide product of two field elements, prior to Montgomery reduction:
/// twenty limbs in the same 26-bit radix.
type Wide = [i64; 2 * LIMBS];

impl FieldElement {
    /// Zero element.
    pub const ZERO: Self = Self([0; LIMBS]);

    /// Multiplicative identity (ordinary, not Montgomery, form).
    pub const ONE: Self = Self([1, 0, 0, 0, 0, 0, 0, 0, 0, 0]);

    /// Parses a big-endian 32-byte array into an unreduced field element.
    ///
    /// Does not check the result is `< p` — callers working with
    /// untrusted input should follow with [`FieldElement::normalize`]
    /// and compare, if canonicity matters. A malformed peer coordinate
    /// (e.g. `>= p`) yields a value the rest of the engine still
    /// processes without branching or crashing, per the "malformed peer
    /// point" contract.
    pub fn from_bytes(bytes: &[u8; 32]) -> Self {
        let mut limbs = [0i32; LIMBS];
        let mut limb = 0usize;
        let mut shift = 0u32;

        for &byte in bytes.iter().rev() {
            limbs[limb] |= (byte as i32) << shift;
            if shift >= 18 {
                limbs[limb] &= LIMB_MASK as i32;
                let consumed = 26 - shift;
                shift = 8 - consumed;
                limb += 1;
                if limb < LIMBS {
                    limbs[limb] = (byte as i32) >> consumed;
                }
            } else {
                shift += 8;
            }
        }

        Self(limbs)
    }

    /// Serializes as a big-endian 32-byte array.
    ///
    /// Normalizes first, so the output is always the canonical
    /// representative of `self mod p`.
    pub fn to_bytes(self) -> [u8; 32] {
        let norm = self.normalize();
        let mut out = [0u8; 32];

        let mut acc: u64 = 0;
        let mut acc_bits = 0u32;
        let mut pos = 32;

        for &limb in norm.0.iter() {
            acc |= (limb as u64) << acc_bits;
            acc_bits += 26;
            while acc_bits >= 8 {
                pos -= 1;
                out[pos] = acc as u8;
                acc >>= 8;
                acc_bits -= 8;
            }
        }

        out
    }

    /// Adds two field elements without normalizing.
    pub(crate) const fn add(&self, rhs: &Self) -> Self {
        let a = &self.0;
        let b = &rhs.0;
        Self([
            a[0] + b[0],
            a[1] + b[1],
            a[2] + b[2],
            a[3] + b[3],
            a[4] + b[4],
            a[5] + b[5],
            a[6] + b[6],
            a[7] + b[7],
            a[8] + b[8],
            a[9] + b[9],
        ])
    }

    /// Subtracts two field elements without normalizing; limbs may go
    /// negative. [`FieldElement::normalize`] (or the Montgomery-form
    /// `montgomery_sub`) restores a valid range.
    pub(crate) const fn sub(&self, rhs: &Self) -> Self {
        let a = &self.0;
        let b = &rhs.0;
        Self([
            a[0] - b[0],
            a[1] - b[1],
            a[2] - b[2],
            a[3] - b[3],
            a[4] - b[4],
            a[5] - b[5],
            a[6] - b[6],
            a[7] - b[7],
            a[8] - b[8],
            a[9] - b[9],
        ])
    }

    /// Conditionally adds `rhs` into `self`, limbwise: `r = a + (b &
    /// mask)`. `mask` must be `-1` (all-ones) to act or `0` to no-op —
    /// this is the only conditional operation permitted on
    /// secret-dependent data, per `sp_256_cond_add_10`.
    pub(crate) fn cond_add(&self, rhs: &Self, mask: i32) -> Self {
        let a = &self.0;
        let b = &rhs.0;
        let mut r = [0i32; LIMBS];
        for i in 0..LIMBS {
            r[i] = a[i] + (b[i] & mask);
        }
        Self(r)
    }

    /// Conditionally subtracts `rhs` from `self`, limbwise: `r = a - (b
    /// & mask)`, per `sp_256_cond_sub_10`.
    pub(crate) fn cond_sub(&self, rhs: &Self, mask: i32) -> Self {
        let a = &self.0;
        let b = &rhs.0;
        let mut r = [0i32; LIMBS];
        for i in 0..LIMBS {
            r[i] = a[i] - (b[i] & mask);
        }
        Self(r)
    }

    /// Right-shifts the limb vector by one bit across limb boundaries.
    /// The bottom bit is lost. Only ever used on an already-even,
    /// already-normalized value (see `montgomery_half`).
    fn rshift1(&self) -> Self {
        debug_assert_eq!(self.0[0] & 1, 0, "rshift1 called on an odd value, low bit would be lost");
        let a = &self.0;
        let mut r = [0i32; LIMBS];
        for i in 0..LIMBS - 1 {
            r[i] = ((a[i] >> 1) | (a[i + 1] << 25)) & (LIMB_MASK as i32);
        }
        r[LIMBS - 1] = a[LIMBS - 1] >> 1;
        Self(r)
    }

    /// Propagates carries (or borrows, for negative limbs) from limb 0
    /// upward using an arithmetic shift, so that limbs 0..=8 fit in
    /// `[0, 2^26)` and any negativity collapses into limb 9's sign.
    /// Limb 9 itself is left as-is — bounding it is
    /// [`FieldElement::normalize`]'s job.
    fn carry_propagate(&self) -> Self {
        let mut r = self.0;
        for i in 0..LIMBS - 1 {
            r[i + 1] += r[i] >> 26;
            r[i] &= LIMB_MASK as i32;
        }
        Self(r)
    }

    /// Fully normalizes: limbs 0..=8 in `[0, 2^26)`, limb 9 in `[0,
    /// 2^22)`, and the value itself `< p`. Handles both overflow
    /// (limb 9 too large) and a negative result (limb 9's sign bit
    /// set) with a single conditional correction, since a value
    /// produced by one `sub` can be at most `p` below zero and one
    /// produced by one `add` can be at most `p` above `p - 1`.
    pub fn normalize(&self) -> Self {
        let carried = self.carry_propagate();
        let high = carried.0[LIMBS - 1];

        let negative = high >> 31; // all-ones if negative, else 0
        let added_back = carried.cond_add(&MODULUS, negative).carry_propagate();

        let still_high = added_back.0[LIMBS - 1];
        let overflow_mask = 0i32.wrapping_sub(((still_high >> 22) > 0) as i32);
        let result = added_back.cond_sub(&MODULUS, overflow_mask).carry_propagate();

        debug_assert!(result.0[..LIMBS - 1].iter().all(|&l| (0..1 << 26).contains(&l)));
        debug_assert!((0..1 << 22).contains(&result.0[LIMBS - 1]));
        result
    }

    /// Reduces an already-[`normalize`](Self::normalize)d value into the
    /// exact canonical range `[0, p)` by comparing its full magnitude
    /// against the modulus and subtracting once if `self >= p`, per
    /// `sp_256_map_10`'s post-`mont_reduce` `sp_256_cmp_10` /
    /// `sp_256_cond_sub_10` pair.
    ///
    /// `normalize` alone only guards against the high limb spilling past
    /// its nominal 22-bit width, which is cheap and sufficient for
    /// Montgomery arithmetic's internal intermediates (every
    /// `mont_add`/`sub`/`dbl`/`tpl`/reduction in the reference uses that
    /// same heuristic) but does not guarantee a value below `p` — `p`'s
    /// own top limb already sits at that 22-bit ceiling, so a value
    /// congruent to `p` itself slips past the heuristic unreduced. The
    /// wire-format boundary (point-to-affine, immediately before
    /// serialization) is the one place the reference bothers with the
    /// more expensive exact compare, since that is the only place the
    /// canonical representative actually matters.
    pub(crate) fn full_reduce(&self) -> Self {
        let norm = self.normalize();
        let mask = 0i32.wrapping_sub((cmp_limbs(&norm.0, &MODULUS.0) >= 0) as i32);
        norm.cond_sub(&MODULUS, mask).carry_propagate()
    }

    /// Schoolbook 10x10 multiplication producing a 20-limb wide product
    /// in the same 26-bit radix, column sums carried via `i64`
    /// accumulators (headroom: 10 terms of `(2^26-1)^2 < 2^52` each,
    /// well under `2^63`).
    fn mul_wide(&self, rhs: &Self) -> Wide {
        let a = &self.0;
        let b = &rhs.0;
        let mut wide = [0i64; 2 * LIMBS];

        for i in 0..LIMBS {
            let ai = a[i] as i64;
            let mut carry = 0i64;
            for j in 0..LIMBS {
                let t = wide[i + j] + ai * (b[j] as i64) + carry;
                wide[i + j] = t & LIMB_MASK;
                carry = t >> 26;
            }
            wide[i + LIMBS] += carry;
        }

        let mut out = [0i64; 2 * LIMBS];
        let mut carry = 0i64;
        for i in 0..2 * LIMBS {
            let t = wide[i] + carry;
            out[i] = t & LIMB_MASK;
            carry = t >> 26;
        }
        out
    }

    /// `mul_add`: `r[0..10] += a * b_scalar`, a single-limb multiply-add
    /// with carry propagated into `r[10]`. Used inside Montgomery
    /// reduction.
    fn mul_add_limb(r: &mut [i64], a: &[i32; LIMBS], b_scalar: i64) {
        debug_assert!((0..1 << 26).contains(&b_scalar));
        let mut t: i64 = 0;
        for i in 0..LIMBS {
            t += b_scalar * (a[i] as i64) + r[i];
            r[i] = t & LIMB_MASK;
            t >>= 26;
        }
        r[LIMBS] += t;
    }

    /// Classical Montgomery reduction of a 20-limb wide value by `p`,
    /// using that the Montgomery multiplier `mp` equals 1 for this
    /// `(p, radix)` pair: the per-limb multiplier simplifies from
    /// `(a[i] * mp) mod 2^26` to plain `a[i] & mask`.
    fn montgomery_reduce(wide: Wide) -> Self {
        let mut a = [0i64; 2 * LIMBS + 1];
        a[..2 * LIMBS].copy_from_slice(&wide);

        for i in 0..LIMBS - 1 {
            let mu = a[i] & LIMB_MASK;
            Self::mul_add_limb(&mut a[i..i + LIMBS + 1], &MODULUS.0, mu);
            a[i + 1] += a[i] >> 26;
        }
        {
            let i = LIMBS - 1;
            // Narrower mask on the top limb of the reduction window,
            // consistent with the high-limb 22-bit convention; the
            // following cond_sub against the modulus handles any
            // residual range beyond it.
            let mu = a[i] & 0x3f_ffff;
            Self::mul_add_limb(&mut a[i..i + LIMBS + 1], &MODULUS.0, mu);
            a[i + 1] += a[i] >> 26;
            a[i] &= LIMB_MASK;
        }

        // Shift the high half down: the ten reduction steps above have
        // consumed limbs 0..8 (each driven to ~0 by construction) and
        // left the quotient-by-R result starting at limb index 9 — the
        // boundary limb, whose top 4 bits are spillover beyond its
        // nominal 22-bit width (10 limbs * 26 bits = 260 logical bits
        // against R's 256), folded into limb 10 and up via `<< 4`
        // rather than a clean 26-bit shift.
        let mut shifted = [0i32; LIMBS];
        let mut s = a[LIMBS];
        let mut n = a[LIMBS - 1] >> 22;
        for i in 0..LIMBS - 1 {
            n += (s & LIMB_MASK) << 4;
            shifted[i] = (n & LIMB_MASK) as i32;
            n >>= 26;
            s = a[LIMBS + 1 + i] + (s >> 26);
        }
        n += s << 4;
        shifted[LIMBS - 1] = n as i32;

        Self(shifted).normalize()
    }

    /// Returns `self * rhs mod p`. Operands and result share the same
    /// domain (Montgomery or ordinary) — Montgomery reduction here only
    /// removes the *wide-product* factor, never an extra `R` factor, so
    /// multiplying two Montgomery-form values yields a Montgomery-form
    /// product by construction.
    pub fn mul(&self, rhs: &Self) -> Self {
        Self::montgomery_reduce(self.mul_wide(rhs))
    }

    /// Returns `self * self mod p`.
    pub fn square(&self) -> Self {
        Self::montgomery_reduce(self.mul_wide(self))
    }

    /// `mont_add`: add then normalize, folding the single conditional
    /// correction into `normalize` itself.
    pub(crate) fn montgomery_add(&self, rhs: &Self) -> Self {
        self.add(rhs).normalize()
    }

    /// `mont_sub`: subtract then normalize; `normalize` already handles
    /// the possibly-negative high limb by conditionally adding the
    /// modulus back.
    pub(crate) fn montgomery_sub(&self, rhs: &Self) -> Self {
        self.sub(rhs).normalize()
    }

    /// `mont_dbl`: `self + self`, normalized.
    pub(crate) fn montgomery_dbl(&self) -> Self {
        self.montgomery_add(self)
    }

    /// `mont_tpl`: doubling followed by one more add, each step
    /// normalized, per the reference's `dbl` + `add` composition.
    pub(crate) fn montgomery_tpl(&self) -> Self {
        self.montgomery_dbl().montgomery_add(self)
    }

    /// `div2`: halves a normalized field element modulo `p` — if odd,
    /// add the (odd) modulus to make it even, carry-propagate, then
    /// shift right by one bit. Per `sp_256_div2_10`, the carry step here
    /// is a plain `sp_256_norm_10` (ripple the carries and mask each limb
    /// to 26 bits), *not* the fuller [`normalize`](Self::normalize): the
    /// conditional add can only ever push the value from `[0, p)` up to
    /// `[0, 2p)`, and halving a value in that wider range still lands
    /// back inside `[0, p)`, so there is nothing left to reduce. Calling
    /// the fuller `normalize` here would be actively wrong — its
    /// overflow check would subtract the modulus back out before the
    /// shift, silently discarding the bit the conditional add was
    /// meant to add in the first place.
    pub(crate) fn montgomery_half(&self) -> Self {
        let odd_mask = 0i32.wrapping_sub(self.0[0] & 1);
        let made_even = self.cond_add(&MODULUS, odd_mask).carry_propagate();
        made_even.rshift1()
    }

    /// `R mod p` where `R = 2^256`, used to lift a value into
    /// Montgomery form via [`FieldElement::into_montgomery`]. Computed
    /// per-call via the matrix-based `mod_mul_norm` identity below
    /// rather than stored as a constant, to keep a single source of
    /// truth for the conversion (`sp_256_mod_mul_norm_10`).
    fn to_montgomery(self) -> Self {
        let norm = self.normalize();
        let w = &norm.0;

        // Repack the ten 26-bit limbs into eight 32-bit limbs.
        let mut a32 = [0i64; 8];
        a32[0] = (w[0] as i64 | (w[1] as i64) << 26) & 0xffff_ffff;
        a32[1] = (((w[1] as i64) >> 6) | (w[2] as i64) << 20) & 0xffff_ffff;
        a32[2] = (((w[2] as i64) >> 12) | (w[3] as i64) << 14) & 0xffff_ffff;
        a32[3] = (((w[3] as i64) >> 18) | (w[4] as i64) << 8) & 0xffff_ffff;
        a32[4] = (((w[4] as i64) >> 24) | (w[5] as i64) << 2 | (w[6] as i64) << 28) & 0xffff_ffff;
        a32[5] = (((w[6] as i64) >> 4) | (w[7] as i64) << 22) & 0xffff_ffff;
        a32[6] = (((w[7] as i64) >> 10) | (w[8] as i64) << 16) & 0xffff_ffff;
        a32[7] = (((w[8] as i64) >> 16) | (w[9] as i64) << 10) & 0xffff_ffff;

        // R mod p expressed as a sparse signed combination of those
        // limbs (the matrix rows for the P-256 mod_mul_norm identity).
        let mut t = [0i64; 8];
        t[0] = a32[0] + a32[1] - a32[3] - a32[4] - a32[5] - a32[6];
        t[1] = a32[1] + a32[2] - a32[4] - a32[5] - a32[6] - a32[7];
        t[2] = a32[2] + a32[3] - a32[5] - a32[6] - a32[7];
        t[3] = -a32[0] - a32[1] + 2 * a32[3] + 2 * a32[4] + a32[5] - a32[7];
        t[4] = -a32[1] - a32[2] + 2 * a32[4] + 2 * a32[5] + a32[6];
        t[5] = -a32[2] - a32[3] + 2 * a32[5] + 2 * a32[6] + a32[7];
        t[6] = -a32[0] - a32[1] + a32[5] + 3 * a32[6] + 2 * a32[7];
        t[7] = a32[0] - a32[2] - a32[3] - a32[4] - a32[5] + 3 * a32[7];

        for i in 0..7 {
            t[i + 1] += t[i] >> 32;
            t[i] &= 0xffff_ffff;
        }
        let o = t[7] >> 32;
        t[7] &= 0xffff_ffff;
        t[0] += o;
        t[3] -= o;
        t[6] -= o;
        t[7] += o;
        for i in 0..7 {
            t[i + 1] += t[i] >> 32;
            t[i] &= 0xffff_ffff;
        }

        let mut r = [0i32; LIMBS];
        r[0] = (t[0] & LIMB_MASK) as i32;
        r[1] = (((t[0] >> 26) | (t[1] << 6)) & LIMB_MASK) as i32;
        r[2] = (((t[1] >> 20) | (t[2] << 12)) & LIMB_MASK) as i32;
        r[3] = (((t[2] >> 14) | (t[3] << 18)) & LIMB_MASK) as i32;
        r[4] = (((t[3] >> 8) | (t[4] << 24)) & LIMB_MASK) as i32;
        r[5] = ((t[4] >> 2) & LIMB_MASK) as i32;
        r[6] = (((t[4] >> 28) | (t[5] << 4)) & LIMB_MASK) as i32;
        r[7] = (((t[5] >> 22) | (t[6] << 10)) & LIMB_MASK) as i32;
        r[8] = (((t[6] >> 16) | (t[7] << 16)) & LIMB_MASK) as i32;
        r[9] = (t[7] >> 10) as i32;

        Self(r).normalize()
    }

    /// Lifts an ordinary-domain field element into Montgomery form:
    /// `r = a * R mod p`.
    pub fn into_montgomery(self) -> Self {
        self.to_montgomery()
    }

    /// Removes the Montgomery factor from a value already reduced to
    /// canonical range: one pass of Montgomery reduction treating
    /// `self` as the low half of a wide value (high half zero).
    pub fn from_montgomery(self) -> Self {
        let mut wide = [0i64; 2 * LIMBS];
        for (w, &limb) in wide.iter_mut().zip(self.0.iter()) {
            *w = limb as i64;
        }
        Self::montgomery_reduce(wide)
    }

    /// `a^(p-2) mod p`, the Fermat-little-theorem inverse, computed over
    /// Montgomery-form operands by square-and-multiply from the MSB of
    /// the public constant `p - 2` down to its LSB. The exponent is
    /// public, so the bit-dependent branch here does not leak anything
    /// about the (secret) base.
    pub fn montgomery_invert(&self) -> Self {
        // p - 2 = 0xffffffff00000001000000000000000000000000fffffffffffffffffffffffd
        const EXPONENT: [u32; 8] = [
            0xffff_ffff,
            0x0000_0001,
            0x0000_0000,
            0x0000_0000,
            0x0000_0000,
            0xffff_ffff,
            0xffff_ffff,
            0xffff_fffd,
        ];

        let mut t = *self;
        for i in (0..255).rev() {
            t = t.square();
            let word = EXPONENT[7 - i / 32];
            if (word >> (i % 32)) & 1 == 1 {
                t = t.mul(self);
            }
        }
        t
    }
}

impl Default for FieldElement {
    fn default() -> Self {
        Self::ZERO
    }
}

impl ConditionallySelectable for FieldElement {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        let mut r = [0i32; LIMBS];
        for i in 0..LIMBS {
            r[i] = i32::conditional_select(&a.0[i], &b.0[i], choice);
        }
        Self(r)
    }
}

impl ConstantTimeEq for FieldElement {
    fn ct_eq(&self, other: &Self) -> Choice {
        limbs_eq(&self.0, &other.0)
    }
}

impl Zeroize for FieldElement {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

/// Constant-time `a == b` test on raw limb vectors, following
/// `sp_256_cmp_equal_10` in the reference implementation: OR together
/// the XORs of every limb and compare the accumulator to zero, never
/// short-circuiting.
pub(crate) fn limbs_eq(a: &[i32; LIMBS], b: &[i32; LIMBS]) -> Choice {
    let mut acc = 0i32;
    for i in 0..LIMBS {
        acc |= a[i] ^ b[i];
    }
    acc.ct_eq(&0)
}

/// Constant-time three-way magnitude compare following `sp_256_cmp_10`'s
/// cascading-mask construction: walk limbs from the most significant
/// down, and once any limb differs, every lower-index limb's
/// contribution is masked out by `0 - (r == 0)` so only the first
/// (highest-index) difference survives. Returns a negative, zero, or
/// positive `i32` mirroring that limb's sign, never a branch on which
/// limb differed.
pub(crate) fn cmp_limbs(a: &[i32; LIMBS], b: &[i32; LIMBS]) -> i32 {
    let mut r: i32 = 0;
    for i in (0..LIMBS).rev() {
        let still_equal = 0i32.wrapping_sub((r == 0) as i32);
        r |= (a[i] - b[i]) & still_equal;
    }
    r
}

/// `p`, exposed for the point-addition doubling predicate which needs
/// `p - Q.y` as a constant-time negation, and for Montgomery
/// add/sub/dbl/tpl's conditional modulus correction.
pub(crate) fn modulus() -> FieldElement {
    MODULUS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_bytes() {
        let bytes = [0x42u8; 32];
        let fe = FieldElement::from_bytes(&bytes);
        assert_eq!(fe.to_bytes(), bytes);
    }

    #[test]
    fn round_trip_zero_and_one() {
        assert_eq!(FieldElement::ZERO.to_bytes(), [0u8; 32]);
        let mut one = [0u8; 32];
        one[31] = 1;
        assert_eq!(FieldElement::ONE.to_bytes(), one);
    }

    #[test]
    fn montgomery_round_trip() {
        let mut bytes = [0u8; 32];
        bytes[31] = 7;
        let a = FieldElement::from_bytes(&bytes).normalize();
        let back = a.into_montgomery().from_montgomery().normalize();
        assert_eq!(back.to_bytes(), a.to_bytes());
    }

    #[test]
    fn montgomery_mul_by_one_is_identity() {
        let mut bytes = [0u8; 32];
        bytes[0] = 0x12;
        bytes[31] = 0x34;
        let a = FieldElement::from_bytes(&bytes).normalize().into_montgomery();
        let one_mont = FieldElement::ONE.into_montgomery();
        let product = a.mul(&one_mont).normalize();
        assert_eq!(product.to_bytes(), a.normalize().to_bytes());
    }

    #[test]
    fn inverse_of_one_is_one() {
        let one_mont = FieldElement::ONE.into_montgomery();
        let inv = one_mont.montgomery_invert();
        assert_eq!(inv.normalize().to_bytes(), one_mont.normalize().to_bytes());
    }

    #[test]
    fn inverse_round_trip() {
        let mut bytes = [0u8; 32];
        bytes[5] = 0xaa;
        bytes[31] = 0x03;
        let a = FieldElement::from_bytes(&bytes).normalize().into_montgomery();
        let inv = a.montgomery_invert();
        let product = a.mul(&inv).from_montgomery().normalize();
        assert_eq!(product.to_bytes(), FieldElement::ONE.to_bytes());
    }

    #[test]
    fn montgomery_sub_wraps_correctly() {
        let zero_mont = FieldElement::ZERO.into_montgomery();
        let one_mont = FieldElement::ONE.into_montgomery();
        let neg_one = zero_mont.montgomery_sub(&one_mont);
        let back = neg_one.montgomery_add(&one_mont).normalize();
        assert_eq!(back.to_bytes(), zero_mont.normalize().to_bytes());
    }

    #[test]
    fn cmp_equal_detects_any_differing_limb() {
        let a = [1i32, 2, 3, 4, 5, 6, 7, 8, 9, 10];
        let mut b = a;
        assert_eq!(limbs_eq(&a, &b).unwrap_u8(), 1);
        b[7] ^= 1;
        assert_eq!(limbs_eq(&a, &b).unwrap_u8(), 0);
    }

    #[test]
    fn cmp_limbs_orders_by_highest_differing_limb() {
        let a = [1i32, 2, 3, 4, 5, 6, 7, 8, 9, 10];
        let b = a;
        assert_eq!(cmp_limbs(&a, &b), 0);

        // A difference in a low limb is outranked by a difference higher up.
        let mut higher_greater = a;
        higher_greater[9] += 1;
        higher_greater[0] -= 100;
        assert!(cmp_limbs(&higher_greater, &b) > 0);

        let mut lower_only = a;
        lower_only[0] += 1;
        assert!(cmp_limbs(&lower_only, &b) > 0);
        assert!(cmp_limbs(&b, &lower_only) < 0);
    }

    #[test]
    fn full_reduce_collapses_modulus_itself_to_zero() {
        // `MODULUS` passes `normalize`'s cheap high-limb-overflow check
        // unchanged (its own top limb sits exactly at that check's
        // ceiling), but is congruent to zero and must collapse to it
        // under the exact compare `full_reduce` performs.
        let at_modulus = MODULUS.normalize();
        assert_eq!(at_modulus.0, MODULUS.0, "sanity: normalize is a no-op on p itself");
        assert_eq!(MODULUS.full_reduce().to_bytes(), [0u8; 32]);
    }
}
