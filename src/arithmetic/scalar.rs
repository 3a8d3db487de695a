//! Constant-time scalar multiplication and ephemeral scalar generation.
//!
//! The base point and the double-and-add loop follow
//! `sp_256_ecc_mulmod_10`/`sp_256_ecc_mulmod_base_10` in
//! `examples/original_source/networking/tls_sp_c32.c`; scalar generation
//! follows `sp_256_ecc_gen_k_10`.

use rand_core::TryRngCore;
use subtle::{Choice, ConditionallySelectable};
use zeroize::Zeroize;

use super::field::FieldElement;
use super::point::ProjectivePoint;

/// A 256-bit scalar, stored as the big-endian bytes produced by
/// [`Scalar::generate`]. Kept in byte form (rather than limb form)
/// since the only consumer, [`scalar_mul`], walks it bit by bit.
#[derive(Clone, Copy, Debug)]
pub struct Scalar(pub(crate) [u8; 32]);

impl Scalar {
    /// Builds a scalar directly from its big-endian byte representation,
    /// without the clamp [`Scalar::generate`] applies. Exposed alongside
    /// the rest of `arithmetic` behind `expose-field` for testing values
    /// (e.g. small scalars with a long run of leading zero bits) that
    /// `generate`'s RNG-driven path can't target directly.
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Draws 32 random bytes from `rng` and clamps them into the range
    /// `[1, n-1]` via the single-shot clamp of `sp_256_ecc_gen_k_10`:
    /// the top limb (bits 252..255, here the top six bits of byte 0) is
    /// capped so the value cannot reach the group order, and a
    /// resulting all-zero scalar is bumped to 1. This is not rejection
    /// sampling — spec's accepted design note: a negligible bias in the
    /// top bits is traded for a single RNG draw.
    pub fn generate<R: TryRngCore + ?Sized>(rng: &mut R) -> Result<Self, R::Error> {
        let mut bytes = [0u8; 32];
        rng.try_fill_bytes(&mut bytes)?;

        // Limb 9 (bits 234..255) must not exceed 2^22 - 2. In big-endian
        // byte terms that limb occupies the top 22 bits, i.e. all of
        // byte 0 and the high 6 bits of byte 1.
        let limb9 = ((bytes[0] as u32) << 14) | ((bytes[1] as u32) << 6) | ((bytes[2] as u32) >> 2);
        if limb9 >= 0x003f_ffff {
            let clamped = 0x003f_fffe_u32;
            bytes[0] = (clamped >> 14) as u8;
            bytes[1] = ((clamped >> 6) & 0xff) as u8;
            bytes[2] = (bytes[2] & 0x03) | (((clamped & 0x3f) << 2) as u8);
        }

        // `sp_256_ecc_gen_k_10`'s SIMPLIFY branch bumps only the low
        // 26-bit limb (`k[0]`), not the whole scalar: test the bytes
        // that make up limb 0 and set its low bit when they're all zero.
        if (bytes[31] as u32) | (bytes[30] as u32) | ((bytes[29] & 0x03) as u32) == 0 {
            bytes[31] |= 1;
        }

        Ok(Self(bytes))
    }

    /// Returns the i-th bit (0 = LSB) of the scalar, big-endian byte
    /// storage notwithstanding.
    fn bit(&self, i: usize) -> u8 {
        (self.0[31 - i / 8] >> (i % 8)) & 1
    }
}

impl Zeroize for Scalar {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

/// `scalar_mul`: constant-time left-to-right double-and-add with two
/// working accumulators, per `sp_256_ecc_mulmod_10`.
///
/// Conceptually: `t[0]` starts at infinity, `t[1]` starts at `point`;
/// the invariant `t[1] = t[0] + point` is maintained throughout, and at
/// each bit `y` of the scalar (MSB first) the routine folds `t[0]` and
/// `t[1]` together into the slot *not* selected by `y`, then doubles
/// the slot selected by `y` in place. After 256 steps `t[0]` holds
/// `k * point`.
pub fn scalar_mul(point: &ProjectivePoint, k: &Scalar) -> ProjectivePoint {
    let mut t0 = ProjectivePoint::identity();
    let mut t1 = *point;

    for i in (0..256).rev() {
        let bit = Choice::from(k.bit(i));
        ProjectivePoint::conditional_swap(&mut t0, &mut t1, bit);
        let sum = t0.add(&t1);
        t0 = t0.double();
        t1 = sum;
        ProjectivePoint::conditional_swap(&mut t0, &mut t1, bit);
    }

    t0
}

/// `base_scalar_mul`: [`scalar_mul`] specialized to the P-256 generator.
/// No precomputed table is used, matching the reference implementation.
pub fn base_scalar_mul(k: &Scalar) -> ProjectivePoint {
    scalar_mul(&base_point(), k)
}

/// The P-256 base point `G`, lifted into Jacobian projective,
/// Montgomery-form coordinates with `Z = 1`.
pub fn base_point() -> ProjectivePoint {
    let gx = FieldElement::from_bytes(&BASE_X).normalize();
    let gy = FieldElement::from_bytes(&BASE_Y).normalize();
    ProjectivePoint::from_affine_plain(gx, gy)
}

const BASE_X: [u8; 32] = [
    0x6b, 0x17, 0xd1, 0xf2, 0xe1, 0x2c, 0x42, 0x47, 0xf8, 0xbc, 0xe6, 0xe5, 0x63, 0xa4, 0x40, 0xf2,
    0x77, 0x03, 0x7d, 0x81, 0x2d, 0xeb, 0x33, 0xa0, 0xf4, 0xa1, 0x39, 0x45, 0xd8, 0x98, 0xc2, 0x96,
];

const BASE_Y: [u8; 32] = [
    0x4f, 0xe3, 0x42, 0xe2, 0xfe, 0x1a, 0x7f, 0x9b, 0x8e, 0xe7, 0xeb, 0x4a, 0x7c, 0x0f, 0x9e, 0x16,
    0x2b, 0xce, 0x33, 0x57, 0x6b, 0x31, 0x5e, 0xce, 0xcb, 0xb6, 0x40, 0x68, 0x37, 0xbf, 0x51, 0xf5,
];
