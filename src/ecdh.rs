//! The public entry point: ephemeral key generation and shared-secret
//! derivation from a peer's uncompressed P-256 point.
//!
//! Mirrors `curve_P256_compute_pubkey_and_premaster` in
//! `examples/original_source/networking/tls_sp_c32.c`: generate a
//! private scalar, derive our public point from the base point, then
//! derive the shared X-coordinate from the peer's point.

use rand_core::TryRngCore;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::arithmetic::point::ProjectivePoint;
use crate::arithmetic::scalar::{base_scalar_mul, scalar_mul, Scalar};
use crate::arithmetic::FieldElement;

/// An uncompressed P-256 public point, `X‖Y` big-endian, 64 bytes
/// total. Carries no leading `0x04` tag and is not validated to be
/// on-curve — per the engine's contract, that is the caller's
/// responsibility.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PublicPoint(pub [u8; 64]);

/// A 32-byte ECDH premaster secret: the X-coordinate of `priv * peer`.
/// Zeroized on drop, since unlike the public point this value must not
/// linger in memory once consumed.
#[derive(Clone, ZeroizeOnDrop)]
pub struct SharedSecret([u8; 32]);

impl SharedSecret {
    /// Borrows the 32-byte secret.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl PublicPoint {
    fn from_point(point: &ProjectivePoint) -> Self {
        let affine = point.to_affine();
        let mut bytes = [0u8; 64];
        bytes[..32].copy_from_slice(&affine.x.to_bytes());
        bytes[32..].copy_from_slice(&affine.y.to_bytes());
        Self(bytes)
    }
}

/// Parses a 64-byte `X‖Y` buffer into a Jacobian projective point with
/// `Z = 1`, per `sp_256_point_from_bin2x32`. Malformed input (a
/// coordinate pair not on the curve, or `>= p`) is accepted without
/// validation or crash, consistent with the engine's total-function
/// contract; the resulting point is simply not on the curve and
/// downstream arithmetic on it is still well-defined, if meaningless.
fn point_from_bytes(buf: &[u8; 64]) -> ProjectivePoint {
    let mut x_bytes = [0u8; 32];
    let mut y_bytes = [0u8; 32];
    x_bytes.copy_from_slice(&buf[..32]);
    y_bytes.copy_from_slice(&buf[32..]);

    let x = FieldElement::from_bytes(&x_bytes);
    let y = FieldElement::from_bytes(&y_bytes);
    ProjectivePoint::from_affine_plain(x, y)
}

/// `compute_pubkey_and_premaster`: the sole public entry point of the
/// engine.
///
/// 1. Generates a fresh private scalar from `rng`.
/// 2. Derives our ephemeral public point `priv * G`.
/// 3. Derives the shared secret `priv * peer_pubkey`, keeping only its
///    X-coordinate.
///
/// Total with respect to its inputs except for the randomness source:
/// the only fallible step is drawing the private scalar's bytes.
pub fn compute_pubkey_and_premaster<R: TryRngCore + ?Sized>(
    rng: &mut R,
    peer_pubkey: &[u8; 64],
) -> Result<(PublicPoint, SharedSecret), R::Error> {
    let mut priv_scalar = Scalar::generate(rng)?;

    let our_point = base_scalar_mul(&priv_scalar);
    let pubkey = PublicPoint::from_point(&our_point);

    let peer_point = point_from_bytes(peer_pubkey);
    let shared_point = scalar_mul(&peer_point, &priv_scalar);
    let shared_affine = shared_point.to_affine();

    let premaster = SharedSecret(shared_affine.x.to_bytes());

    priv_scalar.zeroize();
    let mut our_point = our_point;
    let mut peer_point = peer_point;
    let mut shared_point = shared_point;
    our_point.zeroize();
    peer_point.zeroize();
    shared_point.zeroize();

    Ok((pubkey, premaster))
}

/// Convenience wrapper over [`compute_pubkey_and_premaster`] that draws
/// randomness from the operating system via `rand_core::OsRng`,
/// analogous to the teacher crate's `getrandom`-gated
/// `EphemeralSecret::random`.
#[cfg(feature = "std")]
pub fn compute_pubkey_and_premaster_os_rng(
    peer_pubkey: &[u8; 64],
) -> Result<(PublicPoint, SharedSecret), rand_core::OsError> {
    let mut rng = rand_core::OsRng;
    compute_pubkey_and_premaster(&mut rng, peer_pubkey)
}
