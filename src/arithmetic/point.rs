//! Jacobian projective point arithmetic over the P-256 curve
//! `y^2 = x^3 - 3x + b`, all coordinates held in Montgomery form.
//!
//! Doubling and addition follow the formulas in
//! `examples/original_source/networking/tls_sp_c32.c`
//! (`sp_256_proj_point_dbl_10`/`sp_256_proj_point_add_10`), translated
//! from that source's two-entry destination-pointer trick into
//! `subtle::ConditionallySelectable`: both routines unconditionally
//! compute the full formula, then conditionally select between the
//! freshly computed point and the untouched input so that the identity
//! passes through without a data-dependent branch.

use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};
use zeroize::Zeroize;

use super::field::FieldElement;

/// A point in Jacobian projective coordinates, `(X/Z^2, Y/Z^3)` in
/// affine terms. Coordinates are always held in Montgomery form while a
/// point is "live" inside the point/scalar arithmetic layers; only
/// [`ProjectivePoint::to_affine`] removes the Montgomery factor.
///
/// `infinity` is a public flag, not a secret: the identity shows up only
/// as the scalar-multiplication accumulator's starting value, at a fixed
/// iteration (the first), so branching on it leaks nothing about the
/// scalar. Coordinate values are otherwise ignored whenever `infinity`
/// is set, per INV-4.
#[derive(Clone, Copy, Debug)]
pub struct ProjectivePoint {
    pub(crate) x: FieldElement,
    pub(crate) y: FieldElement,
    pub(crate) z: FieldElement,
    pub(crate) infinity: Choice,
}

/// The same point with `Z` normalized to 1, i.e. the serialization form.
#[derive(Clone, Copy, Debug)]
pub struct AffinePoint {
    pub x: FieldElement,
    pub y: FieldElement,
}

impl ProjectivePoint {
    /// The point at infinity (group identity). Coordinates are set to
    /// `(1, 1, 0)` in Montgomery form, matching the reference
    /// implementation's convention of never reading them while
    /// `infinity` is set but keeping them well-formed regardless.
    pub fn identity() -> Self {
        Self {
            x: FieldElement::ONE.into_montgomery(),
            y: FieldElement::ONE.into_montgomery(),
            z: FieldElement::ZERO,
            infinity: Choice::from(1),
        }
    }

    /// Lifts an affine point (ordinary-domain coordinates) into Jacobian
    /// projective, Montgomery-form coordinates with `Z = 1`.
    pub fn from_affine_plain(x: FieldElement, y: FieldElement) -> Self {
        Self {
            x: x.into_montgomery(),
            y: y.into_montgomery(),
            z: FieldElement::ONE.into_montgomery(),
            infinity: Choice::from(0),
        }
    }

    /// Doubles `self`, per `sp_256_proj_point_dbl_10`.
    ///
    /// ```text
    /// T1 = Z^2
    /// Z' = 2*Y*Z
    /// T2 = X - T1
    /// T1 = X + T1
    /// T2 = T1*T2      // = X^2 - Z^4
    /// T1 = 3*T2       // M = 3(X-Z^2)(X+Z^2)
    /// Y' = (2Y)^2      // = 4Y^2
    /// T2 = (Y')^2 / 2  // = 8Y^4
    /// Y' = Y'*X       // = 4XY^2 = S
    /// X' = T1^2 - 2*Y'
    /// Y' = (Y' - X')*T1 - T2
    /// ```
    ///
    /// Always executes the formula in full; the result is discarded in
    /// favor of an unchanged copy of `self` when `self` is the identity,
    /// selected via [`ConditionallySelectable`] rather than a branch.
    pub fn double(&self) -> Self {
        let t1 = self.z.square();
        let z_new = self.y.mul(&self.z).montgomery_dbl();
        let t2 = self.x.montgomery_sub(&t1);
        let t1 = self.x.montgomery_add(&t1);
        let t2 = t1.mul(&t2);
        let t1 = t2.montgomery_tpl();
        let y_sq4 = self.y.square().montgomery_dbl().montgomery_dbl();
        let t2 = y_sq4.square().montgomery_half();
        let s = y_sq4.mul(&self.x);
        let x_new = t1.square().montgomery_sub(&s.montgomery_dbl());
        let y_new = s.montgomery_sub(&x_new).mul(&t1).montgomery_sub(&t2);

        let doubled = Self {
            x: x_new,
            y: y_new,
            z: z_new,
            infinity: Choice::from(0),
        };

        Self::conditional_select(&doubled, self, self.infinity)
    }

    /// Adds `self` and `rhs`, per `sp_256_proj_point_add_10`.
    ///
    /// ```text
    /// U1 = X1*Z2^2    U2 = X2*Z1^2
    /// S1 = Y1*Z2^3    S2 = Y2*Z1^3
    /// H  = U2 - U1    R  = S2 - S1
    /// Z3 = Z1*Z2*H
    /// X3 = R^2 - H^3 - 2*U1*H^2
    /// Y3 = R*(U1*H^2 - X3) - S1*H^3
    /// ```
    ///
    /// Detects the doubling case (equal X, equal Z, and Y matching
    /// either Y2 or its negation) via constant-time predicates combined
    /// with bitwise AND/OR, and delegates to [`ProjectivePoint::double`]
    /// rather than running the addition formula (which degenerates at
    /// `H = 0`). Infinity in either operand is handled the same way as
    /// doubling: the formula always runs, and the correct operand is
    /// selected over the computed sum afterward.
    pub fn add(&self, rhs: &Self) -> Self {
        let z1_sq = self.z.square();
        let z2_sq = rhs.z.square();
        let u1 = self.x.mul(&z2_sq);
        let u2 = rhs.x.mul(&z1_sq);
        let s1 = self.y.mul(&rhs.z).mul(&z2_sq);
        let s2 = rhs.y.mul(&self.z).mul(&z1_sq);

        let neg_rhs_y = super::field::modulus().montgomery_sub(&rhs.y);
        let x_eq = self.x.normalize().ct_eq(&rhs.x.normalize());
        let z_eq = self.z.normalize().ct_eq(&rhs.z.normalize());
        let y_eq = self.y.normalize().ct_eq(&rhs.y.normalize());
        let y_eq_neg = self.y.normalize().ct_eq(&neg_rhs_y.normalize());
        let is_double = x_eq & z_eq & (y_eq | y_eq_neg);

        let h = u2.montgomery_sub(&u1);
        let r = s2.montgomery_sub(&s1);
        let z3 = self.z.mul(&rhs.z).mul(&h);
        let h2 = h.square();
        let h3 = h2.mul(&h);
        let u1h2 = u1.mul(&h2);
        let x3 = r.square().montgomery_sub(&h3).montgomery_sub(&u1h2.montgomery_dbl());
        let y3 = u1h2.montgomery_sub(&x3).mul(&r).montgomery_sub(&s1.mul(&h3));

        let summed = Self {
            x: x3,
            y: y3,
            z: z3,
            infinity: Choice::from(0),
        };

        let doubled = self.double();
        let result = Self::conditional_select(&summed, &doubled, is_double);

        // self is identity -> rhs; rhs is identity -> self; neither -> result.
        let result = Self::conditional_select(&result, rhs, self.infinity);
        Self::conditional_select(&result, self, rhs.infinity)
    }

    /// Maps a Jacobian point to affine coordinates, removing the
    /// Montgomery factor. Per `sp_256_map_10`:
    /// `z_inv = mont_inv(Z); z2 = z_inv^2; z3 = z2*z_inv;`
    /// `X' = X*z2` reduced out of Montgomery form, then fully reduced
    /// against the exact modulus (not just `normalize`'s cheap
    /// high-limb check — this is the one place the reference bothers
    /// with `sp_256_cmp_10`'s exact compare, since the result is about
    /// to be serialized and must be the unique representative `< p`),
    /// same for `Y'` with `z3`.
    pub fn to_affine(&self) -> AffinePoint {
        let z_inv = self.z.montgomery_invert();
        let z2 = z_inv.square();
        let z3 = z2.mul(&z_inv);

        let x = self.x.mul(&z2).from_montgomery().full_reduce();
        let y = self.y.mul(&z3).from_montgomery().full_reduce();

        AffinePoint { x, y }
    }
}

impl ConditionallySelectable for ProjectivePoint {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Self {
            x: FieldElement::conditional_select(&a.x, &b.x, choice),
            y: FieldElement::conditional_select(&a.y, &b.y, choice),
            z: FieldElement::conditional_select(&a.z, &b.z, choice),
            infinity: Choice::conditional_select(&a.infinity, &b.infinity, choice),
        }
    }
}

impl Zeroize for ProjectivePoint {
    fn zeroize(&mut self) {
        self.x.zeroize();
        self.y.zeroize();
        self.z.zeroize();
        self.infinity = Choice::from(0);
    }
}

impl Zeroize for AffinePoint {
    fn zeroize(&mut self) {
        self.x.zeroize();
        self.y.zeroize();
    }
}
