//! Algebraic property tests for the exposed field/point/scalar engine.
//!
//! Requires the `expose-field` feature (`cargo test --features
//! expose-field`), since these exercise the internals directly rather
//! than the public ECDH entry point.

#![cfg(feature = "expose-field")]

use p256_ecdh::{base_point, base_scalar_mul, FieldElement, ProjectivePoint, Scalar};
use proptest::prelude::*;

fn arb_field_bytes() -> impl Strategy<Value = [u8; 32]> {
    any::<[u8; 32]>()
}

proptest! {
    #[test]
    fn montgomery_round_trip(bytes in arb_field_bytes()) {
        let a = FieldElement::from_bytes(&bytes).normalize();
        let round_tripped = a.into_montgomery().from_montgomery().normalize();
        prop_assert_eq!(a.to_bytes(), round_tripped.to_bytes());
    }

    #[test]
    fn serialization_round_trip(bytes in arb_field_bytes()) {
        let a = FieldElement::from_bytes(&bytes).normalize();
        prop_assert_eq!(FieldElement::from_bytes(&a.to_bytes()).normalize().to_bytes(), a.to_bytes());
    }

    #[test]
    fn mul_by_one_is_identity(bytes in arb_field_bytes()) {
        let a = FieldElement::from_bytes(&bytes).normalize().into_montgomery();
        let one = FieldElement::ONE.into_montgomery();
        prop_assert_eq!(a.mul(&one).normalize().to_bytes(), a.normalize().to_bytes());
    }

    #[test]
    fn inverse_times_self_is_one(bytes in arb_field_bytes()) {
        let a = FieldElement::from_bytes(&bytes).normalize();
        // Skip the zero case: zero has no multiplicative inverse, and
        // the Fermat exponentiation applied to zero yields zero, not one.
        prop_assume!(a.to_bytes() != [0u8; 32]);
        let a_mont = a.into_montgomery();
        let inv = a_mont.montgomery_invert();
        let product = a_mont.mul(&inv).from_montgomery().normalize();
        prop_assert_eq!(product.to_bytes(), FieldElement::ONE.to_bytes());
    }

    /// A scalar whose significant bits occupy only the low byte or two
    /// still drives the ladder through the same 256 iterations as any
    /// other scalar — a long run of leading zero bits must not change
    /// the result. Cross-checked against repeated point addition rather
    /// than the ladder itself, so the two don't share a bug.
    #[test]
    fn leading_zero_prefix_does_not_change_scalar_mult(k in 0u16..2000) {
        let mut bytes = [0u8; 32];
        bytes[30..].copy_from_slice(&k.to_be_bytes());
        let scalar = Scalar::from_bytes(bytes);

        let via_ladder = base_scalar_mul(&scalar).to_affine();

        let g = base_point();
        let mut acc = ProjectivePoint::identity();
        for _ in 0..k {
            acc = acc.add(&g);
        }
        let via_repeated_addition = acc.to_affine();

        prop_assert_eq!(via_ladder.x.to_bytes(), via_repeated_addition.x.to_bytes());
        prop_assert_eq!(via_ladder.y.to_bytes(), via_repeated_addition.y.to_bytes());
    }
}
