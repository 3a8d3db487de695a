//! The P-256 arithmetic engine: field elements, projective points, and
//! scalar multiplication.
//!
//! Exposed publicly only behind the `expose-field` feature — the
//! crate's primary contract is [`crate::ecdh`], not these primitives,
//! mirroring how `p256` keeps its own `arithmetic` module behind a
//! similarly named feature.

pub mod field;
pub mod point;
pub mod scalar;

pub use field::FieldElement;
pub use point::{AffinePoint, ProjectivePoint};
pub use scalar::{base_point, base_scalar_mul, scalar_mul, Scalar};
