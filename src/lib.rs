#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![doc = include_str!("../README.md")]
#![doc(
    html_logo_url = "https://raw.githubusercontent.com/RustCrypto/meta/master/logo.svg",
    html_favicon_url = "https://raw.githubusercontent.com/RustCrypto/meta/master/logo.svg"
)]
#![forbid(unsafe_code)]
#![warn(
    clippy::mod_module_files,
    clippy::unwrap_used,
    missing_docs,
    rust_2018_idioms,
    unused_lifetimes,
    unused_qualifications
)]

#[cfg(feature = "alloc")]
extern crate alloc;

#[cfg(feature = "expose-field")]
pub mod arithmetic;
#[cfg(not(feature = "expose-field"))]
mod arithmetic;

pub mod ecdh;

#[cfg(feature = "expose-field")]
pub use arithmetic::{base_scalar_mul, scalar_mul, AffinePoint, FieldElement, ProjectivePoint, Scalar};

pub use ecdh::{compute_pubkey_and_premaster, PublicPoint, SharedSecret};

#[cfg(feature = "std")]
pub use ecdh::compute_pubkey_and_premaster_os_rng;
