#[cfg(all(feature = "singlethreaded", feature = "multithreaded"))]
compile_error!("`singlethreaded` and `multithreaded` cannot be enabled simultaneously");

use constants::{
    BYTES_PER_BLOB, BYTES_PER_COMMITMENT, BYTES_PER_FIELD_ELEMENT, FIELD_ELEMENTS_PER_BLOB,
};

mod errors;
mod kzg_open;
mod prover;
mod trusted_setup;
pub(crate) mod verifier;

pub mod constants;
mod serialization;

pub use errors::{Error, ProverError, SerializationError, VerifierError};
use kzg_open::{prover::Prover, verifier::Verifier};
pub use trusted_setup::TrustedSetup;

/// A reference to a blob's raw byte representation.
pub type BlobRef<'a> = &'a [u8; BYTES_PER_BLOB];
/// A serialized, compressed KZG commitment to a blob's polynomial.
pub type KZGCommitment = [u8; BYTES_PER_COMMITMENT];
/// A serialized, compressed KZG opening proof.
pub type KZGProof = [u8; BYTES_PER_COMMITMENT];
/// A serialized scalar at which a polynomial is opened.
pub type KZGOpeningPoint = [u8; BYTES_PER_FIELD_ELEMENT];
/// A serialized scalar that a polynomial evaluates to at an opening point.
pub type KZGOpeningEvaluation = [u8; BYTES_PER_FIELD_ELEMENT];

/// Holds the prover and verifier state needed to compute and check
/// single-point KZG opening proofs for EIP-4844 blobs.
pub struct Context {
    prover: Prover,
    verifier: Verifier,
}

impl Default for Context {
    fn default() -> Self {
        let trusted_setup = TrustedSetup::default();
        Self::new(&trusted_setup)
    }
}

impl Context {
    pub fn new(trusted_setup: &TrustedSetup) -> Self {
        Self {
            prover: Prover::new(FIELD_ELEMENTS_PER_BLOB, trusted_setup),
            verifier: Verifier::new(FIELD_ELEMENTS_PER_BLOB, trusted_setup),
        }
    }
}
