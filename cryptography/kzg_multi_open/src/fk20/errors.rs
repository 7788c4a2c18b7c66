/// Errors that can occur while verifying an FK20 multi-opening proof batch.
#[derive(Debug)]
pub enum VerifierError {
    /// The pairing check failed, meaning the batch of opening proofs is invalid.
    InvalidProof,
}
