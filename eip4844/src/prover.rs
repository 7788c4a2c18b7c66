use bls12_381::{lincomb::g1_lincomb, group::Curve};

use crate::{
    kzg_open::{bitreverse_slice, prover::compute_evaluation_and_quotient},
    serialization::{
        deserialize_blob_to_scalars, deserialize_bytes_to_scalar, deserialize_compressed_g1,
        serialize_g1_compressed,
    },
    verifier::compute_fiat_shamir_challenge,
    BlobRef, Context, Error, KZGCommitment, KZGOpeningEvaluation, KZGOpeningPoint, KZGProof,
};

impl Context {
    /// Commit to a blob's polynomial, returning a compressed KZG commitment.
    pub fn blob_to_kzg_commitment(&self, blob: BlobRef) -> Result<KZGCommitment, Error> {
        let mut polynomial = deserialize_blob_to_scalars(blob)?;
        bitreverse_slice(&mut polynomial);

        let commitment = g1_lincomb(&self.prover.commit_key.g1_lagrange, &polynomial)
            .expect("commit_key.len() == polynomial.len()")
            .to_affine();

        Ok(serialize_g1_compressed(&commitment))
    }

    /// Compute a KZG opening proof for a blob's polynomial at the point `z`,
    /// returning both the proof and the evaluation `f(z)`.
    pub fn compute_kzg_proof(
        &self,
        blob: BlobRef,
        z: KZGOpeningPoint,
    ) -> Result<(KZGProof, KZGOpeningEvaluation), Error> {
        let polynomial = deserialize_blob_to_scalars(blob)?;
        let z = deserialize_bytes_to_scalar(&z)?;

        let (y, mut quotient) =
            compute_evaluation_and_quotient(&self.prover.domain, &polynomial, z);
        bitreverse_slice(&mut quotient);

        let proof = g1_lincomb(&self.prover.commit_key.g1_lagrange, &quotient)
            .expect("commit_key.len() == quotient.len()")
            .to_affine();

        Ok((serialize_g1_compressed(&proof), y.to_bytes_be()))
    }

    /// Compute a KZG opening proof for a blob's polynomial at the
    /// Fiat-Shamir challenge point derived from the blob and its commitment.
    pub fn compute_blob_kzg_proof(
        &self,
        blob: BlobRef,
        commitment_bytes: &KZGCommitment,
    ) -> Result<KZGProof, Error> {
        // Validate the commitment is well-formed before using it in the transcript.
        deserialize_compressed_g1(commitment_bytes)?;

        let z = compute_fiat_shamir_challenge(blob, commitment_bytes);

        let polynomial = deserialize_blob_to_scalars(blob)?;
        let (_, mut quotient) =
            compute_evaluation_and_quotient(&self.prover.domain, &polynomial, z);
        bitreverse_slice(&mut quotient);

        let proof = g1_lincomb(&self.prover.commit_key.g1_lagrange, &quotient)
            .expect("commit_key.len() == quotient.len()")
            .to_affine();

        Ok(serialize_g1_compressed(&proof))
    }
}
