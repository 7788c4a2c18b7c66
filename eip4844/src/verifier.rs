use bls12_381::{reduce_bytes_to_scalar_bias, Scalar};
use sha2::{Digest, Sha256};

use crate::{
    kzg_open::verifier::compute_evaluation,
    serialization::{
        deserialize_blob_to_scalars, deserialize_bytes_to_scalar, deserialize_compressed_g1,
    },
    BlobRef, Context, Error, KZGCommitment, KZGOpeningEvaluation, KZGOpeningPoint, KZGProof,
    VerifierError,
};

const FIAT_SHAMIR_PROTOCOL_DOMAIN: &[u8] = b"FSBLOBVERIFY_V1_";
const RANDOM_CHALLENGE_KZG_BATCH_DOMAIN: &[u8] = b"RCKZGBATCH___V1_";

pub(crate) fn u64_to_byte_array_16(value: u64) -> [u8; 16] {
    let mut bytes = [0u8; 16];
    bytes[8..].copy_from_slice(&value.to_be_bytes());
    bytes
}

/// Derive the point `z` at which a blob's polynomial is opened, as a
/// Fiat-Shamir challenge over the blob and its commitment.
pub(crate) fn compute_fiat_shamir_challenge(blob: BlobRef, commitment: &KZGCommitment) -> Scalar {
    let mut hasher = Sha256::new();
    hasher.update(FIAT_SHAMIR_PROTOCOL_DOMAIN);
    hasher.update(u64_to_byte_array_16(crate::constants::FIELD_ELEMENTS_PER_BLOB as u64));
    hasher.update(blob);
    hasher.update(commitment);

    let bytes: [u8; 32] = hasher.finalize().into();
    reduce_bytes_to_scalar_bias(bytes)
}

fn compute_r_powers_for_verify_kzg_proof_batch(
    domain_size: usize,
    commitments: &[KZGCommitment],
    zs: &[Scalar],
    ys: &[Scalar],
    proofs: &[KZGProof],
) -> Vec<Scalar> {
    let n = commitments.len();

    let mut hasher = Sha256::new();
    hasher.update(RANDOM_CHALLENGE_KZG_BATCH_DOMAIN);
    hasher.update(u64_to_byte_array_16(domain_size as u64));
    hasher.update(u64_to_byte_array_16(n as u64));

    for (commitment, z, y, proof) in itertools::izip!(commitments, zs, ys, proofs) {
        hasher.update(commitment);
        hasher.update(z.to_bytes_be());
        hasher.update(y.to_bytes_be());
        hasher.update(proof);
    }

    let bytes: [u8; 32] = hasher.finalize().into();
    let r = reduce_bytes_to_scalar_bias(bytes);

    let mut r_powers = Vec::with_capacity(n);
    let mut current = Scalar::ONE;
    for _ in 0..n {
        r_powers.push(current);
        current *= r;
    }
    r_powers
}

impl Context {
    /// Verify a KZG opening proof that a blob's polynomial evaluates to `y` at `z`.
    pub fn verify_kzg_proof(
        &self,
        commitment: &KZGCommitment,
        z: KZGOpeningPoint,
        y: KZGOpeningEvaluation,
        proof: &KZGProof,
    ) -> Result<(), Error> {
        let commitment = deserialize_compressed_g1(commitment)?;
        let z = deserialize_bytes_to_scalar(&z)?;
        let y = deserialize_bytes_to_scalar(&y)?;
        let proof = deserialize_compressed_g1(proof)?;

        self.verifier
            .verify_kzg_proof(commitment, z, y, proof)
            .map_err(Error::Verifier)
    }

    /// Verify a KZG opening proof at the Fiat-Shamir challenge point derived
    /// from the blob and its commitment.
    pub fn verify_blob_kzg_proof(
        &self,
        blob: BlobRef,
        commitment: KZGCommitment,
        proof: KZGProof,
    ) -> Result<(), Error> {
        let z = compute_fiat_shamir_challenge(blob, &commitment);

        let polynomial = deserialize_blob_to_scalars(blob)?;
        let y = compute_evaluation(&self.verifier.domain, &polynomial, z);

        let commitment_point = deserialize_compressed_g1(&commitment)?;
        let proof_point = deserialize_compressed_g1(&proof)?;

        self.verifier
            .verify_kzg_proof(commitment_point, z, y, proof_point)
            .map_err(Error::Verifier)
    }

    /// Verify a batch of blob KZG opening proofs via a random linear
    /// combination into a single pairing check.
    pub fn verify_blob_kzg_proof_batch(
        &self,
        blobs: Vec<BlobRef>,
        commitments: Vec<KZGCommitment>,
        proofs: Vec<KZGProof>,
    ) -> Result<(), Error> {
        if blobs.len() != commitments.len() || blobs.len() != proofs.len() {
            return Err(Error::Verifier(
                VerifierError::BatchVerificationInputsMustHaveSameLength {
                    blobs_len: blobs.len(),
                    commitments_len: commitments.len(),
                    proofs_len: proofs.len(),
                },
            ));
        }

        let mut zs = Vec::with_capacity(blobs.len());
        let mut ys = Vec::with_capacity(blobs.len());
        for (blob, commitment) in blobs.iter().zip(&commitments) {
            let z = compute_fiat_shamir_challenge(blob, commitment);
            let polynomial = deserialize_blob_to_scalars(*blob)?;
            ys.push(compute_evaluation(&self.verifier.domain, &polynomial, z));
            zs.push(z);
        }

        let r_powers = compute_r_powers_for_verify_kzg_proof_batch(
            self.verifier.domain.roots.len(),
            &commitments,
            &zs,
            &ys,
            &proofs,
        );

        let commitment_points = commitments
            .iter()
            .map(|c| deserialize_compressed_g1(c))
            .collect::<Result<Vec<_>, _>>()?;
        let proof_points = proofs
            .iter()
            .map(|p| deserialize_compressed_g1(p))
            .collect::<Result<Vec<_>, _>>()?;

        self.verifier
            .verify_kzg_proof_batch(&commitment_points, &zs, &ys, &proof_points, &r_powers)
            .map_err(Error::Verifier)
    }
}
