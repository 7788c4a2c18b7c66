use bls12_381::{ff::Field, Scalar};
use eip4844::{
    constants::{BYTES_PER_BLOB, FIELD_ELEMENTS_PER_BLOB},
    Context,
};

fn dummy_blob() -> [u8; BYTES_PER_BLOB] {
    let polynomial = (0..FIELD_ELEMENTS_PER_BLOB).map(|i| -Scalar::from(i as u64));
    let blob: Vec<_> = polynomial
        .into_iter()
        .flat_map(|scalar| scalar.to_bytes_be())
        .collect();
    blob.try_into().expect("blob conversion failed")
}

fn main() {
    let ctx = Context::default();
    let blob = dummy_blob();

    let commitment = ctx
        .blob_to_kzg_commitment(&blob)
        .expect("failed to compute commitment");

    let z = Scalar::random(rand::thread_rng()).to_bytes_be();
    let (proof, evaluation) = ctx
        .compute_kzg_proof(&blob, z)
        .expect("failed to compute kzg proof");

    let ok = ctx
        .verify_kzg_proof(&commitment, z, evaluation, &proof)
        .is_ok();
    println!("proof verified: {ok}");
}
