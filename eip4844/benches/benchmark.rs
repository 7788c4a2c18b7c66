use bls12_381::{ff::Field, Scalar};
use criterion::{criterion_group, criterion_main, Criterion};
use eip4844::{
    constants::{BYTES_PER_BLOB, FIELD_ELEMENTS_PER_BLOB},
    Context, TrustedSetup,
};

fn dummy_blob() -> [u8; BYTES_PER_BLOB] {
    let polynomial = (0..FIELD_ELEMENTS_PER_BLOB).map(|i| -Scalar::from(i as u64));
    let blob: Vec<_> = polynomial
        .into_iter()
        .flat_map(|scalar| scalar.to_bytes_be())
        .collect();
    blob.try_into().expect("blob conversion failed")
}

pub fn bench_blob_to_kzg_commitment(c: &mut Criterion) {
    let trusted_setup = TrustedSetup::default();
    let ctx = Context::new(&trusted_setup);
    let blob = dummy_blob();

    c.bench_function("blob_to_kzg_commitment", |b| {
        b.iter(|| ctx.blob_to_kzg_commitment(&blob));
    });
}

pub fn bench_compute_kzg_proof(c: &mut Criterion) {
    let trusted_setup = TrustedSetup::default();
    let ctx = Context::new(&trusted_setup);
    let blob = dummy_blob();
    let z = Scalar::random(rand::thread_rng()).to_bytes_be();

    c.bench_function("compute_kzg_proof", |b| {
        b.iter(|| ctx.compute_kzg_proof(&blob, z));
    });
}

pub fn bench_compute_blob_kzg_proof(c: &mut Criterion) {
    let trusted_setup = TrustedSetup::default();
    let ctx = Context::new(&trusted_setup);
    let blob = dummy_blob();
    let commitment = ctx
        .blob_to_kzg_commitment(&blob)
        .expect("failed to compute commitment");

    c.bench_function("compute_blob_kzg_proof", |b| {
        b.iter(|| ctx.compute_blob_kzg_proof(&blob, &commitment));
    });
}

pub fn bench_verify_blob_kzg_proof(c: &mut Criterion) {
    let trusted_setup = TrustedSetup::default();
    let ctx = Context::new(&trusted_setup);
    let blob = dummy_blob();
    let commitment = ctx
        .blob_to_kzg_commitment(&blob)
        .expect("failed to compute commitment");
    let proof = ctx
        .compute_blob_kzg_proof(&blob, &commitment)
        .expect("failed to compute proof");

    c.bench_function("verify_blob_kzg_proof", |b| {
        b.iter(|| ctx.verify_blob_kzg_proof(&blob, commitment, proof));
    });
}

criterion_group!(
    benches,
    bench_blob_to_kzg_commitment,
    bench_compute_kzg_proof,
    bench_compute_blob_kzg_proof,
    bench_verify_blob_kzg_proof
);
criterion_main!(benches);
