use bls12_381::ff::Field;
use bls12_381::Scalar;

/// Holds the generator (and its inverse) used to shift a polynomial's domain
/// before/after an FFT, so that we can evaluate on a coset of the subgroup
/// instead of the subgroup itself.
#[derive(Debug, Clone, Copy)]
pub struct CosetFFT {
    pub generator: Scalar,
    pub generator_inv: Scalar,
}

impl CosetFFT {
    pub fn new(generator: Scalar) -> Self {
        Self {
            generator,
            generator_inv: generator
                .invert()
                .expect("generator should not be zero"),
        }
    }
}
