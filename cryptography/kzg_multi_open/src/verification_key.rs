use bls12_381::{
    lincomb::{g1_lincomb, g2_lincomb},
    G1Point, G1Projective, G2Point, G2Projective, Scalar,
};

/// The key that is used to verify opening proofs.
///
/// This contains the G1 and G2 group elements needed to perform a
/// pairing check, plus the commitment key group elements needed to
/// commit to polynomials for FK20 batch verification.
#[derive(Debug, Clone)]
pub struct VerificationKey {
    pub g1s: Vec<G1Point>,
    pub g2s: Vec<G2Point>,
    pub g2_gen: G2Point,
    /// The size of a coset of evaluation points that an individual opening proof opens at.
    pub coset_size: usize,
    /// The number of coefficients in the polynomial that this key can be used to open.
    pub num_coefficients_in_polynomial: usize,
}

impl VerificationKey {
    pub fn new(
        g1s: Vec<G1Point>,
        g2s: Vec<G2Point>,
        coset_size: usize,
        num_coefficients_in_polynomial: usize,
    ) -> Self {
        assert!(
            coset_size < g2s.len(),
            "The coset size must be less than the amount of g2 elements as the verifier needs to do a g2 msm of size `coset_size`"
        );

        let g2_gen = g2s[0];

        Self {
            g1s,
            g2s,
            g2_gen,
            coset_size,
            num_coefficients_in_polynomial,
        }
    }

    pub fn commit_g2(&self, polynomial: &[Scalar]) -> G2Projective {
        g2_lincomb(&self.g2s[..polynomial.len()], polynomial)
            .expect("number of g2 points is equal to the number of coefficients in the polynomial")
    }

    pub fn commit_g1(&self, polynomial: &[Scalar]) -> G1Projective {
        g1_lincomb(&self.g1s[..polynomial.len()], polynomial)
            .expect("number of g1 points is equal to the number of coefficients in the polynomial")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bls12_381::{ff::Field, group::Group};
    use rand::thread_rng;

    fn random_g1s(n: usize) -> Vec<G1Point> {
        (0..n)
            .map(|_| G1Projective::random(&mut thread_rng()).into())
            .collect()
    }

    fn random_g2s(n: usize) -> Vec<G2Point> {
        (0..n)
            .map(|_| G2Projective::random(&mut thread_rng()).into())
            .collect()
    }

    #[test]
    fn test_commit_g1_matches_lincomb() {
        let g1s = random_g1s(16);
        let vk = VerificationKey::new(g1s.clone(), random_g2s(8), 4, 16);

        let poly: Vec<_> = (0..16).map(|_| Scalar::random(&mut thread_rng())).collect();
        let got = vk.commit_g1(&poly);
        let expected = g1_lincomb(&g1s[..poly.len()], &poly).unwrap();

        assert_eq!(got, expected);
    }

    #[test]
    fn test_commit_g2_matches_lincomb() {
        let g2s = random_g2s(8);
        let vk = VerificationKey::new(random_g1s(16), g2s.clone(), 4, 16);

        let poly: Vec<_> = (0..8).map(|_| Scalar::random(&mut thread_rng())).collect();
        let got = vk.commit_g2(&poly);
        let expected = g2_lincomb(&g2s[..poly.len()], &poly).unwrap();

        assert_eq!(got, expected);
    }

    #[test]
    fn test_g2_gen_is_first_element() {
        let g2s = random_g2s(8);
        let vk = VerificationKey::new(random_g1s(16), g2s.clone(), 4, 16);
        assert_eq!(vk.g2_gen, g2s[0]);
    }

    #[test]
    #[should_panic(expected = "coset size must be less")]
    fn test_coset_size_check_panics() {
        let _ = VerificationKey::new(random_g1s(16), random_g2s(4), 4, 16);
    }
}
