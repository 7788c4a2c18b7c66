pub(crate) fn bitreverse(mut n: u32, l: u32) -> u32 {
    let mut r = 0;
    for _ in 0..l {
        r = (r << 1) | (n & 1);
        n >>= 1;
    }
    r
}

pub(crate) fn bitreverse_slice<T>(a: &mut [T]) {
    if a.is_empty() {
        return;
    }

    let n = a.len();
    let log_n = n.ilog2();
    assert_eq!(n, 1 << log_n);

    for k in 0..n {
        let rk = bitreverse(k as u32, log_n) as usize;
        if k < rk {
            a.swap(rk, k);
        }
    }
}

pub mod verifier {
    use bls12_381::{
        batch_inversion::batch_inverse, ff::Field, group::Curve, lincomb::g1_lincomb,
        multi_pairings, G1Point, G2Point, G2Prepared, Scalar,
    };
    use itertools::{chain, cloned, izip, Itertools};
    use polynomial::domain::Domain;

    use crate::{kzg_open::bitreverse_slice, trusted_setup::TrustedSetup, VerifierError};

    /// The key used to verify KZG single-point opening proofs.
    pub struct VerificationKey {
        pub gen_g1: G1Point,
        pub gen_g2: G2Point,
        pub tau_g2: G2Point,
    }

    pub struct Verifier {
        /// Domain used to create the opening proofs.
        pub domain: Domain,
        /// Verification key used to verify KZG single-point opening proofs.
        pub verification_key: VerificationKey,
    }

    impl Verifier {
        pub fn new(domain_size: usize, trusted_setup: &TrustedSetup) -> Self {
            Self {
                domain: Domain::new(domain_size),
                verification_key: VerificationKey::from(trusted_setup),
            }
        }

        pub fn verify_kzg_proof(
            &self,
            commitment: G1Point,
            z: Scalar,
            y: Scalar,
            proof: G1Point,
        ) -> Result<(), VerifierError> {
            let vk = &self.verification_key;

            // [f(tau) - f(z)]G1
            let lhs_g1 = (commitment - vk.gen_g1 * y).to_affine();

            // [-1]G2
            let lhs_g2 = G2Prepared::from(-vk.gen_g2);

            // [q(tau)]G1
            let rhs_g1 = proof;

            // [tau - z]G2
            let rhs_g2 = G2Prepared::from((vk.tau_g2 - vk.gen_g2 * z).to_affine());

            // Check whether f(tau) - f(z) == q(tau) * (tau - z)
            multi_pairings(&[(&lhs_g1, &lhs_g2), (&rhs_g1, &rhs_g2)])
                .then_some(())
                .ok_or(VerifierError::InvalidProof)
        }

        pub fn verify_kzg_proof_batch(
            &self,
            commitments: &[G1Point],
            zs: &[Scalar],
            ys: &[Scalar],
            proofs: &[G1Point],
            r_powers: &[Scalar],
        ) -> Result<(), VerifierError> {
            assert!(
                commitments.len() == zs.len()
                    && commitments.len() == ys.len()
                    && commitments.len() == proofs.len()
                    && commitments.len() == r_powers.len()
            );

            let vk = &self.verification_key;

            // sum (r^i * [f_i(tau)]G1) - [sum (r^i * y_i)]G1 + sum (r^i * z_i * [q(tau)]G1)
            let lhs_g1 = {
                let points = chain![commitments, [&vk.gen_g1], proofs]
                    .copied()
                    .collect_vec();
                let scalars = {
                    let y_lincomb: Scalar = izip!(r_powers, ys).map(|(r_i, y_i)| r_i * y_i).sum();
                    let r_z = r_powers.iter().zip(zs).map(|(r_i, z_i)| r_i * z_i);
                    chain![cloned(r_powers), [-y_lincomb], r_z].collect_vec()
                };
                g1_lincomb(&points, &scalars)
                    .expect("points.len() == scalars.len()")
                    .to_affine()
            };

            // sum r^i * [q(tau)]G1
            let rhs_g1 = g1_lincomb(proofs, r_powers)
                .expect("proofs.len() == r_powers.len()")
                .to_affine();

            // [-1]G2
            let lhs_g2 = G2Prepared::from(-vk.gen_g2);

            // [tau]G2
            let rhs_g2 = G2Prepared::from(vk.tau_g2);

            multi_pairings(&[(&lhs_g1, &lhs_g2), (&rhs_g1, &rhs_g2)])
                .then_some(())
                .ok_or(VerifierError::InvalidProof)
        }
    }

    /// Compute the evaluation of the given polynomial at the given point.
    pub(crate) fn compute_evaluation(domain: &Domain, polynomial: &[Scalar], z: Scalar) -> Scalar {
        domain.roots.iter().position(|root| *root == z).map_or_else(
            || compute_evaluation_out_of_domain(domain, polynomial, z),
            |position| polynomial[position],
        )
    }

    /// Compute the evaluation of the given polynomial at a point guaranteed to
    /// be out-of-domain.
    pub(crate) fn compute_evaluation_out_of_domain(
        domain: &Domain,
        polynomial: &[Scalar],
        z: Scalar,
    ) -> Scalar {
        let domain_size = domain.roots.len();

        // Bit-reverse the polynomial into normal order.
        let mut polynomial = polynomial.to_vec();
        bitreverse_slice(&mut polynomial);

        // 1 / (z - omega^i)
        let mut denoms = domain.roots.iter().map(|root| z - root).collect_vec();
        batch_inverse(&mut denoms);

        // sum (omega^i * f(omega^i) / (z - omega^i)) * ((z^n - 1) / n)
        izip!(&domain.roots, &polynomial, &denoms)
            .map(|(root, f_root, denom)| root * f_root * denom)
            .sum::<Scalar>()
            * (z.pow_vartime([domain_size as u64]) - Scalar::ONE)
            * domain.domain_size_inv
    }
}

pub mod prover {
    use bls12_381::{batch_inversion::batch_inverse, ff::Field, G1Point, Scalar};
    use maybe_rayon::prelude::*;
    use polynomial::domain::Domain;

    use crate::{kzg_open::bitreverse_slice, TrustedSetup};

    /// The key used to commit to polynomials in Lagrange form.
    pub struct CommitKey {
        pub g1_lagrange: Vec<G1Point>,
    }

    pub struct Prover {
        /// Domain used to create the opening proofs.
        pub domain: Domain,
        /// Commitment key used for committing to the polynomial in Lagrange form.
        pub commit_key: CommitKey,
    }

    impl Prover {
        pub fn new(domain_size: usize, trusted_setup: &TrustedSetup) -> Self {
            Self {
                domain: Domain::new(domain_size),
                commit_key: CommitKey::from(trusted_setup),
            }
        }
    }

    /// Compute the evaluation and quotient of the given polynomial at the given point.
    ///
    /// The quotient is returned in normal order.
    pub fn compute_evaluation_and_quotient(
        domain: &Domain,
        polynomial: &[Scalar],
        z: Scalar,
    ) -> (Scalar, Vec<Scalar>) {
        let point_idx = domain.roots.iter().position(|root| *root == z);

        point_idx.map_or_else(
            || compute_evaluation_and_quotient_out_of_domain(domain, polynomial, z),
            |point_idx| {
                compute_evaluation_and_quotient_within_domain(domain, polynomial, point_idx)
            },
        )
    }

    /// Compute the evaluation and quotient of the given polynomial at a point
    /// guaranteed to be out-of-domain.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip_all))]
    pub fn compute_evaluation_and_quotient_out_of_domain(
        domain: &Domain,
        polynomial: &[Scalar],
        z: Scalar,
    ) -> (Scalar, Vec<Scalar>) {
        let mut polynomial = polynomial.to_vec();
        bitreverse_slice(&mut polynomial);

        // 1 / (z - omega^i)
        let mut denoms = (&domain.roots)
            .maybe_into_par_iter()
            .map(|root| z - root)
            .collect::<Vec<_>>();
        batch_inverse(&mut denoms);

        let domain_size = domain.roots.len();

        // sum (omega^i * f(omega^i) / (z - omega^i)) * ((z^n - 1) / n)
        let y = (&domain.roots)
            .maybe_into_par_iter()
            .zip(&polynomial)
            .zip(&denoms)
            .map(|((root, f_root), denom)| root * *f_root * denom)
            .sum::<Scalar>()
            * (z.pow_vartime([domain_size as u64]) - Scalar::ONE)
            * domain.domain_size_inv;

        // (y - f(omega^i)) / (z - omega^i)
        let quotient = denoms
            .maybe_into_par_iter()
            .zip(&polynomial)
            .map(|(denom, f_root)| (y - *f_root) * denom)
            .collect();

        (y, quotient)
    }

    /// Compute the evaluation and quotient of the given polynomial at the given
    /// point index of the domain.
    ///
    /// Uses the "dividing when one of the points is zero" technique, see
    /// <https://dankradfeist.de/ethereum/2021/06/18/pcs-multiproofs.html>.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip_all))]
    pub fn compute_evaluation_and_quotient_within_domain(
        domain: &Domain,
        polynomial: &[Scalar],
        point_idx: usize,
    ) -> (Scalar, Vec<Scalar>) {
        let domain_size = domain.roots.len();

        let mut polynomial = polynomial.to_vec();
        bitreverse_slice(&mut polynomial);

        // omega^m
        let z = domain.roots[point_idx];

        // f(omega^m)
        let y = polynomial[point_idx];

        // 1 / (omega^m - omega^j), with the m == j term set to one so that
        // `batch_inverse` does not divide by zero.
        let mut denoms = (&domain.roots)
            .maybe_into_par_iter()
            .enumerate()
            .map(|(idx, root)| {
                if idx == point_idx {
                    Scalar::ONE
                } else {
                    z - root
                }
            })
            .collect::<Vec<_>>();
        batch_inverse(&mut denoms);

        // (f(omega^m) - f(omega^j)) / (omega^m - omega^j)
        let mut quotient = denoms
            .maybe_into_par_iter()
            .zip(polynomial)
            .map(|(denom, f_root)| (y - f_root) * denom)
            .collect::<Vec<_>>();

        // q(omega^m) = sum q(omega^j) * (A'(omega^m) / A'(omega^j)) = sum q(omega^j) * omega^{j-m}
        quotient[point_idx] = Scalar::ZERO;
        quotient[point_idx] = -(&quotient)
            .maybe_into_par_iter()
            .enumerate()
            .map(|(idx, quotient)| {
                let root_j_minus_m = domain.roots[(domain_size + idx - point_idx) % domain_size];
                *quotient * root_j_minus_m
            })
            .sum::<Scalar>();

        (y, quotient)
    }
}
