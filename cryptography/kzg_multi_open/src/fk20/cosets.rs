use bls12_381::{ff::Field, Scalar};
use polynomial::domain::Domain;

/// Reverses the least significant `bits` of the given number `n`.
///
/// `n` - The input number whose bits are to be reversed.
/// `bits` - The number of least significant bits to reverse.
///
/// Returns a new `usize` with the specified number of bits reversed.
///
/// Taken and modified from: https://github.com/Plonky3/Plonky3/blob/a374139abead1008f84a439e95bb495e81ea4be5/util/src/lib.rs#L67-L76
pub(crate) const fn reverse_bits(n: usize, bits: u32) -> usize {
    n.reverse_bits().overflowing_shr(usize::BITS - bits).0
}

/// Computes log2 of an integer.
///
/// Panics if the integer is not a power of two
pub(crate) const fn log2(x: u32) -> u32 {
    assert!(x > 0 && x.is_power_of_two(), "x must be a power of two.");
    x.trailing_zeros()
}

/// In-place bit-reversal permutation of a slice.
///
/// Reorders the elements of the slice `a` in-place by reversing the binary representation of their indices.
///
/// For example, if `a.len() == 8` (i.e., `log2(n) = 3`), the index permutation would be:
///
/// ```text
/// Index  Binary   Reversed   Swapped With
/// -----  -------  ---------  -------------
///   0     000       000           -
///   1     001       100           4
///   2     010       010           -
///   3     011       110           6
///   4     100       001           1
///   5     101       101           -
///   6     110       011           3
///   7     111       111           -
/// ```
///
/// This transformation is its own inverse, so applying it twice restores the original order.
///
/// # Panics
/// Panics if the slice length is not a power of two.
///
/// # Arguments
/// * `a` — A mutable slice of data to reorder in-place.
///
/// Taken and modified from: https://github.com/filecoin-project/ec-gpu/blob/bdde768d0613ae546524c5612e2ad576a646e036/ec-gpu-gen/src/fft_cpu.rs#L10C8-L10C18
pub fn reverse_bit_order<T>(a: &mut [T]) {
    // If we are looking for optimizations, it would be nice to have a look at the following:
    // https://github.com/Plonky3/Plonky3/blob/a374139abead1008f84a439e95bb495e81ea4be5/matrix/src/util.rs#L36-L57

    let n = a.len() as u32;

    // Ensure the length is a power of two for valid bit-reversal indexing
    assert!(n.is_power_of_two(), "n must be a power of two");

    // Compute the number of bits needed to index `n` elements (i.e., log2(n))
    let log_n = log2(n);

    // Iterate through each index and swap with its bit-reversed counterpart
    for k in 0..n {
        // Compute bit-reversed index of k using only log_n bits
        let rk = reverse_bits(k as usize, log_n) as u32;

        // Swap only if k < rk to avoid double-swapping
        if k < rk {
            a.swap(rk as usize, k as usize);
        }
    }
}

/// Generate all of the field elements needed to generate the cosets.
///
/// - num_points denotes how many points we want to open the polynomial at.
///   `num_points` can also be seen as the size of the domain.
/// - num_cosets denotes how many cosets we want to generate, analogously how many proofs we want to produce.
///
/// Returns a `Vec<Scalar>` containing the generated coset elements with length `num_cosets`
///
/// Note: Setting bit_reversed to true will generate the cosets in bit-reversed order.
pub fn coset_gens(num_points: usize, num_cosets: usize, bit_reversed: bool) -> Vec<Scalar> {
    // Compute the generator for the group containing all of the points.
    //
    // Note: generating the whole group, just to get the generator is inefficient
    // However, this code is not on the hot path, so we don't optimize it.
    let coset_gen = Domain::new(num_points).generator;

    // Compute the number of bits needed to represent `num_cosets` indices.
    let bits = log2(num_cosets as u32);

    // Generate each coset generator as a power of `coset_gen`.
    (0..num_cosets)
        .map(|i| {
            // Optionally bit-reverse the exponent index.
            let exp = if bit_reversed {
                reverse_bits(i, bits)
            } else {
                i
            };
            // Raise the coset generator to the computed exponent.
            coset_gen.pow_vartime([exp as u64])
        })
        .collect()
}

/// Given a group of coset evaluations, this method will return/reorder the evaluations as if
/// we evaluated them on the relevant extended domain.
///
/// Note: `domain_order` refers to the order that the evaluations would be in, if they were evaluated on
/// the roots of unity. This is different to the order that we return them in; bit-reversed order.
///
/// The coset indices returned can be used to locate the coset_evaluations in the new flattened order:
///   - The idea is that a particular coset evaluation is evenly distributed across the set of flattened
///     evaluations.
///
/// Example:
///   - Let's say we have `k` cosets. Each coset holds `m` values. Each coset will have an associated index.
///   - Once this method has completed, we will be given a flattened set of evaluations where the
///     `m` values in each coset are now a distance of `k` values apart from each other.
///   - The first value that was in the first coset, will be in position `0`.
///   - The second value that was in the first coset, will be in position `k`
///   - The third value that was in the first coset, will be in position `2k`
///   - The first value that was in the second coset, will NOT be in position `1`
///     Instead it will be in position `t = reverse_bit_order(1, k)`.
///   - This value of `t` is what the function returns alongside the flattened evaluations,
///     allowing the caller to deduce the other positions.
///
///
/// Note: For evaluations that are missing, this method will fill these in with zeroes.
///
/// Note: It is the callers responsibility to ensure that there are no duplicate
/// coset indices.
pub fn recover_evaluations_in_domain_order(
    domain_size: usize,
    coset_indices: Vec<usize>,
    coset_evaluations: Vec<Vec<Scalar>>,
) -> Option<(Vec<usize>, Vec<Scalar>)> {
    assert_eq!(coset_indices.len(), coset_evaluations.len());

    if coset_indices.is_empty() {
        return None;
    }

    let mut elements = vec![Scalar::ZERO; domain_size];

    // Check that each coset has the same size
    let coset_len = coset_evaluations[0].len();
    let same_len = coset_evaluations
        .iter()
        .all(|coset| coset.len() == coset_len);
    if !same_len {
        return None;
    }

    // Check that none of the indices are "out of bounds"
    // This would result in the subsequent indexing operations to panic
    //
    // The greatest index we will be using is:
    // `t = coset_index * coset_len`
    // Let's denote the returned vectors length as `k`
    // We want t < k
    // => coset_index * coset_len < k
    // => coset_index < k / coset_len
    let coset_capacity = domain_size / coset_len;
    if coset_indices.iter().any(|&i| i >= coset_capacity) {
        return None;
    }

    // Iterate over each coset evaluation set and place the evaluations in the correct locations
    for (&coset_index, coset_evals) in coset_indices.iter().zip(coset_evaluations) {
        let start = coset_index * coset_len;
        elements[start..start + coset_len].copy_from_slice(&coset_evals);
    }

    // Now bit reverse the result, so we get the evaluations as if we had just done
    // and FFT on them. ie we computed the evaluation set and did not do a reverse bit order.
    reverse_bit_order(&mut elements);

    // The order of the coset indices in the returned vector will be different.
    // The new indices of the cosets can be figured out by reverse bit ordering
    // the existing indices.
    let num_bits_coset_per_full_domain = log2(coset_capacity as u32);

    let new_coset_indices = coset_indices
        .into_iter()
        .map(|rbo_coset_index| reverse_bits(rbo_coset_index, num_bits_coset_per_full_domain))
        .collect();

    Some((new_coset_indices, elements))
}

/// Generate k = `num_points / points_per_coset` amount of cosets, each containing `points_per_coset` points.
/// The points in each coset will be roots of unity.
/// For FK20, this is a hard requirement for efficient proof generation.
///
/// Note: This method is not exposed because we just bit_reverse the full subgroup
/// It will create the same cosets as calling this method with bit_reversed = true
/// However the ordering inside of the cosets will be different.
/// Note: `bit_reverse` on the full group is more concise.
#[cfg(test)]
pub(crate) fn generate_cosets(
    num_points: usize,
    points_per_coset: usize,
    bit_reversed: bool,
) -> Vec<Vec<Scalar>> {
    let subgroup = Domain::new(points_per_coset).roots;

    let num_cosets = num_points / points_per_coset;

    let generators = coset_gens(num_points, num_cosets, bit_reversed);

    // Manually generate cosets
    let mut cosets = Vec::with_capacity(generators.len());

    for generator in generators {
        let coset: Vec<Scalar> = subgroup
            .iter()
            .map(|&element| generator * element)
            .collect();
        cosets.push(coset);
    }

    cosets
}
