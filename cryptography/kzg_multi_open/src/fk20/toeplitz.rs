// The abstractions in this file were taken and modified from: https://github.com/EspressoSystems/jellyfish/blob/8f48813ca52d964090dbf0de62f07f5e0c7e22c6/primitives/src/toeplitz.rs#L1

use bls12_381::Scalar;

/// A Toeplitz matrix is a matrix in which each descending diagonal from left to right is constant.
///
/// Due to the constant diagonal property, a Toeplitz matrix is fully determined by its first row
/// and first column, which is the representation used here.
#[derive(Debug, Clone)]
pub struct ToeplitzMatrix {
    /// A vector representing the first row of the matrix.
    pub(crate) row: Vec<Scalar>,
    /// A vector representing the first column of the matrix, including the first element
    /// (even though the first element is already included in the `row`).
    pub(crate) col: Vec<Scalar>,
}

impl ToeplitzMatrix {
    /// Constructs a Toeplitz matrix from its first row and column.
    ///
    /// # Panics
    /// Panics if either `row` or `col` is empty, or if `row[0] != col[0]`.
    pub fn new(row: Vec<Scalar>, col: Vec<Scalar>) -> Self {
        assert!(
            !row.is_empty() && !col.is_empty(),
            "row and col must be non-empty"
        );
        assert_eq!(
            row[0], col[0],
            "Toeplitz matrix must satisfy row[0] == col[0] (shared top-left entry)"
        );
        Self { row, col }
    }
}

/// A circulant matrix is a special kind of Toeplitz matrix where each row is a cyclic
/// rotation of the preceding row, so the whole matrix is determined by its first row alone.
///
/// The main property of circulant matrices that we leverage is that they are diagonalized by
/// the Fourier transform, which allows for efficient matrix-vector products.
#[derive(Debug, Clone)]
pub(crate) struct CirculantMatrix {
    pub(crate) row: Vec<Scalar>,
}

impl CirculantMatrix {
    /// Embeds a Toeplitz matrix into a circulant matrix of twice the dimension.
    pub(crate) fn from_toeplitz(tm: ToeplitzMatrix) -> Self {
        let mut extension_col = tm.row;
        extension_col.rotate_left(1);
        extension_col.reverse();

        Self {
            row: [tm.col, extension_col].concat(),
        }
    }
}
