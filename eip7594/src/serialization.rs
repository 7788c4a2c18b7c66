use bls12_381::{G1Point, Scalar};

use crate::{
    constants::{
        BYTES_PER_BLOB, BYTES_PER_CELL, BYTES_PER_FIELD_ELEMENT, BYTES_PER_G1_POINT,
        CELLS_PER_EXT_BLOB, FIELD_ELEMENTS_PER_CELL,
    },
    errors::SerializationError,
    Bytes48Ref, Cell, CellRef, KZGProof,
};

fn deserialize_bytes_to_scalars(bytes: &[u8]) -> Result<Vec<Scalar>, SerializationError> {
    // Check that the bytes are a multiple of the scalar size
    if bytes.len() % BYTES_PER_FIELD_ELEMENT != 0 {
        return Err(SerializationError::ScalarHasInvalidLength {
            length: bytes.len(),
            bytes: bytes.to_vec(),
        });
    }

    bytes
        .chunks_exact(BYTES_PER_FIELD_ELEMENT)
        .map(deserialize_scalar)
        .collect()
}

pub(crate) fn deserialize_blob_to_scalars(
    blob_bytes: &[u8],
) -> Result<Vec<Scalar>, SerializationError> {
    if blob_bytes.len() != BYTES_PER_BLOB {
        return Err(SerializationError::BlobHasInvalidLength {
            length: blob_bytes.len(),
            bytes: blob_bytes.to_vec(),
        });
    }
    deserialize_bytes_to_scalars(blob_bytes)
}

pub(crate) fn deserialize_scalar(scalar_bytes: &[u8]) -> Result<Scalar, SerializationError> {
    let bytes32: [u8; BYTES_PER_FIELD_ELEMENT] = scalar_bytes.try_into().expect(
        "infallible: expected chunk to be exactly BYTES_PER_FIELD_ELEMENT bytes long, since the \
         caller only ever hands us slices produced by chunking on that boundary",
    );

    let option_scalar: Option<Scalar> = Scalar::from_bytes_be(&bytes32).into();
    option_scalar.ok_or_else(|| SerializationError::CouldNotDeserializeScalar {
        bytes: scalar_bytes.to_vec(),
    })
}

pub(crate) fn deserialize_compressed_g1(point_bytes: &[u8]) -> Result<G1Point, SerializationError> {
    let point_bytes: [u8; BYTES_PER_G1_POINT] =
        point_bytes
            .try_into()
            .map_err(|_| SerializationError::G1PointHasInvalidLength {
                length: point_bytes.len(),
                bytes: point_bytes.to_vec(),
            })?;

    let opt_g1: Option<G1Point> = Option::from(G1Point::from_compressed(&point_bytes));
    opt_g1.ok_or(SerializationError::CouldNotDeserializeG1Point {
        bytes: point_bytes.to_vec(),
    })
}

/// Deserializes a list of compressed G1 point byte slices.
///
/// Fails on the first invalid point. Each input slice must be exactly 48 bytes.
pub(crate) fn deserialize_compressed_g1_points(
    points: Vec<Bytes48Ref>,
) -> Result<Vec<G1Point>, SerializationError> {
    points
        .into_iter()
        .map(|point| deserialize_compressed_g1(point))
        .collect()
}

pub(crate) fn serialize_g1_compressed(point: &G1Point) -> [u8; BYTES_PER_G1_POINT] {
    point.to_compressed()
}

pub(crate) fn serialize_scalars_to_cell(scalars: &[Scalar]) -> Vec<u8> {
    assert_eq!(
        scalars.len(),
        FIELD_ELEMENTS_PER_CELL,
        "must have exactly {FIELD_ELEMENTS_PER_CELL} scalars to serialize to a cell"
    );

    scalars.iter().flat_map(Scalar::to_bytes_be).collect()
}

/// Deserializes a vector of cell byte slices into vectors of `Scalar`s.
pub(crate) fn deserialize_cells(
    cells: Vec<CellRef>,
) -> Result<Vec<Vec<Scalar>>, SerializationError> {
    cells
        .into_iter()
        .map(|cell| deserialize_bytes_to_scalars(cell))
        .collect()
}

/// Serializes both cells and their corresponding proofs into their wire formats.
///
/// Expects exactly `CELLS_PER_EXT_BLOB` items in both inputs.
pub(crate) fn serialize_cells_and_proofs(
    coset_evaluations: Vec<Vec<Scalar>>,
    proofs: &[G1Point],
) -> ([Cell; CELLS_PER_EXT_BLOB], [KZGProof; CELLS_PER_EXT_BLOB]) {
    let cells = serialize_cells(coset_evaluations);
    let proofs = std::array::from_fn(|i| proofs[i].to_compressed());
    (cells, proofs)
}

/// Serializes a list of evaluation sets into an array of `Cell`s.
pub(crate) fn serialize_cells(
    coset_evaluations: Vec<Vec<Scalar>>,
) -> [Cell; CELLS_PER_EXT_BLOB] {
    let cells: Vec<Cell> = coset_evaluations
        .iter()
        .map(|evals| serialize_scalars_to_cell(evals))
        .map(|bytes| {
            bytes
                .into_boxed_slice()
                .try_into()
                .expect("infallible: serialized cell must be BYTES_PER_CELL long")
        })
        .collect();

    cells
        .try_into()
        .unwrap_or_else(|_| panic!("expected {CELLS_PER_EXT_BLOB} number of cells"))
}
