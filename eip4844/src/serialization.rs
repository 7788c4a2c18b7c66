use bls12_381::{G1Point, Scalar};

use crate::constants::{BYTES_PER_BLOB, BYTES_PER_FIELD_ELEMENT, BYTES_PER_G1_POINT};

pub use crate::errors::SerializationError;

fn deserialize_bytes_to_scalars(bytes: &[u8]) -> Result<Vec<Scalar>, SerializationError> {
    if bytes.len() % BYTES_PER_FIELD_ELEMENT != 0 {
        return Err(SerializationError::ScalarHasInvalidLength {
            length: bytes.len(),
            bytes: bytes.to_vec(),
        });
    }

    bytes
        .chunks_exact(BYTES_PER_FIELD_ELEMENT)
        .map(deserialize_bytes_to_scalar)
        .collect()
}

pub(crate) fn deserialize_blob_to_scalars(blob: &[u8]) -> Result<Vec<Scalar>, SerializationError> {
    if blob.len() != BYTES_PER_BLOB {
        return Err(SerializationError::BlobHasInvalidLength {
            length: blob.len(),
            bytes: blob.to_vec(),
        });
    }
    deserialize_bytes_to_scalars(blob)
}

pub(crate) fn deserialize_bytes_to_scalar(scalar_bytes: &[u8]) -> Result<Scalar, SerializationError> {
    let bytes32: [u8; BYTES_PER_FIELD_ELEMENT] =
        scalar_bytes
            .try_into()
            .map_err(|_| SerializationError::ScalarHasInvalidLength {
                length: scalar_bytes.len(),
                bytes: scalar_bytes.to_vec(),
            })?;

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

pub(crate) fn serialize_g1_compressed(point: &G1Point) -> [u8; BYTES_PER_G1_POINT] {
    point.to_compressed()
}

#[cfg(test)]
mod tests {
    use bls12_381::{ff::Field, group::Group, G1Projective};
    use rand::thread_rng;

    use super::*;
    use crate::constants::FIELD_ELEMENTS_PER_BLOB;

    fn random_scalar() -> Scalar {
        Scalar::random(thread_rng())
    }

    fn scalar_bytes() -> [u8; BYTES_PER_FIELD_ELEMENT] {
        random_scalar().to_bytes_be()
    }

    fn valid_blob() -> [u8; BYTES_PER_BLOB] {
        scalar_bytes()
            .repeat(FIELD_ELEMENTS_PER_BLOB)
            .try_into()
            .unwrap()
    }

    #[test]
    fn test_deserialize_scalar_valid() {
        let bytes = scalar_bytes();
        let scalar = deserialize_bytes_to_scalar(&bytes).unwrap();
        assert_eq!(scalar.to_bytes_be(), bytes);
    }

    #[test]
    fn test_deserialize_blob_to_scalars_valid() {
        let blob = valid_blob();
        let scalars = deserialize_blob_to_scalars(&blob).unwrap();
        assert_eq!(scalars.len(), FIELD_ELEMENTS_PER_BLOB);
    }

    #[test]
    fn test_deserialize_blob_to_scalars_invalid_length() {
        let blob = vec![0u8; BYTES_PER_BLOB - 1];
        assert!(matches!(
            deserialize_bytes_to_scalars(&blob),
            Err(SerializationError::ScalarHasInvalidLength { .. })
        ));
    }

    #[test]
    fn test_serialize_deserialize_g1_point() {
        let point = G1Point::from(G1Projective::generator());
        let compressed = point.to_compressed();
        let decompressed = deserialize_compressed_g1(&compressed).unwrap();
        assert_eq!(decompressed, point);
    }

    #[test]
    fn test_deserialize_compressed_g1_invalid_length() {
        let bad_bytes = vec![0u8; 47];
        assert!(matches!(
            deserialize_compressed_g1(&bad_bytes),
            Err(SerializationError::G1PointHasInvalidLength { .. })
        ));
    }
}
