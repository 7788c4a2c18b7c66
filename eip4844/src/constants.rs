/// A scalar field element is encoded as 32 bytes, big-endian.
pub const BYTES_PER_FIELD_ELEMENT: usize = 32;
/// The number of field elements that make up a single blob's polynomial.
pub const FIELD_ELEMENTS_PER_BLOB: usize = 4096;
/// The size, in bytes, of a serialized blob.
pub const BYTES_PER_BLOB: usize = FIELD_ELEMENTS_PER_BLOB * BYTES_PER_FIELD_ELEMENT;

/// A compressed G1 point is encoded as 48 bytes.
pub(crate) const BYTES_PER_G1_POINT: usize = 48;
/// The size, in bytes, of a serialized KZG commitment.
pub const BYTES_PER_COMMITMENT: usize = BYTES_PER_G1_POINT;
