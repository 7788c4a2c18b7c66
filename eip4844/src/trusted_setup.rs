use bls12_381::{G1Point, G2Point};
use serde::Deserialize;

use crate::kzg_open::{prover::CommitKey, verifier::VerificationKey};

const TRUSTED_SETUP_JSON: &str = include_str!("../../eip7594/data/trusted_setup_4096.json");

#[derive(Deserialize, Debug, PartialEq, Eq)]
pub struct TrustedSetup {
    /// G1 Monomial represents a list of uncompressed hex encoded group
    /// elements in the G1 group on the bls12-381 curve.
    pub g1_monomial: Vec<String>,
    /// G1 Lagrange represents a list of uncompressed hex encoded group
    /// elements in the G1 group on the bls12-381 curve, related to
    /// `g1_monomial` by an inverse FFT.
    pub g1_lagrange: Vec<String>,
    /// G2 Monomial represents a list of uncompressed hex encoded group
    /// elements in the G2 group on the bls12-381 curve.
    pub g2_monomial: Vec<String>,
}

impl Default for TrustedSetup {
    fn default() -> Self {
        Self::from_embed()
    }
}

/// Whether to check that deserialized points are in the correct subgroup.
#[derive(Debug, Copy, Clone)]
enum SubgroupCheck {
    Check,
    NoCheck,
}

impl From<&TrustedSetup> for CommitKey {
    fn from(setup: &TrustedSetup) -> Self {
        Self {
            g1_lagrange: deserialize_g1_points(&setup.g1_lagrange, SubgroupCheck::NoCheck),
        }
    }
}

impl From<&TrustedSetup> for VerificationKey {
    fn from(setup: &TrustedSetup) -> Self {
        let g1_monomial = deserialize_g1_points(&setup.g1_monomial[..2], SubgroupCheck::NoCheck);
        let g2_monomial = deserialize_g2_points(&setup.g2_monomial[..2], SubgroupCheck::NoCheck);
        Self {
            gen_g1: g1_monomial[0],
            gen_g2: g2_monomial[0],
            tau_g2: g2_monomial[1],
        }
    }
}

impl TrustedSetup {
    /// Parse a JSON string in the format specified by the Ethereum trusted setup.
    pub fn from_json(json: &str) -> Self {
        let trusted_setup = Self::from_json_unchecked(json);
        trusted_setup.validate_trusted_setup();
        trusted_setup
    }

    /// Parse a JSON string without checking that the points are in the
    /// correct subgroup.
    pub fn from_json_unchecked(json: &str) -> Self {
        serde_json::from_str(json)
            .expect("could not parse json string into a TrustedSetup structure")
    }

    /// Panics if any of the points are not in the correct subgroup.
    fn validate_trusted_setup(&self) {
        let _: CommitKey = CommitKey::from(self);
        deserialize_g1_points(&self.g1_monomial[..2], SubgroupCheck::Check);
        deserialize_g2_points(&self.g2_monomial[..2], SubgroupCheck::Check);
    }

    fn from_embed() -> Self {
        Self::from_json_unchecked(TRUSTED_SETUP_JSON)
    }
}

fn deserialize_g1_points<T: AsRef<str>>(
    g1_points_hex_str: &[T],
    check: SubgroupCheck,
) -> Vec<G1Point> {
    let mut g1_points = Vec::new();
    for g1_hex_str in g1_points_hex_str {
        let g1_hex_str = g1_hex_str.as_ref();

        let g1_hex_str_without_0x = g1_hex_str
            .strip_prefix("0x")
            .expect("expected hex points to be prefixed with `0x`");
        let g1_point_bytes: [u8; 48] = hex::decode(g1_hex_str_without_0x)
            .expect("trusted setup has malformed g1 points")
            .try_into()
            .expect("expected 48 bytes for G1 point");

        let point = match check {
            SubgroupCheck::Check => {
                G1Point::from_compressed(&g1_point_bytes).expect("invalid g1 point")
            }
            SubgroupCheck::NoCheck => {
                G1Point::from_compressed_unchecked(&g1_point_bytes).expect("invalid g1 point")
            }
        };

        g1_points.push(point);
    }

    g1_points
}

fn deserialize_g2_points<T: AsRef<str>>(
    g2_points_hex_str: &[T],
    subgroup_check: SubgroupCheck,
) -> Vec<G2Point> {
    let mut g2_points = Vec::new();
    for g2_hex_str in g2_points_hex_str {
        let g2_hex_str = g2_hex_str.as_ref();
        let g2_hex_str_without_0x = g2_hex_str
            .strip_prefix("0x")
            .expect("expected hex points to be prefixed with `0x`");
        let g2_point_bytes: [u8; 96] = hex::decode(g2_hex_str_without_0x)
            .expect("trusted setup has malformed g2 points")
            .try_into()
            .expect("expected 96 bytes for G2 point");

        let point = match subgroup_check {
            SubgroupCheck::Check => G2Point::from_compressed(&g2_point_bytes).unwrap(),
            SubgroupCheck::NoCheck => G2Point::from_compressed_unchecked(&g2_point_bytes).unwrap(),
        };
        g2_points.push(point);
    }

    g2_points
}

#[test]
fn test_embedded_setup_has_points_in_correct_subgroup() {
    let setup = TrustedSetup::default();
    setup.validate_trusted_setup();
}
