// Copyright 2024 RISC Zero, Inc.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Decodes the wire seal: a 4-byte selector followed by a 256-byte Groth16 proof `(A, B, C)`.

use ark_bn254::{G1Affine, G2Affine};

use crate::error::Error;
use crate::params::{find_verifier_parameters, VerifierParameters};
use crate::points::{g1_from_bytes, g2_from_bytes};

const SEAL_BODY_LEN: usize = 256;

/// The three Groth16 proof points, parsed and curve-checked (G1 points only; see
/// [`crate::points::g2_from_bytes`]).
pub struct ProofPairingData {
    pub a: G1Affine,
    pub b: G2Affine,
    pub c: G1Affine,
}

/// Splits `seal` into its selector and 256-byte proof body, decodes the proof, and resolves the
/// selector to its registered [`VerifierParameters`].
///
/// Layout of the 256-byte body, all big-endian:
/// `A.x[32] A.y[32] B.x.c1[32] B.x.c0[32] B.y.c1[32] B.y.c0[32] C.x[32] C.y[32]`.
pub fn decode_seal(seal: &[u8]) -> Result<(ProofPairingData, VerifierParameters), Error> {
    if seal.len() < 4 {
        return Err(Error::LengthMismatch {
            field: "seal",
            expected: 4,
            actual: seal.len(),
        });
    }
    let mut selector = [0u8; 4];
    selector.copy_from_slice(&seal[0..4]);

    let body = &seal[4..];
    if body.len() != SEAL_BODY_LEN {
        return Err(Error::SealMalformed { actual: body.len() });
    }

    let params = find_verifier_parameters(&selector).ok_or(Error::UnknownSelector(selector))?;

    let chunk = |i: usize| -> [u8; 32] {
        let mut out = [0u8; 32];
        out.copy_from_slice(&body[i * 32..(i + 1) * 32]);
        out
    };

    let a = g1_from_bytes(&chunk(0), &chunk(1), "seal.a")?;
    let b = g2_from_bytes(&chunk(2), &chunk(3), &chunk(4), &chunk(5));
    let c = g1_from_bytes(&chunk(6), &chunk(7), "seal.c")?;

    Ok((ProofPairingData { a, b, c }, params))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::calculate_selector;
    use crate::vk::{verifier_key_digest, verifying_key};
    use ark_ec::AffineRepr;
    use ark_ff::{BigInteger, PrimeField};

    fn fq_to_be(value: ark_bn254::Fq) -> [u8; 32] {
        let bytes = value.into_bigint().to_bytes_be();
        let mut out = [0u8; 32];
        out[32 - bytes.len()..].copy_from_slice(&bytes);
        out
    }

    fn encode_generator_seal(selector: [u8; 4]) -> Vec<u8> {
        let g1 = G1Affine::generator();
        let g2 = G2Affine::generator();
        let mut seal = Vec::with_capacity(4 + SEAL_BODY_LEN);
        seal.extend_from_slice(&selector);
        seal.extend_from_slice(&fq_to_be(g1.x));
        seal.extend_from_slice(&fq_to_be(g1.y));
        seal.extend_from_slice(&fq_to_be(g2.x.c1));
        seal.extend_from_slice(&fq_to_be(g2.x.c0));
        seal.extend_from_slice(&fq_to_be(g2.y.c1));
        seal.extend_from_slice(&fq_to_be(g2.y.c0));
        seal.extend_from_slice(&fq_to_be(g1.x));
        seal.extend_from_slice(&fq_to_be(g1.y));
        seal
    }

    #[test]
    fn decode_seal_rejects_unknown_selector() {
        let seal = encode_generator_seal([0xde, 0xad, 0xbe, 0xef]);
        assert!(matches!(decode_seal(&seal), Err(Error::UnknownSelector(_))));
    }

    #[test]
    fn decode_seal_rejects_seal_shorter_than_the_selector() {
        let seal = vec![0u8; 3];
        assert!(matches!(
            decode_seal(&seal),
            Err(Error::LengthMismatch {
                field: "seal",
                expected: 4,
                actual: 3,
            })
        ));
    }

    #[test]
    fn decode_seal_rejects_short_body() {
        let params = crate::params::find_verifier_parameters_by_version("1.2").unwrap();
        let vk_digest = verifier_key_digest(&verifying_key().unwrap());
        let selector = calculate_selector(&params, &vk_digest);
        let mut seal = encode_generator_seal(selector);
        seal.truncate(seal.len() - 1);
        assert!(matches!(decode_seal(&seal), Err(Error::SealMalformed { .. })));
    }

    #[test]
    fn decode_seal_parses_generator_points() {
        let params = crate::params::find_verifier_parameters_by_version("1.2").unwrap();
        let vk_digest = verifier_key_digest(&verifying_key().unwrap());
        let selector = calculate_selector(&params, &vk_digest);
        let seal = encode_generator_seal(selector);
        let (proof, found_params) = decode_seal(&seal).unwrap();
        assert_eq!(proof.a, G1Affine::generator());
        assert_eq!(proof.b, G2Affine::generator());
        assert_eq!(found_params, params);
    }
}
