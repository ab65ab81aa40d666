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

//! Assembles the five Groth16 public inputs from a verifier's control parameters and a claim
//! digest.

use ark_bn254::Fr;
use ark_ff::{BigInteger, PrimeField};

use crate::error::Error;
use crate::hash::{reverse_byte_order, split_digest};
use crate::params::VerifierParameters;

/// Builds `[s0, s1, s2, s3, s4]`:
///
/// - `(s0, s1) = split_digest(control_root)` (upper, lower 128 bits),
/// - `(s2, s3) = split_digest(claim_digest)`,
/// - `s4 = be_int(reverse(bn254_control_id))`.
///
/// Each value must be strictly less than the BN254 scalar field order; this is checked
/// explicitly rather than silently reducing mod `r`, since a reduced-but-wrong value would make
/// an invalid proof look like a mismatched claim instead of a malformed input.
pub fn assemble_public_signals(
    params: &VerifierParameters,
    claim_digest: &[u8; 32],
) -> Result<[Fr; 5], Error> {
    let (s0, s1) = split_digest(&params.control_root);
    let (s2, s3) = split_digest(claim_digest);
    let s4 = reverse_byte_order(&params.bn254_control_id);

    let limbs: [&[u8]; 5] = [&s0, &s1, &s2, &s3, &s4];
    let mut signals = [Fr::from(0u64); 5];
    for (index, limb) in limbs.iter().enumerate() {
        signals[index] = field_element_from_be_bytes(limb, index)?;
    }
    Ok(signals)
}

fn field_element_from_be_bytes(bytes: &[u8], index: usize) -> Result<Fr, Error> {
    let mut padded = [0u8; 32];
    padded[32 - bytes.len()..].copy_from_slice(bytes);

    let mut modulus = [0u8; 32];
    let modulus_bytes = Fr::MODULUS.to_bytes_be();
    modulus[32 - modulus_bytes.len()..].copy_from_slice(&modulus_bytes);

    if padded >= modulus {
        return Err(Error::PublicInputOutOfField { index });
    }
    Ok(Fr::from_be_bytes_mod_order(&padded))
}
