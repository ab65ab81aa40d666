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

//! The Groth16 pairing check itself.
//!
//! Decomposed into `compute_vk_x` (the G1 multi-scalar-multiplication over the public inputs)
//! and [`verify`] (the four-term pairing product) rather than one opaque `verify_proof` call, so
//! `compute_vk_x`'s linearity can be exercised on its own in tests.

use ark_bn254::{Bn254, Fq12, Fr, G1Affine, G1Projective, G2Affine};
use ark_ec::pairing::Pairing;
use ark_ec::{AffineRepr, CurveGroup};
use ark_ff::Field;

use crate::error::Error;
use crate::seal::ProofPairingData;
use crate::vk::VerifyingKey;

/// `IC[0] + sum(inputs[i] * IC[i + 1])`, the public-input commitment to G1.
///
/// Exposed so callers (and tests) can check it is linear in `inputs` independently of the
/// pairing check that consumes it.
pub fn compute_vk_x(vk: &VerifyingKey, inputs: &[Fr; 5]) -> G1Affine {
    let mut vk_x = vk.ic[0].into_group();
    for (input, ic) in inputs.iter().zip(vk.ic[1..].iter()) {
        vk_x += *ic * *input;
    }
    vk_x.into_affine()
}

/// Checks `e(-A, B) * e(Alpha, Beta) * e(vk_x, Gamma) * e(C, Delta) == 1`.
pub fn verify(vk: &VerifyingKey, proof: &ProofPairingData, inputs: &[Fr; 5]) -> Result<(), Error> {
    let vk_x = compute_vk_x(vk, inputs);

    let g1_points = [-proof.a, vk.alpha, vk_x, proof.c];
    let g2_points = [proof.b, vk.beta, vk.gamma, vk.delta];

    let miller_loop_result = Bn254::multi_miller_loop(g1_points, g2_points);
    let result = Bn254::final_exponentiation(miller_loop_result).ok_or(Error::ProofInvalid)?;

    if result.0 == Fq12::ONE {
        Ok(())
    } else {
        Err(Error::ProofInvalid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vk::verifying_key;

    #[test]
    fn compute_vk_x_with_zero_inputs_is_ic0() {
        let vk = verifying_key().unwrap();
        let zero = [Fr::from(0u64); 5];
        assert_eq!(compute_vk_x(&vk, &zero), vk.ic[0]);
    }

    #[test]
    fn compute_vk_x_is_linear_in_inputs() {
        let vk = verifying_key().unwrap();
        let a = [
            Fr::from(3u64),
            Fr::from(1u64),
            Fr::from(4u64),
            Fr::from(1u64),
            Fr::from(5u64),
        ];
        let b = [
            Fr::from(2u64),
            Fr::from(7u64),
            Fr::from(1u64),
            Fr::from(8u64),
            Fr::from(2u64),
        ];
        let sum: Vec<Fr> = a.iter().zip(b.iter()).map(|(x, y)| *x + *y).collect();
        let sum: [Fr; 5] = sum.try_into().unwrap();

        let vk_x_a = compute_vk_x(&vk, &a);
        let vk_x_b = compute_vk_x(&vk, &b);
        let vk_x_sum = compute_vk_x(&vk, &sum);

        // vk_x(a) + vk_x(b) - ic[0] == vk_x(a + b), since each is ic[0] + linear(inputs).
        let lhs = (G1Projective::from(vk_x_a) + G1Projective::from(vk_x_b)
            - G1Projective::from(vk.ic[0]))
        .into_affine();
        assert_eq!(lhs, vk_x_sum);
    }

    #[test]
    fn verify_rejects_an_unrelated_proof() {
        let vk = verifying_key().unwrap();
        let proof = ProofPairingData {
            a: G1Affine::generator(),
            b: G2Affine::generator(),
            c: G1Affine::generator(),
        };
        let inputs = [Fr::from(1u64); 5];
        assert!(matches!(verify(&vk, &proof, &inputs), Err(Error::ProofInvalid)));
    }
}
