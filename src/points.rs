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

//! Shared BN254 coordinate parsing, used by both the verifying key (trusted-setup decimal
//! constants) and the seal codec (wire-format big-endian bytes).
//!
//! The single hazard both call sites share: on the wire (and in the `snarkjs`/Go reference
//! convention the upstream toolchain uses), an Fp2 element is laid out as `(imaginary, real)`,
//! the reverse of `ark_bn254`'s internal `(c0 = real, c1 = imaginary)` order. The swap happens
//! exactly once, here, in [`g2_from_bytes`].

use ark_bn254::{Fq, Fq2, G1Affine, G2Affine};
use ark_ff::PrimeField;
use num_bigint::BigUint;

use crate::error::Error;

/// Parses a decimal integer string (as used by the trusted-setup VK constants) into its 32-byte
/// big-endian representation.
///
/// `label` identifies the point this constant belongs to, surfaced via
/// [`Error::PointNotOnCurve`] if the string is not a valid decimal integer or does not fit in 256
/// bits — a malformed trusted-setup constant means the point it encodes can never be constructed.
pub fn from_u256(decimal: &str, label: &'static str) -> Result<[u8; 32], Error> {
    let value = decimal
        .parse::<BigUint>()
        .map_err(|_| Error::PointNotOnCurve { point: label })?;
    let be = value.to_bytes_be();
    if be.len() > 32 {
        return Err(Error::PointNotOnCurve { point: label });
    }
    let mut out = [0u8; 32];
    out[32 - be.len()..].copy_from_slice(&be);
    Ok(out)
}

fn fq_from_be_bytes(bytes: &[u8; 32]) -> Fq {
    Fq::from_be_bytes_mod_order(bytes)
}

/// Builds a G1 point from two 32-byte big-endian coordinates and checks it lies on the curve
/// `y^2 = x^3 + 3`.
pub fn g1_from_bytes(x: &[u8; 32], y: &[u8; 32], label: &'static str) -> Result<G1Affine, Error> {
    let point = G1Affine::new_unchecked(fq_from_be_bytes(x), fq_from_be_bytes(y));
    if !point.is_on_curve() {
        return Err(Error::PointNotOnCurve { point: label });
    }
    Ok(point)
}

/// Builds a G2 point from four 32-byte big-endian chunks, in the wire order
/// `[x.c1 (imag), x.c0 (real), y.c1 (imag), y.c0 (real)]`.
///
/// On-curve / subgroup validation for G2 is intentionally deferred to the pairing computation
/// itself.
pub fn g2_from_bytes(x_c1: &[u8; 32], x_c0: &[u8; 32], y_c1: &[u8; 32], y_c0: &[u8; 32]) -> G2Affine {
    let x = Fq2::new(fq_from_be_bytes(x_c0), fq_from_be_bytes(x_c1));
    let y = Fq2::new(fq_from_be_bytes(y_c0), fq_from_be_bytes(y_c1));
    G2Affine::new_unchecked(x, y)
}
