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

//! Offline Groth16/BN254 verification of RISC Zero vote receipts.
//!
//! A caller presents a hex-encoded `(image_id, journal, journal_abi, seal)` bundle. This crate
//! decides, by cryptographic check alone, whether the seal attests that a guest with that image
//! id halted successfully having produced that journal, then decodes `journal_abi` into a typed
//! [`VoteResponse`]. No proving, no transport, no replay tracking: see the crate's design notes
//! for the full list of what is deliberately out of scope.

pub mod claim;
pub mod error;
pub mod groth16;
pub mod hash;
pub mod journal;
pub mod params;
pub mod points;
pub mod seal;
pub mod signals;
pub mod vk;

pub use error::Error;
pub use journal::VoteResponse;

/// A vote receipt verification request.
///
/// `image_id`, `journal`, `journal_abi`, and `seal` are hex-encoded and drive the core
/// verification. The remaining fields are application-layer metadata the core does not read;
/// they pass straight through to whatever the caller threads a [`VoteRequest`] through (e.g. a
/// database row keyed by `nullifier`).
#[derive(Clone, Debug)]
pub struct VoteRequest {
    pub image_id: String,
    pub journal: String,
    pub journal_abi: String,
    pub seal: String,
    pub nullifier: String,
    pub age: u32,
    pub is_student: bool,
    pub poll_id: u64,
    pub option_a: u64,
    pub option_b: u64,
}

fn decode_hex_field(value: &str, field: &'static str) -> Result<Vec<u8>, Error> {
    hex::decode(value).map_err(|source| Error::HexDecode { field, source })
}

fn decode_fixed_hex_field(value: &str, field: &'static str) -> Result<[u8; 32], Error> {
    let bytes = decode_hex_field(value, field)?;
    let actual = bytes.len();
    bytes.try_into().map_err(|_| Error::LengthMismatch {
        field,
        expected: 32,
        actual,
    })
}

/// Verifies `req`'s Groth16 seal and, on success, decodes its journal into a [`VoteResponse`].
///
/// Steps (mirrors the orchestration this crate's verifying key and hash primitives were built
/// for): hex-decode the four wire fields, build the claim digest, split and decode the seal,
/// resolve the matching verifying parameters, assemble the five public signals, run the pairing
/// check, and finally decode `journal_abi`. `journal` and `journal_abi` are independent inputs;
/// this crate does not cross-check one against the other.
#[tracing::instrument(skip(req), err)]
pub fn check_vote(req: &VoteRequest) -> Result<VoteResponse, Error> {
    let image_id = decode_fixed_hex_field(&req.image_id, "image_id")?;
    let journal = decode_hex_field(&req.journal, "journal")?;
    let journal_abi = decode_hex_field(&req.journal_abi, "journal_abi")?;
    let seal_bytes = decode_hex_field(&req.seal, "seal")?;

    let journal_digest = hash::sha256(&journal);
    let claim_digest = claim::calculate_claim_digest(&image_id, &journal_digest);

    let (proof, params) = seal::decode_seal(&seal_bytes)?;
    let signals = signals::assemble_public_signals(&params, &claim_digest)?;

    if std::env::var("GROTH16_DEBUG").as_deref() == Ok("1") {
        tracing::trace!(?signals, "assembled public signals");
    }

    let verifying_key = vk::verifying_key()?;
    groth16::verify(&verifying_key, &proof, &signals)?;

    journal::decode_journal(&journal_abi)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_request() -> VoteRequest {
        VoteRequest {
            image_id: hex::encode([1u8; 32]),
            journal: hex::encode(b"journal bytes"),
            journal_abi: hex::encode(b"unused in this test"),
            seal: String::new(),
            nullifier: "abc".into(),
            age: 21,
            is_student: true,
            poll_id: 1,
            option_a: 1,
            option_b: 0,
        }
    }

    #[test]
    fn check_vote_rejects_malformed_image_id() {
        let mut req = base_request();
        req.image_id = hex::encode([1u8; 31]);
        assert!(matches!(
            check_vote(&req),
            Err(Error::LengthMismatch { field: "image_id", .. })
        ));
    }

    #[test]
    fn check_vote_rejects_non_hex_seal() {
        let mut req = base_request();
        req.seal = "not hex".into();
        assert!(matches!(check_vote(&req), Err(Error::HexDecode { field: "seal", .. })));
    }

    #[test]
    fn check_vote_rejects_unknown_selector_before_touching_the_journal() {
        // A syntactically valid but unregistered selector, with a correctly-sized (but
        // meaningless) 256-byte body. This exercises orchestrator wiring up through step 6
        // without needing a cryptographically valid seal, which cannot be fabricated offline.
        let mut req = base_request();
        let mut seal = vec![0xde, 0xad, 0xbe, 0xef];
        seal.extend(std::iter::repeat(0u8).take(256));
        req.seal = hex::encode(seal);
        assert!(matches!(check_vote(&req), Err(Error::UnknownSelector(_))));
    }

    #[test]
    fn check_vote_rejects_a_syntactically_valid_but_cryptographically_invalid_seal() {
        // A seal with a registered selector and well-formed (on-curve) points that does not
        // satisfy the pairing check. A pairing-valid fixture requires an actual Groth16 prover
        // run and cannot be produced in this environment.
        use ark_bn254::{G1Affine, G2Affine};
        use ark_ec::AffineRepr;
        use ark_ff::{BigInteger, PrimeField};

        fn fq_to_be(value: ark_bn254::Fq) -> [u8; 32] {
            let bytes = value.into_bigint().to_bytes_be();
            let mut out = [0u8; 32];
            out[32 - bytes.len()..].copy_from_slice(&bytes);
            out
        }

        let params = params::find_verifier_parameters_by_version("1.2").unwrap();
        let vk_digest = vk::verifier_key_digest(&vk::verifying_key().unwrap());
        let selector = params::calculate_selector(&params, &vk_digest);

        let g1 = G1Affine::generator();
        let g2 = G2Affine::generator();
        let mut seal = Vec::new();
        seal.extend_from_slice(&selector);
        seal.extend_from_slice(&fq_to_be(g1.x));
        seal.extend_from_slice(&fq_to_be(g1.y));
        seal.extend_from_slice(&fq_to_be(g2.x.c1));
        seal.extend_from_slice(&fq_to_be(g2.x.c0));
        seal.extend_from_slice(&fq_to_be(g2.y.c1));
        seal.extend_from_slice(&fq_to_be(g2.y.c0));
        seal.extend_from_slice(&fq_to_be(g1.x));
        seal.extend_from_slice(&fq_to_be(g1.y));

        let mut req = base_request();
        req.seal = hex::encode(seal);
        assert!(matches!(check_vote(&req), Err(Error::ProofInvalid)));
    }
}
