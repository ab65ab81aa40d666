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

//! Per-release verifier parameters: the recursion `control_root` and `bn254_control_id`, and the
//! 4-byte selector a seal is tagged with to pick the right one.

use std::collections::HashMap;
use std::sync::OnceLock;

use crate::hash::{sha256, tagged_struct};
use crate::vk::{verifier_key_digest, verifying_key};

/// The `control_root` / `bn254_control_id` pair for one `risc0-zkvm` release line.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct VerifierParameters {
    pub control_root: [u8; 32],
    pub bn254_control_id: [u8; 32],
}

fn hex32(s: &str) -> [u8; 32] {
    let bytes = hex::decode(s).expect("embedded control constant is not valid hex");
    bytes.try_into().expect("embedded control constant is not 32 bytes")
}

/// First 4 bytes of
/// `SHA256(SHA256("risc0.Groth16ReceiptVerifierParameters") || control_root || bn254_control_id
/// || vk_digest || u16_LE(3))`, used as the wire selector so a seal can be matched to its
/// verifier parameters without re-deriving the whole digest.
pub fn calculate_selector(params: &VerifierParameters, vk_digest: &[u8; 32]) -> [u8; 4] {
    let tag = sha256(b"risc0.Groth16ReceiptVerifierParameters");
    let digest = tagged_struct(&tag, &[&params.control_root, &params.bn254_control_id, vk_digest]);
    let mut selector = [0u8; 4];
    selector.copy_from_slice(&digest[0..4]);
    selector
}

const VERSION_TABLE: &[(&str, &str, &str)] = &[
    (
        "1.0",
        "a516a057c9fbf5629106300934d48e0e775d4230e41e503347cad96fcbde7e2e",
        "51b54a62f2aa599aef768744c95de8c7d89bf716e11b1179f05d6cf0bcfeb60e",
    ),
    (
        "1.1",
        "8b6dcf11d463ac455361b41fb3ed053febb817491bdea00fdb340e45013b852e",
        "4e160df1e119ac0e3d658755a9edf38c8feb307b34bc10b57f4538dbe122a005",
    ),
    (
        "1.2",
        "8cdad9242664be3112aba377c5425a4df735eb1c6966472b561d2855932c0469",
        "c07a65145c3cb48b6101962ea607a4dd93c753bb26975cb47feb00d3666e4404",
    ),
    (
        "1.3",
        "6fcbfc564e08874a235c181e75bb53547402b116957f700497bf482e08060a15",
        "c07a65145c3cb48b6101962ea607a4dd93c753bb26975cb47feb00d3666e4404",
    ),
    (
        "2.0",
        "539032186827b06719244873b17b2d4c122e2d02cfb1994fe958b2523b844576",
        "c07a65145c3cb48b6101962ea607a4dd93c753bb26975cb47feb00d3666e4404",
    ),
    (
        "2.1",
        "884389273e128b32475b334dec75ee619b77cb33d41c332021fe7e44c746ee60",
        "c07a65145c3cb48b6101962ea607a4dd93c753bb26975cb47feb00d3666e4404",
    ),
    (
        "2.2",
        "ce52bf56033842021af3cf6db8a50d1b7535c125a34f1a22c6fdcf002c5a1529",
        "c07a65145c3cb48b6101962ea607a4dd93c753bb26975cb47feb00d3666e4404",
    ),
    (
        "2.3",
        "ce52bf56033842021af3cf6db8a50d1b7535c125a34f1a22c6fdcf002c5a1529",
        "c07a65145c3cb48b6101962ea607a4dd93c753bb26975cb47feb00d3666e4404",
    ),
    (
        "3.0",
        "a54dc85ac99f851c92d7c96d7318af41dbe7c0194edfcc37eb4d422a998c1f56",
        "c07a65145c3cb48b6101962ea607a4dd93c753bb26975cb47feb00d3666e4404",
    ),
];

fn build_version_parameters() -> Vec<(&'static str, VerifierParameters)> {
    VERSION_TABLE
        .iter()
        .map(|(version, control_root, bn254_control_id)| {
            (
                *version,
                VerifierParameters {
                    control_root: hex32(control_root),
                    bn254_control_id: hex32(bn254_control_id),
                },
            )
        })
        .collect()
}

static SELECTOR_REGISTRY: OnceLock<HashMap<[u8; 4], VerifierParameters>> = OnceLock::new();
static VERSION_REGISTRY: OnceLock<HashMap<&'static str, VerifierParameters>> = OnceLock::new();

fn selector_registry() -> &'static HashMap<[u8; 4], VerifierParameters> {
    SELECTOR_REGISTRY.get_or_init(|| {
        let vk = verifying_key().expect("embedded verifying key is malformed");
        let vk_digest = verifier_key_digest(&vk);
        build_version_parameters()
            .into_iter()
            .map(|(_, params)| (calculate_selector(&params, &vk_digest), params))
            .collect()
    })
}

fn version_registry() -> &'static HashMap<&'static str, VerifierParameters> {
    VERSION_REGISTRY.get_or_init(|| build_version_parameters().into_iter().collect())
}

/// Looks up the verifier parameters whose selector (first 4 bytes of the parameters digest)
/// matches `selector`.
pub fn find_verifier_parameters(selector: &[u8; 4]) -> Option<VerifierParameters> {
    selector_registry().get(selector).copied()
}

/// Looks up the verifier parameters for a `risc0-zkvm` release version string (e.g. `"1.2"`).
///
/// Supplements [`find_verifier_parameters`] for callers that know the release they proved
/// against rather than the wire selector.
pub fn find_verifier_parameters_by_version(version: &str) -> Option<VerifierParameters> {
    version_registry().get(version).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_version_constant_is_32_bytes() {
        for (version, control_root, bn254_control_id) in VERSION_TABLE {
            assert_eq!(
                hex::decode(control_root).unwrap().len(),
                32,
                "control_root for {version} is not 32 bytes"
            );
            assert_eq!(
                hex::decode(bn254_control_id).unwrap().len(),
                32,
                "bn254_control_id for {version} is not 32 bytes"
            );
        }
    }

    #[test]
    fn selector_lookup_round_trips() {
        let params = find_verifier_parameters_by_version("1.2").expect("1.2 must be registered");
        let vk_digest = verifier_key_digest(&verifying_key().unwrap());
        let selector = calculate_selector(&params, &vk_digest);
        let found = find_verifier_parameters(&selector).expect("selector must resolve");
        assert_eq!(found, params);
    }

    #[test]
    fn unknown_selector_is_none() {
        assert!(find_verifier_parameters(&[0xff, 0xff, 0xff, 0xff]).is_none());
    }

    #[test]
    fn distinct_versions_yield_distinct_selectors() {
        let vk_digest = verifier_key_digest(&verifying_key().unwrap());
        let a = find_verifier_parameters_by_version("1.0").unwrap();
        let b = find_verifier_parameters_by_version("1.1").unwrap();
        assert_ne!(
            calculate_selector(&a, &vk_digest),
            calculate_selector(&b, &vk_digest)
        );
    }
}
