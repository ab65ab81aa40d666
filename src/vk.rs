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

//! The fixed Groth16 verifying key for the vote-receipt circuit, and its digest.
//!
//! These are trusted-setup constants. They are not configurable: there is exactly one circuit,
//! and embedding the wrong key would silently accept forged receipts.

use ark_bn254::{G1Affine, G2Affine};

use crate::error::Error;
use crate::hash::{sha256, tagged_list, tagged_struct};
use crate::points::{from_u256, g1_from_bytes, g2_from_bytes};

/// The Groth16 verifying key: one Alpha (G1), three G2 points, and six G1 points for the input
/// commitment (one offset plus five public inputs).
pub struct VerifyingKey {
    pub alpha: G1Affine,
    pub beta: G2Affine,
    pub gamma: G2Affine,
    pub delta: G2Affine,
    pub ic: [G1Affine; 6],
}

/// Builds the embedded verifying key, validating every G1 point lies on the curve.
///
/// Fails with [`Error::PointNotOnCurve`] if a trusted-setup constant is malformed or does not
/// describe a point on the curve. Either would indicate a transcription error in this crate, not
/// a caller mistake, but it is propagated rather than panicking: `check_vote` is the only caller
/// and is already fallible end to end.
pub fn verifying_key() -> Result<VerifyingKey, Error> {
    let alpha = g1_from_bytes(
        &from_u256(
            "20491192805390485299153009773594534940189261866228447918068658471970481763042",
            "alpha",
        )?,
        &from_u256(
            "9383485363053290200918347156157836566562967994039712273449902621266178545958",
            "alpha",
        )?,
        "alpha",
    )?;

    let beta = g2_from_bytes(
        &from_u256(
            "4252822878758300859123897981450591353533073413197771768651442665752259397132",
            "beta",
        )?,
        &from_u256(
            "6375614351688725206403948262868962793625744043794305715222011528459656738731",
            "beta",
        )?,
        &from_u256(
            "21847035105528745403288232691147584728191162732299865338377159692350059136679",
            "beta",
        )?,
        &from_u256(
            "10505242626370262277552901082094356697409835680220590971873171140371331206856",
            "beta",
        )?,
    );

    let gamma = g2_from_bytes(
        &from_u256(
            "11559732032986387107991004021392285783925812861821192530917403151452391805634",
            "gamma",
        )?,
        &from_u256(
            "10857046999023057135944570762232829481370756359578518086990519993285655852781",
            "gamma",
        )?,
        &from_u256(
            "4082367875863433681332203403145435568316851327593401208105741076214120093531",
            "gamma",
        )?,
        &from_u256(
            "8495653923123431417604973247489272438418190587263600148770280649306958101930",
            "gamma",
        )?,
    );

    let delta = g2_from_bytes(
        &from_u256(
            "1668323501672964604911431804142266013250380587483576094566949227275849579036",
            "delta",
        )?,
        &from_u256(
            "12043754404802191763554326994664886008979042643626290185762540825416902247219",
            "delta",
        )?,
        &from_u256(
            "7710631539206257456743780535472368339139328733484942210876916214502466455394",
            "delta",
        )?,
        &from_u256(
            "13740680757317479711909903993315946540841369848973133181051452051592786724563",
            "delta",
        )?,
    );

    let ic_decimal: [(&str, &str); 6] = [
        (
            "8446592859352799428420270221449902464741693648963397251242447530457567083492",
            "1064796367193003797175961162477173481551615790032213185848276823815288302804",
        ),
        (
            "3179835575189816632597428042194253779818690147323192973511715175294048485951",
            "20895841676865356752879376687052266198216014795822152491318012491767775979074",
        ),
        (
            "5332723250224941161709478398807683311971555792614491788690328996478511465287",
            "21199491073419440416471372042641226693637837098357067793586556692319371762571",
        ),
        (
            "12457994489566736295787256452575216703923664299075106359829199968023158780583",
            "19706766271952591897761291684837117091856807401404423804318744964752784280790",
        ),
        (
            "19617808913178163826953378459323299110911217259216006187355745713323154132237",
            "21663537384585072695701846972542344484111393047775983928357046779215877070466",
        ),
        (
            "6834578911681792552110317589222010969491336870276623105249474534788043166867",
            "15060583660288623605191393599883223885678013570733629274538391874953353488393",
        ),
    ];

    let mut ic = [alpha; 6];
    for (slot, (x, y)) in ic.iter_mut().zip(ic_decimal.iter()) {
        *slot = g1_from_bytes(&from_u256(x, "ic")?, &from_u256(y, "ic")?, "ic")?;
    }

    Ok(VerifyingKey {
        alpha,
        beta,
        gamma,
        delta,
        ic,
    })
}

/// Digest identifying this verifying key, used as one of the inputs to the selector.
///
/// ```text
/// D = SHA256(
///   SHA256("risc0_groth16.VerifyingKey")
///   || SHA256(alpha.x || alpha.y)
///   || SHA256(beta.x.c1 || beta.x.c0 || beta.y.c1 || beta.y.c0)
///   || SHA256(gamma.x.c1 || gamma.x.c0 || gamma.y.c1 || gamma.y.c0)
///   || SHA256(delta.x.c1 || delta.x.c0 || delta.y.c1 || delta.y.c0)
///   || tagged_list("risc0_groth16.VerifyingKey.IC", [SHA256(IC[i].x || IC[i].y) for i in IC])
///   || u16_LE(5)
/// )
/// ```
pub fn verifier_key_digest(vk: &VerifyingKey) -> [u8; 32] {
    let tag = sha256(b"risc0_groth16.VerifyingKey");
    let ic_tag = sha256(b"risc0_groth16.VerifyingKey.IC");

    let alpha_digest = hash_g1(&vk.alpha);
    let beta_digest = hash_g2(&vk.beta);
    let gamma_digest = hash_g2(&vk.gamma);
    let delta_digest = hash_g2(&vk.delta);
    let ic_digests: Vec<[u8; 32]> = vk.ic.iter().map(hash_g1).collect();
    let ic_list_digest = tagged_list(&ic_tag, &ic_digests);

    tagged_struct(
        &tag,
        &[
            &alpha_digest,
            &beta_digest,
            &gamma_digest,
            &delta_digest,
            &ic_list_digest,
        ],
    )
}

fn hash_g1(point: &G1Affine) -> [u8; 32] {
    let mut bytes = Vec::with_capacity(64);
    bytes.extend_from_slice(&fq_to_be(point.x));
    bytes.extend_from_slice(&fq_to_be(point.y));
    sha256(&bytes)
}

fn hash_g2(point: &G2Affine) -> [u8; 32] {
    let mut bytes = Vec::with_capacity(128);
    bytes.extend_from_slice(&fq_to_be(point.x.c1));
    bytes.extend_from_slice(&fq_to_be(point.x.c0));
    bytes.extend_from_slice(&fq_to_be(point.y.c1));
    bytes.extend_from_slice(&fq_to_be(point.y.c0));
    sha256(&bytes)
}

fn fq_to_be(value: ark_bn254::Fq) -> [u8; 32] {
    use ark_ff::{BigInteger, PrimeField};
    let bytes = value.into_bigint().to_bytes_be();
    let mut out = [0u8; 32];
    out[32 - bytes.len()..].copy_from_slice(&bytes);
    out
}
