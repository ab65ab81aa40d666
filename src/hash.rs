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

//! RISC Zero's domain-separated hashing primitives.
//!
//! `tagged_struct` and `tagged_list` are the building blocks every digest in this crate is
//! derived from (receipt claims, the verifying key digest, the selector). Getting the length
//! suffix, fold direction, or endianness wrong here breaks interoperability with every proof
//! produced by the upstream toolchain, silently.

use sha2::{Digest, Sha256};

/// SHA-256 of `bytes`.
pub fn sha256(bytes: &[u8]) -> [u8; 32] {
    Sha256::digest(bytes).into()
}

/// `SHA256(tag_digest || children[0] || .. || children[n-1] || u16_LE(n))`.
///
/// The little-endian child count is mandatory and is what makes this collision-resistant under
/// naive concatenation; omitting it (or encoding it big-endian) breaks domain separation.
pub fn tagged_struct(tag_digest: &[u8; 32], children: &[&[u8; 32]]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(tag_digest);
    for child in children {
        hasher.update(child);
    }
    let len: u16 = children
        .len()
        .try_into()
        .expect("tagged_struct defined with more than 2^16 children");
    hasher.update(len.to_le_bytes());
    hasher.finalize().into()
}

fn tagged_list_cons(tag_digest: &[u8; 32], head: &[u8; 32], tail: &[u8; 32]) -> [u8; 32] {
    tagged_struct(tag_digest, &[head, tail])
}

/// Right-fold of `items` under `tagged_list_cons`, starting from the zero digest.
///
/// An empty list hashes to `[0u8; 32]` by construction (the fold never runs).
pub fn tagged_list(tag_digest: &[u8; 32], items: &[[u8; 32]]) -> [u8; 32] {
    let mut curr = [0u8; 32];
    for item in items.iter().rev() {
        curr = tagged_list_cons(tag_digest, item, &curr);
    }
    curr
}

/// Reverses the byte order of a 32-byte value, turning a big-endian view into a little-endian
/// one (or vice versa).
pub fn reverse_byte_order(input: &[u8; 32]) -> [u8; 32] {
    let mut out = *input;
    out.reverse();
    out
}

/// Splits a 32-byte digest into `(upper128, lower128)` after a byte-order reversal, matching the
/// Go reference implementation's convention for turning a digest into two field elements.
///
/// 1. reverse the byte order of `digest`,
/// 2. the low 16 bytes of the reversed view become `lower128`,
/// 3. the high 16 bytes of the reversed view become `upper128`.
pub fn split_digest(digest: &[u8; 32]) -> ([u8; 16], [u8; 16]) {
    let reversed = reverse_byte_order(digest);
    let mut lower128 = [0u8; 16];
    let mut upper128 = [0u8; 16];
    lower128.copy_from_slice(&reversed[0..16]);
    upper128.copy_from_slice(&reversed[16..32]);
    (upper128, lower128)
}
