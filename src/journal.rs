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

//! Decodes the guest journal: the vote payload the circuit committed to, which this crate trusts
//! once the seal has verified against it.
//!
//! The payload is a fixed little-endian ABI, not general-purpose `bincode`: `bincode` 1.x's
//! derived `bool` decoding rejects any byte other than 0 or 1, but the guest treats any nonzero
//! byte as `true`. Decoding by hand keeps that truthiness rule correct.

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::error::Error;

/// The vote cast by a guest execution, as committed to the journal.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct VoteResponse {
    pub nullifier: String,
    pub age: u32,
    pub is_student: bool,
    pub poll_id: u64,
    pub option_a: u64,
    pub option_b: u64,
}

struct Cursor<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl<'a> Cursor<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, offset: 0 }
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8], Error> {
        let end = self.offset + len;
        let slice = self
            .bytes
            .get(self.offset..end)
            .ok_or(Error::JournalMalformed {
                reason: "payload truncated",
            })?;
        self.offset = end;
        Ok(slice)
    }

    fn take_u32(&mut self) -> Result<u32, Error> {
        Ok(u32::from_le_bytes(self.take(4)?.try_into().unwrap()))
    }

    fn take_u64(&mut self) -> Result<u64, Error> {
        Ok(u64::from_le_bytes(self.take(8)?.try_into().unwrap()))
    }

    fn take_u8(&mut self) -> Result<u8, Error> {
        Ok(self.take(1)?[0])
    }
}

/// Decodes `nullifier: u64 len || utf8 bytes, age: u32, is_student: u8 (nonzero = true),
/// poll_id: u64, option_a: u64, option_b: u64`, all little-endian.
///
/// Trailing bytes past `option_b` are permitted and ignored: only these six fields are
/// required, whatever the guest appends after them is not this crate's concern.
pub fn decode_journal(bytes: &[u8]) -> Result<VoteResponse, Error> {
    let mut cursor = Cursor::new(bytes);

    let nullifier_len = cursor.take_u64()? as usize;
    let nullifier_bytes = cursor.take(nullifier_len)?;
    let nullifier = String::from_utf8(nullifier_bytes.to_vec()).map_err(|_| Error::JournalMalformed {
        reason: "nullifier is not valid UTF-8",
    })?;

    let age = cursor.take_u32()?;
    let is_student = cursor.take_u8()? != 0;
    let poll_id = cursor.take_u64()?;
    let option_a = cursor.take_u64()?;
    let option_b = cursor.take_u64()?;

    Ok(VoteResponse {
        nullifier,
        age,
        is_student,
        poll_id,
        option_a,
        option_b,
    })
}

/// Checks that the last 32 bytes of the hex-encoded `journal` (its trailing cipher hash code)
/// equal `SHA256(aad || ciphertext)`, i.e. that the ballot ciphertext the journal references has
/// not been swapped for a different one after proving.
///
/// `ciphertext` is itself hex-encoded, matching the wire convention of every other field in this
/// crate. Returns `false` (rather than an `Error`) on any decode failure, matching the original
/// helper this is ported from, which is a standalone integrity check outside `check_vote`'s
/// control flow — not part of `check_vote`'s seal-validity path.
pub fn verify_encrypted_data_integrity(journal_hex: &str, ciphertext_hex: &str, aad: &str) -> bool {
    if journal_hex.len() < 64 {
        return false;
    }
    let cipher_hash_code_hex = &journal_hex[journal_hex.len() - 64..];
    let Ok(expected) = hex::decode(cipher_hash_code_hex) else {
        return false;
    };
    let Ok(ciphertext) = hex::decode(ciphertext_hex) else {
        return false;
    };

    let mut hasher = Sha256::new();
    hasher.update(aad.as_bytes());
    hasher.update(&ciphertext);
    let digest: [u8; 32] = hasher.finalize().into();

    expected == digest.to_vec()
}
