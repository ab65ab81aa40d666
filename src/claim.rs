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

//! Builds the RISC Zero receipt-claim digest that a Groth16 seal ultimately attests to.

use num_derive::{FromPrimitive, ToPrimitive};

use crate::hash::{sha256, tagged_struct};

/// `SHA256("risc0.SystemState(pc=0, merkle_root=0)")`: the post-state digest of a halted guest.
pub const SYSTEM_STATE_ZERO: [u8; 32] = [
    0xa3, 0xac, 0xc2, 0x71, 0x17, 0x41, 0x89, 0x96, 0x34, 0x0b, 0x84, 0xe5, 0xa9, 0x0f, 0x3e, 0xf4,
    0xc4, 0x9d, 0x22, 0xc7, 0x9e, 0x44, 0xaa, 0xd8, 0x22, 0xec, 0x9c, 0x31, 0x3e, 0x1e, 0xb8, 0xe2,
];

/// The system-level portion of a guest program's exit code.
#[derive(Copy, Clone, Debug, Eq, PartialEq, FromPrimitive, ToPrimitive)]
#[repr(u8)]
pub enum SystemExitCode {
    Halted = 0,
    Paused = 1,
    SystemSplit = 2,
}

/// Digest of the journal and any assumptions a receipt depends on.
pub struct Output {
    pub journal_digest: [u8; 32],
    pub assumptions_digest: [u8; 32],
}

impl Output {
    fn digest(&self) -> [u8; 32] {
        let tag = sha256(b"risc0.Output");
        tagged_struct(&tag, &[&self.journal_digest, &self.assumptions_digest])
    }
}

/// A claim about the execution of a RISC Zero guest program.
pub struct ReceiptClaim {
    pub pre_state: [u8; 32],
    pub post_state: [u8; 32],
    pub exit_system: SystemExitCode,
    pub exit_user: u8,
    pub input: [u8; 32],
    pub output: [u8; 32],
}

impl ReceiptClaim {
    /// `SHA256(T || input || pre || post || output || sys_code || user_code || u16_LE(4))`
    /// where `T = SHA256("risc0.ReceiptClaim")` and the field order deliberately differs from
    /// declaration order (input first, not pre_state).
    pub fn digest(&self) -> [u8; 32] {
        let tag = sha256(b"risc0.ReceiptClaim");
        let mut data = Vec::with_capacity(32 + 32 * 4 + 4 + 2);
        data.extend_from_slice(&tag);
        data.extend_from_slice(&self.input);
        data.extend_from_slice(&self.pre_state);
        data.extend_from_slice(&self.post_state);
        data.extend_from_slice(&self.output);
        data.extend_from_slice(&((self.exit_system as u8 as u32) << 24).to_be_bytes());
        data.extend_from_slice(&((self.exit_user as u32) << 24).to_be_bytes());
        data.extend_from_slice(&4u16.to_le_bytes());
        sha256(&data)
    }
}

/// Builds the "OK" receipt claim for a successful, unconditional halt of `image_id` with the
/// given journal digest, and returns its digest.
pub fn calculate_claim_digest(image_id: &[u8; 32], journal_digest: &[u8; 32]) -> [u8; 32] {
    let output = Output {
        journal_digest: *journal_digest,
        assumptions_digest: [0u8; 32],
    };
    let claim = ReceiptClaim {
        pre_state: *image_id,
        post_state: SYSTEM_STATE_ZERO,
        exit_system: SystemExitCode::Halted,
        exit_user: 0,
        input: [0u8; 32],
        output: output.digest(),
    };
    claim.digest()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn claim_digest_is_deterministic() {
        let image_id = [7u8; 32];
        let journal_digest = [9u8; 32];
        let a = calculate_claim_digest(&image_id, &journal_digest);
        let b = calculate_claim_digest(&image_id, &journal_digest);
        assert_eq!(a, b);
    }

    #[test]
    fn claim_digest_changes_with_image_id() {
        let journal_digest = [9u8; 32];
        let a = calculate_claim_digest(&[7u8; 32], &journal_digest);
        let b = calculate_claim_digest(&[8u8; 32], &journal_digest);
        assert_ne!(a, b);
    }

    #[test]
    fn claim_digest_changes_with_journal_digest() {
        let image_id = [7u8; 32];
        let a = calculate_claim_digest(&image_id, &[1u8; 32]);
        let b = calculate_claim_digest(&image_id, &[2u8; 32]);
        assert_ne!(a, b);
    }

    #[test]
    fn claim_digest_changes_with_any_swapped_field() {
        // Differential test: permuting which 32-byte slot the image id lands in (by swapping
        // pre/post state explicitly) must change the digest.
        let image_id = [7u8; 32];
        let journal_digest = [9u8; 32];
        let base = calculate_claim_digest(&image_id, &journal_digest);

        let mut swapped = ReceiptClaim {
            pre_state: SYSTEM_STATE_ZERO,
            post_state: image_id,
            exit_system: SystemExitCode::Halted,
            exit_user: 0,
            input: [0u8; 32],
            output: Output {
                journal_digest,
                assumptions_digest: [0u8; 32],
            }
            .digest(),
        };
        assert_ne!(swapped.digest(), base);

        swapped.exit_user = 1;
        let with_user_exit = swapped.digest();
        swapped.exit_user = 0;
        assert_ne!(with_user_exit, swapped.digest());
    }
}
