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

//! The closed error taxonomy for vote receipt verification.
//!
//! Every failure mode that `check_vote` and its component functions can produce is named here.
//! There is deliberately no catch-all variant: `PointNotOnCurve` and `ProofInvalid` stay distinct
//! all the way to the caller, since conflating them would hide whether a seal was corrupt on the
//! wire or cryptographically invalid.

use thiserror::Error;

/// Errors produced while decoding or verifying a vote receipt.
#[derive(Error, Debug)]
pub enum Error {
    /// A hex-encoded field (`image_id`, `journal`, `seal`, or `journal_abi`) was not valid hex.
    #[error("failed to decode hex field {field}: {source}")]
    HexDecode {
        field: &'static str,
        #[source]
        source: hex::FromHexError,
    },

    /// A fixed-width field had the wrong length after hex decoding.
    #[error("{field} has length {actual}, expected {expected}")]
    LengthMismatch {
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    /// The 4-byte selector prefix of the seal did not match any known verifier parameters.
    #[error("no verifier parameters registered for selector {0:?}")]
    UnknownSelector([u8; 4]),

    /// The seal (after the selector prefix) was not exactly 256 bytes.
    #[error("malformed seal: got {actual} bytes, expected 256")]
    SealMalformed { actual: usize },

    /// A decoded G1 point did not satisfy the BN254 curve equation.
    #[error("point not on curve: {point}")]
    PointNotOnCurve { point: &'static str },

    /// A public signal was not strictly less than the BN254 scalar field order.
    #[error("public input {index} is out of the scalar field")]
    PublicInputOutOfField { index: usize },

    /// The Groth16 pairing check did not evaluate to the identity in GT.
    #[error("proof is invalid: pairing check failed")]
    ProofInvalid,

    /// The journal ABI payload was truncated, had invalid UTF-8, or otherwise malformed.
    #[error("malformed journal payload: {reason}")]
    JournalMalformed { reason: &'static str },
}
