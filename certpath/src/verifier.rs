// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! Chain validation hook.
//!
//! The path builder does not check signatures, validity periods or
//! constraints. It hands every candidate path that reaches a trust anchor to
//! a [`Verifier`] and records the answer.

use crate::chain::CertificateChain;
use crate::error::VerifyError;
use crate::time::Time;

/// Validates one candidate path at a given time.
///
/// Implementations must not keep state between calls that changes later
/// answers; the builder may call `verify` in any order and assumes no
/// caching.
pub trait Verifier {
    fn verify(&self, path: &CertificateChain, time: &Time) -> Result<(), VerifyError>;
}

impl<F> Verifier for F
where
    F: Fn(&CertificateChain, &Time) -> Result<(), VerifyError>,
{
    fn verify(&self, path: &CertificateChain, time: &Time) -> Result<(), VerifyError> {
        self(path, time)
    }
}
