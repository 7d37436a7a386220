// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! Outcome of a path build.

extern crate alloc;

use alloc::vec::Vec;

use crate::chain::CertificateChain;
use crate::error::PathError;

/// Whether the build ever had to wait for an asynchronous issuer query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionStatus {
    /// Finished without issuing any asynchronous query
    Synchronous,
    /// At least one asynchronous query was issued
    Asynchronous,
}

/// One attempted candidate path and how it ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultPath {
    pub path: CertificateChain,
    pub outcome: Result<(), PathError>,
}

impl ResultPath {
    pub fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }

    /// Whether the path ended at a trust anchor, whatever the verifier said.
    pub fn reached_anchor(&self) -> bool {
        match &self.outcome {
            Ok(()) => true,
            Err(e) => e.reached_anchor(),
        }
    }
}

/// Every attempted path, in attempt order, plus the index of the best one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildResult {
    pub paths: Vec<ResultPath>,
    pub best_result_index: usize,
    pub completion: CompletionStatus,
}

impl BuildResult {
    pub(crate) fn new(paths: Vec<ResultPath>, completion: CompletionStatus) -> Self {
        let best_result_index = best_index(&paths);
        BuildResult {
            paths,
            best_result_index,
            completion,
        }
    }

    /// True if at least one path verified.
    pub fn is_success(&self) -> bool {
        self.best().map_or(false, ResultPath::is_success)
    }

    /// The best attempted path, `None` when nothing was attempted.
    pub fn best(&self) -> Option<&ResultPath> {
        self.paths.get(self.best_result_index)
    }

    /// Overall outcome.
    ///
    /// A rejected anchor path reports the verifier's reason; everything else
    /// that failed, including an empty result, is `AuthorityInvalid`.
    pub fn outcome(&self) -> Result<(), PathError> {
        match self.best().map(|p| &p.outcome) {
            Some(Ok(())) => Ok(()),
            Some(Err(e @ PathError::VerifierRejected(_))) => Err(e.clone()),
            _ => Err(PathError::AuthorityInvalid),
        }
    }
}

// First success wins. Without one, the latest path that reached an anchor,
// then the latest dead end.
fn best_index(paths: &[ResultPath]) -> usize {
    if let Some(i) = paths.iter().position(ResultPath::is_success) {
        return i;
    }
    if let Some(i) = paths.iter().rposition(ResultPath::reached_anchor) {
        return i;
    }
    paths.len().saturating_sub(1)
}
