// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! Certification Path Building
//!
//! A no_std-compatible builder that finds a chain from a target certificate to
//! a trust anchor. Candidate issuers come from pluggable sources that answer
//! either immediately or asynchronously; chain validation itself is delegated
//! to a caller-supplied verifier.
//!
//! # Features
//! - Breadth-first search, shortest candidate paths first
//! - Synchronous sources are drained before any asynchronous query
//! - Loop and duplicate detection, including key-rollover certificates
//! - Every attempt recorded with its outcome for diagnostics
//!
//! # Example
//! ```no_run
//! use std::sync::Arc;
//! use certpath::prelude::*;
//!
//! # fn example(leaf_der: &[u8], intermediates_pem: &str, roots_pem: &str) -> certpath::Result<()> {
//! let target = Arc::new(Certificate::from_der(leaf_der)?);
//! let intermediates = StaticIssuerSource::from_pem_bundle(intermediates_pem)?;
//! let anchors = InMemoryTrustStore::from_pem_bundle(roots_pem)?;
//! let verifier = |_path: &CertificateChain, _time: &Time| Ok::<(), VerifyError>(());
//!
//! let mut builder = PathBuilder::new(target, &anchors, &verifier, certpath::time::current_time()?);
//! builder.add_issuer_source(&intermediates);
//! let result = futures::executor::block_on(builder.run());
//! assert!(result.is_success());
//! # Ok(())
//! # }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod certificate;
pub mod chain;
pub mod error;
pub mod issuer_source;
pub mod path_builder;
pub mod time;
pub mod trust_store;
pub mod verifier;

pub use certificate::{Certificate, Name};
pub use chain::CertificateChain;
pub use error::{Error, PathError, Result, VerifyError};
pub use issuer_source::{IssuerSource, PendingRequest, StaticIssuerSource};
pub use path_builder::{
    BuildFuture, BuildResult, CompletionStatus, PathBuilder, PathBuilderOptions, ResultPath,
};
pub use time::Time;
pub use trust_store::{AnchorMatch, InMemoryTrustStore, TrustStore};
pub use verifier::Verifier;

#[cfg(feature = "std")]
pub use issuer_source::IssuerSender;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::issuer_source::{IssuerSource, PendingRequest, StaticIssuerSource};
    pub use crate::path_builder::{BuildResult, CompletionStatus, PathBuilder, PathBuilderOptions};
    pub use crate::trust_store::{AnchorMatch, InMemoryTrustStore, TrustStore};
    pub use crate::{Certificate, CertificateChain, PathError, Time, Verifier, VerifyError};
}
