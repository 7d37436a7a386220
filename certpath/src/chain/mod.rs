// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! Certificate chain types.
//!
//! This module provides the `CertificateChain` type for representing a
//! candidate path: an ordered sequence of certificates from the target to the
//! certificate believed to be (or chain to) a trust anchor.

extern crate alloc;

use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;

use crate::certificate::Certificate;

// ============================================================================
// Certificate Chain
// ============================================================================

/// A certificate chain, ordered from target (index 0) to trust anchor.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CertificateChain {
    /// The certificates in the chain, from target to anchor
    pub certificates: Vec<Arc<Certificate>>,
}

impl CertificateChain {
    /// Create a new certificate chain
    pub fn new(certificates: Vec<Arc<Certificate>>) -> Self {
        Self { certificates }
    }

    /// Create a chain with a single certificate
    pub fn single(cert: Arc<Certificate>) -> Self {
        Self {
            certificates: alloc::vec![cert],
        }
    }

    /// Add a certificate to the anchor end of the chain
    pub fn push(&mut self, cert: Arc<Certificate>) {
        self.certificates.push(cert);
    }

    /// Get the target certificate
    pub fn leaf(&self) -> Option<&Arc<Certificate>> {
        self.certificates.first()
    }

    /// Get the anchor-end certificate
    pub fn root(&self) -> Option<&Arc<Certificate>> {
        self.certificates.last()
    }

    /// Get the chain length
    pub fn len(&self) -> usize {
        self.certificates.len()
    }

    /// Check if the chain is empty
    pub fn is_empty(&self) -> bool {
        self.certificates.is_empty()
    }

    /// Whether a byte-identical certificate is part of the chain
    pub fn contains(&self, cert: &Certificate) -> bool {
        self.certificates.iter().any(|c| c.as_ref() == cert)
    }

    /// Get an iterator over the certificates
    pub fn iter(&self) -> core::slice::Iter<'_, Arc<Certificate>> {
        self.certificates.iter()
    }

    pub fn as_slice(&self) -> &[Arc<Certificate>] {
        &self.certificates
    }
}

impl From<Vec<Arc<Certificate>>> for CertificateChain {
    fn from(certificates: Vec<Arc<Certificate>>) -> Self {
        Self::new(certificates)
    }
}

impl<'a> IntoIterator for &'a CertificateChain {
    type Item = &'a Arc<Certificate>;
    type IntoIter = core::slice::Iter<'a, Arc<Certificate>>;

    fn into_iter(self) -> Self::IntoIter {
        self.certificates.iter()
    }
}

/// Renders as `subject -> subject -> ...`.
impl fmt::Display for CertificateChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, cert) in self.certificates.iter().enumerate() {
            if i > 0 {
                write!(f, " -> ")?;
            }
            write!(f, "{}", cert.subject())?;
        }
        Ok(())
    }
}
