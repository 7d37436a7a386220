// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! Trust anchors.
//!
//! A trust store answers two questions for the path builder: whether a
//! certificate terminates a path, and which anchors could have issued a
//! certificate with a given issuer name.

extern crate alloc;

use alloc::collections::BTreeMap;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;

use crate::certificate::{parse_pem_bundle, Certificate, Name};
use crate::error::Result;

/// How a certificate matched a trust anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorMatch {
    /// Not a trust anchor
    None,
    /// Byte-identical to a stored anchor
    ByIdentity,
    /// Same subject name and public key as a stored anchor, different encoding
    ByNameAndKey,
}

impl AnchorMatch {
    pub fn is_match(self) -> bool {
        self != AnchorMatch::None
    }
}

/// Read-only source of trust anchors.
pub trait TrustStore {
    /// Whether `cert` terminates a path.
    fn anchor_match(&self, cert: &Certificate) -> AnchorMatch;

    /// Append every anchor whose subject is `name` to `anchors`.
    fn find_anchors_by_subject(&self, name: &Name, anchors: &mut Vec<Arc<Certificate>>);
}

// ============================================================================
// In-memory store
// ============================================================================

/// Trust store held in memory, indexed by subject name.
#[derive(Clone, Default)]
pub struct InMemoryTrustStore {
    anchors: BTreeMap<Name, Vec<Arc<Certificate>>>,
    count: usize,
}

impl InMemoryTrustStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every certificate of a PEM bundle as a trust anchor.
    pub fn from_pem_bundle(pem: &str) -> Result<Self> {
        let mut store = Self::new();
        for cert in parse_pem_bundle(pem)? {
            store.add_trusted_certificate(Arc::new(cert));
        }
        Ok(store)
    }

    /// Add a trust anchor. Adding a byte-identical certificate again is a
    /// no-op.
    pub fn add_trusted_certificate(&mut self, cert: Arc<Certificate>) {
        let bucket = self.anchors.entry(cert.subject().clone()).or_default();
        if bucket.iter().any(|c| c == &cert) {
            return;
        }
        log::trace!("trust store: adding anchor {}", cert.subject());
        bucket.push(cert);
        self.count += 1;
    }

    pub fn clear(&mut self) {
        self.anchors.clear();
        self.count = 0;
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

impl TrustStore for InMemoryTrustStore {
    fn anchor_match(&self, cert: &Certificate) -> AnchorMatch {
        let Some(bucket) = self.anchors.get(cert.subject()) else {
            return AnchorMatch::None;
        };
        if bucket.iter().any(|anchor| anchor.as_ref() == cert) {
            AnchorMatch::ByIdentity
        } else if bucket.iter().any(|anchor| anchor.same_name_and_key(cert)) {
            AnchorMatch::ByNameAndKey
        } else {
            AnchorMatch::None
        }
    }

    fn find_anchors_by_subject(&self, name: &Name, anchors: &mut Vec<Arc<Certificate>>) {
        if let Some(bucket) = self.anchors.get(name) {
            anchors.extend(bucket.iter().cloned());
        }
    }
}

impl fmt::Debug for InMemoryTrustStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InMemoryTrustStore")
            .field("anchors", &self.count)
            .field("subjects", &self.anchors.len())
            .finish()
    }
}
