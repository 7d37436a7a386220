// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! In-memory synchronous issuer source, e.g. the intermediates a peer sent
//! alongside its leaf certificate.

extern crate alloc;

use alloc::collections::BTreeMap;
use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::certificate::{parse_pem_bundle, Certificate, Name};
use crate::error::Result;
use crate::issuer_source::IssuerSource;

/// Fixed set of certificates indexed by subject name.
#[derive(Debug, Clone, Default)]
pub struct StaticIssuerSource {
    by_subject: BTreeMap<Name, Vec<Arc<Certificate>>>,
}

impl StaticIssuerSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pem_bundle(pem: &str) -> Result<Self> {
        let mut source = Self::new();
        for cert in parse_pem_bundle(pem)? {
            source.add_cert(Arc::new(cert));
        }
        Ok(source)
    }

    /// Byte-identical duplicates are ignored.
    pub fn add_cert(&mut self, cert: Arc<Certificate>) {
        let bucket = self.by_subject.entry(cert.subject().clone()).or_default();
        if !bucket.contains(&cert) {
            bucket.push(cert);
        }
    }

    pub fn len(&self) -> usize {
        self.by_subject.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_subject.is_empty()
    }

    /// Certificates whose subject is `name`, in insertion order.
    pub fn certs_with_subject(&self, name: &Name) -> &[Arc<Certificate>] {
        self.by_subject.get(name).map(Vec::as_slice).unwrap_or(&[])
    }
}

impl IssuerSource for StaticIssuerSource {
    fn sync_issuers_of(&self, cert: &Certificate, issuers: &mut Vec<Arc<Certificate>>) {
        issuers.extend_from_slice(self.certs_with_subject(cert.issuer()));
    }
}
