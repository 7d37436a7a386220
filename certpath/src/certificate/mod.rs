// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! Certificate model used by the path builder.
//!
//! A [`Certificate`] is an immutable view holding exactly what path building
//! needs:
//! - the full DER encoding, which is the certificate's identity
//! - the issuer and subject [`Name`]s
//! - the SubjectPublicKeyInfo DER
//!
//! Loading from DER only walks the outer TBSCertificate layout; signature,
//! validity and extensions are left to the caller's verifier.
//!
//! # Examples
//!
//! ```no_run
//! use certpath::Certificate;
//!
//! # fn example(der_bytes: &[u8], pem_string: &str) -> certpath::Result<()> {
//! let cert = Certificate::from_der(der_bytes)?;
//! println!("Subject: {}", cert.subject());
//!
//! let cert = Certificate::from_pem(pem_string)?;
//! assert_eq!(cert.der().len(), der_bytes.len());
//! # Ok(())
//! # }
//! ```

pub mod name;

extern crate alloc;

use alloc::string::ToString;
use alloc::vec::Vec;
use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};

use const_oid::ObjectIdentifier;
use der::{asn1::AnyRef, Decode, Encode, Reader, SliceReader, Tag, Tagged};
use spki::SubjectPublicKeyInfoRef;

use crate::error::{EncodingError, Error, ParseError, Result};

pub use name::Name;

/// PEM label for X.509 certificates
pub const PEM_LABEL: &str = "CERTIFICATE";

// ============================================================================
// Certificate
// ============================================================================

/// An X.509 certificate, identified by its DER encoding.
///
/// `Eq`, `Ord` and `Hash` consider only the DER bytes: two certificates are
/// the same certificate exactly when their encodings are byte-identical.
#[derive(Clone)]
pub struct Certificate {
    der: Vec<u8>,
    subject: Name,
    issuer: Name,
    spki: Vec<u8>,
}

impl Certificate {
    /// Parse a certificate from DER.
    ///
    /// The whole input must be one `Certificate` SEQUENCE with no trailing
    /// data.
    pub fn from_der(der: &[u8]) -> Result<Self> {
        let outer = AnyRef::from_der(der)?;
        expect_tag(&outer, Tag::Sequence)?;

        let mut reader = SliceReader::new(outer.value())?;
        let tbs = next_field(&mut reader, "tbsCertificate")?;
        expect_tag(&tbs, Tag::Sequence)?;
        next_field(&mut reader, "signatureAlgorithm")?;
        next_field(&mut reader, "signatureValue")?;

        let mut fields = SliceReader::new(tbs.value())?;
        // Optional [0] EXPLICIT version precedes the serial number.
        let first = next_field(&mut fields, "serialNumber")?;
        if first.tag().is_context_specific() {
            next_field(&mut fields, "serialNumber")?;
        }
        next_field(&mut fields, "signature")?;
        let issuer = next_field(&mut fields, "issuer")?;
        next_field(&mut fields, "validity")?;
        let subject = next_field(&mut fields, "subject")?;
        let spki = next_field(&mut fields, "subjectPublicKeyInfo")?.to_der()?;

        SubjectPublicKeyInfoRef::from_der(&spki)
            .map_err(|e| Error::ParseError(ParseError::InvalidPublicKey(e.to_string())))?;

        Ok(Certificate {
            der: der.to_vec(),
            subject: Name::from_der(&subject.to_der()?)?,
            issuer: Name::from_der(&issuer.to_der()?)?,
            spki,
        })
    }

    /// Parse a single PEM-encoded certificate.
    pub fn from_pem(pem: &str) -> Result<Self> {
        let (label, der) = pem_rfc7468::decode_vec(pem.as_bytes())?;
        if label != PEM_LABEL {
            return Err(EncodingError::InvalidPemLabel {
                expected: PEM_LABEL.to_string(),
                found: label.to_string(),
            }
            .into());
        }
        Self::from_der(&der)
    }

    /// Build a certificate from fields the caller already extracted.
    ///
    /// `der` is taken as the identity and is not re-parsed.
    pub fn from_parts(der: Vec<u8>, subject: Name, issuer: Name, spki: Vec<u8>) -> Self {
        Certificate {
            der,
            subject,
            issuer,
            spki,
        }
    }

    /// The full DER encoding.
    pub fn der(&self) -> &[u8] {
        &self.der
    }

    pub fn subject(&self) -> &Name {
        &self.subject
    }

    pub fn issuer(&self) -> &Name {
        &self.issuer
    }

    /// DER encoding of the SubjectPublicKeyInfo.
    pub fn spki(&self) -> &[u8] {
        &self.spki
    }

    /// Whether the issuer and subject names are identical.
    pub fn is_self_issued(&self) -> bool {
        self.subject == self.issuer
    }

    /// Whether both certificates carry the same subject name and public key.
    ///
    /// This is the equivalence used for trust-anchor matching of key
    /// rollover certificates and for loop detection.
    pub fn same_name_and_key(&self, other: &Certificate) -> bool {
        self.subject == other.subject && self.spki == other.spki
    }

    /// Algorithm OID of the subject public key.
    pub fn public_key_algorithm(&self) -> Result<ObjectIdentifier> {
        let info = SubjectPublicKeyInfoRef::from_der(&self.spki)?;
        Ok(info.algorithm.oid)
    }
}

fn next_field<'a>(reader: &mut SliceReader<'a>, field: &str) -> Result<AnyRef<'a>> {
    if reader.is_finished() {
        return Err(Error::missing_field(field));
    }
    Ok(AnyRef::decode(reader)?)
}

fn expect_tag(any: &AnyRef<'_>, expected: Tag) -> Result<()> {
    if any.tag() != expected {
        return Err(Error::invalid_tag(expected.into(), any.tag().into()));
    }
    Ok(())
}

/// Parse every `CERTIFICATE` block of a concatenated PEM bundle, in order.
///
/// Blocks with any other label, such as a private key shipped in the same
/// file, are skipped. A bundle without a single certificate is an error.
pub fn parse_pem_bundle(bundle: &str) -> Result<Vec<Certificate>> {
    let mut certs = Vec::new();
    for block in pem::parse_many(bundle)? {
        if block.tag() != PEM_LABEL {
            log::debug!("pem bundle: skipping {} block", block.tag());
            continue;
        }
        certs.push(Certificate::from_der(block.contents())?);
    }
    if certs.is_empty() {
        return Err(EncodingError::EmptyBundle.into());
    }
    Ok(certs)
}

// ============================================================================
// Identity
// ============================================================================

impl PartialEq for Certificate {
    fn eq(&self, other: &Self) -> bool {
        self.der == other.der
    }
}

impl Eq for Certificate {}

impl PartialOrd for Certificate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Certificate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.der.cmp(&other.der)
    }
}

impl Hash for Certificate {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.der.hash(state);
    }
}

impl fmt::Debug for Certificate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Certificate")
            .field("subject", &self.subject)
            .field("issuer", &self.issuer)
            .field("der_len", &self.der.len())
            .finish()
    }
}

impl fmt::Display for Certificate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.subject)
    }
}
