// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! Distinguished names as used for issuer/subject matching.
//!
//! A [`Name`] keeps the DER encoding of an X.509 `Name` exactly as it appears
//! in the certificate. Equality and ordering are byte-wise, so two names only
//! match when their encodings are identical; no RFC 5280 normalization is
//! applied. Rendering walks the RDNSequence for display purposes only.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use const_oid::ObjectIdentifier;
use der::{asn1::AnyRef, Decode, Encode, Reader, SliceReader, Tag, Tagged};

use crate::error::{Error, Result};

// ============================================================================
// Common Attribute Type OIDs (RFC 5280, Appendix A.1)
// ============================================================================

/// Common Name (CN) - 2.5.4.3
pub const CN: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.4.3");

/// Country (C) - 2.5.4.6
pub const COUNTRY_NAME: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.4.6");

/// Locality (L) - 2.5.4.7
pub const LOCALITY_NAME: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.4.7");

/// State or Province (ST) - 2.5.4.8
pub const STATE_OR_PROVINCE_NAME: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.4.8");

/// Organization (O) - 2.5.4.10
pub const ORGANIZATION_NAME: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.4.10");

/// Organizational Unit (OU) - 2.5.4.11
pub const ORGANIZATIONAL_UNIT_NAME: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.4.11");

const SHORT_NAMES: [(ObjectIdentifier, &str); 6] = [
    (CN, "CN"),
    (COUNTRY_NAME, "C"),
    (LOCALITY_NAME, "L"),
    (STATE_OR_PROVINCE_NAME, "ST"),
    (ORGANIZATION_NAME, "O"),
    (ORGANIZATIONAL_UNIT_NAME, "OU"),
];

fn attr_name(oid: &ObjectIdentifier) -> Option<&'static str> {
    SHORT_NAMES
        .iter()
        .find(|(known, _)| known == oid)
        .map(|(_, short)| *short)
}

// ============================================================================
// Name
// ============================================================================

/// DER-encoded X.509 distinguished name.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Name(Vec<u8>);

impl Name {
    /// Wrap a DER-encoded `Name` after checking that it is a single SEQUENCE.
    pub fn from_der(der: &[u8]) -> Result<Self> {
        let any = AnyRef::from_der(der)?;
        if any.tag() != Tag::Sequence {
            return Err(Error::invalid_tag(
                Tag::Sequence.into(),
                any.tag().into(),
            ));
        }
        Ok(Name(der.to_vec()))
    }

    /// Build a name holding a single UTF8String common name.
    pub fn from_common_name(cn: &str) -> Result<Self> {
        let mut atv = CN.to_der()?;
        atv.extend_from_slice(&AnyRef::new(Tag::Utf8String, cn.as_bytes())?.to_der()?);
        let atv = AnyRef::new(Tag::Sequence, &atv)?.to_der()?;
        let rdn = AnyRef::new(Tag::Set, &atv)?.to_der()?;
        Ok(Name(AnyRef::new(Tag::Sequence, &rdn)?.to_der()?))
    }

    /// Raw DER bytes of the name.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// The first common name attribute, if any.
    pub fn common_name(&self) -> Option<String> {
        let mut found = None;
        self.walk(|oid, value| {
            if found.is_none() && *oid == CN {
                found = Some(String::from(value));
            }
        })
        .ok()?;
        found
    }

    /// Visit every attribute that carries a string value, in encoding order.
    fn walk<F: FnMut(&ObjectIdentifier, &str)>(&self, mut visit: F) -> der::Result<()> {
        let rdn_sequence = AnyRef::from_der(&self.0)?;
        let mut rdns = SliceReader::new(rdn_sequence.value())?;
        while !rdns.is_finished() {
            let rdn = AnyRef::decode(&mut rdns)?;
            let mut atvs = SliceReader::new(rdn.value())?;
            while !atvs.is_finished() {
                let atv = AnyRef::decode(&mut atvs)?;
                let mut fields = SliceReader::new(atv.value())?;
                let oid = ObjectIdentifier::decode(&mut fields)?;
                let value = AnyRef::decode(&mut fields)?;
                match value.tag() {
                    Tag::Utf8String | Tag::PrintableString | Tag::Ia5String | Tag::TeletexString => {
                        if let Ok(s) = core::str::from_utf8(value.value()) {
                            visit(&oid, s);
                        }
                    }
                    _ => {}
                }
            }
        }
        Ok(())
    }
}

impl AsRef<[u8]> for Name {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<String> = Vec::new();
        let walked = self.walk(|oid, value| {
            let part = match attr_name(oid) {
                Some(short) => alloc::format!("{}={}", short, value),
                None => alloc::format!("{}={}", oid, value),
            };
            parts.push(part);
        });
        if walked.is_err() || parts.is_empty() {
            // Not a parsable RDNSequence; fall back to hex.
            for b in &self.0 {
                write!(f, "{:02x}", b)?;
            }
            return Ok(());
        }
        write!(f, "{}", parts.join(", "))
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name({})", self)
    }
}
