// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! Error types for certificate loading and path building
//!
//! Two families live here. [`Error`] is returned by the fallible library
//! APIs (loading certificates, validating options). [`PathError`] and
//! [`VerifyError`] are per-path outcomes recorded in a build result; the
//! search itself never fails.

extern crate alloc;

use alloc::string::{String, ToString};
use core::fmt;

/// Result type alias for fallible certpath operations
pub type Result<T> = core::result::Result<T, Error>;

/// Error type for certificate loading and configuration
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// Errors during DER/ASN.1 parsing
    ParseError(ParseError),

    /// Errors during PEM/DER conversion
    EncodingError(EncodingError),

    /// Invalid builder configuration
    ConfigError(String),
}

/// Errors that occur while walking a certificate's DER structure
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Invalid tag encountered
    InvalidTag { expected: u8, found: u8 },

    /// Missing required field
    MissingField(String),

    /// Malformed SubjectPublicKeyInfo
    InvalidPublicKey(String),

    /// Error from der crate
    DerError(String),
}

/// Errors related to certificate encoding
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodingError {
    /// Invalid PEM format
    InvalidPem(String),

    /// PEM label mismatch
    InvalidPemLabel { expected: String, found: String },

    /// PEM bundle without any certificate block
    EmptyBundle,
}

// ============================================================================
// Per-path outcomes
// ============================================================================

/// Reason a [`Verifier`](crate::verifier::Verifier) rejected a candidate path.
///
/// The path builder does not interpret these; they are carried through into
/// [`PathError::VerifierRejected`] untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum VerifyError {
    /// A signature in the path did not verify against its issuer's key
    SignatureInvalid { depth: usize },

    /// A certificate's notAfter is before the validation time
    Expired { depth: usize },

    /// A certificate's notBefore is after the validation time
    NotYetValid { depth: usize },

    /// Issuer name of one certificate does not match the next subject
    NameMismatch { depth: usize },

    /// Basic constraints, key usage or path length violated
    ConstraintViolation(String),

    /// Any other verifier-specific failure
    Other(String),
}

/// Outcome of one attempted candidate path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    /// No path reached a trusted anchor
    AuthorityInvalid,

    /// The path reached an anchor but the verifier rejected it
    VerifierRejected(VerifyError),

    /// Every issuer source was drained without producing a usable extension
    Exhausted,
}

// ============================================================================
// Error Display Implementation (works in both std and no_std)
// ============================================================================

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::ParseError(e) => write!(f, "Parse error: {}", e),
            Error::EncodingError(e) => write!(f, "Encoding error: {}", e),
            Error::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::InvalidTag { expected, found } => {
                write!(
                    f,
                    "Invalid tag: expected 0x{:02x}, found 0x{:02x}",
                    expected, found
                )
            }
            ParseError::MissingField(field) => write!(f, "Missing required field: {}", field),
            ParseError::InvalidPublicKey(msg) => write!(f, "Invalid public key: {}", msg),
            ParseError::DerError(msg) => write!(f, "DER error: {}", msg),
        }
    }
}

impl fmt::Display for EncodingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EncodingError::InvalidPem(msg) => write!(f, "Invalid PEM: {}", msg),
            EncodingError::InvalidPemLabel { expected, found } => {
                write!(
                    f,
                    "Invalid PEM label: expected {}, found {}",
                    expected, found
                )
            }
            EncodingError::EmptyBundle => write!(f, "PEM bundle contains no certificates"),
        }
    }
}

impl fmt::Display for VerifyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VerifyError::SignatureInvalid { depth } => {
                write!(f, "Signature verification failed at depth {}", depth)
            }
            VerifyError::Expired { depth } => write!(f, "Certificate at depth {} expired", depth),
            VerifyError::NotYetValid { depth } => {
                write!(f, "Certificate at depth {} not yet valid", depth)
            }
            VerifyError::NameMismatch { depth } => {
                write!(f, "Issuer name mismatch at depth {}", depth)
            }
            VerifyError::ConstraintViolation(msg) => write!(f, "Constraint violation: {}", msg),
            VerifyError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathError::AuthorityInvalid => write!(f, "No path to a trusted anchor"),
            PathError::VerifierRejected(e) => write!(f, "Path rejected: {}", e),
            PathError::Exhausted => write!(f, "Issuer sources exhausted"),
        }
    }
}

// ============================================================================
// std::error::Error Implementation (only with std feature)
// ============================================================================

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "std")]
impl std::error::Error for VerifyError {}

#[cfg(feature = "std")]
impl std::error::Error for PathError {}

// ============================================================================
// Conversions from external error types
// ============================================================================

impl From<der::Error> for Error {
    fn from(err: der::Error) -> Self {
        Error::ParseError(ParseError::DerError(err.to_string()))
    }
}

impl From<pem_rfc7468::Error> for Error {
    fn from(err: pem_rfc7468::Error) -> Self {
        Error::EncodingError(EncodingError::InvalidPem(err.to_string()))
    }
}

impl From<pem::PemError> for Error {
    fn from(err: pem::PemError) -> Self {
        Error::EncodingError(EncodingError::InvalidPem(err.to_string()))
    }
}

impl From<ParseError> for Error {
    fn from(err: ParseError) -> Self {
        Error::ParseError(err)
    }
}

impl From<EncodingError> for Error {
    fn from(err: EncodingError) -> Self {
        Error::EncodingError(err)
    }
}

impl From<VerifyError> for PathError {
    fn from(err: VerifyError) -> Self {
        PathError::VerifierRejected(err)
    }
}

// ============================================================================
// Helper constructors
// ============================================================================

impl Error {
    /// Create an unexpected tag error
    pub fn invalid_tag(expected: u8, found: u8) -> Self {
        Error::ParseError(ParseError::InvalidTag { expected, found })
    }

    /// Create a missing field error
    pub fn missing_field<S: Into<String>>(field: S) -> Self {
        Error::ParseError(ParseError::MissingField(field.into()))
    }

    /// Create a configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Error::ConfigError(msg.into())
    }
}

impl PathError {
    /// Whether this failure happened on a path that reached a trust anchor.
    pub fn reached_anchor(&self) -> bool {
        matches!(self, PathError::VerifierRejected(_))
    }
}

// ============================================================================
// Tests
// ============================================================================
