// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! Validation time.
//!
//! The path builder never interprets the time itself; it hands the value to
//! the verifier with every candidate path. The type mirrors X.509's two time
//! encodings so verifiers can compare it directly against validity periods.
//!
//! # UTCTime Y2K Conversion
//!
//! UTCTime values are interpreted according to RFC 5280:
//! - Years 50-99 are interpreted as 1950-1999
//! - Years 00-49 are interpreted as 2000-2049

use core::cmp::Ordering;
use core::fmt;
use core::time::Duration;

use der::{
    asn1::{GeneralizedTime, UtcTime},
    DateTime,
};

use crate::error::Result;

/// A timestamp that can be either UTCTime or GeneralizedTime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Time {
    /// UTCTime format (YYMMDDHHMMSSZ)
    UtcTime(UtcTime),
    /// GeneralizedTime format (YYYYMMDDHHMMSSZ)
    GeneralizedTime(GeneralizedTime),
}

impl Time {
    /// Creates a new Time from a UtcTime.
    pub const fn new_utc(utc_time: UtcTime) -> Self {
        Time::UtcTime(utc_time)
    }

    /// Creates a new Time from a GeneralizedTime.
    pub const fn new_generalized(generalized_time: GeneralizedTime) -> Self {
        Time::GeneralizedTime(generalized_time)
    }

    /// Creates a GeneralizedTime from seconds since the Unix epoch.
    pub fn from_unix_secs(secs: u64) -> Result<Self> {
        let dt = DateTime::from_unix_duration(Duration::from_secs(secs))?;
        Ok(Time::GeneralizedTime(GeneralizedTime::from_date_time(dt)))
    }

    /// Returns the DateTime representation.
    pub fn to_date_time(&self) -> DateTime {
        match self {
            Time::UtcTime(utc) => utc.to_date_time(),
            Time::GeneralizedTime(gen) => gen.to_date_time(),
        }
    }

    /// Duration since the Unix epoch.
    pub fn unix_duration(&self) -> Duration {
        self.to_date_time().unix_duration()
    }

    /// Checks if this time is before another time.
    pub fn is_before(&self, other: &Time) -> bool {
        self.unix_duration() < other.unix_duration()
    }

    /// Checks if this time is after another time.
    pub fn is_after(&self, other: &Time) -> bool {
        self.unix_duration() > other.unix_duration()
    }
}

impl PartialOrd for Time {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Time {
    fn cmp(&self, other: &Self) -> Ordering {
        self.unix_duration().cmp(&other.unix_duration())
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_date_time())
    }
}

/// Gets current time as X.509 Time.
#[cfg(feature = "std")]
pub fn current_time() -> Result<Time> {
    let now = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map_err(|_| der::Error::from(der::ErrorKind::DateTime))?;
    let now_dt = DateTime::from_unix_duration(now)?;
    Ok(Time::GeneralizedTime(GeneralizedTime::from_date_time(now_dt)))
}
