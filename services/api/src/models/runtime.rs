//! Movie runtime scalar
//!
//! Internally a runtime is a plain count of minutes. On the wire it is always
//! the string `"<n> mins"`, and nothing else is accepted when decoding.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer, de::Error as _};
use thiserror::Error;

const SUFFIX: &str = " mins";

/// Error returned when a runtime does not match `"<n> mins"`
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeError {
    #[error("invalid runtime format")]
    InvalidFormat,
}

/// Movie runtime in minutes
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Runtime(u32);

impl Runtime {
    pub fn from_minutes(minutes: u32) -> Self {
        Runtime(minutes)
    }

    pub fn minutes(self) -> u32 {
        self.0
    }
}

impl fmt::Display for Runtime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{SUFFIX}", self.0)
    }
}

impl FromStr for Runtime {
    type Err = RuntimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_suffix(SUFFIX).ok_or(RuntimeError::InvalidFormat)?;

        // `u32::from_str` tolerates a leading `+`, so check the digits first
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(RuntimeError::InvalidFormat);
        }

        digits
            .parse()
            .map(Runtime)
            .map_err(|_| RuntimeError::InvalidFormat)
    }
}

impl Serialize for Runtime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Runtime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)
            .map_err(|_| D::Error::custom(RuntimeError::InvalidFormat))?;
        raw.parse().map_err(D::Error::custom)
    }
}
