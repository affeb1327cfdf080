// Copyright 2026 Contributors to the Veraison project.
// SPDX-License-Identifier: Apache-2.0

use super::errors::Error;
use std::fmt;
use std::str::FromStr;

/// Time at which a component was measured.  `None` is the "undefined" time.
pub type MeasurementTime = Option<jiff::Timestamp>;

const HASH_ALG_NONE: u16 = 0x0000;
const HASH_ALG_SHA384: u16 = 0x2000;
const HASH_ALG_SHA256: u16 = 0x4000;
const HASH_ALG_SHA1: u16 = 0x8000;

/// PTS measurement algorithm, as carried in the 16-bit Hash Algorithm field.
///
/// Codes that are not assigned by TCG are kept verbatim in `Unknown` so that a
/// decoded record never loses information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HashAlgorithm {
    None,
    Sha1,
    Sha256,
    Sha384,
    Unknown(u16),
}

impl HashAlgorithm {
    pub fn code(self) -> u16 {
        match self {
            HashAlgorithm::None => HASH_ALG_NONE,
            HashAlgorithm::Sha1 => HASH_ALG_SHA1,
            HashAlgorithm::Sha256 => HASH_ALG_SHA256,
            HashAlgorithm::Sha384 => HASH_ALG_SHA384,
            HashAlgorithm::Unknown(c) => c,
        }
    }
}

impl From<u16> for HashAlgorithm {
    fn from(code: u16) -> Self {
        match code {
            HASH_ALG_NONE => HashAlgorithm::None,
            HASH_ALG_SHA1 => HashAlgorithm::Sha1,
            HASH_ALG_SHA256 => HashAlgorithm::Sha256,
            HASH_ALG_SHA384 => HashAlgorithm::Sha384,
            c => HashAlgorithm::Unknown(c),
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HashAlgorithm::None => write!(f, "none"),
            HashAlgorithm::Sha1 => write!(f, "sha-1"),
            HashAlgorithm::Sha256 => write!(f, "sha-256"),
            HashAlgorithm::Sha384 => write!(f, "sha-384"),
            HashAlgorithm::Unknown(c) => write!(f, "{c:#06x}"),
        }
    }
}

impl FromStr for HashAlgorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s {
            "none" => Ok(HashAlgorithm::None),
            "sha-1" => Ok(HashAlgorithm::Sha1),
            "sha-256" => Ok(HashAlgorithm::Sha256),
            "sha-384" => Ok(HashAlgorithm::Sha384),
            other => parse_code(other, "hash algorithm").map(HashAlgorithm::from),
        }
    }
}

/// Transformation used when extending a measurement into a PCR
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PcrTransform {
    /// measurement used as is
    None,
    /// hash size matches the PCR size
    Match,
    /// hash is longer than the PCR and was truncated
    Long,
    /// hash is shorter than the PCR and was padded
    Short,
    Unknown(u8),
}

impl PcrTransform {
    pub fn code(self) -> u8 {
        match self {
            PcrTransform::None => 0,
            PcrTransform::Match => 1,
            PcrTransform::Long => 2,
            PcrTransform::Short => 3,
            PcrTransform::Unknown(c) => c,
        }
    }
}

impl From<u8> for PcrTransform {
    fn from(code: u8) -> Self {
        match code {
            0 => PcrTransform::None,
            1 => PcrTransform::Match,
            2 => PcrTransform::Long,
            3 => PcrTransform::Short,
            c => PcrTransform::Unknown(c),
        }
    }
}

impl fmt::Display for PcrTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PcrTransform::None => write!(f, "none"),
            PcrTransform::Match => write!(f, "match"),
            PcrTransform::Long => write!(f, "long"),
            PcrTransform::Short => write!(f, "short"),
            PcrTransform::Unknown(c) => write!(f, "{c:#04x}"),
        }
    }
}

impl FromStr for PcrTransform {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s {
            "none" => Ok(PcrTransform::None),
            "match" => Ok(PcrTransform::Match),
            "long" => Ok(PcrTransform::Long),
            "short" => Ok(PcrTransform::Short),
            other => {
                let c = parse_code(other, "pcr transform")?;
                u8::try_from(c)
                    .map(PcrTransform::from)
                    .map_err(|_| Error::Sema(format!("pcr transform {other} exceeds 8 bits")))
            }
        }
    }
}

/// Outcome of validating a measurement against a reference policy.  The
/// discriminants are the 2-bit codes found in the Flags field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum Validation {
    #[default]
    NotAttempted = 0,
    /// validation attempted but unable to verify
    DontCare = 1,
    Failed = 2,
    Passed = 3,
}

impl Validation {
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Only the two low-order bits of `code` are considered.
    pub fn from_code(code: u8) -> Self {
        match code & 0x03 {
            0 => Validation::NotAttempted,
            1 => Validation::DontCare,
            2 => Validation::Failed,
            _ => Validation::Passed,
        }
    }

    /// A verification policy URI accompanies failed and passed outcomes only
    pub fn has_policy_uri(self) -> bool {
        matches!(self, Validation::Failed | Validation::Passed)
    }
}

impl fmt::Display for Validation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Validation::NotAttempted => "not-attempted",
            Validation::DontCare => "dont-care",
            Validation::Failed => "failed",
            Validation::Passed => "passed",
        };
        f.write_str(s)
    }
}

impl FromStr for Validation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s {
            "not-attempted" => Ok(Validation::NotAttempted),
            "dont-care" => Ok(Validation::DontCare),
            "failed" => Ok(Validation::Failed),
            "passed" => Ok(Validation::Passed),
            other => Err(Error::Sema(format!("unknown validation outcome {other}"))),
        }
    }
}

// accepts decimal or 0x-prefixed hex
fn parse_code(s: &str, what: &str) -> Result<u16, Error> {
    let r = match s.strip_prefix("0x") {
        Some(h) => u16::from_str_radix(h, 16),
        None => s.parse::<u16>(),
    };

    r.map_err(|_| Error::Sema(format!("unknown {what} {s}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_algorithm_codes() {
        assert_eq!(HashAlgorithm::Sha256.code(), 0x4000);
        assert_eq!(HashAlgorithm::from(0x8000), HashAlgorithm::Sha1);
        assert_eq!(HashAlgorithm::from(0x1234), HashAlgorithm::Unknown(0x1234));
        assert_eq!(HashAlgorithm::Unknown(0x1234).code(), 0x1234);
    }

    #[test]
    fn hash_algorithm_text() {
        assert_eq!("sha-384".parse::<HashAlgorithm>(), Ok(HashAlgorithm::Sha384));
        assert_eq!(
            HashAlgorithm::Unknown(0x0001).to_string().parse::<HashAlgorithm>(),
            Ok(HashAlgorithm::Unknown(0x0001))
        );
        assert!("md5".parse::<HashAlgorithm>().is_err());
    }

    #[test]
    fn pcr_transform_text() {
        assert_eq!("long".parse::<PcrTransform>(), Ok(PcrTransform::Long));
        assert_eq!("7".parse::<PcrTransform>(), Ok(PcrTransform::Unknown(7)));
        assert!("0x100".parse::<PcrTransform>().is_err());
    }

    #[test]
    fn validation_codes() {
        for v in [
            Validation::NotAttempted,
            Validation::DontCare,
            Validation::Failed,
            Validation::Passed,
        ] {
            assert_eq!(Validation::from_code(v.code()), v);
        }

        assert!(Validation::Failed.has_policy_uri());
        assert!(Validation::Passed.has_policy_uri());
        assert!(!Validation::DontCare.has_policy_uri());
        assert!(!Validation::NotAttempted.has_policy_uri());
    }
}
