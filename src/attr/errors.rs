// Copyright 2026 Contributors to the Veraison project.
// SPDX-License-Identifier: Apache-2.0

/// Coarse classification of a decoding failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    InsufficientData,
    UnsupportedMeasurementType,
    TruncatedField,
}

#[derive(thiserror::Error, PartialEq, Eq)]
pub enum Error {
    #[error("insufficient data for Simple Component Evidence: got {len} bytes, need {need}")]
    InsufficientData { len: usize, need: usize },
    #[error("unsupported Measurement Type {found:#04x} at offset {offset}")]
    UnsupportedMeasurementType { found: u8, offset: u32 },
    #[error("truncated {field} at offset {offset}")]
    TruncatedField { field: &'static str, offset: u32 },
    #[error("no component evidence to build from")]
    MissingEvidence,
    #[error("attribute value has not been built")]
    NotBuilt,
    #[error("{0} does not fit its wire field")]
    FieldOverflow(&'static str),
    #[error("PCR before ({before} bytes) and after ({after} bytes) values differ in length")]
    PcrLengthMismatch { before: usize, after: usize },
}

impl Error {
    /// Classification of a decoding failure, `None` for encoding failures
    pub fn kind(&self) -> Option<FailureKind> {
        match self {
            Error::InsufficientData { .. } => Some(FailureKind::InsufficientData),
            Error::UnsupportedMeasurementType { .. } => {
                Some(FailureKind::UnsupportedMeasurementType)
            }
            Error::TruncatedField { .. } => Some(FailureKind::TruncatedField),
            _ => None,
        }
    }

    /// Offset of the offending byte within the attribute value.  A protocol
    /// level "invalid parameter" error is expected to point there.
    pub fn offset(&self) -> u32 {
        match self {
            Error::UnsupportedMeasurementType { offset, .. }
            | Error::TruncatedField { offset, .. } => *offset,
            _ => 0,
        }
    }
}

impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)
    }
}
