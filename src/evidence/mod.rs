// Copyright 2026 Contributors to the Veraison project.
// SPDX-License-Identifier: Apache-2.0

//! The evidence module provides the [`EvidenceRecord`] object, which holds
//! the complete state of a single component measurement: the component's
//! functional name and sub-component depth, the measurement value, the PCR it
//! was extended into (optionally with the PCR values before and after the
//! extension) and the outcome of validating it against a policy.
//!
//! # Example
//!
//! ```
//! use ptsevidence::evidence::{
//!     ComponentFunctionalName, EvidenceRecord, HashAlgorithm, PcrTransform, Validation,
//! };
//!
//! let name = ComponentFunctionalName::new(0x4005, 1, 3);
//!
//! let mut e = EvidenceRecord::new(
//!     &name,
//!     0,
//!     10,
//!     HashAlgorithm::Sha256,
//!     PcrTransform::None,
//!     None,
//!     vec![0; 32],
//! );
//!
//! e.set_validation(Validation::Passed, b"https://policy.example/p1");
//!
//! let (validation, uri) = e.get_validation();
//! assert_eq!(validation, Validation::Passed);
//! assert!(uri.is_some());
//! ```

pub use self::common::*;
pub use self::errors::Error;
pub use self::funcname::ComponentFunctionalName;
pub use self::json::{EvidenceJson, PcrInfoJson};
pub use self::record::{EvidenceRecord, PcrInfo};

mod common;
mod errors;
mod funcname;
mod json;
mod record;
