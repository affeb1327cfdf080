// Copyright 2026 Contributors to the Veraison project.
// SPDX-License-Identifier: Apache-2.0

//! The attr module implements the PA-TNC attribute carrying a single
//! [`EvidenceRecord`](crate::evidence::EvidenceRecord): the TCG PTS Simple
//! Component Evidence attribute.
//!
//! # Example
//!
//! The sending side wraps a record and builds the attribute value; the
//! receiving side processes the value and queries the resulting record.
//!
//! ```
//! use ptsevidence::attr::{PaTncAttr, SimpleCompEvid};
//! use ptsevidence::evidence::{
//!     ComponentFunctionalName, EvidenceRecord, HashAlgorithm, PcrTransform,
//! };
//!
//! let name = ComponentFunctionalName::new(0x4005, 1, 3);
//! let e = EvidenceRecord::new(
//!     &name,
//!     0,
//!     10,
//!     HashAlgorithm::Sha256,
//!     PcrTransform::None,
//!     None,
//!     vec![0; 32],
//! );
//!
//! let mut tx = SimpleCompEvid::new(e);
//! tx.build().expect("building attribute");
//!
//! let mut rx = SimpleCompEvid::from_data(tx.value());
//! rx.process().expect("processing attribute");
//!
//! let (m, pcr, _, _, _) = rx.comp_evidence().unwrap().get_measurement();
//! assert_eq!(m, [0u8; 32]);
//! assert_eq!(pcr, 10);
//! ```

pub use self::bio::{BioReader, BioWriter};
pub use self::errors::{Error, FailureKind};
pub use self::flags::EvidenceFlags;
pub use self::simple_comp_evid::{
    SimpleCompEvid, MEAS_TIME_SIZE, MEAS_TYPE, SIMPLE_COMP_EVID_SIZE,
};

mod bio;
mod errors;
mod flags;
mod simple_comp_evid;

/// IANA private enterprise number (24 bits)
pub type Pen = u32;

/// Trusted Computing Group
pub const PEN_TCG: Pen = 0x005597;

/// TCG attribute type of the Simple Component Evidence attribute
pub const TCG_PTS_SIMPLE_COMP_EVID: u32 = 0x0030_0000;

/// Operations a PA-TNC message container expects from each attribute it
/// carries
pub trait PaTncAttr {
    fn vendor_id(&self) -> Pen;

    fn attr_type(&self) -> u32;

    /// The attribute value, as built or as received
    fn value(&self) -> &[u8];

    fn noskip_flag(&self) -> bool;

    fn set_noskip_flag(&mut self, noskip: bool);

    /// Encode the attribute value
    fn build(&mut self) -> Result<(), Error>;

    /// Parse the attribute value.  On failure, [`Error::offset`] points at the
    /// offending byte within the value.  An attribute wrapping a record that
    /// was never built fails with [`Error::NotBuilt`].
    fn process(&mut self) -> Result<(), Error>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evidence::{ComponentFunctionalName, EvidenceRecord, HashAlgorithm, PcrTransform};

    #[test]
    fn attribute_as_trait_object() {
        let name = ComponentFunctionalName::new(0x4005, 1, 3);
        let e = EvidenceRecord::new(
            &name,
            1,
            4,
            HashAlgorithm::Sha1,
            PcrTransform::Match,
            None,
            vec![0x5a; 20],
        );

        let mut attrs: Vec<Box<dyn PaTncAttr>> = vec![Box::new(SimpleCompEvid::new(e))];

        for a in attrs.iter_mut() {
            a.build().expect("building attribute");
            assert_eq!(a.vendor_id(), PEN_TCG);
            assert_eq!(a.attr_type(), TCG_PTS_SIMPLE_COMP_EVID);
            assert_eq!(a.value().len(), SIMPLE_COMP_EVID_SIZE + 20);
            a.process().expect("processing attribute");
        }
    }
}
