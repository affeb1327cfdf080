// Copyright 2026 Contributors to the Veraison project.
// SPDX-License-Identifier: Apache-2.0

//! Simple Component Evidence attribute, see §3.15.1 of the PTS Protocol:
//! Binding to TNC IF-M specification.
//!
//! ```text
//!                      1                   2                   3
//!  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |    Flags      |               Sub-Component Depth             |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |    Component Functional Name Vendor ID        |Fam| Qualifier |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                   Component Functional Name                   |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! | Measure. Type |               Extended into PCR               |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |        Hash Algorithm     | PCR Transform |     Reserved      |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |              Measurement Date/Time (20 bytes)                 |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |  Optional Policy URI Length   |  Opt. Verification Policy URI ~
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |    Optional PCR Length        |   Optional PCR Before Value   ~
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! ~           Optional PCR After Value (Variable Length)          ~
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! ~           Component Measurement (Variable Length)             ~
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! ```

use super::bio::{BioReader, BioWriter};
use super::errors::Error;
use super::flags::EvidenceFlags;
use super::{PaTncAttr, Pen, PEN_TCG, TCG_PTS_SIMPLE_COMP_EVID};
use crate::evidence::{
    ComponentFunctionalName, EvidenceRecord, HashAlgorithm, MeasurementTime, PcrTransform,
};
use jiff::tz::Offset;
use log::{debug, warn};

pub const SIMPLE_COMP_EVID_SIZE: usize = 40;
pub const MEAS_TIME_SIZE: usize = 20;
pub const MEAS_TYPE: u8 = 0x80;

const MEAS_TYPE_OFFSET: u32 = 12;
const RESERVED: u8 = 0x00;
const FAMILY_MASK: u8 = 0xC0;
const UNDEFINED_TIME: &[u8; MEAS_TIME_SIZE] = b"0000-00-00T00:00:00Z";

/// Codec between an [`EvidenceRecord`] and the Simple Component Evidence
/// attribute value.
///
/// A codec created with [`SimpleCompEvid::new`] is meant to be built, one
/// created with [`SimpleCompEvid::from_data`] to be processed.
#[derive(Debug, Clone)]
pub struct SimpleCompEvid {
    vendor_id: Pen,
    attr_type: u32,
    value: Vec<u8>,
    noskip_flag: bool,
    evidence: Option<EvidenceRecord>,
    raw_measurement_time: Option<[u8; MEAS_TIME_SIZE]>,
}

impl SimpleCompEvid {
    /// Wrap `evidence` for transmission
    pub fn new(evidence: EvidenceRecord) -> Self {
        Self {
            vendor_id: PEN_TCG,
            attr_type: TCG_PTS_SIMPLE_COMP_EVID,
            value: Vec::new(),
            noskip_flag: false,
            evidence: Some(evidence),
            raw_measurement_time: None,
        }
    }

    /// Keep a private copy of a received attribute value, to be processed
    pub fn from_data(data: &[u8]) -> Self {
        Self {
            vendor_id: PEN_TCG,
            attr_type: TCG_PTS_SIMPLE_COMP_EVID,
            value: data.to_vec(),
            noskip_flag: false,
            evidence: None,
            raw_measurement_time: None,
        }
    }

    /// Decode an attribute value into a new record
    pub fn decode(data: &[u8]) -> Result<EvidenceRecord, Error> {
        let mut attr = Self::from_data(data);
        attr.process()?;
        attr.into_comp_evidence().ok_or(Error::MissingEvidence)
    }

    pub fn comp_evidence(&self) -> Option<&EvidenceRecord> {
        self.evidence.as_ref()
    }

    pub fn into_comp_evidence(self) -> Option<EvidenceRecord> {
        self.evidence
    }

    /// The Measurement Date/Time field as last parsed.  It is not converted
    /// into the record, whose measurement time stays undefined.
    pub fn raw_measurement_time(&self) -> Option<&[u8; MEAS_TIME_SIZE]> {
        self.raw_measurement_time.as_ref()
    }

    fn encode(e: &EvidenceRecord) -> Result<Vec<u8>, Error> {
        let (name, depth) = e.get_functional_name();
        let (measurement, extended_pcr, hash_algorithm, transform, measurement_time) =
            e.get_measurement();
        let pcr_info = e.get_pcr_info();
        let (validation, policy_uri) = e.get_validation();

        let flags = EvidenceFlags::encode(validation, pcr_info.is_some());

        let mut w = BioWriter::with_capacity(SIMPLE_COMP_EVID_SIZE + measurement.len());

        w.write_u8(flags.bits(), "flags")?;
        w.write_u24(depth, "sub-component depth")?;
        w.write_u24(name.vendor_id(), "component name vendor ID")?;
        w.write_u8(name.qualifier(), "family and qualifier")?;
        w.write_u32(name.name(), "component functional name")?;
        w.write_u8(MEAS_TYPE, "measurement type")?;
        w.write_u24(extended_pcr, "extended PCR")?;
        w.write_u16(hash_algorithm.code(), "hash algorithm")?;
        w.write_u8(transform.code(), "PCR transform")?;
        w.write_u8(RESERVED, "reserved")?;
        w.write_data(&utc_time(measurement_time));

        if let Some(uri) = policy_uri {
            w.write_data16(uri, "policy URI")?;
        }

        if let Some((before, after)) = pcr_info {
            if before.len() != after.len() {
                return Err(Error::PcrLengthMismatch {
                    before: before.len(),
                    after: after.len(),
                });
            }
            w.write_data16(before, "PCR before value")?;
            w.write_data(after);
        }

        w.write_data(measurement);

        Ok(w.into_buf())
    }

    fn parse(&mut self) -> Result<EvidenceRecord, Error> {
        if self.value.len() < SIMPLE_COMP_EVID_SIZE {
            debug!("insufficient data for Simple Component Evidence");
            return Err(Error::InsufficientData {
                len: self.value.len(),
                need: SIMPLE_COMP_EVID_SIZE,
            });
        }

        let mut r = BioReader::new(&self.value);

        let flags = EvidenceFlags::decode(r.read_u8("flags")?);
        let depth = r.read_u24("sub-component depth")?;
        let vendor_id = r.read_u24("component name vendor ID")?;
        let fam_and_qualifier = r.read_u8("family and qualifier")?;
        let comp_name = r.read_u32("component functional name")?;
        let measurement_type = r.read_u8("measurement type")?;
        let extended_pcr = r.read_u24("extended PCR")?;
        let hash_algorithm = HashAlgorithm::from(r.read_u16("hash algorithm")?);
        let transform = PcrTransform::from(r.read_u8("PCR transform")?);
        let _reserved = r.read_u8("reserved")?;
        let utc_time = r.read_data(MEAS_TIME_SIZE, "measurement date/time")?;

        if measurement_type != MEAS_TYPE {
            debug!("unsupported Measurement Type in Simple Component Evidence");
            return Err(Error::UnsupportedMeasurementType {
                found: measurement_type,
                offset: MEAS_TYPE_OFFSET,
            });
        }

        let validation = flags.validation();
        let qualifier = fam_and_qualifier & !FAMILY_MASK;

        let mut raw_time = [0u8; MEAS_TIME_SIZE];
        raw_time.copy_from_slice(utc_time);
        debug!(
            "measurement time '{}' is not converted",
            String::from_utf8_lossy(&raw_time)
        );

        let policy_uri = if validation.has_policy_uri() {
            let len = r.read_u16("policy URI length")?;
            Some(r.read_data(len as usize, "policy URI")?)
        } else {
            None
        };

        let pcr_info = if flags.has_pcr_info() {
            // a single length covers both values
            let len = r.read_u16("PCR length")? as usize;
            let before = r.read_data(len, "PCR before value")?;
            let after = r.read_data(len, "PCR after value")?;
            Some((before, after))
        } else {
            None
        };

        let measurement = r.read_remaining();

        let name = ComponentFunctionalName::new(vendor_id, comp_name, qualifier);

        let mut evidence = EvidenceRecord::new(
            &name,
            depth,
            extended_pcr,
            hash_algorithm,
            transform,
            None,
            measurement.to_vec(),
        );

        if let Some(uri) = policy_uri {
            evidence.set_validation(validation, uri);
        }

        if let Some((before, after)) = pcr_info {
            evidence.set_pcr_info(before.to_vec(), after.to_vec());
        }

        self.raw_measurement_time = Some(raw_time);

        Ok(evidence)
    }
}

impl PaTncAttr for SimpleCompEvid {
    fn vendor_id(&self) -> Pen {
        self.vendor_id
    }

    fn attr_type(&self) -> u32 {
        self.attr_type
    }

    fn value(&self) -> &[u8] {
        &self.value
    }

    fn noskip_flag(&self) -> bool {
        self.noskip_flag
    }

    fn set_noskip_flag(&mut self, noskip: bool) {
        self.noskip_flag = noskip;
    }

    fn build(&mut self) -> Result<(), Error> {
        let e = self.evidence.as_ref().ok_or(Error::MissingEvidence)?;

        self.value = Self::encode(e)?;

        Ok(())
    }

    /// A codec wrapping a record whose value was never built fails with
    /// [`Error::NotBuilt`] and keeps the record.  Otherwise any previous
    /// record is dropped before parsing.
    fn process(&mut self) -> Result<(), Error> {
        if self.value.is_empty() && self.evidence.is_some() {
            return Err(Error::NotBuilt);
        }

        self.evidence = None;
        self.raw_measurement_time = None;

        match self.parse() {
            Ok(evidence) => {
                self.evidence = Some(evidence);
                Ok(())
            }
            Err(e) => {
                debug!("Simple Component Evidence rejected at offset {}", e.offset());
                Err(e)
            }
        }
    }
}

/// Format the measurement time as `YYYY-MM-DDThh:mm:ssZ`
fn utc_time(t: MeasurementTime) -> [u8; MEAS_TIME_SIZE] {
    let Some(ts) = t else {
        return *UNDEFINED_TIME;
    };

    let dt = Offset::UTC.to_datetime(ts);

    if !(0..=9999).contains(&dt.year()) {
        warn!("measurement time {ts} cannot be expressed, sending it as undefined");
        return *UNDEFINED_TIME;
    }

    let s = format!(
        "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}Z",
        dt.year(),
        dt.month(),
        dt.day(),
        dt.hour(),
        dt.minute(),
        dt.second()
    );

    let mut out = *UNDEFINED_TIME;
    out.copy_from_slice(s.as_bytes());
    out
}
