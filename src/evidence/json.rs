// Copyright 2026 Contributors to the Veraison project.
// SPDX-License-Identifier: Apache-2.0

use super::common::*;
use super::errors::Error;
use super::funcname::ComponentFunctionalName;
use super::record::EvidenceRecord;
use serde::{Deserialize, Serialize};
use serde_with::{hex::Hex, serde_as, DisplayFromStr};

/// PCR before/after values in the JSON description
#[serde_as]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PcrInfoJson {
    #[serde_as(as = "Hex")]
    pub before: Vec<u8>,

    #[serde_as(as = "Hex")]
    pub after: Vec<u8>,
}

/// JSON description of a Simple Component Evidence record, used both to feed
/// the encoder and to report what was decoded.
#[serde_as]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EvidenceJson {
    /// 24-bit private enterprise number of the component vendor
    #[serde(rename = "vendor-id")]
    pub vendor_id: u32,

    /// Component Functional Name
    #[serde(rename = "name")]
    pub name: u32,

    /// Qualifier (6 bits: Kernel, Sub-component, type)
    #[serde(rename = "qualifier", default)]
    pub qualifier: u8,

    /// Sub-component depth, 0 for top-level components
    #[serde(rename = "depth", default)]
    pub depth: u32,

    #[serde(rename = "extended-pcr")]
    pub extended_pcr: u32,

    /// e.g., "sha-256"
    #[serde_as(as = "DisplayFromStr")]
    #[serde(rename = "hash-algorithm")]
    pub hash_algorithm: HashAlgorithm,

    /// e.g., "none", "match"
    #[serde_as(as = "DisplayFromStr")]
    #[serde(rename = "pcr-transform")]
    pub transform: PcrTransform,

    /// RFC 3339 measurement time, absent when undefined
    #[serde(
        rename = "measurement-time",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub measurement_time: MeasurementTime,

    #[serde_as(as = "Hex")]
    #[serde(rename = "measurement")]
    pub measurement: Vec<u8>,

    #[serde(rename = "pcr-info", default, skip_serializing_if = "Option::is_none")]
    pub pcr_info: Option<PcrInfoJson>,

    /// e.g., "passed", "not-attempted"
    #[serde_as(as = "DisplayFromStr")]
    #[serde(rename = "validation", default)]
    pub validation: Validation,

    /// Verification policy URI, mandatory with "failed" and "passed"
    #[serde(rename = "policy-uri", default, skip_serializing_if = "Option::is_none")]
    pub policy_uri: Option<String>,
}

impl EvidenceJson {
    /// Parse an evidence description from JSON
    pub fn parse(j: &str) -> Result<Self, Error> {
        serde_json::from_str(j).map_err(|e| Error::Syntax(e.to_string()))
    }

    pub fn to_json(&self) -> Result<String, Error> {
        serde_json::to_string_pretty(self).map_err(|e| Error::Syntax(e.to_string()))
    }
}

impl TryFrom<&EvidenceRecord> for EvidenceJson {
    type Error = Error;

    /// Fails if the policy URI is not UTF-8, since the description carries it
    /// as a JSON string.
    fn try_from(r: &EvidenceRecord) -> Result<Self, Error> {
        let (name, depth) = r.get_functional_name();
        let (measurement, extended_pcr, hash_algorithm, transform, measurement_time) =
            r.get_measurement();
        let (validation, policy_uri) = r.get_validation();

        let policy_uri = policy_uri
            .map(|u| {
                String::from_utf8(u.to_vec()).map_err(|e| {
                    Error::Sema(format!(
                        "policy-uri {} is not valid UTF-8: {e}",
                        hex::encode(u)
                    ))
                })
            })
            .transpose()?;

        Ok(Self {
            vendor_id: name.vendor_id(),
            name: name.name(),
            qualifier: name.qualifier(),
            depth,
            extended_pcr,
            hash_algorithm,
            transform,
            measurement_time,
            measurement: measurement.to_vec(),
            pcr_info: r.get_pcr_info().map(|(before, after)| PcrInfoJson {
                before: before.to_vec(),
                after: after.to_vec(),
            }),
            validation,
            policy_uri,
        })
    }
}

impl TryFrom<EvidenceJson> for EvidenceRecord {
    type Error = Error;

    fn try_from(j: EvidenceJson) -> Result<Self, Error> {
        let policy_uri = match (j.validation.has_policy_uri(), j.policy_uri) {
            (true, Some(uri)) => Some(uri),
            (true, None) => {
                return Err(Error::MissingField(format!(
                    "policy-uri is mandatory with validation {}",
                    j.validation
                )))
            }
            (false, Some(_)) => {
                return Err(Error::Sema(format!(
                    "policy-uri is not allowed with validation {}",
                    j.validation
                )))
            }
            (false, None) => None,
        };

        let name = ComponentFunctionalName::new(j.vendor_id, j.name, j.qualifier);

        let mut r = EvidenceRecord::new(
            &name,
            j.depth,
            j.extended_pcr,
            j.hash_algorithm,
            j.transform,
            j.measurement_time,
            j.measurement,
        );

        if let Some(uri) = policy_uri {
            r.set_validation(j.validation, uri.as_bytes());
        } else {
            r.set_validation(j.validation, &[]);
        }

        if let Some(pcr) = j.pcr_info {
            r.set_pcr_info(pcr.before, pcr.after);
        }

        Ok(r)
    }
}
