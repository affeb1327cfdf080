// Copyright 2026 Contributors to the Veraison project.
// SPDX-License-Identifier: Apache-2.0

use super::common::*;
use super::funcname::ComponentFunctionalName;
use log::debug;

/// Value of the extended PCR immediately before and after the measurement was
/// folded into it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PcrInfo {
    pub before: Vec<u8>,
    pub after: Vec<u8>,
}

/// One measured component: who it is, what was measured, how it was extended
/// into a PCR and, optionally, how it was validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvidenceRecord {
    name: ComponentFunctionalName,
    depth: u32,
    measurement: Vec<u8>,
    hash_algorithm: HashAlgorithm,
    transform: PcrTransform,
    measurement_time: MeasurementTime,
    extended_pcr: u32,
    pcr_info: Option<PcrInfo>,
    validation: Validation,
    policy_uri: Vec<u8>,
}

impl EvidenceRecord {
    /// Create a record owning `measurement` and a clone of `name`.  No
    /// validation is performed.
    pub fn new(
        name: &ComponentFunctionalName,
        depth: u32,
        extended_pcr: u32,
        hash_algorithm: HashAlgorithm,
        transform: PcrTransform,
        measurement_time: MeasurementTime,
        measurement: Vec<u8>,
    ) -> Self {
        let name = name.clone();

        name.log("");
        debug!(
            "PCR {:2} extended with: {}",
            extended_pcr,
            hex::encode(&measurement)
        );

        Self {
            name,
            depth,
            measurement,
            hash_algorithm,
            transform,
            measurement_time,
            extended_pcr,
            pcr_info: None,
            validation: Validation::NotAttempted,
            policy_uri: Vec::new(),
        }
    }

    /// Component functional name and sub-component depth
    pub fn get_functional_name(&self) -> (&ComponentFunctionalName, u32) {
        (&self.name, self.depth)
    }

    pub fn get_measurement(
        &self,
    ) -> (&[u8], u32, HashAlgorithm, PcrTransform, MeasurementTime) {
        (
            &self.measurement,
            self.extended_pcr,
            self.hash_algorithm,
            self.transform,
            self.measurement_time,
        )
    }

    pub fn extended_pcr(&self) -> u32 {
        self.extended_pcr
    }

    /// PCR values before and after extension, if attached
    pub fn get_pcr_info(&self) -> Option<(&[u8], &[u8])> {
        self.pcr_info
            .as_ref()
            .map(|p| (p.before.as_slice(), p.after.as_slice()))
    }

    /// Attach the PCR before/after values.  A second call replaces the first.
    pub fn set_pcr_info(&mut self, pcr_before: Vec<u8>, pcr_after: Vec<u8>) {
        debug!(
            "PCR {:2} before value : {}",
            self.extended_pcr,
            hex::encode(&pcr_before)
        );
        debug!(
            "PCR {:2} after value  : {}",
            self.extended_pcr,
            hex::encode(&pcr_after)
        );

        self.pcr_info = Some(PcrInfo {
            before: pcr_before,
            after: pcr_after,
        });
    }

    /// Validation outcome.  The policy URI is only reported alongside a
    /// failed or passed outcome.
    pub fn get_validation(&self) -> (Validation, Option<&[u8]>) {
        if self.validation.has_policy_uri() {
            (self.validation, Some(self.policy_uri.as_slice()))
        } else {
            (self.validation, None)
        }
    }

    pub fn set_validation(&mut self, validation: Validation, uri: &[u8]) {
        self.validation = validation;
        self.policy_uri = uri.to_vec();
    }
}
