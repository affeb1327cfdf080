// Copyright 2026 Contributors to the Veraison project.
// SPDX-License-Identifier: Apache-2.0

use crate::evidence::Validation;
use bitflags::bitflags;

const VALIDATION_SHIFT: u32 = 5;

bitflags! {
    /// Flags field of the Simple Component Evidence attribute
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct EvidenceFlags: u8 {
        /// PCR before/after values are included
        const PCR = 0x80;
        /// 2-bit validation outcome
        const VALIDATION = 0x60;
    }
}

impl EvidenceFlags {
    pub fn encode(validation: Validation, has_pcr_info: bool) -> Self {
        let mut flags = Self::from_bits_retain(validation.code() << VALIDATION_SHIFT);

        flags.set(Self::PCR, has_pcr_info);

        flags
    }

    /// Bits outside the defined fields are ignored
    pub fn decode(byte: u8) -> Self {
        Self::from_bits_truncate(byte)
    }

    pub fn validation(self) -> Validation {
        Validation::from_code((self & Self::VALIDATION).bits() >> VALIDATION_SHIFT)
    }

    pub fn has_pcr_info(self) -> bool {
        self.contains(Self::PCR)
    }
}
