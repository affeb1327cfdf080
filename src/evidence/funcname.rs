// Copyright 2026 Contributors to the Veraison project.
// SPDX-License-Identifier: Apache-2.0

use log::debug;
use std::fmt;

const QUALIFIER_KERNEL: u8 = 0x20;
const QUALIFIER_SUB_COMPONENT: u8 = 0x10;
const QUALIFIER_TYPE_MASK: u8 = 0x0F;

/// Component Functional Name, see §5.1 of the PTS Protocol: Binding to TNC
/// IF-M specification.  It identifies which software or firmware component
/// was measured.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ComponentFunctionalName {
    vendor_id: u32,
    qualifier: u8,
    name: u32,
}

impl ComponentFunctionalName {
    /// `vendor_id` is a 24-bit private enterprise number, `qualifier` the
    /// 6-bit qualifier (Kernel, Sub-component and type sub-fields).
    pub fn new(vendor_id: u32, name: u32, qualifier: u8) -> Self {
        Self {
            vendor_id,
            qualifier,
            name,
        }
    }

    pub fn vendor_id(&self) -> u32 {
        self.vendor_id
    }

    pub fn qualifier(&self) -> u8 {
        self.qualifier
    }

    pub fn name(&self) -> u32 {
        self.name
    }

    pub fn log(&self, label: &str) {
        debug!("{label}{self}");
    }
}

impl fmt::Display for ComponentFunctionalName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kernel = if self.qualifier & QUALIFIER_KERNEL != 0 {
            'K'
        } else {
            '.'
        };
        let sub_component = if self.qualifier & QUALIFIER_SUB_COMPONENT != 0 {
            'S'
        } else {
            '.'
        };

        write!(
            f,
            "functional component vendor {:#08x}, name {}, qualifier [{}{}{:x}]",
            self.vendor_id,
            self.name,
            kernel,
            sub_component,
            self.qualifier & QUALIFIER_TYPE_MASK
        )
    }
}
