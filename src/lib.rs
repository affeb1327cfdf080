// Copyright 2026 Contributors to the Veraison project.
// SPDX-License-Identifier: Apache-2.0

//! TCG PTS Simple Component Evidence.
//!
//! This crate provides the in-memory model and the wire codec for a single
//! component measurement exchanged between a trust-measurement collector and a
//! verifier.  The evidence is carried as a TCG vendor attribute inside PA-TNC
//! messages; for detailed information about the format, see §3.15.1 of the
//! TCG Attestation PTS Protocol: Binding to TNC IF-M specification.
//!
//! The API allows:
//! * Building an evidence record and encoding it as an attribute value
//! * Decoding an untrusted attribute value, with failures pinned to the
//!   offending byte offset
//! * Converting records to and from a JSON description
//!
//! The measurement itself is carried opaquely and is never verified here.

pub mod attr;
pub mod evidence;

#[cfg(test)]
pub(crate) fn ensure_env_logger_initialized() {
    use std::sync::Once;
    static LOGGER_INIT: Once = Once::new();

    LOGGER_INIT.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    });
}
