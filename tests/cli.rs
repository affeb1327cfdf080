// Copyright 2026 Contributors to the Veraison project.
// SPDX-License-Identifier: Apache-2.0

use ptsevidence::evidence::{EvidenceJson, Validation};
use std::fs;
use std::process::Command;

const TEST_EVIDENCE: &str = r#"{
    "vendor-id": 16389,
    "name": 1,
    "qualifier": 3,
    "extended-pcr": 10,
    "hash-algorithm": "sha-256",
    "pcr-transform": "none",
    "measurement": "0000000000000000000000000000000000000000000000000000000000000000",
    "validation": "passed",
    "policy-uri": "https://policy.example/p1"
}"#;

fn ptsevidence() -> Command {
    Command::new(env!("CARGO_BIN_EXE_ptsevidence"))
}

#[test]
fn encode_then_decode() {
    let dir = tempfile::tempdir().expect("creating temp dir");
    let description = dir.path().join("evidence.json");
    let value = dir.path().join("evidence.hex");

    fs::write(&description, TEST_EVIDENCE).expect("writing description");

    let status = ptsevidence()
        .arg("encode")
        .arg("--description")
        .arg(&description)
        .arg("--output")
        .arg(&value)
        .arg("--encoding")
        .arg("hex")
        .status()
        .expect("running encode");
    assert!(status.success());

    let hex_value = fs::read_to_string(&value).expect("reading encoded value");
    // 40-byte prefix, 2 + 25 bytes of policy URI, 32 bytes of measurement
    assert_eq!(hex_value.len(), 2 * (40 + 27 + 32));
    assert!(hex_value.starts_with("60000000004005030000000180"));

    let out = ptsevidence()
        .arg("decode")
        .arg("--input")
        .arg(&value)
        .arg("--encoding")
        .arg("hex")
        .output()
        .expect("running decode");
    assert!(out.status.success());

    let j = EvidenceJson::parse(&String::from_utf8_lossy(&out.stdout)).expect("decoded JSON");
    let expected = EvidenceJson::parse(TEST_EVIDENCE).expect("test JSON");

    assert_eq!(j, expected);
    assert_eq!(j.validation, Validation::Passed);
}

#[test]
fn decode_reports_failure() {
    let dir = tempfile::tempdir().expect("creating temp dir");
    let value = dir.path().join("short.bin");

    fs::write(&value, [0u8; 39]).expect("writing value");

    let out = ptsevidence()
        .arg("decode")
        .arg("-i")
        .arg(&value)
        .output()
        .expect("running decode");

    assert!(String::from_utf8_lossy(&out.stderr).contains("decoding failed"));
    assert!(out.stdout.is_empty());
}
