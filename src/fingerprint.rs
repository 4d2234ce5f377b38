//! Deterministic fingerprints for batch artifacts.
//!
//! Fingerprints let golden tests and downstream consumers check that two
//! runs produced identical artifacts without byte-comparing them.
//!
//! ## Determinism Guarantees
//!
//! - Serializable artifacts hash their canonical JSON encoding; hashed
//!   types must use `BTreeMap` (never `HashMap`) and sorted `Vec`s.
//! - Sheet fingerprints cover dimensions plus raw RGBA bytes, so a blank
//!   cell in a different position changes the fingerprint.

use image::RgbaImage;
use serde::Serialize;
use xxhash_rust::xxh64::xxh64;

/// Fingerprint raw bytes as a fixed-width hex string.
pub fn fingerprint_bytes(bytes: &[u8]) -> String {
    format!("{:016x}", xxh64(bytes, 0))
}

/// Fingerprint a serializable artifact via its canonical JSON encoding.
pub fn fingerprint_value<T: Serialize>(value: &T) -> String {
    let bytes = serde_json::to_vec(value).expect("artifact serialization failed");
    fingerprint_bytes(&bytes)
}

/// Fingerprint a composed sheet: dimensions plus raw RGBA pixel data.
pub fn sheet_fingerprint(sheet: &RgbaImage) -> String {
    let mut bytes = Vec::with_capacity(8 + sheet.as_raw().len());
    bytes.extend_from_slice(&sheet.width().to_be_bytes());
    bytes.extend_from_slice(&sheet.height().to_be_bytes());
    bytes.extend_from_slice(sheet.as_raw());
    fingerprint_bytes(&bytes)
}
