//! Shared test utilities for dxf-offset integration tests.
//!
//! Fixture builders live in [`builders`]; this module holds the read and
//! inspection helpers that all test crates import via `mod common;`.

#![allow(dead_code)]

pub mod builders;

use dxf_offset::entities::EntityType;
use dxf_offset::io::dxf::{DxfReader, DxfReaderConfiguration};
use dxf_offset::types::{Color, Handle};
use dxf_offset::CadDocument;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

// ===========================================================================
// Files
// ===========================================================================

/// Write `bytes` to `name` inside `dir` and return the full path.
pub fn write_fixture(dir: &TempDir, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, bytes).unwrap_or_else(|e| panic!("Cannot write {name}: {e:?}"));
    path
}

// ===========================================================================
// Read helpers
// ===========================================================================

/// Read a DXF file in strict mode (no failsafe).
pub fn read_dxf(path: &Path) -> CadDocument {
    DxfReader::from_file(path)
        .unwrap_or_else(|e| panic!("Cannot open DXF {}: {e:?}", path.display()))
        .read()
        .unwrap_or_else(|e| panic!("Failed to read DXF {}: {e:?}", path.display()))
}

/// Read a DXF file in failsafe mode.
pub fn read_dxf_failsafe(path: &Path) -> CadDocument {
    DxfReader::from_file(path)
        .unwrap_or_else(|e| panic!("Cannot open DXF {}: {e:?}", path.display()))
        .with_configuration(DxfReaderConfiguration { failsafe: true })
        .read()
        .unwrap_or_else(|e| panic!("Failed to read DXF {}: {e:?}", path.display()))
}

// ===========================================================================
// Entity utilities
// ===========================================================================

/// All typed model space entities, panicking on unreadable ones.
pub fn entities(doc: &CadDocument) -> Vec<EntityType> {
    doc.entities()
        .map(|e| e.unwrap_or_else(|err| panic!("Unreadable entity: {err:?}")))
        .collect()
}

/// Model space entities drawn in `color`.
pub fn entities_with_color(doc: &CadDocument, color: Color) -> Vec<EntityType> {
    entities(doc)
        .into_iter()
        .filter(|e| e.common().color == color)
        .collect()
}

/// Sorted frequency map of entity type names.
pub fn entity_type_counts(doc: &CadDocument) -> BTreeMap<&'static str, usize> {
    let mut map = BTreeMap::new();
    for e in entities(doc) {
        *map.entry(e.as_entity().entity_type()).or_insert(0) += 1;
    }
    map
}

/// Every handle (code 5) found outside of the HEADER section.
pub fn all_handles(doc: &CadDocument) -> Vec<Handle> {
    doc.sections()
        .filter(|s| s.name() != "HEADER")
        .flat_map(|s| s.pairs())
        .filter(|p| p.code == 5)
        .filter_map(|p| p.as_handle())
        .collect()
}

/// Value of `$HANDSEED`.
pub fn handseed(doc: &CadDocument) -> Option<Handle> {
    doc.header_variable("$HANDSEED")
        .and_then(|v| v.first())
        .and_then(|p| p.as_handle())
}

/// Assert two floats are equal within `1e-9`.
pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
