//! Layout preservation and handle bookkeeping of written drawings.

mod common;

use common::builders::{splice_bytes, DxfBuilder, FIRST_ENTITY_HANDLE};
use common::*;
use dxf_offset::io::dxf::{LineEnding, TextEncoding};
use dxf_offset::offset::{
    add_offset_to_dxf, process_dxf, scan_offsets, write_offsets, OffsetRecord,
};
use dxf_offset::types::{Color, DxfVersion, Handle, Vector3};
use dxf_offset::CadDocument;
use std::collections::HashSet;
use tempfile::TempDir;

fn offset_file(dir: &TempDir, bytes: &[u8], distance: f64) -> CadDocument {
    let input = write_fixture(dir, "in.dxf", bytes);
    let output = dir.path().join("out.dxf");
    let scan = scan_offsets(&input, distance).unwrap();
    write_offsets(&input, &scan.records, &output).unwrap();
    read_dxf(&output)
}

#[test]
fn test_untouched_sections_round_trip() {
    let dir = TempDir::new().unwrap();
    let fixture = DxfBuilder::r2000()
        .comment("fixture drawing")
        .circle(0.0, 0.0, 0.0, 10.0)
        .line(0.0, 0.0, 1.0, 1.0);
    let source = read_dxf(&write_fixture(&dir, "src.dxf", &fixture.bytes()));
    let doc = offset_file(&dir, &fixture.bytes(), 1.0);

    assert_eq!(doc.comments(), source.comments());
    for name in ["TABLES", "OBJECTS"] {
        assert_eq!(doc.section(name), source.section(name), "section {name}");
    }

    let before = source.section("ENTITIES").unwrap().pairs();
    let after = doc.section("ENTITIES").unwrap().pairs();
    assert!(after.len() > before.len());
    assert_eq!(&after[..before.len()], before);
    assert_eq!(
        doc.header_variable("$INSUNITS"),
        source.header_variable("$INSUNITS")
    );
}

#[test]
fn test_handles_unique_and_handseed_advanced() {
    let dir = TempDir::new().unwrap();
    let fixture = DxfBuilder::r2000()
        .circle(0.0, 0.0, 0.0, 1.0)
        .circle(1.0, 0.0, 0.0, 2.0)
        .arc(0.0, 0.0, 0.0, 3.0, 10.0, 20.0);
    let doc = offset_file(&dir, &fixture.bytes(), 1.0);

    let handles = all_handles(&doc);
    let unique: HashSet<Handle> = handles.iter().copied().collect();
    assert_eq!(unique.len(), handles.len());

    let red: Vec<Handle> = entities_with_color(&doc, Color::RED)
        .iter()
        .map(|e| e.common().handle)
        .collect();
    assert_eq!(red, vec![Handle::new(0x100), Handle::new(0x101), Handle::new(0x102)]);
    assert_eq!(handseed(&doc), Some(Handle::new(0x103)));
}

#[test]
fn test_stale_handseed_is_raised() {
    let dir = TempDir::new().unwrap();
    let fixture = DxfBuilder::r2000()
        .handseed(0x2)
        .circle(0.0, 0.0, 0.0, 1.0)
        .circle(0.0, 0.0, 0.0, 2.0);
    let doc = offset_file(&dir, &fixture.bytes(), 1.0);

    let highest_source = FIRST_ENTITY_HANDLE + 1;
    let red = entities_with_color(&doc, Color::RED);
    assert_eq!(red[0].common().handle, Handle::new(highest_source + 1));
    assert_eq!(red[1].common().handle, Handle::new(highest_source + 2));
    assert_eq!(handseed(&doc), Some(Handle::new(highest_source + 3)));
}

#[test]
fn test_r2000_entities_carry_subclass_markers() {
    let dir = TempDir::new().unwrap();
    let doc = offset_file(
        &dir,
        &DxfBuilder::r2000().arc(0.0, 0.0, 0.0, 1.0, 0.0, 45.0).bytes(),
        1.0,
    );

    let record = doc.model_space().last().unwrap();
    let markers: Vec<&str> = record
        .pairs()
        .iter()
        .filter(|p| p.code == 100)
        .map(|p| p.value_string.as_str())
        .collect();
    assert_eq!(markers, vec!["AcDbEntity", "AcDbCircle", "AcDbArc"]);
    assert_eq!(record.value(62).and_then(|p| p.as_int()), Some(1));
    assert_eq!(record.value(8).map(|p| p.value_string.as_str()), Some("0"));
}

#[test]
fn test_r12_without_handles() {
    let dir = TempDir::new().unwrap();
    let doc = offset_file(&dir, &DxfBuilder::r12().circle(0.0, 0.0, 0.0, 1.0).bytes(), 1.0);

    assert_eq!(doc.version, DxfVersion::AC1009);
    let record = doc.model_space().last().unwrap();
    assert_eq!(record.handle(), None);
    assert_eq!(record.value(100), None);
    assert_eq!(record.value(330), None);
    assert_eq!(handseed(&doc), None);
}

#[test]
fn test_r12_with_handling() {
    let dir = TempDir::new().unwrap();
    let fixture = DxfBuilder::r12().with_handling().circle(0.0, 0.0, 0.0, 1.0);
    let doc = offset_file(&dir, &fixture.bytes(), 1.0);

    let record = doc.model_space().last().unwrap();
    assert_eq!(record.handle(), Some(Handle::new(0x100)));
    assert_eq!(record.value(100), None);
    assert_eq!(handseed(&doc), Some(Handle::new(0x101)));
}

#[test]
fn test_binary_input_gives_binary_output() {
    for fixture in [
        DxfBuilder::r2000().circle(1.0, 2.0, 3.0, 4.0),
        DxfBuilder::r12().arc(1.0, 2.0, 0.0, 4.0, 15.0, 300.0),
    ] {
        let dir = TempDir::new().unwrap();
        let input = write_fixture(&dir, "in.dxf", &fixture.binary_bytes());
        let output = dir.path().join("out.dxf");

        let scan = scan_offsets(&input, 0.5).unwrap();
        assert_eq!(scan.records.len(), 1);
        assert_close(scan.records[0].radius(), 4.5);
        write_offsets(&input, &scan.records, &output).unwrap();

        let bytes = std::fs::read(&output).unwrap();
        assert!(bytes.starts_with(b"AutoCAD Binary DXF\r\n\x1a\0"));
        let doc = read_dxf(&output);
        assert!(doc.format.binary);
        assert_eq!(entities_with_color(&doc, Color::RED).len(), 1);
        assert_eq!(entities(&doc).len(), 2);
    }
}

#[test]
fn test_crlf_line_endings_kept() {
    let dir = TempDir::new().unwrap();
    let doc = offset_file(&dir, &DxfBuilder::r12().crlf().circle(0.0, 0.0, 0.0, 1.0).bytes(), 1.0);
    assert_eq!(doc.format.line_ending, LineEnding::CrLf);

    let bytes = std::fs::read(dir.path().join("out.dxf")).unwrap();
    let lf = bytes.iter().filter(|b| **b == b'\n').count();
    let crlf = bytes.windows(2).filter(|w| w == b"\r\n").count();
    assert_eq!(lf, crlf);
}

#[test]
fn test_code_page_text_kept() {
    let dir = TempDir::new().unwrap();
    let fixture = DxfBuilder::r2000()
        .code_page("ANSI_1252")
        .layer("Schr\u{e4}g")
        .circle(0.0, 0.0, 0.0, 1.0);
    let doc = offset_file(&dir, &fixture.bytes(), 1.0);

    assert_eq!(
        doc.format.encoding,
        TextEncoding::CodePage(encoding_rs::WINDOWS_1252)
    );
    let first = entities(&doc).remove(0);
    assert_eq!(first.common().layer, "Schr\u{e4}g");

    let bytes = std::fs::read(dir.path().join("out.dxf")).unwrap();
    assert!(bytes.windows(6).any(|w| w == b"Schr\xe4g"));
}

#[test]
fn test_reoffset_output_is_stable() {
    let dir = TempDir::new().unwrap();
    let input = write_fixture(&dir, "in.dxf", &DxfBuilder::r2000().circle(0.0, 0.0, 0.0, 2.0).bytes());
    let output = dir.path().join("out.dxf");

    let scan = scan_offsets(&input, 1.0).unwrap();
    write_offsets(&input, &scan.records, &output).unwrap();
    let rescan = scan_offsets(&output, 1.0).unwrap();

    assert_eq!(
        rescan.records,
        vec![
            OffsetRecord::Circle {
                center: Vector3::ZERO,
                radius: 3.0
            },
            OffsetRecord::Circle {
                center: Vector3::ZERO,
                radius: 4.0
            },
        ]
    );
}

/// TEXT record whose value is replaced by raw bytes after building.
const TEXT_MARKER: &str = "@@TEXT@@";

fn with_raw_text(builder: DxfBuilder, raw: &[u8]) -> Vec<u8> {
    let builder = builder.raw_entity(&[
        (0, "TEXT"),
        (8, "0"),
        (10, "0.0"),
        (20, "0.0"),
        (30, "0.0"),
        (40, "2.5"),
        (1, TEXT_MARKER),
    ]);
    splice_bytes(&builder.bytes(), TEXT_MARKER, raw)
}

#[test]
fn test_utf8_looking_bytes_in_latin1_drawing_kept() {
    let dir = TempDir::new().unwrap();
    let bytes = with_raw_text(DxfBuilder::r12().circle(0.0, 0.0, 0.0, 1.0), b"Caf\xc3\xa9");
    let input = write_fixture(&dir, "in.dxf", &bytes);
    let output = dir.path().join("out.dxf");

    let records = process_dxf(&input, 1.0).expect("scan succeeds");
    assert!(add_offset_to_dxf(&input, &records, &output));

    let written = std::fs::read(&output).unwrap();
    assert!(written.windows(5).any(|w| w == b"Caf\xc3\xa9"));
    assert!(!written.windows(4).any(|w| w == b"Caf\xe9"));
}

#[test]
fn test_utf8_looking_bytes_in_code_page_drawing_kept() {
    let dir = TempDir::new().unwrap();
    let bytes = with_raw_text(DxfBuilder::r2000().circle(0.0, 0.0, 0.0, 1.0), b"\xd0\x94");
    let input = write_fixture(&dir, "in.dxf", &bytes);
    let output = dir.path().join("out.dxf");

    let records = process_dxf(&input, 1.0).expect("scan succeeds");
    assert!(add_offset_to_dxf(&input, &records, &output));

    let written = std::fs::read(&output).unwrap();
    assert!(written.windows(4).any(|w| w == b"\n\xd0\x94\n"));
    assert_eq!(entities_with_color(&read_dxf(&output), Color::RED).len(), 1);
}

#[test]
fn test_exhausted_handles_fail_without_output() {
    let dir = TempDir::new().unwrap();
    let fixture = DxfBuilder::r2000()
        .circle(0.0, 0.0, 0.0, 1.0)
        .raw_entity(&[(0, "LINE"), (5, "FFFFFFFFFFFFFFFF"), (8, "0")]);
    let input = write_fixture(&dir, "in.dxf", &fixture.bytes());
    let output = dir.path().join("out.dxf");

    let records = process_dxf(&input, 1.0).expect("scan succeeds");
    assert_eq!(records.len(), 1);
    assert!(!add_offset_to_dxf(&input, &records, &output));
    assert!(!output.exists());
}
