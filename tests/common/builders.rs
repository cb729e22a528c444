//! DXF fixture builders.
//!
//! [`DxfBuilder`] produces the text of a small but complete drawing: an R12
//! file (HEADER, a LAYER table, ENTITIES) or an R2000 file that also carries
//! the BLOCK_RECORD table with `*Model_Space` / `*Paper_Space`, handles,
//! owners, subclass markers and an OBJECTS section.

#![allow(dead_code)]

use dxf_offset::io::dxf::DxfReader;
use std::io::Cursor;

/// Handle of the `*Model_Space` block record in R2000 fixtures.
pub const MODEL_SPACE: u64 = 0x1F;
/// Handle of the `*Paper_Space` block record in R2000 fixtures.
pub const PAPER_SPACE: u64 = 0x1B;
/// First handle given to fixture entities.
pub const FIRST_ENTITY_HANDLE: u64 = 0x30;

#[derive(Debug, Clone)]
pub struct DxfBuilder {
    version: &'static str,
    handling: bool,
    crlf: bool,
    code_page: Option<&'static str>,
    handseed: Option<u64>,
    layer: String,
    comments: Vec<String>,
    entities: Vec<Vec<(i32, String)>>,
}

impl DxfBuilder {
    /// R12 drawing without handles.
    pub fn r12() -> Self {
        Self {
            version: "AC1009",
            handling: false,
            crlf: false,
            code_page: None,
            handseed: None,
            layer: "0".to_string(),
            comments: Vec::new(),
            entities: Vec::new(),
        }
    }

    /// R2000 drawing with handles, owners and subclass markers.
    pub fn r2000() -> Self {
        Self {
            version: "AC1015",
            handling: true,
            code_page: Some("ANSI_1252"),
            handseed: Some(0x100),
            ..Self::r12()
        }
    }

    /// R12 drawing with `$HANDLING` = 1.
    pub fn with_handling(mut self) -> Self {
        self.handling = true;
        if self.handseed.is_none() {
            self.handseed = Some(0x100);
        }
        self
    }

    pub fn crlf(mut self) -> Self {
        self.crlf = true;
        self
    }

    pub fn code_page(mut self, code_page: &'static str) -> Self {
        self.code_page = Some(code_page);
        self
    }

    /// Override `$HANDSEED` (useful to simulate a stale seed).
    pub fn handseed(mut self, seed: u64) -> Self {
        self.handseed = Some(seed);
        self
    }

    /// Name of an extra layer written to the LAYER table.
    pub fn layer(mut self, name: &str) -> Self {
        self.layer = name.to_string();
        self
    }

    pub fn comment(mut self, text: &str) -> Self {
        self.comments.push(text.to_string());
        self
    }

    pub fn circle(self, x: f64, y: f64, z: f64, r: f64) -> Self {
        self.entity("CIRCLE", false, &[(10, x), (20, y), (30, z), (40, r)])
    }

    pub fn paper_circle(self, x: f64, y: f64, z: f64, r: f64) -> Self {
        self.entity("CIRCLE", true, &[(10, x), (20, y), (30, z), (40, r)])
    }

    pub fn arc(self, x: f64, y: f64, z: f64, r: f64, start: f64, end: f64) -> Self {
        self.entity(
            "ARC",
            false,
            &[(10, x), (20, y), (30, z), (40, r), (50, start), (51, end)],
        )
    }

    pub fn line(self, x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        self.entity(
            "LINE",
            false,
            &[(10, x1), (20, y1), (30, 0.0), (11, x2), (21, y2), (31, 0.0)],
        )
    }

    /// Append a record exactly as given, without handle or owner.
    pub fn raw_entity(mut self, pairs: &[(i32, &str)]) -> Self {
        self.entities
            .push(pairs.iter().map(|(c, v)| (*c, v.to_string())).collect());
        self
    }

    fn is_r2000(&self) -> bool {
        self.version != "AC1009"
    }

    fn entity(mut self, kind: &str, paper: bool, values: &[(i32, f64)]) -> Self {
        let handle = FIRST_ENTITY_HANDLE + self.entities.len() as u64;
        let mut pairs = vec![(0, kind.to_string())];
        if self.handling {
            pairs.push((5, format!("{handle:X}")));
        }
        if self.is_r2000() {
            let owner = if paper { PAPER_SPACE } else { MODEL_SPACE };
            pairs.push((330, format!("{owner:X}")));
            pairs.push((100, "AcDbEntity".to_string()));
        }
        if paper {
            pairs.push((67, "1".to_string()));
        }
        pairs.push((8, self.layer.clone()));

        let (circle, arc) = values.split_at(values.len().min(4));
        if self.is_r2000() {
            let subclass = if kind == "LINE" { "AcDbLine" } else { "AcDbCircle" };
            pairs.push((100, subclass.to_string()));
        }
        for (code, value) in circle {
            pairs.push((*code, format!("{value:?}")));
        }
        if self.is_r2000() && kind == "ARC" {
            pairs.push((100, "AcDbArc".to_string()));
        }
        for (code, value) in arc {
            pairs.push((*code, format!("{value:?}")));
        }
        self.entities.push(pairs);
        self
    }

    fn pairs(&self) -> Vec<(i32, String)> {
        let mut out: Vec<(i32, String)> = Vec::new();
        let mut push = |code: i32, value: &str| out.push((code, value.to_string()));

        for comment in &self.comments {
            push(999, comment);
        }

        push(0, "SECTION");
        push(2, "HEADER");
        push(9, "$ACADVER");
        push(1, self.version);
        if let Some(code_page) = self.code_page {
            push(9, "$DWGCODEPAGE");
            push(3, code_page);
        }
        if self.handling && !self.is_r2000() {
            push(9, "$HANDLING");
            push(70, "1");
        }
        if let Some(seed) = self.handseed {
            push(9, "$HANDSEED");
            push(5, &format!("{seed:X}"));
        }
        push(9, "$INSUNITS");
        push(70, "4");
        push(0, "ENDSEC");

        push(0, "SECTION");
        push(2, "TABLES");
        push(0, "TABLE");
        push(2, "LAYER");
        push(70, "1");
        push(0, "LAYER");
        push(2, &self.layer);
        push(70, "0");
        push(62, "7");
        push(6, "CONTINUOUS");
        push(0, "ENDTAB");
        if self.is_r2000() {
            push(0, "TABLE");
            push(2, "BLOCK_RECORD");
            push(5, "1");
            push(330, "0");
            push(100, "AcDbSymbolTable");
            push(70, "2");
            for (handle, name) in [(MODEL_SPACE, "*Model_Space"), (PAPER_SPACE, "*Paper_Space")] {
                push(0, "BLOCK_RECORD");
                push(5, &format!("{handle:X}"));
                push(330, "1");
                push(100, "AcDbSymbolTableRecord");
                push(100, "AcDbBlockTableRecord");
                push(2, name);
            }
            push(0, "ENDTAB");
        }
        push(0, "ENDSEC");

        push(0, "SECTION");
        push(2, "ENTITIES");
        drop(push);
        for entity in &self.entities {
            out.extend(entity.iter().cloned());
        }
        let mut push = |code: i32, value: &str| out.push((code, value.to_string()));
        push(0, "ENDSEC");

        if self.is_r2000() {
            push(0, "SECTION");
            push(2, "OBJECTS");
            push(0, "DICTIONARY");
            push(5, "C");
            push(330, "0");
            push(100, "AcDbDictionary");
            push(281, "1");
            push(0, "ENDSEC");
        }
        push(0, "EOF");
        out
    }

    /// The drawing as text.
    pub fn build(&self) -> String {
        let eol = if self.crlf { "\r\n" } else { "\n" };
        let mut text = String::new();
        for (code, value) in self.pairs() {
            text.push_str(&format!("{code:>3}{eol}{value}{eol}"));
        }
        text
    }

    /// The drawing as file bytes, encoded with the fixture's code page.
    pub fn bytes(&self) -> Vec<u8> {
        let text = self.build();
        match self.code_page {
            Some("ANSI_1252") if !self.version.starts_with("AC102") => {
                let (bytes, _, _) = encoding_rs::WINDOWS_1252.encode(&text);
                bytes.into_owned()
            }
            _ => text.into_bytes(),
        }
    }

    /// The same drawing converted to binary DXF.
    pub fn binary_bytes(&self) -> Vec<u8> {
        let mut doc = DxfReader::from_reader(Cursor::new(self.bytes()))
            .expect("fixture opens")
            .read()
            .expect("fixture parses");
        doc.format.binary = true;
        doc.format.short_codes = !self.is_r2000();
        dxf_offset::io::DxfWriter::new(&doc)
            .write_to_vec()
            .expect("binary fixture writes")
    }
}

/// Replace every occurrence of `marker` in `bytes` with `raw`.
pub fn splice_bytes(bytes: &[u8], marker: &str, raw: &[u8]) -> Vec<u8> {
    let marker = marker.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i..].starts_with(marker) {
            out.extend_from_slice(raw);
            i += marker.len();
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    out
}
