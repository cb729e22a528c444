//! Drawing document
//!
//! A [`CadDocument`] keeps every section of the file as the list of pairs it
//! was read from. Only CIRCLE and ARC records are interpreted (on demand,
//! through [`CadDocument::entities`]); everything else is carried through
//! untouched so that saving a document reproduces the source plus whatever
//! was appended.

use crate::entities::EntityType;
use crate::error::{DxfError, Result};
use crate::io::dxf::{DxfCodePair, DxfFormat, DxfWriter};
use crate::notification::{NotificationCollection, NotificationType};
use crate::types::{DxfVersion, Handle};
use indexmap::IndexMap;
use std::path::Path;

/// Handle seed of a freshly created document; lower handles are reserved
/// for the standard tables.
const INITIAL_HANDSEED: u64 = 0x20;

/// One `SECTION ... ENDSEC` block
#[derive(Debug, Clone, PartialEq)]
pub struct DxfSection {
    name: String,
    pairs: Vec<DxfCodePair>,
}

impl DxfSection {
    /// Create a section from its name and body pairs
    pub fn new(name: impl Into<String>, pairs: Vec<DxfCodePair>) -> Self {
        Self {
            name: name.into(),
            pairs,
        }
    }

    /// Section name (HEADER, TABLES, ENTITIES, ...)
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Body pairs between the name and ENDSEC
    pub fn pairs(&self) -> &[DxfCodePair] {
        &self.pairs
    }

    /// Records of the section, each starting at a group code 0 pair
    pub fn records(&self) -> Records<'_> {
        Records { rest: &self.pairs }
    }
}

/// Iterator over the group-code-0 delimited records of a section
#[derive(Debug, Clone)]
pub struct Records<'a> {
    rest: &'a [DxfCodePair],
}

impl<'a> Iterator for Records<'a> {
    type Item = EntityRecord<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let start = self.rest.iter().position(|p| p.code == 0)?;
        let body = &self.rest[start..];
        let len = body
            .iter()
            .skip(1)
            .position(|p| p.code == 0)
            .map_or(body.len(), |i| i + 1);
        self.rest = &body[len..];
        Some(EntityRecord { pairs: &body[..len] })
    }
}

/// A borrowed record: the type pair (code 0) and the pairs that follow it
#[derive(Debug, Clone, Copy)]
pub struct EntityRecord<'a> {
    pairs: &'a [DxfCodePair],
}

impl<'a> EntityRecord<'a> {
    /// Record type (CIRCLE, ARC, BLOCK_RECORD, ...)
    pub fn entity_type(&self) -> &'a str {
        self.pairs.first().map_or("", |p| p.value_string.trim())
    }

    /// All pairs of the record, including the type pair
    pub fn pairs(&self) -> &'a [DxfCodePair] {
        self.pairs
    }

    /// First pair with the given group code
    pub fn value(&self, code: i32) -> Option<&'a DxfCodePair> {
        self.pairs.iter().skip(1).find(|p| p.code == code)
    }

    /// The record's own handle (code 5, or 105 for DIMSTYLE)
    pub fn handle(&self) -> Option<Handle> {
        self.value(5)
            .or_else(|| self.value(105))
            .and_then(|p| p.as_handle())
    }

    /// Entity belongs to paper space (code 67 = 1)
    pub fn is_paper_space(&self) -> bool {
        self.value(67).and_then(|p| p.as_int()) == Some(1)
    }
}

/// A DXF drawing held as its sections
#[derive(Debug, Clone)]
pub struct CadDocument {
    /// Version from `$ACADVER`
    pub version: DxfVersion,
    /// Physical layout the document is written back in
    pub format: DxfFormat,
    /// Non-fatal findings from reading and editing
    pub notifications: NotificationCollection,
    comments: Vec<DxfCodePair>,
    sections: IndexMap<String, DxfSection>,
    next_handle: Option<Handle>,
}

impl CadDocument {
    /// Create a minimal R12 drawing: a HEADER naming the version and an
    /// empty ENTITIES section
    pub fn new() -> Self {
        Self::with_version(DxfVersion::AC1009)
    }

    /// Create a minimal drawing of the given version
    pub fn with_version(version: DxfVersion) -> Self {
        let mut document = Self::empty(version);
        let mut header = Vec::new();
        if version != DxfVersion::Unknown {
            header.push(DxfCodePair::new(9, "$ACADVER"));
            header.push(DxfCodePair::new(1, version.to_dxf_string()));
        }
        if version.has_subclass_markers() {
            header.push(DxfCodePair::new(9, "$HANDSEED"));
            header.push(DxfCodePair::from_handle(5, Handle::new(INITIAL_HANDSEED)));
        }
        document.push_section(DxfSection::new("HEADER", header));
        document.push_section(DxfSection::new("ENTITIES", Vec::new()));
        document
    }

    /// Document without any section, filled by the reader
    pub(crate) fn empty(version: DxfVersion) -> Self {
        Self {
            version,
            format: DxfFormat::default(),
            notifications: NotificationCollection::new(),
            comments: Vec::new(),
            sections: IndexMap::new(),
            next_handle: None,
        }
    }

    /// Save the document in the layout it was read in
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        DxfWriter::new(self).write_to_file(path)
    }

    /// Append a section; a repeated name extends the existing section
    pub(crate) fn push_section(&mut self, section: DxfSection) {
        self.next_handle = None;
        match self.sections.get_mut(&section.name) {
            Some(existing) => existing.pairs.extend(section.pairs),
            None => {
                self.sections.insert(section.name.clone(), section);
            }
        }
    }

    /// Keep a 999 comment that appeared outside of any section
    pub(crate) fn push_comment(&mut self, comment: DxfCodePair) {
        self.comments.push(comment);
    }

    /// Comments written before the first section
    pub fn comments(&self) -> &[DxfCodePair] {
        &self.comments
    }

    /// Sections in file order
    pub fn sections(&self) -> impl Iterator<Item = &DxfSection> {
        self.sections.values()
    }

    /// Look up a section by name
    pub fn section(&self, name: &str) -> Option<&DxfSection> {
        self.sections.get(name)
    }

    /// Value pairs of a header variable (the pairs after `9/<name>`)
    pub fn header_variable(&self, name: &str) -> Option<&[DxfCodePair]> {
        let pairs = self.section("HEADER")?.pairs();
        let start = pairs.iter().position(|p| p.is(9, name))? + 1;
        let len = pairs[start..]
            .iter()
            .position(|p| p.code == 9)
            .unwrap_or(pairs.len() - start);
        Some(&pairs[start..start + len])
    }

    /// Replace (or append) a header variable
    pub fn set_header_variable(&mut self, name: &str, values: Vec<DxfCodePair>) {
        if name == "$HANDSEED" {
            self.next_handle = None;
        }
        if !self.sections.contains_key("HEADER") {
            self.sections
                .shift_insert(0, "HEADER".to_string(), DxfSection::new("HEADER", Vec::new()));
        }
        let Some(header) = self.sections.get_mut("HEADER") else {
            return;
        };

        let pairs = &mut header.pairs;
        match pairs.iter().position(|p| p.is(9, name)) {
            Some(index) => {
                let start = index + 1;
                let end = pairs[start..]
                    .iter()
                    .position(|p| p.code == 9)
                    .map_or(pairs.len(), |i| start + i);
                pairs.splice(start..end, values);
            }
            None => {
                pairs.push(DxfCodePair::new(9, name));
                pairs.extend(values);
            }
        }
    }

    /// Records of the ENTITIES section that belong to model space
    pub fn model_space(&self) -> impl Iterator<Item = EntityRecord<'_>> {
        self.section("ENTITIES")
            .into_iter()
            .flat_map(|s| s.records())
            .filter(|r| !r.is_paper_space())
    }

    /// Typed CIRCLE and ARC entities of model space, in file order
    pub fn entities(&self) -> impl Iterator<Item = Result<EntityType>> + '_ {
        self.model_space()
            .filter_map(|record| EntityType::from_record(&record).transpose())
    }

    /// Whether new entities must carry handles
    pub fn uses_handles(&self) -> bool {
        self.version.has_subclass_markers()
            || self
                .header_variable("$HANDLING")
                .and_then(|v| v.first())
                .and_then(|p| p.as_int())
                == Some(1)
    }

    /// The next free handle: `$HANDSEED`, raised above every handle in use.
    ///
    /// `None` once the handle in use is `FFFFFFFFFFFFFFFF`.
    pub fn next_handle(&self) -> Option<Handle> {
        if let Some(handle) = self.next_handle {
            return Some(handle);
        }

        let seed = self
            .header_variable("$HANDSEED")
            .and_then(|v| v.first())
            .and_then(|p| p.as_handle())
            .unwrap_or(Handle::NULL);

        let highest = self
            .sections()
            .filter(|s| s.name() != "HEADER")
            .flat_map(|s| s.pairs())
            .filter(|p| p.code == 5 || p.code == 105)
            .filter_map(|p| p.as_handle())
            .max()
            .unwrap_or(Handle::NULL);

        Some(seed.max(highest.next()?).max(Handle::new(1)))
    }

    /// Handle of the `*Model_Space` block record
    pub fn model_space_block_record(&self) -> Option<Handle> {
        self.section("TABLES")?
            .records()
            .filter(|r| r.entity_type() == "BLOCK_RECORD")
            .find(|r| {
                r.value(2)
                    .is_some_and(|n| n.value_string.trim().eq_ignore_ascii_case("*Model_Space"))
            })
            .and_then(|r| r.handle())
    }

    /// Append an entity to model space.
    ///
    /// A handle is allocated (and `$HANDSEED` advanced) when the drawing uses
    /// handles; R13+ entities are owned by the `*Model_Space` block record.
    /// Returns the new handle, or [`Handle::NULL`] for a drawing without
    /// handles.
    pub fn add_entity(&mut self, entity: impl Into<EntityType>) -> Result<Handle> {
        let mut entity = entity.into();

        let mut handle = Handle::NULL;
        if self.uses_handles() {
            let (allocated, following) = self
                .next_handle()
                .and_then(|h| Some((h, h.next()?)))
                .ok_or_else(|| DxfError::InvalidFormat("no free entity handle left".to_string()))?;
            handle = allocated;
            self.set_header_variable("$HANDSEED", vec![DxfCodePair::from_handle(5, following)]);
            self.next_handle = Some(following);
            entity.as_entity_mut().common_mut().handle = handle;
        }

        if self.version.has_subclass_markers() && entity.common().owner.is_null() {
            match self.model_space_block_record() {
                Some(owner) => entity.as_entity_mut().common_mut().owner = owner,
                None => self.notifications.notify(
                    NotificationType::Warning,
                    format!(
                        "no *Model_Space block record; {} {:X} written without owner",
                        entity.as_entity().entity_type(),
                        handle
                    ),
                ),
            }
        }

        let pairs = entity.to_pairs(self.version)?;
        self.entities_section_mut().pairs.extend(pairs);
        Ok(handle)
    }

    /// The ENTITIES section, created before OBJECTS (or last) when missing
    fn entities_section_mut(&mut self) -> &mut DxfSection {
        if !self.sections.contains_key("ENTITIES") {
            let index = self
                .sections
                .get_index_of("OBJECTS")
                .or_else(|| self.sections.get_index_of("THUMBNAILIMAGE"))
                .unwrap_or(self.sections.len());
            self.sections.shift_insert(
                index,
                "ENTITIES".to_string(),
                DxfSection::new("ENTITIES", Vec::new()),
            );
        }
        self.sections
            .entry("ENTITIES".to_string())
            .or_insert_with(|| DxfSection::new("ENTITIES", Vec::new()))
    }
}

impl Default for CadDocument {
    fn default() -> Self {
        Self::new()
    }
}
