//! DXF writer module

mod binary_writer;
mod entity_writer;
mod pair_buffer;
mod stream_writer;
mod text_writer;

pub use binary_writer::DxfBinaryWriter;
pub use entity_writer::EntityWriter;
pub use pair_buffer::DxfPairBuffer;
pub use stream_writer::{DxfStreamWriter, DxfStreamWriterExt};
pub use text_writer::DxfTextWriter;

use crate::document::CadDocument;
use crate::error::Result;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// DXF file writer
///
/// Writes a document in the layout recorded in [`CadDocument::format`]:
/// ASCII or binary, the same line ending and the same text encoding.
pub struct DxfWriter<'a> {
    document: &'a CadDocument,
}

impl<'a> DxfWriter<'a> {
    /// Create a new writer for a document
    pub fn new(document: &'a CadDocument) -> Self {
        Self { document }
    }

    /// Write to a file, creating or truncating it
    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path)?;
        let writer = BufWriter::new(file);
        self.write_to_writer(writer)
    }

    /// Write to any writer
    pub fn write_to_writer<W: Write>(&self, writer: W) -> Result<()> {
        let format = self.document.format;
        if format.binary {
            let mut stream_writer =
                DxfBinaryWriter::with_options(writer, format.short_codes, format.encoding)?;
            self.write_dxf(&mut stream_writer)?;
            stream_writer.flush()?;
        } else {
            let mut stream_writer = DxfTextWriter::new(writer)
                .with_line_ending(format.line_ending)
                .with_encoding(format.encoding);
            if format.byte_order_mark {
                stream_writer.write_preamble(UTF8_BOM)?;
            }
            self.write_dxf(&mut stream_writer)?;
            stream_writer.flush()?;
        }
        Ok(())
    }

    /// Write to a byte vector (useful for testing)
    pub fn write_to_vec(&self) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        self.write_to_writer(&mut buffer)?;
        Ok(buffer)
    }

    /// Write DXF content to a stream writer
    fn write_dxf<W: DxfStreamWriter>(&self, writer: &mut W) -> Result<()> {
        for comment in self.document.comments() {
            writer.write_pair(comment)?;
        }

        for section in self.document.sections() {
            writer.write_section_start(section.name())?;
            for pair in section.pairs() {
                writer.write_pair(pair)?;
            }
            writer.write_section_end()?;
        }

        writer.write_eof()
    }
}
