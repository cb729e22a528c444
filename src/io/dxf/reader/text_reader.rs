//! DXF ASCII text reader

use super::stream_reader::{DxfCodePair, DxfStreamReader};
use crate::error::{DxfError, Result};
use crate::io::dxf::format::{DxfFormat, LineEnding, TextEncoding};
use std::io::{BufRead, BufReader, Read, Seek, SeekFrom};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// DXF ASCII text file reader
pub struct DxfTextReader<R: Read + Seek> {
    reader: BufReader<R>,
    line_number: usize,
    peeked_pair: Option<DxfCodePair>,
    encoding: TextEncoding,
    line_ending: Option<LineEnding>,
    byte_order_mark: bool,
}

impl<R: Read + Seek> DxfTextReader<R> {
    /// Create a new DXF text reader
    pub fn new(reader: BufReader<R>) -> Result<Self> {
        Ok(Self {
            reader,
            line_number: 0,
            peeked_pair: None,
            encoding: TextEncoding::Utf8,
            line_ending: None,
            byte_order_mark: false,
        })
    }

    /// Read a single line without its terminator.
    fn read_line(&mut self) -> Result<Option<String>> {
        let mut bytes = Vec::new();
        if self.reader.read_until(b'\n', &mut bytes)? == 0 {
            return Ok(None);
        }

        if self.line_number == 0 && bytes.starts_with(UTF8_BOM) {
            self.byte_order_mark = true;
            bytes.drain(..UTF8_BOM.len());
        }
        self.line_number += 1;

        let mut ending = None;
        if bytes.last() == Some(&b'\n') {
            bytes.pop();
            ending = Some(LineEnding::Lf);
            if bytes.last() == Some(&b'\r') {
                bytes.pop();
                ending = Some(LineEnding::CrLf);
            }
        }
        if self.line_ending.is_none() {
            self.line_ending = ending;
        }

        Ok(Some(self.encoding.decode(&bytes)))
    }

    /// Read a code/value pair from the stream
    fn read_pair_internal(&mut self) -> Result<Option<DxfCodePair>> {
        // Blank lines in place of a group code are skipped
        let code_line = loop {
            match self.read_line()? {
                Some(line) if line.trim().is_empty() => continue,
                Some(line) => break line,
                None => return Ok(None),
            }
        };

        let code = code_line.trim().parse::<i32>().map_err(|_| {
            DxfError::Parse(format!(
                "Invalid DXF code at line {}: '{}'",
                self.line_number, code_line
            ))
        })?;

        let value = match self.read_line()? {
            Some(line) => line,
            None => {
                return Err(DxfError::Parse(format!(
                    "Unexpected EOF after code {} at line {}",
                    code, self.line_number
                )))
            }
        };

        Ok(Some(DxfCodePair::new(code, value)))
    }
}

impl<R: Read + Seek> DxfStreamReader for DxfTextReader<R> {
    fn read_pair(&mut self) -> Result<Option<DxfCodePair>> {
        if let Some(pair) = self.peeked_pair.take() {
            return Ok(Some(pair));
        }

        self.read_pair_internal()
    }

    fn push_back(&mut self, pair: DxfCodePair) {
        self.peeked_pair = Some(pair);
    }

    fn reset(&mut self) -> Result<()> {
        self.reader.seek(SeekFrom::Start(0))?;
        self.line_number = 0;
        self.peeked_pair = None;
        Ok(())
    }

    fn set_encoding(&mut self, encoding: TextEncoding) {
        self.encoding = encoding;
    }

    fn format(&self) -> DxfFormat {
        DxfFormat {
            binary: false,
            short_codes: false,
            line_ending: self.line_ending.unwrap_or_default(),
            byte_order_mark: self.byte_order_mark,
            encoding: self.encoding,
        }
    }
}
