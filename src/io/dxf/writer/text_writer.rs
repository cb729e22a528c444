//! ASCII DXF writer

use super::stream_writer::DxfStreamWriter;
use crate::error::{DxfError, Result};
use crate::io::dxf::format::{LineEnding, TextEncoding};
use crate::io::dxf::{format_double, DxfCodePair};
use crate::types::Handle;
use std::io::Write;

/// ASCII DXF stream writer
pub struct DxfTextWriter<W: Write> {
    writer: W,
    line_ending: LineEnding,
    encoding: TextEncoding,
}

impl<W: Write> DxfTextWriter<W> {
    /// Create a new ASCII DXF writer (LF line endings, UTF-8)
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            line_ending: LineEnding::Lf,
            encoding: TextEncoding::Utf8,
        }
    }

    /// Use the given line terminator
    pub fn with_line_ending(mut self, line_ending: LineEnding) -> Self {
        self.line_ending = line_ending;
        self
    }

    /// Encode string values with the given encoding
    pub fn with_encoding(mut self, encoding: TextEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Write raw bytes at the start of the stream (byte order mark)
    pub fn write_preamble(&mut self, bytes: &[u8]) -> Result<()> {
        self.writer.write_all(bytes)?;
        Ok(())
    }

    /// Write a DXF code right-aligned in a 3-character field
    fn write_code(&mut self, code: i32) -> Result<()> {
        write!(self.writer, "{:>3}", code)?;
        self.end_line()
    }

    fn write_line(&mut self, value: &str) -> Result<()> {
        let bytes = self.encoding.encode(value).ok_or_else(|| {
            DxfError::Encoding(format!("'{}' cannot be represented in the drawing's code page", value))
        })?;
        self.writer.write_all(&bytes)?;
        self.end_line()
    }

    fn end_line(&mut self) -> Result<()> {
        self.writer.write_all(self.line_ending.as_bytes())?;
        Ok(())
    }
}

impl<W: Write> DxfStreamWriter for DxfTextWriter<W> {
    fn write_string(&mut self, code: i32, value: &str) -> Result<()> {
        self.write_code(code)?;
        self.write_line(value)
    }

    fn write_i16(&mut self, code: i32, value: i16) -> Result<()> {
        self.write_code(code)?;
        self.write_line(&value.to_string())
    }

    fn write_i32(&mut self, code: i32, value: i32) -> Result<()> {
        self.write_code(code)?;
        self.write_line(&value.to_string())
    }

    fn write_i64(&mut self, code: i32, value: i64) -> Result<()> {
        self.write_code(code)?;
        self.write_line(&value.to_string())
    }

    fn write_double(&mut self, code: i32, value: f64) -> Result<()> {
        self.write_code(code)?;
        self.write_line(&format_double(value))
    }

    fn write_bool(&mut self, code: i32, value: bool) -> Result<()> {
        self.write_code(code)?;
        self.write_line(if value { "1" } else { "0" })
    }

    fn write_handle(&mut self, code: i32, handle: Handle) -> Result<()> {
        self.write_code(code)?;
        self.write_line(&handle.to_hex())
    }

    fn write_binary(&mut self, code: i32, data: &[u8]) -> Result<()> {
        self.write_code(code)?;
        let hex: String = data.iter().map(|b| format!("{:02X}", b)).collect();
        self.write_line(&hex)
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    /// Pairs are written with their original text so untouched values
    /// round-trip byte for byte.
    fn write_pair(&mut self, pair: &DxfCodePair) -> Result<()> {
        self.write_code(pair.code)?;
        self.write_line(&pair.value_string)
    }
}
