//! Binary DXF writer

use super::stream_writer::DxfStreamWriter;
use crate::error::{DxfError, Result};
use crate::io::dxf::format::TextEncoding;
use crate::types::Handle;
use byteorder::{LittleEndian, WriteBytesExt};
use std::io::Write;

/// Binary DXF sentinel
const BINARY_DXF_SENTINEL: &[u8] = b"AutoCAD Binary DXF\r\n\x1a\x00";

/// Binary DXF stream writer
pub struct DxfBinaryWriter<W: Write> {
    writer: W,
    short_codes: bool,
    encoding: TextEncoding,
}

impl<W: Write> DxfBinaryWriter<W> {
    /// Create a new binary DXF writer with 16-bit group codes (R13 and later)
    pub fn new(writer: W) -> Result<Self> {
        Self::with_options(writer, false, TextEncoding::Utf8)
    }

    /// Create a binary writer; `short_codes` selects the R12 8-bit code layout
    pub fn with_options(mut writer: W, short_codes: bool, encoding: TextEncoding) -> Result<Self> {
        writer.write_all(BINARY_DXF_SENTINEL)?;
        Ok(Self {
            writer,
            short_codes,
            encoding,
        })
    }

    fn write_code(&mut self, code: i32) -> Result<()> {
        let code = i16::try_from(code)
            .map_err(|_| DxfError::Parse(format!("group code {} out of range", code)))?;
        if self.short_codes {
            if (0..255).contains(&code) {
                self.writer.write_u8(code as u8)?;
            } else {
                self.writer.write_u8(255)?;
                self.writer.write_i16::<LittleEndian>(code)?;
            }
        } else {
            self.writer.write_i16::<LittleEndian>(code)?;
        }
        Ok(())
    }

    /// Write a null-terminated string
    fn write_null_string(&mut self, value: &str) -> Result<()> {
        let bytes = self.encoding.encode(value).ok_or_else(|| {
            DxfError::Encoding(format!("'{}' cannot be represented in the drawing's code page", value))
        })?;
        self.writer.write_all(&bytes)?;
        self.writer.write_u8(0)?;
        Ok(())
    }
}

impl<W: Write> DxfStreamWriter for DxfBinaryWriter<W> {
    fn write_string(&mut self, code: i32, value: &str) -> Result<()> {
        self.write_code(code)?;
        self.write_null_string(value)
    }

    fn write_i16(&mut self, code: i32, value: i16) -> Result<()> {
        self.write_code(code)?;
        self.writer.write_i16::<LittleEndian>(value)?;
        Ok(())
    }

    fn write_i32(&mut self, code: i32, value: i32) -> Result<()> {
        self.write_code(code)?;
        self.writer.write_i32::<LittleEndian>(value)?;
        Ok(())
    }

    fn write_i64(&mut self, code: i32, value: i64) -> Result<()> {
        self.write_code(code)?;
        self.writer.write_i64::<LittleEndian>(value)?;
        Ok(())
    }

    fn write_double(&mut self, code: i32, value: f64) -> Result<()> {
        self.write_code(code)?;
        self.writer.write_f64::<LittleEndian>(value)?;
        Ok(())
    }

    fn write_bool(&mut self, code: i32, value: bool) -> Result<()> {
        self.write_code(code)?;
        self.writer.write_u8(if value { 1 } else { 0 })?;
        Ok(())
    }

    fn write_handle(&mut self, code: i32, handle: Handle) -> Result<()> {
        // Handles are written as hex strings even in binary DXF
        self.write_string(code, &handle.to_hex())
    }

    fn write_binary(&mut self, code: i32, data: &[u8]) -> Result<()> {
        let len = u8::try_from(data.len())
            .map_err(|_| DxfError::Parse(format!("binary chunk of {} bytes exceeds 255", data.len())))?;
        self.write_code(code)?;
        self.writer.write_u8(len)?;
        self.writer.write_all(data)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
