//! DXF stream writer trait and common helpers

use crate::error::{DxfError, Result};
use crate::io::dxf::{DxfCodePair, GroupCodeValueType};
use crate::types::{Color, Handle, Vector3};

/// Trait for writing DXF code/value pairs
pub trait DxfStreamWriter {
    /// Write a code/value pair with a string value
    fn write_string(&mut self, code: i32, value: &str) -> Result<()>;

    /// Write a code/value pair with an i16 value
    fn write_i16(&mut self, code: i32, value: i16) -> Result<()>;

    /// Write a code/value pair with an i32 value
    fn write_i32(&mut self, code: i32, value: i32) -> Result<()>;

    /// Write a code/value pair with an i64 value
    fn write_i64(&mut self, code: i32, value: i64) -> Result<()>;

    /// Write a code/value pair with a double value
    fn write_double(&mut self, code: i32, value: f64) -> Result<()>;

    /// Write a code/value pair with a boolean value
    fn write_bool(&mut self, code: i32, value: bool) -> Result<()>;

    /// Write a code/value pair with a handle value
    fn write_handle(&mut self, code: i32, handle: Handle) -> Result<()>;

    /// Write binary data
    fn write_binary(&mut self, code: i32, data: &[u8]) -> Result<()>;

    /// Flush the writer
    fn flush(&mut self) -> Result<()>;

    /// Write a pair read from a document, typed by its group code.
    fn write_pair(&mut self, pair: &DxfCodePair) -> Result<()> {
        let code = pair.code;
        let text = pair.value_string.trim();
        let bad_value = || {
            DxfError::Parse(format!(
                "value '{}' of group code {} does not match its type {:?}",
                pair.value_string, code, pair.value_type
            ))
        };

        match pair.value_type {
            GroupCodeValueType::String => self.write_string(code, &pair.value_string),
            GroupCodeValueType::Handle => self.write_string(code, text),
            GroupCodeValueType::Double => {
                self.write_double(code, text.parse().map_err(|_| bad_value())?)
            }
            GroupCodeValueType::Int16 | GroupCodeValueType::Byte => {
                self.write_i16(code, text.parse().map_err(|_| bad_value())?)
            }
            GroupCodeValueType::Int32 => self.write_i32(code, text.parse().map_err(|_| bad_value())?),
            GroupCodeValueType::Int64 => self.write_i64(code, text.parse().map_err(|_| bad_value())?),
            GroupCodeValueType::Bool => {
                let value: i64 = text.parse().map_err(|_| bad_value())?;
                self.write_bool(code, value != 0)
            }
            GroupCodeValueType::Binary => {
                let data = decode_hex(text).ok_or_else(bad_value)?;
                self.write_binary(code, &data)
            }
        }
    }
}

/// Extension trait for convenient writing operations
pub trait DxfStreamWriterExt: DxfStreamWriter {
    /// Write a 3D point (codes 10/20/30 or similar)
    fn write_point3d(&mut self, x_code: i32, point: Vector3) -> Result<()> {
        self.write_double(x_code, point.x)?;
        self.write_double(x_code + 10, point.y)?;
        self.write_double(x_code + 20, point.z)?;
        Ok(())
    }

    /// Write a color index
    fn write_color(&mut self, code: i32, color: Color) -> Result<()> {
        self.write_i16(code, color.index())
    }

    /// Write an entity type pair
    fn write_entity_type(&mut self, entity_type: &str) -> Result<()> {
        self.write_string(0, entity_type)
    }

    /// Write a subclass marker
    fn write_subclass(&mut self, marker: &str) -> Result<()> {
        self.write_string(100, marker)
    }

    /// Write section start
    fn write_section_start(&mut self, section_name: &str) -> Result<()> {
        self.write_string(0, "SECTION")?;
        self.write_string(2, section_name)?;
        Ok(())
    }

    /// Write section end
    fn write_section_end(&mut self) -> Result<()> {
        self.write_string(0, "ENDSEC")
    }

    /// Write end of file
    fn write_eof(&mut self) -> Result<()> {
        self.write_string(0, "EOF")
    }
}

// Auto-implement the extension trait for all stream writers
impl<T: DxfStreamWriter + ?Sized> DxfStreamWriterExt for T {}

/// Decode the hex text of a binary chunk
fn decode_hex(text: &str) -> Option<Vec<u8>> {
    if text.len() % 2 != 0 {
        return None;
    }
    (0..text.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(text.get(i..i + 2)?, 16).ok())
        .collect()
}
