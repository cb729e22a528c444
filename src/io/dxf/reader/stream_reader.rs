//! DXF stream reader trait and the code/value pair type

use crate::error::Result;
use crate::io::dxf::format::{DxfFormat, TextEncoding};
use crate::io::dxf::GroupCodeValueType;
use crate::types::Handle;

/// A DXF code/value pair
///
/// The value is kept as text exactly as it was read (binary values are
/// rendered to their shortest round-trip text form), so pairs that are not
/// interpreted are written back unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct DxfCodePair {
    /// The DXF group code
    pub code: i32,

    /// The value type implied by the code
    pub value_type: GroupCodeValueType,

    /// String representation of the value
    pub value_string: String,
}

impl DxfCodePair {
    /// Create a new code/value pair
    pub fn new(code: i32, value_string: impl Into<String>) -> Self {
        Self {
            code,
            value_type: GroupCodeValueType::from_code(code),
            value_string: value_string.into(),
        }
    }

    /// Create a pair holding a floating-point value
    pub fn from_double(code: i32, value: f64) -> Self {
        Self::new(code, format_double(value))
    }

    /// Create a pair holding an integer value
    pub fn from_int(code: i32, value: i64) -> Self {
        Self::new(code, value.to_string())
    }

    /// Create a pair holding a handle
    pub fn from_handle(code: i32, handle: Handle) -> Self {
        Self::new(code, handle.to_hex())
    }

    /// Whether this pair has the given code and (trimmed) string value
    pub fn is(&self, code: i32, value: &str) -> bool {
        self.code == code && self.value_string.trim() == value
    }

    /// Get value as integer
    pub fn as_int(&self) -> Option<i64> {
        self.value_string.trim().parse::<i64>().ok()
    }

    /// Get value as i16
    pub fn as_i16(&self) -> Option<i16> {
        self.as_int().and_then(|v| i16::try_from(v).ok())
    }

    /// Get value as double
    pub fn as_double(&self) -> Option<f64> {
        self.value_string.trim().parse::<f64>().ok()
    }

    /// Get value as handle (hex string)
    pub fn as_handle(&self) -> Option<Handle> {
        Handle::from_hex(&self.value_string)
    }
}

/// Format a double in its shortest text form that parses back to the same
/// value, always keeping at least one decimal place.
pub fn format_double(value: f64) -> String {
    let text = value.to_string();
    if value.is_finite() && !text.contains('.') {
        format!("{}.0", text)
    } else {
        text
    }
}

/// Trait for reading DXF code/value pairs from a stream
pub trait DxfStreamReader {
    /// Read the next code/value pair, `None` at end of stream
    fn read_pair(&mut self) -> Result<Option<DxfCodePair>>;

    /// Push a pair back to be read again on next read_pair call
    fn push_back(&mut self, pair: DxfCodePair);

    /// Reset the reader to the beginning
    fn reset(&mut self) -> Result<()>;

    /// Set the encoding used for string values that are not UTF-8
    fn set_encoding(&mut self, encoding: TextEncoding);

    /// Layout details observed so far
    fn format(&self) -> DxfFormat;
}
