//! Value types of DXF group codes
//!
//! The group code alone determines how its value is stored: ASCII files
//! always hold text, binary files hold a fixed-width little-endian value
//! (or a null-terminated string) whose layout is given by this type.

/// Storage type of the value that follows a group code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupCodeValueType {
    /// Text value
    String,
    /// Hexadecimal object handle (stored as text in both formats)
    Handle,
    /// 64-bit float (coordinates, distances, angles)
    Double,
    /// 16-bit integer
    Int16,
    /// 32-bit integer
    Int32,
    /// 64-bit integer
    Int64,
    /// 8-bit value in the 280-289 range, stored as 16 bits in binary files
    Byte,
    /// Boolean flag, one byte in binary files
    Bool,
    /// Binary chunk, hex text in ASCII files
    Binary,
}

impl GroupCodeValueType {
    /// Determine the value type for a group code
    pub fn from_code(code: i32) -> Self {
        use GroupCodeValueType::*;

        match code {
            5 | 105 => Handle,
            0..=9 => String,
            10..=59 => Double,
            60..=79 => Int16,
            90..=99 => Int32,
            100..=102 => String,
            110..=149 => Double,
            160..=169 => Int64,
            170..=179 => Int16,
            210..=239 => Double,
            270..=279 => Int16,
            280..=289 => Byte,
            290..=299 => Bool,
            300..=309 => String,
            310..=319 => Binary,
            320..=369 => Handle,
            370..=389 => Int16,
            390..=399 => Handle,
            400..=409 => Int16,
            410..=419 => String,
            420..=429 => Int32,
            430..=439 => String,
            440..=459 => Int32,
            460..=469 => Double,
            470..=479 => String,
            480..=481 => Handle,
            999 => String,
            1004 => Binary,
            1005 => Handle,
            1000..=1009 => String,
            1010..=1059 => Double,
            1060..=1070 => Int16,
            1071 => Int32,
            _ => String,
        }
    }
}
