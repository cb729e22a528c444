//! DXF binary reader

use super::stream_reader::{format_double, DxfCodePair, DxfStreamReader};
use crate::error::{DxfError, Result};
use crate::io::dxf::format::{DxfFormat, TextEncoding};
use crate::io::dxf::GroupCodeValueType;
use byteorder::{LittleEndian, ReadBytesExt};
use std::io::{self, BufRead, BufReader, Read, Seek, SeekFrom};

/// Binary DXF sentinel
pub(crate) const BINARY_DXF_SENTINEL: &[u8] = b"AutoCAD Binary DXF\r\n\x1a\x00";

/// DXF binary file reader
///
/// Accepts both the R13+ layout (16-bit group codes) and the R12 layout
/// (8-bit group codes, 255 escaping a following 16-bit code).
pub struct DxfBinaryReader<R: Read + Seek> {
    reader: BufReader<R>,
    peeked_pair: Option<DxfCodePair>,
    encoding: TextEncoding,
    short_codes: bool,
}

impl<R: Read + Seek> DxfBinaryReader<R> {
    /// Create a new binary reader; the stream must start with the sentinel
    pub fn new(mut reader: BufReader<R>) -> Result<Self> {
        let short_codes = Self::read_sentinel(&mut reader)?;
        Ok(Self {
            reader,
            peeked_pair: None,
            encoding: TextEncoding::Utf8,
            short_codes,
        })
    }

    /// Consume the sentinel and detect the group code width.
    ///
    /// Every file starts with `0/SECTION`: a 16-bit code puts a second zero
    /// byte before the `S`, an 8-bit code does not.
    fn read_sentinel(reader: &mut BufReader<R>) -> Result<bool> {
        let mut sentinel = [0u8; 22];
        reader.read_exact(&mut sentinel)?;
        if sentinel != BINARY_DXF_SENTINEL {
            return Err(DxfError::InvalidFormat("missing binary DXF sentinel".to_string()));
        }
        let head = reader.fill_buf()?;
        Ok(head.len() >= 2 && head[0] == 0 && head[1] != 0)
    }

    fn read_code(&mut self) -> io::Result<i32> {
        if self.short_codes {
            let code = self.reader.read_u8()?;
            if code == 255 {
                return Ok(self.reader.read_i16::<LittleEndian>()? as i32);
            }
            Ok(code as i32)
        } else {
            Ok(self.reader.read_i16::<LittleEndian>()? as i32)
        }
    }

    fn read_null_string(&mut self) -> Result<String> {
        let mut bytes = Vec::new();
        self.reader.read_until(0, &mut bytes)?;
        if bytes.pop() != Some(0) {
            return Err(DxfError::Parse("unterminated string in binary DXF".to_string()));
        }
        Ok(self.encoding.decode(&bytes))
    }

    fn read_value(&mut self, value_type: GroupCodeValueType) -> Result<String> {
        let value = match value_type {
            GroupCodeValueType::String | GroupCodeValueType::Handle => self.read_null_string()?,
            GroupCodeValueType::Double => format_double(self.reader.read_f64::<LittleEndian>()?),
            GroupCodeValueType::Int16 | GroupCodeValueType::Byte => {
                self.reader.read_i16::<LittleEndian>()?.to_string()
            }
            GroupCodeValueType::Int32 => self.reader.read_i32::<LittleEndian>()?.to_string(),
            GroupCodeValueType::Int64 => self.reader.read_i64::<LittleEndian>()?.to_string(),
            GroupCodeValueType::Bool => self.reader.read_u8()?.to_string(),
            GroupCodeValueType::Binary => {
                let len = self.reader.read_u8()? as usize;
                let mut data = vec![0u8; len];
                self.reader.read_exact(&mut data)?;
                data.iter().map(|b| format!("{:02X}", b)).collect()
            }
        };
        Ok(value)
    }

    fn read_pair_internal(&mut self) -> Result<Option<DxfCodePair>> {
        let code = match self.read_code() {
            Ok(code) => code,
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let value_type = GroupCodeValueType::from_code(code);
        let value = self.read_value(value_type).map_err(|e| match e {
            DxfError::Io(io_err) if io_err.kind() == io::ErrorKind::UnexpectedEof => {
                DxfError::Parse(format!("Unexpected EOF after code {}", code))
            }
            other => other,
        })?;

        Ok(Some(DxfCodePair::new(code, value)))
    }
}

impl<R: Read + Seek> DxfStreamReader for DxfBinaryReader<R> {
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
        self.reader.seek(SeekFrom::Start(BINARY_DXF_SENTINEL.len() as u64))?;
        self.peeked_pair = None;
        Ok(())
    }

    fn set_encoding(&mut self, encoding: TextEncoding) {
        self.encoding = encoding;
    }

    fn format(&self) -> DxfFormat {
        DxfFormat {
            binary: true,
            short_codes: self.short_codes,
            encoding: self.encoding,
            ..DxfFormat::default()
        }
    }
}
