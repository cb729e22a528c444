//! In-memory stream writer
//!
//! Collects written values as [`DxfCodePair`]s so newly built entities can
//! be spliced into a document's sections.

use super::stream_writer::DxfStreamWriter;
use crate::error::Result;
use crate::io::dxf::DxfCodePair;
use crate::types::Handle;

/// Stream writer that buffers pairs instead of serializing them
#[derive(Debug, Default)]
pub struct DxfPairBuffer {
    pairs: Vec<DxfCodePair>,
}

impl DxfPairBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// The pairs written so far
    pub fn pairs(&self) -> &[DxfCodePair] {
        &self.pairs
    }

    pub fn into_pairs(self) -> Vec<DxfCodePair> {
        self.pairs
    }
}

impl DxfStreamWriter for DxfPairBuffer {
    fn write_string(&mut self, code: i32, value: &str) -> Result<()> {
        self.pairs.push(DxfCodePair::new(code, value));
        Ok(())
    }

    fn write_i16(&mut self, code: i32, value: i16) -> Result<()> {
        self.pairs.push(DxfCodePair::from_int(code, value.into()));
        Ok(())
    }

    fn write_i32(&mut self, code: i32, value: i32) -> Result<()> {
        self.pairs.push(DxfCodePair::from_int(code, value.into()));
        Ok(())
    }

    fn write_i64(&mut self, code: i32, value: i64) -> Result<()> {
        self.pairs.push(DxfCodePair::from_int(code, value));
        Ok(())
    }

    fn write_double(&mut self, code: i32, value: f64) -> Result<()> {
        self.pairs.push(DxfCodePair::from_double(code, value));
        Ok(())
    }

    fn write_bool(&mut self, code: i32, value: bool) -> Result<()> {
        self.pairs.push(DxfCodePair::from_int(code, i64::from(value)));
        Ok(())
    }

    fn write_handle(&mut self, code: i32, handle: Handle) -> Result<()> {
        self.pairs.push(DxfCodePair::from_handle(code, handle));
        Ok(())
    }

    fn write_binary(&mut self, code: i32, data: &[u8]) -> Result<()> {
        let hex: String = data.iter().map(|b| format!("{:02X}", b)).collect();
        self.pairs.push(DxfCodePair::new(code, hex));
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn write_pair(&mut self, pair: &DxfCodePair) -> Result<()> {
        self.pairs.push(pair.clone());
        Ok(())
    }
}
