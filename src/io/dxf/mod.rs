//! DXF (Drawing Exchange Format) reading and writing

mod code_page;
mod format;
mod group_code_value;
mod reader;
mod writer;

pub use code_page::encoding_from_code_page;
pub use format::{DxfFormat, LineEnding, TextEncoding};
pub use group_code_value::GroupCodeValueType;
pub use reader::{
    format_double, read_entity, DxfBinaryReader, DxfCodePair, DxfReader, DxfReaderConfiguration,
    DxfStreamReader, DxfTextReader,
};
pub use writer::{
    DxfBinaryWriter, DxfPairBuffer, DxfStreamWriter, DxfStreamWriterExt, DxfTextWriter,
    DxfWriter, EntityWriter,
};
