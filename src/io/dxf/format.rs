//! Physical layout of a DXF file
//!
//! Recorded while reading so that a document is written back in the same
//! layout it was loaded from.

use encoding_rs::Encoding;

/// Line terminator of an ASCII DXF file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
    #[default]
    Lf,
    CrLf,
}

impl LineEnding {
    pub fn as_bytes(&self) -> &'static [u8] {
        match self {
            LineEnding::Lf => b"\n",
            LineEnding::CrLf => b"\r\n",
        }
    }
}

/// Non-UTF-8 text encoding in effect for an ASCII or binary file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextEncoding {
    /// UTF-8, the only encoding of AC1021 and later
    #[default]
    Utf8,
    /// Byte-to-char mapping used when a pre-2007 file names no code page
    Latin1,
    /// Code page named by `$DWGCODEPAGE`
    CodePage(&'static Encoding),
}

impl TextEncoding {
    /// Decode raw string bytes.
    ///
    /// Single-byte encodings decode with the recorded encoding only, so that
    /// [`encode`](Self::encode) gives back the original bytes. Invalid UTF-8
    /// falls back to Latin-1.
    pub fn decode(&self, bytes: &[u8]) -> String {
        match self {
            TextEncoding::Utf8 => match std::str::from_utf8(bytes) {
                Ok(s) => s.to_string(),
                Err(_) => latin1(bytes),
            },
            TextEncoding::Latin1 => latin1(bytes),
            TextEncoding::CodePage(enc) => enc.decode_without_bom_handling(bytes).0.into_owned(),
        }
    }

    /// Encode a string for output; `None` if a character has no representation
    pub fn encode(&self, value: &str) -> Option<Vec<u8>> {
        match self {
            TextEncoding::Utf8 => Some(value.as_bytes().to_vec()),
            TextEncoding::Latin1 => value
                .chars()
                .map(|c| u8::try_from(u32::from(c)).ok())
                .collect(),
            TextEncoding::CodePage(enc) => {
                let (bytes, _, had_errors) = enc.encode(value);
                if had_errors {
                    None
                } else {
                    Some(bytes.into_owned())
                }
            }
        }
    }
}

fn latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| b as char).collect()
}

/// Layout details of a DXF file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DxfFormat {
    /// Binary DXF (sentinel `AutoCAD Binary DXF`)
    pub binary: bool,
    /// Binary group codes stored in one byte (R12 binary files)
    pub short_codes: bool,
    /// Line terminator of ASCII files
    pub line_ending: LineEnding,
    /// ASCII file started with a UTF-8 byte order mark
    pub byte_order_mark: bool,
    /// Encoding applied to string values
    pub encoding: TextEncoding,
}
