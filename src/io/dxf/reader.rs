//! DXF file reader

mod binary_reader;
mod entity_reader;
mod stream_reader;
mod text_reader;

pub use binary_reader::DxfBinaryReader;
pub use entity_reader::read_entity;
pub use stream_reader::{format_double, DxfCodePair, DxfStreamReader};
pub use text_reader::DxfTextReader;

use binary_reader::BINARY_DXF_SENTINEL;

use crate::document::{CadDocument, DxfSection};
use crate::error::{DxfError, Result};
use crate::io::dxf::code_page::encoding_from_code_page;
use crate::io::dxf::format::TextEncoding;
use crate::notification::NotificationType;
use crate::types::DxfVersion;
use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::path::Path;

/// Configuration for the DXF reader.
#[derive(Debug, Clone, Default)]
pub struct DxfReaderConfiguration {
    /// When `true`, structural problems (a section without ENDSEC, stray
    /// pairs between sections) are reported as notifications and the
    /// content read so far is kept instead of aborting the read.
    ///
    /// Default: `false` (strict mode — errors propagate).
    pub failsafe: bool,
}

/// DXF file reader
pub struct DxfReader {
    reader: Box<dyn DxfStreamReader>,
    version: DxfVersion,
    config: DxfReaderConfiguration,
}

impl DxfReader {
    /// Create a new DXF reader from any seekable reader
    pub fn from_reader<R: Read + Seek + 'static>(reader: R) -> Result<Self> {
        let mut buf_reader = BufReader::new(reader);

        let reader: Box<dyn DxfStreamReader> = if Self::is_binary(&mut buf_reader)? {
            Box::new(DxfBinaryReader::new(buf_reader)?)
        } else {
            Box::new(DxfTextReader::new(buf_reader)?)
        };

        Ok(Self {
            reader,
            version: DxfVersion::Unknown,
            config: DxfReaderConfiguration::default(),
        })
    }

    /// Create a new DXF reader from a file path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    /// Check if a stream contains binary DXF data
    fn is_binary<R: Read + Seek>(reader: &mut R) -> Result<bool> {
        let mut buffer = vec![0u8; BINARY_DXF_SENTINEL.len()];
        let mut filled = 0;
        while filled < buffer.len() {
            let n = reader.read(&mut buffer[filled..])?;
            if n == 0 {
                break;
            }
            filled += n;
        }

        reader.seek(SeekFrom::Start(0))?;

        Ok(filled == buffer.len() && buffer == BINARY_DXF_SENTINEL)
    }

    /// Set the reader configuration.
    pub fn with_configuration(mut self, config: DxfReaderConfiguration) -> Self {
        self.config = config;
        self
    }

    /// Read the whole stream into a document
    pub fn read(mut self) -> Result<CadDocument> {
        self.read_version()?;

        let mut document = CadDocument::empty(self.version);
        let failsafe = self.config.failsafe;
        let mut saw_eof = false;

        while let Some(pair) = self.reader.read_pair()? {
            if pair.is(0, "SECTION") {
                let name = match self.reader.read_pair()? {
                    Some(name_pair) if name_pair.code == 2 => name_pair.value_string.trim().to_string(),
                    Some(other) => {
                        return Err(DxfError::InvalidFormat(format!(
                            "expected section name, found group code {}",
                            other.code
                        )))
                    }
                    None => {
                        return Err(DxfError::InvalidFormat(
                            "unexpected end of file after SECTION".to_string(),
                        ))
                    }
                };

                let (pairs, terminated) = self.read_section_body()?;
                if !terminated {
                    let message = format!("section {} is not terminated by ENDSEC", name);
                    if !failsafe {
                        return Err(DxfError::InvalidFormat(message));
                    }
                    document.notifications.notify(NotificationType::Error, message);
                }
                document.push_section(DxfSection::new(name, pairs));
            } else if pair.is(0, "EOF") {
                saw_eof = true;
                break;
            } else if pair.code == 999 {
                document.push_comment(pair);
            } else {
                let message = format!(
                    "unexpected group code {} ('{}') outside of a section",
                    pair.code, pair.value_string
                );
                if !failsafe {
                    return Err(DxfError::InvalidFormat(message));
                }
                document.notifications.notify(NotificationType::Warning, message);
            }
        }

        if document.sections().next().is_none() {
            return Err(DxfError::InvalidFormat("no sections found".to_string()));
        }
        if !saw_eof {
            document
                .notifications
                .notify(NotificationType::Warning, "missing EOF marker");
        }

        document.format = self.reader.format();
        Ok(document)
    }

    /// Read pairs up to ENDSEC; the flag is `false` when the stream ended first.
    fn read_section_body(&mut self) -> Result<(Vec<DxfCodePair>, bool)> {
        let mut pairs = Vec::new();
        while let Some(pair) = self.reader.read_pair()? {
            if pair.is(0, "ENDSEC") {
                return Ok((pairs, true));
            }
            if pair.is(0, "EOF") {
                self.reader.push_back(pair);
                return Ok((pairs, false));
            }
            pairs.push(pair);
        }
        Ok((pairs, false))
    }

    /// Pre-scan the HEADER section for $ACADVER and $DWGCODEPAGE.
    ///
    /// After this call the reader is reset to the beginning, `self.version`
    /// is populated and the string encoding is configured: UTF-8 from AC1021
    /// on, otherwise the code page named by the header (Latin-1 if none).
    fn read_version(&mut self) -> Result<()> {
        let mut code_page: Option<String> = None;

        while let Some(pair) = self.reader.read_pair()? {
            if !pair.is(0, "SECTION") {
                continue;
            }
            match self.reader.read_pair()? {
                Some(section_pair) if section_pair.is(2, "HEADER") => {}
                _ => continue,
            }

            while let Some(header_pair) = self.reader.read_pair()? {
                if header_pair.code == 0 {
                    break;
                }
                if header_pair.code != 9 {
                    continue;
                }
                match header_pair.value_string.trim() {
                    "$ACADVER" => {
                        if let Some(vp) = self.reader.read_pair()? {
                            if vp.code == 1 {
                                self.version = DxfVersion::from_version_string(&vp.value_string);
                            }
                        }
                    }
                    "$DWGCODEPAGE" => {
                        if let Some(cp) = self.reader.read_pair()? {
                            if cp.code == 3 {
                                code_page = Some(cp.value_string.trim().to_string());
                            }
                        }
                    }
                    _ => {}
                }
            }
            break;
        }

        let encoding = if self.version.is_unicode() {
            TextEncoding::Utf8
        } else {
            match code_page {
                Some(cp) => encoding_from_code_page(&cp)
                    .map(TextEncoding::CodePage)
                    .unwrap_or(TextEncoding::Utf8),
                None => TextEncoding::Latin1,
            }
        };
        self.reader.set_encoding(encoding);

        self.reader.reset()?;
        Ok(())
    }
}
