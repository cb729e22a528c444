//! `$DWGCODEPAGE` to text encoding mapping.
//!
//! Files written before AutoCAD 2007 (AC1021) store text in the code page
//! named by the header; newer files are always UTF-8 and never consult this
//! table.

use encoding_rs::Encoding;

/// Look up the `encoding_rs` encoding for a DXF code page name.
///
/// Returns `None` for UTF-8/ASCII code pages where no transcoding is needed.
/// Unrecognized names fall back to Windows-1252, the most common DXF code page.
pub fn encoding_from_code_page(code_page: &str) -> Option<&'static Encoding> {
    match code_page.trim().to_ascii_lowercase().as_str() {
        "gb2312" | "ansi_936" => Some(encoding_rs::GBK),
        "big5" | "ansi_950" => Some(encoding_rs::BIG5),
        "korean" | "ansi_949" | "johab" => Some(encoding_rs::EUC_KR),
        "ansi_932" => Some(encoding_rs::SHIFT_JIS),

        "dos437" | "dos850" | "dos860" | "dos861" | "dos863" | "dos865" => {
            Some(encoding_rs::WINDOWS_1252)
        }
        "dos852" => Some(encoding_rs::WINDOWS_1250),
        "dos855" | "dos866" => Some(encoding_rs::IBM866),
        "dos857" => Some(encoding_rs::WINDOWS_1254),
        "dos869" => Some(encoding_rs::WINDOWS_1253),

        "ansi_874" => Some(encoding_rs::WINDOWS_874),
        "ansi_1250" => Some(encoding_rs::WINDOWS_1250),
        "ansi_1251" => Some(encoding_rs::WINDOWS_1251),
        "ansi_1252" => Some(encoding_rs::WINDOWS_1252),
        "ansi_1253" => Some(encoding_rs::WINDOWS_1253),
        "ansi_1254" => Some(encoding_rs::WINDOWS_1254),
        "ansi_1255" => Some(encoding_rs::WINDOWS_1255),
        "ansi_1256" => Some(encoding_rs::WINDOWS_1256),
        "ansi_1257" => Some(encoding_rs::WINDOWS_1257),
        "ansi_1258" => Some(encoding_rs::WINDOWS_1258),

        "iso8859-1" | "iso_8859-1" | "iso8859-9" | "iso_8859-9" => Some(encoding_rs::WINDOWS_1252),
        "iso8859-2" | "iso_8859-2" => Some(encoding_rs::ISO_8859_2),
        "iso8859-5" | "iso_8859-5" => Some(encoding_rs::ISO_8859_5),
        "iso8859-7" | "iso_8859-7" => Some(encoding_rs::ISO_8859_7),
        "iso8859-15" | "iso_8859-15" => Some(encoding_rs::ISO_8859_15),

        "koi8-r" => Some(encoding_rs::KOI8_R),
        "koi8-u" => Some(encoding_rs::KOI8_U),

        "ascii" | "utf-8" | "utf8" | "unicode" => None,

        _ => Some(encoding_rs::WINDOWS_1252),
    }
}
