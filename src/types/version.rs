//! Drawing file versions as reported by `$ACADVER`

use std::fmt;

/// DXF file version
///
/// Ordered from oldest to newest; `Unknown` (no `$ACADVER` in the header)
/// sorts before every known release and is treated like an R12 file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum DxfVersion {
    /// Header carries no usable `$ACADVER`
    #[default]
    Unknown,
    /// AutoCAD R12 (and the older AC1006/AC1004 layouts)
    AC1009,
    /// AutoCAD R13
    AC1012,
    /// AutoCAD R14
    AC1014,
    /// AutoCAD 2000
    AC1015,
    /// AutoCAD 2004
    AC1018,
    /// AutoCAD 2007
    AC1021,
    /// AutoCAD 2010
    AC1024,
    /// AutoCAD 2013
    AC1027,
    /// AutoCAD 2018
    AC1032,
}

impl DxfVersion {
    /// Parse the `$ACADVER` value
    pub fn from_version_string(value: &str) -> Self {
        match value.trim().to_ascii_uppercase().as_str() {
            "AC1004" | "AC1006" | "AC1009" => DxfVersion::AC1009,
            "AC1012" => DxfVersion::AC1012,
            "AC1014" => DxfVersion::AC1014,
            "AC1015" => DxfVersion::AC1015,
            "AC1018" => DxfVersion::AC1018,
            "AC1021" => DxfVersion::AC1021,
            "AC1024" => DxfVersion::AC1024,
            "AC1027" => DxfVersion::AC1027,
            "AC1032" => DxfVersion::AC1032,
            _ => DxfVersion::Unknown,
        }
    }

    /// The `$ACADVER` string for this version
    pub fn to_dxf_string(&self) -> &'static str {
        match self {
            DxfVersion::Unknown => "",
            DxfVersion::AC1009 => "AC1009",
            DxfVersion::AC1012 => "AC1012",
            DxfVersion::AC1014 => "AC1014",
            DxfVersion::AC1015 => "AC1015",
            DxfVersion::AC1018 => "AC1018",
            DxfVersion::AC1021 => "AC1021",
            DxfVersion::AC1024 => "AC1024",
            DxfVersion::AC1027 => "AC1027",
            DxfVersion::AC1032 => "AC1032",
        }
    }

    /// Whether entities carry handles, owners and subclass markers
    pub fn has_subclass_markers(&self) -> bool {
        *self >= DxfVersion::AC1012
    }

    /// Whether text is always UTF-8 regardless of `$DWGCODEPAGE`
    pub fn is_unicode(&self) -> bool {
        *self >= DxfVersion::AC1021
    }
}

impl fmt::Display for DxfVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DxfVersion::Unknown => write!(f, "Unknown"),
            v => write!(f, "{}", v.to_dxf_string()),
        }
    }
}
