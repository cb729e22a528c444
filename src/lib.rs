//! # dxf-offset
//!
//! Reads a DXF drawing, computes a radially offset copy of every model
//! space CIRCLE and ARC (`radius + distance`) and writes the copies, drawn
//! in red, into a new DXF file next to the untouched source content.
//!
//! ## Features
//!
//! - Lossless reading and writing of ASCII and binary DXF (R12 through 2018+)
//! - Code page aware text handling for pre-2007 drawings
//! - Handle allocation and model space ownership for appended entities
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use dxf_offset::offset::{scan_offsets, write_offsets};
//!
//! let scan = scan_offsets("part.dxf", 5.0)?;
//! println!("{}", scan.summary);
//! write_offsets("part.dxf", &scan.records, "part_offset.dxf")?;
//! # Ok::<(), dxf_offset::DxfError>(())
//! ```
//!
//! ## Architecture
//!
//! - [`io::dxf`] - group code/value streams, readers and writers
//! - [`CadDocument`] - the drawing as its sections, with entity construction
//! - [`entities`] - typed CIRCLE and ARC
//! - [`offset`] - the scanner and the writer

#![allow(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod document;
pub mod entities;
pub mod error;
pub mod io;
pub mod notification;
pub mod offset;
pub mod types;

// Re-export commonly used types
pub use document::{CadDocument, DxfSection, EntityRecord};
pub use error::{DxfError, Result};
pub use types::{Color, DxfVersion, Handle, Vector3};

pub use entities::{Arc, Circle, Entity, EntityType};
pub use notification::{Notification, NotificationCollection, NotificationType};
pub use offset::{
    add_offset_to_dxf, process_dxf, OffsetOptions, OffsetRecord, OffsetScan, OffsetSummary,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
