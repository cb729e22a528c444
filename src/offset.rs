//! Radial offsetting of circles and arcs
//!
//! The work is split in two phases that only share a list of
//! [`OffsetRecord`]s:
//!
//! 1. the scanner ([`scan_offsets`], [`process_dxf`]) reads a drawing and
//!    computes `radius + distance` for every model space CIRCLE and ARC,
//!    keeping only the results with a positive radius;
//! 2. the writer ([`write_offsets`], [`add_offset_to_dxf`]) re-reads the
//!    source drawing, appends one entity per record and saves the result.
//!
//! ```rust,ignore
//! use dxf_offset::offset::{add_offset_to_dxf, process_dxf};
//!
//! if let Some(records) = process_dxf("part.dxf", 5.0) {
//!     add_offset_to_dxf("part.dxf", &records, "part_offset.dxf");
//! }
//! ```

use crate::document::CadDocument;
use crate::entities::{Arc, Circle, EntityType};
use crate::error::{DxfError, Result};
use crate::io::dxf::{DxfReader, DxfReaderConfiguration};
use crate::types::{Color, Handle, Vector3};
use log::{debug, error, info, warn};
use std::fmt;
use std::path::Path;

/// An offset entity waiting to be written
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OffsetRecord {
    Circle {
        center: Vector3,
        radius: f64,
    },
    /// Angles in degrees, copied from the source arc
    Arc {
        center: Vector3,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
    },
}

impl OffsetRecord {
    /// Center point of the circle or arc
    pub fn center(&self) -> Vector3 {
        match *self {
            OffsetRecord::Circle { center, .. } | OffsetRecord::Arc { center, .. } => center,
        }
    }

    /// Offset radius
    pub fn radius(&self) -> f64 {
        match *self {
            OffsetRecord::Circle { radius, .. } | OffsetRecord::Arc { radius, .. } => radius,
        }
    }

    /// DXF entity name of the record
    pub fn entity_type(&self) -> &'static str {
        match self {
            OffsetRecord::Circle { .. } => "CIRCLE",
            OffsetRecord::Arc { .. } => "ARC",
        }
    }

    /// Build the entity to append: default layer and styling, given color.
    ///
    /// Fails for a radius that is not a positive finite number or a
    /// non-finite center or angle.
    pub fn to_entity(&self, color: Color) -> Result<EntityType> {
        let center = self.center();
        let radius = self.radius();
        let invalid = |reason: String| DxfError::InvalidEntity {
            entity: self.entity_type(),
            reason,
        };

        if !(radius.is_finite() && radius > 0.0) {
            return Err(invalid(format!("radius {} is not positive", radius)));
        }
        if !(center.x.is_finite() && center.y.is_finite() && center.z.is_finite()) {
            return Err(invalid(format!("center {} is not finite", center)));
        }

        let mut entity: EntityType = match *self {
            OffsetRecord::Circle { .. } => Circle::from_center_radius(center, radius).into(),
            OffsetRecord::Arc {
                start_angle,
                end_angle,
                ..
            } => {
                if !(start_angle.is_finite() && end_angle.is_finite()) {
                    return Err(invalid(format!(
                        "angles {} / {} are not finite",
                        start_angle, end_angle
                    )));
                }
                Arc::from_center_radius_angles(center, radius, start_angle, end_angle).into()
            }
        };
        entity.as_entity_mut().set_color(color);
        Ok(entity)
    }
}

/// Options shared by the scanner and the writer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OffsetOptions {
    /// Color of the generated entities
    pub color: Color,
    /// Recover from structural damage and skip unreadable circles and arcs
    pub failsafe: bool,
}

impl Default for OffsetOptions {
    fn default() -> Self {
        Self {
            color: Color::RED,
            failsafe: false,
        }
    }
}

/// Counters of one scan
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OffsetSummary {
    /// Model space circles seen
    pub circles: usize,
    /// Model space arcs seen
    pub arcs: usize,
    /// Records produced
    pub emitted: usize,
    /// Entities whose offset radius was not positive
    pub dropped: usize,
    /// Unreadable entities passed over in failsafe mode
    pub skipped: usize,
}

impl fmt::Display for OffsetSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} circle(s), {} arc(s): {} offset, {} dropped",
            self.circles, self.arcs, self.emitted, self.dropped
        )?;
        if self.skipped > 0 {
            write!(f, ", {} skipped", self.skipped)?;
        }
        Ok(())
    }
}

/// Result of a scan: the records in file order and the counters
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OffsetScan {
    pub records: Vec<OffsetRecord>,
    pub summary: OffsetSummary,
}

/// Compute the offset records of a loaded document
pub fn offset_document(
    document: &CadDocument,
    distance: f64,
    options: &OffsetOptions,
) -> Result<OffsetScan> {
    let mut scan = OffsetScan::default();

    for record in document.model_space() {
        let entity = match EntityType::from_record(&record) {
            Ok(Some(entity)) => entity,
            Ok(None) => continue,
            Err(err) if options.failsafe => {
                warn!("skipping {} entity: {}", record.entity_type(), err);
                scan.summary.skipped += 1;
                continue;
            }
            Err(err) => return Err(err),
        };

        let offset = match &entity {
            EntityType::Circle(circle) => {
                scan.summary.circles += 1;
                debug!(
                    "Processing CIRCLE entity {:X}: center {}, radius {}",
                    circle.common.handle, circle.center, circle.radius
                );
                OffsetRecord::Circle {
                    center: circle.center,
                    radius: circle.radius + distance,
                }
            }
            EntityType::Arc(arc) => {
                scan.summary.arcs += 1;
                debug!(
                    "Processing ARC entity {:X}: center {}, radius {}, angles {} -> {}",
                    arc.common.handle, arc.center, arc.radius, arc.start_angle, arc.end_angle
                );
                OffsetRecord::Arc {
                    center: arc.center,
                    radius: arc.radius + distance,
                    start_angle: arc.start_angle,
                    end_angle: arc.end_angle,
                }
            }
        };

        // NaN fails the comparison and is dropped as well
        if offset.radius() > 0.0 {
            scan.records.push(offset);
            scan.summary.emitted += 1;
        } else {
            debug!(
                "dropping {}: offset radius {} is not positive",
                offset.entity_type(),
                offset.radius()
            );
            scan.summary.dropped += 1;
        }
    }

    Ok(scan)
}

/// Append one entity per record to model space, returning the new handles
/// (null handles for drawings without handles).
pub fn append_offsets(
    document: &mut CadDocument,
    records: &[OffsetRecord],
    color: Color,
) -> Result<Vec<Handle>> {
    let mut handles = Vec::with_capacity(records.len());
    for record in records {
        let entity = record.to_entity(color)?;
        let handle = document.add_entity(entity)?;
        debug!(
            "added {} {:X}: center {}, radius {}",
            record.entity_type(),
            handle,
            record.center(),
            record.radius()
        );
        handles.push(handle);
    }
    Ok(handles)
}

fn read_document(path: &Path, options: &OffsetOptions) -> Result<CadDocument> {
    DxfReader::from_file(path)?
        .with_configuration(DxfReaderConfiguration {
            failsafe: options.failsafe,
        })
        .read()
}

/// Scan a drawing file with default options
pub fn scan_offsets<P: AsRef<Path>>(path: P, distance: f64) -> Result<OffsetScan> {
    scan_offsets_with(path, distance, &OffsetOptions::default())
}

/// Scan a drawing file
pub fn scan_offsets_with<P: AsRef<Path>>(
    path: P,
    distance: f64,
    options: &OffsetOptions,
) -> Result<OffsetScan> {
    let path = path.as_ref();
    info!("Starting DXF processing: {}", path.display());

    let document = read_document(path, options)?;
    debug!("read {} drawing ({:?})", document.version, document.format);
    let scan = offset_document(&document, distance, options)?;

    info!("DXF processing completed: {}", scan.summary);
    Ok(scan)
}

/// Write the records into a copy of `source` saved at `output`, with default
/// options
pub fn write_offsets<P: AsRef<Path>, Q: AsRef<Path>>(
    source: P,
    records: &[OffsetRecord],
    output: Q,
) -> Result<()> {
    write_offsets_with(source, records, output, &OffsetOptions::default())
}

/// Write the records into a copy of `source` saved at `output`.
///
/// `output` may name `source`; the document is fully read before saving.
pub fn write_offsets_with<P: AsRef<Path>, Q: AsRef<Path>>(
    source: P,
    records: &[OffsetRecord],
    output: Q,
    options: &OffsetOptions,
) -> Result<()> {
    let (source, output) = (source.as_ref(), output.as_ref());

    let mut document = read_document(source, options)?;
    let handles = append_offsets(&mut document, records, options.color)?;
    document.save(output)?;

    info!(
        "Offset DXF saved as {} ({} entities added)",
        output.display(),
        handles.len()
    );
    Ok(())
}

/// Scanner entry point: the offset records of `path`, or `None` when the
/// drawing cannot be opened or parsed.
pub fn process_dxf<P: AsRef<Path>>(path: P, distance: f64) -> Option<Vec<OffsetRecord>> {
    match scan_offsets(path, distance) {
        Ok(scan) => Some(scan.records),
        Err(err) => {
            error!("Error processing DXF: {}", err);
            None
        }
    }
}

/// Writer entry point: `true` when the output file was written.
pub fn add_offset_to_dxf<P: AsRef<Path>, Q: AsRef<Path>>(
    source: P,
    records: &[OffsetRecord],
    output: Q,
) -> bool {
    match write_offsets(source, records, output) {
        Ok(()) => true,
        Err(err) => {
            error!("Error saving DXF: {}", err);
            false
        }
    }
}
