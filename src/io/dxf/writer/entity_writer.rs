//! Serialization of typed entities into DXF pairs

use super::stream_writer::{DxfStreamWriter, DxfStreamWriterExt};
use crate::entities::{Arc, Circle, Entity, EntityType};
use crate::error::Result;
use crate::types::{Color, DxfVersion, Vector3};

/// Writes CIRCLE and ARC entities in the layout of a given DXF version
///
/// R13 and later get subclass markers and owner handles; R12 output is the
/// flat group code list of that release.
pub struct EntityWriter<'a, W: DxfStreamWriter + ?Sized> {
    writer: &'a mut W,
    version: DxfVersion,
}

impl<'a, W: DxfStreamWriter + ?Sized> EntityWriter<'a, W> {
    /// Create a new entity writer
    pub fn new(writer: &'a mut W, version: DxfVersion) -> Self {
        Self { writer, version }
    }

    /// Write one entity, starting with its group code 0 pair
    pub fn write_entity(&mut self, entity: &EntityType) -> Result<()> {
        match entity {
            EntityType::Circle(circle) => self.write_circle(circle),
            EntityType::Arc(arc) => self.write_arc(arc),
        }
    }

    fn write_common_entity_data(&mut self, entity: &dyn Entity) -> Result<()> {
        let common = entity.common();
        if !common.handle.is_null() {
            self.writer.write_handle(5, common.handle)?;
        }

        if self.version.has_subclass_markers() {
            if !common.owner.is_null() {
                self.writer.write_handle(330, common.owner)?;
            }
            self.writer.write_subclass("AcDbEntity")?;
        }

        if common.paper_space {
            self.writer.write_i16(67, 1)?;
        }
        self.writer.write_string(8, &common.layer)?;

        // Write color only if not ByLayer (default)
        if common.color != Color::ByLayer {
            self.writer.write_color(62, common.color)?;
        }

        Ok(())
    }

    /// Write the circle geometry shared by CIRCLE and ARC
    fn write_circle_geometry(
        &mut self,
        center: Vector3,
        radius: f64,
        thickness: f64,
        normal: Vector3,
    ) -> Result<()> {
        if self.version.has_subclass_markers() {
            self.writer.write_subclass("AcDbCircle")?;
        }
        if thickness != 0.0 {
            self.writer.write_double(39, thickness)?;
        }
        self.writer.write_point3d(10, center)?;
        self.writer.write_double(40, radius)?;
        if normal != Vector3::UNIT_Z {
            self.writer.write_point3d(210, normal)?;
        }
        Ok(())
    }

    /// Write CIRCLE entity
    fn write_circle(&mut self, circle: &Circle) -> Result<()> {
        self.writer.write_entity_type("CIRCLE")?;
        self.write_common_entity_data(circle)?;
        self.write_circle_geometry(circle.center, circle.radius, circle.thickness, circle.normal)
    }

    /// Write ARC entity
    fn write_arc(&mut self, arc: &Arc) -> Result<()> {
        self.writer.write_entity_type("ARC")?;
        self.write_common_entity_data(arc)?;
        self.write_circle_geometry(arc.center, arc.radius, arc.thickness, arc.normal)?;
        if self.version.has_subclass_markers() {
            self.writer.write_subclass("AcDbArc")?;
        }
        self.writer.write_double(50, arc.start_angle)?;
        self.writer.write_double(51, arc.end_angle)?;
        Ok(())
    }
}
