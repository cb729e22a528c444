//! Typed reading of CIRCLE and ARC records

use super::stream_reader::DxfCodePair;
use crate::document::EntityRecord;
use crate::entities::{Arc, Circle, EntityCommon, EntityType};
use crate::error::{DxfError, Result};
use crate::types::{Color, Vector3};

/// Read a model space record into a typed entity.
///
/// Returns `Ok(None)` for every record type other than CIRCLE and ARC.
/// Missing values keep the entity defaults; values that are present but not
/// numeric are an error.
pub fn read_entity(record: &EntityRecord<'_>) -> Result<Option<EntityType>> {
    match record.entity_type() {
        "CIRCLE" => read_circle(record.pairs()).map(|c| Some(EntityType::Circle(c))),
        "ARC" => read_arc(record.pairs()).map(|a| Some(EntityType::Arc(a))),
        _ => Ok(None),
    }
}

/// Read a CIRCLE entity
fn read_circle(pairs: &[DxfCodePair]) -> Result<Circle> {
    const NAME: &str = "CIRCLE";
    let mut circle = Circle::new();
    let mut center = PointReader::new(10);
    let mut normal = PointReader::new(210);

    for pair in entity_pairs(pairs) {
        if read_common(&mut circle.common, pair, NAME)? {
            continue;
        }
        match pair.code {
            10 | 20 | 30 => center.add_coordinate(pair, NAME)?,
            210 | 220 | 230 => normal.add_coordinate(pair, NAME)?,
            40 => circle.radius = double(pair, NAME, "radius")?,
            39 => circle.thickness = double(pair, NAME, "thickness")?,
            _ => {}
        }
    }

    circle.center = center.get_point(circle.center);
    circle.normal = normal.get_point(circle.normal);
    Ok(circle)
}

/// Read an ARC entity
fn read_arc(pairs: &[DxfCodePair]) -> Result<Arc> {
    const NAME: &str = "ARC";
    let mut arc = Arc::new();
    let mut center = PointReader::new(10);
    let mut normal = PointReader::new(210);

    for pair in entity_pairs(pairs) {
        if read_common(&mut arc.common, pair, NAME)? {
            continue;
        }
        match pair.code {
            10 | 20 | 30 => center.add_coordinate(pair, NAME)?,
            210 | 220 | 230 => normal.add_coordinate(pair, NAME)?,
            40 => arc.radius = double(pair, NAME, "radius")?,
            50 => arc.start_angle = double(pair, NAME, "start angle")?,
            51 => arc.end_angle = double(pair, NAME, "end angle")?,
            39 => arc.thickness = double(pair, NAME, "thickness")?,
            _ => {}
        }
    }

    arc.center = center.get_point(arc.center);
    arc.normal = normal.get_point(arc.normal);
    Ok(arc)
}

/// Pairs of a record that describe the entity itself: the leading type pair
/// and any `102 {...}` application groups (reactors, extension dictionary)
/// are skipped.
fn entity_pairs(pairs: &[DxfCodePair]) -> impl Iterator<Item = &DxfCodePair> {
    let mut in_group = false;
    pairs.iter().skip(1).filter(move |pair| {
        if pair.code == 102 {
            in_group = pair.value_string.trim_start().starts_with('{');
            return false;
        }
        !in_group
    })
}

/// Common entity data; returns `true` if the pair was consumed.
fn read_common(common: &mut EntityCommon, pair: &DxfCodePair, entity: &'static str) -> Result<bool> {
    match pair.code {
        5 => common.handle = pair.as_handle().unwrap_or_default(),
        330 => {
            if common.owner.is_null() {
                common.owner = pair.as_handle().unwrap_or_default();
            }
        }
        8 => common.layer = pair.value_string.trim().to_string(),
        62 => {
            let index = pair.as_i16().ok_or_else(|| invalid(entity, "color", pair))?;
            common.color = Color::from_index(index);
        }
        67 => common.paper_space = pair.as_int() == Some(1),
        _ => return Ok(false),
    }
    Ok(true)
}

fn double(pair: &DxfCodePair, entity: &'static str, field: &str) -> Result<f64> {
    pair.as_double().ok_or_else(|| invalid(entity, field, pair))
}

fn invalid(entity: &'static str, field: &str, pair: &DxfCodePair) -> DxfError {
    DxfError::InvalidEntity {
        entity,
        reason: format!(
            "{} '{}' (group code {}) is not a number",
            field, pair.value_string, pair.code
        ),
    }
}

/// Collects a point from its X/Y/Z group codes (`base`, `base + 10`, `base + 20`)
struct PointReader {
    base: i32,
    x: Option<f64>,
    y: Option<f64>,
    z: Option<f64>,
}

impl PointReader {
    fn new(base: i32) -> Self {
        Self {
            base,
            x: None,
            y: None,
            z: None,
        }
    }

    fn add_coordinate(&mut self, pair: &DxfCodePair, entity: &'static str) -> Result<()> {
        let value = double(pair, entity, "coordinate")?;
        match pair.code - self.base {
            0 => self.x = Some(value),
            10 => self.y = Some(value),
            20 => self.z = Some(value),
            _ => {}
        }
        Ok(())
    }

    /// The collected point; missing axes come from `default`
    fn get_point(&self, default: Vector3) -> Vector3 {
        Vector3::new(
            self.x.unwrap_or(default.x),
            self.y.unwrap_or(default.y),
            self.z.unwrap_or(default.z),
        )
    }
}
