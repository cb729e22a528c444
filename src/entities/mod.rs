//! Drawing entity types and traits
//!
//! Only the entity kinds this crate interprets are modelled; every other
//! record stays in the document as raw pairs.

use crate::document::EntityRecord;
use crate::error::Result;
use crate::io::dxf::{DxfCodePair, DxfPairBuffer, EntityWriter};
use crate::types::{Color, DxfVersion, Handle};

pub mod arc;
pub mod circle;

pub use arc::Arc;
pub use circle::Circle;

/// Base trait for typed entities
pub trait Entity {
    /// Common entity data
    fn common(&self) -> &EntityCommon;

    /// Mutable common entity data
    fn common_mut(&mut self) -> &mut EntityCommon;

    /// Get the entity type name as written in group code 0
    fn entity_type(&self) -> &'static str;

    /// Get the entity's unique handle
    fn handle(&self) -> Handle {
        self.common().handle
    }

    /// Get the entity's layer name
    fn layer(&self) -> &str {
        &self.common().layer
    }

    /// Get the entity's color
    fn color(&self) -> Color {
        self.common().color
    }

    /// Set the entity's color
    fn set_color(&mut self, color: Color) {
        self.common_mut().color = color;
    }
}

/// Data shared by all entities
#[derive(Debug, Clone, PartialEq)]
pub struct EntityCommon {
    /// Unique handle (code 5), null when the drawing does not use handles
    pub handle: Handle,
    /// Owning block record (code 330)
    pub owner: Handle,
    /// Layer name
    pub layer: String,
    /// Color
    pub color: Color,
    /// Entity lives in paper space (code 67 = 1)
    pub paper_space: bool,
}

impl EntityCommon {
    /// Create new common entity data with defaults
    pub fn new() -> Self {
        EntityCommon {
            handle: Handle::NULL,
            owner: Handle::NULL,
            layer: "0".to_string(),
            color: Color::ByLayer,
            paper_space: false,
        }
    }
}

impl Default for EntityCommon {
    fn default() -> Self {
        Self::new()
    }
}

/// Typed entity
#[derive(Debug, Clone, PartialEq)]
pub enum EntityType {
    /// Circle entity
    Circle(Circle),
    /// Arc entity
    Arc(Arc),
}

impl EntityType {
    /// Interpret a raw record; `None` for kinds that are not modelled
    pub fn from_record(record: &EntityRecord<'_>) -> Result<Option<EntityType>> {
        crate::io::dxf::read_entity(record)
    }

    /// Get a reference to the entity trait object
    pub fn as_entity(&self) -> &dyn Entity {
        match self {
            EntityType::Circle(e) => e,
            EntityType::Arc(e) => e,
        }
    }

    /// Get a mutable reference to the entity trait object
    pub fn as_entity_mut(&mut self) -> &mut dyn Entity {
        match self {
            EntityType::Circle(e) => e,
            EntityType::Arc(e) => e,
        }
    }

    /// Common entity data
    pub fn common(&self) -> &EntityCommon {
        self.as_entity().common()
    }

    /// Serialize the entity as the pairs of a record in the given version
    pub fn to_pairs(&self, version: DxfVersion) -> Result<Vec<DxfCodePair>> {
        let mut buffer = DxfPairBuffer::new();
        EntityWriter::new(&mut buffer, version).write_entity(self)?;
        Ok(buffer.into_pairs())
    }
}

impl From<Circle> for EntityType {
    fn from(circle: Circle) -> Self {
        EntityType::Circle(circle)
    }
}

impl From<Arc> for EntityType {
    fn from(arc: Arc) -> Self {
        EntityType::Arc(arc)
    }
}
