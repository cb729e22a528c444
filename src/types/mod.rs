//! Basic value types shared by the document, entity and I/O layers

mod color;
mod handle;
mod vector;
mod version;

pub use color::Color;
pub use handle::Handle;
pub use vector::Vector3;
pub use version::DxfVersion;
