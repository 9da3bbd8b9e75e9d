//! Common value types shared by every spritekit crate.
//!
//! # Invariants
//! - All geometry is integer, in surface pixel units.
//! - Types here are plain values: `Copy` where possible, comparable in tests.

mod color;
mod geometry;
mod types;

pub use color::{ColorParseError, Rgb};
pub use geometry::Rect;
pub use glam::IVec2;
pub use types::SpriteId;

pub fn crate_info() -> &'static str {
    "spritekit-common v0.1.0"
}
