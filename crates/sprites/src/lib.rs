//! Sprite management: the ordered collection of sprites on one surface,
//! their stacking, hit-testing, damage culling and label layout.
//!
//! # Invariants
//! - Draw order is the z-order: index 0 is bottom-most.
//! - A sprite appears at most once in the order; hidden sprites are removed
//!   from it, not flagged.
//! - Every mutation that changes visible extent or order requests
//!   invalidation from the host.
//! - One sprite's drawing failure never aborts a redraw pass.

mod config;
mod error;
pub mod label;
mod registry;
mod sprite;

pub use config::SpriteDefaults;
pub use error::SpriteError;
pub use label::{HorizontalAlign, LabelAttributes, LabelLayout, LabelSlot, Margins, VerticalAlign};
pub use registry::{RedrawStats, SpriteRegistry};
pub use sprite::{ImageLayer, NO_PIXEL, Sprite};

pub fn crate_info() -> &'static str {
    "spritekit-sprites v0.1.0"
}
