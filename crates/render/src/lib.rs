//! Rendering Adapter: the capabilities the sprite core draws through.
//!
//! # Invariants
//! - The sprite core never rasterizes; it only issues calls on a [`Surface`].
//! - Images and fonts are referenced by the core, never copied.
//!
//! # Workaround
//! Ships a display-list surface and monospace text metrics in place of a real
//! raster/text backend. The traits are stable; a cairo or vello backend can
//! implement them without changing the sprite crate.

mod backend;
mod damage;
mod display_list;
mod image;

pub use backend::{
    FontDescription, ImageResource, InvalidationSink, Surface, SurfaceError, TextExtent,
    TextMeasure,
};
pub use damage::{DamageAccumulator, DamageLog};
pub use display_list::{DisplayListSurface, DrawOp, MonospaceMetrics};
pub use image::{PixelBuffer, PixelBufferError};

pub fn crate_info() -> &'static str {
    "spritekit-render v0.1.0"
}
