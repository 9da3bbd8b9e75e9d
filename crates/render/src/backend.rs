use std::any::Any;

use glam::IVec2;
use serde::{Deserialize, Serialize};
use spritekit_common::{Rect, Rgb};

/// Errors a surface reports back to the drawing code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SurfaceError {
    #[error("surface cannot draw image of type {0}")]
    UnsupportedImage(&'static str),
}

/// A drawable, measurable image resource (a decoded bitmap, a native
/// surface, ...). Loading and decoding are the caller's business.
pub trait ImageResource: Any {
    fn width(&self) -> u32;

    fn height(&self) -> u32;

    /// Raw RGBA8 pixels, row-major with a stride of `width * 4`, if the
    /// resource keeps a CPU-side copy.
    fn pixels(&self) -> Option<&[u8]> {
        None
    }

    /// Read back one pixel as `[r, g, b, a]`. `None` outside the image or
    /// when no pixel buffer is available.
    fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        let offset = (y as usize * self.width() as usize + x as usize) * 4;
        let px = self.pixels()?.get(offset..offset + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Concrete type name, used in diagnostics when a surface rejects it.
    fn kind(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Lets a backend downcast to the image types it knows how to draw.
    fn as_any(&self) -> &dyn Any;
}

/// Font family plus style. The point size is chosen per draw call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontDescription {
    pub family: String,
    #[serde(default)]
    pub bold: bool,
    #[serde(default)]
    pub italic: bool,
}

impl FontDescription {
    pub fn new(family: impl Into<String>) -> Self {
        Self {
            family: family.into(),
            bold: false,
            italic: false,
        }
    }
}

impl Default for FontDescription {
    fn default() -> Self {
        Self::new("Sans")
    }
}

/// Measured size of a laid-out string, in surface units.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TextExtent {
    pub width: f64,
    pub height: f64,
}

/// Text-layout engine: measures shaped text for a font at a point size.
pub trait TextMeasure {
    fn measure(&self, font: &FontDescription, size: f64, text: &str) -> TextExtent;
}

/// A drawing target. Calls occur on the thread that owns the surface.
pub trait Surface: TextMeasure {
    /// Draw `image` with its top-left at `origin`, clipped to `clip`.
    fn draw_image(
        &mut self,
        image: &dyn ImageResource,
        origin: IVec2,
        clip: Rect,
    ) -> Result<(), SurfaceError>;

    /// Push the current transform and source color.
    fn save(&mut self);

    /// Pop back to the last [`Surface::save`].
    fn restore(&mut self);

    fn translate(&mut self, offset: IVec2);

    fn set_source_rgb(&mut self, color: Rgb);

    /// Render text at the current origin with the current source color.
    fn show_text(&mut self, font: &FontDescription, size: f64, text: &str);
}

/// Host widget hook: receives "repaint this rectangle" requests.
///
/// Requests are fire-and-forget. Coalescing and scheduling the actual
/// repaint is up to the host.
pub trait InvalidationSink {
    fn invalidate(&mut self, rect: Rect);
}

impl InvalidationSink for () {
    fn invalidate(&mut self, _rect: Rect) {}
}

impl<T: InvalidationSink + ?Sized> InvalidationSink for &mut T {
    fn invalidate(&mut self, rect: Rect) {
        (**self).invalidate(rect);
    }
}
