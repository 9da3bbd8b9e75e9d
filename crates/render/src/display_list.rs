use glam::IVec2;
use serde::Serialize;
use spritekit_common::{Rect, Rgb};

use crate::backend::{FontDescription, ImageResource, Surface, SurfaceError, TextExtent, TextMeasure};
use crate::image::PixelBuffer;

/// Fixed-advance text metrics: every character is `advance * size` wide
/// and a line is `line_height * size` tall.
///
/// Deterministic stand-in for a shaping engine; good enough to exercise
/// layout and for headless output.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonospaceMetrics {
    pub advance: f64,
    pub line_height: f64,
}

impl Default for MonospaceMetrics {
    fn default() -> Self {
        Self {
            advance: 0.6,
            line_height: 1.2,
        }
    }
}

impl TextMeasure for MonospaceMetrics {
    fn measure(&self, _font: &FontDescription, size: f64, text: &str) -> TextExtent {
        TextExtent {
            width: text.chars().count() as f64 * size * self.advance,
            height: size * self.line_height,
        }
    }
}

/// One recorded drawing call. Positions are absolute surface coordinates.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawOp {
    Image {
        origin: IVec2,
        clip: Rect,
        width: u32,
        height: u32,
    },
    Text {
        origin: IVec2,
        color: Rgb,
        family: String,
        size: f64,
        text: String,
    },
}

#[derive(Debug, Clone, Copy)]
struct GraphicsState {
    origin: IVec2,
    color: Rgb,
}

/// Headless surface that records draw calls instead of rasterizing.
///
/// Accepts [`PixelBuffer`] images only; anything else is reported as
/// [`SurfaceError::UnsupportedImage`]. Transform state is tracked so text
/// ops carry their resolved absolute origin.
#[derive(Debug, Clone)]
pub struct DisplayListSurface {
    ops: Vec<DrawOp>,
    metrics: MonospaceMetrics,
    state: GraphicsState,
    saved: Vec<GraphicsState>,
}

impl DisplayListSurface {
    pub fn new() -> Self {
        Self::with_metrics(MonospaceMetrics::default())
    }

    pub fn with_metrics(metrics: MonospaceMetrics) -> Self {
        Self {
            ops: Vec::new(),
            metrics,
            state: GraphicsState {
                origin: IVec2::ZERO,
                color: Rgb::BLACK,
            },
            saved: Vec::new(),
        }
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Drain the recorded ops, e.g. between frames.
    pub fn take_ops(&mut self) -> Vec<DrawOp> {
        std::mem::take(&mut self.ops)
    }

    /// Depth of the save stack. Zero after balanced save/restore pairs.
    pub fn save_depth(&self) -> usize {
        self.saved.len()
    }

    /// Text ops only, in draw order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            DrawOp::Image { .. } => None,
        })
    }
}

impl Default for DisplayListSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl TextMeasure for DisplayListSurface {
    fn measure(&self, font: &FontDescription, size: f64, text: &str) -> TextExtent {
        self.metrics.measure(font, size, text)
    }
}

impl Surface for DisplayListSurface {
    fn draw_image(
        &mut self,
        image: &dyn ImageResource,
        origin: IVec2,
        clip: Rect,
    ) -> Result<(), SurfaceError> {
        let Some(buffer) = image.as_any().downcast_ref::<PixelBuffer>() else {
            tracing::trace!(kind = image.kind(), "display list rejects image");
            return Err(SurfaceError::UnsupportedImage(image.kind()));
        };
        self.ops.push(DrawOp::Image {
            origin: origin.saturating_add(self.state.origin),
            clip: clip.translated(self.state.origin),
            width: buffer.width(),
            height: buffer.height(),
        });
        Ok(())
    }

    fn save(&mut self) {
        self.saved.push(self.state);
    }

    fn restore(&mut self) {
        if let Some(state) = self.saved.pop() {
            self.state = state;
        }
    }

    fn translate(&mut self, offset: IVec2) {
        self.state.origin = self.state.origin.saturating_add(offset);
    }

    fn set_source_rgb(&mut self, color: Rgb) {
        self.state.color = color;
    }

    fn show_text(&mut self, font: &FontDescription, size: f64, text: &str) {
        self.ops.push(DrawOp::Text {
            origin: self.state.origin,
            color: self.state.color,
            family: font.family.clone(),
            size,
            text: text.to_string(),
        });
    }
}

impl std::fmt::Display for DisplayListSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Display list ({} ops) ===", self.ops.len())?;
        for op in &self.ops {
            match op {
                DrawOp::Image {
                    origin,
                    clip,
                    width,
                    height,
                } => writeln!(
                    f,
                    "  image {width}x{height} at ({}, {}) clip {clip}",
                    origin.x, origin.y
                )?,
                DrawOp::Text {
                    origin,
                    color,
                    family,
                    size,
                    text,
                } => writeln!(
                    f,
                    "  text {text:?} at ({}, {}) {family} {size:.1}pt {color}",
                    origin.x, origin.y
                )?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::any::Any;

    struct Foreign;

    impl ImageResource for Foreign {
        fn width(&self) -> u32 {
            1
        }
        fn height(&self) -> u32 {
            1
        }
        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    #[test]
    fn monospace_measures_chars_not_bytes() {
        let m = MonospaceMetrics::default();
        let font = FontDescription::default();
        let ext = m.measure(&font, 10.0, "…ab");
        assert!((ext.width - 18.0).abs() < 1e-9);
        assert!((ext.height - 12.0).abs() < 1e-9);
    }

    #[test]
    fn records_pixel_buffer_images() {
        let mut surface = DisplayListSurface::new();
        let img = PixelBuffer::solid(4, 3, [0, 0, 0, 255]);
        surface
            .draw_image(&img, IVec2::new(5, 6), Rect::new(5, 6, 4, 3))
            .unwrap();
        assert_eq!(
            surface.ops(),
            &[DrawOp::Image {
                origin: IVec2::new(5, 6),
                clip: Rect::new(5, 6, 4, 3),
                width: 4,
                height: 3,
            }]
        );
    }

    #[test]
    fn rejects_foreign_images() {
        let mut surface = DisplayListSurface::new();
        let err = surface
            .draw_image(&Foreign, IVec2::ZERO, Rect::new(0, 0, 1, 1))
            .unwrap_err();
        assert!(matches!(err, SurfaceError::UnsupportedImage(kind) if kind.ends_with("Foreign")));
        assert!(surface.ops().is_empty());
    }

    #[test]
    fn text_uses_translated_origin_and_color() {
        let mut surface = DisplayListSurface::new();
        let font = FontDescription::default();
        surface.save();
        surface.translate(IVec2::new(10, 20));
        surface.set_source_rgb(Rgb::new(255, 0, 0));
        surface.show_text(&font, 12.0, "hi");
        surface.restore();
        surface.show_text(&font, 12.0, "lo");

        assert_eq!(surface.save_depth(), 0);
        match &surface.ops()[0] {
            DrawOp::Text { origin, color, .. } => {
                assert_eq!(*origin, IVec2::new(10, 20));
                assert_eq!(*color, Rgb::new(255, 0, 0));
            }
            other => panic!("unexpected op {other:?}"),
        }
        match &surface.ops()[1] {
            DrawOp::Text { origin, color, .. } => {
                assert_eq!(*origin, IVec2::ZERO);
                assert_eq!(*color, Rgb::BLACK);
            }
            other => panic!("unexpected op {other:?}"),
        }
        assert_eq!(surface.texts().collect::<Vec<_>>(), vec!["hi", "lo"]);
    }

    #[test]
    fn serializes_ops_as_tagged_json() {
        let mut surface = DisplayListSurface::new();
        surface.show_text(&FontDescription::default(), 10.0, "x");
        let json = serde_json::to_string(surface.ops()).unwrap();
        assert!(json.contains("\"op\":\"text\""));
        assert!(json.contains("\"family\":\"Sans\""));
    }

    #[test]
    fn display_dump_lists_ops() {
        let mut surface = DisplayListSurface::new();
        surface.show_text(&FontDescription::default(), 10.0, "label");
        let dump = surface.to_string();
        assert!(dump.contains("1 ops"));
        assert!(dump.contains("\"label\""));
    }
}
