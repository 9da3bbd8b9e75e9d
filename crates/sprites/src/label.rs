//! Label layout: fitting a string into a sprite's label-safe box and
//! resolving where it is drawn.

use glam::IVec2;
use serde::{Deserialize, Serialize};
use spritekit_common::{Rect, Rgb};
use spritekit_render::{FontDescription, TextExtent, TextMeasure};

/// Prefix marking a head-truncated label.
pub const ELLIPSIS: char = '…';

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HorizontalAlign {
    Left,
    #[default]
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerticalAlign {
    Top,
    #[default]
    Middle,
    Bottom,
}

/// Inset from the sprite rectangle to the area labels may occupy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Margins {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Margins {
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// The label-safe box of `rect`; width and height clamp at zero.
    pub fn safe_box(&self, rect: Rect) -> Rect {
        rect.shrink(self.left, self.top, self.right, self.bottom)
    }
}

/// Per-slot layout settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelAttributes {
    /// Point size the label is laid out at before any fitting.
    pub scale: f64,
    /// Shrink the font to fit instead of truncating the text.
    pub rescale: bool,
    pub horizontal: HorizontalAlign,
    pub vertical: VerticalAlign,
    /// Offset from the sprite's left edge; overrides `horizontal`.
    pub x_pos: Option<i32>,
    /// Offset from the sprite's top edge; overrides `vertical`.
    pub y_pos: Option<i32>,
}

impl Default for LabelAttributes {
    fn default() -> Self {
        Self {
            scale: 12.0,
            rescale: true,
            horizontal: HorizontalAlign::Center,
            vertical: VerticalAlign::Middle,
            x_pos: None,
            y_pos: None,
        }
    }
}

/// One label slot on a sprite: optional text plus its own layout and color.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelSlot {
    pub text: Option<String>,
    pub attributes: LabelAttributes,
    pub color: Rgb,
}

impl LabelSlot {
    /// An empty slot carrying another slot's settings.
    pub fn inheriting(template: &LabelSlot) -> Self {
        Self {
            text: None,
            attributes: template.attributes.clone(),
            color: template.color,
        }
    }
}

/// Text after fitting, with the size it will be drawn at.
#[derive(Debug, Clone, PartialEq)]
pub struct FittedText {
    pub text: String,
    pub size: f64,
    pub extent: TextExtent,
    pub truncated: bool,
    pub rescaled: bool,
}

/// A fully resolved label, ready to hand to a surface.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelLayout {
    pub fitted: FittedText,
    pub origin: IVec2,
    pub color: Rgb,
}

/// Replace NUL characters, which text backends choke on, with spaces.
pub fn sanitize(text: &str) -> String {
    text.replace('\0', " ")
}

/// Fit `text` into `max_width`.
///
/// With `rescale`, the size is scaled by `max_width / width` and measured
/// once more; some overflow from rounding may remain. Without it, leading
/// characters are dropped one at a time behind an [`ELLIPSIS`] until the
/// text fits or a single character is left.
pub fn fit_text<M: TextMeasure + ?Sized>(
    measure: &M,
    font: &FontDescription,
    attributes: &LabelAttributes,
    text: &str,
    max_width: f64,
) -> FittedText {
    let size = attributes.scale;
    let extent = measure.measure(font, size, text);
    let mut fitted = FittedText {
        text: text.to_string(),
        size,
        extent,
        truncated: false,
        rescaled: false,
    };
    if extent.width <= max_width {
        return fitted;
    }

    if attributes.rescale {
        fitted.size = size * max_width / extent.width;
        fitted.extent = measure.measure(font, fitted.size, text);
        fitted.rescaled = true;
        return fitted;
    }

    let chars: Vec<char> = text.chars().collect();
    let mut keep = chars.len().saturating_sub(1);
    while fitted.extent.width > max_width && keep > 0 {
        fitted.text = std::iter::once(ELLIPSIS)
            .chain(chars[chars.len() - keep..].iter().copied())
            .collect();
        fitted.extent = measure.measure(font, size, &fitted.text);
        fitted.truncated = true;
        keep -= 1;
    }
    fitted
}

/// Lay out one label inside `rect` minus `margins`.
pub fn layout_label<M: TextMeasure + ?Sized>(
    measure: &M,
    font: &FontDescription,
    slot: &LabelSlot,
    text: &str,
    rect: Rect,
    margins: Margins,
) -> LabelLayout {
    let safe = margins.safe_box(rect);
    let attrs = &slot.attributes;
    let fitted = fit_text(measure, font, attrs, text, safe.width as f64);
    let TextExtent { width, height } = fitted.extent;

    let x = match (attrs.x_pos, attrs.horizontal) {
        (Some(x_pos), _) => rect.x.saturating_add(x_pos),
        (None, HorizontalAlign::Center) => (safe.x as f64 + (safe.width as f64 - width) / 2.0) as i32,
        (None, HorizontalAlign::Left) => safe.x,
        (None, HorizontalAlign::Right) => (rect.right() as f64 - width - margins.right as f64) as i32,
    };
    let y = match (attrs.y_pos, attrs.vertical) {
        (Some(y_pos), _) => rect.y.saturating_add(y_pos),
        (None, VerticalAlign::Middle) => (safe.y as f64 + (safe.height as f64 - height) / 2.0) as i32,
        (None, VerticalAlign::Top) => safe.y,
        (None, VerticalAlign::Bottom) => (rect.bottom() as f64 - height - margins.bottom as f64) as i32,
    };

    LabelLayout {
        fitted,
        origin: IVec2::new(x, y),
        color: slot.color,
    }
}
