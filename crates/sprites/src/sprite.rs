use std::rc::Rc;

use glam::{IVec2, Vec2};
use spritekit_common::{Rect, Rgb, SpriteId};
use spritekit_render::{FontDescription, ImageResource, Surface, TextMeasure};

use crate::config::SpriteDefaults;
use crate::label::{self, LabelAttributes, LabelSlot, Margins};

/// Returned by [`Sprite::get_pixel`] when there is nothing to read.
pub const NO_PIXEL: [i32; 4] = [-1, -1, -1, -1];

/// One image layer: a shared image reference placed at an offset inside
/// the sprite. Slots created by growing the layer list start empty.
#[derive(Clone, Default)]
pub struct ImageLayer {
    pub image: Option<Rc<dyn ImageResource>>,
    pub offset: IVec2,
}

impl std::fmt::Debug for ImageLayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut s = f.debug_struct("ImageLayer");
        match &self.image {
            Some(img) => s
                .field("kind", &img.kind())
                .field("size", &(img.width(), img.height())),
            None => s.field("image", &"empty"),
        };
        s.field("offset", &self.offset).finish()
    }
}

/// A positioned, layered visual unit made of image layers and text labels.
///
/// Sprites live inside a [`crate::SpriteRegistry`]. Changes that move the
/// sprite, change its order or its label go through the registry so the
/// host is told what to repaint; the setters here do not invalidate.
#[derive(Debug, Clone)]
pub struct Sprite {
    id: SpriteId,
    rect: Rect,
    initial_position: Vec2,
    layer: i32,
    images: Vec<ImageLayer>,
    labels: Vec<LabelSlot>,
    /// Settings slot 0 gets when the first label slot is created.
    label_template: LabelSlot,
    margins: Margins,
    font: FontDescription,
}

impl Sprite {
    pub(crate) fn new(position: Vec2, image: Rc<dyn ImageResource>, defaults: &SpriteDefaults) -> Self {
        let origin = position.as_ivec2();
        let mut sprite = Self {
            id: SpriteId::new(),
            rect: Rect::new(origin.x, origin.y, 0, 0),
            initial_position: position,
            layer: defaults.layer,
            images: Vec::new(),
            labels: Vec::new(),
            label_template: LabelSlot {
                text: None,
                attributes: defaults.label.clone(),
                color: defaults.label_color,
            },
            margins: Margins::default(),
            font: defaults.font.clone(),
        };
        sprite.set_image(image, 0, IVec2::ZERO);
        sprite
    }

    pub fn id(&self) -> SpriteId {
        self.id
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn position(&self) -> IVec2 {
        self.rect.origin()
    }

    pub fn dimensions(&self) -> IVec2 {
        self.rect.size()
    }

    /// Position the sprite was created at, before truncation.
    pub fn initial_position(&self) -> Vec2 {
        self.initial_position
    }

    pub fn layer(&self) -> i32 {
        self.layer
    }

    pub fn margins(&self) -> Margins {
        self.margins
    }

    pub fn font(&self) -> &FontDescription {
        &self.font
    }

    pub fn labels(&self) -> &[LabelSlot] {
        &self.labels
    }

    pub fn label(&self, slot: usize) -> Option<&str> {
        self.labels.get(slot)?.text.as_deref()
    }

    pub fn image_count(&self) -> usize {
        self.images.len()
    }

    pub fn image(&self, slot: usize) -> Option<&ImageLayer> {
        self.images.get(slot)
    }

    /// Install `image` in `slot` at `offset`, growing the layer list with
    /// empty slots as needed.
    ///
    /// Slot 0 is the base shape and resets the sprite size to the image
    /// size plus offset. Other slots can only grow it.
    pub fn set_image(&mut self, image: Rc<dyn ImageResource>, slot: usize, offset: IVec2) {
        if self.images.len() <= slot {
            self.images.resize_with(slot + 1, ImageLayer::default);
        }
        let width = extent(image.width()).saturating_add(offset.x);
        let height = extent(image.height()).saturating_add(offset.y);
        self.images[slot] = ImageLayer {
            image: Some(image),
            offset,
        };
        if slot == 0 {
            self.rect.width = width;
            self.rect.height = height;
        } else {
            self.rect.width = self.rect.width.max(width);
            self.rect.height = self.rect.height.max(height);
        }
    }

    pub fn set_margins(&mut self, margins: Margins) {
        self.margins = margins;
    }

    pub fn set_font(&mut self, font: FontDescription) {
        self.font = font;
    }

    pub fn set_label_attributes(&mut self, attributes: LabelAttributes, slot: usize) {
        self.extend_labels(slot);
        self.labels[slot].attributes = attributes;
    }

    pub fn set_label_color(&mut self, color: Rgb, slot: usize) {
        self.extend_labels(slot);
        self.labels[slot].color = color;
    }

    pub(crate) fn set_label_text(&mut self, text: &str, slot: usize) {
        self.extend_labels(slot);
        self.labels[slot].text = Some(label::sanitize(text));
    }

    pub(crate) fn set_position(&mut self, position: IVec2) {
        self.rect.x = position.x;
        self.rect.y = position.y;
    }

    pub(crate) fn set_layer_value(&mut self, layer: i32) {
        self.layer = layer;
    }

    /// New slots copy slot 0's current settings (or the creation defaults
    /// when there is no slot 0 yet).
    fn extend_labels(&mut self, slot: usize) {
        while self.labels.len() <= slot {
            let template = self.labels.first().unwrap_or(&self.label_template);
            let next = LabelSlot::inheriting(template);
            self.labels.push(next);
        }
    }

    /// Edge-inclusive containment test.
    pub fn hit(&self, point: IVec2) -> bool {
        self.rect.contains(point)
    }

    /// Width of the label-safe box, clamped at zero.
    pub fn label_safe_width(&self) -> i32 {
        self.margins.safe_box(self.rect).width
    }

    /// Height of the label-safe box, clamped at zero.
    pub fn label_safe_height(&self) -> i32 {
        self.margins.safe_box(self.rect).height
    }

    /// Top-left of the label-safe box relative to the sprite origin.
    pub fn label_left_top(&self) -> IVec2 {
        IVec2::new(self.margins.left, self.margins.top)
    }

    /// Widest label at its configured size, without fitting. Zero when
    /// there are no labels.
    pub fn label_width<M: TextMeasure + ?Sized>(&self, measure: &M) -> f64 {
        self.labels
            .iter()
            .filter_map(|slot| {
                let text = slot.text.as_deref()?;
                Some(measure.measure(&self.font, slot.attributes.scale, text).width)
            })
            .fold(0.0, f64::max)
    }

    /// Read the pixel of image `slot` under the surface point `point`.
    pub fn pixel(&self, point: IVec2, slot: usize) -> Option<[u8; 4]> {
        let layer = self.images.get(slot)?;
        let image = layer.image.as_ref()?;
        let local = point
            .saturating_sub(self.rect.origin())
            .saturating_sub(layer.offset);
        let x = u32::try_from(local.x).ok()?;
        let y = u32::try_from(local.y).ok()?;
        image.pixel(x, y)
    }

    /// Diagnostic pixel read: `[r, g, b, a]`, or [`NO_PIXEL`] when the
    /// point is outside the image or the image has no readable buffer.
    pub fn get_pixel(&self, point: IVec2, slot: usize) -> [i32; 4] {
        match self.pixel(point, slot) {
            Some(px) => px.map(i32::from),
            None => NO_PIXEL,
        }
    }

    /// Draw image layers in slot order, then labels. Layers the surface
    /// rejects are skipped; returns how many were skipped.
    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) -> usize {
        let mut skipped = 0;
        for (slot, layer) in self.images.iter().enumerate() {
            let Some(image) = &layer.image else {
                tracing::debug!(sprite = %self.id, slot, "empty image slot");
                continue;
            };
            let origin = self.rect.origin().saturating_add(layer.offset);
            let clip = Rect::from_origin_size(origin, self.rect.size());
            if let Err(err) = surface.draw_image(&**image, origin, clip) {
                tracing::warn!(sprite = %self.id, slot, %err, "image layer skipped");
                skipped += 1;
            }
        }
        if !self.labels.is_empty() {
            self.draw_labels(surface);
        }
        skipped
    }

    fn draw_labels<S: Surface + ?Sized>(&self, surface: &mut S) {
        for slot in &self.labels {
            let Some(text) = slot.text.as_deref() else {
                continue;
            };
            let layout = label::layout_label(&*surface, &self.font, slot, text, self.rect, self.margins);
            tracing::trace!(
                sprite = %self.id,
                text = %layout.fitted.text,
                size = layout.fitted.size,
                x = layout.origin.x,
                y = layout.origin.y,
                "label"
            );
            surface.save();
            surface.translate(layout.origin);
            surface.set_source_rgb(layout.color);
            surface.show_text(&self.font, layout.fitted.size, &layout.fitted.text);
            surface.restore();
        }
    }
}

fn extent(pixels: u32) -> i32 {
    i32::try_from(pixels).unwrap_or(i32::MAX)
}
