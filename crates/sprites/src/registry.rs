use std::collections::BTreeMap;
use std::rc::Rc;

use glam::{IVec2, Vec2};
use spritekit_common::{Rect, SpriteId};
use spritekit_render::{ImageResource, InvalidationSink, Surface};

use crate::config::SpriteDefaults;
use crate::error::SpriteError;
use crate::sprite::Sprite;

/// Per-pass statistics returned by [`SpriteRegistry::redraw`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RedrawStats {
    /// Sprites whose draw was invoked.
    pub drawn: usize,
    /// Sprites skipped because they miss the damage rectangle.
    pub culled: usize,
    /// Image layers the surface could not draw.
    pub skipped_layers: usize,
    /// The pass did not run because no surface was bound.
    pub surface_missing: bool,
}

/// The sprites composited onto one surface, and their stacking order.
///
/// The registry owns every sprite it creates. `order` is the z-order:
/// index 0 is drawn first (bottom-most). A hidden sprite keeps its state
/// but is absent from `order`, so it is neither drawn nor hit-tested.
/// Sprites are addressed by [`SpriteId`]; operations that must tell the
/// host what to repaint are methods here rather than on [`Sprite`].
///
/// Single-threaded: mutate only from the thread that owns the surface.
/// `redraw` borrows the registry mutably, so the order cannot change
/// mid-pass.
pub struct SpriteRegistry<S, H> {
    sprites: BTreeMap<SpriteId, Sprite>,
    order: Vec<SpriteId>,
    surface: Option<S>,
    host: H,
    defaults: SpriteDefaults,
}

impl<S: Surface, H: InvalidationSink> SpriteRegistry<S, H> {
    /// Create an empty registry reporting invalidations to `host`.
    pub fn new(host: H) -> Self {
        Self::with_defaults(host, SpriteDefaults::default())
    }

    pub fn with_defaults(host: H, defaults: SpriteDefaults) -> Self {
        Self {
            sprites: BTreeMap::new(),
            order: Vec::new(),
            surface: None,
            host,
            defaults,
        }
    }

    pub fn defaults(&self) -> &SpriteDefaults {
        &self.defaults
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Replace the active rendering target. Surfaces may be transient, so
    /// this can be called any number of times.
    pub fn bind_surface(&mut self, surface: S) {
        self.surface = Some(surface);
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    pub fn surface_mut(&mut self) -> Option<&mut S> {
        self.surface.as_mut()
    }

    /// Unbind and return the current surface.
    pub fn take_surface(&mut self) -> Option<S> {
        self.surface.take()
    }

    /// Create a sprite at `position` (truncated to whole pixels) with
    /// `image` as its base layer and append it on top of the order.
    pub fn create(&mut self, position: Vec2, image: Rc<dyn ImageResource>) -> SpriteId {
        let sprite = Sprite::new(position, image, &self.defaults);
        let id = sprite.id();
        tracing::debug!(sprite = %id, rect = %sprite.rect(), "created sprite");
        self.sprites.insert(id, sprite);
        self.order.push(id);
        id
    }

    /// Drop a sprite entirely. Returns it if it existed.
    pub fn destroy(&mut self, id: SpriteId) -> Option<Sprite> {
        self.remove(id);
        self.sprites.remove(&id)
    }

    pub fn sprite(&self, id: SpriteId) -> Option<&Sprite> {
        self.sprites.get(&id)
    }

    /// Mutable access for edits that do not need a repaint of their own
    /// (`set_image`, margins, font, label attributes and colors).
    pub fn sprite_mut(&mut self, id: SpriteId) -> Option<&mut Sprite> {
        self.sprites.get_mut(&id)
    }

    /// Total sprites owned, visible or hidden.
    pub fn sprite_count(&self) -> usize {
        self.sprites.len()
    }

    /// Sprite at draw-order position `index`, or `None` when out of range.
    pub fn get(&self, index: usize) -> Option<&Sprite> {
        self.order.get(index).and_then(|id| self.sprites.get(id))
    }

    /// Number of sprites in the draw order.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn index_of(&self, id: SpriteId) -> Option<usize> {
        self.order.iter().position(|other| *other == id)
    }

    pub fn is_visible(&self, id: SpriteId) -> bool {
        self.index_of(id).is_some()
    }

    /// Visible sprites, bottom-most first.
    pub fn iter(&self) -> impl Iterator<Item = &Sprite> {
        self.order.iter().filter_map(|id| self.sprites.get(id))
    }

    /// Put `id` on top of the order. A sprite already in the order is
    /// moved, never duplicated.
    pub fn append(&mut self, id: SpriteId) -> Result<(), SpriteError> {
        self.insert_at(id, isize::MAX)
    }

    /// Insert `id` at `index`; negative indices clamp to the front and
    /// indices past the end clamp to the back.
    pub fn insert_at(&mut self, id: SpriteId, index: isize) -> Result<(), SpriteError> {
        if !self.sprites.contains_key(&id) {
            return Err(SpriteError::UnknownSprite(id));
        }
        self.remove(id);
        let index = usize::try_from(index).unwrap_or(0).min(self.order.len());
        self.order.insert(index, id);
        tracing::debug!(sprite = %id, index, "inserted into order");
        Ok(())
    }

    /// Take `id` out of the order. Absent ids are ignored.
    pub fn remove(&mut self, id: SpriteId) -> bool {
        match self.index_of(id) {
            Some(index) => {
                self.order.remove(index);
                true
            }
            None => false,
        }
    }

    /// Top-most visible sprite whose bounds contain `point`.
    pub fn find_topmost_at(&self, point: IVec2) -> Option<&Sprite> {
        self.order
            .iter()
            .rev()
            .filter_map(|id| self.sprites.get(id))
            .find(|sprite| sprite.hit(point))
    }

    /// Ask the host to repaint the sprite's current rectangle.
    pub fn invalidate(&mut self, id: SpriteId) -> Result<(), SpriteError> {
        let rect = self.rect_of(id)?;
        self.host.invalidate(rect);
        Ok(())
    }

    /// Move to an absolute position, truncated to whole pixels.
    ///
    /// Invalidates the old rectangle and then the new one so the vacated
    /// area is repainted too.
    pub fn move_to(&mut self, id: SpriteId, position: Vec2) -> Result<(), SpriteError> {
        let target = position.as_ivec2();
        self.reposition(id, |_| target)
    }

    /// Move by `delta`, truncated to whole pixels and saturating at the
    /// coordinate bounds. Same invalidation as
    /// [`SpriteRegistry::move_to`].
    pub fn move_relative(&mut self, id: SpriteId, delta: Vec2) -> Result<(), SpriteError> {
        let delta = delta.as_ivec2();
        self.reposition(id, |origin| origin.saturating_add(delta))
    }

    fn reposition(&mut self, id: SpriteId, to: impl FnOnce(IVec2) -> IVec2) -> Result<(), SpriteError> {
        self.invalidate(id)?;
        let sprite = self.sprite_entry(id)?;
        let position = to(sprite.position());
        sprite.set_position(position);
        self.invalidate(id)
    }

    /// Replace the image in `slot` with invalidation before and after.
    pub fn set_shape(
        &mut self,
        id: SpriteId,
        image: Rc<dyn ImageResource>,
        slot: usize,
    ) -> Result<(), SpriteError> {
        self.invalidate(id)?;
        self.sprite_entry(id)?.set_image(image, slot, IVec2::ZERO);
        self.invalidate(id)
    }

    /// Set the label text of `slot` (NULs become spaces) and invalidate.
    pub fn set_label(&mut self, id: SpriteId, text: &str, slot: usize) -> Result<(), SpriteError> {
        self.sprite_entry(id)?.set_label_text(text, slot);
        self.invalidate(id)
    }

    /// Re-stack `id`, optionally with a new layer value.
    ///
    /// The sprite is removed and reinserted in front of the first sprite
    /// with a strictly greater layer, or on top if there is none. Among
    /// equal layers the re-stacked sprite therefore ends up above the ones
    /// already there.
    pub fn set_layer(&mut self, id: SpriteId, layer: Option<i32>) -> Result<(), SpriteError> {
        let sprite = self.sprite_entry(id)?;
        if let Some(layer) = layer {
            sprite.set_layer_value(layer);
        }
        let layer = sprite.layer();

        self.remove(id);
        let index = self
            .order
            .iter()
            .position(|other| self.sprites.get(other).is_some_and(|s| layer < s.layer()))
            .unwrap_or(self.order.len());
        self.order.insert(index, id);
        tracing::debug!(sprite = %id, layer, index, "restacked");
        self.invalidate(id)
    }

    /// Invalidate and take the sprite out of the order. Its state is kept.
    pub fn hide(&mut self, id: SpriteId) -> Result<(), SpriteError> {
        self.invalidate(id)?;
        self.remove(id);
        Ok(())
    }

    /// Put a hidden sprite back where its current layer places it.
    pub fn restore(&mut self, id: SpriteId) -> Result<(), SpriteError> {
        self.set_layer(id, None)
    }

    /// Widest label of `id`, measured with the bound surface.
    pub fn label_width(&self, id: SpriteId) -> Result<f64, SpriteError> {
        let sprite = self.sprites.get(&id).ok_or(SpriteError::UnknownSprite(id))?;
        let surface = self.surface.as_ref().ok_or(SpriteError::NoSurface)?;
        Ok(sprite.label_width(surface))
    }

    /// Redraw every visible sprite intersecting `damage` (all of them when
    /// `damage` is `None`). A `surface` passed here becomes the bound one.
    ///
    /// A missing surface is logged and reported in the stats; nothing is
    /// drawn. Per-layer failures are logged and never abort the pass.
    pub fn redraw(&mut self, damage: Option<Rect>, surface: Option<S>) -> RedrawStats {
        match self.try_redraw(damage, surface) {
            Ok(stats) => stats,
            Err(err) => {
                tracing::warn!(%err, "redraw skipped");
                RedrawStats {
                    surface_missing: true,
                    ..RedrawStats::default()
                }
            }
        }
    }

    /// Like [`SpriteRegistry::redraw`] but fails with
    /// [`SpriteError::NoSurface`] instead of logging it.
    pub fn try_redraw(&mut self, damage: Option<Rect>, surface: Option<S>) -> Result<RedrawStats, SpriteError> {
        if let Some(surface) = surface {
            self.surface = Some(surface);
        }
        let surface = self.surface.as_mut().ok_or(SpriteError::NoSurface)?;
        let _span = tracing::info_span!("redraw", sprites = self.order.len()).entered();

        let mut stats = RedrawStats::default();
        for id in &self.order {
            let Some(sprite) = self.sprites.get(id) else {
                continue;
            };
            if damage.is_some_and(|area| !sprite.rect().intersects(&area)) {
                tracing::trace!(sprite = %id, "culled");
                stats.culled += 1;
                continue;
            }
            stats.skipped_layers += sprite.draw(surface);
            stats.drawn += 1;
        }
        tracing::trace!(
            drawn = stats.drawn,
            culled = stats.culled,
            skipped_layers = stats.skipped_layers,
            "redraw complete"
        );
        Ok(stats)
    }

    fn rect_of(&self, id: SpriteId) -> Result<Rect, SpriteError> {
        self.sprites
            .get(&id)
            .map(Sprite::rect)
            .ok_or(SpriteError::UnknownSprite(id))
    }

    fn sprite_entry(&mut self, id: SpriteId) -> Result<&mut Sprite, SpriteError> {
        self.sprites.get_mut(&id).ok_or(SpriteError::UnknownSprite(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spritekit_render::{DamageLog, DisplayListSurface, DrawOp, PixelBuffer};

    type Registry = SpriteRegistry<DisplayListSurface, DamageLog>;

    fn image(w: u32, h: u32) -> Rc<dyn ImageResource> {
        Rc::new(PixelBuffer::solid(w, h, [255, 255, 255, 255]))
    }

    fn registry() -> Registry {
        SpriteRegistry::new(DamageLog::new())
    }

    fn spawn(reg: &mut Registry, x: f32, y: f32, layer: i32) -> SpriteId {
        let id = reg.create(Vec2::new(x, y), image(10, 10));
        reg.set_layer(id, Some(layer)).unwrap();
        id
    }

    fn layers(reg: &Registry) -> Vec<i32> {
        reg.iter().map(Sprite::layer).collect()
    }

    fn ids(reg: &Registry) -> Vec<SpriteId> {
        reg.iter().map(Sprite::id).collect()
    }

    #[test]
    fn create_appends_on_top() {
        let mut reg = registry();
        let a = reg.create(Vec2::ZERO, image(5, 5));
        let b = reg.create(Vec2::ZERO, image(5, 5));
        assert_eq!(reg.len(), 2);
        assert_eq!(ids(&reg), vec![a, b]);
        assert_eq!(reg.sprite(a).unwrap().layer(), 100);
    }

    #[test]
    fn get_out_of_range_is_none() {
        let mut reg = registry();
        reg.create(Vec2::ZERO, image(5, 5));
        assert!(reg.get(0).is_some());
        assert!(reg.get(1).is_none());
        assert!(reg.get(usize::MAX).is_none());
    }

    #[test]
    fn length_tracks_append_insert_remove() {
        let mut reg = registry();
        let a = reg.create(Vec2::ZERO, image(5, 5));
        let b = reg.create(Vec2::ZERO, image(5, 5));
        let c = reg.create(Vec2::ZERO, image(5, 5));
        assert!(reg.remove(b));
        assert_eq!(reg.len(), 2);
        assert!(!reg.remove(b));
        assert_eq!(reg.len(), 2);

        reg.insert_at(b, -5).unwrap();
        assert_eq!(ids(&reg), vec![b, a, c]);
        reg.remove(b);
        reg.insert_at(b, 99).unwrap();
        assert_eq!(ids(&reg), vec![a, c, b]);
        reg.remove(b);
        reg.insert_at(b, 1).unwrap();
        assert_eq!(ids(&reg), vec![a, b, c]);
        assert_eq!(reg.len(), 3);
    }

    #[test]
    fn append_never_duplicates() {
        let mut reg = registry();
        let a = reg.create(Vec2::ZERO, image(5, 5));
        let b = reg.create(Vec2::ZERO, image(5, 5));
        reg.append(a).unwrap();
        assert_eq!(ids(&reg), vec![b, a]);
        reg.insert_at(a, 0).unwrap();
        assert_eq!(ids(&reg), vec![a, b]);
    }

    #[test]
    fn unknown_ids_are_errors() {
        let mut reg = registry();
        let ghost = SpriteId::new();
        assert_eq!(reg.append(ghost), Err(SpriteError::UnknownSprite(ghost)));
        assert_eq!(
            reg.move_to(ghost, Vec2::ZERO),
            Err(SpriteError::UnknownSprite(ghost))
        );
        assert_eq!(reg.set_layer(ghost, Some(1)), Err(SpriteError::UnknownSprite(ghost)));
        assert!(!reg.remove(ghost));
        assert!(reg.host().requests().is_empty());
    }

    #[test]
    fn topmost_wins_on_overlap() {
        let mut reg = registry();
        let a = spawn(&mut reg, 0.0, 0.0, 100);
        let b = spawn(&mut reg, 5.0, 5.0, 200);
        assert_eq!(reg.find_topmost_at(IVec2::new(7, 7)).map(Sprite::id), Some(b));
        assert_eq!(reg.find_topmost_at(IVec2::new(1, 1)).map(Sprite::id), Some(a));
        assert!(reg.find_topmost_at(IVec2::new(50, 50)).is_none());
    }

    #[test]
    fn hidden_sprites_are_not_hit() {
        let mut reg = registry();
        let a = spawn(&mut reg, 0.0, 0.0, 100);
        reg.hide(a).unwrap();
        assert!(reg.find_topmost_at(IVec2::new(1, 1)).is_none());
        assert!(!reg.is_visible(a));
        assert_eq!(reg.sprite_count(), 1);
    }

    #[test]
    fn set_layer_inserts_between() {
        let mut reg = registry();
        spawn(&mut reg, 0.0, 0.0, 100);
        spawn(&mut reg, 0.0, 0.0, 200);
        let x = spawn(&mut reg, 0.0, 0.0, 150);
        assert_eq!(layers(&reg), vec![100, 150, 200]);

        let y = spawn(&mut reg, 0.0, 0.0, 150);
        assert_eq!(layers(&reg), vec![100, 150, 150, 200]);
        assert_eq!(reg.index_of(x), Some(1));
        assert_eq!(reg.index_of(y), Some(2));
    }

    #[test]
    fn set_layer_without_value_keeps_layer() {
        let mut reg = registry();
        let a = spawn(&mut reg, 0.0, 0.0, 300);
        spawn(&mut reg, 0.0, 0.0, 100);
        reg.set_layer(a, None).unwrap();
        assert_eq!(layers(&reg), vec![100, 300]);
    }

    #[test]
    fn set_layer_invalidates_new_rect() {
        let mut reg = registry();
        let a = reg.create(Vec2::new(3.0, 4.0), image(10, 10));
        reg.set_layer(a, Some(5)).unwrap();
        assert_eq!(reg.host().requests(), &[Rect::new(3, 4, 10, 10)]);
    }

    #[test]
    fn move_invalidates_old_then_new() {
        let mut reg = registry();
        let a = reg.create(Vec2::new(10.0, 10.0), image(20, 20));
        reg.move_to(a, Vec2::new(50.7, 60.2)).unwrap();
        assert_eq!(
            reg.host().requests(),
            &[Rect::new(10, 10, 20, 20), Rect::new(50, 60, 20, 20)]
        );

        reg.host_mut().take();
        reg.move_relative(a, Vec2::new(-5.9, 1.0)).unwrap();
        assert_eq!(
            reg.host().requests(),
            &[Rect::new(50, 60, 20, 20), Rect::new(45, 61, 20, 20)]
        );
    }

    #[test]
    fn set_shape_brackets_with_invalidation() {
        let mut reg = registry();
        let a = reg.create(Vec2::ZERO, image(20, 20));
        reg.set_shape(a, image(5, 8), 0).unwrap();
        assert_eq!(
            reg.host().requests(),
            &[Rect::new(0, 0, 20, 20), Rect::new(0, 0, 5, 8)]
        );
    }

    #[test]
    fn set_label_invalidates_and_sanitizes() {
        let mut reg = registry();
        let a = reg.create(Vec2::ZERO, image(20, 20));
        reg.set_label(a, "x\0y", 0).unwrap();
        assert_eq!(reg.sprite(a).unwrap().label(0), Some("x y"));
        assert_eq!(reg.host().requests().len(), 1);
    }

    #[test]
    fn hide_then_restore_returns_to_layer_position() {
        let mut reg = registry();
        let a = spawn(&mut reg, 0.0, 0.0, 100);
        let b = spawn(&mut reg, 0.0, 0.0, 200);
        let c = spawn(&mut reg, 0.0, 0.0, 300);
        reg.hide(b).unwrap();
        assert_eq!(ids(&reg), vec![a, c]);
        reg.restore(b).unwrap();
        assert_eq!(ids(&reg), vec![a, b, c]);
    }

    #[test]
    fn hide_invalidates_before_removal() {
        let mut reg = registry();
        let a = reg.create(Vec2::new(1.0, 2.0), image(3, 4));
        reg.hide(a).unwrap();
        assert_eq!(reg.host().requests(), &[Rect::new(1, 2, 3, 4)]);
    }

    #[test]
    fn redraw_without_surface_is_skipped() {
        let mut reg = registry();
        reg.create(Vec2::ZERO, image(5, 5));
        let stats = reg.redraw(None, None);
        assert!(stats.surface_missing);
        assert_eq!(stats.drawn, 0);
        assert_eq!(reg.try_redraw(None, None), Err(SpriteError::NoSurface));
    }

    #[test]
    fn redraw_binds_passed_surface() {
        let mut reg = registry();
        reg.create(Vec2::ZERO, image(5, 5));
        let stats = reg.redraw(None, Some(DisplayListSurface::new()));
        assert_eq!(stats.drawn, 1);
        assert_eq!(reg.surface().unwrap().ops().len(), 1);

        // The bound surface is reused when none is passed.
        reg.redraw(None, None);
        assert_eq!(reg.surface().unwrap().ops().len(), 2);
    }

    #[test]
    fn redraw_culls_by_damage() {
        let mut reg = registry();
        reg.bind_surface(DisplayListSurface::new());
        reg.create(Vec2::new(0.0, 0.0), image(10, 10));
        reg.create(Vec2::new(100.0, 100.0), image(10, 10));

        let stats = reg.redraw(Some(Rect::new(9, 9, 5, 5)), None);
        assert_eq!(stats.drawn, 1);
        assert_eq!(stats.culled, 1);

        let stats = reg.redraw(Some(Rect::new(10, 0, 5, 5)), None);
        assert_eq!(stats.drawn, 0, "edge contact alone does not redraw");

        let stats = reg.redraw(Some(Rect::new(500, 500, 5, 5)), None);
        assert_eq!(stats.drawn, 0);
        assert_eq!(stats.culled, 2);
    }

    #[test]
    fn rejected_layers_are_counted_not_errors() {
        struct Vector;

        impl ImageResource for Vector {
            fn width(&self) -> u32 {
                10
            }
            fn height(&self) -> u32 {
                10
            }
            fn as_any(&self) -> &dyn std::any::Any {
                self
            }
        }

        let mut reg = registry();
        let a = reg.create(Vec2::ZERO, Rc::new(Vector));
        reg.create(Vec2::new(20.0, 0.0), image(10, 10));
        reg.set_label(a, "still drawn", 0).unwrap();

        let stats = reg.try_redraw(None, Some(DisplayListSurface::new())).unwrap();
        assert_eq!(stats.drawn, 2);
        assert_eq!(stats.skipped_layers, 1);
        let texts: Vec<_> = reg.surface().unwrap().texts().collect();
        assert_eq!(texts, vec!["still drawn"]);
    }

    #[test]
    fn coordinates_saturate_at_i32_max() {
        let mut reg = registry();
        reg.bind_surface(DisplayListSurface::new());
        let a = reg.create(Vec2::new(2.0e9, 0.0), image(10, 10));
        reg.set_label(a, "far", 0).unwrap();

        reg.move_relative(a, Vec2::new(2.0e9, 0.0)).unwrap();
        assert_eq!(reg.sprite(a).unwrap().position(), IVec2::new(i32::MAX, 0));
        reg.move_to(a, Vec2::new(3.0e9, 0.0)).unwrap();
        reg.move_relative(a, Vec2::new(1.0e9, 0.0)).unwrap();
        assert_eq!(reg.sprite(a).unwrap().rect().right(), i32::MAX);

        reg.move_relative(a, Vec2::new(-5.0, 0.0)).unwrap();
        let hit = reg.find_topmost_at(IVec2::new(i32::MAX, 5)).map(Sprite::id);
        assert_eq!(hit, Some(a));

        let stats = reg.redraw(Some(Rect::new(i32::MAX - 10, 0, 20, 20)), None);
        assert_eq!(stats.drawn, 1);
        assert_eq!(stats.culled, 0);
    }

    #[test]
    fn redraw_follows_z_order() {
        let mut reg = registry();
        let top = spawn(&mut reg, 0.0, 0.0, 500);
        let bottom = spawn(&mut reg, 20.0, 0.0, 1);
        reg.redraw(None, Some(DisplayListSurface::new()));

        let origins: Vec<IVec2> = reg
            .surface()
            .unwrap()
            .ops()
            .iter()
            .filter_map(|op| match op {
                DrawOp::Image { origin, .. } => Some(*origin),
                DrawOp::Text { .. } => None,
            })
            .collect();
        assert_eq!(origins, vec![IVec2::new(20, 0), IVec2::new(0, 0)]);
        assert_eq!(ids(&reg), vec![bottom, top]);
    }

    #[test]
    fn label_width_needs_a_surface() {
        let mut reg = registry();
        let a = reg.create(Vec2::ZERO, image(5, 5));
        reg.set_label(a, "abc", 0).unwrap();
        assert_eq!(reg.label_width(a), Err(SpriteError::NoSurface));
        reg.bind_surface(DisplayListSurface::new());
        // 3 chars * 12pt * 0.6
        assert!((reg.label_width(a).unwrap() - 21.6).abs() < 1e-9);
    }

    #[test]
    fn destroy_removes_everywhere() {
        let mut reg = registry();
        let a = reg.create(Vec2::ZERO, image(5, 5));
        assert!(reg.destroy(a).is_some());
        assert_eq!(reg.len(), 0);
        assert_eq!(reg.sprite_count(), 0);
        assert!(reg.destroy(a).is_none());
    }

    #[test]
    fn custom_defaults_apply_to_new_sprites() {
        let defaults = SpriteDefaults {
            layer: 7,
            ..SpriteDefaults::default()
        };
        let mut reg: Registry = SpriteRegistry::with_defaults(DamageLog::new(), defaults);
        let a = reg.create(Vec2::ZERO, image(5, 5));
        assert_eq!(reg.sprite(a).unwrap().layer(), 7);
    }
}
