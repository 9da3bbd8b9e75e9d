use spritekit_common::SpriteId;

/// Errors from registry and sprite operations.
///
/// Image layers a surface rejects are not errors here: the redraw pass
/// logs them, skips the layer and counts it in
/// [`crate::RedrawStats::skipped_layers`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SpriteError {
    #[error("sprite {0} not found")]
    UnknownSprite(SpriteId),
    #[error("no surface bound")]
    NoSurface,
}
