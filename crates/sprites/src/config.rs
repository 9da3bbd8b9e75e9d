use serde::{Deserialize, Serialize};
use spritekit_common::Rgb;
use spritekit_render::FontDescription;

use crate::label::LabelAttributes;

/// Defaults applied to every sprite a registry creates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpriteDefaults {
    /// Stacking priority of new sprites. Lower draws further back.
    pub layer: i32,
    pub font: FontDescription,
    /// Settings label slot 0 starts with; later slots copy slot 0.
    pub label: LabelAttributes,
    pub label_color: Rgb,
}

impl Default for SpriteDefaults {
    fn default() -> Self {
        Self {
            layer: 100,
            font: FontDescription::default(),
            label: LabelAttributes::default(),
            label_color: Rgb::BLACK,
        }
    }
}
