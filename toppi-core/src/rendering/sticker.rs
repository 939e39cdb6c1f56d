//! Decorative overlays drawn last, in list order.

use super::device::{DestRect, Device};
use super::graphics_state;
use crate::core::assets::AssetSource;
use crate::core::model::StickerItem;

/// Edge length of a sticker at scale 1.0, in logical units.
pub const BASE_STICKER_SIZE: f64 = 100.0;

/// Where one sticker lands on the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StickerPlacement {
    /// Square box before rotation, centered on the sticker position
    pub rect: DestRect,
    /// Rotation about the sticker position, in radians
    pub rotation: f64,
}

impl StickerPlacement {
    /// Placement for `sticker` with a base box of `base_size`.
    ///
    /// Returns `None` for non-positive or non-finite scales.
    pub fn for_sticker(sticker: &StickerItem, base_size: f64) -> Option<Self> {
        if !sticker.scale.is_finite() || sticker.scale <= 0.0 {
            return None;
        }

        let side = base_size * sticker.scale;
        let (x, y) = (sticker.position.x, sticker.position.y);
        let rotation = if sticker.rotation_radians.is_finite() {
            sticker.rotation_radians
        } else {
            0.0
        };

        Some(StickerPlacement {
            rect: DestRect::new(x - side / 2.0, y - side / 2.0, side, side),
            rotation,
        })
    }

    /// Rotation matrix about the box center (identity when unrotated).
    pub fn matrix(&self) -> [f64; 6] {
        if self.rotation == 0.0 {
            return graphics_state::IDENTITY;
        }
        let (cx, cy) = self.rect.center();
        graphics_state::rotation_about(self.rotation, cx, cy)
    }

    /// Center of the rotated box. Rotation is about the center, so this is
    /// always the sticker position.
    pub fn bounding_center(&self) -> (f64, f64) {
        let (cx, cy) = self.rect.center();
        graphics_state::apply(&self.matrix(), cx, cy)
    }
}

/// Draws stickers from an [`AssetSource`].
pub struct StickerCompositor<'a> {
    assets: &'a dyn AssetSource,
    base_size: f64,
}

impl<'a> StickerCompositor<'a> {
    pub fn new(assets: &'a dyn AssetSource, base_size: f64) -> Self {
        StickerCompositor { assets, base_size }
    }

    /// Draw `stickers` in order; unresolvable ones are skipped.
    pub fn draw(&self, device: &mut dyn Device, stickers: &[StickerItem]) {
        for sticker in stickers {
            let Some(image) = self.assets.image(&sticker.asset_name) else {
                log::warn!("Sticker asset {:?} not found, skipping", sticker.asset_name);
                continue;
            };
            let Some(placement) = StickerPlacement::for_sticker(sticker, self.base_size) else {
                log::warn!("Sticker {} has invalid scale {}, skipping", sticker.id, sticker.scale);
                continue;
            };

            if placement.rotation != 0.0 {
                device.save_state();
                device.concat_matrix(&placement.matrix());
                device.draw_image(&image, placement.rect);
                device.restore_state();
            } else {
                device.draw_image(&image, placement.rect);
            }
        }
    }
}
