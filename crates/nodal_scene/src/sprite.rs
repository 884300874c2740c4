//! Textured sprite node

use std::any::Any;

use crate::node::{Node, NodeBase};
use crate::types::{BlendFunc, Point, Rect, Size};

/// A node that draws a texture or a sprite-sheet frame
#[derive(Debug)]
pub struct Sprite {
    base: NodeBase,
    blend_func: BlendFunc,
    flipped_x: bool,
    flipped_y: bool,
    stretch_enabled: bool,
    texture: String,
    sprite_frame: String,
    texture_rect: Rect,
}

impl Sprite {
    pub fn new() -> Self {
        let mut base = NodeBase::new();
        base.set_anchor_point(Point::ANCHOR_MIDDLE);
        Self {
            base,
            blend_func: BlendFunc::ALPHA_PREMULTIPLIED,
            flipped_x: false,
            flipped_y: false,
            stretch_enabled: true,
            texture: String::new(),
            sprite_frame: String::new(),
            texture_rect: Rect::ZERO,
        }
    }

    pub fn blend_func(&self) -> BlendFunc {
        self.blend_func
    }

    pub fn set_blend_func(&mut self, blend_func: BlendFunc) {
        self.blend_func = blend_func;
    }

    pub fn is_flipped_x(&self) -> bool {
        self.flipped_x
    }

    pub fn set_flipped_x(&mut self, flipped: bool) {
        self.flipped_x = flipped;
    }

    pub fn is_flipped_y(&self) -> bool {
        self.flipped_y
    }

    pub fn set_flipped_y(&mut self, flipped: bool) {
        self.flipped_y = flipped;
    }

    pub fn is_stretch_enabled(&self) -> bool {
        self.stretch_enabled
    }

    pub fn set_stretch_enabled(&mut self, enabled: bool) {
        self.stretch_enabled = enabled;
    }

    /// Texture file name, empty when the sprite uses a frame
    pub fn texture(&self) -> &str {
        &self.texture
    }

    /// Replace the texture. Content size and blend function are kept.
    pub fn set_texture(&mut self, texture: impl Into<String>) {
        self.texture = texture.into();
    }

    /// Sprite-sheet frame name, empty when the sprite uses a texture
    pub fn sprite_frame(&self) -> &str {
        &self.sprite_frame
    }

    /// Replace the frame. The blend function is kept.
    pub fn set_sprite_frame(&mut self, frame: impl Into<String>) {
        self.sprite_frame = frame.into();
    }

    pub fn texture_rect(&self) -> Rect {
        self.texture_rect
    }

    pub fn set_texture_rect(&mut self, rect: Rect) {
        self.texture_rect = rect;
    }

    /// Displayed size. An unstretched sprite always shows its texture rect.
    pub fn content_size(&self) -> Size {
        if self.stretch_enabled {
            self.base.content_size()
        } else {
            self.texture_rect.size
        }
    }

    pub fn set_content_size(&mut self, size: Size) {
        self.base.set_content_size(size);
    }
}

impl Default for Sprite {
    fn default() -> Self {
        Self::new()
    }
}

impl Node for Sprite {
    fn kind_name(&self) -> &'static str {
        "Sprite"
    }

    fn base(&self) -> &NodeBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut NodeBase {
        &mut self.base
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sprite_defaults() {
        let sprite = Sprite::new();
        assert_eq!(sprite.base().anchor_point(), Point::ANCHOR_MIDDLE);
        assert_eq!(sprite.blend_func(), BlendFunc::ALPHA_PREMULTIPLIED);
        assert!(sprite.is_stretch_enabled());
        assert!(!sprite.is_flipped_x());
    }

    #[test]
    fn test_content_size_follows_texture_rect_when_unstretched() {
        let mut sprite = Sprite::new();
        sprite.set_content_size(Size::new(100.0, 50.0));
        sprite.set_texture_rect(Rect::new(0.0, 0.0, 16.0, 16.0));
        assert_eq!(sprite.content_size(), Size::new(100.0, 50.0));

        sprite.set_stretch_enabled(false);
        assert_eq!(sprite.content_size(), Size::new(16.0, 16.0));
        assert_eq!(sprite.base().content_size(), Size::new(100.0, 50.0));
    }
}
