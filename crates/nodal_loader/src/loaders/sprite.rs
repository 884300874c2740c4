//! Sprite loader

use std::any::TypeId;

use nodal_scene::{BlendFunc, Node, Rect, Size, Sprite};

use crate::error::{LoaderError, Result};
use crate::handler::PropertyHandler;
use crate::loader::{chain_names, downcast_node, downcast_node_mut, NodeLoader};
use crate::property::{NodeProperty, PropertyDescriptor, PropertyHelper};

use super::BaseNodeLoader;

type Helper = PropertyHelper<Sprite>;

const BLEND_FUNC: PropertyDescriptor<Sprite, BlendFunc> =
    Helper::make("blend_func", Sprite::blend_func, Sprite::set_blend_func);
const FLIPPED_X: PropertyDescriptor<Sprite, bool> =
    Helper::make("flipped_x", Sprite::is_flipped_x, Sprite::set_flipped_x);
const FLIPPED_Y: PropertyDescriptor<Sprite, bool> =
    Helper::make("flipped_y", Sprite::is_flipped_y, Sprite::set_flipped_y);
const STRETCH_ENABLED: PropertyDescriptor<Sprite, bool> =
    Helper::make("stretch_enabled", Sprite::is_stretch_enabled, Sprite::set_stretch_enabled);
const TEXTURE: PropertyDescriptor<Sprite, String> =
    Helper::make("texture", |s| s.texture().to_string(), |s, v| s.set_texture(v));
const SPRITE_FRAME: PropertyDescriptor<Sprite, String> =
    Helper::make("sprite_frame", |s| s.sprite_frame().to_string(), |s, v| s.set_sprite_frame(v));
const TEXTURE_RECT: PropertyDescriptor<Sprite, Rect> =
    Helper::make("texture_rect", Sprite::texture_rect, Sprite::set_texture_rect);
// Store-only override of the base entry: an unstretched sprite reports its
// texture size. Loading the key is left to the base loader.
const CONTENT_SIZE: PropertyDescriptor<Sprite, Size> =
    Helper::make("content_size", Sprite::content_size, Sprite::set_content_size);

const PROPERTIES: &[&dyn NodeProperty<Sprite>] = &[
    &BLEND_FUNC,
    &FLIPPED_X,
    &FLIPPED_Y,
    &STRETCH_ENABLED,
    &TEXTURE,
    &SPRITE_FRAME,
    &TEXTURE_RECT,
];

const STORE_OVERRIDES: &[&dyn NodeProperty<Sprite>] = &[&CONTENT_SIZE];

/// Loader for [`Sprite`] nodes
#[derive(Debug, Clone, Copy, Default)]
pub struct SpriteLoader;

impl SpriteLoader {
    pub const CLASS_NAME: &'static str = "Sprite";
}

impl NodeLoader for SpriteLoader {
    fn class_name(&self) -> &'static str {
        Self::CLASS_NAME
    }

    fn node_type(&self) -> TypeId {
        TypeId::of::<Sprite>()
    }

    fn create_node(&self) -> Box<dyn Node> {
        Box::new(Sprite::new())
    }

    fn load_properties(&self, node: &mut dyn Node, handler: &PropertyHandler) -> Result<Vec<LoaderError>> {
        let sprite = downcast_node_mut::<Sprite>(node, Self::CLASS_NAME)?;
        let mut issues = BaseNodeLoader.load_properties(&mut *sprite, handler)?;
        issues.extend(handler.load_all(PROPERTIES, sprite));
        Ok(issues)
    }

    fn store_properties(&self, node: &dyn Node, handler: &mut PropertyHandler) -> Result<()> {
        let sprite = downcast_node::<Sprite>(node, Self::CLASS_NAME)?;
        BaseNodeLoader.store_properties(sprite, handler)?;
        handler.store_all(PROPERTIES, sprite);
        handler.store_all(STORE_OVERRIDES, sprite);
        Ok(())
    }

    fn property_names(&self) -> Vec<&'static str> {
        let own: Vec<&'static str> = PROPERTIES.iter().map(|property| property.name()).collect();
        chain_names(BaseNodeLoader.property_names(), &own)
    }

    fn clone_box(&self) -> Box<dyn NodeLoader> {
        Box::new(*self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nodal_scene::NodeBase;
    use nodal_value::DynamicValue;

    #[test]
    fn test_flipped_x_from_handler() {
        let mut handler = PropertyHandler::new("Sprite");
        handler.set("flipped_x", true);

        let loader: &dyn NodeLoader = &SpriteLoader;
        let (node, issues) = loader.build_node(&handler).unwrap();
        assert!(issues.is_empty());

        let sprite = node.downcast_ref::<Sprite>().unwrap();
        assert!(sprite.is_flipped_x());
        assert!(!sprite.is_flipped_y());
        assert!(sprite.is_stretch_enabled());
    }

    #[test]
    fn test_wrong_tag_only_affects_that_property() {
        let mut handler = PropertyHandler::new("Sprite");
        handler.set("flipped_x", "yes");
        handler.set("flipped_y", true);
        handler.set("name", "ship");

        let mut sprite = Sprite::new();
        let issues = SpriteLoader.load_properties(&mut sprite, &handler).unwrap();
        assert_eq!(issues.len(), 1);
        assert!(matches!(
            issues[0],
            LoaderError::PropertyTypeMismatch { ref property, .. } if property == "flipped_x"
        ));
        assert!(!sprite.is_flipped_x());
        assert!(sprite.is_flipped_y());
        assert_eq!(sprite.base().name(), "ship");
    }

    #[test]
    fn test_bad_content_size_reported_once() {
        let mut handler = PropertyHandler::new("Sprite");
        handler.set("content_size", "big");

        let mut sprite = Sprite::new();
        let issues = SpriteLoader.load_properties(&mut sprite, &handler).unwrap();
        assert_eq!(issues.len(), 1);
        assert!(matches!(
            issues[0],
            LoaderError::PropertyTypeMismatch { ref property, .. } if property == "content_size"
        ));
        assert_eq!(sprite.content_size(), Size::ZERO);
    }

    #[test]
    fn test_content_size_loads_into_base() {
        let mut handler = PropertyHandler::new("Sprite");
        handler.set("content_size", DynamicValue::from_entries([("width", 8.0f32), ("height", 4.0f32)]));

        let mut sprite = Sprite::new();
        let issues = SpriteLoader.load_properties(&mut sprite, &handler).unwrap();
        assert!(issues.is_empty());
        assert_eq!(sprite.base().content_size(), Size::new(8.0, 4.0));
    }

    #[test]
    fn test_store_includes_base_and_own() {
        let mut sprite = Sprite::new();
        sprite.set_texture("ship.png");
        sprite.base_mut().set_tag(3);

        let loader: &dyn NodeLoader = &SpriteLoader;
        let handler = loader.capture(&sprite).unwrap();
        assert_eq!(handler.class_name(), "Sprite");
        assert_eq!(handler.get("texture"), Some(&DynamicValue::from("ship.png")));
        assert_eq!(handler.get("tag"), Some(&DynamicValue::Int(3)));
        assert_eq!(handler.len(), loader.property_names().len());
    }

    #[test]
    fn test_content_size_override_wins() {
        let mut sprite = Sprite::new();
        sprite.base_mut().set_content_size(Size::new(100.0, 100.0));
        sprite.set_texture_rect(Rect::new(0.0, 0.0, 32.0, 16.0));
        sprite.set_stretch_enabled(false);

        let mut handler = PropertyHandler::new("Sprite");
        SpriteLoader.store_properties(&sprite, &mut handler).unwrap();
        let stored = handler.get("content_size").unwrap();
        assert_eq!(stored.get("width"), Some(&DynamicValue::Float(32.0)));
        assert_eq!(stored.get("height"), Some(&DynamicValue::Float(16.0)));
    }

    #[test]
    fn test_store_then_load_defaults() {
        let loader: &dyn NodeLoader = &SpriteLoader;
        let handler = loader.capture(&Sprite::new()).unwrap();
        let (node, issues) = loader.build_node(&handler).unwrap();
        assert!(issues.is_empty());
        assert_eq!(loader.capture(node.as_ref()).unwrap(), handler);
    }

    #[test]
    fn test_rejects_other_kind() {
        let mut node = NodeBase::new();
        let handler = PropertyHandler::new("Sprite");
        let err = SpriteLoader.load_properties(&mut node, &handler).unwrap_err();
        assert!(matches!(err, LoaderError::InvalidDowncast { loader: "Sprite", .. }));
        assert!(SpriteLoader.store_properties(&node, &mut PropertyHandler::default()).is_err());
    }

    #[test]
    fn test_property_names_base_first() {
        let names = SpriteLoader.property_names();
        assert_eq!(names[0], "name");
        assert!(names.contains(&"flipped_x"));
        assert_eq!(names.iter().filter(|name| **name == "content_size").count(), 1);
    }
}
