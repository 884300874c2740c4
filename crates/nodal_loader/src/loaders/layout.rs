//! Layout loader

use std::any::TypeId;

use nodal_scene::{BackgroundColorType, ClippingType, Color3B, Layout, LayoutType, Node, Point, Rect};

use crate::error::{LoaderError, Result};
use crate::handler::PropertyHandler;
use crate::loader::{chain_names, downcast_node, downcast_node_mut, NodeLoader};
use crate::property::{NodeProperty, PropertyDescriptor, PropertyHelper};

use super::BaseNodeLoader;

type Helper = PropertyHelper<Layout>;

const BACKGROUND_COLOR: PropertyDescriptor<Layout, Color3B> =
    Helper::make("background_color", Layout::background_color, Layout::set_background_color);
const BACKGROUND_COLOR_OPACITY: PropertyDescriptor<Layout, u8> = Helper::make(
    "background_color_opacity",
    Layout::background_color_opacity,
    Layout::set_background_color_opacity,
);
const BACKGROUND_COLOR_TYPE: PropertyDescriptor<Layout, BackgroundColorType> = Helper::make(
    "background_color_type",
    Layout::background_color_type,
    Layout::set_background_color_type,
);
const BACKGROUND_COLOR_VECTOR: PropertyDescriptor<Layout, Point> = Helper::make(
    "background_color_vector",
    Layout::background_color_vector,
    Layout::set_background_color_vector,
);
const BACKGROUND_IMAGE_CAP_INSETS: PropertyDescriptor<Layout, Rect> = Helper::make(
    "background_image_cap_insets",
    Layout::background_image_cap_insets,
    Layout::set_background_image_cap_insets,
);
const BACKGROUND_IMAGE_COLOR: PropertyDescriptor<Layout, Color3B> = Helper::make(
    "background_image_color",
    Layout::background_image_color,
    Layout::set_background_image_color,
);
const BACKGROUND_IMAGE_OPACITY: PropertyDescriptor<Layout, u8> = Helper::make(
    "background_image_opacity",
    Layout::background_image_opacity,
    Layout::set_background_image_opacity,
);
const CLIPPING_ENABLED: PropertyDescriptor<Layout, bool> =
    Helper::make("clipping_enabled", Layout::is_clipping_enabled, Layout::set_clipping_enabled);
const CLIPPING_TYPE: PropertyDescriptor<Layout, ClippingType> =
    Helper::make("clipping_type", Layout::clipping_type, Layout::set_clipping_type);
const LAYOUT_TYPE: PropertyDescriptor<Layout, LayoutType> =
    Helper::make("layout_type", Layout::layout_type, Layout::set_layout_type);

const PROPERTIES: &[&dyn NodeProperty<Layout>] = &[
    &BACKGROUND_COLOR,
    &BACKGROUND_COLOR_OPACITY,
    &BACKGROUND_COLOR_TYPE,
    &BACKGROUND_COLOR_VECTOR,
    &BACKGROUND_IMAGE_CAP_INSETS,
    &BACKGROUND_IMAGE_COLOR,
    &BACKGROUND_IMAGE_OPACITY,
    &CLIPPING_ENABLED,
    &CLIPPING_TYPE,
    &LAYOUT_TYPE,
];

/// Loader for [`Layout`] nodes
#[derive(Debug, Clone, Copy, Default)]
pub struct LayoutLoader;

impl LayoutLoader {
    pub const CLASS_NAME: &'static str = "Layout";
}

impl NodeLoader for LayoutLoader {
    fn class_name(&self) -> &'static str {
        Self::CLASS_NAME
    }

    fn node_type(&self) -> TypeId {
        TypeId::of::<Layout>()
    }

    fn create_node(&self) -> Box<dyn Node> {
        Box::new(Layout::new())
    }

    fn load_properties(&self, node: &mut dyn Node, handler: &PropertyHandler) -> Result<Vec<LoaderError>> {
        let layout = downcast_node_mut::<Layout>(node, Self::CLASS_NAME)?;
        let mut issues = BaseNodeLoader.load_properties(&mut *layout, handler)?;
        issues.extend(handler.load_all(PROPERTIES, layout));
        Ok(issues)
    }

    fn store_properties(&self, node: &dyn Node, handler: &mut PropertyHandler) -> Result<()> {
        let layout = downcast_node::<Layout>(node, Self::CLASS_NAME)?;
        BaseNodeLoader.store_properties(layout, handler)?;
        handler.store_all(PROPERTIES, layout);
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
