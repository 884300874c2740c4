//! Loader for the plain node kind and the properties every kind shares

use std::any::TypeId;

use nodal_scene::{Color3B, Node, NodeBase, Point, Size};

use crate::error::{LoaderError, Result};
use crate::handler::PropertyHandler;
use crate::loader::NodeLoader;
use crate::property::{NodeProperty, PropertyDescriptor, PropertyHelper};

type Helper = PropertyHelper<NodeBase>;

const NAME: PropertyDescriptor<NodeBase, String> =
    Helper::make("name", |n| n.name().to_string(), |n, v| n.set_name(v));
const TAG: PropertyDescriptor<NodeBase, i32> = Helper::make("tag", NodeBase::tag, NodeBase::set_tag);
const POSITION: PropertyDescriptor<NodeBase, Point> =
    Helper::make("position", NodeBase::position, NodeBase::set_position);
const ANCHOR_POINT: PropertyDescriptor<NodeBase, Point> =
    Helper::make("anchor_point", NodeBase::anchor_point, NodeBase::set_anchor_point);
const CONTENT_SIZE: PropertyDescriptor<NodeBase, Size> =
    Helper::make("content_size", NodeBase::content_size, NodeBase::set_content_size);
const IGNORE_ANCHOR_POINT_FOR_POSITION: PropertyDescriptor<NodeBase, bool> = Helper::make(
    "ignore_anchor_point_for_position",
    NodeBase::is_ignore_anchor_point_for_position,
    NodeBase::set_ignore_anchor_point_for_position,
);
const ROTATION: PropertyDescriptor<NodeBase, f32> =
    Helper::make("rotation", NodeBase::rotation, NodeBase::set_rotation);
const SCALE_X: PropertyDescriptor<NodeBase, f32> =
    Helper::make("scale_x", NodeBase::scale_x, NodeBase::set_scale_x);
const SCALE_Y: PropertyDescriptor<NodeBase, f32> =
    Helper::make("scale_y", NodeBase::scale_y, NodeBase::set_scale_y);
const SKEW_X: PropertyDescriptor<NodeBase, f32> = Helper::make("skew_x", NodeBase::skew_x, NodeBase::set_skew_x);
const SKEW_Y: PropertyDescriptor<NodeBase, f32> = Helper::make("skew_y", NodeBase::skew_y, NodeBase::set_skew_y);
const LOCAL_Z_ORDER: PropertyDescriptor<NodeBase, i32> =
    Helper::make("local_z_order", NodeBase::local_z_order, NodeBase::set_local_z_order);
const VISIBLE: PropertyDescriptor<NodeBase, bool> =
    Helper::make("visible", NodeBase::is_visible, NodeBase::set_visible);
const COLOR: PropertyDescriptor<NodeBase, Color3B> = Helper::make("color", NodeBase::color, NodeBase::set_color);
const OPACITY: PropertyDescriptor<NodeBase, u8> = Helper::make("opacity", NodeBase::opacity, NodeBase::set_opacity);
const CASCADE_COLOR_ENABLED: PropertyDescriptor<NodeBase, bool> = Helper::make(
    "cascade_color_enabled",
    NodeBase::is_cascade_color_enabled,
    NodeBase::set_cascade_color_enabled,
);
const CASCADE_OPACITY_ENABLED: PropertyDescriptor<NodeBase, bool> = Helper::make(
    "cascade_opacity_enabled",
    NodeBase::is_cascade_opacity_enabled,
    NodeBase::set_cascade_opacity_enabled,
);

/// Properties shared by every node kind, in load order
pub(crate) const PROPERTIES: &[&dyn NodeProperty<NodeBase>] = &[
    &NAME,
    &TAG,
    &POSITION,
    &ANCHOR_POINT,
    &CONTENT_SIZE,
    &IGNORE_ANCHOR_POINT_FOR_POSITION,
    &ROTATION,
    &SCALE_X,
    &SCALE_Y,
    &SKEW_X,
    &SKEW_Y,
    &LOCAL_Z_ORDER,
    &VISIBLE,
    &COLOR,
    &OPACITY,
    &CASCADE_COLOR_ENABLED,
    &CASCADE_OPACITY_ENABLED,
];

/// Loader for plain nodes, and the base every other loader chains to.
///
/// Unlike the derived loaders it accepts any node kind, since every kind
/// carries a [`NodeBase`].
#[derive(Debug, Clone, Copy, Default)]
pub struct BaseNodeLoader;

impl BaseNodeLoader {
    pub const CLASS_NAME: &'static str = "Node";
}

impl NodeLoader for BaseNodeLoader {
    fn class_name(&self) -> &'static str {
        Self::CLASS_NAME
    }

    fn node_type(&self) -> TypeId {
        TypeId::of::<NodeBase>()
    }

    fn create_node(&self) -> Box<dyn Node> {
        Box::new(NodeBase::new())
    }

    fn load_properties(&self, node: &mut dyn Node, handler: &PropertyHandler) -> Result<Vec<LoaderError>> {
        Ok(handler.load_all(PROPERTIES, node.base_mut()))
    }

    fn store_properties(&self, node: &dyn Node, handler: &mut PropertyHandler) -> Result<()> {
        handler.store_all(PROPERTIES, node.base());
        Ok(())
    }

    fn property_names(&self) -> Vec<&'static str> {
        PROPERTIES.iter().map(|property| property.name()).collect()
    }

    fn clone_box(&self) -> Box<dyn NodeLoader> {
        Box::new(*self)
    }
}
