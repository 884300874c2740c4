//! Base node trait and the state shared by every node kind

use std::any::Any;
use std::fmt;

use crate::types::{Color3B, Point, Size};

/// A scene-graph node.
///
/// Implemented by every concrete kind. The common state lives in a
/// [`NodeBase`]; concrete kinds embed one and expose it here.
pub trait Node: Any + fmt::Debug + 'static {
    /// Name of the concrete Rust type, used in diagnostics
    fn kind_name(&self) -> &'static str;

    /// Shared node state
    fn base(&self) -> &NodeBase;

    /// Mutable shared node state
    fn base_mut(&mut self) -> &mut NodeBase;

    /// Get as Any reference (for downcasting)
    fn as_any(&self) -> &dyn Any;

    /// Get as mutable Any reference (for downcasting)
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl dyn Node {
    /// Downcast to a concrete kind
    pub fn downcast_ref<T: Node>(&self) -> Option<&T> {
        self.as_any().downcast_ref()
    }

    /// Downcast to a mutable concrete kind
    pub fn downcast_mut<T: Node>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut()
    }

    /// Check the concrete kind
    pub fn is<T: Node>(&self) -> bool {
        self.as_any().is::<T>()
    }
}

/// State common to all nodes, and the plain node kind itself
#[derive(Debug)]
pub struct NodeBase {
    name: String,
    tag: i32,
    position: Point,
    anchor_point: Point,
    content_size: Size,
    ignore_anchor_point_for_position: bool,
    rotation: f32,
    scale_x: f32,
    scale_y: f32,
    skew_x: f32,
    skew_y: f32,
    local_z_order: i32,
    visible: bool,
    color: Color3B,
    opacity: u8,
    cascade_color_enabled: bool,
    cascade_opacity_enabled: bool,
    children: Vec<Box<dyn Node>>,
}

impl NodeBase {
    /// Tag of a node that was never tagged
    pub const INVALID_TAG: i32 = -1;

    pub fn new() -> Self {
        Self {
            name: String::new(),
            tag: Self::INVALID_TAG,
            position: Point::ZERO,
            anchor_point: Point::ZERO,
            content_size: Size::ZERO,
            ignore_anchor_point_for_position: false,
            rotation: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
            skew_x: 0.0,
            skew_y: 0.0,
            local_z_order: 0,
            visible: true,
            color: Color3B::WHITE,
            opacity: 255,
            cascade_color_enabled: false,
            cascade_opacity_enabled: false,
            children: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn tag(&self) -> i32 {
        self.tag
    }

    pub fn set_tag(&mut self, tag: i32) {
        self.tag = tag;
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    pub fn anchor_point(&self) -> Point {
        self.anchor_point
    }

    pub fn set_anchor_point(&mut self, anchor_point: Point) {
        self.anchor_point = anchor_point;
    }

    pub fn content_size(&self) -> Size {
        self.content_size
    }

    pub fn set_content_size(&mut self, content_size: Size) {
        self.content_size = content_size;
    }

    pub fn is_ignore_anchor_point_for_position(&self) -> bool {
        self.ignore_anchor_point_for_position
    }

    pub fn set_ignore_anchor_point_for_position(&mut self, ignore: bool) {
        self.ignore_anchor_point_for_position = ignore;
    }

    /// Rotation in degrees
    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub fn set_rotation(&mut self, rotation: f32) {
        self.rotation = rotation;
    }

    pub fn scale_x(&self) -> f32 {
        self.scale_x
    }

    pub fn set_scale_x(&mut self, scale: f32) {
        self.scale_x = scale;
    }

    pub fn scale_y(&self) -> f32 {
        self.scale_y
    }

    pub fn set_scale_y(&mut self, scale: f32) {
        self.scale_y = scale;
    }

    pub fn skew_x(&self) -> f32 {
        self.skew_x
    }

    pub fn set_skew_x(&mut self, skew: f32) {
        self.skew_x = skew;
    }

    pub fn skew_y(&self) -> f32 {
        self.skew_y
    }

    pub fn set_skew_y(&mut self, skew: f32) {
        self.skew_y = skew;
    }

    pub fn local_z_order(&self) -> i32 {
        self.local_z_order
    }

    pub fn set_local_z_order(&mut self, z_order: i32) {
        self.local_z_order = z_order;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn color(&self) -> Color3B {
        self.color
    }

    pub fn set_color(&mut self, color: Color3B) {
        self.color = color;
    }

    pub fn opacity(&self) -> u8 {
        self.opacity
    }

    pub fn set_opacity(&mut self, opacity: u8) {
        self.opacity = opacity;
    }

    pub fn is_cascade_color_enabled(&self) -> bool {
        self.cascade_color_enabled
    }

    pub fn set_cascade_color_enabled(&mut self, enabled: bool) {
        self.cascade_color_enabled = enabled;
    }

    pub fn is_cascade_opacity_enabled(&self) -> bool {
        self.cascade_opacity_enabled
    }

    pub fn set_cascade_opacity_enabled(&mut self, enabled: bool) {
        self.cascade_opacity_enabled = enabled;
    }

    // ========== Children ==========

    pub fn add_child(&mut self, child: Box<dyn Node>) {
        self.children.push(child);
    }

    pub fn children(&self) -> &[Box<dyn Node>] {
        &self.children
    }

    pub fn children_mut(&mut self) -> &mut [Box<dyn Node>] {
        &mut self.children
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// Find a direct child by name
    pub fn child_by_name(&self, name: &str) -> Option<&dyn Node> {
        self.children
            .iter()
            .find(|child| child.base().name() == name)
            .map(|child| child.as_ref())
    }

    /// Detach and return all children
    pub fn take_children(&mut self) -> Vec<Box<dyn Node>> {
        std::mem::take(&mut self.children)
    }
}

impl Default for NodeBase {
    fn default() -> Self {
        Self::new()
    }
}

impl Node for NodeBase {
    fn kind_name(&self) -> &'static str {
        "NodeBase"
    }

    fn base(&self) -> &NodeBase {
        self
    }

    fn base_mut(&mut self) -> &mut NodeBase {
        self
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
    use crate::sprite::Sprite;

    #[test]
    fn test_defaults() {
        let node = NodeBase::new();
        assert_eq!(node.tag(), NodeBase::INVALID_TAG);
        assert_eq!(node.scale_x(), 1.0);
        assert!(node.is_visible());
        assert_eq!(node.opacity(), 255);
        assert_eq!(node.child_count(), 0);
    }

    #[test]
    fn test_downcast() {
        let mut node: Box<dyn Node> = Box::new(Sprite::new());
        assert!(node.is::<Sprite>());
        assert!(!node.is::<NodeBase>());
        assert!(node.downcast_ref::<NodeBase>().is_none());

        node.downcast_mut::<Sprite>().unwrap().set_flipped_x(true);
        assert!(node.downcast_ref::<Sprite>().unwrap().is_flipped_x());
    }

    #[test]
    fn test_children() {
        let mut parent = NodeBase::new();
        let mut child = NodeBase::new();
        child.set_name("child");
        parent.add_child(Box::new(child));
        parent.add_child(Box::new(Sprite::new()));

        assert_eq!(parent.child_count(), 2);
        assert!(parent.child_by_name("child").is_some());
        assert!(parent.child_by_name("missing").is_none());

        let taken = parent.take_children();
        assert_eq!(taken.len(), 2);
        assert_eq!(parent.child_count(), 0);
    }
}
