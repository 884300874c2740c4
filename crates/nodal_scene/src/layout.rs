//! Layout container node

use std::any::Any;

use crate::node::{Node, NodeBase};
use crate::types::{Color3B, Point, Rect};

/// How a layout fills its background
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackgroundColorType {
    #[default]
    None,
    Solid,
    Gradient,
}

/// How a layout clips its children
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClippingType {
    #[default]
    Stencil,
    Scissor,
}

/// How a layout arranges its children
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayoutType {
    #[default]
    Absolute,
    Vertical,
    Horizontal,
    Relative,
}

/// A UI container with a background and child arrangement
#[derive(Debug)]
pub struct Layout {
    base: NodeBase,
    background_color: Color3B,
    background_color_opacity: u8,
    background_color_type: BackgroundColorType,
    background_color_vector: Point,
    background_image_cap_insets: Rect,
    background_image_color: Color3B,
    background_image_opacity: u8,
    clipping_enabled: bool,
    clipping_type: ClippingType,
    layout_type: LayoutType,
}

impl Layout {
    pub fn new() -> Self {
        Self {
            base: NodeBase::new(),
            background_color: Color3B::WHITE,
            background_color_opacity: 255,
            background_color_type: BackgroundColorType::None,
            background_color_vector: Point::new(0.0, -1.0),
            background_image_cap_insets: Rect::ZERO,
            background_image_color: Color3B::WHITE,
            background_image_opacity: 255,
            clipping_enabled: false,
            clipping_type: ClippingType::Stencil,
            layout_type: LayoutType::Absolute,
        }
    }

    pub fn background_color(&self) -> Color3B {
        self.background_color
    }

    pub fn set_background_color(&mut self, color: Color3B) {
        self.background_color = color;
    }

    pub fn background_color_opacity(&self) -> u8 {
        self.background_color_opacity
    }

    pub fn set_background_color_opacity(&mut self, opacity: u8) {
        self.background_color_opacity = opacity;
    }

    pub fn background_color_type(&self) -> BackgroundColorType {
        self.background_color_type
    }

    pub fn set_background_color_type(&mut self, kind: BackgroundColorType) {
        self.background_color_type = kind;
    }

    /// Direction of the gradient fill
    pub fn background_color_vector(&self) -> Point {
        self.background_color_vector
    }

    pub fn set_background_color_vector(&mut self, vector: Point) {
        self.background_color_vector = vector;
    }

    pub fn background_image_cap_insets(&self) -> Rect {
        self.background_image_cap_insets
    }

    pub fn set_background_image_cap_insets(&mut self, insets: Rect) {
        self.background_image_cap_insets = insets;
    }

    pub fn background_image_color(&self) -> Color3B {
        self.background_image_color
    }

    pub fn set_background_image_color(&mut self, color: Color3B) {
        self.background_image_color = color;
    }

    pub fn background_image_opacity(&self) -> u8 {
        self.background_image_opacity
    }

    pub fn set_background_image_opacity(&mut self, opacity: u8) {
        self.background_image_opacity = opacity;
    }

    pub fn is_clipping_enabled(&self) -> bool {
        self.clipping_enabled
    }

    pub fn set_clipping_enabled(&mut self, enabled: bool) {
        self.clipping_enabled = enabled;
    }

    pub fn clipping_type(&self) -> ClippingType {
        self.clipping_type
    }

    pub fn set_clipping_type(&mut self, kind: ClippingType) {
        self.clipping_type = kind;
    }

    pub fn layout_type(&self) -> LayoutType {
        self.layout_type
    }

    pub fn set_layout_type(&mut self, kind: LayoutType) {
        self.layout_type = kind;
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self::new()
    }
}

impl Node for Layout {
    fn kind_name(&self) -> &'static str {
        "Layout"
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
