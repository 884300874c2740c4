//! Skeletal animation node

use std::any::Any;

use crate::node::{Node, NodeBase};
use crate::types::BlendFunc;

/// A node playing a skeletal animation from a data/atlas file pair
#[derive(Debug)]
pub struct SkeletonAnimation {
    base: NodeBase,
    data_file: String,
    atlas_file: String,
    animation_scale: f32,
    animation: String,
    skin: String,
    looping: bool,
    time_scale: f32,
    blend_func: BlendFunc,
    debug_bones: bool,
    debug_slots: bool,
}

impl SkeletonAnimation {
    pub fn new() -> Self {
        Self {
            base: NodeBase::new(),
            data_file: String::new(),
            atlas_file: String::new(),
            animation_scale: 1.0,
            animation: String::new(),
            skin: String::new(),
            looping: true,
            time_scale: 1.0,
            blend_func: BlendFunc::ALPHA_PREMULTIPLIED,
            debug_bones: false,
            debug_slots: false,
        }
    }

    pub fn data_file(&self) -> &str {
        &self.data_file
    }

    pub fn set_data_file(&mut self, path: impl Into<String>) {
        self.data_file = path.into();
    }

    pub fn atlas_file(&self) -> &str {
        &self.atlas_file
    }

    pub fn set_atlas_file(&mut self, path: impl Into<String>) {
        self.atlas_file = path.into();
    }

    /// Scale applied when the skeleton data is loaded
    pub fn animation_scale(&self) -> f32 {
        self.animation_scale
    }

    pub fn set_animation_scale(&mut self, scale: f32) {
        self.animation_scale = scale;
    }

    pub fn animation(&self) -> &str {
        &self.animation
    }

    pub fn set_animation(&mut self, name: impl Into<String>) {
        self.animation = name.into();
    }

    pub fn skin(&self) -> &str {
        &self.skin
    }

    pub fn set_skin(&mut self, name: impl Into<String>) {
        self.skin = name.into();
    }

    pub fn is_loop(&self) -> bool {
        self.looping
    }

    pub fn set_loop(&mut self, looping: bool) {
        self.looping = looping;
    }

    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    pub fn set_time_scale(&mut self, scale: f32) {
        self.time_scale = scale;
    }

    pub fn blend_func(&self) -> BlendFunc {
        self.blend_func
    }

    pub fn set_blend_func(&mut self, blend_func: BlendFunc) {
        self.blend_func = blend_func;
    }

    pub fn is_debug_bones(&self) -> bool {
        self.debug_bones
    }

    pub fn set_debug_bones(&mut self, enabled: bool) {
        self.debug_bones = enabled;
    }

    pub fn is_debug_slots(&self) -> bool {
        self.debug_slots
    }

    pub fn set_debug_slots(&mut self, enabled: bool) {
        self.debug_slots = enabled;
    }
}

impl Default for SkeletonAnimation {
    fn default() -> Self {
        Self::new()
    }
}

impl Node for SkeletonAnimation {
    fn kind_name(&self) -> &'static str {
        "SkeletonAnimation"
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
