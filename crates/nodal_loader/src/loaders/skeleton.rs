//! Skeletal animation loader

use std::any::TypeId;

use nodal_scene::{BlendFunc, Node, SkeletonAnimation};

use crate::error::{LoaderError, Result};
use crate::handler::PropertyHandler;
use crate::loader::{chain_names, downcast_node, downcast_node_mut, NodeLoader};
use crate::property::{NodeProperty, PropertyDescriptor, PropertyHelper};

use super::BaseNodeLoader;

type Helper = PropertyHelper<SkeletonAnimation>;

const DATA_FILE: PropertyDescriptor<SkeletonAnimation, String> =
    Helper::make("data_file", |s| s.data_file().to_string(), |s, v| s.set_data_file(v));
const ATLAS_FILE: PropertyDescriptor<SkeletonAnimation, String> =
    Helper::make("atlas_file", |s| s.atlas_file().to_string(), |s, v| s.set_atlas_file(v));
const ANIMATION_SCALE: PropertyDescriptor<SkeletonAnimation, f32> = Helper::make(
    "animation_scale",
    SkeletonAnimation::animation_scale,
    SkeletonAnimation::set_animation_scale,
);
const ANIMATION: PropertyDescriptor<SkeletonAnimation, String> =
    Helper::make("animation", |s| s.animation().to_string(), |s, v| s.set_animation(v));
const SKIN: PropertyDescriptor<SkeletonAnimation, String> =
    Helper::make("skin", |s| s.skin().to_string(), |s, v| s.set_skin(v));
const LOOP: PropertyDescriptor<SkeletonAnimation, bool> =
    Helper::make("loop", SkeletonAnimation::is_loop, SkeletonAnimation::set_loop);
const TIME_SCALE: PropertyDescriptor<SkeletonAnimation, f32> =
    Helper::make("time_scale", SkeletonAnimation::time_scale, SkeletonAnimation::set_time_scale);
const BLEND_FUNC: PropertyDescriptor<SkeletonAnimation, BlendFunc> =
    Helper::make("blend_func", SkeletonAnimation::blend_func, SkeletonAnimation::set_blend_func);
const DEBUG_BONES: PropertyDescriptor<SkeletonAnimation, bool> =
    Helper::make("debug_bones", SkeletonAnimation::is_debug_bones, SkeletonAnimation::set_debug_bones);
const DEBUG_SLOTS: PropertyDescriptor<SkeletonAnimation, bool> =
    Helper::make("debug_slots", SkeletonAnimation::is_debug_slots, SkeletonAnimation::set_debug_slots);

// The file pair comes first so the animation and skin names refer to loaded data.
const PROPERTIES: &[&dyn NodeProperty<SkeletonAnimation>] = &[
    &DATA_FILE,
    &ATLAS_FILE,
    &ANIMATION_SCALE,
    &ANIMATION,
    &SKIN,
    &LOOP,
    &TIME_SCALE,
    &BLEND_FUNC,
    &DEBUG_BONES,
    &DEBUG_SLOTS,
];

/// Loader for [`SkeletonAnimation`] nodes
#[derive(Debug, Clone, Copy, Default)]
pub struct SkeletonAnimationLoader;

impl SkeletonAnimationLoader {
    pub const CLASS_NAME: &'static str = "SkeletonAnimation";
}

impl NodeLoader for SkeletonAnimationLoader {
    fn class_name(&self) -> &'static str {
        Self::CLASS_NAME
    }

    fn node_type(&self) -> TypeId {
        TypeId::of::<SkeletonAnimation>()
    }

    fn create_node(&self) -> Box<dyn Node> {
        Box::new(SkeletonAnimation::new())
    }

    fn load_properties(&self, node: &mut dyn Node, handler: &PropertyHandler) -> Result<Vec<LoaderError>> {
        let skeleton = downcast_node_mut::<SkeletonAnimation>(node, Self::CLASS_NAME)?;
        let mut issues = BaseNodeLoader.load_properties(&mut *skeleton, handler)?;
        issues.extend(handler.load_all(PROPERTIES, skeleton));
        Ok(issues)
    }

    fn store_properties(&self, node: &dyn Node, handler: &mut PropertyHandler) -> Result<()> {
        let skeleton = downcast_node::<SkeletonAnimation>(node, Self::CLASS_NAME)?;
        BaseNodeLoader.store_properties(skeleton, handler)?;
        handler.store_all(PROPERTIES, skeleton);
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
