//! Value types shared by node kinds

/// 2D point
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Self = Self::new(0.0, 0.0);
    /// Anchor in the middle of the content
    pub const ANCHOR_MIDDLE: Self = Self::new(0.5, 0.5);

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// 2D size
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const ZERO: Self = Self::new(0.0, 0.0);

    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            origin: Point::new(x, y),
            size: Size::new(width, height),
        }
    }
}

/// 24-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color3B {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color3B {
    pub const WHITE: Self = Self::new(255, 255, 255);
    pub const BLACK: Self = Self::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl Default for Color3B {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Source/destination blend factors, stored as GL enum values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlendFunc {
    pub src: u32,
    pub dst: u32,
}

impl BlendFunc {
    pub const ZERO: u32 = 0;
    pub const ONE: u32 = 1;
    pub const SRC_ALPHA: u32 = 0x0302;
    pub const ONE_MINUS_SRC_ALPHA: u32 = 0x0303;

    /// Blending disabled
    pub const DISABLE: Self = Self::new(Self::ONE, Self::ZERO);
    /// Premultiplied alpha
    pub const ALPHA_PREMULTIPLIED: Self = Self::new(Self::ONE, Self::ONE_MINUS_SRC_ALPHA);
    /// Straight alpha
    pub const ALPHA_NON_PREMULTIPLIED: Self = Self::new(Self::SRC_ALPHA, Self::ONE_MINUS_SRC_ALPHA);
    /// Additive blending
    pub const ADDITIVE: Self = Self::new(Self::SRC_ALPHA, Self::ONE);

    pub const fn new(src: u32, dst: u32) -> Self {
        Self { src, dst }
    }
}

impl Default for BlendFunc {
    fn default() -> Self {
        Self::ALPHA_PREMULTIPLIED
    }
}
