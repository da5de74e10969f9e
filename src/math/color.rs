//! RGBA颜色
//!
//! 单精度线性分量，通道布局 `(r, g, b, a)`。打包格式为 `0xRRGGBBAA`。

use std::fmt;
use std::ops::{Add, Mul, Sub};

use lanemath_simd::Float4;

/// Rec.709 亮度系数
const LUMINANCE_WEIGHTS: [f32; 4] = [0.2126, 0.7152, 0.0722, 0.0];

#[derive(Clone, Copy, PartialEq, Default)]
pub struct Color {
    lanes: Float4,
}

impl Color {
    #[inline]
    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self {
            lanes: Float4::new(r, g, b, a),
        }
    }

    /// 不透明颜色
    #[inline]
    pub fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    #[inline]
    pub fn from_lanes(lanes: Float4) -> Self {
        Self { lanes }
    }

    /// 解码 `0xRRGGBBAA`
    pub fn from_packed(packed: u32) -> Self {
        Self::from_bytes(packed.to_be_bytes())
    }

    /// 编码为 `0xRRGGBBAA`，分量先限制到 `[0, 1]`
    pub fn to_packed(self) -> u32 {
        u32::from_be_bytes(self.to_bytes())
    }

    pub fn from_bytes(bytes: [u8; 4]) -> Self {
        let [r, g, b, a] = bytes.map(f32::from);
        Self {
            lanes: Float4::new(r, g, b, a) / 255.0,
        }
    }

    pub fn to_bytes(self) -> [u8; 4] {
        let scaled = self.clamp().lanes * 255.0 + 0.5;
        // 已限制在 [0.5, 255.5)，截断即四舍五入
        scaled.to_array().map(|c| c as u8)
    }

    pub fn white() -> Self {
        Self::rgb(1.0, 1.0, 1.0)
    }

    pub fn black() -> Self {
        Self::rgb(0.0, 0.0, 0.0)
    }

    pub fn red() -> Self {
        Self::rgb(1.0, 0.0, 0.0)
    }

    pub fn green() -> Self {
        Self::rgb(0.0, 1.0, 0.0)
    }

    pub fn blue() -> Self {
        Self::rgb(0.0, 0.0, 1.0)
    }

    pub fn yellow() -> Self {
        Self::rgb(1.0, 1.0, 0.0)
    }

    pub fn cyan() -> Self {
        Self::rgb(0.0, 1.0, 1.0)
    }

    pub fn magenta() -> Self {
        Self::rgb(1.0, 0.0, 1.0)
    }

    pub fn transparent() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }

    #[inline]
    pub fn r(&self) -> f32 {
        self.lanes.x()
    }

    #[inline]
    pub fn g(&self) -> f32 {
        self.lanes.y()
    }

    #[inline]
    pub fn b(&self) -> f32 {
        self.lanes.z()
    }

    #[inline]
    pub fn a(&self) -> f32 {
        self.lanes.w()
    }

    #[inline]
    pub fn lanes(&self) -> Float4 {
        self.lanes
    }

    #[inline]
    pub fn to_array(&self) -> [f32; 4] {
        self.lanes.to_array()
    }

    #[inline]
    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.lanes.set_w(alpha);
        self
    }

    #[inline]
    pub fn lerp(self, rhs: Self, t: f32) -> Self {
        Self::from_lanes(self.lanes.lerp(rhs.lanes, t))
    }

    /// 所有分量限制到 `[0, 1]`
    #[inline]
    pub fn clamp(self) -> Self {
        Self::from_lanes(self.lanes.clamp(Float4::zero(), Float4::splat(1.0)))
    }

    /// 相对亮度（不含alpha）
    #[inline]
    pub fn luminance(self) -> f32 {
        self.lanes.dot3(Float4::from_array(LUMINANCE_WEIGHTS))
    }

    /// 预乘alpha
    pub fn premultiplied(self) -> Self {
        let a = self.a();
        Self::from_lanes(self.lanes * Float4::new(a, a, a, 1.0))
    }

    /// 以亮度替换RGB，保留alpha
    pub fn grayscale(self) -> Self {
        let l = self.luminance();
        Self::new(l, l, l, self.a())
    }
}

impl Add for Color {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::from_lanes(self.lanes + rhs.lanes)
    }
}

impl Sub for Color {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::from_lanes(self.lanes - rhs.lanes)
    }
}

/// 逐分量调制
impl Mul for Color {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        Self::from_lanes(self.lanes * rhs.lanes)
    }
}

impl Mul<f32> for Color {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: f32) -> Self {
        Self::from_lanes(self.lanes * rhs)
    }
}

impl From<u32> for Color {
    fn from(packed: u32) -> Self {
        Self::from_packed(packed)
    }
}

impl From<[u8; 4]> for Color {
    fn from(bytes: [u8; 4]) -> Self {
        Self::from_bytes(bytes)
    }
}

impl fmt::Debug for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Color")
            .field("r", &self.r())
            .field("g", &self.g())
            .field("b", &self.b())
            .field("a", &self.a())
            .finish()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:08X}", self.to_packed())
    }
}
