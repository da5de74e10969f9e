//! 二维向量

use std::fmt;
use std::ops::Index;

use lanemath_simd::{Lanes, SimdElement};

use super::{min_normalizable_length_squared, normalized_tolerance};

/// 二维向量，通道2、3恒为零
#[derive(Clone, Copy, PartialEq, Default)]
pub struct Vector2<T: SimdElement = f32> {
    lanes: Lanes<T>,
}

impl<T: SimdElement> Vector2<T> {
    #[inline]
    pub fn new(x: T, y: T) -> Self {
        Self {
            lanes: Lanes::new(x, y, T::ZERO, T::ZERO),
        }
    }

    #[inline]
    pub fn splat(value: T) -> Self {
        Self::new(value, value)
    }

    #[inline]
    pub fn zero() -> Self {
        Self {
            lanes: Lanes::zero(),
        }
    }

    #[inline]
    pub fn one() -> Self {
        Self::splat(T::ONE)
    }

    #[inline]
    pub fn unit_x() -> Self {
        Self::new(T::ONE, T::ZERO)
    }

    #[inline]
    pub fn unit_y() -> Self {
        Self::new(T::ZERO, T::ONE)
    }

    /// 由4通道值构造，填充通道被清零
    #[inline]
    pub fn from_lanes(lanes: Lanes<T>) -> Self {
        let mut lanes = lanes;
        lanes.set_z(T::ZERO);
        lanes.set_w(T::ZERO);
        Self { lanes }
    }

    #[inline]
    pub fn lanes(&self) -> Lanes<T> {
        self.lanes
    }

    #[inline]
    pub fn x(&self) -> T {
        self.lanes.x()
    }

    #[inline]
    pub fn y(&self) -> T {
        self.lanes.y()
    }

    #[inline]
    pub fn set_x(&mut self, value: T) {
        self.lanes.set_x(value);
    }

    #[inline]
    pub fn set_y(&mut self, value: T) {
        self.lanes.set_y(value);
    }

    #[inline]
    pub fn to_array(&self) -> [T; 2] {
        [self.x(), self.y()]
    }

    #[inline]
    pub fn dot(self, rhs: Self) -> T {
        self.lanes.dot2(rhs.lanes)
    }

    /// 二维叉积（z分量）
    #[inline]
    pub fn cross(self, rhs: Self) -> T {
        self.x() * rhs.y() - self.y() * rhs.x()
    }

    #[inline]
    pub fn length_squared(self) -> T {
        self.dot(self)
    }

    #[inline]
    pub fn length(self) -> T {
        self.length_squared().sqrt()
    }

    #[inline]
    pub fn distance_squared(self, rhs: Self) -> T {
        (self - rhs).length_squared()
    }

    #[inline]
    pub fn distance(self, rhs: Self) -> T {
        (self - rhs).length()
    }

    /// 归一化
    ///
    /// 不检查长度，零向量得到NaN。需要安全归一化时先调用 [`Self::can_be_normalized`]。
    #[inline]
    pub fn normalize(self) -> Self {
        self / self.length()
    }

    /// 长度过小时返回 `None`
    #[inline]
    pub fn try_normalize(self) -> Option<Self> {
        self.can_be_normalized().then(|| self.normalize())
    }

    /// `|len² - 1| <= 1e-5`
    #[inline]
    pub fn is_normalized(self) -> bool {
        (self.length_squared() - T::ONE).abs() <= normalized_tolerance()
    }

    /// `len² > 1e-12`
    #[inline]
    pub fn can_be_normalized(self) -> bool {
        self.length_squared() > min_normalizable_length_squared()
    }

    /// 逆时针旋转90度
    #[inline]
    pub fn perpendicular(self) -> Self {
        Self::new(-self.y(), self.x())
    }

    #[inline]
    pub fn lerp(self, rhs: Self, t: T) -> Self {
        Self::from_lanes(self.lanes.lerp(rhs.lanes, t))
    }

    #[inline]
    pub fn min(self, rhs: Self) -> Self {
        Self::from_lanes(self.lanes.min(rhs.lanes))
    }

    #[inline]
    pub fn max(self, rhs: Self) -> Self {
        Self::from_lanes(self.lanes.max(rhs.lanes))
    }

    #[inline]
    pub fn abs(self) -> Self {
        Self::from_lanes(self.lanes.abs())
    }

    /// 两个分量都小于 `rhs`
    #[inline]
    pub fn all_lt(self, rhs: Self) -> bool {
        let mask = self.lanes.cmp_lt(rhs.lanes);
        mask[0] && mask[1]
    }

    #[inline]
    pub fn all_le(self, rhs: Self) -> bool {
        let mask = self.lanes.cmp_le(rhs.lanes);
        mask[0] && mask[1]
    }

    #[inline]
    pub fn all_gt(self, rhs: Self) -> bool {
        let mask = self.lanes.cmp_gt(rhs.lanes);
        mask[0] && mask[1]
    }

    #[inline]
    pub fn all_ge(self, rhs: Self) -> bool {
        let mask = self.lanes.cmp_ge(rhs.lanes);
        mask[0] && mask[1]
    }
}

impl_vector_ops!(Vector2);

impl<T: SimdElement> Index<usize> for Vector2<T> {
    type Output = T;

    #[inline]
    fn index(&self, index: usize) -> &T {
        debug_assert!(index < 2, "Vector2 index out of range: {}", index);
        &self.lanes[index]
    }
}

impl<T: SimdElement> From<[T; 2]> for Vector2<T> {
    fn from(v: [T; 2]) -> Self {
        Self::new(v[0], v[1])
    }
}

impl<T: SimdElement> fmt::Debug for Vector2<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Vector2").field(&self.x()).field(&self.y()).finish()
    }
}

impl<T: SimdElement> fmt::Display for Vector2<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x(), self.y())
    }
}
