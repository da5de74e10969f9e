//! 三维向量

use std::fmt;
use std::ops::{Index, IndexMut};

use lanemath_simd::{Lanes, SimdElement};

use super::{min_normalizable_length_squared, normalized_tolerance, Vector4};

/// 三维向量，通道3恒为零
#[derive(Clone, Copy, PartialEq, Default)]
pub struct Vector3<T: SimdElement = f32> {
    pub(crate) lanes: Lanes<T>,
}

impl<T: SimdElement> Vector3<T> {
    #[inline]
    pub fn new(x: T, y: T, z: T) -> Self {
        Self {
            lanes: Lanes::new(x, y, z, T::ZERO),
        }
    }

    #[inline]
    pub fn splat(value: T) -> Self {
        Self::new(value, value, value)
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
        Self::new(T::ONE, T::ZERO, T::ZERO)
    }

    #[inline]
    pub fn unit_y() -> Self {
        Self::new(T::ZERO, T::ONE, T::ZERO)
    }

    #[inline]
    pub fn unit_z() -> Self {
        Self::new(T::ZERO, T::ZERO, T::ONE)
    }

    /// 由4通道值构造，通道3被清零
    #[inline]
    pub fn from_lanes(lanes: Lanes<T>) -> Self {
        let mut lanes = lanes;
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
    pub fn z(&self) -> T {
        self.lanes.z()
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
    pub fn set_z(&mut self, value: T) {
        self.lanes.set_z(value);
    }

    #[inline]
    pub fn to_array(&self) -> [T; 3] {
        [self.x(), self.y(), self.z()]
    }

    /// 扩展为四维向量
    #[inline]
    pub fn extend(self, w: T) -> Vector4<T> {
        Vector4::from_vector3(self, w)
    }

    #[inline]
    pub fn dot(self, rhs: Self) -> T {
        self.lanes.dot3(rhs.lanes)
    }

    #[inline]
    pub fn cross(self, rhs: Self) -> Self {
        // (a.yzx * b.zxy) - (a.zxy * b.yzx)，通道3两侧均为零
        let a_yzx = self.lanes.shuffle::<1, 2, 0, 3>();
        let a_zxy = self.lanes.shuffle::<2, 0, 1, 3>();
        let b_yzx = rhs.lanes.shuffle::<1, 2, 0, 3>();
        let b_zxy = rhs.lanes.shuffle::<2, 0, 1, 3>();
        Self::from_lanes(a_yzx * b_zxy - a_zxy * b_yzx)
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

    /// 关于法线 `normal`（单位长度）的反射
    #[inline]
    pub fn reflect(self, normal: Self) -> Self {
        self - normal * (T::TWO * self.dot(normal))
    }

    /// 两个向量之间的夹角（弧度）
    #[inline]
    pub fn angle_between(self, rhs: Self) -> T {
        let cos = self.dot(rhs) / (self.length() * rhs.length());
        cos.clamp_to(-T::ONE, T::ONE).acos()
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

    /// 逐分量限制到 `[lo, hi]`
    #[inline]
    pub fn clamp(self, lo: Self, hi: Self) -> Self {
        Self::from_lanes(self.lanes.clamp(lo.lanes, hi.lanes))
    }

    /// 最小分量
    #[inline]
    pub fn min_element(self) -> T {
        self.x().lane_min(self.y()).lane_min(self.z())
    }

    /// 最大分量
    #[inline]
    pub fn max_element(self) -> T {
        self.x().lane_max(self.y()).lane_max(self.z())
    }

    /// 三个分量都小于 `rhs`
    #[inline]
    pub fn all_lt(self, rhs: Self) -> bool {
        let mask = self.lanes.cmp_lt(rhs.lanes);
        mask[0] && mask[1] && mask[2]
    }

    #[inline]
    pub fn all_le(self, rhs: Self) -> bool {
        let mask = self.lanes.cmp_le(rhs.lanes);
        mask[0] && mask[1] && mask[2]
    }

    #[inline]
    pub fn all_gt(self, rhs: Self) -> bool {
        let mask = self.lanes.cmp_gt(rhs.lanes);
        mask[0] && mask[1] && mask[2]
    }

    #[inline]
    pub fn all_ge(self, rhs: Self) -> bool {
        let mask = self.lanes.cmp_ge(rhs.lanes);
        mask[0] && mask[1] && mask[2]
    }

    /// 至少一个分量大于 `rhs`
    #[inline]
    pub fn any_gt(self, rhs: Self) -> bool {
        let mask = self.lanes.cmp_gt(rhs.lanes);
        mask[0] || mask[1] || mask[2]
    }
}

impl_vector_ops!(Vector3);

impl<T: SimdElement> Index<usize> for Vector3<T> {
    type Output = T;

    #[inline]
    fn index(&self, index: usize) -> &T {
        debug_assert!(index < 3, "Vector3 index out of range: {}", index);
        &self.lanes[index]
    }
}

impl<T: SimdElement> IndexMut<usize> for Vector3<T> {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut T {
        debug_assert!(index < 3, "Vector3 index out of range: {}", index);
        &mut self.lanes[index]
    }
}

impl<T: SimdElement> From<[T; 3]> for Vector3<T> {
    fn from(v: [T; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }
}

impl<T: SimdElement> fmt::Debug for Vector3<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Vector3")
            .field(&self.x())
            .field(&self.y())
            .field(&self.z())
            .finish()
    }
}

impl<T: SimdElement> fmt::Display for Vector3<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x(), self.y(), self.z())
    }
}
