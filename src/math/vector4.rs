//! 四维向量

use std::fmt;
use std::ops::{Index, IndexMut};

use lanemath_simd::{Lanes, SimdElement};

use super::{min_normalizable_length_squared, normalized_tolerance, Vector3};

/// 四维向量（齐次坐标、矩阵行）
#[derive(Clone, Copy, PartialEq, Default)]
pub struct Vector4<T: SimdElement = f32> {
    pub(crate) lanes: Lanes<T>,
}

impl<T: SimdElement> Vector4<T> {
    #[inline]
    pub fn new(x: T, y: T, z: T, w: T) -> Self {
        Self {
            lanes: Lanes::new(x, y, z, w),
        }
    }

    #[inline]
    pub fn splat(value: T) -> Self {
        Self {
            lanes: Lanes::splat(value),
        }
    }

    #[inline]
    pub fn zero() -> Self {
        Self {
            lanes: Lanes::zero(),
        }
    }

    #[inline]
    pub fn from_vector3(v: Vector3<T>, w: T) -> Self {
        let mut lanes = v.lanes();
        lanes.set_w(w);
        Self { lanes }
    }

    #[inline]
    pub fn from_lanes(lanes: Lanes<T>) -> Self {
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
    pub fn w(&self) -> T {
        self.lanes.w()
    }

    #[inline]
    pub fn set_w(&mut self, value: T) {
        self.lanes.set_w(value);
    }

    #[inline]
    pub fn to_array(&self) -> [T; 4] {
        self.lanes.to_array()
    }

    /// 前三个分量
    #[inline]
    pub fn xyz(self) -> Vector3<T> {
        Vector3::from_lanes(self.lanes)
    }

    /// 齐次除法：`xyz / w`
    ///
    /// `w` 为零时得到Inf/NaN。
    #[inline]
    pub fn project(self) -> Vector3<T> {
        self.xyz() / self.w()
    }

    #[inline]
    pub fn dot(self, rhs: Self) -> T {
        self.lanes.dot4(rhs.lanes)
    }

    #[inline]
    pub fn length_squared(self) -> T {
        self.dot(self)
    }

    #[inline]
    pub fn length(self) -> T {
        self.length_squared().sqrt()
    }

    /// 归一化，零向量得到NaN
    #[inline]
    pub fn normalize(self) -> Self {
        self / self.length()
    }

    #[inline]
    pub fn is_normalized(self) -> bool {
        (self.length_squared() - T::ONE).abs() <= normalized_tolerance()
    }

    #[inline]
    pub fn can_be_normalized(self) -> bool {
        self.length_squared() > min_normalizable_length_squared()
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
}

impl_vector_ops!(Vector4);

impl<T: SimdElement> Index<usize> for Vector4<T> {
    type Output = T;

    #[inline]
    fn index(&self, index: usize) -> &T {
        &self.lanes[index]
    }
}

impl<T: SimdElement> IndexMut<usize> for Vector4<T> {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.lanes[index]
    }
}

impl<T: SimdElement> From<[T; 4]> for Vector4<T> {
    fn from(v: [T; 4]) -> Self {
        Self::new(v[0], v[1], v[2], v[3])
    }
}

impl<T: SimdElement> fmt::Debug for Vector4<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Vector4")
            .field(&self.x())
            .field(&self.y())
            .field(&self.z())
            .field(&self.w())
            .finish()
    }
}

impl<T: SimdElement> fmt::Display for Vector4<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {}, {})", self.x(), self.y(), self.z(), self.w())
    }
}
