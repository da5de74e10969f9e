//! 单位向量
//!
//! 组合而非继承：包装一个 [`Vector3`]，只在构造时归一化一次，
//! 之后不再强制单位长度。算术通过 `Deref` 使用内部向量，结果是普通 `Vector3`。

use std::fmt;
use std::ops::{Deref, Neg};

use lanemath_simd::SimdElement;

use super::Vector3;

/// 声明为单位长度的三维向量
#[derive(Clone, Copy, PartialEq)]
pub struct UnitVector3<T: SimdElement = f32> {
    vector: Vector3<T>,
}

impl<T: SimdElement> UnitVector3<T> {
    /// 归一化后包装
    ///
    /// 与 [`Vector3::normalize`] 一样不检查长度，零向量得到NaN分量。
    #[inline]
    pub fn new(vector: Vector3<T>) -> Self {
        Self {
            vector: vector.normalize(),
        }
    }

    /// 长度过小时返回 `None`
    #[inline]
    pub fn try_new(vector: Vector3<T>) -> Option<Self> {
        vector.try_normalize().map(|vector| Self { vector })
    }

    /// 直接包装，由调用方保证单位长度
    #[inline]
    pub fn new_unchecked(vector: Vector3<T>) -> Self {
        Self { vector }
    }

    #[inline]
    pub fn unit_x() -> Self {
        Self::new_unchecked(Vector3::unit_x())
    }

    #[inline]
    pub fn unit_y() -> Self {
        Self::new_unchecked(Vector3::unit_y())
    }

    #[inline]
    pub fn unit_z() -> Self {
        Self::new_unchecked(Vector3::unit_z())
    }

    #[inline]
    pub fn as_vector(&self) -> &Vector3<T> {
        &self.vector
    }

    #[inline]
    pub fn into_inner(self) -> Vector3<T> {
        self.vector
    }
}

impl<T: SimdElement> Deref for UnitVector3<T> {
    type Target = Vector3<T>;

    #[inline]
    fn deref(&self) -> &Vector3<T> {
        &self.vector
    }
}

impl<T: SimdElement> Neg for UnitVector3<T> {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self::new_unchecked(-self.vector)
    }
}

impl<T: SimdElement> From<UnitVector3<T>> for Vector3<T> {
    #[inline]
    fn from(unit: UnitVector3<T>) -> Self {
        unit.vector
    }
}

impl<T: SimdElement> fmt::Debug for UnitVector3<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("UnitVector3")
            .field(&self.vector.x())
            .field(&self.vector.y())
            .field(&self.vector.z())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalizes_on_construction() {
        let u = UnitVector3::new(Vector3::<f32>::new(0.0, 0.0, 5.0));
        assert!(u.is_normalized());
        assert_eq!(u.into_inner(), Vector3::unit_z());
    }

    #[test]
    fn test_unchecked_is_trusted() {
        let v = Vector3::<f32>::new(2.0, 0.0, 0.0);
        let u = UnitVector3::new_unchecked(v);
        assert!(!u.is_normalized());
        assert_eq!(*u.as_vector(), v);
    }

    #[test]
    fn test_arithmetic_through_deref() {
        let u = UnitVector3::<f64>::unit_x();
        let scaled = *u * 3.0;
        assert_eq!(scaled, Vector3::new(3.0, 0.0, 0.0));
        assert_eq!(u.dot(Vector3::unit_x()), 1.0);
        assert_eq!((-u).x(), -1.0);
    }

    #[test]
    fn test_try_new_rejects_zero() {
        assert!(UnitVector3::try_new(Vector3::<f32>::zero()).is_none());
        assert!(UnitVector3::try_new(Vector3::<f32>::unit_y()).is_some());
    }
}
