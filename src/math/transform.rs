//! 平移-旋转-缩放变换
//!
//! 作用顺序为先缩放、再旋转、最后平移，对应矩阵 `T * R * S`。

use lanemath_simd::SimdElement;

use super::{Matrix4, Quaternion, Vector3};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform<T: SimdElement = f32> {
    pub translation: Vector3<T>,
    pub rotation: Quaternion<T>,
    pub scale: Vector3<T>,
}

impl<T: SimdElement> Transform<T> {
    #[inline]
    pub fn new(translation: Vector3<T>, rotation: Quaternion<T>, scale: Vector3<T>) -> Self {
        Self {
            translation,
            rotation,
            scale,
        }
    }

    #[inline]
    pub fn identity() -> Self {
        Self::new(Vector3::zero(), Quaternion::identity(), Vector3::one())
    }

    #[inline]
    pub fn from_translation(translation: Vector3<T>) -> Self {
        Self {
            translation,
            ..Self::identity()
        }
    }

    #[inline]
    pub fn from_rotation(rotation: Quaternion<T>) -> Self {
        Self {
            rotation,
            ..Self::identity()
        }
    }

    #[inline]
    pub fn from_scale(scale: Vector3<T>) -> Self {
        Self {
            scale,
            ..Self::identity()
        }
    }

    #[inline]
    pub fn to_matrix(&self) -> Matrix4<T> {
        Matrix4::from_rotation_translation_scale(self.rotation, self.translation, self.scale)
    }

    #[inline]
    pub fn transform_point(&self, point: Vector3<T>) -> Vector3<T> {
        self.translation + self.transform_vector(point)
    }

    /// 变换方向，不受平移影响
    #[inline]
    pub fn transform_vector(&self, vector: Vector3<T>) -> Vector3<T> {
        self.rotation.rotate(vector * self.scale)
    }

    /// 父子组合 `self · child`：结果等价于先应用 `child` 再应用 `self`
    ///
    /// 父变换带非均匀缩放且子变换带旋转时，结果无法用TRS精确表示，缩放按分量相乘近似。
    pub fn combine(&self, child: &Self) -> Self {
        Self {
            translation: self.transform_point(child.translation),
            rotation: self.rotation * child.rotation,
            scale: self.scale * child.scale,
        }
    }

    /// 逆变换，缩放为均匀时精确
    pub fn inverse(&self) -> Self {
        let scale = Vector3::one() / self.scale;
        let rotation = self.rotation.inverse();
        let translation = rotation.rotate(-self.translation) * scale;
        Self {
            translation,
            rotation,
            scale,
        }
    }

    /// 平移和缩放线性插值，旋转球面插值
    pub fn lerp(&self, rhs: &Self, t: T) -> Self {
        Self {
            translation: self.translation.lerp(rhs.translation, t),
            rotation: self.rotation.slerp(rhs.rotation, t),
            scale: self.scale.lerp(rhs.scale, t),
        }
    }
}

impl<T: SimdElement> Default for Transform<T> {
    fn default() -> Self {
        Self::identity()
    }
}
