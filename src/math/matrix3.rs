//! 3x3矩阵
//!
//! 行主序，按列向量约定变换：`M * v`。

use std::ops::{Index, Mul};

use lanemath_simd::SimdElement;

use super::{Quaternion, Vector3};

/// 3x3矩阵，三行各为一个 [`Vector3`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix3<T: SimdElement = f32> {
    rows: [Vector3<T>; 3],
}

impl<T: SimdElement> Matrix3<T> {
    #[inline]
    pub fn from_rows(r0: Vector3<T>, r1: Vector3<T>, r2: Vector3<T>) -> Self {
        Self { rows: [r0, r1, r2] }
    }

    #[inline]
    pub fn from_cols(c0: Vector3<T>, c1: Vector3<T>, c2: Vector3<T>) -> Self {
        Self::from_rows(c0, c1, c2).transpose()
    }

    #[inline]
    pub fn identity() -> Self {
        Self::from_rows(Vector3::unit_x(), Vector3::unit_y(), Vector3::unit_z())
    }

    #[inline]
    pub fn zero() -> Self {
        Self::from_rows(Vector3::zero(), Vector3::zero(), Vector3::zero())
    }

    /// 对角缩放矩阵
    #[inline]
    pub fn from_scale(scale: Vector3<T>) -> Self {
        Self::from_rows(
            Vector3::new(scale.x(), T::ZERO, T::ZERO),
            Vector3::new(T::ZERO, scale.y(), T::ZERO),
            Vector3::new(T::ZERO, T::ZERO, scale.z()),
        )
    }

    /// 绕单位轴 `axis` 旋转 `angle` 弧度（右手）
    pub fn from_axis_angle(axis: Vector3<T>, angle: T) -> Self {
        let (s, c) = (angle.sin(), angle.cos());
        let t = T::ONE - c;
        let (x, y, z) = (axis.x(), axis.y(), axis.z());

        Self::from_rows(
            Vector3::new(c + x * x * t, x * y * t - z * s, x * z * t + y * s),
            Vector3::new(x * y * t + z * s, c + y * y * t, y * z * t - x * s),
            Vector3::new(x * z * t - y * s, y * z * t + x * s, c + z * z * t),
        )
    }

    /// 由四元数构造旋转矩阵
    #[inline]
    pub fn from_quaternion(rotation: Quaternion<T>) -> Self {
        rotation.to_matrix3()
    }

    #[inline]
    pub fn row(&self, index: usize) -> Vector3<T> {
        self.rows[index]
    }

    #[inline]
    pub fn col(&self, index: usize) -> Vector3<T> {
        Vector3::new(self.rows[0][index], self.rows[1][index], self.rows[2][index])
    }

    #[inline]
    pub fn rows(&self) -> &[Vector3<T>; 3] {
        &self.rows
    }

    pub fn transpose(&self) -> Self {
        Self::from_rows(self.col(0), self.col(1), self.col(2))
    }

    /// 行列式 `r0 · (r1 × r2)`
    #[inline]
    pub fn determinant(&self) -> T {
        self.rows[0].dot(self.rows[1].cross(self.rows[2]))
    }

    /// 逆矩阵
    ///
    /// 行列式恰为零时返回单位矩阵。
    pub fn inverse(&self) -> Self {
        let det = self.determinant();
        if det == T::ZERO {
            return Self::identity();
        }

        let [r0, r1, r2] = self.rows;
        let inv_det = T::ONE / det;
        Self::from_cols(
            r1.cross(r2) * inv_det,
            r2.cross(r0) * inv_det,
            r0.cross(r1) * inv_det,
        )
    }

    #[inline]
    pub fn mul_vector(&self, v: Vector3<T>) -> Vector3<T> {
        Vector3::new(self.rows[0].dot(v), self.rows[1].dot(v), self.rows[2].dot(v))
    }

    pub fn mul_matrix(&self, rhs: &Self) -> Self {
        let [b0, b1, b2] = rhs.rows.map(|r| r.lanes());
        let row = |a: Vector3<T>| {
            let l = a.lanes();
            Vector3::from_lanes(
                b0 * l.broadcast::<0>() + b1 * l.broadcast::<1>() + b2 * l.broadcast::<2>(),
            )
        };
        Self::from_rows(row(self.rows[0]), row(self.rows[1]), row(self.rows[2]))
    }

    #[inline]
    pub fn scale(&self, factor: T) -> Self {
        Self {
            rows: self.rows.map(|r| r * factor),
        }
    }
}

impl<T: SimdElement> Default for Matrix3<T> {
    fn default() -> Self {
        Self::identity()
    }
}

impl<T: SimdElement> Mul for Matrix3<T> {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        self.mul_matrix(&rhs)
    }
}

impl<T: SimdElement> Mul<Vector3<T>> for Matrix3<T> {
    type Output = Vector3<T>;

    #[inline]
    fn mul(self, rhs: Vector3<T>) -> Vector3<T> {
        self.mul_vector(rhs)
    }
}

impl<T: SimdElement> Index<usize> for Matrix3<T> {
    type Output = Vector3<T>;

    #[inline]
    fn index(&self, index: usize) -> &Vector3<T> {
        &self.rows[index]
    }
}
