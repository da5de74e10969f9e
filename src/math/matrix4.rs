//! 4x4矩阵
//!
//! 行主序存储，列向量约定：`M * v`，平移位于每行的 `w` 分量。
//! 投影矩阵为右手坐标系，深度范围 `[0, 1]`。

use std::ops::{Index, Mul};

use lanemath_simd::SimdElement;

use super::{Matrix3, Quaternion, Vector3, Vector4};

/// 4x4矩阵，四行各为一个 [`Vector4`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix4<T: SimdElement = f32> {
    rows: [Vector4<T>; 4],
}

impl<T: SimdElement> Matrix4<T> {
    #[inline]
    pub fn from_rows(r0: Vector4<T>, r1: Vector4<T>, r2: Vector4<T>, r3: Vector4<T>) -> Self {
        Self {
            rows: [r0, r1, r2, r3],
        }
    }

    #[inline]
    pub fn from_cols(c0: Vector4<T>, c1: Vector4<T>, c2: Vector4<T>, c3: Vector4<T>) -> Self {
        Self::from_rows(c0, c1, c2, c3).transpose()
    }

    pub fn identity() -> Self {
        let (o, z) = (T::ONE, T::ZERO);
        Self::from_rows(
            Vector4::new(o, z, z, z),
            Vector4::new(z, o, z, z),
            Vector4::new(z, z, o, z),
            Vector4::new(z, z, z, o),
        )
    }

    #[inline]
    pub fn zero() -> Self {
        Self {
            rows: [Vector4::zero(); 4],
        }
    }

    /// 由3x3块和平移构造仿射矩阵
    pub fn from_matrix3_translation(m: &Matrix3<T>, translation: Vector3<T>) -> Self {
        Self::from_rows(
            m.row(0).extend(translation.x()),
            m.row(1).extend(translation.y()),
            m.row(2).extend(translation.z()),
            Vector4::new(T::ZERO, T::ZERO, T::ZERO, T::ONE),
        )
    }

    #[inline]
    pub fn from_translation(translation: Vector3<T>) -> Self {
        Self::from_matrix3_translation(&Matrix3::identity(), translation)
    }

    #[inline]
    pub fn from_scale(scale: Vector3<T>) -> Self {
        Self::from_matrix3_translation(&Matrix3::from_scale(scale), Vector3::zero())
    }

    /// 绕单位轴旋转 `angle` 弧度
    #[inline]
    pub fn from_axis_angle(axis: Vector3<T>, angle: T) -> Self {
        Self::from_matrix3_translation(&Matrix3::from_axis_angle(axis, angle), Vector3::zero())
    }

    #[inline]
    pub fn from_quaternion(rotation: Quaternion<T>) -> Self {
        rotation.to_matrix4()
    }

    /// `T * R * S`
    pub fn from_rotation_translation_scale(
        rotation: Quaternion<T>,
        translation: Vector3<T>,
        scale: Vector3<T>,
    ) -> Self {
        let r = rotation.to_matrix3();
        let rs = Matrix3::from_rows(r.row(0) * scale, r.row(1) * scale, r.row(2) * scale);
        Self::from_matrix3_translation(&rs, translation)
    }

    /// 透视投影
    ///
    /// `fov_y` 为垂直视场角（弧度），相机看向 `-Z`，近平面映射到深度0，远平面映射到1。
    pub fn perspective(fov_y: T, aspect: T, near: T, far: T) -> Self {
        let z = T::ZERO;
        let h = T::ONE / (fov_y * T::HALF).tan();
        let w = h / aspect;
        let r = far / (near - far);

        Self::from_rows(
            Vector4::new(w, z, z, z),
            Vector4::new(z, h, z, z),
            Vector4::new(z, z, r, r * near),
            Vector4::new(z, z, -T::ONE, z),
        )
    }

    /// 正交投影，深度范围 `[0, 1]`
    pub fn orthographic(left: T, right: T, bottom: T, top: T, near: T, far: T) -> Self {
        let z = T::ZERO;
        let rcp_width = T::ONE / (right - left);
        let rcp_height = T::ONE / (top - bottom);
        let r = T::ONE / (near - far);

        Self::from_rows(
            Vector4::new(T::TWO * rcp_width, z, z, -(left + right) * rcp_width),
            Vector4::new(z, T::TWO * rcp_height, z, -(top + bottom) * rcp_height),
            Vector4::new(z, z, r, r * near),
            Vector4::new(z, z, z, T::ONE),
        )
    }

    /// 观察矩阵（右手），从 `eye` 看向 `target`
    pub fn look_at(eye: Vector3<T>, target: Vector3<T>, up: Vector3<T>) -> Self {
        let f = (target - eye).normalize();
        let s = f.cross(up).normalize();
        let u = s.cross(f);

        Self::from_rows(
            s.extend(-s.dot(eye)),
            u.extend(-u.dot(eye)),
            (-f).extend(f.dot(eye)),
            Vector4::new(T::ZERO, T::ZERO, T::ZERO, T::ONE),
        )
    }

    #[inline]
    pub fn row(&self, index: usize) -> Vector4<T> {
        self.rows[index]
    }

    #[inline]
    pub fn col(&self, index: usize) -> Vector4<T> {
        Vector4::new(
            self.rows[0][index],
            self.rows[1][index],
            self.rows[2][index],
            self.rows[3][index],
        )
    }

    #[inline]
    pub fn rows(&self) -> &[Vector4<T>; 4] {
        &self.rows
    }

    pub fn transpose(&self) -> Self {
        Self::from_rows(self.col(0), self.col(1), self.col(2), self.col(3))
    }

    /// 左上3x3块
    #[inline]
    pub fn upper_left(&self) -> Matrix3<T> {
        Matrix3::from_rows(self.rows[0].xyz(), self.rows[1].xyz(), self.rows[2].xyz())
    }

    /// 平移分量（第四列的前三个元素）
    #[inline]
    pub fn translation(&self) -> Vector3<T> {
        Vector3::new(self.rows[0].w(), self.rows[1].w(), self.rows[2].w())
    }

    pub fn mul_matrix(&self, rhs: &Self) -> Self {
        let [b0, b1, b2, b3] = rhs.rows.map(|r| r.lanes());
        let row = |a: Vector4<T>| {
            let l = a.lanes();
            Vector4::from_lanes(
                b0 * l.broadcast::<0>()
                    + b1 * l.broadcast::<1>()
                    + b2 * l.broadcast::<2>()
                    + b3 * l.broadcast::<3>(),
            )
        };
        Self {
            rows: self.rows.map(row),
        }
    }

    #[inline]
    pub fn mul_vector(&self, v: Vector4<T>) -> Vector4<T> {
        Vector4::new(
            self.rows[0].dot(v),
            self.rows[1].dot(v),
            self.rows[2].dot(v),
            self.rows[3].dot(v),
        )
    }

    /// 变换点（`w = 1`）并做齐次除法
    #[inline]
    pub fn transform_point(&self, point: Vector3<T>) -> Vector3<T> {
        self.mul_vector(point.extend(T::ONE)).project()
    }

    /// 变换方向（`w = 0`），不受平移影响
    #[inline]
    pub fn transform_vector(&self, vector: Vector3<T>) -> Vector3<T> {
        self.mul_vector(vector.extend(T::ZERO)).xyz()
    }

    pub fn determinant(&self) -> T {
        let c = self.cofactor_terms();
        c.determinant()
    }

    /// 逆矩阵
    ///
    /// 行列式恰为零时返回单位矩阵。
    pub fn inverse(&self) -> Self {
        let c = self.cofactor_terms();
        let det = c.determinant();
        if det == T::ZERO {
            return Self::identity();
        }

        let a = self.rows.map(|r| r.to_array());
        let CofactorTerms { s, c } = c;
        let inv_det = T::ONE / det;

        let r0 = Vector4::new(
            a[1][1] * c[5] - a[1][2] * c[4] + a[1][3] * c[3],
            -a[0][1] * c[5] + a[0][2] * c[4] - a[0][3] * c[3],
            a[3][1] * s[5] - a[3][2] * s[4] + a[3][3] * s[3],
            -a[2][1] * s[5] + a[2][2] * s[4] - a[2][3] * s[3],
        );
        let r1 = Vector4::new(
            -a[1][0] * c[5] + a[1][2] * c[2] - a[1][3] * c[1],
            a[0][0] * c[5] - a[0][2] * c[2] + a[0][3] * c[1],
            -a[3][0] * s[5] + a[3][2] * s[2] - a[3][3] * s[1],
            a[2][0] * s[5] - a[2][2] * s[2] + a[2][3] * s[1],
        );
        let r2 = Vector4::new(
            a[1][0] * c[4] - a[1][1] * c[2] + a[1][3] * c[0],
            -a[0][0] * c[4] + a[0][1] * c[2] - a[0][3] * c[0],
            a[3][0] * s[4] - a[3][1] * s[2] + a[3][3] * s[0],
            -a[2][0] * s[4] + a[2][1] * s[2] - a[2][3] * s[0],
        );
        let r3 = Vector4::new(
            -a[1][0] * c[3] + a[1][1] * c[1] - a[1][2] * c[0],
            a[0][0] * c[3] - a[0][1] * c[1] + a[0][2] * c[0],
            -a[3][0] * s[3] + a[3][1] * s[1] - a[3][2] * s[0],
            a[2][0] * s[3] - a[2][1] * s[1] + a[2][2] * s[0],
        );

        Self::from_rows(r0 * inv_det, r1 * inv_det, r2 * inv_det, r3 * inv_det)
    }

    #[inline]
    pub fn scale(&self, factor: T) -> Self {
        Self {
            rows: self.rows.map(|r| r * factor),
        }
    }

    /// 上两行与下两行的2x2子式
    fn cofactor_terms(&self) -> CofactorTerms<T> {
        let a = self.rows.map(|r| r.to_array());
        let minor = |r0: usize, r1: usize, i: usize, j: usize| a[r0][i] * a[r1][j] - a[r1][i] * a[r0][j];

        CofactorTerms {
            s: [
                minor(0, 1, 0, 1),
                minor(0, 1, 0, 2),
                minor(0, 1, 0, 3),
                minor(0, 1, 1, 2),
                minor(0, 1, 1, 3),
                minor(0, 1, 2, 3),
            ],
            c: [
                minor(2, 3, 0, 1),
                minor(2, 3, 0, 2),
                minor(2, 3, 0, 3),
                minor(2, 3, 1, 2),
                minor(2, 3, 1, 3),
                minor(2, 3, 2, 3),
            ],
        }
    }
}

struct CofactorTerms<T> {
    s: [T; 6],
    c: [T; 6],
}

impl<T: SimdElement> CofactorTerms<T> {
    #[inline]
    fn determinant(&self) -> T {
        let (s, c) = (&self.s, &self.c);
        s[0] * c[5] - s[1] * c[4] + s[2] * c[3] + s[3] * c[2] - s[4] * c[1] + s[5] * c[0]
    }
}

impl<T: SimdElement> Default for Matrix4<T> {
    fn default() -> Self {
        Self::identity()
    }
}

impl<T: SimdElement> Mul for Matrix4<T> {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        self.mul_matrix(&rhs)
    }
}

impl<T: SimdElement> Mul<Vector4<T>> for Matrix4<T> {
    type Output = Vector4<T>;

    #[inline]
    fn mul(self, rhs: Vector4<T>) -> Vector4<T> {
        self.mul_vector(rhs)
    }
}

impl<T: SimdElement> Index<usize> for Matrix4<T> {
    type Output = Vector4<T>;

    #[inline]
    fn index(&self, index: usize) -> &Vector4<T> {
        &self.rows[index]
    }
}
