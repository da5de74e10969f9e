//! 四元数
//!
//! 通道布局 `(x, y, z, w)`，`w` 为实部。旋转只在显式调用 [`Quaternion::normalize`]
//! 时归一化，乘法和插值不会自动修正漂移。

use std::fmt;
use std::ops::{Mul, Neg};

use lanemath_simd::{Lanes, SimdElement};

use super::{normalized_tolerance, Matrix3, Matrix4, Vector3};

/// 旋转四元数
#[derive(Clone, Copy, PartialEq)]
pub struct Quaternion<T: SimdElement = f32> {
    lanes: Lanes<T>,
}

impl<T: SimdElement> Quaternion<T> {
    #[inline]
    pub fn new(x: T, y: T, z: T, w: T) -> Self {
        Self {
            lanes: Lanes::new(x, y, z, w),
        }
    }

    #[inline]
    pub fn identity() -> Self {
        Self::new(T::ZERO, T::ZERO, T::ZERO, T::ONE)
    }

    #[inline]
    pub fn from_lanes(lanes: Lanes<T>) -> Self {
        Self { lanes }
    }

    /// 绕单位轴 `axis` 旋转 `angle` 弧度
    pub fn from_axis_angle(axis: Vector3<T>, angle: T) -> Self {
        let half = angle * T::HALF;
        let mut lanes = (axis * half.sin()).lanes();
        lanes.set_w(half.cos());
        Self { lanes }
    }

    /// 欧拉角，依次绕X、Y、Z轴：`qx * qy * qz`
    pub fn from_euler(x: T, y: T, z: T) -> Self {
        Self::from_axis_angle(Vector3::unit_x(), x)
            * Self::from_axis_angle(Vector3::unit_y(), y)
            * Self::from_axis_angle(Vector3::unit_z(), z)
    }

    /// 由纯旋转矩阵构造
    pub fn from_matrix3(m: &Matrix3<T>) -> Self {
        let (m00, m11, m22) = (m[0][0], m[1][1], m[2][2]);
        let trace = m00 + m11 + m22;
        let quarter = T::HALF * T::HALF;

        if trace > T::ZERO {
            let s = (trace + T::ONE).sqrt() * T::TWO;
            Self::new(
                (m[2][1] - m[1][2]) / s,
                (m[0][2] - m[2][0]) / s,
                (m[1][0] - m[0][1]) / s,
                quarter * s,
            )
        } else if m00 > m11 && m00 > m22 {
            let s = (T::ONE + m00 - m11 - m22).sqrt() * T::TWO;
            Self::new(
                quarter * s,
                (m[0][1] + m[1][0]) / s,
                (m[0][2] + m[2][0]) / s,
                (m[2][1] - m[1][2]) / s,
            )
        } else if m11 > m22 {
            let s = (T::ONE + m11 - m00 - m22).sqrt() * T::TWO;
            Self::new(
                (m[0][1] + m[1][0]) / s,
                quarter * s,
                (m[1][2] + m[2][1]) / s,
                (m[0][2] - m[2][0]) / s,
            )
        } else {
            let s = (T::ONE + m22 - m00 - m11).sqrt() * T::TWO;
            Self::new(
                (m[0][2] + m[2][0]) / s,
                (m[1][2] + m[2][1]) / s,
                quarter * s,
                (m[1][0] - m[0][1]) / s,
            )
        }
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

    /// 虚部
    #[inline]
    pub fn xyz(&self) -> Vector3<T> {
        Vector3::from_lanes(self.lanes)
    }

    #[inline]
    pub fn to_array(&self) -> [T; 4] {
        self.lanes.to_array()
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

    /// 归一化，零四元数得到NaN
    #[inline]
    pub fn normalize(self) -> Self {
        Self::from_lanes(self.lanes / Lanes::splat(self.length()))
    }

    #[inline]
    pub fn is_normalized(self) -> bool {
        (self.length_squared() - T::ONE).abs() <= normalized_tolerance()
    }

    #[inline]
    pub fn conjugate(self) -> Self {
        Self::from_lanes(self.lanes * Lanes::new(-T::ONE, -T::ONE, -T::ONE, T::ONE))
    }

    /// 逆四元数
    ///
    /// 范数恰为零时返回单位四元数。
    pub fn inverse(self) -> Self {
        let norm = self.length_squared();
        if norm == T::ZERO {
            return Self::identity();
        }
        Self::from_lanes(self.conjugate().lanes / Lanes::splat(norm))
    }

    /// Hamilton积 `self * rhs`（先应用 `rhs`）
    pub fn mul_quaternion(self, rhs: Self) -> Self {
        let (q1, q2) = (self.lanes, rhs.lanes);
        let sign = Lanes::new(T::ONE, T::ONE, T::ONE, -T::ONE);

        let a = q1.broadcast::<3>() * q2;
        let b = q1.shuffle::<0, 1, 2, 0>() * q2.shuffle::<3, 3, 3, 0>();
        let c = q1.shuffle::<1, 2, 0, 1>() * q2.shuffle::<2, 0, 1, 1>();
        let d = q1.shuffle::<2, 0, 1, 2>() * q2.shuffle::<1, 2, 0, 2>();

        Self::from_lanes(a + b * sign + c * sign - d)
    }

    /// 旋转向量，要求单位四元数
    pub fn rotate(self, v: Vector3<T>) -> Vector3<T> {
        let u = self.xyz();
        let t = u.cross(v) * T::TWO;
        v + t * self.w() + u.cross(t)
    }

    /// 归一化线性插值
    pub fn nlerp(self, rhs: Self, t: T) -> Self {
        let rhs = if self.dot(rhs) < T::ZERO { -rhs } else { rhs };
        Self::from_lanes(self.lanes.lerp(rhs.lanes, t)).normalize()
    }

    /// 球面线性插值，走最短弧
    pub fn slerp(self, rhs: Self, t: T) -> Self {
        let mut cos = self.dot(rhs);
        let mut rhs = rhs;
        if cos < T::ZERO {
            cos = -cos;
            rhs = -rhs;
        }

        // 夹角过小时退化为nlerp
        if cos > T::ONE - T::from_f64(1.0e-6) {
            return self.nlerp(rhs, t);
        }

        let theta = cos.acos();
        let sin_theta = theta.sin();
        let wa = ((T::ONE - t) * theta).sin() / sin_theta;
        let wb = (t * theta).sin() / sin_theta;
        Self::from_lanes(self.lanes.scale(wa) + rhs.lanes.scale(wb))
    }

    /// 转换为旋转轴和角度，单位旋转返回X轴
    pub fn to_axis_angle(self) -> (Vector3<T>, T) {
        let q = self.normalize();
        let w = q.w().clamp_to(-T::ONE, T::ONE);
        let angle = T::TWO * w.acos();
        let s = (T::ONE - w * w).sqrt();
        if s < T::from_f64(1.0e-6) {
            (Vector3::unit_x(), angle)
        } else {
            (q.xyz() / s, angle)
        }
    }

    pub fn to_matrix3(self) -> Matrix3<T> {
        let (x, y, z, w) = (self.x(), self.y(), self.z(), self.w());
        let (x2, y2, z2) = (x + x, y + y, z + z);
        let (xx, yy, zz) = (x * x2, y * y2, z * z2);
        let (xy, xz, yz) = (x * y2, x * z2, y * z2);
        let (wx, wy, wz) = (w * x2, w * y2, w * z2);
        let one = T::ONE;

        Matrix3::from_rows(
            Vector3::new(one - (yy + zz), xy - wz, xz + wy),
            Vector3::new(xy + wz, one - (xx + zz), yz - wx),
            Vector3::new(xz - wy, yz + wx, one - (xx + yy)),
        )
    }

    #[inline]
    pub fn to_matrix4(self) -> Matrix4<T> {
        Matrix4::from_matrix3_translation(&self.to_matrix3(), Vector3::zero())
    }
}

impl<T: SimdElement> Default for Quaternion<T> {
    fn default() -> Self {
        Self::identity()
    }
}

impl<T: SimdElement> Mul for Quaternion<T> {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        self.mul_quaternion(rhs)
    }
}

impl<T: SimdElement> Mul<Vector3<T>> for Quaternion<T> {
    type Output = Vector3<T>;

    #[inline]
    fn mul(self, rhs: Vector3<T>) -> Vector3<T> {
        self.rotate(rhs)
    }
}

impl<T: SimdElement> Neg for Quaternion<T> {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self::from_lanes(-self.lanes)
    }
}

impl<T: SimdElement> fmt::Debug for Quaternion<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Quaternion")
            .field("x", &self.x())
            .field("y", &self.y())
            .field("z", &self.z())
            .field("w", &self.w())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    fn close(a: Vector3<f64>, b: Vector3<f64>) -> bool {
        (a - b).length() < 1e-9
    }

    #[test]
    fn test_hamilton_product_basis() {
        let i = Quaternion::<f64>::new(1.0, 0.0, 0.0, 0.0);
        let j = Quaternion::new(0.0, 1.0, 0.0, 0.0);
        let k = Quaternion::new(0.0, 0.0, 1.0, 0.0);
        assert_eq!(i * j, k);
        assert_eq!(j * k, i);
        assert_eq!(k * i, j);
        assert_eq!(i * i, Quaternion::new(0.0, 0.0, 0.0, -1.0));
        assert_eq!(j * i, -k);
    }

    #[test]
    fn test_rotate_vector() {
        let q = Quaternion::<f64>::from_axis_angle(Vector3::unit_z(), FRAC_PI_2);
        assert!(q.is_normalized());
        assert!(close(q * Vector3::unit_x(), Vector3::unit_y()));
        assert!(close(q.to_matrix3() * Vector3::unit_x(), Vector3::unit_y()));
    }

    #[test]
    fn test_composition_matches_matrices() {
        let a = Quaternion::<f64>::from_axis_angle(Vector3::unit_x(), 0.4);
        let b = Quaternion::from_axis_angle(Vector3::new(1.0, 1.0, 0.0).normalize(), -1.1);
        let v = Vector3::new(0.3, -2.0, 1.5);
        assert!(close((a * b) * v, a * (b * v)));
        assert!(close((a * b).to_matrix3() * v, a.to_matrix3() * (b.to_matrix3() * v)));
    }

    #[test]
    fn test_inverse_and_conjugate() {
        let q = Quaternion::<f64>::new(1.0, 2.0, 3.0, 4.0);
        let p = q * q.inverse();
        assert!((p.w() - 1.0).abs() < 1e-12 && p.xyz().length() < 1e-12);
        assert_eq!(q.conjugate(), Quaternion::new(-1.0, -2.0, -3.0, 4.0));
        assert_eq!(Quaternion::<f32>::new(0.0, 0.0, 0.0, 0.0).inverse(), Quaternion::identity());
    }

    #[test]
    fn test_multiplication_does_not_renormalize() {
        let q = Quaternion::<f64>::new(0.0, 0.0, 0.0, 2.0);
        assert_eq!((q * q).w(), 4.0);
        assert!(!q.is_normalized());
        assert!(q.normalize().is_normalized());
    }

    #[test]
    fn test_slerp_endpoints_and_midpoint() {
        let a = Quaternion::<f64>::identity();
        let b = Quaternion::from_axis_angle(Vector3::unit_y(), FRAC_PI_2);
        assert!((a.slerp(b, 0.0).dot(a) - 1.0).abs() < 1e-12);
        assert!((a.slerp(b, 1.0).dot(b) - 1.0).abs() < 1e-12);

        let mid = a.slerp(b, 0.5);
        let expected = Quaternion::from_axis_angle(Vector3::unit_y(), FRAC_PI_2 / 2.0);
        assert!((mid.dot(expected) - 1.0).abs() < 1e-12);
        assert!(a.nlerp(b, 0.5).is_normalized());
    }

    #[test]
    fn test_axis_angle_round_trip() {
        let axis = Vector3::<f64>::new(0.0, 3.0, 4.0).normalize();
        let (a, angle) = Quaternion::from_axis_angle(axis, 2.0).to_axis_angle();
        assert!(close(a, axis));
        assert!((angle - 2.0).abs() < 1e-9);

        let (a, angle) = Quaternion::<f64>::identity().to_axis_angle();
        assert_eq!(a, Vector3::unit_x());
        assert_eq!(angle, 0.0);
    }

    #[test]
    fn test_from_matrix_round_trip() {
        for angle in [0.3, 2.0, PI - 0.01] {
            for axis in [Vector3::unit_x(), Vector3::unit_y(), Vector3::new(1.0, -1.0, 2.0).normalize()] {
                let q = Quaternion::<f64>::from_axis_angle(axis, angle);
                let back = Quaternion::from_matrix3(&q.to_matrix3());
                assert!((q.dot(back).abs() - 1.0).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_euler_order() {
        let q = Quaternion::<f64>::from_euler(0.0, 0.0, FRAC_PI_2);
        assert!(close(q * Vector3::unit_x(), Vector3::unit_y()));
        let q = Quaternion::<f64>::from_euler(FRAC_PI_2, FRAC_PI_2, 0.0);
        // qx * qy：先绕Y再绕X
        assert!(close(q * Vector3::unit_z(), Vector3::unit_x()));
    }
}
