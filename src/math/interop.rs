//! 与 `glam` 的互转（单精度）

use glam::{Mat3, Mat4, Quat, Vec2, Vec3, Vec4};

use super::{Matrix3, Matrix4, Quaternion, Vector2, Vector3, Vector4};

impl From<Vec2> for Vector2<f32> {
    #[inline]
    fn from(v: Vec2) -> Self {
        Self::new(v.x, v.y)
    }
}

impl From<Vector2<f32>> for Vec2 {
    #[inline]
    fn from(v: Vector2<f32>) -> Self {
        Vec2::new(v.x(), v.y())
    }
}

impl From<Vec3> for Vector3<f32> {
    #[inline]
    fn from(v: Vec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl From<Vector3<f32>> for Vec3 {
    #[inline]
    fn from(v: Vector3<f32>) -> Self {
        Vec3::from_array(v.to_array())
    }
}

impl From<Vec4> for Vector4<f32> {
    #[inline]
    fn from(v: Vec4) -> Self {
        Self::from(v.to_array())
    }
}

impl From<Vector4<f32>> for Vec4 {
    #[inline]
    fn from(v: Vector4<f32>) -> Self {
        Vec4::from_array(v.to_array())
    }
}

impl From<Quat> for Quaternion<f32> {
    #[inline]
    fn from(q: Quat) -> Self {
        Self::new(q.x, q.y, q.z, q.w)
    }
}

impl From<Quaternion<f32>> for Quat {
    #[inline]
    fn from(q: Quaternion<f32>) -> Self {
        Quat::from_xyzw(q.x(), q.y(), q.z(), q.w())
    }
}

// glam 按列存储，这里按列搬运
impl From<Mat3> for Matrix3<f32> {
    fn from(m: Mat3) -> Self {
        Self::from_cols(m.x_axis.into(), m.y_axis.into(), m.z_axis.into())
    }
}

impl From<Matrix3<f32>> for Mat3 {
    fn from(m: Matrix3<f32>) -> Self {
        Mat3::from_cols(m.col(0).into(), m.col(1).into(), m.col(2).into())
    }
}

impl From<Mat4> for Matrix4<f32> {
    fn from(m: Mat4) -> Self {
        Self::from_cols(
            m.x_axis.into(),
            m.y_axis.into(),
            m.z_axis.into(),
            m.w_axis.into(),
        )
    }
}

impl From<Matrix4<f32>> for Mat4 {
    fn from(m: Matrix4<f32>) -> Self {
        Mat4::from_cols(
            m.col(0).into(),
            m.col(1).into(),
            m.col(2).into(),
            m.col(3).into(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::EulerRot;

    const EPS: f32 = 1e-5;

    fn assert_mat4(ours: Matrix4<f32>, theirs: Mat4) {
        let converted: Mat4 = ours.into();
        assert!(
            converted.abs_diff_eq(theirs, EPS),
            "{:?} != {:?}",
            converted,
            theirs
        );
    }

    fn sample() -> Matrix4<f32> {
        Matrix4::from_rows(
            Vector4::new(2.0, 0.5, -1.0, 3.0),
            Vector4::new(0.0, 1.5, 2.0, -1.0),
            Vector4::new(1.0, -2.0, 4.0, 0.5),
            Vector4::new(0.25, 0.0, 1.0, 1.0),
        )
    }

    #[test]
    fn test_vector_round_trip() {
        let v: Vector3 = Vector3::new(1.0, -2.0, 3.5);
        let g: Vec3 = v.into();
        assert_eq!(g, Vec3::new(1.0, -2.0, 3.5));
        assert_eq!(Vector3::from(g), v);

        let v2: Vector2 = Vec2::new(4.0, 5.0).into();
        assert_eq!(Vec2::from(v2), Vec2::new(4.0, 5.0));
        let v4: Vector4 = Vec4::new(1.0, 2.0, 3.0, 4.0).into();
        assert_eq!(Vec4::from(v4), Vec4::new(1.0, 2.0, 3.0, 4.0));
    }

    #[test]
    fn test_matrix_layout() {
        let m = sample();
        let g: Mat4 = m.into();
        // 我们的行是 glam 的行
        assert_eq!(g.row(0), Vec4::new(2.0, 0.5, -1.0, 3.0));
        assert_eq!(Matrix4::from(g), m);

        let m3 = m.upper_left();
        assert_eq!(Matrix3::from(Mat3::from(m3)), m3);
    }

    #[test]
    fn test_products_and_inverse_match_glam() {
        let a = sample();
        let b: Matrix4 = Matrix4::from_axis_angle(Vector3::new(1.0, 2.0, -1.0).normalize(), 0.8);
        let (ga, gb): (Mat4, Mat4) = (a.into(), b.into());

        assert_mat4(a * b, ga * gb);
        assert_mat4(a.inverse(), ga.inverse());
        assert_mat4(a.transpose(), ga.transpose());
        assert!((a.determinant() - ga.determinant()).abs() < 1e-4);

        let v: Vector4 = Vector4::new(1.0, -1.0, 0.5, 1.0);
        let gv: Vec4 = (a * v).into();
        assert!(gv.abs_diff_eq(ga * Vec4::from(v), EPS));
    }

    #[test]
    fn test_projections_match_glam() {
        assert_mat4(
            Matrix4::perspective(1.2, 16.0 / 9.0, 0.1, 500.0),
            Mat4::perspective_rh(1.2, 16.0 / 9.0, 0.1, 500.0),
        );
        assert_mat4(
            Matrix4::orthographic(-4.0, 6.0, -2.0, 3.0, 0.5, 50.0),
            Mat4::orthographic_rh(-4.0, 6.0, -2.0, 3.0, 0.5, 50.0),
        );

        let eye: Vector3 = Vector3::new(3.0, 4.0, 5.0);
        let target: Vector3 = Vector3::new(0.0, 1.0, 0.0);
        assert_mat4(
            Matrix4::look_at(eye, target, Vector3::unit_y()),
            Mat4::look_at_rh(eye.into(), target.into(), Vec3::Y),
        );
    }

    #[test]
    fn test_quaternion_matches_glam() {
        let ours: Quaternion = Quaternion::from_euler(0.3, -1.1, 2.0);
        let theirs = Quat::from_euler(EulerRot::XYZ, 0.3, -1.1, 2.0);
        assert!(Quat::from(ours).abs_diff_eq(theirs, EPS));

        let axis: Vector3 = Vector3::new(0.0, 1.0, 1.0).normalize();
        let q = Quaternion::from_axis_angle(axis, 0.9);
        let gq = Quat::from_axis_angle(axis.into(), 0.9);
        assert!(Quat::from(q * ours).abs_diff_eq(gq * theirs, EPS));

        let v: Vector3 = Vector3::new(1.0, 2.0, 3.0);
        let rotated: Vec3 = (q * v).into();
        assert!(rotated.abs_diff_eq(gq * Vec3::from(v), EPS));

        assert_mat4(q.to_matrix4(), Mat4::from_quat(gq));
    }
}
