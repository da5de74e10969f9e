//! 平面
//!
//! 单个通道值 `(nx, ny, nz, d)`，平面方程 `n·p + d = 0`。
//! 有符号距离用一次 `dot4` 与 `(p, 1)` 计算，法线为单位长度时即欧氏距离。

use std::fmt;

use lanemath_simd::{Lanes, SimdElement};

use super::Vector3;

/// 点相对平面的位置
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaneSide {
    /// 法线指向的一侧
    Front,
    Back,
    On,
}

#[derive(Clone, Copy, PartialEq)]
pub struct Plane<T: SimdElement = f32> {
    lanes: Lanes<T>,
}

impl<T: SimdElement> Plane<T> {
    /// 由法线和常数项构造，不做归一化
    #[inline]
    pub fn new(normal: Vector3<T>, d: T) -> Self {
        let mut lanes = normal.lanes();
        lanes.set_w(d);
        Self { lanes }
    }

    #[inline]
    pub fn from_lanes(lanes: Lanes<T>) -> Self {
        Self { lanes }
    }

    /// 过点 `point`、法线为 `normal` 的平面
    #[inline]
    pub fn from_point_normal(point: Vector3<T>, normal: Vector3<T>) -> Self {
        Self::new(normal, -normal.dot(point))
    }

    /// 过三点的平面，法线按 `a, b, c` 逆时针方向
    ///
    /// 三点共线（法线长度不超过 `T::EPSILON`）时返回 `None`。
    pub fn from_points(a: Vector3<T>, b: Vector3<T>, c: Vector3<T>) -> Option<Self> {
        let n = (b - a).cross(c - a);
        let len = n.length();
        if len <= T::EPSILON || len.is_nan() {
            return None;
        }
        Some(Self::from_point_normal(a, n / len))
    }

    #[inline]
    pub fn lanes(&self) -> Lanes<T> {
        self.lanes
    }

    #[inline]
    pub fn normal(&self) -> Vector3<T> {
        Vector3::from_lanes(self.lanes)
    }

    #[inline]
    pub fn d(&self) -> T {
        self.lanes.w()
    }

    /// 使法线为单位长度，四个分量同比缩放
    #[inline]
    pub fn normalize(self) -> Self {
        Self::from_lanes(self.lanes / Lanes::splat(self.normal().length()))
    }

    /// 有符号距离，正值位于法线一侧
    #[inline]
    pub fn signed_distance(&self, point: Vector3<T>) -> T {
        self.lanes.dot4(point.extend(T::ONE).lanes())
    }

    /// 按 `T::EPSILON` 容差分类
    pub fn side(&self, point: Vector3<T>) -> PlaneSide {
        let distance = self.signed_distance(point);
        if distance > T::EPSILON {
            PlaneSide::Front
        } else if distance < -T::EPSILON {
            PlaneSide::Back
        } else {
            PlaneSide::On
        }
    }

    /// 点在平面上的正交投影（法线需为单位长度）
    #[inline]
    pub fn project_point(&self, point: Vector3<T>) -> Vector3<T> {
        point - self.normal() * self.signed_distance(point)
    }

    /// 翻转朝向
    #[inline]
    pub fn flip(self) -> Self {
        Self::from_lanes(-self.lanes)
    }

    /// 三个平面的交点，法线线性相关时返回 `None`
    pub fn intersection_of_three(p1: &Self, p2: &Self, p3: &Self) -> Option<Vector3<T>> {
        let (n1, n2, n3) = (p1.normal(), p2.normal(), p3.normal());
        let n2xn3 = n2.cross(n3);
        let denom = n1.dot(n2xn3);
        if denom.abs() < T::EPSILON {
            return None;
        }

        let sum = n2xn3 * p1.d() + n3.cross(n1) * p2.d() + n1.cross(n2) * p3.d();
        Some(-sum / denom)
    }
}

impl<T: SimdElement> fmt::Debug for Plane<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Plane")
            .field("normal", &self.normal())
            .field("d", &self.d())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signed_distance_and_side() {
        let ground = Plane::<f32>::new(Vector3::unit_y(), 0.0);
        assert_eq!(ground.signed_distance(Vector3::new(3.0, 2.0, -1.0)), 2.0);
        assert_eq!(ground.side(Vector3::new(0.0, 1.0, 0.0)), PlaneSide::Front);
        assert_eq!(ground.side(Vector3::new(0.0, -1.0, 0.0)), PlaneSide::Back);
        assert_eq!(ground.side(Vector3::new(5.0, 0.0, 5.0)), PlaneSide::On);
        assert_eq!(ground.flip().side(Vector3::new(0.0, 1.0, 0.0)), PlaneSide::Back);
    }

    #[test]
    fn test_from_point_normal() {
        let p = Plane::<f64>::from_point_normal(Vector3::new(0.0, 0.0, 5.0), Vector3::unit_z());
        assert_eq!(p.d(), -5.0);
        assert_eq!(p.signed_distance(Vector3::zero()), -5.0);
        assert_eq!(p.project_point(Vector3::new(1.0, 2.0, 0.0)), Vector3::new(1.0, 2.0, 5.0));
    }

    #[test]
    fn test_from_points() {
        let p = Plane::<f64>::from_points(
            Vector3::new(0.0, 1.0, 0.0),
            Vector3::new(1.0, 1.0, 0.0),
            Vector3::new(0.0, 1.0, -1.0),
        )
        .unwrap();
        assert_eq!(p.normal(), Vector3::unit_y());
        assert_eq!(p.d(), -1.0);

        let collinear = Plane::<f32>::from_points(
            Vector3::zero(),
            Vector3::unit_x(),
            Vector3::new(2.0, 0.0, 0.0),
        );
        assert!(collinear.is_none());
    }

    #[test]
    fn test_normalize_scales_all_components() {
        let p = Plane::<f64>::new(Vector3::new(0.0, 2.0, 0.0), 4.0).normalize();
        assert_eq!(p.normal(), Vector3::unit_y());
        assert_eq!(p.d(), 2.0);
    }

    #[test]
    fn test_intersection_of_three() {
        let px = Plane::<f64>::from_point_normal(Vector3::new(1.0, 0.0, 0.0), Vector3::unit_x());
        let py = Plane::from_point_normal(Vector3::new(0.0, 2.0, 0.0), Vector3::unit_y());
        let pz = Plane::from_point_normal(Vector3::new(0.0, 0.0, 3.0), Vector3::unit_z());
        let point = Plane::intersection_of_three(&px, &py, &pz).unwrap();
        assert!((point - Vector3::new(1.0, 2.0, 3.0)).length() < 1e-12);

        let parallel = Plane::from_point_normal(Vector3::new(5.0, 0.0, 0.0), Vector3::unit_x());
        assert!(Plane::intersection_of_three(&px, &parallel, &pz).is_none());
    }
}
