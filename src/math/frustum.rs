//! 视锥体
//!
//! 从视图投影矩阵提取六个平面（Gribb-Hartmann），法线指向视锥内部。
//! 假定深度范围为 `[0, 1]`，与 [`Matrix4::perspective`] 一致。

use lanemath_simd::{Lanes, SimdElement};

use super::{AABox, Matrix4, Plane, Sphere, Vector3};

/// 平面顺序：左、右、下、上、近、远
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frustum<T: SimdElement = f32> {
    planes: [Plane<T>; 6],
}

impl<T: SimdElement> Frustum<T> {
    pub const LEFT: usize = 0;
    pub const RIGHT: usize = 1;
    pub const BOTTOM: usize = 2;
    pub const TOP: usize = 3;
    pub const NEAR: usize = 4;
    pub const FAR: usize = 5;

    /// 直接由六个平面构造，法线应指向内部
    #[inline]
    pub fn new(planes: [Plane<T>; 6]) -> Self {
        Self { planes }
    }

    /// 从视图投影矩阵 `projection * view` 提取
    pub fn from_matrix(view_projection: &Matrix4<T>) -> Self {
        let [r0, r1, r2, r3] = view_projection.rows().map(|r| r.lanes());

        let planes = [r3 + r0, r3 - r0, r3 + r1, r3 - r1, r2, r3 - r2]
            .map(|lanes| Plane::from_lanes(lanes).normalize());
        Self { planes }
    }

    #[inline]
    pub fn planes(&self) -> &[Plane<T>; 6] {
        &self.planes
    }

    #[inline]
    pub fn plane(&self, index: usize) -> &Plane<T> {
        &self.planes[index]
    }

    pub fn contains_point(&self, point: Vector3<T>) -> bool {
        self.planes
            .iter()
            .all(|plane| plane.signed_distance(point) >= T::ZERO)
    }

    /// 球心到任一平面的距离小于 `-radius` 时剔除
    pub fn intersects_sphere(&self, sphere: &Sphere<T>) -> bool {
        self.planes
            .iter()
            .all(|plane| plane.signed_distance(sphere.center) >= -sphere.radius)
    }

    /// 正顶点测试：对每个平面取沿法线最远的角点，只要有一个在外侧即剔除
    ///
    /// 保守测试，位于视锥角落外侧的少数盒子会被判为相交。
    pub fn intersects_box(&self, bounds: &AABox<T>) -> bool {
        let (lo, hi) = (bounds.min.lanes(), bounds.max.lanes());
        self.planes.iter().all(|plane| {
            let normal_non_negative = plane.lanes().cmp_ge(Lanes::zero());
            let positive = Vector3::from_lanes(Lanes::select(normal_non_negative, hi, lo));
            plane.signed_distance(positive) >= T::ZERO
        })
    }
}
