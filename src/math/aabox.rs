//! 轴对齐包围盒
//!
//! 默认值是故意反转的哨兵盒（`min = +1e16`，`max = -1e16`），
//! 这样第一次 [`AABox::accumulate`] 就会把两端都收缩到该点。
//! 累积只会扩大包围盒。

use std::fmt;

use lanemath_simd::{Lanes, Mask4, SimdElement};

use super::{Matrix4, Vector3};

/// 哨兵盒的边界值
const SENTINEL_EXTENT: f64 = 1.0e16;

#[derive(Clone, Copy, PartialEq)]
pub struct AABox<T: SimdElement = f32> {
    pub min: Vector3<T>,
    pub max: Vector3<T>,
}

impl<T: SimdElement> AABox<T> {
    #[inline]
    pub fn new(min: Vector3<T>, max: Vector3<T>) -> Self {
        Self { min, max }
    }

    /// 哨兵空盒
    #[inline]
    pub fn empty() -> Self {
        let extent = T::from_f64(SENTINEL_EXTENT);
        Self {
            min: Vector3::splat(extent),
            max: Vector3::splat(-extent),
        }
    }

    /// 以 `center` 为中心、半边长为 `half_extents` 的盒子
    #[inline]
    pub fn from_center_extents(center: Vector3<T>, half_extents: Vector3<T>) -> Self {
        Self::new(center - half_extents, center + half_extents)
    }

    /// 包围一组点，空切片得到哨兵盒
    pub fn from_points(points: &[Vector3<T>]) -> Self {
        let mut bounds = Self::empty();
        for &p in points {
            bounds.accumulate(p);
        }
        bounds
    }

    /// 任一分量 `min > max`
    #[inline]
    pub fn invalid(&self) -> bool {
        self.min.any_gt(self.max)
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        !self.invalid()
    }

    /// 恢复为哨兵空盒
    #[inline]
    pub fn reset(&mut self) {
        *self = Self::empty();
    }

    /// 扩大以包含 `point`
    #[inline]
    pub fn accumulate(&mut self, point: Vector3<T>) {
        self.min = self.min.min(point);
        self.max = self.max.max(point);
    }

    /// 扩大以包含另一个盒子
    #[inline]
    pub fn accumulate_box(&mut self, other: &Self) {
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
    }

    /// `self` 完全位于 `other` 之内（边界重合也算）
    #[inline]
    pub fn inside(&self, other: &Self) -> bool {
        self.min.all_ge(other.min) && self.max.all_le(other.max)
    }

    #[inline]
    pub fn contains(&self, point: Vector3<T>) -> bool {
        point.all_ge(self.min) && point.all_le(self.max)
    }

    /// 重叠测试，相切也算相交
    #[inline]
    pub fn intersects(&self, other: &Self) -> bool {
        self.min.all_le(other.max) && self.max.all_ge(other.min)
    }

    #[inline]
    pub fn center(&self) -> Vector3<T> {
        (self.min + self.max) * T::HALF
    }

    /// 半边长
    #[inline]
    pub fn extents(&self) -> Vector3<T> {
        (self.max - self.min) * T::HALF
    }

    #[inline]
    pub fn size(&self) -> Vector3<T> {
        self.max - self.min
    }

    /// 体积，无效盒为零
    pub fn volume(&self) -> T {
        if self.invalid() {
            return T::ZERO;
        }
        let s = self.size();
        s.x() * s.y() * s.z()
    }

    /// 8个角点，第 `i` 个角点的第 `k` 位选择第 `k` 轴的 `max`
    pub fn corners(&self) -> [Vector3<T>; 8] {
        let (lo, hi) = (self.min.lanes(), self.max.lanes());
        std::array::from_fn(|i| {
            let mask = Mask4::from_bools([i & 1 != 0, i & 2 != 0, i & 4 != 0, false]);
            Vector3::from_lanes(Lanes::select(mask, hi, lo))
        })
    }

    /// 变换后的轴对齐包围盒（包围变换后的8个角点）
    pub fn transformed(&self, m: &Matrix4<T>) -> Self {
        let mut bounds = Self::empty();
        for corner in self.corners() {
            bounds.accumulate(m.transform_point(corner));
        }
        bounds
    }

    /// 各方向向外扩展 `margin`
    #[inline]
    pub fn expanded(&self, margin: T) -> Self {
        let m = Vector3::splat(margin);
        Self::new(self.min - m, self.max + m)
    }

    /// 盒内距 `point` 最近的点
    #[inline]
    pub fn closest_point(&self, point: Vector3<T>) -> Vector3<T> {
        point.clamp(self.min, self.max)
    }

    /// 到盒子的平方距离，盒内为零
    #[inline]
    pub fn distance_squared(&self, point: Vector3<T>) -> T {
        (point - self.closest_point(point)).length_squared()
    }
}

impl<T: SimdElement> Default for AABox<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T: SimdElement> fmt::Debug for AABox<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AABox")
            .field("min", &self.min)
            .field("max", &self.max)
            .finish()
    }
}
