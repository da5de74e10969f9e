//! 包围球

use std::fmt;

use lanemath_simd::SimdElement;

use super::{AABox, Vector3};

#[derive(Clone, Copy, PartialEq)]
pub struct Sphere<T: SimdElement = f32> {
    pub center: Vector3<T>,
    pub radius: T,
}

impl<T: SimdElement> Sphere<T> {
    #[inline]
    pub fn new(center: Vector3<T>, radius: T) -> Self {
        Self { center, radius }
    }

    /// 包围盒的外接球
    pub fn bounding(bounds: &AABox<T>) -> Self {
        Self::new(bounds.center(), bounds.extents().length())
    }

    #[inline]
    pub fn contains(&self, point: Vector3<T>) -> bool {
        self.center.distance_squared(point) <= self.radius * self.radius
    }

    /// 球与球相交，相切也算
    #[inline]
    pub fn intersects_sphere(&self, other: &Self) -> bool {
        let r = self.radius + other.radius;
        self.center.distance_squared(other.center) <= r * r
    }

    /// 球与盒相交：盒内最近点落在球内，相切也算
    #[inline]
    pub fn intersects_box(&self, bounds: &AABox<T>) -> bool {
        bounds.distance_squared(self.center) <= self.radius * self.radius
    }

    /// 同时包含两个球的最小球
    pub fn merge(&self, other: &Self) -> Self {
        let offset = other.center - self.center;
        let distance = offset.length();

        if distance + other.radius <= self.radius {
            return *self;
        }
        if distance + self.radius <= other.radius {
            return *other;
        }

        let radius = (distance + self.radius + other.radius) * T::HALF;
        let center = self.center + offset * ((radius - self.radius) / distance);
        Self::new(center, radius)
    }
}

impl<T: SimdElement> fmt::Debug for Sphere<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sphere")
            .field("center", &self.center)
            .field("radius", &self.radius)
            .finish()
    }
}
