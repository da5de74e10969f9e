//! 通用数组后端
//!
//! 当没有可用的SIMD指令集（或启用了 `scalar-backend` 特性）时的纯标量实现。
//! 所有平台都可用，也是其他后端测试时的参照实现。

use super::{LaneMask, LaneStorage};
use crate::element::Element;
use crate::SimdBackend;

/// 4元素数组存储
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[repr(C, align(16))]
pub struct ArrayStorage<T>(pub [T; 4]);

/// 数组存储的比较掩码，每通道一个与元素等宽的位模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ArrayMask<T: Element>(pub [T::Bits; 4]);

impl<T: Element> ArrayMask<T> {
    #[inline(always)]
    fn from_fn(mut f: impl FnMut(usize) -> bool) -> Self {
        let lane = |b: bool| if b { T::TRUE_BITS } else { T::FALSE_BITS };
        Self([lane(f(0)), lane(f(1)), lane(f(2)), lane(f(3))])
    }
}

impl<T: Element> LaneMask for ArrayMask<T> {
    #[inline(always)]
    fn get(&self, index: usize) -> bool {
        self.0[index] != T::FALSE_BITS
    }

    #[inline(always)]
    fn set(&mut self, index: usize, value: bool) {
        self.0[index] = if value { T::TRUE_BITS } else { T::FALSE_BITS };
    }

    #[inline]
    fn from_bools(values: [bool; 4]) -> Self {
        Self::from_fn(|i| values[i])
    }
}

impl<T: Element> ArrayStorage<T> {
    #[inline(always)]
    fn map(self, f: impl Fn(T) -> T) -> Self {
        let a = self.0;
        Self([f(a[0]), f(a[1]), f(a[2]), f(a[3])])
    }

    #[inline(always)]
    fn zip(self, rhs: Self, f: impl Fn(T, T) -> T) -> Self {
        let (a, b) = (self.0, rhs.0);
        Self([f(a[0], b[0]), f(a[1], b[1]), f(a[2], b[2]), f(a[3], b[3])])
    }

    #[inline(always)]
    fn compare(self, rhs: Self, f: impl Fn(T, T) -> bool) -> ArrayMask<T> {
        let (a, b) = (self.0, rhs.0);
        ArrayMask::from_fn(|i| f(a[i], b[i]))
    }
}

impl<T: Element> LaneStorage for ArrayStorage<T> {
    type Elem = T;
    type Mask = ArrayMask<T>;

    const BACKEND: SimdBackend = SimdBackend::Scalar;

    #[inline(always)]
    fn new(x: T, y: T, z: T, w: T) -> Self {
        Self([x, y, z, w])
    }

    #[inline(always)]
    fn splat(value: T) -> Self {
        Self([value; 4])
    }

    #[inline(always)]
    fn from_array(values: [T; 4]) -> Self {
        Self(values)
    }

    #[inline(always)]
    fn as_array(&self) -> &[T; 4] {
        &self.0
    }

    #[inline(always)]
    fn as_array_mut(&mut self) -> &mut [T; 4] {
        &mut self.0
    }

    #[inline(always)]
    fn neg(self) -> Self {
        self.map(|v| -v)
    }

    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        self.zip(rhs, |a, b| a + b)
    }

    #[inline(always)]
    fn sub(self, rhs: Self) -> Self {
        self.zip(rhs, |a, b| a - b)
    }

    #[inline(always)]
    fn mul(self, rhs: Self) -> Self {
        self.zip(rhs, |a, b| a * b)
    }

    #[inline(always)]
    fn div(self, rhs: Self) -> Self {
        self.zip(rhs, |a, b| a / b)
    }

    #[inline(always)]
    fn min(self, rhs: Self) -> Self {
        self.zip(rhs, T::lane_min)
    }

    #[inline(always)]
    fn max(self, rhs: Self) -> Self {
        self.zip(rhs, T::lane_max)
    }

    #[inline(always)]
    fn abs(self) -> Self {
        self.map(T::abs)
    }

    #[inline(always)]
    fn sqrt(self) -> Self {
        self.map(T::sqrt)
    }

    #[inline(always)]
    fn cmp_eq(self, rhs: Self) -> ArrayMask<T> {
        self.compare(rhs, |a, b| a == b)
    }

    #[inline(always)]
    fn cmp_ne(self, rhs: Self) -> ArrayMask<T> {
        self.compare(rhs, |a, b| a != b)
    }

    #[inline(always)]
    fn cmp_lt(self, rhs: Self) -> ArrayMask<T> {
        self.compare(rhs, |a, b| a < b)
    }

    #[inline(always)]
    fn cmp_le(self, rhs: Self) -> ArrayMask<T> {
        self.compare(rhs, |a, b| a <= b)
    }

    #[inline(always)]
    fn cmp_gt(self, rhs: Self) -> ArrayMask<T> {
        self.compare(rhs, |a, b| a > b)
    }

    #[inline(always)]
    fn cmp_ge(self, rhs: Self) -> ArrayMask<T> {
        self.compare(rhs, |a, b| a >= b)
    }

    #[inline(always)]
    fn dot2(self, rhs: Self) -> T {
        let (a, b) = (self.0, rhs.0);
        a[0] * b[0] + a[1] * b[1]
    }

    #[inline(always)]
    fn dot3(self, rhs: Self) -> T {
        let (a, b) = (self.0, rhs.0);
        a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
    }

    #[inline(always)]
    fn dot4(self, rhs: Self) -> T {
        let (a, b) = (self.0, rhs.0);
        a[0] * b[0] + a[1] * b[1] + a[2] * b[2] + a[3] * b[3]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_ops() {
        let a = ArrayStorage::<f32>::new(1.0, 2.0, 3.0, 4.0);
        let b = ArrayStorage::<f32>::new(5.0, 6.0, 7.0, 8.0);

        assert_eq!(a.dot4(b), 70.0);
        assert_eq!(a.dot3(b), 38.0);
        assert_eq!(a.dot2(b), 17.0);
        assert_eq!(a.add(b).0, [6.0, 8.0, 10.0, 12.0]);
        assert_eq!(b.sub(a).0, [4.0, 4.0, 4.0, 4.0]);
    }

    #[test]
    fn test_scalar_neg_keeps_sign_of_zero() {
        let a = ArrayStorage::<f64>::new(0.0, -0.0, 1.5, -2.5);
        let n = a.neg();
        assert!(n.0[0].is_sign_negative());
        assert!(n.0[1].is_sign_positive());
        assert_eq!(n.0[2], -1.5);
        assert_eq!(n.0[3], 2.5);
    }

    #[test]
    fn test_mask_bit_patterns() {
        let a = ArrayStorage::<f32>::new(1.0, 2.0, f32::NAN, 4.0);
        let m = a.cmp_eq(a);
        assert_eq!(m.0, [u32::MAX, u32::MAX, 0, u32::MAX]);
        assert!(!m.get(2));

        let ne = a.cmp_ne(a);
        assert_eq!(ne.to_bools(), [false, false, true, false]);
    }

    #[test]
    fn test_select_and_shuffle() {
        let a = ArrayStorage::<f32>::new(1.0, 2.0, 3.0, 4.0);
        let b = ArrayStorage::<f32>::splat(0.0);
        let mask = ArrayMask::<f32>::from_bools([true, false, true, false]);
        assert_eq!(ArrayStorage::select(mask, a, b).0, [1.0, 0.0, 3.0, 0.0]);
        assert_eq!(a.shuffle::<0, 0, 3, 1>().0, [1.0, 1.0, 4.0, 2.0]);
    }

    #[test]
    #[should_panic]
    fn test_out_of_range_lane_panics() {
        let a = ArrayStorage::<f32>::splat(1.0);
        let index = std::hint::black_box(4);
        let _ = a.get(index);
    }
}
