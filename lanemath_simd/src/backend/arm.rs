//! ARM NEON 后端
//!
//! 支持Apple M系列、华为麒麟、高通骁龙、联发科等aarch64处理器。
//! NEON是ARM的128位SIMD指令集，在aarch64上是强制支持的。
//! 点积使用 `vaddvq` 跨通道加法。

use std::arch::aarch64::*;

use super::{LaneMask, LaneStorage};
use crate::SimdBackend;

/// 4个f32打包在一个 `float32x4_t` 中
#[derive(Clone, Copy)]
#[repr(transparent)]
pub struct NeonF32x4(pub float32x4_t);

/// `NeonF32x4` 的比较结果
#[derive(Clone, Copy)]
#[repr(transparent)]
pub struct NeonMaskF32(pub uint32x4_t);

/// 4个f64打包在两个 `float64x2_t` 中（通道0-1，通道2-3）
#[derive(Clone, Copy)]
#[repr(transparent)]
pub struct NeonF64x4(pub [float64x2_t; 2]);

/// `NeonF64x4` 的比较结果
#[derive(Clone, Copy)]
#[repr(transparent)]
pub struct NeonMaskF64(pub [uint64x2_t; 2]);

impl std::fmt::Debug for NeonF32x4 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("NeonF32x4").field(self.as_array()).finish()
    }
}

impl std::fmt::Debug for NeonF64x4 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("NeonF64x4").field(self.as_array()).finish()
    }
}

impl std::fmt::Debug for NeonMaskF32 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("NeonMaskF32").field(&self.to_bools()).finish()
    }
}

impl std::fmt::Debug for NeonMaskF64 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("NeonMaskF64").field(&self.to_bools()).finish()
    }
}

impl NeonMaskF32 {
    #[inline(always)]
    fn lanes(&self) -> &[u32; 4] {
        unsafe { &*(&self.0 as *const uint32x4_t as *const [u32; 4]) }
    }
}

impl NeonMaskF64 {
    #[inline(always)]
    fn lanes(&self) -> &[u64; 4] {
        unsafe { &*(&self.0 as *const [uint64x2_t; 2] as *const [u64; 4]) }
    }
}

impl LaneMask for NeonMaskF32 {
    #[inline(always)]
    fn get(&self, index: usize) -> bool {
        self.lanes()[index] != 0
    }

    #[inline(always)]
    fn set(&mut self, index: usize, value: bool) {
        let lanes = unsafe { &mut *(&mut self.0 as *mut uint32x4_t as *mut [u32; 4]) };
        lanes[index] = if value { u32::MAX } else { 0 };
    }

    #[inline]
    fn from_bools(values: [bool; 4]) -> Self {
        let bits = values.map(|b| if b { u32::MAX } else { 0 });
        Self(unsafe { vld1q_u32(bits.as_ptr()) })
    }
}

impl LaneMask for NeonMaskF64 {
    #[inline(always)]
    fn get(&self, index: usize) -> bool {
        self.lanes()[index] != 0
    }

    #[inline(always)]
    fn set(&mut self, index: usize, value: bool) {
        let lanes = unsafe { &mut *(&mut self.0 as *mut [uint64x2_t; 2] as *mut [u64; 4]) };
        lanes[index] = if value { u64::MAX } else { 0 };
    }

    #[inline]
    fn from_bools(values: [bool; 4]) -> Self {
        let bits = values.map(|b| if b { u64::MAX } else { 0 });
        unsafe { Self([vld1q_u64(bits.as_ptr()), vld1q_u64(bits[2..].as_ptr())]) }
    }
}

impl LaneStorage for NeonF32x4 {
    type Elem = f32;
    type Mask = NeonMaskF32;

    const BACKEND: SimdBackend = SimdBackend::Neon;

    #[inline(always)]
    fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self::from_array([x, y, z, w])
    }

    #[inline(always)]
    fn splat(value: f32) -> Self {
        Self(unsafe { vdupq_n_f32(value) })
    }

    #[inline(always)]
    fn from_array(values: [f32; 4]) -> Self {
        Self(unsafe { vld1q_f32(values.as_ptr()) })
    }

    #[inline(always)]
    fn as_array(&self) -> &[f32; 4] {
        unsafe { &*(&self.0 as *const float32x4_t as *const [f32; 4]) }
    }

    #[inline(always)]
    fn as_array_mut(&mut self) -> &mut [f32; 4] {
        unsafe { &mut *(&mut self.0 as *mut float32x4_t as *mut [f32; 4]) }
    }

    #[inline(always)]
    fn neg(self) -> Self {
        unsafe {
            let sign = vdupq_n_u32(0x8000_0000);
            Self(vreinterpretq_f32_u32(veorq_u32(vreinterpretq_u32_f32(self.0), sign)))
        }
    }

    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        Self(unsafe { vaddq_f32(self.0, rhs.0) })
    }

    #[inline(always)]
    fn sub(self, rhs: Self) -> Self {
        Self(unsafe { vsubq_f32(self.0, rhs.0) })
    }

    #[inline(always)]
    fn mul(self, rhs: Self) -> Self {
        Self(unsafe { vmulq_f32(self.0, rhs.0) })
    }

    #[inline(always)]
    fn div(self, rhs: Self) -> Self {
        Self(unsafe { vdivq_f32(self.0, rhs.0) })
    }

    #[inline(always)]
    fn min(self, rhs: Self) -> Self {
        // 用比较+混合保持 `a < b ? a : b` 语义（vminq 遇NaN返回NaN）
        Self::select(self.cmp_lt(rhs), self, rhs)
    }

    #[inline(always)]
    fn max(self, rhs: Self) -> Self {
        Self::select(self.cmp_gt(rhs), self, rhs)
    }

    #[inline(always)]
    fn abs(self) -> Self {
        Self(unsafe { vabsq_f32(self.0) })
    }

    #[inline(always)]
    fn sqrt(self) -> Self {
        Self(unsafe { vsqrtq_f32(self.0) })
    }

    #[inline(always)]
    fn cmp_eq(self, rhs: Self) -> NeonMaskF32 {
        NeonMaskF32(unsafe { vceqq_f32(self.0, rhs.0) })
    }

    #[inline(always)]
    fn cmp_ne(self, rhs: Self) -> NeonMaskF32 {
        NeonMaskF32(unsafe { vmvnq_u32(vceqq_f32(self.0, rhs.0)) })
    }

    #[inline(always)]
    fn cmp_lt(self, rhs: Self) -> NeonMaskF32 {
        NeonMaskF32(unsafe { vcltq_f32(self.0, rhs.0) })
    }

    #[inline(always)]
    fn cmp_le(self, rhs: Self) -> NeonMaskF32 {
        NeonMaskF32(unsafe { vcleq_f32(self.0, rhs.0) })
    }

    #[inline(always)]
    fn cmp_gt(self, rhs: Self) -> NeonMaskF32 {
        NeonMaskF32(unsafe { vcgtq_f32(self.0, rhs.0) })
    }

    #[inline(always)]
    fn cmp_ge(self, rhs: Self) -> NeonMaskF32 {
        NeonMaskF32(unsafe { vcgeq_f32(self.0, rhs.0) })
    }

    #[inline(always)]
    fn select(mask: NeonMaskF32, a: Self, b: Self) -> Self {
        Self(unsafe { vbslq_f32(mask.0, a.0, b.0) })
    }

    #[inline(always)]
    fn dot2(self, rhs: Self) -> f32 {
        unsafe {
            let mul = vmulq_f32(self.0, rhs.0);
            vaddv_f32(vget_low_f32(mul))
        }
    }

    #[inline(always)]
    fn dot3(self, rhs: Self) -> f32 {
        unsafe {
            let mul = vmulq_f32(self.0, rhs.0);
            vaddv_f32(vget_low_f32(mul)) + vgetq_lane_f32::<2>(mul)
        }
    }

    #[inline(always)]
    fn dot4(self, rhs: Self) -> f32 {
        unsafe { vaddvq_f32(vmulq_f32(self.0, rhs.0)) }
    }
}

impl NeonF64x4 {
    #[inline(always)]
    fn zip(self, rhs: Self, f: impl Fn(float64x2_t, float64x2_t) -> float64x2_t) -> Self {
        Self([f(self.0[0], rhs.0[0]), f(self.0[1], rhs.0[1])])
    }

    #[inline(always)]
    fn compare(self, rhs: Self, f: impl Fn(float64x2_t, float64x2_t) -> uint64x2_t) -> NeonMaskF64 {
        NeonMaskF64([f(self.0[0], rhs.0[0]), f(self.0[1], rhs.0[1])])
    }
}

impl LaneStorage for NeonF64x4 {
    type Elem = f64;
    type Mask = NeonMaskF64;

    const BACKEND: SimdBackend = SimdBackend::Neon;

    #[inline(always)]
    fn new(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self::from_array([x, y, z, w])
    }

    #[inline(always)]
    fn splat(value: f64) -> Self {
        let v = unsafe { vdupq_n_f64(value) };
        Self([v, v])
    }

    #[inline(always)]
    fn from_array(values: [f64; 4]) -> Self {
        unsafe { Self([vld1q_f64(values.as_ptr()), vld1q_f64(values[2..].as_ptr())]) }
    }

    #[inline(always)]
    fn as_array(&self) -> &[f64; 4] {
        unsafe { &*(&self.0 as *const [float64x2_t; 2] as *const [f64; 4]) }
    }

    #[inline(always)]
    fn as_array_mut(&mut self) -> &mut [f64; 4] {
        unsafe { &mut *(&mut self.0 as *mut [float64x2_t; 2] as *mut [f64; 4]) }
    }

    #[inline(always)]
    fn neg(self) -> Self {
        let flip = |v: float64x2_t| unsafe {
            let sign = vdupq_n_u64(0x8000_0000_0000_0000);
            vreinterpretq_f64_u64(veorq_u64(vreinterpretq_u64_f64(v), sign))
        };
        Self([flip(self.0[0]), flip(self.0[1])])
    }

    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        self.zip(rhs, |a, b| unsafe { vaddq_f64(a, b) })
    }

    #[inline(always)]
    fn sub(self, rhs: Self) -> Self {
        self.zip(rhs, |a, b| unsafe { vsubq_f64(a, b) })
    }

    #[inline(always)]
    fn mul(self, rhs: Self) -> Self {
        self.zip(rhs, |a, b| unsafe { vmulq_f64(a, b) })
    }

    #[inline(always)]
    fn div(self, rhs: Self) -> Self {
        self.zip(rhs, |a, b| unsafe { vdivq_f64(a, b) })
    }

    #[inline(always)]
    fn min(self, rhs: Self) -> Self {
        Self::select(self.cmp_lt(rhs), self, rhs)
    }

    #[inline(always)]
    fn max(self, rhs: Self) -> Self {
        Self::select(self.cmp_gt(rhs), self, rhs)
    }

    #[inline(always)]
    fn abs(self) -> Self {
        unsafe { Self([vabsq_f64(self.0[0]), vabsq_f64(self.0[1])]) }
    }

    #[inline(always)]
    fn sqrt(self) -> Self {
        unsafe { Self([vsqrtq_f64(self.0[0]), vsqrtq_f64(self.0[1])]) }
    }

    #[inline(always)]
    fn cmp_eq(self, rhs: Self) -> NeonMaskF64 {
        self.compare(rhs, |a, b| unsafe { vceqq_f64(a, b) })
    }

    #[inline(always)]
    fn cmp_ne(self, rhs: Self) -> NeonMaskF64 {
        self.compare(rhs, |a, b| unsafe {
            vreinterpretq_u64_u32(vmvnq_u32(vreinterpretq_u32_u64(vceqq_f64(a, b))))
        })
    }

    #[inline(always)]
    fn cmp_lt(self, rhs: Self) -> NeonMaskF64 {
        self.compare(rhs, |a, b| unsafe { vcltq_f64(a, b) })
    }

    #[inline(always)]
    fn cmp_le(self, rhs: Self) -> NeonMaskF64 {
        self.compare(rhs, |a, b| unsafe { vcleq_f64(a, b) })
    }

    #[inline(always)]
    fn cmp_gt(self, rhs: Self) -> NeonMaskF64 {
        self.compare(rhs, |a, b| unsafe { vcgtq_f64(a, b) })
    }

    #[inline(always)]
    fn cmp_ge(self, rhs: Self) -> NeonMaskF64 {
        self.compare(rhs, |a, b| unsafe { vcgeq_f64(a, b) })
    }

    #[inline(always)]
    fn select(mask: NeonMaskF64, a: Self, b: Self) -> Self {
        unsafe {
            Self([
                vbslq_f64(mask.0[0], a.0[0], b.0[0]),
                vbslq_f64(mask.0[1], a.0[1], b.0[1]),
            ])
        }
    }

    #[inline(always)]
    fn dot2(self, rhs: Self) -> f64 {
        unsafe { vaddvq_f64(vmulq_f64(self.0[0], rhs.0[0])) }
    }

    #[inline(always)]
    fn dot3(self, rhs: Self) -> f64 {
        unsafe {
            let xy = vaddvq_f64(vmulq_f64(self.0[0], rhs.0[0]));
            xy + vgetq_lane_f64::<0>(self.0[1]) * vgetq_lane_f64::<0>(rhs.0[1])
        }
    }

    #[inline(always)]
    fn dot4(self, rhs: Self) -> f64 {
        unsafe {
            let lo = vmulq_f64(self.0[0], rhs.0[0]);
            let hi = vmulq_f64(self.0[1], rhs.0[1]);
            vaddvq_f64(vaddq_f64(lo, hi))
        }
    }
    #[inline(always)]
    fn shuffle<const I0: usize, const I1: usize, const I2: usize, const I3: usize>(self) -> Self {
        let r = self.0;
        Self([
            pick_pair(r[I0 >> 1], r[I1 >> 1], I0, I1),
            pick_pair(r[I2 >> 1], r[I3 >> 1], I2, I3),
        ])
    }
}

/// 低通道取 `a[lo & 1]`，高通道取 `b[hi & 1]`；索引在调用处是常量
#[inline(always)]
fn pick_pair(a: float64x2_t, b: float64x2_t, lo: usize, hi: usize) -> float64x2_t {
    unsafe {
        match (lo & 1, hi & 1) {
            (0, 0) => vzip1q_f64(a, b),
            (1, 1) => vzip2q_f64(a, b),
            (0, _) => vcopyq_laneq_f64::<1, 1>(a, b),
            _ => vextq_f64::<1>(a, b),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neon_dot_product() {
        let a = NeonF32x4::new(1.0, 2.0, 3.0, 4.0);
        let b = NeonF32x4::new(5.0, 6.0, 7.0, 8.0);
        assert_eq!(a.dot4(b), 70.0);
        assert_eq!(a.dot3(b), 38.0);
        assert_eq!(a.dot2(b), 17.0);

        let c = NeonF64x4::new(1.0, 2.0, 3.0, 4.0);
        let d = NeonF64x4::new(5.0, 6.0, 7.0, 8.0);
        assert_eq!(c.dot4(d), 70.0);
        assert_eq!(c.dot3(d), 38.0);
        assert_eq!(c.dot2(d), 17.0);
    }

    #[test]
    fn test_neon_nan_comparisons() {
        let a = NeonF32x4::new(1.0, f32::NAN, 2.0, 3.0);
        assert_eq!(a.cmp_eq(a).to_bools(), [true, false, true, true]);
        assert_eq!(a.cmp_ne(a).to_bools(), [false, true, false, false]);

        let d = NeonF64x4::new(1.0, 2.0, 3.0, f64::NAN);
        assert_eq!(d.cmp_eq(d).to_bools(), [true, true, true, false]);
        assert_eq!(d.cmp_ne(d).to_bools(), [false, false, false, true]);
    }

    #[test]
    fn test_neon_neg_and_lane_order() {
        let a = NeonF64x4::new(1.0, -2.0, 0.0, 4.0);
        assert_eq!(a.to_array(), [1.0, -2.0, 0.0, 4.0]);
        let n = a.neg().to_array();
        assert_eq!(n[0], -1.0);
        assert_eq!(n[1], 2.0);
        assert!(n[2].is_sign_negative());
    }

    #[test]
    fn test_neon_f64_shuffle_pair_forms() {
        let d = NeonF64x4::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(d.shuffle::<0, 2, 1, 3>().to_array(), [1.0, 3.0, 2.0, 4.0]);
        assert_eq!(d.shuffle::<0, 3, 2, 1>().to_array(), [1.0, 4.0, 3.0, 2.0]);
        assert_eq!(d.shuffle::<3, 0, 3, 3>().to_array(), [4.0, 1.0, 4.0, 4.0]);
    }
}
