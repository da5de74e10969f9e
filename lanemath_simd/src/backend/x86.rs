//! x86/x64 128位打包后端
//!
//! 支持SSE2（基线）和SSE4.1（点积使用 `dpps`/`dppd`）。
//! 只有构建目标启用了SSE2时才会编译本模块，是否使用SSE4.1由 `target_feature` 在编译期决定。

#[cfg(target_arch = "x86")]
use std::arch::x86::*;
#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

use super::{LaneMask, LaneStorage};
use crate::SimdBackend;

const SSE_BACKEND: SimdBackend = if cfg!(target_feature = "sse4.1") {
    SimdBackend::Sse41
} else {
    SimdBackend::Sse2
};

/// `dpps` 点积：`MASK` 高4位选择参与乘加的通道，和写入通道0
///
/// 构建目标启用SSE4.1时由 [`SseF32x4`] 的点积直接内联；否则只在运行时确认CPU支持后调用。
#[cfg_attr(not(target_feature = "sse4.1"), allow(dead_code))]
#[inline]
#[target_feature(enable = "sse4.1")]
pub(crate) unsafe fn dot_dpps<const MASK: i32>(a: __m128, b: __m128) -> f32 {
    _mm_cvtss_f32(_mm_dp_ps::<MASK>(a, b))
}

/// `dppd` 点积：一个 `__m128d` 内两个通道的乘积和，结果在低通道
#[cfg_attr(not(target_feature = "sse4.1"), allow(dead_code))]
#[inline]
#[target_feature(enable = "sse4.1")]
pub(crate) unsafe fn dot_pair_dppd(a: __m128d, b: __m128d) -> __m128d {
    _mm_dp_pd::<0x31>(a, b)
}

/// 由两个寄存器各取一个通道组成新的 `__m128d`：低通道取 `a[lo & 1]`，高通道取 `b[hi & 1]`
///
/// `lo`、`hi` 在调用处是常量，分支在编译期折叠为单条指令。
#[inline(always)]
pub(crate) fn pick_pair(a: __m128d, b: __m128d, lo: usize, hi: usize) -> __m128d {
    unsafe {
        match (lo & 1, hi & 1) {
            (0, 0) => _mm_unpacklo_pd(a, b),
            (1, 1) => _mm_unpackhi_pd(a, b),
            (0, _) => _mm_move_sd(b, a),
            _ => _mm_shuffle_pd::<0b01>(a, b),
        }
    }
}

/// 4个f32打包在一个 `__m128` 中
#[derive(Clone, Copy)]
#[repr(transparent)]
pub struct SseF32x4(pub __m128);

/// `SseF32x4` 的比较结果
#[derive(Clone, Copy)]
#[repr(transparent)]
pub struct SseMaskF32(pub __m128);

/// 4个f64打包在两个 `__m128d` 中（通道0-1，通道2-3）
#[derive(Clone, Copy)]
#[repr(transparent)]
pub struct SseF64x4(pub [__m128d; 2]);

/// `SseF64x4` 的比较结果
#[derive(Clone, Copy)]
#[repr(transparent)]
pub struct SseMaskF64(pub [__m128d; 2]);

impl std::fmt::Debug for SseF32x4 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("SseF32x4").field(self.as_array()).finish()
    }
}

impl std::fmt::Debug for SseF64x4 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("SseF64x4").field(self.as_array()).finish()
    }
}

impl std::fmt::Debug for SseMaskF32 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("SseMaskF32").field(&self.to_bools()).finish()
    }
}

impl std::fmt::Debug for SseMaskF64 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("SseMaskF64").field(&self.to_bools()).finish()
    }
}

impl LaneMask for SseMaskF32 {
    #[inline(always)]
    fn get(&self, index: usize) -> bool {
        assert!(index < 4, "lane index out of range: {}", index);
        let bits = unsafe { _mm_movemask_ps(self.0) };
        (bits >> index) & 1 != 0
    }

    #[inline(always)]
    fn set(&mut self, index: usize, value: bool) {
        // __m128 与 [u32; 4] 布局相同
        let lanes = unsafe { &mut *(&mut self.0 as *mut __m128 as *mut [u32; 4]) };
        lanes[index] = if value { u32::MAX } else { 0 };
    }

    #[inline]
    fn from_bools(values: [bool; 4]) -> Self {
        let lane = |b: bool| if b { -1i32 } else { 0 };
        Self(unsafe {
            _mm_castsi128_ps(_mm_setr_epi32(
                lane(values[0]),
                lane(values[1]),
                lane(values[2]),
                lane(values[3]),
            ))
        })
    }
}

impl LaneMask for SseMaskF64 {
    #[inline(always)]
    fn get(&self, index: usize) -> bool {
        assert!(index < 4, "lane index out of range: {}", index);
        let bits = unsafe { _mm_movemask_pd(self.0[index >> 1]) };
        (bits >> (index & 1)) & 1 != 0
    }

    #[inline(always)]
    fn set(&mut self, index: usize, value: bool) {
        let lanes = unsafe { &mut *(&mut self.0 as *mut [__m128d; 2] as *mut [u64; 4]) };
        lanes[index] = if value { u64::MAX } else { 0 };
    }

    #[inline]
    fn from_bools(values: [bool; 4]) -> Self {
        let lane = |b: bool| if b { -1i64 } else { 0 };
        unsafe {
            Self([
                _mm_castsi128_pd(_mm_set_epi64x(lane(values[1]), lane(values[0]))),
                _mm_castsi128_pd(_mm_set_epi64x(lane(values[3]), lane(values[2]))),
            ])
        }
    }
}

impl LaneStorage for SseF32x4 {
    type Elem = f32;
    type Mask = SseMaskF32;

    const BACKEND: SimdBackend = SSE_BACKEND;

    #[inline(always)]
    fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self(unsafe { _mm_setr_ps(x, y, z, w) })
    }

    #[inline(always)]
    fn splat(value: f32) -> Self {
        Self(unsafe { _mm_set1_ps(value) })
    }

    #[inline(always)]
    fn from_array(values: [f32; 4]) -> Self {
        Self(unsafe { _mm_loadu_ps(values.as_ptr()) })
    }

    #[inline(always)]
    fn as_array(&self) -> &[f32; 4] {
        // __m128 与 [f32; 4] 大小相同且对齐更严格，通道0位于最低地址
        unsafe { &*(&self.0 as *const __m128 as *const [f32; 4]) }
    }

    #[inline(always)]
    fn as_array_mut(&mut self) -> &mut [f32; 4] {
        unsafe { &mut *(&mut self.0 as *mut __m128 as *mut [f32; 4]) }
    }

    #[inline(always)]
    fn neg(self) -> Self {
        Self(unsafe { _mm_xor_ps(self.0, _mm_set1_ps(-0.0)) })
    }

    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        Self(unsafe { _mm_add_ps(self.0, rhs.0) })
    }

    #[inline(always)]
    fn sub(self, rhs: Self) -> Self {
        Self(unsafe { _mm_sub_ps(self.0, rhs.0) })
    }

    #[inline(always)]
    fn mul(self, rhs: Self) -> Self {
        Self(unsafe { _mm_mul_ps(self.0, rhs.0) })
    }

    #[inline(always)]
    fn div(self, rhs: Self) -> Self {
        Self(unsafe { _mm_div_ps(self.0, rhs.0) })
    }

    #[inline(always)]
    fn min(self, rhs: Self) -> Self {
        Self(unsafe { _mm_min_ps(self.0, rhs.0) })
    }

    #[inline(always)]
    fn max(self, rhs: Self) -> Self {
        Self(unsafe { _mm_max_ps(self.0, rhs.0) })
    }

    #[inline(always)]
    fn abs(self) -> Self {
        Self(unsafe { _mm_andnot_ps(_mm_set1_ps(-0.0), self.0) })
    }

    #[inline(always)]
    fn sqrt(self) -> Self {
        Self(unsafe { _mm_sqrt_ps(self.0) })
    }

    #[inline(always)]
    fn cmp_eq(self, rhs: Self) -> SseMaskF32 {
        SseMaskF32(unsafe { _mm_cmpeq_ps(self.0, rhs.0) })
    }

    #[inline(always)]
    fn cmp_ne(self, rhs: Self) -> SseMaskF32 {
        // cmpneqps 对无序比较（NaN）返回真
        SseMaskF32(unsafe { _mm_cmpneq_ps(self.0, rhs.0) })
    }

    #[inline(always)]
    fn cmp_lt(self, rhs: Self) -> SseMaskF32 {
        SseMaskF32(unsafe { _mm_cmplt_ps(self.0, rhs.0) })
    }

    #[inline(always)]
    fn cmp_le(self, rhs: Self) -> SseMaskF32 {
        SseMaskF32(unsafe { _mm_cmple_ps(self.0, rhs.0) })
    }

    #[inline(always)]
    fn cmp_gt(self, rhs: Self) -> SseMaskF32 {
        SseMaskF32(unsafe { _mm_cmpgt_ps(self.0, rhs.0) })
    }

    #[inline(always)]
    fn cmp_ge(self, rhs: Self) -> SseMaskF32 {
        SseMaskF32(unsafe { _mm_cmpge_ps(self.0, rhs.0) })
    }

    #[inline(always)]
    fn select(mask: SseMaskF32, a: Self, b: Self) -> Self {
        unsafe { Self(_mm_or_ps(_mm_and_ps(mask.0, a.0), _mm_andnot_ps(mask.0, b.0))) }
    }

    #[inline(always)]
    fn dot2(self, rhs: Self) -> f32 {
        #[cfg(target_feature = "sse4.1")]
        let sum = unsafe { dot_dpps::<0x31>(self.0, rhs.0) };

        #[cfg(not(target_feature = "sse4.1"))]
        let sum = unsafe {
            let mul = _mm_mul_ps(self.0, rhs.0);
            let y = _mm_shuffle_ps(mul, mul, 0b_01_01_01_01);
            _mm_cvtss_f32(_mm_add_ss(mul, y))
        };

        sum
    }

    #[inline(always)]
    fn dot3(self, rhs: Self) -> f32 {
        #[cfg(target_feature = "sse4.1")]
        let sum = unsafe { dot_dpps::<0x71>(self.0, rhs.0) };

        #[cfg(not(target_feature = "sse4.1"))]
        let sum = unsafe {
            let mul = _mm_mul_ps(self.0, rhs.0);
            let y = _mm_shuffle_ps(mul, mul, 0b_01_01_01_01);
            let z = _mm_movehl_ps(mul, mul);
            _mm_cvtss_f32(_mm_add_ss(_mm_add_ss(mul, y), z))
        };

        sum
    }

    #[inline(always)]
    fn dot4(self, rhs: Self) -> f32 {
        #[cfg(target_feature = "sse4.1")]
        let sum = unsafe { dot_dpps::<0xF1>(self.0, rhs.0) };

        #[cfg(not(target_feature = "sse4.1"))]
        let sum = unsafe {
            let mul = _mm_mul_ps(self.0, rhs.0);
            // 水平加法
            let shuf = _mm_shuffle_ps(mul, mul, 0b_11_10_11_10);
            let sums = _mm_add_ps(mul, shuf);
            let shuf2 = _mm_shuffle_ps(sums, sums, 0b_01_01_01_01);
            _mm_cvtss_f32(_mm_add_ss(sums, shuf2))
        };

        sum
    }
}

impl SseF64x4 {
    #[inline(always)]
    fn zip(self, rhs: Self, f: impl Fn(__m128d, __m128d) -> __m128d) -> Self {
        Self([f(self.0[0], rhs.0[0]), f(self.0[1], rhs.0[1])])
    }

    #[inline(always)]
    fn compare(self, rhs: Self, f: impl Fn(__m128d, __m128d) -> __m128d) -> SseMaskF64 {
        SseMaskF64([f(self.0[0], rhs.0[0]), f(self.0[1], rhs.0[1])])
    }

    /// 一个 `__m128d` 内两个通道的乘积和，结果在低通道
    #[inline(always)]
    fn dot_pair(a: __m128d, b: __m128d) -> __m128d {
        #[cfg(target_feature = "sse4.1")]
        let sum = unsafe { dot_pair_dppd(a, b) };

        #[cfg(not(target_feature = "sse4.1"))]
        let sum = unsafe {
            let mul = _mm_mul_pd(a, b);
            _mm_add_sd(mul, _mm_unpackhi_pd(mul, mul))
        };

        sum
    }
}

impl LaneStorage for SseF64x4 {
    type Elem = f64;
    type Mask = SseMaskF64;

    const BACKEND: SimdBackend = SSE_BACKEND;

    #[inline(always)]
    fn new(x: f64, y: f64, z: f64, w: f64) -> Self {
        unsafe { Self([_mm_setr_pd(x, y), _mm_setr_pd(z, w)]) }
    }

    #[inline(always)]
    fn splat(value: f64) -> Self {
        let v = unsafe { _mm_set1_pd(value) };
        Self([v, v])
    }

    #[inline(always)]
    fn as_array(&self) -> &[f64; 4] {
        // [__m128d; 2] 与 [f64; 4] 布局相同
        unsafe { &*(&self.0 as *const [__m128d; 2] as *const [f64; 4]) }
    }

    #[inline(always)]
    fn as_array_mut(&mut self) -> &mut [f64; 4] {
        unsafe { &mut *(&mut self.0 as *mut [__m128d; 2] as *mut [f64; 4]) }
    }

    #[inline(always)]
    fn neg(self) -> Self {
        let sign = unsafe { _mm_set1_pd(-0.0) };
        unsafe { Self([_mm_xor_pd(self.0[0], sign), _mm_xor_pd(self.0[1], sign)]) }
    }

    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        self.zip(rhs, |a, b| unsafe { _mm_add_pd(a, b) })
    }

    #[inline(always)]
    fn sub(self, rhs: Self) -> Self {
        self.zip(rhs, |a, b| unsafe { _mm_sub_pd(a, b) })
    }

    #[inline(always)]
    fn mul(self, rhs: Self) -> Self {
        self.zip(rhs, |a, b| unsafe { _mm_mul_pd(a, b) })
    }

    #[inline(always)]
    fn div(self, rhs: Self) -> Self {
        self.zip(rhs, |a, b| unsafe { _mm_div_pd(a, b) })
    }

    #[inline(always)]
    fn min(self, rhs: Self) -> Self {
        self.zip(rhs, |a, b| unsafe { _mm_min_pd(a, b) })
    }

    #[inline(always)]
    fn max(self, rhs: Self) -> Self {
        self.zip(rhs, |a, b| unsafe { _mm_max_pd(a, b) })
    }

    #[inline(always)]
    fn abs(self) -> Self {
        let sign = unsafe { _mm_set1_pd(-0.0) };
        unsafe { Self([_mm_andnot_pd(sign, self.0[0]), _mm_andnot_pd(sign, self.0[1])]) }
    }

    #[inline(always)]
    fn sqrt(self) -> Self {
        unsafe { Self([_mm_sqrt_pd(self.0[0]), _mm_sqrt_pd(self.0[1])]) }
    }

    #[inline(always)]
    fn cmp_eq(self, rhs: Self) -> SseMaskF64 {
        self.compare(rhs, |a, b| unsafe { _mm_cmpeq_pd(a, b) })
    }

    #[inline(always)]
    fn cmp_ne(self, rhs: Self) -> SseMaskF64 {
        self.compare(rhs, |a, b| unsafe { _mm_cmpneq_pd(a, b) })
    }

    #[inline(always)]
    fn cmp_lt(self, rhs: Self) -> SseMaskF64 {
        self.compare(rhs, |a, b| unsafe { _mm_cmplt_pd(a, b) })
    }

    #[inline(always)]
    fn cmp_le(self, rhs: Self) -> SseMaskF64 {
        self.compare(rhs, |a, b| unsafe { _mm_cmple_pd(a, b) })
    }

    #[inline(always)]
    fn cmp_gt(self, rhs: Self) -> SseMaskF64 {
        self.compare(rhs, |a, b| unsafe { _mm_cmpgt_pd(a, b) })
    }

    #[inline(always)]
    fn cmp_ge(self, rhs: Self) -> SseMaskF64 {
        self.compare(rhs, |a, b| unsafe { _mm_cmpge_pd(a, b) })
    }

    #[inline(always)]
    fn select(mask: SseMaskF64, a: Self, b: Self) -> Self {
        let blend = |m: __m128d, x: __m128d, y: __m128d| unsafe {
            _mm_or_pd(_mm_and_pd(m, x), _mm_andnot_pd(m, y))
        };
        Self([
            blend(mask.0[0], a.0[0], b.0[0]),
            blend(mask.0[1], a.0[1], b.0[1]),
        ])
    }

    #[inline(always)]
    fn dot2(self, rhs: Self) -> f64 {
        unsafe { _mm_cvtsd_f64(Self::dot_pair(self.0[0], rhs.0[0])) }
    }

    #[inline(always)]
    fn dot3(self, rhs: Self) -> f64 {
        unsafe {
            let lo = Self::dot_pair(self.0[0], rhs.0[0]);
            let z = _mm_mul_sd(self.0[1], rhs.0[1]);
            _mm_cvtsd_f64(_mm_add_sd(lo, z))
        }
    }

    #[inline(always)]
    fn dot4(self, rhs: Self) -> f64 {
        unsafe {
            let lo = Self::dot_pair(self.0[0], rhs.0[0]);
            let hi = Self::dot_pair(self.0[1], rhs.0[1]);
            _mm_cvtsd_f64(_mm_add_sd(lo, hi))
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
