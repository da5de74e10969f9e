//! AVX 256位后端
//!
//! 4个f64正好填满一个 `__m256d`。f32 的4通道只有128位，AVX没有额外收益，仍使用SSE后端。

#[cfg(target_arch = "x86")]
use std::arch::x86::*;
#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

use super::x86::pick_pair;
use super::{LaneMask, LaneStorage};
use crate::SimdBackend;

/// 4个f64打包在一个 `__m256d` 中
#[derive(Clone, Copy)]
#[repr(transparent)]
pub struct AvxF64x4(pub __m256d);

/// `AvxF64x4` 的比较结果
#[derive(Clone, Copy)]
#[repr(transparent)]
pub struct AvxMaskF64(pub __m256d);

impl std::fmt::Debug for AvxF64x4 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("AvxF64x4").field(self.as_array()).finish()
    }
}

impl std::fmt::Debug for AvxMaskF64 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("AvxMaskF64").field(&self.to_bools()).finish()
    }
}

impl LaneMask for AvxMaskF64 {
    #[inline(always)]
    fn get(&self, index: usize) -> bool {
        assert!(index < 4, "lane index out of range: {}", index);
        let bits = unsafe { _mm256_movemask_pd(self.0) };
        (bits >> index) & 1 != 0
    }

    #[inline(always)]
    fn set(&mut self, index: usize, value: bool) {
        let lanes = unsafe { &mut *(&mut self.0 as *mut __m256d as *mut [u64; 4]) };
        lanes[index] = if value { u64::MAX } else { 0 };
    }

    #[inline]
    fn from_bools(values: [bool; 4]) -> Self {
        let lane = |b: bool| if b { -1i64 } else { 0 };
        Self(unsafe {
            _mm256_castsi256_pd(_mm256_setr_epi64x(
                lane(values[0]),
                lane(values[1]),
                lane(values[2]),
                lane(values[3]),
            ))
        })
    }
}

impl AvxF64x4 {
    #[inline(always)]
    fn compare<const PREDICATE: i32>(self, rhs: Self) -> AvxMaskF64 {
        AvxMaskF64(unsafe { _mm256_cmp_pd::<PREDICATE>(self.0, rhs.0) })
    }

    #[inline(always)]
    fn halves(self) -> (__m128d, __m128d) {
        unsafe { (_mm256_castpd256_pd128(self.0), _mm256_extractf128_pd(self.0, 1)) }
    }
}

impl LaneStorage for AvxF64x4 {
    type Elem = f64;
    type Mask = AvxMaskF64;

    const BACKEND: SimdBackend = SimdBackend::Avx;

    #[inline(always)]
    fn new(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self(unsafe { _mm256_setr_pd(x, y, z, w) })
    }

    #[inline(always)]
    fn splat(value: f64) -> Self {
        Self(unsafe { _mm256_set1_pd(value) })
    }

    #[inline(always)]
    fn from_array(values: [f64; 4]) -> Self {
        Self(unsafe { _mm256_loadu_pd(values.as_ptr()) })
    }

    #[inline(always)]
    fn as_array(&self) -> &[f64; 4] {
        unsafe { &*(&self.0 as *const __m256d as *const [f64; 4]) }
    }

    #[inline(always)]
    fn as_array_mut(&mut self) -> &mut [f64; 4] {
        unsafe { &mut *(&mut self.0 as *mut __m256d as *mut [f64; 4]) }
    }

    #[inline(always)]
    fn neg(self) -> Self {
        Self(unsafe { _mm256_xor_pd(self.0, _mm256_set1_pd(-0.0)) })
    }

    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        Self(unsafe { _mm256_add_pd(self.0, rhs.0) })
    }

    #[inline(always)]
    fn sub(self, rhs: Self) -> Self {
        Self(unsafe { _mm256_sub_pd(self.0, rhs.0) })
    }

    #[inline(always)]
    fn mul(self, rhs: Self) -> Self {
        Self(unsafe { _mm256_mul_pd(self.0, rhs.0) })
    }

    #[inline(always)]
    fn div(self, rhs: Self) -> Self {
        Self(unsafe { _mm256_div_pd(self.0, rhs.0) })
    }

    #[inline(always)]
    fn min(self, rhs: Self) -> Self {
        Self(unsafe { _mm256_min_pd(self.0, rhs.0) })
    }

    #[inline(always)]
    fn max(self, rhs: Self) -> Self {
        Self(unsafe { _mm256_max_pd(self.0, rhs.0) })
    }

    #[inline(always)]
    fn abs(self) -> Self {
        Self(unsafe { _mm256_andnot_pd(_mm256_set1_pd(-0.0), self.0) })
    }

    #[inline(always)]
    fn sqrt(self) -> Self {
        Self(unsafe { _mm256_sqrt_pd(self.0) })
    }

    #[inline(always)]
    fn cmp_eq(self, rhs: Self) -> AvxMaskF64 {
        self.compare::<_CMP_EQ_OQ>(rhs)
    }

    #[inline(always)]
    fn cmp_ne(self, rhs: Self) -> AvxMaskF64 {
        // 无序比较为真，与 cmpneqpd 一致
        self.compare::<_CMP_NEQ_UQ>(rhs)
    }

    #[inline(always)]
    fn cmp_lt(self, rhs: Self) -> AvxMaskF64 {
        self.compare::<_CMP_LT_OQ>(rhs)
    }

    #[inline(always)]
    fn cmp_le(self, rhs: Self) -> AvxMaskF64 {
        self.compare::<_CMP_LE_OQ>(rhs)
    }

    #[inline(always)]
    fn cmp_gt(self, rhs: Self) -> AvxMaskF64 {
        self.compare::<_CMP_GT_OQ>(rhs)
    }

    #[inline(always)]
    fn cmp_ge(self, rhs: Self) -> AvxMaskF64 {
        self.compare::<_CMP_GE_OQ>(rhs)
    }

    #[inline(always)]
    fn select(mask: AvxMaskF64, a: Self, b: Self) -> Self {
        Self(unsafe { _mm256_blendv_pd(b.0, a.0, mask.0) })
    }

    #[inline(always)]
    fn dot2(self, rhs: Self) -> f64 {
        let (a, _) = self.halves();
        let (b, _) = rhs.halves();
        unsafe { _mm_cvtsd_f64(_mm_dp_pd(a, b, 0x31)) }
    }

    #[inline(always)]
    fn dot3(self, rhs: Self) -> f64 {
        let (a_lo, a_hi) = self.halves();
        let (b_lo, b_hi) = rhs.halves();
        unsafe {
            let xy = _mm_dp_pd(a_lo, b_lo, 0x31);
            let z = _mm_mul_sd(a_hi, b_hi);
            _mm_cvtsd_f64(_mm_add_sd(xy, z))
        }
    }

    #[inline(always)]
    fn dot4(self, rhs: Self) -> f64 {
        unsafe {
            let mul = _mm256_mul_pd(self.0, rhs.0);
            // hadd得到 [x+y, x+y, z+w, z+w]
            let pairs = _mm256_hadd_pd(mul, mul);
            let lo = _mm256_castpd256_pd128(pairs);
            let hi = _mm256_extractf128_pd(pairs, 1);
            _mm_cvtsd_f64(_mm_add_sd(lo, hi))
        }
    }
    /// AVX没有跨128位半区的任意双精度重排（`vpermpd` 属于AVX2），按半区组合
    #[inline(always)]
    fn shuffle<const I0: usize, const I1: usize, const I2: usize, const I3: usize>(self) -> Self {
        let (lo, hi) = self.halves();
        let r = [lo, hi];
        unsafe {
            Self(_mm256_set_m128d(
                pick_pair(r[I2 >> 1], r[I3 >> 1], I2, I3),
                pick_pair(r[I0 >> 1], r[I1 >> 1], I0, I1),
            ))
        }
    }
}
