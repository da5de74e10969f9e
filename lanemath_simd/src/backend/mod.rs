//! 存储后端
//!
//! 每个硬件目标提供一组存储类型，实现 [`LaneStorage`] 与 [`LaneMask`]：
//! - `scalar`: 通用数组实现，任何平台都可用
//! - `x86`: SSE2/SSE4.1 128位打包实现 (f32: `__m128`, f64: 两个 `__m128d`)
//! - `avx`: AVX 256位实现 (f64: `__m256d`)
//! - `arm`: NEON实现 (f32: `float32x4_t`, f64: 两个 `float64x2_t`)
//!
//! 打包后端只有在构建目标声明了对应指令集时才会编译，不做运行时检测。

use crate::element::Element;
use crate::SimdBackend;
use std::fmt::Debug;

pub mod scalar;

#[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), target_feature = "sse2"))]
pub mod x86;

#[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), target_feature = "avx"))]
pub mod avx;

#[cfg(all(target_arch = "aarch64", target_feature = "neon"))]
pub mod arm;

/// 4通道比较结果
///
/// 每个通道是与元素等宽的全1/全0位模式，可以由硬件比较指令直接产生。
/// 不定义任何算术，也不提供 all/any 规约。
pub trait LaneMask: Copy + Debug {
    /// 读取通道 `index` 的布尔值
    ///
    /// `index` 必须在 `[0, 4)` 内，越界时panic。
    fn get(&self, index: usize) -> bool;

    /// 写入通道 `index` 的布尔值
    fn set(&mut self, index: usize, value: bool);

    /// 从4个布尔值构造
    fn from_bools(values: [bool; 4]) -> Self;

    /// 转换为4个布尔值
    #[inline]
    fn to_bools(&self) -> [bool; 4] {
        [self.get(0), self.get(1), self.get(2), self.get(3)]
    }
}

/// 4通道存储的原语操作集合
///
/// 外观类型 [`crate::Lanes`] 只依赖这里列出的操作。所有实现必须满足：
/// - 内存中的通道顺序总是 `[0, 1, 2, 3]`
/// - 加减乘除与同一标量运算逐通道结果完全相同
/// - 比较遵循IEEE-754：NaN与任何值（包括自身）都不相等，`cmp_ne` 对NaN为真
/// - 点积可以使用不同的规约顺序，结果只要求在重结合误差内一致
pub trait LaneStorage: Copy + Debug {
    /// 元素类型
    type Elem: Element;
    /// 比较结果类型
    type Mask: LaneMask;

    /// 实现所属的后端
    const BACKEND: SimdBackend;

    fn new(x: Self::Elem, y: Self::Elem, z: Self::Elem, w: Self::Elem) -> Self;

    /// 广播到所有通道
    fn splat(value: Self::Elem) -> Self;

    #[inline(always)]
    fn from_array(values: [Self::Elem; 4]) -> Self {
        Self::new(values[0], values[1], values[2], values[3])
    }

    #[inline(always)]
    fn to_array(&self) -> [Self::Elem; 4] {
        *self.as_array()
    }

    /// 以普通数组视图访问通道
    fn as_array(&self) -> &[Self::Elem; 4];

    fn as_array_mut(&mut self) -> &mut [Self::Elem; 4];

    #[inline(always)]
    fn get(&self, index: usize) -> Self::Elem {
        self.as_array()[index]
    }

    #[inline(always)]
    fn set(&mut self, index: usize, value: Self::Elem) {
        self.as_array_mut()[index] = value;
    }

    /// 从普通缓冲区复制前4个元素
    #[inline]
    fn copy_from_slice(&mut self, src: &[Self::Elem]) {
        self.as_array_mut().copy_from_slice(&src[..4]);
    }

    /// 复制到普通缓冲区的前4个元素
    #[inline]
    fn copy_to_slice(&self, dst: &mut [Self::Elem]) {
        dst[..4].copy_from_slice(self.as_array());
    }

    /// 逐通道取反（翻转符号位，不经过减法）
    fn neg(self) -> Self;

    fn add(self, rhs: Self) -> Self;
    fn sub(self, rhs: Self) -> Self;
    fn mul(self, rhs: Self) -> Self;
    fn div(self, rhs: Self) -> Self;

    #[inline(always)]
    fn add_assign(&mut self, rhs: Self) {
        *self = self.add(rhs);
    }

    #[inline(always)]
    fn sub_assign(&mut self, rhs: Self) {
        *self = self.sub(rhs);
    }

    #[inline(always)]
    fn mul_assign(&mut self, rhs: Self) {
        *self = self.mul(rhs);
    }

    #[inline(always)]
    fn div_assign(&mut self, rhs: Self) {
        *self = self.div(rhs);
    }

    /// 逐通道最小值，语义同 `minps`：`a < b ? a : b`
    fn min(self, rhs: Self) -> Self;
    /// 逐通道最大值，语义同 `maxps`：`a > b ? a : b`
    fn max(self, rhs: Self) -> Self;
    fn abs(self) -> Self;
    fn sqrt(self) -> Self;

    fn cmp_eq(self, rhs: Self) -> Self::Mask;
    fn cmp_ne(self, rhs: Self) -> Self::Mask;
    fn cmp_lt(self, rhs: Self) -> Self::Mask;
    fn cmp_le(self, rhs: Self) -> Self::Mask;
    fn cmp_gt(self, rhs: Self) -> Self::Mask;
    fn cmp_ge(self, rhs: Self) -> Self::Mask;

    /// 按掩码混合：掩码为真的通道取 `a`，否则取 `b`
    #[inline]
    fn select(mask: Self::Mask, a: Self, b: Self) -> Self {
        let (a, b) = (a.to_array(), b.to_array());
        Self::new(
            if mask.get(0) { a[0] } else { b[0] },
            if mask.get(1) { a[1] } else { b[1] },
            if mask.get(2) { a[2] } else { b[2] },
            if mask.get(3) { a[3] } else { b[3] },
        )
    }

    /// 前2个通道的点积
    fn dot2(self, rhs: Self) -> Self::Elem;
    /// 前3个通道的点积
    fn dot3(self, rhs: Self) -> Self::Elem;
    /// 全部4个通道的点积
    fn dot4(self, rhs: Self) -> Self::Elem;

    /// 按编译期索引重排：结果的通道 i 等于源通道 `I<i>`
    ///
    /// 索引可以重复；索引是常量，优化后归结为单条重排指令。
    #[inline(always)]
    fn shuffle<const I0: usize, const I1: usize, const I2: usize, const I3: usize>(self) -> Self {
        let a = self.as_array();
        Self::new(a[I0], a[I1], a[I2], a[I3])
    }
}
