//! 通道元素类型
//!
//! 只支持 32 位和 64 位 IEEE 浮点数。几何公式需要的常量和标量运算都通过
//! [`Element`] 提供，这样几何层可以对 f32/f64 写一份泛型实现。

use std::fmt::{Debug, Display};
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

/// 通道元素（f32 或 f64）
pub trait Element:
    Copy
    + Debug
    + Display
    + Default
    + PartialEq
    + PartialOrd
    + Send
    + Sync
    + 'static
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
    + AddAssign
    + SubAssign
    + MulAssign
    + DivAssign
{
    /// 与元素等宽的位模式类型，用作比较掩码的通道表示
    type Bits: Copy + Debug + Default + Eq + Send + Sync + 'static;

    const ZERO: Self;
    const ONE: Self;
    const TWO: Self;
    const HALF: Self;
    const PI: Self;
    const EPSILON: Self;
    const INFINITY: Self;
    const NEG_INFINITY: Self;
    const NAN: Self;

    /// 全1位模式（比较结果为真）
    const TRUE_BITS: Self::Bits;
    /// 全0位模式（比较结果为假）
    const FALSE_BITS: Self::Bits;

    /// 从 f64 转换，f32 按就近舍入收窄
    fn from_f64(value: f64) -> Self;
    fn to_f64(self) -> f64;

    fn sqrt(self) -> Self;
    fn abs(self) -> Self;
    fn sin(self) -> Self;
    fn cos(self) -> Self;
    fn tan(self) -> Self;
    fn acos(self) -> Self;
    fn atan2(self, other: Self) -> Self;
    fn is_nan(self) -> bool;
    fn is_finite(self) -> bool;

    /// 与 `minps`/`minpd` 语义一致：`self < other ? self : other`
    #[inline(always)]
    fn lane_min(self, other: Self) -> Self {
        if self < other {
            self
        } else {
            other
        }
    }

    /// 与 `maxps`/`maxpd` 语义一致：`self > other ? self : other`
    #[inline(always)]
    fn lane_max(self, other: Self) -> Self {
        if self > other {
            self
        } else {
            other
        }
    }

    /// 限制到 `[lo, hi]`
    #[inline]
    fn clamp_to(self, lo: Self, hi: Self) -> Self {
        self.lane_max(lo).lane_min(hi)
    }
}

macro_rules! impl_element {
    ($t:ident, $bits:ty) => {
        impl Element for $t {
            type Bits = $bits;

            const ZERO: Self = 0.0;
            const ONE: Self = 1.0;
            const TWO: Self = 2.0;
            const HALF: Self = 0.5;
            const PI: Self = std::$t::consts::PI;
            const EPSILON: Self = $t::EPSILON;
            const INFINITY: Self = $t::INFINITY;
            const NEG_INFINITY: Self = $t::NEG_INFINITY;
            const NAN: Self = $t::NAN;

            const TRUE_BITS: $bits = <$bits>::MAX;
            const FALSE_BITS: $bits = 0;

            #[inline(always)]
            fn from_f64(value: f64) -> Self {
                value as $t
            }

            #[inline(always)]
            fn to_f64(self) -> f64 {
                self as f64
            }

            #[inline(always)]
            fn sqrt(self) -> Self {
                <$t>::sqrt(self)
            }

            #[inline(always)]
            fn abs(self) -> Self {
                <$t>::abs(self)
            }

            #[inline]
            fn sin(self) -> Self {
                <$t>::sin(self)
            }

            #[inline]
            fn cos(self) -> Self {
                <$t>::cos(self)
            }

            #[inline]
            fn tan(self) -> Self {
                <$t>::tan(self)
            }

            #[inline]
            fn acos(self) -> Self {
                <$t>::acos(self)
            }

            #[inline]
            fn atan2(self, other: Self) -> Self {
                <$t>::atan2(self, other)
            }

            #[inline(always)]
            fn is_nan(self) -> bool {
                <$t>::is_nan(self)
            }

            #[inline(always)]
            fn is_finite(self) -> bool {
                <$t>::is_finite(self)
            }
        }
    };
}

impl_element!(f32, u32);
impl_element!(f64, u64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_narrowing_rounds() {
        let v = <f32 as Element>::from_f64(0.1);
        assert_eq!(v, 0.1f32);
        assert_eq!(<f64 as Element>::from_f64(0.1), 0.1f64);
    }

    #[test]
    fn test_lane_min_max_follow_packed_semantics() {
        // 任一操作数为NaN时返回第二个操作数
        assert_eq!(<f32 as Element>::lane_min(f32::NAN, 1.0), 1.0);
        assert!(<f32 as Element>::lane_min(1.0, f32::NAN).is_nan());
        assert_eq!(<f64 as Element>::lane_max(2.0, 3.0), 3.0);
    }

    #[test]
    fn test_bit_patterns() {
        assert_eq!(<f32 as Element>::TRUE_BITS, u32::MAX);
        assert_eq!(<f64 as Element>::FALSE_BITS, 0u64);
    }

    #[test]
    fn test_clamp_to() {
        assert_eq!(<f32 as Element>::clamp_to(1.5, 0.0, 1.0), 1.0);
        assert_eq!(<f64 as Element>::clamp_to(-0.5, 0.0, 1.0), 0.0);
    }
}
