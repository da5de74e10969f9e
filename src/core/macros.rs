//! 核心宏定义
//!
//! 提供统一的宏来减少代码重复

/// 为结构体实现Default trait的宏
///
/// 使用示例:
/// ```rust
/// use lanemath::impl_default;
///
/// struct MyStruct {
///     field1: u32,
///     field2: String,
/// }
///
/// impl_default!(MyStruct {
///     field1: 0,
///     field2: String::new(),
/// });
/// ```
#[macro_export]
macro_rules! impl_default {
    ($struct_name:ident {
        $($field:ident: $value:expr),* $(,)?
    }) => {
        impl Default for $struct_name {
            fn default() -> Self {
                Self {
                    $($field: $value),*
                }
            }
        }
    };
}

/// 为持有单个 `lanes` 字段的向量类型实现算术运算符
///
/// 目标类型需要提供 `fn from_lanes(Lanes<T>) -> Self`，负责把填充通道重置为零。
/// 标量在左侧的乘法只为 f32/f64 实现。
macro_rules! impl_vector_ops {
    ($name:ident) => {
        impl<T: lanemath_simd::SimdElement> std::ops::Add for $name<T> {
            type Output = Self;

            #[inline]
            fn add(self, rhs: Self) -> Self {
                Self::from_lanes(self.lanes + rhs.lanes)
            }
        }

        impl<T: lanemath_simd::SimdElement> std::ops::Sub for $name<T> {
            type Output = Self;

            #[inline]
            fn sub(self, rhs: Self) -> Self {
                Self::from_lanes(self.lanes - rhs.lanes)
            }
        }

        impl<T: lanemath_simd::SimdElement> std::ops::Mul for $name<T> {
            type Output = Self;

            #[inline]
            fn mul(self, rhs: Self) -> Self {
                Self::from_lanes(self.lanes * rhs.lanes)
            }
        }

        impl<T: lanemath_simd::SimdElement> std::ops::Div for $name<T> {
            type Output = Self;

            #[inline]
            fn div(self, rhs: Self) -> Self {
                Self::from_lanes(self.lanes / rhs.lanes)
            }
        }

        impl<T: lanemath_simd::SimdElement> std::ops::Mul<T> for $name<T> {
            type Output = Self;

            #[inline]
            fn mul(self, rhs: T) -> Self {
                Self::from_lanes(self.lanes.scale(rhs))
            }
        }

        impl<T: lanemath_simd::SimdElement> std::ops::Div<T> for $name<T> {
            type Output = Self;

            #[inline]
            fn div(self, rhs: T) -> Self {
                Self::from_lanes(self.lanes / lanemath_simd::Lanes::splat(rhs))
            }
        }

        impl<T: lanemath_simd::SimdElement> std::ops::Neg for $name<T> {
            type Output = Self;

            #[inline]
            fn neg(self) -> Self {
                Self::from_lanes(-self.lanes)
            }
        }

        impl<T: lanemath_simd::SimdElement> std::ops::AddAssign for $name<T> {
            #[inline]
            fn add_assign(&mut self, rhs: Self) {
                *self = *self + rhs;
            }
        }

        impl<T: lanemath_simd::SimdElement> std::ops::SubAssign for $name<T> {
            #[inline]
            fn sub_assign(&mut self, rhs: Self) {
                *self = *self - rhs;
            }
        }

        impl<T: lanemath_simd::SimdElement> std::ops::MulAssign for $name<T> {
            #[inline]
            fn mul_assign(&mut self, rhs: Self) {
                *self = *self * rhs;
            }
        }

        impl<T: lanemath_simd::SimdElement> std::ops::MulAssign<T> for $name<T> {
            #[inline]
            fn mul_assign(&mut self, rhs: T) {
                *self = *self * rhs;
            }
        }

        impl<T: lanemath_simd::SimdElement> std::ops::DivAssign<T> for $name<T> {
            #[inline]
            fn div_assign(&mut self, rhs: T) {
                *self = *self / rhs;
            }
        }

        impl std::ops::Mul<$name<f32>> for f32 {
            type Output = $name<f32>;

            #[inline]
            fn mul(self, rhs: $name<f32>) -> $name<f32> {
                rhs * self
            }
        }

        impl std::ops::Mul<$name<f64>> for f64 {
            type Output = $name<f64>;

            #[inline]
            fn mul(self, rhs: $name<f64>) -> $name<f64> {
                rhs * self
            }
        }
    };
}
