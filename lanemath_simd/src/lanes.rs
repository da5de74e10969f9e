//! 泛型4通道向量外观
//!
//! [`Lanes`] 是几何层唯一持有的数值类型。它只是对存储后端的透明包装：
//! 后端由类型参数在编译期确定，每个方法都转发到 [`LaneStorage`] 的对应原语，
//! 不存在运行时分发或按后端分支。
//!
//! 数学上未定义的操作（除以零通道、零长度归一化等）不做防护，直接产生
//! IEEE-754 的 Inf/NaN。

use std::fmt;
use std::marker::PhantomData;
use std::ops::{
    Add, AddAssign, Div, DivAssign, Index, IndexMut, Mul, MulAssign, Neg, Sub, SubAssign,
};

use crate::backend::{LaneMask, LaneStorage};
use crate::select::SimdElement;
use crate::SimdBackend;

/// 4通道向量
///
/// `S` 默认为当前构建为 `T` 选定的后端，也可以显式指定其他后端
/// （例如 `Lanes<f32, ArrayStorage<f32>>`）用于交叉校验。
#[derive(Clone, Copy)]
#[repr(transparent)]
pub struct Lanes<T: SimdElement, S: LaneStorage<Elem = T> = <T as SimdElement>::Storage> {
    storage: S,
    _element: PhantomData<T>,
}

/// 单精度4通道向量
pub type Float4 = Lanes<f32>;
/// 双精度4通道向量
pub type Double4 = Lanes<f64>;

/// 编译期通道索引检查
struct LaneIndex<const I: usize>;

impl<const I: usize> LaneIndex<I> {
    const VALID: () = assert!(I < 4, "lane index must be in [0, 4)");
}

impl<T: SimdElement, S: LaneStorage<Elem = T>> Lanes<T, S> {
    #[inline(always)]
    pub fn new(x: T, y: T, z: T, w: T) -> Self {
        Self::from_storage(S::new(x, y, z, w))
    }

    /// 广播到所有通道
    #[inline(always)]
    pub fn splat(value: T) -> Self {
        Self::from_storage(S::splat(value))
    }

    #[inline(always)]
    pub fn zero() -> Self {
        Self::splat(T::ZERO)
    }

    #[inline(always)]
    pub fn from_array(values: [T; 4]) -> Self {
        Self::from_storage(S::from_array(values))
    }

    /// 从缓冲区的前4个元素构造
    ///
    /// `values` 少于4个元素时panic。
    #[inline]
    pub fn from_slice(values: &[T]) -> Self {
        debug_assert!(values.len() >= 4, "need 4 values, got {}", values.len());
        let mut storage = S::splat(T::ZERO);
        storage.copy_from_slice(values);
        Self::from_storage(storage)
    }

    #[inline(always)]
    pub fn from_storage(storage: S) -> Self {
        Self {
            storage,
            _element: PhantomData,
        }
    }

    #[inline(always)]
    pub fn storage(&self) -> &S {
        &self.storage
    }

    #[inline(always)]
    pub fn into_storage(self) -> S {
        self.storage
    }

    #[inline(always)]
    pub fn to_array(&self) -> [T; 4] {
        self.storage.to_array()
    }

    #[inline(always)]
    pub fn as_array(&self) -> &[T; 4] {
        self.storage.as_array()
    }

    /// 复制到缓冲区的前4个元素
    #[inline]
    pub fn copy_to_slice(&self, dst: &mut [T]) {
        debug_assert!(dst.len() >= 4, "need room for 4 values, got {}", dst.len());
        self.storage.copy_to_slice(dst);
    }

    /// 当前存储所属的后端
    #[inline(always)]
    pub fn backend() -> SimdBackend {
        S::BACKEND
    }

    #[inline(always)]
    pub fn x(&self) -> T {
        self.storage.get(0)
    }

    #[inline(always)]
    pub fn y(&self) -> T {
        self.storage.get(1)
    }

    #[inline(always)]
    pub fn z(&self) -> T {
        self.storage.get(2)
    }

    #[inline(always)]
    pub fn w(&self) -> T {
        self.storage.get(3)
    }

    #[inline(always)]
    pub fn set_x(&mut self, value: T) {
        self.storage.set(0, value);
    }

    #[inline(always)]
    pub fn set_y(&mut self, value: T) {
        self.storage.set(1, value);
    }

    #[inline(always)]
    pub fn set_z(&mut self, value: T) {
        self.storage.set(2, value);
    }

    #[inline(always)]
    pub fn set_w(&mut self, value: T) {
        self.storage.set(3, value);
    }

    /// 读取通道 `index`
    #[inline(always)]
    pub fn get(&self, index: usize) -> T {
        debug_assert!(index < 4, "lane index out of range: {}", index);
        self.storage.get(index)
    }

    #[inline(always)]
    pub fn set(&mut self, index: usize, value: T) {
        debug_assert!(index < 4, "lane index out of range: {}", index);
        self.storage.set(index, value);
    }

    /// 逐通道乘以标量
    #[inline(always)]
    pub fn scale(self, factor: T) -> Self {
        self * Self::splat(factor)
    }

    #[inline(always)]
    pub fn min(self, rhs: Self) -> Self {
        Self::from_storage(self.storage.min(rhs.storage))
    }

    #[inline(always)]
    pub fn max(self, rhs: Self) -> Self {
        Self::from_storage(self.storage.max(rhs.storage))
    }

    #[inline(always)]
    pub fn abs(self) -> Self {
        Self::from_storage(self.storage.abs())
    }

    #[inline(always)]
    pub fn sqrt(self) -> Self {
        Self::from_storage(self.storage.sqrt())
    }

    /// 逐通道限制到 `[lo, hi]`
    #[inline(always)]
    pub fn clamp(self, lo: Self, hi: Self) -> Self {
        self.max(lo).min(hi)
    }

    /// 逐通道线性插值 `self + (rhs - self) * t`
    #[inline(always)]
    pub fn lerp(self, rhs: Self, t: T) -> Self {
        self + (rhs - self).scale(t)
    }

    #[inline(always)]
    pub fn dot2(self, rhs: Self) -> T {
        self.storage.dot2(rhs.storage)
    }

    #[inline(always)]
    pub fn dot3(self, rhs: Self) -> T {
        self.storage.dot3(rhs.storage)
    }

    #[inline(always)]
    pub fn dot4(self, rhs: Self) -> T {
        self.storage.dot4(rhs.storage)
    }

    #[inline(always)]
    pub fn cmp_eq(self, rhs: Self) -> Mask4<S::Mask> {
        Mask4(self.storage.cmp_eq(rhs.storage))
    }

    #[inline(always)]
    pub fn cmp_ne(self, rhs: Self) -> Mask4<S::Mask> {
        Mask4(self.storage.cmp_ne(rhs.storage))
    }

    #[inline(always)]
    pub fn cmp_lt(self, rhs: Self) -> Mask4<S::Mask> {
        Mask4(self.storage.cmp_lt(rhs.storage))
    }

    #[inline(always)]
    pub fn cmp_le(self, rhs: Self) -> Mask4<S::Mask> {
        Mask4(self.storage.cmp_le(rhs.storage))
    }

    #[inline(always)]
    pub fn cmp_gt(self, rhs: Self) -> Mask4<S::Mask> {
        Mask4(self.storage.cmp_gt(rhs.storage))
    }

    #[inline(always)]
    pub fn cmp_ge(self, rhs: Self) -> Mask4<S::Mask> {
        Mask4(self.storage.cmp_ge(rhs.storage))
    }

    /// 掩码为真的通道取 `a`，否则取 `b`
    #[inline(always)]
    pub fn select(mask: Mask4<S::Mask>, a: Self, b: Self) -> Self {
        Self::from_storage(S::select(mask.0, a.storage, b.storage))
    }

    /// 按编译期索引重排，结果通道 i 取源通道 `I<i>`
    ///
    /// ```rust
    /// use lanemath_simd::Float4;
    ///
    /// let v = Float4::new(1.0, 2.0, 3.0, 4.0);
    /// assert_eq!(v.shuffle::<1, 0, 3, 3>().to_array(), [2.0, 1.0, 4.0, 4.0]);
    /// ```
    #[inline(always)]
    pub fn shuffle<const I0: usize, const I1: usize, const I2: usize, const I3: usize>(
        self,
    ) -> Self {
        let () = LaneIndex::<I0>::VALID;
        let () = LaneIndex::<I1>::VALID;
        let () = LaneIndex::<I2>::VALID;
        let () = LaneIndex::<I3>::VALID;
        Self::from_storage(self.storage.shuffle::<I0, I1, I2, I3>())
    }

    /// 把通道 `I` 广播到所有通道
    #[inline(always)]
    pub fn broadcast<const I: usize>(self) -> Self {
        self.shuffle::<I, I, I, I>()
    }

    /// 逐通道转换元素类型和/或后端
    ///
    /// f64 → f32 按就近舍入收窄。
    #[inline]
    pub fn cast<U: SimdElement, D: LaneStorage<Elem = U>>(self) -> Lanes<U, D> {
        let a = self.as_array();
        Lanes::new(
            U::from_f64(a[0].to_f64()),
            U::from_f64(a[1].to_f64()),
            U::from_f64(a[2].to_f64()),
            U::from_f64(a[3].to_f64()),
        )
    }
}

impl<T: SimdElement, S: LaneStorage<Elem = T>> Default for Lanes<T, S> {
    #[inline(always)]
    fn default() -> Self {
        Self::zero()
    }
}

impl<T: SimdElement, S: LaneStorage<Elem = T>> fmt::Debug for Lanes<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let a = self.as_array();
        f.debug_tuple("Lanes")
            .field(&a[0])
            .field(&a[1])
            .field(&a[2])
            .field(&a[3])
            .finish()
    }
}

impl<T: SimdElement, S: LaneStorage<Elem = T>> fmt::Display for Lanes<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let a = self.as_array();
        write!(f, "({}, {}, {}, {})", a[0], a[1], a[2], a[3])
    }
}

/// 所有通道都相等时为真；任一通道为NaN时为假
impl<T: SimdElement, S: LaneStorage<Elem = T>> PartialEq for Lanes<T, S> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        let mask = self.cmp_eq(*other);
        mask[0] && mask[1] && mask[2] && mask[3]
    }
}

impl<T: SimdElement, S: LaneStorage<Elem = T>> Index<usize> for Lanes<T, S> {
    type Output = T;

    #[inline(always)]
    fn index(&self, index: usize) -> &T {
        debug_assert!(index < 4, "lane index out of range: {}", index);
        &self.storage.as_array()[index]
    }
}

impl<T: SimdElement, S: LaneStorage<Elem = T>> IndexMut<usize> for Lanes<T, S> {
    #[inline(always)]
    fn index_mut(&mut self, index: usize) -> &mut T {
        debug_assert!(index < 4, "lane index out of range: {}", index);
        &mut self.storage.as_array_mut()[index]
    }
}

impl<T: SimdElement, S: LaneStorage<Elem = T>> Neg for Lanes<T, S> {
    type Output = Self;

    #[inline(always)]
    fn neg(self) -> Self {
        Self::from_storage(self.storage.neg())
    }
}

macro_rules! impl_lane_ops {
    ($($op:ident, $method:ident, $assign_op:ident, $assign_method:ident;)*) => {
        $(
            impl<T: SimdElement, S: LaneStorage<Elem = T>> $op for Lanes<T, S> {
                type Output = Self;

                #[inline(always)]
                fn $method(self, rhs: Self) -> Self {
                    Self::from_storage(self.storage.$method(rhs.storage))
                }
            }

            impl<T: SimdElement, S: LaneStorage<Elem = T>> $assign_op for Lanes<T, S> {
                #[inline(always)]
                fn $assign_method(&mut self, rhs: Self) {
                    self.storage.$assign_method(rhs.storage);
                }
            }
        )*
    };
}

impl_lane_ops! {
    Add, add, AddAssign, add_assign;
    Sub, sub, SubAssign, sub_assign;
    Mul, mul, MulAssign, mul_assign;
    Div, div, DivAssign, div_assign;
}

// 标量运算按具体元素类型实现，避免与向量-向量运算的impl重叠
macro_rules! impl_scalar_ops {
    ($t:ty => $($op:ident, $method:ident, $assign_op:ident, $assign_method:ident;)*) => {
        $(
            impl<S: LaneStorage<Elem = $t>> $op<$t> for Lanes<$t, S> {
                type Output = Self;

                #[inline(always)]
                fn $method(self, rhs: $t) -> Self {
                    Self::from_storage(self.storage.$method(S::splat(rhs)))
                }
            }

            impl<S: LaneStorage<Elem = $t>> $op<Lanes<$t, S>> for $t {
                type Output = Lanes<$t, S>;

                #[inline(always)]
                fn $method(self, rhs: Lanes<$t, S>) -> Lanes<$t, S> {
                    Lanes::from_storage(S::splat(self).$method(rhs.storage))
                }
            }

            impl<S: LaneStorage<Elem = $t>> $assign_op<$t> for Lanes<$t, S> {
                #[inline(always)]
                fn $assign_method(&mut self, rhs: $t) {
                    self.storage.$assign_method(S::splat(rhs));
                }
            }
        )*
    };
}

impl_scalar_ops! { f32 =>
    Add, add, AddAssign, add_assign;
    Sub, sub, SubAssign, sub_assign;
    Mul, mul, MulAssign, mul_assign;
    Div, div, DivAssign, div_assign;
}

impl_scalar_ops! { f64 =>
    Add, add, AddAssign, add_assign;
    Sub, sub, SubAssign, sub_assign;
    Mul, mul, MulAssign, mul_assign;
    Div, div, DivAssign, div_assign;
}

/// 双精度收窄为单精度（逐通道就近舍入）
impl<S: LaneStorage<Elem = f64>, D: LaneStorage<Elem = f32>> From<Lanes<f64, S>> for Lanes<f32, D> {
    #[inline]
    fn from(value: Lanes<f64, S>) -> Self {
        value.cast()
    }
}

/// 单精度扩展为双精度（精确）
impl<S: LaneStorage<Elem = f32>, D: LaneStorage<Elem = f64>> From<Lanes<f32, S>> for Lanes<f64, D> {
    #[inline]
    fn from(value: Lanes<f32, S>) -> Self {
        value.cast()
    }
}

impl<T: SimdElement, S: LaneStorage<Elem = T>> From<[T; 4]> for Lanes<T, S> {
    #[inline(always)]
    fn from(values: [T; 4]) -> Self {
        Self::from_array(values)
    }
}

/// 比较结果外观
///
/// 只能按通道读写，库本身不提供 all/any 规约：
///
/// ```rust
/// use lanemath_simd::Float4;
///
/// let a = Float4::new(1.0, 2.0, 3.0, 4.0);
/// let m = a.cmp_lt(Float4::splat(3.0));
/// assert!(m[0] && m[1] && !m[2] && !m[3]);
/// ```
#[derive(Clone, Copy)]
#[repr(transparent)]
pub struct Mask4<M: LaneMask>(M);

impl<M: LaneMask> Mask4<M> {
    #[inline(always)]
    pub fn from_mask(mask: M) -> Self {
        Self(mask)
    }

    #[inline]
    pub fn from_bools(values: [bool; 4]) -> Self {
        Self(M::from_bools(values))
    }

    #[inline(always)]
    pub fn get(&self, index: usize) -> bool {
        debug_assert!(index < 4, "lane index out of range: {}", index);
        self.0.get(index)
    }

    #[inline(always)]
    pub fn set(&mut self, index: usize, value: bool) {
        debug_assert!(index < 4, "lane index out of range: {}", index);
        self.0.set(index, value);
    }

    #[inline]
    pub fn to_array(&self) -> [bool; 4] {
        self.0.to_bools()
    }

    #[inline(always)]
    pub fn into_inner(self) -> M {
        self.0
    }
}

impl<M: LaneMask> Index<usize> for Mask4<M> {
    type Output = bool;

    #[inline(always)]
    fn index(&self, index: usize) -> &bool {
        if self.get(index) {
            &true
        } else {
            &false
        }
    }
}

impl<M: LaneMask> PartialEq for Mask4<M> {
    fn eq(&self, other: &Self) -> bool {
        self.to_array() == other.to_array()
    }
}

impl<M: LaneMask> fmt::Debug for Mask4<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Mask4").field(&self.to_array()).finish()
    }
}
