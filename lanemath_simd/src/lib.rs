//! # lanemath_simd
//!
//! 4通道SIMD向量抽象，为lanemath的几何类型提供统一的算术、比较、规约和重排语义。
//!
//! ## 特性
//!
//! - **编译期后端选择**: 根据构建目标声明的指令集（SSE2/SSE4.1/AVX/NEON）为 f32/f64 各选定一个存储后端
//! - **统一语义**: 所有后端在加减乘除、比较（含NaN）、重排上结果一致，点积在浮点重结合误差内一致
//! - **零成本外观**: [`Lanes`] 的每个方法都可完全内联，不存在运行时分发
//! - **能力探测**: 一次性探测CPU特性，仅用于诊断和校验编译期后端是否与运行时硬件匹配
//!
//! ## 快速开始
//!
//! ```rust
//! use lanemath_simd::{Float4, SimdBackend};
//!
//! let a = Float4::new(1.0, 2.0, 3.0, 4.0);
//! let b = Float4::splat(2.0);
//!
//! let sum = a + b;
//! assert_eq!(sum.to_array(), [3.0, 4.0, 5.0, 6.0]);
//! assert_eq!(a.dot4(b), 20.0);
//!
//! // 编译期重排
//! let rev = a.shuffle::<3, 2, 1, 0>();
//! assert_eq!(rev.x(), 4.0);
//!
//! println!("f32 后端: {:?}", Float4::backend());
//! # let _ = SimdBackend::Scalar;
//! ```
//!
//! ## 模块
//!
//! - [`cpu_detect`]: CPU特性检测与后端校验
//! - [`backend`]: 各硬件目标的存储实现
//! - [`lanes`]: 泛型向量外观与比较掩码
//! - [`select`]: 元素类型到后端的编译期映射

pub mod backend;
pub mod cpu_detect;
pub mod element;
pub mod error;
pub mod lanes;
pub mod select;

// 重新导出主要类型
pub use backend::scalar::{ArrayMask, ArrayStorage};
pub use backend::{LaneMask, LaneStorage};
pub use cpu_detect::{
    compiled_features, cpu_info_report, detect_cpu_features, missing_extensions, print_cpu_info,
    validate_backend, validate_features, CpuFeatures, CpuVendor,
};
pub use element::Element;
pub use error::{CapabilityError, CapabilityResult};
pub use lanes::{Double4, Float4, Lanes, Mask4};
pub use select::SimdElement;

/// SIMD寄存器宽度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimdWidth {
    /// 无打包寄存器（普通数组）
    Scalar,
    /// 128位 (SSE, NEON)
    W128,
    /// 256位 (AVX)
    W256,
}

/// SIMD后端类型
///
/// 每个 [`LaneStorage`] 实现都通过关联常量报告自己属于哪个后端。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimdBackend {
    /// 通用数组实现（无SIMD）
    Scalar,
    /// SSE2 (Intel/AMD)
    Sse2,
    /// SSE4.1 (Intel/AMD)，点积使用 `dpps`/`dppd`
    Sse41,
    /// AVX 256位 (Intel/AMD)
    Avx,
    /// ARM NEON (aarch64)
    Neon,
}

impl SimdBackend {
    /// 获取SIMD寄存器宽度
    pub fn width(&self) -> SimdWidth {
        match self {
            Self::Scalar => SimdWidth::Scalar,
            Self::Sse2 | Self::Sse41 | Self::Neon => SimdWidth::W128,
            Self::Avx => SimdWidth::W256,
        }
    }

    /// 后端运行所需的CPU扩展
    ///
    /// 名称与 [`CpuFeatures::supports`] 接受的名称一致。
    ///
    /// # 示例
    ///
    /// ```rust
    /// use lanemath_simd::SimdBackend;
    ///
    /// assert!(SimdBackend::Scalar.required_extensions().is_empty());
    /// assert_eq!(SimdBackend::Sse41.required_extensions(), &["sse2", "sse4.1"]);
    /// ```
    pub fn required_extensions(&self) -> &'static [&'static str] {
        match self {
            Self::Scalar => &[],
            Self::Sse2 => &["sse2"],
            Self::Sse41 => &["sse2", "sse4.1"],
            Self::Avx => &["sse2", "sse4.1", "avx"],
            Self::Neon => &["neon"],
        }
    }

    /// 后端名称（用于日志和报告）
    pub fn name(&self) -> &'static str {
        match self {
            Self::Scalar => "scalar",
            Self::Sse2 => "sse2",
            Self::Sse41 => "sse4.1",
            Self::Avx => "avx",
            Self::Neon => "neon",
        }
    }

    /// 当前构建为 f32 选定的后端
    pub fn selected_f32() -> Self {
        <<f32 as SimdElement>::Storage as LaneStorage>::BACKEND
    }

    /// 当前构建为 f64 选定的后端
    pub fn selected_f64() -> Self {
        <<f64 as SimdElement>::Storage as LaneStorage>::BACKEND
    }
}

impl std::fmt::Display for SimdBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
