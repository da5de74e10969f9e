//! 后端选择策略
//!
//! 在编译期把元素类型映射到存储后端，优先级：
//!
//! | 元素 | 优先级 |
//! |------|--------|
//! | f32  | SSE (sse2/sse4.1) → NEON → 数组 |
//! | f64  | AVX → SSE (sse2/sse4.1) → NEON → 数组 |
//!
//! 启用 `scalar-backend` 特性时两者都使用数组后端。选择只取决于构建目标的
//! `target_feature`，运行时不做分发；运行时硬件是否匹配由
//! [`crate::cpu_detect::validate_backend`] 校验。

use crate::backend::LaneStorage;
use crate::element::Element;

/// 拥有默认存储后端的元素类型
pub trait SimdElement: Element {
    /// 当前构建为该元素类型选定的存储
    type Storage: LaneStorage<Elem = Self>;
}

#[cfg(all(
    not(feature = "scalar-backend"),
    any(target_arch = "x86", target_arch = "x86_64"),
    target_feature = "sse2"
))]
mod chosen {
    pub type F32 = crate::backend::x86::SseF32x4;

    #[cfg(target_feature = "avx")]
    pub type F64 = crate::backend::avx::AvxF64x4;

    #[cfg(not(target_feature = "avx"))]
    pub type F64 = crate::backend::x86::SseF64x4;
}

#[cfg(all(
    not(feature = "scalar-backend"),
    target_arch = "aarch64",
    target_feature = "neon"
))]
mod chosen {
    pub type F32 = crate::backend::arm::NeonF32x4;
    pub type F64 = crate::backend::arm::NeonF64x4;
}

#[cfg(not(any(
    all(
        not(feature = "scalar-backend"),
        any(target_arch = "x86", target_arch = "x86_64"),
        target_feature = "sse2"
    ),
    all(
        not(feature = "scalar-backend"),
        target_arch = "aarch64",
        target_feature = "neon"
    )
)))]
mod chosen {
    use crate::backend::scalar::ArrayStorage;

    pub type F32 = ArrayStorage<f32>;
    pub type F64 = ArrayStorage<f64>;
}

impl SimdElement for f32 {
    type Storage = chosen::F32;
}

impl SimdElement for f64 {
    type Storage = chosen::F64;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SimdBackend;

    #[test]
    fn test_f32_preference_order() {
        let backend = <<f32 as SimdElement>::Storage as LaneStorage>::BACKEND;

        if cfg!(feature = "scalar-backend") {
            assert_eq!(backend, SimdBackend::Scalar);
        } else if cfg!(all(
            any(target_arch = "x86", target_arch = "x86_64"),
            target_feature = "sse2"
        )) {
            // f32 即使在AVX构建中也使用128位SSE
            assert!(matches!(backend, SimdBackend::Sse2 | SimdBackend::Sse41));
        } else if cfg!(all(target_arch = "aarch64", target_feature = "neon")) {
            assert_eq!(backend, SimdBackend::Neon);
        } else {
            assert_eq!(backend, SimdBackend::Scalar);
        }
    }

    #[test]
    fn test_f64_preference_order() {
        let backend = <<f64 as SimdElement>::Storage as LaneStorage>::BACKEND;

        if cfg!(feature = "scalar-backend") {
            assert_eq!(backend, SimdBackend::Scalar);
        } else if cfg!(all(
            any(target_arch = "x86", target_arch = "x86_64"),
            target_feature = "avx"
        )) {
            assert_eq!(backend, SimdBackend::Avx);
        } else if cfg!(all(
            any(target_arch = "x86", target_arch = "x86_64"),
            target_feature = "sse2"
        )) {
            assert!(matches!(backend, SimdBackend::Sse2 | SimdBackend::Sse41));
        } else if cfg!(all(target_arch = "aarch64", target_feature = "neon")) {
            assert_eq!(backend, SimdBackend::Neon);
        } else {
            assert_eq!(backend, SimdBackend::Scalar);
        }
    }
}
