/// 能力校验错误处理
///
/// 编译期选定的后端与运行时硬件不匹配时由 [`crate::validate_backend`] 返回。
use thiserror::Error;

use crate::SimdBackend;

/// 能力校验错误类型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CapabilityError {
    /// 后端需要的扩展在当前CPU上不可用
    #[error("后端 {backend} 需要的CPU扩展缺失: {missing:?}")]
    MissingExtensions {
        backend: SimdBackend,
        missing: Vec<&'static str>,
    },
}

impl CapabilityError {
    /// 缺失的扩展名称
    pub fn missing(&self) -> &[&'static str] {
        match self {
            Self::MissingExtensions { missing, .. } => missing,
        }
    }
}

/// 能力校验结果类型
pub type CapabilityResult<T> = Result<T, CapabilityError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_names_extensions() {
        let err = CapabilityError::MissingExtensions {
            backend: SimdBackend::Avx,
            missing: vec!["avx"],
        };
        let msg = err.to_string();
        assert!(msg.contains("avx"));
        assert_eq!(err.missing(), &["avx"]);
    }
}
