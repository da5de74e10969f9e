//! 统一错误处理模块
//!
//! 数值运算本身从不返回错误：未定义的结果按IEEE-754传播，
//! 个别操作（如奇异矩阵求逆）返回约定的回退值。
//! 这里只覆盖初始化阶段的错误：配置加载和硬件能力校验。

use thiserror::Error;

pub use crate::config::{ConfigError, ConfigResult};
pub use lanemath_simd::{CapabilityError, CapabilityResult};

/// 库级错误类型
#[derive(Error, Debug)]
pub enum MathError {
    #[error("Capability error: {0}")]
    Capability(#[from] CapabilityError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

pub type MathResult<T> = Result<T, MathError>;
