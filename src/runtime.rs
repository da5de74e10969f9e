//! 运行时初始化
//!
//! 数值核心不需要初始化即可使用。这里提供可选的启动流程：
//! 安装日志、探测CPU能力、校验编译期后端是否能在本机运行。

use lanemath_simd::{cpu_info_report, detect_cpu_features, validate_backend, CpuFeatures, SimdBackend};
use tracing_subscriber::EnvFilter;

use crate::config::{LoggingConfig, MathConfig};
use crate::error::MathResult;

/// 初始化日志系统
///
/// 过滤器来自配置的级别和额外指令，设置了 `RUST_LOG` 时以其为准。
/// 重复调用是安全的，已安装的订阅者保持不变。
pub fn init_logging(config: &LoggingConfig) {
    if !config.log_to_console {
        return;
    }

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.directives()))
        .unwrap_or_else(|_| EnvFilter::new(config.level.as_str()));

    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// 按配置初始化
///
/// 返回缓存的CPU能力记录。严格模式下，编译期选定的后端需要本机缺失的扩展时
/// 返回 [`crate::error::MathError::Capability`]；否则只记录警告。
pub fn initialize(config: &MathConfig) -> MathResult<&'static CpuFeatures> {
    init_logging(&config.logging);
    tracing::info!(
        target: "lanemath",
        f32_backend = %SimdBackend::selected_f32(),
        f64_backend = %SimdBackend::selected_f64(),
        "lanemath starting"
    );

    let features = detect_cpu_features();

    if config.capabilities.log_report {
        for line in cpu_info_report().lines().filter(|l| !l.trim().is_empty()) {
            tracing::info!(target: "lanemath", "{}", line);
        }
    }

    if let Err(err) = validate_backend() {
        if config.capabilities.strict {
            tracing::error!(target: "lanemath", "capability check failed: {}", err);
            return Err(err.into());
        }
        tracing::warn!(target: "lanemath", "continuing despite capability mismatch: {}", err);
    }

    Ok(features)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initialize_default_config() {
        let features = initialize(&MathConfig::default()).unwrap();
        assert!(std::ptr::eq(features, detect_cpu_features()));
    }

    #[test]
    fn test_initialize_strict_on_matching_hardware() {
        let mut config = MathConfig::default();
        config.capabilities.strict = true;
        config.capabilities.log_report = false;
        // 测试二进制正在本机运行，编译期后端必然可用
        assert!(initialize(&config).is_ok());
    }

    #[test]
    fn test_init_logging_twice() {
        let config = LoggingConfig::default();
        init_logging(&config);
        init_logging(&config);
    }
}
