/// 统一配置系统
///
/// 提供TOML/JSON配置文件和环境变量覆盖
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

/// 配置错误
#[derive(Error, Debug)]
pub enum ConfigError {
    /// 文件读取错误
    #[error("Config file error: {0}")]
    FileError(#[from] std::io::Error),
    /// 解析错误
    #[error("Config parse error: {0}")]
    ParseError(String),
    /// 验证错误
    #[error("Config validation error: {0}")]
    ValidationError(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

const ENV_STRICT_CAPABILITIES: &str = "LANEMATH_STRICT_CAPABILITIES";
const ENV_LOG_LEVEL: &str = "LANEMATH_LOG_LEVEL";

fn read_config_file<P: AsRef<Path>>(path: P) -> ConfigResult<String> {
    fs::read_to_string(path).map_err(ConfigError::FileError)
}

/// 库主配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MathConfig {
    /// 硬件能力校验策略
    #[serde(default)]
    pub capabilities: CapabilityPolicy,

    /// 日志配置
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl_default!(MathConfig {
    capabilities: CapabilityPolicy::default(),
    logging: LoggingConfig::default(),
});

impl MathConfig {
    /// 从TOML文件加载配置
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        Self::from_toml_str(&read_config_file(path)?)
    }

    /// 从TOML字符串解析配置
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// 从JSON文件加载配置
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        Self::from_json_str(&read_config_file(path)?)
    }

    /// 从JSON字符串解析配置
    pub fn from_json_str(content: &str) -> ConfigResult<Self> {
        serde_json::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// 保存为TOML文件
    pub fn save_toml<P: AsRef<Path>>(&self, path: P) -> ConfigResult<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        fs::write(path, content).map_err(ConfigError::FileError)
    }

    /// 从进程环境变量覆盖配置，见 [`MathConfig::apply_overrides`]
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| env::var(key).ok());
    }

    /// 用 `lookup` 提供的变量覆盖配置
    ///
    /// - `LANEMATH_STRICT_CAPABILITIES`: `true`/`false`
    /// - `LANEMATH_LOG_LEVEL`: `trace`/`debug`/`info`/`warn`/`error`
    ///
    /// 无法解析的值被忽略。
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(strict) = lookup(ENV_STRICT_CAPABILITIES).and_then(|v| v.parse().ok()) {
            self.capabilities.strict = strict;
        }
        if let Some(level) = lookup(ENV_LOG_LEVEL).and_then(|v| v.parse().ok()) {
            self.logging.level = level;
        }
    }

    /// 验证配置
    pub fn validate(&self) -> ConfigResult<()> {
        self.logging.validate()?;
        Ok(())
    }

    /// 自动查找并加载配置文件
    ///
    /// 按以下顺序查找：
    /// 1. ./lanemath.toml
    /// 2. ./lanemath.json
    /// 3. ~/.config/lanemath/config.toml
    /// 4. 使用默认配置
    ///
    /// 日志系统此时尚未初始化，查找结果在初始化之后由调用方记录。
    pub fn load_or_default() -> (Self, ConfigSource) {
        if let Ok(config) = Self::from_toml_file("lanemath.toml") {
            return (config, ConfigSource::File(PathBuf::from("lanemath.toml")));
        }

        if let Ok(config) = Self::from_json_file("lanemath.json") {
            return (config, ConfigSource::File(PathBuf::from("lanemath.json")));
        }

        if let Some(home) = env::var_os("HOME") {
            let config_path = PathBuf::from(home)
                .join(".config")
                .join("lanemath")
                .join("config.toml");

            if let Ok(config) = Self::from_toml_file(&config_path) {
                return (config, ConfigSource::File(config_path));
            }
        }

        (Self::default(), ConfigSource::Default)
    }
}

/// 配置来源
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    Default,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Default => f.write_str("default configuration"),
        }
    }
}

/// 硬件能力校验策略
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilityPolicy {
    /// 编译期后端与运行时硬件不匹配时是否返回错误
    pub strict: bool,

    /// 初始化时是否记录CPU信息报告
    pub log_report: bool,
}

impl_default!(CapabilityPolicy {
    strict: false,
    log_report: true,
});

/// 日志配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// 日志级别
    pub level: LogLevel,

    /// 是否输出到控制台
    pub log_to_console: bool,

    /// 额外的过滤指令（`EnvFilter` 语法），例如 `lanemath::simd=trace`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
}

impl_default!(LoggingConfig {
    level: LogLevel::Info,
    log_to_console: true,
    filter: None,
});

impl LoggingConfig {
    /// 生成 `EnvFilter` 指令
    pub fn directives(&self) -> String {
        match &self.filter {
            Some(extra) => format!("{},{}", self.level, extra),
            None => self.level.to_string(),
        }
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if let Some(filter) = &self.filter {
            if filter.trim().is_empty() {
                return Err(ConfigError::ValidationError(
                    "logging.filter must not be empty".to_string(),
                ));
            }
            tracing_subscriber::EnvFilter::try_new(self.directives()).map_err(|e| {
                ConfigError::ValidationError(format!("logging.filter is invalid: {}", e))
            })?;
        }
        Ok(())
    }
}

/// 日志级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// 跟踪
    Trace,
    /// 调试
    Debug,
    /// 信息
    Info,
    /// 警告
    Warn,
    /// 错误
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "trace" => Ok(Self::Trace),
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            other => Err(ConfigError::ParseError(format!("unknown log level: {}", other))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MathConfig::default();
        assert!(config.validate().is_ok());
        assert!(!config.capabilities.strict);
        assert_eq!(config.logging.level, LogLevel::Info);
    }

    #[test]
    fn test_toml_serialization() {
        let config = MathConfig::default();
        let toml_str = toml::to_string(&config).unwrap();
        let parsed: MathConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_json_serialization() {
        let mut config = MathConfig::default();
        config.logging.filter = Some("lanemath::simd=trace".to_string());
        let json_str = serde_json::to_string(&config).unwrap();
        let parsed = MathConfig::from_json_str(&json_str).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = MathConfig::from_toml_str(
            r#"
            [capabilities]
            strict = true
            log_report = false
            "#,
        )
        .unwrap();
        assert!(config.capabilities.strict);
        assert_eq!(config.logging, LoggingConfig::default());
    }

    #[test]
    fn test_parse_error() {
        let err = MathConfig::from_toml_str("capabilities = 3").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_validation_rejects_empty_filter() {
        let mut config = MathConfig::default();
        config.logging.filter = Some("  ".to_string());
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_log_level_parsing() {
        assert_eq!("WARN".parse::<LogLevel>().unwrap(), LogLevel::Warn);
        assert_eq!("debug".parse::<LogLevel>().unwrap(), LogLevel::Debug);
        assert!("loud".parse::<LogLevel>().is_err());
        assert_eq!(LogLevel::Trace.to_string(), "trace");
    }

    #[test]
    fn test_save_and_reload() {
        let dir = std::env::temp_dir().join(format!("lanemath-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();

        let mut config = MathConfig::default();
        config.capabilities.strict = true;

        let toml_path = dir.join("lanemath.toml");
        config.save_toml(&toml_path).unwrap();
        assert_eq!(MathConfig::from_toml_file(&toml_path).unwrap(), config);

        let json_path = dir.join("lanemath.json");
        std::fs::write(&json_path, serde_json::to_string_pretty(&config).unwrap()).unwrap();
        assert_eq!(MathConfig::from_json_file(&json_path).unwrap(), config);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_overrides_from_lookup() {
        let vars = std::collections::HashMap::from([
            (ENV_STRICT_CAPABILITIES, "true"),
            (ENV_LOG_LEVEL, "error"),
        ]);
        let mut config = MathConfig::default();
        config.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));
        assert!(config.capabilities.strict);
        assert_eq!(config.logging.level, LogLevel::Error);
    }

    #[test]
    fn test_unparsable_overrides_are_ignored() {
        let mut config = MathConfig::default();
        config.apply_overrides(|_| Some("not-a-value".to_string()));
        assert_eq!(config, MathConfig::default());
    }

    #[test]
    fn test_missing_file_is_file_error() {
        let err = MathConfig::from_toml_file("/nonexistent/lanemath.toml").unwrap_err();
        assert!(matches!(err, ConfigError::FileError(_)));
    }
}
