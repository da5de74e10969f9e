//! 能力诊断工具
//!
//! 加载配置、初始化日志并打印本机CPU能力与编译期选定的后端。

use lanemath::config::MathConfig;
use lanemath::simd::{print_cpu_info, validate_backend};
use lanemath::MathResult;

fn run() -> MathResult<()> {
    let (mut config, source) = MathConfig::load_or_default();
    config.apply_env_overrides();
    config.validate()?;

    lanemath::initialize(&config)?;
    tracing::info!(target: "lanemath", "configuration loaded from {}", source);

    print_cpu_info();
    match validate_backend() {
        Ok(()) => println!("Compiled backends are supported by this CPU"),
        Err(e) => println!("Capability mismatch: {}", e),
    }

    Ok(())
}

fn main() {
    if let Err(e) = run() {
        eprintln!("lanemath diagnostics failed: {}", e);
        std::process::exit(1);
    }
}
