/// CPU特性检测模块
///
/// 运行时检测CPU支持的SIMD指令集和特性。
///
/// 检测结果只用于诊断：报告编译期选定的后端是否与运行时硬件匹配。
/// 后端选择本身在编译期固定，不会根据这里的结果切换。
use std::fmt::Write as _;
use std::sync::OnceLock;

use crate::error::{CapabilityError, CapabilityResult};
use crate::SimdBackend;

/// CPU特性标志
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CpuFeatures {
    // x86/x64特性
    pub sse2: bool,
    pub sse3: bool,
    pub ssse3: bool,
    pub sse41: bool,
    pub sse42: bool,
    pub avx: bool,
    pub avx2: bool,
    pub fma: bool,

    // ARM特性
    pub neon: bool,

    // 厂商信息
    pub vendor: CpuVendor,
    pub vendor_string: String,
    pub brand: String,
    pub logical_cores: usize,
}

/// CPU厂商
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CpuVendor {
    Intel,
    Amd,
    AppleSilicon,
    Qualcomm,
    MediaTek,
    HiSilicon,
    Other,
}

/// 能被检测和校验的扩展名称
pub const KNOWN_EXTENSIONS: &[&str] = &[
    "sse2", "sse3", "ssse3", "sse4.1", "sse4.2", "avx", "avx2", "fma", "neon",
];

impl CpuFeatures {
    /// 检测当前CPU特性
    fn detect() -> Self {
        #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
        {
            Self::detect_x86()
        }

        #[cfg(target_arch = "aarch64")]
        {
            Self::detect_aarch64()
        }

        #[cfg(not(any(target_arch = "x86", target_arch = "x86_64", target_arch = "aarch64")))]
        {
            Self::default()
        }
    }

    #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
    fn detect_x86() -> Self {
        let vendor_string = Self::x86_vendor_string();
        let vendor = match vendor_string.as_str() {
            "GenuineIntel" => CpuVendor::Intel,
            "AuthenticAMD" => CpuVendor::Amd,
            _ => CpuVendor::Other,
        };

        Self {
            sse2: is_x86_feature_detected!("sse2"),
            sse3: is_x86_feature_detected!("sse3"),
            ssse3: is_x86_feature_detected!("ssse3"),
            sse41: is_x86_feature_detected!("sse4.1"),
            sse42: is_x86_feature_detected!("sse4.2"),
            avx: is_x86_feature_detected!("avx"),
            avx2: is_x86_feature_detected!("avx2"),
            fma: is_x86_feature_detected!("fma"),
            neon: false,
            vendor,
            vendor_string,
            brand: Self::cpu_brand(),
            logical_cores: num_cpus::get(),
        }
    }

    #[cfg(target_arch = "aarch64")]
    fn detect_aarch64() -> Self {
        let brand = Self::cpu_brand();
        let vendor = Self::arm_vendor(&brand);

        Self {
            sse2: false,
            sse3: false,
            ssse3: false,
            sse41: false,
            sse42: false,
            avx: false,
            avx2: false,
            fma: false,
            // NEON在aarch64上是强制支持的
            neon: std::arch::is_aarch64_feature_detected!("neon"),
            vendor,
            vendor_string: format!("{:?}", vendor),
            brand,
            logical_cores: num_cpus::get(),
        }
    }

    /// 使用cpuid读取12字节厂商字符串
    #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
    fn x86_vendor_string() -> String {
        #[cfg(target_arch = "x86")]
        use std::arch::x86::__cpuid;
        #[cfg(target_arch = "x86_64")]
        use std::arch::x86_64::__cpuid;

        #[allow(unused_unsafe)]
        let result = unsafe { __cpuid(0) };
        let mut bytes = Vec::with_capacity(12);
        bytes.extend_from_slice(&result.ebx.to_le_bytes());
        bytes.extend_from_slice(&result.edx.to_le_bytes());
        bytes.extend_from_slice(&result.ecx.to_le_bytes());
        String::from_utf8_lossy(&bytes).into_owned()
    }

    /// 通过品牌字符串推断厂商
    #[cfg(target_arch = "aarch64")]
    fn arm_vendor(brand: &str) -> CpuVendor {
        let brand = brand.to_lowercase();

        if brand.contains("apple") {
            CpuVendor::AppleSilicon
        } else if brand.contains("qualcomm") || brand.contains("snapdragon") {
            CpuVendor::Qualcomm
        } else if brand.contains("mediatek") || brand.contains("dimensity") {
            CpuVendor::MediaTek
        } else if brand.contains("hisilicon") || brand.contains("kirin") {
            CpuVendor::HiSilicon
        } else {
            CpuVendor::Other
        }
    }

    fn cpu_brand() -> String {
        // 尝试从/proc/cpuinfo读取（Linux）
        #[cfg(target_os = "linux")]
        {
            if let Ok(content) = std::fs::read_to_string("/proc/cpuinfo") {
                for line in content.lines() {
                    if line.starts_with("model name") || line.starts_with("Hardware") {
                        if let Some(name) = line.split(':').nth(1) {
                            return name.trim().to_string();
                        }
                    }
                }
            }
        }

        // macOS可以使用sysctl
        #[cfg(target_os = "macos")]
        {
            use std::process::Command;
            if let Ok(output) = Command::new("sysctl")
                .arg("-n")
                .arg("machdep.cpu.brand_string")
                .output()
            {
                if let Ok(brand) = String::from_utf8(output.stdout) {
                    return brand.trim().to_string();
                }
            }
        }

        "Unknown".to_string()
    }

    /// 是否支持名为 `name` 的扩展
    ///
    /// 名称与 [`SimdBackend::required_extensions`] 一致，未知名称返回 `false`。
    pub fn supports(&self, name: &str) -> bool {
        match name {
            "sse2" => self.sse2,
            "sse3" => self.sse3,
            "ssse3" => self.ssse3,
            "sse4.1" => self.sse41,
            "sse4.2" => self.sse42,
            "avx" => self.avx,
            "avx2" => self.avx2,
            "fma" => self.fma,
            "neon" => self.neon,
            _ => false,
        }
    }

    /// 当前CPU能运行的最宽后端
    pub fn best_backend(&self) -> SimdBackend {
        if self.avx && self.sse41 {
            SimdBackend::Avx
        } else if self.sse41 {
            SimdBackend::Sse41
        } else if self.sse2 {
            SimdBackend::Sse2
        } else if self.neon {
            SimdBackend::Neon
        } else {
            SimdBackend::Scalar
        }
    }
}

impl Default for CpuFeatures {
    fn default() -> Self {
        Self {
            sse2: false,
            sse3: false,
            ssse3: false,
            sse41: false,
            sse42: false,
            avx: false,
            avx2: false,
            fma: false,
            neon: false,
            vendor: CpuVendor::Other,
            vendor_string: "Unknown".to_string(),
            brand: "Unknown".to_string(),
            logical_cores: 1,
        }
    }
}

/// 全局CPU特性缓存
static CPU_FEATURES: OnceLock<CpuFeatures> = OnceLock::new();

/// 检测CPU特性（缓存结果）
///
/// 首次调用时探测硬件，之后返回同一份不可变记录；多线程并发首次调用是安全的。
pub fn detect_cpu_features() -> &'static CpuFeatures {
    CPU_FEATURES.get_or_init(|| {
        let features = CpuFeatures::detect();
        tracing::debug!(
            target: "lanemath::simd",
            vendor = ?features.vendor,
            brand = %features.brand,
            sse41 = features.sse41,
            avx = features.avx,
            neon = features.neon,
            "CPU features detected"
        );
        features
    })
}

/// 构建目标在编译期声明的扩展
pub fn compiled_features() -> Vec<&'static str> {
    let mut enabled = Vec::new();
    macro_rules! push_if_enabled {
        ($($name:tt),*) => {
            $(
                if cfg!(target_feature = $name) {
                    enabled.push($name);
                }
            )*
        };
    }
    push_if_enabled!("sse2", "sse3", "ssse3", "sse4.1", "sse4.2", "avx", "avx2", "fma", "neon");
    enabled
}

/// `backend` 需要但 `features` 不具备的扩展
pub fn missing_extensions(features: &CpuFeatures, backend: SimdBackend) -> Vec<&'static str> {
    backend
        .required_extensions()
        .iter()
        .copied()
        .filter(|name| !features.supports(name))
        .collect()
}

/// 校验 `features` 能运行全部 `backends`
///
/// 返回第一个不满足的后端及其缺失的扩展。
pub fn validate_features(features: &CpuFeatures, backends: &[SimdBackend]) -> CapabilityResult<()> {
    for &backend in backends {
        let missing = missing_extensions(features, backend);
        if !missing.is_empty() {
            return Err(CapabilityError::MissingExtensions { backend, missing });
        }
    }
    Ok(())
}

/// 校验当前构建为 f32/f64 选定的后端能在本机CPU上运行
///
/// 不匹配时只报告，由调用方决定是否视为致命错误。
pub fn validate_backend() -> CapabilityResult<()> {
    let backends = [SimdBackend::selected_f32(), SimdBackend::selected_f64()];
    let result = validate_features(detect_cpu_features(), &backends);

    if let Err(CapabilityError::MissingExtensions { backend, missing }) = &result {
        tracing::warn!(
            target: "lanemath::simd",
            %backend,
            ?missing,
            "compiled backend requires CPU extensions that are not available"
        );
    }

    result
}

/// 生成CPU信息报告
pub fn cpu_info_report() -> String {
    let features = detect_cpu_features();
    let mut report = String::new();

    let _ = writeln!(report, "=== CPU Information ===");
    let _ = writeln!(report, "Vendor: {:?} ({})", features.vendor, features.vendor_string);
    let _ = writeln!(report, "Brand: {}", features.brand);
    let _ = writeln!(report, "Logical cores: {}", features.logical_cores);
    let _ = writeln!(report);

    #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
    {
        let _ = writeln!(report, "x86/x64 Features:");
        let _ = writeln!(report, "  SSE2: {}", features.sse2);
        let _ = writeln!(report, "  SSE3: {}", features.sse3);
        let _ = writeln!(report, "  SSSE3: {}", features.ssse3);
        let _ = writeln!(report, "  SSE4.1: {}", features.sse41);
        let _ = writeln!(report, "  SSE4.2: {}", features.sse42);
        let _ = writeln!(report, "  AVX: {}", features.avx);
        let _ = writeln!(report, "  AVX2: {}", features.avx2);
        let _ = writeln!(report, "  FMA: {}", features.fma);
    }

    #[cfg(target_arch = "aarch64")]
    {
        let _ = writeln!(report, "ARM Features:");
        let _ = writeln!(report, "  NEON: {}", features.neon);
    }

    let _ = writeln!(report);
    let _ = writeln!(report, "Compiled features: {:?}", compiled_features());
    let _ = writeln!(report, "f32 backend: {}", SimdBackend::selected_f32());
    let _ = writeln!(report, "f64 backend: {}", SimdBackend::selected_f64());
    let _ = writeln!(report, "Best runtime backend: {}", features.best_backend());

    report
}

/// 打印CPU信息
pub fn print_cpu_info() {
    print!("{}", cpu_info_report());
}
