//! # lanemath
//!
//! 基于4通道SIMD抽象的向量、矩阵、四元数与包围体数学库。
//!
//! ## 特性
//!
//! - **编译期后端**: 所有几何类型只持有 [`simd::Lanes`] 值，后端（SSE/AVX/NEON/数组）在编译期选定
//! - **泛型元素**: 几何类型对 `f32`/`f64` 泛型，默认 `f32`，提供 `f`/`d` 后缀别名
//! - **包围体**: [`AABox`]、[`Sphere`]、[`Frustum`] 支持累积、包含和相交测试
//! - **可选初始化**: [`runtime::initialize`] 安装日志并校验编译期后端与运行时硬件是否匹配
//!
//! ## 示例
//!
//! ```rust
//! use lanemath::{AABox, Sphere, Vector3};
//!
//! let mut bounds = AABox::default();
//! assert!(bounds.invalid());
//!
//! bounds.accumulate(Vector3::new(-1.0, -1.0, -1.0));
//! bounds.accumulate(Vector3::new(1.0, 1.0, 1.0));
//! assert!(!bounds.invalid());
//!
//! let sphere = Sphere::new(Vector3::zero(), 1.0);
//! assert!(sphere.intersects_box(&bounds));
//! ```
//!
//! ## 模块
//!
//! - [`math`]: 几何类型
//! - [`config`]: 配置系统
//! - [`runtime`]: 日志与能力校验
//! - [`error`]: 错误类型
//! - [`simd`]: 4通道SIMD抽象（`lanemath_simd` 的重新导出）

#[macro_use]
pub mod core;
pub mod config;
pub mod error;
pub mod math;
pub mod runtime;

pub use lanemath_simd as simd;

// 重新导出主要类型
pub use config::{ConfigError, ConfigResult, MathConfig};
pub use error::{MathError, MathResult};
pub use math::{
    AABox, AABoxd, AABoxf, Color, Frustum, Frustumd, Frustumf, Matrix3, Matrix3d, Matrix3f,
    Matrix4, Matrix4d, Matrix4f, Plane, PlaneSide, Planed, Planef, Quaternion, Quaterniond,
    Quaternionf, Sphere, Sphered, Spheref, Transform, Transformd, Transformf, UnitVector3,
    UnitVector3d, UnitVector3f, Vector2, Vector2d, Vector2f, Vector3, Vector3d, Vector3f, Vector4,
    Vector4d, Vector4f,
};
pub use runtime::initialize;
