//! 核心模块
//!
//! 包含跨模块共享的宏：
//! - `impl_default!` - 为配置结构体生成 `Default`
//! - `impl_vector_ops!` - 为向量类型生成算术运算符

#[macro_use]
pub mod macros;
