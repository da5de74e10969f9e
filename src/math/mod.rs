//! 几何类型
//!
//! 每个类型只以 [`Lanes`](lanemath_simd::Lanes) 值保存数值数据，运算全部转发到4通道外观。
//! 2/3分量向量的填充通道恒为零。
//!
//! 归一化相关的容差按操作约定：
//! - `is_normalized`: `|len² - 1| <= 1e-5`
//! - `can_be_normalized`: `len² > 1e-12`
//! - 矩阵/四元数求逆：行列式或范数恰为零时返回单位值
//! - 退化平面判定：`T::EPSILON`

pub mod aabox;
pub mod color;
pub mod frustum;
pub mod interop;
pub mod matrix3;
pub mod matrix4;
pub mod plane;
pub mod quaternion;
pub mod sphere;
pub mod transform;
pub mod unit_vector;
pub mod vector2;
pub mod vector3;
pub mod vector4;

pub use aabox::AABox;
pub use color::Color;
pub use frustum::Frustum;
pub use matrix3::Matrix3;
pub use matrix4::Matrix4;
pub use plane::{Plane, PlaneSide};
pub use quaternion::Quaternion;
pub use sphere::Sphere;
pub use transform::Transform;
pub use unit_vector::UnitVector3;
pub use vector2::Vector2;
pub use vector3::Vector3;
pub use vector4::Vector4;

use lanemath_simd::Element;

pub type Vector2f = Vector2<f32>;
pub type Vector2d = Vector2<f64>;
pub type Vector3f = Vector3<f32>;
pub type Vector3d = Vector3<f64>;
pub type Vector4f = Vector4<f32>;
pub type Vector4d = Vector4<f64>;
pub type UnitVector3f = UnitVector3<f32>;
pub type UnitVector3d = UnitVector3<f64>;
pub type Matrix3f = Matrix3<f32>;
pub type Matrix3d = Matrix3<f64>;
pub type Matrix4f = Matrix4<f32>;
pub type Matrix4d = Matrix4<f64>;
pub type Quaternionf = Quaternion<f32>;
pub type Quaterniond = Quaternion<f64>;
pub type Planef = Plane<f32>;
pub type Planed = Plane<f64>;
pub type AABoxf = AABox<f32>;
pub type AABoxd = AABox<f64>;
pub type Spheref = Sphere<f32>;
pub type Sphered = Sphere<f64>;
pub type Frustumf = Frustum<f32>;
pub type Frustumd = Frustum<f64>;
pub type Transformf = Transform<f32>;
pub type Transformd = Transform<f64>;

/// `is_normalized` 的平方长度容差
pub(crate) fn normalized_tolerance<T: Element>() -> T {
    T::from_f64(1.0e-5)
}

/// `can_be_normalized` 的最小平方长度
pub(crate) fn min_normalizable_length_squared<T: Element>() -> T {
    T::from_f64(1.0e-12)
}
