use lanemath::config::{LogLevel, MathConfig};
use lanemath::simd::{detect_cpu_features, Double4, Float4, SimdBackend};
use lanemath::{AABox, Color, Frustum, Matrix4, Quaternion, Sphere, Transform, Vector3};
use proptest::prelude::*;

fn cube(half: f32) -> AABox {
    AABox::new(Vector3::splat(-half), Vector3::splat(half))
}

#[test]
fn test_aabox_validity_scenarios() {
    assert!(!cube(100.0).invalid());
    assert!(AABox::<f32>::default().invalid());
    assert!(cube(50.0).inside(&cube(100.0)));
}

#[test]
fn test_sphere_box_scenarios() {
    let bounds = cube(1.0);
    assert!(Sphere::new(Vector3::zero(), 1.0).intersects_box(&bounds));
    assert!(!Sphere::new(Vector3::new(3.0, 0.0, 0.0), 1.0).intersects_box(&bounds));
}

#[test]
fn test_packed_color_scenario() {
    let c = Color::from_packed(0xFF0000FF);
    assert_eq!((c.r(), c.g(), c.b()), (1.0, 0.0, 0.0));
    assert!((c.a() - 1.0).abs() < 1e-6);
}

#[test]
fn test_float_lane_arithmetic() {
    let a = Float4::new(1.0, 2.0, 3.0, 4.0);
    let b = Float4::new(5.0, 6.0, 7.0, 8.0);
    assert_eq!((a + b).to_array(), [6.0, 8.0, 10.0, 12.0]);
    assert_eq!(a.dot4(b), 70.0);
    assert_eq!(a.dot3(b), 38.0);

    let d = Double4::from(a);
    assert_eq!(d.to_array(), [1.0, 2.0, 3.0, 4.0]);
    assert_eq!(Float4::backend(), SimdBackend::selected_f32());
}

#[test]
fn test_capability_record_is_shared() {
    let first = detect_cpu_features();
    let second = std::thread::spawn(|| detect_cpu_features() as *const _ as usize)
        .join()
        .unwrap();
    assert_eq!(first as *const _ as usize, second);
}

#[test]
fn test_scene_culling_pipeline() {
    // 场景：相机位于 (0, 2, 10) 看向原点，物体经变换后做包围体剔除
    let view = Matrix4::look_at(Vector3::new(0.0, 2.0, 10.0), Vector3::zero(), Vector3::unit_y());
    let projection = Matrix4::perspective(std::f32::consts::FRAC_PI_3, 16.0 / 9.0, 0.1, 100.0);
    let frustum = Frustum::from_matrix(&(projection * view));

    let mesh_bounds = cube(0.5);
    let near_object = Transform::new(
        Vector3::new(1.0, 0.0, 0.0),
        Quaternion::from_axis_angle(Vector3::unit_y(), 0.5),
        Vector3::one(),
    );
    let behind_camera = Transform::from_translation(Vector3::new(0.0, 0.0, 30.0));

    let visible = mesh_bounds.transformed(&near_object.to_matrix());
    let hidden = mesh_bounds.transformed(&behind_camera.to_matrix());

    assert!(frustum.intersects_box(&visible));
    assert!(frustum.intersects_sphere(&Sphere::bounding(&visible)));
    assert!(!frustum.intersects_box(&hidden));
    assert!(!frustum.intersects_sphere(&Sphere::bounding(&hidden)));
}

#[test]
fn test_config_file_round_trip() -> anyhow::Result<()> {
    let path = std::env::temp_dir().join(format!("lanemath-it-{}.toml", std::process::id()));

    let mut config = MathConfig::default();
    config.logging.level = LogLevel::Debug;
    config.capabilities.log_report = false;
    config.save_toml(&path)?;

    let loaded = MathConfig::from_toml_file(&path)?;
    std::fs::remove_file(&path)?;
    assert_eq!(loaded, config);

    loaded.validate()?;
    lanemath::initialize(&loaded)?;
    Ok(())
}

#[test]
fn test_overrides_use_supplied_variables() {
    let lookup = |strict: &'static str, level: &'static str| {
        move |key: &str| match key {
            "LANEMATH_STRICT_CAPABILITIES" => Some(strict.to_string()),
            "LANEMATH_LOG_LEVEL" => Some(level.to_string()),
            _ => None,
        }
    };

    let mut config = MathConfig::default();
    config.apply_overrides(lookup("true", "warn"));
    assert!(config.capabilities.strict);
    assert_eq!(config.logging.level, LogLevel::Warn);

    let mut config = MathConfig::default();
    config.apply_overrides(lookup("true", "not-a-level"));
    assert!(config.capabilities.strict);
    assert_eq!(config.logging.level, LogLevel::Info);
}

#[test]
fn test_simd_crate_is_workspace_member() -> anyhow::Result<()> {
    let manifest = std::fs::read_to_string(concat!(env!("CARGO_MANIFEST_DIR"), "/Cargo.toml"))?;
    let manifest: toml::Table = toml::from_str(&manifest)?;
    let members = manifest
        .get("workspace")
        .and_then(|w| w.get("members"))
        .and_then(|m| m.as_array())
        .ok_or_else(|| anyhow::anyhow!("root manifest has no workspace members"))?;
    assert!(members.iter().any(|m| m.as_str() == Some("lanemath_simd")));
    Ok(())
}

fn finite_point() -> impl Strategy<Value = Vector3<f32>> {
    (-1.0e4f32..1.0e4, -1.0e4f32..1.0e4, -1.0e4f32..1.0e4)
        .prop_map(|(x, y, z)| Vector3::new(x, y, z))
}

proptest! {
    #[test]
    fn prop_accumulate_makes_box_valid(p in finite_point()) {
        let mut bounds = AABox::default();
        bounds.accumulate(p);
        prop_assert!(!bounds.invalid());
        prop_assert!(bounds.contains(p));
    }

    #[test]
    fn prop_accumulate_only_extends(points in prop::collection::vec(finite_point(), 1..32)) {
        let mut bounds = AABox::default();
        let mut previous: Option<AABox> = None;
        for &p in &points {
            bounds.accumulate(p);
            if let Some(prev) = previous {
                prop_assert!(prev.inside(&bounds));
            }
            previous = Some(bounds);
        }
        for &p in &points {
            prop_assert!(bounds.contains(p));
        }
    }

    #[test]
    fn prop_corners_reproduce_box(a in finite_point(), b in finite_point()) {
        let original = AABox::new(a.min(b), a.max(b));
        let mut rebuilt = AABox::default();
        for corner in original.corners() {
            rebuilt.accumulate(corner);
        }
        prop_assert_eq!(rebuilt, original);
    }

    #[test]
    fn prop_rotation_preserves_length(
        angle in -6.0f64..6.0,
        (x, y, z) in (-10.0f64..10.0, -10.0f64..10.0, -10.0f64..10.0),
    ) {
        let q = Quaternion::from_axis_angle(Vector3::new(1.0, -2.0, 0.5).normalize(), angle);
        let v = Vector3::new(x, y, z);
        prop_assert!((q.rotate(v).length() - v.length()).abs() < 1e-9);
        prop_assert!(((q.to_matrix3() * v) - q.rotate(v)).length() < 1e-9);
    }
}
