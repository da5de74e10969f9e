//! 4通道向量基准测试
//!
//! 比较当前构建选定的后端与通用数组后端。

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use lanemath_simd::{ArrayStorage, Double4, Float4, Lanes};

type ArrayFloat4 = Lanes<f32, ArrayStorage<f32>>;
type ArrayDouble4 = Lanes<f64, ArrayStorage<f64>>;

fn bench_dot(c: &mut Criterion) {
    let mut group = c.benchmark_group("lanes_dot");

    let a = Float4::new(1.0, 2.0, 3.0, 4.0);
    let b = Float4::new(5.0, 6.0, 7.0, 8.0);
    let sa = ArrayFloat4::new(1.0, 2.0, 3.0, 4.0);
    let sb = ArrayFloat4::new(5.0, 6.0, 7.0, 8.0);

    group.bench_function(format!("dot3_f32_{}", Float4::backend()), |bencher| {
        bencher.iter(|| black_box(black_box(a).dot3(black_box(b))));
    });

    group.bench_function("dot3_f32_scalar", |bencher| {
        bencher.iter(|| black_box(black_box(sa).dot3(black_box(sb))));
    });

    group.bench_function(format!("dot4_f32_{}", Float4::backend()), |bencher| {
        bencher.iter(|| black_box(black_box(a).dot4(black_box(b))));
    });

    let da = Double4::new(1.0, 2.0, 3.0, 4.0);
    let db = Double4::new(5.0, 6.0, 7.0, 8.0);
    let dsa = ArrayDouble4::new(1.0, 2.0, 3.0, 4.0);
    let dsb = ArrayDouble4::new(5.0, 6.0, 7.0, 8.0);

    group.bench_function(format!("dot4_f64_{}", Double4::backend()), |bencher| {
        bencher.iter(|| black_box(black_box(da).dot4(black_box(db))));
    });

    group.bench_function("dot4_f64_scalar", |bencher| {
        bencher.iter(|| black_box(black_box(dsa).dot4(black_box(dsb))));
    });

    group.finish();
}

fn bench_arithmetic(c: &mut Criterion) {
    let mut group = c.benchmark_group("lanes_arithmetic");

    let values: Vec<Float4> = (0..1024)
        .map(|i| {
            let f = i as f32;
            Float4::new(f, f + 1.0, f + 2.0, f + 3.0)
        })
        .collect();
    let scalar_values: Vec<ArrayFloat4> = values
        .iter()
        .map(|v| v.cast::<f32, ArrayStorage<f32>>())
        .collect();

    group.bench_function("mul_add_selected", |bencher| {
        bencher.iter(|| {
            let mut acc = Float4::zero();
            for v in &values {
                acc += *v * 0.5 - v.shuffle::<3, 2, 1, 0>();
            }
            black_box(acc)
        });
    });

    group.bench_function("mul_add_scalar", |bencher| {
        bencher.iter(|| {
            let mut acc = ArrayFloat4::zero();
            for v in &scalar_values {
                acc += *v * 0.5 - v.shuffle::<3, 2, 1, 0>();
            }
            black_box(acc)
        });
    });

    group.bench_function("min_max_selected", |bencher| {
        bencher.iter(|| {
            let mut lo = Float4::splat(f32::INFINITY);
            let mut hi = Float4::splat(f32::NEG_INFINITY);
            for v in &values {
                lo = lo.min(*v);
                hi = hi.max(*v);
            }
            black_box((lo, hi))
        });
    });

    group.finish();
}

criterion_group!(benches, bench_dot, bench_arithmetic);
criterion_main!(benches);
