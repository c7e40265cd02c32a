//! 选择引擎性能基准测试

use banner_rotator::engine::{
    BannerSelector, ImpressionRecorder, SeededRandom, SystemClock, eligible, pick,
};
use banner_rotator::storage::{Banner, MemoryStore};
use chrono::Utc;
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;
use std::sync::Arc;

const PLACE: i64 = 1;

fn make_banners(count: i64) -> Vec<Banner> {
    (1..=count)
        .map(|id| Banner {
            id,
            name: format!("banner_{}", id),
            url: format!("https://example.com/{}", id),
            places: [PLACE].into_iter().collect(),
            weight: id % 10 + 1,
            // 每 7 个中有一个已达上限
            views: if id % 7 == 0 { 100 } else { 0 },
            max_views: 100,
            ..Default::default()
        })
        .collect()
}

// ============== 加权抽取 ==============

fn bench_pick(c: &mut Criterion) {
    let mut group = c.benchmark_group("pick");
    let random = SeededRandom::new(42);

    for size in [10, 100, 1000] {
        let candidates: Vec<(i64, f64)> = (0..size).map(|i| (i, (i % 10 + 1) as f64)).collect();
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &candidates, |b, cands| {
            b.iter(|| pick(black_box(cands), &random))
        });
    }

    group.finish();
}

// ============== 资格过滤 ==============

fn bench_eligible(c: &mut Criterion) {
    let mut group = c.benchmark_group("eligible");
    let now = Utc::now();

    for size in [10, 100, 1000] {
        let banners = make_banners(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &banners, |b, banners| {
            b.iter(|| eligible(black_box(banners.clone()), PLACE, now))
        });
    }

    group.finish();
}

// ============== 端到端选择 ==============

fn bench_select_for_place(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let store = Arc::new(MemoryStore::new());
    for banner in make_banners(200) {
        store.insert_banner(banner);
    }
    let selector = Arc::new(BannerSelector::new(
        store,
        Arc::new(SystemClock),
        Arc::new(SeededRandom::new(7)),
    ));

    c.bench_function("selector/select_for_place", |b| {
        b.to_async(&rt).iter(|| {
            let s = Arc::clone(&selector);
            async move { s.select_for_place(PLACE).await }
        });
    });
}

fn bench_record_impression(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let store = Arc::new(MemoryStore::new());
    let banner = store.insert_banner(Banner {
        places: [PLACE].into_iter().collect(),
        url: "https://example.com".to_string(),
        ..Default::default()
    });
    let recorder = ImpressionRecorder::new(store);

    c.bench_function("recorder/record_impression", |b| {
        b.to_async(&rt).iter(|| {
            let r = recorder.clone();
            let banner = banner.clone();
            async move { r.record_impression(&banner).await }
        });
    });
}

criterion_group!(
    benches,
    bench_pick,
    bench_eligible,
    bench_select_for_place,
    bench_record_impression
);
criterion_main!(benches);
