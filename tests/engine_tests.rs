//! Selection engine tests against the in-memory store

use std::collections::HashMap;
use std::sync::Arc;

use banner_rotator::engine::{
    BannerSelector, ClickMeta, ClickRecorder, FixedClock, ImpressionRecorder, SeededRandom,
    SequenceRandom, SystemClock, eligible, is_eligible, pick,
};
use banner_rotator::errors::RotatorError;
use banner_rotator::storage::{Banner, BannerStore, MemoryStore};
use chrono::{DateTime, Duration, TimeZone, Utc};

const PLACE: i64 = 1;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 6, 15, 12, 0, 0).unwrap()
}

fn banner(id: i64, weight: i64) -> Banner {
    Banner {
        id,
        name: format!("banner-{}", id),
        url: format!("https://example.com/{}", id),
        places: [PLACE].into_iter().collect(),
        weight,
        ..Default::default()
    }
}

fn selector(store: Arc<MemoryStore>, seed: u64) -> BannerSelector {
    BannerSelector::new(
        store,
        Arc::new(FixedClock(now())),
        Arc::new(SeededRandom::new(seed)),
    )
}

// =============================================================================
// 加权抽取
// =============================================================================

#[test]
fn test_weighted_distribution_converges() {
    let candidates = vec![("a", 1.0), ("b", 3.0), ("c", 6.0)];
    let random = SeededRandom::new(7);
    let draws = 200_000;

    let mut counts: HashMap<&str, usize> = HashMap::new();
    for _ in 0..draws {
        *counts.entry(*pick(&candidates, &random).unwrap()).or_default() += 1;
    }

    for (name, weight) in &candidates {
        let observed = counts.get(name).copied().unwrap_or(0) as f64 / draws as f64;
        let expected = weight / 10.0;
        assert!(
            (observed - expected).abs() < 0.01,
            "{}: observed {:.4}, expected {:.4}",
            name,
            observed,
            expected
        );
    }
}

#[test]
fn test_pick_rejects_all_zero_weights() {
    let candidates = vec![("a", 0.0), ("b", 0.0)];
    let err = pick(&candidates, &SequenceRandom::new(vec![0.3])).unwrap_err();
    assert!(matches!(err, RotatorError::InvalidWeights(_)));
}

// =============================================================================
// 资格过滤
// =============================================================================

#[test]
fn test_filter_excludes_each_rule() {
    let t = now();
    let ok = banner(1, 5);
    let inactive = Banner {
        is_active: false,
        ..banner(2, 5)
    };
    let elsewhere = Banner {
        places: [99].into_iter().collect(),
        ..banner(3, 5)
    };
    let finished = Banner {
        finish_at: Some(t - Duration::seconds(1)),
        ..banner(4, 5)
    };
    let not_started = Banner {
        start_at: Some(t + Duration::seconds(1)),
        ..banner(5, 5)
    };
    let views_capped = Banner {
        views: 10,
        max_views: 10,
        ..banner(6, 5)
    };
    let clicks_capped = Banner {
        click_count: 11,
        max_clicks: 10,
        ..banner(7, 5)
    };
    let unlimited = Banner {
        views: 1_000_000,
        max_views: 0,
        ..banner(8, 5)
    };

    let kept = eligible(
        vec![
            ok,
            inactive,
            elsewhere,
            finished,
            not_started,
            views_capped,
            clicks_capped,
            unlimited,
        ],
        PLACE,
        t,
    );
    let ids: Vec<i64> = kept.iter().map(|b| b.id).collect();
    assert_eq!(ids, vec![1, 8]);
}

#[test]
fn test_view_cap_zero_is_unlimited() {
    for views in [0, 1, 10_000, i64::MAX] {
        let b = Banner {
            views,
            max_views: 0,
            ..banner(1, 5)
        };
        assert!(is_eligible(&b, PLACE, now()));
    }
}

// =============================================================================
// 展示 / 点击记录
// =============================================================================

#[tokio::test]
async fn test_impression_crossing_cap_deactivates() {
    let store = Arc::new(MemoryStore::new());
    let b = store.insert_banner(Banner {
        views: 4,
        max_views: 5,
        ..banner(0, 5)
    });

    let updated = ImpressionRecorder::new(store.clone())
        .record_impression(&b)
        .await
        .unwrap();

    assert_eq!(updated.views, 5);
    assert!(!updated.is_active);

    let stored = store.get_banner(b.id).await.unwrap().unwrap();
    assert_eq!(stored.views, 5);
    assert!(!stored.is_active);
}

#[tokio::test]
async fn test_impression_below_cap_stays_active() {
    let store = Arc::new(MemoryStore::new());
    let b = store.insert_banner(Banner {
        views: 2,
        max_views: 5,
        ..banner(0, 5)
    });

    let updated = ImpressionRecorder::new(store.clone())
        .record_impression(&b)
        .await
        .unwrap();
    assert_eq!(updated.views, 3);
    assert!(updated.is_active);
}

#[tokio::test]
async fn test_unlimited_clicks_never_deactivate() {
    let store = Arc::new(MemoryStore::new());
    let b = store.insert_banner(Banner {
        click_count: 500,
        max_clicks: 0,
        ..banner(0, 5)
    });
    let recorder = ClickRecorder::new(store.clone(), Arc::new(SystemClock));

    for _ in 0..50 {
        recorder.record_click(&b, ClickMeta::new()).await.unwrap();
    }

    let stored = store.banner(b.id).unwrap();
    assert_eq!(stored.click_count, 550);
    assert!(stored.is_active);
}

#[tokio::test]
async fn test_click_cap_deactivates() {
    let store = Arc::new(MemoryStore::new());
    let b = store.insert_banner(Banner {
        click_count: 2,
        max_clicks: 3,
        ..banner(0, 5)
    });
    ClickRecorder::new(store.clone(), Arc::new(SystemClock))
        .record_click(&b, ClickMeta::new())
        .await
        .unwrap();

    let stored = store.banner(b.id).unwrap();
    assert_eq!(stored.click_count, 3);
    assert!(!stored.is_active);
}

#[tokio::test]
async fn test_click_event_carries_metadata() {
    let store = Arc::new(MemoryStore::new());
    let b = store.insert_banner(banner(0, 5));
    let before = Utc::now();

    let event = ClickRecorder::new(store.clone(), Arc::new(SystemClock))
        .record_click(&b, ClickMeta::new().with_ip("1.2.3.4").with_user_agent("UA"))
        .await
        .unwrap();

    let events = store.clicks_for(b.id);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0], event);
    assert_eq!(event.banner_id, b.id);
    assert_eq!(event.ip_address.as_deref(), Some("1.2.3.4"));
    assert_eq!(event.user_agent.as_deref(), Some("UA"));
    assert!(event.clicked_at >= before);
}

#[tokio::test]
async fn test_store_failure_propagates() {
    let store = Arc::new(MemoryStore::new());
    let b = store.insert_banner(banner(0, 5));
    store.set_unavailable(true);

    let err = ImpressionRecorder::new(store.clone())
        .record_impression(&b)
        .await
        .unwrap_err();
    assert!(matches!(err, RotatorError::StoreUnavailable(_)));

    let err = selector(store, 1).select_for_place(PLACE).await.unwrap_err();
    assert!(matches!(err, RotatorError::StoreUnavailable(_)));
}

// =============================================================================
// 选择器
// =============================================================================

#[tokio::test]
async fn test_selector_ignores_zero_weight_and_ineligible() {
    let store = Arc::new(MemoryStore::new());
    store.insert_banner(banner(1, 1));
    store.insert_banner(banner(2, 0));
    store.insert_banner(Banner {
        start_at: Some(now() + Duration::days(1)),
        ..banner(3, 5)
    });

    let selector = selector(store, 99);
    for _ in 0..500 {
        let chosen = selector.select_for_place(PLACE).await.unwrap();
        assert_eq!(chosen.id, 1);
    }
}

#[tokio::test]
async fn test_selector_empty_pool() {
    let store = Arc::new(MemoryStore::new());
    store.insert_banner(Banner {
        is_active: false,
        ..banner(1, 5)
    });

    let err = selector(store.clone(), 3)
        .select_for_place(PLACE)
        .await
        .unwrap_err();
    assert!(matches!(err, RotatorError::NoEligibleBanner(_)));
    assert!(err.is_empty_result());

    let err = selector(store, 3).select_for_place(404).await.unwrap_err();
    assert!(matches!(err, RotatorError::NoEligibleBanner(_)));
}

#[tokio::test]
async fn test_selector_only_zero_weight_candidates() {
    let store = Arc::new(MemoryStore::new());
    store.insert_banner(banner(1, 0));
    store.insert_banner(banner(2, 0));

    let err = selector(store, 5).select_for_place(PLACE).await.unwrap_err();
    assert!(matches!(err, RotatorError::InvalidWeights(_)));
}

#[tokio::test]
async fn test_selection_does_not_mutate_counters() {
    let store = Arc::new(MemoryStore::new());
    store.insert_banner(banner(1, 5));

    let selector = selector(store.clone(), 11);
    for _ in 0..10 {
        selector.select_for_place(PLACE).await.unwrap();
    }
    assert_eq!(store.banner(1).unwrap().views, 0);
}

#[tokio::test]
async fn test_selector_is_reproducible_with_seed() {
    let store = Arc::new(MemoryStore::new());
    for id in 1..=5 {
        store.insert_banner(banner(id, id));
    }

    let mut first = Vec::new();
    let mut second = Vec::new();
    let a = selector(store.clone(), 2026);
    let b = selector(store, 2026);
    for _ in 0..50 {
        first.push(a.select_for_place(PLACE).await.unwrap().id);
        second.push(b.select_for_place(PLACE).await.unwrap().id);
    }
    assert_eq!(first, second);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_impressions_respect_cap_count() {
    let store = Arc::new(MemoryStore::new());
    let b = store.insert_banner(Banner {
        max_views: 100,
        ..banner(0, 5)
    });

    let recorder = ImpressionRecorder::new(store.clone());
    let mut handles = Vec::new();
    for _ in 0..10 {
        let recorder = recorder.clone();
        let b = b.clone();
        handles.push(tokio::spawn(async move {
            for _ in 0..10 {
                recorder.record_impression(&b).await.unwrap();
            }
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    let stored = store.banner(b.id).unwrap();
    assert_eq!(stored.views, 100);
    assert!(!stored.is_active);
}
