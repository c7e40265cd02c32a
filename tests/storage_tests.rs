//! Storage backend tests
//!
//! Tests for SeaOrmStorage using temporary SQLite databases.

use std::sync::Arc;

use banner_rotator::config::DatabaseConfig;
use banner_rotator::errors::RotatorError;
use banner_rotator::storage::{
    BannerStore, CounterField, NewBanner, NewClickEvent, NewPlace, Place, SeaOrmStorage,
    UrlTarget,
};
use chrono::{Duration, Utc};
use tempfile::TempDir;

/// 创建临时 SQLite 数据库的存储实例
async fn create_temp_storage() -> (SeaOrmStorage, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());

    let config = DatabaseConfig {
        database_url: db_url.clone(),
        retry_base_delay_ms: 5,
        retry_max_delay_ms: 50,
        ..Default::default()
    };
    let storage = SeaOrmStorage::new(&db_url, "sqlite", &config)
        .await
        .expect("Failed to create storage");

    (storage, temp_dir)
}

async fn add_place(storage: &SeaOrmStorage, slug: &str) -> Place {
    storage
        .create_place(NewPlace {
            name: slug.to_uppercase(),
            slug: slug.to_string(),
            width: Some(468),
            height: Some(60),
        })
        .await
        .expect("Failed to create place")
}

// =============================================================================
// 管理操作
// =============================================================================

#[tokio::test]
async fn test_create_place_and_find_by_slug() {
    let (storage, _dir) = create_temp_storage().await;
    let place = add_place(&storage, "header").await;

    assert!(place.id > 0);
    assert_eq!(place.size_str(), "468x60");
    assert_eq!(
        storage.find_place_by_slug("header").await.unwrap(),
        Some(place)
    );
    assert_eq!(storage.find_place_by_slug("footer").await.unwrap(), None);
}

#[tokio::test]
async fn test_create_place_rejects_duplicate_slug() {
    let (storage, _dir) = create_temp_storage().await;
    add_place(&storage, "header").await;

    let err = storage
        .create_place(NewPlace {
            name: "Again".to_string(),
            slug: "header".to_string(),
            width: None,
            height: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, RotatorError::Validation(_)));
}

#[tokio::test]
async fn test_create_banner_round_trip() {
    let (storage, _dir) = create_temp_storage().await;
    let header = add_place(&storage, "header").await;
    let sidebar = add_place(&storage, "sidebar").await;
    let campaign = storage.create_campaign("Spring").await.unwrap();

    let start = Utc::now() - Duration::days(1);
    let finish = Utc::now() + Duration::days(30);
    let mut input = NewBanner::new("Spring sale", "https://shop.example.com/spring")
        .with_places([header.id, sidebar.id])
        .with_weight(8)
        .with_caps(1000, 50)
        .with_window(Some(start), Some(finish));
    input.campaign_id = Some(campaign.id);
    input.url_target = UrlTarget::Blank;

    let created = storage.create_banner(input).await.unwrap();
    let loaded = storage.get_banner(created.id).await.unwrap().unwrap();

    assert_eq!(loaded.name, "Spring sale");
    assert_eq!(loaded.campaign_id, Some(campaign.id));
    assert_eq!(loaded.url_target, UrlTarget::Blank);
    assert_eq!(loaded.weight, 8);
    assert_eq!(loaded.max_views, 1000);
    assert_eq!(loaded.max_clicks, 50);
    assert_eq!(loaded.views, 0);
    assert!(loaded.is_active);
    assert_eq!(
        loaded.places,
        [header.id, sidebar.id].into_iter().collect()
    );
}

#[tokio::test]
async fn test_create_banner_validation() {
    let (storage, _dir) = create_temp_storage().await;
    let place = add_place(&storage, "header").await;

    let bad_weight = NewBanner::new("x", "https://example.com")
        .with_places([place.id])
        .with_weight(11);
    assert!(matches!(
        storage.create_banner(bad_weight).await,
        Err(RotatorError::Validation(_))
    ));

    let bad_url = NewBanner::new("x", "javascript:alert(1)").with_places([place.id]);
    assert!(matches!(
        storage.create_banner(bad_url).await,
        Err(RotatorError::Validation(_))
    ));

    let unknown_place = NewBanner::new("x", "https://example.com").with_places([place.id, 999]);
    assert!(matches!(
        storage.create_banner(unknown_place).await,
        Err(RotatorError::PlaceNotFound(_))
    ));

    let mut unknown_campaign = NewBanner::new("x", "https://example.com").with_places([place.id]);
    unknown_campaign.campaign_id = Some(77);
    assert!(matches!(
        storage.create_banner(unknown_campaign).await,
        Err(RotatorError::Validation(_))
    ));

    assert!(storage.list_banners().await.unwrap().is_empty());
}

// =============================================================================
// BannerStore
// =============================================================================

#[tokio::test]
async fn test_fetch_banners_for_place() {
    let (storage, _dir) = create_temp_storage().await;
    let header = add_place(&storage, "header").await;
    let sidebar = add_place(&storage, "sidebar").await;

    let a = storage
        .create_banner(NewBanner::new("a", "https://a.example.com").with_places([header.id]))
        .await
        .unwrap();
    let b = storage
        .create_banner(
            NewBanner::new("b", "https://b.example.com").with_places([header.id, sidebar.id]),
        )
        .await
        .unwrap();
    storage
        .create_banner(NewBanner::new("c", "https://c.example.com").with_places([sidebar.id]))
        .await
        .unwrap();

    let for_header = storage.fetch_banners_for_place(header.id).await.unwrap();
    let ids: Vec<i64> = for_header.iter().map(|b| b.id).collect();
    assert_eq!(ids, vec![a.id, b.id]);
    assert!(for_header[1].places.contains(&sidebar.id));

    assert!(storage.fetch_banners_for_place(999).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_increment_counter() {
    let (storage, _dir) = create_temp_storage().await;
    let place = add_place(&storage, "header").await;
    let banner = storage
        .create_banner(NewBanner::new("a", "https://a.example.com").with_places([place.id]))
        .await
        .unwrap();

    assert_eq!(
        storage
            .increment_counter(banner.id, CounterField::Views, 1)
            .await
            .unwrap(),
        1
    );
    assert_eq!(
        storage
            .increment_counter(banner.id, CounterField::Views, 4)
            .await
            .unwrap(),
        5
    );
    assert_eq!(
        storage
            .increment_counter(banner.id, CounterField::ClickCount, 1)
            .await
            .unwrap(),
        1
    );

    let loaded = storage.get_banner(banner.id).await.unwrap().unwrap();
    assert_eq!((loaded.views, loaded.click_count), (5, 1));
}

#[tokio::test]
async fn test_increment_missing_banner() {
    let (storage, _dir) = create_temp_storage().await;
    let err = storage
        .increment_counter(12345, CounterField::Views, 1)
        .await
        .unwrap_err();
    assert!(matches!(err, RotatorError::BannerNotFound(_)));
}

#[tokio::test]
async fn test_concurrent_increments_are_not_lost() {
    let (storage, _dir) = create_temp_storage().await;
    let place = add_place(&storage, "header").await;
    let banner = storage
        .create_banner(NewBanner::new("a", "https://a.example.com").with_places([place.id]))
        .await
        .unwrap();

    let storage = Arc::new(storage);
    let mut handles = Vec::new();
    for _ in 0..4 {
        let storage = storage.clone();
        let banner_id = banner.id;
        handles.push(tokio::spawn(async move {
            for _ in 0..25 {
                storage
                    .increment_counter(banner_id, CounterField::Views, 1)
                    .await
                    .unwrap();
            }
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    let loaded = storage.get_banner(banner.id).await.unwrap().unwrap();
    assert_eq!(loaded.views, 100);
}

#[tokio::test]
async fn test_set_active() {
    let (storage, _dir) = create_temp_storage().await;
    let place = add_place(&storage, "header").await;
    let banner = storage
        .create_banner(NewBanner::new("a", "https://a.example.com").with_places([place.id]))
        .await
        .unwrap();

    storage.set_active(banner.id, false).await.unwrap();
    assert!(!storage.get_banner(banner.id).await.unwrap().unwrap().is_active);

    // 重复设置同一值不应报错
    storage.set_active(banner.id, false).await.unwrap();

    let err = storage.set_active(999, false).await.unwrap_err();
    assert!(matches!(err, RotatorError::BannerNotFound(_)));
}

#[tokio::test]
async fn test_create_and_list_click_events() {
    let (storage, _dir) = create_temp_storage().await;
    let place = add_place(&storage, "header").await;
    let banner = storage
        .create_banner(NewBanner::new("a", "https://a.example.com").with_places([place.id]))
        .await
        .unwrap();

    let first_at = Utc::now() - Duration::minutes(5);
    let first = storage
        .create_click_event(NewClickEvent {
            banner_id: banner.id,
            user_id: Some(7),
            clicked_at: first_at,
            ip_address: Some("1.2.3.4".to_string()),
            user_agent: Some("UA".to_string()),
            referrer: None,
        })
        .await
        .unwrap();
    let second = storage
        .create_click_event(NewClickEvent {
            banner_id: banner.id,
            user_id: None,
            clicked_at: Utc::now(),
            ip_address: None,
            user_agent: None,
            referrer: Some("https://news.example.com/".to_string()),
        })
        .await
        .unwrap();

    assert!(first.id > 0);
    assert_ne!(first.id, second.id);

    let clicks = storage.list_clicks(banner.id, 10).await.unwrap();
    assert_eq!(clicks.len(), 2);
    assert_eq!(clicks[0].id, second.id);
    assert_eq!(clicks[1].ip_address.as_deref(), Some("1.2.3.4"));
    assert_eq!(clicks[1].user_agent.as_deref(), Some("UA"));
    assert_eq!(clicks[1].user_id, Some(7));

    assert_eq!(storage.list_clicks(banner.id, 1).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_list_places_and_campaigns() {
    let (storage, _dir) = create_temp_storage().await;
    add_place(&storage, "header").await;
    add_place(&storage, "footer").await;
    storage.create_campaign("Q3").await.unwrap();

    let slugs: Vec<String> = storage
        .list_places()
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.slug)
        .collect();
    assert_eq!(slugs, vec!["header", "footer"]);
    assert_eq!(storage.list_campaigns().await.unwrap().len(), 1);
    assert!(matches!(
        storage.create_campaign("   ").await,
        Err(RotatorError::Validation(_))
    ));
}
