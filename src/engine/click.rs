use std::sync::Arc;

use tracing::{debug, warn};

use crate::engine::clock::Clock;
use crate::engine::lifecycle::bump;
use crate::errors::Result;
use crate::storage::BannerStore;
use crate::storage::models::{Banner, ClickEvent, CounterField, NewClickEvent};
use crate::utils::{normalize_ip, normalize_referrer, truncate_chars};

/// 默认 user agent 最大长度（字符数）
pub const DEFAULT_USER_AGENT_MAX_LENGTH: usize = 1000;

/// 点击请求的附带信息
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClickMeta {
    /// 已登录用户
    pub user_id: Option<i64>,
    /// 客户端 IP 地址
    pub ip: Option<String>,
    /// 用户代理 (User-Agent header)
    pub user_agent: Option<String>,
    /// 来源页面 (Referer header)
    pub referrer: Option<String>,
}

impl ClickMeta {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(mut self, user_id: i64) -> Self {
        self.user_id = Some(user_id);
        self
    }

    pub fn with_ip(mut self, ip: impl Into<String>) -> Self {
        self.ip = Some(ip.into());
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub fn with_referrer(mut self, referrer: impl Into<String>) -> Self {
        self.referrer = Some(referrer.into());
        self
    }
}

/// Counts a click and appends its [`ClickEvent`]
///
/// No deduplication: every call is one recorded click.
#[derive(Clone)]
pub struct ClickRecorder {
    store: Arc<dyn BannerStore>,
    clock: Arc<dyn Clock>,
    user_agent_max_length: usize,
}

impl ClickRecorder {
    pub fn new(store: Arc<dyn BannerStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            clock,
            user_agent_max_length: DEFAULT_USER_AGENT_MAX_LENGTH,
        }
    }

    pub fn with_user_agent_max_length(mut self, max_length: usize) -> Self {
        self.user_agent_max_length = max_length;
        self
    }

    pub async fn record_click(&self, banner: &Banner, meta: ClickMeta) -> Result<ClickEvent> {
        let update = bump(self.store.as_ref(), banner, CounterField::ClickCount).await?;

        let record = self.build_record(banner.id, meta);
        let event = self.store.create_click_event(record).await?;

        debug!(
            "Click recorded: banner {} clicks={} event={}",
            banner.id, update.value, event.id
        );
        Ok(event)
    }

    fn build_record(&self, banner_id: i64, meta: ClickMeta) -> NewClickEvent {
        let user_agent = meta
            .user_agent
            .filter(|ua| !ua.is_empty())
            .map(|ua| {
                let truncated = truncate_chars(&ua, self.user_agent_max_length);
                if truncated.len() < ua.len() {
                    warn!(
                        "User agent for banner {} truncated to {} chars",
                        banner_id, self.user_agent_max_length
                    );
                }
                truncated.to_string()
            });

        NewClickEvent {
            banner_id,
            user_id: meta.user_id,
            clicked_at: self.clock.now(),
            ip_address: meta.ip.as_deref().and_then(normalize_ip),
            user_agent,
            referrer: meta.referrer.as_deref().and_then(normalize_referrer),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::clock::FixedClock;
    use crate::storage::MemoryStore;
    use chrono::{TimeZone, Utc};

    fn recorder() -> ClickRecorder {
        let clock = FixedClock(Utc.with_ymd_and_hms(2026, 3, 1, 8, 0, 0).unwrap());
        ClickRecorder::new(Arc::new(MemoryStore::new()), Arc::new(clock))
    }

    #[test]
    fn test_build_record_truncates_user_agent() {
        let recorder = recorder().with_user_agent_max_length(10);
        let record = recorder.build_record(
            1,
            ClickMeta::new().with_user_agent("Mozilla/5.0 (X11; Linux x86_64)"),
        );
        assert_eq!(record.user_agent.as_deref(), Some("Mozilla/5."));
    }

    #[test]
    fn test_build_record_default_limit_is_1000_chars() {
        let recorder = recorder();
        let record = recorder.build_record(1, ClickMeta::new().with_user_agent("é".repeat(1500)));
        let ua = record.user_agent.unwrap();
        assert_eq!(ua.chars().count(), 1000);
    }

    #[test]
    fn test_build_record_sanitizes_metadata() {
        let record = recorder().build_record(
            7,
            ClickMeta::new()
                .with_ip("not-an-ip")
                .with_user_agent("")
                .with_referrer("https://example.com/page")
                .with_user(42),
        );
        assert_eq!(record.banner_id, 7);
        assert_eq!(record.ip_address, None);
        assert_eq!(record.user_agent, None);
        assert_eq!(record.referrer.as_deref(), Some("https://example.com/page"));
        assert_eq!(record.user_id, Some(42));
        assert_eq!(
            record.clicked_at,
            Utc.with_ymd_and_hms(2026, 3, 1, 8, 0, 0).unwrap()
        );
    }
}
