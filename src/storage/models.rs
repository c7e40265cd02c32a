use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::AsRefStr;

/// 点击后打开链接的方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, AsRefStr)]
pub enum UrlTarget {
    /// Current page
    #[default]
    #[serde(rename = "_self")]
    #[strum(serialize = "_self")]
    SelfPage,
    /// Blank page
    #[serde(rename = "_blank")]
    #[strum(serialize = "_blank")]
    Blank,
}

impl std::str::FromStr for UrlTarget {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "_self" | "" => Ok(Self::SelfPage),
            "_blank" => Ok(Self::Blank),
            _ => Err(format!(
                "Invalid url target: '{}'. Valid: _self, _blank",
                s
            )),
        }
    }
}

/// Counter columns that the recorders increment
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum CounterField {
    Views,
    ClickCount,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Banner {
    pub id: i64,
    pub campaign_id: Option<i64>,
    pub name: String,
    pub alt: String,
    pub url: String,
    pub url_target: UrlTarget,
    pub file: String,
    /// Places this banner may be shown in
    pub places: BTreeSet<i64>,
    /// Relative likelihood among eligible candidates, 1..=10 by convention
    pub weight: i64,
    pub views: i64,
    /// 0 means unlimited
    pub max_views: i64,
    pub click_count: i64,
    /// 0 means unlimited
    pub max_clicks: i64,
    pub start_at: Option<DateTime<Utc>>,
    pub finish_at: Option<DateTime<Utc>>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Default for Banner {
    fn default() -> Self {
        Self {
            id: 0,
            campaign_id: None,
            name: String::new(),
            alt: String::new(),
            url: String::new(),
            url_target: UrlTarget::default(),
            file: String::new(),
            places: BTreeSet::new(),
            weight: DEFAULT_WEIGHT as i64,
            views: 0,
            max_views: 0,
            click_count: 0,
            max_clicks: 0,
            start_at: None,
            finish_at: None,
            is_active: true,
            created_at: DateTime::<Utc>::default(),
            updated_at: DateTime::<Utc>::default(),
        }
    }
}

impl Banner {
    /// Cap configured for a counter (0 = unlimited)
    pub fn cap(&self, field: CounterField) -> i64 {
        match field {
            CounterField::Views => self.max_views,
            CounterField::ClickCount => self.max_clicks,
        }
    }

    pub fn is_swf(&self) -> bool {
        self.file.to_lowercase().ends_with("swf")
    }

    /// 剩余可展示次数，None 表示不限
    pub fn remaining_views(&self) -> Option<i64> {
        remaining(self.views, self.max_views)
    }

    /// 剩余可点击次数，None 表示不限
    pub fn remaining_clicks(&self) -> Option<i64> {
        remaining(self.click_count, self.max_clicks)
    }

    pub fn views_display(&self) -> String {
        counter_display(self.views, self.max_views)
    }

    pub fn clicks_display(&self) -> String {
        counter_display(self.click_count, self.max_clicks)
    }
}

fn remaining(counter: i64, cap: i64) -> Option<i64> {
    if cap > 0 {
        Some(cap.saturating_sub(counter).max(0))
    } else {
        None
    }
}

fn counter_display(counter: i64, cap: i64) -> String {
    if cap > 0 {
        format!("{} / {}", counter, cap)
    } else {
        counter.to_string()
    }
}

/// 默认权重
pub const DEFAULT_WEIGHT: i32 = 5;

/// 管理端允许录入的权重范围
pub const WEIGHT_RANGE: std::ops::RangeInclusive<i32> = 1..=10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Place {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub width: Option<i32>,
    pub height: Option<i32>,
}

impl Place {
    /// Preferred size as `WxH`; an unknown side renders as `X`
    pub fn size_str(&self) -> String {
        match (self.width, self.height) {
            (Some(w), Some(h)) => format!("{}x{}", w, h),
            (Some(w), None) => format!("{}xX", w),
            (None, Some(h)) => format!("Xx{}", h),
            (None, None) => String::new(),
        }
    }
}

impl fmt::Display for Place {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let size = self.size_str();
        if size.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{} ({})", self.name, size)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Campaign {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 已持久化的点击记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClickEvent {
    pub id: i64,
    pub banner_id: i64,
    pub user_id: Option<i64>,
    pub clicked_at: DateTime<Utc>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub referrer: Option<String>,
}

/// 待写入的点击记录
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewClickEvent {
    pub banner_id: i64,
    pub user_id: Option<i64>,
    pub clicked_at: DateTime<Utc>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub referrer: Option<String>,
}

impl NewClickEvent {
    pub fn into_event(self, id: i64) -> ClickEvent {
        ClickEvent {
            id,
            banner_id: self.banner_id,
            user_id: self.user_id,
            clicked_at: self.clicked_at,
            ip_address: self.ip_address,
            user_agent: self.user_agent,
            referrer: self.referrer,
        }
    }
}

/// Administrative input for a new banner
#[derive(Debug, Clone)]
pub struct NewBanner {
    pub campaign_id: Option<i64>,
    pub name: String,
    pub alt: String,
    pub url: String,
    pub url_target: UrlTarget,
    pub file: String,
    pub places: Vec<i64>,
    pub weight: i32,
    pub max_views: i64,
    pub max_clicks: i64,
    pub start_at: Option<DateTime<Utc>>,
    pub finish_at: Option<DateTime<Utc>>,
}

impl NewBanner {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            campaign_id: None,
            name: name.into(),
            alt: String::new(),
            url: url.into(),
            url_target: UrlTarget::default(),
            file: String::new(),
            places: Vec::new(),
            weight: DEFAULT_WEIGHT,
            max_views: 0,
            max_clicks: 0,
            start_at: None,
            finish_at: None,
        }
    }

    pub fn with_places(mut self, places: impl IntoIterator<Item = i64>) -> Self {
        self.places = places.into_iter().collect();
        self
    }

    pub fn with_weight(mut self, weight: i32) -> Self {
        self.weight = weight;
        self
    }

    pub fn with_caps(mut self, max_views: i64, max_clicks: i64) -> Self {
        self.max_views = max_views;
        self.max_clicks = max_clicks;
        self
    }

    pub fn with_window(
        mut self,
        start_at: Option<DateTime<Utc>>,
        finish_at: Option<DateTime<Utc>>,
    ) -> Self {
        self.start_at = start_at;
        self.finish_at = finish_at;
        self
    }

    /// Checks administrative constraints before anything is written
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Banner name must not be empty".to_string());
        }
        crate::utils::validate_banner_url(&self.url).map_err(|e| e.to_string())?;
        if !WEIGHT_RANGE.contains(&self.weight) {
            return Err(format!(
                "Weight {} out of range {}..={}",
                self.weight,
                WEIGHT_RANGE.start(),
                WEIGHT_RANGE.end()
            ));
        }
        if self.max_views < 0 || self.max_clicks < 0 {
            return Err("Caps must be >= 0 (0 means unlimited)".to_string());
        }
        if let (Some(start), Some(finish)) = (self.start_at, self.finish_at)
            && start > finish
        {
            return Err(format!(
                "start_at {} is after finish_at {}",
                start.to_rfc3339(),
                finish.to_rfc3339()
            ));
        }
        if self.places.is_empty() {
            return Err("Banner must be attached to at least one place".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct NewPlace {
    pub name: String,
    pub slug: String,
    pub width: Option<i32>,
    pub height: Option<i32>,
}

impl NewPlace {
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Place name must not be empty".to_string());
        }
        if !crate::utils::is_valid_slug(&self.slug) {
            return Err(format!(
                "Invalid slug '{}'. Only lowercase letters, digits, '-' and '_' allowed.",
                self.slug
            ));
        }
        Ok(())
    }
}
