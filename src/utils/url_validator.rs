//! URL 验证模块
//!
//! Banner 目标地址只允许 http/https；点击来源 (referrer) 只保留可解析的绝对 URL。

use tracing::debug;
use url::Url;

#[derive(Debug, PartialEq, Eq)]
pub enum UrlError {
    Empty,
    UnsupportedScheme(String),
    Malformed(String),
}

impl std::fmt::Display for UrlError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "URL cannot be empty"),
            Self::UnsupportedScheme(scheme) => write!(
                f,
                "Unsupported scheme '{}'. Only http and https are allowed",
                scheme
            ),
            Self::Malformed(msg) => write!(f, "Invalid URL format: {}", msg),
        }
    }
}

impl std::error::Error for UrlError {}

/// 校验 banner 跳转地址
pub fn validate_banner_url(raw: &str) -> Result<Url, UrlError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(UrlError::Empty);
    }

    let url = Url::parse(raw).map_err(|e| UrlError::Malformed(e.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(UrlError::UnsupportedScheme(other.to_string())),
    }
}

/// 规范化 referrer；空值或无法解析时返回 None
pub fn normalize_referrer(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    match Url::parse(raw) {
        Ok(url) => Some(url.to_string()),
        Err(e) => {
            debug!("Dropping unparseable referrer {:?}: {}", raw, e);
            None
        }
    }
}
