pub mod ip;
pub mod time_parser;
pub mod url_validator;

pub use ip::normalize_ip;
pub use time_parser::TimeParser;
pub use url_validator::{normalize_referrer, validate_banner_url};

/// 校验 place slug：小写字母、数字、`-`、`_`，长度 1-255
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug.len() <= 255
        && slug
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-' || b == b'_')
}

/// 按字符截断字符串（不会切断多字节字符）
pub fn truncate_chars(input: &str, max_chars: usize) -> &str {
    match input.char_indices().nth(max_chars) {
        Some((idx, _)) => &input[..idx],
        None => input,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_slug() {
        assert!(is_valid_slug("top-banner_1"));
        assert!(!is_valid_slug(""));
        assert!(!is_valid_slug("Top"));
        assert!(!is_valid_slug("top banner"));
        assert!(!is_valid_slug(&"a".repeat(256)));
    }

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("hello", 10), "hello");
        assert_eq!(truncate_chars("hello", 3), "hel");
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("", 0), "");
        assert_eq!(truncate_chars("日本語", 1), "日");
    }
}
