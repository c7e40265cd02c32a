//! Shared helpers for CLI output and argument parsing

use chrono::{DateTime, Utc};
use colored::Colorize;

use crate::interfaces::cli::CliError;
use crate::storage::{Banner, UrlTarget};
use crate::utils::TimeParser;

/// RFC3339 or a relative offset from `now` ("1d", "2h")
pub fn parse_time_arg(
    label: &str,
    value: Option<&str>,
    now: DateTime<Utc>,
) -> Result<Option<DateTime<Utc>>, CliError> {
    value
        .map(|raw| {
            TimeParser::parse_at(raw, now)
                .map_err(|e| CliError::ParseError(format!("--{} '{}': {}", label, raw, e)))
        })
        .transpose()
}

pub fn format_time(value: Option<DateTime<Utc>>) -> String {
    value
        .map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// One-line summary used by `banner list`, `select` and `serve`
pub fn banner_line(banner: &Banner) -> String {
    let mut parts = vec![
        format!("#{}", banner.id).bold().to_string(),
        banner.name.cyan().to_string(),
        format!("-> {}", banner.url.blue().underline()),
    ];
    if banner.url_target == UrlTarget::Blank {
        parts.push("[_blank]".dimmed().to_string());
    }
    parts.push(format!("weight {}", banner.weight).dimmed().to_string());
    parts.push(format!("views {}", banner.views_display()));
    parts.push(format!("clicks {}", banner.clicks_display()));
    if banner.start_at.is_some() || banner.finish_at.is_some() {
        parts.push(
            format!(
                "({} .. {})",
                format_time(banner.start_at),
                format_time(banner.finish_at)
            )
            .yellow()
            .to_string(),
        );
    }
    if !banner.is_active {
        parts.push("inactive".red().to_string());
    }
    parts.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_time_arg() {
        let now = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(parse_time_arg("start", None, now).unwrap(), None);
        assert_eq!(
            parse_time_arg("start", Some("2026-02-01T00:00:00Z"), now).unwrap(),
            Some(Utc.with_ymd_and_hms(2026, 2, 1, 0, 0, 0).unwrap())
        );
        assert!(matches!(
            parse_time_arg("finish", Some("someday"), now),
            Err(CliError::ParseError(msg)) if msg.contains("--finish")
        ));
    }

    #[test]
    fn test_banner_line_marks_inactive() {
        colored::control::set_override(false);
        let banner = Banner {
            id: 4,
            name: "Promo".to_string(),
            url: "https://example.com".to_string(),
            views: 10,
            max_views: 10,
            is_active: false,
            ..Default::default()
        };
        let line = banner_line(&banner);
        assert!(line.contains("#4"));
        assert!(line.contains("views 10 / 10"));
        assert!(line.contains("inactive"));
    }
}
