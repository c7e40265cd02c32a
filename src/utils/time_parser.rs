use chrono::{DateTime, Duration, Utc};

/// 解析 banner 投放窗口的时间参数
pub struct TimeParser;

impl TimeParser {
    /// 解析时间字符串，支持多种格式：
    /// - RFC3339 格式：2023-10-01T12:00:00Z
    /// - 相对时间（相对 `now`）：1d, 2w, 3mo, 1y, 1h30m, 2d12h
    pub fn parse_at(input: &str, now: DateTime<Utc>) -> Result<DateTime<Utc>, String> {
        let input = input.trim();

        if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
            return Ok(dt.with_timezone(&Utc));
        }

        let offset = Self::parse_duration(input)?;
        now.checked_add_signed(offset)
            .ok_or_else(|| "计算的时间超出了有效范围".to_string())
    }

    /// Relative offset such as `1d2h30m`
    pub fn parse_duration(input: &str) -> Result<Duration, String> {
        let mut total_duration = Duration::zero();
        let mut remaining = input;

        while !remaining.is_empty() {
            let digits = remaining
                .find(|c: char| !c.is_ascii_digit())
                .unwrap_or(remaining.len());
            if digits == 0 {
                return Err(format!("无效的时间格式: '{}'", input));
            }
            let num: i64 = remaining[..digits]
                .parse()
                .map_err(|_| format!("无效的数字: '{}'", &remaining[..digits]))?;
            remaining = &remaining[digits..];

            let unit_len = remaining
                .find(|c: char| !c.is_alphabetic())
                .unwrap_or(remaining.len());
            if unit_len == 0 {
                return Err(format!("缺少时间单位，数字 '{}' 后应跟时间单位", num));
            }
            let unit = &remaining[..unit_len];

            let duration = match unit.to_lowercase().as_str() {
                "s" | "sec" | "second" | "seconds" => Duration::seconds(num),
                "m" | "min" | "minute" | "minutes" => Duration::minutes(num),
                "h" | "hour" | "hours" => Duration::hours(num),
                "d" | "day" | "days" => Duration::days(num),
                "w" | "week" | "weeks" => Duration::weeks(num),
                "mo" | "month" | "months" => Duration::days(num * 30), // 近似30天
                "y" | "year" | "years" => Duration::days(num * 365),   // 近似365天
                _ => return Err(format!("不支持的时间单位: '{}'", unit)),
            };

            total_duration += duration;
            remaining = &remaining[unit_len..];
        }

        if total_duration == Duration::zero() {
            return Err("时间间隔不能为零".to_string());
        }

        Ok(total_duration)
    }
}
