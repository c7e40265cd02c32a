//! 配置值验证

use super::StaticConfig;

pub const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];
pub const LOG_FORMATS: &[&str] = &["text", "json"];

pub fn validate_log_level(level: &str) -> Result<(), String> {
    if LOG_LEVELS.iter().any(|l| l.eq_ignore_ascii_case(level)) {
        Ok(())
    } else {
        Err(format!(
            "Invalid log level: '{}'. Valid: {}",
            level,
            LOG_LEVELS.join(", ")
        ))
    }
}

pub fn validate_log_format(format: &str) -> Result<(), String> {
    if LOG_FORMATS.iter().any(|f| f.eq_ignore_ascii_case(format)) {
        Ok(())
    } else {
        Err(format!(
            "Invalid log format: '{}'. Valid: {}",
            format,
            LOG_FORMATS.join(", ")
        ))
    }
}

pub fn validate_static_config(config: &StaticConfig) -> Result<(), String> {
    validate_log_level(&config.logging.level)?;
    validate_log_format(&config.logging.format)?;

    if config.database.database_url.trim().is_empty() {
        return Err("database.database_url must not be empty".to_string());
    }
    if config.database.pool_size == 0 {
        return Err("database.pool_size must be > 0".to_string());
    }
    if config.database.retry_base_delay_ms > config.database.retry_max_delay_ms {
        return Err(format!(
            "database.retry_base_delay_ms ({}) exceeds retry_max_delay_ms ({})",
            config.database.retry_base_delay_ms, config.database.retry_max_delay_ms
        ));
    }
    if config.rotator.user_agent_max_length == 0 {
        return Err("rotator.user_agent_max_length must be > 0".to_string());
    }
    Ok(())
}
