use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::engine::click::DEFAULT_USER_AGENT_MAX_LENGTH;
use crate::errors::{Result, RotatorError};

/// 默认配置文件路径
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// 环境变量前缀，例如 BR__DATABASE__DATABASE_URL
pub const ENV_PREFIX: &str = "BR";

/// 静态配置（从 TOML + 环境变量加载，启动时使用）
///
/// - database: 数据库连接与重试
/// - logging: 日志输出
/// - rotator: 选择引擎参数
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StaticConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub rotator: RotatorConfig,
}

impl StaticConfig {
    /// 从默认路径加载
    pub fn load() -> Result<Self> {
        Self::load_from(DEFAULT_CONFIG_PATH)
    }

    /// 从 TOML 文件和环境变量加载配置
    ///
    /// 优先级：ENV > TOML > 默认值。文件不存在时只使用环境变量和默认值。
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        use config::{Config, Environment, File, FileFormat};

        let path = path.as_ref();
        let builder = Config::builder()
            .add_source(
                File::from(path)
                    .format(FileFormat::Toml)
                    .required(false),
            )
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            );

        let config: StaticConfig = builder.build()?.try_deserialize()?;
        config.validate()?;

        if path.exists() {
            tracing::debug!("Configuration loaded from: {}", path.display());
        }
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        super::validators::validate_static_config(self).map_err(RotatorError::config)
    }

    /// 生成示例 TOML 配置
    pub fn generate_sample_config() -> String {
        toml::to_string_pretty(&Self::default())
            .unwrap_or_else(|e| format!("# Error generating sample config: {}", e))
    }

    /// 保存配置到 TOML 文件
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| RotatorError::config(format!("Cannot serialize config: {}", e)))?;

        if let Some(parent) = path.as_ref().parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| {
                RotatorError::config(format!("Cannot create {}: {}", parent.display(), e))
            })?;
        }

        std::fs::write(path.as_ref(), content).map_err(|e| {
            RotatorError::config(format!("Cannot write {}: {}", path.as_ref().display(), e))
        })
    }
}

/// 数据库连接配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_database_url")]
    pub database_url: String,
    #[serde(default = "default_database_pool_size")]
    pub pool_size: u32,
    /// 连接与单次操作超时（秒），0 表示不限
    #[serde(default = "default_database_timeout")]
    pub timeout: u64,
    #[serde(default = "default_retry_count")]
    pub retry_count: u32,
    #[serde(default = "default_retry_base_delay_ms")]
    pub retry_base_delay_ms: u64,
    #[serde(default = "default_retry_max_delay_ms")]
    pub retry_max_delay_ms: u64,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// text | json
    #[serde(default = "default_log_format")]
    pub format: String,
    /// 为空时输出到 stderr
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default = "default_max_backups")]
    pub max_backups: u32,
    #[serde(default = "default_enable_rotation")]
    pub enable_rotation: bool,
}

/// 选择引擎配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RotatorConfig {
    /// 固定随机种子，设置后抽取结果可复现
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default = "default_user_agent_max_length")]
    pub user_agent_max_length: usize,
}

fn default_database_url() -> String {
    "banners.db".to_string()
}

fn default_database_pool_size() -> u32 {
    10
}

fn default_database_timeout() -> u64 {
    30
}

fn default_retry_count() -> u32 {
    3
}

fn default_retry_base_delay_ms() -> u64 {
    100
}

fn default_retry_max_delay_ms() -> u64 {
    2000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

fn default_max_backups() -> u32 {
    5
}

fn default_enable_rotation() -> bool {
    true
}

fn default_user_agent_max_length() -> usize {
    DEFAULT_USER_AGENT_MAX_LENGTH
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            database_url: default_database_url(),
            pool_size: default_database_pool_size(),
            timeout: default_database_timeout(),
            retry_count: default_retry_count(),
            retry_base_delay_ms: default_retry_base_delay_ms(),
            retry_max_delay_ms: default_retry_max_delay_ms(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            file: None,
            max_backups: default_max_backups(),
            enable_rotation: default_enable_rotation(),
        }
    }
}

impl Default for RotatorConfig {
    fn default() -> Self {
        Self {
            seed: None,
            user_agent_max_length: default_user_agent_max_length(),
        }
    }
}
