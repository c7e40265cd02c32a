use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RotatorError {
    NoEligibleBanner(String),
    InvalidWeights(String),
    StoreUnavailable(String),
    BannerNotFound(String),
    PlaceNotFound(String),
    Validation(String),
    DatabaseConfig(String),
    DatabaseConnection(String),
    Config(String),
}

impl RotatorError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            RotatorError::NoEligibleBanner(_) => "E001",
            RotatorError::InvalidWeights(_) => "E002",
            RotatorError::StoreUnavailable(_) => "E003",
            RotatorError::BannerNotFound(_) => "E004",
            RotatorError::PlaceNotFound(_) => "E005",
            RotatorError::Validation(_) => "E006",
            RotatorError::DatabaseConfig(_) => "E007",
            RotatorError::DatabaseConnection(_) => "E008",
            RotatorError::Config(_) => "E009",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            RotatorError::NoEligibleBanner(_) => "No Eligible Banner",
            RotatorError::InvalidWeights(_) => "Invalid Weights",
            RotatorError::StoreUnavailable(_) => "Store Unavailable",
            RotatorError::BannerNotFound(_) => "Banner Not Found",
            RotatorError::PlaceNotFound(_) => "Place Not Found",
            RotatorError::Validation(_) => "Validation Error",
            RotatorError::DatabaseConfig(_) => "Database Configuration Error",
            RotatorError::DatabaseConnection(_) => "Database Connection Error",
            RotatorError::Config(_) => "Configuration Error",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            RotatorError::NoEligibleBanner(msg)
            | RotatorError::InvalidWeights(msg)
            | RotatorError::StoreUnavailable(msg)
            | RotatorError::BannerNotFound(msg)
            | RotatorError::PlaceNotFound(msg)
            | RotatorError::Validation(msg)
            | RotatorError::DatabaseConfig(msg)
            | RotatorError::DatabaseConnection(msg)
            | RotatorError::Config(msg) => msg,
        }
    }

    /// Whether the caller should simply render nothing
    pub fn is_empty_result(&self) -> bool {
        matches!(self, RotatorError::NoEligibleBanner(_))
    }

    /// 格式化为彩色输出
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        format!(
            "{} {} {}\n  {}",
            "[ERROR]".red().bold(),
            self.code().yellow(),
            self.error_type().red(),
            self.message().white()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for RotatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for RotatorError {}

// 便捷的构造函数
impl RotatorError {
    pub fn no_eligible_banner<T: Into<String>>(msg: T) -> Self {
        RotatorError::NoEligibleBanner(msg.into())
    }

    pub fn invalid_weights<T: Into<String>>(msg: T) -> Self {
        RotatorError::InvalidWeights(msg.into())
    }

    pub fn store_unavailable<T: Into<String>>(msg: T) -> Self {
        RotatorError::StoreUnavailable(msg.into())
    }

    pub fn banner_not_found<T: Into<String>>(msg: T) -> Self {
        RotatorError::BannerNotFound(msg.into())
    }

    pub fn place_not_found<T: Into<String>>(msg: T) -> Self {
        RotatorError::PlaceNotFound(msg.into())
    }

    pub fn validation<T: Into<String>>(msg: T) -> Self {
        RotatorError::Validation(msg.into())
    }

    pub fn database_config<T: Into<String>>(msg: T) -> Self {
        RotatorError::DatabaseConfig(msg.into())
    }

    pub fn database_connection<T: Into<String>>(msg: T) -> Self {
        RotatorError::DatabaseConnection(msg.into())
    }

    pub fn config<T: Into<String>>(msg: T) -> Self {
        RotatorError::Config(msg.into())
    }
}

impl From<sea_orm::DbErr> for RotatorError {
    fn from(err: sea_orm::DbErr) -> Self {
        RotatorError::StoreUnavailable(err.to_string())
    }
}

impl From<std::io::Error> for RotatorError {
    fn from(err: std::io::Error) -> Self {
        RotatorError::StoreUnavailable(err.to_string())
    }
}

impl From<config::ConfigError> for RotatorError {
    fn from(err: config::ConfigError) -> Self {
        RotatorError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, RotatorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_unique() {
        let all = [
            RotatorError::no_eligible_banner("x"),
            RotatorError::invalid_weights("x"),
            RotatorError::store_unavailable("x"),
            RotatorError::banner_not_found("x"),
            RotatorError::place_not_found("x"),
            RotatorError::validation("x"),
            RotatorError::database_config("x"),
            RotatorError::database_connection("x"),
            RotatorError::config("x"),
        ];
        let mut codes: Vec<&str> = all.iter().map(|e| e.code()).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), all.len());
    }

    #[test]
    fn test_format_simple() {
        let err = RotatorError::invalid_weights("total weight is 0");
        assert_eq!(err.format_simple(), "Invalid Weights: total weight is 0");
        assert_eq!(err.to_string(), err.format_simple());
    }

    #[test]
    fn test_db_err_maps_to_store_unavailable() {
        let err: RotatorError = sea_orm::DbErr::Custom("boom".to_string()).into();
        assert_eq!(err.code(), "E003");
        assert!(err.message().contains("boom"));
    }

    #[test]
    fn test_is_empty_result() {
        assert!(RotatorError::no_eligible_banner("home").is_empty_result());
        assert!(!RotatorError::store_unavailable("down").is_empty_result());
    }
}
