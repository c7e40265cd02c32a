use std::sync::Arc;

use crate::config::DatabaseConfig;
use crate::errors::Result;

pub mod backend;
pub mod memory;
pub mod models;
pub mod store;

pub use backend::SeaOrmStorage;
pub use memory::MemoryStore;
pub use models::{
    Banner, Campaign, ClickEvent, CounterField, NewBanner, NewClickEvent, NewPlace, Place,
    UrlTarget,
};
pub use store::BannerStore;

pub struct StorageFactory;

impl StorageFactory {
    /// 根据 database_url 创建 SeaORM 存储
    pub async fn create(config: &DatabaseConfig) -> Result<Arc<SeaOrmStorage>> {
        let storage = SeaOrmStorage::from_config(config).await?;
        Ok(Arc::new(storage))
    }
}
