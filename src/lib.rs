pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use std::sync::Arc;

use crate::config::Config;
use crate::services::{
    storage_service::{FileStorage, LocalFileStorage},
    test_record_service::TestRecordService,
};
use sqlx::PgPool;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<Config>,
    pub test_record_service: TestRecordService,
    pub storage: Arc<dyn FileStorage>,
}

impl AppState {
    /// State backed by the local media directory from `config`.
    pub fn new(pool: PgPool, config: Config) -> Self {
        let storage = LocalFileStorage::new(config.media_root.clone(), config.media_url.clone());
        Self::with_storage(pool, config, Arc::new(storage))
    }

    pub fn with_storage(pool: PgPool, config: Config, storage: Arc<dyn FileStorage>) -> Self {
        let test_record_service = TestRecordService::new(pool.clone());

        Self {
            pool,
            config: Arc::new(config),
            test_record_service,
            storage,
        }
    }
}
