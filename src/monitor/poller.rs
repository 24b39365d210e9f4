use async_trait::async_trait;

use crate::common::api::client::ScraperClient;
use crate::common::api::error::ApiError;
use crate::common::api::models::task::TaskSnapshot;

// 状态快照的来源。监控器只依赖这个口子，
// 没有真实服务端时也能往里灌快照
#[async_trait]
pub trait StatusSource {
    async fn fetch_status(&self, task_id: &str) -> Result<TaskSnapshot, ApiError>;
}

#[async_trait]
impl StatusSource for ScraperClient {
    async fn fetch_status(&self, task_id: &str) -> Result<TaskSnapshot, ApiError> {
        self.task_status(task_id).await
    }
}
