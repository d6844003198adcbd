use async_trait::async_trait;
use shared::error::AppResult;

use crate::model::workspace::{event::CreateWorkspace, Workspace};

#[async_trait]
pub trait WorkspaceRepository: Send + Sync {
    async fn create(&self, event: CreateWorkspace) -> AppResult<Workspace>;
    async fn find_all(&self) -> AppResult<Vec<Workspace>>;
}
