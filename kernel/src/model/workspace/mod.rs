pub mod event;

use chrono::{DateTime, Utc};

use crate::model::{id::WorkspaceId, user::WorkspaceOwner};

#[derive(Debug)]
pub struct Workspace {
    pub workspace_id: WorkspaceId,
    pub name: String,
    pub location: String,
    pub capacity: i32,
    pub owner: WorkspaceOwner,
    pub created_at: DateTime<Utc>,
}
