use chrono::{DateTime, Utc};
use kernel::model::{
    id::{UserId, WorkspaceId},
    user::WorkspaceOwner,
    workspace::Workspace,
};
use sqlx::FromRow;

#[derive(FromRow)]
pub struct WorkspaceRow {
    pub workspace_id: WorkspaceId,
    pub name: String,
    pub location: String,
    pub capacity: i32,
    pub created_by: UserId,
    pub owner_email: String,
    pub created_at: DateTime<Utc>,
}

impl From<WorkspaceRow> for Workspace {
    fn from(value: WorkspaceRow) -> Self {
        let WorkspaceRow {
            workspace_id,
            name,
            location,
            capacity,
            created_by,
            owner_email,
            created_at,
        } = value;
        Workspace {
            workspace_id,
            name,
            location,
            capacity,
            owner: WorkspaceOwner {
                owner_id: created_by,
                email: owner_email,
            },
            created_at,
        }
    }
}
