use chrono::{DateTime, Utc};
use derive_new::new;
use garde::Validate;
use kernel::model::{
    id::{UserId, WorkspaceId},
    workspace::{event::CreateWorkspace, Workspace},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateWorkspaceRequest {
    #[garde(length(min = 1, max = 255))]
    pub name: String,
    #[garde(length(min = 1, max = 255))]
    pub location: String,
    #[garde(range(min = 1))]
    pub capacity: i32,
}

#[derive(new)]
pub struct CreateWorkspaceRequestWithUserId(UserId, CreateWorkspaceRequest);

impl From<CreateWorkspaceRequestWithUserId> for CreateWorkspace {
    fn from(value: CreateWorkspaceRequestWithUserId) -> Self {
        let CreateWorkspaceRequestWithUserId(
            user_id,
            CreateWorkspaceRequest {
                name,
                location,
                capacity,
            },
        ) = value;
        CreateWorkspace {
            name,
            location,
            capacity,
            created_by: user_id,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceResponse {
    pub id: WorkspaceId,
    pub name: String,
    pub location: String,
    pub capacity: i32,
    pub created_by: UserId,
    pub creator: WorkspaceCreatorResponse,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceCreatorResponse {
    pub email: String,
}

impl From<Workspace> for WorkspaceResponse {
    fn from(value: Workspace) -> Self {
        let Workspace {
            workspace_id,
            name,
            location,
            capacity,
            owner,
            created_at,
        } = value;
        Self {
            id: workspace_id,
            name,
            location,
            capacity,
            created_by: owner.owner_id,
            creator: WorkspaceCreatorResponse { email: owner.email },
            created_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspacesResponse {
    pub workspaces: Vec<WorkspaceResponse>,
}

impl From<Vec<Workspace>> for WorkspacesResponse {
    fn from(value: Vec<Workspace>) -> Self {
        Self {
            workspaces: value.into_iter().map(WorkspaceResponse::from).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedWorkspaceResponse {
    pub workspace: WorkspaceResponse,
}
