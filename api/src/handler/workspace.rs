use axum::{extract::State, http::StatusCode, Json};
use garde::Validate;
use registry::AppRegistry;
use shared::error::AppResult;

use crate::{
    extractor::AuthorizedUser,
    model::workspace::{
        CreateWorkspaceRequest, CreateWorkspaceRequestWithUserId, CreatedWorkspaceResponse,
        WorkspacesResponse,
    },
};

// The gate has already rejected non-admin callers by the time this runs.
pub async fn register_workspace(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateWorkspaceRequest>,
) -> AppResult<(StatusCode, Json<CreatedWorkspaceResponse>)> {
    req.validate(&())?;

    registry
        .workspace_repository()
        .create(CreateWorkspaceRequestWithUserId::new(user.id(), req).into())
        .await
        .map(|workspace| {
            (
                StatusCode::CREATED,
                Json(CreatedWorkspaceResponse {
                    workspace: workspace.into(),
                }),
            )
        })
}

pub async fn show_workspace_list(
    _user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<WorkspacesResponse>> {
    registry
        .workspace_repository()
        .find_all()
        .await
        .map(WorkspacesResponse::from)
        .map(Json)
}
