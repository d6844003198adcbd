use axum::{
    routing::{get, post},
    Router,
};
use registry::AppRegistry;

use crate::handler::workspace::{register_workspace, show_workspace_list};

pub fn build_workspace_routers() -> Router<AppRegistry> {
    let workspace_routers = Router::new()
        .route("/", post(register_workspace))
        .route("/", get(show_workspace_list));

    Router::new().nest("/workspaces", workspace_routers)
}
