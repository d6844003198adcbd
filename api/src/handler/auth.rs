use axum::{extract::State, Json};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use garde::Validate;
use registry::AppRegistry;
use shared::error::{AppError, AppResult};
use time::Duration;

use crate::gate::{clear_session_cookie, SESSION_COOKIE_NAME};
use crate::model::auth::{LoginRequest, LoginResponse, SessionResponse};

pub async fn login(
    State(registry): State<AppRegistry>,
    jar: CookieJar,
    Json(req): Json<LoginRequest>,
) -> AppResult<(CookieJar, Json<LoginResponse>)> {
    req.validate(&())?;

    let user_id = registry
        .auth_repository()
        .verify_credentials(&req.email, &req.password)
        .await?
        .ok_or(AppError::UnauthenticatedError)?;
    let token = registry.token_codec().issue(user_id)?;

    let cookie = Cookie::build((SESSION_COOKIE_NAME, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Strict)
        .max_age(Duration::seconds(registry.token_codec().ttl_seconds()))
        .build();

    Ok((jar.add(cookie), Json(LoginResponse::logged_in())))
}

pub async fn logout(jar: CookieJar) -> (CookieJar, Json<LoginResponse>) {
    (clear_session_cookie(jar), Json(LoginResponse::logged_out()))
}

pub async fn show_session(
    State(registry): State<AppRegistry>,
    jar: CookieJar,
) -> Json<SessionResponse> {
    let Some(cookie) = jar.get(SESSION_COOKIE_NAME) else {
        return Json(SessionResponse::anonymous());
    };
    let Ok(user_id) = registry.token_codec().verify(cookie.value()) else {
        return Json(SessionResponse::anonymous());
    };
    match registry.user_repository().find_current_user(user_id).await {
        Ok(Some(user)) => Json(SessionResponse::authenticated(user)),
        _ => Json(SessionResponse::anonymous()),
    }
}
