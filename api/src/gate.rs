use axum::{
    extract::{Request, State},
    http::Method,
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use registry::AppRegistry;
use shared::error::AppError;

use crate::extractor::AuthorizedUser;

pub const SESSION_COOKIE_NAME: &str = "token";

/// Access class of a route. Every (method, path) pair falls in exactly one
/// class; anything not in the table is treated as authenticated, so an
/// unlisted path can never slip past the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteClass {
    Public,
    Authenticated,
    AdminOnly,
}

pub fn classify(method: &Method, path: &str) -> RouteClass {
    match (method.as_str(), path) {
        ("POST", "/auth/login" | "/auth/logout") => RouteClass::Public,
        ("GET", "/auth/session") => RouteClass::Public,
        ("GET", "/health" | "/health/db") => RouteClass::Public,
        ("GET", "/workspaces") => RouteClass::Authenticated,
        ("POST", "/workspaces") => RouteClass::AdminOnly,
        ("GET" | "POST", "/bookings") => RouteClass::Authenticated,
        _ => RouteClass::Authenticated,
    }
}

/// Middleware in front of every route. Public routes pass through
/// untouched; the rest require a verifiable session cookie, and admin-only
/// routes additionally require the admin role. Runs before any handler, so
/// a rejected request never reaches the storage layer.
pub async fn enforce(
    State(registry): State<AppRegistry>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Response {
    let class = classify(req.method(), req.uri().path());
    if class == RouteClass::Public {
        return next.run(req).await;
    }

    let Some(cookie) = jar.get(SESSION_COOKIE_NAME) else {
        return AppError::UnauthenticatedError.into_response();
    };
    let user_id = match registry.token_codec().verify(cookie.value()) {
        Ok(user_id) => user_id,
        // A token that fails verification is also evicted from the client.
        Err(e) => return (clear_session_cookie(jar), e).into_response(),
    };
    let user = match registry.user_repository().find_current_user(user_id).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            return (clear_session_cookie(jar), AppError::UnauthenticatedError).into_response()
        }
        Err(e) => return e.into_response(),
    };
    if class == RouteClass::AdminOnly && !user.is_admin() {
        return AppError::ForbiddenOperation.into_response();
    }

    req.extensions_mut().insert(AuthorizedUser { user });
    next.run(req).await
}

pub fn clear_session_cookie(jar: CookieJar) -> CookieJar {
    jar.remove(Cookie::build((SESSION_COOKIE_NAME, "")).path("/"))
}
