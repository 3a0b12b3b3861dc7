use axum::{
    extract::{FromRequestParts, State},
    http::{header, request::Parts, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Redirect, Response},
    Json,
};
use serde::Deserialize;

use crate::{error::DashboardError, state::AppState};

pub const SESSION_COOKIE: &str = "auth-token";
pub const SESSION_VALUE: &str = "authenticated";
pub const SESSION_MAX_AGE_SECS: u64 = 60 * 60 * 24;

#[derive(Deserialize)]
pub struct LoginRequest {
    pub password: String,
}

/// A request carrying the session cookie. Pages that take this extractor
/// redirect anonymous visitors to the login view.
pub struct DashboardSession;

/// Optional variant used by the login view to bounce signed-in visitors.
pub struct MaybeSession(pub bool);

pub fn has_session(headers: &HeaderMap) -> bool {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .any(|(name, value)| name == SESSION_COOKIE && value == SESSION_VALUE)
}

impl<S: Send + Sync> FromRequestParts<S> for DashboardSession {
    type Rejection = Redirect;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        if has_session(&parts.headers) {
            Ok(Self)
        } else {
            Err(Redirect::to("/login"))
        }
    }
}

impl<S: Send + Sync> FromRequestParts<S> for MaybeSession {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(has_session(&parts.headers)))
    }
}

fn session_cookie(max_age: u64) -> HeaderValue {
    let value = if max_age == 0 { "" } else { SESSION_VALUE };
    HeaderValue::from_str(&format!(
        "{SESSION_COOKIE}={value}; Path=/; Max-Age={max_age}; SameSite=Lax"
    ))
    .unwrap_or_else(|_| HeaderValue::from_static("auth-token=; Path=/; Max-Age=0"))
}

pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Response, DashboardError> {
    if payload.password != state.dashboard.config().password {
        tracing::warn!("rejected dashboard login");
        return Err(DashboardError::WrongPassword);
    }
    tracing::info!("dashboard login");
    Ok((
        StatusCode::NO_CONTENT,
        [(header::SET_COOKIE, session_cookie(SESSION_MAX_AGE_SECS))],
    )
        .into_response())
}

pub async fn logout() -> Response {
    (StatusCode::NO_CONTENT, [(header::SET_COOKIE, session_cookie(0))]).into_response()
}
