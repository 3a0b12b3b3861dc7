use axum::{
    http::{StatusCode, Uri},
    response::{Html, IntoResponse, Redirect, Response},
};

use crate::auth::{DashboardSession, MaybeSession};

const LOGIN_PAGE: &str = r#"<!doctype html>
<html lang="en">
<head><meta charset="utf-8"><title>Portfolio Dashboard</title></head>
<body>
<form id="login">
  <input type="password" name="password" placeholder="Password" required>
  <button type="submit">Sign in</button>
</form>
<script>
document.getElementById("login").addEventListener("submit", async (event) => {
  event.preventDefault();
  const password = new FormData(event.target).get("password");
  const res = await fetch("/api/login", {
    method: "POST",
    headers: { "Content-Type": "application/json" },
    body: JSON.stringify({ password }),
  });
  if (res.ok) { window.location = "/dashboard"; }
});
</script>
</body>
</html>"#;

const DASHBOARD_PAGE: &str = r#"<!doctype html>
<html lang="en">
<head><meta charset="utf-8"><title>Portfolio Dashboard</title></head>
<body data-projects="/api/meisterplan/projects" data-lists="/api/meisterplan/lists">
<main id="dashboard"></main>
</body>
</html>"#;

pub async fn root(_session: DashboardSession) -> Redirect {
    Redirect::to("/dashboard")
}

pub async fn login_page(MaybeSession(signed_in): MaybeSession) -> Response {
    if signed_in {
        return Redirect::to("/dashboard").into_response();
    }
    Html(LOGIN_PAGE).into_response()
}

pub async fn dashboard_page(_session: DashboardSession) -> Html<&'static str> {
    Html(DASHBOARD_PAGE)
}

/// Unknown paths. Pages outside `/api` and `/health` still require a session.
pub async fn fallback(uri: Uri, MaybeSession(signed_in): MaybeSession) -> Response {
    let path = uri.path();
    let is_page = !(path == "/api" || path.starts_with("/api/") || path.starts_with("/health"));
    if is_page && !signed_in {
        return Redirect::to("/login").into_response();
    }
    StatusCode::NOT_FOUND.into_response()
}
