//! Authentication handlers: OAuth login, logout and status.

use actix_web::cookie::{Cookie, SameSite, time::Duration as CookieDuration};
use actix_web::http::header;
use actix_web::{HttpRequest, HttpResponse, web};
use serde::Deserialize;

use folio_shared::dto::AuthStatusResponse;

use crate::middleware::auth::AuthStatus;
use crate::middleware::error::{AppError, AppResult};
use crate::state::{AppState, LoginFlow};

/// Where the browser lands after a successful login.
const ADMIN_PATH: &str = "/admin";
const CALLBACK_PATH: &str = "/api/auth/callback";

/// Query string of the OAuth callback.
#[derive(Debug, Deserialize)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub error: Option<String>,
}

fn login_flow(state: &AppState) -> AppResult<&LoginFlow> {
    // The access proxy owns login in proxy mode.
    state
        .login
        .as_deref()
        .ok_or_else(|| AppError::NotFound("Not found".to_string()))
}

fn redirect(location: &str) -> actix_web::HttpResponseBuilder {
    let mut builder = HttpResponse::Found();
    builder.insert_header((header::LOCATION, location.to_string()));
    builder
}

fn credential_cookie(name: &str, value: String, max_age: CookieDuration) -> Cookie<'static> {
    Cookie::build(name.to_string(), value)
        .path("/")
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Lax)
        .max_age(max_age)
        .finish()
}

/// GET /api/auth/login
pub async fn login(req: HttpRequest, state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let flow = login_flow(&state)?;

    let origin = {
        let info = req.connection_info();
        format!("{}://{}", info.scheme(), info.host())
    };
    let url = flow
        .provider
        .authorize_url(&format!("{}{}", origin, CALLBACK_PATH))?;

    Ok(redirect(&url).finish())
}

/// GET /api/auth/callback
pub async fn callback(
    state: web::Data<AppState>,
    params: web::Query<CallbackParams>,
) -> AppResult<HttpResponse> {
    let flow = login_flow(&state)?;

    let code = match (&params.error, &params.code) {
        (None, Some(code)) if !code.is_empty() => code,
        (error, _) => {
            tracing::warn!(error = ?error, "OAuth callback without code");
            return Err(AppError::BadRequest("OAuth error".to_string()));
        }
    };

    let email = flow.provider.resolve_email(code).await?;
    if !flow.sessions.is_authorized(&email) {
        tracing::warn!(email = %email, "Login attempt by unauthorized identity");
        return Err(AppError::Forbidden("Unauthorized user".to_string()));
    }

    let now = chrono::Utc::now();
    let token = flow.sessions.issue(&email, now)?;
    let max_age = CookieDuration::seconds(flow.sessions.lifetime().num_seconds());
    let cookie = credential_cookie(state.auth.cookie_name(), token, max_age);

    tracing::info!(email = %email, "Session issued");
    Ok(redirect(ADMIN_PATH).cookie(cookie).finish())
}

/// GET /api/auth/logout
pub async fn logout(state: web::Data<AppState>) -> HttpResponse {
    let logout = state.auth.logout();

    let mut cookie = credential_cookie(state.auth.cookie_name(), String::new(), CookieDuration::ZERO);
    cookie.make_removal();

    redirect(&logout.redirect_to).cookie(cookie).finish()
}

/// GET /api/auth/me
pub async fn me(auth: AuthStatus) -> HttpResponse {
    HttpResponse::Ok().json(AuthStatusResponse {
        authenticated: auth.is_authenticated(),
    })
}
