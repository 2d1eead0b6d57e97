//! Authentication extractors.

use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures::future::LocalBoxFuture;

use folio_core::ports::Credentials;
use folio_infra::auth::ACCESS_EMAIL_HEADER;

use crate::middleware::error::AppError;
use crate::state::AppState;

/// Lift the credential material the configured strategy looks at.
pub fn credentials(req: &HttpRequest, state: &AppState) -> Credentials {
    Credentials {
        cookie: req
            .cookie(state.auth.cookie_name())
            .map(|c| c.value().to_string())
            .filter(|v| !v.is_empty()),
        verified_email: req
            .headers()
            .get(ACCESS_EMAIL_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(String::from),
    }
}

async fn check(req: HttpRequest) -> Result<bool, AppError> {
    let state = req
        .app_data::<web::Data<AppState>>()
        .cloned()
        .ok_or_else(|| AppError::Internal("AppState not found in app data".to_string()))?;

    let credentials = credentials(&req, &state);
    Ok(state.auth.verify(&credentials).await)
}

/// Request made by the site owner.
///
/// Handlers taking this extractor answer 401 to everyone else:
/// ```ignore
/// async fn delete_post(_admin: Admin, ...) -> AppResult<HttpResponse> { ... }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Admin;

impl FromRequest for Admin {
    type Error = AppError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let req = req.clone();
        Box::pin(async move {
            if check(req).await? {
                Ok(Admin)
            } else {
                Err(AppError::Unauthorized)
            }
        })
    }
}

/// Authentication verdict for routes open to everyone.
#[derive(Debug, Clone, Copy)]
pub struct AuthStatus(pub bool);

impl AuthStatus {
    pub fn is_authenticated(&self) -> bool {
        self.0
    }
}

impl FromRequest for AuthStatus {
    type Error = AppError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let req = req.clone();
        Box::pin(async move { check(req).await.map(AuthStatus) })
    }
}
