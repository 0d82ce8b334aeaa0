use std::future::Future;
use std::pin::Pin;

use actix_web::dev::Payload;
use actix_web::http::header;
use actix_web::{web, FromRequest, HttpRequest};

use super::TokenService;
use crate::application::AppState;
use crate::domain::user::User;
use crate::errors::AppError;

/// The caller of an owner-only handler, resolved from the bearer token.
///
/// A missing, malformed, expired or orphaned token rejects the request
/// with 401 before the handler runs.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub User);

impl FromRequest for AuthenticatedUser {
    type Error = AppError;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let state = req.app_data::<web::Data<AppState>>().cloned();
        let token = req
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .and_then(TokenService::extract_from_header)
            .map(str::to_owned);

        Box::pin(async move {
            let state = state
                .ok_or_else(|| AppError::Internal("application state is not configured".into()))?;
            let token =
                token.ok_or_else(|| AppError::Unauthenticated("Not authenticated".to_string()))?;

            let user = web::block(move || state.auth.authenticate(&token)).await??;
            Ok(AuthenticatedUser(user))
        })
    }
}
