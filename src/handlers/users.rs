use actix_web::{web, Either, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::application::AppState;
use crate::auth::AuthenticatedUser;
use crate::domain::user::User;
use crate::errors::AppError;

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[validate(email(message = "value is not a valid email address"))]
    pub email: String,
    pub password: String,
}

/// OAuth2 password-flow form; `username` carries the email.
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    pub id: i32,
    pub email: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        UserResponse {
            id: user.id,
            email: user.email,
        }
    }
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// POST /users
#[utoipa::path(
    post,
    path = "/users",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered", body = UserResponse),
        (status = 400, description = "Email already registered or malformed"),
    ),
    tag = "users"
)]
pub async fn register(
    state: web::Data<AppState>,
    body: web::Json<RegisterRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    body.validate()?;

    let user = web::block(move || state.auth.register(&body.email, &body.password)).await??;
    Ok(HttpResponse::Created().json(UserResponse::from(user)))
}

/// POST /users/login
///
/// Accepts the OAuth2 password form or a JSON body and returns a bearer
/// token.
#[utoipa::path(
    post,
    path = "/users/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Token issued", body = TokenResponse),
        (status = 401, description = "Incorrect email or password"),
    ),
    tag = "users"
)]
pub async fn login(
    state: web::Data<AppState>,
    body: Either<web::Form<LoginForm>, web::Json<LoginRequest>>,
) -> Result<HttpResponse, AppError> {
    let (email, password) = match body {
        Either::Left(form) => {
            let form = form.into_inner();
            (form.username, form.password)
        }
        Either::Right(json) => {
            let json = json.into_inner();
            (json.email, json.password)
        }
    };

    let access_token = web::block(move || state.auth.login(&email, &password)).await??;
    Ok(HttpResponse::Ok().json(TokenResponse {
        access_token,
        token_type: "bearer".to_string(),
    }))
}

/// GET /users/me
#[utoipa::path(
    get,
    path = "/users/me",
    responses(
        (status = 200, description = "Current user", body = UserResponse),
        (status = 401, description = "Missing or invalid token"),
    ),
    security(("bearer_auth" = [])),
    tag = "users"
)]
pub async fn me(user: AuthenticatedUser) -> HttpResponse {
    HttpResponse::Ok().json(UserResponse::from(user.0))
}

/// DELETE /users/me
///
/// Removes the account and everything it owns.
#[utoipa::path(
    delete,
    path = "/users/me",
    responses(
        (status = 204, description = "Account deleted"),
        (status = 401, description = "Missing or invalid token"),
    ),
    security(("bearer_auth" = [])),
    tag = "users"
)]
pub async fn delete_me(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    web::block(move || state.auth.delete_account(&user.0)).await??;
    Ok(HttpResponse::NoContent().finish())
}
