//! HTTP request handlers - thin layer that delegates to domain service

use super::{dto::*, error::map_domain_error};
use crate::contract::UserFilter;
use crate::domain::Service;
use axum::{
    extract::Query,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Extension, Json,
};
use idgm_kit::{
    auth::session_token, AdminUser, AuthUser, FieldError, JsonBody, Page, PageRequest, Problem,
    Role, SESSION_COOKIE,
};
use std::sync::Arc;

/// Session cookie attributes
#[derive(Debug, Clone, Copy)]
pub struct CookiePolicy {
    pub secure: bool,
    pub max_age_secs: u64,
}

impl CookiePolicy {
    fn issue(&self, token: &str) -> String {
        format!(
            "{}={}; HttpOnly; SameSite=Lax; Path=/; Max-Age={}{}",
            SESSION_COOKIE,
            token,
            self.max_age_secs,
            if self.secure { "; Secure" } else { "" }
        )
    }

    fn clear(&self) -> String {
        format!(
            "{}=; HttpOnly; SameSite=Lax; Path=/; Max-Age=0{}",
            SESSION_COOKIE,
            if self.secure { "; Secure" } else { "" }
        )
    }
}

/// Register a customer account
pub async fn register(
    Extension(service): Extension<Arc<Service>>,
    JsonBody(req): JsonBody<RegisterRequest>,
) -> Result<(StatusCode, Json<UserDto>), Problem> {
    let user = service
        .register(&req.email, &req.name, &req.password)
        .await
        .map_err(map_domain_error)?;

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// Log in and set the session cookie
pub async fn login(
    Extension(service): Extension<Arc<Service>>,
    Extension(cookies): Extension<CookiePolicy>,
    JsonBody(req): JsonBody<LoginRequest>,
) -> Result<Response, Problem> {
    let (user, session) = service
        .login(&req.email, &req.password)
        .await
        .map_err(map_domain_error)?;

    let body = SessionDto {
        user: user.into(),
        expires_at: session.expires_at,
    };

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookies.issue(&session.token))],
        Json(body),
    )
        .into_response())
}

/// Close the current session and clear the cookie
pub async fn logout(
    Extension(service): Extension<Arc<Service>>,
    Extension(cookies): Extension<CookiePolicy>,
    headers: HeaderMap,
) -> Result<Response, Problem> {
    if let Some(token) = session_token(&headers) {
        service.logout(&token).await.map_err(map_domain_error)?;
    }

    Ok((
        StatusCode::NO_CONTENT,
        [(header::SET_COOKIE, cookies.clear())],
    )
        .into_response())
}

/// Current principal
pub async fn current_session(
    Extension(service): Extension<Arc<Service>>,
    AuthUser(principal): AuthUser,
) -> Result<Json<UserDto>, Problem> {
    let user = service
        .get_user(principal.user_id)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(user.into()))
}

/// Admin user listing
pub async fn list_users(
    Extension(service): Extension<Arc<Service>>,
    AdminUser(_admin): AdminUser,
    Query(query): Query<ListUsersQuery>,
) -> Result<Json<Page<UserDto>>, Problem> {
    let role = match query.role.as_deref().filter(|r| !r.is_empty()) {
        Some(raw) => Some(parse_role(raw)?),
        None => None,
    };
    let filter = UserFilter {
        search: query.search,
        role,
    };
    let page = PageRequest::new(query.page, query.limit, 100);

    let users = service
        .list_users(&filter, page)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(users.map(Into::into)))
}

/// Admin role change
pub async fn update_role(
    Extension(service): Extension<Arc<Service>>,
    AdminUser(_admin): AdminUser,
    JsonBody(req): JsonBody<UpdateRoleRequest>,
) -> Result<Json<UserDto>, Problem> {
    let role = parse_role(&req.role)?;
    let user = service
        .update_role(req.user_id, role)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(user.into()))
}

fn parse_role(raw: &str) -> Result<Role, Problem> {
    Role::parse(raw).ok_or_else(|| {
        Problem::validation(vec![FieldError::new("role", "must be one of CUSTOMER, ADMIN")])
    })
}
