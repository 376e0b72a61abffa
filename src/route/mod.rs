use uuid::Uuid;

use crate::{
    core::{error::HrError, security::get_user_from_token, security::BearerAuthorization},
    model::user::User,
    AppState,
};

/// Why a request was turned away before reaching its handler body.
pub(crate) enum Denied {
    Unauthorized,
    Forbidden(String),
    Error(HrError),
}

impl From<HrError> for Denied {
    fn from(err: HrError) -> Self {
        Denied::Error(err)
    }
}

/// Maps [`Denied`] and [`HrError`] onto a response enum carrying the
/// `BadRequest`, `Unauthorized`, `Forbidden`, `NotFound`, `Conflict` and
/// `InternalServerError` variants.
macro_rules! api_error_responses {
    ($name:ident, $module:literal) => {
        impl $name {
            #[allow(dead_code)]
            fn error(function: &str, step: &str, err: $crate::core::error::HrError) -> Self {
                use poem_openapi::payload::Json;
                use $crate::{
                    core::error::HrError,
                    schema::common::{
                        BadRequestResponse, ConflictResponse, InternalServerErrorResponse,
                        NotFoundResponse,
                    },
                };
                match err {
                    HrError::Validation(message) => {
                        Self::BadRequest(Json(BadRequestResponse { message }))
                    }
                    HrError::NotFound { .. } => Self::NotFound(Json(NotFoundResponse {
                        message: err.to_string(),
                    })),
                    HrError::InvalidStateTransition { .. } => {
                        Self::Conflict(Json(ConflictResponse {
                            message: err.to_string(),
                        }))
                    }
                    HrError::StorageUnavailable(_) => {
                        tracing::error!("{}.{} failed at {}: {}", $module, function, step, err);
                        Self::InternalServerError(Json(InternalServerErrorResponse::new(
                            $module,
                            function,
                            step,
                            &err.to_string(),
                        )))
                    }
                }
            }

            fn denied(function: &str, denied: $crate::route::Denied) -> Self {
                use poem_openapi::payload::Json;
                use $crate::{
                    route::Denied,
                    schema::common::{ForbiddenResponse, UnauthorizedResponse},
                };
                match denied {
                    Denied::Unauthorized => {
                        Self::Unauthorized(Json(UnauthorizedResponse::default()))
                    }
                    Denied::Forbidden(message) => {
                        Self::Forbidden(Json(ForbiddenResponse { message }))
                    }
                    Denied::Error(err) => Self::error(function, "authorize", err),
                }
            }
        }
    };
}

pub mod auth;
pub mod employee;
#[cfg(test)]
mod employee_test;
pub mod kpi;
pub mod leave_request;
pub mod permission;
#[cfg(test)]
mod permission_test;
pub mod resignation_request;
pub mod reward;
#[cfg(test)]
mod reward_test;
pub mod role_permission;
pub mod setting;
#[cfg(test)]
mod setting_test;
#[cfg(test)]
mod test_helpers;

/// Validates the bearer token and returns its active user.
pub(crate) async fn authenticate(
    state: &AppState,
    auth: BearerAuthorization,
) -> Result<User, Denied> {
    let user = get_user_from_token(state.store.as_ref(), &state.config, auth.0.token).await?;
    user.ok_or(Denied::Unauthorized)
}

/// [`authenticate`], then require `permission_name` for the user's role.
pub(crate) async fn authorize(
    state: &AppState,
    auth: BearerAuthorization,
    permission_name: &str,
) -> Result<User, Denied> {
    let user = authenticate(state, auth).await?;
    require(state, &user, permission_name).await?;
    Ok(user)
}

pub(crate) async fn require(
    state: &AppState,
    user: &User,
    permission_name: &str,
) -> Result<(), Denied> {
    let allowed = state
        .authorizer()
        .role_can(state.store.as_ref(), user.role, permission_name)
        .await?;
    if !allowed {
        return Err(Denied::Forbidden(format!(
            "role {} lacks permission {}",
            user.role, permission_name
        )));
    }
    Ok(())
}

/// Users may act on their own employee record; anyone else needs `permission_name`.
pub(crate) async fn require_self_or(
    state: &AppState,
    user: &User,
    employee_id: &Uuid,
    permission_name: &str,
) -> Result<(), Denied> {
    if user.employee_id.as_ref() == Some(employee_id) {
        return Ok(());
    }
    require(state, user, permission_name).await
}

pub(crate) const MAX_PAGE_SIZE: u32 = 100;

/// Page and page size with their defaults (1 and 10). The page starts at 1,
/// the size is capped at [`MAX_PAGE_SIZE`] and the row offset must fit in `u32`.
pub(crate) fn pagination(
    page: Option<u32>,
    page_size: Option<u32>,
) -> Result<(u32, u32), HrError> {
    let page = page.unwrap_or(1);
    let page_size = page_size.unwrap_or(10);
    if page == 0 {
        return Err(HrError::validation("page must be at least 1"));
    }
    if page_size == 0 || page_size > MAX_PAGE_SIZE {
        return Err(HrError::validation(format!(
            "page_size must be between 1 and {}",
            MAX_PAGE_SIZE
        )));
    }
    if (page - 1).checked_mul(page_size).is_none() {
        return Err(HrError::validation(format!("page {} is out of range", page)));
    }
    Ok((page, page_size))
}

pub(crate) fn parse_uuid(field: &str, value: &str) -> Result<Uuid, HrError> {
    Uuid::parse_str(value.trim())
        .map_err(|_| HrError::validation(format!("{} must be a valid uuid, got {}", field, value)))
}

pub(crate) fn parse_date(field: &str, value: &str) -> Result<chrono::NaiveDate, HrError> {
    crate::core::utils::parse_date(field, value).map_err(HrError::Validation)
}
