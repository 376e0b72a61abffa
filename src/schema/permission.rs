use poem_openapi::{payload::Json, ApiResponse, Object};
use serde::{Deserialize, Serialize};

use crate::{core::utils::datetime_to_string_opt, model::permission::Permission};
use super::common::{
    BadRequestResponse, ConflictResponse, ForbiddenResponse, InternalServerErrorResponse,
    NotFoundResponse, UnauthorizedResponse,
};

#[derive(Object, Deserialize, Serialize, Clone)]
pub struct PermissionDetail {
    pub id: String,
    pub permission_name: String,
    pub description: String,
    pub category: String,
    pub created_date: Option<String>,
}

#[derive(Object, Deserialize, Serialize)]
pub struct PermissionGroupResponse {
    pub category: String,
    pub permissions: Vec<PermissionDetail>,
}

#[derive(ApiResponse)]
pub enum AllPermissionResponses {
    #[oai(status = 200)]
    Ok(Json<Vec<PermissionGroupResponse>>),

    #[oai(status = 400)]
    BadRequest(Json<BadRequestResponse>),

    #[oai(status = 401)]
    Unauthorized(Json<UnauthorizedResponse>),

    #[oai(status = 403)]
    Forbidden(Json<ForbiddenResponse>),

    #[oai(status = 404)]
    NotFound(Json<NotFoundResponse>),

    #[oai(status = 409)]
    Conflict(Json<ConflictResponse>),

    #[oai(status = 500)]
    InternalServerError(Json<InternalServerErrorResponse>),
}

impl From<Permission> for PermissionDetail {
    fn from(permission: Permission) -> Self {
        Self {
            id: permission.id.to_string(),
            permission_name: permission.permission_name,
            description: permission.description,
            category: permission.category,
            created_date: datetime_to_string_opt(permission.created_date),
        }
    }
}
