use poem_openapi::{payload::Json, ApiResponse, Object};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{core::utils::datetime_to_string_opt, model::setting::Setting};

use super::common::{
    BadRequestResponse, ConflictResponse, ForbiddenResponse, InternalServerErrorResponse,
    NotFoundResponse, UnauthorizedResponse,
};

#[derive(Object, Deserialize, Serialize)]
pub struct SettingDetail {
    pub category: String,
    pub values: Value,
    /// `true` when nothing was saved yet and `values` holds the defaults
    pub is_default: bool,
    pub updated_by: Option<String>,
    pub updated_date: Option<String>,
}

#[derive(Object, Deserialize)]
pub struct SettingUpdateRequest {
    pub category: String,
    pub values: Value,
}

#[derive(ApiResponse)]
pub enum SettingDetailResponses {
    #[oai(status = 200)]
    Ok(Json<SettingDetail>),

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

#[derive(ApiResponse)]
pub enum SettingUpdateResponses {
    #[oai(status = 200)]
    Ok(Json<SettingDetail>),

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

impl SettingDetail {
    pub fn new(setting: Setting, is_default: bool) -> serde_json::Result<Self> {
        let mut payload = serde_json::to_value(&setting.payload)?;
        Ok(Self {
            category: setting.category().to_string(),
            values: payload
                .get_mut("values")
                .map(Value::take)
                .unwrap_or_default(),
            is_default,
            updated_by: setting.updated_by.map(|x| x.to_string()),
            updated_date: datetime_to_string_opt(setting.updated_date),
        })
    }
}
