use poem_openapi::{payload::Json, ApiResponse, Object};
use serde::{Deserialize, Serialize};

use crate::{core::utils::datetime_to_string_opt, model::kpi::Kpi};

use super::common::{
    BadRequestResponse, ConflictResponse, ForbiddenResponse, InternalServerErrorResponse,
    NotFoundResponse, PaginateResponse, UnauthorizedResponse,
};

#[derive(Object, Deserialize, Serialize)]
pub struct KpiDetail {
    pub id: String,
    pub employee_id: String,
    pub title: String,
    pub category: String,
    pub target_percentage: f64,
    pub achieved_percentage: Option<f64>,
    pub period: String,
    pub created_by: Option<String>,
    pub created_date: Option<String>,
}

#[derive(Object, Deserialize)]
pub struct KpiCreateRequest {
    pub employee_id: String,
    pub title: String,
    pub category: String,
    pub target_percentage: f64,
    pub achieved_percentage: Option<f64>,
    /// e.g. 2024-Q1
    pub period: String,
}

#[derive(ApiResponse)]
pub enum PaginateKpiResponses {
    #[oai(status = 200)]
    Ok(Json<PaginateResponse<KpiDetail>>),

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
pub enum KpiCreateResponses {
    #[oai(status = 201)]
    Ok(Json<KpiDetail>),

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

impl From<Kpi> for KpiDetail {
    fn from(kpi: Kpi) -> Self {
        Self {
            id: kpi.id.to_string(),
            employee_id: kpi.employee_id.to_string(),
            title: kpi.title,
            category: kpi.category,
            target_percentage: kpi.target_percentage,
            achieved_percentage: kpi.achieved_percentage,
            period: kpi.period,
            created_by: kpi.created_by.map(|x| x.to_string()),
            created_date: datetime_to_string_opt(kpi.created_date),
        }
    }
}
