use std::sync::Arc;

use chrono::Local;
use poem::web::Data;
use poem_openapi::{
    param::{Path, Query},
    payload::Json,
    OpenApi, Tags,
};

use crate::{
    core::{
        catalog::{MANAGE_RESIGNATIONS, VIEW_RESIGNATIONS},
        error::HrError,
        review::review_resignation_request,
        security::BearerAuthorization,
        submission::{submit_resignation_request, NewResignationRequest},
    },
    model::{
        resignation_request::ResignationRequestFilter, review_status::ResignationDecision,
    },
    route::{authenticate, authorize, pagination, parse_uuid, require_self_or},
    schema::{
        common::{PaginateResponse, ReviewRequest},
        resignation_request::{
            PaginateResignationRequestResponses, ResignationRequestCreateRequest,
            ResignationRequestCreateResponses, ResignationRequestDetailResponses,
            ResignationRequestReviewResponses,
        },
    },
    AppState,
};

#[derive(Tags)]
enum ApiResignationRequestTags {
    ResignationRequest,
}

pub struct ApiResignationRequest;

api_error_responses!(PaginateResignationRequestResponses, "route.resignation_request");
api_error_responses!(ResignationRequestDetailResponses, "route.resignation_request");
api_error_responses!(ResignationRequestCreateResponses, "route.resignation_request");
api_error_responses!(ResignationRequestReviewResponses, "route.resignation_request");

fn resignation_request_filter(
    status: Option<String>,
    employee_id: Option<String>,
) -> Result<ResignationRequestFilter, HrError> {
    Ok(ResignationRequestFilter {
        status: status.map(|x| x.parse()).transpose()?,
        employee_id: employee_id
            .map(|x| parse_uuid("employee_id", &x))
            .transpose()?,
    })
}

fn new_resignation_request(
    json: &ResignationRequestCreateRequest,
) -> Result<NewResignationRequest, HrError> {
    Ok(NewResignationRequest {
        employee_id: parse_uuid("employee_id", &json.employee_id)?,
        request_type: json.request_type.parse()?,
        description: json.description.clone(),
        document_url: json.document_url.clone(),
    })
}

#[OpenApi]
impl ApiResignationRequest {
    #[oai(
        path = "/resignation-requests",
        method = "get",
        tag = "ApiResignationRequestTags::ResignationRequest"
    )]
    async fn paginate_resignation_request_api(
        &self,
        Query(page): Query<Option<u32>>,
        Query(page_size): Query<Option<u32>>,
        Query(status): Query<Option<String>>,
        Query(employee_id): Query<Option<String>>,
        state: Data<&Arc<AppState>>,
        auth: BearerAuthorization,
    ) -> PaginateResignationRequestResponses {
        // Validate user token
        if let Err(denied) = authorize(&state, auth, VIEW_RESIGNATIONS).await {
            return PaginateResignationRequestResponses::denied(
                "paginate_resignation_request_api",
                denied,
            );
        }
        let filter = match resignation_request_filter(status, employee_id) {
            Ok(val) => val,
            Err(err) => {
                return PaginateResignationRequestResponses::error(
                    "paginate_resignation_request_api",
                    "parse filter",
                    err,
                )
            }
        };

        let (page, page_size) = match pagination(page, page_size) {
            Ok(val) => val,
            Err(err) => {
                return PaginateResignationRequestResponses::error(
                    "paginate_resignation_request_api",
                    "pagination",
                    err,
                )
            }
        };
        let (data, counts, page_count) = match state
            .store
            .paginate_resignation_request(&filter, page, page_size)
            .await
        {
            Ok(val) => val,
            Err(err) => {
                return PaginateResignationRequestResponses::error(
                    "paginate_resignation_request_api",
                    "paginate_resignation_request",
                    err,
                )
            }
        };
        PaginateResignationRequestResponses::Ok(Json(PaginateResponse {
            counts,
            page,
            page_count,
            page_size,
            results: data.into_iter().map(|x| x.into()).collect(),
        }))
    }

    #[oai(
        path = "/resignation-requests/:id",
        method = "get",
        tag = "ApiResignationRequestTags::ResignationRequest"
    )]
    async fn detail_resignation_request_api(
        &self,
        Path(id): Path<String>,
        state: Data<&Arc<AppState>>,
        auth: BearerAuthorization,
    ) -> ResignationRequestDetailResponses {
        // Validate user token
        if let Err(denied) = authorize(&state, auth, VIEW_RESIGNATIONS).await {
            return ResignationRequestDetailResponses::denied(
                "detail_resignation_request_api",
                denied,
            );
        }
        let id = match parse_uuid("id", &id) {
            Ok(val) => val,
            Err(err) => {
                return ResignationRequestDetailResponses::error(
                    "detail_resignation_request_api",
                    "parse id",
                    err,
                )
            }
        };

        match state.store.get_resignation_request_by_id(&id).await {
            Ok(Some(val)) => ResignationRequestDetailResponses::Ok(Json(val.into())),
            Ok(None) => ResignationRequestDetailResponses::error(
                "detail_resignation_request_api",
                "get_resignation_request_by_id",
                HrError::not_found("resignation_request", id),
            ),
            Err(err) => ResignationRequestDetailResponses::error(
                "detail_resignation_request_api",
                "get_resignation_request_by_id",
                err,
            ),
        }
    }

    /// Submit a resignation or termination request
    #[oai(
        path = "/resignation-requests",
        method = "post",
        tag = "ApiResignationRequestTags::ResignationRequest"
    )]
    async fn create_resignation_request_api(
        &self,
        json: Json<ResignationRequestCreateRequest>,
        state: Data<&Arc<AppState>>,
        auth: BearerAuthorization,
    ) -> ResignationRequestCreateResponses {
        // Validate user token
        let user = match authenticate(&state, auth).await {
            Ok(val) => val,
            Err(denied) => {
                return ResignationRequestCreateResponses::denied(
                    "create_resignation_request_api",
                    denied,
                )
            }
        };
        let input = match new_resignation_request(&json) {
            Ok(val) => val,
            Err(err) => {
                return ResignationRequestCreateResponses::error(
                    "create_resignation_request_api",
                    "parse request",
                    err,
                )
            }
        };
        if let Err(denied) =
            require_self_or(&state, &user, &input.employee_id, MANAGE_RESIGNATIONS).await
        {
            return ResignationRequestCreateResponses::denied(
                "create_resignation_request_api",
                denied,
            );
        }

        match submit_resignation_request(state.store.as_ref(), input, Local::now().date_naive())
            .await
        {
            Ok(val) => ResignationRequestCreateResponses::Ok(Json(val.into())),
            Err(err) => ResignationRequestCreateResponses::error(
                "create_resignation_request_api",
                "submit_resignation_request",
                err,
            ),
        }
    }

    /// Mark a pending resignation request as valid or invalid
    #[oai(
        path = "/resignation-requests/:id/review",
        method = "post",
        tag = "ApiResignationRequestTags::ResignationRequest"
    )]
    async fn review_resignation_request_api(
        &self,
        Path(id): Path<String>,
        json: Json<ReviewRequest>,
        state: Data<&Arc<AppState>>,
        auth: BearerAuthorization,
    ) -> ResignationRequestReviewResponses {
        // Validate user token
        let user = match authorize(&state, auth, MANAGE_RESIGNATIONS).await {
            Ok(val) => val,
            Err(denied) => {
                return ResignationRequestReviewResponses::denied(
                    "review_resignation_request_api",
                    denied,
                )
            }
        };
        let id = match parse_uuid("id", &id) {
            Ok(val) => val,
            Err(err) => {
                return ResignationRequestReviewResponses::error(
                    "review_resignation_request_api",
                    "parse id",
                    err,
                )
            }
        };
        let decision: ResignationDecision = match json.decision.parse() {
            Ok(val) => val,
            Err(err) => {
                return ResignationRequestReviewResponses::error(
                    "review_resignation_request_api",
                    "parse decision",
                    err,
                )
            }
        };

        match review_resignation_request(
            state.store.as_ref(),
            &id,
            decision,
            &user.id,
            json.notes.clone(),
        )
        .await
        {
            Ok(val) => ResignationRequestReviewResponses::Ok(Json(val.into())),
            Err(err) => ResignationRequestReviewResponses::error(
                "review_resignation_request_api",
                "review_resignation_request",
                err,
            ),
        }
    }
}
