use std::sync::Arc;

use poem::web::Data;
use poem_openapi::{
    param::{Path, Query},
    payload::Json,
    OpenApi, Tags,
};

use crate::{
    core::{
        catalog::{MANAGE_LEAVE_REQUESTS, VIEW_LEAVE_REQUESTS},
        error::HrError,
        review::review_leave_request,
        security::BearerAuthorization,
        submission::{submit_leave_request, NewLeaveRequest},
    },
    model::{leave_request::LeaveRequestFilter, review_status::ApprovalDecision},
    route::{authenticate, authorize, pagination, parse_date, parse_uuid, require_self_or},
    schema::{
        common::{PaginateResponse, ReviewRequest},
        leave_request::{
            LeaveRequestCreateRequest, LeaveRequestCreateResponses, LeaveRequestDetailResponses,
            LeaveRequestReviewResponses, PaginateLeaveRequestResponses,
        },
    },
    AppState,
};

#[derive(Tags)]
enum ApiLeaveRequestTags {
    LeaveRequest,
}

pub struct ApiLeaveRequest;

api_error_responses!(PaginateLeaveRequestResponses, "route.leave_request");
api_error_responses!(LeaveRequestDetailResponses, "route.leave_request");
api_error_responses!(LeaveRequestCreateResponses, "route.leave_request");
api_error_responses!(LeaveRequestReviewResponses, "route.leave_request");

fn leave_request_filter(
    status: Option<String>,
    employee_id: Option<String>,
) -> Result<LeaveRequestFilter, HrError> {
    Ok(LeaveRequestFilter {
        status: status.map(|x| x.parse()).transpose()?,
        employee_id: employee_id
            .map(|x| parse_uuid("employee_id", &x))
            .transpose()?,
    })
}

fn new_leave_request(json: &LeaveRequestCreateRequest) -> Result<NewLeaveRequest, HrError> {
    Ok(NewLeaveRequest {
        employee_id: parse_uuid("employee_id", &json.employee_id)?,
        leave_type: json.leave_type.clone(),
        start_date: parse_date("start_date", &json.start_date)?,
        end_date: parse_date("end_date", &json.end_date)?,
        days_requested: json.days_requested,
        reason: json.reason.clone(),
    })
}

#[OpenApi]
impl ApiLeaveRequest {
    /// Leave requests, newest first
    #[oai(
        path = "/leave-requests",
        method = "get",
        tag = "ApiLeaveRequestTags::LeaveRequest"
    )]
    async fn paginate_leave_request_api(
        &self,
        Query(page): Query<Option<u32>>,
        Query(page_size): Query<Option<u32>>,
        Query(status): Query<Option<String>>,
        Query(employee_id): Query<Option<String>>,
        state: Data<&Arc<AppState>>,
        auth: BearerAuthorization,
    ) -> PaginateLeaveRequestResponses {
        // Validate user token
        if let Err(denied) = authorize(&state, auth, VIEW_LEAVE_REQUESTS).await {
            return PaginateLeaveRequestResponses::denied("paginate_leave_request_api", denied);
        }
        let filter = match leave_request_filter(status, employee_id) {
            Ok(val) => val,
            Err(err) => {
                return PaginateLeaveRequestResponses::error(
                    "paginate_leave_request_api",
                    "parse filter",
                    err,
                )
            }
        };

        let (page, page_size) = match pagination(page, page_size) {
            Ok(val) => val,
            Err(err) => {
                return PaginateLeaveRequestResponses::error(
                    "paginate_leave_request_api",
                    "pagination",
                    err,
                )
            }
        };
        let (data, counts, page_count) = match state
            .store
            .paginate_leave_request(&filter, page, page_size)
            .await
        {
            Ok(val) => val,
            Err(err) => {
                return PaginateLeaveRequestResponses::error(
                    "paginate_leave_request_api",
                    "paginate_leave_request",
                    err,
                )
            }
        };
        PaginateLeaveRequestResponses::Ok(Json(PaginateResponse {
            counts,
            page,
            page_count,
            page_size,
            results: data.into_iter().map(|x| x.into()).collect(),
        }))
    }

    #[oai(
        path = "/leave-requests/:id",
        method = "get",
        tag = "ApiLeaveRequestTags::LeaveRequest"
    )]
    async fn detail_leave_request_api(
        &self,
        Path(id): Path<String>,
        state: Data<&Arc<AppState>>,
        auth: BearerAuthorization,
    ) -> LeaveRequestDetailResponses {
        // Validate user token
        if let Err(denied) = authorize(&state, auth, VIEW_LEAVE_REQUESTS).await {
            return LeaveRequestDetailResponses::denied("detail_leave_request_api", denied);
        }
        let id = match parse_uuid("id", &id) {
            Ok(val) => val,
            Err(err) => {
                return LeaveRequestDetailResponses::error(
                    "detail_leave_request_api",
                    "parse id",
                    err,
                )
            }
        };

        match state.store.get_leave_request_by_id(&id).await {
            Ok(Some(val)) => LeaveRequestDetailResponses::Ok(Json(val.into())),
            Ok(None) => LeaveRequestDetailResponses::error(
                "detail_leave_request_api",
                "get_leave_request_by_id",
                HrError::not_found("leave_request", id),
            ),
            Err(err) => LeaveRequestDetailResponses::error(
                "detail_leave_request_api",
                "get_leave_request_by_id",
                err,
            ),
        }
    }

    /// Submit a leave request for your own employee record, or for anyone
    /// with `manage_leave_requests`
    #[oai(
        path = "/leave-requests",
        method = "post",
        tag = "ApiLeaveRequestTags::LeaveRequest"
    )]
    async fn create_leave_request_api(
        &self,
        json: Json<LeaveRequestCreateRequest>,
        state: Data<&Arc<AppState>>,
        auth: BearerAuthorization,
    ) -> LeaveRequestCreateResponses {
        // Validate user token
        let user = match authenticate(&state, auth).await {
            Ok(val) => val,
            Err(denied) => {
                return LeaveRequestCreateResponses::denied("create_leave_request_api", denied)
            }
        };
        let input = match new_leave_request(&json) {
            Ok(val) => val,
            Err(err) => {
                return LeaveRequestCreateResponses::error(
                    "create_leave_request_api",
                    "parse request",
                    err,
                )
            }
        };
        if let Err(denied) =
            require_self_or(&state, &user, &input.employee_id, MANAGE_LEAVE_REQUESTS).await
        {
            return LeaveRequestCreateResponses::denied("create_leave_request_api", denied);
        }

        match submit_leave_request(state.store.as_ref(), input).await {
            Ok(val) => LeaveRequestCreateResponses::Ok(Json(val.into())),
            Err(err) => LeaveRequestCreateResponses::error(
                "create_leave_request_api",
                "submit_leave_request",
                err,
            ),
        }
    }

    /// Approve or reject a pending leave request
    #[oai(
        path = "/leave-requests/:id/review",
        method = "post",
        tag = "ApiLeaveRequestTags::LeaveRequest"
    )]
    async fn review_leave_request_api(
        &self,
        Path(id): Path<String>,
        json: Json<ReviewRequest>,
        state: Data<&Arc<AppState>>,
        auth: BearerAuthorization,
    ) -> LeaveRequestReviewResponses {
        // Validate user token
        let user = match authorize(&state, auth, MANAGE_LEAVE_REQUESTS).await {
            Ok(val) => val,
            Err(denied) => {
                return LeaveRequestReviewResponses::denied("review_leave_request_api", denied)
            }
        };
        let id = match parse_uuid("id", &id) {
            Ok(val) => val,
            Err(err) => {
                return LeaveRequestReviewResponses::error(
                    "review_leave_request_api",
                    "parse id",
                    err,
                )
            }
        };
        let decision: ApprovalDecision = match json.decision.parse() {
            Ok(val) => val,
            Err(err) => {
                return LeaveRequestReviewResponses::error(
                    "review_leave_request_api",
                    "parse decision",
                    err,
                )
            }
        };

        match review_leave_request(
            state.store.as_ref(),
            &id,
            decision,
            &user.id,
            json.notes.clone(),
        )
        .await
        {
            Ok(val) => LeaveRequestReviewResponses::Ok(Json(val.into())),
            Err(err) => LeaveRequestReviewResponses::error(
                "review_leave_request_api",
                "review_leave_request",
                err,
            ),
        }
    }
}
