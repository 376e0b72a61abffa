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
        catalog::{MANAGE_EMPLOYEES, VIEW_EMPLOYEES},
        error::HrError,
        security::BearerAuthorization,
        submission::{create_employee, NewEmployee},
    },
    route::{authorize, pagination, parse_date, parse_uuid},
    schema::{
        common::PaginateResponse,
        employee::{
            EmployeeCreateRequest, EmployeeCreateResponses, EmployeeDetail,
            EmployeeDetailResponses, PaginateEmployeeResponses,
        },
    },
    AppState,
};

#[derive(Tags)]
enum ApiEmployeeTags {
    Employee,
}

pub struct ApiEmployee;

api_error_responses!(PaginateEmployeeResponses, "route.employee");
api_error_responses!(EmployeeDetailResponses, "route.employee");
api_error_responses!(EmployeeCreateResponses, "route.employee");

#[OpenApi]
impl ApiEmployee {
    #[oai(path = "/employees", method = "get", tag = "ApiEmployeeTags::Employee")]
    async fn paginate_employee_api(
        &self,
        Query(page): Query<Option<u32>>,
        Query(page_size): Query<Option<u32>>,
        Query(search): Query<Option<String>>,
        state: Data<&Arc<AppState>>,
        auth: BearerAuthorization,
    ) -> PaginateEmployeeResponses {
        // Validate user token
        if let Err(denied) = authorize(&state, auth, VIEW_EMPLOYEES).await {
            return PaginateEmployeeResponses::denied("paginate_employee_api", denied);
        }

        let (page, page_size) = match pagination(page, page_size) {
            Ok(val) => val,
            Err(err) => {
                return PaginateEmployeeResponses::error("paginate_employee_api", "pagination", err)
            }
        };
        let (data, counts, page_count) = match state
            .store
            .paginate_employee(page, page_size, search)
            .await
        {
            Ok(val) => val,
            Err(err) => {
                return PaginateEmployeeResponses::error(
                    "paginate_employee_api",
                    "paginate_employee",
                    err,
                )
            }
        };
        let today = Local::now().date_naive();
        PaginateEmployeeResponses::Ok(Json(PaginateResponse {
            counts,
            page,
            page_count,
            page_size,
            results: data
                .into_iter()
                .map(|x| EmployeeDetail::new(x, today))
                .collect(),
        }))
    }

    #[oai(path = "/employees/:id", method = "get", tag = "ApiEmployeeTags::Employee")]
    async fn detail_employee_api(
        &self,
        Path(id): Path<String>,
        state: Data<&Arc<AppState>>,
        auth: BearerAuthorization,
    ) -> EmployeeDetailResponses {
        // Validate user token
        if let Err(denied) = authorize(&state, auth, VIEW_EMPLOYEES).await {
            return EmployeeDetailResponses::denied("detail_employee_api", denied);
        }
        let id = match parse_uuid("id", &id) {
            Ok(val) => val,
            Err(err) => return EmployeeDetailResponses::error("detail_employee_api", "parse id", err),
        };

        let employee = match state.store.get_employee_by_id(&id).await {
            Ok(val) => val,
            Err(err) => {
                return EmployeeDetailResponses::error(
                    "detail_employee_api",
                    "get_employee_by_id",
                    err,
                )
            }
        };
        match employee {
            Some(val) => EmployeeDetailResponses::Ok(Json(EmployeeDetail::new(
                val,
                Local::now().date_naive(),
            ))),
            None => EmployeeDetailResponses::error(
                "detail_employee_api",
                "get_employee_by_id",
                HrError::not_found("employee", id),
            ),
        }
    }

    #[oai(path = "/employees", method = "post", tag = "ApiEmployeeTags::Employee")]
    async fn create_employee_api(
        &self,
        json: Json<EmployeeCreateRequest>,
        state: Data<&Arc<AppState>>,
        auth: BearerAuthorization,
    ) -> EmployeeCreateResponses {
        // Validate user token
        if let Err(denied) = authorize(&state, auth, MANAGE_EMPLOYEES).await {
            return EmployeeCreateResponses::denied("create_employee_api", denied);
        }
        let start_date = match parse_date("start_date", &json.start_date) {
            Ok(val) => val,
            Err(err) => {
                return EmployeeCreateResponses::error("create_employee_api", "parse start_date", err)
            }
        };

        let input = NewEmployee {
            full_name: json.full_name.clone(),
            email: json.email.clone(),
            department: json.department.clone(),
            position: json.position.clone(),
            start_date,
        };
        match create_employee(state.store.as_ref(), input).await {
            Ok(val) => EmployeeCreateResponses::Ok(Json(EmployeeDetail::new(
                val,
                Local::now().date_naive(),
            ))),
            Err(err) => EmployeeCreateResponses::error("create_employee_api", "create_employee", err),
        }
    }
}
