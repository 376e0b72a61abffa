use std::sync::Arc;

use poem::web::Data;
use poem_openapi::{param::Query, payload::Json, OpenApi, Tags};

use crate::{
    core::{
        catalog::{MANAGE_KPIS, VIEW_KPIS},
        error::HrError,
        security::BearerAuthorization,
        submission::{create_kpi, NewKpi},
    },
    route::{authorize, pagination, parse_uuid},
    schema::{
        common::PaginateResponse,
        kpi::{KpiCreateRequest, KpiCreateResponses, PaginateKpiResponses},
    },
    AppState,
};

#[derive(Tags)]
enum ApiKpiTags {
    Kpi,
}

pub struct ApiKpi;

api_error_responses!(PaginateKpiResponses, "route.kpi");
api_error_responses!(KpiCreateResponses, "route.kpi");

fn new_kpi(json: &KpiCreateRequest) -> Result<NewKpi, HrError> {
    Ok(NewKpi {
        employee_id: parse_uuid("employee_id", &json.employee_id)?,
        title: json.title.clone(),
        category: json.category.clone(),
        target_percentage: json.target_percentage,
        achieved_percentage: json.achieved_percentage,
        period: json.period.clone(),
    })
}

#[OpenApi]
impl ApiKpi {
    #[oai(path = "/kpis", method = "get", tag = "ApiKpiTags::Kpi")]
    async fn paginate_kpi_api(
        &self,
        Query(page): Query<Option<u32>>,
        Query(page_size): Query<Option<u32>>,
        Query(employee_id): Query<Option<String>>,
        state: Data<&Arc<AppState>>,
        auth: BearerAuthorization,
    ) -> PaginateKpiResponses {
        // Validate user token
        if let Err(denied) = authorize(&state, auth, VIEW_KPIS).await {
            return PaginateKpiResponses::denied("paginate_kpi_api", denied);
        }
        let employee_id = match employee_id
            .map(|x| parse_uuid("employee_id", &x))
            .transpose()
        {
            Ok(val) => val,
            Err(err) => {
                return PaginateKpiResponses::error("paginate_kpi_api", "parse employee_id", err)
            }
        };

        let (page, page_size) = match pagination(page, page_size) {
            Ok(val) => val,
            Err(err) => {
                return PaginateKpiResponses::error("paginate_kpi_api", "pagination", err)
            }
        };
        let (data, counts, page_count) = match state
            .store
            .paginate_kpi(employee_id, page, page_size)
            .await
        {
            Ok(val) => val,
            Err(err) => return PaginateKpiResponses::error("paginate_kpi_api", "paginate_kpi", err),
        };
        PaginateKpiResponses::Ok(Json(PaginateResponse {
            counts,
            page,
            page_count,
            page_size,
            results: data.into_iter().map(|x| x.into()).collect(),
        }))
    }

    #[oai(path = "/kpis", method = "post", tag = "ApiKpiTags::Kpi")]
    async fn create_kpi_api(
        &self,
        json: Json<KpiCreateRequest>,
        state: Data<&Arc<AppState>>,
        auth: BearerAuthorization,
    ) -> KpiCreateResponses {
        // Validate user token
        let user = match authorize(&state, auth, MANAGE_KPIS).await {
            Ok(val) => val,
            Err(denied) => return KpiCreateResponses::denied("create_kpi_api", denied),
        };
        let input = match new_kpi(&json) {
            Ok(val) => val,
            Err(err) => return KpiCreateResponses::error("create_kpi_api", "parse request", err),
        };

        match create_kpi(state.store.as_ref(), input, Some(user.id)).await {
            Ok(val) => KpiCreateResponses::Ok(Json(val.into())),
            Err(err) => KpiCreateResponses::error("create_kpi_api", "create_kpi", err),
        }
    }
}
