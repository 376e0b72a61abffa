use std::sync::Arc;

use poem::{
    middleware::{AddData, AddDataEndpoint, Cors, CorsEndpoint},
    EndpointExt, Route,
};
use poem_openapi::OpenApiService;
use route::{
    auth::ApiAuth, employee::ApiEmployee, kpi::ApiKpi, leave_request::ApiLeaveRequest,
    permission::ApiPermission, resignation_request::ApiResignationRequest, reward::ApiReward,
    role_permission::ApiRolePermission, setting::ApiSetting,
};
use settings::Config;

use crate::{
    core::{authorization::Authorizer, cache::GrantCache, permission_matrix::PermissionMatrix},
    store::HrStore,
};

pub mod cli;
pub mod core;
#[cfg(test)]
pub mod factory;
pub mod model;
pub mod repository;
pub mod route;
pub mod schema;
pub mod settings;
pub mod store;

pub struct AppState {
    pub store: Arc<dyn HrStore>,
    pub grant_cache: Arc<dyn GrantCache>,
    pub config: Config,
}

impl AppState {
    pub fn permission_matrix(&self) -> PermissionMatrix {
        PermissionMatrix::new(self.store.clone(), self.grant_cache.clone())
    }

    pub fn authorizer(&self) -> Authorizer {
        Authorizer::new(self.permission_matrix())
    }
}

pub fn init_openapi_route(
    app_state: Arc<AppState>,
) -> CorsEndpoint<AddDataEndpoint<Route, Arc<AppState>>> {
    let prefix = app_state
        .config
        .prefix
        .clone()
        .unwrap_or("/".to_string());
    let openapi_route = OpenApiService::new(
        (
            ApiAuth,
            ApiPermission,
            ApiRolePermission,
            ApiEmployee,
            ApiLeaveRequest,
            ApiResignationRequest,
            ApiReward,
            ApiKpi,
            ApiSetting,
        ),
        "HR Core",
        "1.0",
    )
    .server(prefix.clone());
    let openapi_json_endpoint = openapi_route.spec_endpoint();
    let ui = openapi_route.swagger_ui();
    Route::new()
        .nest(prefix, openapi_route)
        .nest("/docs", ui)
        .at("openapi.json", openapi_json_endpoint)
        .with(AddData::new(app_state))
        .with(Cors::new())
}
