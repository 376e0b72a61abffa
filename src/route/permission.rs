use std::sync::Arc;

use poem::web::Data;
use poem_openapi::{payload::Json, OpenApi, Tags};

use crate::{
    core::{
        catalog::{list_permissions_grouped, MANAGE_PERMISSIONS},
        security::BearerAuthorization,
    },
    route::authorize,
    schema::permission::{AllPermissionResponses, PermissionGroupResponse},
    AppState,
};

#[derive(Tags)]
enum ApiPermissionTags {
    Permission,
}

pub struct ApiPermission;

api_error_responses!(AllPermissionResponses, "route.permission");

#[OpenApi]
impl ApiPermission {
    /// Permission catalog grouped by category
    #[oai(
        path = "/permissions",
        method = "get",
        tag = "ApiPermissionTags::Permission"
    )]
    async fn get_all_permission_api(
        &self,
        state: Data<&Arc<AppState>>,
        auth: BearerAuthorization,
    ) -> AllPermissionResponses {
        // Validate user token
        if let Err(denied) = authorize(&state, auth, MANAGE_PERMISSIONS).await {
            return AllPermissionResponses::denied("get_all_permission_api", denied);
        }

        let groups = match list_permissions_grouped(state.store.as_ref()).await {
            Ok(val) => val,
            Err(err) => {
                return AllPermissionResponses::error(
                    "get_all_permission_api",
                    "list_permissions_grouped",
                    err,
                )
            }
        };
        AllPermissionResponses::Ok(Json(
            groups
                .into_iter()
                .map(|x| PermissionGroupResponse {
                    category: x.category,
                    permissions: x.permissions.into_iter().map(|x| x.into()).collect(),
                })
                .collect(),
        ))
    }
}
