use std::{collections::HashSet, sync::Arc};

use poem::web::Data;
use poem_openapi::{param::Query, payload::Json, OpenApi, Tags};
use uuid::Uuid;

use crate::{
    core::{catalog::MANAGE_PERMISSIONS, security::BearerAuthorization},
    model::{permission::Permission, role::Role},
    route::{authorize, parse_uuid},
    schema::role_permission::{
        CreateRolePermissionResponses, DeleteRolePermissionResponses,
        RolePermissionCreateRequest, RolePermissionCreateResponse, RolePermissionMatrixResponses,
        RolePermissionResponses, RolePermissionsResponse,
    },
    AppState,
};

#[derive(Tags)]
enum ApiRolePermissionTags {
    RolePermission,
}

pub struct ApiRolePermission;

api_error_responses!(RolePermissionResponses, "route.role_permission");
api_error_responses!(RolePermissionMatrixResponses, "route.role_permission");
api_error_responses!(CreateRolePermissionResponses, "route.role_permission");
api_error_responses!(DeleteRolePermissionResponses, "route.role_permission");

fn role_permissions_response(
    role: Role,
    grants: &HashSet<Uuid>,
    catalog: &[Permission],
) -> RolePermissionsResponse {
    RolePermissionsResponse {
        role: role.to_string(),
        permissions: catalog
            .iter()
            .filter(|x| grants.contains(&x.id))
            .map(|x| x.clone().into())
            .collect(),
    }
}

#[OpenApi]
impl ApiRolePermission {
    /// Permissions granted to one role
    #[oai(
        path = "/role-permissions",
        method = "get",
        tag = "ApiRolePermissionTags::RolePermission"
    )]
    async fn get_role_permission_api(
        &self,
        Query(role): Query<String>,
        state: Data<&Arc<AppState>>,
        auth: BearerAuthorization,
    ) -> RolePermissionResponses {
        // Validate user token
        if let Err(denied) = authorize(&state, auth, MANAGE_PERMISSIONS).await {
            return RolePermissionResponses::denied("get_role_permission_api", denied);
        }
        let role: Role = match role.parse() {
            Ok(val) => val,
            Err(err) => {
                return RolePermissionResponses::error("get_role_permission_api", "parse role", err)
            }
        };

        let catalog = match state.store.list_permissions().await {
            Ok(val) => val,
            Err(err) => {
                return RolePermissionResponses::error(
                    "get_role_permission_api",
                    "list_permissions",
                    err,
                )
            }
        };
        let grants = if role.is_superuser() {
            catalog.iter().map(|x| x.id).collect()
        } else {
            match state.permission_matrix().get_grants(role).await {
                Ok(val) => val,
                Err(err) => {
                    return RolePermissionResponses::error(
                        "get_role_permission_api",
                        "get_grants",
                        err,
                    )
                }
            }
        };
        RolePermissionResponses::Ok(Json(role_permissions_response(role, &grants, &catalog)))
    }

    /// Grants of every role, admin holding the whole catalog
    #[oai(
        path = "/role-permissions/matrix",
        method = "get",
        tag = "ApiRolePermissionTags::RolePermission"
    )]
    async fn get_role_permission_matrix_api(
        &self,
        state: Data<&Arc<AppState>>,
        auth: BearerAuthorization,
    ) -> RolePermissionMatrixResponses {
        // Validate user token
        if let Err(denied) = authorize(&state, auth, MANAGE_PERMISSIONS).await {
            return RolePermissionMatrixResponses::denied("get_role_permission_matrix_api", denied);
        }

        let catalog = match state.store.list_permissions().await {
            Ok(val) => val,
            Err(err) => {
                return RolePermissionMatrixResponses::error(
                    "get_role_permission_matrix_api",
                    "list_permissions",
                    err,
                )
            }
        };
        let matrix = match state.permission_matrix().matrix().await {
            Ok(val) => val,
            Err(err) => {
                return RolePermissionMatrixResponses::error(
                    "get_role_permission_matrix_api",
                    "matrix",
                    err,
                )
            }
        };
        RolePermissionMatrixResponses::Ok(Json(
            matrix
                .iter()
                .map(|(role, grants)| role_permissions_response(*role, grants, &catalog))
                .collect(),
        ))
    }

    /// Grant a permission to a role; repeating a grant is not an error
    #[oai(
        path = "/role-permissions",
        method = "post",
        tag = "ApiRolePermissionTags::RolePermission"
    )]
    async fn create_role_permission_api(
        &self,
        json: Json<RolePermissionCreateRequest>,
        state: Data<&Arc<AppState>>,
        auth: BearerAuthorization,
    ) -> CreateRolePermissionResponses {
        // Validate user token
        let user = match authorize(&state, auth, MANAGE_PERMISSIONS).await {
            Ok(val) => val,
            Err(denied) => {
                return CreateRolePermissionResponses::denied("create_role_permission_api", denied)
            }
        };
        let role: Role = match json.role.parse() {
            Ok(val) => val,
            Err(err) => {
                return CreateRolePermissionResponses::error(
                    "create_role_permission_api",
                    "parse role",
                    err,
                )
            }
        };
        let permission_id = match parse_uuid("permission_id", &json.permission_id) {
            Ok(val) => val,
            Err(err) => {
                return CreateRolePermissionResponses::error(
                    "create_role_permission_api",
                    "parse permission_id",
                    err,
                )
            }
        };

        let created = match state
            .permission_matrix()
            .grant(role, &permission_id, Some(user.id))
            .await
        {
            Ok(val) => val,
            Err(err) => {
                return CreateRolePermissionResponses::error(
                    "create_role_permission_api",
                    "grant",
                    err,
                )
            }
        };
        let res = RolePermissionCreateResponse {
            role: role.to_string(),
            permission_id: permission_id.to_string(),
            created,
        };
        if created {
            CreateRolePermissionResponses::Created(Json(res))
        } else {
            CreateRolePermissionResponses::Ok(Json(res))
        }
    }

    /// Revoke a permission from a role; revoking an absent grant is not an error
    #[oai(
        path = "/role-permissions",
        method = "delete",
        tag = "ApiRolePermissionTags::RolePermission"
    )]
    async fn delete_role_permission_api(
        &self,
        Query(role): Query<String>,
        Query(permission_id): Query<String>,
        state: Data<&Arc<AppState>>,
        auth: BearerAuthorization,
    ) -> DeleteRolePermissionResponses {
        // Validate user token
        if let Err(denied) = authorize(&state, auth, MANAGE_PERMISSIONS).await {
            return DeleteRolePermissionResponses::denied("delete_role_permission_api", denied);
        }
        let role: Role = match role.parse() {
            Ok(val) => val,
            Err(err) => {
                return DeleteRolePermissionResponses::error(
                    "delete_role_permission_api",
                    "parse role",
                    err,
                )
            }
        };
        let permission_id = match parse_uuid("permission_id", &permission_id) {
            Ok(val) => val,
            Err(err) => {
                return DeleteRolePermissionResponses::error(
                    "delete_role_permission_api",
                    "parse permission_id",
                    err,
                )
            }
        };

        if let Err(err) = state
            .permission_matrix()
            .revoke(role, &permission_id)
            .await
        {
            return DeleteRolePermissionResponses::error("delete_role_permission_api", "revoke", err);
        }
        DeleteRolePermissionResponses::Ok
    }
}
