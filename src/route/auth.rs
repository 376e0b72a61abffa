use std::sync::Arc;

use chrono::{Duration, Local};
use poem::web::Data;
use poem_openapi::{payload::Json, OpenApi, Tags};
use tracing::info;

use crate::{
    core::{
        security::{
            generate_refresh_token_from_user, generate_token_from_user,
            get_user_from_refresh_token, verify_hash_password, BearerAuthorization,
        },
        utils::datetime_to_string,
    },
    route::authenticate,
    schema::{
        auth::{
            LoginRequest, LoginResponse, LoginResponses, MeResponse, MeResponses,
            RefreshTokenRequest, RefreshTokenResponse, RefreshTokenResponses,
        },
        common::{BadRequestResponse, InternalServerErrorResponse, UnauthorizedResponse},
    },
    AppState,
};

#[derive(Tags)]
enum ApiAuthTags {
    Auth,
}

pub struct ApiAuth;

api_error_responses!(MeResponses, "route.auth");

fn invalid_credentials() -> LoginResponses {
    LoginResponses::BadRequest(Json(BadRequestResponse {
        message: "Invalid credentials".to_string(),
    }))
}

#[OpenApi]
impl ApiAuth {
    #[oai(path = "/auth/login", method = "post", tag = "ApiAuthTags::Auth")]
    async fn auth_login(
        &self,
        json: Json<LoginRequest>,
        state: Data<&Arc<AppState>>,
    ) -> LoginResponses {
        // get username on store
        let user = match state.store.get_user_by_username(&json.user_name).await {
            Ok(val) => val,
            Err(err) => {
                return LoginResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.auth",
                        "auth_login",
                        "check user on store",
                        &err.to_string(),
                    ),
                ));
            }
        };
        let user = user.filter(|x| x.is_active.unwrap_or(false) && x.deleted_date.is_none());
        let Some(user) = user else {
            return invalid_credentials();
        };

        // validate user password
        let is_valid = match verify_hash_password(&json.password, &user.password) {
            Ok(val) => val,
            Err(err) => {
                return LoginResponses::InternalServerError(Json(InternalServerErrorResponse::new(
                    "route.auth",
                    "auth_login",
                    "validate user password",
                    &err.to_string(),
                )))
            }
        };
        if !is_valid {
            return invalid_credentials();
        }

        let config = &state.config;
        let token = match generate_token_from_user(&user, config) {
            Ok(val) => val,
            Err(err) => {
                return LoginResponses::InternalServerError(Json(InternalServerErrorResponse::new(
                    "route.auth",
                    "auth_login",
                    "generate token",
                    &err.to_string(),
                )))
            }
        };
        let refresh_token = match generate_refresh_token_from_user(&user, config) {
            Ok(val) => val,
            Err(err) => {
                return LoginResponses::InternalServerError(Json(InternalServerErrorResponse::new(
                    "route.auth",
                    "auth_login",
                    "generate refresh token",
                    &err.to_string(),
                )))
            }
        };
        info!("user {} logged in", user.user_name);

        let now = Local::now().fixed_offset();
        LoginResponses::Ok(Json(LoginResponse {
            exp: datetime_to_string(now + Duration::minutes(config.jwt_exp as i64)),
            exp_in: config.jwt_exp as i32 * 60,
            exp_refresh_token: datetime_to_string(
                now + Duration::minutes(config.jwt_refresh_exp as i64),
            ),
            refresh_token,
            token,
            token_type: "Bearer".to_string(),
        }))
    }

    #[oai(
        path = "/auth/refresh-token",
        method = "post",
        tag = "ApiAuthTags::Auth"
    )]
    async fn auth_refresh_token(
        &self,
        json: Json<RefreshTokenRequest>,
        state: Data<&Arc<AppState>>,
    ) -> RefreshTokenResponses {
        let config = &state.config;
        let refresh_token_user = match get_user_from_refresh_token(
            state.store.as_ref(),
            config,
            Some(json.refresh_token.clone()),
        )
        .await
        {
            Ok(val) => val,
            Err(err) => {
                return RefreshTokenResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.auth",
                        "auth_refresh_token",
                        "get user from refresh token",
                        &err.to_string(),
                    ),
                ))
            }
        };
        let Some(refresh_token_user) = refresh_token_user else {
            return RefreshTokenResponses::Unauthorized(Json(UnauthorizedResponse::default()));
        };

        let token = match generate_token_from_user(&refresh_token_user, config) {
            Ok(val) => val,
            Err(err) => {
                return RefreshTokenResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.auth",
                        "auth_refresh_token",
                        "generate token",
                        &err.to_string(),
                    ),
                ))
            }
        };

        let now = Local::now().fixed_offset();
        RefreshTokenResponses::Ok(Json(RefreshTokenResponse {
            exp: datetime_to_string(now + Duration::minutes(config.jwt_exp as i64)),
            exp_in: config.jwt_exp as i32 * 60,
            token,
            token_type: "Bearer".to_string(),
        }))
    }

    #[oai(path = "/auth/me", method = "get", tag = "ApiAuthTags::Auth")]
    async fn auth_me(
        &self,
        state: Data<&Arc<AppState>>,
        auth: BearerAuthorization,
    ) -> MeResponses {
        // Validate user token
        let user = match authenticate(&state, auth).await {
            Ok(val) => val,
            Err(denied) => return MeResponses::denied("auth_me", denied),
        };

        let permissions = match state
            .authorizer()
            .effective_permissions(state.store.as_ref(), user.role)
            .await
        {
            Ok(val) => val,
            Err(err) => return MeResponses::error("auth_me", "effective_permissions", err),
        };
        MeResponses::Ok(Json(MeResponse {
            id: user.id.to_string(),
            user_name: user.user_name,
            role: user.role.to_string(),
            employee_id: user.employee_id.map(|x| x.to_string()),
            permissions,
        }))
    }
}
