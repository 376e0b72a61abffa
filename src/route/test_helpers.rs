use std::sync::Arc;

use poem::{
    middleware::{AddDataEndpoint, CorsEndpoint},
    test::TestClient,
    Route,
};
use chrono::Local;
use uuid::Uuid;

use crate::{
    core::{
        security::{generate_refresh_token_from_user, generate_token_from_user, hash_password},
        test_utils::{generate_test_user, test_app_state, TestUser},
    },
    factory::employee::EmployeeFactory,
    init_openapi_route,
    model::{employee::Employee, role::Role, user::User},
    AppState,
};

pub type AppClient = TestClient<CorsEndpoint<AddDataEndpoint<Route, Arc<AppState>>>>;

/// Fresh app over the memory store, catalog seeded and no grants.
pub async fn test_client() -> anyhow::Result<(Arc<AppState>, AppClient)> {
    let app_state = test_app_state().await?;
    let app = init_openapi_route(app_state.clone());
    Ok((app_state, TestClient::new(app)))
}

pub async fn grant(app_state: &AppState, role: Role, permission_name: &str) -> anyhow::Result<()> {
    let permission = app_state
        .store
        .get_permission_by_name(permission_name)
        .await?
        .ok_or_else(|| anyhow::anyhow!("permission {} is not seeded", permission_name))?;
    app_state
        .permission_matrix()
        .grant(role, &permission.id, None)
        .await?;
    Ok(())
}

pub async fn login_as(app_state: &AppState, role: Role) -> anyhow::Result<TestUser> {
    let username = format!("{}_{}", role, Uuid::now_v7().simple());
    generate_test_user(
        app_state.store.as_ref(),
        &app_state.config,
        &username,
        "password",
        role,
    )
    .await
}

/// Logs in an employee-role user whose account is linked to `employee_id`.
pub async fn login_as_employee(
    app_state: &AppState,
    employee_id: Uuid,
) -> anyhow::Result<TestUser> {
    let now = Local::now().fixed_offset();
    let user = User {
        id: Uuid::now_v7(),
        user_name: format!("employee_{}", employee_id.simple()),
        password: hash_password("password").map_err(|err| anyhow::anyhow!(err))?,
        role: Role::Employee,
        employee_id: Some(employee_id),
        is_active: Some(true),
        created_date: Some(now),
        updated_date: Some(now),
        deleted_date: None,
    };
    app_state.store.create_user(&user).await?;
    let token = generate_token_from_user(&user, &app_state.config)?;
    let refresh_token = generate_refresh_token_from_user(&user, &app_state.config)?;
    Ok(TestUser {
        user,
        token,
        refresh_token,
    })
}

pub async fn seed_employee(app_state: &AppState) -> anyhow::Result<Employee> {
    let mut factory = EmployeeFactory::<()>::new();
    factory.generate_one(app_state.store.as_ref(), ()).await
}

pub fn bearer(test_user: &TestUser) -> String {
    format!("Bearer {}", test_user.token)
}
