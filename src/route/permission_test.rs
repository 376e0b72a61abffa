use poem::http::StatusCode;
use serde_json::Value;

use crate::{
    core::catalog::{DEFAULT_PERMISSIONS, MANAGE_PERMISSIONS},
    model::role::Role,
    route::test_helpers::{bearer, grant, login_as, test_client},
};

#[tokio::test]
async fn test_get_all_permission_api() -> anyhow::Result<()> {
    // Given
    let (app_state, cli) = test_client().await?;
    let test_user = login_as(&app_state, Role::Admin).await?;

    // When
    let resp = cli
        .get("/api/permissions")
        .header("authorization", bearer(&test_user))
        .send()
        .await;

    // Expect
    resp.assert_status_is_ok();
    let json = resp.json().await;
    let groups: Vec<Value> = json.value().deserialize();
    assert_eq!(groups.len(), 6);
    let total: usize = groups
        .iter()
        .map(|x| x["permissions"].as_array().map_or(0, |x| x.len()))
        .sum();
    assert_eq!(total, DEFAULT_PERMISSIONS.len());
    assert_eq!(groups[0]["category"], "Employee Management");
    Ok(())
}

#[tokio::test]
async fn test_get_all_permission_api_forbidden() -> anyhow::Result<()> {
    // Given
    let (app_state, cli) = test_client().await?;
    let test_user = login_as(&app_state, Role::Hr).await?;

    // When hr has no grant
    let resp = cli
        .get("/api/permissions")
        .header("authorization", bearer(&test_user))
        .send()
        .await;

    // Expect
    resp.assert_status(StatusCode::FORBIDDEN);

    // When hr gets the grant
    grant(&app_state, Role::Hr, MANAGE_PERMISSIONS).await?;
    let resp = cli
        .get("/api/permissions")
        .header("authorization", bearer(&test_user))
        .send()
        .await;

    // Expect
    resp.assert_status_is_ok();
    Ok(())
}
