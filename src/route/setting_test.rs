use poem::http::StatusCode;
use serde_json::json;

use crate::{
    core::catalog::MANAGE_SETTINGS,
    model::role::Role,
    route::test_helpers::{bearer, grant, login_as, test_client},
};

#[tokio::test]
async fn test_get_then_update_setting_api() -> anyhow::Result<()> {
    // Given
    let (app_state, cli) = test_client().await?;
    let hr = login_as(&app_state, Role::Hr).await?;
    grant(&app_state, Role::Hr, MANAGE_SETTINGS).await?;

    // When nothing saved yet
    let resp = cli
        .get("/api/settings/leave_policy")
        .header("authorization", bearer(&hr))
        .send()
        .await;

    // Expect defaults
    resp.assert_status_is_ok();
    let json = resp.json().await;
    let body = json.value().object();
    body.get("is_default").assert_bool(true);
    body.get("values")
        .object()
        .get("annual_leave_days")
        .assert_i64(12);

    // When update
    let resp = cli
        .put("/api/settings")
        .header("authorization", bearer(&hr))
        .body_json(&json!({
            "category": "leave_policy",
            "values": {
                "annual_leave_days": 20,
                "sick_leave_days": 10,
                "carry_over_days": 3
            }
        }))
        .send()
        .await;

    // Expect
    resp.assert_status_is_ok();
    let json = resp.json().await;
    let body = json.value().object();
    body.get("is_default").assert_bool(false);
    body.get("updated_by").assert_string(&hr.user.id.to_string());

    // Expect saved values on read
    let resp = cli
        .get("/api/settings/leave_policy")
        .header("authorization", bearer(&hr))
        .send()
        .await;
    resp.assert_status_is_ok();
    let json = resp.json().await;
    let body = json.value().object();
    body.get("is_default").assert_bool(false);
    body.get("values")
        .object()
        .get("annual_leave_days")
        .assert_i64(20);
    Ok(())
}

#[tokio::test]
async fn test_update_setting_rejects_bad_payload() -> anyhow::Result<()> {
    // Given
    let (app_state, cli) = test_client().await?;
    let admin = login_as(&app_state, Role::Admin).await?;

    // When unknown key
    let resp = cli
        .put("/api/settings")
        .header("authorization", bearer(&admin))
        .body_json(&json!({
            "category": "security",
            "values": {
                "session_timeout_minutes": 30,
                "password_min_length": 12,
                "require_two_factor": true,
                "allow_everything": true
            }
        }))
        .send()
        .await;

    // Expect
    resp.assert_status(StatusCode::BAD_REQUEST);

    // When unknown category
    let resp = cli
        .get("/api/settings/appearance")
        .header("authorization", bearer(&admin))
        .send()
        .await;

    // Expect
    resp.assert_status(StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn test_setting_forbidden_without_grant() -> anyhow::Result<()> {
    // Given
    let (app_state, cli) = test_client().await?;
    let manager = login_as(&app_state, Role::Manager).await?;

    // When
    let resp = cli
        .get("/api/settings/general")
        .header("authorization", bearer(&manager))
        .send()
        .await;

    // Expect
    resp.assert_status(StatusCode::FORBIDDEN);
    Ok(())
}
