use poem::http::StatusCode;
use serde_json::json;

use crate::{
    core::catalog::{MANAGE_REWARDS, VIEW_REWARDS},
    model::role::Role,
    route::test_helpers::{bearer, grant, login_as, seed_employee, test_client},
};

#[tokio::test]
async fn test_create_then_review_reward_api() -> anyhow::Result<()> {
    // Given
    let (app_state, cli) = test_client().await?;
    let employee = seed_employee(&app_state).await?;
    let hr = login_as(&app_state, Role::Hr).await?;
    grant(&app_state, Role::Hr, VIEW_REWARDS).await?;
    grant(&app_state, Role::Hr, MANAGE_REWARDS).await?;

    // When
    let resp = cli
        .post("/api/rewards")
        .header("authorization", bearer(&hr))
        .body_json(&json!({
            "employee_id": employee.id.to_string(),
            "record_type": "reward",
            "category": "Employee of the month",
            "amount": 250.0,
            "award_date": "2025-03-31"
        }))
        .send()
        .await;

    // Expect
    resp.assert_status(StatusCode::CREATED);
    let json = resp.json().await;
    let body = json.value().object();
    body.get("status").assert_string("pending");
    body.get("awarded_by").assert_string(&hr.user.id.to_string());
    let id: String = body.get("id").deserialize();

    // When rejected
    let resp = cli
        .post(format!("/api/rewards/{}/review", id))
        .header("authorization", bearer(&hr))
        .body_json(&json!({"decision": "rejected", "notes": "budget"}))
        .send()
        .await;

    // Expect
    resp.assert_status_is_ok();
    resp.json()
        .await
        .value()
        .object()
        .get("status")
        .assert_string("rejected");

    // When filtered
    let resp = cli
        .get("/api/rewards?record_type=reward&status=rejected")
        .header("authorization", bearer(&hr))
        .send()
        .await;

    // Expect
    resp.assert_status_is_ok();
    resp.json()
        .await
        .value()
        .object()
        .get("counts")
        .assert_i64(1);
    Ok(())
}

#[tokio::test]
async fn test_create_reward_validation() -> anyhow::Result<()> {
    // Given
    let (app_state, cli) = test_client().await?;
    let employee = seed_employee(&app_state).await?;
    let admin = login_as(&app_state, Role::Admin).await?;

    // When negative amount
    let resp = cli
        .post("/api/rewards")
        .header("authorization", bearer(&admin))
        .body_json(&json!({
            "employee_id": employee.id.to_string(),
            "record_type": "punishment",
            "category": "Late",
            "amount": -10.0,
            "award_date": "2025-03-31"
        }))
        .send()
        .await;

    // Expect
    resp.assert_status(StatusCode::BAD_REQUEST);

    // When unknown employee
    let resp = cli
        .post("/api/rewards")
        .header("authorization", bearer(&admin))
        .body_json(&json!({
            "employee_id": uuid::Uuid::now_v7().to_string(),
            "record_type": "punishment",
            "category": "Late",
            "award_date": "2025-03-31"
        }))
        .send()
        .await;

    // Expect
    resp.assert_status(StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn test_reward_forbidden_without_grant() -> anyhow::Result<()> {
    // Given
    let (app_state, cli) = test_client().await?;
    let manager = login_as(&app_state, Role::Manager).await?;
    grant(&app_state, Role::Manager, VIEW_REWARDS).await?;

    // When listing
    let resp = cli
        .get("/api/rewards")
        .header("authorization", bearer(&manager))
        .send()
        .await;

    // Expect
    resp.assert_status_is_ok();

    // When creating
    let resp = cli
        .post("/api/rewards")
        .header("authorization", bearer(&manager))
        .body_json(&json!({
            "employee_id": uuid::Uuid::now_v7().to_string(),
            "record_type": "reward",
            "category": "Bonus",
            "award_date": "2025-03-31"
        }))
        .send()
        .await;

    // Expect
    resp.assert_status(StatusCode::FORBIDDEN);
    Ok(())
}
