use poem::http::StatusCode;
use serde_json::json;

use crate::{
    core::catalog::{MANAGE_EMPLOYEES, VIEW_EMPLOYEES},
    model::role::Role,
    route::test_helpers::{bearer, grant, login_as, seed_employee, test_client},
};

#[tokio::test]
async fn test_create_then_detail_employee_api() -> anyhow::Result<()> {
    // Given
    let (app_state, cli) = test_client().await?;
    let hr = login_as(&app_state, Role::Hr).await?;
    grant(&app_state, Role::Hr, VIEW_EMPLOYEES).await?;
    grant(&app_state, Role::Hr, MANAGE_EMPLOYEES).await?;

    // When create
    let resp = cli
        .post("/api/employees")
        .header("authorization", bearer(&hr))
        .body_json(&json!({
            "full_name": " Jane Doe ",
            "email": "jane@example.com",
            "department": "Finance",
            "position": "",
            "start_date": "2020-06-15"
        }))
        .send()
        .await;

    // Expect
    resp.assert_status(StatusCode::CREATED);
    let json = resp.json().await;
    let employee = json.value().object();
    employee.get("full_name").assert_string("Jane Doe");
    employee.get("position").assert_null();
    let id: String = employee.get("id").deserialize();

    // When detail
    let resp = cli
        .get(format!("/api/employees/{}", id))
        .header("authorization", bearer(&hr))
        .send()
        .await;

    // Expect
    resp.assert_status_is_ok();
    let json = resp.json().await;
    json.value()
        .object()
        .get("start_date")
        .assert_string("2020-06-15");
    Ok(())
}

#[tokio::test]
async fn test_create_employee_validation() -> anyhow::Result<()> {
    // Given
    let (app_state, cli) = test_client().await?;
    let admin = login_as(&app_state, Role::Admin).await?;

    // When bad email
    let resp = cli
        .post("/api/employees")
        .header("authorization", bearer(&admin))
        .body_json(&json!({
            "full_name": "Jane Doe",
            "email": "jane",
            "start_date": "2020-06-15"
        }))
        .send()
        .await;

    // Expect
    resp.assert_status(StatusCode::BAD_REQUEST);

    // When bad date
    let resp = cli
        .post("/api/employees")
        .header("authorization", bearer(&admin))
        .body_json(&json!({
            "full_name": "Jane Doe",
            "email": "jane@example.com",
            "start_date": "15/06/2020"
        }))
        .send()
        .await;

    // Expect
    resp.assert_status(StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn test_paginate_employee_api() -> anyhow::Result<()> {
    // Given
    let (app_state, cli) = test_client().await?;
    let manager = login_as(&app_state, Role::Manager).await?;
    for _ in 0..3 {
        seed_employee(&app_state).await?;
    }

    // When without grant
    let resp = cli
        .get("/api/employees")
        .header("authorization", bearer(&manager))
        .send()
        .await;

    // Expect
    resp.assert_status(StatusCode::FORBIDDEN);

    // When with grant
    grant(&app_state, Role::Manager, VIEW_EMPLOYEES).await?;
    let resp = cli
        .get("/api/employees?page=1&page_size=2")
        .header("authorization", bearer(&manager))
        .send()
        .await;

    // Expect
    resp.assert_status_is_ok();
    let json = resp.json().await;
    let body = json.value().object();
    body.get("counts").assert_i64(3);
    body.get("page_count").assert_i64(2);
    body.get("results").array().assert_len(2);
    Ok(())
}

#[tokio::test]
async fn test_detail_employee_not_found() -> anyhow::Result<()> {
    // Given
    let (app_state, cli) = test_client().await?;
    let admin = login_as(&app_state, Role::Admin).await?;

    // When unknown id
    let resp = cli
        .get(format!("/api/employees/{}", uuid::Uuid::now_v7()))
        .header("authorization", bearer(&admin))
        .send()
        .await;

    // Expect
    resp.assert_status(StatusCode::NOT_FOUND);

    // When malformed id
    let resp = cli
        .get("/api/employees/not-a-uuid")
        .header("authorization", bearer(&admin))
        .send()
        .await;

    // Expect
    resp.assert_status(StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn test_paginate_employee_rejects_bad_pages() -> anyhow::Result<()> {
    // Given
    let (app_state, cli) = test_client().await?;
    let admin = login_as(&app_state, Role::Admin).await?;
    seed_employee(&app_state).await?;

    for query in [
        "page=3000000000",
        "page=0",
        "page_size=0",
        "page_size=101",
        "page=4294967295&page_size=100",
    ] {
        // When
        let resp = cli
            .get(format!("/api/employees?{}", query))
            .header("authorization", bearer(&admin))
            .send()
            .await;

        // Expect
        resp.assert_status(StatusCode::BAD_REQUEST);
    }

    // When last representable page
    let resp = cli
        .get("/api/employees?page=4294967295&page_size=1")
        .header("authorization", bearer(&admin))
        .send()
        .await;

    // Expect empty page
    resp.assert_status_is_ok();
    let json = resp.json().await;
    let body = json.value().object();
    body.get("counts").assert_i64(1);
    body.get("results").array().assert_len(0);
    Ok(())
}
