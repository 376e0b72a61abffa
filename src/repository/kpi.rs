use sqlx::{Postgres, Transaction};
use uuid::Uuid;

use crate::{
    core::sqlx_utils::{binds_query_as, page_count, query_builder, SqlxBinds},
    model::kpi::{Kpi, TABLE_NAME},
};

pub async fn paginate_kpi(
    tx: &mut Transaction<'_, Postgres>,
    employee_id: Option<Uuid>,
    page: u32,
    page_size: u32,
) -> anyhow::Result<(Vec<Kpi>, u32, u32)> {
    let mut binds: Vec<SqlxBinds> = vec![];
    let mut filters: Vec<String> = vec![];

    if let Some(employee_id) = employee_id {
        binds.push(SqlxBinds::Uuid(employee_id));
        filters.push(format!("employee_id = ${}", binds.len()));
    }

    let page = page.max(1);
    let stmt = query_builder(
        None,
        TABLE_NAME,
        &filters,
        vec!["created_date DESC".to_string(), "id DESC".to_string()],
        Some(page_size),
        Some(page.saturating_sub(1).saturating_mul(page_size)),
    );
    let stmt_count = query_builder(
        Some("count(id)".to_string()),
        TABLE_NAME,
        &filters,
        vec![],
        None,
        None,
    );

    let q = binds_query_as::<Kpi>(&stmt, binds.clone());
    let q_count = binds_query_as::<(i64,)>(&stmt_count, binds);
    let data = q.fetch_all(&mut **tx).await?;
    let count = q_count.fetch_one(&mut **tx).await?;
    let counts = count.0 as u32;
    Ok((data, counts, page_count(counts, page_size)))
}

pub async fn create_kpi(tx: &mut Transaction<'_, Postgres>, kpi: &Kpi) -> anyhow::Result<()> {
    sqlx::query(
        format!(
            r#"
    INSERT INTO {} (id, employee_id, title, category, target_percentage,
    achieved_percentage, period, created_by, created_date)
    VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)"#,
            TABLE_NAME
        )
        .as_str(),
    )
    .bind(kpi.id)
    .bind(kpi.employee_id)
    .bind(&kpi.title)
    .bind(&kpi.category)
    .bind(kpi.target_percentage)
    .bind(kpi.achieved_percentage)
    .bind(&kpi.period)
    .bind(kpi.created_by)
    .bind(kpi.created_date)
    .execute(&mut **tx)
    .await?;
    Ok(())
}
