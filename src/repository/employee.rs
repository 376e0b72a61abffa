use sqlx::{Postgres, Transaction};
use uuid::Uuid;

use crate::{
    core::sqlx_utils::{binds_query_as, page_count, query_builder, SqlxBinds},
    model::employee::{Employee, TABLE_NAME},
};

pub async fn paginate_employee(
    tx: &mut Transaction<'_, Postgres>,
    page: u32,
    page_size: u32,
    search: Option<String>,
) -> anyhow::Result<(Vec<Employee>, u32, u32)> {
    let mut binds: Vec<SqlxBinds> = vec![];
    let mut filters: Vec<String> = vec![];

    if let Some(search) = search {
        binds.push(SqlxBinds::String(format!("%{}%", search)));
        filters.push(format!("full_name ILIKE ${}", binds.len()));
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

    let q = binds_query_as::<Employee>(&stmt, binds.clone());
    let q_count = binds_query_as::<(i64,)>(&stmt_count, binds);
    let data = q.fetch_all(&mut **tx).await?;
    let count = q_count.fetch_one(&mut **tx).await?;
    let counts = count.0 as u32;
    Ok((data, counts, page_count(counts, page_size)))
}

pub async fn get_employee_by_id(
    tx: &mut Transaction<'_, Postgres>,
    id: &Uuid,
) -> anyhow::Result<Option<Employee>> {
    Ok(
        sqlx::query_as(format!("SELECT * FROM {} WHERE id = $1", TABLE_NAME).as_str())
            .bind(id)
            .fetch_optional(&mut **tx)
            .await?,
    )
}

pub async fn create_employee(
    tx: &mut Transaction<'_, Postgres>,
    employee: &Employee,
) -> anyhow::Result<()> {
    sqlx::query(
        format!(
            r#"
    INSERT INTO {} (id, full_name, email, department, position, start_date,
    created_date, updated_date)
    VALUES ($1, $2, $3, $4, $5, $6, $7, $8)"#,
            TABLE_NAME
        )
        .as_str(),
    )
    .bind(employee.id)
    .bind(&employee.full_name)
    .bind(&employee.email)
    .bind(&employee.department)
    .bind(&employee.position)
    .bind(employee.start_date)
    .bind(employee.created_date)
    .bind(employee.updated_date)
    .execute(&mut **tx)
    .await?;
    Ok(())
}
