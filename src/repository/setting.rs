use sqlx::{Postgres, Transaction};

use crate::model::setting::{Setting, SettingCategory, SettingRow, TABLE_NAME};

pub async fn get_setting(
    tx: &mut Transaction<'_, Postgres>,
    category: SettingCategory,
) -> anyhow::Result<Option<Setting>> {
    let row: Option<SettingRow> =
        sqlx::query_as(format!("SELECT * FROM {} WHERE category = $1", TABLE_NAME).as_str())
            .bind(category)
            .fetch_optional(&mut **tx)
            .await?;
    row.map(Setting::try_from).transpose()
}

pub async fn upsert_setting(
    tx: &mut Transaction<'_, Postgres>,
    setting: &Setting,
) -> anyhow::Result<()> {
    let payload = serde_json::to_string(&setting.payload)?;
    sqlx::query(
        format!(
            r#"
    INSERT INTO {} (category, payload, updated_by, updated_date)
    VALUES ($1, $2, $3, $4)
    ON CONFLICT (category) DO UPDATE
    SET payload = EXCLUDED.payload, updated_by = EXCLUDED.updated_by,
    updated_date = EXCLUDED.updated_date"#,
            TABLE_NAME
        )
        .as_str(),
    )
    .bind(setting.category())
    .bind(payload)
    .bind(setting.updated_by)
    .bind(setting.updated_date)
    .execute(&mut **tx)
    .await?;
    Ok(())
}
