use chrono::Local;
use tracing::info;
use uuid::Uuid;

use crate::{
    core::error::HrResult,
    model::setting::{Setting, SettingCategory, SettingsPayload},
    store::HrStore,
};

/// Stored settings of `category`, or its defaults. The flag is `true` for defaults.
pub async fn get_setting(
    store: &dyn HrStore,
    category: SettingCategory,
) -> HrResult<(Setting, bool)> {
    match store.get_setting(category).await? {
        Some(val) => Ok((val, false)),
        None => Ok((
            Setting {
                payload: SettingsPayload::default_for(category),
                updated_by: None,
                updated_date: None,
            },
            true,
        )),
    }
}

pub async fn update_setting(
    store: &dyn HrStore,
    payload: SettingsPayload,
    updated_by: Option<Uuid>,
) -> HrResult<Setting> {
    payload.validate()?;
    let setting = Setting {
        payload,
        updated_by,
        updated_date: Some(Local::now().fixed_offset()),
    };
    store.upsert_setting(&setting).await?;
    info!("settings {} updated", setting.category());
    Ok(setting)
}
