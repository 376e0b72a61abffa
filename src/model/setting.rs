use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use uuid::Uuid;

use crate::{
    core::error::{HrError, HrResult},
    text_enum,
};

pub const TABLE_NAME: &str = "public.setting";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettingCategory {
    General,
    Notifications,
    LeavePolicy,
    Security,
}

text_enum!(SettingCategory, "setting category" {
    General => "general",
    Notifications => "notifications",
    LeavePolicy => "leave_policy",
    Security => "security",
});

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeneralSettings {
    pub company_name: String,
    pub timezone: String,
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NotificationSettings {
    pub email_enabled: bool,
    pub leave_request_alerts: bool,
    pub resignation_alerts: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LeavePolicySettings {
    pub annual_leave_days: u16,
    pub sick_leave_days: u16,
    pub carry_over_days: u16,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SecuritySettings {
    pub session_timeout_minutes: u16,
    pub password_min_length: u16,
    pub require_two_factor: bool,
}

/// Settings payload, one schema per category.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "category", content = "values", rename_all = "snake_case")]
pub enum SettingsPayload {
    General(GeneralSettings),
    Notifications(NotificationSettings),
    LeavePolicy(LeavePolicySettings),
    Security(SecuritySettings),
}

impl SettingsPayload {
    pub fn category(&self) -> SettingCategory {
        match self {
            SettingsPayload::General(_) => SettingCategory::General,
            SettingsPayload::Notifications(_) => SettingCategory::Notifications,
            SettingsPayload::LeavePolicy(_) => SettingCategory::LeavePolicy,
            SettingsPayload::Security(_) => SettingCategory::Security,
        }
    }

    pub fn default_for(category: SettingCategory) -> Self {
        match category {
            SettingCategory::General => SettingsPayload::General(GeneralSettings {
                company_name: "Company".to_string(),
                timezone: "UTC".to_string(),
                date_format: default_date_format(),
            }),
            SettingCategory::Notifications => {
                SettingsPayload::Notifications(NotificationSettings {
                    email_enabled: true,
                    leave_request_alerts: true,
                    resignation_alerts: true,
                })
            }
            SettingCategory::LeavePolicy => SettingsPayload::LeavePolicy(LeavePolicySettings {
                annual_leave_days: 12,
                sick_leave_days: 12,
                carry_over_days: 5,
            }),
            SettingCategory::Security => SettingsPayload::Security(SecuritySettings {
                session_timeout_minutes: 60,
                password_min_length: 8,
                require_two_factor: false,
            }),
        }
    }

    /// Decodes an untrusted JSON document into a typed payload.
    pub fn decode(value: serde_json::Value) -> HrResult<Self> {
        let payload: SettingsPayload = serde_json::from_value(value)
            .map_err(|err| HrError::validation(format!("invalid settings payload: {}", err)))?;
        payload.validate()?;
        Ok(payload)
    }

    pub fn validate(&self) -> HrResult<()> {
        match self {
            SettingsPayload::General(val) => {
                if val.company_name.trim().is_empty() {
                    return Err(HrError::validation("company_name must not be empty"));
                }
                if val.timezone.trim().is_empty() {
                    return Err(HrError::validation("timezone must not be empty"));
                }
            }
            SettingsPayload::Notifications(_) => {}
            SettingsPayload::LeavePolicy(val) => {
                if val.carry_over_days > val.annual_leave_days {
                    return Err(HrError::validation(
                        "carry_over_days must not exceed annual_leave_days",
                    ));
                }
            }
            SettingsPayload::Security(val) => {
                if !(5..=1440).contains(&val.session_timeout_minutes) {
                    return Err(HrError::validation(
                        "session_timeout_minutes must be between 5 and 1440",
                    ));
                }
                if !(8..=128).contains(&val.password_min_length) {
                    return Err(HrError::validation(
                        "password_min_length must be between 8 and 128",
                    ));
                }
            }
        }
        Ok(())
    }
}

#[derive(Clone, Debug)]
pub struct Setting {
    pub payload: SettingsPayload,
    pub updated_by: Option<Uuid>,
    pub updated_date: Option<DateTime<FixedOffset>>,
}

impl Setting {
    pub fn category(&self) -> SettingCategory {
        self.payload.category()
    }
}

/// Row layout of the settings table, payload kept as JSON text.
#[derive(Clone, Debug, FromRow)]
pub struct SettingRow {
    pub category: SettingCategory,
    pub payload: String,
    pub updated_by: Option<Uuid>,
    pub updated_date: Option<DateTime<FixedOffset>>,
}

impl TryFrom<SettingRow> for Setting {
    type Error = anyhow::Error;

    fn try_from(row: SettingRow) -> Result<Self, Self::Error> {
        let payload: SettingsPayload = serde_json::from_str(&row.payload)?;
        if payload.category() != row.category {
            anyhow::bail!(
                "setting row {} holds a {} payload",
                row.category,
                payload.category()
            );
        }
        Ok(Setting {
            payload,
            updated_by: row.updated_by,
            updated_date: row.updated_date,
        })
    }
}
