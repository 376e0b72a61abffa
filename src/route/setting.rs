use std::sync::Arc;

use poem::web::Data;
use poem_openapi::{param::Path, payload::Json, OpenApi, Tags};
use serde_json::json;

use crate::{
    core::{
        catalog::MANAGE_SETTINGS,
        error::HrError,
        security::BearerAuthorization,
        setting::{get_setting, update_setting},
    },
    model::setting::{Setting, SettingCategory, SettingsPayload},
    route::authorize,
    schema::setting::{
        SettingDetail, SettingDetailResponses, SettingUpdateRequest, SettingUpdateResponses,
    },
    AppState,
};

#[derive(Tags)]
enum ApiSettingTags {
    Setting,
}

pub struct ApiSetting;

api_error_responses!(SettingDetailResponses, "route.setting");
api_error_responses!(SettingUpdateResponses, "route.setting");

fn setting_detail(setting: Setting, is_default: bool) -> Result<SettingDetail, HrError> {
    SettingDetail::new(setting, is_default).map_err(|err| HrError::StorageUnavailable(err.into()))
}

#[OpenApi]
impl ApiSetting {
    /// Settings of one category, defaults when nothing was saved yet
    #[oai(path = "/settings/:category", method = "get", tag = "ApiSettingTags::Setting")]
    async fn detail_setting_api(
        &self,
        Path(category): Path<String>,
        state: Data<&Arc<AppState>>,
        auth: BearerAuthorization,
    ) -> SettingDetailResponses {
        // Validate user token
        if let Err(denied) = authorize(&state, auth, MANAGE_SETTINGS).await {
            return SettingDetailResponses::denied("detail_setting_api", denied);
        }
        let category: SettingCategory = match category.parse() {
            Ok(val) => val,
            Err(err) => {
                return SettingDetailResponses::error("detail_setting_api", "parse category", err)
            }
        };

        let res = get_setting(state.store.as_ref(), category)
            .await
            .and_then(|(setting, is_default)| setting_detail(setting, is_default));
        match res {
            Ok(val) => SettingDetailResponses::Ok(Json(val)),
            Err(err) => SettingDetailResponses::error("detail_setting_api", "get_setting", err),
        }
    }

    /// Replace the settings of one category
    #[oai(path = "/settings", method = "put", tag = "ApiSettingTags::Setting")]
    async fn update_setting_api(
        &self,
        json: Json<SettingUpdateRequest>,
        state: Data<&Arc<AppState>>,
        auth: BearerAuthorization,
    ) -> SettingUpdateResponses {
        // Validate user token
        let user = match authorize(&state, auth, MANAGE_SETTINGS).await {
            Ok(val) => val,
            Err(denied) => return SettingUpdateResponses::denied("update_setting_api", denied),
        };
        let payload = match SettingsPayload::decode(json!({
            "category": json.category.trim(),
            "values": json.values,
        })) {
            Ok(val) => val,
            Err(err) => {
                return SettingUpdateResponses::error("update_setting_api", "decode payload", err)
            }
        };

        let res = update_setting(state.store.as_ref(), payload, Some(user.id))
            .await
            .and_then(|setting| setting_detail(setting, false));
        match res {
            Ok(val) => SettingUpdateResponses::Ok(Json(val)),
            Err(err) => SettingUpdateResponses::error("update_setting_api", "update_setting", err),
        }
    }
}
