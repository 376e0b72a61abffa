use std::sync::Arc;

use poem::web::Data;
use poem_openapi::{
    param::{Path, Query},
    payload::Json,
    OpenApi, Tags,
};

use crate::{
    core::{
        catalog::{MANAGE_REWARDS, VIEW_REWARDS},
        error::HrError,
        review::review_reward_punishment,
        security::BearerAuthorization,
        submission::{create_reward, NewReward},
    },
    model::{review_status::ApprovalDecision, reward_punishment::RewardPunishmentFilter},
    route::{authorize, pagination, parse_date, parse_uuid},
    schema::{
        common::{PaginateResponse, ReviewRequest},
        reward::{
            PaginateRewardResponses, RewardCreateRequest, RewardCreateResponses,
            RewardReviewResponses,
        },
    },
    AppState,
};

#[derive(Tags)]
enum ApiRewardTags {
    Reward,
}

pub struct ApiReward;

api_error_responses!(PaginateRewardResponses, "route.reward");
api_error_responses!(RewardCreateResponses, "route.reward");
api_error_responses!(RewardReviewResponses, "route.reward");

fn reward_filter(
    record_type: Option<String>,
    status: Option<String>,
    employee_id: Option<String>,
) -> Result<RewardPunishmentFilter, HrError> {
    Ok(RewardPunishmentFilter {
        record_type: record_type.map(|x| x.parse()).transpose()?,
        status: status.map(|x| x.parse()).transpose()?,
        employee_id: employee_id
            .map(|x| parse_uuid("employee_id", &x))
            .transpose()?,
    })
}

fn new_reward(json: &RewardCreateRequest) -> Result<NewReward, HrError> {
    Ok(NewReward {
        employee_id: parse_uuid("employee_id", &json.employee_id)?,
        record_type: json.record_type.parse()?,
        category: json.category.clone(),
        description: json.description.clone(),
        amount: json.amount,
        award_date: parse_date("award_date", &json.award_date)?,
        incident_id: json
            .incident_id
            .as_deref()
            .map(|x| parse_uuid("incident_id", x))
            .transpose()?,
    })
}

#[OpenApi]
impl ApiReward {
    /// Rewards and punishments, newest first
    #[oai(path = "/rewards", method = "get", tag = "ApiRewardTags::Reward")]
    async fn paginate_reward_api(
        &self,
        Query(page): Query<Option<u32>>,
        Query(page_size): Query<Option<u32>>,
        Query(record_type): Query<Option<String>>,
        Query(status): Query<Option<String>>,
        Query(employee_id): Query<Option<String>>,
        state: Data<&Arc<AppState>>,
        auth: BearerAuthorization,
    ) -> PaginateRewardResponses {
        // Validate user token
        if let Err(denied) = authorize(&state, auth, VIEW_REWARDS).await {
            return PaginateRewardResponses::denied("paginate_reward_api", denied);
        }
        let filter = match reward_filter(record_type, status, employee_id) {
            Ok(val) => val,
            Err(err) => {
                return PaginateRewardResponses::error("paginate_reward_api", "parse filter", err)
            }
        };

        let (page, page_size) = match pagination(page, page_size) {
            Ok(val) => val,
            Err(err) => {
                return PaginateRewardResponses::error("paginate_reward_api", "pagination", err)
            }
        };
        let (data, counts, page_count) = match state
            .store
            .paginate_reward_punishment(&filter, page, page_size)
            .await
        {
            Ok(val) => val,
            Err(err) => {
                return PaginateRewardResponses::error(
                    "paginate_reward_api",
                    "paginate_reward_punishment",
                    err,
                )
            }
        };
        PaginateRewardResponses::Ok(Json(PaginateResponse {
            counts,
            page,
            page_count,
            page_size,
            results: data.into_iter().map(|x| x.into()).collect(),
        }))
    }

    #[oai(path = "/rewards", method = "post", tag = "ApiRewardTags::Reward")]
    async fn create_reward_api(
        &self,
        json: Json<RewardCreateRequest>,
        state: Data<&Arc<AppState>>,
        auth: BearerAuthorization,
    ) -> RewardCreateResponses {
        // Validate user token
        let user = match authorize(&state, auth, MANAGE_REWARDS).await {
            Ok(val) => val,
            Err(denied) => return RewardCreateResponses::denied("create_reward_api", denied),
        };
        let input = match new_reward(&json) {
            Ok(val) => val,
            Err(err) => {
                return RewardCreateResponses::error("create_reward_api", "parse request", err)
            }
        };

        match create_reward(state.store.as_ref(), input, Some(user.id)).await {
            Ok(val) => RewardCreateResponses::Ok(Json(val.into())),
            Err(err) => RewardCreateResponses::error("create_reward_api", "create_reward", err),
        }
    }

    /// Approve or reject a pending reward or punishment
    #[oai(path = "/rewards/:id/review", method = "post", tag = "ApiRewardTags::Reward")]
    async fn review_reward_api(
        &self,
        Path(id): Path<String>,
        json: Json<ReviewRequest>,
        state: Data<&Arc<AppState>>,
        auth: BearerAuthorization,
    ) -> RewardReviewResponses {
        // Validate user token
        let user = match authorize(&state, auth, MANAGE_REWARDS).await {
            Ok(val) => val,
            Err(denied) => return RewardReviewResponses::denied("review_reward_api", denied),
        };
        let id = match parse_uuid("id", &id) {
            Ok(val) => val,
            Err(err) => return RewardReviewResponses::error("review_reward_api", "parse id", err),
        };
        let decision: ApprovalDecision = match json.decision.parse() {
            Ok(val) => val,
            Err(err) => {
                return RewardReviewResponses::error("review_reward_api", "parse decision", err)
            }
        };

        match review_reward_punishment(
            state.store.as_ref(),
            &id,
            decision,
            &user.id,
            json.notes.clone(),
        )
        .await
        {
            Ok(val) => RewardReviewResponses::Ok(Json(val.into())),
            Err(err) => RewardReviewResponses::error(
                "review_reward_api",
                "review_reward_punishment",
                err,
            ),
        }
    }
}
