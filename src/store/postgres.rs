//! Postgres implementation of [`HrStore`] on top of the `repository` functions.
//!
//! Every call runs in its own transaction. Reviews lock the row with
//! `SELECT ... FOR UPDATE`, check the transition, then write all review fields
//! with a single `UPDATE ... WHERE status = 'pending'`; any failure before
//! commit drops the transaction and leaves the row as it was.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::{HrStore, Paginated};
use crate::{
    core::{
        error::{HrError, HrResult},
        review::{apply_review, ensure_pending, Review, Reviewable},
    },
    model::{
        employee::Employee,
        kpi::Kpi,
        leave_request::{LeaveRequest, LeaveRequestFilter},
        permission::Permission,
        resignation_request::{ResignationRequest, ResignationRequestFilter},
        review_status::{ApprovalDecision, ResignationDecision},
        reward_punishment::{RewardPunishment, RewardPunishmentFilter},
        role::Role,
        role_permission::RolePermission,
        setting::{Setting, SettingCategory},
        user::User,
    },
    repository,
};

pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Fails the review when the guarded update matched no pending row.
fn guarded_update<R: Reviewable>(updated: bool, current: &R) -> HrResult<()> {
    if updated {
        return Ok(());
    }
    ensure_pending(current)?;
    Err(HrError::InvalidStateTransition {
        entity: R::ENTITY,
        id: current.id().to_string(),
        status: "reviewed concurrently".to_string(),
    })
}

#[async_trait]
impl HrStore for PostgresStore {
    async fn create_user(&self, user: &User) -> HrResult<()> {
        let mut tx = self.pool.begin().await?;
        if repository::user::get_user_by_username(&mut tx, &user.user_name)
            .await?
            .is_some()
        {
            return Err(HrError::validation(format!(
                "user with user_name = {} already exists",
                user.user_name
            )));
        }
        repository::user::create_user(&mut tx, user).await?;
        tx.commit().await?;
        Ok(())
    }

    async fn get_user_by_id(&self, id: &Uuid) -> HrResult<Option<User>> {
        let mut tx = self.pool.begin().await?;
        Ok(repository::user::get_user_by_id(&mut tx, id).await?)
    }

    async fn get_user_by_username(&self, user_name: &str) -> HrResult<Option<User>> {
        let mut tx = self.pool.begin().await?;
        Ok(repository::user::get_user_by_username(&mut tx, user_name).await?)
    }

    async fn create_employee(&self, employee: &Employee) -> HrResult<()> {
        let mut tx = self.pool.begin().await?;
        repository::employee::create_employee(&mut tx, employee).await?;
        tx.commit().await?;
        Ok(())
    }

    async fn get_employee_by_id(&self, id: &Uuid) -> HrResult<Option<Employee>> {
        let mut tx = self.pool.begin().await?;
        Ok(repository::employee::get_employee_by_id(&mut tx, id).await?)
    }

    async fn paginate_employee(
        &self,
        page: u32,
        page_size: u32,
        search: Option<String>,
    ) -> HrResult<Paginated<Employee>> {
        let mut tx = self.pool.begin().await?;
        Ok(repository::employee::paginate_employee(&mut tx, page, page_size, search).await?)
    }

    async fn list_permissions(&self) -> HrResult<Vec<Permission>> {
        let mut tx = self.pool.begin().await?;
        Ok(repository::permission::get_all_permission(&mut tx).await?)
    }

    async fn get_permission_by_id(&self, id: &Uuid) -> HrResult<Option<Permission>> {
        let mut tx = self.pool.begin().await?;
        Ok(repository::permission::get_permission_by_id(&mut tx, id).await?)
    }

    async fn get_permission_by_name(
        &self,
        permission_name: &str,
    ) -> HrResult<Option<Permission>> {
        let mut tx = self.pool.begin().await?;
        Ok(repository::permission::get_permission_by_name(&mut tx, permission_name).await?)
    }

    async fn insert_permission(&self, permission: &Permission) -> HrResult<bool> {
        let mut tx = self.pool.begin().await?;
        let created = repository::permission::create_permission(&mut tx, permission).await?;
        tx.commit().await?;
        Ok(created)
    }

    async fn get_role_permissions(&self, role: Role) -> HrResult<Vec<RolePermission>> {
        let mut tx = self.pool.begin().await?;
        Ok(repository::role_permission::get_all_role_permission(&mut tx, role).await?)
    }

    async fn insert_role_permission(&self, role_permission: &RolePermission) -> HrResult<bool> {
        let mut tx = self.pool.begin().await?;
        let created =
            repository::role_permission::create_role_permission(&mut tx, role_permission).await?;
        tx.commit().await?;
        Ok(created)
    }

    async fn delete_role_permission(&self, role: Role, permission_id: &Uuid) -> HrResult<bool> {
        let mut tx = self.pool.begin().await?;
        let deleted =
            repository::role_permission::delete_role_permission(&mut tx, role, permission_id)
                .await?;
        tx.commit().await?;
        Ok(deleted)
    }

    async fn create_leave_request(&self, leave_request: &LeaveRequest) -> HrResult<()> {
        let mut tx = self.pool.begin().await?;
        repository::leave_request::create_leave_request(&mut tx, leave_request).await?;
        tx.commit().await?;
        Ok(())
    }

    async fn get_leave_request_by_id(&self, id: &Uuid) -> HrResult<Option<LeaveRequest>> {
        let mut tx = self.pool.begin().await?;
        Ok(repository::leave_request::get_leave_request_by_id(&mut tx, id, false).await?)
    }

    async fn paginate_leave_request(
        &self,
        filter: &LeaveRequestFilter,
        page: u32,
        page_size: u32,
    ) -> HrResult<Paginated<LeaveRequest>> {
        let mut tx = self.pool.begin().await?;
        Ok(
            repository::leave_request::paginate_leave_request(&mut tx, filter, page, page_size)
                .await?,
        )
    }

    async fn review_leave_request(
        &self,
        id: &Uuid,
        review: &Review<ApprovalDecision>,
    ) -> HrResult<LeaveRequest> {
        let mut tx = self.pool.begin().await?;
        let current = repository::leave_request::get_leave_request_by_id(&mut tx, id, true)
            .await?
            .ok_or_else(|| HrError::not_found(LeaveRequest::ENTITY, id))?;
        let reviewed = apply_review(&current, review)?;
        let updated =
            repository::leave_request::update_leave_request_review(&mut tx, &reviewed).await?;
        guarded_update(updated, &current)?;
        tx.commit().await?;
        Ok(reviewed)
    }

    async fn create_resignation_request(
        &self,
        resignation_request: &ResignationRequest,
    ) -> HrResult<()> {
        let mut tx = self.pool.begin().await?;
        repository::resignation_request::create_resignation_request(&mut tx, resignation_request)
            .await?;
        tx.commit().await?;
        Ok(())
    }

    async fn get_resignation_request_by_id(
        &self,
        id: &Uuid,
    ) -> HrResult<Option<ResignationRequest>> {
        let mut tx = self.pool.begin().await?;
        Ok(
            repository::resignation_request::get_resignation_request_by_id(&mut tx, id, false)
                .await?,
        )
    }

    async fn paginate_resignation_request(
        &self,
        filter: &ResignationRequestFilter,
        page: u32,
        page_size: u32,
    ) -> HrResult<Paginated<ResignationRequest>> {
        let mut tx = self.pool.begin().await?;
        Ok(repository::resignation_request::paginate_resignation_request(
            &mut tx, filter, page, page_size,
        )
        .await?)
    }

    async fn review_resignation_request(
        &self,
        id: &Uuid,
        review: &Review<ResignationDecision>,
    ) -> HrResult<ResignationRequest> {
        let mut tx = self.pool.begin().await?;
        let current =
            repository::resignation_request::get_resignation_request_by_id(&mut tx, id, true)
                .await?
                .ok_or_else(|| HrError::not_found(ResignationRequest::ENTITY, id))?;
        let reviewed = apply_review(&current, review)?;
        let updated = repository::resignation_request::update_resignation_request_review(
            &mut tx, &reviewed,
        )
        .await?;
        guarded_update(updated, &current)?;
        tx.commit().await?;
        Ok(reviewed)
    }

    async fn create_reward_punishment(&self, record: &RewardPunishment) -> HrResult<()> {
        let mut tx = self.pool.begin().await?;
        repository::reward_punishment::create_reward_punishment(&mut tx, record).await?;
        tx.commit().await?;
        Ok(())
    }

    async fn get_reward_punishment_by_id(
        &self,
        id: &Uuid,
    ) -> HrResult<Option<RewardPunishment>> {
        let mut tx = self.pool.begin().await?;
        Ok(
            repository::reward_punishment::get_reward_punishment_by_id(&mut tx, id, false)
                .await?,
        )
    }

    async fn paginate_reward_punishment(
        &self,
        filter: &RewardPunishmentFilter,
        page: u32,
        page_size: u32,
    ) -> HrResult<Paginated<RewardPunishment>> {
        let mut tx = self.pool.begin().await?;
        Ok(repository::reward_punishment::paginate_reward_punishment(
            &mut tx, filter, page, page_size,
        )
        .await?)
    }

    async fn review_reward_punishment(
        &self,
        id: &Uuid,
        review: &Review<ApprovalDecision>,
    ) -> HrResult<RewardPunishment> {
        let mut tx = self.pool.begin().await?;
        let current = repository::reward_punishment::get_reward_punishment_by_id(&mut tx, id, true)
            .await?
            .ok_or_else(|| HrError::not_found(RewardPunishment::ENTITY, id))?;
        let reviewed = apply_review(&current, review)?;
        let updated =
            repository::reward_punishment::update_reward_punishment_review(&mut tx, &reviewed)
                .await?;
        guarded_update(updated, &current)?;
        tx.commit().await?;
        Ok(reviewed)
    }

    async fn create_kpi(&self, kpi: &Kpi) -> HrResult<()> {
        let mut tx = self.pool.begin().await?;
        repository::kpi::create_kpi(&mut tx, kpi).await?;
        tx.commit().await?;
        Ok(())
    }

    async fn paginate_kpi(
        &self,
        employee_id: Option<Uuid>,
        page: u32,
        page_size: u32,
    ) -> HrResult<Paginated<Kpi>> {
        let mut tx = self.pool.begin().await?;
        Ok(repository::kpi::paginate_kpi(&mut tx, employee_id, page, page_size).await?)
    }

    async fn get_setting(&self, category: SettingCategory) -> HrResult<Option<Setting>> {
        let mut tx = self.pool.begin().await?;
        Ok(repository::setting::get_setting(&mut tx, category).await?)
    }

    async fn upsert_setting(&self, setting: &Setting) -> HrResult<()> {
        let mut tx = self.pool.begin().await?;
        repository::setting::upsert_setting(&mut tx, setting).await?;
        tx.commit().await?;
        Ok(())
    }
}
