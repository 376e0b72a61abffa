//! Data-store capability used by the core and the HTTP layer.
//!
//! Two implementations exist: [`memory::MemoryStore`] (in-process fixture,
//! used by tests and the `memory` backend) and [`postgres::PostgresStore`]
//! (sqlx, delegating to the `repository` functions). The backend is chosen by
//! `Config::store_backend`; nothing in the core branches on it.

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    core::{error::HrResult, review::Review},
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
};

pub mod memory;
pub mod postgres;

/// `(results, counts, page_count)`
pub type Paginated<T> = (Vec<T>, u32, u32);

#[async_trait]
pub trait HrStore: Send + Sync {
    async fn create_user(&self, user: &User) -> HrResult<()>;
    async fn get_user_by_id(&self, id: &Uuid) -> HrResult<Option<User>>;
    async fn get_user_by_username(&self, user_name: &str) -> HrResult<Option<User>>;

    async fn create_employee(&self, employee: &Employee) -> HrResult<()>;
    async fn get_employee_by_id(&self, id: &Uuid) -> HrResult<Option<Employee>>;
    async fn paginate_employee(
        &self,
        page: u32,
        page_size: u32,
        search: Option<String>,
    ) -> HrResult<Paginated<Employee>>;

    /// Catalog ordered by category, then permission name.
    async fn list_permissions(&self) -> HrResult<Vec<Permission>>;
    async fn get_permission_by_id(&self, id: &Uuid) -> HrResult<Option<Permission>>;
    async fn get_permission_by_name(&self, permission_name: &str)
        -> HrResult<Option<Permission>>;
    /// Returns `false` when a permission with the same name already exists.
    async fn insert_permission(&self, permission: &Permission) -> HrResult<bool>;

    async fn get_role_permissions(&self, role: Role) -> HrResult<Vec<RolePermission>>;
    /// Returns `false` when the `(role, permission_id)` grant already exists.
    async fn insert_role_permission(&self, role_permission: &RolePermission) -> HrResult<bool>;
    /// Returns `false` when there was no grant to delete.
    async fn delete_role_permission(&self, role: Role, permission_id: &Uuid) -> HrResult<bool>;

    async fn create_leave_request(&self, leave_request: &LeaveRequest) -> HrResult<()>;
    async fn get_leave_request_by_id(&self, id: &Uuid) -> HrResult<Option<LeaveRequest>>;
    async fn paginate_leave_request(
        &self,
        filter: &LeaveRequestFilter,
        page: u32,
        page_size: u32,
    ) -> HrResult<Paginated<LeaveRequest>>;
    /// Applies `review` only if the request is still pending.
    async fn review_leave_request(
        &self,
        id: &Uuid,
        review: &Review<ApprovalDecision>,
    ) -> HrResult<LeaveRequest>;

    async fn create_resignation_request(
        &self,
        resignation_request: &ResignationRequest,
    ) -> HrResult<()>;
    async fn get_resignation_request_by_id(
        &self,
        id: &Uuid,
    ) -> HrResult<Option<ResignationRequest>>;
    async fn paginate_resignation_request(
        &self,
        filter: &ResignationRequestFilter,
        page: u32,
        page_size: u32,
    ) -> HrResult<Paginated<ResignationRequest>>;
    async fn review_resignation_request(
        &self,
        id: &Uuid,
        review: &Review<ResignationDecision>,
    ) -> HrResult<ResignationRequest>;

    async fn create_reward_punishment(&self, record: &RewardPunishment) -> HrResult<()>;
    async fn get_reward_punishment_by_id(&self, id: &Uuid)
        -> HrResult<Option<RewardPunishment>>;
    async fn paginate_reward_punishment(
        &self,
        filter: &RewardPunishmentFilter,
        page: u32,
        page_size: u32,
    ) -> HrResult<Paginated<RewardPunishment>>;
    async fn review_reward_punishment(
        &self,
        id: &Uuid,
        review: &Review<ApprovalDecision>,
    ) -> HrResult<RewardPunishment>;

    async fn create_kpi(&self, kpi: &Kpi) -> HrResult<()>;
    async fn paginate_kpi(
        &self,
        employee_id: Option<Uuid>,
        page: u32,
        page_size: u32,
    ) -> HrResult<Paginated<Kpi>>;

    async fn get_setting(&self, category: SettingCategory) -> HrResult<Option<Setting>>;
    async fn upsert_setting(&self, setting: &Setting) -> HrResult<()>;
}
