//! In-memory implementation of [`HrStore`].
//!
//! All state lives in `HashMap`s behind one `tokio::sync::RwLock`, so every
//! operation is atomic with respect to every other operation in the process.
//! Nothing is durable; the store starts empty and is seeded by
//! `core::catalog` at startup or by test fixtures.
//!
//! Reviews clone the stored record, apply the transition to the clone and
//! swap it in while the write lock is held: a rejected transition leaves the
//! stored record untouched and two racing reviewers are serialized, so only
//! the first one sees a pending request.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{HrStore, Paginated};
use crate::{
    core::{
        error::{HrError, HrResult},
        review::{apply_review, Review, Reviewable},
        sqlx_utils::page_count,
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
};

#[derive(Default)]
struct MemoryState {
    users: HashMap<Uuid, User>,
    employees: HashMap<Uuid, Employee>,
    permissions: HashMap<Uuid, Permission>,
    role_permissions: HashMap<(Role, Uuid), RolePermission>,
    leave_requests: HashMap<Uuid, LeaveRequest>,
    resignation_requests: HashMap<Uuid, ResignationRequest>,
    reward_punishments: HashMap<Uuid, RewardPunishment>,
    kpis: HashMap<Uuid, Kpi>,
    settings: HashMap<SettingCategory, Setting>,
}

#[derive(Default)]
pub struct MemoryStore {
    state: RwLock<MemoryState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn paginate<T>(items: Vec<T>, page: u32, page_size: u32) -> Paginated<T> {
    let counts = items.len() as u32;
    let offset = page.saturating_sub(1).saturating_mul(page_size) as usize;
    let results = items
        .into_iter()
        .skip(offset)
        .take(page_size as usize)
        .collect();
    (results, counts, page_count(counts, page_size))
}

/// Newest first, ties broken by the time-ordered v7 id.
fn newest_first<T, F>(items: &mut [T], key: F)
where
    F: Fn(&T) -> (Option<chrono::DateTime<chrono::FixedOffset>>, Uuid),
{
    items.sort_by(|a, b| key(b).cmp(&key(a)));
}

fn review_in_place<R: Reviewable>(
    records: &mut HashMap<Uuid, R>,
    id: &Uuid,
    review: &Review<crate::core::review::DecisionOf<R>>,
) -> HrResult<R> {
    let current = records
        .get(id)
        .ok_or_else(|| HrError::not_found(R::ENTITY, id))?;
    let reviewed = apply_review(current, review)?;
    records.insert(*id, reviewed.clone());
    Ok(reviewed)
}

#[async_trait]
impl HrStore for MemoryStore {
    async fn create_user(&self, user: &User) -> HrResult<()> {
        let mut state = self.state.write().await;
        if state.users.values().any(|x| x.user_name == user.user_name) {
            return Err(HrError::validation(format!(
                "user with user_name = {} already exists",
                user.user_name
            )));
        }
        state.users.insert(user.id, user.clone());
        Ok(())
    }

    async fn get_user_by_id(&self, id: &Uuid) -> HrResult<Option<User>> {
        let state = self.state.read().await;
        Ok(state
            .users
            .get(id)
            .filter(|x| x.deleted_date.is_none())
            .cloned())
    }

    async fn get_user_by_username(&self, user_name: &str) -> HrResult<Option<User>> {
        let state = self.state.read().await;
        Ok(state
            .users
            .values()
            .find(|x| x.user_name == user_name && x.deleted_date.is_none())
            .cloned())
    }

    async fn create_employee(&self, employee: &Employee) -> HrResult<()> {
        let mut state = self.state.write().await;
        state.employees.insert(employee.id, employee.clone());
        Ok(())
    }

    async fn get_employee_by_id(&self, id: &Uuid) -> HrResult<Option<Employee>> {
        let state = self.state.read().await;
        Ok(state.employees.get(id).cloned())
    }

    async fn paginate_employee(
        &self,
        page: u32,
        page_size: u32,
        search: Option<String>,
    ) -> HrResult<Paginated<Employee>> {
        let state = self.state.read().await;
        let search = search.map(|x| x.to_lowercase());
        let mut data: Vec<Employee> = state
            .employees
            .values()
            .filter(|x| match &search {
                Some(val) => x.full_name.to_lowercase().contains(val),
                None => true,
            })
            .cloned()
            .collect();
        newest_first(&mut data, |x| (x.created_date, x.id));
        Ok(paginate(data, page, page_size))
    }

    async fn list_permissions(&self) -> HrResult<Vec<Permission>> {
        let state = self.state.read().await;
        let mut data: Vec<Permission> = state.permissions.values().cloned().collect();
        data.sort_by(|a, b| {
            (&a.category, &a.permission_name).cmp(&(&b.category, &b.permission_name))
        });
        Ok(data)
    }

    async fn get_permission_by_id(&self, id: &Uuid) -> HrResult<Option<Permission>> {
        let state = self.state.read().await;
        Ok(state.permissions.get(id).cloned())
    }

    async fn get_permission_by_name(
        &self,
        permission_name: &str,
    ) -> HrResult<Option<Permission>> {
        let state = self.state.read().await;
        Ok(state
            .permissions
            .values()
            .find(|x| x.permission_name == permission_name)
            .cloned())
    }

    async fn insert_permission(&self, permission: &Permission) -> HrResult<bool> {
        let mut state = self.state.write().await;
        if state
            .permissions
            .values()
            .any(|x| x.permission_name == permission.permission_name)
        {
            return Ok(false);
        }
        state.permissions.insert(permission.id, permission.clone());
        Ok(true)
    }

    async fn get_role_permissions(&self, role: Role) -> HrResult<Vec<RolePermission>> {
        let state = self.state.read().await;
        Ok(state
            .role_permissions
            .values()
            .filter(|x| x.role == role)
            .cloned()
            .collect())
    }

    async fn insert_role_permission(&self, role_permission: &RolePermission) -> HrResult<bool> {
        let mut state = self.state.write().await;
        let key = (role_permission.role, role_permission.permission_id);
        if state.role_permissions.contains_key(&key) {
            return Ok(false);
        }
        state.role_permissions.insert(key, role_permission.clone());
        Ok(true)
    }

    async fn delete_role_permission(&self, role: Role, permission_id: &Uuid) -> HrResult<bool> {
        let mut state = self.state.write().await;
        Ok(state
            .role_permissions
            .remove(&(role, *permission_id))
            .is_some())
    }

    async fn create_leave_request(&self, leave_request: &LeaveRequest) -> HrResult<()> {
        let mut state = self.state.write().await;
        state
            .leave_requests
            .insert(leave_request.id, leave_request.clone());
        Ok(())
    }

    async fn get_leave_request_by_id(&self, id: &Uuid) -> HrResult<Option<LeaveRequest>> {
        let state = self.state.read().await;
        Ok(state.leave_requests.get(id).cloned())
    }

    async fn paginate_leave_request(
        &self,
        filter: &LeaveRequestFilter,
        page: u32,
        page_size: u32,
    ) -> HrResult<Paginated<LeaveRequest>> {
        let state = self.state.read().await;
        let mut data: Vec<LeaveRequest> = state
            .leave_requests
            .values()
            .filter(|x| filter.status.map_or(true, |val| x.status == val))
            .filter(|x| filter.employee_id.map_or(true, |val| x.employee_id == val))
            .cloned()
            .collect();
        newest_first(&mut data, |x| (x.created_date, x.id));
        Ok(paginate(data, page, page_size))
    }

    async fn review_leave_request(
        &self,
        id: &Uuid,
        review: &Review<ApprovalDecision>,
    ) -> HrResult<LeaveRequest> {
        let mut state = self.state.write().await;
        review_in_place(&mut state.leave_requests, id, review)
    }

    async fn create_resignation_request(
        &self,
        resignation_request: &ResignationRequest,
    ) -> HrResult<()> {
        let mut state = self.state.write().await;
        state
            .resignation_requests
            .insert(resignation_request.id, resignation_request.clone());
        Ok(())
    }

    async fn get_resignation_request_by_id(
        &self,
        id: &Uuid,
    ) -> HrResult<Option<ResignationRequest>> {
        let state = self.state.read().await;
        Ok(state.resignation_requests.get(id).cloned())
    }

    async fn paginate_resignation_request(
        &self,
        filter: &ResignationRequestFilter,
        page: u32,
        page_size: u32,
    ) -> HrResult<Paginated<ResignationRequest>> {
        let state = self.state.read().await;
        let mut data: Vec<ResignationRequest> = state
            .resignation_requests
            .values()
            .filter(|x| filter.status.map_or(true, |val| x.status == val))
            .filter(|x| filter.employee_id.map_or(true, |val| x.employee_id == val))
            .cloned()
            .collect();
        newest_first(&mut data, |x| (x.created_date, x.id));
        Ok(paginate(data, page, page_size))
    }

    async fn review_resignation_request(
        &self,
        id: &Uuid,
        review: &Review<ResignationDecision>,
    ) -> HrResult<ResignationRequest> {
        let mut state = self.state.write().await;
        review_in_place(&mut state.resignation_requests, id, review)
    }

    async fn create_reward_punishment(&self, record: &RewardPunishment) -> HrResult<()> {
        let mut state = self.state.write().await;
        state.reward_punishments.insert(record.id, record.clone());
        Ok(())
    }

    async fn get_reward_punishment_by_id(
        &self,
        id: &Uuid,
    ) -> HrResult<Option<RewardPunishment>> {
        let state = self.state.read().await;
        Ok(state.reward_punishments.get(id).cloned())
    }

    async fn paginate_reward_punishment(
        &self,
        filter: &RewardPunishmentFilter,
        page: u32,
        page_size: u32,
    ) -> HrResult<Paginated<RewardPunishment>> {
        let state = self.state.read().await;
        let mut data: Vec<RewardPunishment> = state
            .reward_punishments
            .values()
            .filter(|x| filter.record_type.map_or(true, |val| x.record_type == val))
            .filter(|x| filter.status.map_or(true, |val| x.status == val))
            .filter(|x| filter.employee_id.map_or(true, |val| x.employee_id == val))
            .cloned()
            .collect();
        newest_first(&mut data, |x| (x.created_date, x.id));
        Ok(paginate(data, page, page_size))
    }

    async fn review_reward_punishment(
        &self,
        id: &Uuid,
        review: &Review<ApprovalDecision>,
    ) -> HrResult<RewardPunishment> {
        let mut state = self.state.write().await;
        review_in_place(&mut state.reward_punishments, id, review)
    }

    async fn create_kpi(&self, kpi: &Kpi) -> HrResult<()> {
        let mut state = self.state.write().await;
        state.kpis.insert(kpi.id, kpi.clone());
        Ok(())
    }

    async fn paginate_kpi(
        &self,
        employee_id: Option<Uuid>,
        page: u32,
        page_size: u32,
    ) -> HrResult<Paginated<Kpi>> {
        let state = self.state.read().await;
        let mut data: Vec<Kpi> = state
            .kpis
            .values()
            .filter(|x| employee_id.map_or(true, |val| x.employee_id == val))
            .cloned()
            .collect();
        newest_first(&mut data, |x| (x.created_date, x.id));
        Ok(paginate(data, page, page_size))
    }

    async fn get_setting(&self, category: SettingCategory) -> HrResult<Option<Setting>> {
        let state = self.state.read().await;
        Ok(state.settings.get(&category).cloned())
    }

    async fn upsert_setting(&self, setting: &Setting) -> HrResult<()> {
        let mut state = self.state.write().await;
        state.settings.insert(setting.category(), setting.clone());
        Ok(())
    }
}
