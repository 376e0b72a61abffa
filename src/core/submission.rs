//! Creation of employees and of the records that enter the review workflow.
//!
//! Input is validated before anything is written; referenced employees must exist.

use chrono::{Local, NaiveDate};
use tracing::info;
use uuid::Uuid;

use crate::{
    core::{
        error::{HrError, HrResult},
        utils::years_of_service,
    },
    model::{
        employee::Employee,
        kpi::Kpi,
        leave_request::LeaveRequest,
        resignation_request::{ResignationRequest, ResignationType},
        review_status::{ApprovalStatus, ResignationStatus},
        reward_punishment::{RecordType, RewardPunishment},
    },
    store::HrStore,
};

#[derive(Clone, Debug)]
pub struct NewEmployee {
    pub full_name: String,
    pub email: String,
    pub department: Option<String>,
    pub position: Option<String>,
    pub start_date: NaiveDate,
}

#[derive(Clone, Debug)]
pub struct NewLeaveRequest {
    pub employee_id: Uuid,
    pub leave_type: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub days_requested: i32,
    pub reason: Option<String>,
}

#[derive(Clone, Debug)]
pub struct NewResignationRequest {
    pub employee_id: Uuid,
    pub request_type: ResignationType,
    pub description: String,
    pub document_url: Option<String>,
}

#[derive(Clone, Debug)]
pub struct NewReward {
    pub employee_id: Uuid,
    pub record_type: RecordType,
    pub category: String,
    pub description: Option<String>,
    pub amount: Option<f64>,
    pub award_date: NaiveDate,
    pub incident_id: Option<Uuid>,
}

#[derive(Clone, Debug)]
pub struct NewKpi {
    pub employee_id: Uuid,
    pub title: String,
    pub category: String,
    pub target_percentage: f64,
    pub achieved_percentage: Option<f64>,
    pub period: String,
}

fn required(field: &str, value: &str) -> HrResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(HrError::validation(format!("{} must not be empty", field)));
    }
    Ok(value.to_string())
}

fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|x| x.trim().to_string())
        .filter(|x| !x.is_empty())
}

fn percentage(field: &str, value: f64) -> HrResult<f64> {
    if !(0.0..=100.0).contains(&value) {
        return Err(HrError::validation(format!(
            "{} must be between 0 and 100",
            field
        )));
    }
    Ok(value)
}

async fn ensure_employee(store: &dyn HrStore, employee_id: &Uuid) -> HrResult<Employee> {
    store
        .get_employee_by_id(employee_id)
        .await?
        .ok_or_else(|| HrError::not_found("employee", employee_id))
}

pub async fn create_employee(store: &dyn HrStore, input: NewEmployee) -> HrResult<Employee> {
    let full_name = required("full_name", &input.full_name)?;
    let email = required("email", &input.email)?;
    if !email.contains('@') {
        return Err(HrError::validation(format!(
            "email {} is not a valid address",
            email
        )));
    }
    let now = Local::now().fixed_offset();
    let employee = Employee {
        id: Uuid::now_v7(),
        full_name,
        email,
        department: optional(input.department),
        position: optional(input.position),
        start_date: input.start_date,
        created_date: Some(now),
        updated_date: Some(now),
    };
    store.create_employee(&employee).await?;
    info!("employee {} created", employee.id);
    Ok(employee)
}

pub async fn submit_leave_request(
    store: &dyn HrStore,
    input: NewLeaveRequest,
) -> HrResult<LeaveRequest> {
    let leave_type = required("leave_type", &input.leave_type)?;
    if input.end_date < input.start_date {
        return Err(HrError::validation("end_date must not be before start_date"));
    }
    if input.days_requested <= 0 {
        return Err(HrError::validation("days_requested must be greater than 0"));
    }
    ensure_employee(store, &input.employee_id).await?;

    let leave_request = LeaveRequest {
        id: Uuid::now_v7(),
        employee_id: input.employee_id,
        leave_type,
        start_date: input.start_date,
        end_date: input.end_date,
        days_requested: input.days_requested,
        reason: optional(input.reason),
        status: ApprovalStatus::Pending,
        reviewed_by: None,
        reviewed_date: None,
        admin_notes: None,
        created_date: Some(Local::now().fixed_offset()),
    };
    store.create_leave_request(&leave_request).await?;
    info!(
        "leave_request {} submitted for employee {}",
        leave_request.id, leave_request.employee_id
    );
    Ok(leave_request)
}

/// Submits a resignation or termination request dated `today`.
///
/// `years_of_service` is computed here once and never recomputed.
pub async fn submit_resignation_request(
    store: &dyn HrStore,
    input: NewResignationRequest,
    today: NaiveDate,
) -> HrResult<ResignationRequest> {
    let description = required("description", &input.description)?;
    let employee = ensure_employee(store, &input.employee_id).await?;

    let resignation_request = ResignationRequest {
        id: Uuid::now_v7(),
        employee_id: employee.id,
        request_type: input.request_type,
        years_of_service: years_of_service(employee.start_date, today),
        request_date: today,
        description,
        document_url: optional(input.document_url),
        status: ResignationStatus::Pending,
        reviewed_by: None,
        reviewed_date: None,
        admin_notes: None,
        created_date: Some(Local::now().fixed_offset()),
    };
    store
        .create_resignation_request(&resignation_request)
        .await?;
    info!(
        "{} request {} submitted for employee {}",
        resignation_request.request_type, resignation_request.id, employee.id
    );
    Ok(resignation_request)
}

pub async fn create_reward(
    store: &dyn HrStore,
    input: NewReward,
    awarded_by: Option<Uuid>,
) -> HrResult<RewardPunishment> {
    let category = required("category", &input.category)?;
    if let Some(amount) = input.amount {
        if !amount.is_finite() || amount < 0.0 {
            return Err(HrError::validation("amount must not be negative"));
        }
    }
    ensure_employee(store, &input.employee_id).await?;

    let record = RewardPunishment {
        id: Uuid::now_v7(),
        employee_id: input.employee_id,
        record_type: input.record_type,
        category,
        description: optional(input.description),
        amount: input.amount,
        award_date: input.award_date,
        status: ApprovalStatus::Pending,
        awarded_by,
        incident_id: input.incident_id,
        reviewed_by: None,
        reviewed_date: None,
        admin_notes: None,
        created_date: Some(Local::now().fixed_offset()),
    };
    store.create_reward_punishment(&record).await?;
    info!("{} {} recorded", record.record_type, record.id);
    Ok(record)
}

pub async fn create_kpi(
    store: &dyn HrStore,
    input: NewKpi,
    created_by: Option<Uuid>,
) -> HrResult<Kpi> {
    let title = required("title", &input.title)?;
    let category = required("category", &input.category)?;
    let period = required("period", &input.period)?;
    let target_percentage = percentage("target_percentage", input.target_percentage)?;
    let achieved_percentage = input
        .achieved_percentage
        .map(|x| percentage("achieved_percentage", x))
        .transpose()?;
    ensure_employee(store, &input.employee_id).await?;

    let kpi = Kpi {
        id: Uuid::now_v7(),
        employee_id: input.employee_id,
        title,
        category,
        target_percentage,
        achieved_percentage,
        period,
        created_by,
        created_date: Some(Local::now().fixed_offset()),
    };
    store.create_kpi(&kpi).await?;
    info!("kpi {} created for employee {}", kpi.id, kpi.employee_id);
    Ok(kpi)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{factory::employee::EmployeeFactory, store::memory::MemoryStore};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn leave_input(employee_id: Uuid) -> NewLeaveRequest {
        NewLeaveRequest {
            employee_id,
            leave_type: "annual".to_string(),
            start_date: date(2024, 6, 3),
            end_date: date(2024, 6, 7),
            days_requested: 5,
            reason: Some("family trip".to_string()),
        }
    }

    #[tokio::test]
    async fn test_submit_leave_request() {
        let store = MemoryStore::new();
        let employee = EmployeeFactory::new().generate_one(&store, ()).await.unwrap();

        let leave_request = submit_leave_request(&store, leave_input(employee.id))
            .await
            .unwrap();
        assert_eq!(leave_request.status, ApprovalStatus::Pending);
        assert!(leave_request.reviewed_by.is_none());
        assert!(store
            .get_leave_request_by_id(&leave_request.id)
            .await
            .unwrap()
            .is_some());
    }

    #[tokio::test]
    async fn test_submit_leave_request_validation() {
        let store = MemoryStore::new();
        let employee = EmployeeFactory::new().generate_one(&store, ()).await.unwrap();

        let mut input = leave_input(employee.id);
        input.leave_type = "  ".to_string();
        let res = submit_leave_request(&store, input).await;
        assert!(matches!(res, Err(HrError::Validation(_))));

        let mut input = leave_input(employee.id);
        input.end_date = date(2024, 6, 1);
        let res = submit_leave_request(&store, input).await;
        assert!(matches!(res, Err(HrError::Validation(_))));

        let mut input = leave_input(employee.id);
        input.days_requested = 0;
        let res = submit_leave_request(&store, input).await;
        assert!(matches!(res, Err(HrError::Validation(_))));

        let res = submit_leave_request(&store, leave_input(Uuid::now_v7())).await;
        assert!(matches!(res, Err(HrError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_submit_resignation_request_years_of_service() {
        let store = MemoryStore::new();
        let mut factory = EmployeeFactory::<NaiveDate>::new();
        factory.modified_one(|x, start_date| Employee {
            start_date,
            ..x.clone()
        });
        let employee = factory
            .generate_one(&store, date(2020, 3, 15))
            .await
            .unwrap();

        let input = NewResignationRequest {
            employee_id: employee.id,
            request_type: ResignationType::Resignation,
            description: "relocating".to_string(),
            document_url: Some("letters/relocating.pdf".to_string()),
        };
        let resignation_request =
            submit_resignation_request(&store, input.clone(), date(2024, 1, 10))
                .await
                .unwrap();
        assert_eq!(resignation_request.years_of_service, 4);
        assert_eq!(resignation_request.request_date, date(2024, 1, 10));
        assert_eq!(resignation_request.status, ResignationStatus::Pending);

        let mut empty = input;
        empty.description = String::new();
        let res = submit_resignation_request(&store, empty, date(2024, 1, 10)).await;
        assert!(matches!(res, Err(HrError::Validation(_))));
    }

    #[tokio::test]
    async fn test_create_reward_and_kpi_validation() {
        let store = MemoryStore::new();
        let employee = EmployeeFactory::new().generate_one(&store, ()).await.unwrap();

        let reward = NewReward {
            employee_id: employee.id,
            record_type: RecordType::Reward,
            category: "performance".to_string(),
            description: None,
            amount: Some(-1.0),
            award_date: date(2024, 6, 3),
            incident_id: None,
        };
        let res = create_reward(&store, reward.clone(), None).await;
        assert!(matches!(res, Err(HrError::Validation(_))));
        let record = create_reward(
            &store,
            NewReward {
                amount: Some(250.0),
                ..reward
            },
            None,
        )
        .await
        .unwrap();
        assert_eq!(record.status, ApprovalStatus::Pending);

        let kpi = NewKpi {
            employee_id: employee.id,
            title: "Close tickets".to_string(),
            category: "support".to_string(),
            target_percentage: 90.0,
            achieved_percentage: Some(120.0),
            period: "2024-Q1".to_string(),
        };
        let res = create_kpi(&store, kpi.clone(), None).await;
        assert!(matches!(res, Err(HrError::Validation(_))));
        let created = create_kpi(
            &store,
            NewKpi {
                achieved_percentage: Some(75.5),
                ..kpi
            },
            None,
        )
        .await
        .unwrap();
        assert_eq!(created.period, "2024-Q1");
    }

    #[tokio::test]
    async fn test_create_employee_validation() {
        let store = MemoryStore::new();
        let input = NewEmployee {
            full_name: "Ada Lovelace".to_string(),
            email: "ada.example.com".to_string(),
            department: Some(" ".to_string()),
            position: None,
            start_date: date(2021, 1, 4),
        };
        let res = create_employee(&store, input.clone()).await;
        assert!(matches!(res, Err(HrError::Validation(_))));

        let employee = create_employee(
            &store,
            NewEmployee {
                email: "ada@example.com".to_string(),
                ..input
            },
        )
        .await
        .unwrap();
        assert!(employee.department.is_none());
    }
}
