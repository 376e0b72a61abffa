pub mod employee;
pub mod kpi;
pub mod leave_request;
pub mod permission;
pub mod resignation_request;
pub mod review_status;
pub mod reward_punishment;
pub mod role;
pub mod role_permission;
pub mod setting;
pub mod user;
