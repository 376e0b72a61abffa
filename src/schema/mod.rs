pub mod auth;
pub mod common;
pub mod employee;
pub mod kpi;
pub mod leave_request;
pub mod permission;
pub mod resignation_request;
pub mod reward;
pub mod role_permission;
pub mod setting;
