pub mod employee;
pub mod leave_request;
pub mod user;
