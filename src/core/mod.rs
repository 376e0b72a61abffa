pub mod authorization;
pub mod cache;
pub mod catalog;
pub mod db;
pub mod error;
pub mod permission_matrix;
pub mod review;
pub mod security;
pub mod setting;
pub mod sqlx_utils;
pub mod submission;
#[cfg(test)]
pub mod test_utils;
pub mod utils;
