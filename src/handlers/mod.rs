pub mod admin;
pub mod dashboard;
pub mod quiz;
