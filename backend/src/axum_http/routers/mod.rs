pub mod accounts;
pub mod admin;
pub mod billing;
pub mod schedule;
pub mod tasks;
