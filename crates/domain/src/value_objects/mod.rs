pub mod billing;
pub mod enums;
pub mod schedule;
pub mod stats;
pub mod tasks;
pub mod users;
