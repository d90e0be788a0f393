pub mod dashboard;
pub mod inventory;
