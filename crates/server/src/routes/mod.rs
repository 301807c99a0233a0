pub mod assessment;
pub mod dashboard;
pub mod health;
pub mod profile;
pub mod tasks;
