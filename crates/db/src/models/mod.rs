pub mod daily_task;
pub mod life_assessment;
pub mod life_category;
pub mod profile;
