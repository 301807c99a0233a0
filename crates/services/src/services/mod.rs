pub mod claude_api;
pub mod coaching;
pub mod completion;
pub mod dashboard;
pub mod fallback_tasks;
pub mod stores;
pub mod task_generator;
pub mod weakness_selector;
