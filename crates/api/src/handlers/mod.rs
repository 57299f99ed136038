pub mod project;
pub mod search_history;
