pub mod search;

pub use search::run_search_command;
