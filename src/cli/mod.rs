pub mod args;
pub mod commands;
pub mod root;
pub mod ui;

pub use args::{validate_search_args, Args, SearchArgs};
pub use root::RootCommand;
