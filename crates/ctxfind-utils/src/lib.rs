pub mod file_discovery;

pub use file_discovery::{Discovery, FileDiscovery, SkippedPath, DEFAULT_IGNORE};
