//! Content loaders for reading battle data from files.
//!
//! RON for constructs, programs and player progress; TOML for battle tuning.

pub mod config;
pub mod constructs;
pub mod factory;
pub mod programs;
pub mod progress;

pub use config::ConfigLoader;
pub use factory::ContentFactory;
pub use programs::ProgramLoader;
pub use progress::ProgressLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
