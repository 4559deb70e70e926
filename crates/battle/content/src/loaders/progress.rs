//! Player progress loader.

use std::path::Path;

use crate::loaders::{LoadResult, read_file};
use crate::progression::PlayerProgress;

/// Loader for [`PlayerProgress`] from RON files.
pub struct ProgressLoader;

impl ProgressLoader {
    pub fn load(path: &Path) -> LoadResult<PlayerProgress> {
        let content = read_file(path)?;
        let progress: PlayerProgress = ron::from_str(&content).map_err(|e| {
            anyhow::anyhow!("Failed to parse progress RON {}: {}", path.display(), e)
        })?;
        tracing::debug!(
            path = %path.display(),
            actions = progress.unlocked_actions.len(),
            triggers = progress.unlocked_triggers.len(),
            "loaded player progress"
        );
        Ok(progress)
    }
}
