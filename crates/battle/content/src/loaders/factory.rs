//! Content factory for loading everything from one data directory.

use std::path::{Path, PathBuf};

use battle_core::BattleConfig;

use crate::construct::ConstructCatalog;
use crate::loaders::{ConfigLoader, LoadResult, ProgramLoader, ProgressLoader};
use crate::program::ProgramSpec;
use crate::progression::PlayerProgress;

/// Content factory that loads battle content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml      (optional)
/// ├── constructs.ron   (optional, falls back to the bundled catalog)
/// ├── progress.ron     (optional)
/// └── programs/
///     ├── gunner.ron
///     └── brawler.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load `config.toml`, or defaults when absent.
    pub fn load_config(&self) -> LoadResult<BattleConfig> {
        let path = self.data_dir.join("config.toml");
        if !path.exists() {
            return Ok(BattleConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load `constructs.ron`, or the bundled catalog when absent.
    pub fn load_constructs(&self) -> LoadResult<ConstructCatalog> {
        let path = self.data_dir.join("constructs.ron");
        if !path.exists() {
            return ConstructCatalog::builtin();
        }
        ConstructCatalog::load(&path)
    }

    /// Load `programs/{name}.ron`.
    pub fn load_program(&self, name: &str) -> LoadResult<ProgramSpec> {
        let path = self.data_dir.join("programs").join(format!("{}.ron", name));
        ProgramLoader::load(&path)
    }

    /// Load `progress.ron`, if present.
    pub fn load_progress(&self) -> LoadResult<Option<PlayerProgress>> {
        let path = self.data_dir.join("progress.ron");
        if !path.exists() {
            return Ok(None);
        }
        ProgressLoader::load(&path).map(Some)
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
