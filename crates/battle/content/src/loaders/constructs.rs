//! Construct catalog loader.

use std::path::Path;

use crate::construct::{ConstructCatalog, ConstructSpec};
use crate::loaders::{LoadResult, read_file};

const BUILTIN_CONSTRUCTS: &str = include_str!("../../data/constructs.ron");

impl ConstructCatalog {
    /// Parses the construct catalog bundled with the crate.
    pub fn builtin() -> LoadResult<Self> {
        Self::from_ron(BUILTIN_CONSTRUCTS)
    }

    /// Loads a construct catalog from a RON file.
    ///
    /// RON format: `Vec<ConstructSpec>`
    pub fn load(path: &Path) -> LoadResult<Self> {
        let content = read_file(path)?;
        let catalog =
            Self::from_ron(&content).map_err(|e| anyhow::anyhow!("{} ({})", e, path.display()))?;
        tracing::debug!(path = %path.display(), constructs = catalog.len(), "loaded constructs");
        Ok(catalog)
    }

    /// Parses a RON construct list. Duplicate ids are rejected.
    pub fn from_ron(content: &str) -> LoadResult<Self> {
        let specs: Vec<ConstructSpec> = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse construct catalog RON: {}", e))?;

        let mut catalog = ConstructCatalog::new();
        for spec in specs {
            if spec.max_hp <= 0.0 {
                anyhow::bail!("Construct '{}' has non-positive max_hp {}", spec.id, spec.max_hp);
            }
            let id = spec.id.clone();
            if catalog.insert(spec).is_some() {
                anyhow::bail!("Duplicate construct id '{}'", id);
            }
        }
        Ok(catalog)
    }
}
