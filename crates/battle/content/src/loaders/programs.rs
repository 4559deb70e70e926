//! Rule-program spec loader.

use std::path::Path;

use crate::loaders::{LoadResult, read_file};
use crate::program::ProgramSpec;

/// Loader for [`ProgramSpec`] from RON files.
pub struct ProgramLoader;

impl ProgramLoader {
    /// Load a program spec. A missing `name` defaults to the file stem.
    pub fn load(path: &Path) -> LoadResult<ProgramSpec> {
        let content = read_file(path)?;
        let mut spec =
            Self::from_ron(&content).map_err(|e| anyhow::anyhow!("{} ({})", e, path.display()))?;
        if spec.name.is_empty() {
            spec.name = path
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_default();
        }
        tracing::debug!(
            path = %path.display(),
            program = %spec.name,
            protocols = spec.protocols.len(),
            "loaded program spec"
        );
        Ok(spec)
    }

    pub fn from_ron(content: &str) -> LoadResult<ProgramSpec> {
        ron::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse program RON: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_and_enabled_default() {
        let spec = ProgramLoader::from_ron(
            r#"(
                name: "sniper",
                protocols: [
                    (trigger: "always", action: "rail_piercer"),
                    (trigger: "enemy_close", action: "move_back", priority: 5, enabled: false),
                ],
            )"#,
        )
        .unwrap();

        assert_eq!(spec.name, "sniper");
        assert_eq!(spec.protocols[0].priority, 0);
        assert!(spec.protocols[0].enabled);
        assert_eq!(spec.protocols[1].priority, 5);
        assert!(!spec.protocols[1].enabled);
    }
}
