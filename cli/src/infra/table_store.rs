//! Infrastructure implementation of the `EnvironmentTableSource` port.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use sitestack_topology::EnvironmentTable;

use crate::application::ports::EnvironmentTableSource;

/// Environment table read from a YAML file, falling back to the built-in
/// table when no file is configured.
///
/// Lookup order: explicit path (`--config` / `SITESTACK_CONFIG`), then
/// `~/.sitestack/environments.yaml` if it exists, then built-in.
pub struct YamlTableSource {
    explicit: Option<PathBuf>,
}

impl YamlTableSource {
    /// Create a source; `explicit` must exist when given.
    #[must_use]
    pub fn new(explicit: Option<PathBuf>) -> Self {
        Self { explicit }
    }

    /// The file that will be read, or `None` for the built-in table.
    #[must_use]
    pub fn path(&self) -> Option<PathBuf> {
        if let Some(path) = &self.explicit {
            return Some(path.clone());
        }
        dirs::home_dir()
            .map(|home| home.join(".sitestack").join("environments.yaml"))
            .filter(|path| path.is_file())
    }
}

fn read_table(path: &Path) -> Result<EnvironmentTable> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read {}", path.display()))?;
    let table: EnvironmentTable = serde_yaml::from_str(&content)
        .with_context(|| format!("cannot parse {}", path.display()))?;
    if table.is_empty() {
        anyhow::bail!("{} defines no environments", path.display());
    }
    for profile in table.profiles() {
        if profile.domain_name().trim().is_empty() {
            anyhow::bail!("{}: environment '{}' has no domainName", path.display(), profile.id());
        }
        if profile.record_names().is_empty() {
            anyhow::bail!("{}: environment '{}' has no recordNames", path.display(), profile.id());
        }
    }
    Ok(table)
}

impl EnvironmentTableSource for YamlTableSource {
    fn load(&self) -> Result<EnvironmentTable> {
        match self.path() {
            Some(path) => {
                tracing::debug!(path = %path.display(), "loading environment table");
                read_table(&path)
            }
            None => Ok(EnvironmentTable::builtin()),
        }
    }

    fn describe(&self) -> String {
        self.path()
            .map_or_else(|| "built-in table".to_string(), |p| p.display().to_string())
    }
}
