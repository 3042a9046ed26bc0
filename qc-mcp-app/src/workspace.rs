//! Index of locally mounted projects.
//!
//! When the organization's files are mounted into the container, each
//! project directory carries a `config.json` with its `cloud-id`. The index
//! maps those directories to project ids.

use anyhow::{bail, Context, Result};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const SKIPPED_ENTRIES: &[&str] = &[".QuantConnect", "data", "lean.json"];
const PROJECT_CONFIG: &str = "config.json";
const CLOUD_ID: &str = "cloud-id";

#[derive(Debug, Clone, Default)]
pub struct OrganizationWorkspace {
    /// Local disk access is available.
    pub available: bool,
    pub mount_source: Option<PathBuf>,
    pub mount_destination: Option<PathBuf>,
    project_ids: BTreeMap<PathBuf, i64>,
}

impl OrganizationWorkspace {
    /// Scans `destination`. Both mounts must be set and the destination must
    /// exist, otherwise the index stays unavailable.
    pub fn load(source: Option<&Path>, destination: Option<&Path>) -> Self {
        let mut workspace = Self {
            mount_source: source.map(Path::to_path_buf),
            mount_destination: destination.map(Path::to_path_buf),
            ..Self::default()
        };

        let (Some(_), Some(destination)) = (source, destination) else {
            return workspace;
        };
        if !destination.exists() {
            debug!("Mount destination {} does not exist", destination.display());
            return workspace;
        }

        let entries = match fs::read_dir(destination) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Failed to read {}: {}", destination.display(), e);
                return workspace;
            }
        };

        for entry in entries.flatten() {
            let name = entry.file_name();
            if SKIPPED_ENTRIES.iter().any(|skipped| name == *skipped) {
                continue;
            }
            let path = entry.path();
            if path.is_dir() {
                workspace.process_directory(&path);
            }
        }

        workspace.available = true;
        workspace
    }

    fn process_directory(&mut self, path: &Path) {
        let config_path = path.join(PROJECT_CONFIG);
        if config_path.is_file() {
            match read_cloud_id(&config_path) {
                Ok(Some(id)) => {
                    self.project_ids.insert(path.to_path_buf(), id);
                }
                Ok(None) => {}
                Err(e) => warn!("Skipping {}: {:#}", config_path.display(), e),
            }
            return;
        }

        let Ok(entries) = fs::read_dir(path) else {
            warn!("Failed to read {}", path.display());
            return;
        };
        for entry in entries.flatten() {
            let sub_path = entry.path();
            if sub_path.is_dir() {
                self.process_directory(&sub_path);
            }
        }
    }

    pub fn project_id(&self, path: &Path) -> Option<i64> {
        self.project_ids.get(path).copied()
    }

    pub fn projects(&self) -> impl Iterator<Item = (&Path, i64)> {
        self.project_ids
            .iter()
            .map(|(path, id)| (path.as_path(), *id))
    }

    pub fn project_count(&self) -> usize {
        self.project_ids.len()
    }
}

fn read_cloud_id(config_path: &Path) -> Result<Option<i64>> {
    let content = fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read {}", config_path.display()))?;
    let config: Value = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse {}", config_path.display()))?;

    let id = match config.get(CLOUD_ID) {
        None => return Ok(None),
        Some(Value::Number(n)) => n.as_i64(),
        Some(Value::String(s)) => s.parse().ok(),
        Some(_) => None,
    };
    match id {
        Some(id) => Ok(Some(id)),
        None => bail!("{} is not an integer", CLOUD_ID),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_cloud_id_errors_name_the_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(PROJECT_CONFIG);

        fs::write(&path, "{not json").unwrap();
        let err = read_cloud_id(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("config.json"));

        fs::write(&path, r#"{"cloud-id": true}"#).unwrap();
        let err = read_cloud_id(&path).unwrap_err();
        assert_eq!(err.to_string(), "cloud-id is not an integer");

        fs::write(&path, r#"{"cloud-id": "12"}"#).unwrap();
        assert_eq!(read_cloud_id(&path).unwrap(), Some(12));
    }
}
