//! Draft files: a serialized `FormState` kept between CLI invocations

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::form::{FormShell, FormState};

/// Default draft location for a form instance inside a draft directory
pub fn draft_path(dir: &Path, state: &FormState) -> PathBuf {
    dir.join(format!("{}-{}.json", state.form_id, state.instance_id))
}

pub fn save_draft(path: &Path, state: &FormState) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Cannot create draft directory: {}", parent.display()))?;
        }
    }

    let json = serde_json::to_string_pretty(state)?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write draft: {}", path.display()))?;
    info!("Saved draft {}", path.display());
    Ok(())
}

pub fn load_draft(path: &Path) -> Result<FormState> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read draft: {}", path.display()))?;
    let state: FormState = serde_json::from_str(&json)
        .with_context(|| format!("Draft is not a valid form state: {}", path.display()))?;
    debug!(
        "Loaded draft {} ({} rows, {} columns)",
        path.display(),
        state.table.row_count(),
        state.table.columns.len()
    );
    Ok(state)
}

/// Load a draft and mount it against its catalog schema
pub fn open_draft(path: &Path) -> Result<FormShell> {
    let state = load_draft(path)?;
    FormShell::from_state(state)
        .with_context(|| format!("Draft cannot be opened: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_save_and_open_draft() {
        let dir = TempDir::new().unwrap();
        let mut shell = FormShell::from_catalog("asset-request").unwrap();
        shell.propose_column("Serial No");

        let path = draft_path(&dir.path().join("drafts"), &shell.state);
        save_draft(&path, &shell.state).unwrap();

        let reopened = open_draft(&path).unwrap();
        assert_eq!(reopened.state, shell.state);
        assert_eq!(reopened.table().columns[0].key, "SerialNo");
    }

    #[test]
    fn test_open_draft_rejects_duplicate_column_keys() {
        let dir = TempDir::new().unwrap();
        let mut shell = FormShell::from_catalog("asset-request").unwrap();
        shell.propose_column("Serial No");
        let mut state = shell.state.clone();
        state.table.columns.push(state.table.columns[0].clone());

        let path = dir.path().join("dup.json");
        save_draft(&path, &state).unwrap();

        let err = open_draft(&path).unwrap_err();
        assert!(err.to_string().contains("dup.json"));
        assert!(format!("{:#}", err).contains("SerialNo"));
    }

    #[test]
    fn test_load_missing_draft_has_context() {
        let dir = TempDir::new().unwrap();
        let err = load_draft(&dir.path().join("nope.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read draft"));
    }
}
