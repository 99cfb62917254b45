use super::types::{ChecklistStore, STORE_VERSION};
use crate::checklist::{Checklist, QuestionResponse};
use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use serde::de::DeserializeOwned;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Get the default store file path (~/.config/checkscore/checklists.json)
pub fn get_store_path() -> Result<PathBuf> {
    Ok(crate::config::get_config_dir()?.join("checklists.json"))
}

/// Load the checklist store from a JSON file
///
/// If the file doesn't exist, returns a new empty store.
/// If the file exists but has an unsupported version, returns an error.
pub fn load_store(path: &Path) -> Result<ChecklistStore> {
    if !path.exists() {
        debug!(path = %path.display(), "no checklist store yet, starting empty");
        return Ok(ChecklistStore::new());
    }

    let file = File::open(path)
        .with_context(|| format!("Failed to open checklist store at {}", path.display()))?;

    let store: ChecklistStore =
        serde_json::from_reader(file).context("Failed to load checklist store")?;

    if store.version != STORE_VERSION {
        anyhow::bail!("Unsupported checklist store version: {}", store.version);
    }

    debug!(
        path = %path.display(),
        checklists = store.checklists.len(),
        "loaded checklist store"
    );
    Ok(store)
}

/// Save the checklist store to a JSON file atomically
///
/// Creates the parent directory if it doesn't exist.
pub fn save_store(path: &Path, store: &ChecklistStore) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
    }

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;

    serde_json::to_writer_pretty(&mut file, store).context("Failed to serialize checklist store")?;

    file.commit().context("Failed to save checklist store")?;

    debug!(
        path = %path.display(),
        checklists = store.checklists.len(),
        "saved checklist store"
    );
    Ok(())
}

fn read_json<T: DeserializeOwned>(path: &Path, what: &str) -> Result<T> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open {} file at {}", what, path.display()))?;
    serde_json::from_reader(file)
        .with_context(|| format!("Failed to parse {} file at {}", what, path.display()))
}

/// Read a single exported checklist (JSON)
pub fn read_checklist(path: &Path) -> Result<Checklist> {
    read_json(path, "checklist")
}

/// Read a list of Yes/No/NA responses (JSON array)
pub fn read_responses(path: &Path) -> Result<Vec<QuestionResponse>> {
    read_json(path, "responses")
}
