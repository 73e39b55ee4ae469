use anyhow::{Context, Result};
use bilao_orders::{InMemoryOrderStore, StoreSnapshot};
use std::fs;
use std::path::Path;
use tracing::info;

/// Open the store saved at `path`; a missing file is an empty store
pub fn load(path: &Path) -> Result<InMemoryOrderStore> {
    if !path.exists() {
        info!("No store at {}, starting empty", path.display());
        return Ok(InMemoryOrderStore::new());
    }

    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read store {}", path.display()))?;
    let store = InMemoryOrderStore::from_snapshot(StoreSnapshot::from_json(&json)?)?;
    Ok(store)
}

pub fn save(store: &InMemoryOrderStore, path: &Path) -> Result<()> {
    let json = store.snapshot()?.to_json()?;
    fs::write(path, json).with_context(|| format!("Failed to write store {}", path.display()))?;
    info!("Saved store to {}", path.display());
    Ok(())
}
