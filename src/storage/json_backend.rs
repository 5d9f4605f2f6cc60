use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    errors::Result,
    store::DomainStore,
    utils::paths::{store_file_in, write_atomic},
};

use super::StoreStorage;

/// Single-file JSON persistence for the domain store.
#[derive(Debug, Clone)]
pub struct JsonStoreStorage {
    path: PathBuf,
}

impl JsonStoreStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Storage at `<base>/store.json`.
    pub fn in_dir(base: &Path) -> Self {
        Self::new(store_file_in(base))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StoreStorage for JsonStoreStorage {
    /// Loads and validates the store, or returns the seeded default store when no file exists yet.
    fn load(&self) -> Result<DomainStore> {
        if !self.path.exists() {
            tracing::info!(path = %self.path.display(), "no store file, starting with defaults");
            return Ok(DomainStore::with_default_categories());
        }
        load_store_from_path(&self.path)
    }

    fn save(&self, store: &DomainStore) -> Result<()> {
        save_store_to_path(store, &self.path)
    }
}

pub fn save_store_to_path(store: &DomainStore, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(store)?;
    write_atomic(path, &json)?;
    tracing::info!(path = %path.display(), "store saved");
    Ok(())
}

pub fn load_store_from_path(path: &Path) -> Result<DomainStore> {
    let data = fs::read_to_string(path)?;
    let store: DomainStore = serde_json::from_str(&data)?;
    store.validate()?;
    tracing::info!(path = %path.display(), "store loaded");
    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::FinanceError;
    use crate::store::DomainSource;

    #[test]
    fn missing_file_loads_default_categories() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonStoreStorage::in_dir(dir.path());
        let store = storage.load().unwrap();
        assert_eq!(store.categories().len(), 4);
        assert!(!storage.path().exists());
    }

    #[test]
    fn save_then_load_preserves_order() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonStoreStorage::in_dir(dir.path());
        let mut store = DomainStore::with_default_categories();
        let rent = store.categories()[2].id.clone();
        store.set_budget(rent.clone(), 900.0).unwrap();
        store.set_budget(rent, 100.0).unwrap();

        storage.save(&store).unwrap();
        let loaded = storage.load().unwrap();
        assert_eq!(loaded, store);
    }

    #[test]
    fn malformed_file_is_a_serde_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        fs::write(&path, "{ not json").unwrap();
        let err = JsonStoreStorage::new(&path).load().expect_err("bad json");
        assert!(matches!(err, FinanceError::Serde(_)));
    }

    #[test]
    fn negative_amounts_on_disk_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        fs::write(
            &path,
            r#"{
                "transactions": [
                    {"id": "t1", "amount": -40.0, "categoryId": "c1", "date": "2024-04-01",
                     "type": "expense"}
                ],
                "categories": [{"id": "c1", "name": "Food", "type": "expense"}],
                "budgets": [{"id": "b1", "categoryId": "c1", "amount": -100.0}]
            }"#,
        )
        .unwrap();
        let err = JsonStoreStorage::new(&path).load().expect_err("negative amounts");
        match err {
            FinanceError::Validation(message) => assert!(message.contains("t1"), "{message}"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn reads_original_record_shape() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        fs::write(
            &path,
            r#"{
                "transactions": [
                    {"id": "t1", "amount": 12.5, "categoryId": "c1", "date": "2024-04-01",
                     "description": "lunch", "type": "expense"}
                ],
                "categories": [{"id": "c1", "name": "Food", "type": "expense"}]
            }"#,
        )
        .unwrap();
        let store = load_store_from_path(&path).unwrap();
        assert_eq!(store.transactions()[0].description.as_deref(), Some("lunch"));
        assert!(store.budgets().is_empty());
    }
}
