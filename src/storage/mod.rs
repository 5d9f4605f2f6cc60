pub mod json_backend;

use crate::{errors::Result, store::DomainStore};

/// Abstraction over persistence backends for a [`DomainStore`].
pub trait StoreStorage {
    fn load(&self) -> Result<DomainStore>;
    fn save(&self, store: &DomainStore) -> Result<()>;
}

pub use json_backend::{load_store_from_path, save_store_to_path, JsonStoreStorage};
