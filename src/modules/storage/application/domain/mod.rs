pub mod entities;

pub use entities::{
    keeps_stored_secret, public_url, storage_key, ConnectionSettings, FileObject, NewFileObject,
    StorageConfig, StorageConfigDraft, DEFAULT_REGION, DEFAULT_URL_EXPIRY_SECS, SECRET_MASK,
};
