use std::path::PathBuf;
use std::sync::Arc;

use crate::application::ports::{ImageStore, ImageStoreError};
use crate::presentation::config::{StorageProviderSetting, StorageSettings};

use super::object_image_store::ObjectImageStore;

pub struct ImageStoreFactory;

impl ImageStoreFactory {
    pub fn create(settings: &StorageSettings) -> Result<Arc<dyn ImageStore>, ImageStoreError> {
        match settings.provider {
            StorageProviderSetting::Local => {
                let path = PathBuf::from(&settings.local_path);
                tracing::info!(path = %path.display(), "Using local image store");
                Ok(Arc::new(ObjectImageStore::local(path)?))
            }
            StorageProviderSetting::Memory => {
                tracing::info!("Using in-memory image store");
                Ok(Arc::new(ObjectImageStore::in_memory()))
            }
        }
    }
}
