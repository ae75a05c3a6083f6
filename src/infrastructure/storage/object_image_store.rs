use std::path::PathBuf;
use std::sync::Arc;

use object_store::local::LocalFileSystem;
use object_store::memory::InMemory;
use object_store::path::Path as StorePath;
use object_store::{ObjectStore, PutPayload};

use crate::application::ports::{ImageStore, ImageStoreError, StoredImage};
use crate::domain::{EmbeddedImage, ImageKey, content_type_for};

/// Image store over an `object_store` backend. The content type is derived
/// from the key's extension on load.
pub struct ObjectImageStore {
    inner: Arc<dyn ObjectStore>,
}

impl ObjectImageStore {
    pub fn local(base_path: PathBuf) -> Result<Self, ImageStoreError> {
        std::fs::create_dir_all(&base_path).map_err(ImageStoreError::Io)?;
        let fs = LocalFileSystem::new_with_prefix(base_path)
            .map_err(|e| ImageStoreError::UploadFailed(e.to_string()))?;
        Ok(Self {
            inner: Arc::new(fs),
        })
    }

    pub fn in_memory() -> Self {
        Self {
            inner: Arc::new(InMemory::new()),
        }
    }

    fn store_path(key: &ImageKey) -> Result<StorePath, ImageStoreError> {
        if !key.is_safe() {
            return Err(ImageStoreError::InvalidKey(key.to_string()));
        }
        StorePath::parse(key.as_str()).map_err(|e| ImageStoreError::InvalidKey(e.to_string()))
    }
}

#[async_trait::async_trait]
impl ImageStore for ObjectImageStore {
    #[tracing::instrument(skip(self, image), fields(key = %key, bytes = image.data.len()))]
    async fn save(&self, key: &ImageKey, image: &EmbeddedImage) -> Result<(), ImageStoreError> {
        let path = Self::store_path(key)?;
        self.inner
            .put(&path, PutPayload::from(image.data.clone()))
            .await
            .map_err(|e| ImageStoreError::UploadFailed(e.to_string()))?;
        Ok(())
    }

    async fn load(&self, key: &ImageKey) -> Result<StoredImage, ImageStoreError> {
        let path = Self::store_path(key)?;
        let result = self.inner.get(&path).await.map_err(|e| match e {
            object_store::Error::NotFound { .. } => ImageStoreError::NotFound(key.to_string()),
            other => ImageStoreError::DownloadFailed(other.to_string()),
        })?;

        let data = result
            .bytes()
            .await
            .map_err(|e| ImageStoreError::DownloadFailed(e.to_string()))?;

        Ok(StoredImage {
            content_type: content_type_for(key.as_str()).to_string(),
            data,
        })
    }

    async fn delete(&self, key: &ImageKey) -> Result<(), ImageStoreError> {
        let path = Self::store_path(key)?;
        self.inner
            .delete(&path)
            .await
            .map_err(|e| ImageStoreError::DeleteFailed(e.to_string()))
    }
}
