use async_trait::async_trait;
use handoff_core::{AppError, ImageRecord};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Broker-side store of image records.
#[async_trait]
pub trait ImageRepository: Send + Sync {
    /// Allocate an identifier no other record uses.
    async fn next_id(&self) -> Result<Uuid, AppError>;

    /// Store a new record. Fails if the id is already taken.
    async fn insert(&self, record: ImageRecord) -> Result<(), AppError>;

    async fn get(&self, id: Uuid) -> Result<Option<ImageRecord>, AppError>;

    /// Set `uploaded = true`. Returns the updated record, or `None` for an unknown id.
    async fn mark_uploaded(&self, id: Uuid) -> Result<Option<ImageRecord>, AppError>;
}

/// Process-local image store
#[derive(Clone, Default)]
pub struct InMemoryImageRepository {
    records: Arc<RwLock<HashMap<Uuid, ImageRecord>>>,
}

impl InMemoryImageRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl ImageRepository for InMemoryImageRepository {
    async fn next_id(&self) -> Result<Uuid, AppError> {
        let records = self.records.read().await;
        let mut id = Uuid::new_v4();
        while records.contains_key(&id) {
            id = Uuid::new_v4();
        }
        Ok(id)
    }

    async fn insert(&self, record: ImageRecord) -> Result<(), AppError> {
        let mut records = self.records.write().await;
        if records.contains_key(&record.id) {
            return Err(AppError::Internal(format!(
                "Image record already exists: {}",
                record.id
            )));
        }
        tracing::debug!(image_id = %record.id, key = %record.storage_key, "Image record stored");
        records.insert(record.id, record);
        Ok(())
    }

    async fn get(&self, id: Uuid) -> Result<Option<ImageRecord>, AppError> {
        Ok(self.records.read().await.get(&id).cloned())
    }

    async fn mark_uploaded(&self, id: Uuid) -> Result<Option<ImageRecord>, AppError> {
        let mut records = self.records.write().await;
        Ok(records.get_mut(&id).map(|record| {
            record.uploaded = true;
            record.clone()
        }))
    }
}
