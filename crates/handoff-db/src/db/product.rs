use async_trait::async_trait;
use handoff_core::{AppError, ProductRecord};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Front-side store of product records.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn next_id(&self) -> Result<Uuid, AppError>;

    async fn insert(&self, record: ProductRecord) -> Result<(), AppError>;

    async fn get(&self, id: Uuid) -> Result<Option<ProductRecord>, AppError>;
}

#[derive(Clone, Default)]
pub struct InMemoryProductRepository {
    records: Arc<RwLock<HashMap<Uuid, ProductRecord>>>,
}

impl InMemoryProductRepository {
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
impl ProductRepository for InMemoryProductRepository {
    async fn next_id(&self) -> Result<Uuid, AppError> {
        let records = self.records.read().await;
        let mut id = Uuid::new_v4();
        while records.contains_key(&id) {
            id = Uuid::new_v4();
        }
        Ok(id)
    }

    async fn insert(&self, record: ProductRecord) -> Result<(), AppError> {
        let mut records = self.records.write().await;
        if records.contains_key(&record.id) {
            return Err(AppError::Internal(format!(
                "Product record already exists: {}",
                record.id
            )));
        }
        records.insert(record.id, record);
        Ok(())
    }

    async fn get(&self, id: Uuid) -> Result<Option<ProductRecord>, AppError> {
        Ok(self.records.read().await.get(&id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[tokio::test]
    async fn test_insert_and_get_product() {
        let repo = InMemoryProductRepository::new();
        assert!(repo.is_empty().await);

        let id = repo.next_id().await.unwrap();
        let product = ProductRecord {
            id,
            name: "Chair".to_string(),
            description: "Oak".to_string(),
            image_id: Uuid::new_v4().to_string(),
            price: 120.0,
            created_at: Utc::now(),
        };
        repo.insert(product.clone()).await.unwrap();

        assert_eq!(repo.get(id).await.unwrap(), Some(product.clone()));
        assert!(repo.insert(product).await.is_err());
        assert_eq!(repo.len().await, 1);
    }
}
