mod postgres;

#[cfg(test)]
pub mod fake;

use async_trait::async_trait;

use crate::model::{ServiceFields, ServiceRecord};

pub use postgres::PgServiceStore;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    Database(#[from] sqlx::Error),

    /// The procedure ran but its result did not have the expected shape.
    #[error("{0}")]
    Malformed(String),
}

/// Calling contract of the persistence collaborator. Each method is exactly
/// one stored-procedure invocation.
#[async_trait]
pub trait ServiceStore: Send + Sync {
    async fn create(&self, fields: &ServiceFields) -> Result<ServiceRecord, StoreError>;

    /// All records, in the order the procedure returns them.
    async fn list_all(&self) -> Result<Vec<ServiceRecord>, StoreError>;

    async fn search_by_vehicle(&self, vehicle_no: &str) -> Result<Vec<ServiceRecord>, StoreError>;

    async fn get(&self, service_id: i32) -> Result<Option<ServiceRecord>, StoreError>;

    /// Replaces every field of the record. `None` when the id is unknown.
    async fn update(
        &self,
        service_id: i32,
        fields: &ServiceFields,
    ) -> Result<Option<ServiceRecord>, StoreError>;

    /// Number of rows removed, zero when the id is unknown.
    async fn delete(&self, service_id: i32) -> Result<u64, StoreError>;
}
