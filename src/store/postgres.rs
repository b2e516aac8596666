use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions};

use super::{ServiceStore, StoreError};
use crate::model::{ServiceFields, ServiceRecord};

/// `ServiceStore` backed by the `sp_*` functions in `db/service_procedures.sql`.
#[derive(Clone)]
pub struct PgServiceStore {
    db: PgPool,
}

impl PgServiceStore {
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, sqlx::Error> {
        let db = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;

        Ok(PgServiceStore { db })
    }
}

#[async_trait]
impl ServiceStore for PgServiceStore {
    async fn create(&self, fields: &ServiceFields) -> Result<ServiceRecord, StoreError> {
        let created = sqlx::query_as::<_, ServiceRecord>(
            r#"SELECT * FROM sp_add_service($1, $2, $3, $4, $5, $6, $7)"#,
        )
        .bind(&fields.vehicle_no)
        .bind(&fields.owner_name)
        .bind(&fields.service_type)
        .bind(fields.service_date)
        .bind(fields.next_service_date)
        .bind(fields.cost)
        .bind(&fields.remarks)
        .fetch_optional(&self.db)
        .await?;

        created.ok_or_else(|| StoreError::Malformed("sp_add_service returned no row".to_string()))
    }

    async fn list_all(&self) -> Result<Vec<ServiceRecord>, StoreError> {
        let services =
            sqlx::query_as::<_, ServiceRecord>(r#"SELECT * FROM sp_get_all_services()"#)
                .fetch_all(&self.db)
                .await?;

        Ok(services)
    }

    async fn search_by_vehicle(&self, vehicle_no: &str) -> Result<Vec<ServiceRecord>, StoreError> {
        let services = sqlx::query_as::<_, ServiceRecord>(r#"SELECT * FROM sp_search_service($1)"#)
            .bind(vehicle_no)
            .fetch_all(&self.db)
            .await?;

        Ok(services)
    }

    async fn get(&self, service_id: i32) -> Result<Option<ServiceRecord>, StoreError> {
        let service = sqlx::query_as::<_, ServiceRecord>(r#"SELECT * FROM sp_get_service($1)"#)
            .bind(service_id)
            .fetch_optional(&self.db)
            .await?;

        Ok(service)
    }

    async fn update(
        &self,
        service_id: i32,
        fields: &ServiceFields,
    ) -> Result<Option<ServiceRecord>, StoreError> {
        let updated = sqlx::query_as::<_, ServiceRecord>(
            r#"SELECT * FROM sp_update_service($1, $2, $3, $4, $5, $6, $7, $8)"#,
        )
        .bind(service_id)
        .bind(&fields.vehicle_no)
        .bind(&fields.owner_name)
        .bind(&fields.service_type)
        .bind(fields.service_date)
        .bind(fields.next_service_date)
        .bind(fields.cost)
        .bind(&fields.remarks)
        .fetch_optional(&self.db)
        .await?;

        Ok(updated)
    }

    async fn delete(&self, service_id: i32) -> Result<u64, StoreError> {
        let deleted_rows: Option<i64> =
            sqlx::query_scalar(r#"SELECT deleted_rows FROM sp_delete_service($1)"#)
                .bind(service_id)
                .fetch_optional(&self.db)
                .await?;

        let deleted_rows = deleted_rows.ok_or_else(|| {
            StoreError::Malformed("sp_delete_service returned no row".to_string())
        })?;

        u64::try_from(deleted_rows).map_err(|_| {
            StoreError::Malformed(format!(
                "sp_delete_service returned a negative row count: {deleted_rows}"
            ))
        })
    }
}
