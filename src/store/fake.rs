use std::sync::Mutex;

use async_trait::async_trait;

use super::{ServiceStore, StoreError};
use crate::model::{ServiceFields, ServiceRecord};

/// In-memory stand-in for the stored procedures. Setting `fail` makes every
/// call return a store error.
#[derive(Default)]
pub struct FakeStore {
    pub records: Mutex<Vec<ServiceRecord>>,
    pub next_id: Mutex<i32>,
    pub fail: bool,
}

impl FakeStore {
    pub fn failing() -> Self {
        FakeStore {
            fail: true,
            ..Default::default()
        }
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.fail {
            return Err(StoreError::Malformed("connection refused".to_string()));
        }
        Ok(())
    }

    fn record(service_id: i32, fields: &ServiceFields) -> ServiceRecord {
        ServiceRecord {
            service_id,
            vehicle_no: fields.vehicle_no.clone(),
            owner_name: fields.owner_name.clone(),
            service_type: fields.service_type.clone(),
            service_date: fields.service_date,
            next_service_date: fields.next_service_date,
            cost: fields.cost,
            remarks: fields.remarks.clone(),
        }
    }

    fn ordered(mut records: Vec<ServiceRecord>) -> Vec<ServiceRecord> {
        records.sort_by(|a, b| {
            b.service_date
                .cmp(&a.service_date)
                .then(b.service_id.cmp(&a.service_id))
        });
        records
    }
}

#[async_trait]
impl ServiceStore for FakeStore {
    async fn create(&self, fields: &ServiceFields) -> Result<ServiceRecord, StoreError> {
        self.check()?;
        let mut next_id = self.next_id.lock().unwrap();
        *next_id += 1;
        let record = Self::record(*next_id, fields);
        self.records.lock().unwrap().push(record.clone());
        Ok(record)
    }

    async fn list_all(&self) -> Result<Vec<ServiceRecord>, StoreError> {
        self.check()?;
        Ok(Self::ordered(self.records.lock().unwrap().clone()))
    }

    async fn search_by_vehicle(&self, vehicle_no: &str) -> Result<Vec<ServiceRecord>, StoreError> {
        self.check()?;
        let matching = self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|record| record.vehicle_no == vehicle_no)
            .cloned()
            .collect();
        Ok(Self::ordered(matching))
    }

    async fn get(&self, service_id: i32) -> Result<Option<ServiceRecord>, StoreError> {
        self.check()?;
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .find(|record| record.service_id == service_id)
            .cloned())
    }

    async fn update(
        &self,
        service_id: i32,
        fields: &ServiceFields,
    ) -> Result<Option<ServiceRecord>, StoreError> {
        self.check()?;
        let mut records = self.records.lock().unwrap();
        let Some(slot) = records.iter_mut().find(|r| r.service_id == service_id) else {
            return Ok(None);
        };
        *slot = Self::record(service_id, fields);
        Ok(Some(slot.clone()))
    }

    async fn delete(&self, service_id: i32) -> Result<u64, StoreError> {
        self.check()?;
        let mut records = self.records.lock().unwrap();
        let before = records.len();
        records.retain(|record| record.service_id != service_id);
        Ok((before - records.len()) as u64)
    }
}
