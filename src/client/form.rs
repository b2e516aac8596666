use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::model::{ServiceRecord, ServiceRequest};

/// Service types offered by the form's select box.
pub const SERVICE_TYPES: [&str; 8] = [
    "General Service",
    "Oil Change",
    "Brake Service",
    "Tire Replacement",
    "Battery Replacement",
    "Engine Repair",
    "AC Service",
    "Other",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("Please fill all required fields")]
    MissingRequired,

    #[error("Please enter a valid date")]
    InvalidDate,

    #[error("Please enter a valid cost")]
    InvalidCost,

    #[error("Next service date cannot be before service date")]
    NextDateBeforeServiceDate,
}

/// Raw form contents, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceForm {
    pub vehicle_no: String,
    pub owner_name: String,
    pub service_type: String,
    pub service_date: String,
    pub next_service_date: String,
    pub cost: String,
    pub remarks: String,
}

impl ServiceForm {
    pub fn from_record(record: &ServiceRecord) -> Self {
        ServiceForm {
            vehicle_no: record.vehicle_no.clone(),
            owner_name: record.owner_name.clone(),
            service_type: record.service_type.clone(),
            service_date: record.service_date.to_string(),
            next_service_date: record
                .next_service_date
                .map(|date| date.to_string())
                .unwrap_or_default(),
            cost: record.cost.map(|cost| cost.to_string()).unwrap_or_default(),
            remarks: record.remarks.clone().unwrap_or_default(),
        }
    }

    /// Checks the form the same way the server will and builds the request
    /// body. A failure means no request should be sent.
    pub fn validate(&self) -> Result<ServiceRequest, FormError> {
        let vehicle_no = self.vehicle_no.trim();
        let owner_name = self.owner_name.trim();
        let service_type = self.service_type.trim();
        let service_date = self.service_date.trim();

        if vehicle_no.is_empty()
            || owner_name.is_empty()
            || service_type.is_empty()
            || service_date.is_empty()
        {
            return Err(FormError::MissingRequired);
        }

        let service_date = parse_date(service_date)?;
        let next_service_date = match self.next_service_date.trim() {
            "" => None,
            text => Some(parse_date(text)?),
        };

        let cost = match self.cost.trim() {
            "" => None,
            text => match text.parse::<Decimal>() {
                Ok(cost) if cost >= Decimal::ZERO => Some(cost),
                _ => return Err(FormError::InvalidCost),
            },
        };

        if next_service_date.is_some_and(|next| next < service_date) {
            return Err(FormError::NextDateBeforeServiceDate);
        }

        let remarks = match self.remarks.trim() {
            "" => None,
            text => Some(text.to_string()),
        };

        Ok(ServiceRequest {
            vehicle_no: Some(vehicle_no.to_string()),
            owner_name: Some(owner_name.to_string()),
            service_type: Some(service_type.to_string()),
            service_date: Some(service_date),
            next_service_date,
            cost,
            remarks,
        })
    }
}

fn parse_date(text: &str) -> Result<NaiveDate, FormError> {
    text.parse::<NaiveDate>().map_err(|_| FormError::InvalidDate)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> ServiceForm {
        ServiceForm {
            vehicle_no: " KA01AB1234 ".to_string(),
            owner_name: "A Rao".to_string(),
            service_type: "Oil Change".to_string(),
            service_date: "2024-01-10".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn builds_trimmed_request() {
        let request = filled().validate().unwrap();
        assert_eq!(request.vehicle_no.as_deref(), Some("KA01AB1234"));
        assert_eq!(request.cost, None);
        assert_eq!(request.remarks, None);
    }

    #[test]
    fn requires_the_four_fields() {
        let mut form = filled();
        form.service_type.clear();
        assert_eq!(form.validate(), Err(FormError::MissingRequired));
    }

    #[test]
    fn rejects_negative_or_non_numeric_cost() {
        let mut form = filled();
        form.cost = "-1".to_string();
        assert_eq!(form.validate(), Err(FormError::InvalidCost));

        form.cost = "abc".to_string();
        assert_eq!(form.validate(), Err(FormError::InvalidCost));

        form.cost = "0".to_string();
        assert_eq!(form.validate().unwrap().cost, Some(Decimal::ZERO));
    }

    #[test]
    fn rejects_next_date_before_service_date() {
        let mut form = filled();
        form.next_service_date = "2023-12-31".to_string();
        assert_eq!(form.validate(), Err(FormError::NextDateBeforeServiceDate));
    }

    #[test]
    fn rejects_unparseable_date() {
        let mut form = filled();
        form.service_date = "10/01/2024".to_string();
        assert_eq!(form.validate(), Err(FormError::InvalidDate));
    }

    #[test]
    fn populates_from_record() {
        let record = ServiceRecord {
            service_id: 3,
            vehicle_no: "KA01AB1234".to_string(),
            owner_name: "A Rao".to_string(),
            service_type: "Oil Change".to_string(),
            service_date: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            next_service_date: None,
            cost: Some(Decimal::new(150050, 2)),
            remarks: None,
        };

        let form = ServiceForm::from_record(&record);
        assert_eq!(form.service_date, "2024-01-10");
        assert_eq!(form.next_service_date, "");
        assert_eq!(form.cost, "1500.50");
    }
}
