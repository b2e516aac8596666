use std::borrow::Cow;
use std::fmt::Display;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{de, Deserialize, Deserializer, Serialize};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::error::ApiError;

pub const REQUIRED_FIELDS_MESSAGE: &str =
    "Vehicle number, owner name, service type, and service date are required";

/// A single vehicle service history entry as stored by the persistence layer.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, sqlx::FromRow)]
pub struct ServiceRecord {
    pub service_id: i32,
    pub vehicle_no: String,
    pub owner_name: String,
    pub service_type: String,
    pub service_date: NaiveDate,
    pub next_service_date: Option<NaiveDate>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub cost: Option<Decimal>,
    pub remarks: Option<String>,
}

/// Body of `POST /api/services` and `PUT /api/services/{id}`.
///
/// Every member is optional at the wire level so that a missing field and a
/// blank one both surface as the same validation failure instead of a body
/// parse error.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize, Validate)]
#[validate(schema(function = "validate_schedule", skip_on_field_errors = true))]
pub struct ServiceRequest {
    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(required(message = "Vehicle number, owner name, service type, and service date are required"))]
    pub vehicle_no: Option<String>,

    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(required(message = "Vehicle number, owner name, service type, and service date are required"))]
    pub owner_name: Option<String>,

    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(required(message = "Vehicle number, owner name, service type, and service date are required"))]
    pub service_type: Option<String>,

    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(required(message = "Vehicle number, owner name, service type, and service date are required"))]
    pub service_date: Option<NaiveDate>,

    #[serde(default, deserialize_with = "blank_as_none")]
    pub next_service_date: Option<NaiveDate>,

    #[serde(default, deserialize_with = "blank_as_none")]
    pub cost: Option<Decimal>,

    #[serde(default, deserialize_with = "blank_as_none")]
    pub remarks: Option<String>,
}

/// The validated field set handed to the persistence layer. Used for both
/// create and update, since update replaces every field but the id.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceFields {
    pub vehicle_no: String,
    pub owner_name: String,
    pub service_type: String,
    pub service_date: NaiveDate,
    pub next_service_date: Option<NaiveDate>,
    pub cost: Option<Decimal>,
    pub remarks: Option<String>,
}

impl ServiceRequest {
    pub fn into_fields(self) -> Result<ServiceFields, ApiError> {
        self.validate()
            .map_err(|errors| ApiError::Validation(validation_message(&errors)))?;

        match (
            self.vehicle_no,
            self.owner_name,
            self.service_type,
            self.service_date,
        ) {
            (Some(vehicle_no), Some(owner_name), Some(service_type), Some(service_date)) => {
                Ok(ServiceFields {
                    vehicle_no,
                    owner_name,
                    service_type,
                    service_date,
                    next_service_date: self.next_service_date,
                    cost: self.cost,
                    remarks: self.remarks,
                })
            }
            _ => Err(ApiError::Validation(REQUIRED_FIELDS_MESSAGE.to_string())),
        }
    }
}

fn validate_schedule(request: &ServiceRequest) -> Result<(), ValidationError> {
    if request.cost.is_some_and(|cost| cost < Decimal::ZERO) {
        let mut error = ValidationError::new("cost");
        error.message = Some(Cow::from("Cost must be a non-negative number"));
        return Err(error);
    }

    if let (Some(service_date), Some(next)) = (request.service_date, request.next_service_date) {
        if next < service_date {
            let mut error = ValidationError::new("next_service_date");
            error.message = Some(Cow::from(
                "Next service date cannot be before service date",
            ));
            return Err(error);
        }
    }

    Ok(())
}

/// Collapses validator output into the single message the envelope carries.
/// Any field-level failure is a missing required field.
fn validation_message(errors: &ValidationErrors) -> String {
    let field_errors = errors.field_errors();
    if field_errors.keys().any(|field| *field != "__all__") {
        return REQUIRED_FIELDS_MESSAGE.to_string();
    }

    field_errors
        .values()
        .flat_map(|errors| errors.iter())
        .find_map(|error| error.message.as_ref().map(|message| message.to_string()))
        .unwrap_or_else(|| errors.to_string())
}

/// Accepts `null`, a missing field, a blank string, a string or a JSON number.
/// Blank becomes `None`. Text is parsed as given first, so strings keep their
/// padding; dates and amounts fall back to the trimmed text.
fn blank_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(serde_json::Number),
    }

    let text = match Option::<Raw>::deserialize(deserializer)? {
        None => return Ok(None),
        Some(Raw::Text(text)) => text,
        Some(Raw::Number(number)) => number.to_string(),
    };

    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    text.parse::<T>()
        .or_else(|_| trimmed.parse::<T>())
        .map(Some)
        .map_err(|err| de::Error::custom(format!("invalid value `{trimmed}`: {err}")))
}
