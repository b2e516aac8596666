use serde::{Deserialize, Serialize};

/// The uniform JSON body of every API response.
///
/// Reads carry `data`, mutations carry `message` (and `data` when there is a
/// record to return), failures carry `message` and optionally the raw backend
/// `error` text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> Envelope<T> {
    pub fn data(data: T) -> Self {
        Envelope {
            success: true,
            message: None,
            data: Some(data),
            error: None,
        }
    }

    pub fn with_message(message: impl Into<String>, data: T) -> Self {
        Envelope {
            success: true,
            message: Some(message.into()),
            data: Some(data),
            error: None,
        }
    }
}

impl Envelope<()> {
    pub fn message(message: impl Into<String>) -> Self {
        Envelope {
            success: true,
            message: Some(message.into()),
            data: None,
            error: None,
        }
    }

    pub fn failure(message: impl Into<String>, error: Option<String>) -> Self {
        Envelope {
            success: false,
            message: Some(message.into()),
            data: None,
            error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn omits_absent_members() {
        let body = serde_json::to_value(Envelope::message("Service deleted successfully")).unwrap();
        assert_eq!(
            body,
            json!({ "success": true, "message": "Service deleted successfully" })
        );
    }

    #[test]
    fn failure_carries_error_text_only_when_given() {
        let hidden = serde_json::to_value(Envelope::failure("Failed to fetch services", None)).unwrap();
        assert_eq!(hidden, json!({ "success": false, "message": "Failed to fetch services" }));

        let exposed = serde_json::to_value(Envelope::failure(
            "Failed to fetch services",
            Some("connection refused".to_string()),
        ))
        .unwrap();
        assert_eq!(exposed["error"], json!("connection refused"));
    }

    #[test]
    fn parses_failure_without_data() {
        let envelope: Envelope<Vec<i32>> =
            serde_json::from_value(json!({ "success": false, "message": "Service not found" }))
                .unwrap();
        assert!(!envelope.success);
        assert_eq!(envelope.data, None);
    }
}
